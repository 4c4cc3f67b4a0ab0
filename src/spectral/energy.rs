use crate::error::BuildError;
use ndarray::{Array1, ArrayView1};
use std::ops::Range;

pub struct EnergyAxisBuilder<EnergyRange> {
    number_of_points: usize,
    energy_range: EnergyRange,
}

impl EnergyAxisBuilder<()> {
    pub fn new() -> Self {
        Self {
            number_of_points: 0,
            energy_range: (),
        }
    }
}

impl Default for EnergyAxisBuilder<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<EnergyRange> EnergyAxisBuilder<EnergyRange> {
    pub fn with_number_of_points(self, number_of_points: usize) -> Self {
        EnergyAxisBuilder {
            number_of_points,
            energy_range: self.energy_range,
        }
    }

    pub fn with_energy_range(self, energy_range: Range<f64>) -> EnergyAxisBuilder<Range<f64>> {
        EnergyAxisBuilder {
            number_of_points: self.number_of_points,
            energy_range,
        }
    }
}

impl EnergyAxisBuilder<Range<f64>> {
    /// Build a linearly spaced axis which includes both ends of the range
    pub fn build(self) -> Result<EnergyAxis, BuildError> {
        let points = match self.number_of_points {
            0 => Array1::zeros(0),
            1 => Array1::from_elem(1, self.energy_range.start),
            n => Array1::linspace(self.energy_range.start, self.energy_range.end, n),
        };
        EnergyAxis::from_points(points.to_vec())
    }
}

/// The ordered sample energies (eV) on which all scattering rates are tabulated
#[derive(Clone, Debug)]
pub struct EnergyAxis {
    points: Vec<f64>,
}

impl EnergyAxis {
    /// Validates and wraps an explicit set of sample energies
    pub fn from_points(points: Vec<f64>) -> Result<Self, BuildError> {
        if points.is_empty() {
            return Err(BuildError::EmptyEnergyAxis);
        }
        if let Some(index) = points.iter().position(|energy| !energy.is_finite()) {
            return Err(BuildError::NonFiniteEnergy(index));
        }
        if let Some(index) = points.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(BuildError::NonMonotonicEnergyAxis {
                index: index + 1,
                previous: points[index],
                next: points[index + 1],
            });
        }
        Ok(Self { points })
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(self.points.as_slice())
    }

    pub fn energy_at(&self, index: usize) -> f64 {
        self.points[index]
    }

    pub fn minimum(&self) -> f64 {
        self.points[0]
    }

    pub fn maximum(&self) -> f64 {
        self.points[self.num_points() - 1]
    }

    /// Index of the sample closest to `energy`
    ///
    /// Ties go to the lower index, energies outside the axis map to the closest edge
    /// and a NaN maps to the first sample.
    pub fn nearest_index(&self, energy: f64) -> usize {
        let points = self.points.as_slice();
        if energy.is_nan() || energy <= points[0] {
            return 0;
        }
        let last = points.len() - 1;
        if energy >= points[last] {
            return last;
        }
        // First index with a sample strictly above `energy`, always in 1..=last here
        let upper = points.partition_point(|&point| point <= energy);
        let lower = upper - 1;
        if energy - points[lower] <= points[upper] - energy {
            lower
        } else {
            upper
        }
    }
}

#[cfg(test)]
mod test {
    use super::{EnergyAxis, EnergyAxisBuilder};
    use crate::error::BuildError;
    use approx::assert_relative_eq;

    #[test]
    fn linear_axis_includes_both_endpoints() {
        let axis = EnergyAxisBuilder::new()
            .with_number_of_points(100)
            .with_energy_range(0_f64..1_f64)
            .build()
            .unwrap();
        assert_eq!(axis.num_points(), 100);
        assert_relative_eq!(axis.minimum(), 0_f64);
        assert_relative_eq!(axis.maximum(), 1_f64);
    }

    #[test]
    fn empty_axis_is_rejected() {
        let result = EnergyAxisBuilder::new()
            .with_energy_range(0_f64..1_f64)
            .build();
        assert!(matches!(result, Err(BuildError::EmptyEnergyAxis)));
    }

    #[test]
    fn non_monotonic_axis_is_rejected() {
        let result = EnergyAxis::from_points(vec![0.0, 0.2, 0.2, 0.4]);
        assert!(matches!(
            result,
            Err(BuildError::NonMonotonicEnergyAxis { index: 2, .. })
        ));
        let result = EnergyAxis::from_points(vec![0.0, 0.3, 0.1]);
        assert!(result.is_err());
    }

    #[test]
    fn non_finite_axis_is_rejected() {
        let result = EnergyAxis::from_points(vec![0.0, f64::NAN, 0.4]);
        assert!(matches!(result, Err(BuildError::NonFiniteEnergy(1))));
    }

    #[test]
    fn nearest_index_picks_the_closest_sample() {
        let axis = EnergyAxis::from_points(vec![0.0, 0.1, 0.2, 0.4]).unwrap();
        assert_eq!(axis.nearest_index(0.04), 0);
        assert_eq!(axis.nearest_index(0.06), 1);
        assert_eq!(axis.nearest_index(0.29), 2);
        assert_eq!(axis.nearest_index(0.31), 3);
    }

    #[test]
    fn nearest_index_breaks_ties_toward_the_lower_sample() {
        let axis = EnergyAxis::from_points(vec![0.0, 0.5, 1.0]).unwrap();
        assert_eq!(axis.nearest_index(0.25), 0);
        assert_eq!(axis.nearest_index(0.75), 1);
    }

    #[test]
    fn out_of_range_energies_clamp_to_the_edges() {
        let axis = EnergyAxis::from_points(vec![0.0, 0.5, 1.0]).unwrap();
        assert_eq!(axis.nearest_index(-3.0), 0);
        assert_eq!(axis.nearest_index(12.0), 2);
        assert_eq!(axis.nearest_index(f64::NAN), 0);
    }
}
