use super::PostProcessorError;
use ndarray::{Array1, ArrayView1};
use ndarray_stats::QuantileExt;

/// Counts of a sample in equally wide bins spanning its range
#[derive(Clone, Debug)]
pub struct Histogram {
    edges: Array1<f64>,
    counts: Array1<usize>,
}

impl Histogram {
    pub fn build(
        samples: ArrayView1<'_, f64>,
        number_of_bins: usize,
    ) -> Result<Self, PostProcessorError> {
        if number_of_bins == 0 {
            return Err(PostProcessorError::ZeroBins);
        }
        if samples.is_empty() {
            return Err(PostProcessorError::EmptySample);
        }
        if samples.iter().any(|sample| !sample.is_finite()) {
            return Err(PostProcessorError::NonFiniteSample);
        }
        let minimum = *samples
            .min()
            .map_err(|_| PostProcessorError::NonFiniteSample)?;
        let mut maximum = *samples
            .max()
            .map_err(|_| PostProcessorError::NonFiniteSample)?;
        // A sample of identical values still needs a bin of finite width
        if maximum <= minimum {
            maximum = minimum + 1_f64;
        }

        let edges = Array1::linspace(minimum, maximum, number_of_bins + 1);
        let width = (maximum - minimum) / number_of_bins as f64;
        let mut counts = Array1::zeros(number_of_bins);
        for &sample in samples.iter() {
            let bin = (((sample - minimum) / width) as usize).min(number_of_bins - 1);
            counts[bin] += 1;
        }
        Ok(Self { edges, counts })
    }

    /// The `bins + 1` bin edges
    pub fn edges(&self) -> &Array1<f64> {
        &self.edges
    }

    pub fn counts(&self) -> &Array1<usize> {
        &self.counts
    }

    pub fn centres(&self) -> Array1<f64> {
        self.edges
            .windows(2)
            .into_iter()
            .map(|pair| 0.5 * (pair[0] + pair[1]))
            .collect()
    }

    /// Counts normalised so the histogram integrates to one
    pub fn density(&self) -> Array1<f64> {
        let total = self.counts.sum() as f64;
        let width = self.edges[1] - self.edges[0];
        self.counts.mapv(|count| count as f64 / (total * width))
    }
}

#[cfg(test)]
mod test {
    use super::Histogram;
    use approx::assert_relative_eq;
    use ndarray::{array, Array1};

    #[test]
    fn samples_land_in_their_bins() {
        let samples = array![0.0, 0.1, 0.45, 0.55, 1.0, 1.0];
        let histogram = Histogram::build(samples.view(), 2).unwrap();
        assert_eq!(histogram.counts(), &array![3, 3]);
        assert_relative_eq!(histogram.edges()[1], 0.5);
        assert_relative_eq!(histogram.centres()[0], 0.25);
        assert_relative_eq!(histogram.density().sum() * 0.5, 1.0);
    }

    #[test]
    fn degenerate_samples_are_handled() {
        assert!(Histogram::build(Array1::<f64>::zeros(0).view(), 4).is_err());
        assert!(Histogram::build(array![1.0].view(), 0).is_err());
        assert!(Histogram::build(array![1.0, f64::NAN].view(), 3).is_err());
        let histogram = Histogram::build(array![2.0, 2.0].view(), 3).unwrap();
        assert_eq!(histogram.counts().sum(), 2);
    }
}
