//! # Scattering event processor
//!
//! Implements the two halves of a Monte Carlo step: the free flight, during which the
//! electron is accelerated along the field axis, and the scattering event which ends it.
//! Flight times are drawn from an exponential distribution with the constant maximum rate
//! of the current valley, the difference to the true rate being taken up by the null
//! self-scattering channel of the `CumulativeTable`.
//!
//! Every random number is drawn from the generator passed in by the caller.

use crate::constants::{HBAR, PI};
use crate::device::MaterialInfoDesk;
use crate::electron::{CylindricalWavevector, ElectronState};
use crate::scattering::{CumulativeTable, ScatteringChannel, SelectedRow, Symmetry, Valley};
use rand::Rng;

/// The result of a single attempted scattering event
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScatteringOutcome {
    /// A null collision, the electron state is unchanged
    SelfScattering,
    /// The electron was scattered through the given channel
    Real(ScatteringChannel),
}

impl ScatteringOutcome {
    pub fn is_real(&self) -> bool {
        matches!(self, ScatteringOutcome::Real(_))
    }
}

#[derive(Copy, Clone, Debug)]
pub struct ScatteringEventProcessor<'a> {
    table: &'a CumulativeTable,
    info_desk: &'a MaterialInfoDesk,
}

impl<'a> ScatteringEventProcessor<'a> {
    pub fn new(table: &'a CumulativeTable, info_desk: &'a MaterialInfoDesk) -> Self {
        Self { table, info_desk }
    }

    pub fn table(&self) -> &'a CumulativeTable {
        self.table
    }

    pub fn info_desk(&self) -> &'a MaterialInfoDesk {
        self.info_desk
    }

    /// Creates an electron in `valley` with energy uniform in `[0, maximum_energy)` and a
    /// random direction
    pub fn initialise<R: Rng>(
        &self,
        valley: Valley,
        maximum_energy: f64,
        rng: &mut R,
    ) -> ElectronState {
        let mut electron = ElectronState::at_rest(valley);
        let energy = maximum_energy * rng.gen::<f64>();
        self.isotropic_event(&mut electron, valley, energy, rng);
        electron
    }

    /// Draws the duration of the next free flight in `valley`, in seconds
    pub fn sample_flight_time<R: Rng>(&self, valley: Valley, rng: &mut R) -> f64 {
        // Uniform on (0, 1], so the logarithm is always finite
        let draw = 1_f64 - rng.gen::<f64>();
        -draw.ln() / self.table.maximum_rate(valley)
    }

    /// Accelerates the electron in a field of `field` V/cm for `flight_time` seconds
    ///
    /// Only the axial component of the wavevector changes
    pub fn apply_field(&self, electron: &mut ElectronState, flight_time: f64, field: f64) {
        let valley = electron.valley();
        let wavevector = electron.wavevector();
        let accelerated =
            CylindricalWavevector::new(wavevector.kz - field * flight_time / HBAR, wavevector.kr);
        let energy = self
            .info_desk
            .energy_from_wavevector(valley, accelerated.magnitude());
        electron.update(energy, accelerated, valley, self.info_desk);
    }

    /// Samples the channel which ends the current flight and applies it to the electron
    pub fn sample_scattering_event<R: Rng>(
        &self,
        electron: &mut ElectronState,
        rng: &mut R,
    ) -> ScatteringOutcome {
        let valley = electron.valley();
        let draw = rng.gen::<f64>();
        match self.table.select_row(valley, electron.energy(), draw) {
            SelectedRow::SelfScattering => ScatteringOutcome::SelfScattering,
            SelectedRow::Channel(index) => {
                let channel = self.table.channels(valley)[index];
                self.apply_channel(electron, &channel, rng);
                ScatteringOutcome::Real(channel)
            }
        }
    }

    /// Moves the electron to the final state of `channel`
    pub fn apply_channel<R: Rng>(
        &self,
        electron: &mut ElectronState,
        channel: &ScatteringChannel,
        rng: &mut R,
    ) {
        match channel.symmetry {
            Symmetry::Isotropic => {
                self.isotropic_event(electron, channel.destination, channel.energy_shift, rng)
            }
            Symmetry::Anisotropic => {
                self.anisotropic_event(electron, channel.destination, channel.energy_shift, rng)
            }
        }
    }

    /// Scatters into a direction drawn uniformly in the (kz, kr) plane
    pub fn isotropic_event<R: Rng>(
        &self,
        electron: &mut ElectronState,
        destination: Valley,
        energy_shift: f64,
        rng: &mut R,
    ) {
        let energy = (electron.energy() + energy_shift).max(0_f64);
        let magnitude = self.info_desk.wavevector_magnitude(destination, energy);
        let angle = 2_f64 * PI * rng.gen::<f64>();
        let wavevector =
            CylindricalWavevector::new(magnitude * angle.cos(), magnitude * angle.sin());
        electron.update(energy, wavevector, destination, self.info_desk);
    }

    /// Scatters through a polar angle weighted toward the initial direction
    ///
    /// The polar angle is measured from the initial wavevector and the azimuth about it is
    /// uniform.
    pub fn anisotropic_event<R: Rng>(
        &self,
        electron: &mut ElectronState,
        destination: Valley,
        energy_shift: f64,
        rng: &mut R,
    ) {
        let initial = electron.energy();
        let cos_theta = polar_cosine(initial, initial + energy_shift, rng.gen::<f64>());
        let azimuth = 2_f64 * PI * rng.gen::<f64>();

        let energy = (initial + energy_shift).max(0_f64);
        let magnitude = self.info_desk.wavevector_magnitude(destination, energy);

        let cos_alpha = electron.wavevector().axial_cosine();
        let sin_alpha = (1_f64 - cos_alpha.powi(2)).max(0_f64).sqrt();
        let sin_theta = (1_f64 - cos_theta.powi(2)).max(0_f64).sqrt();
        let cos_final =
            (cos_alpha * cos_theta - sin_alpha * sin_theta * azimuth.cos()).clamp(-1_f64, 1_f64);
        let sin_final = (1_f64 - cos_final.powi(2)).max(0_f64).sqrt();

        let wavevector = CylindricalWavevector::new(magnitude * cos_final, magnitude * sin_final);
        electron.update(energy, wavevector, destination, self.info_desk);
    }
}

/// Cosine of the polar scattering angle for polar optical scattering from `initial` to
/// `last` eV, given a uniform draw in `[0, 1)`
///
/// Forbidden transitions and the equal energy limit scatter forward. When either energy is
/// zero the distribution is isotropic.
pub(crate) fn polar_cosine(initial: f64, last: f64, draw: f64) -> f64 {
    if initial < 0_f64 || last < 0_f64 {
        return 1_f64;
    }
    let separation = (initial.sqrt() - last.sqrt()).powi(2);
    if separation <= f64::EPSILON * (initial + last) {
        return 1_f64;
    }
    let xi = 2_f64 * (initial * last).sqrt() / separation;
    if xi <= f64::EPSILON {
        return 1_f64 - 2_f64 * draw;
    }
    let cosine = ((1_f64 + xi) - (1_f64 + 2_f64 * xi).powf(draw)) / xi;
    cosine.clamp(-1_f64, 1_f64)
}

#[cfg(test)]
mod test {
    use super::{polar_cosine, ScatteringEventProcessor, ScatteringOutcome};
    use crate::constants::HBAR;
    use crate::device::{Material, MaterialInfoDesk};
    use crate::electron::{CylindricalWavevector, ElectronState};
    use crate::scattering::{CumulativeTable, RateTable, Valley};
    use crate::spectral::EnergyAxisBuilder;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn setup() -> (MaterialInfoDesk, CumulativeTable) {
        let info_desk = Material::GaAs.info_desk(300_f64).unwrap();
        let axis = EnergyAxisBuilder::new()
            .with_number_of_points(100)
            .with_energy_range(0_f64..1_f64)
            .build()
            .unwrap();
        let rates = RateTable::build(&axis, &info_desk).unwrap();
        let table = CumulativeTable::build(&rates);
        (info_desk, table)
    }

    #[test]
    fn flight_times_are_exponentially_distributed() {
        let (info_desk, table) = setup();
        let processor = ScatteringEventProcessor::new(&table, &info_desk);
        let mut rng = StdRng::seed_from_u64(1);
        let rate = table.maximum_rate(Valley::Gamma);

        let n = 20_000;
        let mut samples = (0..n)
            .map(|_| processor.sample_flight_time(Valley::Gamma, &mut rng))
            .collect::<Vec<_>>();
        assert!(samples.iter().all(|tau| tau.is_finite() && *tau >= 0_f64));
        samples.sort_by(|a, b| a.total_cmp(b));

        // Kolmogorov-Smirnov distance to the analytic distribution function
        let statistic = samples
            .iter()
            .enumerate()
            .map(|(index, tau)| {
                let analytic = 1_f64 - (-rate * tau).exp();
                let below = index as f64 / n as f64;
                let above = (index + 1) as f64 / n as f64;
                (analytic - below).abs().max((above - analytic).abs())
            })
            .fold(0_f64, f64::max);
        assert!(statistic < 1.949 / (n as f64).sqrt());

        let mean = samples.iter().sum::<f64>() / n as f64;
        assert_relative_eq!(mean * rate, 1_f64, epsilon = 5_f64 / (n as f64).sqrt());
    }

    #[test]
    fn self_scattering_fraction_matches_the_table() {
        let (info_desk, table) = setup();
        let processor = ScatteringEventProcessor::new(&table, &info_desk);
        let mut rng = StdRng::seed_from_u64(2);
        let n = 20_000;

        for (valley, energy) in [(Valley::Gamma, 0.05), (Valley::Gamma, 0.5), (Valley::L, 0.2)] {
            let mut electron = processor.initialise(valley, 0_f64, &mut rng);
            processor.isotropic_event(&mut electron, valley, energy, &mut rng);
            assert_relative_eq!(electron.energy(), energy, max_relative = 1e-12);

            let expected = table.self_scattering_probability(valley, energy);
            let mut count = 0;
            for _ in 0..n {
                let mut trial = electron;
                if processor.sample_scattering_event(&mut trial, &mut rng)
                    == ScatteringOutcome::SelfScattering
                {
                    count += 1;
                }
            }
            let observed = count as f64 / n as f64;
            let sigma = (expected * (1_f64 - expected) / n as f64).sqrt();
            assert!(
                (observed - expected).abs() <= 5_f64 * sigma + 1e-12,
                "{valley} at {energy} eV: observed {observed}, expected {expected}"
            );
        }
    }

    #[test]
    fn self_scattering_over_a_driven_run_matches_the_table() {
        let (info_desk, table) = setup();
        let processor = ScatteringEventProcessor::new(&table, &info_desk);
        let mut rng = StdRng::seed_from_u64(21);
        let mut electron = processor.initialise(Valley::Gamma, 0.05, &mut rng);

        let flights = 100_000;
        let (mut expected, mut variance, mut observed) = (0_f64, 0_f64, 0_u64);
        for _ in 0..flights {
            let flight_time = processor.sample_flight_time(electron.valley(), &mut rng);
            processor.apply_field(&mut electron, flight_time, 1e4);
            let probability =
                table.self_scattering_probability(electron.valley(), electron.energy());
            expected += probability;
            variance += probability * (1_f64 - probability);
            if processor.sample_scattering_event(&mut electron, &mut rng)
                == ScatteringOutcome::SelfScattering
            {
                observed += 1;
            }
        }

        assert!(observed > 0 && observed < flights);
        assert!(
            (observed as f64 - expected).abs() <= 5_f64 * variance.sqrt() + 1_f64,
            "observed {observed} null events, expected {expected}"
        );
    }

    #[test]
    fn null_events_leave_the_electron_unchanged() {
        let (info_desk, table) = setup();
        let processor = ScatteringEventProcessor::new(&table, &info_desk);
        let mut rng = StdRng::seed_from_u64(3);
        let mut electron = processor.initialise(Valley::Gamma, 0.05, &mut rng);

        let mut nulls = 0;
        for _ in 0..1_000 {
            let before = electron;
            match processor.sample_scattering_event(&mut electron, &mut rng) {
                ScatteringOutcome::SelfScattering => {
                    nulls += 1;
                    assert_eq!(electron, before);
                }
                ScatteringOutcome::Real(channel) => {
                    assert_eq!(electron.valley(), channel.destination);
                }
            }
        }
        assert!(nulls > 0);
    }

    #[test]
    fn an_electron_at_the_band_edge_only_self_scatters() {
        let (info_desk, table) = setup();
        let processor = ScatteringEventProcessor::new(&table, &info_desk);
        let mut rng = StdRng::seed_from_u64(4);
        let mut electron = ElectronState::at_rest(Valley::Gamma);
        for _ in 0..100 {
            assert_eq!(
                processor.sample_scattering_event(&mut electron, &mut rng),
                ScatteringOutcome::SelfScattering
            );
        }
        assert_eq!(electron, ElectronState::at_rest(Valley::Gamma));
    }

    #[test]
    fn the_field_only_changes_the_axial_wavevector() {
        let (info_desk, table) = setup();
        let processor = ScatteringEventProcessor::new(&table, &info_desk);
        let mut electron = ElectronState::at_rest(Valley::Gamma);
        electron.update(
            0_f64,
            CylindricalWavevector::new(1e5, 3e5),
            Valley::Gamma,
            &info_desk,
        );
        let (field, flight_time) = (1e4, 1e-14);
        processor.apply_field(&mut electron, flight_time, field);

        let wavevector = electron.wavevector();
        assert_relative_eq!(wavevector.kz, 1e5 - field * flight_time / HBAR, max_relative = 1e-12);
        assert_eq!(wavevector.kr, 3e5);
        assert_relative_eq!(
            electron.energy(),
            info_desk.energy_from_wavevector(Valley::Gamma, wavevector.magnitude()),
            max_relative = 1e-12
        );
        assert!(electron.velocity() < 0_f64);

        let before = electron;
        processor.apply_field(&mut electron, flight_time, 0_f64);
        assert_relative_eq!(electron.energy(), before.energy(), max_relative = 1e-12);
    }

    #[test]
    fn initial_energies_are_bounded() {
        let (info_desk, table) = setup();
        let processor = ScatteringEventProcessor::new(&table, &info_desk);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..1_000 {
            let electron = processor.initialise(Valley::Gamma, 0.05, &mut rng);
            assert_eq!(electron.valley(), Valley::Gamma);
            assert!(electron.energy() >= 0_f64 && electron.energy() < 0.05);
        }
    }

    #[test]
    fn polar_cosine_handles_its_singular_limits() {
        assert_eq!(polar_cosine(0.1, 0.1, 0.3), 1_f64);
        assert_eq!(polar_cosine(0.01, -0.02, 0.3), 1_f64);
        assert_eq!(polar_cosine(0_f64, 0_f64, 0.3), 1_f64);
        assert_relative_eq!(polar_cosine(0.035, 0_f64, 0.25), 0.5);
        assert_relative_eq!(polar_cosine(0.1, 0.0647, 0_f64), 1_f64, epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn polar_cosine_is_a_valid_cosine(
            initial in 0_f64..2_f64,
            shift in -0.1_f64..0.1_f64,
            draw in 0_f64..1_f64
        ) {
            let cosine = polar_cosine(initial, initial + shift, draw);
            prop_assert!(cosine.is_finite());
            prop_assert!((-1_f64..=1_f64).contains(&cosine));
        }

        #[test]
        fn scattering_conserves_the_target_energy(
            energy in 0.001_f64..1_f64,
            seed in 0_u64..1_000,
            l_valley in proptest::bool::ANY,
            from_axis in proptest::bool::ANY
        ) {
            let (info_desk, table) = setup();
            let processor = ScatteringEventProcessor::new(&table, &info_desk);
            let mut rng = StdRng::seed_from_u64(seed);
            let valley = if l_valley { Valley::L } else { Valley::Gamma };

            for channel in table.channels(valley) {
                let mut electron = processor.initialise(valley, 0_f64, &mut rng);
                processor.isotropic_event(&mut electron, valley, energy, &mut rng);
                if from_axis {
                    processor.apply_field(&mut electron, 1e-14, 1e4);
                }
                let initial = electron.energy();
                processor.apply_channel(&mut electron, channel, &mut rng);

                let target = (initial + channel.energy_shift).max(0_f64);
                let recomputed = info_desk
                    .energy_from_wavevector(channel.destination, electron.wavevector().magnitude());
                prop_assert_eq!(electron.valley(), channel.destination);
                prop_assert!((electron.energy() - target).abs() <= 1e-12 * (1_f64 + target));
                prop_assert!((recomputed - target).abs() <= 1e-9 * (1_f64 + target));
            }
        }
    }
}
