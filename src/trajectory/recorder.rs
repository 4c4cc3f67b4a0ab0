//! Recording of a single particle trajectory
//!
//! Both recorders keep the same running integrals in a `TransportSummary`. The full recorder
//! also stores a `Snapshot` for every real scattering event, the summary recorder keeps
//! nothing else so its memory use does not grow with the length of the run.

use crate::electron::ElectronState;
use crate::scattering::{Valley, ValleyMap};

/// The state of the electron directly after a real scattering event
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Time since the start of the run in seconds
    pub time: f64,
    pub energy: f64,
    pub valley: Valley,
    /// Axial velocity in cm / s
    pub velocity: f64,
}

impl Snapshot {
    pub fn new(time: f64, electron: &ElectronState) -> Self {
        Self {
            time,
            energy: electron.energy(),
            valley: electron.valley(),
            velocity: electron.velocity(),
        }
    }
}

/// A single free flight, as seen by the recorder
#[derive(Copy, Clone, Debug)]
pub struct Flight {
    pub valley: Valley,
    pub duration: f64,
    pub initial_velocity: f64,
    pub final_velocity: f64,
    pub initial_energy: f64,
    pub midpoint_energy: f64,
    pub final_energy: f64,
}

/// Running integrals over a trajectory
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransportSummary {
    elapsed_time: f64,
    valley_time: ValleyMap<f64>,
    velocity_integral: f64,
    energy_integral: f64,
    realised_events: u64,
    self_scattering_events: u64,
    flights: u64,
}

impl TransportSummary {
    /// Adds a free flight to the running integrals
    ///
    /// The axial velocity is linear and the energy quadratic in time during a flight, so the
    /// trapezoid and Simpson rules are exact.
    pub fn record_flight(&mut self, flight: &Flight) {
        self.elapsed_time += flight.duration;
        self.valley_time[flight.valley] += flight.duration;
        self.velocity_integral +=
            0.5 * flight.duration * (flight.initial_velocity + flight.final_velocity);
        self.energy_integral += flight.duration / 6_f64
            * (flight.initial_energy + 4_f64 * flight.midpoint_energy + flight.final_energy);
        self.flights += 1;
    }

    pub fn record_real_event(&mut self) {
        self.realised_events += 1;
    }

    pub fn record_self_scattering(&mut self) {
        self.self_scattering_events += 1;
    }

    /// Combines the integrals of independent runs
    pub fn merge(&mut self, other: &TransportSummary) {
        self.elapsed_time += other.elapsed_time;
        for valley in Valley::ALL {
            self.valley_time[valley] += other.valley_time[valley];
        }
        self.velocity_integral += other.velocity_integral;
        self.energy_integral += other.energy_integral;
        self.realised_events += other.realised_events;
        self.self_scattering_events += other.self_scattering_events;
        self.flights += other.flights;
    }

    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    pub fn valley_time(&self, valley: Valley) -> f64 {
        self.valley_time[valley]
    }

    pub fn realised_events(&self) -> u64 {
        self.realised_events
    }

    pub fn self_scattering_events(&self) -> u64 {
        self.self_scattering_events
    }

    pub fn flights(&self) -> u64 {
        self.flights
    }

    fn time_average(&self, integral: f64) -> f64 {
        if self.elapsed_time > 0_f64 {
            integral / self.elapsed_time
        } else {
            0_f64
        }
    }

    pub fn time_averaged_velocity(&self) -> f64 {
        self.time_average(self.velocity_integral)
    }

    pub fn mean_energy(&self) -> f64 {
        self.time_average(self.energy_integral)
    }

    /// Fraction of the elapsed time spent in `valley`
    pub fn valley_occupancy(&self, valley: Valley) -> f64 {
        self.time_average(self.valley_time[valley])
    }
}

/// Receives the events of a trajectory as it runs
pub trait Recorder {
    fn summary(&self) -> &TransportSummary;
    fn summary_mut(&mut self) -> &mut TransportSummary;
    /// Called with the initial state and after every real scattering event
    fn record(&mut self, snapshot: Snapshot);
    /// Hands over the recorded snapshots, if the recorder keeps any
    fn take_trajectory(&mut self) -> Option<Vec<Snapshot>>;
}

impl<R: Recorder + ?Sized> Recorder for Box<R> {
    fn summary(&self) -> &TransportSummary {
        (**self).summary()
    }

    fn summary_mut(&mut self) -> &mut TransportSummary {
        (**self).summary_mut()
    }

    fn record(&mut self, snapshot: Snapshot) {
        (**self).record(snapshot)
    }

    fn take_trajectory(&mut self) -> Option<Vec<Snapshot>> {
        (**self).take_trajectory()
    }
}

/// Keeps every snapshot for time resolved analysis
#[derive(Clone, Debug, Default)]
pub struct FullRecorder {
    summary: TransportSummary,
    snapshots: Vec<Snapshot>,
}

impl FullRecorder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            summary: TransportSummary::default(),
            snapshots: Vec::with_capacity(capacity),
        }
    }
}

impl Recorder for FullRecorder {
    fn summary(&self) -> &TransportSummary {
        &self.summary
    }

    fn summary_mut(&mut self) -> &mut TransportSummary {
        &mut self.summary
    }

    fn record(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    fn take_trajectory(&mut self) -> Option<Vec<Snapshot>> {
        Some(std::mem::take(&mut self.snapshots))
    }
}

/// Keeps only the running integrals
#[derive(Clone, Debug, Default)]
pub struct SummaryRecorder {
    summary: TransportSummary,
}

impl Recorder for SummaryRecorder {
    fn summary(&self) -> &TransportSummary {
        &self.summary
    }

    fn summary_mut(&mut self) -> &mut TransportSummary {
        &mut self.summary
    }

    fn record(&mut self, _snapshot: Snapshot) {}

    fn take_trajectory(&mut self) -> Option<Vec<Snapshot>> {
        None
    }
}

/// Which recorder a run is constructed with
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingMode {
    Full,
    Summary,
}

impl RecordingMode {
    pub fn recorder(self) -> Box<dyn Recorder + Send> {
        match self {
            RecordingMode::Full => Box::new(FullRecorder::default()),
            RecordingMode::Summary => Box::new(SummaryRecorder::default()),
        }
    }
}

/// Everything produced by a single particle run
#[derive(Clone, Debug)]
pub struct SimulationResult {
    pub(crate) field: f64,
    pub(crate) trajectory: Option<Vec<Snapshot>>,
    pub(crate) summary: TransportSummary,
    pub(crate) truncated: bool,
}

impl SimulationResult {
    pub fn field(&self) -> f64 {
        self.field
    }

    /// The recorded snapshots, `None` for a summary-only run
    pub fn trajectory(&self) -> Option<&[Snapshot]> {
        self.trajectory.as_deref()
    }

    pub fn summary(&self) -> &TransportSummary {
        &self.summary
    }

    /// Whether the run stopped before the event budget was exhausted
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Mean axial velocity in cm / s
    ///
    /// The mean of the recorded velocity samples when a trajectory was kept, otherwise the
    /// time average of the velocity over the run
    pub fn mean_velocity(&self) -> f64 {
        match self.trajectory.as_deref() {
            Some(snapshots) if !snapshots.is_empty() => {
                snapshots.iter().map(|snapshot| snapshot.velocity).sum::<f64>()
                    / snapshots.len() as f64
            }
            _ => self.summary.time_averaged_velocity(),
        }
    }

    pub fn time_averaged_velocity(&self) -> f64 {
        self.summary.time_averaged_velocity()
    }

    /// Drift velocity along the direction electrons are pushed, opposite to the field
    pub fn drift_velocity(&self) -> f64 {
        -self.mean_velocity()
    }

    pub fn valley_occupancy(&self, valley: Valley) -> f64 {
        self.summary.valley_occupancy(valley)
    }

    /// Time averaged kinetic energy in eV
    pub fn mean_energy(&self) -> f64 {
        self.summary.mean_energy()
    }
}
