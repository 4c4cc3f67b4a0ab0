//! # Trajectory
//!
//! Drives a single electron through alternating free flights and scattering events until
//! the event budget is spent. The `TrajectorySimulator` is assembled with a builder, which
//! takes the event processor, the run settings and the recorder deciding what is kept.

mod recorder;
mod settings;

pub use recorder::{
    Flight, FullRecorder, Recorder, RecordingMode, SimulationResult, Snapshot, SummaryRecorder,
    TransportSummary,
};
pub use settings::RunSettings;

use crate::electron::ElectronState;
use crate::error::SimulationError;
use crate::processor::{ScatteringEventProcessor, ScatteringOutcome};
use rand::Rng;

/// Builder for a `TrajectorySimulator`
pub struct TrajectorySimulatorBuilder<RefProcessor, RefSettings, Rec> {
    processor: RefProcessor,
    settings: RefSettings,
    recorder: Rec,
}

impl TrajectorySimulatorBuilder<(), (), ()> {
    /// Initialise an empty TrajectorySimulatorBuilder
    pub fn new() -> Self {
        Self {
            processor: (),
            settings: (),
            recorder: (),
        }
    }
}

impl Default for TrajectorySimulatorBuilder<(), (), ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<RefProcessor, RefSettings, Rec> TrajectorySimulatorBuilder<RefProcessor, RefSettings, Rec> {
    /// Attach the event processor, which carries the scattering tables and material
    pub fn with_processor<Processor>(
        self,
        processor: &Processor,
    ) -> TrajectorySimulatorBuilder<&Processor, RefSettings, Rec> {
        TrajectorySimulatorBuilder {
            processor,
            settings: self.settings,
            recorder: self.recorder,
        }
    }

    /// Attach the settings of the run
    pub fn with_settings<Settings>(
        self,
        settings: &Settings,
    ) -> TrajectorySimulatorBuilder<RefProcessor, &Settings, Rec> {
        TrajectorySimulatorBuilder {
            processor: self.processor,
            settings,
            recorder: self.recorder,
        }
    }

    /// Attach the recorder, which is consumed by the run
    pub fn with_recorder<R>(
        self,
        recorder: R,
    ) -> TrajectorySimulatorBuilder<RefProcessor, RefSettings, R> {
        TrajectorySimulatorBuilder {
            processor: self.processor,
            settings: self.settings,
            recorder,
        }
    }
}

impl<'a, Rec: Recorder>
    TrajectorySimulatorBuilder<&'a ScatteringEventProcessor<'a>, &'a RunSettings, Rec>
{
    pub fn build(self) -> TrajectorySimulator<'a, Rec> {
        TrajectorySimulator {
            processor: self.processor,
            settings: self.settings,
            recorder: self.recorder,
        }
    }
}

/// A single particle Monte Carlo run
pub struct TrajectorySimulator<'a, Rec> {
    processor: &'a ScatteringEventProcessor<'a>,
    settings: &'a RunSettings,
    recorder: Rec,
}

impl<'a, Rec: Recorder> TrajectorySimulator<'a, Rec> {
    /// Runs the electron until the number of real events exceeds the budget
    ///
    /// The run stops early, flagged as truncated, when the flight cap is reached or when
    /// the electron sits without a field in an energy bin where no real event can occur.
    pub fn simulate<G: Rng>(mut self, rng: &mut G) -> Result<SimulationResult, SimulationError> {
        let processor = self.processor;
        let settings = self.settings;
        let info_desk = processor.info_desk();
        let field = settings.field();

        let mut electron = processor.initialise(
            settings.initial_valley(),
            settings.initial_energy(),
            rng,
        );
        self.recorder.record(Snapshot::new(0_f64, &electron));

        let mut truncated = false;
        while self.recorder.summary().realised_events() <= settings.event_budget() {
            let flights = self.recorder.summary().flights();
            if flights >= settings.maximum_flights() {
                tracing::warn!(
                    "Run at {:.3e} V/cm hit the cap of {} flights after {} real events",
                    field,
                    flights,
                    self.recorder.summary().realised_events()
                );
                truncated = true;
                break;
            }

            let start = electron;
            let valley = electron.valley();
            let duration = processor.sample_flight_time(valley, rng);
            processor.apply_field(&mut electron, duration, field);
            let midpoint_energy = {
                let (initial, last) = (start.wavevector(), electron.wavevector());
                let kz = 0.5 * (initial.kz + last.kz);
                info_desk.energy_from_wavevector(valley, kz.hypot(last.kr))
            };
            self.recorder.summary_mut().record_flight(&Flight {
                valley,
                duration,
                initial_velocity: start.velocity(),
                final_velocity: electron.velocity(),
                initial_energy: start.energy(),
                midpoint_energy,
                final_energy: electron.energy(),
            });

            let outcome = processor.sample_scattering_event(&mut electron, rng);
            if !electron.is_finite() {
                return Err(SimulationError::NonFiniteState {
                    flights: self.recorder.summary().flights(),
                });
            }
            match outcome {
                ScatteringOutcome::SelfScattering => {
                    self.recorder.summary_mut().record_self_scattering();
                    if field == 0_f64 && is_stalled(processor, &electron) {
                        tracing::warn!(
                            "Electron stalled at {:.4} eV in the {} valley without a field",
                            electron.energy(),
                            electron.valley()
                        );
                        truncated = true;
                        break;
                    }
                }
                ScatteringOutcome::Real(_) => {
                    let summary = self.recorder.summary_mut();
                    summary.record_real_event();
                    let time = summary.elapsed_time();
                    self.recorder.record(Snapshot::new(time, &electron));
                }
            }
        }

        let summary = self.recorder.summary().clone();
        tracing::debug!(
            "Field {:.3e} V/cm: {} real events in {} flights over {:.4e} s",
            field,
            summary.realised_events(),
            summary.flights(),
            summary.elapsed_time()
        );
        Ok(SimulationResult {
            field,
            trajectory: self.recorder.take_trajectory(),
            summary,
            truncated,
        })
    }
}

/// An electron which can only self-scatter and is never accelerated stays put forever
fn is_stalled(processor: &ScatteringEventProcessor<'_>, electron: &ElectronState) -> bool {
    processor
        .table()
        .self_scattering_probability(electron.valley(), electron.energy())
        >= 1_f64
}
