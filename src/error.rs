use crate::scattering::Valley;
use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Errors raised while assembling the rate tables, the energy axis or the run settings
///
/// All of these are fatal, they are raised before any random number is drawn
pub enum BuildError {
    #[error("the energy axis must contain at least one point")]
    EmptyEnergyAxis,
    #[error("the energy axis must be strictly increasing, found {previous} followed by {next} at index {index}")]
    NonMonotonicEnergyAxis { index: usize, previous: f64, next: f64 },
    #[error("the energy axis contains a non-finite value at index {0}")]
    NonFiniteEnergy(usize),
    #[error("the maximum total scattering rate in the {0} valley is zero or not finite")]
    ZeroMaximumRate(Valley),
    #[error("the applied field must be finite and non-negative, found {0}")]
    InvalidField(f64),
    #[error("the event budget must be positive")]
    ZeroEventBudget,
    #[error("the initial energy must be finite and non-negative, found {0}")]
    InvalidInitialEnergy(f64),
    #[error("the lattice temperature must be finite and positive, found {0}")]
    InvalidTemperature(f64),
    #[error("unknown valley identity `{0}`")]
    UnknownValley(String),
    #[error("the flight cap {cap} must be at least the event budget {budget}")]
    FlightCapBelowBudget { cap: u64, budget: u64 },
}

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Errors raised while a trajectory is running
pub enum SimulationError {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error("the electron reached a non-finite state after {flights} flights")]
    NonFiniteState { flights: u64 },
}

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Error for IO events
pub enum IOError {
    #[error("IO Failue: {0}")]
    IO(#[from] std::io::Error),
}
