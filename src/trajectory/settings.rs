use crate::error::BuildError;
use crate::scattering::Valley;

/// The parameters of a single particle run
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RunSettings {
    /// The applied field along +z in V / cm
    field: f64,
    /// The run ends once more than this many real scattering events have occurred
    event_budget: u64,
    /// The upper bound of the uniform initial energy distribution in eV
    initial_energy: f64,
    initial_valley: Valley,
    /// Hard cap on the number of free flights, real or null
    maximum_flights: u64,
}

impl RunSettings {
    pub const DEFAULT_INITIAL_ENERGY: f64 = 0.05;
    /// Default flight cap, per unit of event budget
    pub const FLIGHTS_PER_EVENT: u64 = 1_000;

    pub fn new(field: f64, event_budget: u64) -> Result<Self, BuildError> {
        Self {
            field,
            event_budget,
            initial_energy: Self::DEFAULT_INITIAL_ENERGY,
            initial_valley: Valley::Gamma,
            maximum_flights: event_budget.saturating_mul(Self::FLIGHTS_PER_EVENT),
        }
        .validated()
    }

    pub fn with_initial_energy(self, initial_energy: f64) -> Result<Self, BuildError> {
        Self {
            initial_energy,
            ..self
        }
        .validated()
    }

    pub fn with_initial_valley(self, initial_valley: Valley) -> Self {
        Self {
            initial_valley,
            ..self
        }
    }

    pub fn with_maximum_flights(self, maximum_flights: u64) -> Result<Self, BuildError> {
        Self {
            maximum_flights,
            ..self
        }
        .validated()
    }

    fn validated(self) -> Result<Self, BuildError> {
        if !self.field.is_finite() || self.field < 0_f64 {
            return Err(BuildError::InvalidField(self.field));
        }
        if self.event_budget == 0 {
            return Err(BuildError::ZeroEventBudget);
        }
        if !self.initial_energy.is_finite() || self.initial_energy < 0_f64 {
            return Err(BuildError::InvalidInitialEnergy(self.initial_energy));
        }
        if self.maximum_flights < self.event_budget {
            return Err(BuildError::FlightCapBelowBudget {
                cap: self.maximum_flights,
                budget: self.event_budget,
            });
        }
        Ok(self)
    }

    pub fn field(&self) -> f64 {
        self.field
    }

    pub fn event_budget(&self) -> u64 {
        self.event_budget
    }

    pub fn initial_energy(&self) -> f64 {
        self.initial_energy
    }

    pub fn initial_valley(&self) -> Valley {
        self.initial_valley
    }

    pub fn maximum_flights(&self) -> u64 {
        self.maximum_flights
    }
}
