use crate::device::MaterialInfoDesk;
use crate::scattering::Valley;

/// A wavevector decomposed into its component along the field and the radial remainder, in 1/cm
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CylindricalWavevector {
    pub kz: f64,
    pub kr: f64,
}

impl CylindricalWavevector {
    pub fn new(kz: f64, kr: f64) -> Self {
        Self { kz, kr }
    }

    pub fn magnitude(&self) -> f64 {
        self.kz.hypot(self.kr)
    }

    /// The cosine of the angle between the wavevector and the field axis
    ///
    /// A null wavevector is taken to point along the axis
    pub fn axial_cosine(&self) -> f64 {
        let magnitude = self.magnitude();
        if magnitude > 0_f64 {
            (self.kz / magnitude).clamp(-1_f64, 1_f64)
        } else {
            1_f64
        }
    }
}

/// The state of the simulated electron between two events
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ElectronState {
    valley: Valley,
    wavevector: CylindricalWavevector,
    energy: f64,
    velocity: f64,
}

impl ElectronState {
    /// An electron at the bottom of `valley`
    pub fn at_rest(valley: Valley) -> Self {
        Self {
            valley,
            wavevector: CylindricalWavevector::default(),
            energy: 0_f64,
            velocity: 0_f64,
        }
    }

    /// Replaces the whole state, recomputing the axial velocity from the new wavevector
    ///
    /// Negative energies, which can only come from rounding, are stored as zero
    pub fn update(
        &mut self,
        energy: f64,
        wavevector: CylindricalWavevector,
        valley: Valley,
        info_desk: &MaterialInfoDesk,
    ) {
        *self = Self {
            valley,
            wavevector,
            energy: energy.max(0_f64),
            velocity: info_desk.velocity(valley, wavevector.kz),
        };
    }

    pub fn valley(&self) -> Valley {
        self.valley
    }

    pub fn wavevector(&self) -> CylindricalWavevector {
        self.wavevector
    }

    /// Kinetic energy measured from the bottom of the current valley, in eV
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Group velocity along the field axis, in cm / s
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.energy.is_finite()
            && self.velocity.is_finite()
            && self.wavevector.kz.is_finite()
            && self.wavevector.kr.is_finite()
    }
}
