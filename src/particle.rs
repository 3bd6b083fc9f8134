use crate::species::ParticleDefinition;

/// A primary particle as emitted by the gun.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub definition: ParticleDefinition,
    pub position: [f64; 3],
    /// Momentum direction; not renormalized after dispersion.
    pub direction: [f64; 3],
    /// Kinetic energy in MeV.
    pub energy: f64,
}

impl Particle {
    pub fn new(
        definition: ParticleDefinition,
        position: [f64; 3],
        direction: [f64; 3],
        energy: f64,
    ) -> Self {
        Self {
            definition,
            position,
            direction,
            energy,
        }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }
}
