use crate::event::{Event, PrimaryVertex};
use crate::particle::Particle;
use crate::species::ParticleDefinition;

/// Collaborator that turns the gun settings into primary vertices.
pub trait ParticleSource {
    fn set_particle_definition(&mut self, definition: ParticleDefinition);
    fn set_particle_energy(&mut self, energy: f64);
    fn set_particle_position(&mut self, position: [f64; 3]);
    fn set_particle_momentum_direction(&mut self, direction: [f64; 3]);

    /// Append one primary vertex built from the current settings to `event`.
    fn generate_primary_vertex(&mut self, event: &mut Event);

    fn particle_definition(&self) -> &ParticleDefinition;
    fn particle_energy(&self) -> f64;
}

/// Point source shooting identical particles from a single vertex.
#[derive(Debug, Clone)]
pub struct ParticleGun {
    pub number_of_particles: usize,
    pub definition: ParticleDefinition,
    pub energy: f64,
    pub position: [f64; 3],
    pub direction: [f64; 3],
    /// Emission time in ns.
    pub time: f64,
}

impl ParticleGun {
    pub fn new(definition: ParticleDefinition) -> Self {
        Self::with_particles(1, definition)
    }

    pub fn with_particles(number_of_particles: usize, definition: ParticleDefinition) -> Self {
        Self {
            number_of_particles,
            definition,
            energy: 1.0,
            position: [0.0, 0.0, 0.0],
            direction: [0.0, 0.0, 1.0],
            time: 0.0,
        }
    }

    /// Build one particle from the current settings.
    pub fn sample(&self) -> Particle {
        Particle::new(
            self.definition.clone(),
            self.position,
            self.direction,
            self.energy,
        )
    }
}

impl ParticleSource for ParticleGun {
    fn set_particle_definition(&mut self, definition: ParticleDefinition) {
        self.definition = definition;
    }

    fn set_particle_energy(&mut self, energy: f64) {
        self.energy = energy;
    }

    fn set_particle_position(&mut self, position: [f64; 3]) {
        self.position = position;
    }

    fn set_particle_momentum_direction(&mut self, direction: [f64; 3]) {
        self.direction = direction;
    }

    fn generate_primary_vertex(&mut self, event: &mut Event) {
        let mut vertex = PrimaryVertex::new(self.position, self.time);
        for _ in 0..self.number_of_particles {
            vertex.add_particle(self.sample());
        }
        event.add_primary_vertex(vertex);
    }

    fn particle_definition(&self) -> &ParticleDefinition {
        &self.definition
    }

    fn particle_energy(&self) -> f64 {
        self.energy
    }
}
