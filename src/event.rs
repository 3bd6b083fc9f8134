// Event record filled by primary generators
//
// The host transport code owns what happens to the primaries afterwards;
// this crate only ever appends vertices.

use crate::particle::Particle;

/// Emission point of one or more primary particles.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryVertex {
    pub position: [f64; 3],
    /// Emission time in ns.
    pub time: f64,
    pub particles: Vec<Particle>,
}

impl PrimaryVertex {
    pub fn new(position: [f64; 3], time: f64) -> Self {
        PrimaryVertex {
            position,
            time,
            particles: Vec::new(),
        }
    }

    pub fn add_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn number_of_particles(&self) -> usize {
        self.particles.len()
    }
}

/// One simulated event: an id plus the primary vertices generated for it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Event {
    pub event_id: u64,
    vertices: Vec<PrimaryVertex>,
}

impl Event {
    pub fn new(event_id: u64) -> Self {
        Event {
            event_id,
            vertices: Vec::new(),
        }
    }

    pub fn add_primary_vertex(&mut self, vertex: PrimaryVertex) {
        self.vertices.push(vertex);
    }

    pub fn number_of_primary_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn primary_vertex(&self, index: usize) -> Option<&PrimaryVertex> {
        self.vertices.get(index)
    }

    pub fn primary_vertices(&self) -> &[PrimaryVertex] {
        &self.vertices
    }

    /// All primary particles across every vertex, in emission order.
    pub fn primaries(&self) -> impl Iterator<Item = &Particle> {
        self.vertices.iter().flat_map(|v| v.particles.iter())
    }
}
