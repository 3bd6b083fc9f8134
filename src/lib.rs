// Single-particle primary generator for Monte Carlo transport codes
pub mod bounding_box;
pub mod config;
pub mod error;
pub mod event;
pub mod generator;
pub mod messenger;
pub mod particle;
pub mod run;
pub mod source;
pub mod species;
pub mod stats;
pub mod units;
pub mod utilities;

pub use bounding_box::BoundingBox;
pub use config::{DispersionConfig, GunConfig};
pub use error::{GunError, Result};
pub use event::{Event, PrimaryVertex};
pub use generator::{FireReport, GunGenerator, PrimaryGenerator, DEFAULT_GUN_ENERGY};
pub use messenger::{GunCommand, GunMessenger, MacroSummary};
pub use particle::Particle;
pub use run::RunManager;
pub use source::{ParticleGun, ParticleSource};
pub use species::{GunSpecies, ParticleDefinition, ParticleTable, SpeciesRegistry};
pub use stats::{BeamDispersion, DispersionKind};
pub use units::{best_unit, best_unit_vector, Dimension};

// Import PyO3 items conditionally
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;
#[cfg(feature = "pyo3")]
use pyo3::pymodule;

#[cfg(feature = "pyo3")]
mod python {
    pub mod gun_python;
    pub mod particle_python;
    pub use gun_python::*;
    pub use particle_python::*;
}

#[cfg(feature = "pyo3")]
#[pymodule]
fn particle_gun(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_class::<python::PyGun>()?;
    m.add_class::<python::PyParticle>()?;
    Ok(())
}
