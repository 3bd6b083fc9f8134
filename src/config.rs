use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::generator::{GunGenerator, DEFAULT_GUN_ENERGY};
use crate::species::ParticleTable;

/// Beam dispersion block of a [`GunConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispersionConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Distribution selector: "u", "uniform", "g", "gaussian" or "Gaussian".
    pub distribution: String,
    #[serde(default)]
    pub amplitude_or_sigma: f64,
}

/// Serializable description of a gun, typically loaded from JSON.
///
/// Lengths are in mm and energies in MeV. Every optional field is applied
/// through the gun's validated setters when [`GunConfig::build`] runs, so a
/// config describing an out-of-lab position fails to build rather than
/// producing a gun in an invalid state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GunConfig {
    pub lab_half_extents: [f64; 3],
    #[serde(default = "default_particle")]
    pub particle: String,
    #[serde(default = "default_energy")]
    pub energy: f64,
    #[serde(default)]
    pub position: Option<[f64; 3]>,
    #[serde(default)]
    pub direction: Option<[f64; 3]>,
    /// Applied after `direction`, so it wins when both are given.
    #[serde(default)]
    pub aim_at: Option<[f64; 3]>,
    #[serde(default)]
    pub dispersion: Option<DispersionConfig>,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_particle() -> String {
    "e-".to_string()
}

fn default_energy() -> f64 {
    DEFAULT_GUN_ENERGY
}

impl GunConfig {
    pub fn new(lab_half_extents: [f64; 3]) -> Self {
        Self {
            lab_half_extents,
            particle: default_particle(),
            energy: default_energy(),
            position: None,
            direction: None,
            aim_at: None,
            dispersion: None,
            seed: None,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Construct the gun described by this config.
    pub fn build(&self) -> Result<GunGenerator> {
        let mut gun = GunGenerator::seeded(self.lab_half_extents, &ParticleTable, self.seed)?;
        gun.set_particle(&self.particle)?;
        gun.set_energy(self.energy)?;
        if let Some(position) = self.position {
            gun.set_position(position)?;
        }
        if let Some(direction) = self.direction {
            gun.set_direction(direction)?;
        }
        if let Some(target) = self.aim_at {
            gun.aim_at_position(target)?;
        }
        if let Some(dispersion) = &self.dispersion {
            gun.set_dispersion(&dispersion.distribution, dispersion.amplitude_or_sigma)?;
            gun.set_dispersion_on(dispersion.enabled);
        }
        Ok(gun)
    }
}
