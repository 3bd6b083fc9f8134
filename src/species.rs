use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{GunError, Result};

/// Static properties of a particle species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleDefinition {
    /// Toolkit name, e.g. "e-" or "gamma".
    pub name: String,
    /// PDG Monte Carlo numbering scheme code.
    pub pdg_encoding: i32,
    /// Rest mass in MeV.
    pub mass: f64,
    /// Charge in units of the elementary charge.
    pub charge: f64,
}

impl ParticleDefinition {
    pub fn new(name: &str, pdg_encoding: i32, mass: f64, charge: f64) -> Self {
        Self {
            name: name.to_string(),
            pdg_encoding,
            mass,
            charge,
        }
    }
}

/// Look-up of particle definitions by name.
pub trait SpeciesRegistry {
    fn find_particle(&self, name: &str) -> Option<ParticleDefinition>;
}

/// Built-in particle table keyed by toolkit name.
pub static PARTICLE_TABLE: Lazy<HashMap<&'static str, ParticleDefinition>> = Lazy::new(|| {
    let mut m = HashMap::new();
    let entries: [(&str, i32, f64, f64); 10] = [
        ("e-", 11, 0.51099895, -1.0),
        ("e+", -11, 0.51099895, 1.0),
        ("gamma", 22, 0.0, 0.0),
        ("proton", 2212, 938.27208816, 1.0),
        ("neutron", 2112, 939.56542052, 0.0),
        ("mu-", 13, 105.6583755, -1.0),
        ("mu+", -13, 105.6583755, 1.0),
        ("pi+", 211, 139.57039, 1.0),
        ("pi-", -211, 139.57039, -1.0),
        ("alpha", 1000020040, 3727.3794066, 2.0),
    ];
    for (name, pdg, mass, charge) in entries {
        m.insert(name, ParticleDefinition::new(name, pdg, mass, charge));
    }
    m
});

/// Default registry backed by [`PARTICLE_TABLE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ParticleTable;

impl SpeciesRegistry for ParticleTable {
    fn find_particle(&self, name: &str) -> Option<ParticleDefinition> {
        PARTICLE_TABLE.get(name).cloned()
    }
}

impl SpeciesRegistry for HashMap<String, ParticleDefinition> {
    fn find_particle(&self, name: &str) -> Option<ParticleDefinition> {
        self.get(name).cloned()
    }
}

/// The fixed set of species the gun can shoot, resolved once.
#[derive(Debug, Clone, PartialEq)]
pub struct GunSpecies {
    pub electron: ParticleDefinition,
    pub positron: ParticleDefinition,
    pub gamma: ParticleDefinition,
    pub proton: ParticleDefinition,
}

impl GunSpecies {
    pub const NAMES: [&'static str; 4] = ["e-", "e+", "gamma", "proton"];

    /// Resolve every gun species from `registry`.
    ///
    /// Fails with [`GunError::UnknownParticle`] naming the first species the
    /// registry does not know.
    pub fn resolve<R: SpeciesRegistry + ?Sized>(registry: &R) -> Result<Self> {
        let find = |name: &str| {
            registry
                .find_particle(name)
                .ok_or_else(|| GunError::UnknownParticle(name.to_string()))
        };
        Ok(Self {
            electron: find("e-")?,
            positron: find("e+")?,
            gamma: find("gamma")?,
            proton: find("proton")?,
        })
    }

    pub fn get(&self, name: &str) -> Option<&ParticleDefinition> {
        match name {
            "e-" => Some(&self.electron),
            "e+" => Some(&self.positron),
            "gamma" => Some(&self.gamma),
            "proton" => Some(&self.proton),
            _ => None,
        }
    }
}
