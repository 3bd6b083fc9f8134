use crate::config::GunConfig;
use crate::error::GunError;
use crate::event::Event;
use crate::generator::GunGenerator;
use crate::messenger::GunMessenger;
use crate::python::particle_python::PyParticle;
use crate::species::ParticleTable;
use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

fn py_err(err: GunError) -> PyErr {
    match err {
        GunError::Io(e) => PyIOError::new_err(e.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

#[pyclass(name = "ParticleGun")]
pub struct PyGun {
    pub inner: GunGenerator,
    messenger: GunMessenger,
    events_fired: u64,
}

#[pymethods]
impl PyGun {
    #[new]
    #[pyo3(signature = (lab_half_extents, *, seed=None))]
    pub fn new(lab_half_extents: [f64; 3], seed: Option<u64>) -> PyResult<Self> {
        let inner = GunGenerator::seeded(lab_half_extents, &ParticleTable, seed).map_err(py_err)?;
        Ok(Self {
            inner,
            messenger: GunMessenger::new(),
            events_fired: 0,
        })
    }

    #[staticmethod]
    pub fn from_json(json: &str) -> PyResult<Self> {
        let inner = GunConfig::from_json_str(json)
            .and_then(|c| c.build())
            .map_err(py_err)?;
        Ok(Self {
            inner,
            messenger: GunMessenger::new(),
            events_fired: 0,
        })
    }

    #[getter]
    pub fn position(&self) -> [f64; 3] {
        self.inner.position()
    }

    #[setter(position)]
    pub fn set_position(&mut self, position: [f64; 3]) -> PyResult<()> {
        self.inner.set_position(position).map_err(py_err)
    }

    #[getter]
    pub fn direction(&self) -> [f64; 3] {
        self.inner.direction()
    }

    #[setter(direction)]
    pub fn set_direction(&mut self, direction: [f64; 3]) -> PyResult<()> {
        self.inner.set_direction(direction).map_err(py_err)
    }

    #[getter]
    pub fn energy(&self) -> f64 {
        self.inner.energy()
    }

    #[setter(energy)]
    pub fn set_energy(&mut self, energy: f64) -> PyResult<()> {
        self.inner.set_energy(energy).map_err(py_err)
    }

    #[getter]
    pub fn particle(&self) -> String {
        self.inner.particle().name.clone()
    }

    #[setter(particle)]
    pub fn set_particle(&mut self, name: &str) -> PyResult<()> {
        self.inner.set_particle(name).map_err(py_err)
    }

    pub fn aim_at(&mut self, target: [f64; 3]) -> PyResult<()> {
        self.inner.aim_at_position(target).map_err(py_err)
    }

    #[pyo3(signature = (kind, amplitude_or_sigma, enabled=true))]
    pub fn set_dispersion(&mut self, kind: &str, amplitude_or_sigma: f64, enabled: bool) -> PyResult<String> {
        let kind = self
            .inner
            .set_dispersion(kind, amplitude_or_sigma)
            .map_err(py_err)?;
        self.inner.set_dispersion_on(enabled);
        Ok(kind.as_str().to_string())
    }

    /// Run one command line, e.g. "/gun/position 0 0 -5 cm".
    pub fn apply(&mut self, command: &str) -> PyResult<()> {
        self.messenger.apply(&mut self.inner, command).map_err(py_err)
    }

    /// Fire once and return the generated primaries.
    pub fn fire(&mut self) -> Vec<PyParticle> {
        let mut event = Event::new(self.events_fired);
        self.inner.fire(&mut event);
        self.events_fired += 1;
        event
            .primaries()
            .cloned()
            .map(|inner| PyParticle { inner })
            .collect()
    }

    pub fn __repr__(&self) -> String {
        format!(
            "ParticleGun(particle={}, energy={}, position={:?}, direction={:?})",
            self.inner.particle().name,
            self.inner.energy(),
            self.inner.position(),
            self.inner.direction()
        )
    }
}
