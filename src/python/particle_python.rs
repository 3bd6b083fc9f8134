use crate::particle::Particle;
use pyo3::prelude::*;

#[pyclass(name = "Particle")]
#[derive(Clone)]
pub struct PyParticle {
    pub inner: Particle,
}

#[pymethods]
impl PyParticle {
    #[getter]
    pub fn name(&self) -> String {
        self.inner.name().to_string()
    }
    #[getter]
    pub fn position(&self) -> [f64; 3] {
        self.inner.position
    }
    #[getter]
    pub fn direction(&self) -> [f64; 3] {
        self.inner.direction
    }
    #[getter]
    pub fn energy(&self) -> f64 {
        self.inner.energy
    }

    pub fn __repr__(&self) -> String {
        format!(
            "Particle(name={}, position={:?}, direction={:?}, energy={})",
            self.inner.name(),
            self.inner.position,
            self.inner.direction,
            self.inner.energy
        )
    }
}
