use rand::distributions::Open01;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::utilities::add;

/// Distribution used to perturb the nominal beam direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispersionKind {
    Uniform,
    Gaussian,
    /// Unrecognized selector; the direction is left untouched.
    None,
}

impl DispersionKind {
    /// Map a user selector to a kind. Matching is case-sensitive.
    pub fn from_selector(selector: &str) -> Self {
        match selector {
            "u" | "uniform" => DispersionKind::Uniform,
            "g" | "gaussian" | "Gaussian" => DispersionKind::Gaussian,
            _ => DispersionKind::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DispersionKind::Uniform => "uniform",
            DispersionKind::Gaussian => "gaussian",
            DispersionKind::None => "none",
        }
    }
}

/// Beam dispersion settings: on/off flag, kind and its single scale.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamDispersion {
    pub enabled: bool,
    pub kind: DispersionKind,
    /// Full width of the uniform box or sigma of the gaussian.
    pub amplitude_or_sigma: f64,
}

impl Default for BeamDispersion {
    fn default() -> Self {
        Self {
            enabled: false,
            kind: DispersionKind::Uniform,
            amplitude_or_sigma: 0.0,
        }
    }
}

impl BeamDispersion {
    pub fn new(enabled: bool, kind: DispersionKind, amplitude_or_sigma: f64) -> Self {
        Self {
            enabled,
            kind,
            amplitude_or_sigma,
        }
    }

    /// Perturb `base` according to these settings.
    ///
    /// The result is not renormalized. With dispersion off, or an
    /// unrecognized kind, `base` is returned as is.
    pub fn perturb<R: Rng + ?Sized>(&self, base: [f64; 3], rng: &mut R) -> [f64; 3] {
        if !self.enabled {
            return base;
        }
        let offset = match self.kind {
            DispersionKind::Uniform => {
                let a = self.amplitude_or_sigma;
                // shift (0, 1) draws onto (-0.5, 0.5) before scaling
                let mut draw = || (rng.sample::<f64, _>(Open01) - 0.5) * a;
                [draw(), draw(), draw()]
            }
            DispersionKind::Gaussian => {
                let Ok(normal) = Normal::new(0.0, self.amplitude_or_sigma) else {
                    return base;
                };
                [normal.sample(rng), normal.sample(rng), normal.sample(rng)]
            }
            DispersionKind::None => return base,
        };
        add(base, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_selector_mapping() {
        assert_eq!(DispersionKind::from_selector("u"), DispersionKind::Uniform);
        assert_eq!(DispersionKind::from_selector("uniform"), DispersionKind::Uniform);
        assert_eq!(DispersionKind::from_selector("g"), DispersionKind::Gaussian);
        assert_eq!(DispersionKind::from_selector("gaussian"), DispersionKind::Gaussian);
        assert_eq!(DispersionKind::from_selector("Gaussian"), DispersionKind::Gaussian);
    }

    #[test]
    fn test_selector_is_case_sensitive() {
        assert_eq!(DispersionKind::from_selector("Uniform"), DispersionKind::None);
        assert_eq!(DispersionKind::from_selector("U"), DispersionKind::None);
        assert_eq!(DispersionKind::from_selector("GAUSSIAN"), DispersionKind::None);
        assert_eq!(DispersionKind::from_selector("x"), DispersionKind::None);
        assert_eq!(DispersionKind::from_selector(""), DispersionKind::None);
    }

    #[test]
    fn test_disabled_returns_base_exactly() {
        let mut rng = StdRng::seed_from_u64(1);
        let d = BeamDispersion::new(false, DispersionKind::Gaussian, 5.0);
        let base = [0.1, -0.2, 0.97];
        for _ in 0..10 {
            assert_eq!(d.perturb(base, &mut rng), base);
        }
    }

    #[test]
    fn test_uniform_zero_amplitude_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        let d = BeamDispersion::new(true, DispersionKind::Uniform, 0.0);
        let base = [0.0, 0.0, 1.0];
        for _ in 0..10 {
            assert_eq!(d.perturb(base, &mut rng), base);
        }
    }

    #[test]
    fn test_unrecognized_kind_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        let d = BeamDispersion::new(true, DispersionKind::from_selector("x"), 3.0);
        let base = [0.6, 0.0, 0.8];
        assert_eq!(d.perturb(base, &mut rng), base);
    }

    #[test]
    fn test_uniform_stays_within_half_amplitude() {
        let mut rng = StdRng::seed_from_u64(42);
        let amplitude = 0.2;
        let d = BeamDispersion::new(true, DispersionKind::Uniform, amplitude);
        let base = [0.0, 0.0, 1.0];

        let mut samples = Vec::new();
        for _ in 0..1000 {
            let s = d.perturb(base, &mut rng);
            for i in 0..3 {
                assert!((s[i] - base[i]).abs() <= 0.5 * amplitude + 1e-12);
            }
            samples.push(s);
        }

        let first = samples[0];
        assert!(!samples.iter().all(|&s| s == first));
    }

    #[test]
    fn test_gaussian_spread_matches_sigma() {
        let mut rng = StdRng::seed_from_u64(7);
        let sigma = 0.05;
        let d = BeamDispersion::new(true, DispersionKind::Gaussian, sigma);
        let base = [0.0, 0.0, 1.0];

        let n = 20_000;
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        for _ in 0..n {
            let s = d.perturb(base, &mut rng);
            let dx = s[0] - base[0];
            sum += dx;
            sum_sq += dx * dx;
        }
        let mean = sum / n as f64;
        let std = (sum_sq / n as f64 - mean * mean).sqrt();
        assert!(mean.abs() < 0.005, "mean {} too far from zero", mean);
        assert!((std - sigma).abs() < 0.005, "std {} vs sigma {}", std, sigma);
    }

    #[test]
    fn test_result_is_not_renormalized() {
        let mut rng = StdRng::seed_from_u64(3);
        let d = BeamDispersion::new(true, DispersionKind::Uniform, 1.0);
        let s = d.perturb([0.0, 0.0, 1.0], &mut rng);
        let mag = (s[0] * s[0] + s[1] * s[1] + s[2] * s[2]).sqrt();
        assert!((mag - 1.0).abs() > 1e-12);
    }

    #[test]
    fn test_same_seed_same_perturbation() {
        let d = BeamDispersion::new(true, DispersionKind::Gaussian, 0.1);
        let mut rng1 = StdRng::seed_from_u64(99);
        let mut rng2 = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            assert_eq!(d.perturb([0.0, 0.0, 1.0], &mut rng1), d.perturb([0.0, 0.0, 1.0], &mut rng2));
        }
    }
}
