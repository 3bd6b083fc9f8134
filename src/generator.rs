use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{error, warn};

use crate::bounding_box::BoundingBox;
use crate::error::{GunError, Result};
use crate::event::Event;
use crate::source::{ParticleGun, ParticleSource};
use crate::species::{GunSpecies, ParticleDefinition, SpeciesRegistry};
use crate::stats::{BeamDispersion, DispersionKind};
use crate::units::{best_unit, best_unit_vector, Dimension};
use crate::utilities::{is_finite, is_zero, neg, scale, sub, unit_vector};

/// Default gun energy in MeV.
pub const DEFAULT_GUN_ENERGY: f64 = 1.0;

/// Anything that fills an event with primaries, once per event.
pub trait PrimaryGenerator {
    fn generate_primaries(&mut self, event: &mut Event);
}

/// What the gun fired last, for run reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct FireReport {
    pub particle_name: String,
    pub energy: f64,
    /// Energy formatted in its best unit, e.g. "1 MeV".
    pub energy_display: String,
}

/// Single-particle gun confined to a symmetric lab volume.
///
/// The gun keeps its own position, direction and dispersion settings and
/// pushes them into the particle source every time it fires. Setters that
/// receive invalid input log the problem, return an error and keep the
/// previous state, so a bad command never ends a run.
#[derive(Debug)]
pub struct GunGenerator<S: ParticleSource = ParticleGun, R: Rng = StdRng> {
    source: S,
    rng: R,
    lab: BoundingBox,
    species: GunSpecies,
    position: [f64; 3],
    direction: [f64; 3],
    energy: f64,
    particle: ParticleDefinition,
    dispersion: BeamDispersion,
    last_fired: Option<FireReport>,
}

impl GunGenerator<ParticleGun, StdRng> {
    /// Gun backed by a [`ParticleGun`] and an entropy-seeded [`StdRng`].
    pub fn with_defaults<G: SpeciesRegistry + ?Sized>(
        lab_half_extents: [f64; 3],
        registry: &G,
    ) -> Result<Self> {
        Self::seeded(lab_half_extents, registry, None)
    }

    /// Same as [`GunGenerator::with_defaults`], reproducible when `seed` is set.
    pub fn seeded<G: SpeciesRegistry + ?Sized>(
        lab_half_extents: [f64; 3],
        registry: &G,
        seed: Option<u64>,
    ) -> Result<Self> {
        let species = GunSpecies::resolve(registry)?;
        let source = ParticleGun::new(species.electron.clone());
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self::from_parts(lab_half_extents, species, source, rng)
    }
}

impl<S: ParticleSource, R: Rng> GunGenerator<S, R> {
    /// Build a gun inside a lab of the given half extents.
    ///
    /// Gun species are resolved from `registry` once, here. The gun starts on
    /// the lab's negative-z face pointing along +z, firing electrons at
    /// [`DEFAULT_GUN_ENERGY`] with dispersion off.
    pub fn new<G: SpeciesRegistry + ?Sized>(
        lab_half_extents: [f64; 3],
        registry: &G,
        source: S,
        rng: R,
    ) -> Result<Self> {
        let species = GunSpecies::resolve(registry)?;
        Self::from_parts(lab_half_extents, species, source, rng)
    }

    fn from_parts(
        lab_half_extents: [f64; 3],
        species: GunSpecies,
        mut source: S,
        rng: R,
    ) -> Result<Self> {
        let lab = BoundingBox::symmetric(lab_half_extents)?;
        let position = [0.0, 0.0, -lab_half_extents[2]];
        let particle = species.electron.clone();

        source.set_particle_definition(particle.clone());
        source.set_particle_energy(DEFAULT_GUN_ENERGY);
        source.set_particle_position(position);

        Ok(Self {
            source,
            rng,
            lab,
            species,
            position,
            direction: [0.0, 0.0, 1.0],
            energy: DEFAULT_GUN_ENERGY,
            particle,
            dispersion: BeamDispersion::default(),
            last_fired: None,
        })
    }

    pub fn position(&self) -> [f64; 3] {
        self.position
    }

    pub fn direction(&self) -> [f64; 3] {
        self.direction
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn particle(&self) -> &ParticleDefinition {
        &self.particle
    }

    pub fn dispersion(&self) -> &BeamDispersion {
        &self.dispersion
    }

    pub fn lab(&self) -> &BoundingBox {
        &self.lab
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn last_fired(&self) -> Option<&FireReport> {
        self.last_fired.as_ref()
    }

    pub fn is_inside_lab(&self, position: [f64; 3]) -> bool {
        self.lab.contains(position)
    }

    /// Move the gun. Positions outside the lab are rejected.
    pub fn set_position(&mut self, position: [f64; 3]) -> Result<()> {
        if !is_finite(position) {
            return Err(report(GunError::NonFiniteVector {
                quantity: "gun position",
                value: position,
            }));
        }
        if !self.is_inside_lab(position) {
            return Err(report(GunError::OutsideLab {
                position,
                half_extents: self.lab.half_extents(),
            }));
        }
        self.position = position;
        Ok(())
    }

    /// Point the gun along `direction`, ignoring its magnitude.
    ///
    /// A zero vector aims the gun at the origin instead, which is impossible
    /// when the gun already sits there.
    pub fn set_direction(&mut self, direction: [f64; 3]) -> Result<()> {
        if !is_finite(direction) {
            return Err(report(GunError::NonFiniteVector {
                quantity: "gun direction",
                value: direction,
            }));
        }
        let target = if is_zero(direction) {
            neg(self.position)
        } else {
            direction
        };
        match unit_vector(target) {
            Some(unit) => {
                self.direction = unit;
                Ok(())
            }
            None => Err(report(GunError::DegenerateAim {
                direction: self.direction,
            })),
        }
    }

    /// Point the gun from its current position towards `target`.
    pub fn aim_at_position(&mut self, target: [f64; 3]) -> Result<()> {
        if !is_finite(target) {
            return Err(report(GunError::NonFiniteVector {
                quantity: "aim target",
                value: target,
            }));
        }
        let mut offset = sub(target, self.position);
        if !is_finite(offset) {
            // halve both ends so the difference of two huge coordinates stays finite
            offset = sub(scale(target, 0.5), scale(self.position, 0.5));
        }
        match unit_vector(offset) {
            Some(unit) => {
                self.direction = unit;
                Ok(())
            }
            None => Err(report(GunError::AimAtGunPosition {
                position: best_unit_vector(self.position, Dimension::Length),
            })),
        }
    }

    /// Select the dispersion distribution and its scale.
    ///
    /// Unrecognized selectors are stored as [`DispersionKind::None`], which
    /// leaves the firing direction untouched, and are reported as a warning.
    pub fn set_dispersion(&mut self, selector: &str, amplitude_or_sigma: f64) -> Result<DispersionKind> {
        if !amplitude_or_sigma.is_finite() || amplitude_or_sigma < 0.0 {
            return Err(report(GunError::InvalidDispersionScale(amplitude_or_sigma)));
        }
        let kind = DispersionKind::from_selector(selector);
        if kind == DispersionKind::None {
            warn!(
                selector,
                "unrecognized beam distribution; expected u, uniform, g, gaussian or Gaussian. Dispersion has no effect"
            );
        }
        self.dispersion.kind = kind;
        self.dispersion.amplitude_or_sigma = amplitude_or_sigma;
        Ok(kind)
    }

    pub fn set_dispersion_on(&mut self, enabled: bool) {
        self.dispersion.enabled = enabled;
    }

    /// Select one of the gun species by name.
    pub fn set_particle(&mut self, name: &str) -> Result<()> {
        match self.species.get(name) {
            Some(definition) => {
                self.particle = definition.clone();
                self.source.set_particle_definition(definition.clone());
                Ok(())
            }
            None => Err(report(GunError::UnknownParticle(name.to_string()))),
        }
    }

    /// Set the kinetic energy in MeV.
    pub fn set_energy(&mut self, energy: f64) -> Result<()> {
        if !energy.is_finite() || energy <= 0.0 {
            return Err(report(GunError::InvalidEnergy(energy)));
        }
        self.energy = energy;
        self.source.set_particle_energy(energy);
        Ok(())
    }

    /// Direction the next particle leaves along: `base` with dispersion applied.
    pub fn compute_firing_direction(&mut self, base: [f64; 3]) -> [f64; 3] {
        self.dispersion.perturb(base, &mut self.rng)
    }

    /// Fire the gun once into `event` and record what was fired.
    pub fn fire(&mut self, event: &mut Event) {
        self.source.set_particle_position(self.position);
        let direction = self.compute_firing_direction(self.direction);
        self.source.set_particle_momentum_direction(direction);

        self.source.generate_primary_vertex(event);

        let energy = self.source.particle_energy();
        self.last_fired = Some(FireReport {
            particle_name: self.source.particle_definition().name.clone(),
            energy,
            energy_display: best_unit(energy, Dimension::Energy),
        });
    }
}

impl<S: ParticleSource, R: Rng> PrimaryGenerator for GunGenerator<S, R> {
    fn generate_primaries(&mut self, event: &mut Event) {
        self.fire(event);
    }
}

fn report(err: GunError) -> GunError {
    error!("{err}");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::ParticleTable;
    use crate::utilities::magnitude;

    fn lab_gun() -> GunGenerator {
        GunGenerator::seeded([10.0, 10.0, 10.0], &ParticleTable, Some(1)).unwrap()
    }

    fn assert_close(a: [f64; 3], b: [f64; 3]) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-12, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_defaults() {
        let gun = lab_gun();
        assert_eq!(gun.position(), [0.0, 0.0, -10.0]);
        assert_eq!(gun.direction(), [0.0, 0.0, 1.0]);
        assert_eq!(gun.energy(), DEFAULT_GUN_ENERGY);
        assert_eq!(gun.particle().name, "e-");
        assert!(!gun.dispersion().enabled);
        assert!(gun.last_fired().is_none());
        assert_eq!(gun.source().position, [0.0, 0.0, -10.0]);
    }

    #[test]
    fn test_invalid_lab_rejected() {
        let gun = GunGenerator::seeded([10.0, -1.0, 10.0], &ParticleTable, Some(1));
        assert!(matches!(gun, Err(GunError::InvalidLab { .. })));
    }

    #[test]
    fn test_set_position_inside_lab() {
        let mut gun = lab_gun();
        let inside = [[0.0, 0.0, 0.0], [10.0, -10.0, 10.0], [-3.5, 9.99, 0.25]];
        for p in inside {
            gun.set_position(p).unwrap();
            assert_eq!(gun.position(), p);
        }
    }

    #[test]
    fn test_set_position_outside_lab_keeps_state() {
        let mut gun = lab_gun();
        gun.set_position([1.0, 2.0, 3.0]).unwrap();
        let outside = [[20.0, 0.0, 0.0], [0.0, -10.5, 0.0], [0.0, 0.0, 1e9]];
        for p in outside {
            assert!(matches!(gun.set_position(p), Err(GunError::OutsideLab { .. })));
            assert_eq!(gun.position(), [1.0, 2.0, 3.0]);
        }
        assert!(gun.set_position([f64::NAN, 0.0, 0.0]).is_err());
        assert_eq!(gun.position(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_set_direction_normalizes() {
        let mut gun = lab_gun();
        gun.set_direction([3.0, 0.0, 4.0]).unwrap();
        assert_close(gun.direction(), [0.6, 0.0, 0.8]);
        assert!((magnitude(gun.direction()) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_direction_aims_at_origin() {
        let mut gun = lab_gun();
        gun.set_position([0.0, 3.0, -4.0]).unwrap();
        gun.set_direction([0.0, 0.0, 0.0]).unwrap();
        assert_close(gun.direction(), [0.0, -0.6, 0.8]);
    }

    #[test]
    fn test_zero_direction_at_origin_is_rejected() {
        let mut gun = lab_gun();
        gun.set_direction([1.0, 0.0, 0.0]).unwrap();
        gun.set_position([0.0, 0.0, 0.0]).unwrap();
        let result = gun.set_direction([0.0, 0.0, 0.0]);
        assert!(matches!(result, Err(GunError::DegenerateAim { .. })));
        assert_eq!(gun.direction(), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_aim_at_position() {
        let mut gun = lab_gun();
        gun.aim_at_position([5.0, 5.0, 5.0]).unwrap();
        let norm = 275.0_f64.sqrt();
        assert_close(gun.direction(), [5.0 / norm, 5.0 / norm, 15.0 / norm]);
    }

    #[test]
    fn test_extreme_directions_are_normalized() {
        let mut gun = lab_gun();
        gun.set_direction([1e200, 1e200, 0.0]).unwrap();
        let half = 0.5_f64.sqrt();
        assert_close(gun.direction(), [half, half, 0.0]);

        gun.set_direction([1e-200, 0.0, 0.0]).unwrap();
        assert_eq!(gun.direction(), [1.0, 0.0, 0.0]);

        gun.set_direction([0.0, -f64::MAX, 0.0]).unwrap();
        assert_eq!(gun.direction(), [0.0, -1.0, 0.0]);
    }

    #[test]
    fn test_aim_at_far_away_target() {
        let mut gun = lab_gun();
        gun.aim_at_position([1e300, 1e300, 0.0]).unwrap();
        let half = 0.5_f64.sqrt();
        assert_close(gun.direction(), [half, half, 0.0]);

        gun.set_position([0.0, 0.0, 10.0]).unwrap();
        gun.aim_at_position([0.0, 0.0, -f64::MAX]).unwrap();
        assert_eq!(gun.direction(), [0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_aim_at_target_next_to_gun() {
        let mut gun = lab_gun();
        gun.aim_at_position([0.0, 1e-300, -10.0]).unwrap();
        assert_eq!(gun.direction(), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_aim_at_own_position_keeps_direction() {
        let mut gun = lab_gun();
        gun.set_direction([0.0, 1.0, 0.0]).unwrap();
        let result = gun.aim_at_position([0.0, 0.0, -10.0]);
        assert!(matches!(result, Err(GunError::AimAtGunPosition { .. })));
        assert_eq!(gun.direction(), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_set_dispersion_kinds() {
        let mut gun = lab_gun();
        assert_eq!(gun.set_dispersion("u", 0.1).unwrap(), DispersionKind::Uniform);
        assert_eq!(gun.set_dispersion("Gaussian", 0.2).unwrap(), DispersionKind::Gaussian);
        assert_eq!(gun.dispersion().amplitude_or_sigma, 0.2);
        assert_eq!(gun.set_dispersion("x", 0.3).unwrap(), DispersionKind::None);
        assert_eq!(gun.dispersion().kind, DispersionKind::None);
    }

    #[test]
    fn test_set_dispersion_rejects_negative_scale() {
        let mut gun = lab_gun();
        gun.set_dispersion("g", 0.1).unwrap();
        assert!(gun.set_dispersion("u", -1.0).is_err());
        assert!(gun.set_dispersion("u", f64::NAN).is_err());
        assert_eq!(gun.dispersion().kind, DispersionKind::Gaussian);
        assert_eq!(gun.dispersion().amplitude_or_sigma, 0.1);
    }

    #[test]
    fn test_firing_direction_without_dispersion() {
        let mut gun = lab_gun();
        gun.set_dispersion("g", 1.0).unwrap();
        let d = [0.3, -0.4, 7.0];
        assert_eq!(gun.compute_firing_direction(d), d);
    }

    #[test]
    fn test_firing_direction_degenerate_cases() {
        let mut gun = lab_gun();
        gun.set_dispersion_on(true);
        gun.set_dispersion("uniform", 0.0).unwrap();
        assert_eq!(gun.compute_firing_direction([0.0, 0.0, 1.0]), [0.0, 0.0, 1.0]);

        gun.set_dispersion("x", 5.0).unwrap();
        assert_eq!(gun.compute_firing_direction([0.0, 0.0, 1.0]), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_set_particle_and_energy() {
        let mut gun = lab_gun();
        gun.set_particle("proton").unwrap();
        gun.set_energy(150.0).unwrap();
        assert_eq!(gun.particle().name, "proton");
        assert_eq!(gun.source().particle_definition().name, "proton");
        assert_eq!(gun.source().particle_energy(), 150.0);

        assert!(matches!(gun.set_particle("neutron"), Err(GunError::UnknownParticle(_))));
        assert!(matches!(gun.set_energy(0.0), Err(GunError::InvalidEnergy(_))));
        assert!(gun.set_energy(-5.0).is_err());
        assert_eq!(gun.particle().name, "proton");
        assert_eq!(gun.energy(), 150.0);
    }

    #[test]
    fn test_fire_records_report() {
        let mut gun = lab_gun();
        gun.set_particle("gamma").unwrap();
        gun.set_energy(2000.0).unwrap();
        gun.set_position([1.0, 2.0, 3.0]).unwrap();

        let mut event = Event::new(0);
        gun.fire(&mut event);

        let vertex = event.primary_vertex(0).unwrap();
        assert_eq!(vertex.position, [1.0, 2.0, 3.0]);
        assert_eq!(vertex.particles[0].direction, [0.0, 0.0, 1.0]);

        let report = gun.last_fired().unwrap();
        assert_eq!(report.particle_name, "gamma");
        assert_eq!(report.energy, 2000.0);
        assert_eq!(report.energy_display, "2 GeV");
    }

    #[test]
    fn test_fire_uses_dispersed_direction_without_changing_gun() {
        let mut gun = lab_gun();
        gun.set_dispersion_on(true);
        gun.set_dispersion("g", 0.1).unwrap();

        let mut event = Event::new(0);
        gun.generate_primaries(&mut event);

        let fired = event.primary_vertex(0).unwrap().particles[0].direction;
        assert_ne!(fired, [0.0, 0.0, 1.0]);
        assert_eq!(gun.direction(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_send_bound() {
        fn assert_send<T: Send>() {}
        assert_send::<GunGenerator>();
    }
}
