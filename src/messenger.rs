// Text command interface for the gun
//
// Commands follow the toolkit's "/directory/command arg ..." layout, e.g.
//   /gun/position 0 0 -5 cm
//   /beam/distribution gaussian 0.01

use rand::Rng;
use tracing::{debug, error};

use crate::error::{GunError, Result};
use crate::generator::GunGenerator;
use crate::source::ParticleSource;
use crate::units::{unit_factor, Dimension};
use crate::utilities::scale;

/// Supported commands with their parameter synopsis.
pub const COMMANDS: &[(&str, &str)] = &[
    ("/gun/position", "x y z [unit]"),
    ("/gun/direction", "x y z"),
    ("/gun/aimAt", "x y z [unit]"),
    ("/gun/particle", "name"),
    ("/gun/energy", "value [unit]"),
    ("/beam/dispersionOn", "bool"),
    ("/beam/distribution", "kind amplitudeOrSigma"),
];

/// A parsed command, values already converted to internal units.
#[derive(Debug, Clone, PartialEq)]
pub enum GunCommand {
    Position([f64; 3]),
    Direction([f64; 3]),
    AimAt([f64; 3]),
    Particle(String),
    Energy(f64),
    DispersionOn(bool),
    Distribution {
        selector: String,
        amplitude_or_sigma: f64,
    },
}

/// Outcome of running a macro: how many lines applied and which failed.
#[derive(Debug, Default)]
pub struct MacroSummary {
    pub applied: usize,
    /// 1-based line number and the error it produced.
    pub failures: Vec<(usize, GunError)>,
}

impl MacroSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Interprets command lines and forwards them to a [`GunGenerator`].
#[derive(Debug, Clone)]
pub struct GunMessenger {
    pub default_length_unit: String,
    pub default_energy_unit: String,
}

impl Default for GunMessenger {
    fn default() -> Self {
        Self {
            default_length_unit: "cm".to_string(),
            default_energy_unit: "GeV".to_string(),
        }
    }
}

impl GunMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one line. Blank lines and `#` comments yield `Ok(None)`.
    pub fn parse(&self, line: &str) -> Result<Option<GunCommand>> {
        let line = match line.find('#') {
            Some(idx) => &line[..idx],
            None => line,
        };
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = tokens.collect();
        if let Some(max) = max_arguments(name) {
            if let Some(extra) = args.get(max) {
                return Err(GunError::InvalidParameter {
                    command: name.to_string(),
                    value: extra.to_string(),
                });
            }
        }
        let command = match name {
            "/gun/position" => {
                GunCommand::Position(self.vector_with_unit(name, &args, Dimension::Length)?)
            }
            "/gun/direction" => GunCommand::Direction(vector(name, &args)?),
            "/gun/aimAt" => {
                GunCommand::AimAt(self.vector_with_unit(name, &args, Dimension::Length)?)
            }
            "/gun/particle" => {
                GunCommand::Particle(required(name, &args, 0, "name")?.to_string())
            }
            "/gun/energy" => {
                let value = number(name, required(name, &args, 0, "value")?)?;
                let unit = args.get(1).copied().unwrap_or(self.default_energy_unit.as_str());
                GunCommand::Energy(value * unit_factor(unit, Dimension::Energy)?)
            }
            "/beam/dispersionOn" => {
                GunCommand::DispersionOn(boolean(name, required(name, &args, 0, "bool")?)?)
            }
            "/beam/distribution" => {
                let selector = required(name, &args, 0, "kind")?.to_string();
                let amplitude_or_sigma =
                    number(name, required(name, &args, 1, "amplitudeOrSigma")?)?;
                GunCommand::Distribution {
                    selector,
                    amplitude_or_sigma,
                }
            }
            other => return Err(GunError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }

    /// Parse and execute one line against `gun`.
    pub fn apply<S: ParticleSource, R: Rng>(
        &self,
        gun: &mut GunGenerator<S, R>,
        line: &str,
    ) -> Result<()> {
        let parsed = self.parse(line).map_err(|err| {
            error!("{err}");
            err
        })?;
        match parsed {
            Some(command) => execute(gun, command),
            None => Ok(()),
        }
    }

    /// Run every line of `text`; failing lines are recorded and skipped.
    pub fn apply_macro<S: ParticleSource, R: Rng>(
        &self,
        gun: &mut GunGenerator<S, R>,
        text: &str,
    ) -> MacroSummary {
        let mut summary = MacroSummary::default();
        for (idx, line) in text.lines().enumerate() {
            match self.parse(line) {
                Ok(None) => {}
                Ok(Some(command)) => match execute(gun, command) {
                    Ok(()) => summary.applied += 1,
                    Err(err) => summary.failures.push((idx + 1, err)),
                },
                Err(err) => {
                    error!(line = idx + 1, "{err}");
                    summary.failures.push((idx + 1, err));
                }
            }
        }
        summary
    }

    fn vector_with_unit(&self, command: &str, args: &[&str], dimension: Dimension) -> Result<[f64; 3]> {
        let v = vector(command, args)?;
        let unit = args.get(3).copied().unwrap_or(self.default_length_unit.as_str());
        let factor = unit_factor(unit, dimension)?;
        Ok(scale(v, factor))
    }
}

/// Forward a parsed command to the matching gun setter.
pub fn execute<S: ParticleSource, R: Rng>(
    gun: &mut GunGenerator<S, R>,
    command: GunCommand,
) -> Result<()> {
    debug!(?command, "applying gun command");
    match command {
        GunCommand::Position(p) => gun.set_position(p),
        GunCommand::Direction(d) => gun.set_direction(d),
        GunCommand::AimAt(t) => gun.aim_at_position(t),
        GunCommand::Particle(name) => gun.set_particle(&name),
        GunCommand::Energy(e) => gun.set_energy(e),
        GunCommand::DispersionOn(on) => {
            gun.set_dispersion_on(on);
            Ok(())
        }
        GunCommand::Distribution {
            selector,
            amplitude_or_sigma,
        } => gun.set_dispersion(&selector, amplitude_or_sigma).map(|_| ()),
    }
}

/// Number of arguments a command accepts, optional ones included.
fn max_arguments(command: &str) -> Option<usize> {
    COMMANDS
        .iter()
        .find(|(name, _)| *name == command)
        .map(|(_, synopsis)| synopsis.split_whitespace().count())
}

fn required<'a>(command: &str, args: &[&'a str], index: usize, parameter: &'static str) -> Result<&'a str> {
    args.get(index)
        .copied()
        .ok_or_else(|| GunError::MissingParameter {
            command: command.to_string(),
            parameter,
        })
}

fn number(command: &str, token: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|_| GunError::InvalidParameter {
            command: command.to_string(),
            value: token.to_string(),
        })
}

fn vector(command: &str, args: &[&str]) -> Result<[f64; 3]> {
    Ok([
        number(command, required(command, args, 0, "x")?)?,
        number(command, required(command, args, 1, "y")?)?,
        number(command, required(command, args, 2, "z")?)?,
    ])
}

fn boolean(command: &str, token: &str) -> Result<bool> {
    match token.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(GunError::InvalidParameter {
            command: command.to_string(),
            value: token.to_string(),
        }),
    }
}
