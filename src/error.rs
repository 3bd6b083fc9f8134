use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, GunError>;

/// Errors raised while configuring or commanding the gun.
///
/// Gun setters never abort a run: they return one of these, leave the
/// previous state in place and the caller decides whether to carry on.
#[derive(Debug, Error)]
pub enum GunError {
    /// Requested gun position lies outside the lab volume.
    #[error("gun position {position:?} must be inside lab volume (half extents {half_extents:?})")]
    OutsideLab {
        position: [f64; 3],
        half_extents: [f64; 3],
    },

    /// Zero direction requested while the gun sits at the origin.
    #[error("cannot aim gun at (0, 0, 0) since gun position = (0, 0, 0); gun direction remains {direction:?}")]
    DegenerateAim { direction: [f64; 3] },

    /// Aim target coincides with the gun position.
    #[error("cannot aim gun at current gun position {position}; gun direction unchanged")]
    AimAtGunPosition { position: String },

    #[error("{quantity} must have finite components, got {value:?}")]
    NonFiniteVector {
        quantity: &'static str,
        value: [f64; 3],
    },

    #[error("unknown particle species '{0}'")]
    UnknownParticle(String),

    #[error("gun energy must be finite and positive, got {0}")]
    InvalidEnergy(f64),

    #[error("dispersion amplitude or sigma must be finite and non-negative, got {0}")]
    InvalidDispersionScale(f64),

    #[error("lab half extents must be finite and non-negative, got {half_extents:?}")]
    InvalidLab { half_extents: [f64; 3] },

    #[error("command not found: '{0}'")]
    UnknownCommand(String),

    #[error("{command}: missing parameter '{parameter}'")]
    MissingParameter {
        command: String,
        parameter: &'static str,
    },

    #[error("{command}: invalid value '{value}'")]
    InvalidParameter { command: String, value: String },

    #[error("unknown unit '{unit}' for {dimension}")]
    UnknownUnit { unit: String, dimension: &'static str },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
