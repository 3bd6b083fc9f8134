// Unit tables and human readable formatting
//
// Internal units: lengths in mm, energies in MeV.

use crate::error::{GunError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Energy,
    Length,
}

impl Dimension {
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Energy => "Energy",
            Dimension::Length => "Length",
        }
    }

    /// Units of this dimension as (symbol, value in internal units), ascending.
    pub fn units(&self) -> &'static [(&'static str, f64)] {
        match self {
            Dimension::Energy => ENERGY_UNITS,
            Dimension::Length => LENGTH_UNITS,
        }
    }

    fn base_symbol(&self) -> &'static str {
        match self {
            Dimension::Energy => "MeV",
            Dimension::Length => "mm",
        }
    }
}

pub const ENERGY_UNITS: &[(&str, f64)] = &[
    ("eV", 1e-6),
    ("keV", 1e-3),
    ("MeV", 1.0),
    ("GeV", 1e3),
    ("TeV", 1e6),
    ("PeV", 1e9),
];

pub const LENGTH_UNITS: &[(&str, f64)] = &[
    ("nm", 1e-6),
    ("um", 1e-3),
    ("mm", 1.0),
    ("cm", 10.0),
    ("m", 1e3),
    ("km", 1e6),
];

/// Look up a unit symbol in either table.
pub fn unit_value(symbol: &str) -> Option<(f64, Dimension)> {
    [Dimension::Energy, Dimension::Length]
        .into_iter()
        .find_map(|dim| {
            dim.units()
                .iter()
                .find(|(s, _)| *s == symbol)
                .map(|(_, v)| (*v, dim))
        })
}

/// Factor of `symbol`, which must belong to `dimension`.
pub fn unit_factor(symbol: &str, dimension: Dimension) -> Result<f64> {
    match unit_value(symbol) {
        Some((factor, dim)) if dim == dimension => Ok(factor),
        _ => Err(GunError::UnknownUnit {
            unit: symbol.to_string(),
            dimension: dimension.name(),
        }),
    }
}

/// Pick the display unit for a magnitude: the largest unit not exceeding it.
fn select_unit(magnitude: f64, dimension: Dimension) -> (&'static str, f64) {
    let units = dimension.units();
    if magnitude == 0.0 || !magnitude.is_finite() {
        let base = dimension.base_symbol();
        return (base, 1.0);
    }
    let mut chosen = units[0];
    for &(symbol, factor) in units {
        if factor <= magnitude {
            chosen = (symbol, factor);
        }
    }
    chosen
}

/// Format a scalar in its best-fitting unit, e.g. `2000.0` MeV as `"2 GeV"`.
pub fn best_unit(value: f64, dimension: Dimension) -> String {
    let (symbol, factor) = select_unit(value.abs(), dimension);
    format!("{} {}", value / factor, symbol)
}

/// Format a vector in the unit that best fits its largest component.
pub fn best_unit_vector(value: [f64; 3], dimension: Dimension) -> String {
    let largest = value.iter().fold(0.0_f64, |acc, c| acc.max(c.abs()));
    let (symbol, factor) = select_unit(largest, dimension);
    format!(
        "({},{},{}) {}",
        value[0] / factor,
        value[1] / factor,
        value[2] / factor,
        symbol
    )
}
