//! Layer model: pavement types, their layer tables and thickness validation.
//!
//! The layer sets are a static configuration table. Both the generator and
//! the command-line shell consult it, so the order here is the order in which
//! thicknesses are expected and the order in which layers are stacked from
//! the surface downward.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PavementError, PavementResult};

/// Pavement structure variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum PavementType {
    Flexible,
    Rigid,
    SemiRigid,
}

/// One row of the layer table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerSpec {
    pub name: &'static str,
    /// Pre-filled thickness in metres.
    pub default_thickness: f64,
}

const FLEXIBLE_LAYERS: &[LayerSpec] = &[
    LayerSpec { name: "Surface", default_thickness: 0.06 },
    LayerSpec { name: "Binder", default_thickness: 0.08 },
    LayerSpec { name: "Base", default_thickness: 0.20 },
    LayerSpec { name: "Subbase", default_thickness: 0.20 },
];

const RIGID_LAYERS: &[LayerSpec] = &[
    LayerSpec { name: "Concrete Slab", default_thickness: 0.20 },
    LayerSpec { name: "Subbase", default_thickness: 0.20 },
];

const SEMI_RIGID_LAYERS: &[LayerSpec] = &[
    LayerSpec { name: "Asphalt", default_thickness: 0.08 },
    LayerSpec { name: "Cement-Treated Base", default_thickness: 0.20 },
    LayerSpec { name: "Subbase", default_thickness: 0.20 },
];

impl PavementType {
    pub const ALL: [PavementType; 3] = [
        PavementType::Flexible,
        PavementType::Rigid,
        PavementType::SemiRigid,
    ];

    /// Ordered layer table for this pavement type, surface first.
    pub fn layer_specs(self) -> &'static [LayerSpec] {
        match self {
            PavementType::Flexible => FLEXIBLE_LAYERS,
            PavementType::Rigid => RIGID_LAYERS,
            PavementType::SemiRigid => SEMI_RIGID_LAYERS,
        }
    }

    pub fn layer_names(self) -> Vec<&'static str> {
        self.layer_specs().iter().map(|spec| spec.name).collect()
    }

    pub fn layer_count(self) -> usize {
        self.layer_specs().len()
    }

    pub fn default_thicknesses(self) -> Vec<f64> {
        self.layer_specs()
            .iter()
            .map(|spec| spec.default_thickness)
            .collect()
    }

    pub fn label(self) -> &'static str {
        match self {
            PavementType::Flexible => "Flexible",
            PavementType::Rigid => "Rigid",
            PavementType::SemiRigid => "Semi-Rigid",
        }
    }
}

impl fmt::Display for PavementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PavementType {
    type Err = PavementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flexible" => Ok(PavementType::Flexible),
            "rigid" => Ok(PavementType::Rigid),
            "semi-rigid" | "semirigid" | "semi_rigid" => Ok(PavementType::SemiRigid),
            _ => Err(PavementError::UnknownPavementType(s.to_string())),
        }
    }
}

impl TryFrom<String> for PavementType {
    type Error = PavementError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A validated structural course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub name: String,
    /// Thickness in metres, finite and strictly positive.
    pub thickness: f64,
    /// Position from the surface, starting at 0.
    pub order: usize,
}

impl Layer {
    /// Build a layer, rejecting a thickness that is not a finite positive number.
    pub fn new(name: impl Into<String>, thickness: f64, order: usize) -> PavementResult<Self> {
        let name = name.into();
        let thickness = validate_thickness(&name, thickness)?;
        Ok(Self { name, thickness, order })
    }
}

/// Accept `value` only if it is finite and greater than zero.
pub fn validate_thickness(layer: &str, value: f64) -> PavementResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PavementError::invalid_thickness(layer, value))
    }
}

/// Parse a raw text field into a validated thickness.
///
/// Empty and non-numeric input is reported as `InvalidThickness` with a NaN
/// value, so the caller sees the same error for every kind of bad field.
pub fn parse_thickness(layer: &str, text: &str) -> PavementResult<f64> {
    let value = text
        .trim()
        .parse::<f64>()
        .map_err(|_| PavementError::invalid_thickness(layer, f64::NAN))?;
    validate_thickness(layer, value)
}

/// Pair the layer table of `pavement` with `thicknesses` and validate each one.
///
/// Fails on the first offending layer, in table order.
pub fn build_layers(pavement: PavementType, thicknesses: &[f64]) -> PavementResult<Vec<Layer>> {
    let specs = pavement.layer_specs();
    if specs.len() != thicknesses.len() {
        return Err(PavementError::LayerCountMismatch {
            pavement,
            expected: specs.len(),
            found: thicknesses.len(),
        });
    }

    specs
        .iter()
        .zip(thicknesses)
        .enumerate()
        .map(|(order, (spec, &thickness))| Layer::new(spec.name, thickness, order))
        .collect()
}
