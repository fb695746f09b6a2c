//! Immutable generation request and its JSON file form.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::layers::PavementType;
use crate::error::{PavementError, PavementResult};

/// Pavement type plus one thickness per layer, in table order.
///
/// Thicknesses are validated when the request is turned into layers, not here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRequest {
    pavement_type: PavementType,
    thicknesses: Vec<f64>,
}

/// Thicknesses as written in a request file: a plain list in table order or
/// a map keyed by layer name.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ThicknessInput {
    Ordered(Vec<f64>),
    Named(IndexMap<String, f64>),
}

#[derive(Debug, Deserialize)]
struct RequestFile {
    pavement_type: PavementType,
    #[serde(default)]
    thicknesses: Option<ThicknessInput>,
}

impl NodeRequest {
    pub fn new(pavement_type: PavementType, thicknesses: Vec<f64>) -> Self {
        Self { pavement_type, thicknesses }
    }

    /// Request pre-filled with the layer table defaults.
    pub fn with_defaults(pavement_type: PavementType) -> Self {
        Self::new(pavement_type, pavement_type.default_thicknesses())
    }

    pub fn pavement_type(&self) -> PavementType {
        self.pavement_type
    }

    pub fn thicknesses(&self) -> &[f64] {
        &self.thicknesses
    }

    /// Parse a JSON request such as
    /// `{"pavement_type": "rigid", "thicknesses": {"Concrete Slab": 0.25, "Subbase": 0.2}}`.
    ///
    /// Named thicknesses are matched to the layer table case-insensitively; a
    /// missing layer is an `InvalidThickness`, an unknown one an `InvalidRequest`.
    /// Without `thicknesses` the table defaults are used.
    pub fn from_json_str(json: &str) -> PavementResult<Self> {
        let file: RequestFile = serde_json::from_str(json)
            .map_err(|e| PavementError::InvalidRequest(e.to_string()))?;
        let pavement = file.pavement_type;

        let thicknesses = match file.thicknesses {
            None => pavement.default_thicknesses(),
            Some(ThicknessInput::Ordered(values)) => values,
            Some(ThicknessInput::Named(named)) => order_named(pavement, named)?,
        };

        Ok(Self::new(pavement, thicknesses))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> PavementResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            PavementError::InvalidRequest(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }
}

fn order_named(pavement: PavementType, named: IndexMap<String, f64>) -> PavementResult<Vec<f64>> {
    let names = pavement.layer_names();

    if let Some(unknown) = named
        .keys()
        .find(|key| !names.iter().any(|name| name.eq_ignore_ascii_case(key)))
    {
        return Err(PavementError::InvalidRequest(format!(
            "'{}' is not a {} layer (expected one of: {})",
            unknown,
            pavement,
            names.join(", ")
        )));
    }

    names
        .iter()
        .map(|name| {
            named
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, &value)| value)
                .ok_or_else(|| PavementError::invalid_thickness(*name, f64::NAN))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_request() {
        let request =
            NodeRequest::from_json_str(r#"{"pavement_type": "flexible", "thicknesses": [0.05, 0.1, 0.2, 0.3]}"#)
                .unwrap();
        assert_eq!(request.pavement_type(), PavementType::Flexible);
        assert_eq!(request.thicknesses(), &[0.05, 0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_named_request_follows_table_order() {
        let request = NodeRequest::from_json_str(
            r#"{"pavement_type": "Semi-Rigid",
                "thicknesses": {"subbase": 0.3, "Asphalt": 0.1, "Cement-Treated Base": 0.25}}"#,
        )
        .unwrap();
        assert_eq!(request.thicknesses(), &[0.1, 0.25, 0.3]);
    }

    #[test]
    fn test_missing_named_layer() {
        let err = NodeRequest::from_json_str(
            r#"{"pavement_type": "rigid", "thicknesses": {"Concrete Slab": 0.25}}"#,
        )
        .unwrap_err();
        assert_eq!(err.layer(), Some("Subbase"));
    }

    #[test]
    fn test_unknown_named_layer() {
        let err = NodeRequest::from_json_str(
            r#"{"pavement_type": "rigid", "thicknesses": {"Concrete Slab": 0.25, "Subbase": 0.2, "Binder": 0.1}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, PavementError::InvalidRequest(msg) if msg.contains("Binder")));
    }

    #[test]
    fn test_defaults_when_thicknesses_omitted() {
        let request = NodeRequest::from_json_str(r#"{"pavement_type": "rigid"}"#).unwrap();
        assert_eq!(request, NodeRequest::with_defaults(PavementType::Rigid));
    }

    #[test]
    fn test_bad_pavement_type() {
        let err = NodeRequest::from_json_str(r#"{"pavement_type": "cobble"}"#).unwrap_err();
        assert!(matches!(err, PavementError::InvalidRequest(msg) if msg.contains("cobble")));
    }
}
