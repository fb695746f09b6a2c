//! Pavement cross-section model and node generation
//!
//! # Submodules
//! - `layers` - Pavement types, layer tables and thickness validation
//! - `profile` - Fixed half-lane x-coordinates
//! - `request` - Immutable generation request (CLI flags or JSON file)
//! - `generator` - Boundary levels and the numbered node grid

mod layers;
mod profile;
mod request;
mod generator;

pub use layers::{
    PavementType,
    LayerSpec,
    Layer,
    validate_thickness,
    parse_thickness,
    build_layers,
};

pub use profile::{
    HALF_LANE_X,
    XProfile,
};

pub use request::NodeRequest;

pub use generator::{
    SUBGRADE_ALLOWANCE,
    Node,
    NodeGrid,
    boundary_levels,
    generate,
    generate_nodes,
};
