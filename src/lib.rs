//! Pavement cross-section node generator
//!
//! Builds a numbered grid of (x, y) nodes from a pavement layer stack, writes
//! it as `/PREP7` node commands for finite-element preprocessing, and renders
//! the same grid as an SVG diagram.
//!
//! ```
//! use pavement_nodes::{export_to_string, generate_nodes, NodeRequest, PavementType};
//!
//! let request = NodeRequest::new(PavementType::Rigid, vec![0.20, 0.20]);
//! let grid = generate_nodes(request)?;
//! let text = export_to_string(&grid);
//! assert!(text.starts_with("/PREP7\n"));
//! # Ok::<(), pavement_nodes::PavementError>(())
//! ```

pub mod error;
pub mod pavement;
pub mod export;
pub mod render;

pub use error::{PavementError, PavementResult};
pub use pavement::{
    boundary_levels, build_layers, generate, generate_nodes, parse_thickness, validate_thickness,
    Layer, LayerSpec, Node, NodeGrid, NodeRequest, PavementType, XProfile, HALF_LANE_X,
    SUBGRADE_ALLOWANCE,
};
pub use export::{export_to_file, export_to_string, format_coord, write_nodes, PREP7_HEADER};
pub use render::{render_svg, render_to_file, RenderOptions};
