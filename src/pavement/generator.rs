//! Node generator: turns a layer stack and an x-profile into a numbered grid.
//!
//! Boundary levels run from the surface (y = 0) downward. Every level is
//! crossed with every x of the profile, levels as the outer loop and x as the
//! inner loop, and ids are handed out in that order starting at 1.

use serde::Serialize;
use std::time::Instant;
use tracing::debug;

use super::layers::{build_layers, Layer};
use super::profile::XProfile;
use super::request::NodeRequest;
use crate::error::PavementResult;

/// Depth (m) of subgrade always added below the last structural layer.
pub const SUBGRADE_ALLOWANCE: f64 = 1.5;

/// A single exported coordinate. `z` is always 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Node {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Ordered nodes of one generation run, with the levels and x-values they span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeGrid {
    nodes: Vec<Node>,
    levels: Vec<f64>,
    xs: Vec<f64>,
}

impl NodeGrid {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Boundary y-values, surface first, subgrade bottom last.
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes grouped per boundary level, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Node]> + '_ {
        self.nodes.chunks(self.xs.len().max(1))
    }

    /// Nodes grouped per x-position, each column ordered top to bottom.
    pub fn columns(&self) -> Vec<Vec<&Node>> {
        let width = self.xs.len();
        (0..width)
            .map(|col| self.nodes.iter().skip(col).step_by(width).collect())
            .collect()
    }

    /// `[min_x, min_y, max_x, max_y]` of all nodes.
    pub fn bounds(&self) -> [f64; 4] {
        self.nodes.iter().fold(
            [f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY],
            |[min_x, min_y, max_x, max_y], n| {
                [min_x.min(n.x), min_y.min(n.y), max_x.max(n.x), max_y.max(n.y)]
            },
        )
    }
}

/// Boundary y-values for a layer stack: the surface, the bottom of every
/// layer, then the subgrade bottom. Always `layers.len() + 2` values.
pub fn boundary_levels(layers: &[Layer]) -> Vec<f64> {
    let mut levels = Vec::with_capacity(layers.len() + 2);
    let mut current_y = 0.0;
    levels.push(current_y);

    for layer in layers {
        current_y -= layer.thickness;
        levels.push(current_y);
    }

    current_y -= SUBGRADE_ALLOWANCE;
    levels.push(current_y);
    levels
}

/// Build the node grid for pre-validated `layers` over `profile`.
pub fn generate(layers: &[Layer], profile: &XProfile) -> NodeGrid {
    let start = Instant::now();
    let levels = boundary_levels(layers);
    let xs = profile.xs().to_vec();

    let mut nodes = Vec::with_capacity(levels.len() * xs.len());
    for &y in &levels {
        for &x in &xs {
            let id = nodes.len() as u32 + 1;
            nodes.push(Node { id, x, y, z: 0.0 });
        }
    }

    debug!(
        layers = layers.len(),
        levels = levels.len(),
        nodes = nodes.len(),
        "generated node grid in {:.2?}",
        start.elapsed()
    );

    NodeGrid { nodes, levels, xs }
}

/// Validate a request and generate its grid over the half-lane profile.
pub fn generate_nodes(request: NodeRequest) -> PavementResult<NodeGrid> {
    let layers = build_layers(request.pavement_type(), request.thicknesses())?;
    Ok(generate(&layers, &XProfile::half_lane()))
}
