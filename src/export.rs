//! Node export - writes a NodeGrid as finite-element node commands
//!
//! Output format (line-exact, consumed by downstream FE tooling):
//!
//! ```text
//! /PREP7
//! N,1,0.0,0.0,0.0
//! N,2,0.475,0.0,0.0
//! ```
//!
//! One `N,<id>,<x>,<y>,0.0` line per node in grid order, no reordering and no
//! deduplication.

use crate::error::{PavementError, PavementResult};
use crate::pavement::{Node, NodeGrid};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Header command opening the preprocessor.
pub const PREP7_HEADER: &str = "/PREP7";

/// Format a coordinate in shortest round-trip form, always with a fractional
/// part (`0.0`, `2.0`, `-1.9`). Negative zero is written as `0.0`.
pub fn format_coord(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:?}", value)
}

fn write_node<W: Write>(writer: &mut W, node: &Node) -> io::Result<()> {
    writeln!(
        writer,
        "N,{},{},{},0.0",
        node.id,
        format_coord(node.x),
        format_coord(node.y)
    )
}

/// Serializes the header and every node to `writer`
pub fn write_nodes<W: Write>(grid: &NodeGrid, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}", PREP7_HEADER)?;
    for node in grid.nodes() {
        write_node(writer, node)?;
    }
    Ok(())
}

/// Serializes a NodeGrid to an in-memory string
pub fn export_to_string(grid: &NodeGrid) -> String {
    let mut buffer = Vec::with_capacity(16 + grid.len() * 32);
    // Writing into a Vec<u8> cannot fail.
    let _ = write_nodes(grid, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Serializes a NodeGrid to a file on disk, creating or truncating it
///
/// Any open, write or flush error is returned as `WriteFailure`; the file may
/// be left partially written and nothing is retried.
pub fn export_to_file<P: AsRef<Path>>(grid: &NodeGrid, file_path: P) -> PavementResult<()> {
    let path = file_path.as_ref();
    let start = Instant::now();

    let file = File::create(path).map_err(|e| PavementError::write_failure(path, e))?;
    let mut writer = BufWriter::new(file);
    write_nodes(grid, &mut writer).map_err(|e| PavementError::write_failure(path, e))?;
    writer.flush().map_err(|e| PavementError::write_failure(path, e))?;

    debug!("node export took {:.2?}", start.elapsed());
    info!(nodes = grid.len(), "pavement nodes saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pavement::{generate, Layer, XProfile};

    fn sample_grid() -> NodeGrid {
        let layers = vec![Layer::new("Slab", 0.25, 0).unwrap()];
        let profile = XProfile::new(vec![0.0, 0.475]).unwrap();
        generate(&layers, &profile)
    }

    #[test]
    fn test_format_coord() {
        assert_eq!(format_coord(0.0), "0.0");
        assert_eq!(format_coord(-0.0), "0.0");
        assert_eq!(format_coord(2.0), "2.0");
        assert_eq!(format_coord(0.475), "0.475");
        assert_eq!(format_coord(-1.9), "-1.9");
        assert_eq!(format_coord(-1.75), "-1.75");
    }

    #[test]
    fn test_export_to_string() {
        let text = export_to_string(&sample_grid());
        let expected = "/PREP7\n\
N,1,0.0,0.0,0.0\n\
N,2,0.475,0.0,0.0\n\
N,3,0.0,-0.25,0.0\n\
N,4,0.475,-0.25,0.0\n\
N,5,0.0,-1.75,0.0\n\
N,6,0.475,-1.75,0.0\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_write_error_propagates() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = write_nodes(&sample_grid(), &mut Broken).unwrap_err();
        assert_eq!(err.to_string(), "disk full");
    }
}
