//! SVG diagram of a node grid
//!
//! Draws every node as a labeled point, the horizontal boundary level lines
//! and the vertical profile columns. The surface (y = 0) is at the top and
//! both axes share one scale so layer proportions are kept.
//!
//! The renderer only consumes a finished NodeGrid; nothing flows back into
//! generation.

use crate::error::{PavementError, PavementResult};
use crate::pavement::NodeGrid;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Deserialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

pub const DIAGRAM_TITLE: &str = "Pavement Cross-Section Nodes";
pub const X_CAPTION: &str = "X (m)";
pub const Y_CAPTION: &str = "Y (m, negative down)";

/// Extra room (px) around the plot for the title and axis captions.
const CAPTION_MARGIN: f64 = 40.0;

/// Diagram appearance, loadable from JSON; missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub point_radius: f64,
    pub font_size: f64,
    pub background_color: String,
    pub point_color: String,
    pub boundary_color: String,
    pub column_color: String,
    pub text_color: String,
    pub show_boundaries: bool,
    pub show_columns: bool,
    pub show_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 800,
            padding: 40,
            point_radius: 4.0,
            font_size: 10.0,
            background_color: "#ffffff".to_string(),
            point_color: "#1f77b4".to_string(),
            boundary_color: "#ff7f0e".to_string(),
            column_color: "#2ca02c".to_string(),
            text_color: "#333333".to_string(),
            show_boundaries: true,
            show_columns: true,
            show_labels: true,
        }
    }
}

impl RenderOptions {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> PavementResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            PavementError::InvalidRequest(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            PavementError::InvalidRequest(format!("render options {}: {}", path.display(), e))
        })
    }
}

/// Maps model coordinates (m) to SVG pixels.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    min_x: f64,
    max_y: f64,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Viewport {
    fn fit(bounds: [f64; 4], options: &RenderOptions) -> Self {
        let [min_x, min_y, max_x, max_y] = bounds;
        let margin = f64::from(options.padding) + CAPTION_MARGIN;
        let available_width = (f64::from(options.width) - 2.0 * margin).max(1.0);
        let available_height = (f64::from(options.height) - 2.0 * margin).max(1.0);

        let span_x = if max_x > min_x { max_x - min_x } else { 1.0 };
        let span_y = if max_y > min_y { max_y - min_y } else { 1.0 };
        let scale = (available_width / span_x).min(available_height / span_y);

        Self {
            min_x,
            max_y,
            scale,
            offset_x: margin + (available_width - span_x * scale) / 2.0,
            offset_y: margin + (available_height - span_y * scale) / 2.0,
        }
    }

    fn px(&self, x: f64) -> f64 {
        self.offset_x + (x - self.min_x) * self.scale
    }

    // SVG y grows downward; the surface (max_y) maps to the top.
    fn py(&self, y: f64) -> f64 {
        self.offset_y + (self.max_y - y) * self.scale
    }
}

fn fmt_px(value: f64) -> String {
    format!("{:.2}", value)
}

fn empty_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    attributes: &[(&str, String)],
) -> quick_xml::Result<()> {
    let mut start = BytesStart::new(name);
    for (key, value) in attributes {
        start.push_attribute((*key, value.as_str()));
    }
    writer.write_event(Event::Empty(start))
}

fn text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    attributes: &[(&str, String)],
    text: &str,
) -> quick_xml::Result<()> {
    let mut start = BytesStart::new("text");
    for (key, value) in attributes {
        start.push_attribute((*key, value.as_str()));
    }
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new("text")))
}

fn open_group<W: std::io::Write>(writer: &mut Writer<W>, class: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("g").with_attributes([("class", class)])))
}

fn close_group<W: std::io::Write>(writer: &mut Writer<W>) -> quick_xml::Result<()> {
    writer.write_event(Event::End(BytesEnd::new("g")))
}

fn write_svg<W: std::io::Write>(
    writer: &mut Writer<W>,
    grid: &NodeGrid,
    options: &RenderOptions,
) -> quick_xml::Result<()> {
    let bounds = grid.bounds();
    let view = Viewport::fit(bounds, options);
    let [min_x, min_y, max_x, max_y] = bounds;
    let width = options.width.to_string();
    let height = options.height.to_string();
    let view_box = format!("0 0 {} {}", options.width, options.height);
    let font_size = format!("{}", options.font_size);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("svg").with_attributes([
        ("xmlns", "http://www.w3.org/2000/svg"),
        ("width", width.as_str()),
        ("height", height.as_str()),
        ("viewBox", view_box.as_str()),
    ])))?;

    empty_element(
        writer,
        "rect",
        &[
            ("width", "100%".to_string()),
            ("height", "100%".to_string()),
            ("fill", options.background_color.clone()),
        ],
    )?;

    text_element(
        writer,
        &[
            ("class", "title".to_string()),
            ("x", fmt_px(f64::from(options.width) / 2.0)),
            ("y", fmt_px(f64::from(options.padding) / 2.0 + 14.0)),
            ("text-anchor", "middle".to_string()),
            ("font-size", "16".to_string()),
            ("fill", options.text_color.clone()),
        ],
        DIAGRAM_TITLE,
    )?;

    if options.show_boundaries {
        open_group(writer, "boundaries")?;
        for &level in grid.levels() {
            empty_element(
                writer,
                "line",
                &[
                    ("x1", fmt_px(view.px(min_x))),
                    ("y1", fmt_px(view.py(level))),
                    ("x2", fmt_px(view.px(max_x))),
                    ("y2", fmt_px(view.py(level))),
                    ("stroke", options.boundary_color.clone()),
                    ("stroke-width", "1".to_string()),
                ],
            )?;
        }
        close_group(writer)?;
    }

    if options.show_columns {
        open_group(writer, "columns")?;
        for &x in grid.xs() {
            empty_element(
                writer,
                "line",
                &[
                    ("x1", fmt_px(view.px(x))),
                    ("y1", fmt_px(view.py(max_y))),
                    ("x2", fmt_px(view.px(x))),
                    ("y2", fmt_px(view.py(min_y))),
                    ("stroke", options.column_color.clone()),
                    ("stroke-width", "1".to_string()),
                ],
            )?;
        }
        close_group(writer)?;
    }

    open_group(writer, "nodes")?;
    for node in grid.nodes() {
        let cx = view.px(node.x);
        let cy = view.py(node.y);
        empty_element(
            writer,
            "circle",
            &[
                ("id", format!("node-{}", node.id)),
                ("cx", fmt_px(cx)),
                ("cy", fmt_px(cy)),
                ("r", format!("{}", options.point_radius)),
                ("fill", options.point_color.clone()),
            ],
        )?;
        if options.show_labels {
            // Offset like an annotation: a little right of and above the point.
            text_element(
                writer,
                &[
                    ("x", fmt_px(cx + 3.0)),
                    ("y", fmt_px(cy - 3.0)),
                    ("font-size", font_size.clone()),
                    ("fill", options.text_color.clone()),
                ],
                &format!("({:.2}, {:.2})", node.x, node.y),
            )?;
        }
    }
    close_group(writer)?;

    text_element(
        writer,
        &[
            ("class", "x-caption".to_string()),
            ("x", fmt_px(f64::from(options.width) / 2.0)),
            ("y", fmt_px(f64::from(options.height) - f64::from(options.padding) / 2.0)),
            ("text-anchor", "middle".to_string()),
            ("font-size", "12".to_string()),
            ("fill", options.text_color.clone()),
        ],
        X_CAPTION,
    )?;

    let y_caption_x = f64::from(options.padding) / 2.0 + 6.0;
    let y_caption_y = f64::from(options.height) / 2.0;
    text_element(
        writer,
        &[
            ("class", "y-caption".to_string()),
            ("x", fmt_px(y_caption_x)),
            ("y", fmt_px(y_caption_y)),
            ("text-anchor", "middle".to_string()),
            ("font-size", "12".to_string()),
            ("fill", options.text_color.clone()),
            (
                "transform",
                format!("rotate(-90 {} {})", fmt_px(y_caption_x), fmt_px(y_caption_y)),
            ),
        ],
        Y_CAPTION,
    )?;

    writer.write_event(Event::End(BytesEnd::new("svg")))
}

/// Render the grid as an SVG document
pub fn render_svg(grid: &NodeGrid, options: &RenderOptions) -> PavementResult<String> {
    if grid.is_empty() {
        return Err(PavementError::RenderFailure("node grid is empty".to_string()));
    }

    let start = Instant::now();
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_svg(&mut writer, grid, options)
        .map_err(|e| PavementError::RenderFailure(e.to_string()))?;
    let svg = String::from_utf8(writer.into_inner())
        .map_err(|e| PavementError::RenderFailure(e.to_string()))?;

    debug!(nodes = grid.len(), bytes = svg.len(), "rendered diagram in {:.2?}", start.elapsed());
    Ok(svg)
}

/// Render the grid and write the SVG to `file_path`
pub fn render_to_file<P: AsRef<Path>>(
    grid: &NodeGrid,
    options: &RenderOptions,
    file_path: P,
) -> PavementResult<()> {
    let path = file_path.as_ref();
    let svg = render_svg(grid, options)?;
    std::fs::write(path, svg).map_err(|e| PavementError::write_failure(path, e))?;
    info!("diagram saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pavement::{generate, Layer, XProfile};

    fn sample_grid() -> NodeGrid {
        let layers = vec![
            Layer::new("Slab", 0.2, 0).unwrap(),
            Layer::new("Subbase", 0.2, 1).unwrap(),
        ];
        generate(&layers, &XProfile::half_lane())
    }

    #[test]
    fn test_render_contains_every_node() {
        let grid = sample_grid();
        let svg = render_svg(&grid, &RenderOptions::default()).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<svg"));
        assert_eq!(svg.matches("<circle").count(), grid.len());
        assert!(svg.contains("node-24"));
        assert!(svg.contains("(3.00, -1.90)"));
        assert!(svg.contains(DIAGRAM_TITLE));
        assert!(svg.contains(Y_CAPTION));
    }

    #[test]
    fn test_render_lines_toggle() {
        let grid = sample_grid();
        let svg = render_svg(&grid, &RenderOptions::default()).unwrap();
        assert_eq!(svg.matches("<line").count(), grid.levels().len() + grid.xs().len());

        let options = RenderOptions {
            show_boundaries: false,
            show_columns: false,
            show_labels: false,
            ..RenderOptions::default()
        };
        let svg = render_svg(&grid, &options).unwrap();
        assert_eq!(svg.matches("<line").count(), 0);
        assert!(!svg.contains("(0.00, 0.00)"));
    }

    #[test]
    fn test_surface_is_at_top() {
        let grid = sample_grid();
        let view = Viewport::fit(grid.bounds(), &RenderOptions::default());
        assert!(view.py(0.0) < view.py(-1.9));
        assert!(view.px(0.0) < view.px(3.0));
    }

    #[test]
    fn test_options_defaults_fill_missing_fields() {
        let options: RenderOptions = serde_json::from_str(r#"{"width": 400, "show_labels": false}"#).unwrap();
        assert_eq!(options.width, 400);
        assert!(!options.show_labels);
        assert_eq!(options.height, RenderOptions::default().height);
    }
}
