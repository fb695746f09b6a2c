//! Command-line shell for the pavement node generator
//!
//! Usage:
//!   pavegen layers [--type <type>] [--json]
//!   pavegen generate --type <type> [--thickness <m>]... --output <file> [--svg <file>]
//!   pavegen generate --request <file.json> --output <file>
//!
//! Without thicknesses the layer table defaults are used.

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use pavement_nodes::{
    export_to_file, generate_nodes, parse_thickness, render_to_file, NodeGrid, NodeRequest,
    PavementError, PavementType, RenderOptions,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Pavement cross-section node generator
#[derive(Parser)]
#[command(name = "pavegen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate FE node coordinates for a pavement cross-section", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the layer table for one or all pavement types
    Layers(LayersArgs),
    /// Generate nodes, write the /PREP7 file and optionally an SVG diagram
    Generate(GenerateArgs),
}

#[derive(Args)]
struct LayersArgs {
    /// Pavement type (flexible, rigid, semi-rigid)
    #[arg(short = 't', long = "type")]
    pavement_type: Option<PavementType>,

    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct GenerateArgs {
    /// Pavement type (flexible, rigid, semi-rigid)
    #[arg(short = 't', long = "type", required_unless_present = "request")]
    pavement_type: Option<PavementType>,

    /// Layer thickness in metres, surface first; repeat once per layer
    #[arg(long = "thickness", value_name = "M", allow_hyphen_values = true)]
    thicknesses: Vec<String>,

    /// JSON request file with pavement_type and thicknesses
    #[arg(long, conflicts_with_all = ["pavement_type", "thicknesses"])]
    request: Option<PathBuf>,

    /// Destination of the node file
    #[arg(short, long)]
    output: PathBuf,

    /// Also render the grid to this SVG file
    #[arg(long)]
    svg: Option<PathBuf>,

    /// JSON file with diagram options
    #[arg(long, requires = "svg")]
    render_config: Option<PathBuf>,

    /// Print the generated grid as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct LayerRow {
    name: &'static str,
    default_thickness: f64,
}

#[derive(Serialize)]
struct LayerTable {
    pavement_type: PavementType,
    layers: Vec<LayerRow>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Layers(args) => run_layers(args),
        Commands::Generate(args) => run_generate(args),
    }
}

fn run_layers(args: LayersArgs) -> Result<()> {
    let types: Vec<PavementType> = match args.pavement_type {
        Some(pavement) => vec![pavement],
        None => PavementType::ALL.to_vec(),
    };

    let tables: Vec<LayerTable> = types
        .into_iter()
        .map(|pavement_type| LayerTable {
            pavement_type,
            layers: pavement_type
                .layer_specs()
                .iter()
                .map(|spec| LayerRow {
                    name: spec.name,
                    default_thickness: spec.default_thickness,
                })
                .collect(),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tables)?);
        return Ok(());
    }

    for table in &tables {
        println!("=== {} ===", table.pavement_type);
        for (idx, layer) in table.layers.iter().enumerate() {
            println!("  {}. {} (default {} m)", idx + 1, layer.name, layer.default_thickness);
        }
    }
    Ok(())
}

fn build_request(args: &GenerateArgs) -> Result<NodeRequest> {
    if let Some(path) = &args.request {
        return NodeRequest::from_json_file(path)
            .with_context(|| format!("Failed to load request {}", path.display()));
    }

    let pavement = args
        .pavement_type
        .ok_or_else(|| anyhow!("--type is required unless --request is given"))?;

    if args.thicknesses.is_empty() {
        info!("No thicknesses given, using {} defaults", pavement);
        return Ok(NodeRequest::with_defaults(pavement));
    }

    let specs = pavement.layer_specs();
    if specs.len() != args.thicknesses.len() {
        return Err(PavementError::LayerCountMismatch {
            pavement,
            expected: specs.len(),
            found: args.thicknesses.len(),
        }
        .into());
    }

    let thicknesses = specs
        .iter()
        .zip(&args.thicknesses)
        .map(|(spec, text)| parse_thickness(spec.name, text))
        .collect::<Result<Vec<f64>, PavementError>>()?;

    Ok(NodeRequest::new(pavement, thicknesses))
}

fn print_summary(grid: &NodeGrid) {
    println!("Levels: {}", grid.levels().len());
    for (idx, row) in grid.rows().enumerate() {
        let first = row.first().map(|n| n.id).unwrap_or(0);
        let last = row.last().map(|n| n.id).unwrap_or(0);
        println!("  y = {:>8.3} m  nodes {}..{}", grid.levels()[idx], first, last);
    }
    println!("Total nodes: {}", grid.len());
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let start_total = Instant::now();

    let request = build_request(&args)?;
    info!(
        "Generating {} pavement nodes for thicknesses {:?}",
        request.pavement_type(),
        request.thicknesses()
    );

    let grid = generate_nodes(request)?;

    export_to_file(&grid, &args.output)
        .with_context(|| format!("Could not save nodes to {}", args.output.display()))?;

    if let Some(svg_path) = &args.svg {
        let options = match &args.render_config {
            Some(path) => RenderOptions::from_json_file(path)?,
            None => RenderOptions::default(),
        };
        render_to_file(&grid, &options, svg_path)
            .with_context(|| format!("Could not render diagram to {}", svg_path.display()))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
    } else {
        print_summary(&grid);
    }

    debug!("Total time: {:.2?}", start_total.elapsed());
    Ok(())
}
