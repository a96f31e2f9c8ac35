//! Reconstruct a tree from a captured diagram surface.
//!
//! Reads a surface snapshot (JSON), runs visual reconstruction and prints
//! the resulting tree.
//!
//! Usage:
//!   cargo run --release --bin reconstruct_tree -- surface.json
//!   cargo run --release --bin reconstruct_tree -- surface.json --format outline
//!   cargo run --release --bin reconstruct_tree -- surface.json --config tuned.json --stats -v

use diagram_oxide::converters::{JsonConverter, OutlineConverter, TreeConverter};
use diagram_oxide::pipeline::{ReconstructionConfig, VisualTreeReconstructor};
use diagram_oxide::surface::Surface;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Outline,
}

struct CliConfig {
    surface_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    format: OutputFormat,
    show_stats: bool,
    verbose: bool,
}

impl CliConfig {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut config = Self {
            surface_path: None,
            config_path: None,
            format: OutputFormat::Json,
            show_stats: false,
            verbose: false,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--format" | "-f" => {
                    i += 1;
                    config.format = match args.get(i).map(String::as_str) {
                        Some("json") => OutputFormat::Json,
                        Some("outline") => OutputFormat::Outline,
                        other => return Err(format!("unknown format: {:?}", other)),
                    };
                },
                "--config" | "-c" => {
                    i += 1;
                    match args.get(i) {
                        Some(path) => config.config_path = Some(PathBuf::from(path)),
                        None => return Err("--config needs a path".to_string()),
                    }
                },
                "--stats" => {
                    config.show_stats = true;
                },
                "--verbose" | "-v" => {
                    config.verbose = true;
                },
                other if other.starts_with('-') => {
                    return Err(format!("unknown option: {}", other));
                },
                path => {
                    config.surface_path = Some(PathBuf::from(path));
                },
            }
            i += 1;
        }

        Ok(config)
    }
}

fn print_usage() {
    eprintln!("Usage: reconstruct_tree <surface.json> [--format json|outline]");
    eprintln!("                        [--config config.json] [--stats] [--verbose]");
}

fn main() -> ExitCode {
    let cli = match CliConfig::from_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            return ExitCode::from(2);
        },
    };

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let Some(surface_path) = cli.surface_path.as_ref() else {
        print_usage();
        return ExitCode::from(2);
    };

    match run(&cli, surface_path) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            println!("no tree found");
            ExitCode::from(1)
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        },
    }
}

fn run(cli: &CliConfig, surface_path: &Path) -> diagram_oxide::Result<bool> {
    let config = match &cli.config_path {
        Some(path) => ReconstructionConfig::from_path(path)?,
        None => ReconstructionConfig::default(),
    };
    let surface = Surface::from_path(surface_path)?;
    log::debug!(
        "Loaded {} text elements, {} containers, {} strokes from {}",
        surface.text_elements.len(),
        surface.node_containers.len(),
        surface.strokes.len(),
        surface_path.display()
    );

    let result = VisualTreeReconstructor::with_config(config).reconstruct_with_stats(&surface);

    if cli.show_stats {
        eprintln!("{}", serde_json::to_string_pretty(&result.stats)?);
    }

    let Some(tree) = result.tree else {
        return Ok(false);
    };

    let converter: Box<dyn TreeConverter> = match cli.format {
        OutputFormat::Json => Box::new(JsonConverter::new().pretty()),
        OutputFormat::Outline => Box::new(OutlineConverter::new()),
    };
    print!("{}", converter.convert(&tree)?);
    if cli.format == OutputFormat::Json {
        println!();
    }
    Ok(true)
}
