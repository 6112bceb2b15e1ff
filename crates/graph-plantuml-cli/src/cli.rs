//! Command-line interface for the graph-plantuml utility
//!
//! Reads a JSON declaration model and prints the PlantUML script for it, or
//! renders it to an image through the PlantUML command.

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use graph_plantuml::core::logging::init_logging;
use graph_plantuml::plugins::plantuml::{DEFAULT_EXECUTABLE, DEFAULT_FORMAT};
use graph_plantuml::prelude::*;

/// graph-plantuml - Turn declaration models into PlantUML class diagrams
#[derive(Parser)]
#[command(name = "graph-plantuml")]
#[command(about = "Turn class, interface and extension metadata into PlantUML class diagrams")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the PlantUML script of a model
    Script {
        /// Input JSON model (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the script (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit the compressed form used in PlantUML server URLs
        #[arg(long)]
        encode: bool,

        #[command(flatten)]
        diagram: DiagramArgs,
    },

    /// Render a model to an image with the PlantUML command
    Image {
        /// Input JSON model (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Where to put the image; defaults to a file next to the temporary script
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Image format passed to PlantUML
        #[arg(long, default_value = DEFAULT_FORMAT)]
        format: String,

        /// Command used to start PlantUML
        #[arg(long, default_value = DEFAULT_EXECUTABLE)]
        executable: String,

        /// Command template with {executable}, {format}, {temp_file} and {output_file}
        #[arg(long)]
        command: Option<String>,

        #[command(flatten)]
        diagram: DiagramArgs,
    },
}

/// Options shared by every command that draws a diagram
#[derive(Args, Debug, Clone)]
pub struct DiagramArgs {
    /// Only show members declared by each class itself
    #[arg(long)]
    pub only_self: bool,

    /// Hide class constants
    #[arg(long)]
    pub hide_constants: bool,

    /// Hide fields
    #[arg(long)]
    pub hide_properties: bool,

    /// Hide methods and functions
    #[arg(long)]
    pub hide_methods: bool,

    /// Least visible members to show
    #[arg(long, value_enum, default_value_t = VisibilityChoice::Private)]
    pub min_visibility: VisibilityChoice,

    /// Separator printed between namespace segments
    #[arg(long, default_value = ".")]
    pub namespace_separator: String,

    /// Layout direction (LR or TB)
    #[arg(long)]
    pub rankdir: Option<String>,

    /// Diagram background color
    #[arg(long)]
    pub bgcolor: Option<String>,
}

impl DiagramArgs {
    fn formatter_options(&self) -> FormatterOptions {
        FormatterOptions::default()
            .with_only_self(self.only_self)
            .with_constants(!self.hide_constants)
            .with_properties(!self.hide_properties)
            .with_methods(!self.hide_methods)
            .with_min_visibility(self.min_visibility.into())
            .with_namespace_separator(self.namespace_separator.clone())
    }

    /// Graph attributes set from the command line, applied over the model's
    fn graph_attributes(&self) -> Vec<(&'static str, String)> {
        let mut attributes = Vec::new();
        if let Some(rankdir) = &self.rankdir {
            attributes.push(("graph.rankdir", rankdir.clone()));
        }
        if let Some(bgcolor) = &self.bgcolor {
            attributes.push(("graph.bgcolor", bgcolor.clone()));
        }
        attributes
    }
}

/// Member visibility filter
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum VisibilityChoice {
    /// Show every member
    #[default]
    Private,
    /// Hide private members
    Protected,
    /// Show public members only
    Public,
}

impl From<VisibilityChoice> for Visibility {
    fn from(value: VisibilityChoice) -> Self {
        match value {
            VisibilityChoice::Private => Visibility::Private,
            VisibilityChoice::Protected => Visibility::Protected,
            VisibilityChoice::Public => Visibility::Public,
        }
    }
}

/// JSON input of the CLI
#[derive(Debug, Default, Deserialize)]
pub struct Model {
    pub declarations: Vec<Declaration>,
    /// Graph attributes such as `graph.rankdir` or `cluster.<group>.graph.bgcolor`
    #[serde(default)]
    pub attributes: Attributes,
}

impl Model {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse declaration model")
    }
}

/// Main CLI application
pub struct GraphPlantUmlApp;

impl GraphPlantUmlApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over the flags
        let log_level_str = std::env::var("GRAPH_PLANTUML_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());

        let log_format_str = std::env::var("GRAPH_PLANTUML_LOG_FORMAT")
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level_str), Some(&log_format_str)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("graph-plantuml v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Script {
                input,
                output,
                encode,
                diagram,
            } => self.script_command(input, output, encode, &diagram, cli.verbose),
            Commands::Image {
                input,
                output,
                format,
                executable,
                command,
                diagram,
            } => {
                let generator = PlantUmlGenerator::with_options(diagram.formatter_options())
                    .with_executable(executable)
                    .with_format(format);
                self.image_command(
                    input,
                    output,
                    &generator,
                    command.as_deref(),
                    &diagram,
                    cli.verbose,
                )
            }
        }
    }

    /// Handle the script command
    fn script_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        encode: bool,
        diagram: &DiagramArgs,
        verbose: bool,
    ) -> Result<()> {
        let model = Model::from_json(&self.read_input(input)?)?;
        if verbose {
            eprintln!("Loaded {} declarations", model.declarations.len());
        }

        let generator = PlantUmlGenerator::with_options(diagram.formatter_options());
        let graph = self.build_graph(&generator, &model, diagram);
        let script = generator.build_script(&graph, encode);

        self.write_output(output, &script)
    }

    /// Handle the image command
    fn image_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        generator: &PlantUmlGenerator,
        command: Option<&str>,
        diagram: &DiagramArgs,
        verbose: bool,
    ) -> Result<()> {
        let model = Model::from_json(&self.read_input(input)?)?;
        if verbose {
            eprintln!("Loaded {} declarations", model.declarations.len());
        }

        let graph = self.build_graph(generator, &model, diagram);
        let rendered = generator.write_image_file(&graph, command)?;

        let path = match output {
            Some(target) => {
                move_file(&rendered, &target)?;
                target
            }
            None => rendered,
        };

        info!(path = %path.display(), "Diagram rendered");
        println!("{}", path.display());
        Ok(())
    }

    fn build_graph(
        &self,
        generator: &PlantUmlGenerator,
        model: &Model,
        diagram: &DiagramArgs,
    ) -> Graph {
        let mut builder = GraphBuilder::new(generator);
        for (key, value) in model.attributes.iter() {
            builder.set_graph_attribute(key, value);
        }
        for (key, value) in diagram.graph_attributes() {
            builder.set_graph_attribute(key, value);
        }
        builder.add_declarations(&model.declarations);

        let graph = builder.into_graph();
        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "Built graph"
        );
        graph
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                print!("{}", content);
                if !content.is_empty() && !content.ends_with('\n') {
                    println!();
                }
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

impl Default for GraphPlantUmlApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Move a rendered file, copying when a rename crosses file systems
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to)
        .with_context(|| format!("Failed to write image to '{}'", to.display()))?;
    fs::remove_file(from).ok();
    Ok(())
}
