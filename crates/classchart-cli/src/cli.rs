//! Command-line interface for the classchart utility
//!
//! Reads module facts as JSON and emits a UMLet UXF class diagram.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use classchart::core::logging::init_logging;
use classchart::layout::LayoutEngine;
use classchart::model::{extract_module, infer_relationships, SourceModule};
use classchart::routing::ConnectionRouter;

/// Classchart - Generate UMLet class diagrams from source structure facts
#[derive(Parser)]
#[command(name = "classchart")]
#[command(about = "A Rust utility to generate UMLet class diagrams from module facts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
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
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
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
    /// Generate a UXF diagram from module facts
    Convert {
        /// Input file with JSON module facts (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the UXF diagram (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarize the classes and relationships in the input
    Inspect {
        /// Input file to analyze (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Check that the input produces a valid diagram
    Validate {
        /// Input file to validate (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Main CLI application
pub struct ClasschartApp;

impl ClasschartApp {
    /// Create a new application instance
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Initialize logging with CLI flags (environment variables take precedence)
        let log_level_str = std::env::var("CLASSCHART_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("CLASSCHART_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        // Reinitialize logging with CLI/environment settings
        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Classchart v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Convert { input, output } => {
                self.convert_command(input, output, cli.verbose)
            }
            Commands::Inspect { input, json } => self.inspect_command(input, json, cli.verbose),
            Commands::Validate { input } => self.validate_command(input, cli.verbose),
        }
    }

    /// Handle the convert command
    fn convert_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let module = self.parse_facts(&content)?;
        let xml = classchart::generate(&module)?;

        if verbose {
            eprintln!("Successfully generated UXF diagram");
        }

        self.write_output(output, &xml)
    }

    /// Handle the inspect command
    fn inspect_command(&self, input: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let module = self.parse_facts(&content)?;
        let extracted = extract_module(&module);
        let edges = infer_relationships(&extracted.classes, &extracted.imports);

        if json {
            let summary = serde_json::json!({
                "classes": extracted.classes.iter().map(|c| {
                    serde_json::json!({
                        "name": c.name,
                        "bases": c.bases,
                        "attributes": c.attributes.len(),
                        "methods": c.methods.len(),
                    })
                }).collect::<Vec<_>>(),
                "imports": extracted.imports,
                "relationships": edges.iter().map(|e| {
                    serde_json::json!({
                        "source": e.source,
                        "target": e.target,
                        "label": e.label,
                    })
                }).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            println!("Classes: {}", extracted.classes.len());
            for class in &extracted.classes {
                println!(
                    "  {} ({} attributes, {} methods)",
                    class.name,
                    class.attributes.len(),
                    class.methods.len()
                );
            }
            println!("Relationships: {}", edges.len());
            for edge in &edges {
                println!("  {} -> {}: {}", edge.source, edge.target, edge.label);
            }
        }

        Ok(())
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let module = match self.parse_facts(&content) {
            Ok(module) => module,
            Err(e) => {
                println!("✗ Invalid module facts: {}", e);
                return Err(e);
            }
        };

        // Run the full pipeline without writing anything
        let extracted = extract_module(&module);
        let edges = infer_relationships(&extracted.classes, &extracted.imports);
        let result = LayoutEngine::new()
            .arrange(&extracted.classes)
            .and_then(|mut boxes| ConnectionRouter::new().route(&edges, &mut boxes));

        match result {
            Ok(_) => {
                println!(
                    "✓ Valid diagram: {} classes, {} relationships",
                    extracted.classes.len(),
                    edges.len()
                );
                Ok(())
            }
            Err(e) => {
                println!("✗ Diagram generation would fail: {}", e);
                Err(e.into())
            }
        }
    }

    fn parse_facts(&self, content: &str) -> Result<SourceModule> {
        serde_json::from_str(content).map_err(|e| anyhow!("Failed to parse module facts: {}", e))
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) => {
                if path.to_string_lossy() == "-" {
                    let mut content = String::new();
                    io::stdin().read_to_string(&mut content)?;
                    Ok(content)
                } else {
                    fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read input file '{}'", path.display()))
                }
            }
            None => {
                // No input file specified, read from stdin
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        let stdout_content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) => {
                if path.to_string_lossy() == "-" {
                    print!("{}", stdout_content);
                    io::stdout().flush()?;
                } else {
                    fs::write(&path, content).with_context(|| {
                        format!("Failed to write output file '{}'", path.display())
                    })?;
                }
            }
            None => {
                print!("{}", stdout_content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

impl Default for ClasschartApp {
    fn default() -> Self {
        Self::new()
    }
}
