//! Command-line interface for the codenav utility
//!
//! Stands in for the capture application: each input is one block of
//! already-transcribed text, ingested into a single session in order.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::colorizer::colorize_report;
use crate::json::LayoutView;
use codenav::core::logging::init_logging;
use codenav::core::Renderer;
use codenav::structure::{ConnectionKey, Dialect, PlacementConfig, PlacementTableRenderer};
use codenav::NavigatorSession;

/// Codenav - Extract class structure from transcribed source code
#[derive(Parser)]
#[command(name = "codenav")]
#[command(about = "Extract class hierarchies from transcribed C++, Java and Kotlin code")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error|off)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
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
    Off,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
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
    /// Print the class hierarchy report for one or more transcriptions
    Report {
        /// Input files, ingested in order (use - for stdin)
        #[arg(short, long, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Source dialect (cpp|c++|java|kotlin); inferred from the file extension if omitted
        #[arg(short, long)]
        dialect: Option<String>,

        /// Output file for the report (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// When to use colors in output
        #[arg(
            long,
            value_enum,
            default_value_t = ColorChoice::Auto
        )]
        color: ColorChoice,
    },

    /// Place classes on rings and print slots, markers and connectors
    Layout {
        /// Input files, ingested and placed in order (use - for stdin)
        #[arg(short, long, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Source dialect (cpp|c++|java|kotlin); inferred from the file extension if omitted
        #[arg(short, long)]
        dialect: Option<String>,

        /// Distance between the ring center and each slot
        #[arg(long, default_value_t = PlacementConfig::default().spacing)]
        spacing: f32,

        /// Depth offset added per ring
        #[arg(long, default_value_t = PlacementConfig::default().depth_step)]
        depth_step: f32,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show supported dialects
    Dialects {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// One transcription to ingest
#[derive(Debug)]
struct Transcript {
    dialect: Dialect,
    source: PathBuf,
}

/// Main CLI application
pub struct CodenavApp {
    session: NavigatorSession,
}

impl CodenavApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self {
            session: NavigatorSession::new(),
        }
    }

    /// Create a new application instance with custom placement spacing
    pub fn with_config(config: PlacementConfig) -> Result<Self> {
        Ok(Self {
            session: NavigatorSession::with_config(config)?,
        })
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over CLI flags
        let log_level_str = std::env::var("CODENAV_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("CODENAV_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Codenav v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Report {
                input,
                dialect,
                output,
                color,
            } => self.report_command(input, dialect.as_deref(), output, color, cli.verbose),
            Commands::Layout {
                input,
                dialect,
                spacing,
                depth_step,
                json,
            } => {
                *self = Self::with_config(PlacementConfig::new(spacing, depth_step))?;
                self.layout_command(input, dialect.as_deref(), json, cli.verbose)
            }
            Commands::Dialects { json } => self.dialects_command(json, cli.verbose),
        }
    }

    /// Handle the report command
    fn report_command(
        &mut self,
        inputs: Vec<PathBuf>,
        dialect: Option<&str>,
        output: Option<PathBuf>,
        color: ColorChoice,
        verbose: bool,
    ) -> Result<()> {
        let transcripts = Self::plan_transcripts(inputs, dialect)?;

        let mut extracted = false;
        for transcript in &transcripts {
            extracted |= self.ingest_transcript(transcript, verbose)?;
        }
        if !extracted {
            eprintln!("No class structure found in input");
        }

        let report = self.session.formatted_report()?;
        let final_output = if self.should_colorize(&output, color) {
            colorize_report(&report)
        } else {
            report
        };
        self.write_output(output, &final_output)
    }

    /// Handle the layout command
    fn layout_command(
        &mut self,
        inputs: Vec<PathBuf>,
        dialect: Option<&str>,
        json: bool,
        verbose: bool,
    ) -> Result<()> {
        let transcripts = Self::plan_transcripts(inputs, dialect)?;

        let mut deferred: Vec<ConnectionKey> = Vec::new();
        for transcript in &transcripts {
            if self.ingest_transcript(transcript, verbose)? {
                let update = self.session.place()?;
                if verbose {
                    eprintln!(
                        "Placed {} classes, {} markers, {} connections ({} deferred)",
                        update.new_nodes.len(),
                        update.new_markers.len(),
                        update.new_connections.len(),
                        update.deferred.len()
                    );
                }
                deferred = update.deferred;
            }
        }

        let layout = self.session.layout();
        if json {
            let view = LayoutView::new(layout, &deferred);
            println!("{}", serde_json::to_string_pretty(&view)?);
            return Ok(());
        }

        let mut table = PlacementTableRenderer::new().render(layout)?;
        if !deferred.is_empty() {
            table.push_str("\ndeferred:\n");
            for key in &deferred {
                table.push_str(&format!("  {}\n", key));
            }
        }
        self.write_output(None, &table)
    }

    /// Handle the dialects command
    fn dialects_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing supported dialects");
        }

        if json {
            let dialects: Vec<_> = Dialect::ALL
                .iter()
                .map(|d| {
                    serde_json::json!({
                        "name": d.as_str(),
                        "aliases": d.aliases(),
                        "extensions": d.extensions(),
                    })
                })
                .collect();
            let listing = serde_json::json!({
                "supported_dialects": dialects,
                "total": Dialect::ALL.len(),
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        } else {
            println!("Supported dialects:");
            for d in Dialect::ALL {
                let mut line = format!("  {:<8} extensions: {}", d.as_str(), d.extensions().join(", "));
                if !d.aliases().is_empty() {
                    line.push_str(&format!("  aliases: {}", d.aliases().join(", ")));
                }
                println!("{}", line);
            }
            println!();
            println!("Total: {} dialects supported", Dialect::ALL.len());
        }

        Ok(())
    }

    /// Resolve every input's dialect before anything is ingested
    fn plan_transcripts(inputs: Vec<PathBuf>, dialect: Option<&str>) -> Result<Vec<Transcript>> {
        let explicit = dialect.map(str::parse::<Dialect>).transpose()?;
        let inputs = if inputs.is_empty() {
            vec![PathBuf::from("-")]
        } else {
            inputs
        };

        inputs
            .into_iter()
            .map(|source| -> Result<Transcript> {
                let dialect = match explicit {
                    Some(dialect) => dialect,
                    None => Self::infer_dialect(&source)?,
                };
                Ok(Transcript { dialect, source })
            })
            .collect()
    }

    /// Infer a dialect from a file extension
    pub fn infer_dialect(path: &Path) -> Result<Dialect> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Dialect::from_extension)
            .ok_or_else(|| {
                anyhow!(
                    "Cannot infer dialect for '{}'; pass --dialect (cpp|java|kotlin)",
                    path.display()
                )
            })
    }

    fn ingest_transcript(&mut self, transcript: &Transcript, verbose: bool) -> Result<bool> {
        let content = self.read_input(Some(transcript.source.clone()))?;
        if verbose {
            eprintln!(
                "Read {} bytes from {}",
                content.len(),
                transcript.source.display()
            );
        }

        let extracted = self.session.ingest_dialect(transcript.dialect, &content)?;
        if extracted {
            info!(source = %transcript.source.display(), dialect = %transcript.dialect, "Ingested transcript");
        } else {
            debug!(source = %transcript.source.display(), "Transcript had no class structure");
        }
        Ok(extracted)
    }

    /// Determine if we should colorize the output based on color choice and output destination
    fn should_colorize(&self, output: &Option<PathBuf>, color: ColorChoice) -> bool {
        match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                // Only colorize if outputting to stdout and it's a terminal
                match output {
                    None => crossterm::tty::IsTty::is_tty(&std::io::stdout()),
                    Some(ref p) if p.to_str() == Some("-") => {
                        crossterm::tty::IsTty::is_tty(&std::io::stdout())
                    }
                    Some(_) => false,
                }
            }
        }
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
        let stdout_content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                print!("{}", stdout_content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }

    /// Get a reference to the session (for testing)
    #[cfg(test)]
    pub fn session(&self) -> &NavigatorSession {
        &self.session
    }
}

impl Default for CodenavApp {
    fn default() -> Self {
        Self::new()
    }
}
