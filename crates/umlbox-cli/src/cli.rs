//! Command-line interface for the umlbox utility
//!
//! Renders compiled classes (`.class`) and serialized class descriptors
//! (`.json`) as text UML boxes.

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use crate::colorizer::{colorize_frame, AnsiFormatter};
use umlbox::core::logging::init_logging;
use umlbox::{
    BinarySource, ClassDescriptor, ClassFile, Config, DiagramError, HtmlFormatter, Input,
    Orchestrator, Rendered, VisibilitySet,
};

/// umlbox - Draw Java classes as text UML boxes
#[derive(Parser)]
#[command(name = "umlbox")]
#[command(about = "Render Java class files and class descriptors as text UML box diagrams")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error|off)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
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
    /// Draw one box (or ancestor chain) per input
    Render(RenderArgs),

    /// Read every input and report whether a diagram can be built from it
    Check {
        /// `.class` or `.json` files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// `.class` files (binary backend) or `.json` class descriptors
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Extra visibilities to show besides public: `all` or a comma list of
    /// protected, package, private
    #[arg(long)]
    pub show: Option<String>,

    /// Use fully qualified class names in headers
    #[arg(long)]
    pub fqn: bool,

    /// Render erased types only
    #[arg(long)]
    pub no_generics: bool,

    /// Drop `extends` clauses from class header type parameters
    #[arg(long)]
    pub truncate_bounds: bool,

    /// Sort fields, constructors and methods by name
    #[arg(long)]
    pub sort: bool,

    /// Chain the superclasses above each class
    #[arg(long)]
    pub with_super: bool,

    /// Keep java.lang.Object at the root of the chain
    #[arg(long, requires = "with_super")]
    pub include_object: bool,

    /// Superclass file for `.class` inputs, root first (repeatable)
    #[arg(long = "super", value_name = "FILE")]
    pub ancestors: Vec<PathBuf>,

    /// Output markup
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to use colors in text output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Minimum box width
    #[arg(long)]
    pub width: Option<usize>,

    /// Output file (use - for stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Output markup
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain box-drawing text
    #[default]
    Text,
    /// Text with markup-significant and non-ASCII characters escaped
    Html,
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

/// Which backend reads an input file
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputKind {
    ClassFile,
    Descriptor,
}

impl InputKind {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("class") => Ok(InputKind::ClassFile),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(InputKind::Descriptor),
            _ => Err(anyhow!(
                "Unsupported input '{}': expected a .class or .json file",
                path.display()
            )),
        }
    }
}

/// Main CLI application
#[derive(Default)]
pub struct UmlboxApp;

impl UmlboxApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level = std::env::var("UMLBOX_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());
        let log_format = std::env::var("UMLBOX_LOG_FORMAT")
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level), Some(&log_format)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("umlbox v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Render(args) => self.render_command(&args, cli.verbose),
            Commands::Check { inputs } => self.check_command(&inputs, cli.verbose),
        }
    }

    /// Translate render flags into a generation config
    pub fn build_config(args: &RenderArgs, colorize: bool) -> Result<Config> {
        let mut visibility = VisibilitySet::default();
        if let Some(show) = &args.show {
            visibility = visibility.union(&VisibilitySet::from_str(show)?);
        }

        let mut config = Config::new()
            .with_visibility(visibility)
            .with_fqn(args.fqn)
            .with_generics(!args.no_generics)
            .with_truncated_bounds(args.truncate_bounds)
            .with_sorting(args.sort)
            .with_superclasses(args.with_super)
            .with_universal_base(args.include_object)
            .with_suppressed_ui(true);

        config = match (args.format, colorize) {
            (OutputFormat::Html, _) => config.with_formatter(Arc::new(HtmlFormatter)),
            (OutputFormat::Text, true) => config.with_formatter(Arc::new(AnsiFormatter)),
            (OutputFormat::Text, false) => config,
        };
        Ok(config)
    }

    fn render_command(&self, args: &RenderArgs, verbose: bool) -> Result<()> {
        let colorize =
            args.format == OutputFormat::Text && self.should_colorize(&args.output, args.color);
        let config = Self::build_config(args, colorize)?;

        let text = self.render_inputs(args, config, verbose)?;
        let text = if colorize { colorize_frame(&text) } else { text };
        self.write_output(args.output.clone(), &text)
    }

    /// Render every input, separated by blank lines
    pub fn render_inputs(&self, args: &RenderArgs, config: Config, verbose: bool) -> Result<String> {
        let ancestors = args
            .ancestors
            .iter()
            .map(|path| self.read_input(path))
            .collect::<Result<Vec<_>>>()?;
        let ancestor_refs: Vec<&[u8]> = ancestors.iter().map(Vec::as_slice).collect();

        let orchestrator = Orchestrator::new(config);
        let mut boxes = Vec::with_capacity(args.inputs.len());
        for path in &args.inputs {
            let rendered = self.generate(&orchestrator, path, &ancestor_refs)?;
            debug!(
                input = %path.display(),
                min_width = rendered.min_width(),
                "Rendered input"
            );
            if verbose {
                eprintln!(
                    "Rendered {} ({} columns)",
                    path.display(),
                    rendered.min_width()
                );
            }
            let text = match args.width {
                Some(width) => rendered.render(0, width.max(rendered.min_width())),
                None => rendered.to_string(),
            };
            boxes.push(text);
        }
        Ok(boxes.join("\n\n"))
    }

    fn generate(
        &self,
        orchestrator: &Orchestrator,
        path: &Path,
        ancestors: &[&[u8]],
    ) -> Result<Rendered> {
        let kind = InputKind::from_path(path)?;
        let bytes = self.read_input(path)?;
        let rendered = match kind {
            InputKind::ClassFile => orchestrator.generate(Input::Bytes {
                class: &bytes,
                ancestors,
            }),
            InputKind::Descriptor => {
                let json = String::from_utf8(bytes)
                    .map_err(|e| anyhow!("'{}' is not UTF-8: {}", path.display(), e))?;
                let class = ClassDescriptor::from_json(&json)
                    .map_err(|e| anyhow!("Failed to read '{}': {}", path.display(), e))?;
                orchestrator.generate(Input::Descriptor(&class))
            }
        };
        rendered.map_err(|e| anyhow!("Failed to render '{}': {}", path.display(), e))
    }

    /// Handle the check command
    fn check_command(&self, inputs: &[PathBuf], verbose: bool) -> Result<()> {
        let mut failures = 0;
        for path in inputs {
            match self.check_input(path) {
                Ok(name) => println!("✓ {}: {}", path.display(), name),
                Err(e) => {
                    failures += 1;
                    println!("✗ {}: {}", path.display(), e);
                }
            }
        }
        if verbose {
            eprintln!("Checked {} input(s), {} failed", inputs.len(), failures);
        }
        if failures > 0 {
            return Err(anyhow!("{} of {} input(s) failed", failures, inputs.len()));
        }
        Ok(())
    }

    /// The class's header text, or why no diagram can be built
    pub fn check_input(&self, path: &Path) -> Result<String> {
        let kind = InputKind::from_path(path)?;
        let bytes = self.read_input(path)?;
        let config = Config::new().with_all_visible();

        let outcome = match kind {
            InputKind::ClassFile => ClassFile::parse(&bytes).and_then(|class| {
                BinarySource::new()
                    .generate_class(&class, &config)
                    .map(|diagram| diagram.class_name().to_string())
            }),
            InputKind::Descriptor => std::str::from_utf8(&bytes)
                .map_err(|e| DiagramError::invalid_config(format!("not UTF-8: {}", e)))
                .and_then(ClassDescriptor::from_json)
                .and_then(|class| umlbox::generate_structural(&config, &class))
                .map(|rendered| rendered.subject().class_name().to_string()),
        };
        outcome.map_err(|e| anyhow!("{}: {}", failure_kind(&e), e))
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

    /// Read an input file
    pub fn read_input(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e))
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
}

fn failure_kind(error: &DiagramError) -> &'static str {
    match error {
        DiagramError::ClassFormat { .. } => "malformed class file",
        DiagramError::Signature { .. } => "unreadable signature",
        DiagramError::Descriptor { .. } => "malformed descriptor",
        DiagramError::InvalidConfig { .. } => "invalid input",
        DiagramError::EmptyChain => "empty chain",
        DiagramError::Io { .. } => "io",
    }
}
