//! Logging bootstrap
//!
//! The library itself only emits `tracing` events; nothing is printed unless
//! a subscriber is installed. Binaries call [`init_logging`] once at startup.
//!
//! Diagnostics worth knowing about:
//!
//! - `warn`: a signature that could not be decoded, a generic parameter list
//!   that does not line up with the raw one, a header wider than its box, a
//!   missing or mismatched ancestor.
//! - `debug`: member counts per class, decoded declarations.
//! - `trace`: every visited class-file member.
//!
//! # Environment Variables
//!
//! - `UMLBOX_LOG_LEVEL`: log level or filter directive (`warn`, `umlbox::signature=trace`)
//! - `RUST_LOG`: fallback filter, read when `UMLBOX_LOG_LEVEL` is unset
//! - `UMLBOX_LOG_FORMAT`: `compact`, `pretty` or `json`
//!
//! ```bash
//! UMLBOX_LOG_LEVEL="info,umlbox::backends::binary=trace" umlbox render Foo.class
//! ```

use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

const LEVEL_VAR: &str = "UMLBOX_LOG_LEVEL";
const FORMAT_VAR: &str = "UMLBOX_LOG_FORMAT";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One line per event
    #[default]
    Compact,
    /// Multi-line with source locations
    Pretty,
    /// Newline-delimited JSON
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    /// Names accepted by [`LogFormat::from_str`]
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Pick the effective filter directive and format.
///
/// Explicit arguments win over `UMLBOX_*` variables, which win over
/// `RUST_LOG` (level only), which wins over `info`/`compact`.
pub fn resolve_settings(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(String, LogFormat), String> {
    let directive = level
        .map(str::to_string)
        .or_else(|| std::env::var(LEVEL_VAR).ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    let format = match format
        .map(str::to_string)
        .or_else(|| std::env::var(FORMAT_VAR).ok())
    {
        Some(name) => LogFormat::from_str(&name)?,
        None => LogFormat::default(),
    };

    Ok((directive, format))
}

fn build_filter(directive: &str) -> EnvFilter {
    if directive.eq_ignore_ascii_case("off") {
        return EnvFilter::new("off");
    }
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// Fails on an unknown format name, or when a global subscriber is already
/// installed. An unparseable level falls back to `info`.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (directive, format) =
        resolve_settings(level, format).map_err(|e| format!("Invalid log format: {}", e))?;
    let filter = build_filter(&directive);

    match format {
        LogFormat::Compact => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_span_events(FmtSpan::NONE)
                        .compact(),
                )
                .try_init()?;
        }
        LogFormat::Pretty => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::CLOSE)
                        .pretty(),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_span_events(FmtSpan::CLOSE)
                        .json(),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Same as `init_logging(None, None)`
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}
