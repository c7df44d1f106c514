//! Subscriber setup for the `chainrevoke` binary.
//!
//! Logs always go to stderr; stdout is reserved for the report.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Target prefix shared by every crate in the workspace.
const WORKSPACE_TARGET: &str = "chainrevoke";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level for targets without an override.
    pub level: String,
    /// `(target, level)` pairs appended after the global level.
    pub overrides: Vec<(String, String)>,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            overrides: Vec::new(),
            format: LogFormat::Text,
        }
    }
}

impl LogConfig {
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Override the level of one target. Crate names may use `-`.
    pub fn with_override(mut self, target: &str, level: &str) -> Self {
        self.overrides.push((target.replace('-', "_"), level.to_string()));
        self
    }

    /// `debug` for every workspace crate; targets match by prefix.
    pub fn verbose(self) -> Self {
        self.with_override(WORKSPACE_TARGET, "debug")
    }

    /// Filter directives, e.g. `"warn,chainrevoke=debug"`.
    pub fn directives(&self) -> String {
        std::iter::once(self.level.clone())
            .chain(self.overrides.iter().map(|(t, l)| format!("{t}={l}")))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn is_verbose(&self) -> bool {
        self.overrides.iter().any(|(t, _)| t == WORKSPACE_TARGET)
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `config` when set.
pub fn init_tracing(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.directives()))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
