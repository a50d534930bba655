use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub store: StoreConfig,
}

/// Diagnostic logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset (default: "info").
    pub level: String,
    /// Output layout (default: compact).
    pub format: LogFormat,
    /// Prefix each line with a timestamp (default: true).
    pub timestamps: bool,
}

/// Log line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
}

/// State store tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Max snapshots queued while a delivery pass is running (default: 64).
    /// The oldest queued snapshot is dropped when full.
    pub pending_capacity: usize,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_pending_capacity() -> usize {
    64
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            timestamps: true,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            pending_capacity: default_pending_capacity(),
        }
    }
}
