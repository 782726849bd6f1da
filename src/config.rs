//! Runtime configuration for the command-line front end.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SHAPE_BASE_URL` | http://localhost:5000 | Scheme and host of generated links |
//! | `SHAPE_LOG_LEVEL` | warn | Log level when `RUST_LOG` is unset |

use clap::Args;

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct ShapeConfig {
    /// Base URL used for link targets.
    #[arg(long, env = "SHAPE_BASE_URL", default_value = "http://localhost:5000")]
    pub base_url: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "SHAPE_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Output goes to stderr.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("resource_shape={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
