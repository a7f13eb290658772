use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub filter: String,
    pub json: bool,
}

impl LogSettings {
    /// Reads `RUST_LOG` and `LOG_FORMAT`, loading `.env` first so values kept
    /// there apply to logging as well.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let filter = lookup("RUST_LOG")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());
        let json = lookup("LOG_FORMAT")
            .map(|v| v.trim().eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Self { filter, json }
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` selects the filter (default `info`); `LOG_FORMAT=json` switches
/// to line-delimited JSON output.
pub fn init_tracing() {
    let settings = LogSettings::from_env();
    let filter = EnvFilter::try_new(&settings.filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if settings.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        tracing::debug!("tracing subscriber already installed: {}", e);
    }
}
