//! repolens: the asynchronous state core of a repository catalog browser.
//!
//! repolens provides:
//! - A paginated primary feed driven by the catalog's `link` header cursor
//! - Keyword search kept in its own feed, never merged with the primary one
//! - Single repository and profile fetches that keep stale data on failure
//! - A locally chosen avatar override that no fetch ever resets
//! - Latest-wins supersession per request kind
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI driver (main.rs)                               │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Store + events
//! │  - Event handling, latest-wins tickets              │
//! │  - Catalog / entity / profile slices                │
//! │  - Dispatcher runtime, search debouncer             │
//! └─────────────────────────────────────────────────────┘
//!                 │                          │
//! ┌───────────────────────────┐   ┌───────────────────────────┐
//! │ Worker Layer (worker/)    │   │ Infrastructure            │
//! │ - Workflow execution      │──►│ - Pagination codec        │
//! │ - Failure folding         │   │ - Endpoint paths          │
//! └───────────────────────────┘   └───────────────────────────┘
//!                 │
//! ┌─────────────────────────────────────────────────────┐
//! │  Transport (transport/)  ← reqwest, fixed base URL   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Store, events, actions, runtime
//! - [`domain`]: Records and errors
//! - [`infrastructure`]: Pagination codec and endpoint paths
//! - [`transport`]: GET collaborator and its HTTP implementation
//! - [`worker`]: Workflows turning requests into outcome events
//! - [`observability`]: Tracing subscriber and optional OTLP file export
//!
//! # Example
//!
//! ```no_run
//! use repolens::{initialize, Config, Event};
//!
//! # async fn example() -> repolens::Result<()> {
//! let mut dispatcher = initialize(&Config::default())?;
//!
//! dispatcher.dispatch(Event::FetchRepositoriesRequested { since: 0 })?;
//! dispatcher.settle().await?;
//!
//! dispatcher.dispatch(Event::FetchMoreRequested)?;
//! dispatcher.settle().await?;
//!
//! println!("{} repositories", dispatcher.store().catalog.items.len());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod transport;
pub mod worker;

pub use app::{handle_event, Action, Dispatcher, Event, Store};
pub use domain::{RepolensError, Result, TransportError};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Client configuration.
///
/// Loaded from an optional TOML file; every key has a default.
///
/// ```toml
/// base_url = "https://api.github.com"
/// timeout_ms = 30000
/// profile_login = "octocat"
/// search_debounce_ms = 500
/// trace_level = "debug"
/// trace_file = "/tmp/repolens-otlp.json"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base address every request path is resolved against.
    pub base_url: String,

    /// Fixed per-request timeout in milliseconds.
    pub timeout_ms: u64,

    /// `User-Agent` header; the public API rejects requests without one.
    pub user_agent: String,

    /// Login of the fixed profile resource.
    pub profile_login: String,

    /// Quiet period before typed search text becomes a request.
    pub search_debounce_ms: u64,

    /// Tracing filter directive. `RUST_LOG` takes precedence. Default: `"info"`
    pub trace_level: Option<String>,

    /// File receiving OTLP-JSON span batches; export is off when unset.
    pub trace_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            timeout_ms: 30_000,
            user_agent: concat!("repolens/", env!("CARGO_PKG_VERSION")).to_string(),
            profile_login: "FakhriK098".to_string(),
            search_debounce_ms: 500,
            trace_level: None,
            trace_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`RepolensError::Config`] if the text is not valid TOML or a
    /// value has the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| RepolensError::Config(e.to_string()))
    }

    /// Loads configuration from `path`, or defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Returns [`RepolensError::Config`] if an explicit path cannot be read
    /// or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .map_err(|e| RepolensError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Overlays string key/value overrides onto this configuration.
    ///
    /// Unknown keys are ignored; numeric values that fail to parse keep the
    /// current value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use repolens::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("profile_login".to_string(), "octocat".to_string());
    /// map.insert("timeout_ms".to_string(), "not-a-number".to_string());
    ///
    /// let config = Config::default().with_overrides(&map);
    /// assert_eq!(config.profile_login, "octocat");
    /// assert_eq!(config.timeout_ms, 30_000);
    /// ```
    #[must_use]
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        for (key, value) in overrides {
            match key.as_str() {
                "base_url" => self.base_url.clone_from(value),
                "user_agent" => self.user_agent.clone_from(value),
                "profile_login" => self.profile_login.clone_from(value),
                "timeout_ms" => self.timeout_ms = value.parse().unwrap_or(self.timeout_ms),
                "search_debounce_ms" => {
                    self.search_debounce_ms = value.parse().unwrap_or(self.search_debounce_ms);
                }
                "trace_level" => self.trace_level = Some(value.clone()),
                "trace_file" => self.trace_file = Some(value.clone()),
                other => tracing::debug!(key = %other, "ignoring unknown configuration key"),
            }
        }
        self
    }

    #[must_use]
    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// Builds the process-wide dispatcher over an HTTP transport.
///
/// # Errors
///
/// Returns [`RepolensError::Config`] if the HTTP transport cannot be built.
pub fn initialize(config: &Config) -> Result<Dispatcher> {
    tracing::debug!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "initializing repolens");
    let transport = transport::HttpTransport::new(config)?;
    Ok(Dispatcher::new(Store::new(config.profile_login.clone()), Arc::new(transport)))
}
