//! Tracing setup for the library and the CLI.
//!
//! Events and spans go to stderr through a `fmt` layer. When a trace file
//! is configured, finished spans are also exported as OTLP-JSON:
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → exporter → file
//! ```
//!
//! The filter comes from `RUST_LOG` when set, then `trace_level` from the
//! configuration, then `"info"`.
//!
//! ```rust
//! use repolens::observability::init_tracing;
//! use repolens::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("tracing is now active");
//! ```

mod exporter;
mod init;

pub use init::init_tracing;
