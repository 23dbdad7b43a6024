//! Page performance monitor.
//!
//! Reads the host's navigation and resource timing, derives load metrics,
//! finds resources slower than a threshold and reports both to a collector
//! once the page has loaded, without ever blocking or failing the page.

pub mod config;
pub mod detect;
pub mod error;
pub mod host;
pub mod metrics;
pub mod monitor;
pub mod net;
pub mod schedule;
pub mod timing;

pub use config::{Config, MonitorOptions};
pub use error::{MonitorError, ReportError};
pub use monitor::Monitor;
