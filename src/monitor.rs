//! The page performance monitor.
//!
//! `Monitor` is chosen once, when it is constructed: hosts with timing
//! support get a working monitor, hosts without it get a monitor whose every
//! operation does nothing.
//!
//! Lifecycle: `init` stores the configuration and arms the scheduler; after
//! the load event (and a free turn of the event loop) `log_package` derives
//! the metrics, finds slow resources and reports both.

use std::cell::{Cell, OnceCell};
use std::rc::Rc;
use std::sync::Arc;

use crate::config::{Config, MonitorOptions};
use crate::detect::{detect_timeouts, DEFAULT_TIMEOUT_MS};
use crate::error::MonitorError;
use crate::host::Host;
use crate::metrics::{derive_metrics, load_time, MetricsRecord};
use crate::net::{Method, Payload, Reporter, Transport};
use crate::schedule;
use crate::timing::{ResourceRecord, TimingSource};

/// Page performance monitor, selected once from the host's capabilities.
pub enum Monitor {
    Supported(ActiveMonitor),
    /// The host has no timing support.
    Unsupported,
}

impl Monitor {
    pub fn new(host: Rc<dyn Host>, transport: Arc<dyn Transport>) -> Self {
        match host.timing() {
            Some(timing) => Monitor::Supported(ActiveMonitor {
                inner: Rc::new(Inner {
                    host,
                    timing,
                    reporter: Reporter::new(transport),
                    config: OnceCell::new(),
                    armed: Cell::new(false),
                }),
            }),
            None => {
                log::debug!("host has no timing support, monitor disabled");
                Monitor::Unsupported
            }
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Monitor::Supported(_))
    }

    /// Validate and store the configuration, then arm the report for after
    /// page load. Configuration is write-once.
    pub fn init(&self, options: MonitorOptions) -> Result<(), MonitorError> {
        match self {
            Monitor::Supported(m) => m.init(options),
            Monitor::Unsupported => Ok(()),
        }
    }

    pub fn config(&self) -> Option<&Config> {
        match self {
            Monitor::Supported(m) => m.inner.config.get(),
            Monitor::Unsupported => None,
        }
    }

    /// Report an arbitrary payload. Never blocks, never fails.
    pub fn log(&self, url: &str, payload: &Payload, method: Method) {
        if let Monitor::Supported(m) = self {
            m.inner.reporter.report(url, payload, method);
        }
    }

    /// Collect and report metrics and slow resources now.
    pub fn log_package(&self) {
        if let Monitor::Supported(m) = self {
            m.inner.log_package();
        }
    }

    /// Load duration of a single resource entry.
    pub fn get_load_time(&self, resource: &ResourceRecord) -> Option<f64> {
        match self {
            Monitor::Supported(_) => Some(load_time(resource)),
            Monitor::Unsupported => None,
        }
    }

    /// The navigation entry's `domComplete` milestone.
    pub fn page_load_time(&self) -> Option<f64> {
        match self {
            Monitor::Supported(m) => m.inner.timing.navigation().map(|t| t.dom_complete),
            Monitor::Unsupported => None,
        }
    }

    /// Names of resources that took at least `limit_ms` (default 10s).
    pub fn get_timeout_res(&self, limit_ms: Option<f64>) -> Vec<String> {
        match self {
            Monitor::Supported(m) => m.inner.timeout_res(limit_ms.unwrap_or(DEFAULT_TIMEOUT_MS)),
            Monitor::Unsupported => Vec::new(),
        }
    }

    pub fn get_times(&self) -> Option<MetricsRecord> {
        match self {
            Monitor::Supported(m) => m.inner.times(),
            Monitor::Unsupported => None,
        }
    }

    /// Arm `log_package` to run after the load event. Does nothing before
    /// `init` or once the report is already armed.
    pub fn bind_event(&self) {
        if let Monitor::Supported(m) = self {
            m.bind_event();
        }
    }
}

/// Monitor on a host with timing support.
#[derive(Clone)]
pub struct ActiveMonitor {
    inner: Rc<Inner>,
}

struct Inner {
    host: Rc<dyn Host>,
    timing: Rc<dyn TimingSource>,
    reporter: Reporter,
    config: OnceCell<Config>,
    armed: Cell<bool>,
}

impl ActiveMonitor {
    fn init(&self, options: MonitorOptions) -> Result<(), MonitorError> {
        let config = Config::try_from(options)?;
        self.inner
            .config
            .set(config)
            .map_err(|_| MonitorError::AlreadyInitialized)?;
        self.bind_event();
        Ok(())
    }

    fn bind_event(&self) {
        if self.inner.config.get().is_none() {
            log::debug!("monitor not initialized, load handler not armed");
            return;
        }
        if self.inner.armed.replace(true) {
            return;
        }
        let inner = Rc::clone(&self.inner);
        let deferral = schedule::arm(&self.inner.host, Box::new(move || inner.log_package()));
        log::info!("performance report armed ({:?} after load)", deferral);
    }
}

impl Inner {
    fn times(&self) -> Option<MetricsRecord> {
        self.timing.navigation().map(|t| derive_metrics(&t))
    }

    fn timeout_res(&self, limit_ms: f64) -> Vec<String> {
        detect_timeouts(&self.timing.resources(), limit_ms)
    }

    fn log_package(&self) {
        let Some(config) = self.config.get() else {
            log::debug!("monitor not initialized, nothing to report");
            return;
        };

        match self.times() {
            Some(times) => {
                log::debug!("page timings: {:?}", times);
                self.reporter.report(&config.url, &Payload::from(&times), config.method);
            }
            None => log::warn!("no navigation timing entry, metrics report skipped"),
        }

        let timeout_res = self.timeout_res(config.timeout_ms);
        if !timeout_res.is_empty() {
            self.reporter.report(
                &config.timeout_url,
                &Payload::timeout_report(timeout_res),
                config.method,
            );
        }
    }
}
