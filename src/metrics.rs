//! Navigation timing metrics.
//!
//! Every metric is a plain `end - start` over two fields of the same
//! navigation record. Values are never rounded or clamped: an unset field
//! (0) yields a negative or meaningless interval and that is passed through
//! for the collecting backend to filter.

use crate::timing::{NavigationRecord, ResourceRecord};

/// Durations derived from one navigation record, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricsRecord {
    /// Navigation start to end of the load handler. Roughly how long the
    /// user waited for a usable page.
    pub load_page: f64,
    /// DOM parsing: response end to DOM complete.
    pub dom_ready: f64,
    pub redirect: f64,
    /// DNS lookup.
    pub lookup_domain: f64,
    /// Time to first byte.
    pub ttfb: f64,
    /// Content download: request start to response end.
    pub request: f64,
    /// Time spent in onload handlers.
    pub load_event: f64,
    /// DNS cache: fetch start to lookup start.
    pub appcache: f64,
    pub unload_event: f64,
    /// TCP connect handshake.
    pub connect: f64,
}

impl MetricsRecord {
    /// Wire names in report order.
    pub const KEYS: [&'static str; 10] = [
        "loadPage",
        "domReady",
        "redirect",
        "lookupDomain",
        "ttfb",
        "request",
        "loadEvent",
        "appcache",
        "unloadEvent",
        "connect",
    ];

    /// `(wire name, value)` pairs in report order.
    pub fn entries(&self) -> [(&'static str, f64); 10] {
        let values = [
            self.load_page,
            self.dom_ready,
            self.redirect,
            self.lookup_domain,
            self.ttfb,
            self.request,
            self.load_event,
            self.appcache,
            self.unload_event,
            self.connect,
        ];
        std::array::from_fn(|i| (Self::KEYS[i], values[i]))
    }
}

/// Derive all ten metrics from a navigation record.
pub fn derive_metrics(t: &NavigationRecord) -> MetricsRecord {
    MetricsRecord {
        load_page: t.load_event_end - t.navigation_start,
        dom_ready: t.dom_complete - t.response_end,
        redirect: t.redirect_end - t.redirect_start,
        lookup_domain: t.domain_lookup_end - t.domain_lookup_start,
        ttfb: t.response_start - t.navigation_start,
        request: t.response_end - t.request_start,
        load_event: t.load_event_end - t.load_event_start,
        appcache: t.domain_lookup_start - t.fetch_start,
        unload_event: t.unload_event_end - t.unload_event_start,
        connect: t.connect_end - t.connect_start,
    }
}

/// Load duration of a single resource.
///
/// Resource records name their end milestone `responseEnd`; the navigation
/// record's equivalent is `domComplete`, so this helper is resource-only.
#[inline]
pub fn load_time(resource: &ResourceRecord) -> f64 {
    resource.response_end - resource.start_time
}
