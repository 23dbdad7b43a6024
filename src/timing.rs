//! Host-supplied timing records.
//!
//! The host's measurement subsystem is opaque to us: it hands out one
//! navigation record per page load and a growing list of resource records.
//! All timestamps are milliseconds relative to the same time origin.

use serde::Deserialize;

/// Page-load lifecycle milestones for one document.
///
/// Unset milestones are reported by hosts as `0`, so derived intervals can
/// come out negative. Field names deserialize from the host's camelCase JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationRecord {
    pub navigation_start: f64,
    pub unload_event_start: f64,
    pub unload_event_end: f64,
    pub redirect_start: f64,
    pub redirect_end: f64,
    pub fetch_start: f64,
    pub domain_lookup_start: f64,
    pub domain_lookup_end: f64,
    pub connect_start: f64,
    pub connect_end: f64,
    pub request_start: f64,
    pub response_start: f64,
    pub response_end: f64,
    pub dom_complete: f64,
    pub load_event_start: f64,
    pub load_event_end: f64,
}

/// Timing of one sub-resource fetch.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceRecord {
    /// Resource URL. Not unique: refetches produce separate records.
    pub name: String,
    pub start_time: f64,
    pub response_end: f64,
}

impl ResourceRecord {
    pub fn new(name: impl Into<String>, start_time: f64, response_end: f64) -> Self {
        Self {
            name: name.into(),
            start_time,
            response_end,
        }
    }
}

/// Read-only view of the host's timing buffers.
pub trait TimingSource {
    /// The navigation entry, if the host has produced one.
    fn navigation(&self) -> Option<NavigationRecord>;

    /// Resource entries in insertion order.
    fn resources(&self) -> Vec<ResourceRecord>;
}

/// Fixed timing buffers, e.g. a snapshot exported by the host as JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TimingSnapshot {
    pub navigation: Option<NavigationRecord>,
    pub resources: Vec<ResourceRecord>,
}

impl TimingSnapshot {
    pub fn new(navigation: NavigationRecord, resources: Vec<ResourceRecord>) -> Self {
        Self {
            navigation: Some(navigation),
            resources,
        }
    }

    /// Parse `{"navigation": {...}, "resources": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl TimingSource for TimingSnapshot {
    fn navigation(&self) -> Option<NavigationRecord> {
        self.navigation
    }

    fn resources(&self) -> Vec<ResourceRecord> {
        self.resources.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_from_host_json() {
        let snap = TimingSnapshot::from_json(
            r#"{
                "navigation": {"navigationStart": 100, "loadEventEnd": 1600.5},
                "resources": [
                    {"name": "https://cdn.example.com/a.js", "startTime": 10, "responseEnd": 50},
                    {"name": "https://cdn.example.com/a.js", "startTime": 60, "responseEnd": 70}
                ]
            }"#,
        )
        .unwrap();

        let nav = snap.navigation().unwrap();
        assert_eq!(nav.navigation_start, 100.0);
        assert_eq!(nav.load_event_end, 1600.5);
        // Absent milestones read as unset.
        assert_eq!(nav.redirect_start, 0.0);

        let res = snap.resources();
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].name, res[1].name);
        assert_eq!(res[1].start_time, 60.0);
    }

    #[test]
    fn empty_snapshot() {
        let snap = TimingSnapshot::from_json("{}").unwrap();
        assert!(snap.navigation().is_none());
        assert!(snap.resources().is_empty());
    }
}
