use std::sync::Arc;
use std::thread;

use super::payload::{url_with_query, Payload};
use super::transport::{Body, Method, ReportRequest, Transport};

/// Fire-and-forget reporter.
///
/// Each report runs on its own detached thread. Failures are logged and
/// dropped; the caller never waits and never sees an error.
#[derive(Clone)]
pub struct Reporter {
    transport: Arc<dyn Transport>,
}

impl Reporter {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Encode `payload` for `method`: a query string for GET, a multipart
    /// form for POST.
    pub fn encode(url: &str, payload: &Payload, method: Method) -> ReportRequest {
        match method {
            Method::Get => ReportRequest {
                method,
                url: url_with_query(url, payload),
                body: Body::Empty,
            },
            Method::Post => ReportRequest {
                method,
                url: url.to_string(),
                body: Body::Form(payload.form_fields()),
            },
        }
    }

    pub fn report(&self, url: &str, payload: &Payload, method: Method) {
        let request = Self::encode(url, payload, method);
        log::debug!("report {} {} {:?}", request.method, request.url, request.body);

        let transport = Arc::clone(&self.transport);
        let spawned = thread::Builder::new()
            .name("pmonitor-report".to_string())
            .spawn(move || {
                if let Err(e) = transport.send(&request) {
                    log::warn!("report to {} dropped: {}", request.url, e);
                }
            });
        if let Err(e) = spawned {
            log::warn!("could not start report thread: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::net::testing::ChannelTransport;
    use std::sync::mpsc;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Refuses every request and tells the test which URL it refused.
    struct FailingTransport {
        refused: Mutex<mpsc::Sender<String>>,
    }

    impl Transport for FailingTransport {
        fn send(&self, request: &ReportRequest) -> Result<(), ReportError> {
            if let Ok(tx) = self.refused.lock() {
                let _ = tx.send(request.url.clone());
            }
            Err(ReportError::Network("connection refused".to_string()))
        }
    }

    #[test]
    fn get_encodes_query_with_empty_body() {
        let p = Payload::new().with("a", 1.0).with("b", 2.0);
        let req = Reporter::encode("https://c.example.com/perf", &p, Method::Get);
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.body, Body::Empty);
        let (base, query) = req.url.split_once('?').unwrap();
        assert_eq!(base, "https://c.example.com/perf");
        let pairs: Vec<&str> = query.split('&').collect();
        assert!(pairs.contains(&"a=1"));
        assert!(pairs.contains(&"b=2"));
    }

    #[test]
    fn post_encodes_one_field_per_entry() {
        let p = Payload::new().with("a", 1.0).with("b", "two");
        let req = Reporter::encode("/perf", &p, Method::Post);
        assert_eq!(req.url, "/perf");
        assert_eq!(
            req.body,
            Body::Form(vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "two".to_string()),
            ])
        );
    }

    #[test]
    fn report_is_delivered_off_thread() {
        let (transport, rx) = ChannelTransport::new();
        let reporter = Reporter::new(Arc::new(transport));
        reporter.report("/perf", &Payload::new().with("a", 1.0), Method::Post);

        let req = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(req.url, "/perf");
    }

    #[test]
    fn transport_failure_is_swallowed() {
        let (tx, rx) = mpsc::channel();
        let reporter = Reporter::new(Arc::new(FailingTransport {
            refused: Mutex::new(tx),
        }));
        // Returns normally; the failure is only logged on the report thread.
        reporter.report("/perf", &Payload::new(), Method::Get);
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), "/perf");

        // The reporter is still usable after a dropped report.
        reporter.report("/perf/timeout", &Payload::new(), Method::Post);
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), "/perf/timeout");
    }
}
