//! Monitor options and the validated configuration built from them.

use serde::Deserialize;

use crate::detect::DEFAULT_TIMEOUT_MS;
use crate::error::MonitorError;
use crate::net::Method;

/// Raw `init` options, as a page script would pass them.
///
/// ```json
/// {"url": "/perf", "timeoutUrl": "/perf/timeout", "method": "GET", "timeout": 8000}
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorOptions {
    pub url: Option<String>,
    pub timeout_url: Option<String>,
    pub method: Option<String>,
    pub timeout: Option<f64>,
}

impl MonitorOptions {
    pub fn new(url: impl Into<String>, timeout_url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            timeout_url: Some(timeout_url.into()),
            ..Default::default()
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn timeout(mut self, timeout_ms: f64) -> Self {
        self.timeout = Some(timeout_ms);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, MonitorError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Validated, immutable monitor configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Destination of the metrics report.
    pub url: String,
    /// Destination of the slow resource report.
    pub timeout_url: String,
    pub method: Method,
    /// Inclusive slow resource threshold, ms.
    pub timeout_ms: f64,
}

impl TryFrom<MonitorOptions> for Config {
    type Error = MonitorError;

    fn try_from(options: MonitorOptions) -> Result<Self, Self::Error> {
        let url = options.url.ok_or(MonitorError::MissingOption("url"))?;
        let timeout_url = options
            .timeout_url
            .ok_or(MonitorError::MissingOption("timeoutUrl"))?;
        let method = match options.method {
            Some(m) => m.parse().map_err(MonitorError::InvalidMethod)?,
            None => Method::Post,
        };
        Ok(Config {
            url,
            timeout_url,
            method,
            timeout_ms: options.timeout.unwrap_or(DEFAULT_TIMEOUT_MS),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_from(MonitorOptions::new("/perf", "/slow")).unwrap();
        assert_eq!(config.url, "/perf");
        assert_eq!(config.timeout_url, "/slow");
        assert_eq!(config.method, Method::Post);
        assert_eq!(config.timeout_ms, 10000.0);
    }

    #[test]
    fn from_json_with_overrides() {
        let options = MonitorOptions::from_json(
            r#"{"url": "/perf", "timeoutUrl": "/slow", "method": "get", "timeout": 2500}"#,
        )
        .unwrap();
        let config = Config::try_from(options).unwrap();
        assert_eq!(config.method, Method::Get);
        assert_eq!(config.timeout_ms, 2500.0);
    }

    #[test]
    fn missing_urls_fail_fast() {
        let err = Config::try_from(MonitorOptions {
            timeout_url: Some("/slow".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, MonitorError::MissingOption("url")));

        let err = Config::try_from(MonitorOptions::from_json(r#"{"url": "/perf"}"#).unwrap())
            .unwrap_err();
        assert!(matches!(err, MonitorError::MissingOption("timeoutUrl")));
    }

    #[test]
    fn unknown_method_rejected() {
        let err = Config::try_from(MonitorOptions::new("/a", "/b").method("PUT")).unwrap_err();
        assert!(matches!(err, MonitorError::InvalidMethod(ref m) if m == "PUT"));
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(
            MonitorOptions::from_json("{\"url\": 5}"),
            Err(MonitorError::InvalidOptions(_))
        ));
    }
}
