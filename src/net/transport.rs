use std::fmt;

use crate::error::ReportError;

/// HTTP method used for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    Get,
    #[default]
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Method {
    type Err = String;

    /// Case-insensitive: `get`, `GET` and `Get` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Method::Get),
            "post" => Ok(Method::Post),
            _ => Err(s.to_string()),
        }
    }
}

/// Request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    /// Multipart form, one text field per entry.
    Form(Vec<(String, String)>),
}

/// A fully encoded report, ready for a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub method: Method,
    pub url: String,
    pub body: Body,
}

/// Something that can deliver a report. Implementations may block: the
/// reporter always calls them off the page's thread.
pub trait Transport: Send + Sync {
    fn send(&self, request: &ReportRequest) -> Result<(), ReportError>;
}

/// reqwest-backed transport.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ReportError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("pmonitor/", env!("CARGO_PKG_VERSION")))
            // Only measured resource durations have a timeout, not the report itself.
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|e| ReportError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    /// Use a preconfigured client (proxy, TLS roots, headers).
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ReportRequest) -> Result<(), ReportError> {
        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };

        let builder = match &request.body {
            Body::Empty => builder,
            Body::Form(fields) => {
                let form = fields
                    .iter()
                    .fold(reqwest::blocking::multipart::Form::new(), |form, (k, v)| {
                        form.text(k.clone(), v.clone())
                    });
                builder.multipart(form)
            }
        };

        let response = builder
            .send()
            .map_err(|e| ReportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::Status(status.as_u16()));
        }
        Ok(())
    }
}
