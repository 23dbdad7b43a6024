pub mod payload;
pub mod report;
pub mod transport;

pub use payload::{FieldValue, Payload};
pub use report::Reporter;
pub use transport::{Body, HttpTransport, Method, ReportRequest, Transport};
