//! Structured span definitions for remote calls.

use std::time::Instant;

use tracing::{Level, Span, field, span};

use crate::Result;

/// Span tracking a single gateway call.
///
/// Records the method name, HTTP status, latency and outcome. Never records the request
/// URL, since its query string carries credentials.
pub struct RemoteCallSpan {
    span: Span,
    start: Instant,
}

impl RemoteCallSpan {
    pub fn new(method: &str) -> Self {
        let span = span!(
            Level::INFO,
            "remote.call",
            method = method,
            otel.name = "remote.call",
            status = field::Empty,
            latency_ms = field::Empty,
            outcome = field::Empty,
        );
        Self {
            span,
            start: Instant::now(),
        }
    }

    pub fn record_status(&self, status: u16) {
        self.span.record("status", status);
    }

    pub fn finish<T>(self, result: &Result<T>) {
        let latency_ms = self.start.elapsed().as_millis() as u64;
        self.span.record("latency_ms", latency_ms);
        let outcome = match result {
            Ok(_) => "ok",
            Err(e) => e.category().as_str(),
        };
        self.span.record("outcome", outcome);
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}
