/// Error handling for noughts_web.
///
/// Every domain error in this crate maps to the same JSON envelope through
/// [`IntoErrorResponse`]: an HTTP status, a machine-readable code, and a
/// human-readable message. Precondition violations are never swallowed —
/// each one surfaces with its own distinguishable code.
use serde::{Deserialize, Serialize};
use std::fmt;
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::Reply;

/// Standard error body for all API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g. "not_your_turn").
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional structured details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn into_response(self, status: StatusCode) -> Response {
        reply::with_status(reply::json(&self), status).into_response()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// How loudly an error should be logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// 4xx — expected validation failures, normal operation.
    Client,
    /// 5xx — unexpected, needs investigation.
    Server,
    /// System integrity at risk (poisoned locks).
    Critical,
}

/// Maps a domain error onto an HTTP response, logging it on the way out.
pub trait IntoErrorResponse {
    fn status_code(&self) -> StatusCode;

    fn error_code(&self) -> &'static str;

    fn error_message(&self) -> String;

    fn error_details(&self) -> Option<serde_json::Value> {
        None
    }

    fn severity(&self) -> ErrorSeverity {
        if self.status_code().is_server_error() {
            ErrorSeverity::Server
        } else {
            ErrorSeverity::Client
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        match self.error_details() {
            Some(details) => {
                ErrorResponse::with_details(self.error_code(), self.error_message(), details)
            }
            None => ErrorResponse::new(self.error_code(), self.error_message()),
        }
    }

    fn into_http_response(self) -> Response
    where
        Self: Sized,
    {
        let status = self.status_code();
        let severity = self.severity();
        let body = self.to_error_response();

        match severity {
            ErrorSeverity::Client => {
                tracing::info!(error = %body.error, message = %body.message, "client error");
            }
            ErrorSeverity::Server => {
                tracing::error!(error = %body.error, message = %body.message, "server error");
            }
            ErrorSeverity::Critical => {
                tracing::error!(
                    error = %body.error,
                    message = %body.message,
                    "critical error, system integrity at risk"
                );
            }
        }

        body.into_response(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_response_serialization() {
        let error = ErrorResponse::new("game_not_found", "No such game");
        let json = serde_json::to_value(&error).expect("serialize");

        assert_eq!(json["error"], "game_not_found");
        assert_eq!(json["message"], "No such game");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn error_response_with_details() {
        let details = json!({ "cell": 42, "cells": 9 });
        let error = ErrorResponse::with_details("out_of_range", "Cell off the board", details);
        let json = serde_json::to_value(&error).expect("serialize");

        assert_eq!(json["error"], "out_of_range");
        assert_eq!(json["details"]["cell"], 42);
    }

    #[test]
    fn error_response_display() {
        let error = ErrorResponse::new("not_your_turn", "It is not bob's turn");
        assert_eq!(format!("{error}"), "not_your_turn: It is not bob's turn");
    }
}
