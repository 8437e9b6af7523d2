use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug};
use std::io;

pub const ENV_VAR_ERROR: i32 = 1;
pub const SERVER_ERROR: i32 = 2;
pub const REQWEST_ERROR: i32 = 3;
pub const UPSTREAM_ERROR: i32 = 4;
pub const EMPTY_RESPONSE_ERROR: i32 = 5;
pub const IO_ERROR: i32 = 6;

pub const INVALID_POSTCODE_ERROR: i32 = 100;
pub const DUPLICATE_POSTCODE_ERROR: i32 = 101;
pub const TOO_FEW_WAYPOINTS_ERROR: i32 = 102;
pub const MISSING_JOURNEY_ERROR: i32 = 103;
pub const MALFORMED_RESPONSE_ERROR: i32 = 104;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    /// Failures of the routing call itself, as opposed to bad input.
    pub fn is_transport(&self) -> bool {
        matches!(
            self.code,
            REQWEST_ERROR | UPSTREAM_ERROR | EMPTY_RESPONSE_ERROR
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error {
            code: IO_ERROR,
            message: format!("io error: {}", err),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self.code {
            REQWEST_ERROR | UPSTREAM_ERROR | EMPTY_RESPONSE_ERROR => StatusCode::BAD_GATEWAY,
            1..=99 => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "code": self.code,
            "error": self.message,
        }));

        (status, body).into_response()
    }
}

pub fn env_var_error(err: env::VarError) -> Error {
    Error {
        code: ENV_VAR_ERROR,
        message: format!("environment variable error: {}", err),
    }
}

pub fn server_error<T: Debug>(err: T) -> Error {
    Error {
        code: SERVER_ERROR,
        message: format!("server error: {:?}", err),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    Error {
        code: REQWEST_ERROR,
        message: format!("request failed: {}", err),
    }
}

pub fn upstream_error(status: u16) -> Error {
    Error {
        code: UPSTREAM_ERROR,
        message: format!("upstream responded with status {}", status),
    }
}

pub fn empty_response_error() -> Error {
    Error {
        code: EMPTY_RESPONSE_ERROR,
        message: "no journey data received".into(),
    }
}

pub fn invalid_postcode_error() -> Error {
    Error {
        code: INVALID_POSTCODE_ERROR,
        message: "Please enter a valid UK postcode".into(),
    }
}

pub fn duplicate_postcode_error() -> Error {
    Error {
        code: DUPLICATE_POSTCODE_ERROR,
        message: "This postcode has already been added".into(),
    }
}

pub fn too_few_waypoints_error() -> Error {
    Error {
        code: TOO_FEW_WAYPOINTS_ERROR,
        message: "Please add at least two postcodes to calculate a journey".into(),
    }
}

pub fn missing_journey_error() -> Error {
    Error {
        code: MISSING_JOURNEY_ERROR,
        message: "No journey data available. Please try again.".into(),
    }
}

pub fn malformed_response_error(detail: impl Into<String>) -> Error {
    Error {
        code: MALFORMED_RESPONSE_ERROR,
        message: format!("journey data could not be read: {}", detail.into()),
    }
}

#[test]
fn transport_errors_map_to_bad_gateway() {
    let response = upstream_error(500).into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let response = invalid_postcode_error().into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn only_network_failures_are_transport() {
    assert!(upstream_error(503).is_transport());
    assert!(empty_response_error().is_transport());
    assert!(!duplicate_postcode_error().is_transport());
    assert!(!malformed_response_error("x").is_transport());
}
