//! The success/failure envelope returned by every brokering operation.
//!
//! A [`Response`] is either successful (no error code) or failed (an error
//! code plus an optional message). Success is derived from the absence of a
//! code, so the two states cannot be mixed up.
//!
//! ```
//! use fleet_session_broker::{ErrorCode, Response};
//!
//! let ok = Response::ok(7);
//! assert!(ok.is_success());
//!
//! let failed: Response<u32> = Response::failure(ErrorCode::UnknownError, "boom");
//! assert_eq!(failed.error_code(), Some(ErrorCode::UnknownError));
//! assert_eq!(failed.error_message(), Some("boom"));
//! ```

use serde::Serialize;

use crate::error_codes::ErrorCode;

/// Outcome of a brokering operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response<T> {
    success: bool,
    payload: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
}

impl<T> Response<T> {
    /// A successful response carrying `payload`.
    pub fn ok(payload: T) -> Self {
        Self {
            success: true,
            payload,
            error_code: None,
            error_message: None,
        }
    }

    /// A failed response. `payload` is kept so hosts can still inspect it.
    pub fn fail(payload: T, code: ErrorCode, message: Option<String>) -> Self {
        Self {
            success: false,
            payload,
            error_code: Some(code),
            error_message: message,
        }
    }

    /// Returns `true` if the operation succeeded.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The failure code, `None` on success.
    pub fn error_code(&self) -> Option<ErrorCode> {
        self.error_code
    }

    /// Diagnostic text attached to a failure.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Borrow the payload.
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Consume the envelope and return its payload.
    pub fn into_payload(self) -> T {
        self.payload
    }

    /// Converts into a [`Result`], keeping the payload only on success.
    pub fn into_result(self) -> Result<T, (ErrorCode, Option<String>)> {
        match self.error_code {
            None => Ok(self.payload),
            Some(code) => Err((code, self.error_message)),
        }
    }
}

impl<T: Default> Response<T> {
    /// A failed response with a default payload and a message.
    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::fail(T::default(), code, Some(message.into()))
    }

    /// A failed response with a default payload and no message.
    pub fn failure_code(code: ErrorCode) -> Self {
        Self::fail(T::default(), code, None)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::models::GetGameConnectionResponse;

    #[test]
    fn ok_has_no_error() {
        let response = Response::ok("payload");
        assert!(response.is_success());
        assert!(response.error_code().is_none());
        assert!(response.error_message().is_none());
        assert_eq!(*response.payload(), "payload");
    }

    #[test]
    fn failure_always_carries_code() {
        let response: Response<GetGameConnectionResponse> =
            Response::failure_code(ErrorCode::NoGameSessionWasFound);
        assert!(!response.is_success());
        assert_eq!(response.error_code(), Some(ErrorCode::NoGameSessionWasFound));
        assert!(response.error_message().is_none());
        assert!(!response.payload().ready);
    }

    #[test]
    fn into_result_splits_outcomes() {
        assert_eq!(Response::ok(3).into_result(), Ok(3));
        let failed: Response<u8> = Response::failure(ErrorCode::UnknownError, "socket closed");
        assert_eq!(
            failed.into_result(),
            Err((ErrorCode::UnknownError, Some("socket closed".to_string())))
        );
    }

    #[test]
    fn serializes_success_flag() {
        let failed: Response<u8> = Response::failure(ErrorCode::UnknownError, "x");
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error_code"], "UNKNOWN_ERROR");
        assert_eq!(value["error_message"], "x");

        let value = serde_json::to_value(Response::ok(1u8)).unwrap();
        assert_eq!(value["success"], true);
        assert!(value.get("error_code").is_none());
    }
}
