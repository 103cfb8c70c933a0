//! Error documents returned by the management API.

use crate::domain::wire::wire_enum;
use azure_compute_core::Error;
use serde::{Deserialize, Serialize};

wire_enum! {
    /// Documented management API error codes.
    ///
    /// Codes that are not listed here decode to [`ErrorCode::Unrecognized`].
    pub enum ErrorCode {
        /// The `x-ms-version` header is missing or not supported.
        MissingOrIncorrectVersionHeader => "MISSING_OR_INCORRECT_VERSION_HEADER",
        /// The request is not valid.
        InvalidRequest => "INVALID_REQUEST",
        /// The request body is not valid XML for the operation.
        InvalidXmlRequest => "INVALID_XML_REQUEST",
        /// A query parameter has an invalid value.
        InvalidQueryParameterValue => "INVALID_QUERY_PARAMETER_VALUE",
        /// The HTTP verb is not supported by the resource.
        InvalidHttpVerb => "INVALID_HTTP_VERB",
        /// A required query parameter is missing or invalid.
        MissingOrInvalidRequiredQueryParameter => "MISSING_OR_INVALID_REQUIRED_QUERY_PARAMETER",
        /// The resource does not exist.
        ResourceNotFound => "RESOURCE_NOT_FOUND",
        /// The management certificate was not accepted.
        AuthenticationFailed => "AUTHENTICATION_FAILED",
        /// The subscription is disabled.
        SubscriptionDisabled => "SUBSCRIPTION_DISABLED",
        /// The caller may not perform the operation.
        ForbiddenError => "FORBIDDEN_ERROR",
        /// The resource name is taken or the resource is in a conflicting state.
        ConflictError => "CONFLICT_ERROR",
        /// The subscription is being throttled.
        TooManyRequests => "TOO_MANY_REQUESTS",
        /// The server hit an internal error.
        InternalError => "INTERNAL_ERROR",
        /// The server is too busy to handle the request.
        ServerBusy => "SERVER_BUSY",
        /// Code not known to this client.
        Unrecognized => "UNRECOGNIZED",
    }
    fallback = Unrecognized;
}

/// Decoded `<Error>` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Decoded code, the fallback variant when the token was not recognized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    /// Code token exactly as received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_code: Option<String>,
    /// Human-readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiError {
    /// Start a builder.
    #[must_use]
    pub fn builder() -> ApiErrorBuilder {
        ApiErrorBuilder::default()
    }

    /// Returns true when neither a code nor a message was present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw_code.is_none() && self.message.is_none()
    }

    /// Convert into the crate error for a response with the given status.
    #[must_use]
    pub fn into_error(self, status: u16) -> Error {
        Error::Api {
            status,
            code: self.raw_code.unwrap_or_default(),
            message: self.message.unwrap_or_default(),
        }
    }
}

/// Accumulates an [`ApiError`] field by field.
#[derive(Debug, Clone, Default)]
pub struct ApiErrorBuilder {
    inner: ApiError,
}

impl ApiErrorBuilder {
    /// Set the decoded code.
    pub fn code(&mut self, code: ErrorCode) -> &mut Self {
        self.inner.code = Some(code);
        self
    }

    /// Set the code token as received.
    pub fn raw_code(&mut self, raw_code: Option<String>) -> &mut Self {
        self.inner.raw_code = raw_code;
        self
    }

    /// Set the message.
    pub fn message(&mut self, message: Option<String>) -> &mut Self {
        self.inner.message = message;
        self
    }

    /// Finish the value.
    #[must_use]
    pub fn build(self) -> ApiError {
        self.inner
    }
}
