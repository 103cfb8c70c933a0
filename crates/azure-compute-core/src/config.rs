//! Configuration structures for Azure Compute clients.
//!
//! This module provides the configuration for connecting to the Service Management
//! endpoint of a subscription, including TLS client identity and validation.

use crate::uuid::SubscriptionId;
use crate::Error;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Public Service Management endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://management.core.windows.net/";

/// Value sent in the `x-ms-version` header when none is configured.
pub const DEFAULT_API_VERSION: &str = "2014-10-01";

/// Configuration for an Azure Compute client instance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AzureComputeConfig {
    /// Service Management base URL
    #[validate(url)]
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Subscription that scopes every request
    pub subscription_id: SubscriptionId,

    /// API version sent as `x-ms-version`
    #[validate(length(min = 1))]
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Optional path to custom CA certificate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_ca_cert: Option<PathBuf>,

    /// PEM bundle (certificate and private key) of the management certificate
    #[serde(default, skip_serializing)]
    pub identity_pem: Option<SecretString>,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum number of retry attempts
    #[validate(range(min = 0, max = 10))]
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

const fn default_tls_verify() -> bool {
    true
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_max_retries() -> u32 {
    3
}

impl AzureComputeConfig {
    /// Create a configuration for the public endpoint and the given subscription.
    #[must_use]
    pub fn new(subscription_id: SubscriptionId) -> Self {
        Self {
            endpoint: default_endpoint(),
            subscription_id,
            api_version: default_api_version(),
            tls_verify: default_tls_verify(),
            tls_ca_cert: None,
            identity_pem: None,
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }

    /// Load a configuration from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or validation fails.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Point the client at a different management endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Result<Self, Error> {
        self.endpoint = endpoint.into();
        self.validate()?;
        Ok(self)
    }

    /// Set the `x-ms-version` header value.
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the management certificate as a PEM bundle.
    #[must_use]
    pub fn with_identity_pem(mut self, pem: impl Into<String>) -> Self {
        self.identity_pem = Some(SecretString::from(pem.into()));
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set custom CA certificate path.
    #[must_use]
    pub fn with_ca_cert(mut self, path: PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Set maximum retry attempts.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Base URL of all subscription-scoped resources, `{endpoint}/{subscription}/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint cannot be parsed.
    pub fn subscription_url(&self) -> Result<Url, Error> {
        let mut endpoint = self.endpoint.clone();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        let base = Url::parse(&endpoint)
            .map_err(|e| Error::ConfigError(format!("Invalid endpoint URL: {e}")))?;
        Ok(base.join(&format!("{}/", self.subscription_id))?)
    }
}
