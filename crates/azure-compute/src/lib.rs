//! Hosted service bindings for the Azure Service Management API.
//!
//! Responses are decoded by streaming XML handlers in [`xml`] into the value
//! types of [`domain`]. Enumerated fields such as statuses and error codes
//! decode forward compatibly: a token the client does not know becomes the
//! enum's fallback variant, with the raw token kept alongside.
//!
//! [`AzureComputeClient`] implements [`HostedServiceApi`] on top of the
//! transport in `azure-compute-core`.

#![deny(missing_docs)]

pub mod client;
pub mod domain;
pub mod payload;
pub mod xml;

pub use client::{AzureComputeClient, AzureComputeClientBuilder, HostedServiceApi};
pub use domain::{
    ApiError, DetailedHostedServiceProperties, ErrorCode, HostedService,
    HostedServiceProperties, HostedServiceStatus, HostedServiceWithDetailedProperties,
    InstanceStatus, WireEnum,
};
pub use payload::{bind_create_hosted_service, CreateHostedServiceOptions};
pub use xml::{parse_xml, SaxHandler};

/// Convenient result alias that reuses the shared management error type.
pub type Result<T> = azure_compute_core::Result<T>;
