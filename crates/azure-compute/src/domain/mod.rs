//! Domain values decoded from management API responses.

pub mod error;
pub mod hosted_service;
pub mod instance_status;
pub mod wire;

pub use error::{ApiError, ApiErrorBuilder, ErrorCode};
pub use hosted_service::{
    DetailedHostedServiceProperties, DetailedHostedServicePropertiesBuilder, HostedService,
    HostedServiceProperties, HostedServicePropertiesBuilder, HostedServiceStatus,
    HostedServiceWithDetailedProperties,
};
pub use instance_status::InstanceStatus;
pub use wire::WireEnum;
