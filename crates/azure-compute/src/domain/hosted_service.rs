//! Hosted service values and the builders the XML handlers fill in.

use crate::domain::wire::{wire_enum, WireEnum};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

wire_enum! {
    /// Provisioning status of a hosted service.
    ///
    /// Tokens that are not listed here decode to [`HostedServiceStatus::Unrecognized`].
    pub enum HostedServiceStatus {
        /// The service is being created.
        Creating => "CREATING",
        /// The service exists.
        Created => "CREATED",
        /// The service is being deleted.
        Deleting => "DELETING",
        /// The service has been deleted.
        Deleted => "DELETED",
        /// The service configuration is changing.
        Changing => "CHANGING",
        /// The DNS name of the service is being resolved.
        ResolvingDns => "RESOLVING_DNS",
        /// Token not known to this client.
        Unrecognized => "UNRECOGNIZED",
    }
    fallback = Unrecognized;
}

/// System properties of a hosted service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedServiceProperties {
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Location of the service, unless it belongs to an affinity group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Affinity group the service belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affinity_group: Option<String>,
    /// Label, already decoded from base64.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl HostedServiceProperties {
    /// Start a builder.
    #[must_use]
    pub fn builder() -> HostedServicePropertiesBuilder {
        HostedServicePropertiesBuilder::default()
    }
}

/// Accumulates [`HostedServiceProperties`] field by field.
#[derive(Debug, Clone, Default)]
pub struct HostedServicePropertiesBuilder {
    inner: HostedServiceProperties,
}

impl HostedServicePropertiesBuilder {
    /// Set the description.
    pub fn description(&mut self, description: Option<String>) -> &mut Self {
        self.inner.description = description;
        self
    }

    /// Set the location.
    pub fn location(&mut self, location: Option<String>) -> &mut Self {
        self.inner.location = location;
        self
    }

    /// Set the affinity group.
    pub fn affinity_group(&mut self, affinity_group: Option<String>) -> &mut Self {
        self.inner.affinity_group = affinity_group;
        self
    }

    /// Set the decoded label.
    pub fn label(&mut self, label: Option<String>) -> &mut Self {
        self.inner.label = label;
        self
    }

    /// Finish the value.
    #[must_use]
    pub fn build(self) -> HostedServiceProperties {
        self.inner
    }
}

/// Hosted service properties returned when details are embedded.
///
/// Generic over the status enumeration so role-level documents can reuse the
/// same shape with [`InstanceStatus`](crate::domain::InstanceStatus).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize",
    deserialize = "S: Deserialize<'de>"
))]
pub struct DetailedHostedServiceProperties<S = HostedServiceStatus> {
    /// Base properties.
    #[serde(flatten)]
    pub properties: HostedServiceProperties,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    /// Decoded status, the fallback variant when the token was not recognized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<S>,
    /// Status token exactly as received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_status: Option<String>,
    /// Caller-defined name/value pairs, in document order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extended_properties: IndexMap<String, String>,
}

impl<S> Default for DetailedHostedServiceProperties<S> {
    fn default() -> Self {
        Self {
            properties: HostedServiceProperties::default(),
            created: None,
            last_modified: None,
            status: None,
            raw_status: None,
            extended_properties: IndexMap::new(),
        }
    }
}

impl<S: WireEnum> DetailedHostedServiceProperties<S> {
    /// Start a builder.
    #[must_use]
    pub fn builder() -> DetailedHostedServicePropertiesBuilder<S> {
        DetailedHostedServicePropertiesBuilder::default()
    }

    /// Returns true when the status token was not one this client knows.
    #[must_use]
    pub fn has_unrecognized_status(&self) -> bool {
        self.status == Some(S::FALLBACK)
    }
}

/// Accumulates [`DetailedHostedServiceProperties`] field by field.
#[derive(Debug, Clone)]
pub struct DetailedHostedServicePropertiesBuilder<S = HostedServiceStatus> {
    inner: DetailedHostedServiceProperties<S>,
}

impl<S> Default for DetailedHostedServicePropertiesBuilder<S> {
    fn default() -> Self {
        Self {
            inner: DetailedHostedServiceProperties::default(),
        }
    }
}

impl<S> DetailedHostedServicePropertiesBuilder<S> {
    /// Copy in the base properties.
    pub fn from_properties(&mut self, properties: HostedServiceProperties) -> &mut Self {
        self.inner.properties = properties;
        self
    }

    /// Set the creation time.
    pub fn created(&mut self, created: Option<DateTime<Utc>>) -> &mut Self {
        self.inner.created = created;
        self
    }

    /// Set the last modification time.
    pub fn last_modified(&mut self, last_modified: Option<DateTime<Utc>>) -> &mut Self {
        self.inner.last_modified = last_modified;
        self
    }

    /// Set the decoded status.
    pub fn status(&mut self, status: S) -> &mut Self {
        self.inner.status = Some(status);
        self
    }

    /// Set the status token as received.
    pub fn raw_status(&mut self, raw_status: Option<String>) -> &mut Self {
        self.inner.raw_status = raw_status;
        self
    }

    /// Append an extended property. A repeated name keeps its first position
    /// and takes the new value.
    pub fn add_extended_property(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.inner
            .extended_properties
            .insert(name.into(), value.into());
        self
    }

    /// Finish the value.
    #[must_use]
    pub fn build(self) -> DetailedHostedServiceProperties<S> {
        self.inner
    }
}

/// A hosted service: its address, name and properties.
///
/// `P` is [`HostedServiceProperties`] for plain lookups and
/// [`DetailedHostedServiceProperties`] when details are embedded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedService<P = HostedServiceProperties> {
    /// Management URL of the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// DNS prefix of the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Service properties.
    pub properties: P,
}

/// A hosted service with embedded details.
pub type HostedServiceWithDetailedProperties = HostedService<DetailedHostedServiceProperties>;
