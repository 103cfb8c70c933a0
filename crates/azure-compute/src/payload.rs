//! XML request bodies.

use azure_compute_core::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use indexmap::IndexMap;
use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};

/// Namespace of every Service Management request document.
pub const MANAGEMENT_NAMESPACE: &str = "http://schemas.microsoft.com/windowsazure";

/// Optional parts of a create-hosted-service request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateHostedServiceOptions {
    /// Free-form description, up to 1024 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Caller-defined name/value pairs, sent in insertion order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extended_properties: IndexMap<String, String>,
}

impl CreateHostedServiceOptions {
    /// Create empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add an extended property.
    #[must_use]
    pub fn extended_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extended_properties.insert(name.into(), value.into());
        self
    }
}

/// Render the `<CreateHostedService>` request body.
///
/// The label is sent base64-encoded.
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] when `name`, `label` or `location` is blank.
pub fn bind_create_hosted_service(
    name: &str,
    label: &str,
    location: &str,
    options: &CreateHostedServiceOptions,
) -> Result<String> {
    for (field, value) in [("name", name), ("label", label), ("location", location)] {
        if value.trim().is_empty() {
            return Err(Error::InvalidRequest(format!(
                "hosted service {field} must not be blank"
            )));
        }
    }

    let mut xml = String::with_capacity(256);
    xml.push_str(&format!(
        r#"<CreateHostedService xmlns="{MANAGEMENT_NAMESPACE}">"#
    ));
    push_element(&mut xml, "ServiceName", name);
    push_element(&mut xml, "Label", &STANDARD.encode(label));
    if let Some(description) = &options.description {
        push_element(&mut xml, "Description", description);
    }
    push_element(&mut xml, "Location", location);

    if !options.extended_properties.is_empty() {
        xml.push_str("<ExtendedProperties>");
        for (name, value) in &options.extended_properties {
            xml.push_str("<ExtendedProperty>");
            push_element(&mut xml, "Name", name);
            push_element(&mut xml, "Value", value);
            xml.push_str("</ExtendedProperty>");
        }
        xml.push_str("</ExtendedProperties>");
    }

    xml.push_str("</CreateHostedService>");
    Ok(xml)
}

fn push_element(xml: &mut String, tag: &str, text: &str) {
    xml.push_str(&format!("<{tag}>{}</{tag}>", escape(text)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_body() {
        let xml =
            bind_create_hosted_service("web", "web", "West US", &CreateHostedServiceOptions::new())
                .unwrap();

        assert_eq!(
            xml,
            "<CreateHostedService xmlns=\"http://schemas.microsoft.com/windowsazure\">\
             <ServiceName>web</ServiceName>\
             <Label>d2Vi</Label>\
             <Location>West US</Location>\
             </CreateHostedService>"
        );
    }

    #[test]
    fn body_with_options() {
        let options = CreateHostedServiceOptions::new()
            .description("R&D <frontend>")
            .extended_property("owner", "ops")
            .extended_property("tier", "web");
        let xml = bind_create_hosted_service("rnd", "hello", "North Europe", &options).unwrap();

        assert_eq!(
            xml,
            "<CreateHostedService xmlns=\"http://schemas.microsoft.com/windowsazure\">\
             <ServiceName>rnd</ServiceName>\
             <Label>aGVsbG8=</Label>\
             <Description>R&amp;D &lt;frontend&gt;</Description>\
             <Location>North Europe</Location>\
             <ExtendedProperties>\
             <ExtendedProperty><Name>owner</Name><Value>ops</Value></ExtendedProperty>\
             <ExtendedProperty><Name>tier</Name><Value>web</Value></ExtendedProperty>\
             </ExtendedProperties>\
             </CreateHostedService>"
        );
    }

    #[test]
    fn blank_fields_are_rejected() {
        let options = CreateHostedServiceOptions::new();
        let err = bind_create_hosted_service("web", " ", "West US", &options).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(message) if message.contains("label")));
        assert!(bind_create_hosted_service("", "web", "West US", &options).is_err());
        assert!(bind_create_hosted_service("web", "web", "", &options).is_err());
    }
}
