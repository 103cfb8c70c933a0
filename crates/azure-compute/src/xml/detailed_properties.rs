use super::{
    current_or_none, equals_or_suffix, parse_timestamp, HostedServicePropertiesHandler, SaxHandler,
};
use crate::domain::{
    DetailedHostedServiceProperties, DetailedHostedServicePropertiesBuilder, HostedServiceStatus,
    WireEnum,
};
use azure_compute_core::{Error, Result};
use tracing::warn;

/// Decodes a `<HostedServiceProperties>` block returned with embedded details.
///
/// Adds `DateCreated`, `DateLastModified`, `Status` and the `Name`/`Value`
/// pairs of `<ExtendedProperties>` on top of the base properties, which are
/// handed to an owned [`HostedServicePropertiesHandler`].
///
/// A `Value` must follow a `Name`. One that arrives with no pending name fails
/// the document.
#[derive(Debug)]
pub struct DetailedHostedServicePropertiesHandler<S = HostedServiceStatus> {
    base: HostedServicePropertiesHandler,
    current_text: String,
    builder: DetailedHostedServicePropertiesBuilder<S>,
    name: Option<String>,
}

impl<S> Default for DetailedHostedServicePropertiesHandler<S> {
    fn default() -> Self {
        Self {
            base: HostedServicePropertiesHandler::default(),
            current_text: String::new(),
            builder: DetailedHostedServicePropertiesBuilder::default(),
            name: None,
        }
    }
}

impl<S: WireEnum> DetailedHostedServicePropertiesHandler<S> {
    /// Create a handler with empty builders.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn apply(&mut self, qname: &str, text: Option<String>) -> Result<()> {
        if equals_or_suffix(qname, "DateCreated") {
            let created = text.as_deref().map(parse_timestamp).transpose()?;
            self.builder.created(created);
        } else if equals_or_suffix(qname, "DateLastModified") {
            let last_modified = text.as_deref().map(parse_timestamp).transpose()?;
            self.builder.last_modified(last_modified);
        } else if equals_or_suffix(qname, "Status") {
            let status = S::try_from_value(text.as_deref())?;
            self.builder.status(status).raw_status(text);
        } else if equals_or_suffix(qname, "Name") {
            if let Some(previous) = self.name.replace(text.unwrap_or_default()) {
                warn!(name = %previous, "extended property name without a value");
            }
        } else if equals_or_suffix(qname, "Value") {
            let name = self.name.take().ok_or_else(|| {
                Error::XmlParseError("extended property Value without a preceding Name".to_string())
            })?;
            self.builder
                .add_extended_property(name, text.unwrap_or_default());
        } else {
            self.base.apply(qname, text)?;
        }
        Ok(())
    }
}

impl<S: WireEnum> SaxHandler for DetailedHostedServicePropertiesHandler<S> {
    type Output = DetailedHostedServiceProperties<S>;

    fn characters(&mut self, text: &str) {
        self.current_text.push_str(text);
    }

    fn end_element(&mut self, qname: &str) -> Result<()> {
        let text = current_or_none(&self.current_text);
        self.current_text.clear();
        self.apply(qname, text)
    }

    fn result(&mut self) -> DetailedHostedServiceProperties<S> {
        self.current_text.clear();
        self.name = None;
        let mut builder = std::mem::take(&mut self.builder);
        builder.from_properties(self.base.result());
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InstanceStatus;
    use crate::xml::parse_xml;
    use chrono::{TimeZone, Utc};

    #[test]
    fn decodes_timestamps_and_status() {
        let mut handler = DetailedHostedServicePropertiesHandler::<InstanceStatus>::new();
        let details = parse_xml(
            &mut handler,
            "<P><DateCreated>2014-01-01T00:00:00Z</DateCreated><Status>ReadyRole</Status></P>",
        )
        .unwrap();

        assert_eq!(
            details.created,
            Some(Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(details.status, Some(InstanceStatus::ReadyRole));
        assert_eq!(details.status.map(|status| status.symbol()), Some("READY_ROLE"));
        assert_eq!(details.raw_status.as_deref(), Some("ReadyRole"));
    }

    #[test]
    fn unknown_status_keeps_raw_token() {
        let mut handler = DetailedHostedServicePropertiesHandler::<HostedServiceStatus>::new();
        let details = parse_xml(&mut handler, "<P><Status>Migrating</Status></P>").unwrap();

        assert_eq!(details.status, Some(HostedServiceStatus::Unrecognized));
        assert_eq!(details.raw_status.as_deref(), Some("Migrating"));
        assert!(details.has_unrecognized_status());
    }

    #[test]
    fn empty_status_is_rejected() {
        let mut handler = DetailedHostedServicePropertiesHandler::<HostedServiceStatus>::new();
        let err = parse_xml(&mut handler, "<P><Status/></P>").unwrap_err();
        assert!(matches!(err, Error::MissingValue(_)));
    }

    #[test]
    fn pairs_extended_properties_in_order() {
        let mut handler = DetailedHostedServicePropertiesHandler::<HostedServiceStatus>::new();
        let details = parse_xml(
            &mut handler,
            "<ExtendedProperties>\
               <ExtendedProperty><Name>k1</Name><Value>v1</Value></ExtendedProperty>\
               <ExtendedProperty><Name>k2</Name><Value>v2</Value></ExtendedProperty>\
             </ExtendedProperties>",
        )
        .unwrap();

        let pairs: Vec<_> = details
            .extended_properties
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        assert_eq!(pairs, vec![("k1", "v1"), ("k2", "v2")]);
    }

    #[test]
    fn empty_value_is_kept() {
        let mut handler = DetailedHostedServicePropertiesHandler::<HostedServiceStatus>::new();
        let details = parse_xml(&mut handler, "<P><Name>owner</Name><Value/></P>").unwrap();
        assert_eq!(details.extended_properties["owner"], "");
    }

    #[test]
    fn orphan_value_fails() {
        let mut handler = DetailedHostedServicePropertiesHandler::<HostedServiceStatus>::new();
        let err = parse_xml(&mut handler, "<P><Value>v1</Value></P>").unwrap_err();
        assert!(matches!(err, Error::XmlParseError(_)));

        let details = parse_xml(&mut handler, "<P><Name>k</Name><Value>v</Value></P>").unwrap();
        assert_eq!(details.extended_properties.len(), 1);
    }

    #[test]
    fn malformed_timestamp_fails() {
        let mut handler = DetailedHostedServicePropertiesHandler::<HostedServiceStatus>::new();
        let err = parse_xml(
            &mut handler,
            "<P><DateLastModified>yesterday</DateLastModified></P>",
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidTimestamp(_)));
    }

    #[test]
    fn base_elements_are_delegated() {
        let mut handler = DetailedHostedServicePropertiesHandler::<HostedServiceStatus>::new();
        let details = parse_xml(
            &mut handler,
            "<P>\
               <Description>api</Description>\
               <Location>North Europe</Location>\
               <Label>YXBp</Label>\
               <Status>Created</Status>\
               <Foo>ignored</Foo>\
             </P>",
        )
        .unwrap();

        assert_eq!(details.properties.description.as_deref(), Some("api"));
        assert_eq!(details.properties.location.as_deref(), Some("North Europe"));
        assert_eq!(details.properties.label.as_deref(), Some("api"));
        assert_eq!(details.status, Some(HostedServiceStatus::Created));
    }

    #[test]
    fn result_resets_both_layers() {
        let mut handler = DetailedHostedServicePropertiesHandler::<HostedServiceStatus>::new();
        handler.characters("West US");
        handler.end_element("Location").unwrap();
        handler.characters("pending");
        handler.end_element("Name").unwrap();

        let first = handler.result();
        assert_eq!(first.properties.location.as_deref(), Some("West US"));

        let second = handler.result();
        assert_eq!(second, DetailedHostedServiceProperties::default());

        handler.characters("v");
        assert!(handler.end_element("Value").is_err());
    }
}
