use super::{
    current_or_none, equals_or_suffix, DetailedHostedServicePropertiesHandler,
    HostedServicePropertiesHandler, SaxHandler,
};
use crate::domain::HostedService;
use azure_compute_core::Result;

/// Decodes a `<HostedService>` document.
///
/// `Url` and `ServiceName` are read from direct children of the root. The
/// contents of the `<HostedServiceProperties>` child are forwarded to `P`, so
/// the same handler yields plain or detailed properties. Other subtrees, such
/// as embedded `<Deployments>`, are skipped.
#[derive(Debug, Default)]
pub struct HostedServiceHandler<P = HostedServicePropertiesHandler> {
    depth: usize,
    in_properties: bool,
    current_text: String,
    url: Option<String>,
    name: Option<String>,
    properties: P,
}

/// Handler for a hosted service fetched with embedded details.
pub type HostedServiceWithDetailedPropertiesHandler =
    HostedServiceHandler<DetailedHostedServicePropertiesHandler>;

impl<P: SaxHandler + Default> HostedServiceHandler<P> {
    /// Create a handler with empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: SaxHandler> SaxHandler for HostedServiceHandler<P> {
    type Output = HostedService<P::Output>;

    fn start_element(&mut self, qname: &str) {
        self.depth += 1;
        self.current_text.clear();
        if self.in_properties {
            self.properties.start_element(qname);
        } else if self.depth == 2 && equals_or_suffix(qname, "HostedServiceProperties") {
            self.in_properties = true;
        }
    }

    fn characters(&mut self, text: &str) {
        if self.in_properties {
            self.properties.characters(text);
        } else {
            self.current_text.push_str(text);
        }
    }

    fn end_element(&mut self, qname: &str) -> Result<()> {
        if self.in_properties {
            if self.depth == 2 {
                self.in_properties = false;
            } else {
                self.properties.end_element(qname)?;
            }
        } else if self.depth == 2 {
            if equals_or_suffix(qname, "Url") {
                self.url = current_or_none(&self.current_text);
            } else if equals_or_suffix(qname, "ServiceName") {
                self.name = current_or_none(&self.current_text);
            }
        }
        self.current_text.clear();
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }

    fn result(&mut self) -> HostedService<P::Output> {
        self.depth = 0;
        self.in_properties = false;
        self.current_text.clear();
        HostedService {
            url: self.url.take(),
            name: self.name.take(),
            properties: self.properties.result(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HostedServiceProperties, HostedServiceStatus};
    use crate::xml::parse_xml;

    const DOCUMENT: &str = r#"<HostedService xmlns="http://schemas.microsoft.com/windowsazure">
  <Url>https://management.core.windows.net/sub/services/hostedservices/web</Url>
  <ServiceName>web</ServiceName>
  <HostedServiceProperties>
    <Description>frontend</Description>
    <Location>West US</Location>
    <Label>d2Vi</Label>
    <Status>Created</Status>
    <DateCreated>2014-02-10T18:21:52Z</DateCreated>
    <DateLastModified>2014-02-10T18:22:09Z</DateLastModified>
    <ExtendedProperties>
      <ExtendedProperty><Name>tier</Name><Value>frontend</Value></ExtendedProperty>
    </ExtendedProperties>
  </HostedServiceProperties>
  <Deployments>
    <Deployment>
      <Name>web-production</Name>
      <Url>http://web.cloudapp.net/</Url>
      <Label>cHJvZA==</Label>
      <Status>Running</Status>
    </Deployment>
  </Deployments>
</HostedService>"#;

    #[test]
    fn decodes_plain_properties() {
        let mut handler = HostedServiceHandler::<HostedServicePropertiesHandler>::new();
        let service = parse_xml(&mut handler, DOCUMENT).unwrap();

        assert_eq!(
            service.url.as_deref(),
            Some("https://management.core.windows.net/sub/services/hostedservices/web")
        );
        assert_eq!(service.name.as_deref(), Some("web"));
        assert_eq!(
            service.properties,
            HostedServiceProperties {
                description: Some("frontend".to_string()),
                location: Some("West US".to_string()),
                affinity_group: None,
                label: Some("web".to_string()),
            }
        );
    }

    #[test]
    fn deployments_do_not_reach_properties() {
        let mut handler = HostedServiceWithDetailedPropertiesHandler::new();
        let service = parse_xml(&mut handler, DOCUMENT).unwrap();

        assert_eq!(service.url.as_deref().map(|url| url.ends_with("/web")), Some(true));
        assert_eq!(service.properties.status, Some(HostedServiceStatus::Created));
        assert_eq!(service.properties.properties.label.as_deref(), Some("web"));
        assert_eq!(service.properties.extended_properties.len(), 1);
        assert_eq!(service.properties.extended_properties["tier"], "frontend");
    }

    #[test]
    fn handler_is_reusable() {
        let mut handler = HostedServiceHandler::<HostedServicePropertiesHandler>::new();
        parse_xml(&mut handler, DOCUMENT).unwrap();

        let service = parse_xml(
            &mut handler,
            "<HostedService><ServiceName>api</ServiceName></HostedService>",
        )
        .unwrap();
        assert!(service.url.is_none());
        assert_eq!(service.name.as_deref(), Some("api"));
        assert_eq!(service.properties, HostedServiceProperties::default());
    }
}
