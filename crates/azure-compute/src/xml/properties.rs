use super::{current_or_none, equals_or_suffix, SaxHandler};
use crate::domain::{HostedServiceProperties, HostedServicePropertiesBuilder};
use azure_compute_core::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Decodes the elements of a `<HostedServiceProperties>` block.
///
/// Recognizes `Description`, `Location`, `AffinityGroup` and `Label`. Any other
/// element is skipped.
#[derive(Debug, Default)]
pub struct HostedServicePropertiesHandler {
    current_text: String,
    builder: HostedServicePropertiesBuilder,
}

impl HostedServicePropertiesHandler {
    /// Create a handler with an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one closed element into the builder. Returns false when the
    /// element is not a base property.
    pub(crate) fn apply(&mut self, qname: &str, text: Option<String>) -> Result<bool> {
        if equals_or_suffix(qname, "Description") {
            self.builder.description(text);
        } else if equals_or_suffix(qname, "Location") {
            self.builder.location(text);
        } else if equals_or_suffix(qname, "AffinityGroup") {
            self.builder.affinity_group(text);
        } else if equals_or_suffix(qname, "Label") {
            let label = text.map(|encoded| decode_label(&encoded)).transpose()?;
            self.builder.label(label);
        } else {
            return Ok(false);
        }
        Ok(true)
    }
}

fn decode_label(encoded: &str) -> Result<String> {
    let bytes = STANDARD.decode(encoded)?;
    Ok(String::from_utf8(bytes)?)
}

impl SaxHandler for HostedServicePropertiesHandler {
    type Output = HostedServiceProperties;

    fn characters(&mut self, text: &str) {
        self.current_text.push_str(text);
    }

    fn end_element(&mut self, qname: &str) -> Result<()> {
        let text = current_or_none(&self.current_text);
        self.current_text.clear();
        self.apply(qname, text)?;
        Ok(())
    }

    fn result(&mut self) -> HostedServiceProperties {
        self.current_text.clear();
        std::mem::take(&mut self.builder).build()
    }
}
