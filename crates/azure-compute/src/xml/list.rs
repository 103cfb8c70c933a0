use super::{equals_or_suffix, HostedServiceWithDetailedPropertiesHandler, SaxHandler};
use crate::domain::HostedServiceWithDetailedProperties;
use azure_compute_core::Result;

/// Decodes a `<HostedServices>` document into its entries, in document order.
#[derive(Debug, Default)]
pub struct ListHostedServicesHandler {
    depth: usize,
    in_service: bool,
    service: HostedServiceWithDetailedPropertiesHandler,
    services: Vec<HostedServiceWithDetailedProperties>,
}

impl ListHostedServicesHandler {
    /// Create a handler with an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaxHandler for ListHostedServicesHandler {
    type Output = Vec<HostedServiceWithDetailedProperties>;

    fn start_element(&mut self, qname: &str) {
        self.depth += 1;
        if !self.in_service && self.depth == 2 && equals_or_suffix(qname, "HostedService") {
            self.in_service = true;
        }
        if self.in_service {
            self.service.start_element(qname);
        }
    }

    fn characters(&mut self, text: &str) {
        if self.in_service {
            self.service.characters(text);
        }
    }

    fn end_element(&mut self, qname: &str) -> Result<()> {
        if self.in_service {
            self.service.end_element(qname)?;
            if self.depth == 2 {
                self.in_service = false;
                self.services.push(self.service.result());
            }
        }
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }

    fn result(&mut self) -> Vec<HostedServiceWithDetailedProperties> {
        self.depth = 0;
        self.in_service = false;
        let _ = self.service.result();
        std::mem::take(&mut self.services)
    }
}
