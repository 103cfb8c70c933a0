//! Streaming XML handlers for management API responses.
//!
//! A handler receives start-element, character and end-element events and
//! fills a builder as elements close. [`SaxHandler::result`] hands out the finished
//! value and resets the handler, so one instance can decode many documents in turn.
//! [`parse_xml`] drives a handler from a response body.

mod detailed_properties;
mod error;
mod hosted_service;
mod list;
mod properties;

pub use detailed_properties::DetailedHostedServicePropertiesHandler;
pub use error::ErrorHandler;
pub use hosted_service::{HostedServiceHandler, HostedServiceWithDetailedPropertiesHandler};
pub use list::ListHostedServicesHandler;
pub use properties::HostedServicePropertiesHandler;

use azure_compute_core::{Error, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Timestamp layout used by the management API.
pub const ISO8601_SECONDS: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Receiver of streaming XML events.
pub trait SaxHandler {
    /// Value produced once the document has been consumed.
    type Output;

    /// An element opened. Names are qualified (`prefix:Local` when prefixed).
    fn start_element(&mut self, _qname: &str) {}

    /// Character data inside the current element; may arrive in pieces.
    fn characters(&mut self, text: &str);

    /// An element closed.
    ///
    /// # Errors
    ///
    /// Returns an error when the element's text cannot be decoded.
    fn end_element(&mut self, qname: &str) -> Result<()>;

    /// Take the finished value and reset the handler to a fresh state.
    fn result(&mut self) -> Self::Output;
}

/// Feed `body` through `handler` and return its result.
///
/// On failure the handler's partial state is discarded so it can be reused.
///
/// # Errors
///
/// Returns [`Error::XmlParseError`] for malformed XML and propagates decode
/// failures raised by the handler.
pub fn parse_xml<H: SaxHandler>(handler: &mut H, body: &str) -> Result<H::Output> {
    match drive(handler, body) {
        Ok(()) => Ok(handler.result()),
        Err(err) => {
            let _ = handler.result();
            Err(err)
        }
    }
}

fn drive<H: SaxHandler>(handler: &mut H, body: &str) -> Result<()> {
    let mut reader = Reader::from_str(body);

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                handler.start_element(qualified_name(start.name().into_inner())?);
            }
            Event::Empty(empty) => {
                let name = qualified_name(empty.name().into_inner())?;
                handler.start_element(name);
                handler.end_element(name)?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|err| xml_error(reader.buffer_position(), err))?;
                handler.characters(&text);
            }
            Event::CData(data) => {
                handler.characters(&String::from_utf8_lossy(&data.into_inner()));
            }
            Event::End(end) => handler.end_element(qualified_name(end.name().into_inner())?)?,
            Event::Eof => return Ok(()),
            _ => {}
        }
    }
}

fn xml_error(position: impl std::fmt::Display, err: impl std::fmt::Display) -> Error {
    Error::XmlParseError(format!("at byte {position}: {err}"))
}

fn qualified_name(raw: &[u8]) -> Result<&str> {
    std::str::from_utf8(raw)
        .map_err(|err| Error::XmlParseError(format!("element name is not UTF-8: {err}")))
}

/// Matches `Local` and any `prefix:Local`.
pub(crate) fn equals_or_suffix(qname: &str, local: &str) -> bool {
    qname == local
        || qname
            .strip_suffix(local)
            .is_some_and(|prefix| prefix.ends_with(':'))
}

/// Trimmed text, or `None` when only whitespace was collected.
pub(crate) fn current_or_none(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parse a management API timestamp, `YYYY-MM-DDTHH:MM:SSZ`.
///
/// # Errors
///
/// Returns [`Error::InvalidTimestamp`] for any other layout.
pub(crate) fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(text, ISO8601_SECONDS)?;
    Ok(Utc.from_utc_datetime(&naive))
}
