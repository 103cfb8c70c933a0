use super::{current_or_none, SaxHandler};
use crate::domain::{ApiError, ApiErrorBuilder, ErrorCode, WireEnum};
use azure_compute_core::Result;

/// Decodes an `<Error>` document into an [`ApiError`].
#[derive(Debug, Default)]
pub struct ErrorHandler {
    current_text: String,
    builder: ApiErrorBuilder,
}

impl ErrorHandler {
    /// Create a handler with an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaxHandler for ErrorHandler {
    type Output = ApiError;

    fn characters(&mut self, text: &str) {
        self.current_text.push_str(text);
    }

    fn end_element(&mut self, qname: &str) -> Result<()> {
        let text = current_or_none(&self.current_text);
        self.current_text.clear();
        match qname {
            "Code" => {
                let code = ErrorCode::try_from_value(text.as_deref())?;
                self.builder.code(code).raw_code(text);
            }
            "Message" => {
                self.builder.message(text);
            }
            _ => {}
        }
        Ok(())
    }

    fn result(&mut self) -> ApiError {
        self.current_text.clear();
        std::mem::take(&mut self.builder).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_xml;
    use azure_compute_core::Error;

    #[test]
    fn unknown_code_falls_back() {
        let mut handler = ErrorHandler::new();
        let error = parse_xml(
            &mut handler,
            "<Error><Code>UnknownErrorXyz</Code><Message>boom</Message></Error>",
        )
        .unwrap();

        assert_eq!(error.code, Some(ErrorCode::Unrecognized));
        assert_eq!(error.raw_code.as_deref(), Some("UnknownErrorXyz"));
        assert_eq!(error.message.as_deref(), Some("boom"));
    }

    #[test]
    fn known_code() {
        let mut handler = ErrorHandler::new();
        let error = parse_xml(
            &mut handler,
            r#"<Error xmlns="http://schemas.microsoft.com/windowsazure" xmlns:i="http://www.w3.org/2001/XMLSchema-instance">
                 <Code>ResourceNotFound</Code>
                 <Message>The hosted service does not exist.</Message>
               </Error>"#,
        )
        .unwrap();

        assert_eq!(error.code, Some(ErrorCode::ResourceNotFound));
        assert_eq!(
            error.message.as_deref(),
            Some("The hosted service does not exist.")
        );
    }

    #[test]
    fn empty_code_is_rejected() {
        let mut handler = ErrorHandler::new();
        let err = parse_xml(&mut handler, "<Error><Code></Code></Error>").unwrap_err();
        assert!(matches!(err, Error::MissingValue(_)));
    }

    #[test]
    fn result_resets_builder() {
        let mut handler = ErrorHandler::new();
        handler.characters("ConflictError");
        handler.end_element("Code").unwrap();
        handler.characters("taken");
        handler.end_element("Message").unwrap();

        let first = handler.result();
        let second = handler.result();
        assert_eq!(first.code, Some(ErrorCode::ConflictError));
        assert_eq!(first.message.as_deref(), Some("taken"));
        assert_eq!(second, ApiError::default());
        assert!(second.is_empty());
    }

    #[test]
    fn pending_text_is_dropped_on_reset() {
        let mut handler = ErrorHandler::new();
        handler.characters("half a message");
        let _ = handler.result();
        handler.end_element("Message").unwrap();

        assert!(handler.result().message.is_none());
    }

    #[test]
    fn non_error_document_is_empty() {
        let mut handler = ErrorHandler::new();
        let error = parse_xml(&mut handler, "<html><body>Bad Gateway</body></html>").unwrap();
        assert!(error.is_empty());
    }
}
