//! Asynchronous hosted service client.

use crate::domain::{HostedService, HostedServiceWithDetailedProperties};
use crate::payload::{bind_create_hosted_service, CreateHostedServiceOptions};
use crate::xml::{
    parse_xml, ErrorHandler, HostedServiceHandler, HostedServiceWithDetailedPropertiesHandler,
    ListHostedServicesHandler, SaxHandler,
};
use crate::Result;
use async_trait::async_trait;
use azure_compute_core::client::{
    ClientConfig, RetryPolicy, ServiceClient, ServiceClientBuilder, REQUEST_ID_HEADER,
};
use azure_compute_core::config::AzureComputeConfig;
use azure_compute_core::query::QueryParams;
use azure_compute_core::Error;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("azure-compute/", env!("CARGO_PKG_VERSION"));
const HOSTED_SERVICES: &str = "services/hostedservices";
const XML_CONTENT_TYPE: &str = "application/xml";

/// Operations on the hosted services of a subscription.
#[async_trait]
pub trait HostedServiceApi: Send + Sync {
    /// List the hosted services of the subscription. A 404 yields an empty list.
    async fn list(&self) -> Result<Vec<HostedServiceWithDetailedProperties>>;

    /// Fetch the system properties of a hosted service, `None` when it does not exist.
    async fn get(&self, name: &str) -> Result<Option<HostedService>>;

    /// Like [`HostedServiceApi::get`], with status, timestamps and extended
    /// properties embedded.
    async fn get_details(&self, name: &str) -> Result<Option<HostedServiceWithDetailedProperties>>;

    /// Create a hosted service and return the request id tracking the
    /// asynchronous operation.
    async fn create_service_with_label_in_location(
        &self,
        name: &str,
        label: &str,
        location: &str,
        options: &CreateHostedServiceOptions,
    ) -> Result<String>;

    /// Delete a hosted service and return the request id, `None` when it does not exist.
    async fn delete(&self, name: &str) -> Result<Option<String>>;
}

/// Builder for [`AzureComputeClient`].
#[derive(Debug, Clone)]
pub struct AzureComputeClientBuilder {
    inner: ServiceClientBuilder,
}

impl AzureComputeClientBuilder {
    /// Create a builder from a management configuration.
    #[must_use]
    pub fn new(config: AzureComputeConfig) -> Self {
        Self {
            inner: ServiceClientBuilder::new(config).with_user_agent(USER_AGENT),
        }
    }

    /// Override the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.inner = self.inner.with_retry_policy(retry);
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.inner = self.inner.with_http_config(config);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint or the TLS material is invalid.
    pub fn build(self) -> Result<AzureComputeClient> {
        let inner = self.inner.build()?;
        Ok(AzureComputeClient { inner })
    }
}

/// Asynchronous Service Management client.
#[derive(Debug, Clone)]
pub struct AzureComputeClient {
    inner: ServiceClient,
}

impl AzureComputeClient {
    /// Construct a client with default transport settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint or the TLS material is invalid.
    pub fn new(config: AzureComputeConfig) -> Result<Self> {
        AzureComputeClientBuilder::new(config).build()
    }

    /// Return the subscription base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    async fn get_xml<H>(&self, path: &str, params: &[(&'static str, String)]) -> Result<H::Output>
    where
        H: SaxHandler + Default,
    {
        let response = self
            .inner
            .execute_with_retry(
                Method::GET,
                path,
                params,
                |request| request.header(ACCEPT, XML_CONTENT_TYPE),
                map_status_to_error,
            )
            .await?;

        let body = response.text().await?;
        let mut handler = H::default();
        parse_xml(&mut handler, &body)
    }
}

#[async_trait]
impl HostedServiceApi for AzureComputeClient {
    async fn list(&self) -> Result<Vec<HostedServiceWithDetailedProperties>> {
        let services = not_found_as_none(
            self.get_xml::<ListHostedServicesHandler>(HOSTED_SERVICES, &[])
                .await,
        )?;
        Ok(services.unwrap_or_default())
    }

    async fn get(&self, name: &str) -> Result<Option<HostedService>> {
        let path = service_path(name)?;
        not_found_as_none(self.get_xml::<HostedServiceHandler>(&path, &[]).await)
    }

    async fn get_details(&self, name: &str) -> Result<Option<HostedServiceWithDetailedProperties>> {
        let path = service_path(name)?;
        let params = QueryParams::new().with("embed-detail", true).into_pairs();
        not_found_as_none(
            self.get_xml::<HostedServiceWithDetailedPropertiesHandler>(&path, &params)
                .await,
        )
    }

    async fn create_service_with_label_in_location(
        &self,
        name: &str,
        label: &str,
        location: &str,
        options: &CreateHostedServiceOptions,
    ) -> Result<String> {
        let body = bind_create_hosted_service(name, label, location, options)?;
        let response = self
            .inner
            .execute_with_retry(
                Method::POST,
                HOSTED_SERVICES,
                &[],
                |request| {
                    request
                        .header(CONTENT_TYPE, XML_CONTENT_TYPE)
                        .body(body.clone())
                },
                map_status_to_error,
            )
            .await?;
        request_id(&response)
    }

    async fn delete(&self, name: &str) -> Result<Option<String>> {
        let path = service_path(name)?;
        let response = self
            .inner
            .execute_with_retry(Method::DELETE, &path, &[], |request| request, map_status_to_error)
            .await;
        not_found_as_none(response)?
            .as_ref()
            .map(request_id)
            .transpose()
    }
}

fn service_path(name: &str) -> Result<String> {
    if matches!(name, "" | "." | "..") || name.contains(['/', '\\', '?', '#', '%']) {
        return Err(Error::InvalidRequest(format!(
            "invalid hosted service name `{name}`"
        )));
    }
    Ok(format!("{HOSTED_SERVICES}/{name}"))
}

fn request_id(response: &Response) -> Result<String> {
    response
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| Error::MissingValue(format!("response has no {REQUEST_ID_HEADER} header")))
}

fn not_found_as_none<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(Error::NotFound(message)) => {
            debug!(%message, "management resource not found");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn map_status_to_error(status: StatusCode, text: String) -> Error {
    let api_error = parse_xml(&mut ErrorHandler::new(), &text)
        .ok()
        .filter(|error| !error.is_empty());

    match status {
        StatusCode::NOT_FOUND => Error::NotFound(
            api_error
                .and_then(|error| error.message)
                .unwrap_or(text),
        ),
        StatusCode::TOO_MANY_REQUESTS => {
            Error::ServiceUnavailable(format!("management API throttled the request: {text}"))
        }
        status if status.is_server_error() => {
            Error::ServiceUnavailable(format!("management API error {status}: {text}"))
        }
        _ => match api_error {
            Some(error) => error.into_error(status.as_u16()),
            None => Error::HttpError(format!("management API error {status}: {text}")),
        },
    }
}
