//! Integration tests for decoding hosted service documents.
//!
//! These tests run captured Service Management responses through the
//! streaming handlers and check the decoded values.

use azure_compute::domain::{
    DetailedHostedServiceProperties, ErrorCode, HostedServiceStatus, InstanceStatus, WireEnum,
};
use azure_compute::xml::{
    parse_xml, DetailedHostedServicePropertiesHandler, ErrorHandler, HostedServiceHandler,
    HostedServicePropertiesHandler, HostedServiceWithDetailedPropertiesHandler,
    ListHostedServicesHandler, SaxHandler,
};
use chrono::{TimeZone, Utc};
use std::fs;
use std::path::PathBuf;

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> String {
    let fixture_path = fixtures_dir().join(name);
    fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    })
}

#[test]
fn test_parse_hosted_service() {
    let xml = load_fixture("hostedservice.xml");
    let mut handler = HostedServiceHandler::<HostedServicePropertiesHandler>::new();
    let service = parse_xml(&mut handler, &xml).unwrap();

    assert_eq!(service.name.as_deref(), Some("neotys"));
    assert_eq!(
        service.url.as_deref(),
        Some("https://management.core.windows.net/eb0347c3-68d4-4550-9b39-5e7e0f92f7db/services/hostedservices/neotys")
    );
    assert_eq!(
        service.properties.description.as_deref(),
        Some("Implicitly created hosted service2012-08-06 14:55")
    );
    assert_eq!(service.properties.location.as_deref(), Some("West Europe"));
    assert_eq!(service.properties.label.as_deref(), Some("neotys"));
    assert!(service.properties.affinity_group.is_none());
}

#[test]
fn test_parse_hosted_service_details() {
    let xml = load_fixture("hostedservice_details.xml");
    let mut handler = HostedServiceWithDetailedPropertiesHandler::new();
    let service = parse_xml(&mut handler, &xml).unwrap();
    let details = &service.properties;

    assert_eq!(service.name.as_deref(), Some("neotys"));
    assert_eq!(details.properties.label.as_deref(), Some("neotys"));
    assert_eq!(details.status, Some(HostedServiceStatus::Created));
    assert_eq!(details.raw_status.as_deref(), Some("Created"));
    assert_eq!(
        details.created,
        Some(Utc.with_ymd_and_hms(2012, 8, 6, 14, 55, 17).unwrap())
    );
    assert_eq!(
        details.last_modified,
        Some(Utc.with_ymd_and_hms(2012, 8, 6, 15, 50, 34).unwrap())
    );

    // Deployment-level properties belong to the deployment, not the service.
    let pairs: Vec<_> = details
        .extended_properties
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    assert_eq!(pairs, vec![("owner", "platform-team"), ("cost-center", "4711")]);
}

#[test]
fn test_parse_hosted_service_list() {
    let xml = load_fixture("hostedservices.xml");
    let mut handler = ListHostedServicesHandler::new();
    let services = parse_xml(&mut handler, &xml).unwrap();

    assert_eq!(services.len(), 2, "Expected 2 hosted services in test data");

    let first = &services[0];
    assert_eq!(first.name.as_deref(), Some("neotys"));
    assert_eq!(first.properties.properties.location.as_deref(), Some("West Europe"));
    assert!(first.properties.extended_properties.is_empty());

    let second = &services[1];
    assert_eq!(second.name.as_deref(), Some("neotys3"));
    assert_eq!(second.properties.properties.label.as_deref(), Some("neotys3"));
    assert_eq!(
        second.properties.properties.affinity_group.as_deref(),
        Some("web-tier")
    );
    assert!(second.properties.properties.location.is_none());
    assert!(second.properties.has_unrecognized_status());
    assert_eq!(second.properties.raw_status.as_deref(), Some("Suspending"));
    assert_eq!(
        second.properties.extended_properties["ResourceGroup"],
        "Default-Web"
    );
}

#[test]
fn test_parse_error_document() {
    let xml = load_fixture("error.xml");
    let mut handler = ErrorHandler::new();
    let error = parse_xml(&mut handler, &xml).unwrap();

    assert_eq!(error.code, Some(ErrorCode::MissingOrIncorrectVersionHeader));
    assert_eq!(
        error.message.as_deref(),
        Some("The versioning header is not specified or was specified incorrectly.")
    );
}

#[test]
fn test_handlers_are_reusable_across_documents() {
    let mut handler = ListHostedServicesHandler::new();
    let first = parse_xml(&mut handler, &load_fixture("hostedservices.xml")).unwrap();
    let second = parse_xml(&mut handler, &load_fixture("hostedservices.xml")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unknown_element_leaves_fields_alone() {
    let mut handler = HostedServicePropertiesHandler::new();
    let properties = parse_xml(
        &mut handler,
        "<HostedServiceProperties><Location>West US</Location><Foo>x</Foo>\
         <Description>d</Description></HostedServiceProperties>",
    )
    .unwrap();

    assert_eq!(properties.location.as_deref(), Some("West US"));
    assert_eq!(properties.description.as_deref(), Some("d"));
    assert!(properties.label.is_none());
}

#[test]
fn test_label_is_base64_decoded() {
    let mut handler = HostedServicePropertiesHandler::new();
    let properties = parse_xml(&mut handler, "<P><Label>aGVsbG8=</Label></P>").unwrap();
    assert_eq!(properties.label.as_deref(), Some("hello"));
}

#[test]
fn test_instance_status_in_detailed_properties() {
    let mut handler = DetailedHostedServicePropertiesHandler::<InstanceStatus>::new();
    let details = parse_xml(
        &mut handler,
        "<P><DateCreated>2014-01-01T00:00:00Z</DateCreated><Status>ReadyRole</Status></P>",
    )
    .unwrap();

    assert_eq!(
        details.created.map(|created| created.date_naive()),
        Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0)
            .single()
            .map(|expected| expected.date_naive())
    );
    assert_eq!(details.status.map(WireEnum::symbol), Some("READY_ROLE"));
}

#[test]
fn test_extended_properties_in_insertion_order() {
    let mut handler = DetailedHostedServicePropertiesHandler::<HostedServiceStatus>::new();
    let details = parse_xml(
        &mut handler,
        "<P><Name>k1</Name><Value>v1</Value><Name>k2</Name><Value>v2</Value></P>",
    )
    .unwrap();

    let names: Vec<_> = details.extended_properties.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["k1", "k2"]);
    assert_eq!(details.extended_properties["k1"], "v1");
    assert_eq!(details.extended_properties["k2"], "v2");
}

#[test]
fn test_second_result_is_default() {
    let mut handler = DetailedHostedServicePropertiesHandler::<HostedServiceStatus>::new();
    handler.characters("Created");
    handler.end_element("Status").unwrap();

    let first = handler.result();
    let second = handler.result();
    assert_eq!(first.status, Some(HostedServiceStatus::Created));
    assert_eq!(second, DetailedHostedServiceProperties::default());
}

#[test]
fn test_unknown_error_code_falls_back() {
    let mut handler = ErrorHandler::new();
    let error = parse_xml(
        &mut handler,
        "<Error><Code>UnknownErrorXyz</Code><Message>boom</Message></Error>",
    )
    .unwrap();

    assert_eq!(error.code, Some(ErrorCode::FALLBACK));
    assert_eq!(error.message.as_deref(), Some("boom"));
}
