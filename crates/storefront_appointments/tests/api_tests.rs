use chrono::{FixedOffset, NaiveDate, TimeZone};
use serde_json::json;
use storefront_appointments::{
    AppointmentError, BookingGateway, BookingRequest, RestBookingGateway, ServiceType,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn booking_request() -> BookingRequest {
    let offset = FixedOffset::east_opt(2 * 3600).unwrap();
    let start = offset.with_ymd_and_hms(2025, 6, 10, 9, 30, 0).unwrap();
    BookingRequest {
        date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
        slot_id: "09:30".to_string(),
        start,
        end: start + chrono::Duration::minutes(30),
        service: ServiceType {
            id: "consulta-general".to_string(),
            name: "Consulta general".to_string(),
            duration_minutes: 30,
        },
        details: fixtures::valid_details(),
    }
}

#[tokio::test]
async fn test_rest_gateway_posts_appointment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/citas"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "date": "2025-06-10",
            "time": "09:30",
            "service_id": "consulta-general",
            "email": "ana@example.com"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 42 })))
        .expect(1)
        .mount(&server)
        .await;

    let api = fixtures::api_config(&format!("{}/api", server.uri()));
    let gateway = RestBookingGateway::from_config(&api);
    let confirmation = gateway.commit(booking_request()).await.unwrap();

    assert_eq!(confirmation.reference, "42");
    assert_eq!(confirmation.service_name, "Consulta general");
    assert_eq!(confirmation.time_range(), "09:30 - 10:00");
}

#[tokio::test]
async fn test_rest_gateway_generates_reference_without_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/citas"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let api = fixtures::api_config(&format!("{}/api", server.uri()));
    let confirmation = RestBookingGateway::from_config(&api)
        .commit(booking_request())
        .await
        .unwrap();
    assert!(uuid::Uuid::parse_str(&confirmation.reference).is_ok());
}

#[tokio::test]
async fn test_rest_gateway_maps_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/citas"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({ "error": "taken" })))
        .mount(&server)
        .await;

    let api = fixtures::api_config(&format!("{}/api", server.uri()));
    let err = RestBookingGateway::from_config(&api)
        .commit(booking_request())
        .await
        .unwrap_err();
    match err {
        AppointmentError::BookingRejected(msg) => assert!(msg.contains("409")),
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rest_gateway_uses_configured_resource() {
    let mut api = fixtures::api_config("http://localhost:9/api/");
    api.appointments_resource = Some("appointments".to_string());
    let gateway = RestBookingGateway::from_config(&api);
    assert_eq!(gateway.url(), "http://localhost:9/api/appointments");
}

#[tokio::test]
async fn test_rest_gateway_network_error_is_upstream() {
    // Nothing listens on port 9 (discard)
    let api = fixtures::api_config("http://127.0.0.1:9/api");
    let err = RestBookingGateway::from_config(&api)
        .commit(booking_request())
        .await
        .unwrap_err();
    assert!(matches!(err, AppointmentError::Upstream(_)));
}
