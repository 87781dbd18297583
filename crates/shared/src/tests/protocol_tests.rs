use super::*;
use crate::error::ApplicationError;
use serde_json::json;

#[test]
fn pages_round_up() {
    assert_eq!(Pagination::new(1, 10, 25).pages, 3);
    assert_eq!(Pagination::new(1, 10, 30).pages, 3);
    assert_eq!(Pagination::new(1, 10, 0).pages, 0);
    assert_eq!(Pagination::new(1, 1, 1).pages, 1);
}

#[test]
fn empty_result_still_counts_one_page() {
    let pagination = Pagination::new(1, 10, 0);
    assert_eq!(pagination.page_count(), 1);
    assert!(!pagination.has_previous());
    assert!(!pagination.has_next());
    assert_eq!(pagination.showing_range(), (0, 0));
}

#[test]
fn showing_range_for_middle_and_last_page() {
    let middle = Pagination {
        page: 2,
        limit: 10,
        total: 25,
        pages: 3,
    };
    assert_eq!(middle.showing_range(), (11, 20));

    let last = Pagination { page: 3, ..middle };
    assert_eq!(last.showing_range(), (21, 25));
    assert!(last.has_previous());
    assert!(!last.has_next());
}

#[test]
fn listing_envelope_yields_rows_and_descriptor() {
    let envelope: Envelope<Vec<serde_json::Value>> = serde_json::from_value(json!({
        "success": true,
        "data": [{"id": 1}],
        "pagination": {"page": 1, "limit": 10, "total": 1, "pages": 1}
    }))
    .expect("decode");

    let (rows, pagination) = envelope.into_page().expect("page");
    assert_eq!(rows.len(), 1);
    assert_eq!(pagination, Pagination::new(1, 10, 1));
}

#[test]
fn failed_envelope_surfaces_server_message() {
    let envelope: Envelope<Stats> =
        serde_json::from_value(json!({"success": false, "error": "db down"})).expect("decode");
    assert_eq!(
        envelope.into_data(),
        Err(EnvelopeError::Rejected(ApplicationError::new("db down")))
    );
}

#[test]
fn failed_envelope_without_message_gets_a_generic_one() {
    let envelope: Envelope<Stats> =
        serde_json::from_value(json!({"success": false})).expect("decode");
    match envelope.into_data() {
        Err(EnvelopeError::Rejected(err)) => assert_eq!(err.message, "unknown server error"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn successful_envelope_missing_pieces_is_an_error() {
    let envelope: Envelope<Vec<serde_json::Value>> =
        serde_json::from_value(json!({"success": true, "data": []})).expect("decode");
    assert_eq!(
        envelope.into_page(),
        Err(EnvelopeError::MissingField("pagination"))
    );

    let envelope: Envelope<Stats> =
        serde_json::from_value(json!({"success": true})).expect("decode");
    assert_eq!(envelope.into_data(), Err(EnvelopeError::MissingField("data")));
}

#[test]
fn stats_decode_from_backend_names() {
    let stats: Stats = serde_json::from_value(json!({
        "empleados": {"total": 12, "activos": 9, "inactivos": 2, "vacaciones": 1},
        "roles": [{"rol": "Cajero", "cantidad": 5}, {"rol": "Gerente", "cantidad": 1}]
    }))
    .expect("decode");
    assert_eq!(stats.headcount.active, 9);
    assert_eq!(stats.headcount.on_vacation, 1);
    assert_eq!(stats.roles[0].role, "Cajero");
    assert_eq!(stats.roles[1].count, 1);
}

#[test]
fn health_payload_keeps_unknown_fields() {
    let health: HealthStatus = serde_json::from_value(json!({
        "status": "healthy",
        "timestamp": "2024-01-01T10:00:00",
        "version": "1.0.0",
        "uptime": 42
    }))
    .expect("decode");
    assert!(health.is_healthy());
    assert_eq!(health.version.as_deref(), Some("1.0.0"));
    assert_eq!(health.extra.get("uptime"), Some(&json!(42)));
}
