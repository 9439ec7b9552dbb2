//! End-to-end HTTP integration tests for the calculation request endpoint.
//!
//! Each test drives the router in-process with `tower::ServiceExt::oneshot`
//! rather than binding a real socket, exercising the same request/response
//! path a deployed service would see.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use calc_server::{build_router, ServiceState};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn post_calculation_request(body: Value) -> (StatusCode, Value) {
    let router = build_router(ServiceState::default());
    let response = router
        .oneshot(
            Request::post("/calculation-requests")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

fn mutation(id: &str, name: &str, actual_at: &str, properties: Value) -> Value {
    json!({
        "mutation_id": id,
        "mutation_definition_name": name,
        "mutation_type": "COMMAND",
        "actual_at": actual_at,
        "mutation_properties": properties
    })
}

fn request(mutations: Vec<Value>) -> Value {
    json!({
        "tenant_id": "acme_corp",
        "dossier_id": "D1",
        "calculation_instructions": { "mutations": mutations }
    })
}

#[tokio::test]
async fn scenario_two_add_policy_after_create_dossier() {
    let body = request(vec![
        mutation(
            "M1",
            "create_dossier",
            "2020-01-01",
            json!({ "dossier_id": "D1", "person_id": "P1", "name": "Alice", "birth_date": "1960-01-01" }),
        ),
        mutation(
            "M2",
            "add_policy",
            "2020-01-02",
            json!({ "scheme_id": "S1", "employment_start_date": "1990-01-01", "salary": 50000, "part_time_factor": 1.0 }),
        ),
    ]);
    let (status, response) = post_calculation_request(body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["calculation_metadata"]["calculation_outcome"], "SUCCESS");
    let dossier = &response["calculation_result"]["end_situation"]["situation"]["dossier"];
    assert_eq!(dossier["policies"][0]["policy_id"], "D1-1");
    assert_eq!(dossier["policies"][0]["salary"], "50000");
}

#[tokio::test]
async fn scenario_three_duplicate_policy_warns_but_succeeds() {
    let add = mutation(
        "M2",
        "add_policy",
        "2020-01-02",
        json!({ "scheme_id": "S1", "employment_start_date": "1990-01-01", "salary": 50000, "part_time_factor": 1.0 }),
    );
    let body = request(vec![
        mutation(
            "M1",
            "create_dossier",
            "2020-01-01",
            json!({ "dossier_id": "D1", "person_id": "P1", "name": "Alice", "birth_date": "1960-01-01" }),
        ),
        add.clone(),
        add,
    ]);
    let (status, response) = post_calculation_request(body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["calculation_metadata"]["calculation_outcome"], "SUCCESS");
    let messages = response["calculation_result"]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["code"], "DUPLICATE_POLICY");
    let policies = response["calculation_result"]["end_situation"]["situation"]["dossier"]["policies"]
        .as_array()
        .unwrap();
    assert_eq!(policies.len(), 2);
}

#[tokio::test]
async fn scenario_four_indexation_increases_salary() {
    let body = request(vec![
        mutation(
            "M1",
            "create_dossier",
            "2020-01-01",
            json!({ "dossier_id": "D1", "person_id": "P1", "name": "Alice", "birth_date": "1960-01-01" }),
        ),
        mutation(
            "M2",
            "add_policy",
            "2020-01-02",
            json!({ "scheme_id": "S1", "employment_start_date": "1990-01-01", "salary": 50000, "part_time_factor": 1.0 }),
        ),
        mutation("M3", "apply_indexation", "2020-01-03", json!({ "percentage": 0.10 })),
    ]);
    let (status, response) = post_calculation_request(body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["calculation_metadata"]["calculation_outcome"], "SUCCESS");
    assert!(response["calculation_result"]["messages"]
        .as_array()
        .unwrap()
        .is_empty());
    let salary: f64 = response["calculation_result"]["end_situation"]["situation"]["dossier"]["policies"][0]
        ["salary"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!((salary - 55000.0).abs() <= 0.01);
}

#[tokio::test]
async fn scenario_five_negative_indexation_clamps_to_zero() {
    let body = request(vec![
        mutation(
            "M1",
            "create_dossier",
            "2020-01-01",
            json!({ "dossier_id": "D1", "person_id": "P1", "name": "Alice", "birth_date": "1960-01-01" }),
        ),
        mutation(
            "M2",
            "add_policy",
            "2020-01-02",
            json!({ "scheme_id": "S1", "employment_start_date": "1990-01-01", "salary": 50000, "part_time_factor": 1.0 }),
        ),
        mutation("M3", "apply_indexation", "2020-01-03", json!({ "percentage": -5.0 })),
    ]);
    let (status, response) = post_calculation_request(body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["calculation_metadata"]["calculation_outcome"], "SUCCESS");
    let messages = response["calculation_result"]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["code"], "NEGATIVE_SALARY_CLAMPED");
    let salary = &response["calculation_result"]["end_situation"]["situation"]["dossier"]["policies"][0]["salary"];
    assert_eq!(salary, "0");
}

#[tokio::test]
async fn scenario_six_retirement_benefit_succeeds() {
    let body = request(vec![
        mutation(
            "M1",
            "create_dossier",
            "2020-01-01",
            json!({ "dossier_id": "D1", "person_id": "P1", "name": "Alice", "birth_date": "1960-01-01" }),
        ),
        mutation(
            "M2",
            "add_policy",
            "2020-01-02",
            json!({ "scheme_id": "S1", "employment_start_date": "1990-01-01", "salary": 50000, "part_time_factor": 1.0 }),
        ),
        mutation(
            "M3",
            "calculate_retirement_benefit",
            "2025-01-01",
            json!({ "retirement_date": "2025-01-01" }),
        ),
    ]);
    let (status, response) = post_calculation_request(body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["calculation_metadata"]["calculation_outcome"], "SUCCESS");
    let dossier = &response["calculation_result"]["end_situation"]["situation"]["dossier"];
    assert_eq!(dossier["status"], "RETIRED");
    let pension: f64 = dossier["policies"][0]["attainable_pension"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    // service years = (2025-01-01 - 1990-01-01) / 365.25 (9 leap days in range) ≈ 35.0007
    let expected_years = 12784.0 / 365.25;
    let expected = 50000.0 * expected_years * 0.02;
    assert!((pension - expected).abs() <= 0.01);
}

#[tokio::test]
async fn scenario_seven_retirement_benefit_without_dossier_fails() {
    let body = request(vec![mutation(
        "M1",
        "calculate_retirement_benefit",
        "2025-01-01",
        json!({ "retirement_date": "2025-01-01" }),
    )]);
    let (status, response) = post_calculation_request(body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["calculation_metadata"]["calculation_outcome"], "FAILURE");
    let messages = response["calculation_result"]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["code"], "DOSSIER_NOT_FOUND");
    assert_eq!(response["calculation_result"]["mutations"].as_array().unwrap().len(), 1);
    assert_eq!(response["calculation_result"]["end_situation"]["mutation_index"], 0);
    assert!(response["calculation_result"]["end_situation"]["situation"]["dossier"].is_null());
}

#[tokio::test]
async fn malformed_body_is_rejected_with_400_problem_details() {
    let router = build_router(ServiceState::default());
    let response = router
        .oneshot(
            Request::post("/calculation-requests")
                .header("content-type", "application/json")
                .body(Body::from("{ not valid json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["status"], 400);
    assert!(value["detail"].is_string());
}
