//! Integration tests for the `/promotions` resource.

mod common;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use common::{body_json, build_test_app, create, delete, get, new_year_sale, post_json, put_json};
use serde_json::{json, Value};

async fn seed_nike_and_adidas(app: &axum::Router) {
    for (title, code, promo_type, active) in [
        ("nike promotion", 1001, "AMOUNT_DISCOUNT", true),
        ("adidas promotion", 1002, "BUY_ONE_GET_ONE", false),
    ] {
        let mut body = new_year_sale();
        body["title"] = json!(title);
        body["promo_code"] = json!(code);
        body["promo_type"] = json!(promo_type);
        body["active"] = json!(active);
        create(app, body).await;
    }
}

fn titles(json: &Value) -> Vec<&str> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

#[tokio::test]
async fn index_describes_the_service() {
    let response = get(build_test_app(), "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Promotion REST API Service");
    assert_eq!(json["paths"]["list_promotions"]["url"], "/promotions");
}

// ---------------------------------------------------------------------------
// Create / retrieve
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_201_with_location_and_echo() {
    let app = build_test_app();
    let response = post_json(app.clone(), "/promotions", new_year_sale()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[LOCATION], "/promotions/1");

    let json = body_json(response).await;
    assert_eq!(json["id"], 1);
    assert_eq!(json["title"], "New Year Sale");
    assert_eq!(json["promo_code"], 10001);
    assert_eq!(json["start_date"], "2025-01-01");
    assert_eq!(json["duration"], "30 days, 0:00:00");
    assert_eq!(json["active"], true);

    let fetched = body_json(get(app, "/promotions/1").await).await;
    assert_eq!(fetched, json);
}

#[tokio::test]
async fn create_coerces_string_promo_code() {
    let app = build_test_app();
    let mut body = new_year_sale();
    body["promo_code"] = json!("20002");

    let json = create(&app, body).await;
    assert_eq!(json["promo_code"], 20002);
}

#[tokio::test]
async fn create_with_empty_body_is_missing_field() {
    let response = post_json(build_test_app(), "/promotions", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "MISSING_FIELD");
    assert!(json["error"].as_str().unwrap().starts_with("Invalid Promotion"));
}

#[tokio::test]
async fn create_with_unknown_type_is_invalid_type() {
    let mut body = new_year_sale();
    body["promo_type"] = json!("FREE_SHIPPING");

    let response = post_json(build_test_app(), "/promotions", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_TYPE");
}

#[tokio::test]
async fn create_with_bad_date_is_invalid_type() {
    let mut body = new_year_sale();
    body["start_date"] = json!("not a date");

    let response = post_json(build_test_app(), "/promotions", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_TYPE");
}

#[tokio::test]
async fn get_unknown_id_is_404() {
    let response = get(build_test_app(), "/promotions/0").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"].as_str().unwrap().contains("was not found"));
}

#[tokio::test]
async fn get_non_integer_id_is_404_json() {
    let response = get(build_test_app(), "/promotions/abc").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Promotion with id 'abc' was not found.");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_non_integer_id_is_404_json() {
    let response = put_json(build_test_app(), "/promotions/abc", new_year_sale()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn update_replaces_fields() {
    let app = build_test_app();
    create(&app, new_year_sale()).await;

    let mut body = new_year_sale();
    body["title"] = json!("Spring Sale");
    body["duration"] = json!("15 days, 12:00:00");

    let response = put_json(app.clone(), "/promotions/1", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], 1);
    assert_eq!(json["title"], "Spring Sale");
    assert_eq!(json["duration"], "15 days, 12:00:00");

    let fetched = body_json(get(app, "/promotions/1").await).await;
    assert_eq!(fetched["title"], "Spring Sale");
}

#[tokio::test]
async fn update_unknown_id_is_404() {
    let app = build_test_app();
    create(&app, new_year_sale()).await;

    let response = put_json(app.clone(), "/promotions/3", new_year_sale()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let listed = body_json(get(app, "/promotions").await).await;
    assert_eq!(titles(&listed), ["New Year Sale"]);
}

#[tokio::test]
async fn update_with_invalid_payload_is_400() {
    let app = build_test_app();
    create(&app, new_year_sale()).await;

    let response = put_json(app, "/promotions/1", json!({"title": "only a title"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "MISSING_FIELD");
}

// ---------------------------------------------------------------------------
// Activate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn activate_toggles_only_the_flag() {
    let app = build_test_app();
    let created = create(&app, new_year_sale()).await;

    let response = put_json(app.clone(), "/promotions/1/activate", json!({"active": false})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["active"], false);
    assert_eq!(json["title"], created["title"]);
    assert_eq!(json["promo_code"], created["promo_code"]);
}

#[tokio::test]
async fn activate_unknown_id_is_404() {
    let response =
        put_json(build_test_app(), "/promotions/7/activate", json!({"active": true})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn activate_without_flag_is_missing_field() {
    let app = build_test_app();
    create(&app, new_year_sale()).await;

    let response = put_json(app, "/promotions/1/activate", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "MISSING_FIELD");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_returns_204_and_removes_the_record() {
    let app = build_test_app();
    create(&app, new_year_sale()).await;

    let response = delete(app.clone(), "/promotions/1").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app, "/promotions/1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_integer_id_on_activate_and_delete_is_404() {
    let app = build_test_app();

    let response = put_json(app.clone(), "/promotions/abc/activate", json!({"active": true})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    let response = delete(app, "/promotions/abc").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_id_is_still_204() {
    let app = build_test_app();
    let response = delete(app.clone(), "/promotions/42").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(app, "/promotions/42").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// List / search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_on_empty_store_is_empty_array() {
    let response = get(build_test_app(), "/promotions").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn list_returns_records_in_creation_order() {
    let app = build_test_app();
    seed_nike_and_adidas(&app).await;

    let json = body_json(get(app, "/promotions").await).await;
    assert_eq!(titles(&json), ["nike promotion", "adidas promotion"]);
}

#[tokio::test]
async fn query_by_single_fields() {
    let app = build_test_app();
    seed_nike_and_adidas(&app).await;

    let by_title = body_json(get(app.clone(), "/promotions?title=nike%20promotion").await).await;
    assert_eq!(titles(&by_title), ["nike promotion"]);

    let by_code = body_json(get(app.clone(), "/promotions?promo_code=1002").await).await;
    assert_eq!(titles(&by_code), ["adidas promotion"]);

    let by_type = body_json(get(app.clone(), "/promotions?promo_type=buy_one_get_one").await).await;
    assert_eq!(titles(&by_type), ["adidas promotion"]);

    let by_active = body_json(get(app, "/promotions?active=true").await).await;
    assert_eq!(titles(&by_active), ["nike promotion"]);
}

#[tokio::test]
async fn query_fields_are_combined_with_and() {
    let app = build_test_app();
    seed_nike_and_adidas(&app).await;

    let uri = "/promotions?active=true&title=adidas%20promotion";
    let json = body_json(get(app.clone(), uri).await).await;
    assert_eq!(json, json!([]));

    let json = body_json(get(app, "/promotions?active=false&promo_code=1002").await).await;
    assert_eq!(titles(&json), ["adidas promotion"]);
}

#[tokio::test]
async fn query_with_unparsable_date_matches_nothing() {
    let app = build_test_app();
    seed_nike_and_adidas(&app).await;

    let response = get(app, "/promotions?start_date=yesterday").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn query_with_non_numeric_promo_code_is_400() {
    let app = build_test_app();
    seed_nike_and_adidas(&app).await;

    let response = get(app, "/promotions?promo_code=abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_TYPE");
}
