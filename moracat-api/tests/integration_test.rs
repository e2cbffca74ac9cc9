//! Integration tests for the portal API
//!
//! Pets, subscriptions and pricing, driven through the full router with
//! real sessions:
//! - Session required on every portal endpoint
//! - Ownership enforced on pets and subscriptions
//! - Prices quoted by the server and frozen on the subscription
//! - Subscription status changes, cancelled being final
//! - The signup wizard carried out against the API

mod common;

use axum::body::Body;
use axum::http::StatusCode;
use common::{multipart_body, request, TestContext};
use moracat_shared::pricing::{AddOn, Plan};
use moracat_shared::wizard::{CredentialsDraft, PetDraft, SignupWizard, WizardStep};
use serde_json::json;

#[tokio::test]
async fn test_portal_endpoints_require_session() {
    let ctx = TestContext::new();

    for uri in ["/api/pets", "/api/pets/1", "/api/subscriptions", "/api/subscriptions/1", "/api/user"] {
        let response = ctx.get(uri, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "GET {}", uri);
        assert_eq!(response.json["error"], "unauthorized");
    }

    let response = ctx
        .post_json("/api/pets", None, json!({"name": "Mishmish"}))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = ctx
        .post_json("/api/subscriptions", None, json!({"petId": 1, "plan": "basic"}))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED, "POST /api/subscriptions");

    let response = ctx
        .patch_json("/api/subscriptions/1", None, json!({"status": "paused"}))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED, "PATCH /api/subscriptions/1");

    let (content_type, body) = multipart_body("logo", "logo.png", "image/png", b"png");
    let response = ctx
        .send(request("POST", "/api/upload/logo", None, Body::from(body), Some(&content_type)))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED, "POST /api/upload/logo");
    assert_eq!(response.json["error"], "unauthorized");

    let response = ctx
        .get("/api/pets", Some("moracat_session=not-a-token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_pets_empty_before_any_created() {
    let ctx = TestContext::new();
    let user = ctx.register("layla").await;

    let response = ctx.get("/api/pets", Some(&user.cookie)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json, json!([]));
}

#[tokio::test]
async fn test_create_and_get_pet() {
    let ctx = TestContext::new();
    let user = ctx.register("layla").await;

    let response = ctx
        .post_json(
            "/api/pets",
            Some(&user.cookie),
            json!({
                "name": "Mishmish",
                "breed": "Persian",
                "age": 0,
                "weight": 0,
                "gender": "female",
                "dietaryPreferences": { "grainFree": true },
                "userId": 999
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let pet = response.json;
    assert_eq!(pet["id"], 1);
    assert_eq!(pet["userId"], user.id);
    assert_eq!(pet["name"], "Mishmish");
    assert_eq!(
        pet["dietaryPreferences"],
        json!({ "grainFree": true, "hypoallergenic": false, "sensitiveDigestion": false })
    );

    let response = ctx.get("/api/pets/1", Some(&user.cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json, pet);

    let response = ctx.get("/api/pets", Some(&user.cookie)).await;
    assert_eq!(response.json, json!([pet]));
}

#[tokio::test]
async fn test_create_pet_validation() {
    let ctx = TestContext::new();
    let user = ctx.register("layla").await;

    let response = ctx
        .post_json(
            "/api/pets",
            Some(&user.cookie),
            json!({ "name": "", "breed": "Persian", "age": -1, "weight": 4.0, "gender": "male" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json["error"], "validation_error");
    let fields: Vec<&str> = response.json["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["age", "name"]);

    // Missing fields and wrong types are a 400 too, not axum's 422
    let response = ctx
        .post_json("/api/pets", Some(&user.cookie), json!({ "name": "Mishmish", "age": "three" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json["error"], "bad_request");
}

#[tokio::test]
async fn test_pet_ids_and_missing_pets() {
    let ctx = TestContext::new();
    let user = ctx.register("layla").await;

    let response = ctx.get("/api/pets/abc", Some(&user.cookie)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json["message"], "Invalid pet ID");

    let response = ctx.get("/api/pets/42", Some(&user.cookie)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json["message"], "Pet not found");
}

#[tokio::test]
async fn test_cannot_read_another_users_pet() {
    let ctx = TestContext::new();
    let owner = ctx.register("layla").await;
    let other = ctx.register("omar").await;
    let pet_id = ctx.create_pet(&owner, "Mishmish").await;

    let response = ctx
        .get(&format!("/api/pets/{}", pet_id), Some(&other.cookie))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = ctx.get("/api/pets", Some(&other.cookie)).await;
    assert_eq!(response.json, json!([]));
}

#[tokio::test]
async fn test_create_subscription_quotes_price() {
    let ctx = TestContext::new();
    let user = ctx.register("layla").await;
    let pet_id = ctx.create_pet(&user, "Mishmish").await;

    let response = ctx
        .post_json(
            "/api/subscriptions",
            Some(&user.cookie),
            json!({ "petId": pet_id, "plan": "premium", "addons": ["treats", "litter", "treats"] }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let subscription = response.json;
    assert_eq!(subscription["price"], 390);
    assert_eq!(subscription["addons"], json!(["litter", "treats"]));
    assert_eq!(subscription["status"], "active");
    assert_eq!(subscription["userId"], user.id);
    assert_eq!(subscription["petId"], pet_id);

    let response = ctx.get("/api/subscriptions", Some(&user.cookie)).await;
    assert_eq!(response.json, json!([subscription]));
}

#[tokio::test]
async fn test_client_price_must_match_quote() {
    let ctx = TestContext::new();
    let user = ctx.register("layla").await;
    let pet_id = ctx.create_pet(&user, "Mishmish").await;

    let response = ctx
        .post_json(
            "/api/subscriptions",
            Some(&user.cookie),
            json!({ "petId": pet_id, "plan": "basic", "addons": ["toys"], "price": 100 }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = ctx
        .post_json(
            "/api/subscriptions",
            Some(&user.cookie),
            json!({ "petId": pet_id, "plan": "basic", "addons": ["toys"], "price": 260 }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json["price"], 260);
}

#[tokio::test]
async fn test_unknown_plan_is_bad_request() {
    let ctx = TestContext::new();
    let user = ctx.register("layla").await;
    let pet_id = ctx.create_pet(&user, "Mishmish").await;

    let response = ctx
        .post_json(
            "/api/subscriptions",
            Some(&user.cookie),
            json!({ "petId": pet_id, "plan": "gold" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cannot_subscribe_another_users_pet() {
    let ctx = TestContext::new();
    let owner = ctx.register("layla").await;
    let other = ctx.register("omar").await;
    let pet_id = ctx.create_pet(&owner, "Mishmish").await;

    let response = ctx
        .post_json(
            "/api/subscriptions",
            Some(&other.cookie),
            json!({ "petId": pet_id, "plan": "vip" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // A pet that does not exist is refused the same way
    let response = ctx
        .post_json(
            "/api/subscriptions",
            Some(&other.cookie),
            json!({ "petId": 999, "plan": "vip" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = ctx.get("/api/subscriptions", Some(&other.cookie)).await;
    assert_eq!(response.json, json!([]));
}

#[tokio::test]
async fn test_subscription_ownership_and_ids() {
    let ctx = TestContext::new();
    let owner = ctx.register("layla").await;
    let other = ctx.register("omar").await;
    let pet_id = ctx.create_pet(&owner, "Mishmish").await;

    let response = ctx
        .post_json(
            "/api/subscriptions",
            Some(&owner.cookie),
            json!({ "petId": pet_id, "plan": "basic" }),
        )
        .await;
    let id = response.json["id"].as_i64().unwrap();
    let uri = format!("/api/subscriptions/{}", id);

    assert_eq!(ctx.get(&uri, Some(&owner.cookie)).await.status, StatusCode::OK);
    assert_eq!(ctx.get(&uri, Some(&other.cookie)).await.status, StatusCode::FORBIDDEN);

    let response = ctx
        .patch_json(&uri, Some(&other.cookie), json!({ "status": "cancelled" }))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = ctx.get("/api/subscriptions/xyz", Some(&owner.cookie)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json["message"], "Invalid subscription ID");

    let response = ctx.get("/api/subscriptions/77", Some(&owner.cookie)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // Still active: the other user's PATCH changed nothing
    let response = ctx.get(&uri, Some(&owner.cookie)).await;
    assert_eq!(response.json["status"], "active");
}

#[tokio::test]
async fn test_subscription_status_changes() {
    let ctx = TestContext::new();
    let user = ctx.register("layla").await;
    let pet_id = ctx.create_pet(&user, "Mishmish").await;

    let created = ctx
        .post_json(
            "/api/subscriptions",
            Some(&user.cookie),
            json!({ "petId": pet_id, "plan": "vip", "addons": ["toys"] }),
        )
        .await
        .json;
    let uri = format!("/api/subscriptions/{}", created["id"]);

    let paused = ctx
        .patch_json(&uri, Some(&user.cookie), json!({ "status": "paused" }))
        .await;
    assert_eq!(paused.status, StatusCode::OK);
    assert_eq!(paused.json["status"], "paused");
    assert_eq!(paused.json["price"], 400);
    assert_eq!(paused.json["createdAt"], created["createdAt"]);

    let cancelled = ctx
        .patch_json(&uri, Some(&user.cookie), json!({ "status": "cancelled" }))
        .await;
    assert_eq!(cancelled.json["status"], "cancelled");

    let revived = ctx
        .patch_json(&uri, Some(&user.cookie), json!({ "status": "active" }))
        .await;
    assert_eq!(revived.status, StatusCode::BAD_REQUEST);

    let unknown = ctx
        .patch_json(&uri, Some(&user.cookie), json!({ "status": "expired" }))
        .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_plans_and_quote_are_public() {
    let ctx = TestContext::new();

    let response = ctx.get("/api/plans", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json["currency"], "SAR");
    assert_eq!(
        response.json["plans"],
        json!([
            { "plan": "basic", "price": 210 },
            { "plan": "premium", "price": 280 },
            { "plan": "vip", "price": 350 }
        ])
    );
    assert_eq!(response.json["addons"].as_array().unwrap().len(), 3);

    let response = ctx
        .post_json("/api/quote", None, json!({ "plan": "premium", "addons": ["litter", "treats"] }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json["total"], 390);

    let response = ctx
        .post_json("/api/quote", None, json!({ "plan": "basic" }))
        .await;
    assert_eq!(response.json["total"], 210);
}

#[tokio::test]
async fn test_signup_wizard_against_api() {
    let ctx = TestContext::new();
    let mut wizard = SignupWizard::new();

    // Step 1: account
    let credentials = CredentialsDraft {
        username: "noura".to_string(),
        email: "noura@example.com".to_string(),
        full_name: Some("Noura K.".to_string()),
    };
    let response = ctx
        .post_json(
            "/api/register",
            None,
            json!({
                "username": credentials.username,
                "email": credentials.email,
                "password": common::PASSWORD,
                "fullName": credentials.full_name
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let cookie = common::session_cookie(&response);
    assert_eq!(wizard.submit_credentials(credentials).unwrap(), WizardStep::PetProfile);

    // Step 2: pet profile
    let pet = PetDraft {
        name: "Zaatar".to_string(),
        breed: "Siamese".to_string(),
        age: 2,
        weight: 3.8,
        gender: "male".to_string(),
        dietary_preferences: Default::default(),
    };
    let response = ctx
        .post_json(
            "/api/pets",
            Some(&cookie),
            json!({
                "name": pet.name,
                "breed": pet.breed,
                "age": pet.age,
                "weight": pet.weight,
                "gender": pet.gender,
                "dietaryPreferences": pet.dietary_preferences
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let pet_id = response.json["id"].as_i64().unwrap();
    assert_eq!(wizard.submit_pet(pet).unwrap(), WizardStep::Subscription);

    // Step 3: subscription, with the total the page displayed
    wizard.selection_mut().select_plan(Plan::Vip);
    wizard.selection_mut().toggle_addon(AddOn::Litter);
    let response = ctx
        .post_json(
            "/api/subscriptions",
            Some(&cookie),
            json!({
                "petId": pet_id,
                "plan": wizard.selection().plan(),
                "addons": wizard.selection().addons(),
                "price": wizard.selection().total()
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json["price"], 425);

    assert_eq!(wizard.submit_subscription().unwrap(), WizardStep::Done);
    assert_eq!(wizard.redirect(), Some("/dashboard"));
}
