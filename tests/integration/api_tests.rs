//! API integration tests against a running server and database

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use pfe_server::models::user::{UserClaims, UserRole};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Sign an admin token with the secret the server was started with
fn admin_token() -> String {
    let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| "change-this-secret-in-production".to_string());
    let now = chrono::Utc::now().timestamp();
    UserClaims {
        sub: "integration".to_string(),
        user_id: 1,
        role: UserRole::Admin,
        professor_id: None,
        student_id: None,
        exp: now + 3600,
        iat: now,
    }
    .create_token(&secret)
    .expect("Failed to sign token")
}

fn unique(prefix: &str) -> String {
    format!("{}{}", prefix, chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

async fn create(client: &Client, token: &str, path: &str, body: Value) -> Value {
    let response = client
        .post(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED, "POST {} failed", path);
    response.json().await.expect("Failed to parse response")
}

/// Department plus two professors, returns (department_id, [professor ids])
async fn seed(client: &Client, token: &str) -> (i64, Vec<i64>) {
    let name = unique("Department ");
    let code: String = name.chars().rev().take(9).collect();
    let department = create(
        client,
        token,
        "/departments",
        json!({ "name": name, "code": format!("T{}", code) }),
    )
    .await;
    let department_id = department["id"].as_i64().expect("No department id");

    let mut professors = Vec::new();
    for name in ["Alaoui", "Bennani"] {
        let professor = create(
            client,
            token,
            "/professors",
            json!({
                "name": name,
                "surname": "Test",
                "email": format!("{}@example.org", unique(name)),
                "department_id": department_id
            }),
        )
        .await;
        professors.push(professor["id"].as_i64().expect("No professor id"));
    }

    (department_id, professors)
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/subjects", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_subject_role_lifecycle() {
    let client = Client::new();
    let token = admin_token();
    let (department_id, professors) = seed(&client, &token).await;

    let subject = create(
        &client,
        &token,
        "/subjects",
        json!({
            "title": unique("Subject "),
            "description": "Integration subject",
            "technologies": "Rust, PostgreSQL",
            "department_id": department_id
        }),
    )
    .await;
    let subject_id = subject["id"].as_i64().expect("No subject id");
    assert_eq!(subject["status"], "pending");

    let roles_url = format!("{}/subjects/{}/roles", BASE_URL, subject_id);

    // Missing encadrant leaves nothing behind
    let response = client
        .put(&roles_url)
        .bearer_auth(&token)
        .json(&json!({ "roles": [{ "professor_id": professors[1], "role_type": "president" }] }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = client
        .put(&roles_url)
        .bearer_auth(&token)
        .json(&json!({ "roles": [
            { "professor_id": professors[0], "role_type": "encadrant" },
            { "professor_id": professors[1], "role_type": "president" }
        ] }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let map: Value = client
        .get(&roles_url)
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(map["encadrant"]["id"], professors[0]);
    assert_eq!(map["president"]["id"], professors[1]);
    assert!(map["rapporteur"].is_null());

    // The only encadrant cannot be removed
    let response = client
        .delete(format!("{}/{}", roles_url, professors[0]))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Deleting the subject removes its roles
    let response = client
        .delete(format!("{}/subjects/{}", BASE_URL, subject_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .get(&roles_url)
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_supervision_and_chat() {
    let client = Client::new();
    let token = admin_token();
    let (department_id, professors) = seed(&client, &token).await;

    let student = create(
        &client,
        &token,
        "/students",
        json!({
            "name": "Chraibi",
            "surname": "Omar",
            "email": format!("{}@example.org", unique("student")),
            "internship_type": "PFE",
            "department_id": department_id
        }),
    )
    .await;
    let student_id = student["id"].as_i64().expect("No student id");

    let supervised = create(
        &client,
        &token,
        &format!("/professors/{}/students", professors[0]),
        json!({ "student_id": student_id }),
    )
    .await;
    assert_eq!(supervised["supervisor_id"], professors[0]);

    // A second supervisor is refused
    let response = client
        .post(format!("{}/professors/{}/students", BASE_URL, professors[1]))
        .bearer_auth(&token)
        .json(&json!({ "student_id": student_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let message = create(
        &client,
        &token,
        "/chat/send",
        json!({
            "professor_id": professors[0],
            "student_id": student_id,
            "message": "Bonjour",
            "sender_type": "student"
        }),
    )
    .await;
    assert_eq!(message["is_read"], false);

    let unread: Value = client
        .get(format!("{}/chat/unread/{}", BASE_URL, professors[0]))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(unread["unread_count"], 1);

    let response = client
        .put(format!("{}/chat/mark-read/{}", BASE_URL, message["id"]))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
}
