//! Login, logout, and the admin guard over real HTTP.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use vitrine_integration_tests::{TestApp, location};

#[tokio::test]
async fn anonymous_admin_access_redirects_to_login() {
    let app = TestApp::spawn().await;

    let response = app.get("/admin").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = app.get("/admin/delete/1").await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn wrong_password_rerenders_form_without_login() {
    let app = TestApp::spawn().await;

    for (username, password) in [("admin", "wrong"), ("nobody", "123456")] {
        let response = app.login(username, password).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = response.text().await.unwrap();
        assert!(html.contains("Invalid username or password"));
    }

    assert_eq!(location(&app.get("/admin").await), "/login");
}

#[tokio::test]
async fn login_then_logout() {
    let app = TestApp::spawn().await;

    let response = app.login("admin", "123456").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin");

    let response = app.get("/admin").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("Add product"));

    let response = app.get("/logout").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    assert_eq!(location(&app.get("/admin").await), "/login");
}

#[tokio::test]
async fn logout_without_session_is_harmless() {
    let app = TestApp::spawn().await;

    let response = app.get("/logout").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}
