//! Partner contact form and maps endpoints.

#![allow(clippy::unwrap_used)]

use std::sync::atomic::Ordering;

use savor_integration_tests::TestContext;

#[tokio::test]
async fn partner_form_validates_before_submitting() {
    let ctx = TestContext::spawn().await;

    let response = ctx
        .client
        .post(ctx.url("/partner"))
        .form(&[
            ("name", "Quan"),
            ("email", "not-an-email"),
            ("store_name", "Quan's Kitchen"),
            ("message", "We bake too much bread."),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("Please enter a valid email address"));
    // What was typed is preserved
    assert!(body.contains("We bake too much bread."));

    assert_eq!(ctx.stub.counters.partner.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn partner_form_submits_and_confirms() {
    let ctx = TestContext::spawn().await;

    let response = ctx
        .client
        .post(ctx.url("/partner"))
        .form(&[
            ("name", "Quan"),
            ("email", "Quan@Kitchen.vn"),
            ("phone", "0912345678"),
            ("store_name", "Quan's Kitchen"),
            ("message", "We bake too much bread."),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("We received your message"));

    assert_eq!(ctx.stub.counters.partner.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn distance_endpoint_proxies_the_backend() {
    let ctx = TestContext::spawn().await;

    let response = ctx
        .client
        .get(ctx.url("/stores/store-1/distance?latitude=21.03&longitude=105.85"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["distance"], serde_json::json!("1.2 km"));
    assert_eq!(body["meters"], serde_json::json!(1200));

    assert_eq!(ctx.stub.counters.distance.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn directions_redirects_to_google_maps() {
    let ctx = TestContext::spawn().await;

    // Don't follow the redirect; inspect it
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let response = client
        .get(ctx.url("/stores/store-1/directions?latitude=21.0300&longitude=105.8500"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);

    let location = response.headers()["location"].to_str().unwrap();
    assert!(location.starts_with("https://www.google.com/maps/dir/?api=1"));
    assert!(location.contains("origin=21.03,105.85"));
    assert!(location.contains("destination=21.0352,105.8455"));
    assert!(location.contains("travelmode=driving"));
}

#[tokio::test]
async fn health_check_is_live() {
    let ctx = TestContext::spawn().await;
    let body = ctx.get_ok("/health").await;
    assert_eq!(body, "ok");
}
