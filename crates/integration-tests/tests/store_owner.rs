//! Store-owner dashboard: mode gate, pickup transition, settings clamping.

#![allow(clippy::unwrap_used)]

use std::sync::atomic::Ordering;

use savor_integration_tests::TestContext;

#[tokio::test]
async fn dashboard_requires_owner_mode() {
    let ctx = TestContext::spawn().await;

    // Without the session flag the dashboard bounces to the profile page
    let response = ctx.client.get(ctx.url("/owner")).send().await.unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.url().path().ends_with("/profile"));
}

#[tokio::test]
async fn reservations_tab_shows_both_buckets() {
    let ctx = TestContext::spawn().await;
    ctx.enable_owner_mode().await;

    let body = ctx.get_ok("/owner?tab=reservations").await;
    assert!(body.contains("Linh Tran"));
    assert!(body.contains("linh@example.com"));
    assert!(body.contains("Minh Nguyen"));
    assert!(body.contains("Picked Up"));
    // Only the active reservation offers the pickup action
    assert!(body.contains("/owner/reservations/owner-res-1/pickup"));
    assert!(!body.contains("/owner/reservations/owner-res-0/pickup"));
}

#[tokio::test]
async fn pickup_goes_through_confirmation() {
    let ctx = TestContext::spawn().await;
    ctx.enable_owner_mode().await;

    let body = ctx.get_ok("/owner/reservations/owner-res-1/pickup").await;
    assert!(body.contains("Confirm pickup"));
    assert!(body.contains("Linh Tran"));

    // Nothing was sent to the backend yet
    assert!(ctx.stub.last_status_update.lock().await.is_none());

    let response = ctx
        .client
        .post(ctx.url("/owner/reservations/owner-res-1/pickup"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let update = ctx.stub.last_status_update.lock().await.clone();
    let (id, body) = update.unwrap();
    assert_eq!(id, "owner-res-1");
    assert_eq!(body["status"], serde_json::json!("picked_up"));
}

#[tokio::test]
async fn already_picked_up_reservation_cannot_be_confirmed() {
    let ctx = TestContext::spawn().await;
    ctx.enable_owner_mode().await;

    // The confirmation page refuses and bounces back to the tab
    let response = ctx
        .client
        .get(ctx.url("/owner/reservations/owner-res-0/pickup"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.url().path().ends_with("/owner"));
}

#[tokio::test]
async fn direct_post_cannot_flip_a_picked_up_reservation() {
    let ctx = TestContext::spawn().await;
    ctx.enable_owner_mode().await;

    // A POST that skips the confirmation page still bounces for anything
    // that is no longer active
    let response = ctx
        .client
        .post(ctx.url("/owner/reservations/owner-res-0/pickup"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.url().path().ends_with("/owner"));

    assert!(ctx.stub.last_status_update.lock().await.is_none());
}

#[tokio::test]
async fn settings_tab_shows_current_values() {
    let ctx = TestContext::spawn().await;
    ctx.enable_owner_mode().await;

    let body = ctx.get_ok("/owner?tab=settings").await;
    assert!(body.contains("value=\"5\""));
    assert!(body.contains("value=\"15.99\""));
    assert!(body.contains("$15.99"));
}

#[tokio::test]
async fn settings_are_clamped_to_their_floors() {
    let ctx = TestContext::spawn().await;
    ctx.enable_owner_mode().await;

    let response = ctx
        .client
        .post(ctx.url("/owner/settings"))
        .form(&[("surprise_boxes", "0"), ("price", "0.00"), ("is_selling", "true")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let saved = ctx.stub.last_settings.lock().await.clone().unwrap();
    assert_eq!(saved["surpriseBoxes"], serde_json::json!(1));
    assert_eq!(saved["price"], serde_json::json!(0.01));
    assert_eq!(saved["isSelling"], serde_json::json!(true));
}

#[tokio::test]
async fn stats_tab_renders_both_buckets() {
    let ctx = TestContext::spawn().await;
    ctx.enable_owner_mode().await;

    let body = ctx.get_ok("/owner?tab=stats").await;
    assert!(body.contains("2025-08-26"));
    assert!(body.contains("$240.00"));
    assert!(body.contains("$9600.00"));
}

#[tokio::test]
async fn owner_endpoints_send_the_bearer_token() {
    let ctx = TestContext::spawn().await;
    ctx.enable_owner_mode().await;

    // The stub rejects anything without the exact token; a 200 here means
    // the storefront attached it
    ctx.get_ok("/owner?tab=reservations").await;
    ctx.get_ok("/owner?tab=settings").await;
    ctx.get_ok("/owner?tab=stats").await;
    assert_eq!(ctx.stub.counters.home.load(Ordering::SeqCst), 0);
}
