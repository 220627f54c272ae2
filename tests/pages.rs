//! The server-rendered contact page: form submission, search, sort and delete.

mod common;

use common::{client, memory_state, spawn, FailingStore};
use contactbook::AppState;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn seed(base: &str, name: &str, email: &str) -> String {
    let body: Value = reqwest::Client::new()
        .post(format!("{base}/api/contacts"))
        .json(&json!({ "name": name, "email": email, "phone": "+15551234567" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["contact"]["id"].as_str().unwrap().to_owned()
}

async fn page(base: &str, path: &str) -> String {
    let resp = client().get(format!("{base}{path}")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.text().await.unwrap()
}

fn location(resp: &reqwest::Response) -> String {
    resp.headers()["location"].to_str().unwrap().to_owned()
}

#[tokio::test]
async fn empty_page() {
    let base = spawn(memory_state().await).await;
    let html = page(&base, "/").await;
    assert!(html.contains("Add New Contact"));
    assert!(html.contains("No contacts yet"));
}

#[tokio::test]
async fn valid_form_redirects_with_notice() {
    let base = spawn(memory_state().await).await;

    let resp = client()
        .post(format!("{base}/contacts"))
        .form(&[
            ("name", "Jo March"),
            ("email", "jo@x.com"),
            ("phone", "+1 (555) 123-4567"),
            ("message", ""),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/?notice=created&name=Jo%20March");

    let html = page(&base, &location(&resp)).await;
    assert!(html.contains("Jo March has been added to your contacts."));
    assert!(html.contains("jo@x.com"));
}

#[tokio::test]
async fn invalid_form_is_shown_again_and_not_stored() {
    let base = spawn(memory_state().await).await;

    let resp = client()
        .post(format!("{base}/contacts"))
        .form(&[("name", "Jo"), ("email", "jo@"), ("phone", "")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let html = resp.text().await.unwrap();
    assert!(html.contains("Please enter a valid email address"));
    assert!(html.contains("Phone number is required"));
    assert!(html.contains(r#"value="jo@""#));
    assert!(html.contains("No contacts yet"));
}

#[tokio::test]
async fn invalid_form_keeps_the_list_view() {
    let base = spawn(memory_state().await).await;
    seed(&base, "Bob", "bob@x.com").await;
    seed(&base, "Amy", "amy@x.com").await;

    let resp = client()
        .post(format!("{base}/contacts"))
        .form(&[
            ("name", "Jo"),
            ("email", "jo@"),
            ("phone", ""),
            ("q", "amy"),
            ("sort", "name"),
            ("order", "asc"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let html = resp.text().await.unwrap();
    assert!(html.contains(r#"type="search" name="q" placeholder="Search contacts..." value="amy""#));
    assert!(html.contains("amy@x.com"));
    assert!(!html.contains("bob@x.com"));

    let resp = client()
        .post(format!("{base}/contacts"))
        .form(&[
            ("name", "Jo"),
            ("email", "jo@x.com"),
            ("phone", "+15551234567"),
            ("q", "amy"),
            ("sort", "name"),
            ("order", "asc"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/?notice=created&name=Jo&q=amy&sort=name&order=asc");
}

#[tokio::test]
async fn message_length_limit_on_the_page() {
    let base = spawn(memory_state().await).await;
    let submit = |message: String| {
        client()
            .post(format!("{base}/contacts"))
            .form(&[
                ("name", "Jo".to_owned()),
                ("email", "jo@x.com".to_owned()),
                ("phone", "+15551234567".to_owned()),
                ("message", message),
            ])
            .send()
    };

    let resp = submit("m".repeat(1001)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Message must be less than 1000 characters."));
    assert!(html.contains("No contacts yet"));

    let resp = submit("m".repeat(1000)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let html = page(&base, "/").await;
    assert!(html.contains(&"m".repeat(1000)));
}

#[tokio::test]
async fn unknown_query_values_still_show_the_page() {
    let base = spawn(memory_state().await).await;
    seed(&base, "Amy", "amy@x.com").await;

    let html = page(&base, "/?notice=bogus&sort=weird&order=x").await;
    assert!(html.contains("amy@x.com"));
    assert!(!html.contains(r#"role="status""#));

    let html = page(&base, "/?notice=deleted&name=Bob&sort=sideways").await;
    assert!(html.contains("Bob has been removed."));
}

#[tokio::test]
async fn search_and_sort() {
    let base = spawn(memory_state().await).await;
    seed(&base, "Bob", "bob@x.com").await;
    seed(&base, "Amy", "amy@x.com").await;

    let html = page(&base, "/?q=AMY&sort=name&order=asc").await;
    assert!(html.contains("amy@x.com"));
    assert!(!html.contains("bob@x.com"));
    assert!(html.contains("(2)"));

    let html = page(&base, "/?sort=name&order=asc").await;
    assert!(html.find("amy@x.com").unwrap() < html.find("bob@x.com").unwrap());

    // default is newest first
    let html = page(&base, "/").await;
    assert!(html.find("amy@x.com").unwrap() < html.find("bob@x.com").unwrap());

    let html = page(&base, "/?sort=createdAt&order=asc").await;
    assert!(html.find("bob@x.com").unwrap() < html.find("amy@x.com").unwrap());

    let html = page(&base, "/?q=nobody").await;
    assert!(html.contains("No matches found"));
}

#[tokio::test]
async fn delete_from_page() {
    let base = spawn(memory_state().await).await;
    let id = seed(&base, "Amy", "amy@x.com").await;

    let resp = client()
        .post(format!("{base}/contacts/{id}/delete"))
        .form(&[("name", "Amy")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/?notice=deleted&name=Amy");

    let html = page(&base, &location(&resp)).await;
    assert!(html.contains("Amy has been removed."));
    assert!(!html.contains("amy@x.com"));
}

#[tokio::test]
async fn failed_writes_leave_the_list_alone() {
    let store = FailingStore::with(&["Amy"]);
    let id = store.first_id();
    let base = spawn(AppState::new(store)).await;

    let resp = client()
        .post(format!("{base}/contacts"))
        .form(&[("name", "Jo"), ("email", "jo@x.com"), ("phone", "+15551234567")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Failed to add contact. Please try again."));
    assert!(html.contains(r#"value="jo@x.com""#));
    assert!(html.contains("(1)"));

    let resp = client()
        .post(format!("{base}/contacts/{id}/delete"))
        .form(&[("name", "Amy")])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/?notice=delete_failed");

    let html = page(&base, &location(&resp)).await;
    assert!(html.contains("Failed to delete contact. Please try again."));
    assert!(html.contains("amy@x.com"));
}

#[tokio::test]
async fn stylesheet_is_served() {
    let base = spawn(memory_state().await).await;
    let resp = client().get(format!("{base}/style.css")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["content-type"], "text/css");
}
