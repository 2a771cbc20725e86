#![allow(dead_code)]

use axum::Router;
use serde_json::{json, Value};

/// Serve `app` on an ephemeral port and return its base URL
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    format!("http://{addr}")
}

/// A base URL nothing is listening on
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

pub fn user_json(role: &str) -> Value {
    json!({
        "id": "user-42",
        "name": "Marta Zielińska",
        "email": "marta@example.com",
        "role": role,
        "isActive": true,
        "joinedAt": "2024-05-01T12:00:00Z",
        "bookings": 2
    })
}

pub fn listing_json(id: i64, title: &str, location: &str, price: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{title} description"),
        "price_per_night": price,
        "location": location,
        "created_at": "2025-02-01T09:30:00Z",
        "owner": 1,
        "owner_username": "jan"
    })
}
