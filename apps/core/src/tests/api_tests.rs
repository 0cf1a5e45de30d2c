//! API Tests
//!
//! Drives the full router in-process: identity headers, status mapping,
//! rate limiting and persistence side effects.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::api::auth::{USER_ID_HEADER, USER_ROLE_HEADER};
use crate::api::{build_router, AppState};
use crate::nlp::SymptomAnalyzer;
use crate::rate_limiter::RateLimiter;
use crate::tests::database_tests::create_test_pool;

async fn test_app(rate_limit: usize) -> (Router, TempDir) {
    let (pool, dir) = create_test_pool().await;
    let state = AppState::new(
        pool,
        SymptomAnalyzer::default(),
        RateLimiter::new(rate_limit, Duration::from_secs(60)),
    );
    (build_router(state), dir)
}

fn request(method: Method, uri: &str, user: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_ID_HEADER, user);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[cfg(test)]
mod public_route_tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let (app, _dir) = test_app(10).await;

        let (status, body) = send(&app, request(Method::GET, "/health", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_list_herbs() {
        let (app, _dir) = test_app(10).await;

        let (status, body) = send(&app, request(Method::GET, "/api/herbs", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        let herbs = body.as_array().unwrap();
        assert_eq!(herbs.len(), 6);
        assert_eq!(herbs[0]["plantName"], "Ashwagandha");
        assert!(herbs[0].get("model3dUrl").is_some());
    }

    #[tokio::test]
    async fn test_list_herbs_with_filter() {
        let (app, _dir) = test_app(10).await;

        let (status, body) = send(
            &app,
            request(Method::GET, "/api/herbs?category=Digestive", None, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["plantName"], "Ginger");
    }

    #[tokio::test]
    async fn test_get_herb() {
        let (app, _dir) = test_app(10).await;

        let (status, body) = send(&app, request(Method::GET, "/api/herbs/3", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["plantName"], "Turmeric");
        assert_eq!(body["scientificName"], "Curcuma longa");
    }

    #[tokio::test]
    async fn test_get_missing_herb() {
        let (app, _dir) = test_app(10).await;

        let (status, body) = send(&app, request(Method::GET, "/api/herbs/999", None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Herb not found");
    }

    #[tokio::test]
    async fn test_invalid_herb_id() {
        let (app, _dir) = test_app(10).await;

        let (status, body) = send(&app, request(Method::GET, "/api/herbs/abc", None, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }
}

#[cfg(test)]
mod recommend_tests {
    use super::*;

    #[tokio::test]
    async fn test_requires_identity() {
        let (app, _dir) = test_app(10).await;

        let (status, body) = send(
            &app,
            request(
                Method::POST,
                "/api/ai/recommend",
                None,
                Some(json!({ "symptoms": "stress" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Not authenticated");
    }

    #[tokio::test]
    async fn test_missing_symptoms() {
        let (app, _dir) = test_app(10).await;

        for payload in [json!({}), json!({ "symptoms": "" }), json!({ "symptoms": 42 })] {
            let (status, body) = send(
                &app,
                request(Method::POST, "/api/ai/recommend", Some("user-1"), Some(payload)),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["message"], "Symptoms text is required");
        }
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let (app, _dir) = test_app(10).await;

        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/ai/recommend")
            .header(USER_ID_HEADER, "user-1")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_recommend_and_history() {
        let (app, _dir) = test_app(10).await;

        let (status, body) = send(
            &app,
            request(
                Method::POST,
                "/api/ai/recommend",
                Some("user-1"),
                Some(json!({ "symptoms": "stress" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["analysis"]["category"], "mental");
        assert_eq!(body["analysis"]["severity"], "mild");
        assert_eq!(body["analysis"]["keywords"], json!(["stress"]));
        assert_eq!(body["recommendations"][0]["herbId"], 2);
        assert_eq!(body["recommendations"][1]["herbId"], 1);
        assert!(body["disclaimer"].as_str().unwrap().contains("healthcare"));
        assert_eq!(body["lifestyle"].as_array().unwrap().len(), 4);

        let (status, history) = send(
            &app,
            request(Method::GET, "/api/user/history", Some("user-1"), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let entries = history.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["symptoms"], "stress");
        assert_eq!(entries[0]["recommendedHerbs"], json!([2, 1]));

        let (_, other) = send(
            &app,
            request(Method::GET, "/api/user/history", Some("user-2"), None),
        )
        .await;
        assert!(other.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rate_limited_per_user() {
        let (app, _dir) = test_app(1).await;
        let payload = json!({ "symptoms": "cough" });

        let (status, _) = send(
            &app,
            request(Method::POST, "/api/ai/recommend", Some("user-1"), Some(payload.clone())),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let response = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/api/ai/recommend",
                Some("user-1"),
                Some(payload.clone()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let retry_after: u64 = response.headers()[header::RETRY_AFTER]
            .to_str()
            .unwrap()
            .parse()
            .unwrap();
        assert!((1..=60).contains(&retry_after));

        // Other users have their own budget
        let (status, _) = send(
            &app,
            request(Method::POST, "/api/ai/recommend", Some("user-2"), Some(payload)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[cfg(test)]
mod admin_tests {
    use super::*;

    fn admin_request(method: Method, uri: &str, role: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut req = request(method, uri, Some("admin-1"), body);
        if let Some(role) = role {
            req.headers_mut()
                .insert(USER_ROLE_HEADER, role.parse().unwrap());
        }
        req
    }

    fn shatavari() -> Value {
        json!({
            "plantName": "Shatavari",
            "scientificName": "Asparagus racemosus",
            "description": "Rejuvenating root",
            "benefits": "Supports vitality",
            "category": "Rasayana"
        })
    }

    #[tokio::test]
    async fn test_create_requires_admin_role() {
        let (app, _dir) = test_app(10).await;

        let (status, body) = send(
            &app,
            admin_request(Method::POST, "/api/admin/herbs", None, Some(shatavari())),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Admin access required");

        let (status, _) = send(
            &app,
            admin_request(Method::POST, "/api/admin/herbs", Some("editor"), Some(shatavari())),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_herb_lifecycle() {
        let (app, _dir) = test_app(10).await;

        let (status, created) = send(
            &app,
            admin_request(Method::POST, "/api/admin/herbs", Some("admin"), Some(shatavari())),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["isPublished"], true);
        let id = created["id"].as_i64().unwrap();

        let (status, updated) = send(
            &app,
            admin_request(
                Method::PUT,
                &format!("/api/admin/herbs/{}", id),
                Some("admin"),
                Some(json!({ "climate": "Tropical" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["climate"], "Tropical");
        assert_eq!(updated["plantName"], "Shatavari");

        let (status, _) = send(
            &app,
            admin_request(Method::DELETE, &format!("/api/admin/herbs/{}", id), Some("admin"), None),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(
            &app,
            request(Method::GET, &format!("/api/herbs/{}", id), None, None),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_with_null_clears_optional_field() {
        let (app, _dir) = test_app(10).await;

        let mut payload = shatavari();
        payload["imageUrl"] = json!("/img/shatavari.png");
        let (_, created) = send(
            &app,
            admin_request(Method::POST, "/api/admin/herbs", Some("admin"), Some(payload)),
        )
        .await;
        let uri = format!("/api/admin/herbs/{}", created["id"]);

        let (status, updated) = send(
            &app,
            admin_request(Method::PUT, &uri, Some("admin"), Some(json!({ "imageUrl": null }))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["imageUrl"], Value::Null);
        assert_eq!(updated["category"], "Rasayana");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_payload() {
        let (app, _dir) = test_app(10).await;

        let mut payload = shatavari();
        payload["plantName"] = json!("");

        let (status, body) = send(
            &app,
            admin_request(Method::POST, "/api/admin/herbs", Some("admin"), Some(payload)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("plant_name"));
    }
}

#[cfg(test)]
mod bookmark_route_tests {
    use super::*;

    #[tokio::test]
    async fn test_bookmark_lifecycle() {
        let (app, _dir) = test_app(10).await;

        let (status, bookmark) = send(
            &app,
            request(
                Method::POST,
                "/api/user/bookmarks",
                Some("user-1"),
                Some(json!({ "herbId": 5 })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(bookmark["herbId"], 5);
        assert_eq!(bookmark["userId"], "user-1");

        let (status, list) = send(
            &app,
            request(Method::GET, "/api/user/bookmarks", Some("user-1"), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, body) = send(
            &app,
            request(Method::DELETE, "/api/user/bookmarks/5", Some("user-1"), None),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (_, list) = send(
            &app,
            request(Method::GET, "/api/user/bookmarks", Some("user-1"), None),
        )
        .await;
        assert!(list.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bookmark_unknown_herb() {
        let (app, _dir) = test_app(10).await;

        let (status, body) = send(
            &app,
            request(
                Method::POST,
                "/api/user/bookmarks",
                Some("user-1"),
                Some(json!({ "herbId": 999 })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Herb not found");
    }

    #[tokio::test]
    async fn test_bookmarks_require_identity() {
        let (app, _dir) = test_app(10).await;

        let (status, _) = send(&app, request(Method::GET, "/api/user/bookmarks", None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
