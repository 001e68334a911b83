use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use jobtrack::{
    AppState, create_router,
    config::AppConfig,
    models::{JobApplication, NewJob, UpdateJobRequest},
    repository::{JobFilter, JobRepository},
};
use std::sync::Arc;
use tower::util::ServiceExt;
use uuid::Uuid;

// --- Stub repository ---
//
// The gate is exercised at the router level, so the repository behind it only
// needs to answer something well-formed.

struct StubRepo;

#[async_trait]
impl JobRepository for StubRepo {
    async fn list_jobs(
        &self,
        _filter: &JobFilter,
    ) -> Result<(Vec<JobApplication>, i64), sqlx::Error> {
        Ok((vec![], 0))
    }

    async fn create_job(&self, _new: NewJob) -> Result<JobApplication, sqlx::Error> {
        Ok(JobApplication::default())
    }

    async fn update_job(
        &self,
        _id: Uuid,
        _changes: UpdateJobRequest,
    ) -> Result<Option<JobApplication>, sqlx::Error> {
        Ok(Some(JobApplication::default()))
    }
}

const SECRET: &str = "s3cret";

fn guarded_app() -> Router {
    app_with(AppConfig {
        app_password: SECRET.to_string(),
        ..AppConfig::default()
    })
}

fn demo_app() -> Router {
    app_with(AppConfig {
        demo_mode: true,
        ..AppConfig::default()
    })
}

fn app_with(config: AppConfig) -> Router {
    create_router(AppState {
        repo: Arc::new(StubRepo),
        config,
    })
}

fn basic_auth(user: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
}

// --- Guarded state ---

#[tokio::test]
async fn test_missing_credential_is_challenged() {
    let response = guarded_app()
        .oneshot(Request::get("/jobs").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok()),
        Some("Basic realm=\"Secure Area\"")
    );

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"Authentication required");
}

#[tokio::test]
async fn test_wrong_password_is_rejected_with_challenge() {
    let response = guarded_app()
        .oneshot(
            Request::get("/jobs")
                .header(header::AUTHORIZATION, basic_auth("any", "wrong"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"Unauthorized");
}

#[tokio::test]
async fn test_matching_password_passes() {
    let response = guarded_app()
        .oneshot(
            Request::get("/jobs")
                .header(header::AUTHORIZATION, basic_auth("any", SECRET))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_username_component_is_ignored() {
    for user in ["admin", "", "someone-else"] {
        let response = guarded_app()
            .oneshot(
                Request::get("/jobs")
                    .header(header::AUTHORIZATION, basic_auth(user, SECRET))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_password_containing_colon_survives_split() {
    let app = app_with(AppConfig {
        app_password: "p:4ss".to_string(),
        ..AppConfig::default()
    });

    let response = app
        .oneshot(
            Request::get("/jobs")
                .header(header::AUTHORIZATION, basic_auth("u", "p:4ss"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_non_basic_scheme_is_rejected() {
    let response = guarded_app()
        .oneshot(
            Request::get("/jobs")
                .header(header::AUTHORIZATION, "Bearer some-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_undecodable_payload_is_rejected() {
    let response = guarded_app()
        .oneshot(
            Request::get("/jobs")
                .header(header::AUTHORIZATION, "Basic !!!not-base64!!!")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_mutations_are_gated_too() {
    let response = guarded_app()
        .oneshot(
            Request::post("/jobs")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"company":"Acme","position":"Eng"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// --- Open (demo) state ---

#[tokio::test]
async fn test_demo_mode_lets_reads_through_unauthenticated() {
    let response = demo_app()
        .oneshot(Request::get("/jobs").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_demo_mode_still_refuses_mutations() {
    let response = demo_app()
        .oneshot(
            Request::post("/jobs")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"company":"Acme","position":"Eng"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"Read-only demo");
}

// --- Ungated surface ---

#[tokio::test]
async fn test_health_probe_is_outside_the_gate() {
    let response = guarded_app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"ok");
}
