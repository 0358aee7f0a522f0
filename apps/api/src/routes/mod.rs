pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::form::handlers as form;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Form Collector
        .route("/", get(form::handle_form_page).post(form::handle_form_submit))
        // Resume Renderer
        .route("/resume", get(resume::handle_resume_page))
        .route("/resume.pdf", get(resume::handle_resume_pdf))
        // JSON API
        .route(
            "/api/v1/resume",
            get(resume::handle_get_resume)
                .put(resume::handle_put_resume)
                .delete(resume::handle_delete_resume),
        )
        .route("/api/v1/resume/pdf", get(resume::handle_resume_pdf))
        .route("/api/v1/form/defaults", get(form::handle_form_defaults))
        .route("/api/v1/form/validate", post(form::handle_form_validate))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::models::resume::ResumeRecord;
    use crate::storage::{MemoryStore, RecordStore};

    fn app_with_store() -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), Config::default()).unwrap();
        (build_router(state), store)
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn form_post(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    const VALID_FORM: &str = "name=Ada+Lovelace&email=ada%40example.com&phone=555-0100\
        &github=&linkedin=\
        &education.0.degree=BSc&education.0.institution=UCL&education.0.year=1835\
        &skills.0=Maths&skills.1=Engines\
        &experience.0.company=Analytical&experience.0.position=Analyst\
        &experience.0.duration=1842-1843&experience.0.bullets.0=Wrote+Note+G";

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app_with_store();
        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("\"storage\":\"memory\""));
    }

    #[tokio::test]
    async fn test_form_page_renders_defaults() {
        let (app, _) = app_with_store();
        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("name=\"experience.0.bullets.0\""));
    }

    #[tokio::test]
    async fn test_empty_submit_blocked_and_nothing_saved() {
        let (app, store) = app_with_store();
        let response = app
            .oneshot(form_post(
                "name=&email=&phone=&education.0.degree=&skills.0=&action=submit",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_string(response).await;
        assert!(body.contains("Name is required"));
        assert!(body.contains("Degree is required"));
        assert!(body.contains("Skill is required"));
        assert!(store.load("resumeData").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_valid_submit_saves_and_redirects() {
        let (app, store) = app_with_store();
        let response = app
            .oneshot(form_post(&format!("{VALID_FORM}&action=submit")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/resume");

        let saved = store.load("resumeData").await.unwrap().unwrap();
        assert_eq!(saved.name, "Ada Lovelace");
        assert_eq!(saved.email, "ada@example.com");
        assert_eq!(saved.skills, vec!["Maths", "Engines"]);
        assert_eq!(saved.experience[0].bullets, vec!["Wrote Note G"]);
    }

    #[tokio::test]
    async fn test_submit_without_action_defaults_to_submit() {
        let (app, store) = app_with_store();
        let response = app.oneshot(form_post(VALID_FORM)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(store.load("resumeData").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_remove_skill_action_rerenders_in_order() {
        let (app, store) = app_with_store();
        let response = app
            .oneshot(form_post(
                "name=Ada&skills.0=Rust&skills.1=Go&skills.2=SQL&action=remove_skill%3A1",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        let rust = body.find("value=\"Rust\"").unwrap();
        let sql = body.find("value=\"SQL\"").unwrap();
        assert!(rust < sql);
        assert!(!body.contains("value=\"Go\""));
        assert!(body.contains("name=\"skills.1\""));
        assert!(!body.contains("name=\"skills.2\""));
        // List actions never persist.
        assert!(store.load("resumeData").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_bullet_action() {
        let (app, _) = app_with_store();
        let response = app
            .oneshot(form_post(
                "experience.0.company=A&experience.0.bullets.0=One&action=add_bullet%3A0",
            ))
            .await
            .unwrap();
        let body = body_string(response).await;
        assert!(body.contains("name=\"experience.0.bullets.1\""));
        assert!(body.contains("value=\"One\""));
    }

    #[tokio::test]
    async fn test_oversized_field_index_is_ignored() {
        let (app, _) = app_with_store();
        let response = app
            .oneshot(form_post(
                "name=Ada&skills.0=Rust&skills.18446744073709551615=x\
                 &skills.1000000000=y&action=add_skill",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("value=\"Rust\""));
        assert!(body.contains("name=\"skills.1\""));
        assert!(!body.contains("name=\"skills.2\""));
        assert!(!body.contains("value=\"x\""));
    }

    #[tokio::test]
    async fn test_bad_action_index_is_bad_request() {
        let (app, _) = app_with_store();
        let response = app
            .oneshot(form_post("skills.0=Rust&action=remove_skill%3A7"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_resume_page_shows_sample_when_empty() {
        let (app, _) = app_with_store();
        let response = app.oneshot(get("/resume")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("John Doe"));
        assert!(body.contains("No saved resume yet"));
    }

    #[tokio::test]
    async fn test_resume_page_shows_saved_record() {
        let (app, store) = app_with_store();
        let mut record = ResumeRecord::sample();
        record.name = "Grace Hopper".into();
        store.save("resumeData", &record).await.unwrap();

        let body = body_string(app.oneshot(get("/resume")).await.unwrap()).await;
        assert!(body.contains("Grace Hopper"));
        assert!(!body.contains("No saved resume yet"));
    }

    #[tokio::test]
    async fn test_edit_prefills_saved_record() {
        let (app, store) = app_with_store();
        store
            .save("resumeData", &ResumeRecord::sample())
            .await
            .unwrap();
        let body = body_string(app.oneshot(get("/?edit=true")).await.unwrap()).await;
        assert!(body.contains("value=\"John Doe\""));
        assert!(body.contains("name=\"experience.1.bullets.2\""));
    }

    #[tokio::test]
    async fn test_pdf_download() {
        let (app, _) = app_with_store();
        let response = app.oneshot(get("/resume.pdf")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"resume.pdf\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(!bytes.is_empty());
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_api_put_get_delete() {
        let (app, _) = app_with_store();
        let record = ResumeRecord::sample();

        let put = Request::builder()
            .method("PUT")
            .uri("/api/v1/resume")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&record).unwrap()))
            .unwrap();
        let response = app.clone().oneshot(put).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.clone().oneshot(get("/api/v1/resume")).await.unwrap();
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["source"], "stored");
        let round_trip: ResumeRecord = serde_json::from_value(body["resume"].clone()).unwrap();
        assert_eq!(round_trip, record);

        let delete = Request::builder()
            .method("DELETE")
            .uri("/api/v1/resume")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(delete).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.oneshot(get("/api/v1/resume")).await.unwrap();
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["source"], "sample");
    }

    #[tokio::test]
    async fn test_api_put_invalid_is_422() {
        let (app, store) = app_with_store();
        let put = Request::builder()
            .method("PUT")
            .uri("/api/v1/resume")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"","skills":[""]}"#))
            .unwrap();
        let response = app.oneshot(put).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        let fields: Vec<&str> = body["error"]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["name", "email", "phone", "skills.0"]);
        assert!(store.load("resumeData").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_api_form_defaults_and_validate() {
        let (app, _) = app_with_store();
        let response = app
            .clone()
            .oneshot(get("/api/v1/form/defaults"))
            .await
            .unwrap();
        let defaults: ResumeRecord = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(defaults.education.len(), 1);
        assert_eq!(defaults.experience[0].bullets.len(), 1);

        let validate = Request::builder()
            .method("POST")
            .uri("/api/v1/form/validate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&defaults).unwrap()))
            .unwrap();
        let response = app.oneshot(validate).await.unwrap();
        let report: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(report["passed"], false);
        assert_eq!(report["fields"].as_array().unwrap().len(), 11);
    }
}
