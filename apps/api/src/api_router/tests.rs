use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::Utc;
use serde_json::{Value, json};
use tower::ServiceExt;

use geoscope_application::{
    AssignmentService, AuditEvent, AuditRepository, DelegationGuard, DirectoryUser,
    RoleAssignmentStore, ScopedAccessService, UserDirectory,
};
use geoscope_core::AppResult;
use geoscope_domain::{Assignment, GeographicCatalog, Role, UserId};
use geoscope_infrastructure::InMemoryRoleAssignmentStore;

use crate::middleware::{USER_ID_HEADER, USER_ROLE_HEADER};
use crate::state::AppState;

use super::build_router;

struct StaticUserDirectory {
    users: Vec<DirectoryUser>,
}

#[async_trait]
impl UserDirectory for StaticUserDirectory {
    async fn get_users_by_role(&self, role: Role) -> AppResult<Vec<DirectoryUser>> {
        Ok(self
            .users
            .iter()
            .filter(|user| user.role == role)
            .cloned()
            .collect())
    }
}

struct NoopAuditRepository;

#[async_trait]
impl AuditRepository for NoopAuditRepository {
    async fn append_event(&self, _event: AuditEvent) -> AppResult<()> {
        Ok(())
    }
}

struct TestApp {
    router: Router,
    store: Arc<InMemoryRoleAssignmentStore>,
}

impl TestApp {
    fn new(users: Vec<DirectoryUser>) -> Self {
        let catalog = Arc::new(
            GeographicCatalog::from_entries([
                ("Surat (City)", vec!["Surat City", "Bardoli"]),
                ("Bhavnagar", vec!["Mahuva", "Talaja"]),
                ("Junagadh", vec!["Mahuva", "Keshod"]),
            ])
            .unwrap_or_default(),
        );
        let store = Arc::new(InMemoryRoleAssignmentStore::new());

        let state = AppState {
            assignment_service: AssignmentService::new(
                catalog.clone(),
                store.clone(),
                Arc::new(StaticUserDirectory { users }),
                Arc::new(NoopAuditRepository),
            ),
            delegation_guard: DelegationGuard::new(catalog.clone(), store.clone()),
            scoped_access_service: ScopedAccessService::new(store.clone()),
            catalog,
        };

        Self {
            router: build_router(state),
            store,
        }
    }

    async fn seed(&self, user_id: UserId, role: Role, cities: &[&str], talukas: &[&str]) {
        let assignment = Assignment::new(
            user_id,
            role,
            cities.iter().map(|city| (*city).to_owned()).collect(),
            talukas.iter().map(|taluka| (*taluka).to_owned()).collect(),
            Utc::now(),
        );
        let _ = self.store.upsert(assignment).await;
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        caller: Option<(UserId, &str)>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some((user_id, role)) = caller {
            builder = builder
                .header(USER_ID_HEADER, user_id.to_string())
                .header(USER_ROLE_HEADER, role);
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap_or_default();

        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(error) => match error {},
        };

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        let payload = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, payload)
    }
}

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new(Vec::new());

    let (status, body) = app.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["catalog_cities"], 3);
}

#[tokio::test]
async fn missing_identity_is_unauthorized() {
    let app = TestApp::new(Vec::new());

    let (status, _) = app.send(Method::GET, "/api/geo/cities", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(
            Method::GET,
            "/api/geo/cities",
            Some((UserId::new(), "Regional Manager")),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn city_talukas_resolve_decorated_names() {
    let app = TestApp::new(Vec::new());
    let caller = Some((UserId::new(), "Salesman"));

    let (status, body) = app
        .send(Method::GET, "/api/geo/cities/surat/talukas", caller, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "Surat (City)");
    assert_eq!(body["talukas"], json!(["Surat City", "Bardoli"]));

    let (status, body) = app
        .send(Method::GET, "/api/geo/cities/Atlantis/talukas", caller, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["known"], false);
    assert_eq!(body["talukas"], json!([]));
}

#[tokio::test]
async fn general_assigns_sub_general_cities() {
    let app = TestApp::new(Vec::new());
    let sub_general = UserId::new();

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/sub-generals/{sub_general}/cities"),
            Some((UserId::new(), "General")),
            Some(json!({ "cities": ["surat", "Bhavnagar"] })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "sub_general");
    assert_eq!(body["assigned_cities"], json!(["Surat (City)", "Bhavnagar"]));
}

#[tokio::test]
async fn empty_selection_is_unprocessable() {
    let app = TestApp::new(Vec::new());

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/sub-generals/{}/cities", UserId::new()),
            Some((UserId::new(), "General")),
            Some(json!({ "cities": [] })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "empty_selection");
}

#[tokio::test]
async fn taluka_outside_city_context_is_rejected() {
    let app = TestApp::new(Vec::new());
    let general = Some((UserId::new(), "General"));

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/hr-generals/{}/talukas", UserId::new()),
            general,
            Some(json!({ "city": "Surat (City)", "talukas": ["Bardoli"] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/hr-generals/{}/talukas", UserId::new()),
            general,
            Some(json!({ "city": "Surat (City)", "talukas": ["Mahuva"] })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "taluka_city_mismatch");
}

#[tokio::test]
async fn sub_general_cannot_grant_outside_own_cities() {
    let app = TestApp::new(Vec::new());
    let sub_general = UserId::new();
    app.seed(sub_general, Role::SubGeneral, &["Bhavnagar"], &[])
        .await;

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/hr-generals/{}/talukas", UserId::new()),
            Some((sub_general, "Sub-General")),
            Some(json!({ "city": "Surat (City)", "talukas": ["Bardoli"] })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/hr-generals/{}/talukas", UserId::new()),
            Some((sub_general, "Sub-General")),
            Some(json!({ "city": "bhavnagar", "talukas": ["mahuva"] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assigned_cities"], json!(["Bhavnagar"]));
    assert_eq!(body["assigned_talukas"], json!(["Mahuva"]));
}

#[tokio::test]
async fn salesman_cannot_delegate() {
    let app = TestApp::new(Vec::new());

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/salesmen/{}/taluka", UserId::new()),
            Some((UserId::new(), "Salesman")),
            Some(json!({ "taluka": "Bardoli" })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.get("code").is_none());
}

#[tokio::test]
async fn hr_general_assigns_salesman_inside_its_talukas() {
    let app = TestApp::new(Vec::new());
    let hr_general = UserId::new();
    app.seed(hr_general, Role::HrGeneral, &["Bhavnagar"], &["Mahuva"])
        .await;
    let caller = Some((hr_general, "HR-General"));

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/salesmen/{}/taluka", UserId::new()),
            caller,
            Some(json!({ "taluka": "Mahuva" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/salesmen/{}/taluka", UserId::new()),
            caller,
            Some(json!({ "taluka": "Mahuva", "city": "Bhavnagar" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assigned_talukas"], json!(["Mahuva"]));
    assert_eq!(body["assigned_cities"], json!(["Bhavnagar"]));
}

#[tokio::test]
async fn access_filter_applies_caller_scope() {
    let app = TestApp::new(Vec::new());
    let hr_general = UserId::new();
    app.seed(hr_general, Role::HrGeneral, &["Surat (City)"], &["Bardoli"])
        .await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/access/filter",
            Some((hr_general, "HR-General")),
            Some(json!({
                "records": [
                    { "id": "doc-1", "taluka": "Bardoli" },
                    { "id": "doc-2", "taluka": "Olpad" },
                    { "id": "doc-3", "city": "Bhavnagar", "taluka": "bardoli" }
                ]
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["records"],
        json!([{ "id": "doc-1", "city": null, "taluka": "Bardoli" }])
    );
}

#[tokio::test]
async fn unassigned_caller_is_denied_by_default() {
    let app = TestApp::new(Vec::new());

    let (status, body) = app
        .send(
            Method::POST,
            "/api/access/check",
            Some((UserId::new(), "Sub-General")),
            Some(json!({ "city": "Surat" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], false);
}

#[tokio::test]
async fn revoked_assignment_is_no_longer_found() {
    let app = TestApp::new(Vec::new());
    let general = Some((UserId::new(), "General"));
    let sub_general = UserId::new();
    app.seed(sub_general, Role::SubGeneral, &["Bhavnagar"], &[])
        .await;
    let uri = format!("/api/assignments/sub_general/{sub_general}");

    let (status, body) = app.send(Method::GET, &uri, general, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assigned_cities"], json!(["Bhavnagar"]));

    let (status, body) = app.send(Method::DELETE, &uri, general, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"], true);

    let (status, _) = app.send(Method::GET, &uri, general, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.send(Method::DELETE, &uri, general, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"], false);
}

#[tokio::test]
async fn listings_require_a_higher_rank() {
    let app = TestApp::new(Vec::new());
    let hr_general = UserId::new();
    app.seed(hr_general, Role::HrGeneral, &["Surat (City)"], &["Bardoli"])
        .await;

    let (status, _) = app
        .send(
            Method::GET,
            "/api/assignments?role=sub_general",
            Some((hr_general, "HR-General")),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(
            Method::GET,
            "/api/assignments?role=hr_general&city=surat",
            Some((UserId::new(), "General")),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (status, body) = app
        .send(
            Method::GET,
            &format!("/api/assignments/hr_general/{hr_general}"),
            Some((hr_general, "HR-General")),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assigned_talukas"], json!(["Bardoli"]));
}

#[tokio::test]
async fn mismatched_listing_filter_is_a_bad_request() {
    let app = TestApp::new(Vec::new());

    let (status, _) = app
        .send(
            Method::GET,
            "/api/assignments?role=sub_general&taluka=Bardoli",
            Some((UserId::new(), "General")),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn caller_lists_own_assignments_across_roles() {
    let app = TestApp::new(Vec::new());
    let user_id = UserId::new();
    app.seed(user_id, Role::HrGeneral, &["Surat (City)"], &["Bardoli"])
        .await;
    app.seed(user_id, Role::Salesman, &["Junagadh"], &["Keshod"])
        .await;

    let (status, body) = app
        .send(
            Method::GET,
            "/api/me/assignments",
            Some((user_id, "Salesman")),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn assignable_users_join_directory_and_store() {
    let assigned = UserId::new();
    let unassigned = UserId::new();
    let app = TestApp::new(vec![
        DirectoryUser {
            user_id: assigned,
            display_name: "Asha".to_owned(),
            email: None,
            role: Role::Salesman,
        },
        DirectoryUser {
            user_id: unassigned,
            display_name: "Ravi".to_owned(),
            email: Some("ravi@example.com".to_owned()),
            role: Role::Salesman,
        },
    ]);
    app.seed(assigned, Role::Salesman, &[], &["Bardoli"]).await;

    let (status, body) = app
        .send(
            Method::GET,
            "/api/directory/salesman/assignable",
            Some((UserId::new(), "HR-General")),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["assignment"]["assigned_talukas"], json!(["Bardoli"]));
    assert_eq!(body[1]["assignment"], Value::Null);
    assert_eq!(body[1]["email"], "ravi@example.com");
}
