//! Axum route handlers for the superheroes API.

use std::sync::Arc;

use axum::{
    extract::State,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use superheroes_core::{HeroDetail, HeroId, HeroView, NewHeroPower, PowerId, PowerPatch, PowerView};
use superheroes_store::HeroRepository;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    error::GatewayError,
    form::FormBody,
    path::IdPath,
    policy::{apply_status_policy, StatusPolicy},
};

// ── Shared state ─────────────────────────────────────────────────────────────

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn HeroRepository>,
    pub policy: StatusPolicy,
}

impl AppState {
    #[must_use]
    pub fn new(repo: Arc<dyn HeroRepository>, policy: StatusPolicy) -> Self {
        Self { repo, policy }
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router over the given state.
pub fn create_router(state: AppState) -> Router {
    let policy = state.policy;
    Router::new()
        .route("/", get(home))
        .route("/heroes", get(list_heroes))
        .route("/heroes/{id}", get(get_hero))
        .route("/powers", get(list_powers))
        .route("/powers/{id}", get(get_power).patch(update_power))
        .route("/hero_powers", post(create_hero_power))
        .layer(middleware::map_response_with_state(policy, apply_status_policy))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /` — static API identification.
pub async fn home() -> impl IntoResponse {
    Json(serde_json::json!({"api": "Superheroes API"}))
}

/// `GET /heroes` — every hero, without nested powers.
///
/// # Errors
/// Returns [`GatewayError::Store`] if the store cannot be read.
pub async fn list_heroes(State(state): State<AppState>) -> Result<Json<Vec<HeroView>>, GatewayError> {
    let heroes = state.repo.list_heroes().await?;
    Ok(Json(HeroView::list(&heroes)))
}

/// `GET /heroes/{id}` — one hero with the powers reachable through its
/// associations.
///
/// # Errors
/// Returns [`GatewayError::Store`] wrapping `NotFound` if the hero does not
/// exist.
pub async fn get_hero(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<HeroDetail>, GatewayError> {
    Ok(Json(hero_detail(state.repo.as_ref(), HeroId::new(id)).await?))
}

/// `GET /powers` — every power.
///
/// # Errors
/// Returns [`GatewayError::Store`] if the store cannot be read.
pub async fn list_powers(State(state): State<AppState>) -> Result<Json<Vec<PowerView>>, GatewayError> {
    let powers = state.repo.list_powers().await?;
    Ok(Json(PowerView::list(&powers)))
}

/// `GET /powers/{id}` — one power.
///
/// # Errors
/// Returns [`GatewayError::Store`] wrapping `NotFound` if the power does not
/// exist.
pub async fn get_power(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<PowerView>, GatewayError> {
    let power = state.repo.get_power(PowerId::new(id)).await?;
    Ok(Json(PowerView::from(&power)))
}

/// `PATCH /powers/{id}` — update `name` and/or `description` from a form body.
///
/// # Errors
/// Returns [`GatewayError::Validation`] if the body names any other field, or
/// [`GatewayError::Store`] wrapping `NotFound` if the power does not exist.
pub async fn update_power(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    FormBody(fields): FormBody,
) -> Result<Json<PowerView>, GatewayError> {
    let patch = PowerPatch::from_fields(&fields)?;
    let power = state.repo.update_power(PowerId::new(id), &patch).await?;
    Ok(Json(PowerView::from(&power)))
}

/// `POST /hero_powers` — associate a hero with a power and return the hero
/// with its updated powers.
///
/// # Errors
/// Returns [`GatewayError::Validation`] if `hero_id`, `power_id`, or
/// `strength` is missing or malformed, or [`GatewayError::Store`] wrapping
/// `UnknownReference` if either referenced row does not exist.
pub async fn create_hero_power(
    State(state): State<AppState>,
    FormBody(fields): FormBody,
) -> Result<Json<HeroDetail>, GatewayError> {
    let new = NewHeroPower::from_fields(&fields)?;
    let created = state.repo.create_hero_power(&new).await?;
    Ok(Json(hero_detail(state.repo.as_ref(), created.hero_id).await?))
}

async fn hero_detail(repo: &dyn HeroRepository, id: HeroId) -> Result<HeroDetail, GatewayError> {
    let hero = repo.get_hero(id).await?;
    let powers = repo.powers_of_hero(hero.id).await?;
    Ok(HeroDetail::project(&hero, &powers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use superheroes_core::{NewHero, NewPower};
    use superheroes_store::SqliteRepository;
    use tower::ServiceExt;

    const FORM: &str = "application/x-www-form-urlencoded";

    async fn test_repo() -> Arc<SqliteRepository> {
        match SqliteRepository::in_memory().await {
            Ok(r) => Arc::new(r),
            Err(e) => panic!("failed to open store: {e}"),
        }
    }

    /// One hero `A`/`SA` and one power `fly`/`flight`, unlinked.
    async fn scenario_repo() -> Arc<SqliteRepository> {
        let repo = test_repo().await;
        if let Err(e) = repo.insert_hero(&NewHero::new("A", "SA")).await {
            panic!("insert_hero failed: {e}");
        }
        if let Err(e) = repo.insert_power(&NewPower::new("fly", "flight")).await {
            panic!("insert_power failed: {e}");
        }
        repo
    }

    fn app(repo: Arc<SqliteRepository>, policy: StatusPolicy) -> Router {
        create_router(AppState::new(repo, policy))
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp: Response = match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        let status = resp.status();
        let bytes = match axum::body::to_bytes(resp.into_body(), 64 * 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        let body = match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => panic!("invalid JSON: {e}"),
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        match Request::builder().uri(uri).body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        }
    }

    fn form(method: Method, uri: &str, body: &str) -> Request<Body> {
        match Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, FORM)
            .body(Body::from(body.to_owned()))
        {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        }
    }

    #[tokio::test]
    async fn home_returns_api_identification() {
        let (status, body) = send(app(test_repo().await, StatusPolicy::Compatible), get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"api": "Superheroes API"}));
    }

    #[tokio::test]
    async fn get_hero_without_associations_has_empty_powers() {
        let (status, body) =
            send(app(scenario_repo().await, StatusPolicy::Compatible), get("/heroes/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "name": "A", "super_name": "SA", "powers": []}));
    }

    #[tokio::test]
    async fn list_heroes_omits_nested_powers() {
        let (status, body) =
            send(app(scenario_repo().await, StatusPolicy::Compatible), get("/heroes")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"id": 1, "name": "A", "super_name": "SA"}]));
    }

    #[tokio::test]
    async fn list_and_get_powers_project_allowed_fields() {
        let repo = scenario_repo().await;

        let (_, list) = send(app(repo.clone(), StatusPolicy::Compatible), get("/powers")).await;
        assert_eq!(list, json!([{"id": 1, "name": "fly", "description": "flight"}]));

        let (status, one) = send(app(repo, StatusPolicy::Compatible), get("/powers/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(one, json!({"id": 1, "name": "fly", "description": "flight"}));
    }

    #[tokio::test]
    async fn missing_ids_return_error_body_with_200() {
        let repo = scenario_repo().await;

        let (status, body) = send(app(repo.clone(), StatusPolicy::Compatible), get("/heroes/99")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"error": "Hero not found"}));

        let (status, body) = send(app(repo, StatusPolicy::Compatible), get("/powers/99")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"error": "Power not found"}));
    }

    #[tokio::test]
    async fn patch_power_changes_only_description() {
        let repo = scenario_repo().await;
        let before = match repo.get_power(PowerId::new(1)).await {
            Ok(p) => p,
            Err(e) => panic!("get_power failed: {e}"),
        };
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let (status, body) = send(
            app(repo.clone(), StatusPolicy::Compatible),
            form(Method::PATCH, "/powers/1", "description=X"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "name": "fly", "description": "X"}));

        let after = match repo.get_power(PowerId::new(1)).await {
            Ok(p) => p,
            Err(e) => panic!("get_power failed: {e}"),
        };
        assert!(after.updated_at > before.updated_at, "updated_at must advance");
        assert_eq!(after.created_at, before.created_at);
    }

    #[tokio::test]
    async fn patch_without_body_or_content_type_leaves_power_unchanged() {
        let repo = scenario_repo().await;
        let req = match Request::builder().method(Method::PATCH).uri("/powers/1").body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let (status, body) = send(app(repo, StatusPolicy::Compatible), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "name": "fly", "description": "flight"}));
    }

    #[tokio::test]
    async fn body_without_content_type_is_rejected() {
        let req = match Request::builder()
            .method(Method::PATCH)
            .uri("/powers/1")
            .body(Body::from("description=X"))
        {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let (status, body) = send(app(scenario_repo().await, StatusPolicy::Compatible), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "validation errors");
    }

    #[tokio::test]
    async fn non_integer_ids_return_json_error() {
        let repo = scenario_repo().await;

        let (status, body) = send(app(repo.clone(), StatusPolicy::Compatible), get("/heroes/abc")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"error": "invalid id: abc"}));

        let (status, body) = send(
            app(repo.clone(), StatusPolicy::Compatible),
            form(Method::PATCH, "/powers/x1", "name=zap"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"error": "invalid id: x1"}));

        let (status, body) = send(app(repo, StatusPolicy::Strict), get("/powers/1.5")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "invalid id: 1.5"}));
    }

    #[tokio::test]
    async fn patch_power_rejects_unknown_fields() {
        let repo = scenario_repo().await;
        let (status, body) = send(
            app(repo.clone(), StatusPolicy::Compatible),
            form(Method::PATCH, "/powers/1", "name=zap&id=7"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "validation errors");
        assert_eq!(body["details"], json!(["id is not an updatable field"]));

        let unchanged = match repo.get_power(PowerId::new(1)).await {
            Ok(p) => p,
            Err(e) => panic!("get_power failed: {e}"),
        };
        assert_eq!(unchanged.name, "fly", "rejected patch must not be applied");
    }

    #[tokio::test]
    async fn patch_missing_power_returns_not_found_body() {
        let (status, body) = send(
            app(scenario_repo().await, StatusPolicy::Compatible),
            form(Method::PATCH, "/powers/42", "name=zap"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"error": "Power not found"}));
    }

    #[tokio::test]
    async fn post_hero_power_returns_hero_with_new_power() {
        let repo = scenario_repo().await;
        let (status, body) = send(
            app(repo.clone(), StatusPolicy::Compatible),
            form(Method::POST, "/hero_powers", "hero_id=1&power_id=1&strength=Strong"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "id": 1,
                "name": "A",
                "super_name": "SA",
                "powers": [{"id": 1, "name": "fly", "description": "flight"}]
            })
        );

        let rows = match repo.associations_of_hero(HeroId::new(1)).await {
            Ok(r) => r,
            Err(e) => panic!("query failed: {e}"),
        };
        assert_eq!(rows.len(), 1, "exactly one association row created");
        assert_eq!(rows[0].strength, "Strong");
    }

    #[tokio::test]
    async fn hero_powers_length_matches_association_count() {
        let repo = scenario_repo().await;
        for _ in 0..3 {
            let (_, body) = send(
                app(repo.clone(), StatusPolicy::Compatible),
                form(Method::POST, "/hero_powers", "hero_id=1&power_id=1&strength=Weak"),
            )
            .await;
            assert!(body.get("error").is_none(), "unexpected error: {body}");
        }

        let (_, body) = send(app(repo.clone(), StatusPolicy::Compatible), get("/heroes/1")).await;
        let count = match repo.associations_of_hero(HeroId::new(1)).await {
            Ok(r) => r.len(),
            Err(e) => panic!("query failed: {e}"),
        };
        assert_eq!(count, 3);
        assert_eq!(body["powers"].as_array().map(Vec::len), Some(count));
    }

    #[tokio::test]
    async fn post_hero_power_with_missing_fields_is_rejected() {
        let repo = scenario_repo().await;
        let (status, body) = send(
            app(repo.clone(), StatusPolicy::Compatible),
            form(Method::POST, "/hero_powers", "hero_id=abc"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "error": "validation errors",
                "details": [
                    "hero_id must be an integer",
                    "power_id is required",
                    "strength is required"
                ]
            })
        );

        let rows = match repo.associations_of_hero(HeroId::new(1)).await {
            Ok(r) => r,
            Err(e) => panic!("query failed: {e}"),
        };
        assert!(rows.is_empty(), "no row may be created on validation failure");
    }

    #[tokio::test]
    async fn post_hero_power_with_unknown_hero_is_rejected() {
        let (status, body) = send(
            app(scenario_repo().await, StatusPolicy::Compatible),
            form(Method::POST, "/hero_powers", "hero_id=5&power_id=1&strength=Strong"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "validation errors");
        assert_eq!(body["details"], json!(["Hero 5 does not exist"]));
    }

    #[tokio::test]
    async fn post_hero_power_accepts_multipart_body() {
        let boundary = "heroboundary";
        let mut payload = String::new();
        for (name, value) in [("hero_id", "1"), ("power_id", "1"), ("strength", "Average")] {
            payload.push_str(&format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        payload.push_str(&format!("--{boundary}--\r\n"));

        let req = match Request::builder()
            .method(Method::POST)
            .uri("/hero_powers")
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
            .body(Body::from(payload))
        {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };

        let (status, body) = send(app(scenario_repo().await, StatusPolicy::Compatible), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["powers"][0]["name"], "fly");
    }

    #[tokio::test]
    async fn json_body_is_not_accepted_as_form() {
        let req = match Request::builder()
            .method(Method::PATCH)
            .uri("/powers/1")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"description":"X"}"#))
        {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let (status, body) = send(app(scenario_repo().await, StatusPolicy::Compatible), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "validation errors");
    }

    #[tokio::test]
    async fn strict_policy_reports_client_error_statuses() {
        let repo = scenario_repo().await;

        let (status, body) = send(app(repo.clone(), StatusPolicy::Strict), get("/heroes/99")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Hero not found"}));

        let (status, _) = send(
            app(repo.clone(), StatusPolicy::Strict),
            form(Method::POST, "/hero_powers", "strength=Strong"),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(app(repo, StatusPolicy::Strict), get("/heroes/1")).await;
        assert_eq!(status, StatusCode::OK, "successful responses are untouched");
    }
}
