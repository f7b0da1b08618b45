//! HTTP route handlers for the excerpt service.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ExcerptError, ExcerptResult};
use crate::field::{FieldType, FormatResolver, TextFieldValue};
use crate::formatter::{
    DisplayKey, EXCERPT_FORMATTER_ID, ExcerptSettings, FormatterDefinition, SettingsStore,
    render,
};
use crate::trimming::{RenderedSummary, trim};

use super::state::AppState;

type ApiError = (StatusCode, String);

/// Create the API router with all routes.
#[must_use]
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/formatters", get(list_formatters))
        .route("/api/trim", post(trim_text))
        .route("/api/render", post(render_field))
        .route(
            "/api/settings/{display}/{field}",
            get(get_settings).put(put_settings),
        )
        .with_state(state)
}

fn api_error(error: &ExcerptError) -> ApiError {
    let status = if matches!(error, ExcerptError::UnknownFormatter(_)) {
        StatusCode::NOT_FOUND
    } else if error.is_client_error() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        tracing::error!("Request failed: {error}");
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, error.to_string())
}

/// Run a settings store operation off the async workers; stores may do file I/O.
async fn with_store<T, F>(state: &Arc<AppState>, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&dyn SettingsStore) -> ExcerptResult<T> + Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || op(state.store.as_ref()))
        .await
        .map_err(|e| api_error(&ExcerptError::Io(std::io::Error::other(e))))?
        .map_err(|e| api_error(&e))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "excerpt-formatter",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// List registered formatters.
async fn list_formatters(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<&'static FormatterDefinition>> {
    Json(state.registry.definitions())
}

/// Trim request.
#[derive(Debug, Deserialize)]
pub struct TrimRequest {
    /// Markup to trim.
    pub text: String,
    /// Character limit; the configured default when absent.
    pub max_length: Option<u32>,
    /// Optional text format identifier.
    pub format: Option<String>,
}

/// Trim a single text.
async fn trim_text(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TrimRequest>,
) -> Result<Json<RenderedSummary>, ApiError> {
    let settings = match request.max_length {
        Some(length) => ExcerptSettings::new(length).map_err(|e| api_error(&e))?,
        None => state.config.default_settings(),
    };
    let format = request.format.as_deref().map(|id| state.formats.resolve(id));

    Ok(Json(trim(&request.text, settings.trim_length(), format)))
}

/// Render request for one field.
#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    /// Formatter identifier.
    #[serde(default = "default_formatter")]
    pub formatter: String,
    /// Field type; `text_with_summary` when absent.
    pub field_type: Option<FieldType>,
    /// Human-readable field label.
    #[serde(default)]
    pub field_label: String,
    /// Fallback language code for items.
    #[serde(default)]
    pub langcode: String,
    /// Inline settings; take precedence over stored ones.
    pub settings: Option<Value>,
    /// Display whose stored settings apply.
    pub display: Option<String>,
    /// Field machine name within the display.
    pub field: Option<String>,
    /// Field items.
    pub items: Vec<TextFieldValue>,
}

fn default_formatter() -> String {
    EXCERPT_FORMATTER_ID.to_string()
}

/// One rendered item.
#[derive(Debug, Serialize, Deserialize)]
pub struct RenderedElement {
    /// Final markup.
    pub markup: String,
    /// Text format identifier.
    pub format: String,
    /// Language code.
    pub langcode: String,
}

/// Render response.
#[derive(Debug, Serialize, Deserialize)]
pub struct RenderResponse {
    /// Formatter used.
    pub formatter: String,
    /// Settings summary of the formatter.
    pub settings_summary: Vec<String>,
    /// One element per item.
    pub elements: Vec<RenderedElement>,
}

/// Render field items with a formatter.
async fn render_field(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RenderRequest>,
) -> Result<Json<RenderResponse>, ApiError> {
    let settings = match (&request.settings, &request.display, &request.field) {
        (Some(inline), _, _) => inline.clone(),
        (None, Some(display), Some(field)) => {
            let key = DisplayKey::new(display, field);
            let stored = with_store(&state, move |store| store.load(&key))
                .await?
                .unwrap_or_else(|| state.config.default_settings());
            serde_json::to_value(stored).map_err(|e| api_error(&ExcerptError::from(e)))?
        }
        _ => serde_json::to_value(state.config.default_settings())
            .map_err(|e| api_error(&ExcerptError::from(e)))?,
    };

    let field_type = request.field_type.unwrap_or(FieldType::TextWithSummary);
    let formatter = state
        .registry
        .create_for_field(&request.formatter, field_type, &settings, &request.field_label)
        .map_err(|e| api_error(&e))?;

    let elements = formatter
        .view_elements(&request.items, &request.langcode, &state.elements)
        .into_iter()
        .map(|node| render(node, &state.filter, &state.formats))
        .map(|node| RenderedElement {
            markup: node.markup.unwrap_or_default(),
            format: node.format,
            langcode: node.langcode,
        })
        .collect();

    Ok(Json(RenderResponse {
        formatter: formatter.definition().id.to_string(),
        settings_summary: formatter.settings_summary(),
        elements,
    }))
}

/// Stored settings of one field display.
#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsResponse {
    /// Display identifier.
    pub display: String,
    /// Field machine name.
    pub field: String,
    /// Effective settings.
    pub settings: ExcerptSettings,
    /// Whether the settings were saved or are defaults.
    pub stored: bool,
    /// Settings summary.
    pub summary: Vec<String>,
}

/// Read the settings of a field display.
async fn get_settings(
    State(state): State<Arc<AppState>>,
    Path((display, field)): Path<(String, String)>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let key = DisplayKey::new(&display, &field);
    let stored = with_store(&state, move |store| store.load(&key)).await?;
    let settings = stored.unwrap_or_else(|| state.config.default_settings());

    Ok(Json(SettingsResponse {
        display,
        field,
        settings,
        stored: stored.is_some(),
        summary: settings.summary(),
    }))
}

/// Validate and save the settings of a field display.
async fn put_settings(
    State(state): State<Arc<AppState>>,
    Path((display, field)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let settings = ExcerptSettings::from_value(&body).map_err(|e| api_error(&e))?;
    let key = DisplayKey::new(&display, &field);
    let target = key.clone();
    with_store(&state, move |store| store.save(&target, settings)).await?;
    tracing::info!("Updated excerpt settings for {key}: {}", settings.trim_length);

    Ok(Json(SettingsResponse {
        display,
        field,
        settings,
        stored: true,
        summary: settings.summary(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::config::ServiceConfig;
    use crate::formatter::InMemorySettingsStore;

    fn router() -> Router {
        let state = AppState::with_store(
            ServiceConfig::default(),
            Box::new(InMemorySettingsStore::new()),
        );
        create_router(state)
    }

    async fn send(
        router: Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        };
        let Ok(request) = request else {
            unreachable!("request must build");
        };
        let Ok(response) = router.oneshot(request).await else {
            unreachable!("router is infallible");
        };
        let status = response.status();
        let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
            unreachable!("body must be readable");
        };
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(router(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_formatters() {
        let (status, body) = send(router(), "GET", "/api/formatters", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], "excerpt");
        assert_eq!(body[0]["field_types"][2], "text_with_summary");
    }

    #[tokio::test]
    async fn test_trim_endpoint() {
        let body = serde_json::json!({
            "text": "<p>abcdefghijklmnopqrstuvwxyz</p>",
            "max_length": 5
        });
        let (status, body) = send(router(), "POST", "/api/trim", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "abcde [...]");
        assert_eq!(body["truncated"], true);
    }

    #[tokio::test]
    async fn test_trim_rejects_zero_length() {
        let body = serde_json::json!({"text": "abc", "max_length": 0});
        let (status, _) = send(router(), "POST", "/api/trim", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_render_with_inline_settings() {
        let body = serde_json::json!({
            "field_label": "Body",
            "langcode": "en",
            "settings": {"trim_length": "15"},
            "items": [
                {"value": "<p>Hello world. Another sentence here.</p>", "format": "basic_html"},
                {"value": "<p>Long body</p>", "summary": "Teaser", "format": "basic_html", "langcode": "fr"}
            ]
        });
        let (status, body) = send(router(), "POST", "/api/render", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["elements"][0]["markup"], "Hello world. [...]");
        assert_eq!(body["elements"][0]["langcode"], "en");
        assert_eq!(body["elements"][1]["markup"], "Teaser");
        assert_eq!(body["elements"][1]["langcode"], "fr");
        assert_eq!(body["settings_summary"][0], "Trimmed (no HTML) limit: 15 characters");
    }

    #[tokio::test]
    async fn test_render_unknown_formatter() {
        let body = serde_json::json!({"formatter": "teaser", "items": []});
        let (status, _) = send(router(), "POST", "/api/render", Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_settings_flow() {
        let app = router();

        let (status, body) = send(app.clone(), "GET", "/api/settings/teaser/body", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stored"], false);
        assert_eq!(body["settings"]["trim_length"], 350);

        let bad = serde_json::json!({"trim_length": 0});
        let (status, _) = send(app.clone(), "PUT", "/api/settings/teaser/body", Some(bad)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let good = serde_json::json!({"trim_length": 5});
        let (status, body) =
            send(app.clone(), "PUT", "/api/settings/teaser/body", Some(good)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stored"], true);

        let render = serde_json::json!({
            "formatter": "excerpt_trimmed",
            "display": "teaser",
            "field": "body",
            "items": [{"value": "abcdefghijklmnopqrstuvwxyz", "format": "basic_html"}]
        });
        let (status, body) = send(app, "POST", "/api/render", Some(render)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["elements"][0]["markup"], "abcde [...]");
    }

    #[test]
    fn test_error_status_follows_client_classification() {
        let cases = [
            (ExcerptError::UnknownFormatter("x".to_string()), StatusCode::NOT_FOUND),
            (
                ExcerptError::InvalidConfiguration("x".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ExcerptError::Io(std::io::Error::other("disk")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, expected) in cases {
            let (status, message) = api_error(&error);
            assert_eq!(status, expected, "{message}");
            assert_eq!(status.is_client_error(), error.is_client_error());
        }
    }

    #[tokio::test]
    async fn test_trim_keeps_escaped_markup_inert() {
        let body = serde_json::json!({"text": "&lt;script&gt;alert(1)&lt;/script&gt;"});
        let (status, body) = send(router(), "POST", "/api/trim", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "&lt;script&gt;alert(1)&lt;/script&gt;");
    }
}
