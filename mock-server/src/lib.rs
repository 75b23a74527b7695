use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub const SLD_TYPE: &str = "application/vnd.ogc.sld+xml";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_version: Option<LanguageVersion>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LanguageVersion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Deserialize)]
pub struct StyleBody {
    pub style: Style,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StyleRef {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StyleList {
    pub style: Vec<StyleRef>,
}

#[derive(Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub purge: bool,
}

/// A stored style and its uploaded definition, if any.
#[derive(Clone, Debug)]
pub struct Entry {
    pub style: Style,
    pub content: Option<Vec<u8>>,
}

/// Styles in insertion order; listing reflects it.
pub type Db = Arc<RwLock<Vec<Entry>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/rest/styles", get(list_styles).post(create_style))
        .route(
            "/rest/styles/{name}",
            get(get_style_content).put(upload_style).delete(delete_style),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn href(name: &str) -> String {
    format!("/rest/styles/{name}.json")
}

fn position(entries: &[Entry], name: &str) -> Option<usize> {
    entries
        .iter()
        .position(|e| e.style.name.as_deref() == Some(name))
}

async fn list_styles(State(db): State<Db>) -> Json<StyleList> {
    let entries = db.read().await;
    let style = entries
        .iter()
        .filter_map(|e| e.style.name.clone())
        .map(|name| StyleRef {
            href: href(&name),
            name,
        })
        .collect();
    Json(StyleList { style })
}

async fn create_style(
    State(db): State<Db>,
    Json(input): Json<StyleBody>,
) -> (StatusCode, String) {
    let Some(name) = input.style.name.clone() else {
        return (StatusCode::BAD_REQUEST, "style name is required".to_string());
    };
    let mut entries = db.write().await;
    if position(&entries, &name).is_some() {
        return (StatusCode::CONFLICT, format!("style '{name}' already exists"));
    }
    info!(%name, "created style");
    entries.push(Entry {
        style: input.style,
        content: None,
    });
    (StatusCode::CREATED, name)
}

/// Serves `GET /rest/styles/{name}.sld` with the uploaded definition.
async fn get_style_content(
    State(db): State<Db>,
    Path(file): Path<String>,
) -> Result<([(header::HeaderName, &'static str); 1], Vec<u8>), StatusCode> {
    let name = file.strip_suffix(".sld").ok_or(StatusCode::NOT_FOUND)?;
    let entries = db.read().await;
    let idx = position(&entries, name).ok_or(StatusCode::NOT_FOUND)?;
    let content = entries[idx].content.clone().ok_or(StatusCode::NOT_FOUND)?;
    Ok(([(header::CONTENT_TYPE, SLD_TYPE)], content))
}

async fn upload_style(
    State(db): State<Db>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if content_type != SLD_TYPE {
        return StatusCode::UNSUPPORTED_MEDIA_TYPE;
    }
    let mut entries = db.write().await;
    match position(&entries, &name) {
        Some(idx) => {
            info!(%name, bytes = body.len(), "uploaded style definition");
            entries[idx].content = Some(body.to_vec());
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn delete_style(
    State(db): State<Db>,
    Path(name): Path<String>,
    Query(params): Query<DeleteParams>,
) -> (StatusCode, String) {
    let mut entries = db.write().await;
    let Some(idx) = position(&entries, &name) else {
        return (StatusCode::NOT_FOUND, format!("no such style: {name}"));
    };
    let entry = entries.remove(idx);
    let purged = params.purge && entry.content.is_some();
    info!(%name, purged, "deleted style");
    (StatusCode::OK, format!("purged={purged}"))
}
