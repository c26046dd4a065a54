//! HTTP request handlers for the mock server.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;
use crate::{Page, Paging};

const SEARCH_REQUEST: &str = "api/projects/search";

/// Largest page size the service accepts.
const MAX_PAGE_SIZE: u32 = 500;

/// Page size used when `ps` is absent.
const SERVER_DEFAULT_PAGE_SIZE: u32 = 100;

/// Query parameters for searching projects.
#[derive(Debug, Default, Deserialize)]
pub struct SearchProjectsQuery {
    pub p: Option<u32>,
    pub ps: Option<u32>,
    pub projects: Option<String>,
}

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": message.into(),
            "request": SEARCH_REQUEST,
        })),
    )
        .into_response()
}

/// GET /api/projects/search
pub async fn search_projects(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<SearchProjectsQuery>,
) -> Response {
    let state = state.read().await;

    if let Some(status) = state.failure {
        return error(status, status.canonical_reason().unwrap_or("failure"));
    }

    let authorization = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if !state.is_authorized(authorization) {
        return error(StatusCode::UNAUTHORIZED, "Authentication required");
    }

    let page = query.p.filter(|p| *p > 0).unwrap_or(1);
    let page_size = query
        .ps
        .filter(|ps| *ps > 0)
        .unwrap_or(SERVER_DEFAULT_PAGE_SIZE);
    if page_size > MAX_PAGE_SIZE {
        return error(
            StatusCode::BAD_REQUEST,
            format!("'ps' value ({page_size}) must be less than {MAX_PAGE_SIZE}"),
        );
    }

    let keys: Option<Vec<&str>> = query
        .projects
        .as_deref()
        .map(|csv| csv.split(',').filter(|k| !k.is_empty()).collect());
    let matching = state.search_projects(keys.as_deref());
    let total = matching.len() as u64;

    let start = (page as usize - 1).saturating_mul(page_size as usize);
    let components = matching
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .cloned()
        .collect();

    let body = Page {
        paging: Paging {
            page_index: page,
            page_size,
            total,
        },
        components,
    };

    (StatusCode::OK, Json(body)).into_response()
}
