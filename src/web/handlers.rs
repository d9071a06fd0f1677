//! HTTP request handlers

use super::state::AppState;
use crate::query::RequestParams;
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::HashMap;

/// Context for the search page template
#[derive(Debug, Serialize)]
struct SearchPage {
    title: String,
    query: String,
    form: String,
    searched: bool,
    results: String,
    nav: String,
    error: Option<String>,
}

/// URL of the page being served, as seen by the browser. The scheme comes
/// from `X-Forwarded-Proto` when a TLS-terminating proxy sets it.
fn page_url(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    let host = headers.get(header::HOST)?.to_str().ok()?;
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|proto| proto.eq_ignore_ascii_case("https"))
        .map_or("http", |_| "https");
    Some(format!("{}://{}{}", scheme, host, uri))
}

/// Search page: form, results and paging for the request's query string
pub async fn search_page(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut request = RequestParams::from_map(params);
    request.page_url = page_url(&headers, &uri);

    match render_search_page(&state, &request).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

async fn render_search_page(state: &AppState, request: &RequestParams) -> crate::Result<String> {
    let client = &state.client;
    let query = client.search_query(request);

    let mut page = SearchPage {
        title: state.title().to_string(),
        searched: !query.is_empty(),
        query,
        form: client.render_search_form(request)?,
        results: String::new(),
        nav: String::new(),
        error: None,
    };

    match client.search(None, request).await {
        Ok(result) => {
            page.results = client.render_results(result.as_ref(), request)?;
            if let Some(ref result) = result {
                page.nav = client.render_paging_nav(result, request)?;
            }
        }
        Err(e) => {
            tracing::warn!("Search for {:?} failed: {}", page.query, e);
            page.error = Some("The search service is unavailable, please try again later.".to_string());
        }
    }

    state.templates.render("page.html", &page)
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
