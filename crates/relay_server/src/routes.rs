use std::sync::Arc;

use axum::body::Body;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{middleware, Json, Router};
use relay_core::{ErrorPayload, KeywordCatalog};
use relay_engine::{await_first_chunk, relay_frames, Fetcher};
use relay_logging::{relay_info, relay_warn};
use serde::Deserialize;

use crate::cors::cors;

#[derive(Clone)]
pub struct ServerState {
    catalog: Arc<KeywordCatalog>,
    fetcher: Arc<dyn Fetcher>,
}

impl ServerState {
    pub fn new(catalog: KeywordCatalog, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            fetcher,
        }
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/keywords", any(keywords))
        .route("/urls", any(urls))
        .route("/download", any(download))
        .fallback(not_found)
        .layer(middleware::from_fn(cors))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct UrlsQuery {
    keyword: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DownloadQuery {
    url: Option<String>,
}

async fn keywords(State(state): State<ServerState>, method: Method) -> Response {
    if method != Method::GET {
        return json_error(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
    }
    Json(state.catalog.keywords()).into_response()
}

async fn urls(
    State(state): State<ServerState>,
    method: Method,
    query: Result<Query<UrlsQuery>, QueryRejection>,
) -> Response {
    let keyword = query.ok().and_then(|Query(query)| non_empty(query.keyword));
    let Some(keyword) = keyword.filter(|_| method == Method::GET) else {
        return json_error(StatusCode::BAD_REQUEST, "Invalid request");
    };

    match state.catalog.urls(&keyword) {
        Some(urls) => Json(urls).into_response(),
        None => json_error(StatusCode::NOT_FOUND, "Keyword not found"),
    }
}

async fn download(
    State(state): State<ServerState>,
    method: Method,
    query: Result<Query<DownloadQuery>, QueryRejection>,
) -> Response {
    let url = query.ok().and_then(|Query(query)| non_empty(query.url));
    let Some(url) = url.filter(|_| method == Method::GET) else {
        return json_error(StatusCode::BAD_REQUEST, "Invalid request");
    };

    let opened = match state.fetcher.open(&url).await {
        Ok(upstream) => await_first_chunk(upstream).await,
        Err(err) => Err(err),
    };
    match opened {
        Ok(upstream) => {
            relay_info!("Relaying {} (size {:?})", url, upstream.size);
            // No Content-Length: hyper sends the body chunked.
            (
                [(header::CONTENT_TYPE, "application/json")],
                Body::from_stream(relay_frames(upstream)),
            )
                .into_response()
        }
        Err(err) => {
            relay_warn!("Download of {} failed before streaming: {}", url, err);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(err.to_payload())).into_response()
        }
    }
}

async fn not_found() -> Response {
    json_error(StatusCode::NOT_FOUND, "Not Found")
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorPayload::new(message))).into_response()
}

fn non_empty(param: Option<String>) -> Option<String> {
    param.filter(|value| !value.is_empty())
}
