//! HTTP surface: the rendered product page and the contact form relay

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::{Method, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{any, get};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::models::ContactSubmission;
use crate::relay::{ContactRelay, INVALID_METHOD};
use crate::showroom::Showroom;

#[derive(Clone)]
pub struct AppState {
    pub showroom: Showroom,
    pub relay: ContactRelay,
}

/// JSON body answered when the relay is not reached through a form POST
#[derive(Debug, Serialize)]
pub struct RelayStatus {
    pub success: bool,
    pub message: String,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/product", get(product_page))
        .route("/submit_form", any(submit_form))
        .route("/healthz", get(|| async { "ok" }))
        .with_state(state)
}

pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

async fn product_page(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    match state.showroom.open(query.as_deref().unwrap_or_default()).await {
        Ok(page) => Html(page.to_html()).into_response(),
        Err(e) => {
            error!("Error building product page: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "product page unavailable").into_response()
        }
    }
}

async fn submit_form(State(state): State<AppState>, method: Method, body: Bytes) -> Response {
    if method != Method::POST {
        let status = RelayStatus {
            success: false,
            message: INVALID_METHOD.to_string(),
        };
        return (StatusCode::METHOD_NOT_ALLOWED, Json(status)).into_response();
    }

    let submission = ContactSubmission::from_form(&body);
    let outcome = state.relay.relay(&submission).await;
    Redirect::to(&state.relay.redirect_for(&outcome)).into_response()
}
