//! HTTP API Layer
//!
//! This crate provides the REST API for the invoice ledger using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for invoices and health probes
//! - **Middleware**: Authentication and request audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(store, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_invoicing::InvoiceStore;

use crate::config::ApiConfig;
use crate::handlers::{health, invoices};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InvoiceStore>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `store` - The invoice datastore adapter
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(store: Arc<dyn InvoiceStore>, config: ApiConfig) -> Router {
    let state = AppState { store, config };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Invoice routes
    let invoice_routes = Router::new()
        .route("/", post(invoices::create_invoice))
        .route("/", get(invoices::list_invoices))
        .route("/:id", get(invoices::get_invoice))
        .route("/:id/payments", post(invoices::record_payment));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/invoices", invoice_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
