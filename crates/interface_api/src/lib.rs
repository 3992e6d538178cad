//! HTTP API Layer
//!
//! This crate provides the SwasthyaSetu gateway using Axum. Four services are
//! mounted under `/api/<name>`:
//!
//! | prefix            | service                                   |
//! |-------------------|-------------------------------------------|
//! | `/api/claims`     | claim validation against HBP packages     |
//! | `/api/ayush`      | AYUSH to WHO terminology search           |
//! | `/api/allergy`    | drug allergy to herb candidate mapping    |
//! | `/api/predictive` | rule-based hybrid health assessment       |
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each service, plus gateway aliases
//! - **Middleware**: Request ids, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent JSON error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    extract::Request,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_allergy::AllergyMapperService;
use domain_assessment::AssessmentService;
use domain_claims::ClaimValidationService;
use domain_terminology::TerminologyService;

use crate::handlers::{allergy, ayush, claims, gateway, health, predictive};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub claims: ClaimValidationService,
    pub terminology: TerminologyService,
    pub allergy: AllergyMapperService,
    pub assessment: AssessmentService,
}

impl AppState {
    pub fn new(
        claims: ClaimValidationService,
        terminology: TerminologyService,
        allergy: AllergyMapperService,
        assessment: AssessmentService,
    ) -> Self {
        Self {
            claims,
            terminology,
            allergy,
            assessment,
        }
    }
}

/// Creates the gateway router with every service mounted
pub fn create_router(state: AppState) -> Router {
    let claims_routes = Router::new()
        .route("/health", get(claims::health))
        .route("/meta/plans", get(claims::list_plans))
        .route("/meta/packages", get(claims::list_packages))
        .route("/validate_claim", post(claims::validate_claim));

    let ayush_routes = Router::new()
        .route("/", get(ayush::root))
        .route("/health", get(ayush::health))
        .route("/search", post(ayush::search))
        .route("/search/:term", get(ayush::search_term))
        .route("/demo/health-passport", get(ayush::demo_health_passport));

    let allergy_routes = Router::new()
        .route("/health", get(allergy::health))
        .route("/map", post(allergy::map_drug).put(allergy::map_drug));

    let predictive_routes = Router::new()
        .route("/health", get(predictive::health))
        .route("/hybrid-assessment", post(predictive::hybrid_assessment));

    // Target of the in-process /validate_claim alias
    let claims_service = claims_routes.clone().with_state(state.clone());

    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .nest("/ayush", ayush_routes)
        .nest("/allergy", allergy_routes)
        .nest("/predictive", predictive_routes);

    let gateway_routes = Router::new()
        .route("/", get(gateway::root))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api", get(gateway::api_overview))
        .route("/search/:term", get(gateway::ayush_alias))
        .route("/demo/health-passport", get(gateway::ayush_alias))
        .route("/meta/plans", get(gateway::claims_alias))
        .route("/meta/packages", get(gateway::claims_alias))
        .route(
            "/validate_claim",
            post(move |request: Request| gateway::forward(claims_service.clone(), "/validate_claim", request)),
        );

    Router::new()
        .merge(gateway_routes)
        .nest("/api", api_routes)
        .fallback(gateway::not_found)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
