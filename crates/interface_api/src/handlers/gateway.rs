//! Gateway handlers: service discovery, unprefixed aliases and the 404 body
//!
//! Read-only aliases answer with a temporary redirect to the mounted path,
//! query string included. `POST /validate_claim` is dispatched in-process to
//! the claims router and answers with its status and body.

use axum::{
    extract::Request,
    http::{StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use tracing::debug;

pub const CLAIMS_PREFIX: &str = "/api/claims";
pub const AYUSH_PREFIX: &str = "/api/ayush";
pub const ALLERGY_PREFIX: &str = "/api/allergy";
pub const PREDICTIVE_PREFIX: &str = "/api/predictive";

const AVAILABLE_ENDPOINTS: [&str; 11] = [
    "/",
    "/health",
    "/search/{term}",
    "/demo/health-passport",
    "/meta/plans",
    "/meta/packages",
    "/validate_claim (POST)",
    "/api/allergy/*",
    "/api/ayush/*",
    "/api/predictive/*",
    "/api/claims/*",
];

/// `prefix` plus the request's path and query, as received
fn mounted(prefix: &str, uri: &Uri) -> String {
    let tail = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    format!("{}{}", prefix, tail)
}

pub async fn ayush_alias(uri: Uri) -> Redirect {
    Redirect::temporary(&mounted(AYUSH_PREFIX, &uri))
}

pub async fn claims_alias(uri: Uri) -> Redirect {
    Redirect::temporary(&mounted(CLAIMS_PREFIX, &uri))
}

/// Dispatches `request` to `target` under `path`, returning its response as is
pub async fn forward(target: Router, path: &'static str, mut request: Request) -> Response {
    debug!(from = %request.uri(), to = path, "Forwarding request in-process");
    *request.uri_mut() = Uri::from_static(path);
    match target.oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    }
}

/// Response for any path no router claimed
pub async fn not_found(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "path": uri.path(),
            "available_endpoints": AVAILABLE_ENDPOINTS,
        })),
    )
        .into_response()
}

/// Service discovery
pub async fn root() -> Json<Value> {
    let services = json!([
        {
            "name": "Allergy Mapper",
            "base_path": ALLERGY_PREFIX,
            "status": "operational",
            "endpoints": {
                "health": "/api/allergy/health",
                "map_drug": "/api/allergy/map (POST)"
            }
        },
        {
            "name": "AYUSH-WHO Search",
            "base_path": AYUSH_PREFIX,
            "status": "operational",
            "endpoints": {
                "search": "/api/ayush/search/{term}",
                "semantic_search": "/api/ayush/search (POST)",
                "demo_passport": "/api/ayush/demo/health-passport",
                "convenience_search": "/search/{term}",
                "convenience_demo": "/demo/health-passport"
            }
        },
        {
            "name": "Predictive Analytics",
            "base_path": PREDICTIVE_PREFIX,
            "status": "operational",
            "endpoints": {
                "assessment": "/api/predictive/hybrid-assessment (POST)",
                "health": "/api/predictive/health"
            }
        },
        {
            "name": "Claim Validator",
            "base_path": CLAIMS_PREFIX,
            "status": "operational",
            "endpoints": {
                "validate": "/api/claims/validate_claim (POST)",
                "plans": "/api/claims/meta/plans",
                "packages": "/api/claims/meta/packages",
                "convenience_validate": "/validate_claim (POST)",
                "convenience_plans": "/meta/plans",
                "convenience_packages": "/meta/packages"
            }
        }
    ]);

    Json(json!({
        "message": "SwasthyaSetu - Unified Healthcare Platform",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
        "total_services": 4,
        "services": services,
        "quick_tests": [
            "curl \"http://localhost:8000/search/Diabetes\"",
            "curl http://localhost:8000/demo/health-passport",
            "curl http://localhost:8000/meta/plans",
            "curl http://localhost:8000/api/allergy/health"
        ]
    }))
}

/// API overview
pub async fn api_overview() -> Json<Value> {
    Json(json!({
        "message": "SwasthyaSetu API Gateway",
        "available_apis": {
            "allergy_mapping": { "path": ALLERGY_PREFIX, "status": "available" },
            "ayush_search": { "path": AYUSH_PREFIX, "convenience": "/search/{term}", "status": "available" },
            "predictive_analytics": { "path": PREDICTIVE_PREFIX, "status": "available" },
            "claim_validation": { "path": CLAIMS_PREFIX, "convenience": "/validate_claim", "status": "available" }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mounted_keeps_query() {
        let uri: Uri = "/meta/packages?icd_code=E11&limit=5".parse().unwrap();
        assert_eq!(mounted(CLAIMS_PREFIX, &uri), "/api/claims/meta/packages?icd_code=E11&limit=5");
    }

    #[test]
    fn test_mounted_keeps_encoded_path() {
        let uri: Uri = "/search/joint%20pain".parse().unwrap();
        assert_eq!(mounted(AYUSH_PREFIX, &uri), "/api/ayush/search/joint%20pain");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn mounted_only_prepends(term in "[A-Za-z0-9]{1,20}", threshold in proptest::option::of(0u32..200)) {
                let raw = match threshold {
                    Some(t) => format!("/search/{}?threshold={}", term, t),
                    None => format!("/search/{}", term),
                };
                let uri: Uri = raw.parse().unwrap();
                prop_assert_eq!(mounted(AYUSH_PREFIX, &uri), format!("{}{}", AYUSH_PREFIX, raw));
            }
        }
    }
}
