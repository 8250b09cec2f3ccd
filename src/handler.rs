//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, exact path
//! dispatch to the three report routes, 404 default for everything else.

use crate::config::AppState;
use crate::env::EnvSnapshot;
use crate::logger;
use crate::report::{self, ConfigReport, HealthStatus, SecretsReport};
use crate::response;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let uri = req.uri();
    let target = request_target(uri);
    let is_head = *method == Method::HEAD;

    let access_log = state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed);
    if access_log {
        logger::log_request(method, uri, req.version());
    }
    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    // 1. Check HTTP method
    if let Some(resp) = check_http_method(method) {
        return Ok(resp);
    }

    // 2. Capture a fresh snapshot: values are read live per request
    let snapshot = EnvSnapshot::capture();

    // 3. Dispatch by exact request target
    let response = route_request(target, &snapshot, is_head);
    if access_log {
        logger::log_response(response.status().as_u16());
    }
    Ok(response)
}

/// Check HTTP method and return an early response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(response::build_405_response())
        }
    }
}

/// Full request target used for dispatch: path plus query when present.
///
/// Dispatching on the whole target means any query string (even an empty
/// `?`) defeats the exact match and falls through to the 404.
fn request_target(uri: &hyper::Uri) -> &str {
    uri.path_and_query()
        .map_or_else(|| uri.path(), hyper::http::uri::PathAndQuery::as_str)
}

/// Route a request by exact match on the full target.
///
/// Dispatch is a static string match; there are no parameters, prefixes,
/// wildcards, or query handling. Anything unrecognized falls through to
/// the bare 404.
pub fn route_request(target: &str, snapshot: &EnvSnapshot, is_head: bool) -> Response<Full<Bytes>> {
    match target {
        "/health" => {
            response::build_json_response(report::render_compact(&HealthStatus::healthy()), is_head)
        }
        "/config" => response::build_json_response(
            report::render_pretty(&ConfigReport::from_snapshot(snapshot)),
            is_head,
        ),
        "/secrets" => response::build_json_response(
            report::render_pretty(&SecretsReport::from_snapshot(snapshot)),
            is_head,
        ),
        _ => response::build_404_response(),
    }
}
