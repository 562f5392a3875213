//! Request-level logging, request IDs, and HTTP metrics.

use std::time::Instant;

use salvo::{
    Request, handler,
    http::{StatusCode, header::HeaderValue},
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, error, info, warn};
use uuid::Uuid;

use super::{
    metrics::{InFlightRequestGuard, observe_request},
    settings,
};

const REQUEST_ID_HEADER: &str = "x-request-id";
const REQUEST_ID_DEPOT_KEY: &str = "request_id";

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let started = Instant::now();
    let _in_flight = InFlightRequestGuard::track();

    let request_id = req
        .header::<String>(REQUEST_ID_HEADER)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(generate_request_id);

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

    set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let remote_addr = req.remote_addr().to_string();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        request_id = %request_id,
        method = %method,
        path = %path,
        remote_addr = %remote_addr,
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let _enter = span.enter();

    let duration = started.elapsed();
    let status = res.status_code.unwrap_or(StatusCode::OK);
    let duration_ms = duration.as_millis();
    let threshold_ms = u128::from(settings::slow_request_threshold_ms());

    span.record("status", status.as_u16());
    span.record("duration_ms", duration_ms);

    observe_request(
        &method,
        route_label(&path),
        status.as_u16(),
        duration.as_secs_f64(),
    );

    info!(status = status.as_u16(), duration_ms, "request.completed");

    if status.is_server_error() {
        error!(
            status = status.as_u16(),
            method = %method,
            path = %path,
            request_id = %request_id,
            "server error response"
        );
    } else if status.is_client_error() {
        warn!(
            status = status.as_u16(),
            method = %method,
            path = %path,
            request_id = %request_id,
            "client error response"
        );
    }

    if duration_ms > threshold_ms {
        warn!(
            method = %method,
            path = %path,
            request_id = %request_id,
            duration_ms,
            threshold_ms,
            "slow request detected"
        );
    }
}

/// Collapse buyer-specific paths so metric labels stay bounded.
fn route_label(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');

    match trimmed {
        "" => "/",
        "/health" | "/healthcheck" | "/metrics" | "/purchase" | "/purchases"
        | "/check_duplicate" | "/check-duplicate" => trimmed,
        _ if trimmed.starts_with("/purchases/") => "/purchases/{buyer}",
        _ if trimmed.starts_with("/api-doc") || trimmed.starts_with("/docs") => "/docs",
        _ => "other",
    }
}

fn set_request_id_header(res: &mut Response, request_id: &str) {
    let header_value = match HeaderValue::from_str(request_id) {
        Ok(value) => value,
        Err(source) => {
            warn!(
                request_id,
                "could not encode request id for response header: {source}"
            );

            return;
        }
    };

    res.headers_mut().insert(REQUEST_ID_HEADER, header_value);
}

fn generate_request_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router, Service,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn ok(res: &mut Response) {
        res.render("ok");
    }

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .hoop(request_logging)
                .push(Router::with_path("health").get(ok)),
        )
    }

    #[test]
    fn buyer_paths_share_one_route_label() {
        assert_eq!(route_label("/purchases/avatar-1"), "/purchases/{buyer}");
        assert_eq!(route_label("/purchases/"), "/purchases");
        assert_eq!(route_label("/check-duplicate"), "/check-duplicate");
        assert_eq!(route_label("/wp-admin"), "other");
    }

    #[tokio::test]
    async fn echoes_supplied_request_id() -> TestResult {
        let mut res = TestClient::get("http://example.com/health")
            .add_header(REQUEST_ID_HEADER, "req-123", true)
            .send(&make_service())
            .await;

        let echoed = res
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        assert_eq!(echoed.as_deref(), Some("req-123"));
        assert_eq!(res.take_string().await?, "ok");

        Ok(())
    }

    #[tokio::test]
    async fn generates_request_id_when_missing() -> TestResult {
        let res = TestClient::get("http://example.com/health")
            .send(&make_service())
            .await;

        let generated = res
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::parse::<Uuid>)
            .transpose()?;

        assert!(generated.is_some(), "expected a generated request id");

        Ok(())
    }
}
