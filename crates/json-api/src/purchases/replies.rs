//! Response rendering for the configured body format.

use std::sync::Arc;

use salvo::{
    http::header::{CONTENT_TYPE, HeaderValue},
    prelude::*,
};
use serde::Serialize;

use crate::{config::output::ResponseFormat, state::State};

/// Render either the plain-text or the JSON body for a reply.
pub(crate) fn render<T>(res: &mut Response, format: ResponseFormat, text: String, json: T)
where
    T: Serialize + Send,
{
    match format {
        ResponseFormat::Text => res.render(Text::Plain(text)),
        ResponseFormat::Json => res.render(Json(json)),
    }
}

/// In text deployments, replace error pages with a single word scripts can match.
#[handler]
pub(crate) async fn text_errors(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    ctrl.call_next(req, depot, res).await;

    let text_mode = depot
        .obtain::<Arc<State>>()
        .is_ok_and(|state| state.response_format == ResponseFormat::Text);

    let Some(word) = res.status_code.and_then(error_word) else {
        return;
    };

    if text_mode {
        res.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        res.body(word.to_string());
    }
}

fn error_word(status: StatusCode) -> Option<&'static str> {
    match status {
        StatusCode::BAD_REQUEST => Some("MISSING"),
        StatusCode::UNAUTHORIZED => Some("UNAUTHORIZED"),
        status if status.is_server_error() => Some("ERR"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_failures_scripts_handle_get_a_word() {
        assert_eq!(error_word(StatusCode::BAD_REQUEST), Some("MISSING"));
        assert_eq!(error_word(StatusCode::UNAUTHORIZED), Some("UNAUTHORIZED"));
        assert_eq!(error_word(StatusCode::SERVICE_UNAVAILABLE), Some("ERR"));
        assert_eq!(error_word(StatusCode::NOT_FOUND), None);
        assert_eq!(error_word(StatusCode::OK), None);
    }
}
