//! Auth middleware.

use std::sync::Arc;

use salvo::prelude::*;
use tracing::warn;

use crate::{auth::API_KEY_HEADER, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let authorized = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|key| state.secret.matches(key));

    if !authorized {
        warn!(path = %req.uri().path(), "rejected request with missing or invalid api key");

        res.render(StatusError::unauthorized().brief("Missing or invalid API key"));
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

#[cfg(test)]
mod tests {
    use purchases_app::domain::purchases::MockPurchasesService;
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::{
        config::output::ResponseFormat,
        test_helpers::{TEST_API_KEY, state_with_purchases, strict_purchases_mock},
    };

    use super::*;

    #[salvo::handler]
    async fn protected(res: &mut Response) {
        res.render("granted");
    }

    fn make_service(purchases: MockPurchasesService) -> Service {
        let state = state_with_purchases(purchases, ResponseFormat::Text);

        let router = Router::new()
            .hoop(inject(state))
            .hoop(handler)
            .push(Router::new().get(protected));

        Service::new(router)
    }

    #[tokio::test]
    async fn test_missing_api_key_returns_401() -> TestResult {
        let res = TestClient::get("http://example.com")
            .send(&make_service(strict_purchases_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_api_key_returns_401() -> TestResult {
        let res = TestClient::get("http://example.com")
            .add_header(API_KEY_HEADER, "not-the-secret", true)
            .send(&make_service(strict_purchases_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_matching_api_key_reaches_handler() -> TestResult {
        let mut res = TestClient::get("http://example.com")
            .add_header(API_KEY_HEADER, TEST_API_KEY, true)
            .send(&make_service(strict_purchases_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "granted");

        Ok(())
    }
}
