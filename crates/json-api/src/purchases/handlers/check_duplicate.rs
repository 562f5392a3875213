//! Check Duplicate Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use purchases_app::domain::purchases::{
    PurchasesServiceError,
    data::NewPurchase,
    records::Decision,
};

use crate::{
    extensions::*,
    observability::record_purchase_outcome,
    purchases::{
        errors::into_status_error,
        replies,
        requests::{first_present, required},
    },
};

/// Check Duplicate Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckDuplicateRequest {
    /// Avatar receiving the product
    pub receiver: Option<String>,

    /// Product identifier
    pub product: Option<String>,

    /// Vendor granting the product
    pub vendor: Option<String>,

    /// Avatar that paid, used as the vendor when none is given. A vendor or
    /// giver is only required when the grant has to be recorded.
    pub giver: Option<String>,

    /// Amount paid; logged only
    pub amount: Option<i64>,
}

impl TryFrom<CheckDuplicateRequest> for NewPurchase {
    type Error = PurchasesServiceError;

    fn try_from(request: CheckDuplicateRequest) -> Result<Self, Self::Error> {
        Ok(NewPurchase {
            buyer: required("receiver", request.receiver)?,
            product: required("product", request.product)?,
            vendor: first_present([request.vendor, request.giver]).unwrap_or_default(),
        })
    }
}

/// Check Duplicate Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DuplicateDecisionResponse {
    /// `duplicate` or `inserted`
    pub decision: String,
}

/// Check Duplicate Handler
///
/// Grants the product to the receiver unless they already hold it.
#[endpoint(
    tags("purchases"),
    summary = "Check Duplicate And Insert",
    security(("api_key" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Decision reached"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckDuplicateRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let request = json.into_inner();
    let amount = request.amount;
    let grant = NewPurchase::try_from(request).map_err(into_status_error)?;

    info!(
        receiver = %grant.buyer,
        product = %grant.product,
        amount,
        "checking for duplicate purchase"
    );

    let decision = state
        .app
        .purchases
        .check_and_maybe_insert(grant)
        .await
        .map_err(into_status_error)?;

    record_purchase_outcome(decision.as_str());

    let text = match decision {
        Decision::Duplicate => "DUPLICATE",
        Decision::Inserted => "OK",
    };

    replies::render(
        res,
        state.response_format,
        text.to_string(),
        DuplicateDecisionResponse {
            decision: decision.as_str().to_string(),
        },
    );

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use purchases_app::domain::purchases::MockPurchasesService;

    use crate::{config::output::ResponseFormat, test_helpers::purchases_service};

    use super::*;

    fn make_service(purchases: MockPurchasesService, format: ResponseFormat) -> Service {
        purchases_service(
            purchases,
            format,
            Router::with_path("check_duplicate").post(handler),
        )
    }

    fn expect_decision(
        purchases: &mut MockPurchasesService,
        vendor: &'static str,
        decision: Decision,
    ) {
        purchases
            .expect_check_and_maybe_insert()
            .once()
            .withf(move |grant| {
                *grant == NewPurchase {
                    buyer: "receiver-1".to_string(),
                    product: "hat".to_string(),
                    vendor: vendor.to_string(),
                }
            })
            .return_once(move |_| Ok(decision));

        purchases.expect_submit_purchase().never();
        purchases.expect_list_purchases().never();
    }

    #[tokio::test]
    async fn test_duplicate_returns_duplicate_text() -> TestResult {
        let mut purchases = MockPurchasesService::new();

        expect_decision(&mut purchases, "shop", Decision::Duplicate);

        let mut res = TestClient::post("http://example.com/check_duplicate")
            .json(&json!({ "receiver": "receiver-1", "product": "hat", "vendor": "shop" }))
            .send(&make_service(purchases, ResponseFormat::Text))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "DUPLICATE");

        Ok(())
    }

    #[tokio::test]
    async fn test_inserted_returns_ok_text() -> TestResult {
        let mut purchases = MockPurchasesService::new();

        expect_decision(&mut purchases, "shop", Decision::Inserted);

        let mut res = TestClient::post("http://example.com/check_duplicate")
            .json(&json!({
                "receiver": "receiver-1",
                "product": "hat",
                "vendor": "shop",
                "amount": 250
            }))
            .send(&make_service(purchases, ResponseFormat::Text))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "OK");

        Ok(())
    }

    #[tokio::test]
    async fn test_giver_is_used_when_vendor_is_absent() -> TestResult {
        let mut purchases = MockPurchasesService::new();

        expect_decision(&mut purchases, "giver-1", Decision::Inserted);

        let body: DuplicateDecisionResponse =
            TestClient::post("http://example.com/check_duplicate")
                .json(&json!({ "receiver": "receiver-1", "product": "hat", "giver": "giver-1" }))
                .send(&make_service(purchases, ResponseFormat::Json))
                .await
                .take_json()
                .await?;

        assert_eq!(body.decision, "inserted");

        Ok(())
    }

    #[tokio::test]
    async fn test_receiver_and_product_alone_reach_the_check() -> TestResult {
        let mut purchases = MockPurchasesService::new();

        expect_decision(&mut purchases, "", Decision::Duplicate);

        let mut res = TestClient::post("http://example.com/check_duplicate")
            .json(&json!({ "receiver": "receiver-1", "product": "hat" }))
            .send(&make_service(purchases, ResponseFormat::Text))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "DUPLICATE");

        Ok(())
    }

    #[tokio::test]
    async fn test_new_grant_without_vendor_returns_400() -> TestResult {
        let mut purchases = MockPurchasesService::new();

        purchases
            .expect_check_and_maybe_insert()
            .once()
            .return_once(|_| Err(PurchasesServiceError::MissingField("vendor")));

        purchases.expect_submit_purchase().never();
        purchases.expect_list_purchases().never();

        let res = TestClient::post("http://example.com/check_duplicate")
            .json(&json!({ "receiver": "receiver-1", "product": "hat" }))
            .send(&make_service(purchases, ResponseFormat::Text))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_receiver_returns_400() -> TestResult {
        let mut purchases = MockPurchasesService::new();

        purchases.expect_check_and_maybe_insert().never();
        purchases.expect_submit_purchase().never();
        purchases.expect_list_purchases().never();

        let res = TestClient::post("http://example.com/check_duplicate")
            .json(&json!({ "product": "hat", "vendor": "shop" }))
            .send(&make_service(purchases, ResponseFormat::Text))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
