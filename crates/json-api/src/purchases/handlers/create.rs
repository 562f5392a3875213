//! Submit Purchase Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use purchases_app::domain::purchases::{PurchasesServiceError, data::NewPurchase};

use crate::{
    extensions::*,
    observability::record_purchase_outcome,
    purchases::{errors::into_status_error, replies, requests::required},
};

/// Submit Purchase Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatePurchaseRequest {
    /// Avatar that made the purchase. Also accepted as `avatar`.
    #[serde(alias = "avatar")]
    pub buyer: Option<String>,

    /// Purchased product identifier
    pub product: Option<String>,

    /// Vendor that sold the product
    pub vendor: Option<String>,
}

impl TryFrom<CreatePurchaseRequest> for NewPurchase {
    type Error = PurchasesServiceError;

    fn try_from(request: CreatePurchaseRequest) -> Result<Self, Self::Error> {
        Ok(NewPurchase {
            buyer: required("buyer", request.buyer)?,
            product: required("product", request.product)?,
            vendor: required("vendor", request.vendor)?,
        })
    }
}

/// Purchase Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchaseCreatedResponse {
    /// Always `ok`
    pub status: String,

    /// Created purchase UUID
    pub uuid: Uuid,
}

/// Submit Purchase Handler
#[endpoint(
    tags("purchases"),
    summary = "Submit Purchase",
    security(("api_key" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Purchase recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePurchaseRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let purchase = NewPurchase::try_from(json.into_inner()).map_err(into_status_error)?;

    let record = state
        .app
        .purchases
        .submit_purchase(purchase)
        .await
        .map_err(into_status_error)?;

    record_purchase_outcome("submitted");

    info!(
        uuid = %record.uuid,
        buyer = %record.buyer,
        product = %record.product,
        "purchase submitted"
    );

    replies::render(
        res,
        state.response_format,
        "OK".to_string(),
        PurchaseCreatedResponse {
            status: "ok".to_string(),
            uuid: record.uuid.into_uuid(),
        },
    );

    Ok(StatusCode::OK)
}
