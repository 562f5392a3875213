//! Purchase Index Handlers

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use purchases_app::domain::purchases::{
    data::{Page, PurchaseFilter},
    records::PurchaseRecord,
};

use crate::{
    extensions::*,
    purchases::{errors::into_status_error, replies, requests::required},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchaseResponse {
    pub uuid: Uuid,
    pub buyer: String,
    pub product: String,
    pub vendor: String,

    /// RFC 3339 insert time
    pub created_at: String,
}

impl From<PurchaseRecord> for PurchaseResponse {
    fn from(record: PurchaseRecord) -> Self {
        Self {
            uuid: record.uuid.into_uuid(),
            buyer: record.buyer,
            product: record.product,
            vendor: record.vendor,
            created_at: record.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchasesResponse {
    /// Purchases, most recent first
    pub purchases: Vec<PurchaseResponse>,

    /// The same purchases in the delimited text form
    pub line: String,
}

/// Filters and paging read from the query string.
#[derive(Debug)]
struct ListQuery {
    filter: PurchaseFilter,
    page: Page,
}

impl ListQuery {
    fn from_request(req: &Request) -> Result<Self, StatusError> {
        let page = req.paging_value("page")?;
        let per_page = match req.paging_value("per")? {
            Some(per) => Some(per),
            None => req.paging_value("per_page")?,
        };

        Ok(Self {
            filter: PurchaseFilter {
                product: req.query_text("product"),
                vendor: req
                    .query_text("vendor")
                    .or_else(|| req.query_text("storeName")),
            },
            page: Page::new(page, per_page),
        })
    }
}

/// List Purchases For Buyer Handler
///
/// Returns a buyer's purchases, most recent first.
#[endpoint(
    tags("purchases"),
    summary = "List Purchases For Buyer",
    security(("api_key" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Purchases, possibly none"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn for_buyer(
    buyer: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let query = ListQuery::from_request(req)?;

    list(&state, buyer.into_inner(), query, res).await
}

/// List Purchases Handler
///
/// Same as the path form, with the buyer given as the `user` query parameter.
#[endpoint(
    tags("purchases"),
    summary = "List Purchases",
    security(("api_key" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Purchases, possibly none"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let buyer = required("user", req.query_text("user")).map_err(into_status_error)?;
    let query = ListQuery::from_request(req)?;

    list(&state, buyer, query, res).await
}

async fn list(
    state: &Arc<State>,
    buyer: String,
    query: ListQuery,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let records = state
        .app
        .purchases
        .list_purchases(buyer, query.filter, query.page)
        .await
        .map_err(into_status_error)?;

    let line = state.formatter.format(&records);

    replies::render(
        res,
        state.response_format,
        line.clone(),
        PurchasesResponse {
            purchases: records.into_iter().map(Into::into).collect(),
            line,
        },
    );

    Ok(StatusCode::OK)
}
