//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use purchases_app::{
    context::AppContext,
    domain::purchases::{
        MockPurchasesService, format::PurchaseFormatter, records::PurchaseRecord,
    },
};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{auth::SharedSecret, config::output::ResponseFormat, state::State};

pub(crate) const TEST_API_KEY: &str = "test-shared-secret";

pub(crate) fn strict_purchases_mock() -> MockPurchasesService {
    let mut purchases = MockPurchasesService::new();

    purchases.expect_submit_purchase().never();
    purchases.expect_check_and_maybe_insert().never();
    purchases.expect_list_purchases().never();

    purchases
}

pub(crate) fn state_with_purchases(
    purchases: MockPurchasesService,
    response_format: ResponseFormat,
) -> Arc<State> {
    Arc::new(State::new(
        AppContext {
            purchases: Arc::new(purchases),
        },
        SharedSecret::new(TEST_API_KEY.to_string()),
        response_format,
        PurchaseFormatter::default(),
    ))
}

pub(crate) fn purchases_service(
    purchases: MockPurchasesService,
    response_format: ResponseFormat,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_purchases(purchases, response_format)))
            .push(route),
    )
}

pub(crate) fn make_record(buyer: &str, product: &str, vendor: &str) -> PurchaseRecord {
    PurchaseRecord {
        uuid: Uuid::nil().into(),
        buyer: buyer.to_string(),
        product: product.to_string(),
        vendor: vendor.to_string(),
        created_at: Timestamp::UNIX_EPOCH,
    }
}
