//! Purchase Errors

use salvo::http::StatusError;
use tracing::error;

use purchases_app::domain::purchases::PurchasesServiceError;

pub(crate) fn into_status_error(error: PurchasesServiceError) -> StatusError {
    match error {
        PurchasesServiceError::MissingField(field) => {
            StatusError::bad_request().brief(format!("Missing required field: {field}"))
        }
        PurchasesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid purchase payload")
        }
        PurchasesServiceError::StoreUnavailable(source) => {
            error!("purchase store failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn validation_errors_map_to_400() {
        let missing = into_status_error(PurchasesServiceError::MissingField("product"));
        let invalid = into_status_error(PurchasesServiceError::InvalidData);

        assert_eq!(missing.code, StatusCode::BAD_REQUEST);
        assert_eq!(invalid.code, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_failures_map_to_500() {
        let error = into_status_error(PurchasesServiceError::StoreUnavailable(
            sqlx::Error::PoolTimedOut,
        ));

        assert_eq!(error.code, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
