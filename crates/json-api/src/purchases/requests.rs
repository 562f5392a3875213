//! Request field helpers.

use purchases_app::domain::purchases::PurchasesServiceError;

/// Take a present, non-blank field or report it as missing.
pub(crate) fn required(
    field: &'static str,
    value: Option<String>,
) -> Result<String, PurchasesServiceError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or(PurchasesServiceError::MissingField(field))
}

/// First present, non-blank value among the candidates.
pub(crate) fn first_present(candidates: [Option<String>; 2]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_count_as_missing() {
        let result = required("vendor", Some("  ".to_string()));

        assert!(matches!(
            result,
            Err(PurchasesServiceError::MissingField("vendor"))
        ));
    }

    #[test]
    fn first_present_skips_blank_candidates() {
        let value = first_present([Some(String::new()), Some("giver".to_string())]);

        assert_eq!(value.as_deref(), Some("giver"));
    }
}
