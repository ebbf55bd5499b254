use thiserror::Error;

/// Internal faults of the pricing core.
///
/// None of these ever reach a caller of `estimate`: missing input and unknown
/// categories are resolved by defaulting at the lookup site, and computation
/// failures trigger the fixed fallback price. The estimator's contract is
/// "always produces a number".
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EstimateError {
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("unknown {kind}: `{key}`")]
    UnknownCategory { kind: &'static str, key: String },
    #[error("computation failure: {0}")]
    Computation(String),
}

#[cfg(test)]
mod tests {
    use super::EstimateError;

    #[test]
    fn unknown_category_names_both_kind_and_key() {
        let error = EstimateError::UnknownCategory { kind: "region", key: "atlantis".to_string() };
        assert_eq!(error.to_string(), "unknown region: `atlantis`");
    }
}
