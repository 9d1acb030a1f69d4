use crate::validate::ValidationError;

/// Errors during value or test-case generation.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("invalid node configuration: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),

    #[error("{kind} node has an unusable random domain (empty, inverted or non-finite)")]
    UnusableRandomDomain { kind: &'static str },

    #[error(
        "{kind} node reached only {reached} of {target} unique entries after {redraws} redraws"
    )]
    UniqueDrawExhausted {
        kind: &'static str,
        target: usize,
        reached: usize,
        redraws: u64,
    },

    #[error(
        "domain exhausted: accepted {accepted} of {requested} random cases, \
         then {retries} consecutive draws were duplicates or exhaustive cases"
    )]
    DomainExhausted {
        requested: usize,
        accepted: usize,
        retries: u64,
    },

    #[error("{kind} node drew size {size}, above the random size limit of {limit}")]
    RandomSizeTooLarge {
        kind: &'static str,
        size: usize,
        limit: usize,
    },

    #[error("exhaustive {what} exceed the limit of {limit}")]
    ExhaustiveTooLarge { what: &'static str, limit: usize },

    #[error("random augmentation exceeded its deadline after {elapsed_ms} ms ({accepted} cases accepted)")]
    DeadlineExceeded { elapsed_ms: u64, accepted: usize },
}

impl From<Vec<ValidationError>> for GenerateError {
    fn from(errors: Vec<ValidationError>) -> Self {
        GenerateError::Invalid(errors)
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
