use thiserror::Error;

/// The ways that building or re-scoring a recombination alignment can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    /// The inputs do not describe a valid alignment problem,
    /// e.g. the parental sequences have different lengths.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The substitution matrix has no score for a pair of symbols that was needed.
    #[error("substitution matrix has no score for the pair ('{a}', '{b}')")]
    MissingScore { a: char, b: char },
    /// A parent label was something other than '0' or '1'.
    #[error("invalid parent label: '{0}' (expected '0' or '1')")]
    InvalidParentLabel(char),
}

impl AlignError {
    pub(crate) fn missing_score(a: u8, b: u8) -> Self {
        AlignError::MissingScore {
            a: char::from(a),
            b: char::from(b),
        }
    }
}
