/// The type of every alignment score. All substitution
/// matrices and penalties are integer valued.
pub type Score = i32;

/// DP cells and running totals are accumulated in this wider
/// type, so sums of extreme scores can't overflow.
pub type ScoreSum = i64;

/// Narrow an accumulated total back to a `Score`.
pub(crate) fn narrow_score(total: ScoreSum) -> Result<Score, AlignError> {
    Score::try_from(total).map_err(|_| {
        AlignError::InvalidInput(format!("alignment score {total} does not fit in a score"))
    })
}

pub mod structs;

mod error;
pub use error::AlignError;

mod recombine_align;
pub use recombine_align::{fill_recombination_matrix, recombine_align, recombine_align_with_matrix};

mod scoring;
pub use scoring::score_recombine_align;
