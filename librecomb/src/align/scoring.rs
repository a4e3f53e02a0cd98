use crate::structs::SubstitutionScores;

use super::structs::Parent;
use super::{narrow_score, AlignError, Score, ScoreSum};

/// Score a recombination alignment given its three rows
/// (query, parent zero, parent one) and a parent label for every column.
///
/// Each column scores the query symbol against the symbol of the labeled
/// parent, and every change of label between adjacent columns adds
/// `recombination_penalty`.
pub fn score_recombine_align<S: SubstitutionScores + ?Sized>(
    alignment_rows: [&[u8]; 3],
    parents: &[Parent],
    substitution_matrix: &S,
    recombination_penalty: Score,
) -> Result<Score, AlignError> {
    let [query_row, parent_zero_row, parent_one_row] = alignment_rows;
    let num_columns = query_row.len();

    if parent_zero_row.len() != num_columns || parent_one_row.len() != num_columns {
        return Err(AlignError::InvalidInput(format!(
            "alignment rows must have equal lengths: {}, {}, {}",
            num_columns,
            parent_zero_row.len(),
            parent_one_row.len()
        )));
    }

    if parents.len() != num_columns {
        return Err(AlignError::InvalidInput(format!(
            "expected {} parent labels, found {}",
            num_columns,
            parents.len()
        )));
    }

    let parent_rows = [parent_zero_row, parent_one_row];
    let recombination_penalty = ScoreSum::from(recombination_penalty);
    let mut score: ScoreSum = 0;
    let mut previous: Option<Parent> = None;

    for (col_idx, &parent) in parents.iter().enumerate() {
        let a = query_row[col_idx];
        let b = parent_rows[parent.idx()][col_idx];
        score += substitution_matrix
            .score(a, b)
            .map(ScoreSum::from)
            .ok_or_else(|| AlignError::missing_score(a, b))?;

        if previous.is_some_and(|p| p != parent) {
            score += recombination_penalty;
        }
        previous = Some(parent);
    }

    narrow_score(score)
}
