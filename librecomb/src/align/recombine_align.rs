use crate::alphabet::GAP;
use crate::structs::SubstitutionScores;

use super::structs::{Parent, RecombinationAlignment, RecombinationMatrix, StepShape, TracebackMove};
use super::{narrow_score, AlignError, Score, ScoreSum};

#[inline]
fn lookup<S: SubstitutionScores + ?Sized>(
    substitution_matrix: &S,
    a: u8,
    b: u8,
) -> Result<ScoreSum, AlignError> {
    substitution_matrix
        .score(a, b)
        .map(ScoreSum::from)
        .ok_or_else(|| AlignError::missing_score(a, b))
}

/// Compute an optimal recombination alignment of `query` against the
/// aligned parents `parent_zero` and `parent_one`.
///
/// Every column of the alignment is scored against exactly one of the
/// parents, and `recombination_penalty` is added each time the scored
/// parent changes from one column to the next.
pub fn recombine_align<S: SubstitutionScores + ?Sized>(
    query: &[u8],
    parent_zero: &[u8],
    parent_one: &[u8],
    substitution_matrix: &S,
    recombination_penalty: Score,
) -> Result<RecombinationAlignment, AlignError> {
    let (alignment, _) = recombine_align_with_matrix(
        query,
        parent_zero,
        parent_one,
        substitution_matrix,
        recombination_penalty,
    )?;
    Ok(alignment)
}

/// The same as [`recombine_align`], but the filled
/// DP matrix is handed back along with the alignment.
pub fn recombine_align_with_matrix<S: SubstitutionScores + ?Sized>(
    query: &[u8],
    parent_zero: &[u8],
    parent_one: &[u8],
    substitution_matrix: &S,
    recombination_penalty: Score,
) -> Result<(RecombinationAlignment, RecombinationMatrix), AlignError> {
    let dp_matrix = fill_recombination_matrix(
        query,
        parent_zero,
        parent_one,
        substitution_matrix,
        recombination_penalty,
    )?;

    let alignment = traceback(&dp_matrix, query, [parent_zero, parent_one])?;

    tracing::debug!(
        score = alignment.score,
        columns = alignment.len(),
        "recombination alignment complete"
    );

    Ok((alignment, dp_matrix))
}

/// Fill both parent states of the DP matrix.
pub fn fill_recombination_matrix<S: SubstitutionScores + ?Sized>(
    query: &[u8],
    parent_zero: &[u8],
    parent_one: &[u8],
    substitution_matrix: &S,
    recombination_penalty: Score,
) -> Result<RecombinationMatrix, AlignError> {
    if parent_zero.len() != parent_one.len() {
        return Err(AlignError::InvalidInput(format!(
            "aligned parents must have equal lengths: {} != {}",
            parent_zero.len(),
            parent_one.len()
        )));
    }

    let query_length = query.len();
    let parent_length = parent_zero.len();
    let parents = [parent_zero, parent_one];

    tracing::debug!(
        query_length,
        parent_length,
        recombination_penalty,
        "filling recombination matrix"
    );

    let recombination_penalty = ScoreSum::from(recombination_penalty);
    let mut dp_matrix = RecombinationMatrix::new(query_length, parent_length);

    // the first row: only the parents have been consumed
    for parent_idx in 1..=parent_length {
        for state in Parent::BOTH {
            let column_score = lookup(
                substitution_matrix,
                GAP,
                parents[state.idx()][parent_idx - 1],
            )?;
            let stay = dp_matrix.get_score(state, 0, parent_idx - 1) + column_score;
            let switch = dp_matrix.get_score(state.flip(), 0, parent_idx - 1)
                + column_score
                + recombination_penalty;

            if switch > stay {
                dp_matrix.set(state, 0, parent_idx, switch, TracebackMove::ColumnSwitch);
            } else {
                dp_matrix.set(state, 0, parent_idx, stay, TracebackMove::ColumnStay);
            }
        }
    }

    // the first column: only the query has been consumed
    for query_idx in 1..=query_length {
        let row_score = lookup(substitution_matrix, query[query_idx - 1], GAP)?;
        for state in Parent::BOTH {
            let stay = dp_matrix.get_score(state, query_idx - 1, 0) + row_score;
            let switch = dp_matrix.get_score(state.flip(), query_idx - 1, 0)
                + row_score
                + recombination_penalty;

            if switch > stay {
                dp_matrix.set(state, query_idx, 0, switch, TracebackMove::RowSwitch);
            } else {
                dp_matrix.set(state, query_idx, 0, stay, TracebackMove::RowStay);
            }
        }
    }

    for query_idx in 1..=query_length {
        let query_residue = query[query_idx - 1];
        let row_score = lookup(substitution_matrix, query_residue, GAP)?;

        for parent_idx in 1..=parent_length {
            for state in Parent::BOTH {
                let other = state.flip();
                let parent_residue = parents[state.idx()][parent_idx - 1];
                let diagonal_score = lookup(substitution_matrix, query_residue, parent_residue)?;
                let column_score = lookup(substitution_matrix, GAP, parent_residue)?;

                // these line up with TracebackMove::CANDIDATES
                let candidate_scores: [ScoreSum; 6] = [
                    dp_matrix.get_score(state, query_idx - 1, parent_idx - 1) + diagonal_score,
                    dp_matrix.get_score(state, query_idx - 1, parent_idx) + row_score,
                    dp_matrix.get_score(state, query_idx, parent_idx - 1) + column_score,
                    dp_matrix.get_score(other, query_idx - 1, parent_idx - 1)
                        + diagonal_score
                        + recombination_penalty,
                    dp_matrix.get_score(other, query_idx - 1, parent_idx)
                        + row_score
                        + recombination_penalty,
                    dp_matrix.get_score(other, query_idx, parent_idx - 1)
                        + column_score
                        + recombination_penalty,
                ];

                let mut best_score = candidate_scores[0];
                let mut best_move = TracebackMove::CANDIDATES[0];
                for (&score, traceback_move) in candidate_scores
                    .iter()
                    .zip(TracebackMove::CANDIDATES)
                    .skip(1)
                {
                    // strictly greater: ties keep the earlier candidate
                    if score > best_score {
                        best_score = score;
                        best_move = traceback_move;
                    }
                }

                dp_matrix.set(state, query_idx, parent_idx, best_score, best_move);
            }
        }
    }

    Ok(dp_matrix)
}

/// Walk the traceback moves from the best final cell back to the origin.
///
/// `query` and `parents` must be the sequences that the matrix was filled with.
fn traceback(
    dp_matrix: &RecombinationMatrix,
    query: &[u8],
    parents: [&[u8]; 2],
) -> Result<RecombinationAlignment, AlignError> {
    let query_length = dp_matrix.query_length;
    let parent_length = dp_matrix.parent_length;

    let zero_score = dp_matrix.get_score(Parent::Zero, query_length, parent_length);
    let one_score = dp_matrix.get_score(Parent::One, query_length, parent_length);
    let (mut state, score) = if one_score > zero_score {
        (Parent::One, one_score)
    } else {
        (Parent::Zero, zero_score)
    };
    let score = narrow_score(score)?;

    let capacity = query_length + parent_length;
    let mut query_row: Vec<u8> = Vec::with_capacity(capacity);
    let mut parent_zero_row: Vec<u8> = Vec::with_capacity(capacity);
    let mut parent_one_row: Vec<u8> = Vec::with_capacity(capacity);
    let mut labels: Vec<Parent> = Vec::with_capacity(capacity);

    let mut query_idx = query_length;
    let mut parent_idx = parent_length;

    while query_idx > 0 || parent_idx > 0 {
        let traceback_move = dp_matrix.get_move(state, query_idx, parent_idx);

        match traceback_move.shape() {
            StepShape::Diagonal => {
                query_row.push(query[query_idx - 1]);
                parent_zero_row.push(parents[0][parent_idx - 1]);
                parent_one_row.push(parents[1][parent_idx - 1]);
                query_idx -= 1;
                parent_idx -= 1;
            }
            StepShape::Row => {
                query_row.push(query[query_idx - 1]);
                parent_zero_row.push(GAP);
                parent_one_row.push(GAP);
                query_idx -= 1;
            }
            StepShape::Column => {
                query_row.push(GAP);
                parent_zero_row.push(parents[0][parent_idx - 1]);
                parent_one_row.push(parents[1][parent_idx - 1]);
                parent_idx -= 1;
            }
        }

        // the label is the state before the move is applied
        labels.push(state);

        if traceback_move.is_switch() {
            state = state.flip();
        }
    }

    query_row.reverse();
    parent_zero_row.reverse();
    parent_one_row.reverse();
    labels.reverse();

    Ok(RecombinationAlignment {
        score,
        query_row,
        parent_zero_row,
        parent_one_row,
        parents: labels,
    })
}
