use std::io::Write;

use anyhow::Result;

use crate::align::ScoreSum;

use super::trace::{Parent, TracebackMove};

/// The score and traceback matrices for both parent states, stored as flat vectors.
#[derive(Default, Clone)]
pub struct RecombinationMatrix {
    /// The length of the query sequence (n)
    pub query_length: usize,
    /// The number of aligned parent columns (m)
    pub parent_length: usize,
    /// The best score of each cell.
    //
    // the data is stored in the following pattern:
    //     [
    //
    //         s0_(0, 0), s0_(0, 1), ..., s0_(0, M),
    //         ...
    //         s0_(N, 0), s0_(N, 1), ..., s0_(N, M),
    //         s1_(0, 0), s1_(0, 1), ..., s1_(0, M),
    //         ...
    //         s1_(N, 0), s1_(N, 1), ..., s1_(N, M)
    //
    //     ]
    //
    // where:
    //
    //     N:         <query_length>
    //     M:         <parent_length>
    //     sk_(i, j): the score at cell (i, j) while parent k is active
    //
    scores: Vec<ScoreSum>,
    /// The traceback move of each cell, in the same layout as the scores.
    moves: Vec<TracebackMove>,
}

impl RecombinationMatrix {
    pub fn new(query_length: usize, parent_length: usize) -> Self {
        let size = 2 * (query_length + 1) * (parent_length + 1);
        RecombinationMatrix {
            query_length,
            parent_length,
            scores: vec![0; size],
            moves: vec![TracebackMove::Origin; size],
        }
    }

    #[inline]
    fn idx(&self, state: Parent, query_idx: usize, parent_idx: usize) -> usize {
        debug_assert!(query_idx <= self.query_length);
        debug_assert!(parent_idx <= self.parent_length);
        (state.idx() * (self.query_length + 1) + query_idx) * (self.parent_length + 1) + parent_idx
    }

    #[inline]
    pub fn get_score(&self, state: Parent, query_idx: usize, parent_idx: usize) -> ScoreSum {
        self.scores[self.idx(state, query_idx, parent_idx)]
    }

    #[inline]
    pub fn get_move(&self, state: Parent, query_idx: usize, parent_idx: usize) -> TracebackMove {
        self.moves[self.idx(state, query_idx, parent_idx)]
    }

    #[inline]
    pub fn set(
        &mut self,
        state: Parent,
        query_idx: usize,
        parent_idx: usize,
        score: ScoreSum,
        traceback_move: TracebackMove,
    ) {
        let idx = self.idx(state, query_idx, parent_idx);
        self.scores[idx] = score;
        self.moves[idx] = traceback_move;
    }

    /// Write both score matrices, each followed by its traceback matrix.
    pub fn dump(&self, out: &mut impl Write) -> Result<()> {
        let query_idx_width = self.query_length.to_string().len();
        let column_width = 6;

        for state in Parent::BOTH {
            writeln!(out, "M[{state}]")?;
            self.dump_header(out, query_idx_width, column_width)?;
            for query_idx in 0..=self.query_length {
                write!(out, "{:w$} ", query_idx, w = query_idx_width)?;
                for parent_idx in 0..=self.parent_length {
                    write!(
                        out,
                        "{:w$} ",
                        self.get_score(state, query_idx, parent_idx),
                        w = column_width
                    )?;
                }
                writeln!(out)?;
            }
            writeln!(out)?;

            writeln!(out, "T[{state}]")?;
            self.dump_header(out, query_idx_width, column_width)?;
            for query_idx in 0..=self.query_length {
                write!(out, "{:w$} ", query_idx, w = query_idx_width)?;
                for parent_idx in 0..=self.parent_length {
                    write!(
                        out,
                        "{:>w$} ",
                        self.get_move(state, query_idx, parent_idx).code(),
                        w = column_width
                    )?;
                }
                writeln!(out)?;
            }
            writeln!(out)?;
        }

        Ok(())
    }

    fn dump_header(
        &self,
        out: &mut impl Write,
        query_idx_width: usize,
        column_width: usize,
    ) -> Result<()> {
        write!(out, "{}", " ".repeat(query_idx_width + 1))?;
        for parent_idx in 0..=self.parent_length {
            write!(out, "{:w$} ", parent_idx, w = column_width)?;
        }
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::assert;

    #[test]
    fn test_states_do_not_overlap() {
        let mut matrix = RecombinationMatrix::new(2, 3);
        matrix.set(Parent::Zero, 2, 3, 7, TracebackMove::RowStay);
        matrix.set(Parent::One, 0, 0, -4, TracebackMove::ColumnSwitch);

        assert!(matrix.get_score(Parent::Zero, 2, 3) == 7);
        assert!(matrix.get_move(Parent::Zero, 2, 3) == TracebackMove::RowStay);
        assert!(matrix.get_score(Parent::One, 0, 0) == -4);
        assert!(matrix.get_score(Parent::One, 2, 3) == 0);
        assert!(matrix.get_score(Parent::Zero, 0, 0) == 0);
        assert!(matrix.get_move(Parent::Zero, 0, 0) == TracebackMove::Origin);
    }

    #[test]
    fn test_dump() -> anyhow::Result<()> {
        let mut matrix = RecombinationMatrix::new(1, 1);
        matrix.set(Parent::One, 1, 1, 12, TracebackMove::DiagonalSwitch);

        let mut out: Vec<u8> = vec![];
        matrix.dump(&mut out)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("M[0]"));
        assert!(text.contains("T[1]"));
        assert!(text.contains("    12"));
        assert!(text.contains("     d"));
        Ok(())
    }
}
