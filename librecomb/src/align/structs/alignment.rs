use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::align::{score_recombine_align, AlignError, Score};
use crate::alphabet::{remove_all_gap_columns, remove_gaps};
use crate::structs::SubstitutionScores;

use super::trace::{serialize_parent_labels, Parent};

/// The properties that a recombination alignment can fail to satisfy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConformanceError {
    #[error("alignment rows have different lengths: {query}, {parent_zero}, {parent_one}")]
    RowLengthMismatch {
        query: usize,
        parent_zero: usize,
        parent_one: usize,
    },
    #[error("{labels} parent labels for {columns} alignment columns")]
    ParentLabelCount { labels: usize, columns: usize },
    #[error("the query row with gaps removed is not the query sequence")]
    QueryNotPreserved,
    #[error("the row for parent {0} with gaps removed is not the parent sequence")]
    ParentNotPreserved(Parent),
    #[error("the pairwise alignment of the parents is not preserved")]
    ParentAlignmentNotPreserved,
    #[error("computed score ({computed}) does not equal the reported score ({reported})")]
    ScoreMismatch { reported: Score, computed: Score },
    #[error(transparent)]
    Scoring(#[from] AlignError),
}

fn serialize_bytes_as_str<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    String::from_utf8_lossy(bytes).serialize(serializer)
}

/// A global alignment of a query against a pair of aligned
/// parents, where each column is attributed to one parent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RecombinationAlignment {
    /// The optimal score of the alignment
    pub score: Score,
    /// The query row (x)
    #[serde(serialize_with = "serialize_bytes_as_str")]
    pub query_row: Vec<u8>,
    /// The row of the first parent (y0)
    #[serde(serialize_with = "serialize_bytes_as_str")]
    pub parent_zero_row: Vec<u8>,
    /// The row of the second parent (y1)
    #[serde(serialize_with = "serialize_bytes_as_str")]
    pub parent_one_row: Vec<u8>,
    /// The parent responsible for each column
    #[serde(serialize_with = "serialize_parent_labels")]
    pub parents: Vec<Parent>,
}

impl RecombinationAlignment {
    /// The number of columns in the alignment.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn parent_row(&self, parent: Parent) -> &[u8] {
        match parent {
            Parent::Zero => self.parent_zero_row.as_slice(),
            Parent::One => self.parent_one_row.as_slice(),
        }
    }

    /// The three alignment rows: query, parent zero, parent one.
    pub fn rows(&self) -> [&[u8]; 3] {
        [
            self.query_row.as_slice(),
            self.parent_zero_row.as_slice(),
            self.parent_one_row.as_slice(),
        ]
    }

    pub fn parents_string(&self) -> String {
        Parent::labels_to_string(&self.parents)
    }

    /// Re-derive the score of this alignment from its columns and parent labels.
    pub fn rescore<S: SubstitutionScores + ?Sized>(
        &self,
        substitution_matrix: &S,
        recombination_penalty: Score,
    ) -> Result<Score, AlignError> {
        score_recombine_align(
            self.rows(),
            &self.parents,
            substitution_matrix,
            recombination_penalty,
        )
    }

    /// Check that this is a valid alignment of `query` against the aligned parents.
    pub fn check_valid(
        &self,
        query: &[u8],
        parent_zero: &[u8],
        parent_one: &[u8],
    ) -> Result<(), ConformanceError> {
        let num_columns = self.query_row.len();
        if self.parent_zero_row.len() != num_columns || self.parent_one_row.len() != num_columns {
            return Err(ConformanceError::RowLengthMismatch {
                query: num_columns,
                parent_zero: self.parent_zero_row.len(),
                parent_one: self.parent_one_row.len(),
            });
        }

        if self.parents.len() != num_columns {
            return Err(ConformanceError::ParentLabelCount {
                labels: self.parents.len(),
                columns: num_columns,
            });
        }

        if remove_gaps(&self.query_row) != query {
            return Err(ConformanceError::QueryNotPreserved);
        }

        for (parent, input) in Parent::BOTH.into_iter().zip([parent_zero, parent_one]) {
            if remove_gaps(self.parent_row(parent)) != remove_gaps(input) {
                return Err(ConformanceError::ParentNotPreserved(parent));
            }
        }

        let stripped = remove_all_gap_columns(&[
            self.parent_zero_row.as_slice(),
            self.parent_one_row.as_slice(),
        ]);
        if stripped[0] != parent_zero || stripped[1] != parent_one {
            return Err(ConformanceError::ParentAlignmentNotPreserved);
        }

        Ok(())
    }

    /// Check that re-scoring the alignment reproduces its reported score.
    pub fn check_score<S: SubstitutionScores + ?Sized>(
        &self,
        substitution_matrix: &S,
        recombination_penalty: Score,
    ) -> Result<(), ConformanceError> {
        let computed = self.rescore(substitution_matrix, recombination_penalty)?;
        if computed != self.score {
            return Err(ConformanceError::ScoreMismatch {
                reported: self.score,
                computed,
            });
        }
        Ok(())
    }

    /// Render the alignment as blocks of `width` columns: the three rows, each
    /// prefixed by its right-aligned name, and the parent labels beneath them.
    pub fn ali_string(&self, names: [&str; 3], width: usize) -> String {
        let width = width.max(1);
        let name_width = names.iter().map(|name| name.len()).max().unwrap_or(0);
        let parents = self.parents_string();

        let labelled_rows: [(&str, &[u8]); 4] = [
            (names[0], self.query_row.as_slice()),
            (names[1], self.parent_zero_row.as_slice()),
            (names[2], self.parent_one_row.as_slice()),
            ("", parents.as_bytes()),
        ];

        let mut ali_string = format!("Score: {}\n", self.score);

        // the rows may have been built by hand, so each is sliced within its own length
        let num_columns = labelled_rows
            .iter()
            .map(|(_, row)| row.len())
            .max()
            .unwrap_or(0);

        let mut start_offset: usize = 0;
        while start_offset < num_columns {
            let end_offset = start_offset + width;

            for (name, row) in labelled_rows.iter() {
                let row_end = end_offset.min(row.len());
                let row_start = start_offset.min(row_end);
                ali_string.push_str(&format!(
                    "{:>W$} {}\n",
                    name,
                    String::from_utf8_lossy(&row[row_start..row_end]),
                    W = name_width
                ));
            }
            ali_string.push('\n');

            start_offset += width;
        }

        ali_string
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::SubstitutionMatrix;
    use assert2::assert;

    fn small_alignment() -> RecombinationAlignment {
        RecombinationAlignment {
            score: 15,
            query_row: b"DDM-M".to_vec(),
            parent_zero_row: b"MMM-M".to_vec(),
            parent_one_row: b"DDDDD".to_vec(),
            parents: Parent::parse_labels("11000").unwrap(),
        }
    }

    #[test]
    fn test_check_valid() {
        let ali = small_alignment();
        assert!(ali.check_valid(b"DDMM", b"MMM-M", b"DDDDD") == Ok(()));

        assert!(
            ali.check_valid(b"DDM", b"MMM-M", b"DDDDD") == Err(ConformanceError::QueryNotPreserved)
        );
        assert!(
            ali.check_valid(b"DDMM", b"MMMM", b"DDDDD")
                == Err(ConformanceError::ParentAlignmentNotPreserved)
        );
        assert!(
            ali.check_valid(b"DDMM", b"MM-MM", b"DDDDD")
                == Err(ConformanceError::ParentAlignmentNotPreserved)
        );
        assert!(
            ali.check_valid(b"DDMM", b"MMM-M", b"DDDD")
                == Err(ConformanceError::ParentNotPreserved(Parent::One))
        );
    }

    #[test]
    fn test_check_valid_lengths() {
        let mut ali = small_alignment();
        ali.parents.pop();
        assert!(
            ali.check_valid(b"DDMM", b"MMM-M", b"DDDDD")
                == Err(ConformanceError::ParentLabelCount {
                    labels: 4,
                    columns: 5
                })
        );

        let mut ali = small_alignment();
        ali.parent_one_row.push(b'D');
        assert!(let Err(ConformanceError::RowLengthMismatch { .. }) =
            ali.check_valid(b"DDMM", b"MMM-M", b"DDDDDD"));
    }

    #[test]
    fn test_check_score() -> anyhow::Result<()> {
        let matrix = SubstitutionMatrix::blosum62()?.with_gap_score(-11);
        let mut ali = small_alignment();
        assert!(ali.check_score(&matrix, -7) == Ok(()));

        ali.score = 16;
        assert!(
            ali.check_score(&matrix, -7)
                == Err(ConformanceError::ScoreMismatch {
                    reported: 16,
                    computed: 15
                })
        );
        Ok(())
    }

    #[test]
    fn test_ali_string() {
        let ali = small_alignment();
        let expected = "Score: 15\n x DDM-M\ny0 MMM-M\ny1 DDDDD\n   11000\n\n";
        assert!(ali.ali_string(["x", "y0", "y1"], 80) == expected);
    }

    #[test]
    fn test_ali_string_wraps() {
        let ali = small_alignment();
        let expected = "Score: 15\n\
                        q DDM\n\
                        a MMM\n\
                        b DDD\n  110\n\n\
                        q -M\n\
                        a -M\n\
                        b DD\n  00\n\n";
        assert!(ali.ali_string(["q", "a", "b"], 3) == expected);
    }

    #[test]
    fn test_ali_string_uneven_rows() -> anyhow::Result<()> {
        let mut ali = small_alignment();
        ali.parent_one_row.truncate(2);
        ali.parents = Parent::parse_labels("110")?;

        let expected = "Score: 15\n\
                        x DDM\n\
                        y MMM\n\
                        z DD\n  110\n\n\
                        x -M\n\
                        y -M\n\
                        z \n  \n\n";
        assert!(ali.ali_string(["x", "y", "z"], 3) == expected);
        Ok(())
    }

    #[test]
    fn test_empty_ali_string() {
        let ali = RecombinationAlignment::default();
        assert!(ali.ali_string(["x", "y0", "y1"], 80) == "Score: 0\n");
    }

    #[test]
    fn test_json() -> anyhow::Result<()> {
        let json = serde_json::to_value(small_alignment())?;
        assert!(json["score"] == 15);
        assert!(json["query_row"] == "DDM-M");
        assert!(json["parent_one_row"] == "DDDDD");
        assert!(json["parents"] == "11000");
        Ok(())
    }
}
