use std::collections::HashMap;
use std::path::Path;

use crate::align::Score;
use crate::alphabet::{GAP, UTF8_HASH};
use anyhow::{Context, Result};
use lazy_static::lazy_static;
use phf::phf_map;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref INTEGER_RE: Regex = Regex::new(r"^[-+]?\d+$").unwrap();
}

/// An Error that is thrown when a matrix file has no header row of column symbols.
#[derive(Error, Debug)]
#[error("substitution matrix has no header row")]
struct MatrixHeaderError;

/// An Error that is thrown when a score token isn't an integer.
#[derive(Error, Debug)]
#[error("unable to parse \"{token}\" as an integer score")]
struct ScoreTokenError {
    token: String,
}

/// An Error that is thrown when a matrix row doesn't line up with the header.
#[derive(Error, Debug)]
#[error("expected a row symbol followed by {expected} scores, found {found} tokens")]
struct MatrixRowLengthError {
    expected: usize,
    found: usize,
}

#[derive(Error, Debug)]
#[error("unknown built-in substitution matrix: {name}")]
pub struct UnknownMatrixError {
    name: String,
}

const BLOSUM_62: &str = "\
#  Matrix made by matblas from blosum62.iij
#  * column uses minimum score
#  BLOSUM Clustered Scoring Matrix in 1/2 Bit Units
#  Blocks Database = /data/blocks_5.0/blocks.dat
#  Cluster Percentage: >= 62
#  Entropy =   0.6979, Expected =  -0.5209
   A  R  N  D  C  Q  E  G  H  I  L  K  M  F  P  S  T  W  Y  V  B  Z  X  *
A  4 -1 -2 -2  0 -1 -1  0 -2 -1 -1 -1 -1 -2 -1  1  0 -3 -2  0 -2 -1  0 -4
R -1  5  0 -2 -3  1  0 -2  0 -3 -2  2 -1 -3 -2 -1 -1 -3 -2 -3 -1  0 -1 -4
N -2  0  6  1 -3  0  0  0  1 -3 -3  0 -2 -3 -2  1  0 -4 -2 -3  3  0 -1 -4
D -2 -2  1  6 -3  0  2 -1 -1 -3 -4 -1 -3 -3 -1  0 -1 -4 -3 -3  4  1 -1 -4
C  0 -3 -3 -3  9 -3 -4 -3 -3 -1 -1 -3 -1 -2 -3 -1 -1 -2 -2 -1 -3 -3 -2 -4
Q -1  1  0  0 -3  5  2 -2  0 -3 -2  1  0 -3 -1  0 -1 -2 -1 -2  0  3 -1 -4
E -1  0  0  2 -4  2  5 -2  0 -3 -3  1 -2 -3 -1  0 -1 -3 -2 -2  1  4 -1 -4
G  0 -2  0 -1 -3 -2 -2  6 -2 -4 -4 -2 -3 -3 -2  0 -2 -2 -3 -3 -1 -2 -1 -4
H -2  0  1 -1 -3  0  0 -2  8 -3 -3 -1 -2 -1 -2 -1 -2 -2  2 -3  0  0 -1 -4
I -1 -3 -3 -3 -1 -3 -3 -4 -3  4  2 -3  1  0 -3 -2 -1 -3 -1  3 -3 -3 -1 -4
L -1 -2 -3 -4 -1 -2 -3 -4 -3  2  4 -2  2  0 -3 -2 -1 -2 -1  1 -4 -3 -1 -4
K -1  2  0 -1 -3  1  1 -2 -1 -3 -2  5 -1 -3 -1  0 -1 -3 -2 -2  0  1 -1 -4
M -1 -1 -2 -3 -1  0 -2 -3 -2  1  2 -1  5  0 -2 -1 -1 -1 -1  1 -3 -1 -1 -4
F -2 -3 -3 -3 -2 -3 -3 -3 -1  0  0 -3  0  6 -4 -2 -2  1  3 -1 -3 -3 -1 -4
P -1 -2 -2 -1 -3 -1 -1 -2 -2 -3 -3 -1 -2 -4  7 -1 -1 -4 -3 -2 -2 -1 -2 -4
S  1 -1  1  0 -1  0  0  0 -1 -2 -2  0 -1 -2 -1  4  1 -3 -2 -2  0  0  0 -4
T  0 -1  0 -1 -1 -1 -1 -2 -2 -1 -1 -1 -1 -2 -1  1  5 -2 -2  0 -1 -1  0 -4
W -3 -3 -4 -4 -2 -2 -3 -2 -2 -3 -2 -3 -1  1 -4 -3 -2 11  2 -3 -4 -3 -2 -4
Y -2 -2 -2 -3 -2 -1 -2 -3  2 -1 -1 -2 -1  3 -3 -2 -2  2  7 -1 -3 -2 -1 -4
V  0 -3 -3 -3 -1 -2 -2 -3 -3  3  1 -2  1 -1 -2 -2  0 -3 -1  4 -3 -2 -1 -4
B -2 -1  3  4 -3  0  1 -1  0 -3 -4  0 -3 -3 -2  0 -1 -4 -3 -3  4  1 -1 -4
Z -1  0  0  1 -3  3  4 -2  0 -3 -3  1 -1 -3 -1  0 -1 -3 -2 -2  1  4 -1 -4
X  0 -1 -1 -1 -2 -1 -1 -1 -1 -1 -1 -1 -1 -1 -2  0  0 -2 -1 -1 -1 -1 -1 -4
* -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4 -4  1
";

const DNA_SIMPLE: &str = "\
#  match = +1, mismatch = -1
   A  C  G  T
A  1 -1 -1 -1
C -1  1 -1 -1
G -1 -1  1 -1
T -1 -1 -1  1
";

/// Matrices that ship with the library, in NCBI text format.
pub const BUILTIN_MATRICES: phf::Map<&'static str, &'static str> = phf_map! {
    "BLOSUM62" => BLOSUM_62,
    "DNA_SIMPLE" => DNA_SIMPLE,
};

/// Anything that can score an ordered pair of symbols (either of which may be a gap).
///
/// Returning `None` means the pair has no score; the aligner and
/// scorer turn that into a `MissingScore` error.
pub trait SubstitutionScores {
    fn score(&self, a: u8, b: u8) -> Option<Score>;
}

#[derive(Clone, Debug, Default)]
pub struct SubstitutionMatrix {
    /// The name of the matrix, e.g. "BLOSUM62"
    pub name: String,
    /// The (non-gap) symbols the matrix was built over, in column order
    pub alphabet: Vec<u8>,
    scores: HashMap<(u8, u8), Score>,
}

impl SubstitutionScores for SubstitutionMatrix {
    #[inline]
    fn score(&self, a: u8, b: u8) -> Option<Score> {
        self.scores.get(&(a, b)).copied()
    }
}

impl SubstitutionMatrix {
    /// Parse a matrix in the NCBI text format:
    ///
    /// ```text
    /// # comment lines
    ///    A  C  G  T
    /// A  1 -1 -1 -1
    /// ...
    /// ```
    pub fn from_ncbi_str(name: &str, text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && line.as_bytes()[0] != UTF8_HASH);

        let (_, header) = lines.next().ok_or(MatrixHeaderError)?;
        let columns: Vec<u8> = header
            .split_whitespace()
            .map(|token| token.as_bytes()[0])
            .collect();

        let mut scores: HashMap<(u8, u8), Score> = HashMap::new();
        let mut alphabet: Vec<u8> = vec![];

        for (line_number, line) in lines {
            let error_context =
                || format!("failed to parse substitution matrix: {name}\n         on line: {line_number}");

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != columns.len() + 1 {
                return Err(MatrixRowLengthError {
                    expected: columns.len(),
                    found: tokens.len(),
                })
                .with_context(error_context);
            }

            let row_symbol = tokens[0].as_bytes()[0];
            alphabet.push(row_symbol);

            for (&col_symbol, token) in columns.iter().zip(&tokens[1..]) {
                let score = get_token_as_score(token).with_context(error_context)?;
                scores.insert((row_symbol, col_symbol), score);
            }
        }

        Ok(Self {
            name: name.to_string(),
            alphabet,
            scores,
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).context(format!(
            "failed to read substitution matrix file: {}",
            path.to_string_lossy()
        ))?;

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();

        Self::from_ncbi_str(&name, &text)
    }

    /// Load one of the matrices in `BUILTIN_MATRICES` by name (case-insensitive).
    pub fn builtin(name: &str) -> Result<Self> {
        let upper = name.to_ascii_uppercase();
        match BUILTIN_MATRICES.get(upper.as_str()) {
            Some(text) => Self::from_ncbi_str(&upper, text),
            None => Err(UnknownMatrixError {
                name: name.to_string(),
            }
            .into()),
        }
    }

    pub fn blosum62() -> Result<Self> {
        Self::builtin("BLOSUM62")
    }

    /// A matrix that scores every identical pair with `match_score`
    /// and every other pair of alphabet symbols with `mismatch_score`.
    pub fn match_mismatch(match_score: Score, mismatch_score: Score, alphabet: &[u8]) -> Self {
        let mut scores = HashMap::with_capacity(alphabet.len() * alphabet.len());
        for &a in alphabet {
            for &b in alphabet {
                let score = if a == b { match_score } else { mismatch_score };
                scores.insert((a, b), score);
            }
        }

        Self {
            name: format!("match({match_score})/mismatch({mismatch_score})"),
            alphabet: alphabet.to_vec(),
            scores,
        }
    }

    /// Returns a copy of this matrix that also scores gaps: every symbol against
    /// a gap (in either order) gets `gap_score`, and a gap against a gap scores 0.
    ///
    /// A gap against a gap can be queried when a parent row has a gap in a
    /// column that the query doesn't cover.
    pub fn with_gap_score(&self, gap_score: Score) -> Self {
        let mut matrix = self.clone();
        for &symbol in self.alphabet.iter().filter(|&&s| s != GAP) {
            matrix.scores.insert((symbol, GAP), gap_score);
            matrix.scores.insert((GAP, symbol), gap_score);
        }
        matrix.scores.insert((GAP, GAP), 0);
        matrix.name = format!("{} (gap: {gap_score})", self.name);
        matrix
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

fn get_token_as_score(token: &str) -> Result<Score> {
    if !INTEGER_RE.is_match(token) {
        return Err(ScoreTokenError {
            token: token.to_string(),
        }
        .into());
    }

    token
        .parse::<Score>()
        .with_context(|| format!("failed to parse token \"{}\" as a score", token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::AMINO_ALPHABET_WITH_DEGENERATE;
    use assert2::assert;

    #[test]
    fn test_blosum62() -> anyhow::Result<()> {
        let blosum62 = SubstitutionMatrix::blosum62()?;
        assert!(blosum62.alphabet == AMINO_ALPHABET_WITH_DEGENERATE);
        assert!(blosum62.len() == 24 * 24);

        assert!(blosum62.score(b'M', b'M') == Some(5));
        assert!(blosum62.score(b'D', b'D') == Some(6));
        assert!(blosum62.score(b'M', b'D') == Some(-3));
        assert!(blosum62.score(b'W', b'W') == Some(11));
        assert!(blosum62.score(b'B', b'D') == Some(4));
        assert!(blosum62.score(b'*', b'*') == Some(1));

        // no gap scores until they're added
        assert!(blosum62.score(b'M', GAP) == None);
        Ok(())
    }

    #[test]
    fn test_blosum62_is_symmetric() -> anyhow::Result<()> {
        let blosum62 = SubstitutionMatrix::blosum62()?;
        for &a in &blosum62.alphabet {
            for &b in &blosum62.alphabet {
                assert!(blosum62.score(a, b) == blosum62.score(b, a));
            }
        }
        Ok(())
    }

    #[test]
    fn test_with_gap_score() -> anyhow::Result<()> {
        let matrix = SubstitutionMatrix::blosum62()?.with_gap_score(-11);
        assert!(matrix.score(b'M', GAP) == Some(-11));
        assert!(matrix.score(GAP, b'*') == Some(-11));
        assert!(matrix.score(GAP, GAP) == Some(0));
        assert!(matrix.score(b'M', b'D') == Some(-3));
        assert!(matrix.len() == 24 * 24 + 2 * 24 + 1);
        Ok(())
    }

    #[test]
    fn test_match_mismatch() {
        let matrix = SubstitutionMatrix::match_mismatch(1, -1, b"ACGT");
        assert!(matrix.score(b'A', b'A') == Some(1));
        assert!(matrix.score(b'A', b'T') == Some(-1));
        assert!(matrix.score(b'A', b'N') == None);
        assert!(matrix.len() == 16);
    }

    #[test]
    fn test_builtin_dna_matches_match_mismatch() -> anyhow::Result<()> {
        let builtin = SubstitutionMatrix::builtin("dna_simple")?;
        let constructed = SubstitutionMatrix::match_mismatch(1, -1, b"ACGT");
        for &a in b"ACGT" {
            for &b in b"ACGT" {
                assert!(builtin.score(a, b) == constructed.score(a, b));
            }
        }
        Ok(())
    }

    #[test]
    fn test_unknown_builtin() {
        let result = SubstitutionMatrix::builtin("PAM250");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_errors() {
        // a row that is too short
        let text = "   A  C\nA  1 -1\nC -1\n";
        assert!(SubstitutionMatrix::from_ncbi_str("short", text).is_err());

        // a score that isn't an integer
        let text = "   A  C\nA  1 -1\nC -1 1.5\n";
        assert!(SubstitutionMatrix::from_ncbi_str("float", text).is_err());

        // nothing but comments
        let text = "# nothing here\n\n";
        assert!(SubstitutionMatrix::from_ncbi_str("empty", text).is_err());
    }
}
