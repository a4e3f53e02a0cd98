use std::path::Path;

use anyhow::{Context, Result};

use crate::align::AlignError;

use super::Sequence;

/// Two parental sequences that have already been aligned to each other.
///
/// Both rows always have the same length.
#[derive(Clone, Debug)]
pub struct AlignedParents {
    y0: Sequence,
    y1: Sequence,
}

impl AlignedParents {
    pub fn new(y0: Sequence, y1: Sequence) -> Result<Self, AlignError> {
        if y0.len() != y1.len() {
            return Err(AlignError::InvalidInput(format!(
                "aligned parents must have equal lengths: {} ({}) != {} ({})",
                y0.name,
                y0.len(),
                y1.name,
                y1.len()
            )));
        }
        Ok(Self { y0, y1 })
    }

    /// Read the first two records of a fasta file as an aligned parent pair.
    pub fn from_fasta<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_string = path.as_ref().to_string_lossy().to_string();
        let mut seqs = Sequence::from_fasta(&path)?.into_iter();

        let (y0, y1) = match (seqs.next(), seqs.next()) {
            (Some(y0), Some(y1)) => (y0, y1),
            _ => anyhow::bail!("expected two aligned parent records in: {path_string}"),
        };

        Self::new(y0, y1).context(format!("failed to read aligned parents: {path_string}"))
    }

    pub fn y0(&self) -> &Sequence {
        &self.y0
    }

    pub fn y1(&self) -> &Sequence {
        &self.y1
    }

    /// The number of alignment columns in the parent pair.
    pub fn num_columns(&self) -> usize {
        self.y0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::assert;

    #[test]
    fn test_unequal_lengths() {
        let result = AlignedParents::new(Sequence::from_utf8(b"MMM"), Sequence::from_utf8(b"DD"));
        assert!(let Err(AlignError::InvalidInput(_)) = result);
    }

    #[test]
    fn test_new() -> anyhow::Result<()> {
        let parents =
            AlignedParents::new(Sequence::from_utf8(b"MMM-M"), Sequence::from_utf8(b"DDDDD"))?;
        assert!(parents.num_columns() == 5);
        assert!(parents.y0().bytes == b"MMM-M".to_vec());
        Ok(())
    }
}
