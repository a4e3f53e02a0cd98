use seq_io::fasta::{Reader, Record};
use std::fmt::{Debug, Display, Formatter};
use std::path::Path;

use crate::alphabet::{is_gap, UTF8_SPACE};
use anyhow::{Context, Result};

/// A named biological sequence. Depending on where it came from,
/// this may be a raw sequence or a row of an alignment (with gaps).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    /// The name of the sequence
    pub name: String,
    /// The sequence details. If the sequence comes from a fasta, this
    /// is the information following the sequence name in the header
    pub details: Option<String>,
    /// The UTF8 bytes that make up the sequence
    pub bytes: Vec<u8>,
}

impl Sequence {
    pub fn from_fasta<P: AsRef<Path>>(path: P) -> Result<Vec<Self>> {
        let mut seqs: Vec<Self> = vec![];

        let mut reader = Reader::from_path(&path).context(format!(
            "failed to open fasta file: {}",
            path.as_ref().to_string_lossy()
        ))?;

        while let Some(record) = reader.next() {
            let record = record.with_context(|| "failed to read fasta record")?;
            let mut header_bytes = record.head().to_vec();
            let first_space_idx = header_bytes.iter().position(|&b| b == UTF8_SPACE);

            let error_context: fn() -> &'static str =
                || "failed to create String from fasta header bytes";

            let (name, details) = match first_space_idx {
                Some(idx) => {
                    let details_bytes = header_bytes.split_off(idx + 1);
                    header_bytes.pop();
                    (
                        String::from_utf8(header_bytes).with_context(error_context)?,
                        Some(String::from_utf8(details_bytes).with_context(error_context)?),
                    )
                }
                None => (
                    String::from_utf8(header_bytes).with_context(error_context)?,
                    None,
                ),
            };

            // the sequence lines are joined; the
            // case of the residues is preserved
            let bytes: Vec<u8> = record.seq_lines().flatten().copied().collect();

            seqs.push(Sequence {
                name,
                details,
                bytes,
            });
        }
        Ok(seqs)
    }

    pub fn from_utf8(bytes: &[u8]) -> Self {
        Sequence {
            name: "".to_string(),
            details: None,
            bytes: bytes.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns true if the sequence has no gap symbols.
    pub fn is_ungapped(&self) -> bool {
        !self.bytes.iter().any(|&b| is_gap(b))
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, ">{}", self.name)?;

        if let Some(ref details) = self.details {
            write!(f, " {details}")?
        };

        writeln!(f)?;

        let mut iter = self.bytes.chunks(80).peekable();

        while let Some(byte_chunk) = iter.next() {
            match std::str::from_utf8(byte_chunk) {
                Ok(seq_line) => {
                    write!(f, "{}", seq_line)?;
                    if iter.peek().is_some() {
                        // if we're not on the last
                        // line, add a linebreak
                        writeln!(f)?;
                    }
                }
                Err(_) => return Err(std::fmt::Error),
            }
        }
        Ok(())
    }
}

impl Debug for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.bytes))?;
        Ok(())
    }
}
