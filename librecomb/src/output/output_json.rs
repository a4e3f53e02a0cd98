use crate::align::structs::RecombinationAlignment;

use anyhow::{Context, Result};
use std::io::Write;

/// Write the alignment as a single line of JSON.
pub fn write_json_output(alignment: &RecombinationAlignment, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer(&mut *out, alignment)
        .context("failed to serialize recombination alignment")?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::structs::Parent;
    use assert2::assert;

    #[test]
    fn test_write_json_output() -> anyhow::Result<()> {
        let alignment = RecombinationAlignment {
            score: -28,
            query_row: b"---M".to_vec(),
            parent_zero_row: b"MMMM".to_vec(),
            parent_one_row: b"DDDD".to_vec(),
            parents: Parent::parse_labels("0000")?,
        };

        let mut out: Vec<u8> = vec![];
        write_json_output(&alignment, &mut out)?;
        let text = String::from_utf8(out)?;

        assert!(text.ends_with('\n'));
        assert!(
            text.trim_end()
                == r#"{"score":-28,"query_row":"---M","parent_zero_row":"MMMM","parent_one_row":"DDDD","parents":"0000"}"#
        );
        Ok(())
    }
}
