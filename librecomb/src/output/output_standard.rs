use crate::align::structs::RecombinationAlignment;

use anyhow::Result;
use std::io::Write;

/// Write the alignment as wrapped blocks of `width` columns, with each
/// row labeled by its name: query, parent zero, then parent one.
pub fn write_standard_output(
    alignment: &RecombinationAlignment,
    names: [&str; 3],
    width: usize,
    out: &mut impl Write,
) -> Result<()> {
    write!(out, "{}", alignment.ali_string(names, width))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::structs::Parent;
    use assert2::assert;

    #[test]
    fn test_write_standard_output() -> anyhow::Result<()> {
        let alignment = RecombinationAlignment {
            score: 4,
            query_row: b"DM".to_vec(),
            parent_zero_row: b"MM".to_vec(),
            parent_one_row: b"DD".to_vec(),
            parents: Parent::parse_labels("10")?,
        };

        let mut out: Vec<u8> = vec![];
        write_standard_output(&alignment, ["query", "p0", "p1"], 80, &mut out)?;

        assert!(
            String::from_utf8(out)?
                == "Score: 4\nquery DM\n   p0 MM\n   p1 DD\n      10\n\n"
        );
        Ok(())
    }
}
