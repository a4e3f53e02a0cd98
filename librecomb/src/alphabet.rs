pub const UTF8_SPACE: u8 = 32;
pub const UTF8_HASH: u8 = 35;
pub const UTF8_DASH: u8 = 45;
pub const UTF8_ZERO: u8 = 48;
pub const UTF8_ONE: u8 = 49;

/// The symbol used for a gap (a "space") in an alignment row.
pub const GAP: u8 = UTF8_DASH;

/// The amino acid alphabet in NCBI matrix order, including the degenerate
/// codes B (D or N), Z (E or Q), X (any) and the stop symbol *.
pub const AMINO_ALPHABET_WITH_DEGENERATE: [u8; 24] = [
    b'A', b'R', b'N', b'D', b'C', b'Q', b'E', b'G', b'H', b'I', b'L', b'K', b'M', b'F', b'P', b'S',
    b'T', b'W', b'Y', b'V', b'B', b'Z', b'X', b'*',
];

pub const DNA_ALPHABET: [u8; 4] = [b'A', b'C', b'G', b'T'];

#[inline]
pub fn is_gap(byte: u8) -> bool {
    byte == GAP
}

/// Returns the bytes with every gap symbol removed.
pub fn remove_gaps(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().copied().filter(|&b| !is_gap(b)).collect()
}

/// Removes every column in which all of the given rows hold a gap.
///
/// The rows are expected to be the same length; columns
/// past the end of the shortest row are ignored.
pub fn remove_all_gap_columns(rows: &[&[u8]]) -> Vec<Vec<u8>> {
    let num_columns = rows.iter().map(|row| row.len()).min().unwrap_or(0);
    let mut stripped: Vec<Vec<u8>> = vec![Vec::with_capacity(num_columns); rows.len()];

    for col_idx in 0..num_columns {
        if rows.iter().all(|row| is_gap(row[col_idx])) {
            continue;
        }
        rows.iter()
            .zip(stripped.iter_mut())
            .for_each(|(row, out)| out.push(row[col_idx]));
    }

    stripped
}
