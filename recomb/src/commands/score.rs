use thiserror::Error;

use librecomb::align::score_recombine_align;
use librecomb::align::structs::Parent;
use librecomb::structs::Sequence;

use crate::args::ScoreArgs;
use crate::util::load_matrix;

#[derive(Error, Debug)]
#[error("expected three alignment records in {path}, found {found}")]
struct AlignmentRecordCountError {
    path: String,
    found: usize,
}

pub fn score(args: &ScoreArgs) -> anyhow::Result<()> {
    let matrix = load_matrix(&args.matrix_args)?;
    let records = Sequence::from_fasta(&args.alignment_path)?;

    let (query_row, parent_zero_row, parent_one_row) = match records.as_slice() {
        [x, y0, y1] => (x, y0, y1),
        _ => {
            return Err(AlignmentRecordCountError {
                path: args.alignment_path.to_string_lossy().to_string(),
                found: records.len(),
            }
            .into())
        }
    };

    let parents = Parent::parse_labels(&args.parents)?;

    let score = score_recombine_align(
        [
            query_row.bytes.as_slice(),
            parent_zero_row.bytes.as_slice(),
            parent_one_row.bytes.as_slice(),
        ],
        &parents,
        &matrix,
        args.matrix_args.recombination_penalty,
    )?;

    println!("{score}");
    Ok(())
}
