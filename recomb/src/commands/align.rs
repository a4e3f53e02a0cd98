use std::io::Write;

use anyhow::{bail, Context};

use librecomb::align::recombine_align_with_matrix;
use librecomb::output::{write_json_output, write_standard_output};
use librecomb::structs::{AlignedParents, Sequence};

use crate::args::AlignArgs;
use crate::util::{load_matrix, output_writer, PathBufExt};

pub fn align(args: &AlignArgs) -> anyhow::Result<()> {
    let matrix = load_matrix(&args.matrix_args)?;
    let recombination_penalty = args.matrix_args.recombination_penalty;

    let parents = AlignedParents::from_fasta(&args.parents_path)?;
    let queries = Sequence::from_fasta(&args.query_path)?;

    tracing::info!(
        queries = queries.len(),
        parent_columns = parents.num_columns(),
        recombination_penalty,
        "aligning"
    );

    let mut out = output_writer(&args.output_args)?;
    let mut dp_out = match &args.dump_dp_path {
        Some(path) => Some(path.open(args.output_args.allow_overwrite)?),
        None => None,
    };

    let names = [
        "",
        parents.y0().name.as_str(),
        parents.y1().name.as_str(),
    ];

    for query in queries.iter() {
        if !query.is_ungapped() {
            bail!("query sequence contains gaps: {}", query.name);
        }

        let (alignment, dp_matrix) = recombine_align_with_matrix(
            &query.bytes,
            &parents.y0().bytes,
            &parents.y1().bytes,
            &matrix,
            recombination_penalty,
        )
        .context(format!("failed to align query: {}", query.name))?;

        tracing::info!(
            query = %query.name,
            score = alignment.score,
            recombinations = alignment
                .parents
                .windows(2)
                .filter(|pair| pair[0] != pair[1])
                .count(),
            "aligned"
        );

        if let Some(dp_out) = dp_out.as_mut() {
            writeln!(dp_out, ">{}", query.name)?;
            dp_matrix.dump(dp_out)?;
        }

        if args.check {
            alignment
                .check_valid(&query.bytes, &parents.y0().bytes, &parents.y1().bytes)
                .context(format!("invalid alignment for query: {}", query.name))?;
            alignment
                .check_score(&matrix, recombination_penalty)
                .context(format!("incorrect score for query: {}", query.name))?;
        }

        if args.output_args.json {
            write_json_output(&alignment, &mut out)?;
        } else {
            let mut query_names = names;
            query_names[0] = query.name.as_str();
            write_standard_output(&alignment, query_names, args.output_args.width, &mut out)?;
        }
    }

    out.flush()?;
    if let Some(mut dp_out) = dp_out {
        dp_out.flush()?;
    }

    Ok(())
}
