use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

use librecomb::structs::SubstitutionMatrix;

use crate::args::{MatrixArgs, OutputArgs};

pub trait PathBufExt {
    fn open(&self, allow_overwrite: bool) -> anyhow::Result<BufWriter<File>>;
}

impl PathBufExt for PathBuf {
    fn open(&self, allow_overwrite: bool) -> anyhow::Result<BufWriter<File>> {
        let mut file_options = File::options();

        if allow_overwrite {
            file_options.write(true).truncate(true).create(true);
        } else {
            file_options.write(true).create_new(true);
        };

        let file = file_options
            .open(self)
            .context(format!("failed to create file: {}", self.to_string_lossy()))?;

        Ok(BufWriter::new(file))
    }
}

/// Load the substitution matrix named by the arguments and add the gap scores.
///
/// An existing file takes precedence over a built-in matrix of the same name.
pub fn load_matrix(args: &MatrixArgs) -> anyhow::Result<SubstitutionMatrix> {
    let path = Path::new(&args.matrix);

    let matrix = if path.is_file() {
        SubstitutionMatrix::from_path(path)?
    } else {
        SubstitutionMatrix::builtin(&args.matrix)?
    };

    tracing::info!(
        matrix = %matrix.name,
        gap_score = args.gap_score,
        "loaded substitution matrix"
    );

    Ok(matrix.with_gap_score(args.gap_score))
}

/// The writer for alignment output: the output file if one was given, otherwise stdout.
pub fn output_writer(args: &OutputArgs) -> anyhow::Result<Box<dyn Write>> {
    Ok(match &args.output_path {
        Some(path) => Box::new(path.open(args.allow_overwrite)?),
        None => Box::new(BufWriter::new(std::io::stdout())),
    })
}
