use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use librecomb::align::Score;

#[derive(Subcommand)]
pub enum SubCommands {
    #[command(about = "Align each query sequence against a pair of aligned parents")]
    Align(AlignArgs),
    #[command(about = "Score a recombination alignment with a given parent labeling")]
    Score(ScoreArgs),
}

#[derive(Parser)]
#[command(name = "recomb")]
#[command(
    about = "Find the optimal recombination alignment of a sequence against two aligned parental sequences"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: SubCommands,
}

#[derive(Args, Debug, Clone)]
pub struct MatrixArgs {
    /// The substitution matrix: a built-in name (BLOSUM62, DNA_SIMPLE) or a path to an NCBI matrix file
    #[arg(
        short = 'm',
        long = "matrix",
        default_value = "BLOSUM62",
        value_name = "NAME|PATH"
    )]
    pub matrix: String,

    /// The score of aligning any residue against a gap
    #[arg(
        short = 'g',
        long = "gap-score",
        default_value_t = -11,
        allow_negative_numbers = true,
        value_name = "N"
    )]
    pub gap_score: Score,

    /// The score added every time the active parent changes
    #[arg(
        short = 'r',
        long = "recombination-penalty",
        default_value_t = -7,
        allow_negative_numbers = true,
        value_name = "N"
    )]
    pub recombination_penalty: Score,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// The number of alignment columns per output block
    #[arg(short = 'w', long = "width", default_value_t = 80usize, value_name = "N")]
    pub width: usize,

    /// Write each alignment as a line of JSON
    #[arg(long = "json", action)]
    pub json: bool,

    /// Where to place alignment output (default: stdout)
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// Allow recomb to overwrite files
    #[arg(short = 'q', long = "allow-overwrite", default_value_t = false)]
    pub allow_overwrite: bool,
}

#[derive(Debug, Args)]
pub struct AlignArgs {
    /// Query file; every record is aligned
    #[arg(value_name = "QUERY.fasta")]
    pub query_path: PathBuf,

    /// Aligned parents file; the first two records are used
    #[arg(value_name = "PARENTS.fasta")]
    pub parents_path: PathBuf,

    /// Verify every alignment and its score before writing it
    #[arg(long = "check", action)]
    pub check: bool,

    /// Write the filled DP matrices to this path
    #[arg(long = "dump-dp", value_name = "PATH")]
    pub dump_dp_path: Option<PathBuf>,

    /// Arguments that control scoring
    #[command(flatten)]
    pub matrix_args: MatrixArgs,

    /// Arguments that control output options
    #[command(flatten)]
    pub output_args: OutputArgs,
}

#[derive(Debug, Args)]
pub struct ScoreArgs {
    /// A three record alignment: query row, parent zero row, parent one row
    #[arg(value_name = "ALIGNMENT.fasta")]
    pub alignment_path: PathBuf,

    /// The parent labels, one '0' or '1' per alignment column
    #[arg(value_name = "PARENTS")]
    pub parents: String,

    /// Arguments that control scoring
    #[command(flatten)]
    pub matrix_args: MatrixArgs,
}
