use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use sparse_ops::logging::{init_logging, LogFormat, LoggingConfig};
use sparse_ops::{transpose, Operation, SparseMatrix};

#[derive(Parser)]
#[command(name = "sparse-ops", version, about = "Arithmetic on sparse integer matrices")]
struct Cli {
    /// Directory that receives result files
    #[arg(long, default_value = "results")]
    output_dir: PathBuf,

    /// Log format: pretty, compact or json
    #[arg(long)]
    log_format: Option<String>,

    /// Transpose the second matrix before add/subtract when shapes differ
    #[arg(long)]
    auto_transpose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// A + B
    Add { a: PathBuf, b: PathBuf },
    /// A - B
    Subtract { a: PathBuf, b: PathBuf },
    /// A * B
    Multiply { a: PathBuf, b: PathBuf },
    /// Transpose A, and B if given
    Transpose { a: PathBuf, b: Option<PathBuf> },
    /// Add, subtract and multiply, continuing past failures
    All { a: PathBuf, b: PathBuf },
    /// Report dimensions and non-zero counts
    Info { a: PathBuf, b: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::default();
    if let Some(format) = &cli.log_format {
        logging.format = LogFormat::parse(format);
    }
    if let Err(e) = init_logging(&logging) {
        eprintln!("failed to initialise logging: {e:#}");
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when at least one operation failed but the run continued
fn run(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Command::Info { a, b } => {
            load_pair(a, b)?;
            Ok(true)
        }
        Command::Transpose { a, b } => {
            let out = ensure_output_dir(&cli.output_dir)?;
            let m1 = load(a, "Matrix 1")?;
            save(&transpose(&m1)?, &out, "transpose_result_matrix1.txt")?;
            if let Some(b) = b {
                let m2 = load(b, "Matrix 2")?;
                save(&transpose(&m2)?, &out, "transpose_result_matrix2.txt")?;
            }
            Ok(true)
        }
        Command::Add { a, b } => run_ops(cli, a, b, &[Operation::Add]),
        Command::Subtract { a, b } => run_ops(cli, a, b, &[Operation::Subtract]),
        Command::Multiply { a, b } => run_ops(cli, a, b, &[Operation::Multiply]),
        Command::All { a, b } => run_ops(
            cli,
            a,
            b,
            &[Operation::Add, Operation::Subtract, Operation::Multiply],
        ),
    }
}

fn run_ops(cli: &Cli, a: &Path, b: &Path, ops: &[Operation]) -> Result<bool> {
    let out = ensure_output_dir(&cli.output_dir)?;
    let (m1, m2) = load_pair(a, b)?;

    let mut all_ok = true;
    for &op in ops {
        info!("Performing {op}...");
        let outcome = run_op(op, &m1, &m2, cli.auto_transpose)
            .and_then(|result| save(&result, &out, result_file(op)));
        if let Err(e) = outcome {
            error!("Error in {op}: {e:#}");
            all_ok = false;
        }
    }

    info!("Operations completed");
    Ok(all_ok)
}

fn run_op(
    op: Operation,
    m1: &SparseMatrix,
    m2: &SparseMatrix,
    auto_transpose: bool,
) -> Result<SparseMatrix> {
    let elementwise = matches!(op, Operation::Add | Operation::Subtract);
    if elementwise && auto_transpose && m1.shape() != m2.shape() {
        info!("Matrices have different dimensions. Transposing Matrix 2 for {op}...");
        let m2 = transpose(m2)?;
        return Ok(op.apply(m1, &m2)?);
    }
    Ok(op.apply(m1, m2)?)
}

fn result_file(op: Operation) -> &'static str {
    match op {
        Operation::Add => "addition_result.txt",
        Operation::Subtract => "subtraction_result.txt",
        Operation::Multiply => "multiply_result.txt",
        Operation::Transpose => "transpose_result_matrix1.txt",
    }
}

fn ensure_output_dir(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating results directory {}", dir.display()))?;
    Ok(dir.to_path_buf())
}

fn load(path: &Path, label: &str) -> Result<SparseMatrix> {
    let matrix = SparseMatrix::load(path)?;
    info!(
        "{label}: {} is {}x{} ({} non-zero elements)",
        path.display(),
        matrix.n_rows(),
        matrix.n_cols(),
        matrix.nnz()
    );
    Ok(matrix)
}

fn load_pair(a: &Path, b: &Path) -> Result<(SparseMatrix, SparseMatrix)> {
    Ok((load(a, "Matrix 1")?, load(b, "Matrix 2")?))
}

fn save(matrix: &SparseMatrix, dir: &Path, name: &str) -> Result<()> {
    let path = dir.join(name);
    matrix.save(&path)?;
    info!("Saved result to: {}", path.display());
    Ok(())
}
