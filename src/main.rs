use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use csv_combiner::io::csv_write;
use csv_combiner::logging::init_logging;
use csv_combiner::pipeline::{
    self, CombineSummary, DEFAULT_OUTPUT_NAME, DEFAULT_PREVIEW_ROWS, REMEDIATION_HINT,
};
use csv_combiner::{CombineError, CombineOptions, NameCheck, Result};

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(error) = init_logging(cli.verbose) {
        eprintln!("warning: {error}");
    }
    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            if error.is_schema_mismatch() {
                eprintln!("{REMEDIATION_HINT}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Combine(args) => execute_combine(args),
    }
}

fn execute_combine(args: CombineArgs) -> Result<ExitCode> {
    let options = args.options()?;
    let Some(summary) =
        pipeline::combine_files(&args.files, &args.output, &options, args.preview)?
    else {
        eprintln!("Please upload at least one CSV file.");
        return Ok(ExitCode::FAILURE);
    };

    match args.summary {
        SummaryFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        SummaryFormat::Text => print_text_summary(&summary)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn print_text_summary(summary: &CombineSummary) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "Number of files uploaded: {}", summary.file_count)?;
    writeln!(stdout, "Files combined successfully!")?;
    writeln!(stdout, "Preview of combined data:")?;
    stdout.write_all(&csv_write::to_csv_bytes(&summary.preview)?)?;
    writeln!(stdout, "Total number of rows: {}", summary.row_count)?;
    writeln!(
        stdout,
        "Combined CSV written to {} ({})",
        summary.output.display(),
        summary.mime_type
    )?;
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Merge CSV files that share the first file's column layout."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Combine CSV files into one, in the order given.
    Combine(CombineArgs),
}

#[derive(clap::Args)]
struct CombineArgs {
    /// Input CSV files. The first file's header names the columns.
    files: Vec<PathBuf>,

    /// Output file path.
    #[arg(long, short, default_value = DEFAULT_OUTPUT_NAME)]
    output: PathBuf,

    /// Number of rows to show in the preview.
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    preview: usize,

    /// Single-byte field delimiter.
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Reject later files whose header row differs from the first file's.
    #[arg(long)]
    strict_names: bool,

    /// How to report the result on stdout.
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
    summary: SummaryFormat,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SummaryFormat {
    Text,
    Json,
}

impl CombineArgs {
    fn options(&self) -> Result<CombineOptions> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(CombineError::InvalidDelimiter(self.delimiter))?;
        let name_check = if self.strict_names {
            NameCheck::Strict
        } else {
            NameCheck::Positional
        };
        Ok(CombineOptions {
            delimiter,
            name_check,
        })
    }
}
