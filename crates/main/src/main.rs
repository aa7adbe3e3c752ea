use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::info;

use text2pdf::convert::{Outcome, RunReport};
use text2pdf::{CleanupOptions, Converter, PaginatorBuilder, PaperSize, DEFAULT_MAX_SIZE_KB};

/// Converts plain text into PDF files that stay below a size limit.
///
/// Outputs are numbered `<output>.1.pdf`, `<output>.2.pdf`, ... and a new file is started
/// whenever the next page would push the current one over `--max-size`.  Set `RUST_LOG`
/// to `debug` for per-file details.
#[derive(Parser)]
#[command(author, version, about = "Paginate plain text into size-capped PDF files")]
struct Cli {
    /// Input text file, or a directory whose `*.txt` files are converted.
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Output file prefix, or output directory when the input is a directory.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Maximum size of each output file in kilobytes.
    #[arg(short = 's', long = "max-size", value_name = "KB", default_value_t = DEFAULT_MAX_SIZE_KB)]
    max_size: u64,

    /// Replace output files that already exist.
    #[arg(short = 'w', long)]
    overwrite: bool,

    /// Strip unsupported symbols, collapse whitespace and NFKC-normalize the text first.
    #[arg(long)]
    clean: bool,

    /// Paper size.
    #[arg(long, value_enum, default_value = "a4")]
    paper: Paper,

    /// Font size in points.
    #[arg(long, value_name = "PT")]
    font_size: Option<f64>,

    /// Rows per page, overriding the value derived from the paper size.
    #[arg(long, value_name = "N")]
    lines_per_page: Option<usize>,

    /// Characters per row, overriding the value derived from the paper size.
    #[arg(long, value_name = "N")]
    chars_per_line: Option<usize>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Paper {
    /// ISO A4 (210 x 297 mm)
    A4,
    /// US Letter (8.5 x 11 in)
    Letter,
}

impl From<Paper> for PaperSize {
    fn from(paper: Paper) -> Self {
        match paper {
            Paper::A4 => PaperSize::A4,
            Paper::Letter => PaperSize::LETTER,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("Error: {}", err);
            print_error_sources(err.as_ref());
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when a directory batch finished with failed inputs.
fn run(cli: Cli) -> Result<bool, Box<dyn Error>> {
    let mut builder = PaginatorBuilder::new()
        .with_max_size_kb(cli.max_size)
        .with_paper_size(cli.paper.into())
        .with_lines_per_page(cli.lines_per_page)
        .with_chars_per_line(cli.chars_per_line);
    if let Some(font_size) = cli.font_size {
        builder = builder.with_font_size(font_size);
    }

    let cleanup = cli.clean.then(CleanupOptions::standard);
    let converter = Converter::new(builder.build()?)
        .with_overwrite(cli.overwrite)
        .with_cleanup(cleanup);

    match converter.run(&cli.input, cli.output.as_deref())? {
        RunReport::File(Outcome::Written(files)) => {
            for file in &files {
                println!(
                    "Generated {} ({} pages, {} bytes)",
                    file.path.display(),
                    file.pages,
                    file.bytes
                );
            }
            Ok(true)
        }
        RunReport::File(Outcome::Skipped { existing }) => {
            info!(
                "Nothing written; {} output file(s) already exist. Pass --overwrite to replace them.",
                existing.len()
            );
            Ok(true)
        }
        RunReport::Directory(summary) => {
            println!(
                "Processed {} files: {} converted, {} skipped, {} failed.",
                summary.total, summary.succeeded, summary.skipped, summary.failed
            );
            Ok(summary.failed == 0)
        }
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
