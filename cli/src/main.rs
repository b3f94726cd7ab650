//! docoutline CLI - PDF title and heading outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docoutline::{
    extract_batch_with_progress, find_pdf_files, render, DocumentOutline, ErrorMode,
    ExtractOptions, HeadingLevel, JsonFormat, OutlineExtractor, PdfSource, SpanSource,
    StatisticsMode,
};

#[derive(Parser)]
#[command(name = "docoutline")]
#[command(version)]
#[command(about = "Extract the title and heading outline of PDF documents", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output JSON file (stdout if not specified)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    extract: ExtractArgs,

    /// Output compact JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone)]
struct ExtractArgs {
    /// Only the first N pages are analyzed
    #[arg(long, global = true, value_name = "N", default_value_t = docoutline::extract::DEFAULT_MAX_PAGES)]
    max_pages: usize,

    /// Spans scoring below this confidence are never headings
    #[arg(long, global = true, value_name = "SCORE", default_value_t = docoutline::classify::DEFAULT_MIN_CONFIDENCE)]
    min_confidence: f64,

    /// Fail on the first unreadable page instead of skipping it
    #[arg(long, global = true)]
    strict: bool,

    /// Score against document-wide font statistics instead of running ones
    #[arg(long, global = true)]
    two_pass: bool,
}

impl ExtractArgs {
    fn options(&self) -> ExtractOptions {
        ExtractOptions::new()
            .with_max_pages(self.max_pages)
            .with_min_confidence(self.min_confidence)
            .with_error_mode(if self.strict {
                ErrorMode::Strict
            } else {
                ErrorMode::Lenient
            })
            .with_statistics_mode(if self.two_pass {
                StatisticsMode::TwoPass
            } else {
                StatisticsMode::Streaming
            })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the outline of one PDF as JSON
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Extract the outline of every PDF in a directory
    Batch {
        /// Directory containing PDF files
        #[arg(value_name = "INPUT_DIR", default_value = "input")]
        input: PathBuf,

        /// Directory receiving one JSON file per PDF
        #[arg(value_name = "OUTPUT_DIR", default_value = "output")]
        output: PathBuf,
    },

    /// Show document information and heading statistics
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let options = cli.extract.options();
    let format = if cli.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let result = match cli.command {
        Some(Commands::Extract { input, output }) => {
            cmd_extract(&input, output.as_deref(), options, format)
        }
        Some(Commands::Batch { input, output }) => cmd_batch(&input, &output, options, format),
        Some(Commands::Info { input }) => cmd_info(&input, options),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: extract if input is provided
            if let Some(input) = cli.input {
                cmd_extract(&input, cli.output.as_deref(), options, format)
            } else {
                println!("{}", "Usage: docoutline <FILE> [OUTPUT]".yellow());
                println!("       docoutline batch [INPUT_DIR] [OUTPUT_DIR]");
                println!("       docoutline --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    options: ExtractOptions,
    format: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = docoutline::extract_file_with_options(input, options)?;
    let json = render::to_json(&outline, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_batch(
    input_dir: &Path,
    output_dir: &Path,
    options: ExtractOptions,
    format: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input_dir.is_dir() {
        println!(
            "{} {}",
            "Input directory not found:".yellow(),
            input_dir.display()
        );
        return Ok(());
    }

    let files = find_pdf_files(input_dir)?;
    if files.is_empty() {
        println!("{} {}", "No PDF files found in".yellow(), input_dir.display());
        return Ok(());
    }

    fs::create_dir_all(output_dir)?;
    log::debug!("writing outlines to {}", output_dir.display());
    println!(
        "{} {} PDF files from {}",
        "Processing".cyan().bold(),
        files.len(),
        input_dir.display()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let items = extract_batch_with_progress(&files, &options, |item| {
        pb.set_message(file_name(&item.path));
        pb.inc(1);
    });
    pb.finish_with_message("Done!");

    println!();
    let mut failed = 0;
    for item in &items {
        let target = output_dir.join(output_name(&item.path));
        fs::write(&target, render::to_json(&item.outline, format)?)?;

        if let Some(ref error) = item.outline.error {
            failed += 1;
            println!(
                "  {} {} {}",
                "✗".red(),
                file_name(&item.path),
                error.dimmed()
            );
        } else {
            println!(
                "  {} {} -> {} ({} headings, {:.2}s)",
                "✓".green(),
                file_name(&item.path),
                target.display(),
                item.outline.len(),
                item.elapsed.as_secs_f64()
            );
        }
    }

    println!(
        "\n{} {} processed, {} failed in {:.2}s",
        "Done!".green().bold(),
        items.len(),
        failed,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

fn cmd_info(input: &Path, options: ExtractOptions) -> Result<(), Box<dyn std::error::Error>> {
    let source = PdfSource::open(input)?;
    let page_count = source.page_count();
    let max_pages = options.max_pages;
    let outline = OutlineExtractor::new(options).extract(&source)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), source.version());
    println!("{}: {}", "Pages".bold(), page_count);
    if let Some(title) = source.metadata_title() {
        println!("{}: {}", "Metadata title".bold(), title);
    }
    println!("{}: {}", "Title".bold(), outline.title);

    println!();
    println!("{}", "Outline Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    print_level_counts(&outline);
    if page_count > max_pages {
        println!(
            "{}",
            format!(
                "Only the first {} of {} pages were analyzed",
                max_pages, page_count
            )
            .yellow()
        );
    }

    Ok(())
}

fn print_level_counts(outline: &DocumentOutline) {
    for level in [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3] {
        println!("{}: {}", level.as_str().bold(), outline.count_level(level));
    }
    println!("{}: {}", "Total".bold(), outline.len());
}

fn cmd_version() {
    println!("{} {}", "docoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and heading outline extraction tool");
    println!();
    println!("License: MIT");
}

/// `<stem>.json` for an input path.
fn output_name(path: &Path) -> String {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    format!("{}.json", stem)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_name() {
        assert_eq!(output_name(Path::new("in/report.pdf")), "report.json");
        assert_eq!(output_name(Path::new("Annual.Report.PDF")), "Annual.Report.json");
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["docoutline", "batch"]).unwrap();
        let options = cli.extract.options();
        assert_eq!(options.max_pages, 50);
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.statistics, StatisticsMode::Streaming);
        match cli.command {
            Some(Commands::Batch { input, output }) => {
                assert_eq!(input, PathBuf::from("input"));
                assert_eq!(output, PathBuf::from("output"));
            }
            _ => panic!("expected batch command"),
        }
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "docoutline",
            "extract",
            "a.pdf",
            "--strict",
            "--two-pass",
            "--max-pages",
            "5",
            "--min-confidence",
            "0.5",
            "--compact",
        ])
        .unwrap();
        let options = cli.extract.options();
        assert!(cli.compact);
        assert_eq!(options.max_pages, 5);
        assert_eq!(options.min_confidence, 0.5);
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.statistics, StatisticsMode::TwoPass);
    }

    #[test]
    fn test_batch_writes_error_json() {
        let input = tempfile::tempdir().unwrap();
        let output = input.path().join("out");
        fs::write(input.path().join("broken.pdf"), b"not a pdf").unwrap();
        fs::write(input.path().join("notes.txt"), b"skip me").unwrap();

        cmd_batch(
            input.path(),
            &output,
            ExtractOptions::default(),
            JsonFormat::Compact,
        )
        .unwrap();

        let json = fs::read_to_string(output.join("broken.json")).unwrap();
        let outline: DocumentOutline = serde_json::from_str(&json).unwrap();
        assert_eq!(outline.title, "Error extracting title");
        assert!(outline.error.is_some());
        assert!(!output.join("notes.json").exists());
    }
}
