//! Command-line interface for the extractor.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{validate_page_range, ScanConfig, DEFAULT_REGISTERS_PATH};
use crate::error::{ExtractorError, Result};
use crate::inspect::inspect_pages;
use crate::layout::{extract_registers, LineAssembler};
use crate::lookup::RegisterIndex;
use crate::render::{render_json, render_record, render_text, write_outputs};
use crate::source::load_document;
use crate::types::RegisterRecord;

/// Number of records listed after writing output files.
const SUMMARY_LIMIT: usize = 5;

/// Regscan Extractor - Pull register definitions out of reference manuals.
#[derive(Parser)]
#[command(name = "regscan-extractor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract all register definitions from a document.
    Extract {
        /// Input document (.pdf or JSON glyph dump)
        input: PathBuf,

        /// Write registers.json and registers_all.txt into this directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rendering printed to stdout when no output directory is given
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Page budget per register, header page included (default: 4)
        #[arg(long)]
        max_pages: Option<usize>,
    },

    /// Look up registers by name in a previously extracted records file.
    Search {
        /// Register name, short name or fragment (e.g., CRC_CR)
        name: String,

        /// Records file (default: extracted/registers.json)
        #[arg(short, long)]
        registers: Option<PathBuf>,

        /// Print only the best match
        #[arg(long)]
        exact: bool,
    },

    /// Print the font size and weight of each line on some pages.
    Inspect {
        /// Input document (.pdf or JSON glyph dump)
        input: PathBuf,

        /// Page or page range, 1-based (e.g., 572-573)
        #[arg(short, long)]
        pages: String,
    },
}

/// Rendering printed by `extract`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            input,
            output,
            format,
            max_pages,
        } => {
            let mut config = ScanConfig::default();
            if let Some(pages) = max_pages {
                config = config.with_max_pages_per_record(pages);
            }
            extract_command(&input, output.as_deref(), format, &config)
        }
        Commands::Search {
            name,
            registers,
            exact,
        } => search_command(&name, registers.as_deref(), exact),
        Commands::Inspect { input, pages } => inspect_command(&input, &pages),
    }
}

/// Execute the extract command.
fn extract_command(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    config: &ScanConfig,
) -> Result<()> {
    // Validate output directory before the (slow) extraction
    if let Some(output_dir) = output {
        if !output_dir.is_dir() {
            return Err(ExtractorError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Output directory does not exist: {}", output_dir.display()),
            )));
        }
    }

    let Some(output_dir) = output else {
        let records = extract_file(input, config)?;
        let rendered = match format {
            OutputFormat::Json => render_json(&records)?,
            OutputFormat::Text => render_text(&records),
        };
        print!("{rendered}");
        if format == OutputFormat::Json {
            println!();
        }
        return Ok(());
    };

    println!(
        "{} {}",
        style("Extracting registers from").bold(),
        style(input.display()).cyan()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Scanning pages...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let records = match extract_file(input, config) {
        Ok(records) => records,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Writing output...");
    let written = match write_outputs(output_dir, &records) {
        Ok(written) => written,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    println!("  Registers: {}", style(records.len()).green().bold());
    for record in records.iter().take(SUMMARY_LIMIT) {
        print_summary(record);
    }
    if records.len() > SUMMARY_LIMIT {
        println!("  ... and {} more", records.len() - SUMMARY_LIMIT);
    }

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        written.json.display()
    );
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        written.text.display()
    );

    Ok(())
}

fn extract_file(input: &Path, config: &ScanConfig) -> Result<Vec<RegisterRecord>> {
    let document = load_document(input)?;
    Ok(extract_registers(&document, config))
}

fn print_summary(record: &RegisterRecord) {
    println!(
        "  {} {} (pages {}, offset {})",
        style(record.section.as_deref().unwrap_or("-")).dim(),
        style(&record.full_name).cyan(),
        record.page_range(),
        record.address_offset
    );
}

/// Execute the search command.
fn search_command(name: &str, registers: Option<&Path>, exact: bool) -> Result<()> {
    let path = registers.unwrap_or_else(|| Path::new(DEFAULT_REGISTERS_PATH));
    let index = RegisterIndex::load(path)?;

    if exact {
        print!("{}", render_record(index.find(name)?));
        return Ok(());
    }

    let matches = index.search(name);
    if matches.is_empty() {
        return Err(ExtractorError::RegisterNotFound(name.to_string()));
    }

    println!(
        "{} {} for {}",
        style(matches.len()).green().bold(),
        if matches.len() == 1 { "match" } else { "matches" },
        style(name).cyan()
    );
    println!();
    for record in matches {
        print!("{}", render_record(record));
    }

    Ok(())
}

/// Execute the inspect command.
fn inspect_command(input: &Path, pages: &str) -> Result<()> {
    let range = validate_page_range(pages)?;
    let document = load_document(input)?;
    let config = ScanConfig::default();
    let fonts = inspect_pages(&document, range, LineAssembler::new(config.line_tolerance))?;

    let mut current_page = None;
    for font in fonts {
        if current_page != Some(font.page) {
            println!("{}", style(format!("--- Page {} ---", font.page)).bold());
            current_page = Some(font.page);
        }
        println!("{font}");
    }

    Ok(())
}
