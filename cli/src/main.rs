//! pdfchunk CLI - caption linking and retrieval chunking tool

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfchunk::{
    build_chunks, chunks_to_json, to_json, ChunkerOptions, DocumentStructure, JsonFormat,
    JsonPageSource, LinkerConfig, PageSource, Pipeline, PipelineOptions,
};

#[derive(Parser)]
#[command(name = "pdfchunk")]
#[command(version)]
#[command(about = "Link PDF page content to tables/figures and build retrieval chunks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Link captions and paragraphs to tables/figures
    Link {
        /// Raw extraction dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Disable parallel page processing
        #[arg(long)]
        sequential: bool,

        /// Per-page processing budget in seconds
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,

        /// Paragraph linking window in page units
        #[arg(long, value_name = "DIST")]
        max_distance: Option<f32>,

        /// Cap caption-to-object linking distance (uncapped by default)
        #[arg(long, value_name = "DIST")]
        caption_cap: Option<f32>,
    },

    /// Build retrieval chunks from a linked document
    Chunks {
        /// Linked document (JSON, produced by `link`)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Maximum characters per chunk
        #[arg(long, default_value = "1600", value_name = "CHARS")]
        max_chars: usize,
    },

    /// Run both phases: link, then chunk
    Run {
        /// Raw extraction dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Disable parallel page processing
        #[arg(long)]
        sequential: bool,

        /// Per-page processing budget in seconds
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,

        /// Maximum characters per chunk
        #[arg(long, default_value = "1600", value_name = "CHARS")]
        max_chars: usize,
    },

    /// Show linked document statistics
    Info {
        /// Linked document (JSON, produced by `link`)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Link {
            input,
            output,
            compact,
            sequential,
            timeout_secs,
            max_distance,
            caption_cap,
        } => cmd_link(
            &input,
            output.as_deref(),
            compact,
            build_pipeline_options(sequential, timeout_secs, max_distance, caption_cap),
        ),
        Commands::Chunks {
            input,
            output,
            compact,
            max_chars,
        } => cmd_chunks(&input, output.as_deref(), compact, max_chars),
        Commands::Run {
            input,
            output,
            sequential,
            timeout_secs,
            max_chars,
        } => cmd_run(
            &input,
            output.as_deref(),
            build_pipeline_options(sequential, timeout_secs, None, None),
            max_chars,
        ),
        Commands::Info { input } => cmd_info(&input),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_pipeline_options(
    sequential: bool,
    timeout_secs: Option<u64>,
    max_distance: Option<f32>,
    caption_cap: Option<f32>,
) -> PipelineOptions {
    let mut linker = LinkerConfig::new();
    if let Some(distance) = max_distance {
        linker = linker.with_paragraph_max_distance(distance);
    }
    if let Some(cap) = caption_cap {
        linker = linker.with_caption_distance_cap(cap);
    }

    let mut options = PipelineOptions::new()
        .with_linker(linker)
        .with_parallel(!sequential);
    if let Some(secs) = timeout_secs {
        options = options.with_page_timeout(Duration::from_secs(secs));
    }
    options
}

fn link_document(
    input: &Path,
    options: PipelineOptions,
) -> Result<DocumentStructure, Box<dyn std::error::Error>> {
    log::debug!("reading extraction dump {}", input.display());
    let source = JsonPageSource::open(input)?;
    let document_id = source.document_id().to_string();
    let page_count = source.page_count();

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Linking {} pages...", page_count));
    pb.enable_steady_tick(Duration::from_millis(100));

    let doc = Pipeline::new(options).process(&document_id, Arc::new(source))?;
    pb.finish_and_clear();

    if !doc.failures.is_empty() {
        println!(
            "{} {} page(s) degraded",
            "Warning:".yellow().bold(),
            doc.failures.len()
        );
        for failure in &doc.failures {
            println!("  {} page {}: {}", "├─".dimmed(), failure.page, failure.message);
        }
    }

    Ok(doc)
}

fn write_or_print(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            println!("{} {}", "Saved:".green().bold(), path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn cmd_link(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    options: PipelineOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = link_document(input, options)?;
    print_link_summary(&doc);

    let format = if compact { JsonFormat::Compact } else { JsonFormat::Pretty };
    write_or_print(&to_json(&doc, format)?, output)
}

fn cmd_chunks(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    max_chars: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read_to_string(input)?;
    let doc: DocumentStructure = serde_json::from_str(&data)?;

    let chunks = build_chunks(&doc, &ChunkerOptions::new().with_max_chars(max_chars));
    println!(
        "{} {} chunks from {} pages",
        "Assembled:".green().bold(),
        chunks.len(),
        doc.page_count()
    );

    let format = if compact { JsonFormat::Compact } else { JsonFormat::Pretty };
    write_or_print(&chunks_to_json(&chunks, format)?, output)
}

fn cmd_run(
    input: &Path,
    output: Option<&Path>,
    options: PipelineOptions,
    max_chars: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });
    fs::create_dir_all(&output_dir)?;

    let stem = input.file_stem().unwrap_or_default().to_string_lossy().to_string();

    let doc = link_document(input, options)?;
    print_link_summary(&doc);
    let linked_path = output_dir.join(format!("{}_linked.json", stem));
    fs::write(&linked_path, to_json(&doc, JsonFormat::Pretty)?)?;

    let chunks = build_chunks(&doc, &ChunkerOptions::new().with_max_chars(max_chars));
    let chunks_path = output_dir.join(format!("{}_chunks.json", stem));
    fs::write(&chunks_path, chunks_to_json(&chunks, JsonFormat::Pretty)?)?;

    println!("\n{}", "Output files:".green().bold());
    println!("  {} {}", "├─".dimmed(), linked_path.display());
    println!("  {} {}", "└─".dimmed(), chunks_path.display());
    println!("{} {} chunks", "Total:".green().bold(), chunks.len());

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read_to_string(input)?;
    let doc: DocumentStructure = serde_json::from_str(&data)?;

    println!("{}", "Document".green().bold());
    println!("  id:        {}", doc.document_id);
    println!("  generated: {}", doc.generated_at.to_rfc3339());
    println!("  pages:     {}", doc.page_count());
    println!("  captions:  {}", doc.caption_count());
    println!("  tables:    {}", doc.table_count());
    println!("  images:    {}", doc.image_count());
    println!("  failures:  {}", doc.failures.len());

    for page in &doc.pages {
        println!(
            "  {} page {}: {} blocks, {} tables, {} images",
            "├─".dimmed(),
            page.page_number,
            page.blocks.len(),
            page.tables.len(),
            page.images.len()
        );
    }

    Ok(())
}

fn print_link_summary(doc: &DocumentStructure) {
    println!(
        "{} {} pages, {} captions, {} tables, {} images",
        "Linked:".green().bold(),
        doc.page_count(),
        doc.caption_count(),
        doc.table_count(),
        doc.image_count()
    );
}
