//! pdfdeck - Arrange PDF files and pages.

mod cli;

use clap::Parser;
use lopdf::Document;
use std::process;
use tracing::debug;

use crate::cli::{Cli, Command, EditPlan};
use pdfdeck::config::{Config, OverwriteMode, PageRange};
use pdfdeck::error::PdfDeckError;
use pdfdeck::io::{PdfReader, PdfWriter, WriteStatistics};
use pdfdeck::output::{
    OutputFormatter, display_files, display_merge_summary, display_pages, file_items, page_items,
    to_json,
};
use pdfdeck::workflow::{MergeSession, PageEditSession};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default filter.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default = if verbose { "pdfdeck=debug" } else { "pdfdeck=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<(), PdfDeckError> {
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);
    debug!(inputs = config.inputs.len(), dry_run = config.dry_run, "Starting");

    if formatter.should_print() && !config.json {
        formatter.section(&format!("{} v{}", pdfdeck::NAME, pdfdeck::VERSION));
    }

    match &cli.command {
        Command::Merge { .. } => run_merge(&cli, &config, &formatter).await,
        Command::Edit { .. } => {
            let plan = cli.edit_plan()?;
            run_edit(&plan, &config, &formatter).await
        }
        Command::Split { .. } => {
            let range = cli
                .split_range()?
                .ok_or_else(|| PdfDeckError::invalid_config("split needs --pages"))?;
            run_split(&range, &config, &formatter).await
        }
    }
}

async fn run_merge(
    cli: &Cli,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<(), PdfDeckError> {
    formatter.info(&format!("Loading {} file(s)...", config.inputs.len()));

    let mut session = MergeSession::new();
    session.add_files(&config.inputs).await?;
    if let Some(order) = cli.merge_order()? {
        session.order_by_positions(&order)?;
    }

    if config.json {
        println!("{}", to_json(&file_items(session.files()))?);
    } else {
        display_files(formatter, session.files());
    }

    let result = session.build()?;
    let write = finish(&result.document, config, formatter).await?;
    if !config.json {
        display_merge_summary(formatter, &result.statistics, write.as_ref());
    }
    Ok(())
}

async fn run_edit(
    plan: &EditPlan,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<(), PdfDeckError> {
    let mut session = open_session(config).await?;
    apply_plan(&mut session, plan)?;

    if config.json {
        println!("{}", to_json(&page_items(session.pages()))?);
    } else {
        display_pages(formatter, session.pages());
    }

    let document = session.build()?;
    finish(&document, config, formatter).await?;
    Ok(())
}

async fn run_split(
    range: &PageRange,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<(), PdfDeckError> {
    let mut session = open_session(config).await?;
    session.select_range(range)?;

    if config.json {
        println!("{}", to_json(&page_items(session.pages()))?);
    } else {
        display_pages(formatter, session.pages());
    }

    let document = session.extract_selected()?;
    finish(&document, config, formatter).await?;
    Ok(())
}

async fn open_session(config: &Config) -> Result<PageEditSession, PdfDeckError> {
    let path = config
        .inputs
        .first()
        .ok_or_else(|| PdfDeckError::invalid_config("No input file specified"))?;
    let loaded = PdfReader::new().load(path).await?;
    Ok(PageEditSession::open(loaded))
}

/// Apply `edit` options in order: order, pages, rotate, shift, delete.
fn apply_plan(session: &mut PageEditSession, plan: &EditPlan) -> Result<(), PdfDeckError> {
    if let Some(order) = &plan.order {
        session.order_by_numbers(order)?;
    }

    if let Some(range) = &plan.pages {
        session.select_range(range)?;
    }

    if let Some(rotation) = plan.rotate {
        if plan.pages.is_some() {
            session.rotate_selected(rotation);
        } else {
            session.rotate_all(rotation);
        }
    }

    if let Some(delta) = plan.shift {
        session.pages_mut().move_selected_by_offset(delta);
    }

    if plan.delete {
        session.delete_selected();
    }

    Ok(())
}

/// Write `document` unless this is a dry run.
async fn finish(
    document: &Document,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<Option<WriteStatistics>, PdfDeckError> {
    if config.dry_run {
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        if !config.output.as_os_str().is_empty() {
            formatter.info(&format!("  Output would be: {}", config.output.display()));
        }
        return Ok(None);
    }

    handle_output_overwrite(config, formatter).await?;

    let writer = if config.compress {
        PdfWriter::new()
    } else {
        PdfWriter::without_compression()
    };
    writer.can_write(&config.output).await?;

    let stats = writer.save_with_stats(document, &config.output).await?;
    formatter.success(&format!(
        "Created {} ({})",
        config.output.display(),
        stats.format_file_size()
    ));
    formatter.detail(
        "Write time",
        &format!("{:.2}s", stats.write_time.as_secs_f64()),
    );

    Ok(Some(stats))
}

/// Handle output file overwrite scenarios.
async fn handle_output_overwrite(
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<(), PdfDeckError> {
    if !tokio::fs::try_exists(&config.output).await.unwrap_or(false) {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(PdfDeckError::output_exists(config.output.clone())),
        OverwriteMode::Prompt => {
            // Nobody to ask in quiet mode.
            if formatter.is_quiet() {
                return Err(PdfDeckError::output_exists(config.output.clone()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                config.output.display()
            ));

            use std::io::{self, Write};
            eprint!("Overwrite? [y/N]: ");
            io::stderr().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| PdfDeckError::other(format!("Failed to read input: {err}")))?;

            match response.trim().to_lowercase().as_str() {
                "y" | "yes" => Ok(()),
                _ => Err(PdfDeckError::Cancelled),
            }
        }
    }
}
