//! Command-line interface for pdfdeck.
//!
//! This file is also compiled by `build.rs` to render the man page, so it
//! may only depend on `clap` and the `pdfdeck` library.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pdfdeck::config::{Config, OverwriteMode, PageRange, Rotation, parse_positions};
use pdfdeck::error::{PdfDeckError, Result};
use pdfdeck::utils::collect_paths_for_patterns;

/// Arrange PDF files and pages.
///
/// pdfdeck merges files in a chosen order and rearranges the pages of a
/// single file: reorder, rotate, shift, delete or extract.
#[derive(Parser, Debug)]
#[command(name = "pdfdeck")]
#[command(version)]
#[command(about = "Arrange PDF files and pages", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Output PDF file path
    ///
    /// Required unless --dry-run is given.
    #[arg(short, long, value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    /// Show the resulting arrangement without writing anything
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, env = "PDFDECK_QUIET")]
    #[arg(conflicts_with = "verbose")]
    pub quiet: bool,

    /// Overwrite an existing output file without asking
    #[arg(short, long, global = true, env = "PDFDECK_FORCE")]
    pub force: bool,

    /// Never overwrite an existing output file
    #[arg(long, global = true, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Write streams as they are instead of compressing them
    #[arg(long, global = true)]
    pub no_compress: bool,

    /// Print the final arrangement as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,
}

/// What to do.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Merge several PDFs into one
    ///
    /// Examples:
    ///   pdfdeck merge a.pdf b.pdf -o out.pdf
    ///   pdfdeck merge 'chapter*.pdf' --order 2,1,3 -o book.pdf
    Merge {
        /// Input files or glob patterns, in merge order
        #[arg(required = true, value_name = "FILE")]
        inputs: Vec<String>,

        /// Reorder inputs by position, e.g. "3,1,2"
        #[arg(long, value_name = "POSITIONS")]
        order: Option<String>,
    },

    /// Rearrange the pages of one PDF
    ///
    /// Options are applied in this order: --order, --pages, --rotate,
    /// --shift, --delete. Page numbers always refer to the input file.
    ///
    /// Examples:
    ///   pdfdeck edit in.pdf --order 3,1,2 -o out.pdf
    ///   pdfdeck edit in.pdf --pages 2-4 --rotate 90 -o out.pdf
    ///   pdfdeck edit in.pdf --pages 5 --shift -2 -o out.pdf
    Edit {
        /// Input PDF
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// New page order as source page numbers, e.g. "3,1,2"
        #[arg(long, value_name = "PAGES")]
        order: Option<String>,

        /// Pages to act on, e.g. "1-3,7"
        #[arg(long, value_name = "RANGE")]
        pages: Option<String>,

        /// Rotate the chosen pages (all pages without --pages)
        #[arg(long, value_name = "DEGREES", allow_negative_numbers = true)]
        rotate: Option<i32>,

        /// Move the chosen pages by N positions (negative moves up)
        #[arg(long, value_name = "N", allow_negative_numbers = true, requires = "pages")]
        shift: Option<isize>,

        /// Delete the chosen pages
        #[arg(long, requires = "pages")]
        delete: bool,
    },

    /// Extract pages of one PDF into a new file
    ///
    /// Example:
    ///   pdfdeck split in.pdf --pages 1-3 -o first.pdf
    Split {
        /// Input PDF
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Pages to extract, e.g. "1-3,7"
        #[arg(long, value_name = "RANGE", required = true)]
        pages: String,
    },
}

/// Parsed `edit` options.
#[derive(Debug, Clone, Default)]
pub struct EditPlan {
    /// New order as source page numbers.
    pub order: Option<Vec<u32>>,
    /// Pages to act on.
    pub pages: Option<PageRange>,
    /// Rotation for the chosen pages.
    pub rotate: Option<Rotation>,
    /// Offset for the chosen pages.
    pub shift: Option<isize>,
    /// Delete the chosen pages.
    pub delete: bool,
}

impl Cli {
    /// Build the run configuration, expanding glob inputs.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a missing `--output`, bad patterns or an
    /// invalid combination of options.
    pub fn to_config(&self) -> Result<Config> {
        let inputs = match &self.command {
            Command::Merge { inputs, .. } => collect_paths_for_patterns(inputs)?,
            Command::Edit { input, .. } | Command::Split { input, .. } => vec![input.clone()],
        };

        let output = match &self.global.output {
            Some(output) => output.clone(),
            None if self.global.dry_run => PathBuf::new(),
            None => {
                return Err(PdfDeckError::invalid_config(
                    "--output is required unless --dry-run is given",
                ));
            }
        };

        let config = Config {
            inputs,
            output,
            dry_run: self.global.dry_run,
            verbose: self.global.verbose,
            quiet: self.global.quiet,
            overwrite_mode: self.overwrite_mode(),
            compress: !self.global.no_compress,
            json: self.global.json,
        };

        config.validate()?;
        Ok(config)
    }

    /// Resolve `--force` / `--no-clobber`.
    pub fn overwrite_mode(&self) -> OverwriteMode {
        if self.global.force {
            OverwriteMode::Force
        } else if self.global.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        }
    }

    /// Positions given to `merge --order`, if any.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a malformed list.
    pub fn merge_order(&self) -> Result<Option<Vec<u32>>> {
        match &self.command {
            Command::Merge {
                order: Some(order), ..
            } => parse_positions(order).map(Some),
            _ => Ok(None),
        }
    }

    /// Parse the `edit` options.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a malformed order, range or rotation.
    pub fn edit_plan(&self) -> Result<EditPlan> {
        let Command::Edit {
            order,
            pages,
            rotate,
            shift,
            delete,
            ..
        } = &self.command
        else {
            return Ok(EditPlan::default());
        };

        Ok(EditPlan {
            order: order.as_deref().map(parse_positions).transpose()?,
            pages: pages.as_deref().map(parse_range).transpose()?,
            rotate: rotate.map(Rotation::from_degrees).transpose()?,
            shift: *shift,
            delete: *delete,
        })
    }

    /// Parse `split --pages`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a malformed range.
    pub fn split_range(&self) -> Result<Option<PageRange>> {
        match &self.command {
            Command::Split { pages, .. } => parse_range(pages).map(Some),
            _ => Ok(None),
        }
    }
}

fn parse_range(s: &str) -> Result<PageRange> {
    PageRange::parse(s).map_err(|e| PdfDeckError::invalid_config(format!("{e:#}")))
}
