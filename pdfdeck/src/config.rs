//! Configuration types shared by the workflows and the CLI.
//!
//! - [`Rotation`] is a user request ("turn these pages 90 degrees");
//!   [`PageRotation`] is the per-page attribute that accumulates requests.
//! - [`PageRange`] parses page selections such as `"1-3,7"`.
//! - [`Config`] carries output behaviour for one run.

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{PdfDeckError, Result};

/// A quarter-turn rotation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    /// Rotate 90 degrees clockwise.
    Clockwise90,
    /// Rotate 180 degrees.
    Rotate180,
    /// Rotate 270 degrees clockwise (90 counter-clockwise).
    Clockwise270,
}

impl Rotation {
    /// Parse rotation from degrees. Negative quarter turns are accepted and
    /// normalised, so `-90` means `270`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless the value is a non-zero multiple of 90.
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        match degrees.rem_euclid(360) {
            90 => Ok(Self::Clockwise90),
            180 => Ok(Self::Rotate180),
            270 => Ok(Self::Clockwise270),
            _ => Err(PdfDeckError::invalid_config(format!(
                "Invalid rotation: {degrees}. Must be 90, 180, 270 or -90"
            ))),
        }
    }

    /// Get rotation as degrees.
    pub fn as_degrees(&self) -> u16 {
        match self {
            Self::Clockwise90 => 90,
            Self::Rotate180 => 180,
            Self::Clockwise270 => 270,
        }
    }
}

impl FromStr for Rotation {
    type Err = PdfDeckError;

    fn from_str(s: &str) -> Result<Self> {
        let degrees: i32 = s
            .trim()
            .parse()
            .map_err(|_| PdfDeckError::invalid_config(format!("Invalid rotation degrees: {s}")))?;
        Self::from_degrees(degrees)
    }
}

/// Accumulated rotation carried by a page while it is being arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageRotation {
    /// No rotation.
    #[default]
    None,
    /// Rotate 90 degrees clockwise.
    Clockwise90,
    /// Rotate 180 degrees.
    Rotate180,
    /// Rotate 270 degrees clockwise.
    Clockwise270,
}

impl From<Rotation> for PageRotation {
    fn from(rotation: Rotation) -> Self {
        match rotation {
            Rotation::Clockwise90 => PageRotation::Clockwise90,
            Rotation::Rotate180 => PageRotation::Rotate180,
            Rotation::Clockwise270 => PageRotation::Clockwise270,
        }
    }
}

impl PageRotation {
    /// Get rotation as degrees.
    pub fn as_degrees(&self) -> i64 {
        match self {
            Self::None => 0,
            Self::Clockwise90 => 90,
            Self::Rotate180 => 180,
            Self::Clockwise270 => 270,
        }
    }

    /// Apply another rotation on top of this one.
    pub fn rotated_by(self, rotation: Rotation) -> Self {
        Self::from_normalized(self.as_degrees() + i64::from(rotation.as_degrees()))
    }

    fn from_normalized(degrees: i64) -> Self {
        match degrees.rem_euclid(360) {
            90 => Self::Clockwise90,
            180 => Self::Rotate180,
            270 => Self::Clockwise270,
            _ => Self::None,
        }
    }
}

/// Page selection such as `"1-5,10"`.
///
/// Page numbers are 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    spans: Vec<(u32, u32)>,
    source: String,
}

impl PageRange {
    /// Parse a page range string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty, has a zero page, a reversed
    /// span, or anything that is not a number.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfdeck::config::PageRange;
    ///
    /// let range = PageRange::parse("1-5,10").unwrap();
    /// assert!(range.contains(3));
    /// assert!(range.contains(10));
    /// assert!(!range.contains(7));
    /// ```
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        let mut spans = Vec::new();

        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (start, end) = match part.split_once('-') {
                Some((start, end)) => (parse_page(start)?, parse_page(end)?),
                None => {
                    let page = parse_page(part)?;
                    (page, page)
                }
            };

            if start > end {
                bail!("Invalid range {start}-{end}: start page must not exceed end page");
            }

            spans.push((start, end));
        }

        if spans.is_empty() {
            bail!("Page range cannot be empty");
        }

        Ok(Self {
            spans,
            source: s.trim().to_string(),
        })
    }

    /// Check if a page number is included in this range.
    pub fn contains(&self, page: u32) -> bool {
        self.spans
            .iter()
            .any(|&(start, end)| (start..=end).contains(&page))
    }

    /// All page numbers in this range up to `max_pages`, sorted and unique.
    pub fn to_pages(&self, max_pages: u32) -> Vec<u32> {
        (1..=max_pages).filter(|p| self.contains(*p)).collect()
    }

    /// Highest page number the range mentions.
    pub fn last_page(&self) -> u32 {
        self.spans.iter().map(|&(_, end)| end).max().unwrap_or(0)
    }

    /// Check the range against a document with `total_pages` pages.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPageRange` if the range names a page past the end.
    pub fn check_against(&self, total_pages: usize) -> Result<()> {
        if self.last_page() as usize > total_pages {
            return Err(PdfDeckError::InvalidPageRange {
                range: self.source.clone(),
                total_pages,
            });
        }
        Ok(())
    }
}

impl FromStr for PageRange {
    type Err = PdfDeckError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).map_err(|e| PdfDeckError::invalid_config(e.to_string()))
    }
}

fn parse_page(s: &str) -> anyhow::Result<u32> {
    let page: u32 = s
        .trim()
        .parse()
        .with_context(|| format!("Invalid page number: {s}"))?;

    if page == 0 {
        bail!("Page numbers must be positive (1-indexed)");
    }

    Ok(page)
}

/// Parse a comma separated list of 1-indexed positions, e.g. `"3,1,2"`.
///
/// # Errors
///
/// Returns `InvalidConfig` on an empty list, a zero, or a non-number.
pub fn parse_positions(s: &str) -> Result<Vec<u32>> {
    let positions = s
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(parse_page)
        .collect::<anyhow::Result<Vec<_>>>()
        .map_err(|e| PdfDeckError::invalid_config(e.to_string()))?;

    if positions.is_empty() {
        return Err(PdfDeckError::invalid_config("Order cannot be empty"));
    }

    Ok(positions)
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Output settings for one pdfdeck run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input paths, in the order they were given.
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path.
    pub output: PathBuf,

    /// Arrange and report, but do not write.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compress streams when writing.
    pub compress: bool,

    /// Print the final arrangement as JSON.
    pub json: bool,
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if there are no inputs, verbose and quiet are
    /// both set, or the output path is also an input.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(PdfDeckError::invalid_config("No input files specified"));
        }

        if self.verbose && self.quiet {
            return Err(PdfDeckError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if self.inputs.iter().any(|input| input == &self.output) {
            return Err(PdfDeckError::invalid_config(format!(
                "Output file cannot be the same as an input file: {}",
                self.output.display()
            )));
        }

        Ok(())
    }

    /// Whether progress output should be shown. Dry runs always report.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}
