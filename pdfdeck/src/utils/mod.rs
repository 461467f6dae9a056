//! Small helpers: human-readable sizes and input path expansion.

use std::path::PathBuf;

use crate::error::{PdfDeckError, Result};

/// Format a byte count as a human-readable string.
///
/// ```
/// use pdfdeck::utils::format_file_size;
///
/// assert_eq!(format_file_size(1536), "1.50 KB");
/// ```
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}

/// Expand input arguments into file paths, preserving argument order.
///
/// Arguments containing glob metacharacters are expanded (matches sorted
/// by the glob crate); anything else is passed through untouched so a
/// missing plain file is reported later as `FileNotFound` instead of
/// silently disappearing.
///
/// # Errors
///
/// Returns `InvalidConfig` for malformed patterns and `Other` for
/// filesystem errors hit while walking a pattern.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        if !is_glob(pattern) {
            resolved.push(PathBuf::from(pattern));
            continue;
        }

        let paths = glob::glob(pattern).map_err(|err| {
            PdfDeckError::invalid_config(format!("Invalid pattern '{pattern}': {err}"))
        })?;

        for entry in paths {
            resolved.push(entry.map_err(|err| PdfDeckError::other(err.to_string()))?);
        }
    }

    Ok(resolved)
}

fn is_glob(s: &str) -> bool {
    s.contains(['*', '?', '['])
}
