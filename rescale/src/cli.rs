//! Command-line argument handling
//!
//! Number validation, output path derivation, and process exit codes for
//! the `rescale` binary.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

/// Process exit status for a failed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Reading, decoding, resizing, encoding or writing failed
    Generic = 1,
    /// The command line was unusable
    InvalidArgs = 2,
}

impl From<ErrorCode> for ExitCode {
    fn from(code: ErrorCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Reasons a string is not a positive finite number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("Not a number")]
    NotANumber,
    #[error("Number is NaN")]
    NaN,
    #[error("Number is not finite")]
    NotFinite,
    #[error("Number is zero")]
    Zero,
    #[error("Number is negative")]
    Negative,
    #[error("Number is less than one")]
    LessThanOne,
}

/// Invalid command-line input detected after parsing
#[derive(Debug, Error)]
pub enum ArgError {
    #[error("Source file has no extension: {}", .0.display())]
    NoExtension(PathBuf),
}

/// Parse a positive finite number.
///
/// Checks run in order: parseable, not NaN, finite, non-zero, non-negative.
pub fn parse_positive_number(value: &str) -> Result<f64, NumberError> {
    let number: f64 = value.trim().parse().map_err(|_| NumberError::NotANumber)?;
    if number.is_nan() {
        Err(NumberError::NaN)
    } else if !number.is_finite() {
        Err(NumberError::NotFinite)
    } else if number == 0.0 {
        Err(NumberError::Zero)
    } else if number < 0.0 {
        Err(NumberError::Negative)
    } else {
        Ok(number)
    }
}

/// Parse a worker count: a positive number, truncated toward zero.
pub fn parse_worker_count(value: &str) -> Result<usize, NumberError> {
    let number = parse_positive_number(value)?.trunc();
    if number < 1.0 {
        return Err(NumberError::LessThanOne);
    }
    Ok(number as usize)
}

/// Derive the path the resized image is written to.
///
/// With no `out_file`, the result sits next to `source` as
/// `"<stem> (resized).<ext>"`. An `out_file` without an extension borrows
/// the source's extension.
///
/// # Errors
///
/// Returns [`ArgError::NoExtension`] if `source` has no extension.
pub fn output_path(source: &Path, out_file: Option<&Path>) -> Result<PathBuf, ArgError> {
    let source_ext = non_empty_extension(source)
        .ok_or_else(|| ArgError::NoExtension(source.to_path_buf()))?;

    let (dir, stem, ext) = match out_file {
        Some(out) => match non_empty_extension(out) {
            Some(ext) => (out.parent(), stem_of(out), ext),
            None => (
                out.parent(),
                out.file_name().unwrap_or_default().to_string_lossy().into_owned(),
                source_ext,
            ),
        },
        None => (
            source.parent(),
            format!("{} (resized)", stem_of(source)),
            source_ext,
        ),
    };

    let file_name = format!("{stem}.{ext}");
    Ok(match dir {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    })
}

fn non_empty_extension(path: &Path) -> Option<String> {
    path.extension()
        .filter(|ext| !ext.is_empty())
        .map(|ext| ext.to_string_lossy().into_owned())
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}
