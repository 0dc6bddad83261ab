//! Error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages
//! - Suggested fixes
//! - Proper exit codes for scripting

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading an archive or writing a report
#[derive(Error, Debug)]
pub enum ApkSizeError {
    /// Archive file could not be opened
    #[error("Cannot open archive: {path}")]
    ArchiveOpen {
        /// Path to the archive file
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Archive opened but its central directory could not be read
    #[error("Cannot read archive: {path}")]
    ArchiveRead {
        /// Path to the archive file
        path: PathBuf,
        #[source]
        /// ZIP error source
        source: zip::result::ZipError,
    },

    /// Export target could not be written
    #[error("Export failed: {path}")]
    ExportFailed {
        /// Path to the export file
        path: PathBuf,
        /// Description of what went wrong
        message: String,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl ApkSizeError {
    /// Get an actionable suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ArchiveOpen { path, .. } => Some(format!(
                "Check that {} exists and is a readable .apk or .aab file",
                path.display()
            )),
            Self::ArchiveRead { path, .. } => Some(format!(
                "{} does not look like a valid ZIP-based archive",
                path.display()
            )),
            Self::ExportFailed { path, .. } => Some(format!(
                "Check that {} is writable and not open in another program",
                path.display()
            )),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get the appropriate exit code for this error.
    ///
    /// Follows sysexits.h conventions.
    ///
    /// # Examples
    ///
    /// ```
    /// use apksize::error::ApkSizeError;
    /// use std::path::PathBuf;
    ///
    /// let error = ApkSizeError::ArchiveOpen {
    ///     path: PathBuf::from("missing.apk"),
    ///     source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
    /// };
    ///
    /// assert_eq!(error.exit_code(), 66); // EX_NOINPUT
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ArchiveOpen { .. } => 66, // EX_NOINPUT (sysexits.h)
            Self::ArchiveRead { .. } => 65, // EX_DATAERR
            Self::ExportFailed { .. } => 74, // EX_IOERR
            Self::Io { .. } => 74,          // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format an error chain with suggestions
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(apk_error) = error.downcast_ref::<ApkSizeError>() {
            if let Some(suggestion) = apk_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from an error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(apk_error) = error.downcast_ref::<ApkSizeError>() {
            apk_error.exit_code()
        } else {
            1 // Generic error
        }
    }
}
