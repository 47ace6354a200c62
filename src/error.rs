use std::path::PathBuf;

/// A single frame that could not be copied.
#[derive(Debug, thiserror::Error)]
#[error(
    "failed to copy frame {frame} of {filename} (directory {directory}) from {} to {}: {source}",
    .input_path.display(),
    .output_path.display()
)]
pub struct CopyError {
    pub directory: String,
    pub filename: String,
    pub frame: u32,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Every failure that stops a conversion run.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Annotation discovery failed for {}: {message}", .path.display())]
    Discovery { path: PathBuf, message: String },

    #[error("Failed to parse {}{}: {message}", .path.display(), line_suffix(.line))]
    Parse {
        path: PathBuf,
        line: Option<usize>,
        message: String,
    },

    #[error("{} frame(s) could not be copied:\n{}", .0.len(), format_copy_errors(.0))]
    CopyFailures(Vec<CopyError>),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start the copy thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("CSV error on {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl ConvertError {
    pub fn parse(path: impl Into<PathBuf>, line: Option<usize>, message: impl Into<String>) -> Self {
        ConvertError::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    pub fn discovery(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConvertError::Discovery {
            path: path.into(),
            message: message.into(),
        }
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" (line {})", line),
        None => String::new(),
    }
}

fn format_copy_errors(errors: &[CopyError]) -> String {
    errors
        .iter()
        .map(|err| format!("  - {}", err))
        .collect::<Vec<_>>()
        .join("\n")
}
