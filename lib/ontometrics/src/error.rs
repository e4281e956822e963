use oxttl::TurtleSyntaxError;
use std::io;
use std::path::PathBuf;

/// An error that makes a single ontology file unusable.
///
/// The batch runner skips the file and carries on with the next one.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read (missing, unreadable or not UTF-8).
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file is not valid Turtle.
    #[error("Invalid Turtle in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: TurtleSyntaxError,
    },
    /// The file parsed but contains no triple.
    #[error("{} contains no triples", path.display())]
    EmptyGraph { path: PathBuf },
}

impl LoadError {
    /// A short, path-free description of the failure, suitable for a report cell.
    pub fn reason(&self) -> String {
        match self {
            Self::Io { source, .. } => format!("I/O error: {source}"),
            Self::Parse { source, .. } => format!("Parse error: {source}"),
            Self::EmptyGraph { .. } => "No triples".into(),
        }
    }
}

/// An error that aborts the whole batch.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// The input directory could not be listed.
    #[error("Failed to list the input directory {}: {source}", path.display())]
    InputDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Not a single file could be analyzed.
    #[error("No ontology file could be processed ({skipped} skipped)")]
    NoFilesProcessed { skipped: usize },
}

/// An error raised while writing the report.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
