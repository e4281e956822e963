//! Runs the analysis over every ontology file of a directory.

use crate::classify::RoleSet;
use crate::error::{BatchError, LoadError};
use crate::export::ReportFormat;
use crate::loader::{OntologySource, file_name};
use crate::metrics::MetricsRecord;
use crate::profile::OntologyProfile;
use crate::text::RawTextStats;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Directory scanned when none is given.
pub const DEFAULT_INPUT_DIR: &str = "ttl";
/// Report written when no output is given.
pub const DEFAULT_OUTPUT: &str = "ontology_metrics.xlsx";
/// Row key of the combined record.
pub const COMBINED_KEY: &str = "ALL";

/// The resolved settings of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    input_dir: PathBuf,
    output: PathBuf,
    format: ReportFormat,
}

impl BatchOptions {
    /// The format is guessed from the extension of `output` and defaults to a workbook.
    pub fn new(input_dir: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        let output = output.into();
        Self {
            format: ReportFormat::from_path(&output).unwrap_or_default(),
            input_dir: input_dir.into(),
            output,
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    #[inline]
    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    #[inline]
    pub fn output(&self) -> &Path {
        &self.output
    }

    #[inline]
    pub fn format(&self) -> ReportFormat {
        self.format
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_DIR, DEFAULT_OUTPUT)
    }
}

/// Lists the `*.ttl` files of `dir`, sorted by file name.
///
/// The extension is matched case-insensitively and sub-directories are not visited.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let to_error = |source| BatchError::InputDirectory {
        path: dir.to_owned(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(to_error)? {
        let entry = entry.map_err(to_error)?;
        let path = entry.path();
        let is_turtle = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("ttl"));
        if is_turtle && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Analyzes every ontology file of `dir`.
///
/// Files that cannot be read or parsed are recorded in [`BatchReport::skipped`] and do not stop the run.
/// It fails only if the directory cannot be listed or if no file at all could be analyzed.
pub fn run(dir: &Path) -> Result<BatchReport, BatchError> {
    let files = discover(dir)?;
    info!(dir = %dir.display(), files = files.len(), "Analyzing ontology files");
    let mut accumulator = Accumulator::default();
    for path in files {
        let source = match OntologySource::read(&path) {
            Ok(source) => source,
            Err(error) => {
                accumulator.skip(file_name(&path), error, None);
                continue;
            }
        };
        let raw = source.raw_stats();
        match source.parse() {
            Ok(graph) => {
                let profile = OntologyProfile::build(&graph, raw);
                debug!(
                    file = source.name(),
                    triples = profile.triples(),
                    "Analyzed ontology file"
                );
                accumulator.add(source.name(), profile);
            }
            Err(error) => accumulator.skip(source.name(), error, Some(raw)),
        }
    }
    accumulator.finish()
}

/// The running state of a batch: the analyzed files, the combined profile and the skipped files.
///
/// Files must be added in the order they should appear in the report.
#[derive(Debug, Default)]
pub struct Accumulator {
    files: Vec<(String, OntologyProfile)>,
    combined: OntologyProfile,
    /// For every classified term, the indices of the files classifying it.
    term_files: BTreeMap<String, Vec<usize>>,
    skipped: Vec<SkippedFile>,
}

impl Accumulator {
    /// Adds the profile of a successfully analyzed file.
    pub fn add(&mut self, name: impl Into<String>, profile: OntologyProfile) {
        let index = self.files.len();
        for (term, _) in profile.classification().terms() {
            if let Some(files) = self.term_files.get_mut(term) {
                files.push(index);
            } else {
                self.term_files.insert(term.to_owned(), vec![index]);
            }
        }
        self.combined.merge(profile.clone());
        self.files.push((name.into(), profile));
    }

    /// Records a file that could not be analyzed.
    pub fn skip(&mut self, name: impl Into<String>, error: LoadError, raw: Option<RawTextStats>) {
        let name = name.into();
        warn!(file = %name, error = %error, "Skipping ontology file");
        self.skipped.push(SkippedFile { name, error, raw });
    }

    /// Computes the metrics of every file and of the combination.
    pub fn finish(self) -> Result<BatchReport, BatchError> {
        if self.files.is_empty() {
            return Err(BatchError::NoFilesProcessed {
                skipped: self.skipped.len(),
            });
        }
        let shared_by_file = (0..self.files.len())
            .map(|index| {
                self.term_files
                    .values()
                    .filter(|files| files.len() > 1 && files.contains(&index))
                    .count() as u64
            })
            .collect::<Vec<_>>();
        let shared = self
            .term_files
            .iter()
            .filter(|(_, files)| files.len() > 1)
            .map(|(term, files)| SharedTerm {
                roles: self.combined.classification().roles(term),
                files: files
                    .iter()
                    .map(|index| self.files[*index].0.clone())
                    .collect(),
                term: term.clone(),
            })
            .collect::<Vec<_>>();
        let files = self
            .files
            .into_iter()
            .zip(shared_by_file)
            .map(|((name, profile), shared_terms)| FileReport {
                record: MetricsRecord::from_profile(&profile, shared_terms),
                name,
                profile,
            })
            .collect::<Vec<_>>();
        let combined = FileReport {
            name: COMBINED_KEY.into(),
            record: MetricsRecord::from_profile(&self.combined, shared.len() as u64),
            profile: self.combined,
        };
        Ok(BatchReport {
            files,
            combined,
            shared,
            skipped: self.skipped,
        })
    }
}

/// The outcome of a batch.
#[derive(Debug)]
pub struct BatchReport {
    /// The analyzed files, in processing order.
    pub files: Vec<FileReport>,
    /// The merge of every analyzed file, keyed [`COMBINED_KEY`].
    pub combined: FileReport,
    /// Terms classified in more than one file, sorted by IRI.
    pub shared: Vec<SharedTerm>,
    pub skipped: Vec<SkippedFile>,
}

/// The profile and metrics of one file, or of the combination of all files.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub name: String,
    pub profile: OntologyProfile,
    pub record: MetricsRecord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedTerm {
    pub term: String,
    /// Union of the roles the term holds in any file.
    pub roles: RoleSet,
    pub files: Vec<String>,
}

/// A file left out of the report.
#[derive(Debug)]
pub struct SkippedFile {
    pub name: String,
    pub error: LoadError,
    /// Raw statistics, available whenever the file could be read.
    pub raw: Option<RawTextStats>,
}
