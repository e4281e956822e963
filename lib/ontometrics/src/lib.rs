//! Ontometrics computes descriptive metrics over RDF/OWL ontologies written in [Turtle](https://www.w3.org/TR/turtle/).
//!
//! Every `*.ttl` file of a directory is parsed into an in-memory [`Graph`](oxrdf::Graph), its IRIs are classified into classes, individuals and properties,
//! and counts, property densities and text statistics are computed per file and over all files.
//! The result is written as an Excel workbook or as a CSV table.
//!
//! Usage example:
//! ```
//! use ontometrics::loader::OntologySource;
//! use ontometrics::metrics::{Metric, MetricValue, MetricsRecord};
//! use ontometrics::profile::OntologyProfile;
//!
//! let source = OntologySource::from_text(
//!     "zoo.ttl",
//!     "@prefix owl: <http://www.w3.org/2002/07/owl#> .
//!      @prefix ex: <http://example.com/> .
//!      ex:Animal a owl:Class .
//!      ex:hasName a owl:DatatypeProperty .
//!      ex:Dog a ex:Animal ; ex:hasName \"Rex\" .",
//! );
//! let profile = OntologyProfile::build(&source.parse()?, source.raw_stats());
//! let record = MetricsRecord::from_profile(&profile, 0);
//! assert_eq!(record.get(Metric::TotalClasses), MetricValue::Count(1));
//! assert_eq!(record.get(Metric::MeanClassPropertyDensity), MetricValue::Ratio(1.0));
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

pub mod batch;
pub mod classify;
mod error;
pub mod export;
pub mod loader;
pub mod metrics;
pub mod profile;
pub mod report;
pub mod text;
pub mod vocab;

pub use crate::batch::{BatchOptions, BatchReport, run};
pub use crate::error::{BatchError, ExportError, LoadError};
pub use crate::export::{ReportFormat, export};
