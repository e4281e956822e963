//! Reads Turtle files into in-memory graphs.

use crate::error::LoadError;
use crate::text::RawTextStats;
use oxrdf::Graph;
use oxttl::TurtleParser;
use std::fs;
use std::path::{Path, PathBuf, absolute};
use url::Url;

/// The content of an ontology file, read but not parsed yet.
///
/// Reading and parsing are separate steps so that [raw statistics](Self::raw_stats) are available even when the content is not valid Turtle.
#[derive(Debug, Clone)]
pub struct OntologySource {
    path: PathBuf,
    name: String,
    base_iri: Option<String>,
    text: String,
}

impl OntologySource {
    /// Reads the file at `path` as UTF-8 text.
    pub fn read(path: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let path = path.into();
        let text = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            name: file_name(&path),
            base_iri: file_base_iri(&path),
            path,
            text,
        })
    }

    /// Builds a source from in-memory text, relative IRIs are not allowed.
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: PathBuf::from(&name),
            name,
            base_iri: None,
            text: text.into(),
        }
    }

    /// The file name, used as the row key of the report.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn raw_stats(&self) -> RawTextStats {
        RawTextStats::new(&self.text)
    }

    /// Parses the text as Turtle.
    ///
    /// The first syntax error aborts the parsing. A content without any triple is rejected.
    pub fn parse(&self) -> Result<Graph, LoadError> {
        let parser = match self
            .base_iri
            .as_deref()
            .map(|base_iri| TurtleParser::new().with_base_iri(base_iri))
        {
            Some(Ok(parser)) => parser,
            Some(Err(e)) => {
                tracing::debug!(file = %self.path.display(), error = %e, "Ignoring invalid base IRI");
                TurtleParser::new()
            }
            None => TurtleParser::new(),
        };
        let mut graph = Graph::new();
        for triple in parser.for_slice(self.text.as_bytes()) {
            let triple = triple.map_err(|source| LoadError::Parse {
                path: self.path.clone(),
                source,
            })?;
            graph.insert(&triple);
        }
        if graph.is_empty() {
            return Err(LoadError::EmptyGraph {
                path: self.path.clone(),
            });
        }
        Ok(graph)
    }
}

/// The last component of `path`, or the whole path when it has none.
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

fn file_base_iri(path: &Path) -> Option<String> {
    let path = absolute(path).ok()?;
    Url::from_file_path(path).ok().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parse_valid_turtle() -> Result<(), LoadError> {
        let source = OntologySource::from_text(
            "zoo.ttl",
            "@prefix ex: <http://example.com/> .\nex:Dog a ex:Animal ; ex:name \"Rex\" .\n",
        );
        assert_eq!(source.name(), "zoo.ttl");
        assert_eq!(source.parse()?.len(), 2);
        Ok(())
    }

    #[test]
    fn duplicate_triples_collapse() -> Result<(), LoadError> {
        let source = OntologySource::from_text(
            "dup.ttl",
            "<http://example.com/s> <http://example.com/p> <http://example.com/o> .\n\
             <http://example.com/s> <http://example.com/p> <http://example.com/o> .\n",
        );
        assert_eq!(source.parse()?.len(), 1);
        Ok(())
    }

    #[test]
    fn malformed_turtle_is_a_parse_error() {
        let source = OntologySource::from_text("bad.ttl", "@prefix ex: <http://example.com/> .\nex:a ex:b");
        assert!(
            matches!(source.parse(), Err(LoadError::Parse { .. })),
            "truncated statement must not parse"
        );
        assert_eq!(source.raw_stats().lines(), 2);
    }

    #[test]
    fn empty_content_is_rejected() {
        let source = OntologySource::from_text("empty.ttl", "# only a comment\n");
        assert!(
            matches!(source.parse(), Err(LoadError::EmptyGraph { .. })),
            "a graph without triples is not an ontology"
        );
    }

    #[test]
    fn file_names_come_from_the_last_component() {
        assert_eq!(file_name(Path::new("/data/ttl/zoo.ttl")), "zoo.ttl");
        assert_eq!(file_name(Path::new("/")), "/");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(
            matches!(
                OntologySource::read("/this/file/does/not/exist.ttl"),
                Err(LoadError::Io { .. })
            ),
            "reading a missing file must fail"
        );
    }

    #[test]
    fn relative_iris_resolve_against_the_file() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::with_suffix(".ttl")?;
        file.write_all(b"<a> <b> <c> .\n")?;
        let graph = OntologySource::read(file.path())?.parse()?;
        let triple = graph.iter().next().ok_or("no triple")?;
        assert!(
            triple.predicate.as_str().starts_with("file://"),
            "relative IRI resolved to {}",
            triple.predicate
        );
        Ok(())
    }
}
