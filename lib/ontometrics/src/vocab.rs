//! Provides ready to use [`NamedNodeRef`]s for the OWL and RDF terms the classifier relies on.
//!
//! The [RDF](oxrdf::vocab::rdf), [RDFS](oxrdf::vocab::rdfs) and [XSD](oxrdf::vocab::xsd) vocabularies come from [`oxrdf`].

use oxrdf::NamedNodeRef;

pub mod owl {
    //! [OWL 2](https://www.w3.org/TR/owl2-syntax/) vocabulary.
    use oxrdf::NamedNodeRef;

    /// The class of annotation properties.
    pub const ANNOTATION_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#AnnotationProperty");
    /// The class of OWL classes.
    pub const CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Class");
    /// The class of data properties.
    pub const DATATYPE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#DatatypeProperty");
    /// The class of named individuals.
    pub const NAMED_INDIVIDUAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#NamedIndividual");
    /// The class of object properties.
    pub const OBJECT_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#ObjectProperty");
    /// The class of ontologies.
    pub const ONTOLOGY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Ontology");
}

pub mod rdf {
    //! RDF terms missing from [`oxrdf::vocab::rdf`].
    use oxrdf::NamedNodeRef;

    /// The legacy class of classes, an alias of `rdfs:Class` in some older ontologies.
    pub const CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#Class");
}

const BUILTIN_NAMESPACES: [&str; 4] = [
    "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
    "http://www.w3.org/2000/01/rdf-schema#",
    "http://www.w3.org/2002/07/owl#",
    "http://www.w3.org/2001/XMLSchema#",
];

/// Returns `true` if the IRI belongs to the RDF, RDFS, OWL or XSD namespace.
///
/// ```
/// use ontometrics::vocab::{is_builtin, owl};
/// use oxrdf::NamedNodeRef;
///
/// assert!(is_builtin(owl::CLASS));
/// assert!(!is_builtin(NamedNodeRef::new_unchecked("http://example.com/Animal")));
/// ```
pub fn is_builtin(iri: NamedNodeRef<'_>) -> bool {
    BUILTIN_NAMESPACES
        .iter()
        .any(|namespace| iri.as_str().starts_with(namespace))
}
