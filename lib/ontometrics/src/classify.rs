//! Classification of the IRIs of a graph into classes, individuals and properties.
//!
//! A term may hold several roles at once: inconsistent ontologies declaring, for example, the same IRI as a class and as an object property are tolerated and reported as conflicts.

use crate::vocab::{self, is_builtin, owl};
use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{Graph, NamedOrBlankNodeRef, TermRef};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A capability tag of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Class,
    Individual,
    ObjectProperty,
    DataProperty,
    AnnotationProperty,
}

impl Role {
    pub const ALL: [Self; 5] = [
        Self::Class,
        Self::Individual,
        Self::ObjectProperty,
        Self::DataProperty,
        Self::AnnotationProperty,
    ];

    /// The human-readable name of the role.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::Individual => "Individual",
            Self::ObjectProperty => "Object Property",
            Self::DataProperty => "Data Property",
            Self::AnnotationProperty => "Annotation Property",
        }
    }

    #[inline]
    const fn bit(self) -> u8 {
        1 << self as u8
    }

    #[inline]
    const fn is_property(self) -> bool {
        matches!(
            self,
            Self::ObjectProperty | Self::DataProperty | Self::AnnotationProperty
        )
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of [`Role`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoleSet(u8);

impl RoleSet {
    #[inline]
    pub fn insert(&mut self, role: Role) {
        self.0 |= role.bit();
    }

    #[inline]
    pub fn contains(self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// A term holding more than one role.
    #[inline]
    pub fn is_conflicting(self) -> bool {
        self.len() > 1
    }

    pub fn has_property_role(self) -> bool {
        self.iter().any(Role::is_property)
    }

    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter().filter(move |role| self.contains(*role))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = Self::default();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, role) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(role.name())?;
        }
        Ok(())
    }
}

/// How a class was discovered.
///
/// When several rules apply the first variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClassOrigin {
    /// `?c rdf:type owl:Class`
    OwlClass,
    /// `?c rdf:type rdfs:Class`
    RdfsClass,
    /// `?c rdf:type rdf:Class`
    RdfClass,
    /// Subject or object of `rdfs:subClassOf`.
    SubClassOf,
    /// Used as the object of `rdf:type`.
    Inferred,
}

impl ClassOrigin {
    pub const fn name(self) -> &'static str {
        match self {
            Self::OwlClass => "owl:Class",
            Self::RdfsClass => "rdfs:Class",
            Self::RdfClass => "rdf:Class",
            Self::SubClassOf => "rdfs:subClassOf",
            Self::Inferred => "inferred",
        }
    }
}

/// The roles of every IRI of a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    roles: BTreeMap<String, RoleSet>,
    class_origins: BTreeMap<String, ClassOrigin>,
    /// Subclasses and their named, non built-in, parents.
    parents: BTreeMap<String, BTreeSet<String>>,
    untyped_properties: BTreeSet<String>,
}

impl Classification {
    /// Classifies the IRIs of `graph`.
    ///
    /// Classes are resolved first, individuals are then the instances of the discovered classes.
    /// Blank nodes are never classified.
    ///
    /// ```
    /// use ontometrics::classify::{Classification, Role};
    /// use ontometrics::loader::OntologySource;
    ///
    /// let graph = OntologySource::from_text(
    ///     "zoo.ttl",
    ///     "@prefix owl: <http://www.w3.org/2002/07/owl#> .
    ///      @prefix ex: <http://example.com/> .
    ///      ex:Animal a owl:Class .
    ///      ex:Dog a ex:Animal .",
    /// )
    /// .parse()?;
    /// let classification = Classification::classify(&graph);
    /// assert_eq!(classification.count(Role::Class), 1);
    /// assert_eq!(classification.count(Role::Individual), 1);
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn classify(graph: &Graph) -> Self {
        let mut classification = Self::default();
        let mut ontology_headers = BTreeSet::new();

        for triple in graph.triples_for_predicate(rdf::TYPE) {
            let TermRef::NamedNode(object) = triple.object else {
                continue;
            };
            if !is_builtin(object) {
                // Anonymous instances still make their type a class
                classification.add_class(object.as_str(), ClassOrigin::Inferred);
                continue;
            }
            let NamedOrBlankNodeRef::NamedNode(subject) = triple.subject else {
                continue;
            };
            let subject = subject.as_str();
            if object == owl::CLASS {
                classification.add_class(subject, ClassOrigin::OwlClass);
            } else if object == rdfs::CLASS {
                classification.add_class(subject, ClassOrigin::RdfsClass);
            } else if object == vocab::rdf::CLASS {
                classification.add_class(subject, ClassOrigin::RdfClass);
            } else if object == owl::OBJECT_PROPERTY {
                classification.add_role(subject, Role::ObjectProperty);
            } else if object == owl::DATATYPE_PROPERTY {
                classification.add_role(subject, Role::DataProperty);
            } else if object == owl::ANNOTATION_PROPERTY {
                classification.add_role(subject, Role::AnnotationProperty);
            } else if object == owl::ONTOLOGY {
                ontology_headers.insert(subject);
            }
        }

        for triple in graph.triples_for_predicate(rdfs::SUB_CLASS_OF) {
            let NamedOrBlankNodeRef::NamedNode(subject) = triple.subject else {
                continue;
            };
            let subject = subject.as_str();
            classification.add_class(subject, ClassOrigin::SubClassOf);
            let parent = match triple.object {
                TermRef::NamedNode(parent) if !is_builtin(parent) => Some(parent.as_str()),
                _ => None,
            };
            let parents = classification
                .parents
                .entry(subject.to_owned())
                .or_default();
            if let Some(parent) = parent {
                parents.insert(parent.to_owned());
                classification.add_class(parent, ClassOrigin::SubClassOf);
            }
        }

        // Membership is relative to the classes found above
        for triple in graph.triples_for_predicate(rdf::TYPE) {
            let (NamedOrBlankNodeRef::NamedNode(subject), TermRef::NamedNode(object)) =
                (triple.subject, triple.object)
            else {
                continue;
            };
            if ontology_headers.contains(subject.as_str()) {
                continue;
            }
            if object == owl::NAMED_INDIVIDUAL || classification.is(object.as_str(), Role::Class)
            {
                classification.add_role(subject.as_str(), Role::Individual);
            }
        }

        for triple in graph {
            let predicate = triple.predicate;
            if is_builtin(predicate)
                || classification.untyped_properties.contains(predicate.as_str())
                || classification.roles(predicate.as_str()).has_property_role()
            {
                continue;
            }
            classification
                .untyped_properties
                .insert(predicate.as_str().to_owned());
        }

        classification
    }

    fn add_role(&mut self, iri: &str, role: Role) {
        if let Some(roles) = self.roles.get_mut(iri) {
            roles.insert(role);
        } else {
            self.roles.insert(iri.to_owned(), [role].into_iter().collect());
        }
    }

    fn add_class(&mut self, iri: &str, origin: ClassOrigin) {
        self.add_role(iri, Role::Class);
        if let Some(current) = self.class_origins.get_mut(iri) {
            *current = (*current).min(origin);
        } else {
            self.class_origins.insert(iri.to_owned(), origin);
        }
    }

    /// The roles of `iri`, empty if it has not been classified.
    pub fn roles(&self, iri: &str) -> RoleSet {
        self.roles.get(iri).copied().unwrap_or_default()
    }

    #[inline]
    pub fn is(&self, iri: &str, role: Role) -> bool {
        self.roles(iri).contains(role)
    }

    /// All classified IRIs with their roles, sorted by IRI.
    pub fn terms(&self) -> impl Iterator<Item = (&str, RoleSet)> {
        self.roles.iter().map(|(iri, roles)| (iri.as_str(), *roles))
    }

    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &str> {
        self.terms()
            .filter(move |(_, roles)| roles.contains(role))
            .map(|(iri, _)| iri)
    }

    pub fn count(&self, role: Role) -> u64 {
        self.with_role(role).count() as u64
    }

    pub fn class_origin(&self, iri: &str) -> Option<ClassOrigin> {
        self.class_origins.get(iri).copied()
    }

    /// Subclasses with their recorded parents.
    pub fn subclasses(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.parents
            .iter()
            .map(|(class, parents)| (class.as_str(), parents))
    }

    pub fn subclass_count(&self) -> u64 {
        self.parents.len() as u64
    }

    /// Predicates used in the graph without any property declaration.
    pub fn untyped_properties(&self) -> &BTreeSet<String> {
        &self.untyped_properties
    }

    /// Terms holding more than one role.
    pub fn conflicts(&self) -> impl Iterator<Item = (&str, RoleSet)> {
        self.terms().filter(|(_, roles)| roles.is_conflicting())
    }

    pub fn conflict_count(&self) -> u64 {
        self.conflicts().count() as u64
    }

    /// Length of the longest `rdfs:subClassOf` chain between named classes.
    ///
    /// Cycles are cut where they are detected.
    pub fn max_subclass_depth(&self) -> u64 {
        let mut depths = BTreeMap::new();
        let mut visiting = BTreeSet::new();
        self.parents
            .keys()
            .map(|class| self.depth(class, &mut depths, &mut visiting))
            .max()
            .unwrap_or(0)
    }

    fn depth<'a>(
        &'a self,
        class: &'a str,
        depths: &mut BTreeMap<&'a str, u64>,
        visiting: &mut BTreeSet<&'a str>,
    ) -> u64 {
        if let Some(depth) = depths.get(class) {
            return *depth;
        }
        if !visiting.insert(class) {
            return 0;
        }
        let depth = self.parents.get(class).map_or(0, |parents| {
            parents
                .iter()
                .map(|parent| 1 + self.depth(parent, depths, visiting))
                .max()
                .unwrap_or(0)
        });
        visiting.remove(class);
        depths.insert(class, depth);
        depth
    }

    /// Largest number of direct subclasses of a single class.
    pub fn max_subclass_fan_out(&self) -> u64 {
        let mut children = BTreeMap::<&str, u64>::new();
        for parent in self.parents.values().flatten() {
            *children.entry(parent).or_default() += 1;
        }
        children.into_values().max().unwrap_or(0)
    }

    /// Adds the terms of `other`, roles of a term present on both sides are unioned.
    pub fn merge(&mut self, other: Self) {
        for (iri, roles) in other.roles {
            let entry = self.roles.entry(iri).or_default();
            *entry = entry.union(roles);
        }
        for (iri, origin) in other.class_origins {
            self.class_origins
                .entry(iri)
                .and_modify(|current| *current = (*current).min(origin))
                .or_insert(origin);
        }
        for (class, parents) in other.parents {
            self.parents.entry(class).or_default().extend(parents);
        }
        self.untyped_properties.extend(other.untyped_properties);
        let roles = &self.roles;
        self.untyped_properties.retain(|property| {
            !roles
                .get(property)
                .is_some_and(|roles| roles.has_property_role())
        });
    }
}
