//! Per-ontology tallies from which every metric is derived.

use crate::classify::{Classification, ClassOrigin, Role};
use crate::metrics::ratio;
use crate::text::{LiteralStats, RawTextStats};
use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{Graph, NamedOrBlankNodeRef, TermRef};
use std::collections::{BTreeMap, BTreeSet};

/// Property usages of a group of subjects (all classes, or all individuals).
///
/// A usage is object-valued when the object is an IRI or a blank node and data/annotation-valued when it is a literal.
/// `rdf:type` and `rdfs:subClassOf` statements are not usages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyUsage {
    object_usages: u64,
    data_usages: u64,
    object_properties: BTreeSet<String>,
    data_properties: BTreeSet<String>,
}

impl PropertyUsage {
    fn record(&mut self, predicate: &str, literal: bool) {
        let (usages, properties) = if literal {
            (&mut self.data_usages, &mut self.data_properties)
        } else {
            (&mut self.object_usages, &mut self.object_properties)
        };
        *usages += 1;
        if !properties.contains(predicate) {
            properties.insert(predicate.to_owned());
        }
    }

    #[inline]
    pub fn object_usages(&self) -> u64 {
        self.object_usages
    }

    #[inline]
    pub fn data_usages(&self) -> u64 {
        self.data_usages
    }

    /// Number of distinct predicates used with an IRI or blank node object.
    #[inline]
    pub fn unique_object_properties(&self) -> u64 {
        self.object_properties.len() as u64
    }

    /// Number of distinct predicates used with a literal object.
    #[inline]
    pub fn unique_data_properties(&self) -> u64 {
        self.data_properties.len() as u64
    }

    fn merge(&mut self, other: Self) {
        self.object_usages += other.object_usages;
        self.data_usages += other.data_usages;
        self.object_properties.extend(other.object_properties);
        self.data_properties.extend(other.data_properties);
    }
}

/// The properties applicable to a class and its individuals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassProfile {
    properties: BTreeSet<String>,
    individuals: BTreeSet<String>,
}

impl ClassProfile {
    /// Distinct properties whose `rdfs:domain` is the class or that are used by one of its individuals.
    #[inline]
    pub fn property_count(&self) -> u64 {
        self.properties.len() as u64
    }

    #[inline]
    pub fn individual_count(&self) -> u64 {
        self.individuals.len() as u64
    }

    /// Properties per individual, 0 for a class without individuals.
    pub fn density(&self) -> f64 {
        ratio(self.property_count(), self.individual_count())
    }

    fn merge(&mut self, other: Self) {
        self.properties.extend(other.properties);
        self.individuals.extend(other.individuals);
    }
}

/// Everything measured on one ontology, or on several merged ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OntologyProfile {
    triples: u64,
    classification: Classification,
    class_usage: PropertyUsage,
    individual_usage: PropertyUsage,
    classes: BTreeMap<String, ClassProfile>,
    literals: LiteralStats,
    raw: RawTextStats,
}

impl OntologyProfile {
    /// Classifies the terms of `graph` and tallies its usages, literals and class profiles.
    pub fn build(graph: &Graph, raw: RawTextStats) -> Self {
        let classification = Classification::classify(graph);
        let mut classes = classification
            .with_role(Role::Class)
            .map(|class| (class.to_owned(), ClassProfile::default()))
            .collect::<BTreeMap<_, _>>();

        let mut types = BTreeMap::<&str, Vec<&str>>::new();
        for triple in graph.triples_for_predicate(rdf::TYPE) {
            let (NamedOrBlankNodeRef::NamedNode(subject), TermRef::NamedNode(class)) =
                (triple.subject, triple.object)
            else {
                continue;
            };
            if !classification.is(subject.as_str(), Role::Individual) {
                continue;
            }
            if let Some(profile) = classes.get_mut(class.as_str()) {
                profile.individuals.insert(subject.as_str().to_owned());
                types
                    .entry(subject.as_str())
                    .or_default()
                    .push(class.as_str());
            }
        }
        for triple in graph.triples_for_predicate(rdfs::DOMAIN) {
            let (NamedOrBlankNodeRef::NamedNode(property), TermRef::NamedNode(class)) =
                (triple.subject, triple.object)
            else {
                continue;
            };
            if let Some(profile) = classes.get_mut(class.as_str()) {
                profile.properties.insert(property.as_str().to_owned());
            }
        }

        let mut class_usage = PropertyUsage::default();
        let mut individual_usage = PropertyUsage::default();
        let mut literals = LiteralStats::default();
        for triple in graph {
            let literal = if let TermRef::Literal(literal) = triple.object {
                literals.add_literal(literal.value());
                true
            } else {
                false
            };
            if triple.predicate == rdf::TYPE || triple.predicate == rdfs::SUB_CLASS_OF {
                continue;
            }
            let NamedOrBlankNodeRef::NamedNode(subject) = triple.subject else {
                continue;
            };
            let (subject, predicate) = (subject.as_str(), triple.predicate.as_str());
            let roles = classification.roles(subject);
            if roles.contains(Role::Class) {
                class_usage.record(predicate, literal);
            }
            if roles.contains(Role::Individual) {
                individual_usage.record(predicate, literal);
                for class in types.get(subject).into_iter().flatten() {
                    if let Some(profile) = classes.get_mut(*class) {
                        profile.properties.insert(predicate.to_owned());
                    }
                }
            }
        }

        Self {
            triples: graph.len() as u64,
            classification,
            class_usage,
            individual_usage,
            classes,
            literals,
            raw,
        }
    }

    /// Number of distinct triples.
    #[inline]
    pub fn triples(&self) -> u64 {
        self.triples
    }

    #[inline]
    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Usages whose subject is a class.
    #[inline]
    pub fn class_usage(&self) -> &PropertyUsage {
        &self.class_usage
    }

    /// Usages whose subject is an individual.
    #[inline]
    pub fn individual_usage(&self) -> &PropertyUsage {
        &self.individual_usage
    }

    /// Every class with its profile and origin, sorted by IRI.
    pub fn classes(&self) -> impl Iterator<Item = (&str, Option<ClassOrigin>, &ClassProfile)> {
        self.classes.iter().map(|(class, profile)| {
            (
                class.as_str(),
                self.classification.class_origin(class),
                profile,
            )
        })
    }

    #[inline]
    pub fn literals(&self) -> &LiteralStats {
        &self.literals
    }

    #[inline]
    pub fn raw(&self) -> &RawTextStats {
        &self.raw
    }

    /// Adds `other` to this profile.
    ///
    /// Tallies are summed, term sets and vocabularies are unioned so that a term present in both is counted once.
    pub fn merge(&mut self, other: Self) {
        self.triples += other.triples;
        self.classification.merge(other.classification);
        self.class_usage.merge(other.class_usage);
        self.individual_usage.merge(other.individual_usage);
        for (class, profile) in other.classes {
            self.classes.entry(class).or_default().merge(profile);
        }
        self.literals.merge(other.literals);
        self.raw.merge(other.raw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::OntologySource;

    fn profile(turtle: &str) -> OntologyProfile {
        let source = OntologySource::from_text(
            "test.ttl",
            format!(
                "@prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
                 @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
                 @prefix ex: <http://example.com/> .\n{turtle}"
            ),
        );
        OntologyProfile::build(&source.parse().unwrap(), source.raw_stats())
    }

    fn class<'a>(profile: &'a OntologyProfile, iri: &str) -> &'a ClassProfile {
        profile
            .classes()
            .find(|(class, _, _)| *class == iri)
            .map(|(_, _, profile)| profile)
            .unwrap()
    }

    #[test]
    fn animal_density_is_one() {
        let p = profile(
            "ex:Animal a owl:Class .\n\
             ex:hasName a owl:DatatypeProperty .\n\
             ex:Dog a ex:Animal ; ex:hasName \"Rex\" .\n",
        );
        let animal = class(&p, "http://example.com/Animal");
        assert_eq!(animal.property_count(), 1);
        assert_eq!(animal.individual_count(), 1);
        assert!((animal.density() - 1.0).abs() < f64::EPSILON);
        assert_eq!(p.individual_usage().data_usages(), 1);
        assert_eq!(p.class_usage().data_usages(), 0);
    }

    #[test]
    fn class_without_individuals_has_zero_density() {
        let p = profile("ex:Empty a owl:Class .\nex:p rdfs:domain ex:Empty .\n");
        let empty = class(&p, "http://example.com/Empty");
        assert_eq!(empty.property_count(), 1);
        assert_eq!(empty.individual_count(), 0);
        assert!(empty.density() == 0.0, "no NaN for empty classes");
    }

    #[test]
    fn class_level_usages() {
        let p = profile(
            "ex:Dog a owl:Class ; rdfs:subClassOf ex:Animal ;\n\
             rdfs:label \"Dog\"@en , \"Chien\"@fr ; rdfs:seeAlso ex:Wolf .\n",
        );
        let usage = p.class_usage();
        assert_eq!(usage.data_usages(), 2);
        assert_eq!(usage.unique_data_properties(), 1);
        assert_eq!(usage.object_usages(), 1);
        assert_eq!(usage.unique_object_properties(), 1);
    }

    #[test]
    fn literals_are_tallied() {
        let p = profile("ex:a ex:p \"Hello brave new world\" , \"hello\" , 42 .\n");
        assert_eq!(p.literals().literals(), 3);
        assert_eq!(p.literals().words().words(), 6);
        assert_eq!(p.literals().words().vocabulary_size(), 5);
        assert_eq!(p.literals().longest(), 4);
        assert_eq!(p.literals().shortest(), 1);
    }

    #[test]
    fn merge_sums_triples_and_unions_classes() {
        let mut a = profile("ex:Animal a owl:Class .\nex:rex a ex:Animal .\n");
        let b = profile("ex:Animal a owl:Class .\nex:tom a ex:Animal .\n");
        a.merge(b);
        assert_eq!(a.triples(), 4);
        assert_eq!(a.classification().count(Role::Class), 1);
        assert_eq!(class(&a, "http://example.com/Animal").individual_count(), 2);
    }
}
