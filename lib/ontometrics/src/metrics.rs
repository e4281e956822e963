//! The fixed metric schema and the records computed from [`OntologyProfile`]s.

use crate::classify::Role;
use crate::profile::OntologyProfile;
use std::fmt;

/// Number of decimal places every ratio is rounded to.
pub const DECIMAL_PLACES: usize = 4;

const SCALE: f64 = 10_000.0;

const METRIC_COUNT: usize = 34;

/// `numerator / denominator` rounded to [`DECIMAL_PLACES`], 0 when `denominator` is 0.
pub fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    round(numerator as f64 / denominator as f64)
}

fn round(value: f64) -> f64 {
    (value * SCALE).round() / SCALE
}

/// A column of the report.
///
/// The declaration order is the column order of every exported table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    TotalTriples,
    TotalClasses,
    TotalSubclasses,
    TotalIndividuals,
    ObjectPropertiesDefined,
    DataPropertiesDefined,
    AnnotationPropertiesDefined,
    UntypedPropertiesUsed,
    TypeConflicts,
    SharedTerms,
    ClassObjectPropertyUsages,
    ClassUniqueObjectProperties,
    ClassDataPropertyUsages,
    ClassUniqueDataProperties,
    PropertyDensityByClass,
    ObjectDensityByClass,
    DataDensityByClass,
    PropertyDensityByIndividual,
    ObjectDensityByIndividual,
    DataDensityByIndividual,
    MeanClassPropertyDensity,
    AverageSubclassesPerClass,
    MaxSubclassDepth,
    MaxSubclassFanOut,
    TotalLiterals,
    LiteralWords,
    AverageWordsPerLiteral,
    LongestLiteralWords,
    ShortestLiteralWords,
    LiteralVocabularySize,
    RawLines,
    RawCharacters,
    RawWords,
    RawVocabularySize,
}

impl Metric {
    pub const ALL: [Self; METRIC_COUNT] = [
        Self::TotalTriples,
        Self::TotalClasses,
        Self::TotalSubclasses,
        Self::TotalIndividuals,
        Self::ObjectPropertiesDefined,
        Self::DataPropertiesDefined,
        Self::AnnotationPropertiesDefined,
        Self::UntypedPropertiesUsed,
        Self::TypeConflicts,
        Self::SharedTerms,
        Self::ClassObjectPropertyUsages,
        Self::ClassUniqueObjectProperties,
        Self::ClassDataPropertyUsages,
        Self::ClassUniqueDataProperties,
        Self::PropertyDensityByClass,
        Self::ObjectDensityByClass,
        Self::DataDensityByClass,
        Self::PropertyDensityByIndividual,
        Self::ObjectDensityByIndividual,
        Self::DataDensityByIndividual,
        Self::MeanClassPropertyDensity,
        Self::AverageSubclassesPerClass,
        Self::MaxSubclassDepth,
        Self::MaxSubclassFanOut,
        Self::TotalLiterals,
        Self::LiteralWords,
        Self::AverageWordsPerLiteral,
        Self::LongestLiteralWords,
        Self::ShortestLiteralWords,
        Self::LiteralVocabularySize,
        Self::RawLines,
        Self::RawCharacters,
        Self::RawWords,
        Self::RawVocabularySize,
    ];

    /// The column header.
    pub const fn name(self) -> &'static str {
        match self {
            Self::TotalTriples => "Total Triples",
            Self::TotalClasses => "Total Classes",
            Self::TotalSubclasses => "Total Subclasses",
            Self::TotalIndividuals => "Total Individuals",
            Self::ObjectPropertiesDefined => "Object Properties Defined",
            Self::DataPropertiesDefined => "Data Properties Defined",
            Self::AnnotationPropertiesDefined => "Annotation Properties Defined",
            Self::UntypedPropertiesUsed => "Untyped Properties Used",
            Self::TypeConflicts => "Type Conflicts",
            Self::SharedTerms => "Shared Terms",
            Self::ClassObjectPropertyUsages => "Total Object Properties",
            Self::ClassUniqueObjectProperties => "Unique Object Properties",
            Self::ClassDataPropertyUsages => "Total Data/Annotation Properties",
            Self::ClassUniqueDataProperties => "Unique Data/Annotation Properties",
            Self::PropertyDensityByClass => "Property Density by Class",
            Self::ObjectDensityByClass => "Object Density by Class",
            Self::DataDensityByClass => "Data/Annotation Density by Class",
            Self::PropertyDensityByIndividual => "Property Density by Individual",
            Self::ObjectDensityByIndividual => "Object Density by Individual",
            Self::DataDensityByIndividual => "Data/Annotation Density by Individual",
            Self::MeanClassPropertyDensity => "Mean Property Density per Class",
            Self::AverageSubclassesPerClass => "Average Subclasses per Class",
            Self::MaxSubclassDepth => "Max Subclass Depth",
            Self::MaxSubclassFanOut => "Max Subclass Fan-out",
            Self::TotalLiterals => "Total Literals",
            Self::LiteralWords => "Total Words in Literals",
            Self::AverageWordsPerLiteral => "Average Words per Literal",
            Self::LongestLiteralWords => "Longest Literal (Words)",
            Self::ShortestLiteralWords => "Shortest Literal (Words)",
            Self::LiteralVocabularySize => "Vocabulary Size in Literals",
            Self::RawLines => "Lines in Raw TTL File",
            Self::RawCharacters => "Characters in Raw TTL File",
            Self::RawWords => "Total Words in Raw TTL File",
            Self::RawVocabularySize => "Vocabulary Size in Raw TTL File",
        }
    }

    fn compute(self, profile: &OntologyProfile, shared_terms: u64) -> MetricValue {
        let classification = profile.classification();
        let classes = classification.count(Role::Class);
        let individuals = classification.count(Role::Individual);
        let class_usage = profile.class_usage();
        let individual_usage = profile.individual_usage();
        let literals = profile.literals();
        match self {
            Self::TotalTriples => MetricValue::Count(profile.triples()),
            Self::TotalClasses => MetricValue::Count(classes),
            Self::TotalSubclasses => MetricValue::Count(classification.subclass_count()),
            Self::TotalIndividuals => MetricValue::Count(individuals),
            Self::ObjectPropertiesDefined => {
                MetricValue::Count(classification.count(Role::ObjectProperty))
            }
            Self::DataPropertiesDefined => {
                MetricValue::Count(classification.count(Role::DataProperty))
            }
            Self::AnnotationPropertiesDefined => {
                MetricValue::Count(classification.count(Role::AnnotationProperty))
            }
            Self::UntypedPropertiesUsed => {
                MetricValue::Count(classification.untyped_properties().len() as u64)
            }
            Self::TypeConflicts => MetricValue::Count(classification.conflict_count()),
            Self::SharedTerms => MetricValue::Count(shared_terms),
            Self::ClassObjectPropertyUsages => MetricValue::Count(class_usage.object_usages()),
            Self::ClassUniqueObjectProperties => {
                MetricValue::Count(class_usage.unique_object_properties())
            }
            Self::ClassDataPropertyUsages => MetricValue::Count(class_usage.data_usages()),
            Self::ClassUniqueDataProperties => {
                MetricValue::Count(class_usage.unique_data_properties())
            }
            Self::PropertyDensityByClass => MetricValue::Ratio(ratio(
                class_usage.object_usages() + class_usage.data_usages(),
                classes,
            )),
            Self::ObjectDensityByClass => {
                MetricValue::Ratio(ratio(class_usage.object_usages(), classes))
            }
            Self::DataDensityByClass => {
                MetricValue::Ratio(ratio(class_usage.data_usages(), classes))
            }
            Self::PropertyDensityByIndividual => MetricValue::Ratio(ratio(
                individual_usage.object_usages() + individual_usage.data_usages(),
                individuals,
            )),
            Self::ObjectDensityByIndividual => {
                MetricValue::Ratio(ratio(individual_usage.object_usages(), individuals))
            }
            Self::DataDensityByIndividual => {
                MetricValue::Ratio(ratio(individual_usage.data_usages(), individuals))
            }
            Self::MeanClassPropertyDensity => MetricValue::Ratio(mean_class_density(profile)),
            Self::AverageSubclassesPerClass => {
                MetricValue::Ratio(ratio(classification.subclass_count(), classes))
            }
            Self::MaxSubclassDepth => MetricValue::Count(classification.max_subclass_depth()),
            Self::MaxSubclassFanOut => {
                MetricValue::Count(classification.max_subclass_fan_out())
            }
            Self::TotalLiterals => MetricValue::Count(literals.literals()),
            Self::LiteralWords => MetricValue::Count(literals.words().words()),
            Self::AverageWordsPerLiteral => {
                MetricValue::Ratio(ratio(literals.words().words(), literals.literals()))
            }
            Self::LongestLiteralWords => MetricValue::Count(literals.longest()),
            Self::ShortestLiteralWords => MetricValue::Count(literals.shortest()),
            Self::LiteralVocabularySize => {
                MetricValue::Count(literals.words().vocabulary_size())
            }
            Self::RawLines => MetricValue::Count(profile.raw().lines()),
            Self::RawCharacters => MetricValue::Count(profile.raw().chars()),
            Self::RawWords => MetricValue::Count(profile.raw().words().words()),
            Self::RawVocabularySize => MetricValue::Count(profile.raw().words().vocabulary_size()),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn mean_class_density(profile: &OntologyProfile) -> f64 {
    let (sum, count) = profile
        .classes()
        .fold((0.0, 0_u64), |(sum, count), (_, _, class)| {
            let density = if class.individual_count() == 0 {
                0.0
            } else {
                class.property_count() as f64 / class.individual_count() as f64
            };
            (sum + density, count + 1)
        });
    if count == 0 {
        0.0
    } else {
        round(sum / count as f64)
    }
}

/// The value of a metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    /// A non-negative integer count.
    Count(u64),
    /// A non-negative ratio rounded to [`DECIMAL_PLACES`].
    Ratio(f64),
}

impl MetricValue {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Count(count) => count as f64,
            Self::Ratio(ratio) => ratio,
        }
    }
}

impl Default for MetricValue {
    fn default() -> Self {
        Self::Count(0)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => write!(f, "{count}"),
            Self::Ratio(ratio) => write!(f, "{ratio:.precision$}", precision = DECIMAL_PLACES),
        }
    }
}

/// One value for every [`Metric`].
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRecord {
    values: [MetricValue; METRIC_COUNT],
}

impl MetricsRecord {
    /// Computes every metric of `profile`.
    ///
    /// `shared_terms` is the number of terms also classified in another file, 0 for a single file.
    pub fn from_profile(profile: &OntologyProfile, shared_terms: u64) -> Self {
        Self {
            values: Metric::ALL.map(|metric| metric.compute(profile, shared_terms)),
        }
    }

    #[inline]
    pub fn get(&self, metric: Metric) -> MetricValue {
        self.values[metric as usize]
    }

    /// The metrics in column order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, MetricValue)> + '_ {
        Metric::ALL.into_iter().zip(self.values.iter().copied())
    }
}

impl Default for MetricsRecord {
    fn default() -> Self {
        Self {
            values: [MetricValue::default(); METRIC_COUNT],
        }
    }
}
