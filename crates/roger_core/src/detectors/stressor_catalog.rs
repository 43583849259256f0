//! Static stressor catalogs.
//!
//! Two curated catalogs with disjoint id namespaces:
//! - general/youth catalog, ids `stressor_*`
//! - adult catalog, ids `adult_stressor_*`
//!
//! Loaded once on first use and read-only thereafter; lookups dispatch on
//! the id prefix. Catalog content is reference data, not learned state.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub const GENERAL_ID_PREFIX: &str = "stressor_";
pub const ADULT_ID_PREFIX: &str = "adult_stressor_";

/// Life area a stressor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressorCategory {
    Financial,
    Work,
    School,
    Family,
    Health,
    Social,
    Relationship,
    Future,
    Sleep,
}

impl std::fmt::Display for StressorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Financial => "financial",
            Self::Work => "work",
            Self::School => "school",
            Self::Family => "family",
            Self::Health => "health",
            Self::Social => "social",
            Self::Relationship => "relationship",
            Self::Future => "future",
            Self::Sleep => "sleep",
        };
        write!(f, "{}", s)
    }
}

/// Age ranges a stressor typically applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeRange {
    Teen,
    YoungAdult,
    Adult,
    Senior,
}

/// Baseline severity from the catalog, used when the input carries no
/// intensity marker of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

/// How often this stressor shows up in waiting-room conversations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Common,
    Occasional,
    Rare,
}

/// One catalogued stressor.
#[derive(Debug, Clone, Serialize)]
pub struct Stressor {
    pub id: &'static str,
    pub name: &'static str,
    pub category: StressorCategory,
    pub age_ranges: &'static [AgeRange],
    pub severity: Severity,
    pub frequency: Frequency,
    pub keywords: &'static [&'static str],
    pub related_ids: &'static [&'static str],
    pub sample_utterances: &'static [&'static str],
}

// ============================================================================
// General / youth catalog
// ============================================================================

pub static GENERAL_CATALOG: Lazy<Vec<Stressor>> = Lazy::new(|| {
    vec![
        Stressor {
            id: "stressor_school_pressure",
            name: "School pressure",
            category: StressorCategory::School,
            age_ranges: &[AgeRange::Teen, AgeRange::YoungAdult],
            severity: Severity::Moderate,
            frequency: Frequency::Common,
            keywords: &["school", "homework", "exam", "test", "grades", "teacher", "class"],
            related_ids: &["stressor_future_uncertainty", "stressor_sleep_problems"],
            sample_utterances: &[
                "I have three exams this week and I'm falling behind",
                "My grades keep slipping no matter what I do",
            ],
        },
        Stressor {
            id: "stressor_work_conflict",
            name: "Work conflict",
            category: StressorCategory::Work,
            age_ranges: &[AgeRange::YoungAdult, AgeRange::Adult],
            severity: Severity::Moderate,
            frequency: Frequency::Common,
            keywords: &["boss", "work", "job", "coworker", "yelling", "fired", "shift"],
            related_ids: &["adult_stressor_job_insecurity", "stressor_money_worries"],
            sample_utterances: &[
                "My boss keeps yelling at me and I can't take it anymore",
                "Work has been piling up and nobody listens",
            ],
        },
        Stressor {
            id: "stressor_money_worries",
            name: "Money worries",
            category: StressorCategory::Financial,
            age_ranges: &[AgeRange::YoungAdult, AgeRange::Adult, AgeRange::Senior],
            severity: Severity::Moderate,
            frequency: Frequency::Common,
            keywords: &["money", "rent", "bills", "broke", "afford", "paycheck", "debt"],
            related_ids: &["adult_stressor_debt_load", "stressor_work_conflict"],
            sample_utterances: &[
                "I don't know how I'm going to make rent this month",
                "The bills just keep coming and I'm broke",
            ],
        },
        Stressor {
            id: "stressor_family_tension",
            name: "Family tension",
            category: StressorCategory::Family,
            age_ranges: &[AgeRange::Teen, AgeRange::YoungAdult, AgeRange::Adult],
            severity: Severity::Moderate,
            frequency: Frequency::Common,
            keywords: &["parents", "family", "arguing", "fighting", "home", "sibling", "mom", "dad"],
            related_ids: &["stressor_loneliness"],
            sample_utterances: &[
                "My parents are always fighting and home doesn't feel safe",
                "Every conversation with my family turns into an argument",
            ],
        },
        Stressor {
            id: "stressor_health_anxiety",
            name: "Health worries",
            category: StressorCategory::Health,
            age_ranges: &[AgeRange::Adult, AgeRange::Senior],
            severity: Severity::Moderate,
            frequency: Frequency::Occasional,
            keywords: &["sick", "doctor", "diagnosis", "pain", "symptoms", "hospital"],
            related_ids: &["stressor_sleep_problems", "adult_stressor_chronic_illness"],
            sample_utterances: &[
                "I'm waiting on test results and I can't stop thinking about it",
            ],
        },
        Stressor {
            id: "stressor_loneliness",
            name: "Loneliness",
            category: StressorCategory::Social,
            age_ranges: &[AgeRange::Teen, AgeRange::YoungAdult, AgeRange::Adult, AgeRange::Senior],
            severity: Severity::Moderate,
            frequency: Frequency::Common,
            keywords: &["lonely", "alone", "no friends", "isolated", "nobody"],
            related_ids: &["stressor_family_tension", "stressor_relationship_strain"],
            sample_utterances: &[
                "I feel like I have nobody to talk to anymore",
            ],
        },
        Stressor {
            id: "stressor_relationship_strain",
            name: "Relationship strain",
            category: StressorCategory::Relationship,
            age_ranges: &[AgeRange::Teen, AgeRange::YoungAdult, AgeRange::Adult],
            severity: Severity::Moderate,
            frequency: Frequency::Common,
            keywords: &["boyfriend", "girlfriend", "partner", "breakup", "broke up", "relationship"],
            related_ids: &["stressor_loneliness"],
            sample_utterances: &[
                "We broke up last week and I can't focus on anything",
            ],
        },
        Stressor {
            id: "stressor_future_uncertainty",
            name: "Future uncertainty",
            category: StressorCategory::Future,
            age_ranges: &[AgeRange::Teen, AgeRange::YoungAdult],
            severity: Severity::Mild,
            frequency: Frequency::Common,
            keywords: &["future", "college", "career", "don't know what", "what's next", "decide"],
            related_ids: &["stressor_school_pressure"],
            sample_utterances: &[
                "Everyone keeps asking what I'll do next and I have no idea",
            ],
        },
        Stressor {
            id: "stressor_sleep_problems",
            name: "Sleep problems",
            category: StressorCategory::Sleep,
            age_ranges: &[AgeRange::Teen, AgeRange::YoungAdult, AgeRange::Adult, AgeRange::Senior],
            severity: Severity::Mild,
            frequency: Frequency::Common,
            keywords: &["sleep", "insomnia", "tired", "exhausted", "awake all night", "can't sleep"],
            related_ids: &["stressor_school_pressure", "stressor_health_anxiety"],
            sample_utterances: &[
                "I've barely slept this week and everything feels harder",
            ],
        },
    ]
});

// ============================================================================
// Adult catalog
// ============================================================================

pub static ADULT_CATALOG: Lazy<Vec<Stressor>> = Lazy::new(|| {
    vec![
        Stressor {
            id: "adult_stressor_job_insecurity",
            name: "Job insecurity",
            category: StressorCategory::Work,
            age_ranges: &[AgeRange::Adult],
            severity: Severity::Moderate,
            frequency: Frequency::Common,
            keywords: &["layoffs", "laid off", "job security", "downsizing", "unemployed", "job search"],
            related_ids: &["stressor_money_worries", "adult_stressor_debt_load"],
            sample_utterances: &[
                "There are layoffs coming at work and I might be next",
            ],
        },
        Stressor {
            id: "adult_stressor_parenting",
            name: "Parenting strain",
            category: StressorCategory::Family,
            age_ranges: &[AgeRange::Adult],
            severity: Severity::Moderate,
            frequency: Frequency::Common,
            keywords: &["kids", "parenting", "toddler", "teenager", "daycare", "my son", "my daughter"],
            related_ids: &["stressor_sleep_problems", "adult_stressor_marriage_strain"],
            sample_utterances: &[
                "The kids are struggling and I feel like I'm failing them",
            ],
        },
        Stressor {
            id: "adult_stressor_caregiving",
            name: "Caregiving burden",
            category: StressorCategory::Family,
            age_ranges: &[AgeRange::Adult, AgeRange::Senior],
            severity: Severity::Severe,
            frequency: Frequency::Occasional,
            keywords: &["caregiver", "aging parent", "caring for", "dementia", "nursing home"],
            related_ids: &["adult_stressor_chronic_illness"],
            sample_utterances: &[
                "I'm caring for my mother full time and I'm running on empty",
            ],
        },
        Stressor {
            id: "adult_stressor_marriage_strain",
            name: "Marriage strain",
            category: StressorCategory::Relationship,
            age_ranges: &[AgeRange::Adult, AgeRange::Senior],
            severity: Severity::Moderate,
            frequency: Frequency::Common,
            keywords: &["marriage", "spouse", "husband", "wife", "divorce", "separated"],
            related_ids: &["adult_stressor_parenting"],
            sample_utterances: &[
                "My wife and I barely talk anymore and I don't know how to fix it",
            ],
        },
        Stressor {
            id: "adult_stressor_debt_load",
            name: "Debt load",
            category: StressorCategory::Financial,
            age_ranges: &[AgeRange::Adult],
            severity: Severity::Moderate,
            frequency: Frequency::Common,
            keywords: &["mortgage", "credit card", "loans", "debt", "foreclosure", "collections"],
            related_ids: &["stressor_money_worries", "adult_stressor_job_insecurity"],
            sample_utterances: &[
                "The credit card debt keeps growing and I can't see a way out",
            ],
        },
        Stressor {
            id: "adult_stressor_chronic_illness",
            name: "Chronic illness",
            category: StressorCategory::Health,
            age_ranges: &[AgeRange::Adult, AgeRange::Senior],
            severity: Severity::Severe,
            frequency: Frequency::Occasional,
            keywords: &["chronic", "diabetes", "arthritis", "flare up", "managing my condition"],
            related_ids: &["stressor_health_anxiety", "adult_stressor_caregiving"],
            sample_utterances: &[
                "Managing my condition takes everything I have some days",
            ],
        },
        Stressor {
            id: "adult_stressor_retirement",
            name: "Retirement worries",
            category: StressorCategory::Future,
            age_ranges: &[AgeRange::Senior],
            severity: Severity::Mild,
            frequency: Frequency::Occasional,
            keywords: &["retirement", "retire", "pension", "savings", "fixed income"],
            related_ids: &["stressor_money_worries"],
            sample_utterances: &[
                "I don't know if my savings will last through retirement",
            ],
        },
    ]
});

// ============================================================================
// Lookup
// ============================================================================

/// Look up a stressor by id, dispatching on the id-prefix namespace.
///
/// Adult prefix is checked first: `adult_stressor_*` also starts with the
/// shorter general prefix, so the order matters.
pub fn lookup(id: &str) -> Option<&'static Stressor> {
    if id.starts_with(ADULT_ID_PREFIX) {
        ADULT_CATALOG.iter().find(|s| s.id == id)
    } else if id.starts_with(GENERAL_ID_PREFIX) {
        GENERAL_CATALOG.iter().find(|s| s.id == id)
    } else {
        None
    }
}

/// All stressors from both catalogs.
pub fn all_stressors() -> impl Iterator<Item = &'static Stressor> {
    GENERAL_CATALOG.iter().chain(ADULT_CATALOG.iter())
}
