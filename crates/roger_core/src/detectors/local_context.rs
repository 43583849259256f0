//! Ohio local-context detection.
//!
//! Roger runs in Ohio waiting rooms; recognizing local references (teams,
//! cities, lake-effect weather) lets the complex lane offer grounded small
//! talk instead of a generic prompt.

use serde::{Deserialize, Serialize};

/// Local topic families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalTopic {
    Sports,
    Weather,
    Place,
    Seasonal,
}

/// Result of local-context detection.
#[derive(Debug, Clone, Serialize)]
pub struct LocalContextDetection {
    pub detected: bool,
    pub topic: Option<LocalTopic>,
    pub matched: Option<&'static str>,
}

impl LocalContextDetection {
    fn none() -> Self {
        Self {
            detected: false,
            topic: None,
            matched: None,
        }
    }
}

const SPORTS: &[&str] = &[
    "browns", "bengals", "guardians", "cavaliers", "cavs", "blue jackets", "buckeyes",
    "ohio state",
];

const WEATHER: &[&str] = &["lake effect", "lake erie", "snow squall", "ohio weather"];

const PLACES: &[&str] = &[
    "cleveland", "columbus", "cincinnati", "akron", "dayton", "toledo", "youngstown",
];

const SEASONAL: &[&str] = &["county fair", "cedar point", "pumpkin show", "hocking hills"];

/// Detect an Ohio local reference. Families are checked in a fixed order;
/// first match wins.
pub fn detect_local_context(input: &str) -> LocalContextDetection {
    let lower = input.to_lowercase();

    let families: &[(LocalTopic, &[&str])] = &[
        (LocalTopic::Sports, SPORTS),
        (LocalTopic::Weather, WEATHER),
        (LocalTopic::Place, PLACES),
        (LocalTopic::Seasonal, SEASONAL),
    ];

    for (topic, keywords) in families {
        if let Some(m) = keywords.iter().find(|k| lower.contains(&***k)) {
            return LocalContextDetection {
                detected: true,
                topic: Some(*topic),
                matched: Some(m),
            };
        }
    }

    LocalContextDetection::none()
}

/// A grounded conversational line for a detected local topic.
pub fn local_response_line(detection: &LocalContextDetection) -> Option<String> {
    let matched = detection.matched?;
    let line = match detection.topic? {
        LocalTopic::Sports => format!(
            "Sounds like you follow the {}. A game can be a nice break from everything else. How has your week been otherwise?",
            title_case(matched)
        ),
        LocalTopic::Weather => format!(
            "Ohio weather keeps everyone guessing, especially with {}. Does the weather change how your days feel?",
            matched
        ),
        LocalTopic::Place => format!(
            "I know {}. Plenty of folks in this waiting room mention it. What's been on your mind today?",
            title_case(matched)
        ),
        LocalTopic::Seasonal => format!(
            "{} comes up a lot this time of year. Is that something you're looking forward to?",
            title_case(matched)
        ),
    };
    Some(line)
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
