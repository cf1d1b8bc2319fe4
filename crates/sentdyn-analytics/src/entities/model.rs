//! Tagger model resource: gazetteers and cue vocabularies, loaded from YAML.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The English model shipped with the crate.
pub const BUNDLED_MODEL: &str = include_str!("../../models/ner-en.yaml");

/// Labels the tagger assigns before they are mapped onto output categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum NativeLabel {
    Person,
    Norp,
    Fac,
    Org,
    Gpe,
    Loc,
    Product,
    Event,
    Date,
    Time,
    Percent,
    Money,
    Cardinal,
    Ordinal,
}

impl NativeLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NativeLabel::Person => "PERSON",
            NativeLabel::Norp => "NORP",
            NativeLabel::Fac => "FAC",
            NativeLabel::Org => "ORG",
            NativeLabel::Gpe => "GPE",
            NativeLabel::Loc => "LOC",
            NativeLabel::Product => "PRODUCT",
            NativeLabel::Event => "EVENT",
            NativeLabel::Date => "DATE",
            NativeLabel::Time => "TIME",
            NativeLabel::Percent => "PERCENT",
            NativeLabel::Money => "MONEY",
            NativeLabel::Cardinal => "CARDINAL",
            NativeLabel::Ordinal => "ORDINAL",
        }
    }
}

impl std::fmt::Display for NativeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaggerModel {
    pub name: String,
    pub version: u32,
    pub language: String,
    /// Known surface forms per label, matched case-sensitively, longest first.
    #[serde(default)]
    pub gazetteer: BTreeMap<NativeLabel, Vec<String>>,
    #[serde(default)]
    pub names: NameCues,
    #[serde(default)]
    pub calendar: CalendarVocab,
    #[serde(default)]
    pub numbers: NumberVocab,
}

/// Cues for classifying capitalized spans the gazetteer does not know.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NameCues {
    pub first_names: Vec<String>,
    pub person_titles: Vec<String>,
    pub org_suffixes: Vec<String>,
    pub location_suffixes: Vec<String>,
    /// Lowercase words that, directly before a span, mark it as a place.
    pub location_cues: Vec<String>,
    /// Lowercase words allowed inside a name ("Bank of Spain").
    pub connectors: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarVocab {
    pub months: Vec<String>,
    /// Months that are also common words; tagged only next to a day or year.
    pub ambiguous_months: Vec<String>,
    pub weekdays: Vec<String>,
    pub relative_days: Vec<String>,
    pub relative_modifiers: Vec<String>,
    pub periods: Vec<String>,
    pub durations: Vec<String>,
    pub time_words: Vec<String>,
    pub meridiems: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NumberVocab {
    pub cardinals: Vec<String>,
    pub ordinals: Vec<String>,
    pub scales: Vec<String>,
    pub currency_symbols: Vec<String>,
    pub currency_words: Vec<String>,
    pub percent_words: Vec<String>,
}

impl TaggerModel {
    /// Parse and validate the model shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the bundled YAML is malformed.
    pub fn bundled() -> Result<Self, ModelError> {
        parse_model(BUNDLED_MODEL)
    }

    /// Total number of gazetteer entries across labels.
    #[must_use]
    pub fn gazetteer_len(&self) -> usize {
        self.gazetteer.values().map(Vec::len).sum()
    }
}

/// Load and validate a tagger model from a YAML file.
///
/// # Errors
///
/// Returns [`ModelError`] if the file cannot be read, parsed, or fails validation.
pub fn load_model(path: &Path) -> Result<TaggerModel, ModelError> {
    let content = std::fs::read_to_string(path).map_err(|e| ModelError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_model(&content)
}

/// Parse and validate a tagger model from YAML text.
///
/// # Errors
///
/// Returns [`ModelError`] if the YAML is malformed or fails validation.
pub fn parse_model(yaml: &str) -> Result<TaggerModel, ModelError> {
    let model: TaggerModel = serde_yaml::from_str(yaml)?;
    validate_model(&model)?;
    Ok(model)
}

fn validate_model(model: &TaggerModel) -> Result<(), ModelError> {
    if model.name.trim().is_empty() {
        return Err(ModelError::Validation(
            "model name must be non-empty".to_string(),
        ));
    }
    if model.version == 0 {
        return Err(ModelError::Validation(format!(
            "model '{}' has invalid version 0",
            model.name
        )));
    }
    if model.gazetteer_len() == 0 {
        return Err(ModelError::Validation(format!(
            "model '{}' defines no gazetteer entries",
            model.name
        )));
    }

    let mut seen: HashMap<&str, NativeLabel> = HashMap::new();
    for (&label, entries) in &model.gazetteer {
        for entry in entries {
            if entry.trim().is_empty() {
                return Err(ModelError::Validation(format!(
                    "blank gazetteer entry under {label}"
                )));
            }
            if let Some(previous) = seen.insert(entry.as_str(), label) {
                if previous != label {
                    return Err(ModelError::Validation(format!(
                        "gazetteer entry '{entry}' listed under both {previous} and {label}"
                    )));
                }
            }
        }
    }

    let calendar = &model.calendar;
    if let Some(month) = calendar
        .ambiguous_months
        .iter()
        .find(|m| !calendar.months.contains(m))
    {
        return Err(ModelError::Validation(format!(
            "ambiguous month '{month}' is not listed in months"
        )));
    }

    Ok(())
}
