//! Source adapters module.
//!
//! Each supported publisher schema has its own record type that decodes
//! the raw JSON tolerantly and maps itself onto a canonical [`Creature`]:
//!
//! ```text
//! [raw JSON] → [SourceRecord] → map_to_canonical() → [Creature]
//! ```
//!
//! Adapters never fail on missing or unparsable fields. Absent numbers
//! become 0, absent saves and skills fall back to the raw ability bonus,
//! absent sense ranges are pulled out of the free-text senses line, and
//! absent collections are empty.
//!
//! The [`Importer`] drives a whole document through one adapter and
//! attaches attribution from configuration, never from the record.

pub mod dnd5eapi;
pub mod lenient;
pub mod open5e;
pub mod srd_text;

use crate::creature::{
    Ability, AbilityScores, Attribution, Creature, Feature, SavingThrows, Senses, Skill,
    SkillBonuses, Speeds,
};
use crate::error::{json_kind, ImportError};
use crate::rules;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use dnd5eapi::Dnd5eApiMonster;
pub use open5e::Open5eMonster;
pub use srd_text::SrdTextMonster;

/// Maps a decoded publisher record onto the canonical creature.
///
/// Implementations are infallible: partial data yields a partially
/// defaulted creature.
pub trait MapToCanonical {
    /// Build the canonical creature for this record.
    fn map_to_canonical(&self) -> Creature;
}

/// The publisher schemas this crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceFormat {
    /// Open5e API monsters: numeric fields, a `speed` object, a `skills` map.
    #[serde(rename = "open5e")]
    Open5e,
    /// SRD text dumps: numeric strings, a free-text `speed`, skills and
    /// saves as top-level fields.
    #[serde(rename = "srd_text")]
    SrdText,
    /// dnd5eapi.co monsters: `armor_class` and `proficiencies` lists and a
    /// discrete `senses` object.
    #[serde(rename = "dnd5eapi")]
    Dnd5eApi,
}

impl SourceFormat {
    /// Decode one raw record in this format.
    pub fn decode(self, value: Value) -> Result<SourceRecord, serde_json::Error> {
        Ok(match self {
            SourceFormat::Open5e => SourceRecord::Open5e(serde_json::from_value(value)?),
            SourceFormat::SrdText => SourceRecord::SrdText(serde_json::from_value(value)?),
            SourceFormat::Dnd5eApi => SourceRecord::Dnd5eApi(serde_json::from_value(value)?),
        })
    }

    /// Attribution used when the import configuration supplies none.
    pub fn default_attribution(self) -> Attribution {
        match self {
            SourceFormat::Open5e => Attribution::new("Open5e")
                .with_license("Open Gaming License v1.0a")
                .with_tag("#", "creature/")
                .with_label("open5e"),
            SourceFormat::SrdText => Attribution::new("Systems Reference Document 5.1")
                .with_license("https://creativecommons.org/licenses/by/4.0/legalcode")
                .with_tag("#", "creature/")
                .with_label("srd"),
            SourceFormat::Dnd5eApi => Attribution::new("D&D 5e SRD API")
                .with_license("Open Gaming License v1.0a")
                .with_tag("#", "creature/")
                .with_label("dnd5eapi"),
        }
    }
}

/// A decoded record, one variant per publisher schema.
#[derive(Debug, Clone)]
pub enum SourceRecord {
    Open5e(Open5eMonster),
    SrdText(SrdTextMonster),
    Dnd5eApi(Dnd5eApiMonster),
}

impl SourceRecord {
    pub fn format(&self) -> SourceFormat {
        match self {
            SourceRecord::Open5e(_) => SourceFormat::Open5e,
            SourceRecord::SrdText(_) => SourceFormat::SrdText,
            SourceRecord::Dnd5eApi(_) => SourceFormat::Dnd5eApi,
        }
    }
}

impl MapToCanonical for SourceRecord {
    fn map_to_canonical(&self) -> Creature {
        match self {
            SourceRecord::Open5e(record) => record.map_to_canonical(),
            SourceRecord::SrdText(record) => record.map_to_canonical(),
            SourceRecord::Dnd5eApi(record) => record.map_to_canonical(),
        }
    }
}

/// Import settings, usually read from the orchestration layer's config.
///
/// # Examples
///
/// ```rust
/// use bestiary::source::{ImportConfig, SourceFormat};
///
/// let config: ImportConfig = serde_json::from_str(
///     r#"{ "format": "srd_text", "attribution": { "source_title": "My SRD" } }"#,
/// ).unwrap();
/// assert_eq!(config.format, SourceFormat::SrdText);
/// assert_eq!(config.attribution.unwrap().source_title, "My SRD");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    pub format: SourceFormat,
    #[serde(default)]
    pub attribution: Option<Attribution>,
}

/// Outcome of importing one document.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Creatures in source order.
    pub creatures: Vec<Creature>,
    /// Records that could not be decoded at all.
    pub skipped: Vec<ImportError>,
}

impl ImportReport {
    /// True when every record produced a creature.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Runs documents through one source adapter.
///
/// # Examples
///
/// ```rust
/// use bestiary::source::{Importer, SourceFormat};
///
/// let importer = Importer::new(SourceFormat::SrdText);
/// let report = importer
///     .import_str(r#"[{ "name": "Goblin", "dexterity": "14", "challenge_rating": "1/4" }]"#)
///     .unwrap();
///
/// let goblin = &report.creatures[0];
/// assert_eq!(goblin.challenge_rating, 0.25);
/// assert_eq!(goblin.skills.acrobatics, 2);
/// ```
#[derive(Debug, Clone)]
pub struct Importer {
    format: SourceFormat,
    attribution: Attribution,
}

impl Importer {
    /// Create an importer using the format's default attribution.
    pub fn new(format: SourceFormat) -> Self {
        Self {
            format,
            attribution: format.default_attribution(),
        }
    }

    /// Create an importer from configuration.
    pub fn from_config(config: &ImportConfig) -> Self {
        let importer = Self::new(config.format);
        match &config.attribution {
            Some(attribution) => importer.with_attribution(attribution.clone()),
            None => importer,
        }
    }

    /// Replace the attribution attached to every imported creature.
    pub fn with_attribution(mut self, attribution: Attribution) -> Self {
        self.attribution = attribution;
        self
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    pub fn attribution(&self) -> &Attribution {
        &self.attribution
    }

    /// Decode and map a single record.
    pub fn map_record(&self, record: Value) -> Result<Creature, ImportError> {
        self.map_indexed(0, record)
    }

    /// Import a JSON document holding one record, an array of records, or
    /// a page object with a `results` array.
    pub fn import_str(&self, json: &str) -> Result<ImportReport, ImportError> {
        let document: Value = serde_json::from_str(json)?;
        self.import_value(document)
    }

    /// Import an already parsed document. See [`Importer::import_str`].
    pub fn import_value(&self, document: Value) -> Result<ImportReport, ImportError> {
        let records = match document {
            Value::Array(records) => records,
            Value::Object(mut page) => match page.remove("results") {
                Some(Value::Array(records)) => records,
                Some(other) => {
                    return Err(ImportError::UnexpectedShape {
                        found: json_kind(&other),
                    })
                }
                None => vec![Value::Object(page)],
            },
            other => {
                return Err(ImportError::UnexpectedShape {
                    found: json_kind(&other),
                })
            }
        };

        let mut report = ImportReport::default();
        for (index, record) in records.into_iter().enumerate() {
            match self.map_indexed(index, record) {
                Ok(creature) => report.creatures.push(creature),
                Err(err) => {
                    tracing::warn!(format = ?self.format, index, error = %err, "skipping record");
                    report.skipped.push(err);
                }
            }
        }

        tracing::info!(
            format = ?self.format,
            imported = report.creatures.len(),
            skipped = report.skipped.len(),
            "imported creature batch"
        );
        Ok(report)
    }

    fn map_indexed(&self, index: usize, record: Value) -> Result<Creature, ImportError> {
        let record = self
            .format
            .decode(record)
            .map_err(|err| ImportError::Record {
                index,
                message: err.to_string(),
            })?;
        let mut creature = record.map_to_canonical();
        creature.attribution = Some(self.attribution.clone());
        Ok(creature)
    }
}

/// A named entry as most publishers encode it. dnd5eapi nests damage dice
/// inside a `damage` list instead of a flat `damage_dice` field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFeature {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub desc: String,
    #[serde(deserialize_with = "lenient::int")]
    pub attack_bonus: Option<i32>,
    #[serde(deserialize_with = "lenient::text")]
    pub damage_dice: String,
    #[serde(deserialize_with = "lenient::int")]
    pub damage_bonus: Option<i32>,
    pub damage: Value,
}

impl RawFeature {
    fn to_feature(&self) -> Feature {
        let damage_dice = Some(self.damage_dice.clone())
            .filter(|dice| !dice.is_empty())
            .or_else(|| nested_damage_dice(&self.damage));
        Feature {
            name: self.name.clone(),
            description: self.desc.clone(),
            attack_bonus: self.attack_bonus,
            damage_dice,
            damage_bonus: self.damage_bonus,
        }
    }
}

fn nested_damage_dice(damage: &Value) -> Option<String> {
    damage
        .as_array()?
        .iter()
        .filter_map(|entry| entry.get("damage_dice")?.as_str())
        .map(str::trim)
        .find(|dice| !dice.is_empty())
        .map(String::from)
}

/// Map a publisher collection item by item, keeping order.
pub(crate) fn features(raw: &[RawFeature]) -> Vec<Feature> {
    raw.iter().map(RawFeature::to_feature).collect()
}

/// Resolve saves, using the ability bonus wherever the publisher gave none.
pub(crate) fn resolve_saves(
    scores: &AbilityScores,
    explicit: impl Fn(Ability) -> Option<i32>,
) -> SavingThrows {
    let mut saves = SavingThrows::unproficient(scores);
    for ability in Ability::ALL {
        if let Some(modifier) = explicit(ability) {
            saves.set(ability, modifier);
        }
    }
    saves
}

/// Resolve skills, using the governing ability bonus wherever the
/// publisher gave none.
pub(crate) fn resolve_skills(
    scores: &AbilityScores,
    explicit: impl Fn(Skill) -> Option<i32>,
) -> SkillBonuses {
    let mut skills = SkillBonuses::unproficient(scores);
    for skill in Skill::ALL {
        if let Some(bonus) = explicit(skill) {
            skills.set(skill, bonus);
        }
    }
    skills
}

/// Read sense ranges out of a free-text senses line. Passive Perception
/// falls back to `10 + perception` when the line omits it.
pub(crate) fn senses_from_text(text: &str, skills: &SkillBonuses) -> Senses {
    let csv = Some(text);
    Senses {
        blindsight: rules::extract_attribute(csv, "blindsight").unwrap_or(0),
        darkvision: rules::extract_attribute(csv, "darkvision").unwrap_or(0),
        tremorsense: rules::extract_attribute(csv, "tremorsense").unwrap_or(0),
        truesight: rules::extract_attribute(csv, "truesight").unwrap_or(0),
        passive_perception: passive_perception_or_default(
            rules::extract_attribute(csv, "passive perception"),
            skills,
        ),
    }
}

pub(crate) fn passive_perception_or_default(explicit: Option<i32>, skills: &SkillBonuses) -> i32 {
    explicit.unwrap_or_else(|| {
        tracing::debug!("passive perception missing, deriving from perception skill");
        skills.perception.saturating_add(10)
    })
}

/// Resolve a challenge rating, defaulting to 0 for missing, unparsable or
/// negative values.
pub(crate) fn challenge_or_default(challenge_rating: Option<f64>, name: &str) -> f64 {
    match challenge_rating {
        Some(cr) if cr >= 0.0 => cr,
        other => {
            tracing::debug!(creature = name, value = ?other, "challenge rating unusable, using 0");
            0.0
        }
    }
}

/// Speeds given as an object of per-mode values, or as free text.
pub(crate) fn speeds_from_value(value: &Value) -> Speeds {
    match value {
        Value::Object(modes) => {
            let mode = |key: &str| modes.get(key).and_then(feet).unwrap_or(0);
            Speeds {
                walk: mode("walk"),
                swim: mode("swim"),
                fly: mode("fly"),
                burrow: mode("burrow"),
                climb: mode("climb"),
                lightwalking: mode("lightwalking"),
                hover: modes
                    .get("hover")
                    .map(|hover| match hover {
                        Value::Bool(flag) => *flag,
                        other => feet(other).is_some_and(|n| n != 0),
                    })
                    .unwrap_or(false),
            }
        }
        Value::String(text) => speeds_from_text(text),
        Value::Number(_) => Speeds {
            walk: feet(value).unwrap_or(0),
            ..Speeds::default()
        },
        _ => Speeds::default(),
    }
}

/// Parse a speed line such as `30 ft., fly 60 ft. (hover), swim 30 ft.`.
///
/// The first clause that starts with a digit is the walking speed.
pub(crate) fn speeds_from_text(text: &str) -> Speeds {
    let csv = Some(text);
    let walk = text
        .split(',')
        .map(str::trim)
        .find(|clause| clause.starts_with(|c: char| c.is_ascii_digit()))
        .and_then(leading_number)
        .or_else(|| rules::extract_attribute(csv, "walk"));

    Speeds {
        walk: walk.unwrap_or(0),
        swim: rules::extract_attribute(csv, "swim").unwrap_or(0),
        fly: rules::extract_attribute(csv, "fly").unwrap_or(0),
        burrow: rules::extract_attribute(csv, "burrow").unwrap_or(0),
        climb: rules::extract_attribute(csv, "climb").unwrap_or(0),
        lightwalking: rules::extract_attribute(csv, "lightwalking").unwrap_or(0),
        hover: text.to_lowercase().contains("(hover)"),
    }
}

/// A distance given as a number or as text like `"60 ft."`.
pub(crate) fn feet(value: &Value) -> Option<i32> {
    match value {
        Value::String(text) => leading_number(text),
        other => lenient::int_from_value(other),
    }
}

fn leading_number(text: &str) -> Option<i32> {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_speeds_from_text() {
        let speeds = speeds_from_text("30 ft., fly 60 ft. (hover), swim 20 ft.");
        assert_eq!(speeds.walk, 30);
        assert_eq!(speeds.fly, 60);
        assert_eq!(speeds.swim, 20);
        assert_eq!(speeds.climb, 0);
        assert!(speeds.hover);
    }

    #[test]
    fn test_speeds_from_text_with_named_walk() {
        let speeds = speeds_from_text("walk 40 ft., burrow 10 ft.");
        assert_eq!(speeds.walk, 40);
        assert_eq!(speeds.burrow, 10);
        assert!(!speeds.hover);
    }

    #[test]
    fn test_speeds_from_object_with_text_values() {
        let speeds = speeds_from_value(&json!({ "walk": "10 ft.", "fly": "80 ft.", "hover": true }));
        assert_eq!(speeds.walk, 10);
        assert_eq!(speeds.fly, 80);
        assert!(speeds.hover);
    }

    #[test]
    fn test_speeds_from_unusable_value() {
        assert_eq!(speeds_from_value(&Value::Null), Speeds::default());
        assert_eq!(speeds_from_value(&json!(25)).walk, 25);
    }

    #[test]
    fn test_resolve_saves_keeps_explicit_values() {
        let scores = AbilityScores {
            dexterity: 14,
            wisdom: 12,
            ..AbilityScores::default()
        };
        let saves = resolve_saves(&scores, |ability| {
            (ability == Ability::Dexterity).then_some(6)
        });
        assert_eq!(saves.dexterity, 6);
        assert_eq!(saves.wisdom, 1);
        assert_eq!(saves.strength, -5);
    }

    #[test]
    fn test_senses_fallback_passive_perception() {
        let mut skills = SkillBonuses::default();
        skills.perception = 3;
        let senses = senses_from_text("darkvision 60 ft.", &skills);
        assert_eq!(senses.darkvision, 60);
        assert_eq!(senses.passive_perception, 13);
    }

    #[test]
    fn test_passive_perception_fallback_saturates() {
        let mut skills = SkillBonuses::default();
        skills.perception = i32::MAX;
        assert_eq!(passive_perception_or_default(None, &skills), i32::MAX);
        assert_eq!(passive_perception_or_default(Some(7), &skills), 7);
    }

    #[test]
    fn test_challenge_defaults() {
        assert_eq!(challenge_or_default(Some(2.0), "x"), 2.0);
        assert_eq!(challenge_or_default(None, "x"), 0.0);
        assert_eq!(challenge_or_default(Some(-1.0), "x"), 0.0);
    }

    #[test]
    fn test_raw_feature_nested_damage() {
        let raw: RawFeature = serde_json::from_value(json!({
            "name": "Bite",
            "desc": "Melee Weapon Attack",
            "attack_bonus": 4,
            "damage": [{ "damage_dice": "1d6+2" }]
        }))
        .unwrap();
        let feature = raw.to_feature();
        assert_eq!(feature.attack_bonus, Some(4));
        assert_eq!(feature.damage_dice.as_deref(), Some("1d6+2"));
        assert_eq!(feature.damage_bonus, None);
    }

    #[test]
    fn test_source_format_names() {
        let formats: Vec<SourceFormat> =
            serde_json::from_value(json!(["open5e", "srd_text", "dnd5eapi"])).unwrap();
        assert_eq!(
            formats,
            vec![SourceFormat::Open5e, SourceFormat::SrdText, SourceFormat::Dnd5eApi]
        );
    }
}
