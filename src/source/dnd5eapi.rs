//! dnd5eapi.co monster schema.
//!
//! This API keeps armor class as a list of `{ type, value, armor, desc }`
//! entries, lists save and skill proficiencies under `proficiencies`, and
//! splits senses into a discrete object (`"darkvision": "60 ft."`,
//! `"passive_perception": 9`). Damage and condition fields are lists.

use super::{lenient, MapToCanonical, RawFeature};
use crate::creature::{Ability, AbilityScores, Creature, Senses, Skill, SkillBonuses};
use serde::Deserialize;
use serde_json::Value;

/// One monster record from dnd5eapi.co.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Dnd5eApiMonster {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub size: String,
    #[serde(rename = "type", deserialize_with = "lenient::text")]
    pub creature_type: String,
    #[serde(deserialize_with = "lenient::text")]
    pub subtype: String,
    #[serde(deserialize_with = "lenient::text")]
    pub alignment: String,

    pub armor_class: Value,
    #[serde(deserialize_with = "lenient::int")]
    pub hit_points: Option<i32>,
    #[serde(deserialize_with = "lenient::text")]
    pub hit_dice: String,
    pub speed: Value,

    #[serde(deserialize_with = "lenient::int")]
    pub strength: Option<i32>,
    #[serde(deserialize_with = "lenient::int")]
    pub dexterity: Option<i32>,
    #[serde(deserialize_with = "lenient::int")]
    pub constitution: Option<i32>,
    #[serde(deserialize_with = "lenient::int")]
    pub intelligence: Option<i32>,
    #[serde(deserialize_with = "lenient::int")]
    pub wisdom: Option<i32>,
    #[serde(deserialize_with = "lenient::int")]
    pub charisma: Option<i32>,

    #[serde(deserialize_with = "lenient::list")]
    pub proficiencies: Vec<ApiProficiency>,

    #[serde(deserialize_with = "lenient::text")]
    pub damage_vulnerabilities: String,
    #[serde(deserialize_with = "lenient::text")]
    pub damage_resistances: String,
    #[serde(deserialize_with = "lenient::text")]
    pub damage_immunities: String,
    #[serde(deserialize_with = "lenient::text")]
    pub condition_immunities: String,
    pub senses: Value,
    #[serde(deserialize_with = "lenient::text")]
    pub languages: String,
    #[serde(deserialize_with = "lenient::challenge_rating")]
    pub challenge_rating: Option<f64>,

    #[serde(deserialize_with = "lenient::list")]
    pub special_abilities: Vec<RawFeature>,
    #[serde(deserialize_with = "lenient::list")]
    pub actions: Vec<RawFeature>,
    #[serde(deserialize_with = "lenient::list")]
    pub reactions: Vec<RawFeature>,
    #[serde(deserialize_with = "lenient::list")]
    pub legendary_actions: Vec<RawFeature>,
}

/// A `{ value, proficiency: { index, name } }` entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiProficiency {
    #[serde(deserialize_with = "lenient::int")]
    pub value: Option<i32>,
    pub proficiency: ApiReference,
}

/// A reference to another API resource.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiReference {
    #[serde(deserialize_with = "lenient::text")]
    pub index: String,
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
}

impl Dnd5eApiMonster {
    fn save(&self, ability: Ability) -> Option<i32> {
        self.proficiencies.iter().find_map(|entry| {
            let abbreviation = entry.proficiency.index.strip_prefix("saving-throw-")?;
            abbreviation
                .eq_ignore_ascii_case(ability.abbreviation())
                .then_some(entry.value)?
        })
    }

    fn skill(&self, skill: Skill) -> Option<i32> {
        self.proficiencies.iter().find_map(|entry| {
            let slug = entry.proficiency.index.strip_prefix("skill-")?;
            (Skill::from_key(slug) == Some(skill)).then_some(entry.value)?
        })
    }

    fn senses(&self, skills: &SkillBonuses) -> Senses {
        if let Value::String(text) = &self.senses {
            return super::senses_from_text(text, skills);
        }
        let range = |key: &str| self.senses.get(key).and_then(super::feet).unwrap_or(0);
        Senses {
            blindsight: range("blindsight"),
            darkvision: range("darkvision"),
            tremorsense: range("tremorsense"),
            truesight: range("truesight"),
            passive_perception: super::passive_perception_or_default(
                self.senses.get("passive_perception").and_then(super::feet),
                skills,
            ),
        }
    }
}

/// Split the first armor class entry into its value and a statblock
/// description.
fn armor(armor_class: &Value) -> (i32, String) {
    let entry = match armor_class {
        Value::Array(entries) => match entries.first() {
            Some(entry) => entry,
            None => return (0, String::new()),
        },
        other => return (lenient::int_from_value(other).unwrap_or(0), String::new()),
    };

    let value = entry
        .get("value")
        .and_then(lenient::int_from_value)
        .unwrap_or(0);
    let kind = entry.get("type").and_then(Value::as_str).unwrap_or_default();
    let description = match kind {
        "natural" => String::from("natural armor"),
        "dex" => String::new(),
        "armor" => entry
            .get("armor")
            .map(lenient::text_from_value)
            .unwrap_or_default()
            .to_lowercase(),
        _ => entry
            .get("desc")
            .map(lenient::text_from_value)
            .unwrap_or_default(),
    };
    (value, description)
}

impl MapToCanonical for Dnd5eApiMonster {
    fn map_to_canonical(&self) -> Creature {
        let abilities = AbilityScores {
            strength: self.strength.unwrap_or(0),
            dexterity: self.dexterity.unwrap_or(0),
            constitution: self.constitution.unwrap_or(0),
            intelligence: self.intelligence.unwrap_or(0),
            wisdom: self.wisdom.unwrap_or(0),
            charisma: self.charisma.unwrap_or(0),
        };
        let saving_throws = super::resolve_saves(&abilities, |ability| self.save(ability));
        let skills = super::resolve_skills(&abilities, |skill| self.skill(skill));
        let senses = self.senses(&skills);
        let (armor_class, armor_description) = armor(&self.armor_class);

        Creature {
            name: self.name.clone(),
            size: self.size.clone(),
            creature_type: self.creature_type.clone(),
            subtype: self.subtype.clone(),
            alignment: self.alignment.clone(),
            armor_class,
            armor_description,
            hit_points: self.hit_points.unwrap_or(0),
            hit_dice: self.hit_dice.clone(),
            speed: super::speeds_from_value(&self.speed),
            abilities,
            saving_throws,
            skills,
            damage_vulnerabilities: self.damage_vulnerabilities.clone(),
            damage_resistances: self.damage_resistances.clone(),
            damage_immunities: self.damage_immunities.clone(),
            condition_immunities: self.condition_immunities.clone(),
            senses,
            languages: self.languages.clone(),
            challenge_rating: super::challenge_or_default(self.challenge_rating, &self.name),
            special_abilities: super::features(&self.special_abilities),
            actions: super::features(&self.actions),
            reactions: super::features(&self.reactions),
            legendary_description: String::new(),
            legendary_actions: super::features(&self.legendary_actions),
            attribution: None,
        }
    }
}
