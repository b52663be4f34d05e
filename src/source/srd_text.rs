//! String-typed SRD dump schema.
//!
//! Every number arrives as a string (`"dexterity": "14"`), speed is one
//! free-text line, and saves and skills are top-level fields named
//! `dexterity_save`, `acrobatics`, `sleight_of_hand` and so on. Those
//! columns are picked out of the remaining fields by name.

use super::{lenient, MapToCanonical, RawFeature};
use crate::creature::{Ability, AbilityScores, Creature, Skill};
use serde::Deserialize;
use serde_json::{Map, Value};

/// One monster record from a string-typed SRD dump.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SrdTextMonster {
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

    #[serde(deserialize_with = "lenient::int")]
    pub armor_class: Option<i32>,
    #[serde(deserialize_with = "lenient::text")]
    pub armor_desc: String,
    #[serde(deserialize_with = "lenient::int")]
    pub hit_points: Option<i32>,
    #[serde(deserialize_with = "lenient::text")]
    pub hit_dice: String,
    #[serde(deserialize_with = "lenient::text")]
    pub speed: String,

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

    #[serde(deserialize_with = "lenient::text")]
    pub damage_vulnerabilities: String,
    #[serde(deserialize_with = "lenient::text")]
    pub damage_resistances: String,
    #[serde(deserialize_with = "lenient::text")]
    pub damage_immunities: String,
    #[serde(deserialize_with = "lenient::text")]
    pub condition_immunities: String,
    #[serde(deserialize_with = "lenient::text")]
    pub senses: String,
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
    #[serde(deserialize_with = "lenient::text")]
    pub legendary_desc: String,
    #[serde(deserialize_with = "lenient::list")]
    pub legendary_actions: Vec<RawFeature>,

    /// Save and skill columns, plus anything else the dump carries.
    #[serde(flatten)]
    pub columns: Map<String, Value>,
}

impl SrdTextMonster {
    fn column(&self, key: &str) -> Option<i32> {
        self.columns.get(key).and_then(lenient::int_from_value)
    }
}

impl MapToCanonical for SrdTextMonster {
    fn map_to_canonical(&self) -> Creature {
        let abilities = AbilityScores {
            strength: self.strength.unwrap_or(0),
            dexterity: self.dexterity.unwrap_or(0),
            constitution: self.constitution.unwrap_or(0),
            intelligence: self.intelligence.unwrap_or(0),
            wisdom: self.wisdom.unwrap_or(0),
            charisma: self.charisma.unwrap_or(0),
        };
        let saving_throws = super::resolve_saves(&abilities, |ability: Ability| {
            self.column(&format!("{}_save", ability.key()))
        });
        let skills = super::resolve_skills(&abilities, |skill: Skill| self.column(skill.key()));
        let senses = super::senses_from_text(&self.senses, &skills);

        Creature {
            name: self.name.clone(),
            size: self.size.clone(),
            creature_type: self.creature_type.clone(),
            subtype: self.subtype.clone(),
            alignment: self.alignment.clone(),
            armor_class: self.armor_class.unwrap_or(0),
            armor_description: self.armor_desc.clone(),
            hit_points: self.hit_points.unwrap_or(0),
            hit_dice: self.hit_dice.clone(),
            speed: super::speeds_from_text(&self.speed),
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
            legendary_description: self.legendary_desc.clone(),
            legendary_actions: super::features(&self.legendary_actions),
            attribution: None,
        }
    }
}
