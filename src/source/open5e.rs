//! Open5e monster schema.
//!
//! Open5e publishes numeric scores, a pre-split `speed` object, explicit
//! `*_save` fields (null when not proficient) and a `skills` object keyed
//! by skill name. Senses come as one free-text line.

use super::{lenient, MapToCanonical, RawFeature};
use crate::creature::{Ability, AbilityScores, Creature, Skill};
use serde::Deserialize;
use serde_json::Value;

/// One monster record from the Open5e API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Open5eMonster {
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

    #[serde(deserialize_with = "lenient::int")]
    pub strength_save: Option<i32>,
    #[serde(deserialize_with = "lenient::int")]
    pub dexterity_save: Option<i32>,
    #[serde(deserialize_with = "lenient::int")]
    pub constitution_save: Option<i32>,
    #[serde(deserialize_with = "lenient::int")]
    pub intelligence_save: Option<i32>,
    #[serde(deserialize_with = "lenient::int")]
    pub wisdom_save: Option<i32>,
    #[serde(deserialize_with = "lenient::int")]
    pub charisma_save: Option<i32>,

    /// Top-level perception bonus; wins over `skills.perception` when both
    /// are present.
    #[serde(deserialize_with = "lenient::int")]
    pub perception: Option<i32>,
    pub skills: Value,

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
}

impl Open5eMonster {
    fn save(&self, ability: Ability) -> Option<i32> {
        match ability {
            Ability::Strength => self.strength_save,
            Ability::Dexterity => self.dexterity_save,
            Ability::Constitution => self.constitution_save,
            Ability::Intelligence => self.intelligence_save,
            Ability::Wisdom => self.wisdom_save,
            Ability::Charisma => self.charisma_save,
        }
    }

    fn skill(&self, skill: Skill) -> Option<i32> {
        if skill == Skill::Perception && self.perception.is_some() {
            return self.perception;
        }
        let Value::Object(skills) = &self.skills else {
            return None;
        };
        skills
            .iter()
            .find(|(key, _)| Skill::from_key(key) == Some(skill))
            .and_then(|(_, bonus)| lenient::int_from_value(bonus))
    }
}

impl MapToCanonical for Open5eMonster {
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
            legendary_description: self.legendary_desc.clone(),
            legendary_actions: super::features(&self.legendary_actions),
            attribution: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn adult_dragon() -> Open5eMonster {
        serde_json::from_value(json!({
            "name": "Adult Black Dragon",
            "size": "Huge",
            "type": "dragon",
            "subtype": "",
            "alignment": "chaotic evil",
            "armor_class": 19,
            "armor_desc": "natural armor",
            "hit_points": 195,
            "hit_dice": "17d12+85",
            "speed": { "walk": 40, "fly": 80, "swim": 40 },
            "strength": 23,
            "dexterity": 14,
            "constitution": 21,
            "intelligence": 14,
            "wisdom": 13,
            "charisma": 17,
            "strength_save": null,
            "dexterity_save": 7,
            "constitution_save": 10,
            "intelligence_save": null,
            "wisdom_save": 6,
            "charisma_save": 8,
            "perception": 11,
            "skills": { "perception": 11, "stealth": 7 },
            "damage_vulnerabilities": "",
            "damage_resistances": "",
            "damage_immunities": "acid",
            "condition_immunities": "",
            "senses": "blindsight 60 ft., darkvision 120 ft., passive Perception 21",
            "languages": "Common, Draconic",
            "challenge_rating": "14",
            "actions": [
                { "name": "Multiattack", "desc": "The dragon makes three attacks." },
                { "name": "Bite", "desc": "Melee Weapon Attack: +11 to hit.", "attack_bonus": 11, "damage_dice": "2d10+4d8", "damage_bonus": 6 }
            ],
            "reactions": "",
            "legendary_desc": "The dragon can take 3 legendary actions.",
            "legendary_actions": [
                { "name": "Detect", "desc": "The dragon makes a Wisdom (Perception) check." }
            ],
            "special_abilities": [
                { "name": "Amphibious", "desc": "The dragon can breathe air and water." }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_maps_numeric_fields() {
        let creature = adult_dragon().map_to_canonical();
        assert_eq!(creature.name, "Adult Black Dragon");
        assert_eq!(creature.armor_class, 19);
        assert_eq!(creature.armor_description, "natural armor");
        assert_eq!(creature.hit_points, 195);
        assert_eq!(creature.speed.walk, 40);
        assert_eq!(creature.speed.fly, 80);
        assert!(!creature.speed.hover);
        assert_eq!(creature.challenge_rating, 14.0);
    }

    #[test]
    fn test_null_saves_fall_back_to_ability_bonus() {
        let creature = adult_dragon().map_to_canonical();
        assert_eq!(creature.saving_throws.strength, 6);
        assert_eq!(creature.saving_throws.intelligence, 2);
        assert_eq!(creature.saving_throws.dexterity, 7);
        assert!(!creature.is_proficient_save(Ability::Strength));
        assert!(creature.is_proficient_save(Ability::Dexterity));
    }

    #[test]
    fn test_skills_map_and_defaults() {
        let creature = adult_dragon().map_to_canonical();
        assert_eq!(creature.skills.perception, 11);
        assert_eq!(creature.skills.stealth, 7);
        assert_eq!(creature.skills.athletics, 6);
        assert_eq!(creature.skills.arcana, 2);
    }

    #[test]
    fn test_senses_from_free_text() {
        let creature = adult_dragon().map_to_canonical();
        assert_eq!(creature.senses.blindsight, 60);
        assert_eq!(creature.senses.darkvision, 120);
        assert_eq!(creature.senses.tremorsense, 0);
        assert_eq!(creature.senses.passive_perception, 21);
    }

    #[test]
    fn test_collections_preserve_order_and_metadata() {
        let creature = adult_dragon().map_to_canonical();
        assert_eq!(creature.actions.len(), 2);
        assert_eq!(creature.actions[0].name, "Multiattack");
        assert_eq!(creature.actions[1].attack_bonus, Some(11));
        assert_eq!(creature.actions[1].damage_dice.as_deref(), Some("2d10+4d8"));
        assert_eq!(creature.actions[1].damage_bonus, Some(6));
        assert!(creature.reactions.is_empty());
        assert_eq!(creature.legendary_actions.len(), 1);
        assert_eq!(
            creature.legendary_description,
            "The dragon can take 3 legendary actions."
        );
    }

    #[test]
    fn test_empty_record_maps_to_defaults() {
        let record: Open5eMonster = serde_json::from_value(json!({})).unwrap();
        let creature = record.map_to_canonical();
        assert_eq!(creature.name, "");
        assert_eq!(creature.abilities.strength, 0);
        assert_eq!(creature.saving_throws.strength, -5);
        assert_eq!(creature.skills.stealth, -5);
        assert_eq!(creature.senses.passive_perception, 5);
        assert_eq!(creature.challenge_rating, 0.0);
        assert!(creature.actions.is_empty());
    }
}
