//! Canonical creature module.
//!
//! `Creature` is the publisher-independent statblock every source adapter
//! produces and every renderer consumes. Saves and skills hold resolved
//! values: when a publisher omits one, the adapter stores the raw ability
//! bonus instead, so renderers can detect proficiency by comparison.

use crate::rules;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// The six ability scores.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// All abilities in statblock order.
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Upper-case three letter form used on score lines (`STR`).
    pub fn abbreviation(self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    /// Title-case form used on the saving throws line (`Dex`).
    pub fn short_name(self) -> &'static str {
        match self {
            Ability::Strength => "Str",
            Ability::Dexterity => "Dex",
            Ability::Constitution => "Con",
            Ability::Intelligence => "Int",
            Ability::Wisdom => "Wis",
            Ability::Charisma => "Cha",
        }
    }

    /// Lower-case full name, which is also the field name most publishers use.
    pub fn key(self) -> &'static str {
        match self {
            Ability::Strength => "strength",
            Ability::Dexterity => "dexterity",
            Ability::Constitution => "constitution",
            Ability::Intelligence => "intelligence",
            Ability::Wisdom => "wisdom",
            Ability::Charisma => "charisma",
        }
    }
}

/// The eighteen 5e skills.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Acrobatics,
    AnimalHandling,
    Arcana,
    Athletics,
    Deception,
    History,
    Insight,
    Intimidation,
    Investigation,
    Medicine,
    Nature,
    Perception,
    Performance,
    Persuasion,
    Religion,
    SleightOfHand,
    Stealth,
    Survival,
}

impl Skill {
    /// All skills in statblock (alphabetical) order.
    pub const ALL: [Skill; 18] = [
        Skill::Acrobatics,
        Skill::AnimalHandling,
        Skill::Arcana,
        Skill::Athletics,
        Skill::Deception,
        Skill::History,
        Skill::Insight,
        Skill::Intimidation,
        Skill::Investigation,
        Skill::Medicine,
        Skill::Nature,
        Skill::Perception,
        Skill::Performance,
        Skill::Persuasion,
        Skill::Religion,
        Skill::SleightOfHand,
        Skill::Stealth,
        Skill::Survival,
    ];

    /// The ability whose bonus a non-proficient check uses.
    pub fn governing_ability(self) -> Ability {
        match self {
            Skill::Athletics => Ability::Strength,
            Skill::Acrobatics | Skill::SleightOfHand | Skill::Stealth => Ability::Dexterity,
            Skill::Arcana
            | Skill::History
            | Skill::Investigation
            | Skill::Nature
            | Skill::Religion => Ability::Intelligence,
            Skill::AnimalHandling
            | Skill::Insight
            | Skill::Medicine
            | Skill::Perception
            | Skill::Survival => Ability::Wisdom,
            Skill::Deception | Skill::Intimidation | Skill::Performance | Skill::Persuasion => {
                Ability::Charisma
            }
        }
    }

    /// Name as printed on the skills line.
    pub fn display_name(self) -> &'static str {
        match self {
            Skill::Acrobatics => "Acrobatics",
            Skill::AnimalHandling => "Animal Handling",
            Skill::Arcana => "Arcana",
            Skill::Athletics => "Athletics",
            Skill::Deception => "Deception",
            Skill::History => "History",
            Skill::Insight => "Insight",
            Skill::Intimidation => "Intimidation",
            Skill::Investigation => "Investigation",
            Skill::Medicine => "Medicine",
            Skill::Nature => "Nature",
            Skill::Perception => "Perception",
            Skill::Performance => "Performance",
            Skill::Persuasion => "Persuasion",
            Skill::Religion => "Religion",
            Skill::SleightOfHand => "Sleight of Hand",
            Skill::Stealth => "Stealth",
            Skill::Survival => "Survival",
        }
    }

    /// Snake-case field name (`animal_handling`).
    pub fn key(self) -> &'static str {
        match self {
            Skill::Acrobatics => "acrobatics",
            Skill::AnimalHandling => "animal_handling",
            Skill::Arcana => "arcana",
            Skill::Athletics => "athletics",
            Skill::Deception => "deception",
            Skill::History => "history",
            Skill::Insight => "insight",
            Skill::Intimidation => "intimidation",
            Skill::Investigation => "investigation",
            Skill::Medicine => "medicine",
            Skill::Nature => "nature",
            Skill::Perception => "perception",
            Skill::Performance => "performance",
            Skill::Persuasion => "persuasion",
            Skill::Religion => "religion",
            Skill::SleightOfHand => "sleight_of_hand",
            Skill::Stealth => "stealth",
            Skill::Survival => "survival",
        }
    }

    /// Look a skill up by its snake-case key, display name, or a
    /// kebab-case slug (`sleight-of-hand`). Case-insensitive.
    pub fn from_key(key: &str) -> Option<Skill> {
        let normalized = key.trim().to_lowercase().replace(['-', ' '], "_");
        Skill::ALL.into_iter().find(|skill| skill.key() == normalized)
    }
}

/// Raw ability scores. A score the publisher omitted is stored as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilityScores {
    /// Get the raw score for an ability.
    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    /// Set the raw score for an ability.
    pub fn set(&mut self, ability: Ability, score: i32) {
        match ability {
            Ability::Strength => self.strength = score,
            Ability::Dexterity => self.dexterity = score,
            Ability::Constitution => self.constitution = score,
            Ability::Intelligence => self.intelligence = score,
            Ability::Wisdom => self.wisdom = score,
            Ability::Charisma => self.charisma = score,
        }
    }

    /// The derived ability bonus for an ability.
    pub fn bonus(&self, ability: Ability) -> i32 {
        rules::ability_bonus(self.get(ability))
    }
}

/// Resolved saving throw modifiers, one per ability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingThrows {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl SavingThrows {
    /// Fill every save from the ability bonus, i.e. a creature proficient
    /// in none of them.
    pub fn unproficient(scores: &AbilityScores) -> Self {
        let mut saves = Self::default();
        for ability in Ability::ALL {
            saves.set(ability, scores.bonus(ability));
        }
        saves
    }

    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, ability: Ability, modifier: i32) {
        match ability {
            Ability::Strength => self.strength = modifier,
            Ability::Dexterity => self.dexterity = modifier,
            Ability::Constitution => self.constitution = modifier,
            Ability::Intelligence => self.intelligence = modifier,
            Ability::Wisdom => self.wisdom = modifier,
            Ability::Charisma => self.charisma = modifier,
        }
    }
}

/// Resolved skill bonuses for all eighteen skills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillBonuses {
    pub acrobatics: i32,
    pub animal_handling: i32,
    pub arcana: i32,
    pub athletics: i32,
    pub deception: i32,
    pub history: i32,
    pub insight: i32,
    pub intimidation: i32,
    pub investigation: i32,
    pub medicine: i32,
    pub nature: i32,
    pub perception: i32,
    pub performance: i32,
    pub persuasion: i32,
    pub religion: i32,
    pub sleight_of_hand: i32,
    pub stealth: i32,
    pub survival: i32,
}

impl SkillBonuses {
    /// Fill every skill from its governing ability bonus.
    pub fn unproficient(scores: &AbilityScores) -> Self {
        let mut skills = Self::default();
        for skill in Skill::ALL {
            skills.set(skill, scores.bonus(skill.governing_ability()));
        }
        skills
    }

    pub fn get(&self, skill: Skill) -> i32 {
        *self.slot(skill)
    }

    pub fn set(&mut self, skill: Skill, bonus: i32) {
        *self.slot_mut(skill) = bonus;
    }

    fn slot(&self, skill: Skill) -> &i32 {
        match skill {
            Skill::Acrobatics => &self.acrobatics,
            Skill::AnimalHandling => &self.animal_handling,
            Skill::Arcana => &self.arcana,
            Skill::Athletics => &self.athletics,
            Skill::Deception => &self.deception,
            Skill::History => &self.history,
            Skill::Insight => &self.insight,
            Skill::Intimidation => &self.intimidation,
            Skill::Investigation => &self.investigation,
            Skill::Medicine => &self.medicine,
            Skill::Nature => &self.nature,
            Skill::Perception => &self.perception,
            Skill::Performance => &self.performance,
            Skill::Persuasion => &self.persuasion,
            Skill::Religion => &self.religion,
            Skill::SleightOfHand => &self.sleight_of_hand,
            Skill::Stealth => &self.stealth,
            Skill::Survival => &self.survival,
        }
    }

    fn slot_mut(&mut self, skill: Skill) -> &mut i32 {
        match skill {
            Skill::Acrobatics => &mut self.acrobatics,
            Skill::AnimalHandling => &mut self.animal_handling,
            Skill::Arcana => &mut self.arcana,
            Skill::Athletics => &mut self.athletics,
            Skill::Deception => &mut self.deception,
            Skill::History => &mut self.history,
            Skill::Insight => &mut self.insight,
            Skill::Intimidation => &mut self.intimidation,
            Skill::Investigation => &mut self.investigation,
            Skill::Medicine => &mut self.medicine,
            Skill::Nature => &mut self.nature,
            Skill::Perception => &mut self.perception,
            Skill::Performance => &mut self.performance,
            Skill::Persuasion => &mut self.persuasion,
            Skill::Religion => &mut self.religion,
            Skill::SleightOfHand => &mut self.sleight_of_hand,
            Skill::Stealth => &mut self.stealth,
            Skill::Survival => &mut self.survival,
        }
    }
}

/// Movement speeds in feet. Zero means the creature lacks that mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speeds {
    pub walk: i32,
    pub swim: i32,
    pub fly: i32,
    pub burrow: i32,
    pub climb: i32,
    pub lightwalking: i32,
    /// Only meaningful together with a positive fly speed.
    pub hover: bool,
}

/// Special sense ranges in feet plus passive Perception.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Senses {
    pub blindsight: i32,
    pub darkvision: i32,
    pub tremorsense: i32,
    pub truesight: i32,
    pub passive_perception: i32,
}

/// A named statblock entry: an action, reaction, special ability or
/// legendary action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_bonus: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_dice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_bonus: Option<i32>,
}

impl Feature {
    /// Create a feature with no attack metadata.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bestiary::Feature;
    ///
    /// let bite = Feature::new("Bite", "Melee Weapon Attack: +4 to hit.");
    /// assert_eq!(bite.name, "Bite");
    /// assert!(bite.attack_bonus.is_none());
    /// ```
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }
}

/// Where a creature came from and how an export entry should be tagged.
///
/// Deserializable so the enclosing import configuration can supply it;
/// every field is optional in the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attribution {
    /// Title of the source document, e.g. "Systems Reference Document 5.1".
    pub source_title: String,
    /// License URL or license title.
    #[serde(alias = "license")]
    pub license_url: String,
    /// Leading symbol of an export tag, e.g. `#`.
    pub tag_symbol: String,
    /// Prefix placed between the symbol and the creature name.
    pub tag_value_prefix: String,
    /// Free-form labels for the export entry.
    pub labels: Vec<String>,
}

impl Attribution {
    /// Create an attribution with only a source title.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bestiary::Attribution;
    ///
    /// let attribution = Attribution::new("Tome of Beasts")
    ///     .with_tag("#", "monster/")
    ///     .with_label("kobold-press");
    /// assert_eq!(attribution.source_title, "Tome of Beasts");
    /// assert_eq!(attribution.labels, vec!["kobold-press".to_string()]);
    /// ```
    pub fn new(source_title: impl Into<String>) -> Self {
        Self {
            source_title: source_title.into(),
            ..Self::default()
        }
    }

    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license_url = license.into();
        self
    }

    pub fn with_tag(mut self, symbol: impl Into<String>, value_prefix: impl Into<String>) -> Self {
        self.tag_symbol = symbol.into();
        self.tag_value_prefix = value_prefix.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }
}

/// The canonical, publisher-independent creature statblock.
///
/// Two creatures are equal (and hash alike) when their name, size and type
/// match case-insensitively, whatever their other stats. This is the
/// deduplication key used when several sources publish the same monster.
///
/// # Examples
///
/// ```rust
/// use bestiary::Creature;
///
/// let a = Creature::new("Goblin", "Small", "humanoid");
/// let mut b = Creature::new("GOBLIN", "small", "Humanoid");
/// b.hit_points = 12;
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Creature {
    pub name: String,
    pub size: String,
    #[serde(rename = "type")]
    pub creature_type: String,
    pub subtype: String,
    pub alignment: String,

    pub armor_class: i32,
    pub armor_description: String,
    pub hit_points: i32,
    pub hit_dice: String,
    pub speed: Speeds,

    pub abilities: AbilityScores,
    pub saving_throws: SavingThrows,
    pub skills: SkillBonuses,

    pub damage_vulnerabilities: String,
    pub damage_resistances: String,
    pub damage_immunities: String,
    pub condition_immunities: String,

    pub senses: Senses,
    pub languages: String,
    /// Non-negative; canonical fractions are 0.125, 0.25, 0.33 and 0.5.
    pub challenge_rating: f64,

    pub special_abilities: Vec<Feature>,
    pub actions: Vec<Feature>,
    pub reactions: Vec<Feature>,
    pub legendary_description: String,
    pub legendary_actions: Vec<Feature>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Attribution>,
}

impl Creature {
    /// Create a creature with the identity triple set and everything else
    /// defaulted.
    pub fn new(
        name: impl Into<String>,
        size: impl Into<String>,
        creature_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            size: size.into(),
            creature_type: creature_type.into(),
            ..Self::default()
        }
    }

    /// The raw ability bonus for an ability.
    pub fn ability_bonus(&self, ability: Ability) -> i32 {
        self.abilities.bonus(ability)
    }

    /// True when the save modifier strictly exceeds the raw ability bonus.
    pub fn is_proficient_save(&self, ability: Ability) -> bool {
        self.saving_throws.get(ability) > self.ability_bonus(ability)
    }

    /// True when the skill bonus strictly exceeds the governing ability's
    /// raw bonus.
    pub fn is_proficient_skill(&self, skill: Skill) -> bool {
        self.skills.get(skill) > self.ability_bonus(skill.governing_ability())
    }

    /// Proficiency bonus derived from the challenge rating.
    pub fn proficiency_bonus(&self) -> i32 {
        rules::proficiency_bonus(self.challenge_rating)
    }

    /// Experience awarded for the challenge rating.
    pub fn experience_points(&self) -> i32 {
        rules::experience_points(self.challenge_rating)
    }

    fn identity(&self) -> [String; 3] {
        [
            self.name.to_lowercase(),
            self.size.to_lowercase(),
            self.creature_type.to_lowercase(),
        ]
    }
}

impl PartialEq for Creature {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Creature {}

impl Hash for Creature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}
