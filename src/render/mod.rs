//! Statblock rendering module.
//!
//! One walker visits a [`Creature`] in statblock order and decides which
//! lines appear. A [`StatblockFormat`] only decides how each line looks.
//! Rendering is pure: no I/O and no mutation of the creature.
//!
//! Inclusion rules applied by the walker:
//! - armor and hit point parentheticals only when the text is non-empty
//! - speed and sense clauses only for values above zero
//! - saves and skills only where the value strictly exceeds the raw
//!   ability bonus, and the whole line only if any qualify
//! - damage, condition and language lines only when non-empty
//! - feature sections only when their collection is non-empty
//! - the attribution line only when a source title is known

pub mod campaign;
pub mod plain;

use crate::creature::{Ability, Creature, Feature, Skill};
use crate::rules;
use serde::{Deserialize, Serialize};

pub use campaign::CampaignMarkup;
pub use plain::PlainText;

/// A single-value statblock line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    /// Size, type, subtype and alignment.
    Meta,
    ArmorClass,
    HitPoints,
    Speed,
    Ability(Ability),
    SavingThrows,
    Skills,
    DamageVulnerabilities,
    DamageResistances,
    DamageImmunities,
    ConditionImmunities,
    Senses,
    Languages,
    Challenge,
    ProficiencyBonus,
}

/// A feature collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    SpecialAbilities,
    Actions,
    Reactions,
    LegendaryActions,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::SpecialAbilities => "Special Abilities",
            Section::Actions => "Actions",
            Section::Reactions => "Reactions",
            Section::LegendaryActions => "Legendary Actions",
        }
    }
}

/// How a description line should be laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Text,
    /// Starts with `•`.
    Bullet,
    /// A spell list heading such as `Cantrips (at will): ...` or
    /// `3rd level (2 slots): ...`.
    LevelHeader,
}

/// One trimmed, non-empty line of a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptionLine<'a> {
    pub kind: LineKind,
    pub text: &'a str,
}

/// Per-format line styling used by the shared walker.
pub trait StatblockFormat {
    /// Write anything that precedes the first field.
    fn open(&self, _out: &mut String) {}

    /// Write one single-value line.
    fn field(&self, out: &mut String, field: Field, value: &str);

    /// Write a section heading, with optional introductory text.
    fn section(&self, out: &mut String, section: Section, intro: &[DescriptionLine<'_>]);

    /// Write one named entry and its description.
    fn entry(&self, out: &mut String, name: &str, description: &[DescriptionLine<'_>]);

    /// Write anything that follows the last section.
    fn close(&self, _out: &mut String) {}

    /// Write the trailing attribution line.
    fn attribution(&self, out: &mut String, source_title: &str);
}

/// Something that turns a creature into statblock text.
pub trait Renderer {
    fn render(&self, creature: &Creature) -> String;
}

/// Run the shared statblock walk with the given format.
pub fn render_with<F: StatblockFormat + ?Sized>(format: &F, creature: &Creature) -> String {
    let mut out = String::new();
    format.open(&mut out);

    format.field(&mut out, Field::Name, &creature.name);
    format.field(&mut out, Field::Meta, &meta_line(creature));
    format.field(
        &mut out,
        Field::ArmorClass,
        &with_parenthetical(creature.armor_class, &creature.armor_description),
    );
    format.field(
        &mut out,
        Field::HitPoints,
        &with_parenthetical(creature.hit_points, &creature.hit_dice),
    );
    format.field(&mut out, Field::Speed, &speed_line(creature));

    for ability in Ability::ALL {
        let score = creature.abilities.get(ability);
        let value = format!("{} ({})", score, rules::signed_bonus(rules::ability_bonus(score)));
        format.field(&mut out, Field::Ability(ability), &value);
    }

    if let Some(saves) = saves_line(creature) {
        format.field(&mut out, Field::SavingThrows, &saves);
    }
    if let Some(skills) = skills_line(creature) {
        format.field(&mut out, Field::Skills, &skills);
    }

    let qualifiers = [
        (Field::DamageVulnerabilities, &creature.damage_vulnerabilities),
        (Field::DamageResistances, &creature.damage_resistances),
        (Field::DamageImmunities, &creature.damage_immunities),
        (Field::ConditionImmunities, &creature.condition_immunities),
    ];
    for (field, text) in qualifiers {
        if !text.is_empty() {
            format.field(&mut out, field, text);
        }
    }

    format.field(&mut out, Field::Senses, &senses_line(creature));
    if !creature.languages.is_empty() {
        format.field(&mut out, Field::Languages, &creature.languages);
    }

    let challenge = format!(
        "{} ({} XP)",
        rules::cr_to_display_string(creature.challenge_rating),
        rules::experience_points(creature.challenge_rating)
    );
    format.field(&mut out, Field::Challenge, &challenge);
    format.field(
        &mut out,
        Field::ProficiencyBonus,
        &rules::signed_bonus(rules::proficiency_bonus(creature.challenge_rating)),
    );

    let sections = [
        (Section::SpecialAbilities, &creature.special_abilities, ""),
        (Section::Actions, &creature.actions, ""),
        (Section::Reactions, &creature.reactions, ""),
        (
            Section::LegendaryActions,
            &creature.legendary_actions,
            creature.legendary_description.as_str(),
        ),
    ];
    for (section, features, intro) in sections {
        write_section(format, &mut out, section, features, intro);
    }

    format.close(&mut out);

    if let Some(attribution) = &creature.attribution {
        if !attribution.source_title.is_empty() {
            format.attribution(&mut out, &attribution.source_title);
        }
    }
    out
}

fn write_section<F: StatblockFormat + ?Sized>(
    format: &F,
    out: &mut String,
    section: Section,
    features: &[Feature],
    intro: &str,
) {
    if features.is_empty() {
        return;
    }
    format.section(out, section, &description_lines(intro));
    for feature in features {
        format.entry(out, &feature.name, &description_lines(&feature.description));
    }
}

/// Split a description into trimmed, non-empty, classified lines.
pub fn description_lines(description: &str) -> Vec<DescriptionLine<'_>> {
    description
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|text| DescriptionLine {
            kind: classify(text),
            text,
        })
        .collect()
}

fn classify(line: &str) -> LineKind {
    if line.starts_with('•') {
        LineKind::Bullet
    } else if is_level_header(line) {
        LineKind::LevelHeader
    } else {
        LineKind::Text
    }
}

fn is_level_header(line: &str) -> bool {
    line.starts_with("Cantrips")
        || (1..=12).any(|level| line.starts_with(&format!("{} level", ordinal(level))))
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

fn meta_line(creature: &Creature) -> String {
    let mut meta = [creature.size.as_str(), creature.creature_type.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if !creature.subtype.is_empty() {
        meta.push_str(&format!(" ({})", creature.subtype));
    }
    if !creature.alignment.is_empty() {
        if !meta.is_empty() {
            meta.push_str(", ");
        }
        meta.push_str(&creature.alignment);
    }
    meta
}

fn with_parenthetical(value: i32, note: &str) -> String {
    if note.is_empty() {
        value.to_string()
    } else {
        format!("{} ({})", value, note)
    }
}

fn speed_line(creature: &Creature) -> String {
    let speed = &creature.speed;
    let mut clauses = vec![format!("{} ft.", speed.walk)];
    if speed.swim > 0 {
        clauses.push(format!("swim {} ft.", speed.swim));
    }
    if speed.fly > 0 {
        let hover = if speed.hover { " (hover)" } else { "" };
        clauses.push(format!("fly {} ft.{}", speed.fly, hover));
    }
    if speed.burrow > 0 {
        clauses.push(format!("burrow {} ft.", speed.burrow));
    }
    if speed.climb > 0 {
        clauses.push(format!("climb {} ft.", speed.climb));
    }
    if speed.lightwalking > 0 {
        clauses.push(format!("lightwalking {} ft.", speed.lightwalking));
    }
    clauses.join(", ")
}

fn saves_line(creature: &Creature) -> Option<String> {
    let saves: Vec<String> = Ability::ALL
        .into_iter()
        .filter(|ability| creature.is_proficient_save(*ability))
        .map(|ability| {
            format!(
                "{} {}",
                ability.short_name(),
                rules::signed_bonus(creature.saving_throws.get(ability))
            )
        })
        .collect();
    (!saves.is_empty()).then(|| saves.join(", "))
}

fn skills_line(creature: &Creature) -> Option<String> {
    let skills: Vec<String> = Skill::ALL
        .into_iter()
        .filter(|skill| creature.is_proficient_skill(*skill))
        .map(|skill| {
            format!(
                "{} {}",
                skill.display_name(),
                rules::signed_bonus(creature.skills.get(skill))
            )
        })
        .collect();
    (!skills.is_empty()).then(|| skills.join(", "))
}

fn senses_line(creature: &Creature) -> String {
    let senses = &creature.senses;
    let ranges = [
        ("blindsight", senses.blindsight),
        ("darkvision", senses.darkvision),
        ("tremorsense", senses.tremorsense),
        ("truesight", senses.truesight),
    ];
    let mut clauses: Vec<String> = ranges
        .into_iter()
        .filter(|(_, range)| *range > 0)
        .map(|(sense, range)| format!("{} {} ft.", sense, range))
        .collect();
    clauses.push(format!("Passive Perception {}", senses.passive_perception));
    clauses.join(", ")
}

/// The output formats, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderFormat {
    PlainText,
    CampaignMarkup,
}

impl Renderer for RenderFormat {
    fn render(&self, creature: &Creature) -> String {
        match self {
            RenderFormat::PlainText => PlainText.render(creature),
            RenderFormat::CampaignMarkup => CampaignMarkup.render(creature),
        }
    }
}

/// A rendered creature ready for the compendium writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEntry {
    pub tag_symbol: String,
    pub tag_value_prefix: String,
    pub name: String,
    pub text: String,
}

impl ExportEntry {
    /// The full tag, e.g. `#creature/Goblin`.
    pub fn tag(&self) -> String {
        format!("{}{}{}", self.tag_symbol, self.tag_value_prefix, self.name)
    }
}

/// Render a creature and pair it with its lookup name and tag parts.
///
/// # Examples
///
/// ```rust
/// use bestiary::{Attribution, Creature};
/// use bestiary::render::{export_entry, PlainText};
///
/// let mut goblin = Creature::new("Goblin", "Small", "humanoid");
/// goblin.attribution = Some(Attribution::new("SRD").with_tag("#", "creature/"));
///
/// let entry = export_entry(&goblin, &PlainText);
/// assert_eq!(entry.tag(), "#creature/Goblin");
/// assert!(entry.text.starts_with("Goblin\n"));
/// ```
pub fn export_entry<R: Renderer + ?Sized>(creature: &Creature, renderer: &R) -> ExportEntry {
    let (tag_symbol, tag_value_prefix) = creature
        .attribution
        .as_ref()
        .map(|attribution| {
            (
                attribution.tag_symbol.clone(),
                attribution.tag_value_prefix.clone(),
            )
        })
        .unwrap_or_default();
    ExportEntry {
        tag_symbol,
        tag_value_prefix,
        name: creature.name.clone(),
        text: renderer.render(creature),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::Speeds;

    #[test]
    fn test_ordinals() {
        let rendered: Vec<String> = [1, 2, 3, 4, 11, 12].into_iter().map(ordinal).collect();
        assert_eq!(rendered, ["1st", "2nd", "3rd", "4th", "11th", "12th"]);
    }

    #[test]
    fn test_line_classification() {
        let lines = description_lines(
            "The mage is a 9th-level spellcaster.\n\nCantrips (at will): fire bolt\n1st level (4 slots): shield\n• Hold on\n9th level (1 slot): wish",
        );
        let kinds: Vec<LineKind> = lines.iter().map(|line| line.kind).collect();
        assert_eq!(
            kinds,
            [
                LineKind::Text,
                LineKind::LevelHeader,
                LineKind::LevelHeader,
                LineKind::Bullet,
                LineKind::LevelHeader,
            ]
        );
    }

    #[test]
    fn test_thirteenth_level_is_plain_text() {
        assert_eq!(classify("13th level: nothing"), LineKind::Text);
        assert_eq!(classify("10th level (1 slot): x"), LineKind::LevelHeader);
    }

    #[test]
    fn test_meta_line_variants() {
        let mut creature = Creature::new("Goblin", "Small", "humanoid");
        assert_eq!(meta_line(&creature), "Small humanoid");
        creature.subtype = "goblinoid".into();
        creature.alignment = "neutral evil".into();
        assert_eq!(meta_line(&creature), "Small humanoid (goblinoid), neutral evil");
        assert_eq!(meta_line(&Creature::default()), "");
    }

    #[test]
    fn test_speed_line_clauses() {
        let mut creature = Creature::default();
        creature.speed = Speeds {
            walk: 10,
            swim: 0,
            fly: 60,
            burrow: 5,
            climb: 0,
            lightwalking: 80,
            hover: true,
        };
        assert_eq!(
            speed_line(&creature),
            "10 ft., fly 60 ft. (hover), burrow 5 ft., lightwalking 80 ft."
        );
    }

    #[test]
    fn test_hover_needs_fly_speed() {
        let mut creature = Creature::default();
        creature.speed.walk = 30;
        creature.speed.hover = true;
        assert_eq!(speed_line(&creature), "30 ft.");
    }

    #[test]
    fn test_senses_line_order() {
        let mut creature = Creature::default();
        creature.senses.truesight = 120;
        creature.senses.blindsight = 10;
        creature.senses.passive_perception = 22;
        assert_eq!(
            senses_line(&creature),
            "blindsight 10 ft., truesight 120 ft., Passive Perception 22"
        );
    }
}
