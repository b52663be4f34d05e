//! Campaign-markup statblock format.
//!
//! The statblock is a fenced `statblock` code block of `key: value` lines
//! that the campaign log tool reads back. Feature descriptions become
//! indented literal blocks in which bullet lines turn into `- ` list items
//! and spell level headings into `## ` headings, so nested spell lists
//! survive the round trip. Scalars that would read back as YAML syntax
//! are double-quoted.

use super::{DescriptionLine, Field, LineKind, Renderer, Section, StatblockFormat};
use crate::creature::{Ability, Creature};
use std::borrow::Cow;

/// Renders a statblock for the campaign log tool.
///
/// # Examples
///
/// ```rust
/// use bestiary::Creature;
/// use bestiary::render::{CampaignMarkup, Renderer};
///
/// let text = CampaignMarkup.render(&Creature::new("Wolf", "Medium", "beast"));
/// assert!(text.starts_with("```statblock\nname: Wolf\n"));
/// assert!(text.ends_with("```\n"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CampaignMarkup;

const FENCE: &str = "```";
const DESCRIPTION_INDENT: &str = "      ";

fn key(field: Field) -> &'static str {
    match field {
        Field::Name => "name",
        Field::Meta => "meta",
        Field::ArmorClass => "armor_class",
        Field::HitPoints => "hit_points",
        Field::Speed => "speed",
        Field::Ability(ability) => match ability {
            Ability::Strength => "str",
            Ability::Dexterity => "dex",
            Ability::Constitution => "con",
            Ability::Intelligence => "int",
            Ability::Wisdom => "wis",
            Ability::Charisma => "cha",
        },
        Field::SavingThrows => "saving_throws",
        Field::Skills => "skills",
        Field::DamageVulnerabilities => "damage_vulnerabilities",
        Field::DamageResistances => "damage_resistances",
        Field::DamageImmunities => "damage_immunities",
        Field::ConditionImmunities => "condition_immunities",
        Field::Senses => "senses",
        Field::Languages => "languages",
        Field::Challenge => "challenge",
        Field::ProficiencyBonus => "proficiency_bonus",
    }
}

/// List key and, where the section carries intro text, its key.
fn section_keys(section: Section) -> (&'static str, Option<&'static str>) {
    match section {
        Section::SpecialAbilities => ("special_abilities", None),
        Section::Actions => ("actions", None),
        Section::Reactions => ("reactions", None),
        Section::LegendaryActions => ("legendary_actions", Some("legendary_description")),
    }
}

/// Double-quote a scalar the campaign tool would otherwise misread.
fn scalar(value: &str) -> Cow<'_, str> {
    if needs_quotes(value) {
        Cow::Owned(format!(
            "\"{}\"",
            value.replace('\\', "\\\\").replace('"', "\\\"")
        ))
    } else {
        Cow::Borrowed(value)
    }
}

fn needs_quotes(value: &str) -> bool {
    let Some(first) = value.chars().next() else {
        return false;
    };
    value.trim() != value
        || ",[]{}#&*!|>'\"%@`".contains(first)
        || ["-", "?", ":"]
            .iter()
            .any(|indicator| value == *indicator || value.starts_with(&format!("{} ", indicator)))
        || value.contains(": ")
        || value.contains(" #")
        || value.ends_with(':')
}

fn push_block(out: &mut String, lines: &[DescriptionLine<'_>]) {
    for line in lines {
        out.push_str(DESCRIPTION_INDENT);
        match line.kind {
            LineKind::Text => out.push_str(line.text),
            LineKind::Bullet => {
                out.push_str("- ");
                out.push_str(line.text.trim_start_matches('•').trim_start());
            }
            LineKind::LevelHeader => {
                out.push_str("## ");
                out.push_str(line.text);
            }
        }
        out.push('\n');
    }
}

impl StatblockFormat for CampaignMarkup {
    fn open(&self, out: &mut String) {
        out.push_str(FENCE);
        out.push_str("statblock\n");
    }

    fn field(&self, out: &mut String, field: Field, value: &str) {
        out.push_str(&format!("{}: {}\n", key(field), scalar(value)));
    }

    fn section(&self, out: &mut String, section: Section, intro: &[DescriptionLine<'_>]) {
        let (list_key, intro_key) = section_keys(section);
        if let Some(intro_key) = intro_key.filter(|_| !intro.is_empty()) {
            out.push_str(&format!("{}: |\n", intro_key));
            push_block(out, intro);
        }
        out.push_str(&format!("{}:\n", list_key));
    }

    fn entry(&self, out: &mut String, name: &str, description: &[DescriptionLine<'_>]) {
        out.push_str(&format!("  - name: {}\n", scalar(name)));
        if !description.is_empty() {
            out.push_str("    desc: |\n");
            push_block(out, description);
        }
    }

    fn close(&self, out: &mut String) {
        out.push_str(FENCE);
        out.push('\n');
    }

    fn attribution(&self, out: &mut String, source_title: &str) {
        out.push_str(&format!("Source: ~\"{}\"\n", source_title));
    }
}

impl Renderer for CampaignMarkup {
    fn render(&self, creature: &Creature) -> String {
        super::render_with(self, creature)
    }
}
