//! Plain-text statblock format.

use super::{DescriptionLine, Field, Renderer, Section, StatblockFormat};
use crate::creature::Creature;

/// Renders a statblock as plain lines, `Label value`.
///
/// # Examples
///
/// ```rust
/// use bestiary::Creature;
/// use bestiary::render::{PlainText, Renderer};
///
/// let mut wolf = Creature::new("Wolf", "Medium", "beast");
/// wolf.armor_class = 13;
/// wolf.armor_description = "natural armor".into();
///
/// let text = PlainText.render(&wolf);
/// assert!(text.contains("Armor Class 13 (natural armor)\n"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

/// Continuation lines of a description are indented by this much.
const INDENT: &str = "    ";

fn label(field: Field) -> Option<&'static str> {
    match field {
        Field::Name | Field::Meta => None,
        Field::Ability(ability) => Some(ability.abbreviation()),
        Field::ArmorClass => Some("Armor Class"),
        Field::HitPoints => Some("Hit Points"),
        Field::Speed => Some("Speed"),
        Field::SavingThrows => Some("Saving Throws"),
        Field::Skills => Some("Skills"),
        Field::DamageVulnerabilities => Some("Damage Vulnerabilities"),
        Field::DamageResistances => Some("Damage Resistances"),
        Field::DamageImmunities => Some("Damage Immunities"),
        Field::ConditionImmunities => Some("Condition Immunities"),
        Field::Senses => Some("Senses"),
        Field::Languages => Some("Languages"),
        Field::Challenge => Some("Challenge"),
        Field::ProficiencyBonus => Some("Proficiency Bonus"),
    }
}

impl StatblockFormat for PlainText {
    fn field(&self, out: &mut String, field: Field, value: &str) {
        if let Some(label) = label(field) {
            out.push_str(label);
            out.push(' ');
        }
        out.push_str(value);
        out.push('\n');
    }

    fn section(&self, out: &mut String, section: Section, intro: &[DescriptionLine<'_>]) {
        out.push('\n');
        out.push_str(section.title());
        out.push('\n');
        for line in intro {
            out.push_str(line.text);
            out.push('\n');
        }
    }

    fn entry(&self, out: &mut String, name: &str, description: &[DescriptionLine<'_>]) {
        out.push_str(name);
        out.push('.');
        let mut lines = description.iter();
        if let Some(first) = lines.next() {
            out.push(' ');
            out.push_str(first.text);
        }
        out.push('\n');
        for line in lines {
            out.push_str(INDENT);
            out.push_str(line.text);
            out.push('\n');
        }
    }

    fn attribution(&self, out: &mut String, source_title: &str) {
        out.push_str(&format!("Source: ~\"{}\"\n", source_title));
    }
}

impl Renderer for PlainText {
    fn render(&self, creature: &Creature) -> String {
        super::render_with(self, creature)
    }
}
