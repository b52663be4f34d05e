//! Statblock example: map one record and render it both ways
//!
//! This example demonstrates:
//! - Mapping a string-typed SRD record to a canonical creature
//! - Rendering the plain-text statblock
//! - Rendering the campaign-markup statblock

use bestiary::render::{CampaignMarkup, PlainText};
use bestiary::*;
use serde_json::json;

fn main() -> Result<(), ImportError> {
    let record = json!({
        "name": "Goblin",
        "size": "Small",
        "type": "humanoid",
        "subtype": "goblinoid",
        "alignment": "neutral evil",
        "armor_class": "15",
        "armor_desc": "leather armor, shield",
        "hit_points": "7",
        "hit_dice": "2d6",
        "speed": "30 ft.",
        "strength": "8",
        "dexterity": "14",
        "constitution": "10",
        "intelligence": "10",
        "wisdom": "8",
        "charisma": "8",
        "stealth": "6",
        "senses": "darkvision 60 ft., passive Perception 9",
        "languages": "Common, Goblin",
        "challenge_rating": "1/4",
        "special_abilities": [
            { "name": "Nimble Escape", "desc": "The goblin can take the Disengage or Hide action as a bonus action on each of its turns." }
        ],
        "actions": [
            { "name": "Scimitar", "desc": "Melee Weapon Attack: +4 to hit, reach 5 ft., one target.\nHit: 5 (1d6 + 2) slashing damage." },
            { "name": "Shortbow", "desc": "Ranged Weapon Attack: +4 to hit, range 80/320 ft., one target.\nHit: 5 (1d6 + 2) piercing damage." }
        ]
    });

    let goblin = Importer::new(SourceFormat::SrdText).map_record(record)?;

    println!("=== Plain Text ===");
    println!("{}", PlainText.render(&goblin));

    println!("=== Campaign Markup ===");
    println!("{}", CampaignMarkup.render(&goblin));

    Ok(())
}
