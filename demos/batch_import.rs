//! Batch import example: one bad record does not sink the page
//!
//! This example demonstrates:
//! - Importing an Open5e results page
//! - Reading the import report
//! - Building export entries for the compendium writer
//!
//! Run with `RUST_LOG=debug` to see adapter fallbacks.

use bestiary::render::PlainText;
use bestiary::*;
use tracing_subscriber::EnvFilter;

const PAGE: &str = r#"{
    "count": 3,
    "results": [
        {
            "name": "Giant Rat", "size": "Small", "type": "beast", "alignment": "unaligned",
            "armor_class": 12, "hit_points": 7, "hit_dice": "2d6",
            "speed": { "walk": 30 },
            "strength": 7, "dexterity": 15, "constitution": 11,
            "intelligence": 2, "wisdom": 10, "charisma": 4,
            "senses": "darkvision 60 ft., passive Perception 10",
            "challenge_rating": "1/8",
            "actions": [{ "name": "Bite", "desc": "Melee Weapon Attack: +4 to hit.", "attack_bonus": 4, "damage_dice": "1d4+2" }],
            "reactions": ""
        },
        42,
        {
            "name": "Mystery Beast", "size": "Large", "type": "beast",
            "strength": "18", "challenge_rating": "?"
        }
    ]
}"#;

fn main() -> Result<(), ImportError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let importer = Importer::new(SourceFormat::Open5e);
    let report = importer.import_str(PAGE)?;

    println!("Imported: {}", report.creatures.len());
    println!("Skipped: {}", report.skipped.len());
    for err in &report.skipped {
        println!("  - {}", err);
    }

    for creature in &report.creatures {
        let entry = export_entry(creature, &PlainText);
        println!("\n=== {} ===", entry.tag());
        println!("{}", entry.text);
    }

    Ok(())
}
