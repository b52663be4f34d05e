//! # bestiary - Creature Normalization and Statblock Rendering
//!
//! Turns creature records from several D&D 5e data publishers into one
//! canonical model and renders deterministic statblocks from it:
//! - **Tolerant** decoding (numbers or numeric strings, missing fields)
//! - **Derived** stats (ability bonus, proficiency bonus, XP by challenge)
//! - **Publisher-independent** [`Creature`] model with a dedup contract
//! - **Two output formats** sharing one inclusion algorithm
//!
//! ## Core Concepts
//!
//! ### Pipeline
//!
//! ```text
//! [raw JSON] → [Source Adapter] → [Creature] → [Renderer] → [statblock text]
//! ```
//!
//! 1. **Adapters** decode one publisher schema and fill gaps from the rules
//! 2. **Creature** holds resolved values: a save or skill the publisher
//!    omitted carries the plain ability bonus
//! 3. **Renderers** show a save or skill only when it beats that bonus
//!
//! ### Failure Policy
//!
//! Bulk data is messy. A record with bad or missing fields still yields a
//! creature with defaulted values; only a record that is not an object at
//! all is skipped, and the rest of the batch carries on.
//!
//! ## Example
//!
//! ```rust
//! use bestiary::*;
//! use bestiary::render::PlainText;
//!
//! let importer = Importer::new(SourceFormat::SrdText);
//! let report = importer
//!     .import_str(r#"[{
//!         "name": "Kobold", "size": "Small", "type": "humanoid",
//!         "dexterity": "15", "challenge_rating": "1/8",
//!         "senses": "darkvision 60 ft., passive Perception 8"
//!     }]"#)
//!     .unwrap();
//!
//! let text = PlainText.render(&report.creatures[0]);
//! assert!(text.contains("Challenge 1/8 (25 XP)\n"));
//! assert!(text.contains("Senses darkvision 60 ft., Passive Perception 8\n"));
//! ```
//!
//! ## Modules
//!
//! - [`rules`] - Derived-stat rules and text helpers
//! - [`creature`] - Canonical creature model
//! - [`source`] - Publisher adapters and batch import
//! - [`render`] - Plain-text and campaign-markup statblocks
//! - [`error`] - Error types

pub mod creature;
pub mod error;
pub mod render;
pub mod rules;
pub mod source;

// Re-export main types for convenience
pub use creature::{
    Ability, AbilityScores, Attribution, Creature, Feature, SavingThrows, Senses, Skill,
    SkillBonuses, Speeds,
};
pub use error::ImportError;
pub use source::{
    ImportConfig, ImportReport, Importer, MapToCanonical, SourceFormat, SourceRecord,
};

// Re-export rendering entry points
pub use render::{export_entry, ExportEntry, RenderFormat, Renderer};
