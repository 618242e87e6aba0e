//! Content domain: RON tuning file loading and validation.
//!
//! Runs once in `PreStartup`. Each domain plugin registers its own default
//! tuning; this plugin replaces them with the file's values when the file
//! exists, parses and validates. Any failure keeps the defaults.

mod data;
mod loader;
mod validation;

pub use data::{GameTuning, SCHEMA_VERSION};
pub use loader::{ContentLoadError, TUNING_PATH, load_tuning, parse_tuning};
pub use validation::{ValidationError, validate_tuning};

use bevy::prelude::*;
use std::path::Path;

use crate::combat::AiRng;

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_content);
    }
}

/// Loads and validates `path`, falling back to defaults on any error.
pub fn load_or_default(path: &Path) -> GameTuning {
    if !path.exists() {
        info!("No tuning file at {}, using defaults", path.display());
        return GameTuning::default();
    }

    let tuning = match load_tuning(path) {
        Ok(tuning) => tuning,
        Err(e) => {
            warn!("{}", e);
            return GameTuning::default();
        }
    };

    let errors = validate_tuning(&tuning);
    if !errors.is_empty() {
        for error in &errors {
            warn!("Tuning validation: {}", error);
        }
        warn!(
            "{} validation error(s) in {}, using defaults",
            errors.len(),
            path.display()
        );
        return GameTuning::default();
    }

    tuning
}

fn load_content(mut commands: Commands) {
    let tuning = load_or_default(Path::new(TUNING_PATH));
    info!("Tuning loaded: {}", tuning.summary());

    commands.insert_resource(tuning.library());
    commands.insert_resource(AiRng::seeded(tuning.boss.seed));
    commands.insert_resource(tuning.movement);
    commands.insert_resource(tuning.attacks);
    commands.insert_resource(tuning.stats);
    commands.insert_resource(tuning.combat);
    commands.insert_resource(tuning.enemy);
    commands.insert_resource(tuning.boss);
}
