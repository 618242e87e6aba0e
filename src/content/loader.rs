//! Content loader for the RON tuning file.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::{GameTuning, SCHEMA_VERSION};

/// Tuning file, relative to the working directory.
pub const TUNING_PATH: &str = "assets/data/tuning.ron";

/// Error type for content loading failures
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse RON `source` that was read from `file`.
pub fn parse_single<T>(file: &str, source: &str) -> Result<T, ContentLoadError>
where
    T: serde::de::DeserializeOwned,
{
    ron_options()
        .from_str(source)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Load a single struct from a RON file
fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: serde::de::DeserializeOwned,
{
    let file = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_single(&file, &contents)
}

/// Load and version-check the tuning file at `path`.
pub fn load_tuning(path: &Path) -> Result<GameTuning, ContentLoadError> {
    let tuning: GameTuning = load_single_file(path)?;
    check_schema(&path.display().to_string(), tuning)
}

/// Parse tuning from an in-memory RON string.
pub fn parse_tuning(file: &str, source: &str) -> Result<GameTuning, ContentLoadError> {
    let tuning: GameTuning = parse_single(file, source)?;
    check_schema(file, tuning)
}

fn check_schema(file: &str, tuning: GameTuning) -> Result<GameTuning, ContentLoadError> {
    if tuning.schema_version != SCHEMA_VERSION {
        return Err(ContentLoadError {
            file: file.to_string(),
            message: format!(
                "Unsupported schema_version {} (expected {})",
                tuning.schema_version, SCHEMA_VERSION
            ),
        });
    }
    Ok(tuning)
}
