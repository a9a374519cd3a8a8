use std::fs;
use std::path::Path;

use super::error::{CoreError, CoreErrorCode};
use super::types::{Deck, DeckDocument};

/// Reads the raw deck documents in `path`. The result still has to go
/// through a merge before use.
pub fn load(path: &Path) -> Result<Vec<DeckDocument>, CoreError> {
    let json = fs::read_to_string(path).map_err(|e| {
        CoreError::new(
            CoreErrorCode::Load,
            format!("failed to read {}: {e}", path.display()),
        )
    })?;
    let documents = parse_documents(&json).map_err(|e| {
        CoreError::new(e.code, format!("{}: {}", path.display(), e.message))
    })?;
    log::info!("loaded {} decks from {}", documents.len(), path.display());
    Ok(documents)
}

pub fn parse_documents(json: &str) -> Result<Vec<DeckDocument>, CoreError> {
    serde_json::from_str(json).map_err(|e| {
        CoreError::new(
            CoreErrorCode::Load,
            format!("invalid deck document: {e}"),
        )
    })
}

/// Serializes `decks` exactly as they are, indented by two spaces.
pub fn to_json_string(decks: &[Deck]) -> Result<String, CoreError> {
    serde_json::to_string_pretty(decks).map_err(|e| {
        CoreError::new(
            CoreErrorCode::Save,
            format!("failed to serialize decks: {e}"),
        )
    })
}

pub fn save(path: &Path, decks: &[Deck]) -> Result<(), CoreError> {
    let json = to_json_string(decks)?;
    fs::write(path, json).map_err(|e| {
        CoreError::new(
            CoreErrorCode::Save,
            format!("failed to write {}: {e}", path.display()),
        )
    })?;
    log::info!("saved {} decks to {}", decks.len(), path.display());
    Ok(())
}
