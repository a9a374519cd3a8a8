use std::path::{Path, PathBuf};

use super::catalog::{Catalog, NEW_DECK_NAME};
use super::error::{CoreError, CoreErrorCode};
use super::merge::merge_decks;
use super::persist;
use super::stats::{
    self, DeckSummary, SummaryRow, WarlordTotals, deck_summary, faction_summary, global_summary,
};
use super::types::{Counter, Deck, Faction, Warlord};

#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Catalog,
}

/// The working set of decks for one run, plus the file it came from.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    decks: Vec<Deck>,
    current_file: Option<PathBuf>,
    dirty: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::with_catalog(Catalog::builtin().clone())
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn new_session(&self) -> Session {
        Session {
            catalog: self.catalog.clone(),
            decks: Vec::new(),
            current_file: None,
            dirty: false,
        }
    }

    pub fn open_path(&self, path: &Path) -> Result<Session, CoreError> {
        let mut session = self.new_session();
        session.load(path)?;
        Ok(session)
    }

    pub fn open_str(&self, json: &str) -> Result<Session, CoreError> {
        let documents = persist::parse_documents(json)?;
        let mut session = self.new_session();
        session.decks = merge_decks(&documents, &self.catalog);
        Ok(session)
    }
}

impl Session {
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn deck(&self, index: usize) -> Option<&Deck> {
        self.decks.get(index)
    }

    pub fn len(&self) -> usize {
        self.decks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Appends a fresh catalog copy and returns its index.
    pub fn add_deck(&mut self) -> usize {
        self.decks.push(self.catalog.new_deck(NEW_DECK_NAME));
        self.dirty = true;
        log::debug!("added deck #{}", self.decks.len());
        self.decks.len() - 1
    }

    pub fn rename_deck(&mut self, index: usize, name: impl Into<String>) -> Result<(), CoreError> {
        let deck = self.deck_mut(index)?;
        deck.name = name.into();
        self.dirty = true;
        Ok(())
    }

    pub fn increment(
        &mut self,
        index: usize,
        faction: &str,
        warlord: &str,
        counter: Counter,
    ) -> Result<u32, CoreError> {
        self.adjust(index, faction, warlord, counter, u32::checked_add)
    }

    pub fn decrement(
        &mut self,
        index: usize,
        faction: &str,
        warlord: &str,
        counter: Counter,
    ) -> Result<u32, CoreError> {
        self.adjust(index, faction, warlord, counter, u32::checked_sub)
    }

    pub fn warlord(&self, index: usize, faction: &str, warlord: &str) -> Result<&Warlord, CoreError> {
        let faction = self.faction(index, faction)?;
        faction.warlord(warlord).ok_or_else(|| {
            CoreError::new(
                CoreErrorCode::NotFound,
                format!("no warlord '{warlord}' in faction '{}'", faction.name),
            )
        })
    }

    pub fn warlord_totals(
        &self,
        index: usize,
        faction: &str,
        warlord: &str,
    ) -> Result<WarlordTotals, CoreError> {
        self.warlord(index, faction, warlord).map(stats::warlord_totals)
    }

    pub fn faction_summary(&self, index: usize, faction: &str) -> Result<SummaryRow, CoreError> {
        self.faction(index, faction).map(faction_summary)
    }

    pub fn deck_summary(&self, index: usize) -> Result<DeckSummary, CoreError> {
        self.deck_ref(index).map(deck_summary)
    }

    pub fn global_summary(&self) -> SummaryRow {
        global_summary(&self.decks)
    }

    /// Replaces the working set with the merged contents of `path`. Nothing
    /// changes if the file cannot be read or parsed.
    pub fn load(&mut self, path: &Path) -> Result<(), CoreError> {
        let documents = persist::load(path)?;
        self.decks = merge_decks(&documents, &self.catalog);
        self.current_file = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    pub fn save_as(&mut self, path: &Path) -> Result<(), CoreError> {
        persist::save(path, &self.decks)?;
        self.current_file = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    pub fn save(&mut self) -> Result<(), CoreError> {
        let path = self.current_file.clone().ok_or_else(|| {
            CoreError::new(
                CoreErrorCode::NoCurrentFile,
                "session has no file yet; use save_as",
            )
        })?;
        self.save_as(&path)
    }

    fn adjust(
        &mut self,
        index: usize,
        faction: &str,
        warlord: &str,
        counter: Counter,
        op: fn(u32, u32) -> Option<u32>,
    ) -> Result<u32, CoreError> {
        let deck = self.deck_mut(index)?;
        let deck_name = deck.name.clone();
        let faction_entry = deck.faction_mut(faction).ok_or_else(|| {
            CoreError::new(
                CoreErrorCode::NotFound,
                format!("no faction '{faction}' in deck '{deck_name}'"),
            )
        })?;
        let warlord_entry = faction_entry.warlord_mut(warlord).ok_or_else(|| {
            CoreError::new(
                CoreErrorCode::NotFound,
                format!("no warlord '{warlord}' in faction '{faction}'"),
            )
        })?;

        let slot = warlord_entry.counter_mut(counter);
        let Some(value) = op(*slot, 1) else {
            return Err(CoreError::new(
                CoreErrorCode::CounterRange,
                format!("{counter} for '{warlord}' cannot move past {}", *slot),
            ));
        };
        *slot = value;
        self.dirty = true;
        log::debug!("deck '{deck_name}': {faction}/{warlord} {counter} = {value}");
        Ok(value)
    }

    fn deck_ref(&self, index: usize) -> Result<&Deck, CoreError> {
        self.decks.get(index).ok_or_else(|| not_found_deck(index, self.decks.len()))
    }

    fn deck_mut(&mut self, index: usize) -> Result<&mut Deck, CoreError> {
        let len = self.decks.len();
        self.decks.get_mut(index).ok_or_else(|| not_found_deck(index, len))
    }

    fn faction(&self, index: usize, faction: &str) -> Result<&Faction, CoreError> {
        let deck = self.deck_ref(index)?;
        deck.faction(faction).ok_or_else(|| {
            CoreError::new(
                CoreErrorCode::NotFound,
                format!("no faction '{faction}' in deck '{}'", deck.name),
            )
        })
    }
}

fn not_found_deck(index: usize, len: usize) -> CoreError {
    CoreError::new(
        CoreErrorCode::NotFound,
        format!("no deck at index {index} (session has {len})"),
    )
}
