//! The template catalog: every known faction and warlord with zeroed stats.
//!
//! New decks start as a copy of the catalog, and loaded decks are merged
//! against it so that entries added here show up in old save files.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;

use super::error::{CoreError, CoreErrorCode};
use super::types::{Deck, Faction, Warlord};

pub const NEW_DECK_NAME: &str = "New Deck";

#[rustfmt::skip]
const BUILTIN_FACTIONS: &[(&str, &[&str])] = &[
    ("Ultramarines", &[
        "Marneus Calgar", "Chaplain Letharius", "Lieutenant Titus", "Varro Tigurius", "Uriel Ventris",
    ]),
    ("Orks (Goff Klan)", &[
        "Ghazghkull Thraka", "Warboss Gordrang", "Boss Zaastruk", "Grukk Face-Rippa",
    ]),
    ("Eldar (Saim-Hann)", &[
        "Jain Zar", "Anvirr Keltoc", "Medreyal Ghaeyln", "Eliac Zephyrblade",
    ]),
    ("Necron (Sautekh Dynasty)", &[
        "Imotekh the Stormlord", "Orikan the Diviner", "Nemesor Zahndrekh", "Ramatekh the Cruel",
    ]),
    ("Tyranids (Hive Fleet Leviathan)", &[
        "Swarmlord", "Terror of Vardenhast", "Neurothrope", "Tervigon",
    ]),
    ("Chaos (Black Legion)", &[
        "Abaddon the Despoiler", "Ghallaron", "Svlar Hexscorn", "Haarken Worldclaimer",
    ]),
    ("Tau Empire", &[
        "Commander O' Maiss", "Aun'va", "War Shaper", "Shadowsun",
    ]),
    ("Sisters of Battle (Adepta Sororitas)", &[
        "Morvenn Vahl", "Celestian Sacresant Aveline", "Junith Eruita", "Erika Luminas",
    ]),
    ("Genestealer Cults", &[
        "Primus Saffa Rhiannor", "Magus Uthrel Naas", "Iconward Malak Vorenth", "Lhaska Szenari",
    ]),
    ("Astra Militarum", &[
        "Lord Solar Leontus", "Ursula Creed", "Commissar Denkler",
    ]),
    ("Dark Angels", &[
        "Azrael", "Belial", "Asmodai",
    ]),
];

static BUILTIN: OnceLock<Catalog> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    factions: Vec<Faction>,
}

#[derive(Debug, Deserialize)]
struct CatalogFactionEntry {
    faction_name: String,
    warlords: Vec<String>,
}

impl Catalog {
    /// The built-in catalog shipped with the tracker.
    pub fn builtin() -> &'static Catalog {
        BUILTIN.get_or_init(|| {
            let factions = BUILTIN_FACTIONS
                .iter()
                .map(|(name, warlords)| {
                    Faction::new(*name, warlords.iter().map(|w| Warlord::new(*w)).collect())
                })
                .collect();
            Catalog { factions }
        })
    }

    /// Builds a catalog from arbitrary factions. Counters are reset to zero.
    pub fn new(factions: Vec<Faction>) -> Self {
        let factions = factions
            .into_iter()
            .map(|faction| Faction {
                warlords: faction.warlords.iter().map(Warlord::zeroed).collect(),
                name: faction.name,
            })
            .collect();
        Self { factions }
    }

    /// Parses a catalog override: `[{"faction_name": .., "warlords": [..]}]`.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let entries: Vec<CatalogFactionEntry> = serde_json::from_str(json).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Catalog,
                format!("invalid catalog document: {e}"),
            )
        })?;

        let mut seen_factions = BTreeSet::new();
        let mut factions = Vec::with_capacity(entries.len());
        for entry in entries {
            if !seen_factions.insert(entry.faction_name.clone()) {
                return Err(CoreError::new(
                    CoreErrorCode::Catalog,
                    format!("duplicate faction '{}' in catalog", entry.faction_name),
                ));
            }
            if let Some(warlord) = first_duplicate(&entry.warlords) {
                return Err(CoreError::new(
                    CoreErrorCode::Catalog,
                    format!(
                        "duplicate warlord '{warlord}' in catalog faction '{}'",
                        entry.faction_name
                    ),
                ));
            }
            let warlords = entry.warlords.into_iter().map(Warlord::new).collect();
            factions.push(Faction::new(entry.faction_name, warlords));
        }

        Ok(Self { factions })
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let json = fs::read_to_string(path).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Catalog,
                format!("failed to read catalog {}: {e}", path.display()),
            )
        })?;
        let catalog = Self::from_json_str(&json)?;
        log::info!(
            "loaded catalog {} ({} factions, {} warlords)",
            path.display(),
            catalog.len(),
            catalog.warlord_count()
        );
        Ok(catalog)
    }

    pub fn factions(&self) -> &[Faction] {
        &self.factions
    }

    pub fn faction(&self, name: &str) -> Option<&Faction> {
        self.factions.iter().find(|f| f.name == name)
    }

    /// An independent copy of every faction, all counters zero.
    pub fn fresh_copy(&self) -> Vec<Faction> {
        self.factions.clone()
    }

    pub fn new_deck(&self, name: impl Into<String>) -> Deck {
        Deck::new(name, self.fresh_copy())
    }

    pub fn len(&self) -> usize {
        self.factions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factions.is_empty()
    }

    pub fn warlord_count(&self) -> usize {
        self.factions.iter().map(|f| f.warlords.len()).sum()
    }
}

fn first_duplicate(names: &[String]) -> Option<&str> {
    let mut seen = BTreeSet::new();
    names
        .iter()
        .map(String::as_str)
        .find(|name| !seen.insert(*name))
}
