use super::catalog::Catalog;
use super::types::{Deck, DeckDocument, Faction};

pub const UNNAMED_DECK: &str = "Unnamed Deck";

/// Counts of what a merge kept, filled in from the catalog, and threw away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeReport {
    pub kept_warlords: usize,
    pub synthesized_warlords: usize,
    pub synthesized_factions: usize,
    pub dropped_warlords: usize,
    pub dropped_factions: usize,
}

impl MergeReport {
    pub fn is_lossless(&self) -> bool {
        self.dropped_warlords == 0 && self.dropped_factions == 0
    }

    fn absorb(&mut self, other: MergeReport) {
        self.kept_warlords += other.kept_warlords;
        self.synthesized_warlords += other.synthesized_warlords;
        self.synthesized_factions += other.synthesized_factions;
        self.dropped_warlords += other.dropped_warlords;
        self.dropped_factions += other.dropped_factions;
    }
}

pub fn merge_deck(document: &DeckDocument, catalog: &Catalog) -> Deck {
    merge_deck_with_report(document, catalog).0
}

pub fn merge_decks(documents: &[DeckDocument], catalog: &Catalog) -> Vec<Deck> {
    let mut total = MergeReport::default();
    let decks = documents
        .iter()
        .map(|document| {
            let (deck, report) = merge_deck_with_report(document, catalog);
            total.absorb(report);
            deck
        })
        .collect();
    log::debug!("merged {} decks: {total:?}", documents.len());
    decks
}

/// Rebuilds `document` in the shape of `catalog`: catalog order, catalog
/// names, and the persisted counters wherever faction and warlord names both
/// match exactly. Only the first record with a given name is used; later
/// duplicates and entries the catalog does not know about are dropped.
pub fn merge_deck_with_report(document: &DeckDocument, catalog: &Catalog) -> (Deck, MergeReport) {
    let name = document
        .name
        .clone()
        .unwrap_or_else(|| UNNAMED_DECK.to_string());
    let mut report = MergeReport::default();
    let mut used = vec![false; document.factions.len()];

    let factions = catalog
        .factions()
        .iter()
        .map(|catalog_faction| {
            match document
                .factions
                .iter()
                .position(|f| f.name == catalog_faction.name)
            {
                Some(index) => {
                    used[index] = true;
                    merge_faction(&document.factions[index], catalog_faction, &mut report)
                }
                None => {
                    report.synthesized_factions += 1;
                    report.synthesized_warlords += catalog_faction.warlords.len();
                    catalog_faction.clone()
                }
            }
        })
        .collect();

    for (stored, _) in document.factions.iter().zip(&used).filter(|(_, used)| !**used) {
        let reason = if catalog.faction(&stored.name).is_some() {
            "duplicate entry"
        } else {
            "not in catalog"
        };
        log::warn!(
            "deck '{name}': dropping faction '{}' ({} warlords), {reason}",
            stored.name,
            stored.warlords.len()
        );
        report.dropped_factions += 1;
    }

    (Deck::new(name, factions), report)
}

fn merge_faction(stored: &Faction, catalog_faction: &Faction, report: &mut MergeReport) -> Faction {
    let mut used = vec![false; stored.warlords.len()];
    let warlords = catalog_faction
        .warlords
        .iter()
        .map(|catalog_warlord| {
            match stored
                .warlords
                .iter()
                .position(|w| w.name == catalog_warlord.name)
            {
                Some(index) => {
                    used[index] = true;
                    report.kept_warlords += 1;
                    stored.warlords[index].clone()
                }
                None => {
                    report.synthesized_warlords += 1;
                    catalog_warlord.clone()
                }
            }
        })
        .collect();

    for (warlord, _) in stored.warlords.iter().zip(&used).filter(|(_, used)| !**used) {
        let reason = if catalog_faction.warlord(&warlord.name).is_some() {
            "duplicate entry"
        } else {
            "not in catalog"
        };
        log::warn!(
            "faction '{}': dropping warlord '{}', {reason}",
            stored.name,
            warlord.name
        );
        report.dropped_warlords += 1;
    }

    Faction::new(catalog_faction.name.clone(), warlords)
}
