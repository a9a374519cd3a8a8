mod catalog;
mod engine;
mod error;
mod merge;
mod persist;
mod stats;
mod types;

pub use catalog::{Catalog, NEW_DECK_NAME};
pub use engine::{Engine, Session};
pub use error::{CoreError, CoreErrorCode};
pub use merge::{MergeReport, UNNAMED_DECK, merge_deck, merge_deck_with_report, merge_decks};
pub use persist::{load, parse_documents, save, to_json_string};
pub use stats::{
    DeckSummary, SummaryRow, WarlordTotals, deck_summary, faction_summary, format_win_rate,
    global_summary, warlord_totals, win_rate,
};
pub use types::{Counter, Deck, DeckDocument, Faction, Warlord};
