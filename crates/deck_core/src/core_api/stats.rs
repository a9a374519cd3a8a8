use serde::{Deserialize, Serialize};

use super::types::{Deck, Faction, Warlord};

/// Everything a single warlord row shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WarlordTotals {
    pub matches: u64,
    pub off_wins: u32,
    pub off_losses: u32,
    pub def_wins: u32,
    pub def_losses: u32,
    pub total_wins: u64,
    pub total_losses: u64,
    pub win_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryRow {
    pub matches: u64,
    pub wins: u64,
    pub losses: u64,
    pub win_rate: f64,
}

impl SummaryRow {
    pub fn from_counts(wins: u64, losses: u64) -> Self {
        let matches = wins + losses;
        Self {
            matches,
            wins,
            losses,
            win_rate: win_rate(wins, matches),
        }
    }

    fn combine(&self, other: &SummaryRow) -> Self {
        Self::from_counts(self.wins + other.wins, self.losses + other.losses)
    }
}

/// Going first, going second, and both together.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DeckSummary {
    pub offense: SummaryRow,
    pub defense: SummaryRow,
    pub total: SummaryRow,
}

/// Percentage of `matches` won; 0.0 when nothing has been played.
pub fn win_rate(wins: u64, matches: u64) -> f64 {
    if matches > 0 {
        100.0 * wins as f64 / matches as f64
    } else {
        0.0
    }
}

pub fn format_win_rate(rate: f64) -> String {
    format!("{rate:.1}%")
}

pub fn warlord_totals(warlord: &Warlord) -> WarlordTotals {
    let ow = u64::from(warlord.off_wins);
    let ol = u64::from(warlord.off_losses);
    let dw = u64::from(warlord.def_wins);
    let dl = u64::from(warlord.def_losses);

    let matches = ow + ol + dw + dl;
    let total_wins = ow + dw;

    WarlordTotals {
        matches,
        off_wins: warlord.off_wins,
        off_losses: warlord.off_losses,
        def_wins: warlord.def_wins,
        def_losses: warlord.def_losses,
        total_wins,
        total_losses: ol + dl,
        win_rate: win_rate(total_wins, matches),
    }
}

/// How the deck has done against one faction's warlords.
pub fn faction_summary(faction: &Faction) -> SummaryRow {
    let (wins, losses) = faction
        .warlords
        .iter()
        .map(warlord_totals)
        .fold((0, 0), |(wins, losses), t| {
            (wins + t.total_wins, losses + t.total_losses)
        });
    SummaryRow::from_counts(wins, losses)
}

pub fn deck_summary(deck: &Deck) -> DeckSummary {
    let mut off = (0u64, 0u64);
    let mut def = (0u64, 0u64);
    for w in deck.warlords() {
        off.0 += u64::from(w.off_wins);
        off.1 += u64::from(w.off_losses);
        def.0 += u64::from(w.def_wins);
        def.1 += u64::from(w.def_losses);
    }

    let offense = SummaryRow::from_counts(off.0, off.1);
    let defense = SummaryRow::from_counts(def.0, def.1);
    DeckSummary {
        offense,
        defense,
        total: offense.combine(&defense),
    }
}

pub fn global_summary(decks: &[Deck]) -> SummaryRow {
    let (wins, losses) = decks
        .iter()
        .flat_map(Deck::warlords)
        .map(warlord_totals)
        .fold((0, 0), |(wins, losses), t| {
            (wins + t.total_wins, losses + t.total_losses)
        });
    log::debug!(
        "global summary over {} decks: {wins} wins, {losses} losses",
        decks.len()
    );
    SummaryRow::from_counts(wins, losses)
}
