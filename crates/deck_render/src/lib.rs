use std::fmt::Write as _;

use deck_core::core_api::{
    Catalog, Deck, DeckSummary, Faction, SummaryRow, WarlordTotals, deck_summary,
    faction_summary, format_win_rate, global_summary, warlord_totals,
};
use serde_json::{Map as JsonMap, Value as JsonValue};

const FACTION_COL_WIDTH: usize = 28;
const WARLORD_COL_WIDTH: usize = 28;
const NUMBER_COL_WIDTH: usize = 13;

const TABLE_HEADERS: [&str; 10] = [
    "Faction",
    "Warlord",
    "Matches",
    "Off. Wins",
    "Off. Losses",
    "Def. Wins",
    "Def. Losses",
    "Total Wins",
    "Total Losses",
    "Win Rate",
];

pub const OFFENSE_LABEL: &str = "Going First";
pub const DEFENSE_LABEL: &str = "Going Second";
pub const TOTAL_LABEL: &str = "TOTAL";

/// One deck as a table: a row per warlord, a `vs` line per faction, and the
/// going first / going second / total rows at the bottom.
pub fn render_deck_table(deck: &Deck) -> String {
    let mut out = String::new();
    writeln!(&mut out, "{}", deck.name).expect("writing to String cannot fail");
    writeln!(&mut out, "{}", "=".repeat(deck.name.chars().count()))
        .expect("writing to String cannot fail");
    writeln!(&mut out, "{}", header_line()).expect("writing to String cannot fail");

    for faction in &deck.factions {
        write_faction_rows(&mut out, faction);
    }

    writeln!(&mut out).expect("writing to String cannot fail");
    let summary = deck_summary(deck);
    for (label, row) in summary_rows(&summary) {
        writeln!(&mut out, "{}", summary_line(label, &row)).expect("writing to String cannot fail");
    }
    out
}

pub fn render_decks_table(decks: &[Deck]) -> String {
    if decks.is_empty() {
        return "No decks.\n".to_string();
    }
    decks
        .iter()
        .map(render_deck_table)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_warlord_row(faction: &str, name: &str, totals: &WarlordTotals) -> String {
    let cells = [
        totals.matches.to_string(),
        totals.off_wins.to_string(),
        totals.off_losses.to_string(),
        totals.def_wins.to_string(),
        totals.def_losses.to_string(),
        totals.total_wins.to_string(),
        totals.total_losses.to_string(),
        format_win_rate(totals.win_rate),
    ];
    let mut line = format!(
        "{:<a$}{:<b$}",
        fit_column(faction, FACTION_COL_WIDTH - 1),
        fit_column(name, WARLORD_COL_WIDTH - 1),
        a = FACTION_COL_WIDTH,
        b = WARLORD_COL_WIDTH
    );
    for cell in cells {
        write!(&mut line, "{:>w$}", cell, w = NUMBER_COL_WIDTH)
            .expect("writing to String cannot fail");
    }
    line
}

pub fn render_global_summary(summary: &SummaryRow) -> String {
    format!(
        "Overall Matches: {}\nOverall Wins: {}\nOverall Losses: {}\nOverall Win Rate: {}\n",
        summary.matches,
        summary.wins,
        summary.losses,
        format_win_rate(summary.win_rate)
    )
}

pub fn render_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    for faction in catalog.factions() {
        writeln!(&mut out, "{}", faction.name).expect("writing to String cannot fail");
        for warlord in &faction.warlords {
            writeln!(&mut out, "  {}", warlord.name).expect("writing to String cannot fail");
        }
    }
    out
}

pub fn render_json_deck(deck: &Deck) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert("deck_name".to_string(), JsonValue::String(deck.name.clone()));
    out.insert(
        "factions".to_string(),
        JsonValue::Array(deck.factions.iter().map(faction_to_json).collect()),
    );
    let summary = deck_summary(deck);
    out.insert("going_first".to_string(), summary_to_json(&summary.offense));
    out.insert("going_second".to_string(), summary_to_json(&summary.defense));
    out.insert("total".to_string(), summary_to_json(&summary.total));
    JsonValue::Object(out)
}

pub fn render_json_decks(decks: &[Deck]) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert(
        "decks".to_string(),
        JsonValue::Array(decks.iter().map(render_json_deck).collect()),
    );
    out.insert(
        "overall".to_string(),
        summary_to_json(&global_summary(decks)),
    );
    JsonValue::Object(out)
}

pub fn render_json_global(summary: &SummaryRow) -> JsonValue {
    summary_to_json(summary)
}

fn write_faction_rows(out: &mut String, faction: &Faction) {
    for (i, warlord) in faction.warlords.iter().enumerate() {
        let faction_cell = if i == 0 { faction.name.as_str() } else { "" };
        let line = render_warlord_row(faction_cell, &warlord.name, &warlord_totals(warlord));
        writeln!(out, "{}", line.trim_end()).expect("writing to String cannot fail");
    }

    let vs = faction_summary(faction);
    writeln!(
        out,
        "  (vs {}) Matches: {}  Wins: {}  Losses: {}  WR: {}",
        faction.name,
        vs.matches,
        vs.wins,
        vs.losses,
        format_win_rate(vs.win_rate)
    )
    .expect("writing to String cannot fail");
}

fn header_line() -> String {
    let mut line = format!(
        "{:<a$}{:<b$}",
        TABLE_HEADERS[0],
        TABLE_HEADERS[1],
        a = FACTION_COL_WIDTH,
        b = WARLORD_COL_WIDTH
    );
    for header in &TABLE_HEADERS[2..] {
        write!(&mut line, "{:>w$}", header, w = NUMBER_COL_WIDTH)
            .expect("writing to String cannot fail");
    }
    line
}

fn summary_rows(summary: &DeckSummary) -> [(&'static str, SummaryRow); 3] {
    [
        (OFFENSE_LABEL, summary.offense),
        (DEFENSE_LABEL, summary.defense),
        (TOTAL_LABEL, summary.total),
    ]
}

fn summary_line(label: &str, row: &SummaryRow) -> String {
    format!(
        "{:<a$}{:>w$}{:>w$}{:>w$}{:>w$}",
        label,
        row.matches,
        row.wins,
        row.losses,
        format_win_rate(row.win_rate),
        a = FACTION_COL_WIDTH + WARLORD_COL_WIDTH,
        w = NUMBER_COL_WIDTH
    )
}

fn faction_to_json(faction: &Faction) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert(
        "faction_name".to_string(),
        JsonValue::String(faction.name.clone()),
    );
    out.insert(
        "warlords".to_string(),
        JsonValue::Array(
            faction
                .warlords
                .iter()
                .map(|w| warlord_to_json(&w.name, &warlord_totals(w)))
                .collect(),
        ),
    );
    out.insert(
        "vs_faction".to_string(),
        summary_to_json(&faction_summary(faction)),
    );
    JsonValue::Object(out)
}

fn warlord_to_json(name: &str, totals: &WarlordTotals) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("warlord_name".to_string(), JsonValue::String(name.to_string()));
    m.insert("matches".to_string(), JsonValue::from(totals.matches));
    m.insert("off_wins".to_string(), JsonValue::from(totals.off_wins));
    m.insert("off_losses".to_string(), JsonValue::from(totals.off_losses));
    m.insert("def_wins".to_string(), JsonValue::from(totals.def_wins));
    m.insert("def_losses".to_string(), JsonValue::from(totals.def_losses));
    m.insert("total_wins".to_string(), JsonValue::from(totals.total_wins));
    m.insert("total_losses".to_string(), JsonValue::from(totals.total_losses));
    m.insert("win_rate".to_string(), JsonValue::from(totals.win_rate));
    JsonValue::Object(m)
}

fn summary_to_json(row: &SummaryRow) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("matches".to_string(), JsonValue::from(row.matches));
    m.insert("wins".to_string(), JsonValue::from(row.wins));
    m.insert("losses".to_string(), JsonValue::from(row.losses));
    m.insert("win_rate".to_string(), JsonValue::from(row.win_rate));
    JsonValue::Object(m)
}

fn fit_column(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 3 {
        return value.chars().take(width).collect();
    }

    let mut out = String::with_capacity(width);
    for ch in value.chars().take(width - 3) {
        out.push(ch);
    }
    out.push_str("...");
    out
}
