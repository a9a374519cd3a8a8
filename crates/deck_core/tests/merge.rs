use deck_core::core_api::{
    Catalog, Deck, DeckDocument, Faction, Warlord, merge_deck, merge_deck_with_report,
    merge_decks,
};
use proptest::prelude::*;

fn small_catalog() -> Catalog {
    Catalog::new(vec![
        Faction::new(
            "Ultramarines",
            vec![Warlord::new("Marneus Calgar"), Warlord::new("Uriel Ventris")],
        ),
        Faction::new("Orks (Goff Klan)", vec![Warlord::new("Ghazghkull Thraka")]),
        Faction::new("Dark Angels", vec![Warlord::new("Azrael"), Warlord::new("Belial")]),
    ])
}

fn document(name: Option<&str>, factions: Vec<Faction>) -> DeckDocument {
    DeckDocument {
        name: name.map(str::to_string),
        factions,
    }
}

#[test]
fn merge_keeps_persisted_counters() {
    let doc = document(
        Some("Test Deck"),
        vec![Faction::new(
            "Ultramarines",
            vec![Warlord::with_counts("Marneus Calgar", 2, 1, 1, 1)],
        )],
    );

    let deck = merge_deck(&doc, Catalog::builtin());

    assert_eq!(deck.name, "Test Deck");
    assert_eq!(
        deck.factions[0].warlords[0],
        Warlord::with_counts("Marneus Calgar", 2, 1, 1, 1)
    );
    assert_eq!(deck.factions[0].warlords[1], Warlord::new("Chaplain Letharius"));
    assert_eq!(deck.factions.len(), Catalog::builtin().len());
}

#[test]
fn merge_defaults_missing_deck_name() {
    let deck = merge_deck(&document(None, Vec::new()), &small_catalog());
    assert_eq!(deck.name, "Unnamed Deck");
}

#[test]
fn merge_of_empty_document_is_a_fresh_catalog_copy() {
    let catalog = small_catalog();
    let deck = merge_deck(&document(Some("Test Deck"), Vec::new()), &catalog);
    assert_eq!(deck, catalog.new_deck("Test Deck"));
}

#[test]
fn merge_synthesizes_missing_faction_in_catalog_position() {
    let catalog = small_catalog();
    let doc = document(
        Some("Deck"),
        vec![
            Faction::new("Dark Angels", vec![Warlord::with_counts("Azrael", 1, 1, 1, 1)]),
            Faction::new(
                "Ultramarines",
                vec![Warlord::with_counts("Uriel Ventris", 0, 0, 4, 0)],
            ),
        ],
    );

    let (deck, report) = merge_deck_with_report(&doc, &catalog);

    let names: Vec<&str> = deck.factions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Ultramarines", "Orks (Goff Klan)", "Dark Angels"]);
    assert_eq!(deck.factions[1], catalog.factions()[1]);
    assert_eq!(
        deck.factions[0].warlords,
        vec![
            Warlord::new("Marneus Calgar"),
            Warlord::with_counts("Uriel Ventris", 0, 0, 4, 0),
        ]
    );
    assert_eq!(
        deck.factions[2].warlords,
        vec![Warlord::with_counts("Azrael", 1, 1, 1, 1), Warlord::new("Belial")]
    );
    assert_eq!(report.kept_warlords, 2);
    assert_eq!(report.synthesized_factions, 1);
    assert_eq!(report.synthesized_warlords, 3);
    assert!(report.is_lossless());
}

#[test]
fn merge_drops_unknown_warlords_and_factions() {
    let doc = document(
        Some("Deck"),
        vec![
            Faction::new(
                "Ultramarines",
                vec![
                    Warlord::with_counts("Roboute Guilliman", 9, 9, 9, 9),
                    Warlord::with_counts("Marneus Calgar", 1, 0, 0, 0),
                ],
            ),
            Faction::new("Space Wolves", vec![Warlord::with_counts("Ragnar", 5, 0, 0, 0)]),
        ],
    );

    let (deck, report) = merge_deck_with_report(&doc, &small_catalog());

    assert!(deck.faction("Space Wolves").is_none());
    let ultramarines = deck.faction("Ultramarines").expect("catalog faction");
    assert!(ultramarines.warlord("Roboute Guilliman").is_none());
    assert_eq!(ultramarines.warlords[0].off_wins, 1);
    assert_eq!(report.dropped_warlords, 1);
    assert_eq!(report.dropped_factions, 1);
    assert!(!report.is_lossless());
}

#[test]
fn merge_matches_names_case_sensitively() {
    let doc = document(
        Some("Deck"),
        vec![Faction::new(
            "ultramarines",
            vec![Warlord::with_counts("Marneus Calgar", 3, 0, 0, 0)],
        )],
    );

    let deck = merge_deck(&doc, &small_catalog());
    assert_eq!(deck.factions[0].warlords[0], Warlord::new("Marneus Calgar"));
}

#[test]
fn merge_uses_first_duplicate_entry() {
    let doc = document(
        Some("Deck"),
        vec![Faction::new(
            "Orks (Goff Klan)",
            vec![
                Warlord::with_counts("Ghazghkull Thraka", 1, 0, 0, 0),
                Warlord::with_counts("Ghazghkull Thraka", 7, 0, 0, 0),
            ],
        )],
    );

    let deck = merge_deck(&doc, &small_catalog());
    let orks = deck.faction("Orks (Goff Klan)").expect("catalog faction");
    assert_eq!(orks.warlords, vec![Warlord::with_counts("Ghazghkull Thraka", 1, 0, 0, 0)]);
}

#[test]
fn merge_counts_duplicate_warlords_as_dropped() {
    let catalog = Catalog::new(vec![Faction::new("A", vec![Warlord::new("x")])]);
    let doc = document(
        Some("Deck"),
        vec![Faction::new(
            "A",
            vec![
                Warlord::with_counts("x", 1, 0, 0, 0),
                Warlord::with_counts("x", 7, 0, 0, 0),
            ],
        )],
    );

    let (deck, report) = merge_deck_with_report(&doc, &catalog);

    assert_eq!(deck.factions[0].warlords, vec![Warlord::with_counts("x", 1, 0, 0, 0)]);
    assert_eq!(report.kept_warlords, 1);
    assert_eq!(report.dropped_warlords, 1);
    assert_eq!(report.dropped_factions, 0);
    assert!(!report.is_lossless());
}

#[test]
fn merge_counts_duplicate_factions_as_dropped() {
    let catalog = Catalog::new(vec![Faction::new("A", vec![Warlord::new("x")])]);
    let doc = document(
        Some("Deck"),
        vec![
            Faction::new("A", vec![Warlord::with_counts("x", 1, 0, 0, 0)]),
            Faction::new("A", vec![Warlord::with_counts("x", 9, 9, 9, 9)]),
        ],
    );

    let (deck, report) = merge_deck_with_report(&doc, &catalog);

    assert_eq!(deck.factions[0].warlords, vec![Warlord::with_counts("x", 1, 0, 0, 0)]);
    assert_eq!(report.kept_warlords, 1);
    assert_eq!(report.dropped_factions, 1);
    assert!(!report.is_lossless());
}

#[test]
fn merge_decks_preserves_document_order() {
    let catalog = small_catalog();
    let docs = vec![
        document(Some("First"), Vec::new()),
        document(None, Vec::new()),
        document(Some("Third"), Vec::new()),
    ];
    let names: Vec<String> = merge_decks(&docs, &catalog)
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec!["First", "Unnamed Deck", "Third"]);
}

fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Ultramarines".to_string()),
        Just("Orks (Goff Klan)".to_string()),
        Just("Dark Angels".to_string()),
        Just("Marneus Calgar".to_string()),
        Just("Uriel Ventris".to_string()),
        Just("Ghazghkull Thraka".to_string()),
        Just("Azrael".to_string()),
        Just("Belial".to_string()),
        "[A-Za-z ]{1,8}",
    ]
}

fn arb_warlord() -> impl Strategy<Value = Warlord> {
    (arb_name(), 0u32..50, 0u32..50, 0u32..50, 0u32..50)
        .prop_map(|(name, ow, ol, dw, dl)| Warlord::with_counts(name, ow, ol, dw, dl))
}

fn arb_document() -> impl Strategy<Value = DeckDocument> {
    let faction = (arb_name(), prop::collection::vec(arb_warlord(), 0..5))
        .prop_map(|(name, warlords)| Faction::new(name, warlords));
    (
        prop::option::of("[A-Za-z ]{0,10}"),
        prop::collection::vec(faction, 0..5),
    )
        .prop_map(|(name, factions)| DeckDocument { name, factions })
}

fn find_stored<'a>(doc: &'a DeckDocument, faction: &str, warlord: &str) -> Option<&'a Warlord> {
    doc.factions
        .iter()
        .find(|f| f.name == faction)
        .and_then(|f| f.warlord(warlord))
}

proptest! {
    #[test]
    fn merge_is_idempotent(doc in arb_document()) {
        let catalog = small_catalog();
        let once = merge_deck(&doc, &catalog);
        let twice = merge_deck(&DeckDocument::from(&once), &catalog);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn merge_is_complete_and_ordered(doc in arb_document()) {
        let catalog = small_catalog();
        let deck: Deck = merge_deck(&doc, &catalog);
        prop_assert_eq!(deck.factions.len(), catalog.len());
        for (merged, expected) in deck.factions.iter().zip(catalog.factions()) {
            prop_assert_eq!(&merged.name, &expected.name);
            let merged_names: Vec<&str> = merged.warlords.iter().map(|w| w.name.as_str()).collect();
            let expected_names: Vec<&str> = expected.warlords.iter().map(|w| w.name.as_str()).collect();
            prop_assert_eq!(merged_names, expected_names);
        }
    }

    #[test]
    fn merge_preserves_matching_counters(doc in arb_document()) {
        let catalog = small_catalog();
        let deck = merge_deck(&doc, &catalog);
        for faction in &deck.factions {
            for warlord in &faction.warlords {
                match find_stored(&doc, &faction.name, &warlord.name) {
                    Some(stored) => prop_assert_eq!(warlord, stored),
                    None => prop_assert_eq!(warlord, &Warlord::new(warlord.name.clone())),
                }
            }
        }
    }
}
