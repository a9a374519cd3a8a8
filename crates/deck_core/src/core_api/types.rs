use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the four per-warlord counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    OffWins,
    OffLosses,
    DefWins,
    DefLosses,
}

impl Counter {
    pub const ALL: [Counter; 4] = [
        Counter::OffWins,
        Counter::OffLosses,
        Counter::DefWins,
        Counter::DefLosses,
    ];

    /// Field name used in the persisted document.
    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::OffWins => "off_wins",
            Self::OffLosses => "off_losses",
            Self::DefWins => "def_wins",
            Self::DefLosses => "def_losses",
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Counter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Counter::ALL
            .into_iter()
            .find(|counter| counter.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "invalid counter '{value}', expected off_wins, off_losses, def_wins or def_losses"
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warlord {
    #[serde(rename = "warlord_name")]
    pub name: String,
    pub off_wins: u32,
    pub off_losses: u32,
    pub def_wins: u32,
    pub def_losses: u32,
}

impl Warlord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            off_wins: 0,
            off_losses: 0,
            def_wins: 0,
            def_losses: 0,
        }
    }

    pub fn with_counts(
        name: impl Into<String>,
        off_wins: u32,
        off_losses: u32,
        def_wins: u32,
        def_losses: u32,
    ) -> Self {
        Self {
            name: name.into(),
            off_wins,
            off_losses,
            def_wins,
            def_losses,
        }
    }

    pub fn get(&self, counter: Counter) -> u32 {
        match counter {
            Counter::OffWins => self.off_wins,
            Counter::OffLosses => self.off_losses,
            Counter::DefWins => self.def_wins,
            Counter::DefLosses => self.def_losses,
        }
    }

    pub fn counter_mut(&mut self, counter: Counter) -> &mut u32 {
        match counter {
            Counter::OffWins => &mut self.off_wins,
            Counter::OffLosses => &mut self.off_losses,
            Counter::DefWins => &mut self.def_wins,
            Counter::DefLosses => &mut self.def_losses,
        }
    }

    pub(crate) fn zeroed(&self) -> Self {
        Self::new(self.name.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faction {
    #[serde(rename = "faction_name")]
    pub name: String,
    pub warlords: Vec<Warlord>,
}

impl Faction {
    pub fn new(name: impl Into<String>, warlords: Vec<Warlord>) -> Self {
        Self {
            name: name.into(),
            warlords,
        }
    }

    /// First warlord with exactly this name.
    pub fn warlord(&self, name: &str) -> Option<&Warlord> {
        self.warlords.iter().find(|w| w.name == name)
    }

    pub fn warlord_mut(&mut self, name: &str) -> Option<&mut Warlord> {
        self.warlords.iter_mut().find(|w| w.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    #[serde(rename = "deck_name")]
    pub name: String,
    pub factions: Vec<Faction>,
}

impl Deck {
    pub fn new(name: impl Into<String>, factions: Vec<Faction>) -> Self {
        Self {
            name: name.into(),
            factions,
        }
    }

    /// First faction with exactly this name.
    pub fn faction(&self, name: &str) -> Option<&Faction> {
        self.factions.iter().find(|f| f.name == name)
    }

    pub fn faction_mut(&mut self, name: &str) -> Option<&mut Faction> {
        self.factions.iter_mut().find(|f| f.name == name)
    }

    pub fn warlords(&self) -> impl Iterator<Item = &Warlord> {
        self.factions.iter().flat_map(|f| f.warlords.iter())
    }
}

/// A deck as it sits in a saved file, before it has been merged with a
/// catalog. Only the deck name may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckDocument {
    #[serde(rename = "deck_name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub factions: Vec<Faction>,
}

impl From<Deck> for DeckDocument {
    fn from(deck: Deck) -> Self {
        Self {
            name: Some(deck.name),
            factions: deck.factions,
        }
    }
}

impl From<&Deck> for DeckDocument {
    fn from(deck: &Deck) -> Self {
        Self::from(deck.clone())
    }
}
