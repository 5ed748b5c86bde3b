//! Application state - single source of truth

use std::collections::{HashMap, HashSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::sprite::SpriteData;

/// Message shown for any failed lookup. The underlying error is only logged.
pub const NOT_FOUND_MESSAGE: &str = "Pokémon not found";

/// Delay between sprite flips while an entry is shown.
pub const SPRITE_TOGGLE_INTERVAL_MS: u64 = 1000;

/// Loading spinner timing.
pub const SPINNER_TICK_MS: u64 = 90;

/// Sprite URLs of a catalog entry. Either may be missing upstream.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpriteSet {
    pub front: Option<String>,
    pub back: Option<String>,
}

impl SpriteSet {
    pub fn url(&self, side: SpriteSide) -> Option<&String> {
        match side {
            SpriteSide::Front => self.front.as_ref(),
            SpriteSide::Back => self.back.as_ref(),
        }
    }

    pub fn urls(&self) -> impl Iterator<Item = &String> {
        self.front.iter().chain(self.back.iter())
    }
}

/// A single Pokémon record as returned by the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogEntry {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub sprites: SpriteSet,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum SpriteSide {
    #[default]
    Front,
    Back,
}

impl SpriteSide {
    pub fn toggle(&self) -> Self {
        match self {
            SpriteSide::Front => SpriteSide::Back,
            SpriteSide::Back => SpriteSide::Front,
        }
    }
}

/// Handle of the running sprite timer. Only one can exist at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SpriteAnimation {
    pub generation: u64,
    pub showing: SpriteSide,
}

/// Finder view state - everything the UI needs to render
#[derive(Clone, Debug, Default, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Text input contents
    #[debug(section = "Search", label = "Query")]
    pub query: String,

    /// True only while a lookup is in flight
    #[debug(section = "Search", label = "Loading")]
    pub is_loading: bool,

    /// Empty unless the last search failed
    #[debug(section = "Search", label = "Error")]
    pub error_message: String,

    /// Tag of the latest search; older results are dropped
    #[debug(section = "Search", label = "Generation")]
    pub search_generation: u64,

    #[debug(section = "Entry", label = "Current", debug_fmt)]
    pub entry: Option<CatalogEntry>,

    #[debug(section = "Sprite", label = "Visible", debug_fmt)]
    pub visible_sprite_url: Option<String>,

    #[debug(section = "Sprite", label = "Animation", debug_fmt)]
    pub animation: Option<SpriteAnimation>,

    // --- Internals (skipped) ---
    /// Last generation handed out to a sprite timer
    #[debug(skip)]
    pub animation_generation: u64,

    /// Decoded sprite images keyed by URL
    #[debug(skip)]
    pub sprites: HashMap<String, SpriteData>,

    /// Sprite URLs currently being downloaded
    #[debug(skip)]
    pub sprites_loading: HashSet<String>,

    #[debug(skip)]
    pub spinner_tick: u32,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the result card should be shown.
    pub fn shows_result(&self) -> bool {
        self.entry.is_some() && self.error_message.is_empty()
    }

    pub fn visible_sprite(&self) -> Option<&SpriteData> {
        let url = self.visible_sprite_url.as_ref()?;
        self.sprites.get(url)
    }

    pub fn sprite_pending(&self) -> bool {
        self.visible_sprite_url
            .as_ref()
            .is_some_and(|url| self.sprites_loading.contains(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_side_toggles() {
        assert_eq!(SpriteSide::Front.toggle(), SpriteSide::Back);
        assert_eq!(SpriteSide::Back.toggle(), SpriteSide::Front);
    }

    #[test]
    fn test_sprite_set_urls_skips_missing() {
        let sprites = SpriteSet {
            front: Some("f.png".into()),
            back: None,
        };
        let urls: Vec<_> = sprites.urls().collect();
        assert_eq!(urls, vec!["f.png"]);
        assert_eq!(sprites.url(SpriteSide::Back), None);
    }

    #[test]
    fn test_shows_result_requires_entry_without_error() {
        let mut state = AppState::new();
        assert!(!state.shows_result());

        state.entry = Some(CatalogEntry {
            id: 1,
            name: "bulbasaur".into(),
            types: vec!["grass".into()],
            sprites: SpriteSet::default(),
        });
        assert!(state.shows_result());

        state.error_message = NOT_FOUND_MESSAGE.into();
        assert!(!state.shows_result());
    }
}
