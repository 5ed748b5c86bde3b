//! Actions for the finder view

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::sprite::SpriteData;
use crate::state::CatalogEntry;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Query input =====
    QueryInput(char),
    QueryBackspace,

    // ===== Search =====
    /// Intent: look up the given term (ignored when blank)
    SearchSubmit(String),

    /// Result: lookup for `generation` succeeded
    EntryDidLoad { generation: u64, entry: CatalogEntry },

    /// Result: lookup for `generation` failed; detail is for logs only
    EntryDidError { generation: u64, error: String },

    // ===== Sprites =====
    /// Timer fired for the animation tagged `generation`
    SpriteAnimationTick { generation: u64 },

    SpriteDidLoad { url: String, sprite: SpriteData },
    SpriteDidError { url: String, error: String },

    // ===== Cry =====
    CryDidPlay,
    CryDidError(String),

    // ===== Global =====
    /// Spinner frame while loading
    Tick,

    /// Tear down the view and exit
    Quit,
}
