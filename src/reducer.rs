//! Reducer - pure function: (state, action) -> DispatchResult

use std::collections::HashSet;

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, SpriteAnimation, SpriteSide, NOT_FOUND_MESSAGE};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Query input =====
        Action::QueryInput(ch) => {
            if state.is_loading {
                return DispatchResult::unchanged();
            }
            state.query.push(ch);
            DispatchResult::changed()
        }

        Action::QueryBackspace => {
            if state.is_loading || state.query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        // ===== Search =====
        Action::SearchSubmit(term) => search(state, term),

        Action::EntryDidLoad { generation, entry } => {
            if generation != state.search_generation {
                tracing::debug!(generation, latest = state.search_generation, "dropping stale entry");
                return DispatchResult::unchanged();
            }
            state.entry = Some(entry);
            state.error_message.clear();
            let mut effects = start_animation(state);
            effects.extend(play_sound(state));
            effects.extend(load_sprites(state));
            state.is_loading = false;
            DispatchResult::changed_with_many(effects)
        }

        Action::EntryDidError { generation, error } => {
            if generation != state.search_generation {
                tracing::debug!(generation, latest = state.search_generation, %error, "dropping stale lookup error");
                return DispatchResult::unchanged();
            }
            state.error_message = NOT_FOUND_MESSAGE.to_string();
            state.entry = None;
            state.visible_sprite_url = None;
            state.is_loading = false;
            DispatchResult::changed()
        }

        // ===== Sprites =====
        Action::SpriteAnimationTick { generation } => tick_animation(state, generation),

        Action::SpriteDidLoad { url, sprite } => {
            let was_loading = state.sprites_loading.remove(&url);
            let current = state
                .entry
                .as_ref()
                .is_some_and(|entry| entry.sprites.urls().any(|u| *u == url));
            if current {
                state.sprites.insert(url, sprite);
                DispatchResult::changed()
            } else if was_loading {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::SpriteDidError { url, error: _ } => {
            if state.sprites_loading.remove(&url) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Cry =====
        // Playback never touches state; failures are already logged.
        Action::CryDidPlay | Action::CryDidError(_) => DispatchResult::unchanged(),

        // ===== Global =====
        Action::Tick => {
            if state.is_loading {
                state.spinner_tick = state.spinner_tick.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => match stop_animation(state) {
            Some(effect) => DispatchResult::changed_with(effect),
            None => DispatchResult::unchanged(),
        },
    }
}

fn search(state: &mut AppState, term: String) -> DispatchResult<Effect> {
    if term.trim().is_empty() {
        return DispatchResult::unchanged();
    }

    // Searches started outside the input box still show their term
    state.query.clone_from(&term);
    state.is_loading = true;
    state.error_message.clear();
    state.spinner_tick = 0;

    let mut effects: Vec<Effect> = stop_animation(state).into_iter().collect();
    state.search_generation += 1;
    effects.push(Effect::LookupEntry {
        query: term,
        generation: state.search_generation,
    });
    DispatchResult::changed_with_many(effects)
}

/// Drops the animation handle. Returns the cancel effect if a timer was active.
fn stop_animation(state: &mut AppState) -> Option<Effect> {
    state
        .animation
        .take()
        .map(|_| Effect::StopSpriteAnimation)
}

fn start_animation(state: &mut AppState) -> Vec<Effect> {
    let Some(front) = state.entry.as_ref().map(|entry| entry.sprites.front.clone()) else {
        return Vec::new();
    };

    let mut effects: Vec<Effect> = stop_animation(state).into_iter().collect();
    state.visible_sprite_url = front;
    state.animation_generation += 1;
    let generation = state.animation_generation;
    state.animation = Some(SpriteAnimation {
        generation,
        showing: SpriteSide::Front,
    });
    effects.push(Effect::ScheduleSpriteTick { generation });
    effects
}

fn tick_animation(state: &mut AppState, generation: u64) -> DispatchResult<Effect> {
    let Some(mut animation) = state.animation.filter(|anim| anim.generation == generation) else {
        return DispatchResult::unchanged();
    };
    let Some(entry) = state.entry.as_ref() else {
        state.animation = None;
        return DispatchResult::changed();
    };

    animation.showing = animation.showing.toggle();
    state.visible_sprite_url = entry.sprites.url(animation.showing).cloned();
    state.animation = Some(animation);
    DispatchResult::changed_with(Effect::ScheduleSpriteTick { generation })
}

fn play_sound(state: &AppState) -> Option<Effect> {
    state
        .entry
        .as_ref()
        .map(|entry| Effect::PlayCry { id: entry.id })
}

fn load_sprites(state: &mut AppState) -> Vec<Effect> {
    let Some(entry) = state.entry.as_ref() else {
        return Vec::new();
    };
    // Only the shown entry's sprites stay cached
    let wanted: HashSet<&String> = entry.sprites.urls().collect();
    state.sprites.retain(|url, _| wanted.contains(url));
    state.sprites_loading.retain(|url| wanted.contains(url));

    let mut effects = Vec::new();
    for url in entry.sprites.urls() {
        if state.sprites.contains_key(url) || state.sprites_loading.contains(url) {
            continue;
        }
        state.sprites_loading.insert(url.clone());
        effects.push(Effect::LoadSprite { url: url.clone() });
    }
    effects
}
