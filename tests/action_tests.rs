//! Store, action and keyboard tests

use tui_dispatch::testing::*;
use tui_dispatch::{assert_emitted, assert_not_emitted, EffectStore, NumericComponentId};
use pokefinder::{
    action::Action,
    components::{Component, FinderView, FinderViewProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, CatalogEntry, SpriteSet, NOT_FOUND_MESSAGE},
};

fn pikachu() -> CatalogEntry {
    CatalogEntry {
        id: 25,
        name: "pikachu".into(),
        types: vec!["electric".into()],
        sprites: SpriteSet {
            front: Some("https://img.test/25.png".into()),
            back: Some("https://img.test/back/25.png".into()),
        },
    }
}

#[test]
fn test_reducer_search_submit() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert!(!store.state().is_loading);

    let result = store.dispatch(Action::SearchSubmit("pikachu".into()));
    assert!(result.changed, "State should change");
    assert!(store.state().is_loading);
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(
        result.effects[0],
        Effect::LookupEntry { generation: 1, .. }
    ));
}

#[test]
fn test_reducer_entry_load() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::SearchSubmit("pikachu".into()));
    store.dispatch(Action::EntryDidLoad {
        generation: 1,
        entry: pikachu(),
    });

    let state = store.state();
    assert!(!state.is_loading);
    assert_eq!(state.entry, Some(pikachu()));
    assert!(state.error_message.is_empty());
    assert_eq!(
        state.visible_sprite_url.as_deref(),
        Some("https://img.test/25.png")
    );
}

#[test]
fn test_reducer_entry_error() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::SearchSubmit("doesnotexist123".into()));
    let result = store.dispatch(Action::EntryDidError {
        generation: 1,
        error: "not found: /pokemon/doesnotexist123".into(),
    });

    assert!(result.effects.is_empty());
    assert_eq!(store.state().error_message, NOT_FOUND_MESSAGE);
    assert!(store.state().entry.is_none());
    assert!(!store.state().is_loading);
}

#[test]
fn test_component_keyboard_events() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = FinderView::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("m e w", |state, event| {
        let props = FinderViewProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(3);
    actions.assert_first(Action::QueryInput('m'));
}

#[test]
fn test_component_ignores_when_unfocused() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = FinderView::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("a b c", |state, event| {
        let props = FinderViewProps {
            state,
            is_focused: false,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_empty();
}

#[test]
fn test_action_categories() {
    let did_load = Action::EntryDidLoad {
        generation: 1,
        entry: pikachu(),
    };
    let tick = Action::Tick;

    assert_eq!(did_load.category(), Some("entry_did"));
    assert_eq!(tick.category(), None);
    assert!(did_load.is_entry_did());
}

#[test]
fn test_harness_emit_and_drain() {
    let mut harness = TestHarness::<(), Action>::new(());

    harness.emit(Action::SearchSubmit("eevee".into()));
    harness.emit(Action::SpriteAnimationTick { generation: 1 });
    harness.emit(Action::CryDidError("no output device".into()));

    let actions = harness.drain_emitted();
    actions.assert_count(3);
}

#[test]
fn test_assert_emitted_macro() {
    let actions = vec![
        Action::SearchSubmit("pikachu".into()),
        Action::EntryDidLoad {
            generation: 1,
            entry: pikachu(),
        },
    ];

    assert_emitted!(actions, Action::SearchSubmit(_));
    assert_emitted!(actions, Action::EntryDidLoad { .. });
    assert_not_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::EntryDidError { .. });
}
