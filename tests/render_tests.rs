//! Render snapshot tests using RenderHarness

use tui_dispatch::testing::*;
use pokefinder::{
    components::{Component, FinderView, FinderViewProps, PLACEHOLDER},
    sprite::SpriteData,
    state::{AppState, CatalogEntry, SpriteSet, NOT_FOUND_MESSAGE},
};

fn render(state: &AppState, width: u16, height: u16) -> String {
    let mut render = RenderHarness::new(width, height);
    let mut component = FinderView::new();
    render.render_to_string_plain(|frame| {
        let props = FinderViewProps {
            state,
            is_focused: true,
        };
        component.render(frame, frame.area(), props);
    })
}

fn bulbasaur_state() -> AppState {
    let front = "https://img.test/1.png".to_string();
    let mut state = AppState {
        entry: Some(CatalogEntry {
            id: 1,
            name: "bulbasaur".into(),
            types: vec!["grass".into(), "poison".into()],
            sprites: SpriteSet {
                front: Some(front.clone()),
                back: None,
            },
        }),
        visible_sprite_url: Some(front.clone()),
        ..Default::default()
    };
    state.sprites.insert(
        front,
        SpriteData {
            width: 2,
            height: 2,
            pixels: [0, 200, 0, 255].repeat(4),
        },
    );
    state
}

#[test]
fn test_render_idle_state() {
    let output = render(&AppState::default(), 60, 20);

    assert!(output.contains("Pokémon Finder"));
    assert!(output.contains(PLACEHOLDER));
    assert!(!output.contains(NOT_FOUND_MESSAGE));
}

#[test]
fn test_render_error_state() {
    let state = AppState {
        query: "doesnotexist123".into(),
        error_message: NOT_FOUND_MESSAGE.into(),
        ..Default::default()
    };

    let output = render(&state, 60, 20);

    assert!(output.contains(NOT_FOUND_MESSAGE), "Should show error:\n{output}");
    assert!(output.contains("doesnotexist123"));
}

#[test]
fn test_render_entry_with_sprite() {
    let output = render(&bulbasaur_state(), 60, 24);

    assert!(output.contains("Bulbasaur"));
    assert!(output.contains("GRASS"));
    assert!(output.contains("POISON"));
    assert!(output.contains("#1"));
    assert!(output.contains('▀'), "sprite should be drawn:\n{output}");
    assert!(!output.contains("[no sprite]"));
}

#[test]
fn test_render_missing_sprite_placeholder() {
    let mut state = bulbasaur_state();
    state.visible_sprite_url = None;

    let output = render(&state, 60, 24);

    assert!(output.contains("[no sprite]"));
    assert!(!output.contains('▀'));
}

#[test]
fn test_error_hides_result_card() {
    let mut state = bulbasaur_state();
    state.error_message = NOT_FOUND_MESSAGE.into();

    let output = render(&state, 60, 24);

    assert!(!output.contains("Bulbasaur"));
    assert!(output.contains(NOT_FOUND_MESSAGE));
}

#[test]
fn test_render_small_terminal() {
    let output = render(&bulbasaur_state(), 20, 8);
    assert!(!output.is_empty());
}
