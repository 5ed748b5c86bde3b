//! Pokémon finder TUI
//!
//! Library half of the binary: state, reducer and views are exposed for tests.

pub mod action;
pub mod audio;
pub mod components;
pub mod config;
pub mod effect;
pub mod gateway;
pub mod reducer;
pub mod sprite;
pub mod state;
