//! Top-level application state machine.
//!
//! Defines [`AppState`], a Bevy [`States`] enum that gates the map behind the
//! startup data load. Regions are only spawned and input is only handled in
//! [`AppState::Ready`].
//!
//! The state lives in the `coverage` crate so that rendering and UI can gate
//! systems on it without depending on each other.

use bevy::prelude::*;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    /// Coverage table and boundaries are being read or fetched.
    #[default]
    Loading,
    /// Data is in place; the map is interactive.
    Ready,
    /// The startup load failed. Nothing is rendered but the error alert.
    Failed,
}
