//! # TT Connect Four
//!
//! A tick-accurate model of an 8x8 Connect Four game engine as it runs in
//! hardware: a debounced, edge-triggered column cursor, a two-bit-per-cell
//! board register, a full-board win scanner and a command-multiplexed debug
//! bus for reading state back.
//!
//! ## Modules
//!
//! - [`game`] — Board store, gravity drop, win scan, turn/winner state machine
//! - [`input`] — Actuation levels, debouncing, edge detection, cursor
//! - [`debug_bus`] — Read-back commands, wire codes and response latency
//! - [`machine`] — Tick-driven top level with reset and initialisation
//! - [`host`] — Pin-level driver and host script language
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod debug_bus;
pub mod error;
pub mod game;
pub mod host;
pub mod input;
pub mod machine;

pub use machine::{ConnectFour, Event, TickInput};
