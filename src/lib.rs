//! Core simulation for a terminal arcade shooter: a player ship at the
//! bottom of the field fires at procedurally spawned descending enemies,
//! which fire back, until one of them reaches the ship.
//!
//! The simulation runs in abstract field units; the binary maps those onto
//! terminal cells and drives the fixed 33 ms tick loop.

pub mod assets;
pub mod entities;
pub mod geometry;
pub mod score;
pub mod world;
