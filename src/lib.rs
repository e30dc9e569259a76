//! Cellular Scape: a top-down maze shooter.
//!
//! The library is the simulation core. It owns no terminal, window or audio
//! device; the `cellular_scape` binary drives it with decoded input and draws
//! whatever state it exposes.

pub mod ai;
pub mod combat;
pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod fog;
pub mod hud;
pub mod input;
pub mod level;
pub mod loot;
pub mod particles;
pub mod physics;
