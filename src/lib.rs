//! Client core for a shared pixel-grid game.
//!
//! The remote API owns the grid, the cooldown timers and the team
//! assignments. This crate holds what the client itself decides: which
//! input is valid, which players are shown, what the cooldown label says,
//! and which responses are still fresh enough to render.

pub mod api;
pub mod config;
pub mod controller;
pub mod cooldown;
pub mod error;
pub mod grid;
pub mod identity;
pub mod model;
pub mod ranking;
pub mod sequence;
pub mod session;

pub use api::{Gateway, PixelChange, TeamChoice};
pub use config::ClientConfig;
pub use controller::{Controller, Poller, View};
pub use cooldown::{Cooldown, CooldownPhase, CooldownUpdate, READY_LABEL};
pub use error::{ClientError, ClientResult, ValidationError};
pub use grid::{CellPos, Grid, GridCell};
pub use identity::{IdentityStore, MemoryIdentityStore};
pub use model::{PlayerRecord, ServerMessage, Severity, Uid, UID_LEN};
pub use ranking::{recent_players, RECENT_PLAYER_LIMIT};
pub use session::SessionState;
