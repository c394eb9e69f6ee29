//! # Core Application Logic
//!
//! CampusGPT's turn-taking logic. It knows nothing about terminals.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Session (state)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI.         │
//!                    └───────────┬─────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐               ┌──────────────┐
//!          │    TUI     │               │ TurnController│
//!          │  Adapter   │               │ (async driver)│
//!          │ (ratatui)  │               │               │
//!          └────────────┘               └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`message`]: `Message`, `Role`, `MessageId`
//! - [`state`]: `Session`, the only owner of conversation state
//! - [`action`]: `Action`, `Effect` and the `update()` reducer
//! - [`controller`]: `TurnController`, which awaits the Answer Service between reducer steps
//! - [`config`]: config file and override resolution

pub mod action;
pub mod config;
pub mod controller;
pub mod message;
pub mod state;

pub use action::{Action, Effect, update};
pub use controller::{Rejected, TurnController, TurnOutcome};
pub use message::{Message, MessageId, Role};
pub use state::{Phase, Session, SessionView};
