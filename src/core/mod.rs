//! # Core Application Logic
//!
//! This module contains Blue's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │    API     │
//!            │  Adapter   │            │   client   │
//!            │ (ratatui)  │            │ (reqwest)  │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all conversation state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`message`]: Transcript messages and their render kinds
//! - [`attachment`]: Pending files/URLs and their validation
//! - [`intent`]: Search vs. marketing routing
//! - [`config`]: Layered configuration

pub mod action;
pub mod attachment;
pub mod config;
pub mod intent;
pub mod message;
pub mod state;
