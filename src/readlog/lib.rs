//! # Readlog Architecture
//!
//! Readlog is a **UI-agnostic reading tracker library**. It keeps a list of
//! books (to read, reading, completed) and the statistics derived from it:
//! how many books were completed in each month of each year, which years have
//! data, and which authors have been read. The bundled CLI is one client of
//! the library, not the library itself.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders columns and charts             │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the ReadingState, loads it once                     │
//! │  - Saves touched entities after each mutation               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, returns CmdResult              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Reading State (state.rs, tally.rs, model.rs)               │
//! │  - Books plus derived tally, years and authors              │
//! │  - The only code allowed to change them                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - KvStore trait: named JSON values                         │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Tally Invariant
//!
//! For every year `y` and month `m`, `tally[y][m].count` equals the number of
//! completed books dated `(y, m)`. Buckets never hold zero, empty years are
//! removed, and every year in the tally is also in `years`. The tests in
//! `state.rs` check this after arbitrary operation sequences.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`state`]: The reading state and its mutation API
//! - [`tally`]: The month/year completion tally
//! - [`model`]: `Book`, `Status`, month helpers
//! - [`chart`]: Bar-chart series for a year
//! - [`store`]: Storage abstraction and implementations
//! - [`config`]: Configuration management
//! - [`init`]: Data directory discovery and context setup
//! - [`error`]: Error types
//! - `cli`: Argument parsing and terminal rendering for the binary (not part of the lib API)

pub mod api;
pub mod chart;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod state;
pub mod store;
pub mod tally;
