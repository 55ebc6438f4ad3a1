//! # CLI Behavior
//!
//! This is **one possible UI client** for readlog, not the application itself.
//! It is the only place that knows about terminal I/O, exit codes and output
//! formatting.
//!
//! ## Naked Execution (`readlog`)
//!
//! Running `readlog` with no arguments lists the three status columns.
//!
//! ## Adding Books
//!
//! `readlog add <title> <author>` files the book under To Read, dated now.
//! `--status` picks another column; completed books take `--month` and
//! `--year` for when they were finished (defaulting to now).
//!
//! ## Ids
//!
//! Every book has a stable numeric id, shown in `list`. `move`, `rename` and
//! `delete` take it. Unknown ids are reported, never treated as errors.
//!
//! ## Structure
//!
//! - `setup.rs`: clap definitions
//! - `commands.rs`: context wiring and per-command handlers
//! - `render.rs`: columns, year stats and the bar chart
//! - `logger.rs`: stderr backend for the `log` facade

mod commands;
mod logger;
mod render;
mod setup;

pub use commands::run;
