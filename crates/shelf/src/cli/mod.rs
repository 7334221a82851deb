//! # CLI Behavior
//!
//! This is **one possible UI client** for shelf, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation in [`crate`].
//!
//! ## Command Shape
//!
//! Every command is `shelf <group> <action>`, one group per store area:
//! `list`, `progress`, `rating`, `review`, `share`, `recommend`, `group`,
//! plus `status`. Running `shelf` with no arguments shows My List.
//!
//! Titles, review bodies and share titles are the trailing words of the
//! command line, so quoting is optional: `shelf list add 42 The Matrix`.
//!
//! ## Output
//!
//! Text by default. `--json` prints the full `CmdResult` instead, which is
//! what scripts (and the end-to-end tests) read.
//!
//! ## Module Structure
//!
//! - `commands`: Start-up, dispatch and per-group handlers
//! - `render`: Text output (alignment, colors, relative times)
//! - `setup`: Argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
