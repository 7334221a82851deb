//! # Shelf CLI Architecture
//!
//! Shelf ships with a CLI client, but the binary is intentionally thin: the CLI
//! lives in `src/cli/`, while this file only invokes `cli::run()` and handles
//! process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/shelfapp/`: Core library with UI-agnostic stores and business logic
//! - `crates/shelf/`: This CLI tool, depends on the `shelfapp` library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/shelf/src/cli/)                          │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal rendering (render.rs)                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/shelfapp/src/api.rs)                     │
//! │  - Parses user-typed ids                                    │
//! │  - Dispatches to command modules                            │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (crates/shelfapp/src/commands/*)             │
//! │  - Business rules over the stores                           │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Approach
//!
//! - **Commands and stores**: unit tests over the in-memory backing.
//! - **Filesystem**: integration tests in `crates/shelfapp/tests/`.
//! - **CLI**: argument parsing and rendering unit tests here, plus end-to-end
//!   runs of the binary in `tests/` with `SHELF_DATA` pointed at a temp dir.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
