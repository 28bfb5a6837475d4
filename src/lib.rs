//! commitview - terminal viewer for CodeShare commit batches
//!
//! commitview talks to a CodeShare server, loads one or more commits together
//! with their per-file unified diffs, and renders them in a ratatui interface:
//! a file list with change badges on the left, a line-numbered, syntax
//! highlighted diff pane on the right.
//!
//! The `login`/`logout` subcommands manage the stored access token; the bare
//! command opens the viewer for a batch of commit ids.

pub mod api;
pub mod app;
pub mod changes;
pub mod diff;
pub mod highlight;
pub mod input;
pub mod keymap;
pub mod layout;
pub mod session;
pub mod settings;
pub mod ui;
