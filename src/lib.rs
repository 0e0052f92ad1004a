// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive uploader.
//
// Module responsibilities:
// - `api`: GitHub REST calls (fetch/create repository), the startup
//   connectivity probe, and remote URL composition.
// - `archive`: zip detection and extraction for uploaded folders.
// - `config`: the persisted six-field JSON config and its store.
// - `journal`: the append-only upload log.
// - `locate`: fuzzy folder resolution from user-typed path fragments.
// - `publish`: the fixed git command sequence and its outcome collection.
// - `ui`: the interactive session flow tying everything together.
//
// Keeping this separation makes it easier to test the non-interactive
// pieces with in-memory or temp-dir fakes.
pub mod api;
pub mod archive;
pub mod config;
pub mod journal;
pub mod locate;
pub mod publish;
pub mod ui;
