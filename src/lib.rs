//! Nuggets - translatable text extraction for gettext-style localization
//!
//! Nuggets walks a project tree, finds every nugget marker such as
//! `[[[Save///button label]]]` in the files it is told to scan and merges
//! them into one deduplicated catalog of template entries, each carrying the
//! source locations that refer to it.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, report)
//! - `config`: Configuration file loading and parsing
//! - `core`: Scan engine (tree walk, path filter, tokenizer, catalog merge)
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod utils;
