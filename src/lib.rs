//! fluent-extract - Fluent message extraction for JavaScript and TypeScript
//!
//! Finds `createMessage(...)` calls in modules that import the localization hook,
//! turns each call into a Fluent message with a content-addressed id, and writes the
//! messages to a `.ftl` resource. A companion pass rewrites the calls into lookups of
//! those ids.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine (parsing, message building, serialization, rewriting)
//! - `issues`: Issue type definitions and reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
