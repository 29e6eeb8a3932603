//! Source file parsing.
//!
//! - `jsx`: JSX/TSX/TS/JS source parser (uses swc for AST generation)

pub mod jsx;
