//! File parsers for source code and locale files.
//!
//! - `source`: TS/TSX/JS/JSX source parser (swc)
//! - `locale_file`: locale JSON files (load, synthesize, save)

pub mod locale_file;
pub mod source;
