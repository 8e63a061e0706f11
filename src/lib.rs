//! i18n-bake - compile-time localization for JavaScript bundles
//!
//! Source text is written as tagged templates (`` _`Hello ${name}` ``). The
//! template's literal fragments, joined with `$1`, `$2`, ... placeholders,
//! form the translation key. A build runs in two steps: `transform` rewrites
//! the templates into marker calls, and `bake` replaces those calls in the
//! bundled output with string literals, once per locale. A runtime resolver
//! covers keys only known at run time.
//!
//! ## Module Structure
//!
//! - `cli`: command-line interface
//! - `config`: configuration file loading and validation
//! - `core`: key codec, interpolation, translation store, rewrite and
//!   substitution
//! - `issues`: issue type definitions and reporting
//! - `rules`: locale coverage checks

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
