//! Localization engine.
//!
//! ## Module Structure
//!
//! - `key`: key derivation from template fragments
//! - `translation`, `interpolate`: translation values and runtime interpolation
//! - `locale`, `store`, `runtime`: locale data, fallback lookup and the
//!   runtime context
//! - `rewrite`: tagged templates to marker calls
//! - `substitute`: marker calls to per-locale inline literals
//! - `parsers`: swc source parsing and locale file IO
//! - `file_scanner`, `context`: project scanning for the CLI

pub mod context;
pub mod data;
pub mod file_scanner;
pub mod interpolate;
pub mod key;
pub mod locale;
pub mod markers;
pub mod parsers;
pub mod rewrite;
pub mod runtime;
pub mod store;
pub mod substitute;
pub mod translation;

pub use context::{BuildContext, SourceData};
pub use data::{SourceContext, SourceLocation};
pub use interpolate::{Param, interpolate};
pub use key::{Key, derive_key};
pub use locale::{Locale, LocaleError};
pub use rewrite::{RewriteError, RewriteRules, TransformError, transform_source};
pub use runtime::Localizer;
pub use store::{LocaleData, TranslationStore};
pub use substitute::{SubstituteError, marker_keys, substitute, substitute_locales};
pub use translation::{Plural, PluralEntry, Translation};
