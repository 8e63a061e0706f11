//! Coverage rules.
//!
//! Each rule is a pure function over the locale files and the set of keys
//! used in sources, with a `*_issues` wrapper reading both from a
//! [`BuildContext`](crate::core::BuildContext).
//!
//! ## Module Structure
//!
//! - `missing`: used keys absent from a locale, and persisting them
//! - `unused`: locale keys no source uses
//! - `plural`: plural tables without a `*` entry

pub mod missing;
pub mod plural;
pub mod unused;

pub use missing::{add_missing_keys, check_missing_keys, check_missing_keys_issues};
pub use plural::{check_plural_fallbacks, check_plural_fallbacks_issues};
pub use unused::{check_unused_keys, check_unused_keys_issues};
