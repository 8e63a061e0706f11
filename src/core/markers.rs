//! Tokens shared between the source rewrite and the bundle substitution.
//!
//! They are private to this tool: the rewrite emits them into generated code
//! and the substitution removes every one of them again.

/// Callee of a marker call: `__$LOCALIZE$__("<key>", [args...])`.
pub const LOCALIZE_FN: &str = "__$LOCALIZE$__";

/// Sentinel string replaced by the target locale before call-site scanning.
pub const LOCALE_SENTINEL: &str = "__$LOCALE$__";

/// Local name of the runtime interpolation import used for plural keys.
pub const INTERPOLATE_FN: &str = "__interpolate__";

/// Exported name of the runtime interpolation function.
pub const INTERPOLATE_EXPORT: &str = "interpolate";

/// Exports of the runtime module that mark a tagged template for rewriting.
pub const LOCALIZE_EXPORTS: &[&str] = &["_", "localize", "plural"];
