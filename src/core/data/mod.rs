//! Location types shared by the transformer and the reporting layer.

pub mod source;

pub use source::{SourceContext, SourceLocation};
