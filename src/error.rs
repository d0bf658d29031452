//! Error types and result aliases for reindent.
//!
//! The reconstruction engine itself never fails. This alias covers the
//! surfaces around it:
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used by config loading,
//!   file processing and quiz batch review

use anyhow::Result as AnyhowResult;

pub type Result<T> = AnyhowResult<T>;
