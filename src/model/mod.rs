//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod key_action;
pub mod query;
pub mod record;
pub mod search_input;

// Re-export for convenience
pub use error::{
    AppError, BackendError, DateField, DateParseError, MalformedResultError, SourceError,
};
pub use key_action::KeyAction;
pub use query::{Clause, QueryExpression, QuerySyntax, DEFAULT_PAYLOAD_FIELD};
pub use record::RawRecord;
pub use search_input::SearchInput;
