use std::borrow::Cow;

/// Errors surfaced by property reads.
///
/// Rejected writes are not errors; they are silent no-ops.
#[reprop_derive::reprop_error]
pub enum PropertyError {
    /// A dictionary lookup named a key that is not present.
    #[error("Key not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A derived property was read before an evaluator was assigned.
    #[error("Property not configured{}: {message}", format_context(.context))]
    NotConfigured { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A value was read from a write-only dictionary.
    #[error("Access denied{}: {message}", format_context(.context))]
    AccessDenied { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
