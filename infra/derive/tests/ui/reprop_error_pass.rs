use reprop_derive::reprop_error;
use std::borrow::Cow;

#[reprop_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Missing key{}: {message}", format_context(.context))]
    Missing { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    Err(std::io::Error::other("disk")).context("Reading the demo file")
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.attached_context(), Some("Reading the demo file"));

    let internal: DemoError = "boom".into();
    assert!(internal.attached_context().is_none());
}
