pub use crate::{
    AccessMode, Change, DerivedProperty, DictProperty, EventKind, Property, PropertyError,
    PropertyErrorExt, Subscriber,
};
