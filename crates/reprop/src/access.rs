use serde::Deserialize;
use strum_macros::{Display, EnumIter, EnumString};

/// Read/write policy of a property, fixed at construction.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AccessMode {
    /// Reads and writes both operate normally.
    #[default]
    ReadWrite,
    /// Writes are accepted as calls but never mutate or emit.
    ReadOnly,
    /// Reads never expose the stored value.
    WriteOnly,
}

impl AccessMode {
    #[must_use]
    pub const fn can_read(self) -> bool {
        !matches!(self, Self::WriteOnly)
    }

    #[must_use]
    pub const fn can_write(self) -> bool {
        !matches!(self, Self::ReadOnly)
    }
}
