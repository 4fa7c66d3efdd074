//! Display mode types.

/// How much of each record the notification stack shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailLevel {
    /// Generic display message only.
    #[default]
    Summary,
    /// Display message plus `details` and `code` when present.
    Full,
}

impl DetailLevel {
    #[must_use]
    pub const fn from_show_details(show_details: bool) -> Self {
        if show_details {
            Self::Full
        } else {
            Self::Summary
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Summary => Self::Full,
            Self::Full => Self::Summary,
        }
    }

    #[must_use]
    pub const fn shows_details(self) -> bool {
        matches!(self, Self::Full)
    }
}
