#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    ExportFailed,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Unknown => "Something went wrong. Please try again.",
            Self::ExportFailed => "Could not save your card. Please try again.",
        }
    }
}

/// Outcome of the last "save as image" action, shown under the result card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportNotice {
    Saved(String),
    Failed(ViewError),
}

impl ExportNotice {
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Saved(path) => format!("Saved to {path}"),
            Self::Failed(err) => err.message().to_string(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
