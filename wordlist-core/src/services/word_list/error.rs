use crate::model::entry::Field;
use crate::services::notice::Severity;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please write in both fields to save.")]
    EmptyField(Field),

    #[error("The {} must have at least {} characters.", .field.label(), .min)]
    TooShort { field: Field, min: usize },

    #[error("The word \"{term}\" has already been added (ID: {existing_id}). Please try again with another word.")]
    DuplicateTerm { term: String, existing_id: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("Entry with ID {0} was not found.")]
    NotFound(u32),

    #[error("No changes were made.")]
    NoChange,

    #[error("No entry is being edited.")]
    NotEditing,

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyField(_) => "EMPTY_FIELD",
            ValidationError::TooShort { .. } => "TOO_SHORT",
            ValidationError::DuplicateTerm { .. } => "DUPLICATE_TERM",
        }
    }
}

impl EditError {
    pub fn code(&self) -> &'static str {
        match self {
            EditError::NotFound(_) => "NOT_FOUND",
            EditError::NoChange => "NO_CHANGE",
            EditError::NotEditing => "NOT_EDITING",
            EditError::Invalid(e) => e.code(),
        }
    }

    /// `NoChange` is a soft warning; everything else is an error.
    pub fn severity(&self) -> Severity {
        match self {
            EditError::NoChange => Severity::Warning,
            _ => Severity::Error,
        }
    }
}
