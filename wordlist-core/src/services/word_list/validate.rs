use crate::model::entry::{Field, WordEntry};

use super::error::ValidationError;
use super::normalize::{char_len, fold};

/// Minimum length, in characters, of a newly written term.
pub const MIN_TERM_CHARS: usize = 3;

pub fn require_non_empty(field: Field, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

pub fn require_min_len(field: Field, value: &str) -> Result<(), ValidationError> {
    if char_len(value) < MIN_TERM_CHARS {
        return Err(ValidationError::TooShort {
            field,
            min: MIN_TERM_CHARS,
        });
    }
    Ok(())
}

/// Finds an entry other than `skip_id` whose source term matches `source`
/// case-insensitively.
pub fn find_duplicate<'a, I>(entries: I, source: &str, skip_id: Option<u32>) -> Option<&'a WordEntry>
where
    I: IntoIterator<Item = &'a WordEntry>,
{
    let needle = fold(source);
    entries
        .into_iter()
        .filter(|e| Some(e.id) != skip_id)
        .find(|e| fold(&e.source_term) == needle)
}

pub fn require_unique<'a, I>(entries: I, source: &str, skip_id: Option<u32>) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = &'a WordEntry>,
{
    match find_duplicate(entries, source, skip_id) {
        Some(existing) => Err(ValidationError::DuplicateTerm {
            term: source.to_string(),
            existing_id: existing.id,
        }),
        None => Ok(()),
    }
}

/// Full check for a brand new pair. Inputs must already be trimmed.
pub fn new_pair<'a, I>(entries: I, source: &str, translation: &str) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = &'a WordEntry>,
{
    require_non_empty(Field::Source, source)?;
    require_non_empty(Field::Translation, translation)?;
    require_min_len(Field::Source, source)?;
    require_min_len(Field::Translation, translation)?;
    require_unique(entries, source, None)
}
