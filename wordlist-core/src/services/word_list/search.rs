use crate::model::entry::WordEntry;

use super::normalize::{char_len, fold};

/// Terms shorter than this do not filter at all.
pub const SEARCH_MIN_CHARS: usize = 3;

pub fn filter<'a, I>(entries: I, term: &str) -> Vec<&'a WordEntry>
where
    I: IntoIterator<Item = &'a WordEntry>,
{
    let needle = fold(term);
    if char_len(&needle) < SEARCH_MIN_CHARS {
        return entries.into_iter().collect();
    }

    entries
        .into_iter()
        .filter(|e| fold(&e.source_term).contains(&needle) || fold(&e.translated_term).contains(&needle))
        .collect()
}

/// Table order: newest (highest id) first.
pub fn sort_for_display(entries: &mut [WordEntry]) {
    entries.sort_by(|a, b| b.id.cmp(&a.id));
}
