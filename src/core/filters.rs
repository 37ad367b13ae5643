use crate::models::{Gender, LibraryEntry};

/// Select the entries uploaded for a given feature context
///
/// Each context's candidate pool is strictly its own: an entry tagged
/// "AI Search" never appears in an "AI Profile" pool, and vice versa.
#[inline]
pub fn entries_for_purpose<'a>(entries: &'a [LibraryEntry], purpose: &str) -> Vec<&'a LibraryEntry> {
    entries
        .iter()
        .filter(|entry| entry.uploaded_for == purpose)
        .collect()
}

/// Filter a candidate pool to the opposite gender of the child
///
/// Returns the eligible entries plus how many were filtered out. When the
/// child's gender is absent or unrecognized no filtering is applied and the
/// full pool passes through; this is a permissive default, not a failure.
/// When a target gender is known, candidates with no parsed gender are
/// excluded.
#[inline]
pub fn filter_by_gender<'a>(
    child_gender: Option<Gender>,
    entries: Vec<&'a LibraryEntry>,
) -> (Vec<&'a LibraryEntry>, usize) {
    let Some(child_gender) = child_gender else {
        return (entries, 0);
    };

    let target = child_gender.opposite();
    let total = entries.len();
    let eligible: Vec<&LibraryEntry> = entries
        .into_iter()
        .filter(|entry| entry.parsed_gender() == Some(target))
        .collect();
    let filtered_out = total - eligible.len();

    (eligible, filtered_out)
}
