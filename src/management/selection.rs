use crate::types::MatchResult;

/// Default inclusion state for a fresh match run: a row starts included iff
/// it was found and is not a duplicate. The state is index-aligned with the
/// results and replaced wholesale by the next run.
pub fn seed(results: &[MatchResult]) -> Vec<bool> {
    results.iter().map(|r| r.found && !r.duplicate).collect()
}

/// Flips exactly one entry; out-of-range indices are ignored.
pub fn toggle(state: &mut [bool], index: usize) {
    if let Some(slot) = state.get_mut(index) {
        *slot = !*slot;
    }
}

/// The URIs of the included rows, preserving index order. Rows without a
/// URI are skipped even when marked included.
pub fn selected_uris(state: &[bool], results: &[MatchResult]) -> Vec<String> {
    state
        .iter()
        .zip(results)
        .filter(|(included, _)| **included)
        .filter_map(|(_, result)| result.uri.clone())
        .collect()
}
