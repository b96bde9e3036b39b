use std::collections::HashSet;

use crate::{
    spotify::TrackSearch,
    types::{MatchResult, MatchSummary, Row},
    utils,
};

/// One match run: per-row results, index-aligned with the input rows, and
/// the summary tallied over them.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub results: Vec<MatchResult>,
    pub summary: MatchSummary,
}

/// Matches every row against the catalog, strictly in input order.
///
/// Each row gets exactly one result at the same index. A remote failure is
/// captured into that row's `error` field and the run continues; only the
/// caller-supplied credential is a run-level concern (it must be validated
/// before calling, see the `/api/match` handler).
///
/// Duplicates are tracked by ISRC across the whole run: the first row whose
/// selected candidate carries a given code claims it, later rows with the
/// same code are flagged `duplicate`. Candidates without an ISRC are never
/// flagged.
pub async fn run_match<S: TrackSearch>(catalog: &S, rows: &[Row], token: &str) -> MatchOutcome {
    let mut seen_isrc: HashSet<String> = HashSet::new();
    let mut results: Vec<MatchResult> = Vec::with_capacity(rows.len());

    for row in rows {
        let song = row.song.trim();
        let artist = row.artist.trim();

        let candidates = match catalog.search_tracks(song, artist, token).await {
            Ok(candidates) => candidates,
            Err(e) => {
                results.push(MatchResult::miss(song, artist, Some(e.to_string())));
                continue;
            }
        };

        match utils::pick_best(&candidates, song, artist) {
            Some(best) => {
                let isrc = best.external_ids.isrc.clone();
                let duplicate = isrc
                    .as_ref()
                    .is_some_and(|code| !seen_isrc.insert(code.clone()));

                results.push(MatchResult {
                    input_song: song.to_string(),
                    input_artist: artist.to_string(),
                    found: true,
                    duplicate,
                    uri: Some(best.uri.clone()),
                    matched_song: Some(best.name.clone()),
                    matched_artist: Some(
                        best.artists
                            .iter()
                            .map(|a| a.name.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    ),
                    isrc,
                    id: Some(best.id.clone()),
                    error: None,
                });
            }
            None => results.push(MatchResult::miss(song, artist, None)),
        }
    }

    let summary = MatchSummary::tally(&results);
    MatchOutcome { results, summary }
}
