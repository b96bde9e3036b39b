use std::collections::HashMap;

use musicbuzz::types::{ExternalIds, ParseOrder, Row, TrackArtist, TrackCandidate};
use musicbuzz::utils::*;

// Helper function to create a test row
fn create_test_row(song: &str, artist: &str) -> Row {
    Row {
        song: song.to_string(),
        artist: artist.to_string(),
    }
}

// Helper function to create a test candidate
fn create_test_candidate(name: &str, artists: &[&str], isrc: Option<&str>) -> TrackCandidate {
    TrackCandidate {
        id: format!("{}_id", name),
        uri: format!("spotify:track:{}", name),
        name: name.to_string(),
        artists: artists
            .iter()
            .map(|a| TrackArtist {
                name: a.to_string(),
            })
            .collect(),
        external_ids: ExternalIds {
            isrc: isrc.map(str::to_string),
        },
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_generate_session_id() {
    let sid = generate_session_id();

    assert_eq!(sid.len(), 32);
    assert!(sid.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(sid, generate_session_id());
}

#[test]
fn test_normalize_lines_hyphen_artist_song() {
    let rows = normalize_lines("Post Malone - Circles", ParseOrder::ArtistSong);

    assert_eq!(rows, vec![create_test_row("Circles", "Post Malone")]);
}

#[test]
fn test_normalize_lines_hyphen_song_artist() {
    let rows = normalize_lines("Circles - Post Malone", ParseOrder::SongArtist);

    assert_eq!(rows, vec![create_test_row("Circles", "Post Malone")]);
}

#[test]
fn test_normalize_lines_hyphen_splits_into_two_halves() {
    // Only the first hyphen splits; the rest stays in the second half
    let rows = normalize_lines("AC - DC - Back in Black", ParseOrder::ArtistSong);

    assert_eq!(rows, vec![create_test_row("DC - Back in Black", "AC")]);
}

#[test]
fn test_normalize_lines_by_token() {
    let rows = normalize_lines("Blinding Lights by The Weeknd", ParseOrder::ArtistSong);

    assert_eq!(
        rows,
        vec![create_test_row("Blinding Lights", "The Weeknd")]
    );

    // Case-insensitive
    let rows = normalize_lines("Blinding Lights BY The Weeknd", ParseOrder::ArtistSong);
    assert_eq!(
        rows,
        vec![create_test_row("Blinding Lights", "The Weeknd")]
    );
}

#[test]
fn test_normalize_lines_by_token_without_artist() {
    // Nothing after "by" leaves the artist empty
    let rows = normalize_lines("Blinding Lights by", ParseOrder::ArtistSong);

    assert_eq!(rows, vec![create_test_row("Blinding Lights", "")]);
}

#[test]
fn test_normalize_lines_by_must_be_standalone() {
    // "by" inside a word is not a separator
    let rows = normalize_lines("Bye Bye Bye", ParseOrder::ArtistSong);

    assert_eq!(rows, vec![create_test_row("Bye Bye Bye", "")]);
}

#[test]
fn test_normalize_lines_separator_precedence() {
    // The hyphen rule must win over the "by" rule
    let rows = normalize_lines("A - B by C", ParseOrder::ArtistSong);

    assert_eq!(rows, vec![create_test_row("B by C", "A")]);
}

#[test]
fn test_normalize_lines_plain_line_is_song() {
    let rows = normalize_lines("Bohemian Rhapsody", ParseOrder::ArtistSong);

    assert_eq!(rows, vec![create_test_row("Bohemian Rhapsody", "")]);
}

#[test]
fn test_normalize_lines_drops_empty_lines() {
    let rows = normalize_lines("\n  \nCircles - Post Malone\n\t\n", ParseOrder::SongArtist);

    assert_eq!(rows.len(), 1);
}

#[test]
fn test_normalize_lines_never_emits_empty_row() {
    // A lone separator would produce two empty halves; the row is dropped
    let rows = normalize_lines(" - \nby\n", ParseOrder::ArtistSong);

    assert!(rows.is_empty());
}

#[test]
fn test_normalize_lines_end_to_end_example() {
    let rows = normalize_lines(
        "Post Malone - Circles\nBlinding Lights by The Weeknd",
        ParseOrder::ArtistSong,
    );

    assert_eq!(
        rows,
        vec![
            create_test_row("Circles", "Post Malone"),
            create_test_row("Blinding Lights", "The Weeknd"),
        ]
    );
}

#[test]
fn test_normalize_csv_reads_song_and_artist_columns() {
    let mut record = HashMap::new();
    record.insert(" Song ".to_string(), " Circles ".to_string());
    record.insert("ARTIST".to_string(), "Post Malone".to_string());
    record.insert("year".to_string(), "2019".to_string());

    let rows = normalize_csv(&[record]);

    // Header lookup is trimmed and lower-cased; values are trimmed
    assert_eq!(rows, vec![create_test_row("Circles", "Post Malone")]);
}

#[test]
fn test_normalize_csv_drops_record_only_when_both_empty() {
    let mut empty = HashMap::new();
    empty.insert("song".to_string(), "  ".to_string());
    empty.insert("artist".to_string(), String::new());

    let mut song_only = HashMap::new();
    song_only.insert("song".to_string(), "Circles".to_string());
    song_only.insert("artist".to_string(), String::new());

    let rows = normalize_csv(&[empty, song_only]);

    assert_eq!(rows, vec![create_test_row("Circles", "")]);
}

#[test]
fn test_csv_records_header_keyed() {
    let records = csv_records("song,artist\nCircles,Post Malone\nBlinding Lights,The Weeknd");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["song"], "Circles");
    assert_eq!(records[0]["artist"], "Post Malone");
    assert_eq!(records[1]["song"], "Blinding Lights");
}

#[test]
fn test_csv_records_pads_short_records() {
    let records = csv_records("song,artist\nCircles");

    assert_eq!(records[0]["song"], "Circles");
    assert_eq!(records[0]["artist"], "");
}

#[test]
fn test_csv_records_quoted_fields() {
    let records = csv_records("song,artist\n\"Don't Stop Me Now, Again\",\"The \"\"Band\"\"\"");

    assert_eq!(records[0]["song"], "Don't Stop Me Now, Again");
    assert_eq!(records[0]["artist"], "The \"Band\"");
}

#[test]
fn test_csv_round_trip() {
    let rows = vec![
        create_test_row("Circles", "Post Malone"),
        create_test_row("Don't Stop, Believing", "Journey"),
        create_test_row("Bohemian Rhapsody", ""),
    ];

    // Re-serializing and re-normalizing must give back the same sequence
    let csv = rows_to_csv(&rows);
    let round_tripped = normalize_csv(&csv_records(&csv));

    assert_eq!(round_tripped, rows);
}

#[test]
fn test_pick_best_exact_match_wins() {
    let candidates = vec![
        create_test_candidate("Circles (Live)", &["Post Malone"], None),
        create_test_candidate("Circles", &["Post Malone"], None),
    ];

    let best = pick_best(&candidates, "Circles", "Post Malone").unwrap();
    assert_eq!(best.name, "Circles");
}

#[test]
fn test_pick_best_exact_beats_loose_in_relevance_order() {
    // Both candidates satisfy the loose tier; the exact one must win even
    // though it comes second
    let candidates = vec![
        create_test_candidate("Circles", &["Post Malone"], None),
        create_test_candidate("Circles (Live)", &["Post Malone"], None),
    ];

    let best = pick_best(&candidates, "Circles", "Post Malone").unwrap();
    assert_eq!(best.name, "Circles");
}

#[test]
fn test_pick_best_loose_contains() {
    let candidates = vec![
        create_test_candidate("Something Else", &["Somebody"], None),
        create_test_candidate("Circles - Remastered", &["Post Malone & Friends"], None),
    ];

    let best = pick_best(&candidates, "Circles", "Post Malone").unwrap();
    assert_eq!(best.name, "Circles - Remastered");
}

#[test]
fn test_pick_best_loose_artist_vacuous_when_empty() {
    let candidates = vec![
        create_test_candidate("Another Track", &["Somebody"], None),
        create_test_candidate("Circles (Acoustic)", &["Whoever"], None),
    ];

    // No wanted artist: the title-contains rule alone decides
    let best = pick_best(&candidates, "Circles", "").unwrap();
    assert_eq!(best.name, "Circles (Acoustic)");
}

#[test]
fn test_pick_best_falls_back_to_first() {
    let candidates = vec![
        create_test_candidate("Totally Different", &["Other"], None),
        create_test_candidate("Also Unrelated", &["Other"], None),
    ];

    let best = pick_best(&candidates, "Circles", "Post Malone").unwrap();
    assert_eq!(best.name, "Totally Different");
}

#[test]
fn test_pick_best_empty_candidates() {
    assert!(pick_best(&[], "Circles", "Post Malone").is_none());
}

#[test]
fn test_pick_best_case_and_whitespace_insensitive() {
    let candidates = vec![create_test_candidate("  CIRCLES ", &[" post malone "], None)];

    let best = pick_best(&candidates, "circles", "Post Malone").unwrap();
    assert_eq!(best.name, "  CIRCLES ");
}
