use std::collections::HashMap;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{ParseOrder, Row, TrackCandidate};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn generate_session_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Turns pasted text into rows, one per non-empty line.
///
/// Separator priority per line, first match wins: a literal `-` splits into
/// two trimmed halves assigned according to `order`; otherwise a standalone
/// case-insensitive `by` splits into song (left) and artist (right);
/// otherwise the whole line is the song. Lines where both halves come out
/// empty are dropped.
pub fn normalize_lines(text: &str, order: ParseOrder) -> Vec<Row> {
    let mut rows = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (song, artist) = if let Some((left, right)) = line.split_once('-') {
            let (left, right) = (left.trim(), right.trim());
            match order {
                ParseOrder::ArtistSong => (right, left),
                ParseOrder::SongArtist => (left, right),
            }
        } else if let Some(idx) = find_by_token(line) {
            (line[..idx].trim(), line[idx + 2..].trim())
        } else {
            (line, "")
        };

        if song.is_empty() && artist.is_empty() {
            continue;
        }

        rows.push(Row {
            song: song.to_string(),
            artist: artist.to_string(),
        });
    }

    rows
}

// Byte offset of the first "by" that stands alone as a word. ASCII search is
// enough since the token itself is ASCII; surrounding multi-byte characters
// never contain ASCII bytes.
fn find_by_token(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i + 2 <= bytes.len() {
        if bytes[i..i + 2].eq_ignore_ascii_case(b"by") {
            let before_ok = i == 0 || bytes[i - 1].is_ascii_whitespace();
            let after_ok = i + 2 == bytes.len() || bytes[i + 2].is_ascii_whitespace();
            if before_ok && after_ok {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}

/// Turns header-keyed CSV records into rows. Header names are trimmed and
/// lower-cased before lookup; only the `song` and `artist` columns are read.
/// A record is dropped only if both values end up empty.
pub fn normalize_csv(records: &[HashMap<String, String>]) -> Vec<Row> {
    records
        .iter()
        .filter_map(|record| {
            let mut song = "";
            let mut artist = "";
            for (key, value) in record {
                match key.trim().to_lowercase().as_str() {
                    "song" => song = value.trim(),
                    "artist" => artist = value.trim(),
                    _ => {}
                }
            }
            if song.is_empty() && artist.is_empty() {
                None
            } else {
                Some(Row {
                    song: song.to_string(),
                    artist: artist.to_string(),
                })
            }
        })
        .collect()
}

/// Reads CSV text into header-keyed records. The first non-empty line is the
/// header row; short records are padded with empty fields, extra fields are
/// dropped. Quoted fields may contain commas and doubled quotes.
pub fn csv_records(text: &str) -> Vec<HashMap<String, String>> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers = split_csv_line(header_line);

    lines
        .map(|line| {
            let fields = split_csv_line(line);
            headers
                .iter()
                .cloned()
                .zip(fields.into_iter().chain(std::iter::repeat(String::new())))
                .collect()
        })
        .collect()
}

/// Re-serializes rows to CSV with a `song,artist` header, the inverse of
/// [`csv_records`] + [`normalize_csv`].
pub fn rows_to_csv(rows: &[Row]) -> String {
    let mut out = String::from("song,artist\n");
    for row in rows {
        out.push_str(&csv_field(&row.song));
        out.push(',');
        out.push_str(&csv_field(&row.artist));
        out.push('\n');
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if quoted {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    quoted = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => quoted = true,
                ',' => fields.push(std::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
    }
    fields.push(field);
    fields
}

/// Picks the best candidate for a wanted song/artist pair, keeping the
/// candidates in remote relevance order.
///
/// Three tiers, first satisfying candidate wins:
/// 1. exact title match and at least one exact artist match
/// 2. title contains the wanted song and, when a wanted artist is given, at
///    least one artist contains it
/// 3. the first candidate
///
/// Comparison is case-insensitive and whitespace-trimmed. Returns `None`
/// only for an empty candidate list.
pub fn pick_best<'a>(
    candidates: &'a [TrackCandidate],
    wanted_song: &str,
    wanted_artist: &str,
) -> Option<&'a TrackCandidate> {
    let ws = norm(wanted_song);
    let wa = norm(wanted_artist);

    let exact = candidates.iter().find(|t| {
        norm(&t.name) == ws && t.artists.iter().any(|a| norm(&a.name) == wa)
    });
    if exact.is_some() {
        return exact;
    }

    let loose = candidates.iter().find(|t| {
        norm(&t.name).contains(&ws)
            && (wa.is_empty() || t.artists.iter().any(|a| norm(&a.name).contains(&wa)))
    });
    if loose.is_some() {
        return loose;
    }

    candidates.first()
}

fn norm(s: &str) -> String {
    s.trim().to_lowercase()
}
