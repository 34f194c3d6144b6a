//! Delimited-text parser for flashcard imports.
//!
//! # Format
//! ```text
//! Question,Answer
//! What is Rust?,A systems programming language.
//! "Which is prime? A) 4 B) 6 C) 7",C
//! ```
//!
//! The delimiter (tab, comma, semicolon or pipe) is sniffed from the first
//! non-blank line. A header row is recognised by its column names; without
//! one the first two columns are used.

use std::sync::OnceLock;

use csv::{ReaderBuilder, StringRecord, Trim};
use regex::Regex;

use crate::error::{ParseError, Result};
use crate::types::Record;

const QUESTION_KEYS: &[&str] = &["question", "q", "front", "term", "prompt", "word"];
const ANSWER_KEYS: &[&str] = &["answer", "a", "back", "definition", "response", "meaning"];

/// Candidate delimiters, in tie-break order.
const DELIMITERS: &[u8] = b"\t,;|";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse delimited text into records.
pub fn parse(content: &str) -> Result<Vec<Record>> {
    parse_bytes(content.as_bytes())
}

/// Parse raw file bytes into records. Invalid UTF-8 is reported as malformed input.
pub fn parse_bytes(content: &[u8]) -> Result<Vec<Record>> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    if content.iter().all(u8::is_ascii_whitespace) {
        return Err(ParseError::EmptyFile);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(sniff_delimiter(content))
        .from_reader(content);

    let mut rows = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.iter().any(|cell| !cell.is_empty()) {
            rows.push(row);
        }
    }

    let Some(first) = rows.first() else {
        return Err(ParseError::EmptyFile);
    };
    let columns = Columns::detect(first);
    let body = if columns.has_header { &rows[1..] } else { &rows[..] };

    let records: Vec<Record> = body.iter().filter_map(|row| columns.record(row)).collect();
    if records.is_empty() {
        return Err(ParseError::NoRecords { rows: rows.len() });
    }
    Ok(records)
}

/// Column layout of the input.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Columns {
    question: usize,
    answer: usize,
    has_header: bool,
}

impl Columns {
    /// A lone one-letter key (`q`, `a`) is not enough to call the row a header;
    /// multiple-choice decks routinely answer with a bare `A`.
    fn detect(first: &StringRecord) -> Self {
        let question = first.iter().position(|cell| is_key(cell, QUESTION_KEYS));
        let answer = first.iter().position(|cell| is_key(cell, ANSWER_KEYS));
        let named = |i: usize| first.get(i).is_some_and(|cell| normalize_key(cell).len() > 1);

        match (question, answer) {
            (Some(question), Some(answer)) => Self {
                question,
                answer,
                has_header: true,
            },
            (Some(question), None) if named(question) => Self {
                question,
                answer: other_column(question),
                has_header: true,
            },
            (None, Some(answer)) if named(answer) => Self {
                question: other_column(answer),
                answer,
                has_header: true,
            },
            _ => Self {
                question: 0,
                answer: 1,
                has_header: false,
            },
        }
    }

    /// Build a record from a data row; rows missing either side are dropped.
    fn record(&self, row: &StringRecord) -> Option<Record> {
        let question = row.get(self.question).unwrap_or_default();
        let answer = row.get(self.answer).unwrap_or_default();
        if question.is_empty() || answer.is_empty() {
            return None;
        }
        Some(Record::new(format_choices(question), format_choices(answer)))
    }
}

fn other_column(taken: usize) -> usize {
    if taken == 0 {
        1
    } else {
        0
    }
}

fn normalize_key(cell: &str) -> String {
    cell.chars()
        .filter(|c| !matches!(*c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_key(cell: &str, keys: &[&str]) -> bool {
    keys.contains(&normalize_key(cell).as_str())
}

fn sniff_delimiter(content: &[u8]) -> u8 {
    let line = content
        .split(|&b| b == b'\n')
        .find(|line| !line.iter().all(u8::is_ascii_whitespace))
        .unwrap_or_default();

    let mut best = (b',', 0);
    for &delimiter in DELIMITERS {
        let count = line.iter().filter(|&&b| b == delimiter).count();
        if count > best.1 {
            best = (delimiter, count);
        }
    }
    best.0
}

fn choice_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(r"(?:^|\s+)(\([A-Fa-f]\)|[A-F][.)]|[a-f]\))\s+").expect("valid marker pattern")
    })
}

/// Put multiple-choice options (`A) ...`, `B. ...`, `(c) ...`) on their own lines.
///
/// Only applied when at least options A and B are present.
pub fn format_choices(text: &str) -> String {
    let marker = choice_marker();
    let letters: Vec<char> = marker
        .captures_iter(text)
        .filter_map(|caps| caps[1].chars().find(char::is_ascii_alphabetic))
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if !(letters.contains(&'A') && letters.contains(&'B')) {
        return text.to_string();
    }

    marker
        .replace_all(text, |caps: &regex::Captures<'_>| {
            if caps.get(0).map_or(0, |m| m.start()) == 0 {
                format!("{} ", &caps[1])
            } else {
                format!("\n{} ", &caps[1])
            }
        })
        .into_owned()
}
