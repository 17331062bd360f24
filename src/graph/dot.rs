//! Graphviz-subset reader.
//!
//! Line-oriented: each line either declares one edge or is ignored. Blank
//! lines, `#` comments and lines containing neither `->` nor `--` (block
//! headers, node declarations) are skipped, as are lines whose endpoints
//! cannot be extracted. `->` declares a directed edge, `--` a bidirectional
//! one. The weight comes from a `weight=`, `label=` or `w=` attribute,
//! falling back to the first bare numeric literal in the attribute block,
//! falling back to 1.0. Later edges with the same endpoints overwrite
//! earlier ones.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

use super::Graph;

struct RawEdge {
    from: String,
    to: String,
    weight: f64,
    bidirectional: bool,
}

impl Graph {
    /// Parses a graph from DOT-like text.
    ///
    /// Returns [`Error::EmptyGraph`] when no edge line survives parsing.
    pub fn from_dot(input: &str) -> Result<Self> {
        let mut edges = Vec::new();
        let mut label_set = BTreeSet::new();
        for line in input.lines() {
            if let Some(edge) = parse_edge_line(line) {
                label_set.insert(edge.from.clone());
                label_set.insert(edge.to.clone());
                edges.push(edge);
            }
        }
        if label_set.is_empty() {
            return Err(Error::EmptyGraph);
        }

        // BTreeSet iteration yields the labels already in sorted order,
        // which fixes the canonical index for a given label set.
        let labels: Vec<String> = label_set.into_iter().collect();
        let n = labels.len();
        let mut weights = vec![vec![f64::INFINITY; n]; n];
        for (i, row) in weights.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        for edge in &edges {
            if let (Ok(from), Ok(to)) = (
                labels.binary_search(&edge.from),
                labels.binary_search(&edge.to),
            ) {
                if from == to {
                    continue;
                }
                weights[from][to] = edge.weight;
                if edge.bidirectional {
                    weights[to][from] = edge.weight;
                }
            }
        }
        Ok(Graph::from_parts(labels, weights))
    }

    /// Reads and parses a graph from a file.
    pub fn from_dot_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_dot(&text)
    }
}

fn parse_edge_line(line: &str) -> Option<RawEdge> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (arrow, bidirectional) = match line.find("->") {
        Some(pos) => (pos, false),
        None => (line.find("--")?, true),
    };
    let from = strip_quotes(line[..arrow].trim());
    let rest = &line[arrow + 2..];
    let (to_part, attributes) = match rest.find('[') {
        Some(bracket) => (&rest[..bracket], Some(&rest[bracket..])),
        None => (rest, None),
    };
    let to_part = match to_part.find(';') {
        Some(semi) => &to_part[..semi],
        None => to_part,
    };
    let to = strip_quotes(to_part.trim());
    if from.is_empty() || to.is_empty() {
        return None;
    }
    let weight = attributes.and_then(parse_weight).unwrap_or(1.0);
    Some(RawEdge {
        from: from.to_string(),
        to: to.to_string(),
        weight,
        bidirectional,
    })
}

fn strip_quotes(token: &str) -> &str {
    let bytes = token.as_bytes();
    if bytes.len() >= 2
        && ((bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[bytes.len() - 1] == b'\''))
    {
        &token[1..token.len() - 1]
    } else {
        token
    }
}

/// Extracts the edge weight from an attribute block.
///
/// A `weight=`, `label=` or `w=` key wins; otherwise the first bare numeric
/// literal is used. Returns `None` when the block holds no usable number.
fn parse_weight(attributes: &str) -> Option<f64> {
    let bytes = attributes.as_bytes();

    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_alphabetic() || bytes[i] == b'_' {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            if matches!(&attributes[start..i], "weight" | "label" | "w") {
                let mut j = i;
                while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                if bytes.get(j) == Some(&b'=') {
                    j += 1;
                    while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                        j += 1;
                    }
                    if let Some(value) = scan_number(attributes, j) {
                        return Some(value);
                    }
                }
            }
        } else {
            i += 1;
        }
    }

    let mut i = 0;
    while i < bytes.len() {
        let starts_number = bytes[i].is_ascii_digit()
            || (matches!(bytes[i], b'+' | b'-' | b'.')
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit));
        let mid_word = i > 0
            && (bytes[i - 1].is_ascii_alphanumeric() || bytes[i - 1] == b'_' || bytes[i - 1] == b'.');
        if starts_number && !mid_word {
            if let Some(value) = scan_number(attributes, i) {
                return Some(value);
            }
        }
        i += 1;
    }
    None
}

/// Parses a floating-point literal starting at byte offset `start`:
/// optional sign, digits and/or a fraction, optional exponent.
fn scan_number(text: &str, start: usize) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = start;
    if end < bytes.len() && matches!(bytes[end], b'+' | b'-') {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            end = frac_end;
            has_digits = true;
        }
    }
    if !has_digits {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let digit_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digit_start {
            end = exp_end;
        }
    }
    text[start..end].parse().ok()
}
