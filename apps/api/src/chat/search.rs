//! Paragraph fuzzy index, built fresh per request over a resume's
//! paragraphs and queried with typo-tolerant token matching.
//!
//! Scoring is dissimilarity: 0.0 is a perfect match, anything above
//! `SCORE_THRESHOLD` is discarded. Matching is location-agnostic; a hit
//! anywhere in the paragraph counts the same.

use std::cmp::Ordering;

use serde::Serialize;
use strsim::jaro_winkler;

use crate::models::resume::Paragraph;

/// Permissive: moderately dissimilar strings still match. Tunable, not a
/// hard contract.
pub const SCORE_THRESHOLD: f64 = 0.6;
/// Query tokens shorter than this are ignored.
pub const MIN_TOKEN_LEN: usize = 3;

/// A ranked match. Lower score = better match.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub text: String,
    pub order: i32,
    pub score: f64,
}

pub struct ParagraphIndex<'a> {
    paragraphs: &'a [Paragraph],
}

impl<'a> ParagraphIndex<'a> {
    pub fn new(paragraphs: &'a [Paragraph]) -> Self {
        Self { paragraphs }
    }

    /// Up to `limit` hits, best first, ties broken by paragraph order.
    /// An empty query or empty paragraph set yields an empty list.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || self.paragraphs.is_empty() {
            return Vec::new();
        }

        let query_tokens: Vec<&str> = tokenize(&needle)
            .filter(|token| token.len() >= MIN_TOKEN_LEN)
            .collect();

        let mut hits: Vec<SearchHit> = self
            .paragraphs
            .iter()
            .filter_map(|paragraph| {
                score_paragraph(&needle, &query_tokens, &paragraph.text).map(|score| SearchHit {
                    text: paragraph.text.clone(),
                    order: paragraph.order,
                    score,
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(Ordering::Equal)
                .then(a.order.cmp(&b.order))
        });
        hits.truncate(limit);
        hits
    }
}

/// Dissimilarity of one paragraph against the query, or None when the
/// paragraph misses the threshold.
fn score_paragraph(needle: &str, query_tokens: &[&str], text: &str) -> Option<f64> {
    let haystack = text.to_lowercase();
    if haystack.contains(needle) {
        return Some(0.0);
    }
    if query_tokens.is_empty() {
        return None;
    }

    let haystack_tokens: Vec<&str> = tokenize(&haystack).collect();
    if haystack_tokens.is_empty() {
        return None;
    }

    let total: f64 = query_tokens
        .iter()
        .map(|query_token| {
            haystack_tokens
                .iter()
                .map(|haystack_token| token_similarity(query_token, haystack_token))
                .fold(0.0, f64::max)
        })
        .sum();

    let score = 1.0 - total / query_tokens.len() as f64;
    (score <= SCORE_THRESHOLD).then_some(score)
}

fn token_similarity(query: &str, candidate: &str) -> f64 {
    if query == candidate {
        1.0
    } else if candidate.contains(query) || query.contains(candidate) {
        0.9
    } else {
        jaro_winkler(query, candidate)
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
}
