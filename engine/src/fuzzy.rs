//! Title lookup and autocomplete.
//!
//! Scores blend Jaro-Winkler (rewards shared prefixes, which is how people
//! type titles) with normalized Levenshtein over normalized strings.

use std::{cmp::Ordering, collections::HashMap};
use strsim::{jaro_winkler, normalized_levenshtein};

const JARO_WEIGHT: f64 = 0.6;

/// How a title relates to the query, best kind first
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum MatchKind {
    Exact,
    Prefix,
    Substring,
    Fuzzy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub index: usize,
    pub title: String,
    pub kind: MatchKind,
    pub score: f64,
}

/// Lowercase, punctuation to spaces, single spaces between words
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn score(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    if a == b {
        return 1.0;
    }

    JARO_WEIGHT * jaro_winkler(&a, &b) + (1.0 - JARO_WEIGHT) * normalized_levenshtein(&a, &b)
}

#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    titles: Vec<String>,
    normalized: Vec<String>,
    // lowercased title => first row carrying it
    exact: HashMap<String, usize>,
}

impl TitleIndex {
    pub fn build<'a, I>(titles: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index = Self::default();

        for (i, title) in titles.into_iter().enumerate() {
            index
                .exact
                .entry(title.trim().to_lowercase())
                .or_insert(i);
            index.normalized.push(normalize(title));
            index.titles.push(title.to_owned());
        }

        index
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Exact case-insensitive title, first occurrence wins
    pub fn lookup(&self, query: &str) -> Option<usize> {
        self.exact.get(&query.trim().to_lowercase()).copied()
    }

    fn candidates(&self, query: &str) -> Vec<Suggestion> {
        let lowered = query.trim().to_lowercase();
        let normalized = normalize(query);
        if lowered.is_empty() {
            return Vec::new();
        }

        let mut found = Vec::new();
        for (i, title) in self.titles.iter().enumerate() {
            let title_lowered = title.trim().to_lowercase();

            // One entry per distinct title
            if self.exact.get(&title_lowered) != Some(&i) {
                continue;
            }

            let kind = if title_lowered == lowered {
                MatchKind::Exact
            } else if title_lowered.starts_with(&lowered)
                || (!normalized.is_empty() && self.normalized[i].starts_with(&normalized))
            {
                MatchKind::Prefix
            } else if title_lowered.contains(&lowered)
                || (!normalized.is_empty() && self.normalized[i].contains(&normalized))
            {
                MatchKind::Substring
            } else {
                MatchKind::Fuzzy
            };

            let score = if kind == MatchKind::Exact {
                1.0
            } else {
                score(query, title)
            };

            found.push(Suggestion {
                index: i,
                title: title.clone(),
                kind,
                score,
            });
        }

        found.sort_by(|a, b| {
            a.kind
                .cmp(&b.kind)
                .then_with(|| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal))
                .then_with(|| a.index.cmp(&b.index))
        });

        found
    }

    /// Autocomplete list: every prefix/substring hit, fuzzy ones above `cutoff`
    pub fn suggestions(&self, query: &str, limit: usize, cutoff: f64) -> Vec<Suggestion> {
        self.candidates(query)
            .into_iter()
            .filter(|s| s.kind != MatchKind::Fuzzy || s.score >= cutoff)
            .take(limit)
            .collect()
    }

    /// The single title a query most likely means
    pub fn resolve(&self, query: &str, cutoff: f64) -> Option<Suggestion> {
        if let Some(index) = self.lookup(query) {
            return Some(Suggestion {
                index,
                title: self.titles[index].clone(),
                kind: MatchKind::Exact,
                score: 1.0,
            });
        }

        self.candidates(query)
            .into_iter()
            .filter(|s| s.score >= cutoff)
            .max_by(|a, b| {
                b.kind
                    .cmp(&a.kind)
                    .then_with(|| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal))
                    .then_with(|| b.index.cmp(&a.index))
            })
    }
}
