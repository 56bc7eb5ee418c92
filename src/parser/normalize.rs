//! Country-name reconciliation between the two upstream APIs.
//!
//! The epidemiological API and the competitions API spell a few countries
//! differently, and the epidemiological API reports the United Kingdom as
//! one entry while football competitions are organised per home nation.

use std::borrow::Cow;

/// Key holding worldwide totals rather than a country
pub const AGGREGATE_KEY: &str = "Global";

/// Epidemiological name -> stored name
pub static NAME_MAP: &[(&str, &str)] = &[("US", "United States"), ("Czechia", "Czech Republic")];

/// An entry whose constituent regions are stored instead of the entry itself
#[derive(Debug, PartialEq)]
pub struct Composite {
    pub key: &'static str,
    pub members: &'static [&'static str],
}

impl Composite {
    pub fn contains(&self, sub_key: &str) -> bool {
        self.members.contains(&sub_key)
    }
}

pub static COMPOSITES: &[Composite] = &[Composite {
    key: "United Kingdom",
    members: &["England", "Scotland", "Northern Ireland", "Wales"],
}];

/// How a top-level key of the epidemiological response is handled
#[derive(Debug, PartialEq)]
pub enum SourceKey<'a> {
    /// Worldwide totals, skipped
    Aggregate,
    /// Expanded into its member regions
    Composite(&'static Composite),
    /// A single country under its stored name
    Country(Cow<'a, str>),
}

/// Map a raw name through `NAME_MAP`, passing unknown names through
pub fn normalize_country(name: &str) -> Cow<'_, str> {
    NAME_MAP
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| Cow::Borrowed(*to))
        .unwrap_or(Cow::Borrowed(name))
}

pub fn classify(key: &str) -> SourceKey<'_> {
    if key == AGGREGATE_KEY {
        return SourceKey::Aggregate;
    }
    if let Some(composite) = COMPOSITES.iter().find(|c| c.key == key) {
        return SourceKey::Composite(composite);
    }
    SourceKey::Country(normalize_country(key))
}
