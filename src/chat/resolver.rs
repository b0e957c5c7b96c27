//! Location Resolution Module
//!
//! Resolves the free-text location from an intent into a single provider
//! candidate. Candidates are scored additively and the highest score wins;
//! ties keep the candidate the provider listed first.
//!
//! Known gap: the explicit-country hint is whatever follows the last comma,
//! unvalidated, so "Mountain View, CA" treats "ca" as a country and the
//! preferred-country bonus is switched off for that query.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::alias::AliasTable;
use crate::Result;
use crate::models::{LocationCandidate, ResolvedLocation};
use crate::weather::WeatherProvider;

const EXACT_NAME_BONUS: i32 = 6;
const NAME_PREFIX_BONUS: i32 = 3;
const EXPLICIT_COUNTRY_BONUS: i32 = 5;
const PREFERRED_COUNTRY_BONUS: i32 = 4;
const REGION_PREFIX_BONUS: i32 = 1;

/// Below every real score (scores are never negative), so the first candidate always beats it
const NO_MATCH_SCORE: i32 = -1;

/// Outcome of a resolution attempt that reached the provider successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedLocation),
    /// Neither the raw query nor its alias produced a candidate
    NotFound {
        /// The location exactly as the user supplied it
        query: String,
    },
}

/// Service for resolving location phrases to coordinates
#[derive(Debug, Clone)]
pub struct LocationResolver {
    aliases: Arc<AliasTable>,
    preferred_country: Option<String>,
}

impl LocationResolver {
    pub fn new(aliases: Arc<AliasTable>, preferred_country: Option<String>) -> Self {
        Self {
            aliases,
            preferred_country,
        }
    }

    /// Country used to break ties when the query names none
    #[must_use]
    pub fn preferred_country(&self) -> Option<&str> {
        self.preferred_country.as_deref()
    }

    /// Search for `raw`, retry once with its alias when nothing comes back, then pick the best candidate.
    ///
    /// Provider faults propagate as errors; an unknown place is `Ok(Resolution::NotFound)`.
    #[instrument(skip(self, provider))]
    pub async fn resolve(&self, provider: &dyn WeatherProvider, raw: &str) -> Result<Resolution> {
        debug!("Resolving location: {}", raw);

        let mut candidates = provider.search(raw).await?;

        if candidates.is_empty() {
            if let Some(canonical) = self.aliases.lookup(raw) {
                info!("No results for '{}', retrying with alias '{}'", raw, canonical);
                candidates = provider.search(canonical).await?;
            }
        }

        match select_best(raw, &candidates, self.preferred_country.as_deref()) {
            Some(best) => {
                let resolved = ResolvedLocation::from(best);
                info!(
                    "Resolved '{}' to {} ({}) out of {} candidates",
                    raw,
                    resolved.label,
                    resolved.query_key,
                    candidates.len()
                );
                Ok(Resolution::Resolved(resolved))
            }
            None => {
                warn!("Location not found: {}", raw);
                Ok(Resolution::NotFound {
                    query: raw.to_string(),
                })
            }
        }
    }
}

/// Country hint after the last comma, trimmed and lower-cased
#[must_use]
pub fn explicit_country(query: &str) -> Option<String> {
    let (_, after) = query.rsplit_once(',')?;
    let country = after.trim().to_lowercase();
    (!country.is_empty()).then_some(country)
}

/// Additive match score of `candidate` against the lower-cased, trimmed `query`
#[must_use]
pub fn score(
    query: &str,
    candidate: &LocationCandidate,
    explicit_country: Option<&str>,
    preferred_country: Option<&str>,
) -> i32 {
    let name = candidate.name.trim().to_lowercase();
    let region = candidate.region.trim().to_lowercase();
    let country = candidate.country.trim().to_lowercase();

    let mut total = 0;
    if name == query {
        total += EXACT_NAME_BONUS;
    }
    if name.starts_with(query) {
        total += NAME_PREFIX_BONUS;
    }
    match explicit_country {
        Some(explicit) if country == explicit => total += EXPLICIT_COUNTRY_BONUS,
        Some(_) => {}
        None => {
            if preferred_country.is_some_and(|preferred| country == preferred) {
                total += PREFERRED_COUNTRY_BONUS;
            }
        }
    }
    if !region.is_empty() && region.starts_with(query) {
        total += REGION_PREFIX_BONUS;
    }
    total
}

/// Highest-scoring candidate, earliest on ties.
///
/// Starting from [`NO_MATCH_SCORE`] means a non-empty list always yields a
/// candidate: with nothing to distinguish them, the first one wins.
#[must_use]
pub fn select_best<'a>(
    query: &str,
    candidates: &'a [LocationCandidate],
    preferred_country: Option<&str>,
) -> Option<&'a LocationCandidate> {
    let query_lower = query.trim().to_lowercase();
    let explicit = explicit_country(query);
    let preferred = preferred_country
        .map(|country| country.trim().to_lowercase())
        .filter(|country| !country.is_empty());

    let mut best = None;
    let mut best_score = NO_MATCH_SCORE;

    for candidate in candidates {
        let candidate_score = score(
            &query_lower,
            candidate,
            explicit.as_deref(),
            preferred.as_deref(),
        );
        debug!("Candidate {} scored {}", candidate.label(), candidate_score);
        if candidate_score > best_score {
            best = Some(candidate);
            best_score = candidate_score;
        }
    }

    best
}
