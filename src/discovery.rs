use crate::error::{FinderError, Result};
use crate::github::SearchClient;
use crate::types::RepositorySummary;
use rand::Rng;
use std::ops::RangeInclusive;
use std::sync::Arc;
use tracing::{debug, info};
use url::form_urlencoded;

/// Results requested per search page.
pub const PER_PAGE: u32 = 30;

/// Pages a random pick may land on.
pub const PAGE_RANGE: RangeInclusive<u32> = 1..=10;

/// Raw filters as they arrive on the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RandomParams {
    pub language: Option<String>,
    pub stars: Option<String>,
}

impl RandomParams {
    /// Read filters from a raw query string. The first value of a repeated key
    /// wins, unknown keys are ignored and bad escapes decode lossily.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut params = RandomParams::default();
        for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            match key.as_ref() {
                "language" if params.language.is_none() => {
                    params.language = Some(value.into_owned());
                }
                "stars" if params.stars.is_none() => {
                    params.stars = Some(value.into_owned());
                }
                _ => {}
            }
        }
        params
    }
}

/// Validated search filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilters {
    pub language: String,
    pub min_stars: u64,
}

impl SearchFilters {
    pub fn new(language: impl Into<String>, min_stars: u64) -> Self {
        Self {
            language: language.into(),
            min_stars,
        }
    }

    /// Search qualifiers, e.g. `language:Rust stars:>=100`.
    pub fn query(&self) -> String {
        let mut qualifiers = Vec::with_capacity(2);
        if !self.language.is_empty() {
            qualifiers.push(format!("language:{}", self.language));
        }
        qualifiers.push(format!("stars:>={}", self.min_stars));
        qualifiers.join(" ")
    }
}

impl TryFrom<RandomParams> for SearchFilters {
    type Error = FinderError;

    fn try_from(params: RandomParams) -> Result<Self> {
        let raw_stars = params.stars.unwrap_or_default();
        let raw_stars = raw_stars.trim();
        let min_stars = if raw_stars.is_empty() {
            0
        } else {
            raw_stars
                .parse::<u64>()
                .map_err(|_| FinderError::InvalidStars(raw_stars.to_string()))?
        };

        Ok(SearchFilters::new(params.language.unwrap_or_default(), min_stars))
    }
}

pub fn random_page() -> u32 {
    rand::rng().random_range(PAGE_RANGE)
}

/// Take one item uniformly at random, or `None` when there is nothing to pick.
pub fn pick_random<T>(mut items: Vec<T>) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let index = rand::rng().random_range(0..items.len());
    Some(items.swap_remove(index))
}

/// Picks a random repository through a [`SearchClient`].
#[derive(Clone)]
pub struct Discovery {
    client: Arc<dyn SearchClient>,
}

impl Discovery {
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self { client }
    }

    pub async fn random_repository(&self, filters: &SearchFilters) -> Result<RepositorySummary> {
        let query = filters.query();
        let page = random_page();
        debug!(%query, page, "Discovering random repository");

        let search_page = self.client.search(&query, PER_PAGE, page).await?;
        let count = search_page.items.len();

        let repo = pick_random(search_page.items).ok_or(FinderError::NoResults)?;
        info!(page, candidates = count, repo = %repo.full_name, "Picked random repository");
        Ok(repo)
    }
}
