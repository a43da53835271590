use std::{collections::HashSet, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::search::PoiSearchError;

/// how a row's category tags are compared with the (lower-cased) filter set.
///
/// tags are stored with their original case, e.g. "Cafe", while filter tokens
/// are always lower-cased, so the two policies give different answers on mixed
/// case data.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CategoryMatching {
    /// trim and lower-case each tag before looking it up. the tag returned to
    /// the caller keeps its stored form.
    #[default]
    CaseInsensitive,
    /// look the stored tag up as-is.
    Exact,
}

/// compiled `categories` request parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// no categories supplied, every row passes
    MatchAll,
    /// a row passes if any of its tags is in the set
    AnyOf(HashSet<String>),
}

impl CategoryFilter {
    /// compiles a comma-separated category list. an empty string means
    /// "no filter", while an empty token inside a list is an error.
    pub fn compile(raw: &str) -> Result<Self, PoiSearchError> {
        if raw.is_empty() {
            return Ok(CategoryFilter::MatchAll);
        }

        let mut categories = HashSet::new();
        for token in raw.split(',') {
            let token = token.trim();
            if token.is_empty() {
                return Err(PoiSearchError::InvalidCategories(String::from(
                    "category cannot be an empty string",
                )));
            }
            categories.insert(token.to_lowercase());
        }

        Ok(CategoryFilter::AnyOf(categories))
    }

    pub fn is_match_all(&self) -> bool {
        matches!(self, CategoryFilter::MatchAll)
    }

    pub fn matches(&self, tags: &[String], matching: CategoryMatching) -> bool {
        match self {
            CategoryFilter::MatchAll => true,
            CategoryFilter::AnyOf(categories) => tags.iter().any(|tag| match matching {
                CategoryMatching::CaseInsensitive => {
                    categories.contains(&tag.trim().to_lowercase())
                }
                CategoryMatching::Exact => categories.contains(tag.as_str()),
            }),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = PoiSearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryFilter::compile(s)
    }
}
