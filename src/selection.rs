//! Catalog Selector
//!
//! Narrows the catalog to the records matching a request, picks one and
//! reports its catalog-order neighbors for "play next/previous".
//!
//! Two paths:
//! - **Direct**: the request names a file or a title. Filters are ignored.
//! - **Filtered**: every non-empty filter is fuzzy-resolved against the
//!   distinct values of its column, then records matching *all* resolved
//!   values are kept. One match is picked as-is; several are picked at random.
//!
//! Neighbors are always computed against the full catalog, with wraparound.

use std::collections::BTreeMap;

use rand::Rng;
use tracing::{debug, info};

use crate::catalog::{Attribute, Catalog, CatalogRecord};
use crate::utils::fuzzy::{normalize_text, resolve, MatchResult, FILE_MIN_SCORE, TEXT_MIN_SCORE};

/// Attribute constraints for one request. Absent attributes are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeFilterSet {
    filters: BTreeMap<Attribute, String>,
}

impl AttributeFilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear a filter. Blank values clear it.
    pub fn set(&mut self, attribute: Attribute, value: Option<&str>) {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => {
                self.filters.insert(attribute, v.to_string());
            }
            None => {
                self.filters.remove(&attribute);
            }
        }
    }

    pub fn with(mut self, attribute: Attribute, value: &str) -> Self {
        self.set(attribute, Some(value));
        self
    }

    pub fn get(&self, attribute: Attribute) -> Option<&str> {
        self.filters.get(&attribute).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &str)> {
        self.filters.iter().map(|(a, v)| (*a, v.as_str()))
    }
}

/// What the caller asked for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionRequest {
    filters: AttributeFilterSet,
    direct_file_name: Option<String>,
    direct_title: Option<String>,
}

impl SelectionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filters(mut self, filters: AttributeFilterSet) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_file_name(mut self, file_name: Option<&str>) -> Self {
        self.direct_file_name = non_blank(file_name);
        self
    }

    pub fn with_title(mut self, title: Option<&str>) -> Self {
        self.direct_title = non_blank(title);
        self
    }

    pub fn filters(&self) -> &AttributeFilterSet {
        &self.filters
    }

    pub fn direct_file_name(&self) -> Option<&str> {
        self.direct_file_name.as_deref()
    }

    pub fn direct_title(&self) -> Option<&str> {
        self.direct_title.as_deref()
    }

    /// True when the request names an exact file or title
    pub fn is_direct(&self) -> bool {
        self.direct_file_name.is_some() || self.direct_title.is_some()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A picked record and its catalog-order neighbors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub record: CatalogRecord,
    /// Position of `record` in the full catalog
    pub index: usize,
    pub previous: CatalogRecord,
    pub next: CatalogRecord,
}

/// Result of a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionResult {
    Selected(Selection),
    NoMatch,
}

impl SelectionResult {
    pub fn selection(&self) -> Option<&Selection> {
        match self {
            SelectionResult::Selected(selection) => Some(selection),
            SelectionResult::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, SelectionResult::Selected(_))
    }
}

/// Selects records from a catalog snapshot
#[derive(Debug, Clone, Copy)]
pub struct CatalogSelector {
    /// Threshold for file-name lookups
    file_min_score: u8,
    /// Threshold for every other column
    text_min_score: u8,
}

impl Default for CatalogSelector {
    fn default() -> Self {
        Self::new(FILE_MIN_SCORE, TEXT_MIN_SCORE)
    }
}

impl CatalogSelector {
    pub fn new(file_min_score: u8, text_min_score: u8) -> Self {
        Self {
            file_min_score,
            text_min_score,
        }
    }

    fn min_score_for(&self, attribute: Attribute) -> u8 {
        match attribute {
            Attribute::FileName => self.file_min_score,
            _ => self.text_min_score,
        }
    }

    /// Select one record for `request`
    ///
    /// Never fails: an empty catalog, an unresolvable reference or an empty
    /// filtered set all give [`SelectionResult::NoMatch`].
    pub fn select<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        request: &SelectionRequest,
        rng: &mut R,
    ) -> SelectionResult {
        if catalog.is_empty() {
            debug!("Selection on empty catalog");
            return SelectionResult::NoMatch;
        }

        if request.is_direct() {
            return match self.locate_direct(catalog, request) {
                Some(index) => self.selection_at(catalog, index),
                None => {
                    debug!(
                        "Direct reference not found: file={:?} title={:?}",
                        request.direct_file_name(),
                        request.direct_title()
                    );
                    SelectionResult::NoMatch
                }
            };
        }

        let matches = self.filter(catalog, request.filters());
        let index = match matches.as_slice() {
            [] => return SelectionResult::NoMatch,
            [only] => *only,
            many => {
                debug!("{} tracks match, picking at random", many.len());
                many[rng.gen_range(0..many.len())]
            }
        };

        self.selection_at(catalog, index)
    }

    /// Catalog positions matching every filter, in catalog order
    ///
    /// An empty filter set matches the whole catalog.
    pub fn filter(&self, catalog: &Catalog, filters: &AttributeFilterSet) -> Vec<usize> {
        let mut resolved: Vec<(Attribute, String)> = Vec::with_capacity(filters.len());

        for (attribute, query) in filters.iter() {
            let values = catalog.distinct_values(attribute);
            if let Some(value) = same_text(&values, query) {
                debug!("{} '{}' -> '{}' (exact)", attribute, query, value);
                resolved.push((attribute, value.to_string()));
                continue;
            }

            match resolve(Some(query), &values, self.min_score_for(attribute)) {
                MatchResult::Found { value, score } => {
                    debug!("{} '{}' -> '{}' ({})", attribute, query, value, score);
                    resolved.push((attribute, value));
                }
                MatchResult::NoPreference => {}
                MatchResult::NotFound => {
                    debug!("No {} matching '{}'", attribute, query);
                    return Vec::new();
                }
            }
        }

        catalog
            .records()
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                resolved
                    .iter()
                    .all(|(attribute, value)| record.get(*attribute) == Some(value.as_str()))
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// File name first, then title; exact before fuzzy
    fn locate_direct(&self, catalog: &Catalog, request: &SelectionRequest) -> Option<usize> {
        if let Some(file_name) = request.direct_file_name() {
            if let Some(index) = self.locate_file_name(catalog, file_name) {
                return Some(index);
            }
        }

        let title = request.direct_title()?;
        if let Some(index) = first_with(catalog, Attribute::Title, title) {
            return Some(index);
        }

        let titles = catalog.distinct_values(Attribute::Title);
        if let MatchResult::Found { value, .. } = resolve(Some(title), &titles, self.text_min_score)
        {
            return first_with(catalog, Attribute::Title, &value);
        }

        // Titles are often missing from tags; the file name usually carries it
        self.locate_file_name(catalog, title)
    }

    fn locate_file_name(&self, catalog: &Catalog, file_name: &str) -> Option<usize> {
        if let Some(index) = catalog.position_of(file_name) {
            return Some(index);
        }

        let names: Vec<&str> = catalog
            .records()
            .iter()
            .map(|r| r.file_name.as_str())
            .collect();
        match resolve(Some(file_name), &names, self.file_min_score) {
            MatchResult::Found { value, .. } => catalog.position_of(&value),
            _ => None,
        }
    }

    fn selection_at(&self, catalog: &Catalog, index: usize) -> SelectionResult {
        let (record, (previous, next)) =
            match (catalog.get(index), catalog.neighbor_positions(index)) {
                (Some(record), Some(neighbors)) => (record, neighbors),
                _ => return SelectionResult::NoMatch,
            };

        let (previous, next) = match (catalog.get(previous), catalog.get(next)) {
            (Some(previous), Some(next)) => (previous.clone(), next.clone()),
            _ => return SelectionResult::NoMatch,
        };

        info!(
            "🎵 Selected '{}' (prev '{}', next '{}')",
            record.file_name, previous.file_name, next.file_name
        );

        SelectionResult::Selected(Selection {
            record: record.clone(),
            index,
            previous,
            next,
        })
    }
}

/// First value equal to `query` once both are normalized
fn same_text<'a>(values: &[&'a str], query: &str) -> Option<&'a str> {
    let query = normalize_text(query);
    values
        .iter()
        .copied()
        .find(|value| normalize_text(value) == query)
}

fn first_with(catalog: &Catalog, attribute: Attribute, value: &str) -> Option<usize> {
    catalog
        .records()
        .iter()
        .position(|r| r.get(attribute) == Some(value))
}
