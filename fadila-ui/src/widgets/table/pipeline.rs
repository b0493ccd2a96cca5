//! Search and sort pipeline.

use std::fmt;
use std::sync::Arc;

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use super::row::TableRow;
use super::sort::{SortDirection, SortState};

type Predicate<T> = dyn Fn(&T, &str) -> bool + Send + Sync;

/// How rows are matched against the search query.
pub enum SearchFilter<T> {
    /// Case-insensitive substring match on every field's string form.
    Contains,
    /// Fuzzy match on the row's fields joined by spaces.
    Fuzzy,
    /// Caller-supplied predicate `(row, query) -> bool`.
    Custom(Arc<Predicate<T>>),
}

impl<T> SearchFilter<T> {
    /// Wrap a custom predicate.
    pub fn custom(f: impl Fn(&T, &str) -> bool + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }
}

impl<T> Default for SearchFilter<T> {
    fn default() -> Self {
        Self::Contains
    }
}

impl<T> Clone for SearchFilter<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Contains => Self::Contains,
            Self::Fuzzy => Self::Fuzzy,
            Self::Custom(f) => Self::Custom(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for SearchFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains => f.write_str("Contains"),
            Self::Fuzzy => f.write_str("Fuzzy"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Default predicate: some field contains the query, ignoring case.
pub fn contains_match<T: TableRow + ?Sized>(row: &T, query: &str) -> bool {
    let needle = query.to_lowercase();
    row.values().iter().any(|v| v.contains_ignore_case(&needle))
}

struct FuzzyMatcher {
    matcher: Matcher,
    pattern: Pattern,
    buf: Vec<char>,
}

impl FuzzyMatcher {
    fn new(query: &str) -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            pattern: Pattern::new(
                query,
                CaseMatching::Ignore,
                Normalization::Smart,
                AtomKind::Fuzzy,
            ),
            buf: Vec::new(),
        }
    }

    fn matches<T: TableRow>(&mut self, row: &T) -> bool {
        let haystack = row
            .values()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        let haystack = Utf32Str::new(&haystack, &mut self.buf);
        self.pattern.score(haystack, &mut self.matcher).is_some()
    }
}

/// Indices into `data` of the rows to display, in display order.
///
/// Filters when `query` is non-empty, then stable-sorts by the active
/// column. Ties keep their relative input order.
pub(crate) fn run<T: TableRow>(
    data: &[T],
    query: &str,
    filter: &SearchFilter<T>,
    sort: &SortState,
) -> Vec<usize> {
    let mut order: Vec<usize> = if query.is_empty() {
        (0..data.len()).collect()
    } else {
        match filter {
            SearchFilter::Contains => (0..data.len())
                .filter(|&i| contains_match(&data[i], query))
                .collect(),
            SearchFilter::Fuzzy => {
                let mut fuzzy = FuzzyMatcher::new(query);
                (0..data.len()).filter(|&i| fuzzy.matches(&data[i])).collect()
            }
            SearchFilter::Custom(predicate) => {
                (0..data.len()).filter(|&i| (**predicate)(&data[i], query)).collect()
            }
        }
    };

    if let (Some(key), Some(direction)) = (sort.column(), sort.direction()) {
        let mut keyed: Vec<_> = order.iter().map(|&i| (i, data[i].field(key))).collect();
        keyed.sort_by(|(_, a), (_, b)| match direction {
            SortDirection::Ascending => a.compare(b),
            SortDirection::Descending => b.compare(a),
        });
        order = keyed.into_iter().map(|(i, _)| i).collect();
    }

    order
}
