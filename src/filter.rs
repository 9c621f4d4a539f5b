//! Filtering: which images match the active criteria.
//!
//! Filtering is a pure function over an ordered path list, the criteria, and
//! an assignment view. The caller picks the view (live or suppression
//! snapshot); the engine never chooses it. Result order follows input order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::AssignmentMap;

/// Sentinel filter value matching images with zero assignments.
pub const UNCATEGORIZED_SENTINEL: &str = "uncategorized";

/// Typed decode of the raw category-filter string from the UI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Empty string: no category filtering.
    #[default]
    All,
    /// The `"uncategorized"` sentinel: images with zero assignments.
    Uncategorized,
    /// Any other value: images carrying this category id.
    Id(String),
}

impl CategoryFilter {
    /// Decode the raw UI value once, at the boundary.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" => CategoryFilter::All,
            UNCATEGORIZED_SENTINEL => CategoryFilter::Uncategorized,
            id => CategoryFilter::Id(id.to_string()),
        }
    }

    /// Whether a category filter is active (anything but [`All`]).
    ///
    /// [`All`]: CategoryFilter::All
    pub fn is_active(&self) -> bool {
        !matches!(self, CategoryFilter::All)
    }
}

/// Filename matching operator.
///
/// Unrecognized raw values decode to [`Unknown`], which passes every image
/// (the tool's long-standing permissive default, preserved).
///
/// [`Unknown`]: NameOperator::Unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NameOperator {
    /// Filename contains the pattern.
    #[default]
    Contains,
    /// Filename starts with the pattern.
    StartsWith,
    /// Filename ends with the pattern.
    EndsWith,
    /// Filename equals the pattern.
    Exact,
    /// Any unrecognized operator; matches everything.
    #[serde(other)]
    Unknown,
}

/// Size criterion, interpreted entirely by the file-metadata collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeCriteria {
    /// Comparison operator name (e.g. `"gt"`, `"lt"`, `"between"`).
    pub operator: String,
    /// Primary byte value.
    pub value: u64,
    /// Secondary byte value for range operators.
    pub value2: Option<u64>,
}

/// The active rule set used to compute the visible image subset.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Category stage.
    pub category: CategoryFilter,
    /// Filename pattern; empty skips the name stage.
    pub name_pattern: String,
    /// Filename operator.
    pub name_operator: NameOperator,
    /// Whether name matching is case-sensitive.
    pub case_sensitive: bool,
    /// Size stage; `None` skips it.
    pub size: Option<SizeCriteria>,
}

impl FilterCriteria {
    /// Criteria that pass every image.
    pub fn pass_all() -> Self {
        Self::default()
    }

    /// Criteria filtering on a raw category value (`""`, the uncategorized
    /// sentinel, or a category id).
    pub fn for_category(raw: &str) -> Self {
        Self {
            category: CategoryFilter::parse(raw),
            ..Self::default()
        }
    }
}

/// File-size metadata collaborator consumed by the size stage.
pub trait SizeProvider {
    /// Whether `path` satisfies the criterion. Semantics of the operator are
    /// the collaborator's business; the engine only consumes the boolean.
    fn size_matches(&self, path: &str, criteria: &SizeCriteria) -> bool;
}

/// Path → byte-size index, the bundled [`SizeProvider`].
///
/// Understands `gt`/`ge`/`lt`/`le`/`eq`/`between`; unknown operators and
/// paths with no recorded size pass (tolerant default).
#[derive(Debug, Clone, Default)]
pub struct SizeIndex {
    sizes: HashMap<String, u64>,
}

impl SizeIndex {
    /// Build an index from `(path, size)` pairs.
    pub fn new(entries: impl IntoIterator<Item = (String, u64)>) -> Self {
        Self {
            sizes: entries.into_iter().collect(),
        }
    }

    /// Record or update a single size.
    pub fn insert(&mut self, path: impl Into<String>, size: u64) {
        self.sizes.insert(path.into(), size);
    }
}

impl SizeProvider for SizeIndex {
    fn size_matches(&self, path: &str, criteria: &SizeCriteria) -> bool {
        let Some(&size) = self.sizes.get(path) else {
            return true;
        };
        match criteria.operator.as_str() {
            "gt" => size > criteria.value,
            "ge" => size >= criteria.value,
            "lt" => size < criteria.value,
            "le" => size <= criteria.value,
            "eq" => size == criteria.value,
            "between" => {
                let upper = criteria.value2.unwrap_or(u64::MAX);
                size >= criteria.value && size <= upper
            }
            _ => true,
        }
    }
}

/// Drop identifiers that are not genuinely non-empty strings.
///
/// Boundary adapter for untrusted path lists: empty and whitespace-only
/// entries are removed, never coerced, so the engine can assume well-formed
/// paths from here on.
pub fn sanitize_paths<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    raw.into_iter()
        .map(Into::into)
        .filter(|p| !p.trim().is_empty())
        .collect()
}

/// Compute the ordered subset of `paths` matching `criteria` against the
/// given assignment view.
pub fn filtered_paths(
    paths: &[String],
    criteria: &FilterCriteria,
    view: &AssignmentMap,
    sizes: &dyn SizeProvider,
) -> Vec<String> {
    paths
        .iter()
        .filter(|path| matches_category(path, &criteria.category, view))
        .filter(|path| matches_name(path, criteria))
        .filter(|path| match &criteria.size {
            Some(size) => sizes.size_matches(path, size),
            None => true,
        })
        .cloned()
        .collect()
}

fn matches_category(path: &str, filter: &CategoryFilter, view: &AssignmentMap) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Uncategorized => view.get(path).is_none_or(|list| list.is_empty()),
        CategoryFilter::Id(id) => view
            .get(path)
            .is_some_and(|list| list.iter().any(|a| &a.category_id == id)),
    }
}

fn matches_name(path: &str, criteria: &FilterCriteria) -> bool {
    if criteria.name_pattern.is_empty() {
        return true;
    }
    let name = base_filename(path);
    let (name, pattern) = if criteria.case_sensitive {
        (name.to_string(), criteria.name_pattern.clone())
    } else {
        (name.to_lowercase(), criteria.name_pattern.to_lowercase())
    };
    match criteria.name_operator {
        NameOperator::Contains => name.contains(&pattern),
        NameOperator::StartsWith => name.starts_with(&pattern),
        NameOperator::EndsWith => name.ends_with(&pattern),
        NameOperator::Exact => name == pattern,
        NameOperator::Unknown => true,
    }
}

/// The component after the last `/` or `\`.
fn base_filename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Assignment;

    fn paths(list: &[&str]) -> Vec<String> {
        list.iter().map(|p| p.to_string()).collect()
    }

    fn view_with(entries: &[(&str, &[&str])]) -> AssignmentMap {
        let mut map = AssignmentMap::new();
        for (path, categories) in entries {
            map.insert(
                path.to_string(),
                categories.iter().map(|c| Assignment::at(*c, "t0")).collect(),
            );
        }
        map
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("uncategorized"),
            CategoryFilter::Uncategorized
        );
        assert_eq!(
            CategoryFilter::parse("cat-1"),
            CategoryFilter::Id("cat-1".to_string())
        );
        assert!(!CategoryFilter::All.is_active());
        assert!(CategoryFilter::Uncategorized.is_active());
    }

    #[test]
    fn test_empty_category_filter_passes_everything() {
        let all = paths(&["/a.jpg", "/b.jpg"]);
        let view = view_with(&[("/a.jpg", &["cat1"])]);
        let result = filtered_paths(&all, &FilterCriteria::pass_all(), &view, &SizeIndex::default());
        assert_eq!(result, all);
    }

    #[test]
    fn test_uncategorized_sentinel() {
        let all = paths(&["/a.jpg", "/b.jpg", "/c.jpg"]);
        let mut view = view_with(&[("/c.jpg", &["cat1"])]);
        // An empty list counts as uncategorized too.
        view.insert("/b.jpg".to_string(), Vec::new());

        let result = filtered_paths(
            &all,
            &FilterCriteria::for_category("uncategorized"),
            &view,
            &SizeIndex::default(),
        );
        assert_eq!(result, paths(&["/a.jpg", "/b.jpg"]));
    }

    #[test]
    fn test_category_id_filter() {
        let all = paths(&["/a.jpg", "/b.jpg", "/c.jpg"]);
        let view = view_with(&[("/a.jpg", &["cat1", "cat2"]), ("/c.jpg", &["cat2"])]);

        let result = filtered_paths(
            &all,
            &FilterCriteria::for_category("cat2"),
            &view,
            &SizeIndex::default(),
        );
        assert_eq!(result, paths(&["/a.jpg", "/c.jpg"]));
    }

    #[test]
    fn test_input_order_preserved() {
        let all = paths(&["/z.jpg", "/a.jpg", "/m.jpg"]);
        let view = AssignmentMap::new();
        let result = filtered_paths(
            &all,
            &FilterCriteria::for_category("uncategorized"),
            &view,
            &SizeIndex::default(),
        );
        assert_eq!(result, all);
    }

    #[test]
    fn test_name_operators() {
        let all = paths(&["/shots/IMG_0001.jpg", "/shots/vacation.png"]);
        let view = AssignmentMap::new();
        let mut criteria = FilterCriteria::pass_all();

        criteria.name_pattern = "img".to_string();
        criteria.name_operator = NameOperator::StartsWith;
        assert_eq!(
            filtered_paths(&all, &criteria, &view, &SizeIndex::default()),
            paths(&["/shots/IMG_0001.jpg"])
        );

        criteria.name_pattern = ".png".to_string();
        criteria.name_operator = NameOperator::EndsWith;
        assert_eq!(
            filtered_paths(&all, &criteria, &view, &SizeIndex::default()),
            paths(&["/shots/vacation.png"])
        );

        criteria.name_pattern = "vacation.png".to_string();
        criteria.name_operator = NameOperator::Exact;
        assert_eq!(
            filtered_paths(&all, &criteria, &view, &SizeIndex::default()),
            paths(&["/shots/vacation.png"])
        );

        criteria.name_pattern = "0001".to_string();
        criteria.name_operator = NameOperator::Contains;
        assert_eq!(
            filtered_paths(&all, &criteria, &view, &SizeIndex::default()),
            paths(&["/shots/IMG_0001.jpg"])
        );
    }

    #[test]
    fn test_name_case_sensitivity() {
        let all = paths(&["/IMG.jpg"]);
        let view = AssignmentMap::new();
        let mut criteria = FilterCriteria::pass_all();
        criteria.name_pattern = "img".to_string();
        criteria.case_sensitive = true;

        assert!(filtered_paths(&all, &criteria, &view, &SizeIndex::default()).is_empty());

        criteria.case_sensitive = false;
        assert_eq!(
            filtered_paths(&all, &criteria, &view, &SizeIndex::default()),
            all
        );
    }

    #[test]
    fn test_unknown_operator_passes_everything() {
        let op: NameOperator = serde_json::from_str("\"fuzzy\"").unwrap();
        assert_eq!(op, NameOperator::Unknown);

        let all = paths(&["/a.jpg", "/b.jpg"]);
        let mut criteria = FilterCriteria::pass_all();
        criteria.name_pattern = "no-such-name".to_string();
        criteria.name_operator = op;
        assert_eq!(
            filtered_paths(&all, &criteria, &AssignmentMap::new(), &SizeIndex::default()),
            all
        );
    }

    #[test]
    fn test_size_stage_delegates() {
        let all = paths(&["/small.jpg", "/big.jpg", "/unknown.jpg"]);
        let sizes = SizeIndex::new([
            ("/small.jpg".to_string(), 10_000),
            ("/big.jpg".to_string(), 5_000_000),
        ]);
        let mut criteria = FilterCriteria::pass_all();
        criteria.size = Some(SizeCriteria {
            operator: "gt".to_string(),
            value: 100_000,
            value2: None,
        });

        // Unindexed paths pass.
        assert_eq!(
            filtered_paths(&all, &criteria, &AssignmentMap::new(), &sizes),
            paths(&["/big.jpg", "/unknown.jpg"])
        );
    }

    #[test]
    fn test_size_between() {
        let sizes = SizeIndex::new([("/a.jpg".to_string(), 50_000)]);
        let criteria = SizeCriteria {
            operator: "between".to_string(),
            value: 10_000,
            value2: Some(100_000),
        };
        assert!(sizes.size_matches("/a.jpg", &criteria));

        let criteria = SizeCriteria {
            operator: "between".to_string(),
            value: 60_000,
            value2: Some(100_000),
        };
        assert!(!sizes.size_matches("/a.jpg", &criteria));
    }

    #[test]
    fn test_sanitize_paths_drops_blank_entries() {
        let cleaned = sanitize_paths(["/a.jpg", "", "   ", "/b.jpg"]);
        assert_eq!(cleaned, paths(&["/a.jpg", "/b.jpg"]));
    }
}
