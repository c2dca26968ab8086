//! Featured project catalog with search and category filtering.

use crate::CatalogError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Category value that matches every project.
pub const ALL_CATEGORIES: &str = "all";

/// Number of related projects shown on a detail page.
pub const RELATED_LIMIT: usize = 3;

/// A featured project record.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Project {
    /// Stable slug used in URLs.
    id: String,
    /// Display title.
    title: String,
    /// One-line pitch.
    #[serde(default)]
    headline: String,
    /// Short description for cards.
    #[serde(default)]
    description: String,
    /// Longer summary for the detail page.
    #[serde(default)]
    summary: String,
    /// Problem the project addresses.
    #[serde(default)]
    problem: String,
    /// How the project solves it.
    #[serde(default)]
    solution: String,
    /// Measured outcomes.
    #[serde(default)]
    impact: Vec<String>,
    /// Notable features.
    #[serde(default)]
    features: Vec<String>,
    /// Responsibilities held on the project.
    #[serde(default)]
    role: Vec<String>,
    /// When and how long.
    #[serde(default)]
    timeline: String,
    /// Team composition.
    #[serde(default)]
    team: String,
    /// Delivery status.
    #[serde(default)]
    status: String,
    /// Technologies used.
    #[serde(default)]
    technologies: Vec<String>,
    /// Cover image path.
    #[serde(default)]
    image: String,
    /// Live deployment, if any.
    #[serde(default)]
    live_url: Option<String>,
    /// Source repository, if public.
    #[serde(default)]
    github_url: Option<String>,
    /// Shown in the featured list.
    #[serde(default)]
    featured: bool,
    /// Domain used by the category filter.
    category: String,
    /// Accent gradient name.
    #[serde(default)]
    color: String,
}

impl Project {
    /// Lowercased text searched by [`Catalog::filter`].
    fn haystack(&self) -> String {
        [
            &self.title,
            &self.headline,
            &self.description,
            &self.summary,
            &self.problem,
            &self.solution,
            &self.timeline,
            &self.status,
        ]
        .into_iter()
        .chain(&self.technologies)
        .chain(&self.features)
        .chain(&self.impact)
        .chain(&self.role)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }
}

/// Search text and category selected by a visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectQuery {
    /// Free-text search; blank matches everything.
    #[serde(default)]
    pub search: Option<String>,
    /// Category to keep; `"all"` or absent matches everything.
    #[serde(default)]
    pub category: Option<String>,
    /// Keep only projects flagged as featured.
    #[serde(default)]
    pub featured: bool,
}

impl ProjectQuery {
    /// Query with only a search term.
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            ..Self::default()
        }
    }

    /// Query with only a category.
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    /// Query keeping only featured projects.
    pub fn featured() -> Self {
        Self {
            featured: true,
            ..Self::default()
        }
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    projects: Vec<Project>,
}

/// In-memory, read-only list of featured projects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    projects: Vec<Project>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids.
    #[instrument(skip(projects), fields(count = projects.len()))]
    pub fn new(projects: Vec<Project>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        for project in &projects {
            if !ids.insert(project.id.as_str()) {
                warn!(id = %project.id, "Duplicate project id");
                return Err(CatalogError::new(format!("Duplicate project id: {}", project.id)));
            }
        }
        Ok(Self { projects })
    }

    /// Parses a catalog from TOML `[[projects]]` tables.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)
            .map_err(|e| CatalogError::new(format!("Failed to parse catalog: {}", e)))?;
        Self::new(file.projects)
    }

    /// Loads a catalog from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        debug!("Loading catalog from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| CatalogError::new(format!("Failed to read catalog file: {}", e)))?;
        let catalog = Self::from_toml_str(&content)?;
        info!(count = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// All projects in catalog order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Number of projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// True when the catalog holds no projects.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// `"all"` followed by each distinct category in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for project in &self.projects {
            if !categories.contains(&project.category) {
                categories.push(project.category.clone());
            }
        }
        categories
    }

    /// Projects matching the query's featured flag, category and search text.
    #[instrument(skip(self))]
    pub fn filter(&self, query: &ProjectQuery) -> Vec<&Project> {
        let needle = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default();
        let category = query
            .category
            .as_deref()
            .filter(|c| *c != ALL_CATEGORIES);

        let matches: Vec<&Project> = self
            .projects
            .iter()
            .filter(|p| !query.featured || p.featured)
            .filter(|p| category.is_none_or(|c| p.category == c))
            .filter(|p| needle.is_empty() || p.haystack().contains(&needle))
            .collect();
        debug!(matches = matches.len(), "Filtered catalog");
        matches
    }

    /// Looks up a project by id.
    pub fn find(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// The first `limit` projects other than `id`.
    pub fn related(&self, id: &str, limit: usize) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| p.id != id)
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[projects]]
id = "atlas"
title = "Atlas"
description = "Route planner for delivery fleets"
technologies = ["Next.js", "TypeScript"]
category = "web"
featured = true

[[projects]]
id = "pocket"
title = "Pocket"
headline = "Offline-first budgeting"
technologies = ["Flutter", "Dart"]
features = ["Sync over Bluetooth"]
category = "mobile"

[[projects]]
id = "beacon"
title = "Beacon"
status = "In Production"
role = ["Lead frontend engineer"]
category = "web"
"#;

    fn catalog() -> Catalog {
        Catalog::from_toml_str(SAMPLE).expect("sample catalog parses")
    }

    fn ids(projects: Vec<&Project>) -> Vec<&str> {
        projects.into_iter().map(|p| p.id().as_str()).collect()
    }

    #[test]
    fn categories_keep_first_seen_order() {
        assert_eq!(catalog().categories(), vec!["all", "web", "mobile"]);
    }

    #[test]
    fn empty_query_matches_everything() {
        let catalog = catalog();
        assert_eq!(catalog.filter(&ProjectQuery::default()).len(), 3);
        assert_eq!(catalog.filter(&ProjectQuery::search("   ")).len(), 3);
        assert_eq!(catalog.filter(&ProjectQuery::category("all")).len(), 3);
    }

    #[test]
    fn category_filter_is_exact() {
        assert_eq!(ids(catalog().filter(&ProjectQuery::category("web"))), vec!["atlas", "beacon"]);
        assert!(catalog().filter(&ProjectQuery::category("Web")).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_over_lists() {
        let catalog = catalog();
        assert_eq!(ids(catalog.filter(&ProjectQuery::search("  FLUTTER "))), vec!["pocket"]);
        assert_eq!(ids(catalog.filter(&ProjectQuery::search("bluetooth"))), vec!["pocket"]);
        assert_eq!(ids(catalog.filter(&ProjectQuery::search("lead frontend"))), vec!["beacon"]);
        assert_eq!(ids(catalog.filter(&ProjectQuery::search("production"))), vec!["beacon"]);
    }

    #[test]
    fn search_and_category_combine() {
        let query = ProjectQuery {
            search: Some("typescript".into()),
            category: Some("mobile".into()),
            featured: false,
        };
        assert!(catalog().filter(&query).is_empty());
    }

    #[test]
    fn related_excludes_self() {
        let catalog = catalog();
        assert_eq!(ids(catalog.related("pocket", RELATED_LIMIT)), vec!["atlas", "beacon"]);
        assert_eq!(ids(catalog.related("atlas", 1)), vec!["pocket"]);
    }

    #[test]
    fn find_by_id() {
        let catalog = catalog();
        assert_eq!(catalog.find("beacon").map(|p| p.title().as_str()), Some("Beacon"));
        assert!(catalog.find("missing").is_none());
    }

    #[test]
    fn featured_flag_narrows_other_filters() {
        let catalog = catalog();
        assert_eq!(ids(catalog.filter(&ProjectQuery::featured())), vec!["atlas"]);
        let mobile_featured = ProjectQuery {
            category: Some("mobile".into()),
            ..ProjectQuery::featured()
        };
        assert!(catalog.filter(&mobile_featured).is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let doubled = format!("{SAMPLE}\n[[projects]]\nid = \"atlas\"\ntitle = \"Again\"\ncategory = \"web\"\n");
        let err = Catalog::from_toml_str(&doubled).unwrap_err();
        assert!(err.message.contains("atlas"));
    }
}
