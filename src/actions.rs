use crate::filter::PageFilter;
use crate::pageset::{PageEntry, PageSet};
use serde::{Deserialize, Serialize};

/// A single step the harness's action runner executes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Navigate the browser to a URL
    Navigate { url: String },

    /// Wait for a fixed number of seconds
    Wait { seconds: u64 },
}

/// One page paired with the ordered steps that replay it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRun {
    /// The page being replayed
    pub entry: PageEntry,

    /// Steps in execution order
    pub steps: Vec<Action>,
}

impl PageRun {
    /// Build the steps for a single page: navigate, then wait
    pub fn for_entry(entry: &PageEntry) -> Self {
        let steps = vec![
            Action::Navigate {
                url: entry.url.clone(),
            },
            Action::Wait {
                seconds: entry.wait_seconds,
            },
        ];

        Self {
            entry: entry.clone(),
            steps,
        }
    }
}

/// The ordered replay schedule for a whole page set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayPlan {
    /// Name of the set this plan was produced from
    pub set_name: String,

    /// Archive every page in the plan replays against
    pub archive_data_file: String,

    /// Page runs in set order
    pub runs: Vec<PageRun>,
}

impl ReplayPlan {
    /// Build the plan for every page in the set, in set order
    pub fn for_set(set: &PageSet) -> Self {
        Self {
            set_name: set.name.clone(),
            archive_data_file: set.archive_data_file.clone(),
            runs: set.iter().map(PageRun::for_entry).collect(),
        }
    }

    /// Build the plan for the pages of the set the filter accepts.
    ///
    /// Pages whose URL doesn't parse are skipped; `PageSet::validate`
    /// is where unparseable URLs are reported.
    pub fn for_set_filtered(set: &PageSet, filter: &PageFilter) -> Self {
        let runs = set
            .iter()
            .filter(|entry| match entry.parsed_url() {
                Ok(url) => filter.matches(&url),
                Err(_) => false,
            })
            .map(PageRun::for_entry)
            .collect();

        Self {
            set_name: set.name.clone(),
            archive_data_file: set.archive_data_file.clone(),
            runs,
        }
    }

    /// Number of pages the plan replays
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether the plan replays no pages
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{PageFilter, PageFilterConfig};
    use crate::pageset::PageSetBuilder;

    fn two_page_set() -> PageSet {
        PageSetBuilder::new("two_pages")
            .with_archive_data_file("data/two_pages.json")
            .with_wait_seconds(15)
            .add_page("http://example.com/first")
            .add_page("http://other.org/second")
            .build()
            .unwrap()
    }

    #[test]
    fn test_page_run_is_navigate_then_wait() {
        let set = two_page_set();
        let run = PageRun::for_entry(&set.entries[0]);

        assert_eq!(
            run.steps,
            vec![
                Action::Navigate {
                    url: "http://example.com/first".to_string()
                },
                Action::Wait { seconds: 15 },
            ]
        );
    }

    #[test]
    fn test_plan_preserves_set_order() {
        let set = two_page_set();
        let plan = ReplayPlan::for_set(&set);

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.set_name, "two_pages");
        assert_eq!(plan.archive_data_file, "data/two_pages.json");
        assert_eq!(plan.runs[0].entry.url, "http://example.com/first");
        assert_eq!(plan.runs[1].entry.url, "http://other.org/second");
    }

    #[test]
    fn test_filtered_plan() {
        let set = two_page_set();
        let filter = PageFilter::new(PageFilterConfig {
            required_domain: Some("example.com".to_string()),
            include_patterns: vec![],
            exclude_patterns: vec![],
        })
        .unwrap();

        let plan = ReplayPlan::for_set_filtered(&set, &filter);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.runs[0].entry.url, "http://example.com/first");
    }

    #[test]
    fn test_plan_serializes_to_json() {
        let set = two_page_set();
        let plan = ReplayPlan::for_set(&set);

        let json = serde_json::to_string(&plan).unwrap();
        let parsed: ReplayPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, plan);
    }
}
