use crate::pageset::{PageSet, PageSetBuilder, PageSetError, UserAgentType, default_wait_seconds};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A single page in the declarative config form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// URL to navigate to
    pub url: String,

    /// Note on why this page is part of the set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Per-page override of the set-level post-navigation wait
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_seconds: Option<u64>,
}

/// Declarative JSON form of a page set
///
/// This is the config-file equivalent of assembling a set through
/// `PageSetBuilder`; loading goes through the same validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSetConfig {
    /// Name the set is registered under
    pub name: String,

    /// What this set is meant to represent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Browser profile shared by every page (desktop, mobile or tablet)
    #[serde(default = "default_user_agent_type")]
    pub user_agent_type: String,

    /// Recorded network archive shared by every page
    pub archive_data_file: String,

    /// Credentials file for authenticated sites
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_path: Option<String>,

    /// Post-navigation wait applied to pages without their own
    #[serde(default = "default_wait")]
    pub wait_seconds: u64,

    /// Pages in replay order
    pub pages: Vec<PageConfig>,
}

/// Default user agent type for config files that omit it
fn default_user_agent_type() -> String {
    "desktop".to_string()
}

/// Default post-navigation wait for config files that omit it
fn default_wait() -> u64 {
    default_wait_seconds()
}

impl PageSetConfig {
    /// Load a page set configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Load a page set configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Convert into a validated page set
    pub fn into_page_set(self) -> Result<PageSet, PageSetError> {
        let user_agent_type = UserAgentType::parse(&self.user_agent_type)?;

        let mut builder = PageSetBuilder::new(self.name)
            .with_user_agent_type(user_agent_type)
            .with_archive_data_file(self.archive_data_file)
            .with_wait_seconds(self.wait_seconds);

        if let Some(description) = self.description {
            builder = builder.with_description(description);
        }
        if let Some(credentials) = self.credentials_path {
            builder = builder.with_credentials_path(credentials);
        }

        for page in self.pages {
            builder = builder.add_page_with(page.url, page.description, page.wait_seconds);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOGGER_JSON: &str = r#"{
        "name": "blogger_desktop",
        "archive_data_file": "data/blogger_desktop.json",
        "credentials_path": "data/credentials.json",
        "pages": [
            { "url": "http://googlewebmastercentral.blogspot.com/" }
        ]
    }"#;

    #[test]
    fn test_defaults_applied() {
        let config = PageSetConfig::from_json(BLOGGER_JSON).unwrap();
        assert_eq!(config.user_agent_type, "desktop");
        assert_eq!(config.wait_seconds, 15);
    }

    #[test]
    fn test_into_page_set() {
        let set = PageSetConfig::from_json(BLOGGER_JSON)
            .unwrap()
            .into_page_set()
            .unwrap();

        assert_eq!(set.len(), 1);
        let entry = &set.entries[0];
        assert_eq!(entry.url, "http://googlewebmastercentral.blogspot.com/");
        assert_eq!(entry.user_agent_type, UserAgentType::Desktop);
        assert_eq!(entry.wait_seconds, 15);
        assert_eq!(entry.archive_data_file, "data/blogger_desktop.json");
    }

    #[test]
    fn test_unknown_user_agent_type_rejected() {
        let json = r#"{
            "name": "bad",
            "user_agent_type": "smartwatch",
            "archive_data_file": "data/bad.json",
            "pages": [{ "url": "http://example.com/" }]
        }"#;
        let result = PageSetConfig::from_json(json).unwrap().into_page_set();
        assert!(matches!(
            result,
            Err(PageSetError::UnknownUserAgentType(_))
        ));
    }

    #[test]
    fn test_empty_pages_rejected() {
        let json = r#"{
            "name": "empty",
            "archive_data_file": "data/empty.json",
            "pages": []
        }"#;
        let result = PageSetConfig::from_json(json).unwrap().into_page_set();
        assert!(matches!(result, Err(PageSetError::EmptySet(_))));
    }

    #[test]
    fn test_per_page_overrides() {
        let json = r#"{
            "name": "mixed",
            "archive_data_file": "data/mixed.json",
            "wait_seconds": 10,
            "pages": [
                { "url": "http://example.com/fast" },
                { "url": "http://example.com/slow", "wait_seconds": 30,
                  "description": "heavy page, needs settling time" }
            ]
        }"#;
        let set = PageSetConfig::from_json(json)
            .unwrap()
            .into_page_set()
            .unwrap();

        assert_eq!(set.entries[0].wait_seconds, 10);
        assert_eq!(set.entries[1].wait_seconds, 30);
        assert_eq!(
            set.entries[1].description.as_deref(),
            Some("heavy page, needs settling time")
        );
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(PageSetConfig::from_json("{ not json").is_err());
    }
}
