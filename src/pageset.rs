use serde::{Deserialize, Serialize};
use url::Url;

/// Browser profile a recorded page was captured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserAgentType {
    /// Desktop browser profile
    #[default]
    Desktop,
    /// Mobile browser profile
    Mobile,
    /// Tablet browser profile
    Tablet,
}

impl UserAgentType {
    /// Parse a user agent type from its harness string form
    pub fn parse(value: &str) -> Result<Self, PageSetError> {
        match value.to_ascii_lowercase().as_str() {
            "desktop" => Ok(UserAgentType::Desktop),
            "mobile" => Ok(UserAgentType::Mobile),
            "tablet" => Ok(UserAgentType::Tablet),
            _ => Err(PageSetError::UnknownUserAgentType(value.to_string())),
        }
    }

    /// The string form the replay harness expects
    pub fn as_str(&self) -> &'static str {
        match self {
            UserAgentType::Desktop => "desktop",
            UserAgentType::Mobile => "mobile",
            UserAgentType::Tablet => "tablet",
        }
    }
}

impl std::fmt::Display for UserAgentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while building or validating a page set
#[derive(Debug, thiserror::Error)]
pub enum PageSetError {
    /// The set contains no pages
    #[error("page set '{0}' has no pages")]
    EmptySet(String),

    /// A page URL could not be parsed as an absolute URL
    #[error("invalid page URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    /// A page URL uses a scheme the harness cannot replay
    #[error("unsupported URL scheme '{scheme}' in '{url}'")]
    UnsupportedScheme { url: String, scheme: String },

    /// The set declares no archive data file
    #[error("page set '{0}' declares no archive data file")]
    MissingArchive(String),

    /// A page references a different archive than the set declares
    #[error("page '{url}' uses archive '{page_archive}' but the set declares '{set_archive}'")]
    ArchiveMismatch {
        url: String,
        page_archive: String,
        set_archive: String,
    },

    /// An unknown user agent type string was supplied
    #[error("unknown user agent type '{0}' (expected desktop, mobile or tablet)")]
    UnknownUserAgentType(String),
}

/// A single recorded page: where to navigate and how the harness
/// should replay it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    /// URL the harness navigates to
    pub url: String,

    /// Browser profile to replay with
    pub user_agent_type: UserAgentType,

    /// Recorded network archive backing this page
    pub archive_data_file: String,

    /// Credentials file for authenticated sites (resolved by the harness)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_path: Option<String>,

    /// Seconds to wait after navigation before the visit counts as done
    pub wait_seconds: u64,

    /// Note on why this page is part of the set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PageEntry {
    /// Parse the entry's URL
    pub fn parsed_url(&self) -> Result<Url, PageSetError> {
        parse_page_url(&self.url)
    }
}

/// An ordered, immutable collection of recorded pages sharing one
/// archive and browser profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSet {
    /// Name the set is registered under
    pub name: String,

    /// What this set is meant to represent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Browser profile shared by every page in the set
    pub user_agent_type: UserAgentType,

    /// Recorded network archive shared by every page in the set
    pub archive_data_file: String,

    /// Credentials file shared by every page in the set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_path: Option<String>,

    /// Pages in replay order
    pub entries: Vec<PageEntry>,
}

impl PageSet {
    /// Iterate the pages in replay order
    pub fn iter(&self) -> std::slice::Iter<'_, PageEntry> {
        self.entries.iter()
    }

    /// Number of pages in the set
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no pages
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The ordered list of page URLs
    pub fn urls(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.url.as_str()).collect()
    }

    /// Check the structural invariants the harness relies on.
    ///
    /// A valid set has at least one page, declares an archive file, and
    /// every page parses as an absolute http(s) URL and references the
    /// set's archive.
    pub fn validate(&self) -> Result<(), PageSetError> {
        if self.entries.is_empty() {
            return Err(PageSetError::EmptySet(self.name.clone()));
        }
        if self.archive_data_file.is_empty() {
            return Err(PageSetError::MissingArchive(self.name.clone()));
        }

        for entry in &self.entries {
            parse_page_url(&entry.url)?;

            if entry.archive_data_file != self.archive_data_file {
                return Err(PageSetError::ArchiveMismatch {
                    url: entry.url.clone(),
                    page_archive: entry.archive_data_file.clone(),
                    set_archive: self.archive_data_file.clone(),
                });
            }
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a PageSet {
    type Item = &'a PageEntry;
    type IntoIter = std::slice::Iter<'a, PageEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Parse a page URL and check it is something a replay harness can visit
fn parse_page_url(raw: &str) -> Result<Url, PageSetError> {
    let url = Url::parse(raw).map_err(|source| PageSetError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;

    // The url crate guarantees a host for http(s), so the scheme check
    // is the only thing left to pin down.
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(PageSetError::UnsupportedScheme {
            url: raw.to_string(),
            scheme: other.to_string(),
        }),
    }
}

/// Default post-navigation wait applied when a set doesn't specify one
pub(crate) fn default_wait_seconds() -> u64 {
    15
}

/// Builder for assembling a page set
///
/// Set-level values (user agent, archive, credentials, wait) are stamped
/// onto every page at `build` time, so the shared-archive invariant holds
/// by construction.
pub struct PageSetBuilder {
    name: String,
    description: Option<String>,
    user_agent_type: UserAgentType,
    archive_data_file: String,
    credentials_path: Option<String>,
    wait_seconds: u64,
    pages: Vec<(String, Option<String>, Option<u64>)>,
}

impl PageSetBuilder {
    /// Create a new builder for a set with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            user_agent_type: UserAgentType::Desktop,
            archive_data_file: String::new(),
            credentials_path: None,
            wait_seconds: default_wait_seconds(),
            pages: Vec::new(),
        }
    }

    /// Set the description of what the set represents
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the browser profile shared by every page
    pub fn with_user_agent_type(mut self, user_agent_type: UserAgentType) -> Self {
        self.user_agent_type = user_agent_type;
        self
    }

    /// Set the recorded network archive shared by every page
    pub fn with_archive_data_file(mut self, path: impl Into<String>) -> Self {
        self.archive_data_file = path.into();
        self
    }

    /// Set the credentials file shared by every page
    pub fn with_credentials_path(mut self, path: impl Into<String>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    /// Set the post-navigation wait applied to every page
    pub fn with_wait_seconds(mut self, seconds: u64) -> Self {
        self.wait_seconds = seconds;
        self
    }

    /// Append a page to the set
    pub fn add_page(self, url: impl Into<String>) -> Self {
        self.add_page_with(url, None, None)
    }

    /// Append a page with a note on why it belongs in the set
    pub fn add_page_with_description(
        self,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.add_page_with(url, Some(description.into()), None)
    }

    /// Append a page with its own post-navigation wait
    pub fn add_page_with_wait(self, url: impl Into<String>, wait_seconds: u64) -> Self {
        self.add_page_with(url, None, Some(wait_seconds))
    }

    /// Append a page with optional description and wait override
    pub fn add_page_with(
        mut self,
        url: impl Into<String>,
        description: Option<String>,
        wait_seconds: Option<u64>,
    ) -> Self {
        self.pages.push((url.into(), description, wait_seconds));
        self
    }

    /// Assemble and validate the set
    pub fn build(self) -> Result<PageSet, PageSetError> {
        let entries = self
            .pages
            .into_iter()
            .map(|(url, description, wait)| PageEntry {
                url,
                user_agent_type: self.user_agent_type,
                archive_data_file: self.archive_data_file.clone(),
                credentials_path: self.credentials_path.clone(),
                wait_seconds: wait.unwrap_or(self.wait_seconds),
                description,
            })
            .collect();

        let set = PageSet {
            name: self.name,
            description: self.description,
            user_agent_type: self.user_agent_type,
            archive_data_file: self.archive_data_file,
            credentials_path: self.credentials_path,
            entries,
        };

        set.validate()?;
        Ok(set)
    }
}
