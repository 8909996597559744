use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for selecting which pages of a set a run replays
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageFilterConfig {
    /// Domain restriction (if None, all domains are allowed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_domain: Option<String>,

    /// Regex patterns for URLs to include (if empty, all URLs are included unless excluded)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns for URLs to exclude (these take precedence over include patterns)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

/// Page filter that uses regex patterns and a domain restriction to pick
/// the subset of a page set to replay
#[derive(Debug)]
pub struct PageFilter {
    config: PageFilterConfig,
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl Default for PageFilter {
    fn default() -> Self {
        Self::new(PageFilterConfig::default()).expect("empty pattern list should compile")
    }
}

impl PageFilter {
    /// Create a new page filter from configuration
    pub fn new(config: PageFilterConfig) -> Result<Self, regex::Error> {
        // Compile regex patterns
        let mut include_regexes = Vec::with_capacity(config.include_patterns.len());
        for pattern in &config.include_patterns {
            include_regexes.push(Regex::new(pattern)?);
        }

        let mut exclude_regexes = Vec::with_capacity(config.exclude_patterns.len());
        for pattern in &config.exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            config,
            include_regexes,
            exclude_regexes,
        })
    }

    /// Determine if a page URL passes all filtering rules
    pub fn matches(&self, url: &Url) -> bool {
        // Check domain restriction
        if !self.is_in_domain_scope(url) {
            return false;
        }

        // Check regex exclusions (these take precedence)
        let url_str = url.as_str();
        for regex in &self.exclude_regexes {
            if regex.is_match(url_str) {
                return false;
            }
        }

        // If include patterns are specified, at least one must match
        if !self.include_regexes.is_empty() {
            return self.include_regexes.iter().any(|r| r.is_match(url_str));
        }

        true
    }

    /// Check if a URL is within the allowed domain scope
    fn is_in_domain_scope(&self, url: &Url) -> bool {
        if let Some(required_domain) = &self.config.required_domain {
            match url.domain() {
                Some(url_domain) => url_domain == required_domain,
                None => false, // No domain in URL but domain required
            }
        } else {
            true // No domain restriction
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_accepts_everything() {
        let filter = PageFilter::default();

        let url = Url::parse("https://example.com/page.html").unwrap();
        assert!(filter.matches(&url));

        let other = Url::parse("http://blog.example.org/post/1").unwrap();
        assert!(filter.matches(&other));
    }

    #[test]
    fn test_domain_restriction() {
        let config = PageFilterConfig {
            required_domain: Some("example.com".to_string()),
            include_patterns: vec![],
            exclude_patterns: vec![],
        };
        let filter = PageFilter::new(config).unwrap();

        // Correct domain should be allowed
        let correct_domain = Url::parse("https://example.com/page").unwrap();
        assert!(filter.matches(&correct_domain));

        // Different domain should be excluded
        let wrong_domain = Url::parse("https://other.com/page").unwrap();
        assert!(!filter.matches(&wrong_domain));
    }

    #[test]
    fn test_regex_patterns() {
        let config = PageFilterConfig {
            required_domain: None,
            include_patterns: vec![r"/blog/.*".to_string()],
            exclude_patterns: vec![r"/blog/draft/".to_string()],
        };
        let filter = PageFilter::new(config).unwrap();

        // Matching include pattern should be allowed
        let included = Url::parse("https://example.com/blog/post").unwrap();
        assert!(filter.matches(&included));

        // Non-matching include pattern should be excluded
        let not_included = Url::parse("https://example.com/shop/item").unwrap();
        assert!(!filter.matches(&not_included));

        // Matching exclude pattern should be excluded even if it matches include
        let excluded = Url::parse("https://example.com/blog/draft/post").unwrap();
        assert!(!filter.matches(&excluded));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let config = PageFilterConfig {
            required_domain: None,
            include_patterns: vec!["(unclosed".to_string()],
            exclude_patterns: vec![],
        };
        assert!(PageFilter::new(config).is_err());
    }
}
