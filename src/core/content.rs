//! Content loading
//!
//! The default portfolio is compiled in; a JSON file with the same shape
//! can replace it.

use std::path::Path;
use sha2::{Digest, Sha256};
use tracing::debug;
use crate::error::{FolioError, Result};
use crate::types::PortfolioContent;

const DEFAULT_CONTENT: &str = include_str!("../../content/portfolio.json");

/// The compiled-in portfolio
pub fn default_content() -> Result<PortfolioContent> {
    parse_content(DEFAULT_CONTENT)
}

/// Parse a content document
pub fn parse_content(json: &str) -> Result<PortfolioContent> {
    let content: PortfolioContent = serde_json::from_str(json)?;
    check_unique_ids(&content)?;
    Ok(content)
}

/// Load content from a JSON file
pub fn load_content(path: &Path) -> Result<PortfolioContent> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| FolioError::Content(format!("{}: {}", path.display(), e)))?;
    let content = parse_content(&json)?;
    debug!(path = %path.display(), projects = content.projects.len(), "content loaded");
    Ok(content)
}

/// Explicit path when given, compiled-in content otherwise
pub fn resolve_content(path: Option<&Path>) -> Result<PortfolioContent> {
    match path {
        Some(p) => load_content(p),
        None => default_content(),
    }
}

/// Hex SHA-256 of arbitrary bytes, used as an etag
pub fn fingerprint(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Project ids key the expand-in-place state, so they must not collide
fn check_unique_ids(content: &PortfolioContent) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for project in &content.projects {
        if !seen.insert(project.id.as_str()) {
            return Err(FolioError::Content(format!("duplicate project id '{}'", project.id)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_content_parses() {
        let content = default_content().unwrap();
        assert_eq!(content.profile.name, "Alex Ocean");
        assert_eq!(content.projects.len(), 3);
        assert!(content.project("reef-ui").is_some());
        assert_eq!(content.skills.categories()[1].0, "Backend & Database");
    }

    #[test]
    fn test_duplicate_project_ids_rejected() {
        let mut value: serde_json::Value = serde_json::from_str(DEFAULT_CONTENT).unwrap();
        let first = value["projects"][0].clone();
        value["projects"].as_array_mut().unwrap().push(first);
        let err = parse_content(&value.to_string()).unwrap_err();
        assert!(matches!(err, FolioError::Content(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_content(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("not/here.json"));
    }

    #[test]
    fn test_fingerprint_is_stable_hex() {
        let a = fingerprint(b"tide");
        assert_eq!(a.len(), 64);
        assert_eq!(a, fingerprint(b"tide"));
        assert_ne!(a, fingerprint(b"wave"));
    }
}
