//! CLI argument validation functions
//!
//! This module provides custom validation functions for CLI arguments
//! that go beyond what clap can validate automatically.

use reqwest::Url;
use std::path::PathBuf;

/// Validate that a path names an existing directory
pub fn validate_directory(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Directory does not exist: '{}'", path_str));
    }

    if !path.is_dir() {
        return Err(format!("Path is not a directory: '{}'", path_str));
    }

    Ok(path)
}

/// Validate an http(s) endpoint URL
pub fn validate_endpoint_url(url_str: &str) -> Result<String, String> {
    let url = Url::parse(url_str).map_err(|e| format!("Invalid URL '{}': {}", url_str, e))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err("URL must use http or https protocol".to_string());
    }

    Ok(url_str.to_string())
}
