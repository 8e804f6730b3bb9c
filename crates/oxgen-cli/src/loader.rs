//! Loads the spec document bytes from a local file or a remote server.

use std::fs;

use anyhow::{Context, Result};

type LoadFn = fn(&str) -> Result<String>;

/// Pick a loader for a given path or URI.
pub fn load_strategy(path: &str) -> LoadFn {
    if path.starts_with("http://") || path.starts_with("https://") {
        load_http
    } else {
        load_file
    }
}

/// Load the document at `path`, local or remote.
pub fn load_document(path: &str) -> Result<String> {
    load_strategy(path)(path)
}

fn load_file(path: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
}

fn load_http(url: &str) -> Result<String> {
    let response = reqwest::blocking::get(url)
        .with_context(|| format!("failed to fetch {url}"))?;
    if !response.status().is_success() {
        anyhow::bail!("could not access document at {url:?} [{}]", response.status());
    }
    response
        .text()
        .with_context(|| format!("failed to read body of {url}"))
}

/// True when the path or URL names a JSON document.
pub fn is_json(path: &str) -> bool {
    path.trim_end_matches('/').ends_with(".json")
}
