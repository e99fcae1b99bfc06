//! Request and response shapes of the documentation backend.
//!
//! Every endpoint answers with the same envelope: `{"success": true, ...payload}`
//! on success, `{"success": false, "error": "..."}` otherwise. The envelope is
//! checked first and the payload is only decoded when `success` is true, so a
//! rejected response can never populate client state.

use crate::error::RemoteError;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Relative path to text content, in the order the backend listed them.
pub type FileContents = IndexMap<String, String>;

pub const PROCESS_ZIP_PATH: &str = "/process-zip";
pub const ANALYZE_GITHUB_PATH: &str = "/analyze-github";
pub const GENERATE_DOCS_PATH: &str = "/generate-docs";

/// Result of `POST /process-zip`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectData {
    pub file_contents: FileContents,
    pub filename: String,
}

/// Repository metadata as returned by `POST /analyze-github`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoInfo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stars: Option<u64>,
    #[serde(default)]
    pub forks: Option<u64>,
    #[serde(default)]
    pub language: Option<String>,
    /// Repository size in KB, as GitHub reports it.
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub url: String,
}

/// Result of `POST /analyze-github`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubData {
    pub file_contents: FileContents,
    pub repo_info: RepoInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl GithubData {
    /// Name sent as `filename` when generating batch documentation.
    pub fn request_filename(&self) -> String {
        self.filename
            .clone()
            .unwrap_or_else(|| format!("{}.github", self.repo_info.name))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeGithubRequest {
    pub github_url: String,
}

/// Output language of the generated documentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Zh,
    En,
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Lang::Zh => "zh",
            Lang::En => "en",
        })
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zh" => Ok(Lang::Zh),
            "en" => Ok(Lang::En),
            other => Err(format!("Invalid language: {other}. Valid languages: zh, en")),
        }
    }
}

/// Documentation style understood by the backend prompts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Manual,
    Tutorial,
    Api,
    Comment,
    Insight,
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Style::Manual => "manual",
            Style::Tutorial => "tutorial",
            Style::Api => "api",
            Style::Comment => "comment",
            Style::Insight => "insight",
        })
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manual" => Ok(Style::Manual),
            "tutorial" => Ok(Style::Tutorial),
            "api" => Ok(Style::Api),
            "comment" => Ok(Style::Comment),
            "insight" => Ok(Style::Insight),
            other => Err(format!(
                "Invalid style: {other}. Valid styles: manual, tutorial, api, comment, insight"
            )),
        }
    }
}

/// User-selected generation options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocOptions {
    pub lang: Lang,
    pub style: Style,
}

/// `content` is raw text for a single file, a path map for batches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocContent {
    Text(String),
    Files(FileContents),
}

/// Body of `POST /generate-docs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateDocsRequest {
    pub filename: String,
    pub content: DocContent,
    pub lang: Lang,
    pub style: Style,
    pub is_batch: bool,
}

impl GenerateDocsRequest {
    pub fn single(filename: impl Into<String>, text: String, options: DocOptions) -> Self {
        Self {
            filename: filename.into(),
            content: DocContent::Text(text),
            lang: options.lang,
            style: options.style,
            is_batch: false,
        }
    }

    pub fn batch(filename: impl Into<String>, files: FileContents, options: DocOptions) -> Self {
        Self {
            filename: filename.into(),
            content: DocContent::Files(files),
            lang: options.lang,
            style: options.style,
            is_batch: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateDocsPayload {
    pub documentation: String,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Decode a backend reply into its payload.
///
/// `fallback` is the message used when the backend reports a failure without
/// an `error` string.
pub fn parse_envelope<T: DeserializeOwned>(body: &str, fallback: &str) -> Result<T, RemoteError> {
    // Decoded straight from the text so `file_contents` keeps the reply's key order.
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| RemoteError::Malformed(e.to_string()))?;

    if !envelope.success {
        let message = envelope
            .error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        return Err(RemoteError::Rejected(message));
    }

    serde_json::from_str(body).map_err(|e| RemoteError::Malformed(e.to_string()))
}
