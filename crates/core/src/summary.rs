//! Upload summaries: language inference, capped file listings and the
//! statistics shown once a project archive or a repository has been parsed.

use crate::api::{FileContents, GithubData, ProjectData};
use crate::state::SelectedFile;
use serde::Serialize;

/// Project archives list at most this many paths.
pub const PROJECT_LISTING_CAP: usize = 10;

/// Repositories list at most this many paths.
pub const GITHUB_LISTING_CAP: usize = 15;

/// Shown when no dominant language can be determined.
pub const MIXED_LANGUAGE: &str = "Mixed";

pub const NO_DESCRIPTION: &str = "No description";

/// Map a path to a language label.
///
/// The extension is everything after the last `.` (the whole path when there
/// is none), lowercased. Known extensions use a fixed label table, unknown ones
/// fall back to the uppercased extension.
pub fn infer_language(path: &str) -> String {
    let ext = path.rsplit('.').next().unwrap_or(path).to_lowercase();

    let label = match ext.as_str() {
        "py" => "Python",
        "js" => "JavaScript",
        "ts" => "TypeScript",
        "java" => "Java",
        "cpp" => "C++",
        "c" => "C",
        "cs" => "C#",
        "php" => "PHP",
        "rb" => "Ruby",
        "go" => "Go",
        "rs" => "Rust",
        _ => return ext.to_uppercase(),
    };

    label.to_string()
}

/// Count files per language, in first-encountered order.
pub fn language_counts<'a, I>(paths: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();

    for path in paths {
        let language = infer_language(path);
        match counts.iter_mut().find(|(name, _)| *name == language) {
            Some((_, count)) => *count += 1,
            None => counts.push((language, 1)),
        }
    }

    counts
}

/// The language with the most files. Ties go to the one encountered first.
pub fn main_language<'a, I>(paths: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(String, usize)> = None;

    for (language, count) in language_counts(paths) {
        let replace = match &best {
            Some((_, top)) => count > *top,
            None => true,
        };
        if replace {
            best = Some((language, count));
        }
    }

    best.map(|(language, _)| language)
}

/// Total size of all contents in bytes.
pub fn total_bytes(files: &FileContents) -> usize {
    files.values().map(|content| content.len()).sum()
}

/// Format a byte count the way the upload panels do: KB with two decimals.
pub fn format_kb(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

/// A file listing truncated to a cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileListing {
    pub shown: Vec<String>,
    /// Paths left out because of the cap.
    pub remaining: usize,
}

impl FileListing {
    pub fn new<'a, I>(paths: I, cap: usize) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut shown = Vec::new();
        let mut remaining = 0;

        for path in paths {
            if shown.len() < cap {
                shown.push(path.to_string());
            } else {
                remaining += 1;
            }
        }

        Self { shown, remaining }
    }

    /// The trailing "more files" line, present only when paths were left out.
    pub fn overflow_label(&self) -> Option<String> {
        (self.remaining > 0).then(|| format!("... and {} more files", self.remaining))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub name: String,
    pub size: String,
}

pub fn summarize_file(file: &SelectedFile) -> FileSummary {
    FileSummary {
        name: file.name.clone(),
        size: format_kb(file.size),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub archive_name: String,
    pub total_files: usize,
    pub main_language: String,
    pub total_bytes: usize,
    pub size: String,
    pub listing: FileListing,
}

pub fn summarize_project(project: &ProjectData) -> ProjectSummary {
    let paths = || project.file_contents.keys().map(String::as_str);
    let bytes = total_bytes(&project.file_contents);

    ProjectSummary {
        archive_name: project.filename.clone(),
        total_files: project.file_contents.len(),
        main_language: main_language(paths()).unwrap_or_else(|| MIXED_LANGUAGE.to_string()),
        total_bytes: bytes,
        size: format_kb(bytes as u64),
        listing: FileListing::new(paths(), PROJECT_LISTING_CAP),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositorySummary {
    pub name: String,
    pub description: String,
    pub stars: u64,
    pub forks: u64,
    pub language: String,
    pub url: String,
    pub code_files: usize,
    pub main_language: String,
    pub total_bytes: usize,
    pub size: String,
    pub listing: FileListing,
}

pub fn summarize_repository(github: &GithubData) -> RepositorySummary {
    let info = &github.repo_info;
    let paths = || github.file_contents.keys().map(String::as_str);
    let repo_language = info.language.clone().filter(|l| !l.is_empty());

    RepositorySummary {
        name: info.name.clone(),
        description: info
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        stars: info.stars.unwrap_or(0),
        forks: info.forks.unwrap_or(0),
        language: repo_language
            .clone()
            .unwrap_or_else(|| MIXED_LANGUAGE.to_string()),
        url: info.url.clone(),
        code_files: github.file_contents.len(),
        main_language: main_language(paths())
            .or(repo_language)
            .unwrap_or_else(|| MIXED_LANGUAGE.to_string()),
        total_bytes: total_bytes(&github.file_contents),
        size: format!("{} KB", info.size.unwrap_or(0)),
        listing: FileListing::new(paths(), GITHUB_LISTING_CAP),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RepoInfo;
    use std::path::PathBuf;

    fn contents(entries: &[(&str, &str)]) -> FileContents {
        entries
            .iter()
            .map(|(path, content)| (path.to_string(), content.to_string()))
            .collect()
    }

    fn numbered_paths(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("src/file{i}.py")).collect()
    }

    // ============================================================================
    // infer_language tests
    // ============================================================================

    #[test]
    fn test_infer_language_known_extensions() {
        assert_eq!(infer_language("a.py"), "Python");
        assert_eq!(infer_language("web/app.js"), "JavaScript");
        assert_eq!(infer_language("x.ts"), "TypeScript");
        assert_eq!(infer_language("Main.java"), "Java");
        assert_eq!(infer_language("m.cpp"), "C++");
        assert_eq!(infer_language("m.c"), "C");
        assert_eq!(infer_language("P.cs"), "C#");
        assert_eq!(infer_language("i.php"), "PHP");
        assert_eq!(infer_language("r.rb"), "Ruby");
        assert_eq!(infer_language("main.go"), "Go");
        assert_eq!(infer_language("lib.rs"), "Rust");
    }

    #[test]
    fn test_infer_language_is_case_insensitive() {
        assert_eq!(infer_language("SCRIPT.PY"), "Python");
    }

    #[test]
    fn test_infer_language_unknown_extension_is_uppercased() {
        assert_eq!(infer_language("App.vue"), "VUE");
        assert_eq!(infer_language("query.Sql"), "SQL");
    }

    #[test]
    fn test_infer_language_uses_last_extension() {
        assert_eq!(infer_language("archive.tar.gz"), "GZ");
        assert_eq!(infer_language("component.test.ts"), "TypeScript");
    }

    #[test]
    fn test_infer_language_without_dot_uses_whole_path() {
        assert_eq!(infer_language("Makefile"), "MAKEFILE");
    }

    // ============================================================================
    // main_language tests
    // ============================================================================

    #[test]
    fn test_main_language_highest_count_wins() {
        let paths = ["a.py", "b.py", "c.js"];
        assert_eq!(main_language(paths), Some("Python".to_string()));
    }

    #[test]
    fn test_main_language_tie_goes_to_first_encountered() {
        let paths = ["a.js", "b.py", "c.py", "d.js"];
        assert_eq!(main_language(paths), Some("JavaScript".to_string()));

        let paths = ["b.py", "a.js", "d.js", "c.py"];
        assert_eq!(main_language(paths), Some("Python".to_string()));
    }

    #[test]
    fn test_main_language_empty() {
        assert_eq!(main_language(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_language_counts_keep_encounter_order() {
        let counts = language_counts(["z.rs", "a.go", "b.rs"]);
        assert_eq!(
            counts,
            vec![("Rust".to_string(), 2), ("Go".to_string(), 1)]
        );
    }

    // ============================================================================
    // FileListing tests
    // ============================================================================

    #[test]
    fn test_listing_under_cap_has_no_overflow() {
        let paths = numbered_paths(3);
        let listing = FileListing::new(paths.iter().map(String::as_str), 10);

        assert_eq!(listing.shown.len(), 3);
        assert_eq!(listing.remaining, 0);
        assert_eq!(listing.overflow_label(), None);
    }

    #[test]
    fn test_listing_exactly_at_cap_has_no_overflow() {
        let paths = numbered_paths(10);
        let listing = FileListing::new(paths.iter().map(String::as_str), 10);

        assert_eq!(listing.shown.len(), 10);
        assert_eq!(listing.overflow_label(), None);
    }

    #[test]
    fn test_listing_over_cap_reports_exact_remaining() {
        let paths = numbered_paths(23);
        let listing = FileListing::new(paths.iter().map(String::as_str), 15);

        assert_eq!(listing.shown.len(), 15);
        assert_eq!(listing.shown[0], "src/file0.py");
        assert_eq!(listing.shown[14], "src/file14.py");
        assert_eq!(listing.remaining, 8);
        assert_eq!(
            listing.overflow_label(),
            Some("... and 8 more files".to_string())
        );
    }

    // ============================================================================
    // Summary tests
    // ============================================================================

    #[test]
    fn test_summarize_mixed_python_project() {
        let project = ProjectData {
            file_contents: contents(&[("a.py", "x"), ("b.py", "y"), ("c.js", "z")]),
            filename: "demo.zip".to_string(),
        };

        let summary = summarize_project(&project);
        assert_eq!(summary.archive_name, "demo.zip");
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.main_language, "Python");
        assert_eq!(summary.total_bytes, 3);
        assert_eq!(summary.size, "0.00 KB");
        assert_eq!(summary.listing.shown, vec!["a.py", "b.py", "c.js"]);
    }

    #[test]
    fn test_summarize_project_counts_bytes_not_chars() {
        let project = ProjectData {
            file_contents: contents(&[("a.py", "é")]),
            filename: "u.zip".to_string(),
        };

        assert_eq!(summarize_project(&project).total_bytes, 2);
    }

    #[test]
    fn test_summarize_project_caps_listing_at_ten() {
        let file_contents = numbered_paths(12)
            .into_iter()
            .map(|p| (p, "pass".to_string()))
            .collect();
        let project = ProjectData {
            file_contents,
            filename: "big.zip".to_string(),
        };

        let summary = summarize_project(&project);
        assert_eq!(summary.listing.shown.len(), PROJECT_LISTING_CAP);
        assert_eq!(summary.listing.remaining, 2);
        assert_eq!(summary.size, format_kb(48));
    }

    #[test]
    fn test_summarize_empty_project_is_mixed() {
        let project = ProjectData {
            file_contents: FileContents::new(),
            filename: "empty.zip".to_string(),
        };

        assert_eq!(summarize_project(&project).main_language, MIXED_LANGUAGE);
    }

    #[test]
    fn test_summarize_repository_with_defaults() {
        let github = GithubData {
            file_contents: contents(&[("cmd/main.go", "package main"), ("x.go", "package x")]),
            repo_info: RepoInfo {
                name: "tool".to_string(),
                url: "https://github.com/acme/tool".to_string(),
                ..Default::default()
            },
            filename: None,
        };

        let summary = summarize_repository(&github);
        assert_eq!(summary.name, "tool");
        assert_eq!(summary.description, NO_DESCRIPTION);
        assert_eq!(summary.stars, 0);
        assert_eq!(summary.forks, 0);
        assert_eq!(summary.language, MIXED_LANGUAGE);
        assert_eq!(summary.size, "0 KB");
        assert_eq!(summary.code_files, 2);
        assert_eq!(summary.main_language, "Go");
        assert_eq!(summary.total_bytes, 21);
    }

    #[test]
    fn test_summarize_repository_metadata() {
        let github = GithubData {
            file_contents: contents(&[("lib.rs", "pub fn a() {}")]),
            repo_info: RepoInfo {
                name: "crate".to_string(),
                description: Some("A crate".to_string()),
                stars: Some(42),
                forks: Some(7),
                language: Some("Rust".to_string()),
                size: Some(1234),
                url: "https://github.com/acme/crate".to_string(),
            },
            filename: Some("crate.github".to_string()),
        };

        let summary = summarize_repository(&github);
        assert_eq!(summary.description, "A crate");
        assert_eq!(summary.stars, 42);
        assert_eq!(summary.forks, 7);
        assert_eq!(summary.language, "Rust");
        assert_eq!(summary.size, "1234 KB");
        assert_eq!(summary.url, "https://github.com/acme/crate");
    }

    #[test]
    fn test_summarize_repository_without_files_falls_back_to_repo_language() {
        let github = GithubData {
            file_contents: FileContents::new(),
            repo_info: RepoInfo {
                name: "docs".to_string(),
                language: Some("TeX".to_string()),
                ..Default::default()
            },
            filename: None,
        };

        assert_eq!(summarize_repository(&github).main_language, "TeX");
    }

    #[test]
    fn test_summarize_repository_caps_listing_at_fifteen() {
        let file_contents = numbered_paths(16)
            .into_iter()
            .map(|p| (p, "x".to_string()))
            .collect();
        let github = GithubData {
            file_contents,
            repo_info: RepoInfo::default(),
            filename: None,
        };

        let summary = summarize_repository(&github);
        assert_eq!(summary.listing.shown.len(), GITHUB_LISTING_CAP);
        assert_eq!(summary.listing.remaining, 1);
    }

    #[test]
    fn test_summarize_file_formats_size() {
        let file = SelectedFile {
            name: "main.rs".to_string(),
            size: 1536,
            path: PathBuf::from("main.rs"),
        };

        let summary = summarize_file(&file);
        assert_eq!(summary.name, "main.rs");
        assert_eq!(summary.size, "1.50 KB");
    }
}
