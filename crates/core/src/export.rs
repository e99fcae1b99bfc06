//! Export naming, the Markdown data URI and Markdown to HTML rendering.
//!
//! The PDF itself is printed by the shell. This module only prepares the
//! document handed to the printer and the layout it is printed with.

use crate::state::Selection;
use pulldown_cmark::{html, Options, Parser};
use serde::Serialize;

/// Base name of exported files for the current selection.
///
/// - single file: the name without its last extension
/// - project: the archive name without a trailing `.zip`
/// - repository: the repository name
pub fn docs_stem(selection: &Selection) -> Option<String> {
    match selection {
        Selection::Empty => None,
        Selection::File(file) => Some(strip_extension(&file.name).to_string()),
        Selection::Project(project) => Some(
            project
                .filename
                .strip_suffix(".zip")
                .unwrap_or(&project.filename)
                .to_string(),
        ),
        Selection::Github(github) => Some(github.repo_info.name.clone()),
    }
}

fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

pub fn markdown_file_name(stem: &str) -> String {
    format!("{stem}-docs.md")
}

pub fn pdf_file_name(stem: &str) -> String {
    format!("{stem}-docs.pdf")
}

/// `data:` URI carrying the Markdown text, usable as a download link.
pub fn markdown_data_uri(markdown: &str) -> String {
    format!(
        "data:text/markdown;charset=utf-8,{}",
        urlencoding::encode(markdown)
    )
}

/// A ready-to-use Markdown download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadLink {
    pub file_name: String,
    pub href: String,
}

impl DownloadLink {
    pub fn markdown(stem: &str, markdown: &str) -> Self {
        Self {
            file_name: markdown_file_name(stem),
            href: markdown_data_uri(markdown),
        }
    }
}

/// Render Markdown to an HTML fragment. Raw HTML in the input is kept.
pub fn render_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Page setup for PDF export. Margins are in millimetres.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    pub margin_top: f64,
    pub margin_left: f64,
    pub margin_bottom: f64,
    pub margin_right: f64,
    pub paper_width: f64,
    pub paper_height: f64,
    pub landscape: bool,
    /// Elements that must not be split across pages.
    pub avoid_break_inside: &'static [&'static str],
}

impl Default for PdfLayout {
    fn default() -> Self {
        // A4 portrait
        Self {
            margin_top: 5.0,
            margin_left: 10.0,
            margin_bottom: 10.0,
            margin_right: 10.0,
            paper_width: 210.0,
            paper_height: 297.0,
            landscape: false,
            avoid_break_inside: &["pre", "code", "table"],
        }
    }
}

pub fn mm_to_inches(mm: f64) -> f64 {
    mm / 25.4
}

/// Wrap rendered Markdown in a standalone `markdown-body` document.
pub fn html_document(title: &str, markdown: &str, layout: &PdfLayout) -> String {
    let body = render_html(markdown);
    let avoid = layout.avoid_break_inside.join(", ");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ margin: 0; }}
.markdown-body {{ font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; font-size: 14px; line-height: 1.6; color: #24292f; }}
.markdown-body pre {{ background: #f6f8fa; padding: 12px; border-radius: 6px; overflow: auto; white-space: pre-wrap; }}
.markdown-body code {{ font-family: SFMono-Regular, Consolas, Menlo, monospace; font-size: 12px; }}
.markdown-body table {{ border-collapse: collapse; }}
.markdown-body th, .markdown-body td {{ border: 1px solid #d0d7de; padding: 6px 13px; }}
{avoid} {{ page-break-inside: avoid; break-inside: avoid; }}
</style>
</head>
<body>
<div class="markdown-body">
{body}</div>
</body>
</html>
"#,
        title = escape_title(title),
    )
}

fn escape_title(title: &str) -> String {
    title
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
