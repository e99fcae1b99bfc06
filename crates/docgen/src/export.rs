use crate::prelude::*;
use docgen_core::export::{html_document, mm_to_inches, PdfLayout};
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::Browser;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Put the documentation on the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<(), Error> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| Error::Clipboard(e.to_string()))
}

/// Write the Markdown file into `dir`, creating it when missing.
pub async fn save_markdown(dir: &Path, file_name: &str, markdown: &str) -> Result<PathBuf, Error> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| Error::Export(f!("Failed to create {}: {e}", dir.display())))?;

    let path = dir.join(file_name);
    tokio::fs::write(&path, markdown)
        .await
        .map_err(|e| Error::Export(f!("Failed to write {}: {e}", path.display())))?;

    log::info!("wrote {} bytes to {}", markdown.len(), path.display());
    Ok(path)
}

/// Render the Markdown to HTML and print it to `output` as a PDF.
pub async fn export_pdf(
    title: String,
    markdown: String,
    layout: PdfLayout,
    output: PathBuf,
) -> Result<PathBuf, Error> {
    // headless_chrome is synchronous
    tokio::task::spawn_blocking(move || print_pdf(&title, &markdown, &layout, &output))
        .await
        .map_err(|e| Error::Export(f!("PDF task failed: {e}")))?
}

fn print_pdf(title: &str, markdown: &str, layout: &PdfLayout, output: &Path) -> Result<PathBuf, Error> {
    let html = html_document(title, markdown, layout);

    // The rendered page lives in a temporary file for the duration of the print
    // and is removed when `page` goes out of scope.
    let mut page = tempfile::Builder::new()
        .prefix("docgen-")
        .suffix(".html")
        .tempfile()
        .map_err(|e| Error::Export(f!("Failed to create temporary page: {e}")))?;
    page.write_all(html.as_bytes())
        .and_then(|_| page.flush())
        .map_err(|e| Error::Export(f!("Failed to write temporary page: {e}")))?;

    let url = f!("file://{}", page.path().display());

    let browser = Browser::default().map_err(|e| {
        Error::Export(f!(
            "Failed to launch browser: {e}. Make sure Chrome or Chromium is installed."
        ))
    })?;
    let tab = browser
        .new_tab()
        .map_err(|e| Error::Export(f!("Failed to create new tab: {e}")))?;

    tab.navigate_to(&url)
        .map_err(|e| Error::Export(f!("Failed to load rendered page: {e}")))?
        .wait_until_navigated()
        .map_err(|e| Error::Export(f!("Failed to wait for rendered page: {e}")))?;

    let pdf = tab
        .print_to_pdf(Some(print_options(layout)))
        .map_err(|e| Error::Export(f!("Failed to print PDF: {e}")))?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::Export(f!("Failed to create {}: {e}", parent.display())))?;
    }
    std::fs::write(output, &pdf)
        .map_err(|e| Error::Export(f!("Failed to write {}: {e}", output.display())))?;

    log::info!("wrote {} byte PDF to {}", pdf.len(), output.display());
    Ok(output.to_path_buf())
}

fn print_options(layout: &PdfLayout) -> PrintToPdfOptions {
    PrintToPdfOptions {
        landscape: Some(layout.landscape),
        print_background: Some(true),
        paper_width: Some(mm_to_inches(layout.paper_width)),
        paper_height: Some(mm_to_inches(layout.paper_height)),
        margin_top: Some(mm_to_inches(layout.margin_top)),
        margin_bottom: Some(mm_to_inches(layout.margin_bottom)),
        margin_left: Some(mm_to_inches(layout.margin_left)),
        margin_right: Some(mm_to_inches(layout.margin_right)),
        ..Default::default()
    }
}
