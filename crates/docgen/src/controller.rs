//! The upload controller: wires user actions to the three workflows.
//!
//! State lives in an immutable [`UploadState`] advanced through
//! [`UploadState::transition`]; every UI effect goes through [`View`] and every
//! request through [`Backend`]. Each workflow restores the loading indicator
//! and its controls whichever branch it takes.

use crate::backend::Backend;
use crate::export;
use crate::prelude::*;
use crate::progress::ProgressTicker;
use crate::view::{View, IDLE_GENERATE_LABEL};
use docgen_core::api::{DocOptions, Lang, Style};
use docgen_core::error::ValidationError;
use docgen_core::export::{docs_stem, markdown_file_name, pdf_file_name, DownloadLink, PdfLayout};
use docgen_core::mode::Mode;
use docgen_core::progress::{CosmeticProgress, RESET_DELAY};
use docgen_core::state::{Action, GenerateSource, SelectedFile, UploadState};
use docgen_core::summary::{summarize_file, summarize_project, summarize_repository};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const PARSING_ARCHIVE: &str = "Parsing archive...";
const DOWNLOADING_REPOSITORY: &str = "Downloading GitHub repository...";

/// Stem used when the selection no longer names the documentation.
const FALLBACK_STEM: &str = "documentation";

pub struct UploadController<B, V> {
    backend: B,
    view: V,
    state: UploadState,
    options: DocOptions,
    documentation: Option<String>,
    reset_delay: Duration,
}

impl<B: Backend, V: View> UploadController<B, V> {
    pub fn new(backend: B, view: V) -> Self {
        Self {
            backend,
            view,
            state: UploadState::default(),
            options: DocOptions::default(),
            documentation: None,
            reset_delay: RESET_DELAY,
        }
    }

    pub fn with_options(mut self, options: DocOptions) -> Self {
        self.options = options;
        self
    }

    /// Delay between completion and hiding the progress bar.
    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn set_lang(&mut self, lang: Lang) {
        self.options.lang = lang;
    }

    pub fn set_style(&mut self, style: Style) {
        self.options.style = style;
    }

    /// The current (editable) documentation text.
    pub fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }

    /// Replace the documentation with an edited version.
    pub fn set_documentation(&mut self, text: String) {
        self.documentation = Some(text);
    }

    /// Load edited documentation from a Markdown file.
    pub async fn load_documentation(&mut self, path: &Path) -> Result<(), Error> {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) => {
                let err = Error::FileRead(f!("{}: {e}", path.display()));
                return Err(self.fail("", err));
            }
        };

        let link = DownloadLink::markdown(&self.stem(), &text);
        self.view.show_result(&text, &link);
        self.set_documentation(text);
        Ok(())
    }

    #[cfg(test)]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Apply `action`. Returns false when it was discarded as stale.
    fn dispatch(&mut self, action: Action) -> bool {
        let accepted = self.state.accepts(&action);
        if !accepted {
            log::warn!(
                "discarding {} result, active mode is {}",
                action_name(&action),
                self.state.mode()
            );
        }
        let new_data = accepted && !matches!(action, Action::SwitchMode(_));
        self.state = std::mem::take(&mut self.state).transition(action);

        // Documentation belongs to the data it was generated from.
        if new_data && self.documentation.take().is_some() {
            self.view.hide_result();
        }
        accepted
    }

    /// Reject data for a mode other than the active one before any I/O.
    fn require_mode(&self, mode: Mode) -> Result<(), Error> {
        if self.state.mode() == mode {
            Ok(())
        } else {
            Err(self.fail("", ValidationError::WrongMode(mode).into()))
        }
    }

    fn fail(&self, prefix: &str, err: Error) -> Error {
        self.view.alert(&f!("{prefix}{err}"));
        err
    }

    pub fn switch_mode(&mut self, mode: Mode) {
        self.dispatch(Action::SwitchMode(mode));
        self.documentation = None;

        self.view.hide_result();
        self.view.set_generate_enabled(false);
        self.view.show_mode(mode);
    }

    /// Single-file mode: pick a local file.
    pub async fn select_file(&mut self, path: &Path) -> Result<(), Error> {
        self.require_mode(Mode::Single)?;

        let file = match read_selected_file(path).await {
            Ok(file) => file,
            Err(err) => return Err(self.fail("", err)),
        };

        let summary = summarize_file(&file);
        if self.dispatch(Action::FileSelected(file)) {
            self.view.show_file(&summary);
            self.view.set_generate_enabled(true);
        }
        Ok(())
    }

    /// Project mode: validate and upload a `.zip` archive.
    pub async fn select_project(&mut self, archive: &Path) -> Result<(), Error> {
        self.require_mode(Mode::Project)?;

        let name = archive
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        if !name.ends_with(".zip") {
            let err = ValidationError::NotZipArchive(name).into();
            return Err(self.fail("", err));
        }

        self.view.show_loading(PARSING_ARCHIVE);
        let result = self.backend.process_zip(archive).await;
        self.view.hide_loading();

        let project = result.map_err(|err| self.fail("Failed to process archive: ", err))?;

        let summary = summarize_project(&project);
        if self.dispatch(Action::ProjectLoaded(project)) {
            self.view.show_project(&summary);
            self.view.set_generate_enabled(true);
        }
        Ok(())
    }

    /// GitHub mode: have the backend download and extract a repository.
    pub async fn analyze_github(&mut self, github_url: &str) -> Result<(), Error> {
        self.require_mode(Mode::Github)?;

        let github_url = github_url.trim();
        if github_url.is_empty() {
            return Err(self.fail("", ValidationError::EmptyGithubUrl.into()));
        }

        self.view.show_loading(DOWNLOADING_REPOSITORY);
        self.view.set_analyze_busy(true);
        let result = self.backend.analyze_github(github_url).await;
        self.view.hide_loading();
        self.view.set_analyze_busy(false);

        let github =
            result.map_err(|err| self.fail("Failed to analyze GitHub repository: ", err))?;

        let summary = summarize_repository(&github);
        if self.dispatch(Action::RepositoryAnalyzed(github)) {
            self.view.show_repository(&summary);
            self.view.set_generate_enabled(true);
        }
        Ok(())
    }

    pub async fn generate_documentation(&mut self) -> Result<(), Error> {
        let mode = self.state.mode();
        if let Err(err) = self.state.generate_source() {
            return Err(self.fail("", err.into()));
        }

        self.view.show_loading(mode.progress_text());
        self.view.set_generate_enabled(false);
        self.view.set_generate_label(mode.busy_label());
        self.view.hide_result();

        let sink = self.view.progress();
        sink.set_progress(0.0);
        let ticker = ProgressTicker::start(mode.tick_interval(), Arc::clone(&sink));

        let outcome = self.request_documentation().await;

        ticker.stop().await;
        sink.set_progress(CosmeticProgress::complete());

        let result = match outcome {
            Ok(documentation) => {
                self.show_documentation(documentation);
                Ok(())
            }
            Err(err) => Err(self.fail("Error while generating documentation: ", err)),
        };

        self.view.set_generate_enabled(true);
        self.view.set_generate_label(IDLE_GENERATE_LABEL);

        tokio::time::sleep(self.reset_delay).await;
        self.view.hide_loading();
        sink.set_progress(0.0);

        result
    }

    async fn request_documentation(&self) -> Result<String, Error> {
        let source = self.state.generate_source()?;

        let file_text = match &source {
            GenerateSource::File(file) => {
                let bytes = tokio::fs::read(&file.path)
                    .await
                    .map_err(|e| Error::FileRead(f!("{}: {e}", file.path.display())))?;
                // Undecodable bytes are replaced with U+FFFD.
                String::from_utf8_lossy(&bytes).into_owned()
            }
            GenerateSource::Batch { .. } => String::new(),
        };

        let request = source.into_request(file_text, self.options);
        self.backend.generate_docs(&request).await
    }

    fn show_documentation(&mut self, documentation: String) {
        let link = DownloadLink::markdown(&self.stem(), &documentation);
        self.view.show_result(&documentation, &link);
        self.documentation = Some(documentation);
    }

    fn stem(&self) -> String {
        docs_stem(self.state.selection()).unwrap_or_else(|| FALLBACK_STEM.to_string())
    }

    /// The current documentation, alerting when there is none yet.
    pub fn require_documentation(&self) -> Result<&str, Error> {
        match self.documentation.as_deref() {
            Some(text) => Ok(text),
            None => Err(self.fail("", ValidationError::NoDocumentation.into())),
        }
    }

    /// Markdown download link for the current documentation.
    pub fn download_link(&self) -> Option<DownloadLink> {
        self.documentation
            .as_deref()
            .map(|text| DownloadLink::markdown(&self.stem(), text))
    }

    pub fn copy_documentation(&self) -> Result<(), Error> {
        let text = self.documentation.as_deref().unwrap_or_default();
        match export::copy_to_clipboard(text) {
            Ok(()) => {
                self.view.flash_copied();
                Ok(())
            }
            Err(err) => {
                log::warn!("clipboard copy failed: {err:?}");
                Err(self.fail("", err))
            }
        }
    }

    /// Write `{stem}-docs.md` into `dir`.
    pub async fn download_markdown(&self, dir: &Path) -> Result<PathBuf, Error> {
        let text = self.require_documentation()?;

        let path = export::save_markdown(dir, &markdown_file_name(&self.stem()), text)
            .await
            .map_err(|err| self.fail("", err))?;

        self.view.notify_saved(&path);
        Ok(path)
    }

    /// Print the documentation to `{stem}-docs.pdf` in `dir`.
    pub async fn export_pdf(&self, dir: &Path) -> Result<PathBuf, Error> {
        let text = self.require_documentation()?.to_string();
        let stem = self.stem();
        let output = dir.join(pdf_file_name(&stem));

        self.view.show_loading("Rendering PDF...");
        let result = export::export_pdf(stem, text, PdfLayout::default(), output).await;
        self.view.hide_loading();

        let path = result.map_err(|err| self.fail("", err))?;
        self.view.notify_saved(&path);
        Ok(path)
    }
}

fn action_name(action: &Action) -> &'static str {
    match action {
        Action::SwitchMode(_) => "mode switch",
        Action::FileSelected(_) => "file selection",
        Action::ProjectLoaded(_) => "archive upload",
        Action::RepositoryAnalyzed(_) => "repository analysis",
    }
}

async fn read_selected_file(path: &Path) -> Result<SelectedFile, Error> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| Error::FileRead(f!("{}: {e}", path.display())))?;

    if !metadata.is_file() {
        return Err(Error::FileRead(f!("{}: not a file", path.display())));
    }

    let name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    Ok(SelectedFile {
        name,
        size: metadata.len(),
        path: path.to_path_buf(),
    })
}
