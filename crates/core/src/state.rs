//! The upload state machine.
//!
//! [`UploadState`] is an immutable value. Every change goes through
//! [`UploadState::transition`], which is the only place that decides what a
//! user action or a backend result does to the state.
//!
//! Invariant: the held selection always belongs to the active [`Mode`]. A
//! backend result for another mode (for instance an archive upload that
//! finishes after the user switched to GitHub mode) is discarded.

use crate::api::{DocOptions, FileContents, GenerateDocsRequest, GithubData, ProjectData};
use crate::error::ValidationError;
use crate::mode::Mode;
use serde::Serialize;
use std::path::PathBuf;

/// A local file picked in single-file mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

/// The data held for the active mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Empty,
    File(SelectedFile),
    Project(ProjectData),
    Github(GithubData),
}

impl Selection {
    fn mode(&self) -> Option<Mode> {
        match self {
            Selection::Empty => None,
            Selection::File(_) => Some(Mode::Single),
            Selection::Project(_) => Some(Mode::Project),
            Selection::Github(_) => Some(Mode::Github),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SwitchMode(Mode),
    FileSelected(SelectedFile),
    ProjectLoaded(ProjectData),
    RepositoryAnalyzed(GithubData),
}

impl Action {
    fn into_selection(self) -> Option<Selection> {
        match self {
            Action::SwitchMode(_) => None,
            Action::FileSelected(file) => Some(Selection::File(file)),
            Action::ProjectLoaded(project) => Some(Selection::Project(project)),
            Action::RepositoryAnalyzed(github) => Some(Selection::Github(github)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadState {
    mode: Mode,
    selection: Selection,
}

/// What generation will be run against, borrowed from the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateSource<'a> {
    File(&'a SelectedFile),
    Batch {
        filename: String,
        files: &'a FileContents,
    },
}

impl GenerateSource<'_> {
    /// Build the request. `file_text` is the file's content in single mode and
    /// is ignored for batches.
    pub fn into_request(self, file_text: String, options: DocOptions) -> GenerateDocsRequest {
        match self {
            GenerateSource::File(file) => {
                GenerateDocsRequest::single(file.name.clone(), file_text, options)
            }
            GenerateSource::Batch { filename, files } => {
                GenerateDocsRequest::batch(filename, files.clone(), options)
            }
        }
    }
}

impl UploadState {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            selection: Selection::Empty,
        }
    }

    /// Apply an action and return the next state.
    ///
    /// Switching modes always clears the selection, even when switching to the
    /// mode that is already active. Data for a mode other than the active one
    /// leaves the state unchanged.
    pub fn transition(self, action: Action) -> UploadState {
        match action {
            Action::SwitchMode(mode) => UploadState::new(mode),
            data => {
                let Some(selection) = data.into_selection() else {
                    return self;
                };
                if selection.mode() != Some(self.mode) {
                    return self;
                }
                UploadState {
                    mode: self.mode,
                    selection,
                }
            }
        }
    }

    /// Whether `action` would change the held data when applied.
    pub fn accepts(&self, action: &Action) -> bool {
        match action {
            Action::SwitchMode(_) => true,
            Action::FileSelected(_) => self.mode == Mode::Single,
            Action::ProjectLoaded(_) => self.mode == Mode::Project,
            Action::RepositoryAnalyzed(_) => self.mode == Mode::Github,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        match &self.selection {
            Selection::File(file) => Some(file),
            _ => None,
        }
    }

    pub fn project(&self) -> Option<&ProjectData> {
        match &self.selection {
            Selection::Project(project) => Some(project),
            _ => None,
        }
    }

    pub fn github(&self) -> Option<&GithubData> {
        match &self.selection {
            Selection::Github(github) => Some(github),
            _ => None,
        }
    }

    /// The generate action is enabled only when the active mode has data.
    pub fn can_generate(&self) -> bool {
        self.generate_source().is_ok()
    }

    /// Validate that generation can start and return what it runs on.
    pub fn generate_source(&self) -> Result<GenerateSource<'_>, ValidationError> {
        match (self.mode, &self.selection) {
            (Mode::Single, Selection::File(file)) => Ok(GenerateSource::File(file)),
            (Mode::Project, Selection::Project(project)) => Ok(GenerateSource::Batch {
                filename: project.filename.clone(),
                files: &project.file_contents,
            }),
            (Mode::Github, Selection::Github(github)) => Ok(GenerateSource::Batch {
                filename: github.request_filename(),
                files: &github.file_contents,
            }),
            (Mode::Single, _) => Err(ValidationError::NoFileSelected),
            (Mode::Project, _) => Err(ValidationError::NoProjectUploaded),
            (Mode::Github, _) => Err(ValidationError::NoRepositoryAnalyzed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RepoInfo;

    fn file() -> SelectedFile {
        SelectedFile {
            name: "main.rs".to_string(),
            size: 2048,
            path: PathBuf::from("/tmp/main.rs"),
        }
    }

    fn project() -> ProjectData {
        let mut file_contents = FileContents::new();
        file_contents.insert("a.py".to_string(), "x".to_string());
        ProjectData {
            file_contents,
            filename: "demo.zip".to_string(),
        }
    }

    fn github() -> GithubData {
        let mut file_contents = FileContents::new();
        file_contents.insert("cmd/main.go".to_string(), "package main".to_string());
        GithubData {
            file_contents,
            repo_info: RepoInfo {
                name: "tool".to_string(),
                ..Default::default()
            },
            filename: None,
        }
    }

    // ============================================================================
    // Mode switching tests
    // ============================================================================

    #[test]
    fn test_default_state_is_single_and_empty() {
        let state = UploadState::default();
        assert_eq!(state.mode(), Mode::Single);
        assert_eq!(state.selection(), &Selection::Empty);
        assert!(!state.can_generate());
    }

    #[test]
    fn test_switch_mode_clears_every_slot() {
        let loaded = [
            UploadState::new(Mode::Single).transition(Action::FileSelected(file())),
            UploadState::new(Mode::Project).transition(Action::ProjectLoaded(project())),
            UploadState::new(Mode::Github).transition(Action::RepositoryAnalyzed(github())),
        ];

        for state in loaded {
            assert!(state.can_generate());
            for mode in Mode::ALL {
                let next = state.clone().transition(Action::SwitchMode(mode));
                assert_eq!(next.mode(), mode);
                assert_eq!(next.selection(), &Selection::Empty);
                assert!(next.file().is_none());
                assert!(next.project().is_none());
                assert!(next.github().is_none());
                assert!(!next.can_generate());
            }
        }
    }

    #[test]
    fn test_switch_to_same_mode_still_resets() {
        let state = UploadState::new(Mode::Single)
            .transition(Action::FileSelected(file()))
            .transition(Action::SwitchMode(Mode::Single));

        assert_eq!(state.selection(), &Selection::Empty);
    }

    // ============================================================================
    // Data transition tests
    // ============================================================================

    #[test]
    fn test_file_selected_in_single_mode() {
        let state = UploadState::default().transition(Action::FileSelected(file()));
        assert_eq!(state.file(), Some(&file()));
        assert!(state.can_generate());
    }

    #[test]
    fn test_new_file_replaces_previous() {
        let other = SelectedFile {
            name: "lib.rs".to_string(),
            ..file()
        };
        let state = UploadState::default()
            .transition(Action::FileSelected(file()))
            .transition(Action::FileSelected(other.clone()));

        assert_eq!(state.file(), Some(&other));
    }

    #[test]
    fn test_stale_project_result_is_discarded() {
        let state = UploadState::new(Mode::Github).transition(Action::ProjectLoaded(project()));

        assert_eq!(state.mode(), Mode::Github);
        assert_eq!(state.selection(), &Selection::Empty);
        assert!(!state.can_generate());
    }

    #[test]
    fn test_stale_result_keeps_existing_data() {
        let state = UploadState::new(Mode::Github)
            .transition(Action::RepositoryAnalyzed(github()))
            .transition(Action::FileSelected(file()));

        assert_eq!(state.github(), Some(&github()));
    }

    #[test]
    fn test_accepts_matches_transition() {
        let state = UploadState::new(Mode::Project);
        assert!(state.accepts(&Action::ProjectLoaded(project())));
        assert!(!state.accepts(&Action::FileSelected(file())));
        assert!(!state.accepts(&Action::RepositoryAnalyzed(github())));
        assert!(state.accepts(&Action::SwitchMode(Mode::Single)));
    }

    // ============================================================================
    // generate_source tests
    // ============================================================================

    #[test]
    fn test_generate_source_requires_data_per_mode() {
        assert_eq!(
            UploadState::new(Mode::Single).generate_source(),
            Err(ValidationError::NoFileSelected)
        );
        assert_eq!(
            UploadState::new(Mode::Project).generate_source(),
            Err(ValidationError::NoProjectUploaded)
        );
        assert_eq!(
            UploadState::new(Mode::Github).generate_source(),
            Err(ValidationError::NoRepositoryAnalyzed)
        );
    }

    #[test]
    fn test_single_source_builds_text_request() {
        let state = UploadState::default().transition(Action::FileSelected(file()));
        let request = state
            .generate_source()
            .unwrap()
            .into_request("fn main() {}".to_string(), DocOptions::default());

        assert_eq!(request.filename, "main.rs");
        assert!(!request.is_batch);
        assert_eq!(
            request.content,
            crate::api::DocContent::Text("fn main() {}".to_string())
        );
    }

    #[test]
    fn test_project_source_builds_batch_request() {
        let state = UploadState::new(Mode::Project).transition(Action::ProjectLoaded(project()));
        let request = state
            .generate_source()
            .unwrap()
            .into_request(String::new(), DocOptions::default());

        assert_eq!(request.filename, "demo.zip");
        assert!(request.is_batch);
        assert_eq!(
            request.content,
            crate::api::DocContent::Files(project().file_contents)
        );
    }

    #[test]
    fn test_github_source_uses_repository_filename() {
        let state =
            UploadState::new(Mode::Github).transition(Action::RepositoryAnalyzed(github()));

        match state.generate_source().unwrap() {
            GenerateSource::Batch { filename, files } => {
                assert_eq!(filename, "tool.github");
                assert_eq!(files.len(), 1);
            }
            other => panic!("expected batch source, got {other:?}"),
        }
    }
}
