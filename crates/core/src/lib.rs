//! Core library for docgen
//!
//! This crate implements the **Functional Core** of the docgen client,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The docgen project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`docgen_core`** (this crate): UI state, wire types and pure transformations with zero I/O
//! - **`docgen`**: HTTP calls, terminal rendering, exports and orchestration (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Deterministic**: Randomness (the cosmetic progress increment) is injected by the caller
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! - [`mode`]: The three upload workflows and their per-mode texts and timings
//! - [`state`]: The immutable upload state and its single transition function
//! - [`api`]: Request/response shapes of the documentation backend
//! - [`summary`]: Language inference, capped file listings and upload summaries
//! - [`progress`]: The cosmetic progress model
//! - [`export`]: Export file naming, the Markdown data URI and HTML rendering
//! - [`error`]: Validation and remote error types
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use docgen_core::mode::Mode;
//! use docgen_core::state::{Action, UploadState};
//! use docgen_core::summary::summarize_project;
//!
//! let state = UploadState::default()
//!     .transition(Action::SwitchMode(Mode::Project))
//!     .transition(Action::ProjectLoaded(project));
//!
//! assert!(state.can_generate());
//! let summary = summarize_project(state.project().unwrap());
//! assert_eq!(summary.main_language, "Python");
//! ```

pub mod api;
pub mod error;
pub mod export;
pub mod mode;
pub mod progress;
pub mod state;
pub mod summary;
