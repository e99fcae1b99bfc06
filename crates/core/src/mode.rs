use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Which upload workflow is active. Exactly one at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Single,
    Project,
    Github,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Single, Mode::Project, Mode::Github];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Single => "single",
            Mode::Project => "project",
            Mode::Github => "github",
        }
    }

    /// Message shown under the progress bar while documentation is generated.
    pub fn progress_text(&self) -> &'static str {
        match self {
            Mode::Single => "AI is analyzing your code and generating documentation, please wait...",
            Mode::Project => {
                "AI is analyzing your project structure and generating documentation, please wait..."
            }
            Mode::Github => {
                "AI is analyzing the GitHub repository and generating documentation, please wait..."
            }
        }
    }

    /// Label of the generate control while a request is in flight.
    pub fn busy_label(&self) -> &'static str {
        match self {
            Mode::Single => "Generating...",
            Mode::Project => "Analyzing project...",
            Mode::Github => "Analyzing repository...",
        }
    }

    /// Period of the cosmetic progress ticker. Larger inputs tick slower.
    pub fn tick_interval(&self) -> Duration {
        match self {
            Mode::Single => Duration::from_millis(300),
            Mode::Project => Duration::from_millis(500),
            Mode::Github => Duration::from_millis(600),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" | "file" => Ok(Mode::Single),
            "project" | "zip" => Ok(Mode::Project),
            "github" | "repo" => Ok(Mode::Github),
            other => Err(format!(
                "Invalid mode: {other}. Valid modes: single, project, github"
            )),
        }
    }
}
