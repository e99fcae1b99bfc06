use crate::backend::{Backend, HttpBackend};
use crate::config::ClientConfig;
use crate::controller::UploadController;
use crate::generate::DocArgs;
use crate::prelude::{eprint, eprintln, println, *};
use crate::view::{TerminalView, View};
use colored::Colorize;
use docgen_core::api::{Lang, Style};
use docgen_core::mode::Mode;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, clap::Args)]
pub struct ShellArgs {
    #[clap(flatten)]
    pub doc: DocArgs,

    /// Mode to start in (single, project, github)
    #[arg(long, default_value = "single")]
    pub mode: Mode,

    /// Default directory for `save` and `pdf`
    #[arg(short, long, env = "DOCGEN_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

const HELP: &str = "\
Commands:
  mode <single|project|github>   switch mode (clears the current selection)
  file <path>                    select a source file
  project <archive.zip>          upload a zipped project
  github <url>                   analyze a GitHub repository (a bare URL works too)
  lang <zh|en>                   documentation language
  style <name>                   manual, tutorial, api, comment or insight
  generate                       generate documentation
  show                           print the current documentation
  load <file.md>                 replace the documentation with an edited file
  copy                           copy the documentation to the clipboard
  save [dir]                     save <name>-docs.md
  pdf [dir]                      save <name>-docs.pdf
  help                           show this help
  quit                           leave the shell";

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Empty,
    Mode(Mode),
    File(PathBuf),
    Project(PathBuf),
    Github(String),
    Lang(Lang),
    Style(Style),
    Generate,
    Show,
    Load(PathBuf),
    Copy,
    Save(Option<PathBuf>),
    Pdf(Option<PathBuf>),
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(ShellCommand::Empty);
        }

        // Enter on a repository URL starts the analysis.
        if looks_like_github_url(line) {
            return Ok(ShellCommand::Github(line.to_string()));
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        let argument = |what: &str| {
            if rest.is_empty() {
                Err(f!("Usage: {command} <{what}>"))
            } else {
                Ok(rest)
            }
        };
        let optional_dir = || (!rest.is_empty()).then(|| PathBuf::from(rest));

        match command.to_lowercase().as_str() {
            "mode" => argument("mode")?.parse().map(ShellCommand::Mode),
            "file" => Ok(ShellCommand::File(PathBuf::from(argument("path")?))),
            "project" => Ok(ShellCommand::Project(PathBuf::from(argument("archive")?))),
            "github" => Ok(ShellCommand::Github(argument("url")?.to_string())),
            "lang" => argument("lang")?.parse().map(ShellCommand::Lang),
            "style" => argument("style")?.parse().map(ShellCommand::Style),
            "generate" | "gen" => Ok(ShellCommand::Generate),
            "show" => Ok(ShellCommand::Show),
            "load" => Ok(ShellCommand::Load(PathBuf::from(argument("file")?))),
            "copy" => Ok(ShellCommand::Copy),
            "save" => Ok(ShellCommand::Save(optional_dir())),
            "pdf" => Ok(ShellCommand::Pdf(optional_dir())),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            other => Err(f!("Unknown command: {other}. Type `help` for a list.")),
        }
    }
}

fn looks_like_github_url(line: &str) -> bool {
    !line.contains(char::is_whitespace)
        && (line.starts_with("https://github.com/")
            || line.starts_with("http://github.com/")
            || line.starts_with("github.com/"))
}

pub async fn run(args: ShellArgs, global: crate::Global) -> Result<()> {
    let backend = HttpBackend::new(ClientConfig::from_global(&global))?;
    if global.verbose {
        eprintln!("{} {}", "Backend:".green(), backend.base_url().bright_white());
    }

    let mut controller =
        UploadController::new(backend, TerminalView::new(false)).with_options(args.doc.options());
    controller.switch_mode(args.mode);
    eprintln!("{}", "Type `help` for a list of commands.".bright_black());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprint!("docgen[{}]> ", controller.state().mode().as_str().bright_cyan());
        let _ = std::io::stderr().flush();

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match ShellCommand::parse(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => execute(&mut controller, command, &args.output_dir).await,
            Err(message) => eprintln!("{}", message.red()),
        }
    }

    Ok(())
}

/// Run one command. Failures are alerted by the controller, so they are only
/// logged here.
pub async fn execute<B: Backend, V: View>(
    controller: &mut UploadController<B, V>,
    command: ShellCommand,
    output_dir: &std::path::Path,
) {
    let result = match command {
        ShellCommand::Empty | ShellCommand::Quit => Ok(()),
        ShellCommand::Help => {
            eprintln!("{HELP}");
            Ok(())
        }
        ShellCommand::Mode(mode) => {
            controller.switch_mode(mode);
            Ok(())
        }
        ShellCommand::File(path) => {
            ensure_mode(controller, Mode::Single);
            controller.select_file(&path).await
        }
        ShellCommand::Project(archive) => {
            ensure_mode(controller, Mode::Project);
            controller.select_project(&archive).await
        }
        ShellCommand::Github(url) => {
            ensure_mode(controller, Mode::Github);
            controller.analyze_github(&url).await
        }
        ShellCommand::Lang(lang) => {
            controller.set_lang(lang);
            eprintln!("{} {}", "Language:".green(), lang);
            Ok(())
        }
        ShellCommand::Style(style) => {
            controller.set_style(style);
            eprintln!("{} {}", "Style:".green(), style);
            Ok(())
        }
        ShellCommand::Generate => controller.generate_documentation().await,
        ShellCommand::Show => controller
            .require_documentation()
            .map(|text| println!("{text}")),
        ShellCommand::Load(path) => controller.load_documentation(&path).await,
        ShellCommand::Copy => controller.copy_documentation(),
        ShellCommand::Save(dir) => controller
            .download_markdown(dir.as_deref().unwrap_or(output_dir))
            .await
            .map(|_| ()),
        ShellCommand::Pdf(dir) => controller
            .export_pdf(dir.as_deref().unwrap_or(output_dir))
            .await
            .map(|_| ()),
    };

    if let Err(err) = result {
        log::debug!("shell command failed: {err}");
    }
}

/// Selecting data for another mode switches to it first.
fn ensure_mode<B: Backend, V: View>(controller: &mut UploadController<B, V>, mode: Mode) {
    if controller.state().mode() != mode {
        controller.switch_mode(mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_line() {
        assert_eq!(ShellCommand::parse("   "), Ok(ShellCommand::Empty));
    }

    #[test]
    fn test_parse_commands_with_arguments() {
        assert_eq!(
            ShellCommand::parse("mode project"),
            Ok(ShellCommand::Mode(Mode::Project))
        );
        assert_eq!(
            ShellCommand::parse("file src/my file.rs"),
            Ok(ShellCommand::File(PathBuf::from("src/my file.rs")))
        );
        assert_eq!(
            ShellCommand::parse("project demo.zip"),
            Ok(ShellCommand::Project(PathBuf::from("demo.zip")))
        );
        assert_eq!(ShellCommand::parse("lang EN"), Ok(ShellCommand::Lang(Lang::En)));
        assert_eq!(
            ShellCommand::parse("style insight"),
            Ok(ShellCommand::Style(Style::Insight))
        );
    }

    #[test]
    fn test_parse_bare_github_url() {
        assert_eq!(
            ShellCommand::parse(" https://github.com/acme/tool "),
            Ok(ShellCommand::Github("https://github.com/acme/tool".to_string()))
        );
        assert_eq!(
            ShellCommand::parse("github acme/tool"),
            Ok(ShellCommand::Github("acme/tool".to_string()))
        );
    }

    #[test]
    fn test_parse_optional_directory() {
        assert_eq!(ShellCommand::parse("save"), Ok(ShellCommand::Save(None)));
        assert_eq!(
            ShellCommand::parse("load notes/edited.md"),
            Ok(ShellCommand::Load(PathBuf::from("notes/edited.md")))
        );
        assert_eq!(
            ShellCommand::parse("pdf out/docs"),
            Ok(ShellCommand::Pdf(Some(PathBuf::from("out/docs"))))
        );
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(ShellCommand::parse("gen"), Ok(ShellCommand::Generate));
        assert_eq!(ShellCommand::parse("exit"), Ok(ShellCommand::Quit));
        assert_eq!(ShellCommand::parse("?"), Ok(ShellCommand::Help));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            ShellCommand::parse("file"),
            Err("Usage: file <path>".to_string())
        );
        assert!(ShellCommand::parse("mode bogus").is_err());
        assert!(ShellCommand::parse("dance").unwrap_err().contains("Unknown command"));
    }
}
