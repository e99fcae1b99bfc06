use crate::backend::{Backend, HttpBackend};
use crate::config::ClientConfig;
use crate::controller::UploadController;
use crate::prelude::{eprintln, println, *};
use crate::view::{TerminalView, View};
use colored::Colorize;
use docgen_core::api::{DocOptions, Lang, Style};
use docgen_core::export::DownloadLink;
use docgen_core::mode::Mode;
use serde::Serialize;
use std::path::PathBuf;

/// Output language and style sent with every generation request.
#[derive(Debug, Clone, clap::Args)]
pub struct DocArgs {
    /// Documentation language (zh, en)
    #[arg(long, env = "DOCGEN_LANG", default_value = "zh")]
    pub lang: Lang,

    /// Documentation style (manual, tutorial, api, comment, insight)
    #[arg(long, env = "DOCGEN_STYLE", default_value = "manual")]
    pub style: Style,
}

impl DocArgs {
    pub fn options(&self) -> DocOptions {
        DocOptions {
            lang: self.lang,
            style: self.style,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct GenerateOptions {
    #[clap(flatten)]
    pub doc: DocArgs,

    /// Directory to save `<name>-docs.md` into
    #[arg(short, long, env = "DOCGEN_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Also print the documentation to `<name>-docs.pdf`
    #[arg(long)]
    pub pdf: bool,

    /// Copy the documentation to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args)]
pub struct FileArgs {
    /// Source file to document
    pub path: PathBuf,

    #[clap(flatten)]
    pub options: GenerateOptions,
}

#[derive(Debug, clap::Args)]
pub struct ProjectArgs {
    /// Zipped project archive
    pub archive: PathBuf,

    #[clap(flatten)]
    pub options: GenerateOptions,
}

#[derive(Debug, clap::Args)]
pub struct GithubArgs {
    /// Repository URL, e.g. https://github.com/owner/repo
    pub url: String,

    #[clap(flatten)]
    pub options: GenerateOptions,
}

/// What a one-shot run works on.
#[derive(Debug, Clone)]
pub enum Target {
    File(PathBuf),
    Project(PathBuf),
    Github(String),
}

impl Target {
    fn mode(&self) -> Mode {
        match self {
            Target::File(_) => Mode::Single,
            Target::Project(_) => Mode::Project,
            Target::Github(_) => Mode::Github,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateOutput {
    pub mode: Mode,
    pub documentation: String,
    pub download: DownloadLink,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_path: Option<PathBuf>,
    pub copied: bool,
}

pub async fn run_file(args: FileArgs, global: crate::Global) -> Result<()> {
    run(Target::File(args.path), args.options, global).await
}

pub async fn run_project(args: ProjectArgs, global: crate::Global) -> Result<()> {
    run(Target::Project(args.archive), args.options, global).await
}

pub async fn run_github(args: GithubArgs, global: crate::Global) -> Result<()> {
    run(Target::Github(args.url), args.options, global).await
}

async fn run(target: Target, options: GenerateOptions, global: crate::Global) -> Result<()> {
    let backend = HttpBackend::new(ClientConfig::from_global(&global))?;
    if global.verbose {
        eprintln!("{} {}", "Backend:".green(), backend.base_url().bright_white());
    }

    let view = TerminalView::new(options.json);
    let output = generate(backend, view, target, &options).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}

/// Run one full workflow: select, generate, then export as requested.
///
/// Failures have already been alerted through the view by the time they are
/// returned here.
pub async fn generate<B: Backend, V: View>(
    backend: B,
    view: V,
    target: Target,
    options: &GenerateOptions,
) -> Result<GenerateOutput> {
    let mut controller = UploadController::new(backend, view).with_options(options.doc.options());
    let mode = target.mode();
    controller.switch_mode(mode);

    let loaded = match &target {
        Target::File(path) => controller.select_file(path).await,
        Target::Project(archive) => controller.select_project(archive).await,
        Target::Github(url) => controller.analyze_github(url).await,
    };
    loaded.map_err(|err| eyre!(err))?;

    controller
        .generate_documentation()
        .await
        .map_err(|err| eyre!(err))?;

    let copied = options.copy && controller.copy_documentation().is_ok();

    let markdown_path = match &options.output_dir {
        Some(dir) => Some(controller.download_markdown(dir).await?),
        None => None,
    };

    let pdf_path = if options.pdf {
        let dir = options
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        Some(controller.export_pdf(&dir).await?)
    } else {
        None
    };

    let download = controller
        .download_link()
        .ok_or_eyre("No documentation was returned")?;

    Ok(GenerateOutput {
        mode,
        documentation: controller.documentation().unwrap_or_default().to_string(),
        download,
        markdown_path,
        pdf_path,
        copied,
    })
}
