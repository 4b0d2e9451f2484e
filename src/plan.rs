use anyhow::{Context, Result};
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::prompt::Prompter;
use crate::verify;

/// Literal prepended to the package name when the prefix decision is yes.
pub const PACKAGE_PREFIX: &str = "django-";

/// The resolved, immutable set of decisions for one run.
///
/// Every derived path is computed exactly once, from the final values of
/// `app_name`, `package_prefix`, and `module_name`. The composer reads the
/// plan; nothing mutates it afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldPlan {
    pub app_name: String,
    pub module_name: String,
    pub package_prefix: String,
    pub output_root: PathBuf,
    pub repo_dir: PathBuf,
    pub module_dir: PathBuf,
    pub project_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
    pub add_views: bool,
    pub add_index_view: bool,
    pub add_styling: bool,
    pub add_api: bool,
    pub add_oauth: bool,
    pub install_after: bool,
    pub commit_changes: bool,
    pub show_readme: bool,
    pub editor_command: String,
    pub python_command: String,
}

/// The app name as a module identifier: hyphens become underscores.
pub fn module_name_for(app_name: &str) -> String {
    app_name.replace('-', "_")
}

/// Reduce flags, prompts, and defaults to a concrete [`ScaffoldPlan`].
///
/// Each tri-state decision resolves in order: explicit flag, then the
/// documented default under `--no-input`, else an interactive prompt with
/// that default. Gated decisions (index view under views, styling under the
/// index view, OAuth under the API) resolve to false without prompting when
/// their parent is false; an explicit `--with-oauth` with the API flag unset
/// forces the API scaffold on instead of prompting contradictorily.
pub fn resolve(cli: &Cli, prompter: &Prompter) -> Result<ScaffoldPlan> {
    verify::validate_app_name(&cli.app_name)?;

    let editor_command = match &cli.editor {
        Some(editor) => editor.clone(),
        None => prompter.input("What command should we use to edit files?", "nano")?,
    };

    let add_prefix = match cli.prefix() {
        Some(choice) => choice,
        None => prompter.confirm("Prefix the new package name with \"django-\"?", false)?,
    };
    let package_prefix = if add_prefix { PACKAGE_PREFIX } else { "" }.to_string();

    let commit_changes = resolve_feature(
        cli.commit(),
        prompter,
        "Commit the generated files and create a dev branch?",
        true,
    )?;

    let add_views = resolve_feature(
        cli.views(),
        prompter,
        "Add templates/, static/, and urls.py?",
        true,
    )?;

    let add_index_view = if add_views {
        resolve_feature(
            cli.index_view(),
            prompter,
            "Add a scaffold IndexView, template, and entry in urls.py?",
            true,
        )?
    } else {
        false
    };

    let add_styling = if add_views && add_index_view {
        resolve_feature(
            cli.bootstrap(),
            prompter,
            "Fetch Bootstrap and require django-compressor + django-bootstrap5?",
            true,
        )?
    } else {
        false
    };

    // An explicit OAuth request with the API decision unset settles the API
    // decision instead of prompting for it.
    let add_api = if cli.oauth() == Some(true) && cli.api().is_none() {
        true
    } else {
        resolve_feature(
            cli.api(),
            prompter,
            "Include Django REST Framework (DRF) support?",
            true,
        )?
    };

    let add_oauth = if add_api {
        resolve_feature(
            cli.oauth(),
            prompter,
            "Include OAuth2 authentication with user-scoped models?",
            true,
        )?
    } else {
        false
    };

    let install_after = resolve_feature(
        cli.install(),
        prompter,
        "Install the package with pip now?",
        true,
    )?;

    let show_readme = resolve_feature(
        cli.show_readme(),
        prompter,
        "Display the README when done?",
        true,
    )?;

    let module_name = module_name_for(&cli.app_name);
    let output_root = absolutize(&cli.parent_dir)?;
    let repo_dir = output_root.join(format!("{package_prefix}{}", cli.app_name));
    let module_dir = repo_dir.join(&module_name);
    let project_dir = repo_dir.join("Project");
    let templates_dir = module_dir.join("templates").join(&module_name);
    let static_dir = module_dir.join("static").join(&module_name);

    Ok(ScaffoldPlan {
        app_name: cli.app_name.clone(),
        module_name,
        package_prefix,
        output_root,
        repo_dir,
        module_dir,
        project_dir,
        templates_dir,
        static_dir,
        add_views,
        add_index_view,
        add_styling,
        add_api,
        add_oauth,
        install_after,
        commit_changes,
        show_readme,
        editor_command,
        python_command: cli.python.clone(),
    })
}

fn resolve_feature(
    flag: Option<bool>,
    prompter: &Prompter,
    question: &str,
    default: bool,
) -> Result<bool> {
    match flag {
        Some(choice) => Ok(choice),
        None => prompter.confirm(question, default),
    }
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let cwd = env::current_dir().context("cannot determine the current directory")?;
        Ok(cwd.join(path))
    }
}
