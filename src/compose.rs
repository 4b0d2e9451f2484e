use anyhow::{Context as _, Result};
use console::style;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tera::{Context, Tera};
use tracing::{info, warn};

use crate::fetch;
use crate::git;
use crate::plan::ScaffoldPlan;
use crate::prompt::Prompter;
use crate::render;
use crate::templates;
use crate::verify;

const BOOTSTRAP_CSS_URL: &str =
    "https://raw.githubusercontent.com/twbs/bootstrap/main/dist/css/bootstrap.css";
const BOOTSTRAP_JS_URL: &str =
    "https://raw.githubusercontent.com/twbs/bootstrap/main/dist/js/bootstrap.bundle.js";

const STYLING_REQUIRES: [&str; 2] = ["django-compressor", "django-bootstrap5"];
const API_REQUIRES: [&str; 2] = ["djangorestframework", "drf-spectacular"];
const OAUTH_REQUIRE: &str = "django-oauth-toolkit";

const COMMIT_MESSAGE: &str = "Package the app for reusability";
const DEV_BRANCH: &str = "dev";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    None,
    OfferEditorOpen,
}

/// One unit of scaffold work: render a registered template and write it to
/// a package-root-relative destination. Overrides are merged over the base
/// substitution set.
pub struct TemplateOp {
    pub template: &'static str,
    pub dest: PathBuf,
    pub overrides: Vec<(&'static str, String)>,
    pub post: PostAction,
}

impl TemplateOp {
    fn new(template: &'static str, dest: impl Into<PathBuf>) -> Self {
        Self {
            template,
            dest: dest.into(),
            overrides: Vec::new(),
            post: PostAction::None,
        }
    }

    fn with_override(mut self, key: &'static str, value: String) -> Self {
        self.overrides.push((key, value));
        self
    }

    fn with_post(mut self, post: PostAction) -> Self {
        self.post = post;
        self
    }
}

/// Restores the original working directory on every exit path.
struct WorkdirGuard {
    original: PathBuf,
}

impl WorkdirGuard {
    fn change_to(dir: &Path) -> Result<Self> {
        let original = env::current_dir().context("cannot determine the current directory")?;
        env::set_current_dir(dir)
            .with_context(|| format!("failed to change into {}", dir.display()))?;
        info!("cd {}", dir.display());
        Ok(Self { original })
    }
}

impl Drop for WorkdirGuard {
    fn drop(&mut self) {
        if let Err(err) = env::set_current_dir(&self.original) {
            warn!(
                "failed to restore working directory {}: {}",
                self.original.display(),
                err
            );
        }
    }
}

/// Executes a resolved plan as an ordered sequence of side-effecting steps.
///
/// The context guard, required-directory creation, the module-skeleton
/// generator, and template writes are fatal; version control, asset
/// fetches, the editor, and the pip install fail soft.
pub struct Composer<'a> {
    plan: &'a ScaffoldPlan,
    prompter: &'a Prompter,
    tera: Tera,
    context: Context,
}

impl<'a> Composer<'a> {
    pub fn new(plan: &'a ScaffoldPlan, prompter: &'a Prompter) -> Result<Self> {
        let tera = templates::template_registry()?;
        let context = render::base_context(plan)?;
        Ok(Self {
            plan,
            prompter,
            tera,
            context,
        })
    }

    pub fn run(&self) -> Result<()> {
        let launch_dir = env::current_dir().context("cannot determine the current directory")?;
        verify::ensure_project_root(&launch_dir)?;

        // When the module root already exists the skeleton was generated on
        // an earlier run; re-create nothing and let the template copies
        // overwrite in place.
        if !self.plan.module_dir.is_dir() {
            self.create_package_dirs()?;
            self.generate_module_skeleton()?;
        }

        {
            let _workdir = WorkdirGuard::change_to(&self.plan.repo_dir)?;
            self.copy_base_files()?;
            self.init_version_control();
            if self.plan.add_views {
                self.scaffold_views()?;
            }
            if self.plan.add_api {
                self.scaffold_api()?;
            }
        }

        self.install_package();
        self.finish();
        Ok(())
    }

    fn create_package_dirs(&self) -> Result<()> {
        info!("mkdir -p {}", self.plan.module_dir.display());
        fs::create_dir_all(&self.plan.module_dir)
            .with_context(|| format!("couldn't create directory: {}", self.plan.module_dir.display()))?;
        info!("mkdir {}", self.plan.project_dir.display());
        fs::create_dir_all(&self.plan.project_dir)
            .with_context(|| format!("couldn't create directory: {}", self.plan.project_dir.display()))?;
        Ok(())
    }

    fn generate_module_skeleton(&self) -> Result<()> {
        info!(
            "{} manage.py startapp {} {}",
            self.plan.python_command,
            self.plan.module_name,
            self.plan.module_dir.display()
        );
        let status = Command::new(&self.plan.python_command)
            .args(["manage.py", "startapp", &self.plan.module_name])
            .arg(&self.plan.module_dir)
            .status()
            .with_context(|| {
                format!(
                    "failed to run `{} manage.py startapp`",
                    self.plan.python_command
                )
            })?;
        if !status.success() {
            anyhow::bail!(
                "`{} manage.py startapp {}` exited with {}",
                self.plan.python_command,
                self.plan.module_name,
                status
            );
        }
        Ok(())
    }

    fn copy_base_files(&self) -> Result<()> {
        self.copy_template(TemplateOp::new("gitignore", ".gitignore"))?;
        self.copy_template(
            TemplateOp::new("README.md", "README.md").with_post(PostAction::OfferEditorOpen),
        )?;
        self.copy_template(TemplateOp::new("setup.py", "setup.py"))?;
        self.copy_template(TemplateOp::new("MANIFEST.in", "MANIFEST.in"))?;

        let docs_dir = self.plan.repo_dir.join("docs");
        fs::create_dir_all(&docs_dir)
            .with_context(|| format!("couldn't create directory: {}", docs_dir.display()))?;
        fs::write(docs_dir.join(".gitignore"), "")
            .with_context(|| format!("failed to write {}", docs_dir.join(".gitignore").display()))?;

        let commands_rel = Path::new(&self.plan.module_name)
            .join("management")
            .join("commands");
        let commands_dir = self.plan.repo_dir.join(&commands_rel);
        fs::create_dir_all(&commands_dir)
            .with_context(|| format!("couldn't create directory: {}", commands_dir.display()))?;
        for marker in [
            commands_dir.join("__init__.py"),
            self.plan.repo_dir.join(&self.plan.module_name).join("management").join("__init__.py"),
        ] {
            fs::write(&marker, "")
                .with_context(|| format!("failed to write {}", marker.display()))?;
        }
        self.copy_template(TemplateOp::new(
            "example_command.py",
            commands_rel.join("example_command.py"),
        ))?;
        Ok(())
    }

    fn init_version_control(&self) {
        info!("git init {}", self.plan.repo_dir.display());
        let repo = match git::init_repository(&self.plan.repo_dir) {
            Ok(repo) => repo,
            Err(err) => {
                warn!("git init failed: {:#}", err);
                return;
            }
        };
        if !self.plan.commit_changes {
            return;
        }
        if let Err(err) = git::commit_all(&repo, COMMIT_MESSAGE) {
            warn!("git commit failed: {:#}", err);
            return;
        }
        if let Err(err) = git::switch_to_branch(&repo, DEV_BRANCH) {
            warn!("failed to switch to branch '{}': {:#}", DEV_BRANCH, err);
        }
    }

    fn scaffold_views(&self) -> Result<()> {
        for dir in [&self.plan.templates_dir, &self.plan.static_dir] {
            info!("mkdir -p {}", dir.display());
            fs::create_dir_all(dir)
                .with_context(|| format!("couldn't create directory: {}", dir.display()))?;
        }

        let module_rel = Path::new(&self.plan.module_name);
        self.copy_template(TemplateOp::new("urls.py", module_rel.join("urls.py")))?;

        if !self.plan.add_index_view {
            return Ok(());
        }

        self.copy_template(TemplateOp::new("views.py", module_rel.join("views.py")))?;
        // The with-view route set supersedes the bare one.
        self.copy_template(TemplateOp::new("urls-with-view.py", module_rel.join("urls.py")))?;

        let templates_rel = module_rel.join("templates").join(&self.plan.module_name);
        if self.plan.add_styling {
            self.scaffold_styling(&templates_rel)?;
        } else {
            self.copy_template(TemplateOp::new(
                "index-barebones.html",
                templates_rel.join("index.html"),
            ))?;
        }
        Ok(())
    }

    fn scaffold_styling(&self, templates_rel: &Path) -> Result<()> {
        let css_dir = self.plan.static_dir.join("css");
        let js_dir = self.plan.static_dir.join("js");
        for dir in [&css_dir, &js_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("couldn't create directory: {}", dir.display()))?;
        }

        // The Bootstrap bundles are cosmetic; a failed fetch leaves a
        // partially-styled result and the run continues.
        for (url, dir) in [(BOOTSTRAP_CSS_URL, &css_dir), (BOOTSTRAP_JS_URL, &js_dir)] {
            info!("fetching {}", url);
            if let Err(err) = fetch::download_to(url, dir) {
                warn!("failed to fetch {}: {:#}", url, err);
            }
        }

        let requires = STYLING_REQUIRES
            .iter()
            .map(|package| format!("        '{package}',"))
            .collect::<Vec<_>>()
            .join("\n");

        let static_rel = Path::new(&self.plan.module_name)
            .join("static")
            .join(&self.plan.module_name);
        self.copy_template(TemplateOp::new(
            "index-bootstrap.html",
            templates_rel.join("index.html"),
        ))?;
        self.copy_template(TemplateOp::new("base.html", templates_rel.join("base.html")))?;
        self.copy_template(
            TemplateOp::new("setup-with-requirements.py", "setup.py")
                .with_override("install_requires", requires),
        )?;
        self.copy_template(TemplateOp::new(
            "app.css",
            static_rel.join("css").join(format!("{}.css", self.plan.module_name)),
        ))?;
        self.copy_template(TemplateOp::new(
            "app.js",
            static_rel.join("js").join(format!("{}.js", self.plan.module_name)),
        ))?;
        Ok(())
    }

    fn scaffold_api(&self) -> Result<()> {
        let module_rel = Path::new(&self.plan.module_name);
        let mut requires: Vec<&str> = API_REQUIRES.to_vec();

        if self.plan.add_oauth {
            self.copy_template(TemplateOp::new("models-oauth.py", module_rel.join("models.py")))?;
            self.copy_template(TemplateOp::new(
                "serializers-oauth.py",
                module_rel.join("serializers.py"),
            ))?;
            self.copy_template(TemplateOp::new(
                "api_views-oauth.py",
                module_rel.join("api_views.py"),
            ))?;
            // The API route set supersedes any view-only routes.
            self.copy_template(TemplateOp::new("urls-with-oauth.py", module_rel.join("urls.py")))?;

            let tests_dir = self.plan.repo_dir.join("tests");
            fs::create_dir_all(&tests_dir)
                .with_context(|| format!("couldn't create directory: {}", tests_dir.display()))?;
            self.copy_template(TemplateOp::new("conftest.py", "conftest.py"))?;
            self.copy_template(TemplateOp::new("test_models.py", "tests/test_models.py"))?;
            self.copy_template(TemplateOp::new("test_api.py", "tests/test_api.py"))?;

            requires.push(OAUTH_REQUIRE);
        } else {
            self.copy_template(TemplateOp::new("serializers.py", module_rel.join("serializers.py")))?;
            self.copy_template(TemplateOp::new("api_views.py", module_rel.join("api_views.py")))?;
            self.copy_template(TemplateOp::new("urls-with-api.py", module_rel.join("urls.py")))?;
        }

        amend_install_requires(&self.plan.repo_dir.join("setup.py"), &requires)?;
        Ok(())
    }

    fn copy_template(&self, op: TemplateOp) -> Result<()> {
        let dest = self.plan.repo_dir.join(&op.dest);
        info!("creating {}", dest.display());
        let content = render::render_named(&self.tera, op.template, &self.context, &op.overrides)?;
        fs::write(&dest, content).with_context(|| format!("failed to write {}", dest.display()))?;
        if op.post == PostAction::OfferEditorOpen {
            self.offer_editor_open(&dest)?;
        }
        Ok(())
    }

    fn offer_editor_open(&self, path: &Path) -> Result<()> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let question = format!("Edit {} with {} now?", name, self.plan.editor_command);
        if !self.prompter.confirm(&question, false)? {
            return Ok(());
        }
        let mut parts = self.plan.editor_command.split_whitespace();
        let Some(program) = parts.next() else {
            return Ok(());
        };
        match Command::new(program).args(parts).arg(path).status() {
            Ok(status) if status.success() => {}
            Ok(status) => warn!("editor exited with {}", status),
            Err(err) => warn!("failed to launch {}: {}", self.plan.editor_command, err),
        }
        Ok(())
    }

    fn install_package(&self) {
        if self.plan.install_after {
            info!("pip install -e {}", self.plan.repo_dir.display());
            match Command::new("pip")
                .args(["install", "-e"])
                .arg(&self.plan.repo_dir)
                .status()
            {
                Ok(status) if status.success() => {}
                Ok(status) => warn!("pip install exited with {}", status),
                Err(err) => warn!("failed to run pip install: {}", err),
            }
        } else {
            println!("You can install it later with:");
            println!("    pip install -e {}", self.plan.repo_dir.display());
        }
    }

    fn finish(&self) {
        println!("\n{}", style("Scaffold complete.").green().bold());
        if self.plan.show_readme {
            let readme = self.plan.repo_dir.join("README.md");
            match fs::read_to_string(&readme) {
                Ok(content) => println!("\n{content}"),
                Err(err) => warn!("failed to read {}: {}", readme.display(), err),
            }
        }
    }
}

/// Insert install-time dependencies into the packaging descriptor.
///
/// Names already present are skipped. When an `install_requires=[` marker
/// exists the new entries are prepended to it; otherwise the whole block is
/// synthesized after `setup(`.
pub fn amend_install_requires(setup_path: &Path, packages: &[&str]) -> Result<()> {
    let content = fs::read_to_string(setup_path)
        .with_context(|| format!("failed to read {}", setup_path.display()))?;

    let lines = packages
        .iter()
        .filter(|package| !content.contains(**package))
        .map(|package| format!("        '{package}',"))
        .collect::<Vec<_>>()
        .join("\n");
    if lines.is_empty() {
        return Ok(());
    }

    let updated = if content.contains("install_requires=[") {
        content.replacen("install_requires=[", &format!("install_requires=[\n{lines}"), 1)
    } else {
        content.replacen(
            "setup(",
            &format!("setup(\n    install_requires=[\n{lines}\n    ],"),
            1,
        )
    };

    fs::write(setup_path, updated)
        .with_context(|| format!("failed to write {}", setup_path.display()))?;
    Ok(())
}
