use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "appforge")]
#[command(version)]
#[command(about = "Package a Django app for reuse", long_about = None)]
pub struct Cli {
    /// Name of the Django app to package (lowercase, hyphens allowed)
    pub app_name: String,

    /// Parent directory the package is created under
    pub parent_dir: PathBuf,

    /// Run without interactive prompts, using each decision's default
    #[arg(long)]
    pub no_input: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Editor command used when offering to edit generated files
    #[arg(long, value_name = "CMD")]
    pub editor: Option<String>,

    /// Python interpreter used to run `manage.py startapp`
    #[arg(long, value_name = "CMD", default_value = "python")]
    pub python: String,

    /// Prefix the package name with "django-"
    #[arg(long, overrides_with = "no_prefix")]
    prefix: bool,
    /// Keep the package name unprefixed
    #[arg(long, overrides_with = "prefix")]
    no_prefix: bool,

    /// Commit the generated files and create a dev branch
    #[arg(long, overrides_with = "no_commit")]
    commit: bool,
    /// Skip committing the generated files
    #[arg(long, overrides_with = "commit")]
    no_commit: bool,

    /// Add templates/, static/, and urls.py
    #[arg(long, overrides_with = "no_views")]
    with_views: bool,
    /// Skip the view scaffold
    #[arg(long, overrides_with = "with_views")]
    no_views: bool,

    /// Add a scaffold IndexView, template, and urls.py entry
    #[arg(long, overrides_with = "no_index_view")]
    with_index_view: bool,
    /// Skip the IndexView scaffold
    #[arg(long, overrides_with = "with_index_view")]
    no_index_view: bool,

    /// Fetch Bootstrap and require django-compressor + django-bootstrap5
    #[arg(long, overrides_with = "no_bootstrap")]
    with_bootstrap: bool,
    /// Skip the Bootstrap setup
    #[arg(long, overrides_with = "with_bootstrap")]
    no_bootstrap: bool,

    /// Include the Django REST Framework scaffold
    #[arg(long, overrides_with = "no_api")]
    with_api: bool,
    /// Skip the REST API scaffold
    #[arg(long, overrides_with = "with_api")]
    no_api: bool,

    /// Include OAuth2 authentication with user-scoped models (implies --with-api)
    #[arg(long, overrides_with = "no_oauth")]
    with_oauth: bool,
    /// Skip the OAuth setup
    #[arg(long, overrides_with = "with_oauth")]
    no_oauth: bool,

    /// Install the package with pip immediately after creation
    #[arg(long, overrides_with = "no_install")]
    install: bool,
    /// Skip the pip installation
    #[arg(long, overrides_with = "install")]
    no_install: bool,

    /// Display the generated README when done
    #[arg(long, overrides_with = "no_show_readme")]
    show_readme: bool,
    /// Skip displaying the README
    #[arg(long, overrides_with = "show_readme")]
    no_show_readme: bool,
}

impl Cli {
    pub fn prefix(&self) -> Option<bool> {
        tri(self.prefix, self.no_prefix)
    }

    pub fn commit(&self) -> Option<bool> {
        tri(self.commit, self.no_commit)
    }

    pub fn views(&self) -> Option<bool> {
        tri(self.with_views, self.no_views)
    }

    pub fn index_view(&self) -> Option<bool> {
        tri(self.with_index_view, self.no_index_view)
    }

    pub fn bootstrap(&self) -> Option<bool> {
        tri(self.with_bootstrap, self.no_bootstrap)
    }

    pub fn api(&self) -> Option<bool> {
        tri(self.with_api, self.no_api)
    }

    pub fn oauth(&self) -> Option<bool> {
        tri(self.with_oauth, self.no_oauth)
    }

    pub fn install(&self) -> Option<bool> {
        tri(self.install, self.no_install)
    }

    pub fn show_readme(&self) -> Option<bool> {
        tri(self.show_readme, self.no_show_readme)
    }
}

/// Collapse an affirmative/negative flag pair into a tri-state answer.
fn tri(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}
