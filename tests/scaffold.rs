use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

use appforge::compose::Composer;
use appforge::plan::{module_name_for, ScaffoldPlan};
use appforge::prompt::Prompter;

// The composer changes the process working directory; serialize every test
// that runs it.
static CWD_LOCK: Mutex<()> = Mutex::new(());

/// A fake Django project root: a directory holding the sentinel file.
fn project_root() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("manage.py"), "").unwrap();
    dir
}

/// A plan with every feature off, a stubbed skeleton generator, and no
/// package-name prefix.
fn plan_for(app_name: &str, output_root: &Path) -> ScaffoldPlan {
    let module_name = module_name_for(app_name);
    let repo_dir = output_root.join(app_name);
    let module_dir = repo_dir.join(&module_name);
    ScaffoldPlan {
        app_name: app_name.to_string(),
        module_name: module_name.clone(),
        package_prefix: String::new(),
        output_root: output_root.to_path_buf(),
        repo_dir: repo_dir.clone(),
        module_dir: module_dir.clone(),
        project_dir: repo_dir.join("Project"),
        templates_dir: module_dir.join("templates").join(&module_name),
        static_dir: module_dir.join("static").join(&module_name),
        add_views: false,
        add_index_view: false,
        add_styling: false,
        add_api: false,
        add_oauth: false,
        install_after: false,
        commit_changes: false,
        show_readme: false,
        editor_command: "nano".to_string(),
        python_command: "true".to_string(),
    }
}

fn run_from(project: &Path, plan: &ScaffoldPlan) -> anyhow::Result<()> {
    let _lock = CWD_LOCK.lock().unwrap_or_else(|err| err.into_inner());
    let original = env::current_dir().unwrap();
    env::set_current_dir(project).unwrap();
    let prompter = Prompter::new(true, true);
    let result = Composer::new(plan, &prompter).and_then(|composer| composer.run());
    env::set_current_dir(original).unwrap();
    result
}

fn read(path: &PathBuf) -> String {
    fs::read_to_string(path).unwrap_or_else(|err| panic!("read {}: {err}", path.display()))
}

#[test]
fn base_scaffold_creates_package_files() {
    let project = project_root();
    let out = TempDir::new().unwrap();
    let mut plan = plan_for("blog-tools", out.path());
    plan.commit_changes = true;

    run_from(project.path(), &plan).unwrap();

    for file in [".gitignore", "README.md", "setup.py", "MANIFEST.in"] {
        assert!(plan.repo_dir.join(file).is_file(), "{file} missing");
    }
    assert!(plan.project_dir.is_dir());
    assert!(plan.repo_dir.join("docs/.gitignore").is_file());
    assert!(plan
        .module_dir
        .join("management/commands/example_command.py")
        .is_file());
    assert!(plan.module_dir.join("management/__init__.py").is_file());

    let readme = read(&plan.repo_dir.join("README.md"));
    assert!(readme.starts_with("blog-tools\n==========\n"));
    assert!(readme.contains("\"blog_tools\""));

    // Committed on a dev branch.
    assert!(plan.repo_dir.join(".git").is_dir());
    let head = read(&plan.repo_dir.join(".git/HEAD"));
    assert!(head.contains("dev"), "HEAD was: {head}");

    // No view scaffold was requested.
    assert!(!plan.module_dir.join("urls.py").exists());
    assert!(!plan.templates_dir.exists());
}

#[test]
fn rerun_overwrites_base_files_with_identical_content() {
    let project = project_root();
    let out = TempDir::new().unwrap();
    let plan = plan_for("notes", out.path());

    run_from(project.path(), &plan).unwrap();
    let first = read(&plan.repo_dir.join("setup.py"));

    run_from(project.path(), &plan).unwrap();
    let second = read(&plan.repo_dir.join("setup.py"));

    assert_eq!(first, second);
    assert!(!plan.module_dir.join("urls.py").exists());
}

#[test]
fn styled_index_supersedes_barebones_variant() {
    let project = project_root();
    let out = TempDir::new().unwrap();
    let mut plan = plan_for("gallery", out.path());
    plan.add_views = true;
    plan.add_index_view = true;
    plan.add_styling = true;

    run_from(project.path(), &plan).unwrap();

    let index = read(&plan.templates_dir.join("index.html"));
    assert!(index.contains("base.html"));
    assert!(plan.templates_dir.join("base.html").is_file());
    assert!(plan.static_dir.join("css/gallery.css").is_file());
    assert!(plan.static_dir.join("js/gallery.js").is_file());

    let setup = read(&plan.repo_dir.join("setup.py"));
    assert_eq!(setup.matches("django-compressor").count(), 1);
    assert_eq!(setup.matches("django-bootstrap5").count(), 1);
}

#[test]
fn barebones_index_without_styling() {
    let project = project_root();
    let out = TempDir::new().unwrap();
    let mut plan = plan_for("gallery", out.path());
    plan.add_views = true;
    plan.add_index_view = true;

    run_from(project.path(), &plan).unwrap();

    let index = read(&plan.templates_dir.join("index.html"));
    assert!(!index.contains("base.html"));
    assert!(!plan.templates_dir.join("base.html").exists());
    assert!(!plan.static_dir.join("css").exists());

    let setup = read(&plan.repo_dir.join("setup.py"));
    assert!(!setup.contains("django-compressor"));

    let views = read(&plan.module_dir.join("views.py"));
    assert!(views.contains("class IndexView"));
    assert!(views.contains("gallery/index.html"));
}

#[test]
fn plain_api_scaffold_for_hyphenated_app() {
    let project = project_root();
    let out = TempDir::new().unwrap();
    let mut plan = plan_for("blog-tools", out.path());
    plan.add_views = true;
    plan.add_index_view = true;
    plan.add_api = true;

    run_from(project.path(), &plan).unwrap();

    assert_eq!(plan.module_dir.file_name().unwrap(), "blog_tools");

    // The API route set wins the urls.py overwrite.
    let urls = read(&plan.module_dir.join("urls.py"));
    assert!(urls.contains("api-root-schema"));
    assert!(urls.contains("Blog_toolsListCreateView"));
    assert!(!urls.contains("DefaultRouter"));
    assert!(!urls.contains("IndexView"));

    let serializers = read(&plan.module_dir.join("serializers.py"));
    assert!(serializers.contains("class Blog_toolsSerializer"));

    // No OAuth artifacts.
    assert!(!plan.module_dir.join("models.py").exists());
    assert!(!plan.repo_dir.join("conftest.py").exists());

    let setup = read(&plan.repo_dir.join("setup.py"));
    assert!(setup.contains("djangorestframework"));
    assert!(setup.contains("drf-spectacular"));
    assert!(!setup.contains("django-oauth-toolkit"));
}

#[test]
fn oauth_scaffold_writes_user_scoped_set() {
    let project = project_root();
    let out = TempDir::new().unwrap();
    let mut plan = plan_for("ledger", out.path());
    plan.add_api = true;
    plan.add_oauth = true;

    run_from(project.path(), &plan).unwrap();

    let models = read(&plan.module_dir.join("models.py"));
    assert!(models.contains("AUTH_USER_MODEL"));
    assert!(models.contains("ledger_examples"));

    let urls = read(&plan.module_dir.join("urls.py"));
    assert!(urls.contains("DefaultRouter"));

    assert!(plan.repo_dir.join("conftest.py").is_file());
    assert!(plan.repo_dir.join("tests/test_models.py").is_file());
    let api_tests = read(&plan.repo_dir.join("tests/test_api.py"));
    assert!(api_tests.contains("from ledger.models import ExampleModel"));

    let setup = read(&plan.repo_dir.join("setup.py"));
    assert!(setup.contains("django-oauth-toolkit"));
}

#[test]
fn context_guard_aborts_before_any_mutation() {
    let not_a_project = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let plan = plan_for("blog-tools", out.path());

    let err = run_from(not_a_project.path(), &plan).unwrap_err();
    assert!(err.to_string().contains("manage.py"));
    assert!(!plan.repo_dir.exists());
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn working_directory_is_restored_after_a_run() {
    let project = project_root();
    let out = TempDir::new().unwrap();
    let plan = plan_for("notes", out.path());

    let _lock = CWD_LOCK.lock().unwrap_or_else(|err| err.into_inner());
    let original = env::current_dir().unwrap();
    env::set_current_dir(project.path()).unwrap();

    let prompter = Prompter::new(true, true);
    Composer::new(&plan, &prompter).unwrap().run().unwrap();

    let after = env::current_dir().unwrap();
    assert_eq!(after.canonicalize().unwrap(), project.path().canonicalize().unwrap());

    env::set_current_dir(original).unwrap();
}
