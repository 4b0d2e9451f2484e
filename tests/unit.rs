#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    use appforge::cli::Cli;
    use appforge::compose::amend_install_requires;
    use appforge::plan::{self, ScaffoldPlan};
    use appforge::prompt::Prompter;
    use appforge::render;
    use appforge::templates;
    use appforge::verify;
    use clap::Parser;

    fn non_interactive() -> Prompter {
        Prompter::new(true, true)
    }

    fn parse(extra: &[&str]) -> Cli {
        let mut args = vec!["appforge", "blog-tools", "/tmp/appforge-out", "--no-input"];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args).unwrap()
    }

    fn resolved(extra: &[&str]) -> ScaffoldPlan {
        plan::resolve(&parse(extra), &non_interactive()).unwrap()
    }

    #[test]
    fn test_module_name_derivation() {
        assert_eq!(plan::module_name_for("blog-tools"), "blog_tools");
        assert_eq!(plan::module_name_for("plain"), "plain");
        assert_eq!(plan::module_name_for("a-b-c"), "a_b_c");
        // Deriving again from the derived form changes nothing.
        assert_eq!(
            plan::module_name_for(&plan::module_name_for("blog-tools")),
            "blog_tools"
        );
    }

    #[test]
    fn test_app_name_validation() {
        let valid_names = vec!["blog-tools", "api", "my-app-123", "snake_case"];
        let invalid_names = vec!["", "Blog-Tools", "-tools", "blog--tools", "tools-", "9lives"];

        for name in valid_names {
            assert!(verify::validate_app_name(name).is_ok(), "{name} should pass");
        }
        for name in invalid_names {
            assert!(verify::validate_app_name(name).is_err(), "{name} should fail");
        }
    }

    #[test]
    fn test_non_interactive_defaults() {
        let plan = resolved(&[]);
        assert_eq!(plan.package_prefix, "");
        assert!(plan.commit_changes);
        assert!(plan.add_views);
        assert!(plan.add_index_view);
        assert!(plan.add_styling);
        assert!(plan.add_api);
        assert!(plan.add_oauth);
        assert!(plan.install_after);
        assert!(plan.show_readme);
        assert_eq!(plan.editor_command, "nano");
        assert_eq!(plan.python_command, "python");
    }

    #[test]
    fn test_prefix_changes_package_dir() {
        let plan = resolved(&["--prefix"]);
        assert_eq!(plan.package_prefix, "django-");
        assert!(plan.repo_dir.ends_with("django-blog-tools"));
        assert_eq!(plan.module_name, "blog_tools");
        assert!(plan.module_dir.ends_with("django-blog-tools/blog_tools"));
    }

    #[test]
    fn test_derived_paths() {
        let plan = resolved(&["--no-views"]);
        let root = PathBuf::from("/tmp/appforge-out");
        assert_eq!(plan.output_root, root);
        assert_eq!(plan.repo_dir, root.join("blog-tools"));
        assert_eq!(plan.project_dir, root.join("blog-tools/Project"));
        assert_eq!(
            plan.templates_dir,
            root.join("blog-tools/blog_tools/templates/blog_tools")
        );
        assert_eq!(
            plan.static_dir,
            root.join("blog-tools/blog_tools/static/blog_tools")
        );
    }

    #[test]
    fn test_oauth_forces_api_when_api_unset() {
        let plan = resolved(&["--with-oauth"]);
        assert!(plan.add_api);
        assert!(plan.add_oauth);
    }

    #[test]
    fn test_declined_api_wins_over_oauth() {
        let plan = resolved(&["--no-api", "--with-oauth"]);
        assert!(!plan.add_api);
        assert!(!plan.add_oauth);
    }

    #[test]
    fn test_oauth_never_set_without_api() {
        for extra in [&["--no-api"][..], &["--no-api", "--with-oauth"][..]] {
            let plan = resolved(extra);
            assert!(!plan.add_oauth || plan.add_api);
        }
    }

    #[test]
    fn test_gated_decisions_follow_their_parent() {
        let plan = resolved(&["--no-views", "--with-bootstrap", "--with-index-view"]);
        assert!(!plan.add_views);
        assert!(!plan.add_index_view);
        assert!(!plan.add_styling);

        let plan = resolved(&["--with-views", "--no-index-view", "--with-bootstrap"]);
        assert!(plan.add_views);
        assert!(!plan.add_index_view);
        assert!(!plan.add_styling);
    }

    #[test]
    fn test_header_line_matches_name_length() {
        assert_eq!(render::header_line("blog-tools"), "==========");
        assert_eq!(render::capitalized("blog-tools"), "Blog-tools");
        assert_eq!(render::capitalized(""), "");
    }

    #[test]
    fn test_readme_rendering() {
        let plan = resolved(&[]);
        let tera = templates::template_registry().unwrap();
        let ctx = render::base_context(&plan).unwrap();
        let readme = render::render_named(&tera, "README.md", &ctx, &[]).unwrap();
        assert!(readme.starts_with("blog-tools\n==========\n"));
        assert!(readme.contains("\"blog_tools\""));
    }

    #[test]
    fn test_every_template_renders() {
        let plan = resolved(&[]);
        let tera = templates::template_registry().unwrap();
        let ctx = render::base_context(&plan).unwrap();
        let overrides = [("install_requires", "        'django-compressor',".to_string())];
        let names: Vec<&str> = tera.get_template_names().collect();
        assert!(!names.is_empty());
        for name in names {
            let rendered = render::render_named(&tera, name, &ctx, &overrides)
                .unwrap_or_else(|err| panic!("template '{name}' failed: {err:#}"));
            assert!(!rendered.contains("{{ app_name }}"), "'{name}' left a placeholder");
        }
    }

    #[test]
    fn test_unresolved_placeholder_is_an_error() {
        let plan = resolved(&[]);
        let mut tera = tera::Tera::default();
        tera.add_raw_template("broken", "hello {{ not_a_key }}").unwrap();
        let ctx = render::base_context(&plan).unwrap();
        assert!(render::render_named(&tera, "broken", &ctx, &[]).is_err());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let plan = resolved(&[]);
        let mut tera = tera::Tera::default();
        tera.add_raw_template("t", "{{ app_name }}").unwrap();
        let ctx = render::base_context(&plan).unwrap();
        let out =
            render::render_named(&tera, "t", &ctx, &[("app_name", "override".to_string())]).unwrap();
        assert_eq!(out, "override");
    }

    #[test]
    fn test_amend_synthesizes_requirements_block() {
        let dir = TempDir::new().unwrap();
        let setup = dir.path().join("setup.py");
        fs::write(&setup, "from setuptools import setup\n\nsetup(\n    name='x',\n)\n").unwrap();

        amend_install_requires(&setup, &["djangorestframework", "drf-spectacular"]).unwrap();
        let content = fs::read_to_string(&setup).unwrap();
        assert!(content.contains("install_requires=["));
        assert_eq!(content.matches("djangorestframework").count(), 1);
        assert_eq!(content.matches("drf-spectacular").count(), 1);
    }

    #[test]
    fn test_amend_prepends_to_existing_marker() {
        let dir = TempDir::new().unwrap();
        let setup = dir.path().join("setup.py");
        fs::write(
            &setup,
            "setup(\n    install_requires=[\n        'django-compressor',\n    ],\n)\n",
        )
        .unwrap();

        amend_install_requires(&setup, &["djangorestframework"]).unwrap();
        let content = fs::read_to_string(&setup).unwrap();
        assert_eq!(content.matches("install_requires=[").count(), 1);
        assert_eq!(content.matches("django-compressor").count(), 1);
        assert_eq!(content.matches("djangorestframework").count(), 1);
    }

    #[test]
    fn test_amend_skips_packages_already_present() {
        let dir = TempDir::new().unwrap();
        let setup = dir.path().join("setup.py");
        fs::write(&setup, "setup(\n    install_requires=[\n    ],\n)\n").unwrap();

        amend_install_requires(&setup, &["djangorestframework"]).unwrap();
        amend_install_requires(&setup, &["djangorestframework"]).unwrap();
        let content = fs::read_to_string(&setup).unwrap();
        assert_eq!(content.matches("djangorestframework").count(), 1);
    }
}
