use anyhow::Result;
use std::path::Path;

/// File whose presence marks a directory as a Django project root.
pub const PROJECT_SENTINEL: &str = "manage.py";

/// The whole procedure only makes sense from a Django project's root
/// directory; abort before touching the filesystem otherwise.
pub fn ensure_project_root(dir: &Path) -> Result<()> {
    if dir.join(PROJECT_SENTINEL).is_file() {
        Ok(())
    } else {
        anyhow::bail!(
            "no {} in {} — run this from a Django project's root directory",
            PROJECT_SENTINEL,
            dir.display()
        );
    }
}

pub fn validate_app_name(name: &str) -> Result<()> {
    if name.is_empty() {
        anyhow::bail!("app name must not be empty");
    }
    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    let starts_with_letter = name.starts_with(|c: char| c.is_ascii_lowercase());
    if !valid_chars || !starts_with_letter || name.ends_with('-') || name.contains("--") {
        anyhow::bail!(
            "app name '{}' must start with a lowercase letter and contain only \
             lowercase letters, digits, '-' and '_'",
            name
        );
    }
    Ok(())
}
