use anyhow::{Context as _, Result};
use tera::{Context, Tera};

use crate::plan::ScaffoldPlan;

/// Build the default substitution set for a plan.
///
/// Every plan field is available under its own name (templates rely on
/// `module_name` and `package_prefix` in particular), plus the derived
/// app-name forms and the header underline.
pub fn base_context(plan: &ScaffoldPlan) -> Result<Context> {
    let mut ctx = Context::from_serialize(plan).context("failed to build template context")?;
    ctx.insert("app_name_capitalized", &capitalized(&plan.app_name));
    ctx.insert("app_name_lowercase", &plan.app_name.to_lowercase());
    ctx.insert("app_header_line", &header_line(&plan.app_name));
    Ok(ctx)
}

/// Render a registered template with per-call overrides merged over the
/// base substitution set. Overrides take precedence.
///
/// Rendering is strict: a placeholder with no value is an error, never
/// passed through into the output.
pub fn render_named(
    tera: &Tera,
    template: &str,
    base: &Context,
    overrides: &[(&str, String)],
) -> Result<String> {
    let mut ctx = base.clone();
    for (key, value) in overrides {
        ctx.insert(*key, value);
    }
    tera.render(template, &ctx)
        .with_context(|| format!("failed to render template '{template}'"))
}

/// First character uppercased, the rest lowered.
pub fn capitalized(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// A `=` underline as long as the name, for text-file section headers.
pub fn header_line(name: &str) -> String {
    "=".repeat(name.chars().count())
}
