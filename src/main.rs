use anyhow::Result;
use clap::Parser;
use std::env;
use std::process::ExitCode;
use tracing::info;

use appforge::cli::Cli;
use appforge::compose::Composer;
use appforge::plan;
use appforge::prompt::Prompter;
use appforge::verify;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        console::set_colors_enabled(false);
    }
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:?}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<()> {
    // Check the sentinel before asking the user anything.
    verify::ensure_project_root(&env::current_dir()?)?;

    let prompter = Prompter::new(cli.no_input, cli.no_color);
    let plan = plan::resolve(&cli, &prompter)?;
    info!(
        "packaging {} as {}{}",
        plan.app_name, plan.package_prefix, plan.app_name
    );

    let composer = Composer::new(&plan, &prompter)?;
    composer.run()
}
