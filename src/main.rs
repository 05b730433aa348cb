use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use force_update::config::{Config, log_path};
use force_update::logging::{LogOutput, init_logging};
use force_update::update::{ForceUpdateGate, UpdateChecker, UpdatePresenter, UpdatePrompt};
use force_update::version::UpdateLevel;

#[derive(Parser)]
#[command(name = "force-update")]
#[command(version, about = "Check whether an installed app must be updated before use")]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to stderr instead of the log file
    #[arg(long, global = true)]
    log_stderr: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decide whether the installed version must be updated
    Check(CheckArgs),
    /// Print the catalog page URL of the app
    Url(UrlArgs),
}

#[derive(Args)]
struct AppArgs {
    /// Catalog identifier of the app
    #[arg(long)]
    app_id: Option<String>,

    /// Storefront country code (e.g. "jp")
    #[arg(long)]
    country: Option<String>,
}

#[derive(Args)]
struct CheckArgs {
    /// Update level: major, minor or patch
    #[arg(long)]
    level: Option<UpdateLevel>,

    /// Installed version of the app
    #[arg(long)]
    installed: Option<String>,

    /// Local version to compare, used only together with --remote
    #[arg(long)]
    local: Option<String>,

    /// Published version to compare, used only together with --local
    #[arg(long)]
    remote: Option<String>,

    /// Open the catalog page when an update is required
    #[arg(long)]
    open: bool,

    #[command(flatten)]
    app: AppArgs,
}

#[derive(Args)]
struct UrlArgs {
    /// Open the page instead of only printing it
    #[arg(long)]
    open: bool,

    #[command(flatten)]
    app: AppArgs,
}

/// Renders the prompt as plain text
struct TerminalPresenter {
    open: bool,
}

impl UpdatePresenter for TerminalPresenter {
    fn present(&self, prompt: &UpdatePrompt<'_>) {
        let copy = prompt.copy();
        println!("{}", copy.title);
        println!("{}", copy.message);
        match prompt.catalog_url() {
            Some(url) => println!("[{}] {}", copy.action_label, url),
            None => println!("[{}]", copy.action_label),
        }
        if self.open {
            prompt.open_catalog();
        }
    }
}

fn load_config(path: Option<&PathBuf>, app: &AppArgs) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(app_id) = &app.app_id {
        config.app.app_id = Some(app_id.clone());
    }
    if let Some(country) = &app.country {
        config.catalog.country = Some(country.clone());
    }

    Ok(config)
}

async fn run_check(mut config: Config, args: CheckArgs) {
    let level = args.level.unwrap_or(config.level);
    if let Some(installed) = args.installed {
        config.app.installed_version = Some(installed);
    }

    let checker = UpdateChecker::from_config(&config);
    let decision = checker
        .evaluate(level, args.local.as_deref(), args.remote.as_deref())
        .await;
    info!("Force update decision at {} level: {}", level, decision);

    println!("{}", decision);

    let presenter = TerminalPresenter { open: args.open };
    ForceUpdateGate::new().present_if(decision, &checker, &presenter);
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let output = if cli.log_stderr {
        LogOutput::Stderr
    } else {
        LogOutput::File(log_path())
    };
    let _guard = init_logging(output)?;

    match cli.command {
        Command::Check(args) => {
            let config = load_config(cli.config.as_ref(), &args.app)?;
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(run_check(config, args));
        }
        Command::Url(args) => {
            let config = load_config(cli.config.as_ref(), &args.app)?;
            let checker = UpdateChecker::from_config(&config);
            match checker.catalog_page_url() {
                Some(url) => {
                    println!("{}", url);
                    if args.open {
                        checker.open_catalog_link();
                    }
                }
                None => anyhow::bail!("No app identifier configured (use --app-id)"),
            }
        }
    }

    Ok(())
}
