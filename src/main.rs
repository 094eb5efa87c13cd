mod cli;
mod commands;
mod infra;
mod shared;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, GlobalArgs};
use commands::{CommandContext, run_action};
use infra::git::{LocateHints, RealGitRunner};
use shared::config::load_config;
use shared::env_var::EnvVars;
use shared::logging::{self, OutputLog};
use shared::ui::{Notification, TerminalUi, Ui};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let Cli { global, command } = Cli::parse();
    let env = EnvVars::load();
    let (output_log, _log_guard) = logging::init(&env, global.verbose);

    match run(global, command, env, output_log).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(
    global: GlobalArgs,
    command: Commands,
    env: EnvVars,
    output_log: OutputLog,
) -> anyhow::Result<ExitCode> {
    let action = match command {
        Commands::Config(cmd) => {
            cmd.run()?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "gn", &mut std::io::stdout());
            return Ok(ExitCode::SUCCESS);
        }
        other => other.into_action(),
    };

    let config = load_config()?;
    let ui = TerminalUi::new(output_log)
        .assume_yes(global.yes)
        .with_desktop(config.notification.desktop);

    let action = match action {
        Some(Ok(action)) => action,
        Some(Err(e)) => {
            tracing::error!("{e}");
            ui.notify(&Notification::error(e.to_string()));
            return Ok(ExitCode::FAILURE);
        }
        None => return Ok(ExitCode::SUCCESS),
    };

    let cwd = std::env::current_dir()?;
    let workspace_folders = if global.workspaces.is_empty() {
        vec![cwd.clone()]
    } else {
        global.workspaces
    };
    let ctx = CommandContext {
        runner: RealGitRunner,
        ui,
        config,
        hints: LocateHints {
            scm_root: env.repo_root.map(PathBuf::from),
            active_document: global.active_file,
            workspace_folders,
        },
        cwd,
    };

    Ok(run_action(&ctx, action).await.exit_code())
}
