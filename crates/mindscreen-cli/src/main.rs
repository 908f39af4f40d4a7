use std::io;

use clap::{Parser, Subcommand, ValueEnum};
use eyre::Result;
use mindscreen_core::models::kind::AssessmentKind;
use mindscreen_cli::state::AppState;
use mindscreen_cli::terminal::Terminal;
use mindscreen_cli::{commands, config};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mindscreen")]
#[command(version, about = "Mental health self-screening in the terminal")]
struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// PHQ-9 depression questionnaire.
    Phq9,
    /// Student depression screening form.
    Student,
    /// Sectioned local-factors assessment.
    Assess {
        #[arg(long, value_enum)]
        kind: KindArg,
    },
    /// Recent mental health news.
    News,
    /// List the available questionnaires.
    Instruments,
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective config with the API key redacted.
    Show,
    /// Write a default config file.
    Init {
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Anxiety,
    Depression,
}

impl From<KindArg> for AssessmentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Anxiety => AssessmentKind::Anxiety,
            KindArg::Depression => AssessmentKind::Depression,
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let stdin = io::stdin();
    let mut term = Terminal::new(stdin.lock(), io::stdout());

    match cli.command {
        Command::Config { command } => {
            let path = config::config_path()?;
            match command {
                ConfigCommand::Show => {
                    let effective = config::load_effective()?;
                    commands::config_show(&mut term, &effective, &path)?;
                }
                ConfigCommand::Init { force } => commands::config_init(&mut term, &path, force)?,
            }
        }
        Command::Instruments => commands::instruments(&mut term)?,
        command => {
            let state = AppState::new(config::load_effective()?);
            match command {
                Command::Phq9 => {
                    commands::phq9(&mut term, &state.generator).await?;
                }
                Command::Student => commands::student(&mut term, &state.predictor).await?,
                Command::Assess { kind } => {
                    commands::assess(&mut term, kind.into(), &state.predictor, &state.generator)
                        .await?
                }
                Command::News => commands::news(&mut term, &state.news).await?,
                Command::Config { .. } | Command::Instruments => {}
            }
        }
    }

    Ok(())
}
