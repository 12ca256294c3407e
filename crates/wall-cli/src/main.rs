use clap::{ArgAction, Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use wall_cli::{setup_logging, setup_shell, CliError};
use wall_core::{
    composer::{ImageAttachment, SubmitOutcome},
    config::WallConfig,
    feed, WallResult,
};

#[derive(Parser)]
#[command(author, version, about, long_about=None)]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    /// Path to config file; defaults to ~/.wall/wall.toml
    config: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::SetTrue)]
    /// Select if the output should be json
    json: bool,

    #[command(subcommand)]
    command: WallCommand,
}

#[derive(Subcommand, Clone, Debug)]
pub enum WallCommand {
    /// Shares a new post with the given `msg` and optional `image`
    Share {
        #[arg(short, long)]
        msg: Option<String>,
        #[arg(short, long, value_name = "FILE")]
        image: Option<PathBuf>,
    },

    /// Prints the wall, newest post first
    Feed,

    /// Prints the whole screen: profile, composer and feed
    Show,

    /// Prints the profile sidebar
    Profile,
}

fn read_msg() -> WallResult<String> {
    eprintln!("Enter post msg(Press Ctrl-d on new line to end): ");
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = WallConfig::load(cli.config.as_deref())?;
    let mut shell = setup_shell(&config)?;

    match cli.command {
        WallCommand::Share { msg, image } => {
            let msg = match msg {
                Some(msg) => msg,
                None => read_msg()?,
            };
            let image = image
                .as_deref()
                .map(ImageAttachment::from_path)
                .transpose()?;

            match shell.share(&msg, image).await {
                SubmitOutcome::Posted(post) => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&post)?);
                    } else {
                        println!("{}", post);
                    }
                }
                SubmitOutcome::Ignored => {
                    tracing::info!("nothing to share, message was empty");
                }
                SubmitOutcome::Aborted => return Err(CliError::Aborted.into()),
            }
        }
        WallCommand::Feed => {
            let posts = shell.store().posts();
            if cli.json {
                println!("{}", feed::render_json(posts)?);
            } else {
                println!("{}", feed::render(posts));
            }
        }
        WallCommand::Show => println!("{}", shell.render()),
        WallCommand::Profile => println!("{}", shell.profile()),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err}");
            ExitCode::FAILURE
        }
    }
}
