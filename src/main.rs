use std::fs;
use std::path::PathBuf;

use alternatives::page::{self, AlternativesPanel, ConnectionIndicator, PageContext, RoomCodePanel};
use alternatives::{Config, client, load_questions_from_json, logging, server};
use clap::{Parser, Subcommand};

const DEFAULT_LOG_FILE: &str = "alternatives.log";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Host a room and push questions to participants
    Server {
        /// JSON file to load the questions from
        #[arg(short, long)]
        questions: PathBuf,

        /// Port to listen on (overrides the configuration)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Join a room as a participant
    Client {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Server port (overrides the configuration)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Write the participant HTML page
    RenderPage {
        #[arg(long)]
        title: Option<String>,

        /// Message shown in a banner above every panel
        #[arg(long)]
        critical: Option<String>,

        #[arg(long)]
        room_code: Option<String>,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> alternatives::Result<()> {
    let mut config = Config::load(args.config.as_deref())?;

    match args.command {
        Command::Server { questions, port } => {
            if let Some(port) = port {
                config.port = port;
            }
            config.log_file.get_or_insert_with(|| DEFAULT_LOG_FILE.into());
            logging::init(&config)?;

            let questions = load_questions_from_json(questions)?;
            tracing::info!(count = questions.len(), port = config.port, "starting room server");
            server::run(&config, questions).await
        }
        Command::Client { host, port } => {
            config.log_file.get_or_insert_with(|| DEFAULT_LOG_FILE.into());
            logging::init(&config)?;

            client::run(&config, &host, port.unwrap_or(config.port)).await
        }
        Command::RenderPage {
            title,
            critical,
            room_code,
            output,
        } => {
            logging::init(&config)?;

            let ctx = PageContext {
                header_title: title,
                critical,
                room_code: room_code.clone(),
            };
            let room = RoomCodePanel { room_code };
            let html = page::render_page(
                &config,
                &ctx,
                &[&ConnectionIndicator, &AlternativesPanel],
                &[&room],
            );

            match output {
                Some(path) => {
                    fs::write(&path, html)?;
                    tracing::info!(path = %path.display(), "page written");
                }
                None => println!("{}", html),
            }
            Ok(())
        }
    }
}
