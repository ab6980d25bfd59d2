use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wiki_articles::app::App;
use wiki_articles::config::Config;
use wiki_articles::utils::create_new;
use wiki_articles::watch::watch;
use wiki_articles::CONFIG_FILE;

#[derive(Parser)]
#[command(about, version)]
struct Args {
    /// config file, missing values fall back to the defaults
    #[arg(long, short, default_value = CONFIG_FILE)]
    config: PathBuf,
    /// command, generates the articles when left out
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// generate one markdown file per article
    Generate,
    /// watch the data and templates and re-generate on updates
    Watch,
    /// remove the generated articles
    Clean,
    /// create a new project with sample data
    New {
        /// name of the new project
        name: String,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        log::error!("Encountered error `{err:#}`");
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    match &args.command {
        Some(Commands::New { name }) => {
            return create_new(name).with_context(|| format!("creating `{name}`"));
        }
        Some(Commands::Watch) => {
            return watch(&args.config).with_context(|| format!("watching with {:?}", args.config));
        }
        _ => {}
    }

    let config = Config::load(&args.config)
        .with_context(|| format!("loading config from {:?}", args.config))?;
    let app = App::new(config).context("loading templates")?;
    match args.command.unwrap_or(Commands::Generate) {
        Commands::Generate => {
            app.generate().context("generating articles")?;
        }
        Commands::Clean => app.clean().context("cleaning output")?,
        Commands::Watch | Commands::New { .. } => unreachable!("handled before loading the config"),
    }
    Ok(())
}
