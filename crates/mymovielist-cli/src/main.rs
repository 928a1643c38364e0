use clap::{ArgAction, Parser, Subcommand};
use commands::{catalogue, config, list, review, session, AppContext};
use movielist_config::{Config, PathManager};

mod commands;
mod logging;
mod output;
mod render;

#[derive(Parser)]
#[command(name = "mymovielist")]
#[command(about = "MyMovieList - browse the catalogue and keep your watch-list")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search movies by title
    Search { query: String },
    /// List movies in any of the given genres
    Genres {
        #[arg(required = true)]
        genres: Vec<String>,
    },
    /// List movies released in a year
    Year { year: i32 },
    /// List movies sorted by a field (e.g. vote_average, popularity)
    Sort {
        field: String,
        #[arg(long, action = ArgAction::SetTrue)]
        descending: bool,
    },
    /// Show a movie's details
    Movie { movie_id: String },
    /// Show a movie's reviews
    Reviews { movie_id: String },
    /// Show an actor or director and their movies
    Troupe { troupe_id: String },
    /// Sign in and remember the user for later commands
    #[command(name = "sign-in")]
    SignIn {
        /// Email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,

        /// Username (prompted when omitted)
        #[arg(long)]
        username: Option<String>,
    },
    /// Forget the signed-in user
    #[command(name = "sign-out")]
    SignOut,
    /// Manage your watch-list
    List {
        #[command(subcommand)]
        cmd: ListCommands,
    },
    /// Write or edit reviews
    Review {
        #[command(subcommand)]
        cmd: ReviewCommands,
    },
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ListCommands {
    /// Show the list, optionally one section of it
    Show {
        #[arg(long, value_enum, default_value = "all")]
        filter: list::FilterArg,
    },
    /// Show where a movie sits in the list
    Status { movie_id: String },
    /// Move a movie along: not in list, to watch, watched, removed
    Cycle { movie_id: String },
    /// Toggle favourite (marks the movie watched)
    Favourite { movie_id: String },
    /// Remove a movie from the list
    Remove { movie_id: String },
}

#[derive(Subcommand)]
enum ReviewCommands {
    /// Review a movie as the signed-in user
    Add {
        movie_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Vote from 1 to 10
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
        vote: u8,
    },
    /// Edit an existing review
    Update {
        review_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Vote from 1 to 10
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
        vote: u8,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration and session
    Show,
    /// Set the server base URL (without /api)
    #[command(name = "set-base-url")]
    SetBaseUrl { url: String },
    /// Print the config file path
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let paths = PathManager::default();
    let loaded = Config::load(&paths.config_file());

    let logging_config = loaded
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    logging::init_logging(cli.verbose, cli.quiet, &logging_config)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    // Config commands must work even when the file on disk is invalid.
    let command = match cli.command {
        Commands::Config { cmd } => return config::run_config(cmd, &paths, &output).await,
        command => command,
    };

    let config = loaded.map_err(|e| {
        color_eyre::eyre::eyre!(
            "Failed to load config from {}: {}",
            paths.config_file().display(),
            e
        )
    })?;
    tracing::debug!(base_url = %config.api.base_url, "Configuration loaded");
    let ctx = AppContext::new(paths, config);

    match command {
        Commands::Search { query } => catalogue::run_search(&ctx, &query, &output).await,
        Commands::Genres { genres } => catalogue::run_genres(&ctx, &genres, &output).await,
        Commands::Year { year } => catalogue::run_year(&ctx, year, &output).await,
        Commands::Sort { field, descending } => {
            catalogue::run_sort(&ctx, &field, descending, &output).await
        }
        Commands::Movie { movie_id } => catalogue::run_movie(&ctx, &movie_id, &output).await,
        Commands::Reviews { movie_id } => catalogue::run_reviews(&ctx, &movie_id, &output).await,
        Commands::Troupe { troupe_id } => catalogue::run_troupe(&ctx, &troupe_id, &output).await,
        Commands::SignIn { email, username } => {
            session::run_sign_in(&ctx, email, username, &output).await
        }
        Commands::SignOut => session::run_sign_out(&ctx, &output).await,
        Commands::List { cmd } => list::run_list(cmd, &ctx, &output).await,
        Commands::Review { cmd } => review::run_review(cmd, &ctx, &output).await,
        Commands::Config { .. } => Ok(()),
    }
}
