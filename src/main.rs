mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::Context;
use commands::calendar::FormArgs;
use commands::pets::PetFields;
use petcare_core::grid::YearMonth;

#[derive(Parser)]
#[command(name = "petcare")]
#[command(about = "Manage your pets, their care schedule and comments on a petcare server")]
struct Cli {
    /// Log requests and other details (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Register {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
    },
    Login {
        #[arg(short, long)]
        email: Option<String>,
    },
    Logout,
    /// Show the logged in user
    Whoami,
    #[command(subcommand)]
    Pets(PetsCommand),
    #[command(subcommand)]
    Calendar(CalendarCommand),
    #[command(subcommand)]
    Comments(CommentsCommand),
    /// Import events from the old local calendar into a pet's schedule
    ImportLegacy {
        /// Pet that receives the events
        #[arg(short, long)]
        pet: String,

        /// Event file to read (defaults to the one in the data directory)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Leave imported events in the file
        #[arg(long)]
        keep: bool,
    },
}

#[derive(Subcommand)]
enum PetsCommand {
    List {
        /// Only pets you own
        #[arg(long)]
        mine: bool,
    },
    Show {
        id: String,
    },
    Add {
        #[command(flatten)]
        fields: PetFields,
    },
    /// Edit a pet. Without field flags every field is prompted for
    Edit {
        id: String,
        #[command(flatten)]
        fields: PetFields,
    },
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Make a pet the calendar default
    Use {
        id: String,
    },
}

#[derive(Subcommand)]
enum CalendarCommand {
    /// Show a month of scheduled care
    Show {
        /// Only this pet (repeatable, defaults to default_pet from config)
        #[arg(short, long)]
        pet: Vec<String>,

        /// Month to show (YYYY-MM)
        #[arg(short, long)]
        month: Option<YearMonth>,

        /// Go back this many months
        #[arg(long, default_value_t = 0, conflicts_with = "next")]
        prev: u32,

        /// Go forward this many months
        #[arg(long, default_value_t = 0)]
        next: u32,
    },
    /// List everything scheduled on one day
    Day {
        date: String,
        #[arg(short, long)]
        pet: Vec<String>,
    },
    /// Schedule a vet visit, walk, medication or feeding
    Add {
        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// vet, walk, meds, feed or anything else
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        #[arg(short, long)]
        pet: Option<String>,
    },
    Edit {
        id: String,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        #[arg(short, long)]
        pet: Option<String>,
    },
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum CommentsCommand {
    List { pet: String },
    Add { pet: String, text: String },
    Like { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut ctx = Context::load()?;

    match cli.command {
        Commands::Register { name, email } => commands::auth::register(&mut ctx, name, email).await,
        Commands::Login { email } => commands::auth::login(&mut ctx, email).await,
        Commands::Logout => commands::auth::logout(&mut ctx),
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Pets(cmd) => match cmd {
            PetsCommand::List { mine } => commands::pets::list(&ctx, mine).await,
            PetsCommand::Show { id } => commands::pets::show(&ctx, &id).await,
            PetsCommand::Add { fields } => commands::pets::add(&ctx, fields).await,
            PetsCommand::Edit { id, fields } => commands::pets::edit(&ctx, &id, fields).await,
            PetsCommand::Delete { id, yes } => commands::pets::delete(&ctx, &id, yes).await,
            PetsCommand::Use { id } => commands::pets::use_pet(&mut ctx, &id).await,
        },
        Commands::Calendar(cmd) => match cmd {
            CalendarCommand::Show {
                pet,
                month,
                prev,
                next,
            } => commands::calendar::show(&ctx, pet, month, prev, next).await,
            CalendarCommand::Day { date, pet } => commands::calendar::day(&ctx, &date, pet).await,
            CalendarCommand::Add { date, kind, pet } => {
                commands::calendar::add(&ctx, FormArgs { date, kind, pet }).await
            }
            CalendarCommand::Edit {
                id,
                date,
                kind,
                pet,
            } => commands::calendar::edit(&ctx, &id, FormArgs { date, kind, pet }).await,
            CalendarCommand::Delete { id, yes } => {
                commands::calendar::delete(&ctx, &id, yes).await
            }
        },
        Commands::Comments(cmd) => match cmd {
            CommentsCommand::List { pet } => commands::comments::list(&ctx, &pet).await,
            CommentsCommand::Add { pet, text } => commands::comments::add(&ctx, &pet, text).await,
            CommentsCommand::Like { id } => commands::comments::like(&ctx, &id).await,
        },
        Commands::ImportLegacy { pet, file, keep } => {
            commands::import::run(&ctx, &pet, file, keep).await
        }
    }
}
