//! studycrew CLI: course browsing and assistant matching from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "studycrew", version, about = "Find study assistants or become one")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config file
    Init,

    /// Sign in
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        /// Full name
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// At least 8 characters
        #[arg(long)]
        password: String,

        /// Academic year, 1-4
        #[arg(long, default_value = "1")]
        year: u8,

        /// Telegram handle (e.g. "@yourusername")
        #[arg(long)]
        telegram: Option<String>,

        /// Short bio, at most 70 characters
        #[arg(long)]
        bio: Option<String>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show which dashboard applies to the signed-in user
    Dashboard {
        /// Print the dashboard as JSON
        #[arg(long)]
        json: bool,
    },

    /// List courses for a year and semester
    Courses {
        /// Academic year (1-4 or Freshman/Sophomore/Junior/Senior)
        #[arg(long)]
        year: Option<String>,

        /// Semester (1 or 2)
        #[arg(long, default_value = "1")]
        semester: String,

        /// Browse as an assistant (years before your own)
        #[arg(long)]
        assisting: bool,
    },

    /// List assistants for a course
    Assistants {
        /// Course code
        course: String,
    },

    /// Show the courses you assist
    Assigned,

    /// Change the courses you assist
    Assign {
        /// Course codes to start assisting
        #[arg(long, value_delimiter = ',')]
        add: Vec<String>,

        /// Course codes to stop assisting
        #[arg(long, value_delimiter = ',')]
        remove: Vec<String>,

        /// Course codes to mark special
        #[arg(long, value_delimiter = ',')]
        special: Vec<String>,

        /// Course codes to unmark special
        #[arg(long, value_delimiter = ',')]
        unspecial: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("studycrew=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Login { email, password } => {
            commands::auth::login(config, email, password).await
        }
        Commands::Register {
            name,
            email,
            password,
            year,
            telegram,
            bio,
        } => commands::auth::register(config, name, email, password, year, telegram, bio).await,
        Commands::Logout => commands::auth::logout(config).await,
        Commands::Whoami => commands::auth::whoami(config),
        Commands::Dashboard { json } => commands::dashboard::execute(config, json),
        Commands::Courses {
            year,
            semester,
            assisting,
        } => commands::courses::list(config, year, semester, assisting).await,
        Commands::Assistants { course } => commands::courses::assistants(config, course).await,
        Commands::Assigned => commands::assign::assigned(config).await,
        Commands::Assign {
            add,
            remove,
            special,
            unspecial,
        } => commands::assign::execute(config, add, remove, special, unspecial).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
