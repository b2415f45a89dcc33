mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::BindingArgs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cordctl",
    about = "Expose YAML command templates as Discord slash commands",
    version,
    propagate_version = true
)]
struct Cli {
    /// Template directory (default: ./commands if present, else the current directory)
    #[arg(long, global = true, env = "CORDCTL_DIR")]
    dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and serve every template as a slash command
    Serve {
        /// Guild to register commands in (default: the first guild the bot is in)
        #[arg(long, env = "CORDCTL_GUILD_ID")]
        guild: Option<u64>,
    },

    /// List loaded templates
    List,

    /// Show a template's parameters and argument slots
    Show {
        /// Template name
        name: String,
    },

    /// Validate every template in the directory
    Check,

    /// Print the command line a template would run
    Render {
        /// Template name
        name: String,

        #[command(flatten)]
        bindings: BindingArgs,
    },

    /// Run a template locally
    Invoke {
        /// Template name
        name: String,

        #[command(flatten)]
        bindings: BindingArgs,

        /// Print the reply the bot would post, errors included
        #[arg(long)]
        reply: bool,
    },
}

fn main() {
    // A missing .env is normal; a broken one is worth mentioning.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("warning: failed to read .env: {e}");
        }
    }

    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let dir = root::resolve_commands_dir(cli.dir.as_deref());

    let result = match cli.command {
        Commands::Serve { guild } => cmd::serve::run(&dir, guild),
        Commands::List => cmd::list::run(&dir, cli.json),
        Commands::Show { name } => cmd::show::run(&dir, &name, cli.json),
        Commands::Check => cmd::check::run(&dir, cli.json),
        Commands::Render { name, bindings } => cmd::render::run(&dir, &name, bindings, cli.json),
        Commands::Invoke {
            name,
            bindings,
            reply,
        } => cmd::invoke::run(&dir, &name, bindings, reply, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
