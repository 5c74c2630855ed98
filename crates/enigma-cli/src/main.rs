use anyhow::Result;
use clap::{Parser, Subcommand};
use enigma_core::user::LoginRequest;
use enigma_infrastructure::EnigmaPaths;
use std::path::PathBuf;

mod commands;
mod logging;

use commands::connection::ProbeOverrides;

#[derive(Parser)]
#[command(name = "enigma")]
#[command(about = "Copilot Enigma CLI - inspect and manage the desktop companion backend", long_about = None)]
struct Cli {
    /// Use this settings file instead of the per-user default
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or change persisted settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Probe the configured OpenAI compatible API server
    TestConnection {
        #[command(flatten)]
        overrides: ProbeOverrides,
    },
    /// Print the system overview, including a live connection probe
    Overview,
    /// Print recent desktop activity
    Activity,
    /// Start a local session and remember the identity
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// End the local session
    ///
    /// Sessions are not persisted, so each invocation starts unauthenticated.
    Logout,
    /// Print the current session and the stored identity
    ///
    /// Sessions are not persisted, so this always reports unauthenticated;
    /// the profile reflects the identity saved by `login`.
    Session,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print all settings as JSON
    Show,
    /// Print the settings file path
    Path,
    /// Set one setting by its JSON key, e.g. `set maxRetries 3`
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logs_dir = EnigmaPaths::default().logs_dir().ok();
    let _guard = logging::init(logs_dir.as_deref());

    let app = commands::utils::open_app(cli.config).await?;

    let result = match cli.command {
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show(&app).await,
            SettingsAction::Path => commands::settings::path(&app),
            SettingsAction::Set { key, value } => {
                commands::settings::set(&app, &key, &value).await
            }
        },
        Commands::TestConnection { overrides } => commands::connection::test(&app, overrides).await,
        Commands::Overview => commands::overview::overview(&app).await,
        Commands::Activity => commands::overview::activity(&app),
        Commands::Login {
            username,
            password,
            email,
        } => {
            let mut request = LoginRequest::new(username, password);
            if let Some(email) = email {
                request = request.with_email(email);
            }
            commands::session::login(&app, request).await
        }
        Commands::Logout => commands::session::logout(&app).await,
        Commands::Session => commands::session::show(&app).await,
    };

    app.shutdown();
    result
}
