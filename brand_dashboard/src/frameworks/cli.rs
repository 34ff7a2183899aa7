use crate::domain::{DashboardError, DateRange, SessionState, SessionStore};
use crate::frameworks::config;
use crate::interface_adapters::clients::ApiClient;
use crate::interface_adapters::presenter::render_dashboard;
use crate::interface_adapters::session_store::FileSessionStore;
use crate::interface_adapters::state::AppState;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "brand_dashboard", version, about = "Brand recycling and redemption analytics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BRAND_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Fetch and print the analytics dashboard.
    Report {
        /// First day of the traceability window (YYYY-MM-DD).
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day of the traceability window (YYYY-MM-DD).
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Forget the stored session token.
    Logout,
    /// Show whether a session token is stored.
    Status,
}

impl Command {
    fn needs_api(&self) -> bool {
        matches!(self, Command::Login { .. } | Command::Report { .. })
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Stdout carries the report; logs go to stderr.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Runs one command against the wired adapters and returns what to print.
pub async fn execute(state: &AppState, command: Command) -> Result<String, DashboardError> {
    match command {
        Command::Login { email, password } => {
            state.login().execute(&email, &password).await?;
            Ok("Logged in.".to_string())
        }
        Command::Report { from, to } => {
            let report = state.load_dashboard().execute(DateRange::new(from, to)).await?;
            Ok(render_dashboard(&report))
        }
        Command::Logout => {
            let result = state.logout().execute().await?;
            if result.cleared {
                Ok("Logged out.".to_string())
            } else {
                Ok("No active session.".to_string())
            }
        }
        Command::Status => {
            let token = state.store.get().await.map_err(DashboardError::Storage)?;
            match SessionState::from(token) {
                SessionState::Authenticated(_) => Ok(format!(
                    "Logged in (session file: {}).",
                    state.store.path().display()
                )),
                SessionState::Anonymous => Ok("Not logged in.".to_string()),
            }
        }
    }
}

pub async fn run() -> ExitCode {
    // Pick up BRAND_* overrides from a local .env when one exists.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    let settings = match config::load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            eprintln!("{e}");
            return ExitCode::from(1);
        }
    };

    if cli.command.needs_api() {
        if let Err(e) = settings.require_api_base() {
            eprintln!("{e}");
            return ExitCode::from(1);
        }
    }

    let api_base_url = settings.api_base_url.unwrap_or_default();
    tracing::debug!(api_base_url = %api_base_url, session_file = %settings.session_file.display(), "dashboard client configured.");
    let state = AppState {
        api: ApiClient::new(api_base_url),
        store: FileSessionStore::new(settings.session_file),
    };

    match execute(&state, cli.command).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(DashboardError::NotAuthenticated) => {
            eprintln!("Not logged in; run `login` first.");
            ExitCode::from(2)
        }
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("{e}");
            eprintln!("Run `logout` to reset the session if the problem persists.");
            ExitCode::from(1)
        }
    }
}
