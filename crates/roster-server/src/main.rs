//! Roster server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store and serves the contact API over HTTP.
//!
//! # Provisioning users
//!
//! The API never creates users. Add one with a permission level and pass its
//! id in the session header:
//!
//! ```text
//! cargo run -p roster-server --bin server -- add-user --permissions ReadWrite
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use roster_api::AppState;
use roster_core::{ContactService, Permission, store::ContactStore, user::NewUser};
use roster_server::ServerConfig;
use roster_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Roster contact API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the HTTP API (the default).
  Serve,
  /// Create a user and print its id.
  AddUser {
    /// Level name (`ReadOnly`, `ReadWrite`, `Admin`, `None`) or number.
    #[arg(long, default_value = "ReadOnly", value_parser = parse_permission)]
    permissions: Permission,
    #[arg(long)]
    first_name:  Option<String>,
    #[arg(long)]
    last_name:   Option<String>,
    #[arg(long)]
    email:       Option<String>,
    #[arg(long)]
    phone:       Option<String>,
    /// Store the user as inactive.
    #[arg(long)]
    inactive:    bool,
  },
}

fn parse_permission(s: &str) -> Result<Permission, String> {
  Permission::from_stored(Some(s)).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;

  let store_path = server_cfg.resolved_store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => serve(server_cfg, store).await,
    Command::AddUser { permissions, first_name, last_name, email, phone, inactive } => {
      let user = store
        .add_user(NewUser {
          first_name,
          last_name,
          email,
          phone,
          is_active: !inactive,
          permissions,
        })
        .await
        .context("failed to add user")?;
      tracing::info!(id = user.id, %permissions, "added user");
      println!("{}", user.id);
      Ok(())
    }
  }
}

async fn serve(server_cfg: ServerConfig, store: SqliteStore) -> anyhow::Result<()> {
  let state = AppState::new(
    ContactService::new(Arc::new(store)),
    server_cfg.session()?,
  );

  let app = roster_server::app(state);
  let address = server_cfg.address();

  tracing::info!(
    session_header = %server_cfg.session_header,
    "Listening on http://{address}/api"
  );
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
