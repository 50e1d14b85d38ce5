//! YaMDb API server.
//!
//! ```bash
//! # Serve on $API_PORT (default 8000); migrations run at startup
//! yamdb
//!
//! # Create or promote a superuser and print a confirmation code for it
//! yamdb create-superuser --username root --email root@example.com
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::{info, warn};

use yamdb_api::config::ApiConfig;
use yamdb_api::infra::db::DbUserRepository;
use yamdb_api::infra::mail::Mailer;
use yamdb_api::router::build_router;
use yamdb_api::state::AppState;
use yamdb_api::usecase::auth::CreateSuperuserUseCase;
use yamdb_api_migration::Migrator;
use yamdb_core::tracing::init_tracing;

#[derive(Parser)]
#[command(about = "YaMDb review and rating API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Create a superuser, or promote an existing user with this username and email.
    CreateSuperuser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = ApiConfig::from_env();
    init_tracing(config.log_json);

    if config.secret_key_generated {
        warn!("SECRET_KEY is not set; using a random key, tokens will not survive a restart");
    }

    let db = connect(&config).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, db).await,
        Command::CreateSuperuser { username, email } => {
            let usecase = CreateSuperuserUseCase {
                users: DbUserRepository { db },
                secret: config.secret_key,
            };
            let (user, code) = usecase
                .execute(&username, &email)
                .await
                .context("failed to create superuser")?;
            println!("superuser {} (id {}) ready", user.username, user.id);
            println!("confirmation_code: {code}");
            Ok(())
        }
    }
}

async fn connect(config: &ApiConfig) -> Result<DatabaseConnection> {
    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    Migrator::up(&db, None)
        .await
        .context("failed to run migrations")?;
    Ok(db)
}

async fn serve(config: ApiConfig, db: DatabaseConnection) -> Result<()> {
    let mailer = Mailer::from_config(
        config.mail_relay_url.as_deref(),
        config.mail_file_path.clone(),
    );
    let state = AppState {
        db,
        public_host: config.public_host().to_owned(),
        secret_key: config.secret_key,
        mailer,
        mail_from: config.mail_from,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(debug = config.debug, "yamdb api listening on {addr}");
    axum::serve(listener, router).await.context("server error")
}
