use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use common::storage::Upload;
use common::{InterestArea, MaterialType, UserRole};
use mentoria_server::config::AppConfig;
use mentoria_server::error::MaterialError;
use mentoria_server::models::material::MaterialDraft;
use mentoria_server::state::AppState;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Administer learning materials and their stored files.
#[derive(Parser, Debug)]
#[command(name = "mentoria")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to $MENTORIA_CONFIG or config/config)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the upload root and synchronize the database schema
    Init,

    /// Register a user with the interest areas of their profile
    AddUser {
        username: String,
        /// MENTOR or MENTORED
        role: UserRole,
        #[arg(long = "area", value_name = "AREA")]
        areas: Vec<InterestArea>,
    },

    /// Create a material, optionally uploading a file
    Create {
        #[arg(long)]
        uploader: i32,
        #[command(flatten)]
        meta: MetaArgs,
    },

    /// Replace a material's metadata and optionally its file
    Update {
        id: i32,
        #[command(flatten)]
        meta: MetaArgs,
    },

    /// Delete a material and its stored file
    Delete { id: i32 },

    /// Show one material
    Show { id: i32 },

    /// List materials, optionally only those tagged with any of the given areas
    List {
        #[arg(long = "area", value_name = "AREA")]
        areas: Vec<InterestArea>,
    },

    /// Suggest materials for a user
    Suggest {
        user_id: i32,
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(clap::Args, Debug)]
struct MetaArgs {
    #[arg(long)]
    title: String,
    /// LINK, DOCUMENT or VIDEO
    #[arg(long = "type", value_name = "TYPE")]
    material_type: MaterialType,
    #[arg(long)]
    url: Option<String>,
    #[arg(long = "area", value_name = "AREA")]
    areas: Vec<InterestArea>,
    /// Local file to upload
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
}

impl MetaArgs {
    async fn into_parts(self) -> anyhow::Result<(MaterialDraft, Option<Upload>)> {
        let mut draft = MaterialDraft::new(self.title, self.material_type).with_areas(self.areas);
        draft.url = self.url;
        let upload = match self.file {
            Some(path) => Some(
                Upload::open(&path)
                    .await
                    .with_context(|| format!("cannot open {}", path.display()))?,
            ),
            None => None,
        };
        Ok((draft, upload))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<MaterialError>() {
            Some(err) => {
                let body = ErrorBody {
                    error: err.code(),
                    message: err.to_string(),
                };
                match serde_json::to_string_pretty(&body) {
                    Ok(json) => println!("{json}"),
                    Err(_) => eprintln!("{}: {err}", err.code()),
                }
            }
            None => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .context("failed to load configuration")?;

    let state = AppState::bootstrap(&config).await?;
    let service = &state.materials;

    match cli.command {
        Command::Init => print_json(&serde_json::json!({
            "upload_root": service.guard().root().display().to_string(),
            "max_bytes": service.guard().max_bytes(),
            "allowed_extensions": service.guard().allowed_extensions(),
        })),
        Command::AddUser {
            username,
            role,
            areas,
        } => print_json(&state.users.register(&username, role, &areas).await?),
        Command::Create { uploader, meta } => {
            let (draft, upload) = meta.into_parts().await?;
            print_json(&service.create(draft, uploader, upload).await?)
        }
        Command::Update { id, meta } => {
            let (draft, upload) = meta.into_parts().await?;
            print_json(&service.update(id, draft, upload).await?)
        }
        Command::Delete { id } => {
            service.delete(id).await?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
        Command::Show { id } => print_json(&service.get(id).await?),
        Command::List { areas } => print_json(&service.list_by_areas(&areas).await?),
        Command::Suggest { user_id, limit } => {
            print_json(&service.suggest(user_id, limit).await?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
