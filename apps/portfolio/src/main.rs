use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    build_work_source,
    config::{normalize_database_url, validate_api_url},
    filter_by_work_type, is_accepted_upload, load_settings, open_snapshot_store,
    parse_work_type_filter, publish_snapshot, AdminWorkList, GalleryCard, RelatedPanel, Settings, SourceKind, WorkDraft,
    WorksClient, WorksError,
};
use shared::domain::{ContentBlock, WorkId, WorkType, PREDEFINED_TAGS};
use storage::SnapshotStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(name = "portfolio", about = "Browse and manage portfolio works")]
struct Cli {
    /// Base URL of the works API.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(long, global = true)]
    cache_database_url: Option<String>,
    /// Works shown per related-works window.
    #[arg(long, global = true)]
    page_size: Option<usize>,
    /// Where read-only views load works from: remote or cache.
    #[arg(long, global = true)]
    source: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the public gallery.
    Gallery {
        /// Only show one work type (work or original).
        #[arg(long = "type")]
        work_type: Option<String>,
    },
    /// List works newest first and refresh the local snapshot.
    List,
    /// Show the works related to one work.
    Related {
        id: String,
        #[arg(long, default_value_t = 0)]
        next: usize,
        #[arg(long, default_value_t = 0)]
        prev: usize,
    },
    /// Replace the local snapshot with the API's current list.
    Sync,
    Create(DraftArgs),
    Update {
        id: String,
        #[command(flatten)]
        draft: DraftArgs,
    },
    Delete {
        id: String,
    },
    /// Print the predefined tag vocabulary.
    Tags,
}

#[derive(Args, Debug)]
struct DraftArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    subtitle: Option<String>,
    #[arg(long)]
    owner: Option<String>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<String>,
    #[arg(long = "type")]
    work_type: Option<String>,
    #[arg(long = "tag")]
    tags: Vec<String>,
    #[arg(long = "remove-tag")]
    remove_tags: Vec<String>,
    #[arg(long)]
    thumbnail: Option<String>,
    #[arg(long)]
    main_video: Option<String>,
    /// Appends a text block; repeatable.
    #[arg(long = "text")]
    texts: Vec<String>,
    /// JSON array of content blocks replacing the body.
    #[arg(long)]
    blocks: Option<PathBuf>,
}

impl DraftArgs {
    fn apply(self, draft: &mut WorkDraft) -> Result<()> {
        if let Some(v) = self.title {
            draft.title = v;
        }
        if let Some(v) = self.subtitle {
            draft.subtitle = v;
        }
        if let Some(v) = self.owner {
            draft.owner = v;
        }
        if let Some(v) = self.date {
            draft.set_date_from_day(&v)?;
        }
        if let Some(v) = self.work_type {
            draft.work_type = v.parse::<WorkType>().map_err(|e| anyhow!(e))?;
        }
        for tag in &self.remove_tags {
            draft.remove_tag(tag);
        }
        for tag in &self.tags {
            if !draft.add_tag(tag) {
                info!(%tag, "tag already selected");
            }
        }
        if let Some(v) = self.thumbnail {
            warn_unless_media("thumbnail", &v);
            draft.thumbnail = v;
        }
        if let Some(v) = self.main_video {
            warn_unless_media("main video", &v);
            draft.main_video_url = v;
        }
        if let Some(path) = self.blocks {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read blocks file '{}'", path.display()))?;
            draft.blocks = serde_json::from_str::<Vec<ContentBlock>>(&raw)
                .with_context(|| format!("invalid content blocks in '{}'", path.display()))?;
        }
        for text in &self.texts {
            let index = draft.add_block();
            draft.set_block_text(index, text);
        }
        Ok(())
    }
}

fn warn_unless_media(field: &str, reference: &str) {
    if !is_accepted_upload(Path::new(reference)) {
        warn!(field, reference, "reference does not look like an image or video");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let settings = resolve_settings(&cli)?;

    match cli.command {
        Command::Gallery { work_type } => {
            let store = open_store(&settings).await;
            let works = build_work_source(&settings, store).load_all_works().await;
            let filter = parse_work_type_filter(work_type.as_deref());
            let cards: Vec<GalleryCard> = filter_by_work_type(&works, filter)
                .into_iter()
                .map(GalleryCard::from_work)
                .collect();
            render::gallery(&cards);
        }
        Command::List => {
            let client = require_client(&settings)?;
            let mut list = AdminWorkList::new();
            list.refresh(&client).await.map_err(notify)?;
            render::admin_rows(list.works());
            if let Some(store) = open_store(&settings).await {
                if let Err(error) = publish_snapshot(&store, list.works()).await {
                    warn!(error = %format!("{error:#}"), "failed to refresh works snapshot");
                }
            }
        }
        Command::Related { id, next, prev } => {
            let store = open_store(&settings).await;
            let pool = build_work_source(&settings, store).load_all_works().await;
            let id = WorkId::new(id);
            let Some(current) = pool.iter().find(|work| work.id == id).cloned() else {
                if pool.is_empty() {
                    info!(%id, "no works available");
                    return Ok(());
                }
                bail!("work {id} not found");
            };

            let mut panel = RelatedPanel::new(current, settings.page_size)?;
            let ticket = panel.begin_load();
            panel.finish_load(ticket, pool);
            for _ in 0..next {
                panel.next();
            }
            for _ in 0..prev {
                panel.prev();
            }
            render::related(&panel.view());
        }
        Command::Sync => {
            let client = require_client(&settings)?;
            let works = client.list_works().await.map_err(notify)?;
            let store = open_store(&settings)
                .await
                .ok_or_else(|| anyhow!("snapshot storage unavailable"))?;
            publish_snapshot(&store, &works).await?;
            println!("Snapshot refreshed with {} works.", works.len());
        }
        Command::Create(args) => {
            let client = require_client(&settings)?;
            let mut draft = WorkDraft::new();
            args.apply(&mut draft)?;
            match client.submit_draft(&draft).await.map_err(notify)? {
                Some(work) => println!("Work created: {} ({})", work.title, work.id),
                None => println!("Work created."),
            }
        }
        Command::Update { id, draft: args } => {
            let client = require_client(&settings)?;
            let id = WorkId::new(id);
            let existing = client
                .list_works()
                .await
                .map_err(notify)?
                .into_iter()
                .find(|work| work.id == id)
                .ok_or_else(|| anyhow!("work {id} not found"))?;
            let mut draft = WorkDraft::from_work(&existing);
            args.apply(&mut draft)?;
            client.submit_draft(&draft).await.map_err(notify)?;
            println!("Work updated: {id}");
        }
        Command::Delete { id } => {
            let client = require_client(&settings)?;
            client
                .delete_work(&WorkId::new(id.clone()))
                .await
                .map_err(notify)?;
            println!("Deleted {id}.");
        }
        Command::Tags => {
            for tag in PREDEFINED_TAGS {
                println!("{tag}");
            }
        }
    }

    Ok(())
}

fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = load_settings();
    if let Some(v) = &cli.api_url {
        settings.api_url = Some(v.clone());
    }
    if let Some(v) = &cli.cache_database_url {
        settings.cache_database_url = v.clone();
    }
    if let Some(v) = cli.page_size {
        if v == 0 {
            bail!("--page-size must be greater than zero");
        }
        settings.page_size = v;
    }
    if let Some(v) = &cli.source {
        settings.work_source = v.parse::<SourceKind>()?;
    }

    settings.api_url = settings
        .api_url
        .as_deref()
        .map(validate_api_url)
        .transpose()?;
    settings.cache_database_url = normalize_database_url(&settings.cache_database_url);
    Ok(settings)
}

async fn open_store(settings: &Settings) -> Option<SnapshotStore> {
    open_snapshot_store(&settings.cache_database_url).await
}

fn require_client(settings: &Settings) -> Result<WorksClient> {
    let api_url = settings
        .api_url
        .as_deref()
        .ok_or_else(|| {
            anyhow!("works api url is not configured; set PORTFOLIO_API_URL or pass --api-url")
        })?;
    Ok(WorksClient::new(api_url))
}

fn notify(err: WorksError) -> anyhow::Error {
    let notice = err.to_notification();
    anyhow::Error::new(err).context(notice)
}
