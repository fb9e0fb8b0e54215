/// Sentinel - moderation panel storage tool
///
/// Inspects, exports and restores the panel's JSON collections, and
/// applies punishments as the stored session.
use clap::Parser;
use sentinel_panel::{
    config::SentinelConfig,
    context::AppContext,
    models::{catalog, PunishmentDraft, PunishmentType},
    store::{Collection, ExportFile},
    workflow::Submission,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(clap::Parser)]
#[clap(name = "sentinel", version)]
enum Command {
    /// Storage footprint and per-collection record counts
    Status,
    /// Print the stored text of a collection
    Raw {
        #[clap(value_parser = Collection::from_str)]
        collection: Collection,
    },
    /// Export one collection as JSON
    Export {
        #[clap(value_parser = Collection::from_str)]
        collection: Collection,
        /// Defaults to the configured export directory
        #[clap(long)]
        out: Option<PathBuf>,
    },
    /// Export logins, staff, logs and requests in one file
    Backup {
        #[clap(long)]
        out: Option<PathBuf>,
    },
    /// Replace a collection with the contents of an exported file
    Import {
        #[clap(value_parser = Collection::from_str)]
        collection: Collection,
        file: PathBuf,
    },
    /// Recent login attempts
    Logins {
        #[clap(long, default_value_t = 20)]
        limit: usize,
    },
    /// Apply a punishment, or file a request when the session's level
    /// does not allow it
    Punish {
        #[clap(value_parser = PunishmentType::from_str)]
        punishment_type: PunishmentType,
        target: String,
        reason: String,
        /// "<n> Minutos|Horas|Dias" or "Permanente"
        #[clap(long)]
        duration: Option<String>,
        #[clap(long)]
        server: Option<String>,
        #[clap(long)]
        description: Option<String>,
        /// Evidence link
        #[clap(long)]
        evidence: Option<String>,
        /// Severity label for ORG_WARN
        #[clap(long)]
        warn_level: Option<String>,
    },
    /// Servers, suggested reasons and org warning levels
    Catalog,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = Command::parse();
    let config = SentinelConfig::from_env()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.default_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let ctx = AppContext::new(config).await?;

    match cmd {
        Command::Status => status(&ctx).await,
        Command::Raw { collection } => {
            let view = ctx.store.raw_view(collection).await?;
            println!("{}", view);
            Ok(())
        }
        Command::Export { collection, out } => {
            let file = ctx.store.export_collection(collection).await?;
            write_export(&ctx, file, out).await
        }
        Command::Backup { out } => {
            let file = ctx.store.export_full_backup().await?;
            write_export(&ctx, file, out).await
        }
        Command::Import { collection, file } => {
            let text = tokio::fs::read_to_string(&file).await?;
            let count = ctx.store.import_collection(collection, &text).await?;
            println!("Imported {} record(s) into {}", count, collection);
            Ok(())
        }
        Command::Logins { limit } => {
            for login in ctx.sessions.login_history(Some(limit)).await? {
                println!(
                    "{}  {:<7}  {:<20}  {:<15}  {}",
                    login.timestamp.format("%d/%m/%Y %H:%M:%S"),
                    format!("{:?}", login.status).to_uppercase(),
                    login.username,
                    login.ip,
                    login.details
                );
            }
            Ok(())
        }
        Command::Punish {
            punishment_type,
            target,
            reason,
            duration,
            server,
            description,
            evidence,
            warn_level,
        } => {
            let mut draft = PunishmentDraft::new(punishment_type, &target, &reason);
            if let Some(duration) = duration.as_deref() {
                draft = draft.with_duration(duration);
            }
            if let Some(server) = server.as_deref() {
                draft = draft.with_server(server);
            }
            if let Some(description) = description.as_deref() {
                draft = draft.with_description(description);
            }
            if let Some(url) = evidence.as_deref() {
                draft = draft.with_evidence(url);
            }
            if let Some(level) = warn_level.as_deref() {
                draft = draft.with_warn_level(level);
            }

            let session = ctx.sessions.current_user().await?;
            match ctx.punishments.submit(&session, draft).await? {
                Submission::Executed(log) => {
                    println!("Applied {} to {} (log {})", log.punishment_type, log.user, log.id)
                }
                Submission::Requested(request) => println!(
                    "{} cannot apply {}; filed request {}",
                    session.level.display_name(),
                    request.punishment_type,
                    request.id
                ),
            }
            Ok(())
        }
        Command::Catalog => {
            println!("Servers:");
            for server in catalog::SERVERS {
                let marker = if server == catalog::DEFAULT_SERVER { " (default)" } else { "" };
                println!("  {}{}", server, marker);
            }
            println!("Reasons:");
            for (category, reasons) in catalog::PREDEFINED_REASONS {
                println!("  {:<14} {}", category, reasons.join(", "));
            }
            println!("Org warning levels:");
            for level in catalog::ORG_WARN_LEVELS {
                println!("  {}", level);
            }
            Ok(())
        }
    }
}

async fn status(ctx: &AppContext) -> anyhow::Result<()> {
    println!(
        "Backend: {} ({})",
        ctx.config.storage.backend,
        ctx.config.storage.data_directory.display()
    );
    println!("Footprint: {}", ctx.store.storage_footprint().await?);

    for collection in Collection::ALL {
        if !collection.is_array() {
            continue;
        }
        match ctx.store.count(collection).await? {
            Some(count) => println!("  {:<14} {}", collection.as_str(), count),
            None => println!("  {:<14} malformed", collection.as_str()),
        }
    }

    let stats = ctx.punishments.stats().await?;
    println!("Logs: {}", stats);
    let weekly: Vec<String> = stats
        .weekly()
        .map(|(day, count)| format!("{} {}", day, count))
        .collect();
    println!("  by weekday: {}", weekly.join(", "));

    let user = ctx.sessions.current_user().await?;
    println!("Session: {} ({})", user.name, user.level.display_name());
    Ok(())
}

async fn write_export(
    ctx: &AppContext,
    file: ExportFile,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let dir = out.unwrap_or_else(|| ctx.config.export.directory.clone());
    let path = file.write_to(&dir).await?;
    println!("Wrote {}", path.display());
    Ok(())
}
