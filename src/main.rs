use std::{sync::Arc, time::Duration};

use club_app::{
    ApplicationConfig, build_application,
    domain::{milestone::MilestoneLadder, points::PointTrack},
    processes::session_watcher::SessionWatcher,
    workflow::{
        events::list::ListEventsUseCase,
        leaderboard::{get::GetLeaderboardUseCase, milestones::MilestoneProgressUseCase},
    },
};
use club_session_local::LocalIdentityProvider;
use club_store_memory::{MemoryDocumentStore, SeedError};
use log::{error, info, warn};

use crate::{
    config::{AppConfig, ConfigError},
    logs::LoggerError,
};

mod config;
mod logs;

const SESSION_RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Logger(#[from] LoggerError),
    #[error(transparent)]
    Seed(#[from] SeedError),
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Preparing graceful exit...");
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let dotenv = dotenvy::dotenv();

    let config = AppConfig::from_env()?;
    logs::init_logger(&config.log)?;
    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let store = Arc::new(match &config.store_seed {
        Some(path) => {
            info!("Seeding document store from {}", path.display());
            MemoryDocumentStore::from_seed_file(path)?
        }
        None => MemoryDocumentStore::new(),
    });

    let identity = Arc::new(LocalIdentityProvider::new());
    let expected_email = config.session_user.as_ref().map(|u| u.email.clone());
    if let Some(user) = config.session_user.clone() {
        identity.sign_in(user);
    }

    let app = build_application(
        store,
        identity,
        ApplicationConfig {
            sweep_interval: config.sweep_interval,
            leaderboard_size: config.leaderboard_size,
            milestones: MilestoneLadder::default(),
        },
    )
    .await;

    info!("Starting application");

    let mut sessions = app.session_watcher.subscribe();
    let resolved = tokio::time::timeout(
        SESSION_RESOLVE_TIMEOUT,
        sessions.wait_for(|s| s.email() == expected_email.as_deref()),
    )
    .await
    .is_ok_and(|changed| changed.is_ok());
    if !resolved {
        warn!("Session was not resolved in time, continuing anonymously");
    }
    let session = app.current_session();

    match app.event_list_use_case.list_upcoming().await {
        Ok(events) => {
            info!("{} upcoming events", events.len());
            for event in events {
                info!("  {} {} ({})", event.date, event.title, event.id);
            }
        }
        Err(e) => error!("Failed to list upcoming events: {}", e),
    }

    for track in PointTrack::ALL {
        match app.leaderboard_use_case.leaderboard_view(&session, track).await {
            Ok(view) => {
                info!("Top of the {} leaderboard:", track);
                for (index, user) in view.top.iter().enumerate() {
                    info!("  {}. {} - {} points", index + 1, user.name, user.activity_points);
                }
                if let Some(placement) = view.placement {
                    info!(
                        "  ... {}. {} - {} points",
                        placement.rank, placement.user.name, placement.user.activity_points
                    );
                }
            }
            Err(e) => error!("Failed to load {} leaderboard: {}", track, e),
        }
    }

    match app.milestone_progress_use_case.milestone_progress(&session).await {
        Ok(Some(progress)) => {
            info!(
                "{} points, {:.0}% of the way to {}",
                progress.points, progress.progress, progress.next.name
            );
            for status in &progress.milestones {
                if status.achieved {
                    info!("  {} achieved", status.milestone.name);
                } else if status.is_next {
                    info!(
                        "  {} next, {} more points needed",
                        status.milestone.name, status.points_remaining
                    );
                }
            }
        }
        Ok(None) => {}
        Err(e) => error!("Failed to load milestone progress: {}", e),
    }

    shutdown_signal().await;

    app.shutdown.cancel();
    if let Err(e) = app.jobs.await {
        error!("Background jobs ended abnormally: {}", e);
    }
    info!("Stopped");
    Ok(())
}
