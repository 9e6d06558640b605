use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{
    domain::{
        event_board::EventBoard, leaderboard::DEFAULT_LEADERBOARD_SIZE,
        milestone::MilestoneLadder, role::EventOrganizerPolicy, session::Session,
    },
    persistence::{
        events::StoreEventRepository, points::StorePointsRepository, roles::StoreRoleLookup,
    },
    ports::{document_store::DocumentStore, identity::IdentityPort},
    processes::{
        event_expiry_runner::EventExpiryRunnerImpl,
        session_watcher::{SessionWatcher, SessionWatcherImpl},
    },
    services::session_resolver::SessionResolverServiceImpl,
    workflow::{
        events::{
            create::{CreateEventUseCase, CreateEventUseCaseImpl},
            delete::{DeleteEventUseCase, DeleteEventUseCaseImpl},
            list::{ListEventsUseCase, ListEventsUseCaseImpl},
            promote::PromoteEventWorkflowImpl,
            update::{UpdateEventUseCase, UpdateEventUseCaseImpl},
        },
        leaderboard::{
            get::{GetLeaderboardUseCase, GetLeaderboardUseCaseImpl},
            milestones::{MilestoneProgressUseCase, MilestoneProgressUseCaseImpl},
        },
    },
};

pub mod domain;
pub mod persistence;
pub mod ports;
pub mod processes;
pub mod services;
pub mod workflow;

#[cfg(test)]
mod testing;

#[derive(Clone, Debug)]
pub struct ApplicationConfig {
    pub sweep_interval: Duration,
    pub leaderboard_size: usize,
    pub milestones: MilestoneLadder,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            sweep_interval: Duration::from_secs(60 * 60),
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
            milestones: MilestoneLadder::default(),
        }
    }
}

pub struct Application {
    pub jobs: JoinHandle<()>,
    pub shutdown: CancellationToken,

    pub event_list_use_case: Box<dyn ListEventsUseCase + Send + Sync + 'static>,
    pub event_create_use_case: Box<dyn CreateEventUseCase + Send + Sync + 'static>,
    pub event_update_use_case: Box<dyn UpdateEventUseCase + Send + Sync + 'static>,
    pub event_delete_use_case: Box<dyn DeleteEventUseCase + Send + Sync + 'static>,

    pub leaderboard_use_case: Box<dyn GetLeaderboardUseCase + Send + Sync + 'static>,
    pub milestone_progress_use_case: Box<dyn MilestoneProgressUseCase + Send + Sync + 'static>,

    pub session_watcher: Arc<dyn SessionWatcher + Send + Sync + 'static>,
}

impl Application {
    pub fn current_session(&self) -> Session {
        self.session_watcher.current_session()
    }
}

pub async fn build_application<
    S: DocumentStore + Send + Sync + 'static,
    I: IdentityPort + Send + Sync + 'static,
>(
    document_store: Arc<S>,
    identity_port: Arc<I>,
    config: ApplicationConfig,
) -> Application {
    let event_repository = Arc::new(StoreEventRepository::new(document_store.clone()));
    let points_repository = Arc::new(StorePointsRepository::new(document_store.clone()));
    let role_lookup = Arc::new(StoreRoleLookup::new(document_store.clone()));

    let event_board = Arc::new(EventBoard::new());
    let organizer_policy = Arc::new(EventOrganizerPolicy);

    let promote_workflow = Arc::new(PromoteEventWorkflowImpl::new(
        event_repository.clone(),
        event_board.clone(),
    ));
    let event_expiry_runner = Arc::new(EventExpiryRunnerImpl::new(
        event_repository.clone(),
        promote_workflow.clone(),
        config.sweep_interval,
    ));

    let session_resolver = Arc::new(SessionResolverServiceImpl::new(role_lookup.clone()));
    let session_watcher = Arc::new(SessionWatcherImpl::new(
        identity_port.clone(),
        session_resolver.clone(),
    ));

    let shutdown = CancellationToken::new();
    let jobs = {
        let event_expiry_runner = event_expiry_runner.clone();
        let session_watcher = session_watcher.clone();
        let token = shutdown.clone();
        tokio::spawn(async move {
            futures::join!(
                event_expiry_runner.run(token.clone()),
                session_watcher.run(token)
            );
        })
    };

    let application = Application {
        jobs,
        shutdown,

        event_list_use_case: Box::new(ListEventsUseCaseImpl::new(
            event_repository.clone(),
            event_board.clone(),
        )),
        event_create_use_case: Box::new(CreateEventUseCaseImpl::new(
            event_repository.clone(),
            event_board.clone(),
            organizer_policy.clone(),
            event_expiry_runner.clone(),
        )),
        event_update_use_case: Box::new(UpdateEventUseCaseImpl::new(
            event_repository.clone(),
            event_board.clone(),
            organizer_policy.clone(),
            event_expiry_runner.clone(),
        )),
        event_delete_use_case: Box::new(DeleteEventUseCaseImpl::new(
            event_repository.clone(),
            event_board.clone(),
            organizer_policy.clone(),
            event_expiry_runner.clone(),
        )),

        leaderboard_use_case: Box::new(GetLeaderboardUseCaseImpl::new(
            points_repository.clone(),
            config.leaderboard_size,
        )),
        milestone_progress_use_case: Box::new(MilestoneProgressUseCaseImpl::new(
            points_repository.clone(),
            config.milestones,
        )),

        session_watcher,
    };

    application
}
