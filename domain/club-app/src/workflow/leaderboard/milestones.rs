use std::sync::Arc;

use crate::{
    domain::{
        RepoError,
        milestone::MilestoneLadder,
        points::{PointTrack, PointsRepository},
        session::Session,
    },
    workflow::leaderboard::{LeaderboardError, MilestoneProgressView},
};

#[async_trait::async_trait]
pub trait MilestoneProgressUseCase {
    fn ladder(&self) -> &MilestoneLadder;
    /// Milestones are earned with regular activity points only. Returns
    /// `None` for anonymous sessions.
    async fn milestone_progress(
        &self,
        session: &Session,
    ) -> Result<Option<MilestoneProgressView>, LeaderboardError>;
}

pub struct MilestoneProgressUseCaseImpl<R: PointsRepository> {
    points_repository: Arc<R>,
    ladder: MilestoneLadder,
}

impl<R: PointsRepository> MilestoneProgressUseCaseImpl<R> {
    pub fn new(points_repository: Arc<R>, ladder: MilestoneLadder) -> Self {
        Self {
            points_repository,
            ladder,
        }
    }
}

#[async_trait::async_trait]
impl<R: PointsRepository + Send + Sync + 'static> MilestoneProgressUseCase
    for MilestoneProgressUseCaseImpl<R>
{
    fn ladder(&self) -> &MilestoneLadder {
        &self.ladder
    }

    async fn milestone_progress(
        &self,
        session: &Session,
    ) -> Result<Option<MilestoneProgressView>, LeaderboardError> {
        let Some(email) = session.email() else {
            return Ok(None);
        };

        let points = match self
            .points_repository
            .get_user_points(PointTrack::Regular, email)
            .await
        {
            Ok(record) => record.map_or(0, |r| r.activity_points),
            Err(RepoError::StorageError(e)) => {
                log::error!("Error retrieving points of {}: {}", email, e);
                return Err(LeaderboardError::StoreUnavailable(e));
            }
        };

        Ok(Some(MilestoneProgressView {
            points,
            current: self.ladder.current(points).cloned(),
            next: self.ladder.next(points).clone(),
            progress: self.ladder.progress_to_next(points),
            milestones: self.ladder.statuses(points),
        }))
    }
}
