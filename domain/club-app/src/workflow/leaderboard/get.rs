use std::sync::Arc;

use crate::{
    domain::{
        RepoError,
        leaderboard::{Leaderboard, RankedUser},
        points::{PointTrack, PointsRepository, UserPoints},
        session::Session,
    },
    workflow::leaderboard::{LeaderboardError, LeaderboardView},
};

#[async_trait::async_trait]
pub trait GetLeaderboardUseCase {
    async fn rank(&self, track: PointTrack) -> Result<Leaderboard, LeaderboardError>;
    async fn top_n(&self, track: PointTrack, n: usize) -> Result<Vec<UserPoints>, LeaderboardError>;
    async fn find_user_rank(
        &self,
        track: PointTrack,
        email: &str,
    ) -> Result<Option<RankedUser>, LeaderboardError>;
    async fn is_in_top_n(
        &self,
        track: PointTrack,
        email: &str,
        n: usize,
    ) -> Result<bool, LeaderboardError>;
    /// The configured number of top entries, plus the session user's own
    /// standing when it falls outside of them.
    async fn leaderboard_view(
        &self,
        session: &Session,
        track: PointTrack,
    ) -> Result<LeaderboardView, LeaderboardError>;
}

pub struct GetLeaderboardUseCaseImpl<R: PointsRepository> {
    points_repository: Arc<R>,
    leaderboard_size: usize,
}

impl<R: PointsRepository> GetLeaderboardUseCaseImpl<R> {
    pub fn new(points_repository: Arc<R>, leaderboard_size: usize) -> Self {
        Self {
            points_repository,
            leaderboard_size,
        }
    }
}

#[async_trait::async_trait]
impl<R: PointsRepository + Send + Sync + 'static> GetLeaderboardUseCase
    for GetLeaderboardUseCaseImpl<R>
{
    async fn rank(&self, track: PointTrack) -> Result<Leaderboard, LeaderboardError> {
        match self.points_repository.get_track(track).await {
            Ok(users) => Ok(Leaderboard::rank(users)),
            Err(RepoError::StorageError(e)) => {
                log::error!("Error retrieving {} points: {}", track, e);
                Err(LeaderboardError::StoreUnavailable(e))
            }
        }
    }

    async fn top_n(&self, track: PointTrack, n: usize) -> Result<Vec<UserPoints>, LeaderboardError> {
        Ok(self.rank(track).await?.top_n(n).to_vec())
    }

    async fn find_user_rank(
        &self,
        track: PointTrack,
        email: &str,
    ) -> Result<Option<RankedUser>, LeaderboardError> {
        Ok(self.rank(track).await?.find_user_rank(email))
    }

    async fn is_in_top_n(
        &self,
        track: PointTrack,
        email: &str,
        n: usize,
    ) -> Result<bool, LeaderboardError> {
        Ok(self.rank(track).await?.is_in_top_n(email, n))
    }

    async fn leaderboard_view(
        &self,
        session: &Session,
        track: PointTrack,
    ) -> Result<LeaderboardView, LeaderboardError> {
        let leaderboard = self.rank(track).await?;
        let placement = session
            .email()
            .and_then(|email| leaderboard.placement_outside_top_n(email, self.leaderboard_size));
        Ok(LeaderboardView {
            track,
            top: leaderboard.top_n(self.leaderboard_size).to_vec(),
            placement,
        })
    }
}
