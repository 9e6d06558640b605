use crate::domain::{
    leaderboard::RankedUser,
    milestone::{Milestone, MilestoneStatus},
    points::{PointTrack, UserPoints},
};

pub mod get;
pub mod milestones;

#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardView {
    pub track: PointTrack,
    pub top: Vec<UserPoints>,
    /// Set only when the signed-in user is ranked below the top entries.
    pub placement: Option<RankedUser>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MilestoneProgressView {
    pub points: u64,
    pub current: Option<Milestone>,
    pub next: Milestone,
    pub progress: f64,
    /// Every milestone of the ladder, lowest first.
    pub milestones: Vec<MilestoneStatus>,
}
