use crate::domain::RepoError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointTrack {
    Regular,
    Written,
}

impl PointTrack {
    pub const ALL: [PointTrack; 2] = [PointTrack::Regular, PointTrack::Written];
}

impl std::fmt::Display for PointTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointTrack::Regular => write!(f, "regular"),
            PointTrack::Written => write!(f, "written"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserPoints {
    pub email: String,
    pub name: String,
    pub activity_points: u64,
}

#[async_trait::async_trait]
pub trait PointsRepository {
    async fn get_track(&self, track: PointTrack) -> Result<Vec<UserPoints>, RepoError>;
    async fn get_user_points(
        &self,
        track: PointTrack,
        email: &str,
    ) -> Result<Option<UserPoints>, RepoError>;
}
