use std::cmp::Ordering;

use crate::domain::points::UserPoints;

pub const DEFAULT_LEADERBOARD_SIZE: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedUser {
    pub user: UserPoints,
    /// 1-based position in the full ordering.
    pub rank: usize,
}

/// A full descending ordering of one point track.
///
/// Equal point totals are ordered by email ascending, so the rank of every
/// user is stable for identical input regardless of fetch order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<UserPoints>,
}

fn compare_standing(a: &UserPoints, b: &UserPoints) -> Ordering {
    b.activity_points
        .cmp(&a.activity_points)
        .then_with(|| a.email.cmp(&b.email))
}

impl Leaderboard {
    pub fn rank(mut users: Vec<UserPoints>) -> Self {
        users.sort_by(compare_standing);
        Self { entries: users }
    }

    pub fn entries(&self) -> &[UserPoints] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_n(&self, n: usize) -> &[UserPoints] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn find_user_rank(&self, email: &str) -> Option<RankedUser> {
        self.entries
            .iter()
            .position(|u| u.email == email)
            .map(|index| RankedUser {
                user: self.entries[index].clone(),
                rank: index + 1,
            })
    }

    pub fn is_in_top_n(&self, email: &str, n: usize) -> bool {
        self.find_user_rank(email)
            .is_some_and(|ranked| ranked.rank <= n)
    }

    /// The user's standing, but only when it is not already visible in the top `n`.
    pub fn placement_outside_top_n(&self, email: &str, n: usize) -> Option<RankedUser> {
        self.find_user_rank(email).filter(|ranked| ranked.rank > n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, points: u64) -> UserPoints {
        UserPoints {
            email: email.to_string(),
            name: email.split('@').next().unwrap_or_default().to_string(),
            activity_points: points,
        }
    }

    fn sample() -> Vec<UserPoints> {
        vec![
            user("dana@club.org", 12),
            user("ari@club.org", 40),
            user("cyd@club.org", 40),
            user("bo@club.org", 3),
            user("eli@club.org", 77),
            user("fay@club.org", 0),
            user("gus@club.org", 12),
        ]
    }

    #[test]
    fn test_rank_orders_descending_with_email_tie_break() {
        let board = Leaderboard::rank(sample());
        let emails: Vec<_> = board.entries().iter().map(|u| u.email.as_str()).collect();
        assert_eq!(
            emails,
            vec![
                "eli@club.org",
                "ari@club.org",
                "cyd@club.org",
                "dana@club.org",
                "gus@club.org",
                "bo@club.org",
                "fay@club.org",
            ]
        );
    }

    #[test]
    fn test_rank_is_independent_of_input_order() {
        let mut reversed = sample();
        reversed.reverse();
        assert_eq!(Leaderboard::rank(sample()), Leaderboard::rank(reversed));
    }

    #[test]
    fn test_rank_is_a_permutation() {
        let board = Leaderboard::rank(sample());
        assert_eq!(board.len(), sample().len());
        for u in sample() {
            assert!(board.entries().contains(&u));
        }
        for pair in board.entries().windows(2) {
            assert!(pair[0].activity_points >= pair[1].activity_points);
        }
    }

    #[test]
    fn test_top_n_is_prefix() {
        let board = Leaderboard::rank(sample());
        assert_eq!(board.top_n(5), &board.entries()[..5]);
        assert_eq!(board.top_n(100).len(), 7);
        assert!(Leaderboard::default().top_n(5).is_empty());
    }

    #[test]
    fn test_find_user_rank_matches_position() {
        let board = Leaderboard::rank(sample());
        for (index, u) in board.entries().iter().enumerate() {
            let ranked = board.find_user_rank(&u.email).unwrap();
            assert_eq!(ranked.rank, index + 1);
            assert_eq!(&ranked.user, u);
        }
        assert!(board.find_user_rank("nobody@club.org").is_none());
    }

    #[test]
    fn test_top_n_membership_and_outside_placement() {
        let board = Leaderboard::rank(sample());

        assert!(board.is_in_top_n("gus@club.org", 5));
        assert!(!board.is_in_top_n("bo@club.org", 5));
        assert!(!board.is_in_top_n("nobody@club.org", 5));

        assert!(board.placement_outside_top_n("eli@club.org", 5).is_none());
        let placement = board.placement_outside_top_n("fay@club.org", 5).unwrap();
        assert_eq!(placement.rank, 7);
    }
}
