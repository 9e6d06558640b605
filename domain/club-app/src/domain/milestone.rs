#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Milestone {
    pub name: String,
    pub threshold: u64,
    pub color: String,
}

impl Milestone {
    pub fn new(name: impl Into<String>, threshold: u64, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            threshold,
            color: color.into(),
        }
    }
}

/// Where a user stands relative to one rung of the ladder.
#[derive(Clone, Debug, PartialEq)]
pub struct MilestoneStatus {
    pub milestone: Milestone,
    pub achieved: bool,
    /// The lowest milestone not yet achieved.
    pub is_next: bool,
    pub progress: f64,
    pub points_remaining: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MilestoneError {
    #[error("milestone ladder must contain at least one milestone")]
    Empty,
    #[error("milestone thresholds must be strictly increasing, got {next} after {previous}")]
    NotIncreasing { previous: u64, next: u64 },
    #[error("milestone '{0}' is not part of the ladder")]
    UnknownMilestone(String),
}

/// A non-empty sequence of milestones with strictly increasing thresholds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MilestoneLadder {
    milestones: Vec<Milestone>,
}

impl MilestoneLadder {
    pub fn new(milestones: Vec<Milestone>) -> Result<Self, MilestoneError> {
        if milestones.is_empty() {
            return Err(MilestoneError::Empty);
        }
        for pair in milestones.windows(2) {
            if pair[1].threshold <= pair[0].threshold {
                return Err(MilestoneError::NotIncreasing {
                    previous: pair[0].threshold,
                    next: pair[1].threshold,
                });
            }
        }
        Ok(Self { milestones })
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    fn highest(&self) -> &Milestone {
        &self.milestones[self.milestones.len() - 1]
    }

    pub fn current(&self, points: u64) -> Option<&Milestone> {
        self.milestones.iter().rev().find(|m| m.threshold <= points)
    }

    /// Past the top of the ladder this keeps returning the highest milestone.
    pub fn next(&self, points: u64) -> &Milestone {
        self.milestones
            .iter()
            .find(|m| m.threshold > points)
            .unwrap_or_else(|| self.highest())
    }

    /// Percentage in `[0, 100]` between the previous milestone's threshold
    /// (0 for the first) and `milestone`'s threshold.
    pub fn progress_toward(&self, points: u64, milestone: &Milestone) -> Result<f64, MilestoneError> {
        let index = self
            .milestones
            .iter()
            .position(|m| m == milestone)
            .ok_or_else(|| MilestoneError::UnknownMilestone(milestone.name.clone()))?;
        Ok(self.progress_at(index, points))
    }

    pub fn progress_to_next(&self, points: u64) -> f64 {
        let index = self
            .milestones
            .iter()
            .position(|m| m.threshold > points)
            .unwrap_or(self.milestones.len() - 1);
        self.progress_at(index, points)
    }

    /// One entry per milestone, in ladder order.
    pub fn statuses(&self, points: u64) -> Vec<MilestoneStatus> {
        self.milestones
            .iter()
            .enumerate()
            .map(|(index, milestone)| {
                let achieved = points >= milestone.threshold;
                let previous_reached = index == 0 || points >= self.milestones[index - 1].threshold;
                MilestoneStatus {
                    milestone: milestone.clone(),
                    achieved,
                    is_next: !achieved && previous_reached,
                    progress: self.progress_at(index, points),
                    points_remaining: milestone.threshold.saturating_sub(points),
                }
            })
            .collect()
    }

    fn progress_at(&self, index: usize, points: u64) -> f64 {
        let threshold = self.milestones[index].threshold;
        let previous = match index {
            0 => 0,
            _ => self.milestones[index - 1].threshold,
        };

        if threshold == previous {
            return if points >= threshold { 100.0 } else { 0.0 };
        }

        let progress = (points as f64 - previous as f64) / (threshold - previous) as f64 * 100.0;
        progress.clamp(0.0, 100.0)
    }
}

impl Default for MilestoneLadder {
    fn default() -> Self {
        Self {
            milestones: vec![
                Milestone::new("Bronze Member", 10, "#CD7F32"),
                Milestone::new("Silver Member", 25, "#C0C0C0"),
                Milestone::new("Gold Member", 50, "#FFD700"),
                Milestone::new("Platinum Member", 75, "#E5E4E2"),
                Milestone::new("Diamond Member", 100, "#B9F2FF"),
            ],
        }
    }
}
