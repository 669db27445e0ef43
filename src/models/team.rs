//! Team and the pick log entry recorded when a team drafts someone.

use crate::models::participant::Participant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// A team. Members are only filled in while the draft runs.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Participants drafted by this team, in pick order.
    pub members: Vec<Participant>,
}

impl Team {
    /// Create a new team with no members.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            members: Vec::new(),
        }
    }
}

/// One entry of the pick log.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    /// 1-based overall pick number.
    pub number: usize,
    /// 1-based round.
    pub round: usize,
    pub team_id: TeamId,
    pub team_name: String,
    pub participant: Participant,
    pub picked_at: DateTime<Utc>,
}
