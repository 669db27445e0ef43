//! Read-only status view of a draft (for API / display).

use crate::models::draft::{Draft, DraftPhase};
use crate::models::participant::Participant;
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

/// The team whose turn it is.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamOnClock {
    pub id: TeamId,
    pub name: String,
}

/// Where the draft stands. Computed from the draft, never stored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DraftStatus {
    pub phase: DraftPhase,
    /// 1-based round of the next pick; `None` unless in progress.
    pub round: Option<usize>,
    pub team_on_clock: Option<TeamOnClock>,
    pub next_participant: Option<Participant>,
    pub picks_made: usize,
    pub total_picks: usize,
    /// Participants not yet drafted, in pick order (empty before start).
    pub remaining: Vec<Participant>,
    pub can_start: bool,
}

impl DraftStatus {
    pub fn from_draft(draft: &Draft) -> Self {
        let phase = draft.phase();
        let (round, team_on_clock, next_participant) = match phase {
            DraftPhase::InProgress => {
                let team_count = draft.teams.len();
                let team = &draft.teams[draft.cursor % team_count];
                (
                    Some(draft.cursor / team_count + 1),
                    Some(TeamOnClock {
                        id: team.id,
                        name: team.name.clone(),
                    }),
                    Some(draft.order[draft.cursor].clone()),
                )
            }
            DraftPhase::NotStarted | DraftPhase::Complete => (None, None, None),
        };
        Self {
            phase,
            round,
            team_on_clock,
            next_participant,
            picks_made: draft.cursor,
            total_picks: draft.order.len(),
            remaining: draft.order[draft.cursor..].to_vec(),
            can_start: draft.can_start(),
        }
    }
}

impl Draft {
    /// Current status projection (for API responses).
    pub fn status(&self) -> DraftStatus {
        DraftStatus::from_draft(self)
    }
}
