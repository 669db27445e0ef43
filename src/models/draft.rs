//! Draft and DraftPhase, plus roster editing before the draft starts.

use crate::models::participant::{Participant, ParticipantId};
use crate::models::team::{Pick, Team, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fewer teams or participants than this and the draft cannot start.
pub const MIN_TEAMS: usize = 2;
pub const MIN_PARTICIPANTS: usize = 2;

/// Errors that can occur during draft operations. A failed operation never changes the draft.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DraftError {
    /// Name is empty or whitespace-only.
    EmptyName,
    /// Not enough teams or participants to start.
    NotEnoughRoster { teams: usize, participants: usize },
    /// Teams and participants cannot be edited once the draft has started.
    RosterLocked,
    /// The draft is already running (or complete); restart it first.
    AlreadyStarted,
    /// No draft is running.
    NotStarted,
    TeamNotFound(TeamId),
    ParticipantNotFound(ParticipantId),
}

impl std::fmt::Display for DraftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DraftError::EmptyName => write!(f, "Name must not be empty"),
            DraftError::NotEnoughRoster { .. } => write!(
                f,
                "At least {} teams and {} participants are required to start the draft.",
                MIN_TEAMS, MIN_PARTICIPANTS
            ),
            DraftError::RosterLocked => {
                write!(f, "Teams and participants cannot be changed after the draft has started")
            }
            DraftError::AlreadyStarted => write!(f, "The draft has already started"),
            DraftError::NotStarted => write!(f, "The draft has not started"),
            DraftError::TeamNotFound(_) => write!(f, "Team not found"),
            DraftError::ParticipantNotFound(_) => write!(f, "Participant not found"),
        }
    }
}

impl std::error::Error for DraftError {}

/// Unique identifier for a draft (one per browser session).
pub type DraftId = Uuid;

/// Phase of the draft, derived from `started` and the cursor.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftPhase {
    /// Registering teams and participants.
    #[default]
    NotStarted,
    /// Picks remain.
    InProgress,
    /// Every participant has been picked.
    Complete,
}

/// Full draft state: roster, pick order, cursor and pick log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Draft {
    pub id: DraftId,
    /// Teams in registration order; picks rotate through them in this order.
    pub teams: Vec<Team>,
    pub participants: Vec<Participant>,
    pub started: bool,
    /// Shuffled copy of `participants`, captured at start. Empty before start.
    pub order: Vec<Participant>,
    /// Index into `order` of the next participant to assign.
    pub cursor: usize,
    /// One entry per pick made so far (`picks.len() == cursor`).
    pub picks: Vec<Pick>,
    pub started_at: Option<DateTime<Utc>>,
}

impl Default for Draft {
    fn default() -> Self {
        Self::new()
    }
}

impl Draft {
    /// Create an empty draft with a fresh id.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Create an empty draft with the given id.
    pub fn with_id(id: DraftId) -> Self {
        Self {
            id,
            teams: Vec::new(),
            participants: Vec::new(),
            started: false,
            order: Vec::new(),
            cursor: 0,
            picks: Vec::new(),
            started_at: None,
        }
    }

    pub fn phase(&self) -> DraftPhase {
        if !self.started {
            DraftPhase::NotStarted
        } else if self.cursor < self.order.len() {
            DraftPhase::InProgress
        } else {
            DraftPhase::Complete
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase() == DraftPhase::Complete
    }

    /// True when the roster is large enough and the draft has not started yet.
    pub fn can_start(&self) -> bool {
        !self.started && self.teams.len() >= MIN_TEAMS && self.participants.len() >= MIN_PARTICIPANTS
    }

    /// Register a team (NotStarted only). Returns the new team's id.
    pub fn add_team(&mut self, name: &str) -> Result<TeamId, DraftError> {
        let name = self.checked_name(name)?;
        let team = Team::new(name);
        let id = team.id;
        self.teams.push(team);
        Ok(id)
    }

    /// Register a participant (NotStarted only). Returns the new participant's id.
    pub fn add_participant(&mut self, name: &str) -> Result<ParticipantId, DraftError> {
        let name = self.checked_name(name)?;
        let participant = Participant::new(name);
        let id = participant.id;
        self.participants.push(participant);
        Ok(id)
    }

    /// Rename a team in place, keeping its position.
    pub fn rename_team(&mut self, id: TeamId, name: &str) -> Result<(), DraftError> {
        let name = self.checked_name(name)?;
        let team = self
            .teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(DraftError::TeamNotFound(id))?;
        team.name = name;
        Ok(())
    }

    /// Rename a participant in place, keeping its position.
    pub fn rename_participant(&mut self, id: ParticipantId, name: &str) -> Result<(), DraftError> {
        let name = self.checked_name(name)?;
        let participant = self
            .participants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DraftError::ParticipantNotFound(id))?;
        participant.name = name;
        Ok(())
    }

    /// Remove a team; later teams shift down one position.
    pub fn remove_team(&mut self, id: TeamId) -> Result<(), DraftError> {
        self.ensure_editable()?;
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == id)
            .ok_or(DraftError::TeamNotFound(id))?;
        self.teams.remove(idx);
        Ok(())
    }

    /// Remove a participant; later participants shift down one position.
    pub fn remove_participant(&mut self, id: ParticipantId) -> Result<(), DraftError> {
        self.ensure_editable()?;
        let idx = self
            .participants
            .iter()
            .position(|p| p.id == id)
            .ok_or(DraftError::ParticipantNotFound(id))?;
        self.participants.remove(idx);
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), DraftError> {
        if self.started {
            return Err(DraftError::RosterLocked);
        }
        Ok(())
    }

    /// Roster lock check followed by the empty-name guard; returns the trimmed name.
    fn checked_name(&self, name: &str) -> Result<String, DraftError> {
        self.ensure_editable()?;
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DraftError::EmptyName);
        }
        Ok(trimmed.to_string())
    }
}
