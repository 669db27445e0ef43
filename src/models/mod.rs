//! Data structures for the draft: teams, participants, draft state and its status view.

mod draft;
mod participant;
mod status;
mod team;

pub use draft::{Draft, DraftError, DraftId, DraftPhase, MIN_PARTICIPANTS, MIN_TEAMS};
pub use participant::{Participant, ParticipantId};
pub use status::{DraftStatus, TeamOnClock};
pub use team::{Pick, Team, TeamId};
