//! Team draft organizer web app: library with models, draft logic, HTTP API, asset delivery and config.

pub mod api;
pub mod assets;
pub mod config;
pub mod logic;
pub mod models;

pub use config::ServerConfig;
pub use logic::{next_pick, restart_draft, results_csv, start_draft, start_draft_with_rng};
pub use models::{
    Draft, DraftError, DraftId, DraftPhase, DraftStatus, Participant, ParticipantId, Pick, Team,
    TeamId, TeamOnClock, MIN_PARTICIPANTS, MIN_TEAMS,
};
