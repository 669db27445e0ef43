//! Participant: a person waiting to be drafted onto a team.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant (stable across renames and deletes).
pub type ParticipantId = Uuid;

/// A participant in the draft. Names are not required to be unique.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

impl Participant {
    /// Create a new participant with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
