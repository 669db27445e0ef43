//! Draft phase: start (shuffle pick order), step one pick at a time, restart.

use crate::models::{Draft, DraftError, Pick, MIN_PARTICIPANTS, MIN_TEAMS};
use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;

/// Start the draft with a thread-local random source. See [`start_draft_with_rng`].
pub fn start_draft(draft: &mut Draft) -> Result<(), DraftError> {
    start_draft_with_rng(draft, &mut rand::thread_rng())
}

/// Start the draft: require 2 teams and 2 participants, clear members, shuffle the pick order.
///
/// `SliceRandom::shuffle` is a Fisher-Yates shuffle, so every permutation is equally likely
/// given a uniform `rng`.
pub fn start_draft_with_rng<R: Rng + ?Sized>(draft: &mut Draft, rng: &mut R) -> Result<(), DraftError> {
    if draft.started {
        return Err(DraftError::AlreadyStarted);
    }
    if draft.teams.len() < MIN_TEAMS || draft.participants.len() < MIN_PARTICIPANTS {
        return Err(DraftError::NotEnoughRoster {
            teams: draft.teams.len(),
            participants: draft.participants.len(),
        });
    }

    for team in &mut draft.teams {
        team.members.clear();
    }
    let mut order = draft.participants.clone();
    order.shuffle(rng);

    draft.order = order;
    draft.cursor = 0;
    draft.picks.clear();
    draft.started = true;
    draft.started_at = Some(Utc::now());

    log::info!(
        "Draft {} started: {} teams, {} participants",
        draft.id,
        draft.teams.len(),
        draft.order.len()
    );
    Ok(())
}

/// Assign the next participant in the pick order to the team whose turn it is.
///
/// Team `cursor % teams.len()` receives pick `cursor` (plain round-robin, not snake).
/// Returns `Ok(None)` without touching anything once every pick has been made.
pub fn next_pick(draft: &mut Draft) -> Result<Option<Pick>, DraftError> {
    if !draft.started {
        return Err(DraftError::NotStarted);
    }
    if draft.cursor >= draft.order.len() {
        log::debug!("Draft {} already complete, ignoring next pick", draft.id);
        return Ok(None);
    }

    let team_count = draft.teams.len();
    let participant = draft.order[draft.cursor].clone();
    let team = &mut draft.teams[draft.cursor % team_count];
    team.members.push(participant.clone());

    let pick = Pick {
        number: draft.cursor + 1,
        round: draft.cursor / team_count + 1,
        team_id: team.id,
        team_name: team.name.clone(),
        participant,
        picked_at: Utc::now(),
    };
    log::debug!(
        "Draft {} pick {} (round {}): {} -> {}",
        draft.id,
        pick.number,
        pick.round,
        pick.participant.name,
        pick.team_name
    );

    draft.picks.push(pick.clone());
    draft.cursor += 1;
    if draft.cursor == draft.order.len() {
        log::info!("Draft {} complete after {} picks", draft.id, draft.cursor);
    }
    Ok(Some(pick))
}

/// Wipe the draft back to an empty roster. Keeps the id so the owning session still finds it.
pub fn restart_draft(draft: &mut Draft) {
    *draft = Draft::with_id(draft.id);
    log::info!("Draft {} restarted", draft.id);
}
