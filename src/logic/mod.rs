//! Draft business logic: starting, picking, restarting, exporting.

mod draft;
mod export;

pub use draft::{next_pick, restart_draft, start_draft, start_draft_with_rng};
pub use export::results_csv;
