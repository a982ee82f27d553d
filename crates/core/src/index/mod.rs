//! In-memory indexes built from the roster and schedule endpoints.
//!
//! List-fetch workers never touch the indexes directly. They parse the
//! season documents and send [`IndexUpdate`]s through an [`IndexHandle`];
//! a single [`IndexWriter`] task owns the indexes and applies the updates in
//! arrival order.

mod parse;
mod types;
mod writer;

pub use parse::{parse_roster, parse_schedule, ParsedRoster, ParsedSchedule, RosterPlayer, ScheduledGame};
pub use types::{GameIndex, Indexes, PlayerEntry, PlayerIndex};
pub use writer::{create_index_system, IndexHandle, IndexUpdate, IndexWriter};
