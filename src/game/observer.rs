//! State-change notifications.
//!
//! The controller calls every subscribed observer after each command and
//! after each deferred throw that actually fires. Closures taking a
//! `&Snapshot` are observers:
//!
//! ```
//! use rust_pogs::game::{MatchController, Snapshot};
//! use rust_pogs::core::MatchConfig;
//!
//! let mut game = MatchController::new(MatchConfig::default(), 42).unwrap();
//! game.subscribe(|snapshot: &Snapshot| {
//!     println!("stack: {}", snapshot.stack_size);
//! });
//! game.throw();
//! ```

use super::snapshot::Snapshot;

/// Receives a snapshot whenever game state may have changed.
pub trait StateObserver {
    fn on_state_changed(&mut self, snapshot: &Snapshot);
}

impl<F> StateObserver for F
where
    F: FnMut(&Snapshot),
{
    fn on_state_changed(&mut self, snapshot: &Snapshot) {
        self(snapshot)
    }
}
