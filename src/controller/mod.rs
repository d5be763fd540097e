//! Game controller. Turns move requests into session changes and events.

mod events;
mod machine;
mod state;

pub use events::GameEvent;
pub use machine::GameController;
pub use state::{ControllerState, MoveReport, PendingReply};
