//! Point-of-sale state: the session machine, option picking and shift close.
//!
//! None of this performs I/O; the binary and any UI layer drive it.

mod selection;
mod session;
mod shift;

pub use selection::{OptionSelection, SelectionError, Toggled};
pub use session::{PosAction, PosSession, PosSnapshot, PosState};
pub use shift::{CountEntry, ShiftCount, ShiftError, ShiftLine, ShiftSummary};
