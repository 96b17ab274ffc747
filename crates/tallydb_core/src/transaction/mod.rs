//! Transaction log for nested begin/commit/rollback.
//!
//! Transactions do not isolate anything: every mutation is applied to the
//! live store immediately. What a transaction buys is reversibility. While a
//! transaction is open, each mutation appends an [`UndoRecord`] to the
//! innermost [`TransactionFrame`]; rollback replays that frame's records
//! most-recent-first, walking every touched key back to the value it held
//! before the frame began.

mod log;
mod undo;

pub use log::{TransactionFrame, TransactionLog};
pub use undo::UndoRecord;
