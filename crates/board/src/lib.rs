pub mod calls;
pub mod fixtures;
pub mod loadboard;

pub use calls::{CallLogError, CallSummaryRepository, InMemoryCallLog};
pub use fixtures::{demo_calls, demo_loads};
pub use loadboard::InMemoryLoadBoard;
