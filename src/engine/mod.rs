mod channel;
mod messages;
mod operation;
mod poll;
mod worker;

pub use channel::{ResultChannel, ResultSender};
pub use messages::{FailureCategory, FetchFailure, FetchResult, MissingScope, truncate_chars};
pub use operation::{execute, shape_history, shape_ranking, shape_single_price, shape_watchlist};
pub use poll::{PollLoop, TickOutcome};
pub use worker::{run_fetch_blocking, spawn_fetch};
