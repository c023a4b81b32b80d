mod perf;
pub mod time_utils;

pub use time_utils::{
    NOT_AVAILABLE, epoch_ms_to_local, epoch_secs_to_date, epoch_secs_to_local, format_last_updated,
};
