pub(crate) mod date;
pub(crate) mod debug;

pub(crate) use date::{format_run_date, parse_run_date};
pub(crate) use debug::{debug_enabled, debug_log, set_debug};
