mod loop_handler;

pub use loop_handler::{build_headless_feed, drain_events, run, run_headless, HeadlessFeed};
