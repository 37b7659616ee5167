//! Log targets, so a subscriber can filter one stage at a time
//! (`RUST_LOG=cfgbind::eval=trace`).
pub(crate) const LOG_TARGET_RESOLVE: &str = "cfgbind::resolve";
pub(crate) const LOG_TARGET_EVAL: &str = "cfgbind::eval";
pub(crate) const LOG_TARGET_EMIT: &str = "cfgbind::emit";
pub(crate) const LOG_TARGET_BATCH: &str = "cfgbind::batch";
