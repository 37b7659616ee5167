pub(crate) mod logging;

pub(crate) use logging::{LOG_TARGET_CFG, LOG_TARGET_VISIT, LogStyle};
