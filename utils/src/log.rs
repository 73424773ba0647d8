// This makes it easy to import the logging stuff
//
// Call sites do `use utils::log;` and then `log::debug!(...)`, which
// resolves to the `log` facade macros re-exported here.

#![allow(unused_imports)]
pub use ::log::{debug, error, info, log_enabled, trace, warn, Level, LevelFilter};
pub use crate::timing::get_current_millis;
