// Logging setup
//
// The `log` facade is stateless from the caller's point of view, so it can
// be used from the UI thread and the render thread alike. This module only
// installs the backend once at startup.
use std::io::Write;

use crate::timing::get_current_millis;

/// Environment variable holding the log filter, in `env_logger` syntax
/// (e.g. `debug` or `host=debug,present=info`).
pub const LOG_ENV: &str = "ANEMONE_LOG";

/// Default filter used when `ANEMONE_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Install the global logger.
///
/// Lines look like `[1700000000000]<debug> host::input:42 - message`. Calling
/// this more than once is harmless, later calls are ignored.
pub fn init() {
    let env = env_logger::Env::new().filter_or(LOG_ENV, DEFAULT_FILTER);

    let _ = env_logger::Builder::from_env(env)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{:?}]<{}> {}:{} - {}",
                get_current_millis(),
                record.level().as_str().to_lowercase(),
                record.module_path().unwrap_or("?"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .try_init();
}

/// Install a logger for unit tests
///
/// Output is captured by the test harness, so this is only useful for
/// debugging a failing test with `--nocapture`.
pub fn init_for_tests() {
    let _ = env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "debug"))
        .is_test(true)
        .try_init();
}
