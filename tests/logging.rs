//! Logger initialisation honours `RUST_LOG` and tolerates repeat calls.

use log::LevelFilter;
use serial_test::serial;
use sparty::init_logging;

#[test]
#[serial]
fn rust_log_overrides_the_verbosity_flag() {
    std::env::set_var("RUST_LOG", "sparty=trace");
    init_logging(false);
    assert_eq!(log::max_level(), LevelFilter::Trace);

    init_logging(true);
    assert_eq!(log::max_level(), LevelFilter::Trace);
    std::env::remove_var("RUST_LOG");
}
