use log::{info};
use std::sync::{Once};

/// The log specification used when RUST_LOG isn't set
const LOG_ENV: &str = "weak_script=info";

static INIT: Once = Once::new();

///
/// Starts the logger (only the first call has any effect)
///
pub fn init_logger() {
    INIT.call_once(|| {
        let logger = flexi_logger::Logger::try_with_env_or_str(LOG_ENV)
            .and_then(|logger| logger.start());

        match logger {
            // Dropping the handle shuts the logger down
            Ok(handle)  => { std::mem::forget(handle); info!("Logger initialized ({})", LOG_ENV); }
            Err(err)    => eprintln!("!! Could not start the logger: {}", err)
        }
    });
}
