#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

pub mod constants;
pub(crate) mod defaults;
pub mod models;
pub mod utils;

pub use models::*;
pub use utils::*;

#[cfg(test)]
use std::cell::RefCell;

#[cfg(not(test))]
use std::sync::OnceLock;

pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commit the binary was built from. Release builds export `GIT_SHA` to
/// cargo; local builds leave it unset.
pub const GIT_SHA: Option<&str> = option_env!("GIT_SHA");

/// Sent with every backend request.
pub fn user_agent() -> String {
    format!("{}/{}", APP_NAME, VERSION)
}

pub fn version() -> String {
    match GIT_SHA {
        Some(sha) if !sha.is_empty() => format!("{} {} ({})", APP_NAME, VERSION, sha),
        _ => format!("{} {}", APP_NAME, VERSION),
    }
}

#[cfg(not(test))]
static CONFIG: OnceLock<Configuration> = OnceLock::new();

#[cfg(test)]
thread_local! {
    static TEST_CONFIG: RefCell<&'static Configuration> =
        RefCell::new(Box::leak(Box::new(Configuration::default())));
}

/// Print a start-up step to stderr when `general.verbose` is set.
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::config::Configuration::instance().general.verbose {
            eprintln!($($arg)*);
        }
    };
}

pub use verbose;
