//! Logger setup

use env_logger::Env;

use crate::config::LOG_ENV;

/// Map `-v` occurrences to a default filter
fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialize env_logger. `GRADEBOOK_LOG` wins over the verbosity flag.
pub fn init(verbosity: u8) {
    let env = Env::default().filter_or(LOG_ENV, default_filter(verbosity));

    // A logger may already be installed (tests, embedding)
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(0), "warn");
        assert_eq!(default_filter(1), "info");
        assert_eq!(default_filter(2), "debug");
        assert_eq!(default_filter(9), "debug");
    }
}
