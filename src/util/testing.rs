//! Test helpers shared by unit and integration tests.

use std::path::Path;
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::config::Settings;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    // RUST_LOG wins; otherwise our own crate at debug
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("standup=debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Settings rooted in `dir`, independent of the user's environment.
pub fn settings_in(dir: &Path) -> Settings {
    Settings {
        data_dir: dir.to_path_buf(),
        store_file: "storage.json".to_string(),
        editor: "true".to_string(),
        date_format: crate::config::DEFAULT_DATE_FORMAT.to_string(),
        confirm_reset: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
        init_test_setup();
    }

    #[test]
    fn given_dir_when_building_settings_then_store_inside_dir() {
        let settings = settings_in(Path::new("/tmp/standup-test"));
        assert_eq!(
            settings.store_path(),
            Path::new("/tmp/standup-test/storage.json")
        );
    }
}
