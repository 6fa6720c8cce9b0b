use std::fs::{self, File};
use std::path::Path;
use std::sync::Once;
use std::time::{Duration, SystemTime};

use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// A reference time comfortably in the past, so tests can place mtimes on
/// either side of it without racing the clock.
#[allow(dead_code)]
pub fn base_time() -> SystemTime {
    SystemTime::now() - Duration::from_secs(3600)
}

/// Write a file and pin its modification time.
#[allow(dead_code)]
pub fn write_file_with_mtime(path: &Path, contents: &[u8], mtime: SystemTime) {
    fs::write(path, contents).expect("writing test file");
    let file = File::options()
        .write(true)
        .open(path)
        .expect("reopening test file");
    file.set_modified(mtime).expect("setting test file mtime");
}

/// Write an executable shell script (test stand-in for a compiler).
#[cfg(unix)]
#[allow(dead_code)]
pub fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, body).expect("writing test script");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .expect("marking test script executable");
}
