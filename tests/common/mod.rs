#![allow(dead_code)]

pub mod shapes;

/// Route `log` output through the test harness; `RUST_LOG=debug` shows the
/// per-stage messages.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
