use forwardable_utils::telemetry::{DEFAULT_DIRECTIVE, setup_logging};

#[test]
fn setup_is_idempotent() {
    let first = setup_logging(DEFAULT_DIRECTIVE);
    assert!(first, "nothing else installs a logger in this test binary");
    assert_eq!(setup_logging("trace"), first);

    // the bridge is live: this must not panic or double-initialize
    log::warn!("telemetry test");
    tracing::info!("telemetry test");
}
