//! Subscriber installation. Own binary: the global subscriber is per process.

use emergency::config::LogLevel;
use emergency_flags::{EmergencyNode, EmergencyState, init_tracing};

#[test]
fn init_tracing_twice_is_harmless() {
    init_tracing(LogLevel::Trace);
    init_tracing(LogLevel::Error);

    // Logging paths run with the subscriber installed.
    let state = EmergencyState::new();
    let mut node = EmergencyNode::with_state(&state);
    node.raise(2).unwrap();
    state.class_init().unwrap();
    node.destroy();
    assert_eq!(state.aggregate(), 0);
    assert_eq!(node.raised_count(), 0);
}
