//! Unit tests for Engine singleton manager
//!
//! ENGINE_STATE is a global OnceLock shared across all tests; everything
//! here is marked #[serial] to run sequentially.

use crate::device::mock_device::MockDevice;
use crate::log::{LogEntry, LogSeverity, Logger};
use crate::meridian::{Engine, Error};
use serial_test::serial;
use std::sync::{Arc, Mutex};

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures log entries for verification
#[derive(Clone)]
struct TestLogger {
    entries: Arc<Mutex<Vec<(LogSeverity, String)>>>,
}

impl TestLogger {
    fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn entry_count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    fn severities(&self) -> Vec<LogSeverity> {
        self.entries.lock().unwrap().iter().map(|(s, _)| *s).collect()
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        let mut entries = self.entries.lock().unwrap();
        entries.push((entry.severity, entry.message.clone()));
    }
}

/// Reset engine state before each test (initialize is idempotent)
fn setup() {
    Engine::reset_for_testing();
    let _ = Engine::initialize();
    Engine::reset_logger();
}

// ============================================================================
// INITIALIZATION AND SHUTDOWN
// ============================================================================

#[test]
#[serial]
fn test_initialize_is_idempotent() {
    setup();
    assert!(Engine::initialize().is_ok());
    assert!(Engine::initialize().is_ok());
}

#[test]
#[serial]
fn test_shutdown_clears_singletons() {
    setup();
    Engine::create_device(MockDevice::new()).unwrap();
    Engine::create_resource_registry().unwrap();

    Engine::shutdown();

    assert!(Engine::device().is_err());
    assert!(Engine::resource_registry().is_err());
}

// ============================================================================
// DEVICE SINGLETON
// ============================================================================

#[test]
#[serial]
fn test_create_and_get_device() {
    setup();
    Engine::create_device(MockDevice::new()).unwrap();

    let device = Engine::device().unwrap();
    let caps = device.lock().unwrap().caps();
    assert!(caps.supports_compute);
}

#[test]
#[serial]
fn test_duplicate_device_fails() {
    setup();
    Engine::create_device(MockDevice::new()).unwrap();

    match Engine::create_device(MockDevice::new()) {
        Err(Error::InitializationFailed(_)) => {}
        other => panic!("expected InitializationFailed, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_device_before_create_fails() {
    setup();
    assert!(Engine::device().is_err());
}

#[test]
#[serial]
fn test_destroy_device_allows_recreate() {
    setup();
    Engine::create_device(MockDevice::new()).unwrap();
    Engine::destroy_device().unwrap();
    assert!(Engine::device().is_err());
    assert!(Engine::create_device(MockDevice::new()).is_ok());
}

// ============================================================================
// RESOURCE REGISTRY SINGLETON
// ============================================================================

#[test]
#[serial]
fn test_create_and_get_resource_registry() {
    setup();
    Engine::create_resource_registry().unwrap();

    let registry = Engine::resource_registry().unwrap();
    assert_eq!(registry.lock().unwrap().texture_count(), 0);
}

#[test]
#[serial]
fn test_duplicate_resource_registry_fails() {
    setup();
    Engine::create_resource_registry().unwrap();
    assert!(Engine::create_resource_registry().is_err());
}

#[test]
#[serial]
fn test_destroy_resource_registry() {
    setup();
    Engine::create_resource_registry().unwrap();
    Engine::destroy_resource_registry().unwrap();
    assert!(Engine::resource_registry().is_err());
}

// ============================================================================
// LOGGING
// ============================================================================

#[test]
#[serial]
fn test_custom_logger_receives_entries() {
    setup();
    let logger = TestLogger::new();
    Engine::set_logger(logger.clone());

    Engine::log(LogSeverity::Info, "meridian::tests", "hello".to_string());
    assert_eq!(logger.entry_count(), 1);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_min_severity_filters_entries() {
    setup();
    let logger = TestLogger::new();
    Engine::set_logger(logger.clone());
    Engine::set_min_severity(LogSeverity::Warn);

    Engine::log(LogSeverity::Debug, "meridian::tests", "dropped".to_string());
    Engine::log(LogSeverity::Warn, "meridian::tests", "kept".to_string());
    Engine::log(LogSeverity::Error, "meridian::tests", "kept".to_string());

    assert_eq!(logger.severities(), vec![LogSeverity::Warn, LogSeverity::Error]);

    Engine::set_min_severity(LogSeverity::Trace);
    Engine::reset_logger();
}

#[test]
#[serial]
fn test_failed_engine_calls_are_logged() {
    setup();
    let logger = TestLogger::new();
    Engine::set_logger(logger.clone());

    // Device not created: the error path must log before returning.
    let _ = Engine::device();
    assert!(logger.entry_count() >= 1);

    Engine::reset_logger();
}
