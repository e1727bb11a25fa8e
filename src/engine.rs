/// Meridian Engine - Singleton manager for engine subsystems
///
/// This module provides global singleton management for the graphics device
/// and the resource registry. It uses thread-safe static storage with
/// RwLock for safe concurrent access.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, OnceLock, RwLock};
use std::time::SystemTime;
use crate::device::GraphicsDevice;
use crate::error::{Error, Result};
use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
use crate::resource::ResourceRegistry;

// ===== INTERNAL STATE =====

/// Global engine state storage
static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Minimum severity rank forwarded to the logger (Trace by default)
static MIN_SEVERITY: AtomicU8 = AtomicU8::new(0);

/// Internal state structure holding all engine singletons
struct EngineState {
    /// Device singleton (wrapped in Mutex for thread-safe mutable access)
    device: RwLock<Option<Arc<Mutex<dyn GraphicsDevice>>>>,
    /// Resource registry singleton
    resources: RwLock<Option<Arc<Mutex<ResourceRegistry>>>>,
}

impl EngineState {
    /// Create a new empty engine state
    fn new() -> Self {
        Self {
            device: RwLock::new(None),
            resources: RwLock::new(None),
        }
    }
}

// ===== PUBLIC API =====

/// Main engine singleton manager
///
/// Manages the lifecycle of the engine subsystems (device, resource
/// registry) using a singleton pattern with thread-safe access.
///
/// # Example
///
/// ```no_run
/// use meridian_graphics::meridian::Engine;
///
/// // Initialize engine
/// Engine::initialize()?;
///
/// // Register a backend device
/// // Engine::create_device(VulkanDevice::new(config)?)?;
///
/// // Access the device globally
/// let device = Engine::device()?;
///
/// // Cleanup
/// Engine::shutdown();
/// # Ok::<(), meridian_graphics::meridian::Error>(())
/// ```
pub struct Engine;

impl Engine {
    /// Helper to log errors before returning them (internal use)
    fn log_and_return_error(error: Error) -> Error {
        match &error {
            Error::InitializationFailed(msg) => {
                crate::engine_error!("meridian::Engine", "Initialization failed: {}", msg);
            }
            Error::BackendError(msg) => {
                crate::engine_error!("meridian::Engine", "Backend error: {}", msg);
            }
            _ => {
                crate::engine_error!("meridian::Engine", "Engine error: {}", error);
            }
        }
        error
    }

    /// Initialize the engine
    ///
    /// This must be called once at application startup before creating any
    /// subsystems. Idempotent.
    ///
    /// # Errors
    ///
    /// Currently always succeeds, but returns Result for future extensibility.
    pub fn initialize() -> Result<()> {
        ENGINE_STATE.get_or_init(EngineState::new);
        Ok(())
    }

    /// Shutdown the entire engine and destroy all singletons
    ///
    /// Call at application shutdown to properly cleanup all subsystems.
    pub fn shutdown() {
        if let Some(state) = ENGINE_STATE.get() {
            // Clear resources BEFORE the device (records reference GPU objects)
            if let Ok(mut resources) = state.resources.write() {
                *resources = None;
            }
            if let Ok(mut device) = state.device.write() {
                *device = None;
            }
        }
    }

    // ===== DEVICE API =====

    /// Create and register the device singleton
    ///
    /// Wraps the device in Arc and registers it as a global singleton.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - A device already exists
    pub fn create_device<D: GraphicsDevice + 'static>(device: D) -> Result<()> {
        let arc_device: Arc<Mutex<dyn GraphicsDevice>> = Arc::new(Mutex::new(device));
        Self::register_device(arc_device)?;
        crate::engine_info!("meridian::Engine", "Device singleton created");
        Ok(())
    }

    /// Register a device singleton (internal use)
    pub(crate) fn register_device(device: Arc<Mutex<dyn GraphicsDevice>>) -> Result<()> {
        let state = ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
            ))?;

        let mut lock = state.device.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Device lock poisoned".to_string())
            ))?;

        if lock.is_some() {
            return Err(Self::log_and_return_error(
                Error::InitializationFailed("Device already exists. Call Engine::destroy_device() first.".to_string())
            ));
        }

        *lock = Some(device);
        Ok(())
    }

    /// Get the device singleton
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - The device has not been created
    pub fn device() -> Result<Arc<Mutex<dyn GraphicsDevice>>> {
        let state = ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
            ))?;

        let lock = state.device.read()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Device lock poisoned".to_string())
            ))?;

        lock.clone()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Device not created. Call Engine::create_device() first.".to_string())
            ))
    }

    /// Destroy the device singleton
    ///
    /// Existing device references remain valid until dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not initialized
    pub fn destroy_device() -> Result<()> {
        let state = ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized".to_string())
            ))?;

        let mut lock = state.device.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Device lock poisoned".to_string())
            ))?;

        *lock = None;
        crate::engine_info!("meridian::Engine", "Device singleton destroyed");
        Ok(())
    }

    // ===== RESOURCE REGISTRY API =====

    /// Create and register the resource registry singleton
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - A resource registry already exists
    pub fn create_resource_registry() -> Result<()> {
        let state = ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
            ))?;

        let mut lock = state.resources.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("ResourceRegistry lock poisoned".to_string())
            ))?;

        if lock.is_some() {
            return Err(Self::log_and_return_error(
                Error::InitializationFailed("ResourceRegistry already exists. Call Engine::destroy_resource_registry() first.".to_string())
            ));
        }

        *lock = Some(Arc::new(Mutex::new(ResourceRegistry::new())));
        crate::engine_info!("meridian::Engine", "ResourceRegistry singleton created");
        Ok(())
    }

    /// Get the resource registry singleton
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - The resource registry has not been created
    pub fn resource_registry() -> Result<Arc<Mutex<ResourceRegistry>>> {
        let state = ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
            ))?;

        let lock = state.resources.read()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("ResourceRegistry lock poisoned".to_string())
            ))?;

        lock.clone()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("ResourceRegistry not created. Call Engine::create_resource_registry() first.".to_string())
            ))
    }

    /// Destroy the resource registry singleton
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not initialized
    pub fn destroy_resource_registry() -> Result<()> {
        let state = ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized".to_string())
            ))?;

        let mut lock = state.resources.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("ResourceRegistry lock poisoned".to_string())
            ))?;

        *lock = None;
        crate::engine_info!("meridian::Engine", "ResourceRegistry singleton destroyed");
        Ok(())
    }

    /// Reset all singletons for testing (only available in test builds)
    #[cfg(test)]
    pub fn reset_for_testing() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut resources) = state.resources.write() {
                *resources = None;
            }
            if let Ok(mut device) = state.device.write() {
                *device = None;
            }
        }
        MIN_SEVERITY.store(0, Ordering::Relaxed);
    }

    // ===== LOGGING API =====

    /// Set a custom logger
    ///
    /// Replace the default logger with a custom implementation (file logger,
    /// test capture logger, etc.)
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Drop log entries below the given severity
    pub fn set_min_severity(severity: LogSeverity) {
        MIN_SEVERITY.store(severity.rank(), Ordering::Relaxed);
    }

    /// Current minimum severity
    pub fn min_severity() -> LogSeverity {
        LogSeverity::from_rank(MIN_SEVERITY.load(Ordering::Relaxed))
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if severity.rank() < MIN_SEVERITY.load(Ordering::Relaxed) {
            return;
        }
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(lock) = logger_lock.read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by engine_error! macro to include source location.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if severity.rank() < MIN_SEVERITY.load(Ordering::Relaxed) {
            return;
        }
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(lock) = logger_lock.read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
