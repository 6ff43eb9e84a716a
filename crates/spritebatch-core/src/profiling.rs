//! CPU profiling hooks on top of `puffin`.
//!
//! Batch building and uploads are instrumented with `profile_function!`. The
//! scopes stay disabled, and almost free, until [`init_profiling`] runs.

#[cfg(feature = "http")]
use std::sync::OnceLock;

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

/// Address the HTTP backend listens on by default.
#[cfg(feature = "http")]
pub const DEFAULT_PUFFIN_ADDR: &str = "0.0.0.0:8585";

/// Where recorded scopes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingBackend {
    /// Keep frames in the global profiler and read them back through [`GlobalProfiler`].
    InProcess,
    /// Serve frames to `puffin_viewer` from the given address.
    #[cfg(feature = "http")]
    PuffinHttp(&'static str),
}

#[cfg(feature = "http")]
static SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

/// Turn scope recording on and start the selected backend.
///
/// # Example
/// ```no_run
/// use spritebatch_core::profiling::{init_profiling, ProfilingBackend, DEFAULT_PUFFIN_ADDR};
///
/// init_profiling(ProfilingBackend::PuffinHttp(DEFAULT_PUFFIN_ADDR));
/// ```
pub fn init_profiling(backend: ProfilingBackend) {
    puffin::set_scopes_on(true);

    match backend {
        ProfilingBackend::InProcess => {
            tracing::debug!("Puffin scopes enabled (in-process)");
        }
        #[cfg(feature = "http")]
        ProfilingBackend::PuffinHttp(addr) => {
            if SERVER.get().is_some() {
                tracing::warn!("Puffin server already running, not binding {}", addr);
                return;
            }
            match puffin_http::Server::new(addr) {
                Ok(server) => {
                    tracing::info!("Puffin profiler server started on http://{}", addr);
                    let _ = SERVER.set(server);
                }
                Err(e) => {
                    tracing::error!("Failed to start puffin server on {}: {}", addr, e);
                }
            }
        }
    }
}

/// Whether scopes are currently being recorded.
pub fn profiling_enabled() -> bool {
    puffin::are_scopes_on()
}

/// Close the current profiler frame.
///
/// Call once per batch-building pass so scopes are grouped by pass.
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}
