//! Opt-in tracing setup for dashboards embedding `archery-trends`.
//!
//! The crate only emits `tracing` events. Hosts that already own a subscriber
//! need nothing from here.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_TRACING_FILTER: &str = "info,archery_trends=info";

/// Installs a compact subscriber filtered by `RUST_LOG`, or by
/// [`DEFAULT_TRACING_FILTER`] when the variable is unset.
///
/// Returns `false` without the `telemetry` feature or when a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_TRACING_FILTER)
}

/// Same as [`init_default_tracing`] with caller-supplied fallback directives,
/// e.g. `"archery_trends=trace"` to follow every alignment step.
#[must_use]
pub fn init_tracing_with_filter(fallback_directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback_directives))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directives;
        false
    }
}
