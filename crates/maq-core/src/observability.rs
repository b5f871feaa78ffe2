// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

/// Receiver for coarse progress fractions in `[0.0, 1.0]`.
pub trait ProgressSink {
    fn on_progress(&self, fraction: f32);
}

/// Receiver for scalar telemetry values (phase timings, size counters).
pub trait TelemetrySink {
    fn record_scalar(&self, key: &'static str, value: f64);
}

/// Telemetry sink that writes `key=value` lines to stderr.
///
/// Installed by the convenience entry point when `MAQ_PROFILE=1` is set;
/// callers wanting anything richer supply their own sink instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrTelemetry;

impl TelemetrySink for StderrTelemetry {
    fn record_scalar(&self, key: &'static str, value: f64) {
        eprintln!("{key}={value}");
    }
}
