// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::observability::{ProgressSink, TelemetrySink};

/// Observer bundle threaded through a solve.
///
/// A solve runs single-threaded to completion with no suspension points, so
/// unlike a long-running detector context this carries no cancellation token
/// and no time budget; the sinks are the only hooks.
#[derive(Clone, Copy, Default)]
pub struct SolveContext<'a> {
    pub progress: Option<&'a dyn ProgressSink>,
    pub telemetry: Option<&'a dyn TelemetrySink>,
}

impl<'a> SolveContext<'a> {
    /// Creates a context with no observers attached.
    pub fn new() -> Self {
        Self {
            progress: None,
            telemetry: None,
        }
    }

    /// Sets an optional progress sink.
    pub fn with_progress_sink(mut self, progress: &'a dyn ProgressSink) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Sets an optional telemetry sink.
    pub fn with_telemetry_sink(mut self, telemetry: &'a dyn TelemetrySink) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Emits clamped progress to the sink, if configured.
    pub fn report_progress(&self, fraction: f32) {
        if !fraction.is_finite() {
            return;
        }

        if let Some(sink) = self.progress {
            sink.on_progress(fraction.clamp(0.0, 1.0));
        }
    }

    /// Emits a scalar telemetry value to the sink, if configured.
    pub fn record_scalar(&self, key: &'static str, value: f64) {
        if let Some(sink) = self.telemetry {
            sink.record_scalar(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SolveContext;
    use crate::observability::{ProgressSink, TelemetrySink};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockProgressSink {
        values: Mutex<Vec<f32>>,
    }

    impl ProgressSink for MockProgressSink {
        fn on_progress(&self, fraction: f32) {
            self.values
                .lock()
                .expect("progress mutex should lock")
                .push(fraction);
        }
    }

    #[derive(Default)]
    struct MockTelemetrySink {
        values: Mutex<Vec<(&'static str, f64)>>,
    }

    impl TelemetrySink for MockTelemetrySink {
        fn record_scalar(&self, key: &'static str, value: f64) {
            self.values
                .lock()
                .expect("telemetry mutex should lock")
                .push((key, value));
        }
    }

    #[test]
    fn new_context_has_no_observers() {
        let ctx = SolveContext::new();
        assert!(ctx.progress.is_none());
        assert!(ctx.telemetry.is_none());
    }

    #[test]
    fn builder_methods_attach_sinks() {
        let progress = MockProgressSink::default();
        let telemetry = MockTelemetrySink::default();
        let ctx = SolveContext::new()
            .with_progress_sink(&progress)
            .with_telemetry_sink(&telemetry);
        assert!(ctx.progress.is_some());
        assert!(ctx.telemetry.is_some());
    }

    #[test]
    fn report_progress_is_noop_without_sink() {
        let ctx = SolveContext::new();
        ctx.report_progress(0.5);
        ctx.report_progress(f32::NAN);
    }

    #[test]
    fn report_progress_clamps_and_ignores_non_finite_values() {
        let progress = MockProgressSink::default();
        let ctx = SolveContext::new().with_progress_sink(&progress);

        ctx.report_progress(-0.2);
        ctx.report_progress(0.25);
        ctx.report_progress(1.2);
        ctx.report_progress(f32::NAN);
        ctx.report_progress(f32::INFINITY);

        let got = progress
            .values
            .lock()
            .expect("progress values should lock")
            .clone();
        assert_eq!(got, vec![0.0, 0.25, 1.0]);
    }

    #[test]
    fn record_scalar_writes_to_telemetry_sink_when_present() {
        let telemetry = MockTelemetrySink::default();
        let ctx = SolveContext::new().with_telemetry_sink(&telemetry);

        ctx.record_scalar("path.steps", 12.0);
        ctx.record_scalar("hull.arms_kept", 4.0);

        let got = telemetry
            .values
            .lock()
            .expect("telemetry values should lock")
            .clone();
        assert_eq!(got, vec![("path.steps", 12.0), ("hull.arms_kept", 4.0)]);
    }
}
