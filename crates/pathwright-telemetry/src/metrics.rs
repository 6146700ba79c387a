//! Dispatch metrics for Pathwright.
//!
//! Counters are emitted through the `metrics` facade; nothing is recorded
//! until the host installs a recorder (a Prometheus exporter, for instance).
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `pathwright_dispatch_total` | Counter | `outcome` | Dispatched requests |
//! | `pathwright_callback_failures_total` | Counter | - | Callbacks that returned an error |
//! | `pathwright_hook_rejections_total` | Counter | `hook` | Requests rejected by a hook |

use metrics::{counter, describe_counter};

/// Counter of dispatched requests, labelled by outcome.
pub const DISPATCH_TOTAL: &str = "pathwright_dispatch_total";

/// Counter of callbacks that returned an error.
pub const CALLBACK_FAILURES_TOTAL: &str = "pathwright_callback_failures_total";

/// Counter of hook rejections, labelled by hook name.
pub const HOOK_REJECTIONS_TOTAL: &str = "pathwright_hook_rejections_total";

/// How a dispatch ended, as reported in the `outcome` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchOutcome {
    /// Every hook passed and the callbacks ran.
    Completed,
    /// Resolution failed and an error handler was invoked.
    Unmatched,
    /// A hook rejected the request.
    HookRejected,
    /// No error handler was registered for the emitted code.
    Unhandled,
}

impl DispatchOutcome {
    /// Label value for this outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Unmatched => "unmatched",
            Self::HookRejected => "hook_rejected",
            Self::Unhandled => "unhandled",
        }
    }
}

impl std::fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registers descriptions for the dispatch counters with the installed
/// recorder.
pub fn describe_metrics() {
    describe_counter!(DISPATCH_TOTAL, "Total number of dispatched requests by outcome");
    describe_counter!(
        CALLBACK_FAILURES_TOTAL,
        "Total number of route callbacks that returned an error"
    );
    describe_counter!(
        HOOK_REJECTIONS_TOTAL,
        "Total number of requests rejected by a route hook"
    );
}

/// Records one finished dispatch.
pub fn record_dispatch(outcome: DispatchOutcome) {
    counter!(DISPATCH_TOTAL, "outcome" => outcome.as_str()).increment(1);
}

/// Records a callback failure.
pub fn record_callback_failure() {
    counter!(CALLBACK_FAILURES_TOTAL).increment(1);
}

/// Records a hook rejection.
pub fn record_hook_rejection(hook: &str) {
    counter!(HOOK_REJECTIONS_TOTAL, "hook" => hook.to_string()).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics::{
        Counter, CounterFn, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString,
        Unit,
    };
    use std::sync::{Arc, Mutex};

    /// Recorder that keeps one total per rendered key.
    #[derive(Default)]
    struct CapturingRecorder {
        totals: Arc<Mutex<Vec<(String, u64)>>>,
    }

    struct CapturedCounter {
        key: String,
        totals: Arc<Mutex<Vec<(String, u64)>>>,
    }

    impl CounterFn for CapturedCounter {
        fn increment(&self, value: u64) {
            let mut totals = self.totals.lock().unwrap();
            match totals.iter_mut().find(|(k, _)| *k == self.key) {
                Some((_, total)) => *total += value,
                None => totals.push((self.key.clone(), value)),
            }
        }

        fn absolute(&self, _value: u64) {}
    }

    fn render(key: &Key) -> String {
        let labels: Vec<String> = key
            .labels()
            .map(|l| format!("{}={}", l.key(), l.value()))
            .collect();
        format!("{}{{{}}}", key.name(), labels.join(","))
    }

    impl Recorder for CapturingRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            Counter::from_arc(Arc::new(CapturedCounter {
                key: render(key),
                totals: Arc::clone(&self.totals),
            }))
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }

    fn total(recorder: &CapturingRecorder, key: &str) -> u64 {
        recorder
            .totals
            .lock()
            .unwrap()
            .iter()
            .find(|(k, _)| k == key)
            .map_or(0, |(_, v)| *v)
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(DispatchOutcome::Completed.as_str(), "completed");
        assert_eq!(DispatchOutcome::HookRejected.to_string(), "hook_rejected");
    }

    #[test]
    fn test_record_functions_without_recorder() {
        describe_metrics();
        record_dispatch(DispatchOutcome::Completed);
        record_callback_failure();
        record_hook_rejection("auth");
    }

    #[test]
    fn test_counters_reach_recorder() {
        let recorder = CapturingRecorder::default();

        metrics::with_local_recorder(&recorder, || {
            describe_metrics();
            record_dispatch(DispatchOutcome::Completed);
            record_dispatch(DispatchOutcome::Completed);
            record_dispatch(DispatchOutcome::Unmatched);
            record_callback_failure();
            record_hook_rejection("auth");
        });

        assert_eq!(total(&recorder, "pathwright_dispatch_total{outcome=completed}"), 2);
        assert_eq!(total(&recorder, "pathwright_dispatch_total{outcome=unmatched}"), 1);
        assert_eq!(total(&recorder, "pathwright_callback_failures_total{}"), 1);
        assert_eq!(total(&recorder, "pathwright_hook_rejections_total{hook=auth}"), 1);
    }
}
