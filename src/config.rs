use crate::core_spec::CoreSpec;
use std::time::Duration;

/// User-facing options with sensible defaults and builder chaining.
///
/// The defaults match interactive use: all logical CPUs, a five-second /
/// fifty-percent progress throttle, and output tagged `BusyBee`.
#[derive(Clone, Debug)]
pub struct MapOptions {
    pub workers: CoreSpec,                  // worker count spec, resolved per run
    pub tag: String,                        // prefix for every status line
    pub quiet: bool,                        // if true, nothing is written to the sink
    pub update_every_time: Option<Duration>, // time trigger; None disables
    pub update_every_percent: Option<f64>,   // percent trigger; None disables
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            workers: CoreSpec::default(),
            tag: "BusyBee".to_string(),
            quiet: false,
            update_every_time: Some(Duration::from_secs(5)),
            update_every_percent: Some(50.0),
        }
    }
}

impl MapOptions {
    pub fn with_workers(mut self, spec: impl Into<CoreSpec>) -> Self {
        self.workers = spec.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_quiet(mut self, yes: bool) -> Self {
        self.quiet = yes;
        self
    }

    /// Emit a progress update at most every `seconds`. Pass `None` to
    /// disable the time trigger.
    pub fn with_update_every_seconds(mut self, seconds: impl Into<Option<f64>>) -> Self {
        self.update_every_time = seconds.into().map(Duration::from_secs_f64);
        self
    }

    /// Emit a progress update at most every `percent` of completion. Pass
    /// `None` to disable the percent trigger.
    pub fn with_update_every_percent(mut self, percent: impl Into<Option<f64>>) -> Self {
        self.update_every_percent = percent.into();
        self
    }
}
