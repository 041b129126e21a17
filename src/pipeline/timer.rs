//! Per-phase wall-clock timing.

use indexmap::IndexMap;
use std::time::{Duration, Instant};

/// Accumulates elapsed time per named pipeline phase, in first-seen order.
#[derive(Debug, Default)]
pub struct PhaseTimer {
    phases: IndexMap<String, Duration>,
}

impl PhaseTimer {
    /// Fresh timer with no recorded phases.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f`, attributing its wall-clock time to `name`.
    pub fn time<T>(&mut self, name: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = f();
        self.add(name, start.elapsed());
        result
    }

    /// Add elapsed time to `name`, accumulating across calls.
    pub fn add(&mut self, name: &str, elapsed: Duration) {
        *self.phases.entry(name.to_string()).or_default() += elapsed;
    }

    /// Elapsed milliseconds per phase, in recording order.
    pub fn elapsed_ms(&self) -> IndexMap<String, u64> {
        self.phases
            .iter()
            .map(|(name, d)| (name.clone(), d.as_millis() as u64))
            .collect()
    }

    /// Log the timing report, one aligned line per phase.
    pub fn report(&self) {
        const PAD: usize = 32;
        for (name, d) in &self.phases {
            tracing::info!("{:<PAD$}: {:.2}s", name, d.as_secs_f64());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_records_phase() {
        let mut timer = PhaseTimer::new();
        let value = timer.time("embed", || 41 + 1);
        assert_eq!(value, 42);
        assert!(timer.elapsed_ms().contains_key("embed"));
    }

    #[test]
    fn test_add_accumulates() {
        let mut timer = PhaseTimer::new();
        timer.add("band", Duration::from_millis(30));
        timer.add("band", Duration::from_millis(70));
        assert_eq!(timer.elapsed_ms()["band"], 100);
    }

    #[test]
    fn test_order_follows_first_recording() {
        let mut timer = PhaseTimer::new();
        timer.add("load", Duration::ZERO);
        timer.add("embed", Duration::ZERO);
        timer.add("load", Duration::ZERO);
        let keys: Vec<String> = timer.elapsed_ms().keys().cloned().collect();
        assert_eq!(keys, vec!["load", "embed"]);
    }
}
