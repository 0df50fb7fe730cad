//! Word cycle controller.

use std::time::Duration;

use nebula_core::{IntervalTimer, NebulaError, Result, Spring, SpringConfig, Tick};
use tracing::{debug, info};

use crate::measure::Measure;
use crate::presence::{Layer, Presence};

/// Steps through a word list on a fixed period, keeping a measured,
/// spring-animated container width for the displayed word.
#[derive(Debug)]
pub struct TextCycle<M> {
    words: Vec<String>,
    index: usize,
    /// Width of `words[index]` as last measured; `None` means auto sizing.
    measured_width: Option<f32>,
    timer: IntervalTimer,
    width: Spring,
    presence: Presence<String>,
    measurer: M,
}

impl<M: Measure> TextCycle<M> {
    /// Mount a cycle showing the first word.
    pub fn new(
        words: Vec<String>,
        interval: Duration,
        spring: SpringConfig,
        measurer: M,
    ) -> Result<Self> {
        validate_words(&words)?;
        let timer = IntervalTimer::new(interval)?;
        info!(
            words = words.len(),
            interval_ms = interval.as_millis() as u64,
            "text cycle mounted"
        );

        let mut cycle = Self {
            index: 0,
            measured_width: None,
            timer,
            width: Spring::new(0.0, spring),
            presence: Presence::new(words[0].clone()),
            words,
            measurer,
        };
        cycle.remeasure();
        Ok(cycle)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_word(&self) -> &str {
        &self.words[self.index]
    }

    pub fn interval(&self) -> Duration {
        self.timer.interval()
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_active()
    }

    /// Target width for the displayed word, if it has been measured.
    pub fn measured_width(&self) -> Option<f32> {
        self.measured_width
    }

    /// Animated container width; `None` while sizing is automatic.
    pub fn container_width(&self) -> Option<f32> {
        self.measured_width.map(|_| self.width.value())
    }

    /// The word on screen and its pose.
    pub fn layer(&self) -> Layer<'_, String> {
        self.presence.layer()
    }

    pub fn is_transitioning(&self) -> bool {
        self.presence.is_transitioning()
    }

    pub fn measurer_mut(&mut self) -> &mut M {
        &mut self.measurer
    }

    /// Step to the next word.
    pub fn advance(&mut self) {
        self.advance_by(1);
    }

    fn advance_by(&mut self, steps: u32) {
        if steps == 0 {
            return;
        }
        let len = self.words.len();
        self.index = (self.index + steps as usize % len) % len;
        self.presence.show(self.words[self.index].clone());
        self.remeasure();
    }

    /// Retry measurement after the host has laid out a frame.
    pub fn layout_pass(&mut self) {
        if self.measured_width.is_none() {
            self.remeasure();
        }
    }

    fn remeasure(&mut self) {
        let Some(width) = self.measurer.measure(&self.words[self.index]) else {
            debug!(word = %self.words[self.index], "measurement unavailable, keeping auto width");
            return;
        };
        if self.measured_width.is_none() {
            // Coming from auto sizing, which already matches the word.
            self.width.snap_to(width);
        } else {
            self.width.set_target(width);
        }
        self.measured_width = Some(width);
    }

    /// Change the period; the next step is a full new period away.
    pub fn set_interval(&mut self, interval: Duration) -> Result<()> {
        self.timer.restart(interval)?;
        info!(interval_ms = interval.as_millis() as u64, "text cycle timer restarted");
        Ok(())
    }

    /// Replace the word list and restart from its first entry.
    pub fn set_words(&mut self, words: Vec<String>) -> Result<()> {
        validate_words(&words)?;
        let interval = self.timer.interval();
        self.timer.restart(interval)?;
        self.words = words;
        self.index = 0;
        self.presence.show(self.words[0].clone());
        self.remeasure();
        info!(words = self.words.len(), "text cycle words replaced");
        Ok(())
    }
}

fn validate_words(words: &[String]) -> Result<()> {
    if words.is_empty() {
        return Err(NebulaError::invalid(
            "cycle.words",
            "must contain at least one word",
        ));
    }
    Ok(())
}

impl<M: Measure> Tick for TextCycle<M> {
    fn tick(&mut self, dt: Duration) {
        self.presence.advance(dt);
        self.width.step(dt.as_secs_f32());

        let fires = self.timer.poll(dt);
        self.advance_by(fires);
        self.layout_pass();
    }

    fn teardown(&mut self) {
        self.timer.cancel();
        info!("text cycle unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_core::Mounted;
    use std::cell::Cell;
    use std::rc::Rc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    /// Width equals character count.
    fn by_len(word: &str) -> Option<f32> {
        Some(word.chars().count() as f32)
    }

    fn reference() -> TextCycle<fn(&str) -> Option<f32>> {
        TextCycle::new(
            words(&["innovation", "creativity", "excellence", "wonder"]),
            ms(2500),
            SpringConfig::default(),
            by_len as fn(&str) -> Option<f32>,
        )
        .unwrap()
    }

    #[test]
    fn test_mounts_on_first_word() {
        let cycle = reference();
        assert_eq!(cycle.current_index(), 0);
        assert_eq!(cycle.current_word(), "innovation");
        assert_eq!(cycle.measured_width(), Some(10.0));
        assert_eq!(cycle.container_width(), Some(10.0));
        assert!(!cycle.is_transitioning());
    }

    #[test]
    fn test_index_after_whole_periods() {
        for k in 0..13u32 {
            let mut cycle = reference();
            for _ in 0..k {
                cycle.tick(ms(2500));
            }
            assert_eq!(cycle.current_index(), k as usize % 4);
        }
    }

    #[test]
    fn test_index_with_uneven_frames() {
        let mut cycle = reference();
        // 7 periods in frames that never line up with the interval.
        let mut total = Duration::ZERO;
        for dt in [ms(16), ms(17), ms(33), ms(9)].iter().cycle() {
            let dt = (*dt).min(ms(17_500) - total);
            if dt.is_zero() {
                break;
            }
            cycle.tick(dt);
            total += dt;
        }
        assert_eq!(cycle.current_index(), 3);
    }

    #[test]
    fn test_single_frame_spanning_many_periods() {
        let mut cycle = reference();
        cycle.tick(ms(2500 * 6));
        assert_eq!(cycle.current_index(), 2);
        assert_eq!(cycle.measured_width(), Some(10.0));
    }

    #[test]
    fn test_measured_width_tracks_displayed_word() {
        let mut cycle = reference();
        for _ in 0..3 {
            cycle.tick(ms(2500));
        }
        assert_eq!(cycle.current_word(), "wonder");
        assert_eq!(cycle.measured_width(), Some(6.0));
    }

    #[test]
    fn test_width_springs_without_overshoot() {
        let mut cycle = reference();
        cycle.advance();
        cycle.advance();
        cycle.advance();
        assert_eq!(cycle.current_word(), "wonder");
        let start = cycle.container_width().unwrap();
        assert!(start > 6.0);
        let mut last = start;
        for _ in 0..120 {
            cycle.tick(ms(16));
            let w = cycle.container_width().unwrap();
            assert!(w >= 6.0, "undershot to {w}");
            assert!(w <= last, "width bounced back up");
            last = w;
        }
        assert_eq!(cycle.container_width(), Some(6.0));
    }

    #[test]
    fn test_single_word_list() {
        let mut cycle = TextCycle::new(
            words(&["solo"]),
            ms(100),
            SpringConfig::default(),
            by_len as fn(&str) -> Option<f32>,
        )
        .unwrap();
        for _ in 0..50 {
            cycle.tick(ms(100));
            assert_eq!(cycle.current_index(), 0);
        }
        assert_eq!(cycle.measured_width(), Some(4.0));
        assert!(!cycle.is_transitioning());
        assert!(cycle.is_running());
    }

    #[test]
    fn test_invalid_configuration_rejected() {
        let empty = TextCycle::new(
            Vec::new(),
            ms(100),
            SpringConfig::default(),
            by_len as fn(&str) -> Option<f32>,
        );
        assert!(matches!(
            empty,
            Err(NebulaError::InvalidConfig {
                field: "cycle.words",
                ..
            })
        ));

        let zero = TextCycle::new(
            words(&["a"]),
            Duration::ZERO,
            SpringConfig::default(),
            by_len as fn(&str) -> Option<f32>,
        );
        assert!(zero.is_err());
    }

    #[derive(Debug, Clone, Default)]
    struct LateMeasurer {
        ready: Rc<Cell<bool>>,
    }

    impl Measure for LateMeasurer {
        fn measure(&self, word: &str) -> Option<f32> {
            self.ready.get().then(|| word.len() as f32)
        }
    }

    #[test]
    fn test_measurement_unavailable_until_layout() {
        let measurer = LateMeasurer::default();
        let ready = measurer.ready.clone();
        let mut cycle =
            TextCycle::new(words(&["alpha", "be"]), ms(1000), SpringConfig::default(), measurer)
                .unwrap();
        assert_eq!(cycle.measured_width(), None);
        assert_eq!(cycle.container_width(), None);

        // Advancing without layout neither fails nor stalls.
        cycle.tick(ms(1000));
        assert_eq!(cycle.current_index(), 1);
        assert_eq!(cycle.measured_width(), None);

        ready.set(true);
        cycle.layout_pass();
        assert_eq!(cycle.measured_width(), Some(2.0));
        assert_eq!(cycle.container_width(), Some(2.0));
    }

    #[test]
    fn test_measurer_mut_allows_late_layout() {
        let mut cycle = TextCycle::new(
            words(&["alpha"]),
            ms(1000),
            SpringConfig::default(),
            crate::measure::CellMeasurer::new(),
        )
        .unwrap();
        assert_eq!(cycle.measured_width(), None);
        cycle.measurer_mut().mark_laid_out();
        cycle.tick(ms(16));
        assert_eq!(cycle.measured_width(), Some(5.0));
    }

    #[test]
    fn test_set_interval_restarts_cleanly() {
        let mut cycle = reference();
        cycle.tick(ms(2400));
        cycle.set_interval(ms(1000)).unwrap();
        cycle.tick(ms(999));
        assert_eq!(cycle.current_index(), 0);
        cycle.tick(ms(1));
        assert_eq!(cycle.current_index(), 1);
        cycle.tick(ms(1000));
        assert_eq!(cycle.current_index(), 2);
        assert!(cycle.set_interval(Duration::ZERO).is_err());
    }

    #[test]
    fn test_set_words_restarts_from_first_entry() {
        let mut cycle = reference();
        cycle.tick(ms(2500 * 3));
        cycle.tick(ms(2000));
        cycle.set_words(words(&["fast", "bold"])).unwrap();
        assert_eq!(cycle.current_index(), 0);
        assert_eq!(cycle.current_word(), "fast");
        assert_eq!(cycle.measured_width(), Some(4.0));
        cycle.tick(ms(2499));
        assert_eq!(cycle.current_index(), 0);
        cycle.tick(ms(1));
        assert_eq!(cycle.current_index(), 1);
        assert!(cycle.set_words(Vec::new()).is_err());
    }

    #[test]
    fn test_crossfade_runs_once_per_change() {
        let mut cycle = reference();
        cycle.tick(ms(2500));
        assert!(cycle.is_transitioning());
        assert_eq!(cycle.layer().content, "innovation");
        cycle.tick(ms(300));
        assert_eq!(cycle.layer().content, "creativity");
        cycle.tick(ms(400));
        assert!(!cycle.is_transitioning());
        assert!(cycle.layer().pose.is_opaque());
    }

    #[test]
    fn test_no_state_changes_after_teardown() {
        let mut cycle = Mounted::mount(reference());
        cycle.tick(ms(2500));
        cycle.unmount();
        assert!(!cycle.get().is_running());

        let index = cycle.get().current_index();
        let width = cycle.get().container_width();
        for _ in 0..10_000 {
            cycle.tick(ms(2500));
        }
        assert_eq!(cycle.update(|c| c.advance()), None);
        assert_eq!(cycle.get().current_index(), index);
        assert_eq!(cycle.get().container_width(), width);
    }
}
