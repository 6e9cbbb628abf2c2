//! Sustain and cooldown gate for detection samples
//!
//! Samples are kept in a sliding time window. An event fires when a single
//! emotion, counting only high-confidence samples, makes up a large enough
//! share of every sample in the window. After an event the gate stays
//! muted for a cooldown period.

use heapless::Deque;
use tactus_protocol::Emotion;

use crate::count::VibrationCount;

/// Maximum samples held in the window
pub const MAX_SAMPLES: usize = 32;

/// Gate thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GateConfig {
    /// Length of the sliding window (ms)
    pub window_ms: u32,
    /// Share of window samples the dominant emotion must reach (%)
    pub sustain_percent: u8,
    /// Minimum confidence for a sample to count towards an emotion (%)
    pub strong_confidence_percent: u8,
    /// Mute period after an event (ms)
    pub cooldown_ms: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            window_ms: 1500,
            sustain_percent: 80,
            strong_confidence_percent: 80,
            cooldown_ms: 5000,
        }
    }
}

/// One detector result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Capture time (ms, monotonic)
    pub at_ms: u32,
    /// Dominant emotion, or None if no face was found
    pub emotion: Option<Emotion>,
    /// Detector confidence (%)
    pub confidence_percent: u8,
}

/// A vibration event produced by the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalEvent {
    /// Sustained emotion
    pub emotion: Emotion,
    /// Vibrations to play for it
    pub count: VibrationCount,
}

/// Sliding-window sustain filter with cooldown
#[derive(Debug, Clone)]
pub struct SignalGate {
    config: GateConfig,
    samples: Deque<Sample, MAX_SAMPLES>,
    mute_until_ms: u32,
}

impl Default for SignalGate {
    fn default() -> Self {
        Self::new(GateConfig::default())
    }
}

impl SignalGate {
    /// Create a gate
    pub fn new(config: GateConfig) -> Self {
        Self {
            config,
            samples: Deque::new(),
            mute_until_ms: 0,
        }
    }

    /// Number of samples currently in the window
    pub fn window_len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if events are muted at `now_ms`
    pub fn is_muted(&self, now_ms: u32) -> bool {
        now_ms < self.mute_until_ms
    }

    /// Record a sample and check whether an event fires
    ///
    /// Samples must be fed in timestamp order.
    pub fn observe(&mut self, sample: Sample) -> Option<SignalEvent> {
        let now_ms = sample.at_ms;

        if self.samples.is_full() {
            self.samples.pop_front();
        }
        // Capacity was freed above
        let _ = self.samples.push_back(sample);

        let window_start = now_ms.saturating_sub(self.config.window_ms);
        while let Some(oldest) = self.samples.front() {
            if oldest.at_ms >= window_start {
                break;
            }
            self.samples.pop_front();
        }

        if self.is_muted(now_ms) || self.samples.is_empty() {
            return None;
        }

        let (emotion, strong) = self.dominant()?;
        let total = self.samples.len() as u32;
        if strong * 100 < total * u32::from(self.config.sustain_percent) {
            return None;
        }

        let count = VibrationCount::new(emotion.vibration_count())?;
        self.mute_until_ms = now_ms.saturating_add(self.config.cooldown_ms);
        Some(SignalEvent { emotion, count })
    }

    /// Emotion with the most strong samples; ties go to the earliest seen
    fn dominant(&self) -> Option<(Emotion, u32)> {
        let mut counts = [0u32; Emotion::ALL.len()];
        for emotion in self.strong_emotions() {
            counts[emotion.vibration_count() as usize] += 1;
        }

        let mut best: Option<(Emotion, u32)> = None;
        for emotion in self.strong_emotions() {
            let count = counts[emotion.vibration_count() as usize];
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((emotion, count));
            }
        }
        best
    }

    fn strong_emotions(&self) -> impl Iterator<Item = Emotion> + '_ {
        let threshold = self.config.strong_confidence_percent;
        self.samples
            .iter()
            .filter(move |s| s.confidence_percent >= threshold)
            .filter_map(|s| s.emotion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(at_ms: u32, emotion: Option<Emotion>, confidence_percent: u8) -> Sample {
        Sample {
            at_ms,
            emotion,
            confidence_percent,
        }
    }

    #[test]
    fn test_sustained_emotion_fires() {
        let mut gate = SignalGate::default();
        let event = gate.observe(sample(0, Some(Emotion::Sad), 95)).unwrap();
        assert_eq!(event.emotion, Emotion::Sad);
        assert_eq!(event.count.get(), 3);
    }

    #[test]
    fn test_weak_samples_do_not_fire() {
        let mut gate = SignalGate::default();
        assert_eq!(gate.observe(sample(0, Some(Emotion::Sad), 50)), None);
        assert_eq!(gate.observe(sample(500, Some(Emotion::Sad), 79)), None);
    }

    #[test]
    fn test_mixed_window_does_not_fire() {
        let mut gate = SignalGate::default();
        // Warm up with a weak sample so the first strong one is not 100%
        assert_eq!(gate.observe(sample(0, None, 0)), None);
        assert_eq!(gate.observe(sample(500, Some(Emotion::Happy), 90)), None);
        assert_eq!(gate.observe(sample(1000, Some(Emotion::Angry), 90)), None);
    }

    #[test]
    fn test_old_samples_leave_window() {
        let mut gate = SignalGate::default();
        assert_eq!(gate.observe(sample(0, None, 0)), None);
        assert_eq!(gate.observe(sample(500, Some(Emotion::Fear), 90)), None);
        assert_eq!(gate.window_len(), 2);

        // At 2000 ms the 0 ms sample is outside the 1500 ms window
        let event = gate.observe(sample(2000, Some(Emotion::Fear), 90)).unwrap();
        assert_eq!(event.emotion, Emotion::Fear);
        assert_eq!(gate.window_len(), 2);
    }

    #[test]
    fn test_cooldown_mutes_events() {
        let mut gate = SignalGate::default();
        assert!(gate.observe(sample(0, Some(Emotion::Happy), 90)).is_some());
        assert!(gate.is_muted(100));
        assert_eq!(gate.observe(sample(500, Some(Emotion::Happy), 90)), None);
        assert_eq!(gate.observe(sample(4999, Some(Emotion::Happy), 90)), None);
        assert!(gate.observe(sample(5000, Some(Emotion::Happy), 90)).is_some());
    }

    #[test]
    fn test_neutral_never_fires() {
        let mut gate = SignalGate::default();
        assert_eq!(gate.observe(sample(0, Some(Emotion::Neutral), 99)), None);
        assert!(!gate.is_muted(0));
    }

    #[test]
    fn test_window_capacity_is_bounded() {
        let mut gate = SignalGate::new(GateConfig {
            window_ms: u32::MAX,
            ..GateConfig::default()
        });
        for i in 0..(MAX_SAMPLES as u32 * 2) {
            gate.observe(sample(i, None, 0));
        }
        assert_eq!(gate.window_len(), MAX_SAMPLES);
    }
}
