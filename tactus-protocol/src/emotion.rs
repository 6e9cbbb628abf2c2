//! Emotions reported by the host detection pipeline
//!
//! Each emotion maps to a fixed vibration count. A count of 0 means the
//! emotion is not signalled at all.

/// Emotion classes produced by the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Emotion {
    Happy,
    Angry,
    Sad,
    Surprise,
    Fear,
    Disgust,
    Neutral,
}

impl Emotion {
    /// All emotions, in vibration count order
    pub const ALL: [Emotion; 7] = [
        Emotion::Neutral,
        Emotion::Happy,
        Emotion::Angry,
        Emotion::Sad,
        Emotion::Surprise,
        Emotion::Fear,
        Emotion::Disgust,
    ];

    /// Parse an emotion from the detector's lowercase label
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "happy" => Some(Emotion::Happy),
            "angry" => Some(Emotion::Angry),
            "sad" => Some(Emotion::Sad),
            "surprise" => Some(Emotion::Surprise),
            "fear" => Some(Emotion::Fear),
            "disgust" => Some(Emotion::Disgust),
            "neutral" => Some(Emotion::Neutral),
            _ => None,
        }
    }

    /// Detector label for this emotion
    pub fn label(self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Angry => "angry",
            Emotion::Sad => "sad",
            Emotion::Surprise => "surprise",
            Emotion::Fear => "fear",
            Emotion::Disgust => "disgust",
            Emotion::Neutral => "neutral",
        }
    }

    /// Number of vibrations used to signal this emotion (0 = none)
    pub fn vibration_count(self) -> u8 {
        match self {
            Emotion::Happy => 1,
            Emotion::Angry => 2,
            Emotion::Sad => 3,
            Emotion::Surprise => 4,
            Emotion::Fear => 5,
            Emotion::Disgust => 6,
            Emotion::Neutral => 0,
        }
    }

    /// Returns true if this emotion triggers the actuator
    pub fn is_signalled(self) -> bool {
        self.vibration_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_roundtrip() {
        for emotion in Emotion::ALL {
            assert_eq!(Emotion::from_label(emotion.label()), Some(emotion));
        }
    }

    #[test]
    fn test_counts_are_distinct() {
        for (i, emotion) in Emotion::ALL.iter().enumerate() {
            assert_eq!(emotion.vibration_count() as usize, i);
        }
    }

    #[test]
    fn test_neutral_not_signalled() {
        assert!(!Emotion::Neutral.is_signalled());
        assert!(Emotion::Fear.is_signalled());
    }

    #[test]
    fn test_unknown_label() {
        assert_eq!(Emotion::from_label("Happy"), None);
        assert_eq!(Emotion::from_label("contempt"), None);
    }
}
