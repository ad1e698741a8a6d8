//! # Sentiment Feature
//!
//! Closed classification of the backend's sentiment labels with a total
//! mapping to display attributes.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

/// Sentiment category attached to a check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    /// No label, or a label this client does not recognise
    Absent,
}

/// Display tone, mapped to a terminal colour by the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Bad,
    Caution,
    Muted,
}

impl Sentiment {
    pub const ALL: [Sentiment; 4] = [
        Sentiment::Positive,
        Sentiment::Negative,
        Sentiment::Neutral,
        Sentiment::Absent,
    ];

    /// Classify a raw backend label (case-insensitive)
    pub fn classify(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
            Some("positive") => Sentiment::Positive,
            Some("negative") => Sentiment::Negative,
            Some("neutral") => Sentiment::Neutral,
            _ => Sentiment::Absent,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Absent => "none",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Sentiment::Positive => Tone::Good,
            Sentiment::Negative => Tone::Bad,
            Sentiment::Neutral => Tone::Caution,
            Sentiment::Absent => Tone::Muted,
        }
    }

    /// Badge text for a check-in, e.g. "positive (0.82)"; None when absent
    pub fn badge(&self, score: Option<f64>) -> Option<String> {
        if *self == Sentiment::Absent {
            return None;
        }
        Some(match score {
            Some(s) => format!("{} ({:.2})", self.label(), s),
            None => self.label().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_labels() {
        assert_eq!(Sentiment::classify(Some("positive")), Sentiment::Positive);
        assert_eq!(Sentiment::classify(Some("Negative")), Sentiment::Negative);
        assert_eq!(Sentiment::classify(Some(" neutral ")), Sentiment::Neutral);
    }

    #[test]
    fn test_classify_absent_and_unknown() {
        assert_eq!(Sentiment::classify(None), Sentiment::Absent);
        assert_eq!(Sentiment::classify(Some("")), Sentiment::Absent);
        assert_eq!(Sentiment::classify(Some("ecstatic")), Sentiment::Absent);
    }

    #[test]
    fn test_every_category_has_distinct_tone() {
        let tones: Vec<Tone> = Sentiment::ALL.iter().map(|s| s.tone()).collect();
        for (i, a) in tones.iter().enumerate() {
            for b in &tones[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_badge() {
        assert_eq!(Sentiment::Positive.badge(Some(0.8234)), Some("positive (0.82)".to_string()));
        assert_eq!(Sentiment::Neutral.badge(None), Some("neutral".to_string()));
        assert_eq!(Sentiment::Absent.badge(Some(0.1)), None);
    }
}
