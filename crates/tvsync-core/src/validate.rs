//! Heuristic check that a fetched body is a real playlist and not a block page.
//!
//! Firewalls in front of the source tend to answer with a short HTML page
//! (sometimes with a 200 status) instead of the playlist. The check is three
//! ordered steps: minimum length, interception markers, playlist features.

/// Bodies with fewer characters than this are treated as truncated.
pub const MIN_CONTENT_CHARS: usize = 500;

/// Substrings found on interception/block pages. Any hit rejects the body.
pub const INTERCEPTION_MARKERS: [&str; 6] = [
    "WAF",
    "安全防护",
    "机房IP",
    "黑名单",
    "访问被拒绝",
    "DOCTYPE html",
];

/// Substrings characteristic of live-TV playlists. At least one must be present.
pub const FEATURE_MARKERS: [&str; 6] = [
    "#genre#",
    "http://",
    "https://",
    "rtp://",
    "#EXTM3U",
    "CCTV",
];

/// Why a body was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("content too short ({chars} chars), likely truncated")]
    TooShort { chars: usize },
    #[error("interception marker detected: {marker}")]
    Intercepted { marker: String },
    #[error("no live-source features detected")]
    NoFeatures,
}

/// Outcome of a validation: valid, or the reason it is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationVerdict {
    rejection: Option<Rejection>,
    features: usize,
}

impl ValidationVerdict {
    pub fn is_valid(&self) -> bool {
        self.rejection.is_none()
    }

    /// Human-readable reason, suitable for logs.
    pub fn reason(&self) -> String {
        match &self.rejection {
            None => format!("validation passed ({} feature marker(s))", self.features),
            Some(r) => r.to_string(),
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        self.rejection.as_ref()
    }

    /// Number of distinct feature markers present (0 unless the feature step ran).
    pub fn feature_count(&self) -> usize {
        self.features
    }

    pub fn into_result(self) -> Result<usize, Rejection> {
        match self.rejection {
            None => Ok(self.features),
            Some(r) => Err(r),
        }
    }
}

/// Marker lists and length threshold. `Default` gives the built-in lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentValidator {
    pub min_chars: usize,
    pub interception_markers: Vec<String>,
    pub feature_markers: Vec<String>,
}

impl Default for ContentValidator {
    fn default() -> Self {
        Self {
            min_chars: MIN_CONTENT_CHARS,
            interception_markers: INTERCEPTION_MARKERS.iter().map(|s| s.to_string()).collect(),
            feature_markers: FEATURE_MARKERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ContentValidator {
    /// Pure; the first interception marker in list order is the one reported.
    pub fn validate(&self, content: &str) -> ValidationVerdict {
        let chars = content.chars().take(self.min_chars).count();
        if chars < self.min_chars {
            return reject(Rejection::TooShort { chars });
        }

        if let Some(marker) = self
            .interception_markers
            .iter()
            .find(|m| content.contains(m.as_str()))
        {
            return reject(Rejection::Intercepted {
                marker: marker.clone(),
            });
        }

        // Presence, not frequency.
        let features = self
            .feature_markers
            .iter()
            .filter(|m| content.contains(m.as_str()))
            .count();
        if features == 0 {
            return reject(Rejection::NoFeatures);
        }

        ValidationVerdict {
            rejection: None,
            features,
        }
    }
}

fn reject(rejection: Rejection) -> ValidationVerdict {
    ValidationVerdict {
        rejection: Some(rejection),
        features: 0,
    }
}

/// Validate with the built-in marker lists.
pub fn validate(content: &str) -> ValidationVerdict {
    ContentValidator::default().validate(content)
}
