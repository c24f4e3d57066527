//! Video timestamps for rounds.
//!
//! A match may carry a base video URL. Each round can record where in that
//! video it starts; the round's own URL is the base URL with a `t=XhYmZs`
//! query parameter. Timestamps have no role in scoring.

use serde::{Deserialize, Serialize};

/// Offset into a match video.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoTimestamp {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl VideoTimestamp {
    /// Create a timestamp from its components.
    #[must_use]
    pub const fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Build a normalized timestamp from a second offset.
    #[must_use]
    pub const fn from_seconds(total: u64) -> Self {
        Self {
            hours: (total / 3600) as u32,
            minutes: ((total % 3600) / 60) as u32,
            seconds: (total % 60) as u32,
        }
    }

    /// Total offset in seconds.
    #[must_use]
    pub const fn total_seconds(&self) -> u64 {
        self.hours as u64 * 3600 + self.minutes as u64 * 60 + self.seconds as u64
    }

    /// Read the `t=` parameter from a video URL.
    ///
    /// Accepts `t=1h2m3s` and plain `t=3723`. Returns `None` when the
    /// parameter is missing or malformed.
    ///
    /// ```
    /// use chase_tag::core::VideoTimestamp;
    ///
    /// let ts = VideoTimestamp::from_url("https://v.example/watch?v=abc&t=0h1m5s").unwrap();
    /// assert_eq!(ts, VideoTimestamp::new(0, 1, 5));
    /// ```
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        let (_, query) = url.split_once('?')?;
        let value = query
            .split('&')
            .find_map(|pair| pair.strip_prefix("t="))?;
        Self::parse(value)
    }

    fn parse(value: &str) -> Option<Self> {
        if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
            return value.parse().ok().map(Self::from_seconds);
        }

        let (hours, rest) = value.split_once('h')?;
        let (minutes, rest) = rest.split_once('m')?;
        let seconds = rest.strip_suffix('s')?;

        Some(Self {
            hours: parse_digits(hours)?,
            minutes: parse_digits(minutes)?,
            seconds: parse_digits(seconds)?,
        })
    }
}

fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl std::fmt::Display for VideoTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h{}m{}s", self.hours, self.minutes, self.seconds)
    }
}

/// Derive a round URL from the match's base URL.
///
/// An existing `t=` parameter is replaced; otherwise one is appended.
///
/// ```
/// use chase_tag::core::{round_video_url, VideoTimestamp};
///
/// let ts = VideoTimestamp::new(0, 2, 30);
/// assert_eq!(
///     round_video_url("https://v.example/watch?v=abc", ts),
///     "https://v.example/watch?v=abc&t=0h2m30s",
/// );
/// assert_eq!(
///     round_video_url("https://v.example/abc?t=10", ts),
///     "https://v.example/abc?t=0h2m30s",
/// );
/// ```
#[must_use]
pub fn round_video_url(base: &str, timestamp: VideoTimestamp) -> String {
    let param = format!("t={}", timestamp);

    let Some((path, query)) = base.split_once('?') else {
        return format!("{}?{}", base, param);
    };

    let mut pairs: Vec<&str> = query
        .split('&')
        .filter(|pair| !pair.is_empty() && !pair.starts_with("t="))
        .collect();
    pairs.push(&param);

    format!("{}?{}", path, pairs.join("&"))
}
