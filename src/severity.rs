//! Severity model: raw issue severities and the three charted bands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw issue severity as found in tracker data.
///
/// `enhancement` is not part of the model; requests are filtered out before
/// the data reaches this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Blocker,
    Critical,
    Major,
    Normal,
    Minor,
    Trivial,
}

impl Severity {
    /// The chart band this severity is counted under.
    pub fn band(self) -> SeverityBand {
        match self {
            Severity::Blocker | Severity::Critical | Severity::Major => SeverityBand::High,
            Severity::Normal => SeverityBand::Normal,
            Severity::Minor | Severity::Trivial => SeverityBand::Low,
        }
    }
}

/// One of the three fixed severity buckets charted on every dashboard.
///
/// The set is closed; `ALL` gives the fixed display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum SeverityBand {
    High,
    Normal,
    Low,
}

impl SeverityBand {
    /// All bands in their fixed display order.
    pub const ALL: [SeverityBand; 3] =
        [SeverityBand::High, SeverityBand::Normal, SeverityBand::Low];

    /// Dataset label, matching the bucket names used in the data files.
    pub fn label(self) -> &'static str {
        match self {
            SeverityBand::High => "blocker+critical+major",
            SeverityBand::Normal => "normal",
            SeverityBand::Low => "minor+trivial",
        }
    }

    /// Base display color for this band.
    pub fn color(self) -> Rgb {
        match self {
            SeverityBand::High => Rgb::new(255, 99, 132),
            SeverityBand::Normal => Rgb::new(54, 162, 235),
            SeverityBand::Low => Rgb::new(75, 192, 192),
        }
    }
}

impl fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An RGB color with helpers for the CSS color strings Chart.js expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `rgb(r, g, b)` string.
    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// `rgba(r, g, b, a)` string with the given alpha.
    pub fn css_with_alpha(self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_mapping() {
        assert_eq!(Severity::Blocker.band(), SeverityBand::High);
        assert_eq!(Severity::Critical.band(), SeverityBand::High);
        assert_eq!(Severity::Major.band(), SeverityBand::High);
        assert_eq!(Severity::Normal.band(), SeverityBand::Normal);
        assert_eq!(Severity::Minor.band(), SeverityBand::Low);
        assert_eq!(Severity::Trivial.band(), SeverityBand::Low);
    }

    #[test]
    fn test_band_labels_and_order() {
        let labels: Vec<&str> = SeverityBand::ALL.iter().map(|b| b.label()).collect();
        assert_eq!(labels, vec!["blocker+critical+major", "normal", "minor+trivial"]);
    }

    #[test]
    fn test_severity_serde() {
        let sev: Severity = serde_json::from_str("\"blocker\"").unwrap();
        assert_eq!(sev, Severity::Blocker);
        assert_eq!(serde_json::to_string(&Severity::Trivial).unwrap(), "\"trivial\"");
    }

    #[test]
    fn test_color_strings() {
        assert_eq!(SeverityBand::High.color().css(), "rgb(255, 99, 132)");
        assert_eq!(
            SeverityBand::Normal.color().css_with_alpha(0.5),
            "rgba(54, 162, 235, 0.5)"
        );
    }
}
