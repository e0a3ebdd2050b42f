//! User-tunable configuration
//!
//! Plain value structs with defaults and range clamping. Hosts construct
//! these once and hand them to the controller; nothing here is read from
//! disk or the environment.

use crate::domain::class::Accent;
use crate::render::surface::Rgba;

/// Configuration for the grid layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// First displayed hour when the timetable is empty.
    pub default_start_hour: u32,
    /// One past the last displayed hour when the timetable is empty.
    pub default_end_hour: u32,
    /// Late-night cutoff: times earlier than this count as part of the
    /// previous day when an overnight span is anchored.
    pub late_night_split: u32,
}

impl LayoutConfig {
    pub const DEFAULT_START_HOUR: u32 = 8;
    pub const DEFAULT_END_HOUR: u32 = 20;
    pub const LATE_NIGHT_SPLIT: u32 = 3;
    /// Splits later than this would hide most of the morning.
    pub const MAX_SPLIT: u32 = 6;

    /// Returns a copy with every field forced into its valid range.
    pub fn sanitized(self) -> Self {
        let late_night_split = self.late_night_split.min(Self::MAX_SPLIT);
        let default_start_hour = self.default_start_hour.min(23);
        let default_end_hour = self
            .default_end_hour
            .clamp(default_start_hour + 1, 24);
        Self {
            default_start_hour,
            default_end_hour,
            late_night_split,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_start_hour: Self::DEFAULT_START_HOUR,
            default_end_hour: Self::DEFAULT_END_HOUR,
            late_night_split: Self::LATE_NIGHT_SPLIT,
        }
    }
}

/// Durations for the animated transitions, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    /// Moving a block to a new slot after a choice change or relayout.
    pub move_duration: f32,
    /// Returning a dragged block to its origin after a missed drop.
    pub snap_back_duration: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            move_duration: 0.3,
            snap_back_duration: 0.25,
        }
    }
}

/// Colors and text sizes for the rendered scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Rgba,
    pub grid_line: Rgba,
    pub gutter_text: Rgba,
    pub header_text: Rgba,
    pub block_text: Rgba,
    pub clash_outline: Rgba,
    pub highlight_outline: Rgba,
    pub warn_text: Rgba,
    /// Alpha applied to suggestion block fills so the schedule underneath
    /// stays readable.
    pub suggestion_alpha: u8,
    /// Alpha applied to online blocks to distinguish them from in-person
    /// ones.
    pub online_alpha: u8,
    pub label_size: f32,
    pub block_text_size: f32,
}

impl Theme {
    /// Fill color for a class accent.
    pub fn accent(&self, accent: Accent) -> Rgba {
        match accent {
            Accent::Red => Rgba::opaque(214, 72, 77),
            Accent::Orange => Rgba::opaque(230, 126, 34),
            Accent::Yellow => Rgba::opaque(212, 172, 13),
            Accent::Green => Rgba::opaque(67, 160, 71),
            Accent::Teal => Rgba::opaque(0, 150, 136),
            Accent::Blue => Rgba::opaque(52, 120, 219),
            Accent::Purple => Rgba::opaque(142, 68, 173),
            Accent::Pink => Rgba::opaque(216, 88, 157),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Rgba::opaque(24, 26, 31),
            grid_line: Rgba::new(255, 255, 255, 40),
            gutter_text: Rgba::new(255, 255, 255, 150),
            header_text: Rgba::new(255, 255, 255, 220),
            block_text: Rgba::opaque(255, 255, 255),
            clash_outline: Rgba::opaque(255, 82, 82),
            highlight_outline: Rgba::opaque(255, 255, 255),
            warn_text: Rgba::opaque(255, 183, 77),
            suggestion_alpha: 110,
            online_alpha: 180,
            label_size: 13.0,
            block_text_size: 14.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.default_start_hour, 8);
        assert_eq!(config.default_end_hour, 20);
        assert_eq!(config.late_night_split, 3);
    }

    #[test]
    fn sanitize_clamps_out_of_range_values() {
        let config = LayoutConfig {
            default_start_hour: 30,
            default_end_hour: 2,
            late_night_split: 12,
        }
        .sanitized();
        assert_eq!(config.late_night_split, LayoutConfig::MAX_SPLIT);
        assert_eq!(config.default_start_hour, 23);
        assert_eq!(config.default_end_hour, 24);
    }

    #[test]
    fn sanitize_keeps_valid_values() {
        let config = LayoutConfig::default().sanitized();
        assert_eq!(config, LayoutConfig::default());
    }

    #[test]
    fn every_accent_has_a_color() {
        let theme = Theme::default();
        for accent in Accent::ALL {
            assert_eq!(theme.accent(accent).a, 255);
        }
    }
}
