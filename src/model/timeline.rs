use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::dates;

use super::record::DateRange;

/// Controls what scale the timeline displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineScale {
    Days,
    Weeks,
}

/// One unit of the visible timeline axis: a calendar week or a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub index: usize,
    pub label: String,
    pub sub_label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Whether the reference date falls inside this block.
    pub is_current: bool,
}

impl TimeBlock {
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start,
            end: self.end,
        }
    }
}

/// Produce `count` consecutive week blocks, flagged against `today`.
///
/// The requested start is rolled back to its Sunday first, so blocks always
/// align to calendar weeks. Labels read `"3월 2주"`; the sub-label carries
/// the covered dates.
pub fn generate_weeks(start: NaiveDate, count: usize, today: NaiveDate) -> Vec<TimeBlock> {
    let origin = dates::start_of_week(start);
    (0..count)
        .map(|i| {
            let s = origin + Duration::days(7 * i as i64);
            let e = s + Duration::days(6);
            TimeBlock {
                index: i,
                label: format!("{}월 {}주", s.month(), dates::week_of_month(s)),
                sub_label: format!("{}/{} ~ {}/{}", s.month(), s.day(), e.month(), e.day()),
                start: s,
                end: e,
                is_current: s <= today && today <= e,
            }
        })
        .collect()
}

/// Produce `count` consecutive single-day blocks, flagged against `today`.
pub fn generate_days(start: NaiveDate, count: usize, today: NaiveDate) -> Vec<TimeBlock> {
    (0..count)
        .map(|i| {
            let day = start + Duration::days(i as i64);
            TimeBlock {
                index: i,
                label: format!("{}/{}", day.month(), day.day()),
                sub_label: dates::weekday_name(day).to_string(),
                start: day,
                end: day,
                is_current: day == today,
            }
        })
        .collect()
}

/// Manages the visible viewport of the timeline: the scrollable pixel axis
/// the rendering layer positions bars against.
#[derive(Debug, Clone)]
pub struct TimelineViewport {
    /// The leftmost visible date.
    pub start: NaiveDate,
    /// The rightmost visible date (inclusive).
    pub end: NaiveDate,
    /// Current display scale.
    pub scale: TimelineScale,
    /// Pixels per day (controls zoom level).
    pub pixels_per_day: f32,
}

impl TimelineViewport {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            scale: TimelineScale::Weeks,
            pixels_per_day: 18.0,
        }
    }

    /// Viewport covering a generated block sequence; `None` for no blocks.
    pub fn from_blocks(blocks: &[TimeBlock]) -> Option<Self> {
        let first = blocks.first()?;
        let last = blocks.last()?;
        let scale = if first.start == first.end {
            TimelineScale::Days
        } else {
            TimelineScale::Weeks
        };
        Some(Self {
            start: first.start,
            end: last.end,
            scale,
            pixels_per_day: match scale {
                TimelineScale::Days => 36.0,
                TimelineScale::Weeks => 18.0,
            },
        })
    }

    /// Convert a date to an x-pixel offset from the viewport start.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        (date - self.start).num_days() as f32 * self.pixels_per_day
    }

    /// Convert an x-pixel offset back to a date.
    pub fn x_to_date(&self, x: f32) -> NaiveDate {
        self.start + Duration::days((x / self.pixels_per_day).round() as i64)
    }

    /// Clamped bar geometry for a date range: `(x, width)` in pixels.
    ///
    /// The bar extends through the whole of its last day. `None` when the
    /// range misses the viewport entirely.
    pub fn bar_geometry(&self, range: &DateRange) -> Option<(f32, f32)> {
        let window = DateRange {
            start: self.start,
            end: self.end,
        };
        let visible = range.clip(&window)?;
        let x = self.date_to_x(visible.start);
        let width = visible.len_days() as f32 * self.pixels_per_day;
        Some((x, width))
    }

    /// Fraction of the way through the viewport, clamped to `[0, 1]`; useful
    /// for percentage-based layouts.
    pub fn fraction_of(&self, date: NaiveDate) -> f32 {
        let total = (self.end - self.start).num_days() + 1;
        if total <= 0 {
            return 0.0;
        }
        ((date - self.start).num_days() as f32 / total as f32).clamp(0.0, 1.0)
    }

    /// Total width in pixels for the visible range, last day included.
    pub fn total_width(&self) -> f32 {
        ((self.end - self.start).num_days() + 1) as f32 * self.pixels_per_day
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Zoom in (increase pixels per day).
    pub fn zoom_in(&mut self) {
        self.pixels_per_day = (self.pixels_per_day * 1.2).min(80.0);
    }

    /// Zoom out (decrease pixels per day).
    pub fn zoom_out(&mut self) {
        self.pixels_per_day = (self.pixels_per_day / 1.2).max(2.0);
    }

    /// Scroll the viewport by a number of days.
    pub fn scroll_days(&mut self, days: i64) {
        self.start += Duration::days(days);
        self.end += Duration::days(days);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn weeks_align_to_sundays_and_flag_today() {
        let blocks = generate_weeks(d(2025, 1, 1), 4, d(2025, 1, 8));
        assert_eq!(blocks.len(), 4);
        // 2025-01-01 is a Wednesday; the axis opens on the prior Sunday.
        assert_eq!(blocks[0].start, d(2024, 12, 29));
        for b in &blocks {
            assert_eq!((b.end - b.start).num_days(), 6);
        }
        // Contiguous: each block starts the day after the previous ends.
        for pair in blocks.windows(2) {
            assert_eq!(pair[1].start, pair[0].end + Duration::days(1));
        }
        // Exactly the 2025-01-05..2025-01-11 block is current.
        let current: Vec<&TimeBlock> = blocks.iter().filter(|b| b.is_current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].start, d(2025, 1, 5));
        assert_eq!(current[0].end, d(2025, 1, 11));
    }

    #[test]
    fn week_labels_carry_month_and_week_of_month() {
        let blocks = generate_weeks(d(2025, 1, 5), 2, d(2025, 1, 5));
        assert_eq!(blocks[0].label, "1월 2주");
        assert_eq!(blocks[1].label, "1월 3주");
    }

    #[test]
    fn day_blocks_label_and_flag() {
        let blocks = generate_days(d(2025, 3, 14), 3, d(2025, 3, 15));
        assert_eq!(blocks[0].label, "3/14");
        assert_eq!(blocks[1].sub_label, "토"); // 2025-03-15 is a Saturday
        assert!(!blocks[0].is_current);
        assert!(blocks[1].is_current);
        assert!(!blocks[2].is_current);
        assert_eq!(blocks[2].start, blocks[2].end);
    }

    #[test]
    fn generators_are_deterministic() {
        let a = generate_weeks(d(2025, 1, 1), 6, d(2025, 1, 8));
        let b = generate_weeks(d(2025, 1, 1), 6, d(2025, 1, 8));
        assert_eq!(a, b);
    }

    #[test]
    fn viewport_maps_dates_to_pixels_and_back() {
        let mut vp = TimelineViewport::new(d(2025, 1, 5), d(2025, 2, 1));
        vp.pixels_per_day = 10.0;
        assert_eq!(vp.date_to_x(d(2025, 1, 5)), 0.0);
        assert_eq!(vp.date_to_x(d(2025, 1, 8)), 30.0);
        assert_eq!(vp.x_to_date(34.0), d(2025, 1, 8));
        assert_eq!(vp.total_width(), 280.0);
    }

    #[test]
    fn bar_geometry_clamps_to_viewport() {
        let mut vp = TimelineViewport::new(d(2025, 1, 5), d(2025, 1, 11));
        vp.pixels_per_day = 10.0;
        let range = DateRange::new(d(2025, 1, 3), d(2025, 1, 8)).unwrap();
        let (x, width) = vp.bar_geometry(&range).unwrap();
        assert_eq!(x, 0.0);
        assert_eq!(width, 40.0); // Jan 5..=8 is four visible days

        let outside = DateRange::new(d(2025, 2, 1), d(2025, 2, 3)).unwrap();
        assert!(vp.bar_geometry(&outside).is_none());
    }

    #[test]
    fn viewport_from_blocks_infers_scale() {
        let weeks = generate_weeks(d(2025, 1, 1), 4, d(2025, 1, 8));
        let vp = TimelineViewport::from_blocks(&weeks).unwrap();
        assert_eq!(vp.scale, TimelineScale::Weeks);
        assert_eq!(vp.start, d(2024, 12, 29));
        assert_eq!(vp.end, d(2025, 1, 25));

        let days = generate_days(d(2025, 1, 1), 14, d(2025, 1, 8));
        let vp = TimelineViewport::from_blocks(&days).unwrap();
        assert_eq!(vp.scale, TimelineScale::Days);
        assert!(TimelineViewport::from_blocks(&[]).is_none());
    }
}
