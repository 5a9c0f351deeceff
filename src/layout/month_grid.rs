//! Month calendar grid analysis.
//!
//! Slices grouped projects into per-week segments, packs the segments into
//! lanes, and counts per-day overlap to drive the "+more" overflow policy:
//! a day holding too many items collapses to a counter, and segments
//! touching such a day are suppressed from the grid and surfaced through
//! the per-day detail lists instead. Nothing here is incremental; the grid
//! is rebuilt in full on every selection, month, or record change.

use chrono::{Datelike, Duration, NaiveDate};

use crate::dates;
use crate::model::grouped::GroupedProject;
use crate::model::record::{DateRange, Member, Vacation};

/// Rows in the month grid.
pub const GRID_WEEKS: usize = 6;
/// Day cells in the month grid.
pub const GRID_DAYS: usize = GRID_WEEKS * 7;
/// A day cell holding more than this many items collapses to "+more".
pub const DAY_ITEM_LIMIT: usize = 3;

/// One day cell of the 6x7 grid.
#[derive(Debug, Clone)]
pub struct GridDay {
    pub date: NaiveDate,
    /// False for the leading/trailing days that pad the grid.
    pub in_month: bool,
    pub is_today: bool,
    /// Grouped projects plus selected-member vacations covering this day.
    pub overlap: usize,
    /// True when the cell collapses to a "+more" affordance.
    pub overflow: bool,
    /// Indices into the grouped-project slice, for the per-day detail view.
    pub projects: Vec<usize>,
    /// `(project index, milestone index)` pairs landing on this day.
    pub milestones: Vec<(usize, usize)>,
    /// Indices into the vacation slice (selected members only).
    pub vacations: Vec<usize>,
}

/// A milestone pinned inside a visible segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentMilestone {
    /// Milestone index within the owning project.
    pub milestone: usize,
    /// Horizontal position as a fraction of the segment width, in `[0, 1)`.
    pub offset: f32,
}

/// A grouped project clipped to one grid week.
#[derive(Debug, Clone)]
pub struct Segment {
    /// Index into the grouped-project slice.
    pub project: usize,
    pub week: usize,
    /// Sunday-based first column, 0-6.
    pub start_col: usize,
    /// Columns covered, at least 1.
    pub span: usize,
    /// Lane within this week; 0 for suppressed segments.
    pub lane: usize,
    /// The project continues before/after this week.
    pub continues_left: bool,
    pub continues_right: bool,
    /// Suppressed from the grid; the day detail lists carry it instead.
    pub hidden: bool,
    pub milestones: Vec<SegmentMilestone>,
}

impl Segment {
    /// Half-open column range used for collision tests.
    fn cols(&self) -> (usize, usize) {
        (self.start_col, self.start_col + self.span)
    }
}

/// Derived layout for one month view.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Sunday the grid starts on (on or before the 1st).
    pub grid_start: NaiveDate,
    /// Exactly `GRID_DAYS` cells, row-major.
    pub days: Vec<GridDay>,
    pub segments: Vec<Segment>,
    /// Packed lane count per grid week, for sizing week rows.
    pub lane_counts: [usize; GRID_WEEKS],
}

impl MonthGrid {
    /// The cell for a date, when it falls inside the grid.
    pub fn day_at(&self, date: NaiveDate) -> Option<&GridDay> {
        let offset = dates::days_between(self.grid_start, date);
        if (0..GRID_DAYS as i64).contains(&offset) {
            self.days.get(offset as usize)
        } else {
            None
        }
    }
}

fn vacation_selected(vacation: &Vacation, selected: &[Member]) -> bool {
    selected.is_empty() || selected.iter().any(|m| vacation.belongs_to(m))
}

/// Analyze one month of the calendar view.
///
/// `selected` narrows which members' vacations count toward per-day
/// overlap; an empty selection means the whole roster. An unrepresentable
/// `(year, month)` falls back to `today`'s month rather than failing.
pub fn build_month_grid(
    year: i32,
    month: u32,
    today: NaiveDate,
    grouped: &[GroupedProject],
    vacations: &[Vacation],
    selected: &[Member],
) -> MonthGrid {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap_or_else(|| today.with_day(1).unwrap_or(today));
    let grid_start = dates::start_of_week(first);

    let selected_vacations: Vec<(usize, DateRange)> = vacations
        .iter()
        .enumerate()
        .filter(|(_, v)| vacation_selected(v, selected))
        .filter_map(|(i, v)| v.range().map(|r| (i, r)))
        .collect();

    let days: Vec<GridDay> = (0..GRID_DAYS)
        .map(|i| {
            let date = grid_start + Duration::days(i as i64);
            let mut projects = Vec::new();
            let mut milestones = Vec::new();
            for (pi, project) in grouped.iter().enumerate() {
                if project.range().contains(date) {
                    projects.push(pi);
                }
                for (mi, m) in project.milestones.iter().enumerate() {
                    if m.date == date {
                        milestones.push((pi, mi));
                    }
                }
            }
            let day_vacations: Vec<usize> = selected_vacations
                .iter()
                .filter(|(_, r)| r.contains(date))
                .map(|(i, _)| *i)
                .collect();
            let overlap = projects.len() + day_vacations.len();
            GridDay {
                date,
                in_month: date.month() == first.month() && date.year() == first.year(),
                is_today: date == today,
                overlap,
                overflow: overlap > DAY_ITEM_LIMIT,
                projects,
                milestones,
                vacations: day_vacations,
            }
        })
        .collect();

    let mut segments = Vec::new();
    let mut lane_counts = [0usize; GRID_WEEKS];
    for week in 0..GRID_WEEKS {
        let week_start = grid_start + Duration::days(7 * week as i64);
        let week_range = DateRange {
            start: week_start,
            end: week_start + Duration::days(6),
        };

        let mut week_segments: Vec<Segment> = Vec::new();
        for (pi, project) in grouped.iter().enumerate() {
            let clipped = match project.range().clip(&week_range) {
                Some(c) => c,
                None => continue,
            };
            let start_col = dates::days_between(week_start, clipped.start) as usize;
            let span = clipped.len_days() as usize;
            // A segment touching any overflowing day is suppressed whole.
            let hidden = (start_col..start_col + span)
                .any(|col| days[week * 7 + col].overflow);
            let milestones = if hidden {
                Vec::new()
            } else {
                project
                    .milestones
                    .iter()
                    .enumerate()
                    .filter_map(|(mi, m)| {
                        let col = dates::days_between(week_start, m.date);
                        let lo = start_col as i64;
                        let hi = (start_col + span) as i64;
                        if col >= lo && col < hi {
                            Some(SegmentMilestone {
                                milestone: mi,
                                offset: (col - lo) as f32 / span as f32,
                            })
                        } else {
                            None
                        }
                    })
                    .collect()
            };
            week_segments.push(Segment {
                project: pi,
                week,
                start_col,
                span,
                lane: 0,
                continues_left: project.start < week_range.start,
                continues_right: project.end > week_range.end,
                hidden,
                milestones,
            });
        }

        lane_counts[week] = pack_week_segments(&mut week_segments);
        segments.append(&mut week_segments);
    }

    MonthGrid {
        year: first.year(),
        month: first.month(),
        grid_start,
        days,
        segments,
        lane_counts,
    }
}

/// First-fit lane packing over a week's visible segments.
///
/// Column geometry, not dates: two segments collide iff their half-open
/// `[start, start + span)` column ranges intersect, so a lane frees up in
/// the very column its occupant ends before. Returns the lane count.
fn pack_week_segments(segments: &mut [Segment]) -> usize {
    let mut order: Vec<usize> = (0..segments.len())
        .filter(|&i| !segments[i].hidden)
        .collect();
    order.sort_by_key(|&i| segments[i].start_col);

    let mut lane_end: Vec<usize> = Vec::new(); // exclusive end column per lane
    for &i in &order {
        let (start, end) = segments[i].cols();
        let free = lane_end.iter().position(|&e| e <= start);
        segments[i].lane = match free {
            Some(k) => {
                lane_end[k] = end;
                k
            }
            None => {
                lane_end.push(end);
                lane_end.len() - 1
            }
        };
    }
    lane_end.len()
}
