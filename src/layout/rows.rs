//! Per-member row assembly for the week and day timeline views.

use crate::model::grouped::GroupedProject;
use crate::model::record::{DateRange, Member, Vacation};

use super::lane::{pack, Packing};

/// What a row item points back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowItemKind {
    /// Index into the grouped-project slice.
    Project(usize),
    /// Index into the vacation slice.
    Vacation(usize),
}

/// One lane-assigned bar within a member's row, clipped to the visible
/// window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowItem {
    pub kind: RowItemKind,
    pub span: DateRange,
    pub lane: usize,
}

/// All bars for one roster member, packed without visual overlap.
#[derive(Debug, Clone)]
pub struct MemberRow {
    pub member: Member,
    pub items: Vec<RowItem>,
    pub lane_count: usize,
}

/// Build one packed row per roster member.
///
/// A member's row carries the grouped projects they belong to plus their own
/// vacations, restricted to `window`. Projects are submitted before
/// vacations, so equal-start ties keep projects in the upper lanes.
pub fn member_rows(
    grouped: &[GroupedProject],
    vacations: &[Vacation],
    members: &[Member],
    window: &DateRange,
) -> Vec<MemberRow> {
    members
        .iter()
        .map(|member| {
            let mut kinds = Vec::new();
            let mut spans = Vec::new();
            for (i, project) in grouped.iter().enumerate() {
                if !project.has_member(member) {
                    continue;
                }
                if let Some(span) = project.range().clip(window) {
                    kinds.push(RowItemKind::Project(i));
                    spans.push(span);
                }
            }
            for (i, vacation) in vacations.iter().enumerate() {
                if !vacation.belongs_to(member) {
                    continue;
                }
                if let Some(span) = vacation.range().and_then(|r| r.clip(window)) {
                    kinds.push(RowItemKind::Vacation(i));
                    spans.push(span);
                }
            }
            let Packing { lanes, lane_count } = pack(&spans);
            let items = kinds
                .into_iter()
                .zip(spans)
                .zip(lanes)
                .map(|((kind, span), lane)| RowItem { kind, span, lane })
                .collect();
            MemberRow {
                member: member.clone(),
                items,
                lane_count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::grouped::group;
    use crate::model::record::ProjectRecord;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn window(y: i32, m: u32) -> DateRange {
        DateRange::new(d(y, m, 1), d(y, m, 28)).unwrap()
    }

    #[test]
    fn overlapping_projects_stack_into_lanes() {
        let records = vec![
            ProjectRecord::new("Redesign", "Kim", "Platform", d(2025, 3, 3), d(2025, 3, 14)),
            ProjectRecord::new("Migration", "Kim", "Platform", d(2025, 3, 10), d(2025, 3, 21)),
        ];
        let grouped = group(&records);
        let members = vec![Member::new("Kim", "Platform")];
        let rows = member_rows(&grouped, &[], &members, &window(2025, 3));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].items.len(), 2);
        assert_eq!(rows[0].lane_count, 2);
        assert_ne!(rows[0].items[0].lane, rows[0].items[1].lane);
    }

    #[test]
    fn vacation_shares_lane_after_a_gap_day() {
        let records = vec![ProjectRecord::new(
            "Redesign",
            "Kim",
            "Platform",
            d(2025, 3, 3),
            d(2025, 3, 7),
        )];
        let grouped = group(&records);
        let vacations = vec![Vacation::new("Kim", "Platform", d(2025, 3, 9), d(2025, 3, 11), "#ccc")];
        let members = vec![Member::new("Kim", "Platform")];
        let rows = member_rows(&grouped, &vacations, &members, &window(2025, 3));

        assert_eq!(rows[0].lane_count, 1);
        assert!(rows[0]
            .items
            .iter()
            .any(|i| matches!(i.kind, RowItemKind::Vacation(0))));
    }

    #[test]
    fn rows_only_show_the_members_own_items() {
        let records = vec![
            ProjectRecord::new("Redesign", "Kim", "Platform", d(2025, 3, 3), d(2025, 3, 14)),
            ProjectRecord::new("Ops", "Lee", "Infra", d(2025, 3, 3), d(2025, 3, 14)),
        ];
        let grouped = group(&records);
        let vacations = vec![Vacation::new("Lee", "Infra", d(2025, 3, 5), d(2025, 3, 6), "#ccc")];
        let members = vec![Member::new("Kim", "Platform"), Member::new("Lee", "Infra")];
        let rows = member_rows(&grouped, &vacations, &members, &window(2025, 3));

        assert_eq!(rows[0].items.len(), 1);
        assert_eq!(rows[1].items.len(), 2);
    }

    #[test]
    fn items_outside_the_window_are_dropped() {
        let records = vec![
            ProjectRecord::new("Redesign", "Kim", "Platform", d(2025, 1, 1), d(2025, 1, 20)),
            ProjectRecord::new("Migration", "Kim", "Platform", d(2025, 3, 10), d(2025, 4, 15)),
        ];
        let grouped = group(&records);
        let members = vec![Member::new("Kim", "Platform")];
        let rows = member_rows(&grouped, &[], &members, &window(2025, 3));

        assert_eq!(rows[0].items.len(), 1);
        // Clipped to the window: the bar stops at the window edge.
        assert_eq!(rows[0].items[0].span.start, d(2025, 3, 10));
        assert_eq!(rows[0].items[0].span.end, d(2025, 3, 28));
    }

    #[test]
    fn empty_roster_yields_no_rows() {
        assert!(member_rows(&[], &[], &[], &window(2025, 3)).is_empty());
    }
}
