//! Collapses per-assignee project submissions into logical projects.
//!
//! Grouping is rebuilt from the raw record set on every layout pass; the
//! derived structures here are never stored or mutated in place.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::color;

use super::record::{DateRange, Member, Milestone, ProjectRecord, Vacation};

/// One project name aggregated across all of its assignees.
///
/// Spans the union of the contributing records' ranges and carries the
/// merged membership, milestone, and vacation lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedProject {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub members: Vec<Member>,
    pub color_index: usize,
    pub custom_color: Option<String>,
    pub tentative: bool,
    pub document_url: Option<String>,
    pub notes: Option<String>,
    pub milestones: Vec<Milestone>,
    pub vacations: Vec<Vacation>,
}

impl GroupedProject {
    /// The union range; valid by construction since inverted records never
    /// enter a group.
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start,
            end: self.end,
        }
    }

    /// Resolved bar color: an explicit custom color wins over the palette.
    pub fn color(&self) -> &str {
        match &self.custom_color {
            Some(c) if !c.is_empty() => c,
            _ => color::palette_color(self.color_index),
        }
    }

    pub fn has_member(&self, member: &Member) -> bool {
        self.members.contains(member)
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty()).cloned()
}

/// Append `milestone` unless its `(label, date)` key was already taken.
fn merge_milestone(into: &mut Vec<Milestone>, seen: &mut HashSet<String>, milestone: &Milestone) {
    if seen.insert(milestone.merge_key()) {
        into.push(milestone.clone());
    }
}

/// Append `vacation` unless its key was already taken; inverted vacation
/// ranges are dropped since they cannot be placed.
fn merge_vacation(into: &mut Vec<Vacation>, seen: &mut HashSet<String>, vacation: &Vacation) {
    if vacation.range().is_none() {
        debug!(
            "dropping vacation for {} with inverted range {}..{}",
            vacation.person, vacation.start, vacation.end
        );
        return;
    }
    if seen.insert(vacation.merge_key()) {
        into.push(vacation.clone());
    }
}

/// Collapse duplicate submissions at `(name, person, team)` granularity.
///
/// The first submission wins for the range and auxiliary fields; later
/// duplicates only contribute a tentative flag, missing auxiliary values,
/// and not-yet-seen milestones and vacations.
pub fn dedupe(records: &[ProjectRecord]) -> Vec<ProjectRecord> {
    let mut by_key: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<ProjectRecord> = Vec::new();
    let mut seen_milestones: Vec<HashSet<String>> = Vec::new();
    let mut seen_vacations: Vec<HashSet<String>> = Vec::new();

    for rec in records {
        match by_key.get(&rec.merge_key()) {
            None => {
                by_key.insert(rec.merge_key(), out.len());
                let mut ms_seen = HashSet::new();
                let mut vac_seen = HashSet::new();
                let mut first = rec.clone();
                first.document_url = non_empty(rec.document_url.as_ref());
                first.custom_color = non_empty(rec.custom_color.as_ref());
                first.notes = non_empty(rec.notes.as_ref());
                first.milestones = Vec::new();
                first.vacations = Vec::new();
                for m in &rec.milestones {
                    merge_milestone(&mut first.milestones, &mut ms_seen, m);
                }
                for v in &rec.vacations {
                    merge_vacation(&mut first.vacations, &mut vac_seen, v);
                }
                out.push(first);
                seen_milestones.push(ms_seen);
                seen_vacations.push(vac_seen);
            }
            Some(&idx) => {
                let kept = &mut out[idx];
                kept.tentative |= rec.tentative;
                if kept.document_url.is_none() {
                    kept.document_url = non_empty(rec.document_url.as_ref());
                }
                if kept.custom_color.is_none() {
                    kept.custom_color = non_empty(rec.custom_color.as_ref());
                }
                if kept.notes.is_none() {
                    kept.notes = non_empty(rec.notes.as_ref());
                }
                for m in &rec.milestones {
                    merge_milestone(&mut kept.milestones, &mut seen_milestones[idx], m);
                }
                for v in &rec.vacations {
                    merge_vacation(&mut kept.vacations, &mut seen_vacations[idx], v);
                }
            }
        }
    }
    out
}

/// Build one logical project per name from the raw record set.
///
/// Records with an inverted range are dropped (they cannot be placed); the
/// first record with a given name seeds its group and later records extend
/// the span, union the membership, and deep-merge the sub-lists. Group
/// order follows first appearance in the input.
pub fn group(records: &[ProjectRecord]) -> Vec<GroupedProject> {
    let mut by_name: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<GroupedProject> = Vec::new();
    let mut seen_milestones: Vec<HashSet<String>> = Vec::new();
    let mut seen_vacations: Vec<HashSet<String>> = Vec::new();

    for rec in records {
        let range = match rec.range() {
            Some(r) => r,
            None => {
                debug!(
                    "dropping record '{}' with inverted range {}..{}",
                    rec.name, rec.start, rec.end
                );
                continue;
            }
        };
        match by_name.get(&rec.name) {
            None => {
                by_name.insert(rec.name.clone(), groups.len());
                let mut ms_seen = HashSet::new();
                let mut vac_seen = HashSet::new();
                let mut milestones = Vec::new();
                let mut vacations = Vec::new();
                for m in &rec.milestones {
                    merge_milestone(&mut milestones, &mut ms_seen, m);
                }
                for v in &rec.vacations {
                    merge_vacation(&mut vacations, &mut vac_seen, v);
                }
                groups.push(GroupedProject {
                    name: rec.name.clone(),
                    start: range.start,
                    end: range.end,
                    members: vec![rec.member()],
                    color_index: rec.color_index,
                    custom_color: non_empty(rec.custom_color.as_ref()),
                    tentative: rec.tentative,
                    document_url: non_empty(rec.document_url.as_ref()),
                    notes: non_empty(rec.notes.as_ref()),
                    milestones,
                    vacations,
                });
                seen_milestones.push(ms_seen);
                seen_vacations.push(vac_seen);
            }
            Some(&idx) => {
                let g = &mut groups[idx];
                g.start = g.start.min(range.start);
                g.end = g.end.max(range.end);
                let member = rec.member();
                if !g.members.contains(&member) {
                    g.members.push(member);
                }
                g.tentative |= rec.tentative;
                if g.document_url.is_none() {
                    g.document_url = non_empty(rec.document_url.as_ref());
                }
                if g.custom_color.is_none() {
                    g.custom_color = non_empty(rec.custom_color.as_ref());
                }
                if g.notes.is_none() {
                    g.notes = non_empty(rec.notes.as_ref());
                }
                for m in &rec.milestones {
                    merge_milestone(&mut g.milestones, &mut seen_milestones[idx], m);
                }
                for v in &rec.vacations {
                    merge_vacation(&mut g.vacations, &mut seen_vacations[idx], v);
                }
            }
        }
    }
    groups
}

/// Flatten a grouped project back into one record per member, for export.
pub fn ungroup(project: &GroupedProject) -> Vec<ProjectRecord> {
    project
        .members
        .iter()
        .map(|member| {
            let mut rec = ProjectRecord::new(
                project.name.clone(),
                member.person.clone(),
                member.team.clone(),
                project.start,
                project.end,
            );
            rec.color_index = project.color_index;
            rec.custom_color = project.custom_color.clone();
            rec.tentative = project.tentative;
            rec.document_url = project.document_url.clone();
            rec.notes = project.notes.clone();
            rec.milestones = project.milestones.clone();
            rec.vacations = project.vacations.clone();
            rec
        })
        .collect()
}
