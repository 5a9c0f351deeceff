use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An inclusive calendar-day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting inverted inputs.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Whether a day falls within this range (both ends inclusive).
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Whether two inclusive ranges share at least one day.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Intersect with `other`; `None` when the ranges do not touch.
    pub fn clip(&self, other: &DateRange) -> Option<DateRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(DateRange { start, end })
    }

    /// Days covered, counting both endpoints.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// One (person, team) pairing from the roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    pub person: String,
    pub team: String,
}

impl Member {
    pub fn new(person: impl Into<String>, team: impl Into<String>) -> Self {
        Self {
            person: person.into(),
            team: team.into(),
        }
    }
}

/// A dated marker attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: Uuid,
    pub date: NaiveDate,
    pub label: String,
    pub color: String,
}

impl Milestone {
    pub fn new(date: NaiveDate, label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            label: label.into(),
            color: color.into(),
        }
    }

    /// De-duplication key when merging submissions of the same project.
    pub fn merge_key(&self) -> String {
        format!("{}__{}", self.label, self.date)
    }
}

/// A member absence, laid out alongside project bars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacation {
    pub id: Uuid,
    pub person: String,
    pub team: String,
    #[serde(default)]
    pub label: Option<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub color: String,
}

impl Vacation {
    pub fn new(
        person: impl Into<String>,
        team: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            person: person.into(),
            team: team.into(),
            label: None,
            start,
            end,
            color: color.into(),
        }
    }

    /// The validated date range; `None` when inverted.
    pub fn range(&self) -> Option<DateRange> {
        DateRange::new(self.start, self.end)
    }

    /// De-duplication key when merging submissions.
    pub fn merge_key(&self) -> String {
        format!(
            "{}__{}__{}__{}",
            self.person,
            self.start,
            self.end,
            self.label.as_deref().unwrap_or("")
        )
    }

    /// Whether this vacation belongs to the given roster member.
    pub fn belongs_to(&self, member: &Member) -> bool {
        self.person == member.person && self.team == member.team
    }
}

/// One (project, assignee) submission, as stored.
///
/// The grouper collapses all records sharing a name into a single logical
/// project; a record on its own is one assignee's slice of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    pub person: String,
    pub team: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub color_index: usize,
    #[serde(default)]
    pub custom_color: Option<String>,
    #[serde(default)]
    pub tentative: bool,
    #[serde(default)]
    pub document_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub vacations: Vec<Vacation>,
}

impl ProjectRecord {
    pub fn new(
        name: impl Into<String>,
        person: impl Into<String>,
        team: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            person: person.into(),
            team: team.into(),
            start,
            end,
            color_index: 0,
            custom_color: None,
            tentative: false,
            document_url: None,
            notes: None,
            milestones: Vec::new(),
            vacations: Vec::new(),
        }
    }

    /// Identity key for collapsing duplicate submissions.
    pub fn merge_key(&self) -> String {
        format!("{}__{}__{}", self.name, self.person, self.team)
    }

    /// The validated date range; `None` when inverted.
    pub fn range(&self) -> Option<DateRange> {
        DateRange::new(self.start, self.end)
    }

    /// The (person, team) pairing this submission came from.
    pub fn member(&self) -> Member {
        Member::new(self.person.clone(), self.team.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn range_rejects_inverted() {
        assert!(DateRange::new(d(2025, 1, 10), d(2025, 1, 1)).is_none());
        assert!(DateRange::new(d(2025, 1, 1), d(2025, 1, 1)).is_some());
    }

    #[test]
    fn range_contains_both_ends() {
        let r = DateRange::new(d(2025, 1, 5), d(2025, 1, 10)).unwrap();
        assert!(r.contains(d(2025, 1, 5)));
        assert!(r.contains(d(2025, 1, 10)));
        assert!(!r.contains(d(2025, 1, 11)));
        assert_eq!(r.len_days(), 6);
    }

    #[test]
    fn range_overlap_and_clip() {
        let a = DateRange::new(d(2025, 1, 1), d(2025, 1, 10)).unwrap();
        let b = DateRange::new(d(2025, 1, 10), d(2025, 1, 20)).unwrap();
        let c = DateRange::new(d(2025, 1, 11), d(2025, 1, 20)).unwrap();
        assert!(a.overlaps(&b)); // shared day counts
        assert!(!a.overlaps(&c));
        assert_eq!(a.clip(&b), DateRange::new(d(2025, 1, 10), d(2025, 1, 10)));
        assert_eq!(a.clip(&c), None);
    }

    #[test]
    fn merge_keys_distinguish_assignees() {
        let a = ProjectRecord::new("Redesign", "Kim", "Platform", d(2025, 1, 1), d(2025, 1, 5));
        let b = ProjectRecord::new("Redesign", "Lee", "Platform", d(2025, 1, 1), d(2025, 1, 5));
        assert_ne!(a.merge_key(), b.merge_key());
    }

    #[test]
    fn vacation_merge_key_includes_label() {
        let mut a = Vacation::new("Kim", "Platform", d(2025, 2, 1), d(2025, 2, 3), "#cccccc");
        let mut b = a.clone();
        a.label = Some("휴가".to_string());
        b.label = Some("워케이션".to_string());
        assert_ne!(a.merge_key(), b.merge_key());
    }
}
