pub mod grouped;
pub mod plan;
pub mod record;
pub mod timeline;

pub use grouped::{dedupe, group, ungroup, GroupedProject};
pub use plan::Plan;
pub use record::{DateRange, Member, Milestone, ProjectRecord, Vacation};
pub use timeline::{generate_days, generate_weeks, TimeBlock, TimelineScale, TimelineViewport};
