//! Layout engine for a multi-member project timeline.
//!
//! Turns flat project and vacation records into derived layout data:
//! grouped logical projects, week- and day-granularity time axes, greedy
//! first-fit lane assignments, and a month-grid segmentation with a
//! bounded-density overflow policy. Everything is a pure, synchronous
//! recomputation over the current record set; rendering and persistence
//! sit on either side of this crate's function-call boundary.

pub mod color;
pub mod dates;
pub mod io;
pub mod layout;
pub mod model;

pub use layout::lane::{pack, Packing};
pub use layout::month_grid::{build_month_grid, GridDay, MonthGrid, Segment};
pub use layout::rows::{member_rows, MemberRow, RowItem, RowItemKind};
pub use model::grouped::{dedupe, group, GroupedProject};
pub use model::plan::Plan;
pub use model::record::{DateRange, Member, Milestone, ProjectRecord, Vacation};
pub use model::timeline::{
    generate_days, generate_weeks, TimeBlock, TimelineScale, TimelineViewport,
};
