pub mod lane;
pub mod month_grid;
pub mod rows;

pub use lane::{pack, Packing};
pub use month_grid::{build_month_grid, GridDay, MonthGrid, Segment, DAY_ITEM_LIMIT};
pub use rows::{member_rows, MemberRow, RowItem, RowItemKind};
