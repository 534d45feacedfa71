//! Grid view-model: `(rows, sort, selection) -> renderable rows`.

mod model;
mod sort;

pub use model::{
    BulkActionButton, GridEvent, GridView, RowView, SelectionSpec, build_grid_view,
};
pub use sort::{SortDirection, SortSpec};
