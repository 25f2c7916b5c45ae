//! Monthly account balances and the net worth derived from them.

mod aggregation;
mod db;
mod domain;
mod save;
mod summary;
mod trend;
mod view;

pub use db::{
    create_net_worth_snapshot_table, get_net_worth_rows, get_net_worth_summary,
    get_net_worth_totals, get_snapshot_balances_for_year, save_snapshots,
};
pub use domain::{
    MonthWithData, NetWorthAccountRow, NetWorthSummary, NetWorthTotals, NetWorthTrendPoint,
    SaveSnapshotsBody, SnapshotInput, SnapshotValue,
};
pub use save::save_snapshots_endpoint;
pub use summary::get_net_worth_summary_endpoint;
pub use trend::get_net_worth_trend_endpoint;
pub use view::get_net_worth_endpoint;
