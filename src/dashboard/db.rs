//! Category lookups used by the dashboard breakdown.

use std::collections::HashMap;

use rusqlite::Connection;

use crate::{
    Error,
    budget_category::{BudgetCategoryId, BudgetCategoryType},
};

/// Map every budget category, active or not, to its type.
pub(super) fn get_category_types(
    connection: &Connection,
) -> Result<HashMap<BudgetCategoryId, BudgetCategoryType>, Error> {
    connection
        .prepare("SELECT id, type FROM budget_category")?
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .map(|maybe_type| maybe_type.map_err(Error::from))
        .collect()
}
