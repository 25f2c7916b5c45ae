//! Turns snapshot balances into totals and the yearly trend.

use rust_decimal::Decimal;

use crate::{
    Error,
    account_category::AccountType,
    money::{difference, total},
    net_worth::{NetWorthTotals, NetWorthTrendPoint},
    scope::YearScope,
};

/// Sum balances by account type.
///
/// Accounts without a balance are simply absent from `balances`, so they
/// count as zero.
///
/// # Errors
/// Returns [Error::Validation] if a total does not fit in a [Decimal].
pub fn sum_by_account_type<'a>(
    balances: impl IntoIterator<Item = &'a (AccountType, Decimal)>,
) -> Result<NetWorthTotals, Error> {
    let (assets, debts): (Vec<_>, Vec<_>) = balances
        .into_iter()
        .partition(|(account_type, _)| *account_type == AccountType::Asset);

    let total_assets = total(assets.iter().map(|(_, value)| value))?;
    let total_debts = total(debts.iter().map(|(_, value)| value))?;

    Ok(NetWorthTotals {
        total_assets,
        total_debts,
        net_worth: difference(total_assets, total_debts)?,
    })
}

/// Build the twelve monthly points of the net worth chart for `year`.
///
/// `balances` holds `(month, account type, value)` for every snapshot in the
/// year. Months without snapshots are zero.
pub fn build_net_worth_trend(
    year: YearScope,
    balances: &[(u8, AccountType, Decimal)],
) -> Result<Vec<NetWorthTrendPoint>, Error> {
    year.months()
        .map(|month| {
            let in_month: Vec<_> = balances
                .iter()
                .filter(|(month_num, _, _)| *month_num == month.month())
                .map(|(_, account_type, value)| (*account_type, *value))
                .collect();
            let totals = sum_by_account_type(&in_month)?;

            Ok(NetWorthTrendPoint {
                month: month.label(),
                month_num: month.month(),
                assets: totals.total_assets,
                debts: totals.total_debts,
                net_worth: totals.net_worth,
            })
        })
        .collect()
}
