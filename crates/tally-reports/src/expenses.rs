//! Expense totals for a period, overall and per expense category.

use serde::{Deserialize, Serialize};
use tally_core::{Dated, EntityId, Money};
use tracing::debug;
use ts_rs::TS;

use crate::analysis::Breakdown;
use crate::filter::{ReportFilter, Sources};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub total: Money,
    pub count: usize,
    /// In order of first appearance.
    pub by_category: Vec<Breakdown>,
}

pub fn expense_summary(src: &Sources<'_>, filter: &ReportFilter) -> ExpenseSummary {
    let window = filter.window();
    let mut summary = ExpenseSummary::default();

    for expense in src
        .expenses
        .iter()
        .filter(|e| window.contains(e.date()))
        .filter(|e| filter.matches_location(&e.business_location_id))
    {
        summary.total += expense.amount;
        summary.count += 1;

        match summary
            .by_category
            .iter_mut()
            .find(|b| b.id == expense.expense_category_id)
        {
            Some(row) => row.amount += expense.amount,
            None => summary.by_category.push(Breakdown {
                name: category_name(src, &expense.expense_category_id),
                id: expense.expense_category_id.clone(),
                amount: expense.amount,
            }),
        }
    }

    debug!(count = summary.count, total = %summary.total, "Expense summary computed");
    summary
}

fn category_name(src: &Sources<'_>, id: &EntityId) -> String {
    src.expense_categories
        .iter()
        .find(|c| &c.id == id)
        .map_or_else(|| id.to_string(), |c| c.name.clone())
}
