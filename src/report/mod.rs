//! Order log reporting.
//!
//! Splits the log into standalone orders and OCO groups and renders them as
//! plain-text tables. Everything here is a pure function of the order list.

mod table;

pub use table::{format_timestamp, render_oco_table, render_orders_table, render_report};

use crate::persistence::{OcoGroupId, Order};

/// Orders sharing one OCO group id, in log order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcoGroup {
    /// Shared group id.
    pub group_id: OcoGroupId,
    /// Member orders. Normally two; fewer if the log was cut short.
    pub legs: Vec<Order>,
}

impl OcoGroup {
    /// Returns the symbol of the first leg.
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        self.legs.first().map(|o| o.symbol.as_str())
    }

    /// Returns leg `index` if present.
    #[must_use]
    pub fn leg(&self, index: usize) -> Option<&Order> {
        self.legs.get(index)
    }

    /// Returns true if the group has both legs.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.legs.len() == 2
    }
}

/// The order log split for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderReport {
    /// Orders without a group id, in log order.
    pub standalone: Vec<Order>,
    /// OCO groups, in order of first appearance.
    pub oco_groups: Vec<OcoGroup>,
}

impl OrderReport {
    /// Total number of orders in the report.
    #[must_use]
    pub fn total_orders(&self) -> usize {
        self.standalone.len() + self.oco_groups.iter().map(|g| g.legs.len()).sum::<usize>()
    }

    /// Returns true if there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.standalone.is_empty() && self.oco_groups.is_empty()
    }
}

/// Groups `orders` by OCO group id.
///
/// # Example
///
/// ```rust
/// use order_sim_rs::report::group_orders;
///
/// let report = group_orders(&[]);
/// assert!(report.is_empty());
/// ```
#[must_use]
pub fn group_orders(orders: &[Order]) -> OrderReport {
    let mut report = OrderReport::default();

    for order in orders {
        match &order.oco_group_id {
            Some(group_id) => {
                match report
                    .oco_groups
                    .iter_mut()
                    .find(|g| &g.group_id == group_id)
                {
                    Some(group) => group.legs.push(order.clone()),
                    None => report.oco_groups.push(OcoGroup {
                        group_id: group_id.clone(),
                        legs: vec![order.clone()],
                    }),
                }
            }
            None => report.standalone.push(order.clone()),
        }
    }

    report
}
