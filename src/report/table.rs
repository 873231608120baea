//! Terminal table rendering.

use chrono::{DateTime, Local};
use tabled::{Table, Tabled, settings::Style};

use crate::Decimal;
use crate::persistence::Order;

use super::{OcoGroup, OrderReport};

const PLACEHOLDER: &str = "-";

/// Formats a millisecond timestamp as local `YYYY-MM-DD HH:MM:SS`.
#[must_use]
pub fn format_timestamp(timestamp_ms: u64) -> String {
    i64::try_from(timestamp_ms)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| {
            dt.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| "Invalid Time".to_string())
}

fn price_cell(price: Option<Decimal>) -> String {
    price.map_or_else(|| PLACEHOLDER.to_string(), |p| p.normalize().to_string())
}

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Side")]
    side: String,
    #[tabled(rename = "Type")]
    order_type: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stop Price")]
    stop_price: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Time")]
    time: String,
}

impl OrderRow {
    fn new(index: usize, order: &Order) -> Self {
        Self {
            index,
            symbol: order.symbol.clone(),
            side: order.side.to_string(),
            order_type: order.order_type.to_string(),
            quantity: order.quantity.normalize().to_string(),
            price: price_cell(order.price),
            stop_price: price_cell(order.stop_price),
            status: order.status.to_string(),
            time: format_timestamp(order.timestamp),
        }
    }
}

/// One OCO leg as table cells, or placeholders when the leg is missing.
struct LegCells {
    side: String,
    order_type: String,
    price: String,
    stop_price: String,
    quantity: String,
    status: String,
    time: String,
}

impl LegCells {
    fn new(leg: Option<&Order>) -> Self {
        match leg {
            Some(o) => Self {
                side: o.side.to_string(),
                order_type: o.order_type.to_string(),
                price: price_cell(o.price),
                stop_price: price_cell(o.stop_price),
                quantity: o.quantity.normalize().to_string(),
                status: o.status.to_string(),
                time: format_timestamp(o.timestamp),
            },
            None => Self {
                side: PLACEHOLDER.to_string(),
                order_type: PLACEHOLDER.to_string(),
                price: PLACEHOLDER.to_string(),
                stop_price: PLACEHOLDER.to_string(),
                quantity: PLACEHOLDER.to_string(),
                status: PLACEHOLDER.to_string(),
                time: PLACEHOLDER.to_string(),
            },
        }
    }
}

#[derive(Tabled)]
struct OcoRow {
    #[tabled(rename = "OCO Group ID")]
    group_id: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Side 1")]
    side_1: String,
    #[tabled(rename = "Type 1")]
    type_1: String,
    #[tabled(rename = "Price 1")]
    price_1: String,
    #[tabled(rename = "Stop Price 1")]
    stop_price_1: String,
    #[tabled(rename = "Qty 1")]
    qty_1: String,
    #[tabled(rename = "Status 1")]
    status_1: String,
    #[tabled(rename = "Time 1")]
    time_1: String,
    #[tabled(rename = "Side 2")]
    side_2: String,
    #[tabled(rename = "Type 2")]
    type_2: String,
    #[tabled(rename = "Price 2")]
    price_2: String,
    #[tabled(rename = "Stop Price 2")]
    stop_price_2: String,
    #[tabled(rename = "Qty 2")]
    qty_2: String,
    #[tabled(rename = "Status 2")]
    status_2: String,
    #[tabled(rename = "Time 2")]
    time_2: String,
}

impl OcoRow {
    fn new(group: &OcoGroup) -> Self {
        let first = LegCells::new(group.leg(0));
        let second = LegCells::new(group.leg(1));
        Self {
            group_id: group.group_id.to_string(),
            symbol: group.symbol().unwrap_or(PLACEHOLDER).to_string(),
            side_1: first.side,
            type_1: first.order_type,
            price_1: first.price,
            stop_price_1: first.stop_price,
            qty_1: first.quantity,
            status_1: first.status,
            time_1: first.time,
            side_2: second.side,
            type_2: second.order_type,
            price_2: second.price,
            stop_price_2: second.stop_price,
            qty_2: second.quantity,
            status_2: second.status,
            time_2: second.time,
        }
    }
}

fn titled<T: Tabled>(title: &str, rows: Vec<T>) -> String {
    let table = Table::new(rows).with(Style::rounded()).to_string();
    format!("{title}\n{table}\n")
}

/// Renders standalone orders, numbered from 1 in log order.
#[must_use]
pub fn render_orders_table(orders: &[Order]) -> String {
    let rows: Vec<OrderRow> = orders
        .iter()
        .enumerate()
        .map(|(idx, order)| OrderRow::new(idx + 1, order))
        .collect();
    titled("Orders", rows)
}

/// Renders OCO groups, one row per group with both legs side by side.
///
/// Missing legs are shown as placeholders.
#[must_use]
pub fn render_oco_table(groups: &[OcoGroup]) -> String {
    let rows: Vec<OcoRow> = groups.iter().map(OcoRow::new).collect();
    titled("OCO Orders Grouped", rows)
}

/// Renders the full report: standalone orders, then OCO groups.
#[must_use]
pub fn render_report(report: &OrderReport) -> String {
    let mut out = String::new();
    if !report.standalone.is_empty() {
        out.push_str("\nStandalone Orders:\n");
        out.push_str(&render_orders_table(&report.standalone));
    }
    if !report.oco_groups.is_empty() {
        out.push_str("\nOCO Order Groups:\n");
        out.push_str(&render_oco_table(&report.oco_groups));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dec;
    use crate::execution::{OrderKind, Side, VenueOrder};
    use crate::persistence::OcoGroupId;
    use crate::report::group_orders;

    fn sample() -> Vec<Order> {
        let group = OcoGroupId::new("grp-1");
        vec![
            Order::filled(
                VenueOrder::new(
                    "BTCUSDT",
                    Side::Buy,
                    dec!(1.50),
                    OrderKind::Limit { price: dec!(65000) },
                ),
                100_000,
                1_718_000_000_000,
            ),
            Order::filled(
                VenueOrder::new(
                    "ETHUSDT",
                    Side::Sell,
                    dec!(2),
                    OrderKind::Limit { price: dec!(3500) },
                )
                .with_oco_group(group),
                100_001,
                1_718_000_001_000,
            ),
        ]
    }

    #[test]
    fn test_orders_table_rows() {
        let rendered = render_orders_table(&sample()[..1]);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Orders");
        let header = lines.iter().find(|l| l.contains("Symbol")).unwrap();
        assert!(header.contains("Stop Price"));
        assert!(header.contains("Status"));

        let row = lines.iter().find(|l| l.contains("BTCUSDT")).unwrap();
        assert!(row.contains("1.5 "));
        assert!(row.contains("65000"));
        assert!(row.contains("FILLED"));
        assert_eq!(lines.iter().filter(|l| l.contains("USDT")).count(), 1);
    }

    #[test]
    fn test_oco_table_placeholders_for_missing_leg() {
        let report = group_orders(&sample());
        let rendered = render_oco_table(&report.oco_groups);

        assert!(rendered.starts_with("OCO Orders Grouped\n"));
        assert!(rendered.contains("Stop Price 2"));
        let row = rendered.lines().find(|l| l.contains("grp-1")).unwrap();
        assert!(row.contains("ETHUSDT"));
        assert!(row.contains("LIMIT"));
        assert!(row.matches(" - ").count() >= 7);
    }

    #[test]
    fn test_render_report_sections() {
        let report = group_orders(&sample());
        let rendered = render_report(&report);

        assert!(rendered.contains("Standalone Orders:"));
        assert!(rendered.contains("OCO Order Groups:"));
        assert!(render_report(&OrderReport::default()).is_empty());
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(1_718_000_000_000).len(), 19);
        assert_eq!(format_timestamp(u64::MAX), "Invalid Time");
    }
}
