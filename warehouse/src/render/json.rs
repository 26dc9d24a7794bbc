//! JSON rendering.

use std::io::Write;

use crate::domain::DashboardReport;

use super::{DashboardRenderer, RenderError};

/// Writes the report as pretty-printed camelCase JSON followed by a newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDashboardRenderer;

impl DashboardRenderer for JsonDashboardRenderer {
    fn render(&self, report: &DashboardReport, out: &mut dyn Write) -> Result<(), RenderError> {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{ClientRevenue, Kpi, KpiMetric, KpiValue, ProductTransactionCount};

    #[test]
    fn writes_camel_case_document() {
        let report = DashboardReport {
            metric: KpiMetric {
                kpi: Kpi::TotalRevenue,
                value: KpiValue::Amount(Decimal::new(2000, 2)),
            },
            transactions_per_product: vec![ProductTransactionCount {
                product_name: "Widget".to_owned(),
                transaction_count: 1,
            }],
            revenue_per_client: vec![ClientRevenue {
                client_name: "Ada".to_owned(),
                total_revenue: Decimal::new(2000, 2),
            }],
        };
        let mut out = Vec::new();

        JsonDashboardRenderer
            .render(&report, &mut out)
            .expect("render succeeds");

        let parsed: Value = serde_json::from_slice(&out).expect("valid json");
        assert_eq!(
            parsed,
            json!({
                "metric": {"kpi": "Total Revenue", "value": "20.00"},
                "transactionsPerProduct": [{"productName": "Widget", "transactionCount": 1}],
                "revenuePerClient": [{"clientName": "Ada", "totalRevenue": "20.00"}]
            })
        );
        assert_eq!(out.last(), Some(&b'\n'));
    }
}
