//! Text rendering: a scalar line and two horizontal bar charts.

use std::io::Write;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::DashboardReport;

use super::{DashboardRenderer, RenderError};

/// Bar width used when none is configured.
pub const DEFAULT_BAR_WIDTH: usize = 40;

/// Labels longer than this are cut and end in `…`.
pub const MAX_LABEL_WIDTH: usize = 32;

const BAR: char = '█';
const ELLIPSIS: char = '…';
const NO_DATA: &str = "(no data)";

/// Renders the report as plain text.
///
/// ```text
/// Total Revenue: 20.00
///
/// Transactions per product
///   Widget  ████████████████████████████████████████ 1
///
/// Revenue per client
///   Ada  ████████████████████████████████████████ 20.00
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextDashboardRenderer {
    bar_width: usize,
}

impl TextDashboardRenderer {
    /// Renderer whose longest bar is `bar_width` blocks.
    #[must_use]
    pub const fn new(bar_width: usize) -> Self {
        Self { bar_width }
    }
}

impl Default for TextDashboardRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_BAR_WIDTH)
    }
}

struct ChartRow {
    label: String,
    value: Decimal,
    display: String,
}

impl DashboardRenderer for TextDashboardRenderer {
    fn render(&self, report: &DashboardReport, out: &mut dyn Write) -> Result<(), RenderError> {
        writeln!(out, "{}: {}", report.metric.kpi, report.metric.value)?;

        let per_product: Vec<ChartRow> = report
            .transactions_per_product
            .iter()
            .map(|row| ChartRow {
                label: row.product_name.clone(),
                value: Decimal::from(row.transaction_count),
                display: row.transaction_count.to_string(),
            })
            .collect();
        self.write_chart(out, "Transactions per product", &per_product)?;

        let per_client: Vec<ChartRow> = report
            .revenue_per_client
            .iter()
            .map(|row| ChartRow {
                label: row.client_name.clone(),
                value: row.total_revenue,
                display: row.total_revenue.to_string(),
            })
            .collect();
        self.write_chart(out, "Revenue per client", &per_client)
    }
}

impl TextDashboardRenderer {
    fn write_chart(
        &self,
        out: &mut dyn Write,
        title: &str,
        rows: &[ChartRow],
    ) -> Result<(), RenderError> {
        writeln!(out)?;
        writeln!(out, "{title}")?;
        if rows.is_empty() {
            writeln!(out, "  {NO_DATA}")?;
            return Ok(());
        }

        let labels: Vec<String> = rows.iter().map(|row| fit_label(&row.label)).collect();
        let label_width = labels
            .iter()
            .map(|label| label.chars().count())
            .max()
            .unwrap_or_default();
        let max = rows
            .iter()
            .map(|row| row.value)
            .max()
            .unwrap_or(Decimal::ZERO);

        for (row, label) in rows.iter().zip(&labels) {
            let bar: String = std::iter::repeat_n(BAR, bar_length(row.value, max, self.bar_width))
                .collect();
            writeln!(out, "  {label:<label_width$}  {bar} {}", row.display)?;
        }
        Ok(())
    }
}

fn fit_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_WIDTH {
        return label.to_owned();
    }
    let mut fitted: String = label.chars().take(MAX_LABEL_WIDTH.saturating_sub(1)).collect();
    fitted.push(ELLIPSIS);
    fitted
}

/// Blocks for `value` when `max` fills `width`. Positive values always get
/// at least one block; zero and negative values get none.
fn bar_length(value: Decimal, max: Decimal, width: usize) -> usize {
    if value <= Decimal::ZERO || max <= Decimal::ZERO {
        return 0;
    }
    let scaled = value
        .checked_mul(Decimal::from(width))
        .and_then(|product| product.checked_div(max))
        .map(|ratio| ratio.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_usize())
        .unwrap_or(width);
    scaled.clamp(1, width.max(1))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::{ClientRevenue, Kpi, KpiMetric, KpiValue, ProductTransactionCount};

    fn render(report: &DashboardReport, width: usize) -> String {
        let mut out = Vec::new();
        TextDashboardRenderer::new(width)
            .render(report, &mut out)
            .expect("render succeeds");
        String::from_utf8(out).expect("utf-8 output")
    }

    fn report(
        products: Vec<ProductTransactionCount>,
        clients: Vec<ClientRevenue>,
    ) -> DashboardReport {
        DashboardReport {
            metric: KpiMetric {
                kpi: Kpi::TotalTransactions,
                value: KpiValue::Count(4),
            },
            transactions_per_product: products,
            revenue_per_client: clients,
        }
    }

    fn product(name: &str, count: i64) -> ProductTransactionCount {
        ProductTransactionCount {
            product_name: name.to_owned(),
            transaction_count: count,
        }
    }

    #[rstest]
    #[case(Decimal::from(3), Decimal::from(3), 10, 10)]
    #[case(Decimal::from(1), Decimal::from(4), 10, 3)]
    #[case(Decimal::from(1), Decimal::from(1000), 10, 1)]
    #[case(Decimal::ZERO, Decimal::from(5), 10, 0)]
    #[case(Decimal::from(-2), Decimal::from(5), 10, 0)]
    #[case(Decimal::from(5), Decimal::ZERO, 10, 0)]
    #[case(Decimal::new(1000, 2), Decimal::new(2000, 2), 40, 20)]
    fn bars_scale_relative_to_maximum(
        #[case] value: Decimal,
        #[case] max: Decimal,
        #[case] width: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(bar_length(value, max, width), expected);
    }

    #[test]
    fn renders_scalar_and_both_charts() {
        let output = render(
            &report(
                vec![product("Gizmo", 3), product("Widget", 1)],
                vec![ClientRevenue {
                    client_name: "Ada".to_owned(),
                    total_revenue: Decimal::new(2000, 2),
                }],
            ),
            6,
        );

        let expected = "\
Total Transactions: 4

Transactions per product
  Gizmo   ██████ 3
  Widget  ██ 1

Revenue per client
  Ada  ██████ 20.00
";
        assert_eq!(output, expected);
    }

    #[test]
    fn empty_breakdowns_render_placeholder() {
        let output = render(&report(Vec::new(), Vec::new()), DEFAULT_BAR_WIDTH);

        assert_eq!(output.matches(NO_DATA).count(), 2);
        assert!(!output.contains(BAR));
    }

    #[test]
    fn long_labels_are_cut() {
        let long = "x".repeat(MAX_LABEL_WIDTH + 10);
        let fitted = fit_label(&long);

        assert_eq!(fitted.chars().count(), MAX_LABEL_WIDTH);
        assert!(fitted.ends_with(ELLIPSIS));
        assert_eq!(fit_label("short"), "short");
    }
}
