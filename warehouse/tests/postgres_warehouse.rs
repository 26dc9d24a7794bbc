//! Round trip through a live `PostgreSQL` warehouse.
//!
//! Runs only when `WAREHOUSE_TEST_DATABASE_URL` points at a disposable
//! database; the test drops and recreates the warehouse schemas there.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::env;
use std::sync::Arc;

use postgres::{Client, NoTls};
use rust_decimal::Decimal;
use synthetic_data::{DatasetPlan, generate_dataset};
use warehouse::domain::{Kpi, KpiDashboard, KpiValue, WarehouseSeeder};
use warehouse::outbound::persistence::{PostgresWarehouse, TableLayout};

const DATABASE_URL_VAR: &str = "WAREHOUSE_TEST_DATABASE_URL";

const SCHEMA_DDL: &str = "
    DROP SCHEMA IF EXISTS clients_schema CASCADE;
    DROP SCHEMA IF EXISTS products_schema CASCADE;
    DROP SCHEMA IF EXISTS suppliers_schema CASCADE;
    DROP SCHEMA IF EXISTS transactions_schema CASCADE;
    CREATE SCHEMA clients_schema;
    CREATE SCHEMA products_schema;
    CREATE SCHEMA suppliers_schema;
    CREATE SCHEMA transactions_schema;
    CREATE TABLE clients_schema.clients_table (
        client_id UUID PRIMARY KEY,
        client_name TEXT NOT NULL,
        client_address TEXT NOT NULL
    );
    CREATE TABLE products_schema.products_table (
        product_id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        price NUMERIC(10, 2) NOT NULL
    );
    CREATE TABLE suppliers_schema.suppliers_table (
        supplier_id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        address TEXT NOT NULL
    );
    CREATE TABLE transactions_schema.transactions_table (
        transaction_id UUID PRIMARY KEY,
        client_id UUID NOT NULL,
        product_id UUID NOT NULL,
        date DATE NOT NULL,
        amount BIGINT NOT NULL
    );
";

fn count_of(dashboard: &KpiDashboard<PostgresWarehouse>, kpi: Kpi) -> KpiValue {
    dashboard.report(kpi).expect("dashboard runs").metric.value
}

#[test]
fn seeded_rows_are_visible_to_the_dashboard() {
    let Ok(url) = env::var(DATABASE_URL_VAR) else {
        return;
    };
    let mut admin = Client::connect(&url, NoTls).expect("connect for setup");
    admin.batch_execute(SCHEMA_DDL).expect("create warehouse schemas");

    let plan = DatasetPlan::new(7, 3, 2);
    let connector = Arc::new(PostgresWarehouse::new(url, TableLayout::default()));
    let outcome = WarehouseSeeder::new(Arc::clone(&connector))
        .seed_plan(&plan)
        .expect("seeding runs");
    assert!(outcome.references_are_consistent());

    let dashboard = KpiDashboard::new(connector);
    assert_eq!(count_of(&dashboard, Kpi::TotalClients), KpiValue::Count(3));
    assert_eq!(count_of(&dashboard, Kpi::TotalProducts), KpiValue::Count(3));
    assert_eq!(count_of(&dashboard, Kpi::TotalSuppliers), KpiValue::Count(2));
    assert_eq!(count_of(&dashboard, Kpi::TotalTransactions), KpiValue::Count(3));

    let dataset = generate_dataset(&plan).expect("generation succeeds");
    let expected_revenue: Decimal = dataset
        .transactions
        .iter()
        .zip(&dataset.products)
        .map(|(transaction, product)| Decimal::from(transaction.amount) * product.price)
        .sum();
    let report = dashboard.report(Kpi::TotalRevenue).expect("revenue runs");
    assert_eq!(report.metric.value, KpiValue::Amount(expected_revenue));

    let charted: Decimal = report
        .revenue_per_client
        .iter()
        .map(|bar| bar.total_revenue)
        .sum();
    assert_eq!(charted, expected_revenue);
    let counted: i64 = report
        .transactions_per_product
        .iter()
        .map(|bar| bar.transaction_count)
        .sum();
    assert_eq!(counted, 3);
}
