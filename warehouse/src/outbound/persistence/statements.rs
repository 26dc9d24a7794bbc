//! SQL text for every warehouse statement, rendered from a table layout.

use crate::domain::Entity;

use super::table_layout::TableLayout;

/// Every statement a session issues, rendered once per connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Statements {
    pub(crate) insert_client: String,
    pub(crate) insert_product: String,
    pub(crate) insert_supplier: String,
    pub(crate) insert_transaction: String,
    count_clients: String,
    count_products: String,
    count_suppliers: String,
    count_transactions: String,
    pub(crate) total_revenue: String,
    pub(crate) transactions_per_product: String,
    pub(crate) revenue_per_client: String,
}

impl Statements {
    pub(crate) fn render(layout: &TableLayout) -> Self {
        let clients = layout.table(Entity::Client);
        let products = layout.table(Entity::Product);
        let suppliers = layout.table(Entity::Supplier);
        let transactions = layout.table(Entity::Transaction);

        // The casts pin each parameter's type so UUID, NUMERIC and BIGINT
        // values bind even when a column is declared as text or INTEGER.
        Self {
            insert_client: format!(
                "INSERT INTO {clients} (client_id, client_name, client_address) \
                 VALUES ($1::UUID, $2, $3)"
            ),
            insert_product: format!(
                "INSERT INTO {products} (product_id, name, description, price) \
                 VALUES ($1::UUID, $2, $3, $4::NUMERIC)"
            ),
            insert_supplier: format!(
                "INSERT INTO {suppliers} (supplier_id, name, address) \
                 VALUES ($1::UUID, $2, $3)"
            ),
            insert_transaction: format!(
                "INSERT INTO {transactions} (transaction_id, client_id, product_id, date, amount) \
                 VALUES ($1::UUID, $2::UUID, $3::UUID, $4::DATE, $5::BIGINT)"
            ),
            count_clients: format!("SELECT COUNT(*) FROM {clients}"),
            count_products: format!("SELECT COUNT(*) FROM {products}"),
            count_suppliers: format!("SELECT COUNT(*) FROM {suppliers}"),
            count_transactions: format!("SELECT COUNT(*) FROM {transactions}"),
            total_revenue: format!(
                "SELECT COALESCE(SUM(t.amount * p.price), 0)::NUMERIC \
                 FROM {transactions} t \
                 JOIN {products} p ON t.product_id = p.product_id \
                 JOIN {clients} c ON t.client_id = c.client_id"
            ),
            transactions_per_product: format!(
                "SELECT p.name AS product_name, COUNT(*) AS transaction_count \
                 FROM {transactions} t \
                 JOIN {products} p ON t.product_id = p.product_id \
                 GROUP BY p.name \
                 ORDER BY transaction_count DESC, p.name ASC"
            ),
            revenue_per_client: format!(
                "SELECT c.client_name AS client_name, \
                 SUM(t.amount * p.price)::NUMERIC AS total_revenue \
                 FROM {transactions} t \
                 JOIN {products} p ON t.product_id = p.product_id \
                 JOIN {clients} c ON t.client_id = c.client_id \
                 GROUP BY c.client_name \
                 ORDER BY total_revenue DESC, c.client_name ASC"
            ),
        }
    }

    /// `COUNT(*)` over the table holding `entity`.
    pub(crate) fn row_count(&self, entity: Entity) -> &str {
        match entity {
            Entity::Client => &self.count_clients,
            Entity::Product => &self.count_products,
            Entity::Supplier => &self.count_suppliers,
            Entity::Transaction => &self.count_transactions,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::outbound::persistence::Identifier;

    #[rstest]
    #[case(Entity::Client, "SELECT COUNT(*) FROM clients_schema.clients_table")]
    #[case(Entity::Product, "SELECT COUNT(*) FROM products_schema.products_table")]
    #[case(Entity::Supplier, "SELECT COUNT(*) FROM suppliers_schema.suppliers_table")]
    #[case(Entity::Transaction, "SELECT COUNT(*) FROM transactions_schema.transactions_table")]
    fn counts_target_one_table(#[case] entity: Entity, #[case] expected: &str) {
        let statements = Statements::render(&TableLayout::default());
        assert_eq!(statements.row_count(entity), expected);
    }

    #[test]
    fn revenue_joins_products_and_clients() {
        let statements = Statements::render(&TableLayout::default());
        let sql = &statements.total_revenue;

        assert!(sql.starts_with("SELECT COALESCE(SUM(t.amount * p.price), 0)"));
        assert!(sql.contains("JOIN products_schema.products_table p ON t.product_id = p.product_id"));
        assert!(sql.contains("JOIN clients_schema.clients_table c ON t.client_id = c.client_id"));
    }

    #[test]
    fn breakdowns_break_ties_by_name() {
        let statements = Statements::render(&TableLayout::default());

        assert!(
            statements
                .transactions_per_product
                .ends_with("ORDER BY transaction_count DESC, p.name ASC")
        );
        assert!(
            statements
                .revenue_per_client
                .ends_with("ORDER BY total_revenue DESC, c.client_name ASC")
        );
    }

    #[test]
    fn inserts_bind_every_value() {
        let statements = Statements::render(&TableLayout::default());

        for sql in [
            &statements.insert_client,
            &statements.insert_product,
            &statements.insert_supplier,
            &statements.insert_transaction,
        ] {
            assert!(sql.contains("VALUES ($1::UUID"), "{sql}");
            assert!(!sql.contains('\''), "{sql}");
        }
    }

    #[test]
    fn database_qualifier_prefixes_every_table() {
        let database = Identifier::new("analytics").expect("valid identifier");
        let statements = Statements::render(&TableLayout::standard(Some(database)));

        assert_eq!(
            statements.row_count(Entity::Supplier),
            "SELECT COUNT(*) FROM analytics.suppliers_schema.suppliers_table"
        );
        assert!(
            statements
                .insert_transaction
                .starts_with("INSERT INTO analytics.transactions_schema.transactions_table ")
        );
    }
}
