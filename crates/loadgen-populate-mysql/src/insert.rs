//! Transactional INSERT logic for one record.

use crate::error::{classify_commit, classify_connection, classify_write};
use loadgen_populate::StoreError;
use loadgen_record::{Record, Table, TableRow};
use mysql_async::{prelude::*, Conn, Params, Pool, TxOpts, Value};
use tracing::debug;

pub const INSERT_ACCOUNT: &str = "INSERT INTO accounts \
     (a_uuid, a_username, a_email, a_password, a_created_epoch, a_last_login_epoch) \
     VALUES (?, ?, ?, ?, ?, ?)";

pub const INSERT_PRODUCT: &str = "INSERT INTO products \
     (pr_uuid, pr_name, pr_authors, pr_price) \
     VALUES (?, ?, ?, ?)";

pub const INSERT_PAYMENT: &str = "INSERT INTO payments \
     (p_md5, p_amount, p_epoch) \
     VALUES (?, ?, ?)";

pub const INSERT_BUYING_STAT: &str = "INSERT INTO buying_stats \
     (bs_account_uuid, bs_product_uuid, bs_quantity, bs_total_amount, bs_epoch) \
     VALUES (?, ?, ?, ?, ?)";

/// INSERT statement for `table`.
pub fn insert_sql(table: Table) -> &'static str {
    match table {
        Table::Accounts => INSERT_ACCOUNT,
        Table::Products => INSERT_PRODUCT,
        Table::Payments => INSERT_PAYMENT,
        Table::BuyingStats => INSERT_BUYING_STAT,
    }
}

/// Positional parameters for one row, in column order.
///
/// Decimals are bound as strings so the server parses them exactly.
pub fn row_params(row: TableRow<'_>) -> Params {
    let values: Vec<Value> = match row {
        TableRow::Account(a) => vec![
            a.uuid.to_string().into(),
            a.username.as_str().into(),
            a.email.as_str().into(),
            a.password.as_str().into(),
            a.created_epoch.into(),
            a.last_login_epoch.into(),
        ],
        TableRow::Product(p) => vec![
            p.uuid.to_string().into(),
            p.name.as_str().into(),
            p.authors.as_str().into(),
            p.price.to_string().into(),
        ],
        TableRow::Payment(p) => vec![
            p.token.as_str().into(),
            p.amount.to_string().into(),
            p.epoch.into(),
        ],
        TableRow::BuyingStat(bs) => vec![
            bs.account_uuid.to_string().into(),
            bs.product_uuid.to_string().into(),
            bs.quantity.into(),
            bs.total_amount.to_string().into(),
            bs.epoch.into(),
        ],
    };
    Params::Positional(values)
}

/// Write the four rows of `record` in one transaction.
///
/// Any failed INSERT rolls the transaction back and is returned classified,
/// so a duplicate key leaves no partial rows behind.
pub async fn insert_record(pool: &Pool, record: &Record) -> Result<(), StoreError> {
    let mut conn = pool.get_conn().await.map_err(classify_connection)?;
    insert_record_on(&mut conn, record).await
}

/// Same as [`insert_record`] on an already checked-out connection.
pub async fn insert_record_on(conn: &mut Conn, record: &Record) -> Result<(), StoreError> {
    let mut tx = conn
        .start_transaction(TxOpts::default())
        .await
        .map_err(classify_connection)?;

    for row in record.rows() {
        let table = row.table();
        if let Err(e) = tx.exec_drop(insert_sql(table), row_params(row)).await {
            let err = classify_write(table, e);
            if let Err(rollback) = tx.rollback().await {
                debug!("rollback after failed insert into {} failed: {}", table, rollback);
            }
            return Err(err);
        }
    }

    tx.commit().await.map_err(classify_commit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadgen_record::{RecordConfig, RecordGenerator};

    fn positional(params: Params) -> Vec<Value> {
        match params {
            Params::Positional(values) => values,
            other => panic!("expected positional params, got {other:?}"),
        }
    }

    #[test]
    fn test_placeholder_count_matches_params() {
        let record = RecordGenerator::from_seed(RecordConfig::default(), 3).next_record();
        for row in record.rows() {
            let sql = insert_sql(row.table());
            let placeholders = sql.matches('?').count();
            assert_eq!(placeholders, positional(row_params(row)).len(), "{sql}");
        }
    }

    #[test]
    fn test_insert_targets_table() {
        for table in Table::ALL {
            assert!(insert_sql(table).starts_with(&format!("INSERT INTO {} ", table.name())));
        }
    }

    #[test]
    fn test_payment_params() {
        let record = RecordGenerator::from_seed(RecordConfig::default(), 9).next_record();
        let values = positional(row_params(TableRow::Payment(&record.payment)));

        assert_eq!(values[0], Value::from(record.payment.token.as_str()));
        assert_eq!(values[1], Value::from(record.payment.amount.to_string()));
        assert_eq!(values[2], Value::from(record.payment.epoch));
    }
}
