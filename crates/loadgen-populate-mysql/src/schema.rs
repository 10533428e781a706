//! Database and table setup.

use crate::args::MySQLConnection;
use crate::error::MySQLStoreError;
use crate::store::connection_opts;
use mysql_async::{prelude::*, Conn};
use tracing::info;

pub const CREATE_ACCOUNTS: &str = "CREATE TABLE IF NOT EXISTS accounts (
    a_uuid CHAR(36) PRIMARY KEY,
    a_username VARCHAR(64) NOT NULL,
    a_email VARCHAR(255) NOT NULL,
    a_password VARCHAR(128) NOT NULL,
    a_created_epoch BIGINT NOT NULL,
    a_last_login_epoch BIGINT NOT NULL,
    INDEX idx_accounts_email (a_email),
    INDEX idx_accounts_created (a_created_epoch)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4";

pub const CREATE_PRODUCTS: &str = "CREATE TABLE IF NOT EXISTS products (
    pr_uuid CHAR(36) PRIMARY KEY,
    pr_name VARCHAR(255) NOT NULL,
    pr_authors VARCHAR(512) NOT NULL,
    pr_price DECIMAL(10,2) NOT NULL,
    INDEX idx_products_price (pr_price)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4";

pub const CREATE_PAYMENTS: &str = "CREATE TABLE IF NOT EXISTS payments (
    p_md5 CHAR(32) PRIMARY KEY,
    p_amount DECIMAL(10,2) NOT NULL,
    p_epoch BIGINT NOT NULL,
    INDEX idx_payments_epoch (p_epoch)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4";

pub const CREATE_BUYING_STATS: &str = "CREATE TABLE IF NOT EXISTS buying_stats (
    bs_account_uuid CHAR(36) NOT NULL,
    bs_product_uuid CHAR(36) NOT NULL,
    bs_quantity INT NOT NULL,
    bs_total_amount DECIMAL(10,2) NOT NULL,
    bs_epoch BIGINT NOT NULL,
    INDEX idx_bs_epoch (bs_epoch),
    INDEX idx_bs_account (bs_account_uuid),
    INDEX idx_bs_product (bs_product_uuid),
    CONSTRAINT fk_bs_account FOREIGN KEY (bs_account_uuid) REFERENCES accounts(a_uuid) ON DELETE CASCADE,
    CONSTRAINT fk_bs_product FOREIGN KEY (bs_product_uuid) REFERENCES products(pr_uuid) ON DELETE CASCADE
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4";

/// Table DDL in creation order. `buying_stats` references the first two.
pub const CREATE_TABLES: [&str; 4] = [
    CREATE_ACCOUNTS,
    CREATE_PRODUCTS,
    CREATE_PAYMENTS,
    CREATE_BUYING_STATS,
];

/// Quote an identifier with backticks, doubling embedded backticks.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

pub fn create_database_sql(dbname: &str) -> String {
    format!("CREATE DATABASE IF NOT EXISTS {}", quote_identifier(dbname))
}

/// Create the database and the four tables if they are missing.
///
/// The database is created through a connection that has no database
/// selected, so it works against a fresh server.
pub async fn ensure_schema(conn: &MySQLConnection) -> Result<(), MySQLStoreError> {
    let mut admin = Conn::new(connection_opts(conn, None)).await?;
    admin.ping().await?;
    admin
        .query_drop(create_database_sql(&conn.dbname))
        .await
        .map_err(|source| MySQLStoreError::Schema {
            context: format!("create database {}", conn.dbname),
            source,
        })?;
    admin.disconnect().await?;

    let mut db = Conn::new(connection_opts(conn, Some(&conn.dbname))).await?;
    for ddl in CREATE_TABLES {
        db.query_drop(ddl)
            .await
            .map_err(|source| MySQLStoreError::Schema {
                context: "create tables".to_string(),
                source,
            })?;
    }
    db.disconnect().await?;

    info!("Schema ready in database '{}'", conn.dbname);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadgen_record::Table;

    #[test]
    fn test_create_database_is_quoted() {
        assert_eq!(
            create_database_sql("mytestdb"),
            "CREATE DATABASE IF NOT EXISTS `mytestdb`"
        );
        assert_eq!(
            create_database_sql("odd`name"),
            "CREATE DATABASE IF NOT EXISTS `odd``name`"
        );
    }

    #[test]
    fn test_tables_created_in_insert_order() {
        for (ddl, table) in CREATE_TABLES.iter().zip(Table::ALL) {
            assert!(
                ddl.starts_with(&format!("CREATE TABLE IF NOT EXISTS {} (", table.name())),
                "{ddl}"
            );
            assert!(ddl.ends_with("ENGINE=InnoDB DEFAULT CHARSET=utf8mb4"));
        }
    }

    #[test]
    fn test_buying_stats_cascade() {
        assert_eq!(CREATE_BUYING_STATS.matches("ON DELETE CASCADE").count(), 2);
        assert!(CREATE_BUYING_STATS.contains("REFERENCES accounts(a_uuid)"));
        assert!(CREATE_BUYING_STATS.contains("REFERENCES products(pr_uuid)"));
    }
}
