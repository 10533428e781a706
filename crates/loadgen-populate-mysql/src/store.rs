//! MySQL implementation of [`RecordStore`].

use crate::args::MySQLConnection;
use crate::error::MySQLStoreError;
use crate::insert::{insert_record, insert_sql};
use async_trait::async_trait;
use loadgen_populate::{RecordStore, StoreError, TableCounts};
use loadgen_record::{Record, Table};
use mysql_async::{prelude::*, OptsBuilder, Pool, PoolConstraints, PoolOpts};
use std::time::Duration;
use tracing::{debug, info};

/// Idle pooled connections are closed after this long.
const CONNECTION_TTL: Duration = Duration::from_secs(10 * 60);

/// Connection options, optionally selecting a database.
pub fn connection_opts(conn: &MySQLConnection, dbname: Option<&str>) -> OptsBuilder {
    OptsBuilder::default()
        .ip_or_hostname(conn.host.clone())
        .tcp_port(conn.port)
        .user(Some(conn.user.clone()))
        .pass(Some(conn.password.clone()))
        .db_name(dbname.map(str::to_string))
}

/// Pool options allowing up to `pool_size` connections.
pub fn pool_opts(pool_size: usize) -> PoolOpts {
    let size = pool_size.max(1);
    let constraints = PoolConstraints::new(size, size).unwrap_or_default();
    PoolOpts::default()
        .with_constraints(constraints)
        .with_inactive_connection_ttl(CONNECTION_TTL)
}

/// Writes records into the four tables through a shared connection pool.
pub struct MySQLRecordStore {
    pool: Pool,
}

impl MySQLRecordStore {
    /// Open the pool, check the server is reachable and that all INSERT
    /// statements prepare against the current schema.
    pub async fn connect(conn: &MySQLConnection, pool_size: usize) -> Result<Self, MySQLStoreError> {
        let opts = connection_opts(conn, Some(&conn.dbname)).pool_opts(pool_opts(pool_size));
        let pool = Pool::new(opts);

        let mut session = pool.get_conn().await?;
        session.ping().await?;
        for table in Table::ALL {
            session
                .prep(insert_sql(table))
                .await
                .map_err(|source| MySQLStoreError::Prepare { table, source })?;
        }
        drop(session);

        info!("Connected to {} (pool size {})", conn, pool_size);
        Ok(Self { pool })
    }

    /// Row count of each table.
    pub async fn table_counts(&self) -> Result<TableCounts, MySQLStoreError> {
        let mut conn = self.pool.get_conn().await?;
        let mut counts = TableCounts::default();
        for table in Table::ALL {
            let count: Option<u64> = conn
                .query_first(format!("SELECT COUNT(*) FROM {}", table.name()))
                .await?;
            counts.set(table, count.unwrap_or(0));
        }
        Ok(counts)
    }

    /// Close all pooled connections.
    pub async fn disconnect(self) -> Result<(), MySQLStoreError> {
        self.pool.disconnect().await?;
        debug!("MySQL pool disconnected");
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MySQLRecordStore {
    async fn insert_record(&self, record: &Record) -> Result<(), StoreError> {
        insert_record(&self.pool, record).await
    }
}
