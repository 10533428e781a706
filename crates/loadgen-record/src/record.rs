//! Entities produced by the generator and the tables they land in.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// A user account. Stored in `accounts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub uuid: Uuid,
    pub username: String,
    pub email: String,
    pub password: String,
    /// Unix seconds.
    pub created_epoch: i64,
    /// Unix seconds, never earlier than `created_epoch`.
    pub last_login_epoch: i64,
}

/// A product. Stored in `products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub uuid: Uuid,
    pub name: String,
    /// Author names joined with `", "`.
    pub authors: String,
    /// Two decimal places.
    pub price: Decimal,
}

/// A standalone payment. Stored in `payments`, keyed by `token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payment {
    /// 32 lowercase hex characters.
    pub token: String,
    pub amount: Decimal,
    pub epoch: i64,
}

/// One purchase of `quantity` units of a product by an account.
/// Stored in `buying_stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuyingStat {
    pub account_uuid: Uuid,
    pub product_uuid: Uuid,
    pub quantity: u32,
    pub total_amount: Decimal,
    pub epoch: i64,
}

/// The unit of work: four rows that are written in one transaction or not
/// at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub account: Account,
    pub product: Product,
    pub payment: Payment,
    pub buying_stat: BuyingStat,
}

impl Record {
    /// Rows in insertion order.
    ///
    /// `buying_stats` comes last because its foreign keys must point at the
    /// account and product written earlier in the same transaction.
    pub fn rows(&self) -> [TableRow<'_>; 4] {
        [
            TableRow::Account(&self.account),
            TableRow::Product(&self.product),
            TableRow::Payment(&self.payment),
            TableRow::BuyingStat(&self.buying_stat),
        ]
    }
}

/// Target tables, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Accounts,
    Products,
    Payments,
    BuyingStats,
}

impl Table {
    pub const ALL: [Table; 4] = [
        Table::Accounts,
        Table::Products,
        Table::Payments,
        Table::BuyingStats,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Table::Accounts => "accounts",
            Table::Products => "products",
            Table::Payments => "payments",
            Table::BuyingStats => "buying_stats",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A borrowed view of one row of a [`Record`].
#[derive(Debug, Clone, Copy)]
pub enum TableRow<'a> {
    Account(&'a Account),
    Product(&'a Product),
    Payment(&'a Payment),
    BuyingStat(&'a BuyingStat),
}

impl TableRow<'_> {
    pub fn table(&self) -> Table {
        match self {
            TableRow::Account(_) => Table::Accounts,
            TableRow::Product(_) => Table::Products,
            TableRow::Payment(_) => Table::Payments,
            TableRow::BuyingStat(_) => Table::BuyingStats,
        }
    }
}
