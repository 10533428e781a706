//! Record generator producing one self-consistent [`Record`] per call.

use crate::generators::numeric::{generate_int_range, generate_price, round2};
use crate::generators::text;
use crate::generators::timestamp::{generate_epoch_after, generate_epoch_ago};
use crate::generators::token::generate_payment_token;
use crate::generators::uuid::generate_uuid_v4;
use crate::record::{Account, BuyingStat, Payment, Product, Record};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

/// Lowest product price.
pub const PRICE_MIN: f64 = 1.0;
/// Highest product price.
pub const PRICE_MAX: f64 = 250.0;
/// Lowest purchased quantity.
pub const QUANTITY_MIN: i64 = 1;
/// Highest purchased quantity.
pub const QUANTITY_MAX: i64 = 6;
/// Payments and purchases happen within this many seconds before now.
pub const ACTIVITY_WINDOW_SECS: i64 = 30 * 24 * 60 * 60;

/// Time ranges used when generating accounts.
///
/// All values are seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordConfig {
    /// Youngest account age.
    pub min_created_ago: i64,
    /// Oldest account age.
    pub max_created_ago: i64,
    /// Largest gap between account creation and last login.
    pub max_last_login_delay: i64,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            min_created_ago: 3 * 24 * 60 * 60,
            max_created_ago: 365 * 24 * 60 * 60,
            max_last_login_delay: 500,
        }
    }
}

/// Generate a record using the current wall clock as "now".
pub fn generate<R: Rng>(rng: &mut R, config: &RecordConfig) -> Record {
    generate_at(rng, config, Utc::now().timestamp())
}

/// Generate a record relative to the given Unix timestamp.
pub fn generate_at<R: Rng>(rng: &mut R, config: &RecordConfig, now: i64) -> Record {
    let created_epoch = generate_epoch_ago(
        rng,
        now,
        config.min_created_ago,
        config.max_created_ago,
    );
    let last_login_epoch = generate_epoch_after(rng, created_epoch, config.max_last_login_delay);

    let price = generate_price(rng, PRICE_MIN, PRICE_MAX);
    let quantity = generate_int_range(rng, QUANTITY_MIN, QUANTITY_MAX) as u32;
    let total = round2(price * Decimal::from(quantity));

    let account = Account {
        uuid: generate_uuid_v4(rng),
        username: text::generate_username(rng),
        email: text::generate_email(rng),
        password: text::generate_password(rng),
        created_epoch,
        last_login_epoch,
    };

    let product = Product {
        uuid: generate_uuid_v4(rng),
        name: text::generate_word(rng),
        authors: text::generate_authors(rng),
        price,
    };

    let payment = Payment {
        token: generate_payment_token(rng),
        amount: total,
        epoch: generate_epoch_ago(rng, now, 0, ACTIVITY_WINDOW_SECS),
    };

    let buying_stat = BuyingStat {
        account_uuid: account.uuid,
        product_uuid: product.uuid,
        quantity,
        total_amount: total,
        epoch: generate_epoch_ago(rng, now, 0, ACTIVITY_WINDOW_SECS),
    };

    Record {
        account,
        product,
        payment,
        buying_stat,
    }
}

/// Generator owning its own random source.
///
/// Each worker holds one so that no two workers draw from the same stream.
pub struct RecordGenerator {
    config: RecordConfig,
    rng: StdRng,
}

impl RecordGenerator {
    /// Create a generator with a fixed seed, for reproducible output.
    pub fn from_seed(config: RecordConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a generator for the given worker.
    ///
    /// The seed is `base_seed` (or the wall clock in nanoseconds when unset)
    /// offset by the worker index, so workers never share a stream.
    pub fn for_worker(config: RecordConfig, worker_id: usize, base_seed: Option<u64>) -> Self {
        let base = base_seed
            .unwrap_or_else(|| Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64);
        Self::from_seed(config, worker_seed(base, worker_id))
    }

    /// Generate the next record.
    pub fn next_record(&mut self) -> Record {
        generate(&mut self.rng, &self.config)
    }

    /// Generate the next record relative to a fixed "now".
    pub fn next_record_at(&mut self, now: i64) -> Record {
        generate_at(&mut self.rng, &self.config, now)
    }
}

fn worker_seed(base: u64, worker_id: usize) -> u64 {
    base.wrapping_add((worker_id as u64).wrapping_mul(1000))
}
