//! Faker-only mode: synthesize and log a few sample records without
//! connecting to the database.

use loadgen_populate::LoadConfig;
use loadgen_record::{Record, RecordGenerator};
use tracing::info;

/// Most samples printed in faker-only mode.
pub const MAX_SAMPLES: u64 = 10;

/// Generate `min(target, MAX_SAMPLES)` records and log each one.
pub fn run_faker_only(config: &LoadConfig) -> Vec<Record> {
    let limit = config.target.min(MAX_SAMPLES);
    let mut generator = RecordGenerator::for_worker(config.record, 0, config.seed);

    let samples: Vec<Record> = (0..limit).map(|_| generator.next_record()).collect();
    for (i, rec) in samples.iter().enumerate() {
        info!(
            "faker[{}]: acct={} email={} product={} price={} qty={} total={} payment={}",
            i,
            rec.account.uuid,
            rec.account.email,
            rec.product.uuid,
            rec.product.price,
            rec.buying_stat.quantity,
            rec.buying_stat.total_amount,
            rec.payment.token
        );
    }
    info!(
        "runOnlyFaker: generated {} sample records (set runOnlyFaker=false to load DB)",
        samples.len()
    );
    samples
}
