use anyhow::{Result, anyhow};
use autoscale_cuckoo_filter::CuckooFilter;
use futures::StreamExt;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// Expected capacity and false-positive rate.
/// Tune these based on real headcount.
const FILTER_CAPACITY: usize = 100_000;
const FALSE_POSITIVE_RATE: f64 = 0.001;

static EMPLOYEE_FILTER: Lazy<RwLock<CuckooFilter<u64>>> =
    Lazy::new(|| RwLock::new(CuckooFilter::new(FILTER_CAPACITY, FALSE_POSITIVE_RATE)));

/// Negative lookups are only trustworthy after the warmup pass has loaded
/// every existing id.
static WARMED: AtomicBool = AtomicBool::new(false);

pub fn is_warmed() -> bool {
    WARMED.load(Ordering::Relaxed)
}

/// Check if an employee id might exist (false positives possible).
/// A negative answer is authoritative: check-in/check-out use it to reject
/// unknown ids without touching the database.
pub fn might_exist(employee_id: u64) -> bool {
    EMPLOYEE_FILTER
        .read()
        .expect("employee filter poisoned")
        .contains(&employee_id)
}

/// Insert a single employee id into the filter
pub fn insert(employee_id: u64) {
    EMPLOYEE_FILTER
        .write()
        .expect("employee filter poisoned")
        .add(&employee_id);
}

/// Remove an employee id from the filter
pub fn remove(employee_id: u64) {
    EMPLOYEE_FILTER
        .write()
        .expect("employee filter poisoned")
        .remove(&employee_id);
}

/// Warm up the employee filter using streaming + batching
pub async fn warmup_employee_filter(pool: &MySqlPool, batch_size: usize) -> Result<()> {
    let mut stream = sqlx::query_as::<_, (u64,)>("SELECT id FROM employee").fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total = 0usize;

    while let Some(row) = stream.next().await {
        let (id,) = row.map_err(|e| anyhow!("DB row fetch failed: {}", e))?;

        batch.push(id);
        total += 1;

        if batch.len() == batch_size {
            insert_batch(&batch);
            batch.clear();
        }
    }

    if !batch.is_empty() {
        insert_batch(&batch);
    }

    WARMED.store(true, Ordering::Relaxed);
    log::info!("Employee filter warmup complete: {} employees", total);
    Ok(())
}

/// Insert a batch of employee ids
fn insert_batch(ids: &[u64]) {
    let mut filter = EMPLOYEE_FILTER.write().expect("employee filter poisoned");

    for id in ids {
        filter.add(id);
    }
}
