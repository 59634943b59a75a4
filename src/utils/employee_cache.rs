use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::time::Duration;

/// employee id -> display name ("first last").
/// Manager names and summary rows are resolved through this instead of
/// denormalizing names into other tables.
pub static EMPLOYEE_NAME_CACHE: Lazy<Cache<u64, String>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(100_000)
        .time_to_live(Duration::from_secs(86400)) // 24h TTL
        .build()
});

/// Record a single employee's display name
pub async fn cache_name(employee_id: u64, name: String) {
    EMPLOYEE_NAME_CACHE.insert(employee_id, name).await;
}

/// Drop a cached name after an update or delete
pub async fn invalidate(employee_id: u64) {
    EMPLOYEE_NAME_CACHE.invalidate(&employee_id).await;
}

/// Read-through lookup: cache first, then the employee table.
pub async fn display_name(pool: &MySqlPool, employee_id: u64) -> Option<String> {
    if let Some(name) = EMPLOYEE_NAME_CACHE.get(&employee_id).await {
        return Some(name);
    }

    let row = sqlx::query_as::<_, (String, String)>(
        "SELECT first_name, last_name FROM employee WHERE id = ?",
    )
    .bind(employee_id)
    .fetch_optional(pool)
    .await
    .ok()??;

    let name = format!("{} {}", row.0, row.1);
    EMPLOYEE_NAME_CACHE.insert(employee_id, name.clone()).await;
    Some(name)
}

/// Batch insert display names
async fn batch_cache(entries: &[(u64, String)]) {
    let futures: Vec<_> = entries
        .iter()
        .map(|(id, name)| EMPLOYEE_NAME_CACHE.insert(*id, name.clone()))
        .collect();

    // Await all insertions concurrently
    futures::future::join_all(futures).await;
}

/// Load all employee names into the in-memory cache (batched)
pub async fn warmup_employee_cache(pool: &MySqlPool, batch_size: usize) -> Result<()> {
    let mut stream = sqlx::query_as::<_, (u64, String, String)>(
        r#"
        SELECT id, first_name, last_name
        FROM employee
        ORDER BY id
        "#,
    )
    .fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total_count = 0usize;

    while let Some(row) = stream.next().await {
        let (id, first_name, last_name) = row?;
        batch.push((id, format!("{} {}", first_name, last_name)));
        total_count += 1;

        if batch.len() >= batch_size {
            batch_cache(&batch).await;
            batch.clear();
        }
    }

    // Insert any remaining names
    if !batch.is_empty() {
        batch_cache(&batch).await;
    }

    log::info!("Employee name cache warmup complete: {} employees", total_count);

    Ok(())
}
