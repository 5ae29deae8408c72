//! Statistics Projector
//!
//! Folds one identity's raw list collection into year-bounded monthly
//! aggregates plus summary counters. The projection is a pure function;
//! the live projector re-runs it from scratch on every store change, so a
//! document that moves between years simply lands in its new bucket on the
//! next snapshot.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::domain::{DomainResult, ShoppingList, UserId, MONTHS_ES};
use crate::store::{ListStore, StoreEvent};

/// Aggregate of completed purchases for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub month: String,
    pub total: f64,
    pub count: u32,
}

/// Derived statistics view for one identity and one selected year
///
/// `monthly` always holds twelve entries, January to December, zero-filled
/// for months without purchases, so a chart gets a complete x-axis.
/// `active_lists` and `total_lists` count documents across all years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub year: i32,
    pub monthly: Vec<MonthlyStats>,
    pub total_spent: f64,
    pub total_purchases: u32,
    pub average_per_purchase: f64,
    pub current_month_spending: f64,
    pub current_month_purchases: u32,
    pub active_lists: u32,
    pub total_lists: u32,
    pub available_years: Vec<i32>,
}

/// Fold a full list collection into the statistics view
///
/// A document contributes to a month bucket only when it carries a total
/// cost; the shopping date picks the bucket and the active flag is
/// irrelevant to aggregation. `today` supplies the current-month figures
/// and guarantees its year appears in `available_years`.
pub fn project(lists: &[ShoppingList], year: i32, today: NaiveDate) -> StatsSnapshot {
    let mut monthly: Vec<MonthlyStats> = MONTHS_ES
        .iter()
        .map(|m| MonthlyStats {
            month: (*m).to_string(),
            total: 0.0,
            count: 0,
        })
        .collect();

    let mut years: Vec<i32> = Vec::new();
    let mut active_lists = 0u32;

    for list in lists {
        if list.active {
            active_lists += 1;
        }

        let cost = match list.total_cost {
            Some(cost) => cost,
            None => continue,
        };

        let list_year = list.shopping_date.year();
        if !years.contains(&list_year) {
            years.push(list_year);
        }
        if list_year == year {
            let bucket = &mut monthly[list.shopping_date.month0() as usize];
            bucket.total += cost;
            bucket.count += 1;
        }
    }

    if !years.contains(&today.year()) {
        years.push(today.year());
    }
    years.sort_unstable_by(|a, b| b.cmp(a));

    let total_spent: f64 = monthly.iter().map(|m| m.total).sum();
    let total_purchases: u32 = monthly.iter().map(|m| m.count).sum();
    let average_per_purchase = if total_purchases > 0 {
        total_spent / total_purchases as f64
    } else {
        0.0
    };

    let current = &monthly[today.month0() as usize];
    let (current_month_spending, current_month_purchases) = (current.total, current.count);

    StatsSnapshot {
        year,
        monthly,
        total_spent,
        total_purchases,
        average_per_purchase,
        current_month_spending,
        current_month_purchases,
        active_lists,
        total_lists: lists.len() as u32,
        available_years: years,
    }
}

/// Live statistics view over one identity's collection
///
/// Runs its own store subscription, independent of the list controller;
/// the two never share mutable state.
pub struct StatsProjector {
    view: Arc<watch::Sender<StatsSnapshot>>,
    year: watch::Sender<i32>,
    projector_task: JoinHandle<()>,
}

impl StatsProjector {
    /// Fetch the initial collection and start the projection task
    pub async fn spawn(
        store: Arc<dyn ListStore>,
        owner: UserId,
        year: i32,
    ) -> DomainResult<Self> {
        let changes = store.changes();
        let lists = store.fetch_for_owner(&owner).await?;

        let (year_tx, year_rx) = watch::channel(year);
        let (tx, _) = watch::channel(project(&lists, year, today()));
        let view = Arc::new(tx);
        let projector_task = tokio::spawn(projector_loop(
            store,
            owner,
            view.clone(),
            year_rx,
            changes,
            lists,
        ));

        Ok(Self {
            view,
            year: year_tx,
            projector_task,
        })
    }

    /// Read-only handle on the latest statistics snapshot
    pub fn stats(&self) -> watch::Receiver<StatsSnapshot> {
        self.view.subscribe()
    }

    /// Re-project the latest collection against another year
    pub fn set_year(&self, year: i32) {
        let _ = self.year.send(year);
    }
}

impl Drop for StatsProjector {
    fn drop(&mut self) {
        self.projector_task.abort();
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

async fn projector_loop(
    store: Arc<dyn ListStore>,
    owner: UserId,
    view: Arc<watch::Sender<StatsSnapshot>>,
    mut year: watch::Receiver<i32>,
    mut changes: broadcast::Receiver<StoreEvent>,
    mut lists: Vec<ShoppingList>,
) {
    loop {
        tokio::select! {
            changed = year.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            event = changes.recv() => {
                let relevant = match event {
                    Ok(event) => event.owner == owner,
                    Err(broadcast::error::RecvError::Lagged(_)) => true,
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                if !relevant {
                    continue;
                }
                match store.fetch_for_owner(&owner).await {
                    Ok(fresh) => lists = fresh,
                    // Last good figures stay in place on transport failure.
                    Err(e) => {
                        log::warn!("stats refresh failed for {}: {}", owner, e);
                        continue;
                    }
                }
            }
        }

        let selected = *year.borrow_and_update();
        let _ = view.send(project(&lists, selected, today()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ListPatch, MemoryListStore};
    use chrono::Utc;

    fn completed_list(owner: &str, date: &str, cost: f64) -> ShoppingList {
        let mut list = ShoppingList::new(
            UserId(owner.to_string()),
            "Compra".to_string(),
            "mercadona".to_string(),
            None,
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        );
        list.complete(cost, Utc::now());
        list
    }

    fn active_list(owner: &str, date: &str) -> ShoppingList {
        ShoppingList::new(
            UserId(owner.to_string()),
            "Pendiente".to_string(),
            "lidl".to_string(),
            None,
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        )
    }

    fn mid_year(year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, 6, 15).unwrap()
    }

    #[test]
    fn test_monthly_aggregation_buckets_by_shopping_month() {
        let lists = vec![
            completed_list("ana", "2025-01-10", 10.0),
            completed_list("ana", "2025-01-25", 20.0),
            completed_list("ana", "2025-03-02", 30.0),
            // Prior year, ignored by the monthly buckets
            completed_list("ana", "2024-01-05", 99.0),
        ];

        let stats = project(&lists, 2025, mid_year(2025));

        assert_eq!(stats.monthly.len(), 12);
        assert_eq!(stats.monthly[0].month, "enero");
        assert_eq!(stats.monthly[0].total, 30.0);
        assert_eq!(stats.monthly[0].count, 2);
        assert_eq!(stats.monthly[2].total, 30.0);
        assert_eq!(stats.monthly[2].count, 1);
        for (idx, bucket) in stats.monthly.iter().enumerate() {
            if idx != 0 && idx != 2 {
                assert_eq!(bucket.total, 0.0);
                assert_eq!(bucket.count, 0);
            }
        }

        assert_eq!(stats.total_spent, 60.0);
        assert_eq!(stats.total_purchases, 3);
        assert_eq!(stats.average_per_purchase, 20.0);
    }

    #[test]
    fn test_average_is_zero_without_purchases() {
        let lists = vec![active_list("ana", "2025-02-01")];
        let stats = project(&lists, 2025, mid_year(2025));

        assert_eq!(stats.total_purchases, 0);
        assert_eq!(stats.average_per_purchase, 0.0);
    }

    #[test]
    fn test_counters_span_all_years() {
        let lists = vec![
            active_list("ana", "2025-02-01"),
            completed_list("ana", "2024-12-30", 55.0),
            completed_list("ana", "2023-07-01", 12.0),
        ];
        let stats = project(&lists, 2025, mid_year(2025));

        assert_eq!(stats.active_lists, 1);
        assert_eq!(stats.total_lists, 3);
        // No bucketed purchases in 2025 itself
        assert_eq!(stats.total_purchases, 0);
    }

    #[test]
    fn test_lists_without_cost_never_bucket() {
        // Active but with a shopping date in the selected year
        let lists = vec![active_list("ana", "2025-04-10")];
        let stats = project(&lists, 2025, mid_year(2025));

        assert_eq!(stats.monthly[3].count, 0);
        assert_eq!(stats.available_years, vec![2025]);
    }

    #[test]
    fn test_available_years_sorted_descending_with_current() {
        let lists = vec![
            completed_list("ana", "2023-05-05", 5.0),
            completed_list("ana", "2026-01-01", 8.0),
        ];
        let stats = project(&lists, 2023, mid_year(2025));

        assert_eq!(stats.available_years, vec![2026, 2025, 2023]);
    }

    #[test]
    fn test_available_years_includes_current_when_empty() {
        let stats = project(&[], 2025, mid_year(2025));
        assert_eq!(stats.available_years, vec![2025]);
        assert_eq!(stats.total_lists, 0);
    }

    #[test]
    fn test_current_month_figures() {
        let lists = vec![
            completed_list("ana", "2025-06-02", 40.0),
            completed_list("ana", "2025-06-20", 10.0),
            completed_list("ana", "2025-05-01", 7.0),
        ];
        let stats = project(&lists, 2025, mid_year(2025));

        assert_eq!(stats.current_month_spending, 50.0);
        assert_eq!(stats.current_month_purchases, 2);
    }

    #[tokio::test]
    async fn test_projector_follows_store_changes() {
        let store = Arc::new(MemoryListStore::new());
        let owner = UserId("ana".to_string());
        let year = Utc::now().date_naive().year();

        let projector = StatsProjector::spawn(store.clone(), owner.clone(), year)
            .await
            .unwrap();
        let mut rx = projector.stats();
        assert_eq!(rx.borrow().total_lists, 0);

        let list = active_list("ana", &format!("{}-03-03", year));
        let id = store.create(&list).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().active_lists, 1);

        store
            .patch(&id, ListPatch::completed(25.0, Utc::now()))
            .await
            .unwrap();
        rx.changed().await.unwrap();
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.active_lists, 0);
        assert_eq!(snapshot.monthly[2].total, 25.0);
        assert_eq!(snapshot.total_purchases, 1);
    }

    #[tokio::test]
    async fn test_set_year_reprojects_latest_collection() {
        let store = Arc::new(MemoryListStore::new());
        let owner = UserId("ana".to_string());

        store
            .create(&completed_list("ana", "2024-02-10", 15.0))
            .await
            .unwrap();

        let projector = StatsProjector::spawn(store, owner, 2025).await.unwrap();
        let mut rx = projector.stats();
        assert_eq!(rx.borrow().total_purchases, 0);

        projector.set_year(2024);
        rx.changed().await.unwrap();
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.year, 2024);
        assert_eq!(snapshot.monthly[1].total, 15.0);
        assert_eq!(snapshot.total_purchases, 1);
    }
}
