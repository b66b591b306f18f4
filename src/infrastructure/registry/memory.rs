//! In-memory implementation of the link registry.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde_json::json;

use crate::domain::entities::{Click, Link, NewClick, NewLink};
use crate::domain::repositories::{
    DetailedStats, LinkRepository, LinkStats, Resolution, StatsFilter, StatsRepository,
};
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;

/// Collision-retry budget per generated code.
const MAX_CODE_ATTEMPTS: usize = 10;

/// A stored link together with its append-only click log.
///
/// The click count exposed on [`Link`] is always `clicks.len()`, so the
/// count and the log cannot drift apart.
struct LinkRecord {
    code: String,
    long_url: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    clicks: Vec<Click>,
}

impl LinkRecord {
    fn to_link(&self) -> Link {
        Link::new(
            self.code.clone(),
            self.long_url.clone(),
            self.created_at,
            self.expires_at,
            self.clicks.len() as u64,
        )
    }
}

#[derive(Default)]
struct RegistryInner {
    /// Records in creation order. Links are never removed.
    records: Vec<LinkRecord>,
    /// Short code to position in `records`.
    index: HashMap<String, usize>,
}

/// The in-memory link registry.
///
/// All state lives behind a single `RwLock`; batch insertion and resolution
/// each run inside one critical section, so check-then-insert and
/// check-then-record cannot race with concurrent calls. Nothing here blocks
/// or suspends while the lock is held.
///
/// The registry lives for the lifetime of the process; there is no eviction
/// and no persistence.
pub struct MemoryRegistry {
    inner: RwLock<RegistryInner>,
    generator: Arc<dyn CodeGenerator>,
}

impl MemoryRegistry {
    /// Creates an empty registry using the given code generation strategy.
    pub fn new(generator: Arc<dyn CodeGenerator>) -> Self {
        Self {
            inner: RwLock::new(RegistryInner::default()),
            generator,
        }
    }

    /// Picks a generated code that collides with neither the registry nor
    /// the codes already claimed by the current batch.
    fn next_free_code(
        &self,
        inner: &RegistryInner,
        claimed: &HashSet<String>,
    ) -> Result<String, AppError> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let candidate = self.generator.generate();
            if !inner.index.contains_key(&candidate) && !claimed.contains(&candidate) {
                return Ok(candidate);
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions", "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }
}

#[async_trait]
impl LinkRepository for MemoryRegistry {
    async fn insert_batch(&self, batch: Vec<NewLink>) -> Result<Vec<Link>, AppError> {
        let mut inner = self.inner.write();

        // Claim user-supplied codes first. A conflict with the registry or
        // within the batch rejects the whole batch before anything mutates.
        let mut claimed: HashSet<String> = HashSet::new();
        for draft in &batch {
            if let Some(code) = &draft.code {
                if inner.index.contains_key(code) || claimed.contains(code) {
                    return Err(AppError::conflict(
                        "Custom code already exists",
                        json!({ "code": code }),
                    ));
                }
                claimed.insert(code.clone());
            }
        }

        // Fill in generated codes against the claimed set so two entries of
        // the same batch cannot end up with the same code.
        let mut codes = Vec::with_capacity(batch.len());
        for draft in &batch {
            let code = match &draft.code {
                Some(code) => code.clone(),
                None => {
                    let code = self.next_free_code(&inner, &claimed)?;
                    claimed.insert(code.clone());
                    code
                }
            };
            codes.push(code);
        }

        let mut created = Vec::with_capacity(batch.len());
        for (draft, code) in batch.into_iter().zip(codes) {
            let record = LinkRecord {
                code: code.clone(),
                long_url: draft.long_url,
                created_at: draft.created_at,
                expires_at: draft.expires_at,
                clicks: Vec::new(),
            };
            created.push(record.to_link());
            let position = inner.records.len();
            inner.records.push(record);
            inner.index.insert(code, position);
        }

        Ok(created)
    }

    async fn resolve(
        &self,
        code: &str,
        now: DateTime<Utc>,
        click: NewClick,
    ) -> Result<Resolution, AppError> {
        let mut inner = self.inner.write();

        let Some(&position) = inner.index.get(code) else {
            return Ok(Resolution::NotFound);
        };
        let record = &mut inner.records[position];

        if now > record.expires_at {
            return Ok(Resolution::Expired);
        }

        record
            .clicks
            .push(Click::new(now, click.source(), click.user_agent));

        Ok(Resolution::Redirect(record.to_link()))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let inner = self.inner.read();
        Ok(inner
            .index
            .get(code)
            .map(|&position| inner.records[position].to_link()))
    }

    async fn list(&self) -> Result<Vec<Link>, AppError> {
        let inner = self.inner.read();
        Ok(inner.records.iter().map(LinkRecord::to_link).collect())
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.inner.read().records.len() as u64)
    }
}

/// Returns the clicks inside the filter's date range, in append order.
fn clicks_in_range<'a>(
    clicks: &'a [Click],
    from_date: Option<DateTime<Utc>>,
    to_date: Option<DateTime<Utc>>,
) -> impl Iterator<Item = &'a Click> {
    clicks.iter().filter(move |click| {
        from_date.is_none_or(|from| click.clicked_at >= from)
            && to_date.is_none_or(|to| click.clicked_at <= to)
    })
}

#[async_trait]
impl StatsRepository for MemoryRegistry {
    async fn get_stats_by_code(
        &self,
        code: &str,
        filter: StatsFilter,
    ) -> Result<Option<DetailedStats>, AppError> {
        let inner = self.inner.read();

        let Some(&position) = inner.index.get(code) else {
            return Ok(None);
        };
        let record = &inner.records[position];

        let items: Vec<Click> = clicks_in_range(&record.clicks, filter.from_date, filter.to_date)
            .skip(filter.offset)
            .take(filter.limit)
            .cloned()
            .collect();

        Ok(Some(DetailedStats {
            link: record.to_link(),
            total: record.clicks.len() as u64,
            items,
        }))
    }

    async fn get_all_stats(&self, filter: StatsFilter) -> Result<Vec<LinkStats>, AppError> {
        let inner = self.inner.read();

        Ok(inner
            .records
            .iter()
            .skip(filter.offset)
            .take(filter.limit)
            .map(|record| LinkStats {
                code: record.code.clone(),
                long_url: record.long_url.clone(),
                created_at: record.created_at,
                expires_at: record.expires_at,
                total: clicks_in_range(&record.clicks, filter.from_date, filter.to_date).count()
                    as u64,
            })
            .collect())
    }

    async fn count_all_links(&self) -> Result<u64, AppError> {
        Ok(self.inner.read().records.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::code_generator::RandomCodeGenerator;
    use chrono::Duration;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays a fixed sequence of codes, for collision-retry tests.
    struct SequenceGenerator {
        codes: Mutex<VecDeque<String>>,
    }

    impl SequenceGenerator {
        fn new(codes: &[&str]) -> Self {
            Self {
                codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
            }
        }
    }

    impl CodeGenerator for SequenceGenerator {
        fn generate(&self) -> String {
            self.codes
                .lock()
                .unwrap()
                .pop_front()
                .expect("sequence exhausted")
        }
    }

    fn registry() -> MemoryRegistry {
        MemoryRegistry::new(Arc::new(RandomCodeGenerator::default()))
    }

    fn draft(code: Option<&str>, url: &str, validity_minutes: u32) -> NewLink {
        NewLink::with_validity(
            code.map(|c| c.to_string()),
            url.to_string(),
            Utc::now(),
            validity_minutes,
        )
    }

    #[tokio::test]
    async fn test_insert_batch_returns_links_in_request_order() {
        let registry = registry();

        let links = registry
            .insert_batch(vec![
                draft(Some("first1"), "https://example.com/1", 30),
                draft(None, "https://example.com/2", 30),
                draft(Some("third3"), "https://example.com/3", 30),
            ])
            .await
            .unwrap();

        assert_eq!(links.len(), 3);
        assert_eq!(links[0].code, "first1");
        assert_eq!(links[1].long_url, "https://example.com/2");
        assert_eq!(links[2].code, "third3");
        assert_eq!(registry.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_insert_batch_custom_code_conflict_with_registry() {
        let registry = registry();

        registry
            .insert_batch(vec![draft(Some("taken1"), "https://first.com", 30)])
            .await
            .unwrap();

        let err = registry
            .insert_batch(vec![
                draft(None, "https://ok.com", 30),
                draft(Some("taken1"), "https://second.com", 30),
            ])
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert!(err.to_string().contains("already exists"));
        // All-or-nothing: the valid entry was not inserted either.
        assert_eq!(registry.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_batch_custom_code_conflict_within_batch() {
        let registry = registry();

        let err = registry
            .insert_batch(vec![
                draft(Some("dupe12"), "https://a.com", 30),
                draft(Some("dupe12"), "https://b.com", 30),
            ])
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(registry.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_generated_code_retries_on_collision() {
        // "seen00" is taken; the generator must be asked again.
        let registry = MemoryRegistry::new(Arc::new(SequenceGenerator::new(&[
            "seen00", "seen00", "fresh0",
        ])));

        registry
            .insert_batch(vec![draft(Some("seen00"), "https://first.com", 30)])
            .await
            .unwrap();

        let links = registry
            .insert_batch(vec![draft(None, "https://second.com", 30)])
            .await
            .unwrap();

        assert_eq!(links[0].code, "fresh0");
    }

    #[tokio::test]
    async fn test_generated_code_avoids_batch_custom_codes() {
        // The generator first proposes a code that a later batch entry
        // claims as its custom code.
        let registry = MemoryRegistry::new(Arc::new(SequenceGenerator::new(&["mine99", "other1"])));

        let links = registry
            .insert_batch(vec![
                draft(None, "https://generated.com", 30),
                draft(Some("mine99"), "https://custom.com", 30),
            ])
            .await
            .unwrap();

        assert_eq!(links[0].code, "other1");
        assert_eq!(links[1].code, "mine99");
    }

    #[tokio::test]
    async fn test_generated_code_gives_up_after_retry_budget() {
        let codes = vec!["stuck0"; MAX_CODE_ATTEMPTS + 1];
        let registry = MemoryRegistry::new(Arc::new(SequenceGenerator::new(&codes)));

        registry
            .insert_batch(vec![draft(Some("stuck0"), "https://first.com", 30)])
            .await
            .unwrap();

        let err = registry
            .insert_batch(vec![draft(None, "https://second.com", 30)])
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(registry.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_resolve_unknown_code() {
        let registry = registry();

        let resolution = registry
            .resolve("nosuch", Utc::now(), NewClick::new(None, None))
            .await
            .unwrap();

        assert_eq!(resolution, Resolution::NotFound);
    }

    #[tokio::test]
    async fn test_resolve_live_link_records_click() {
        let registry = registry();
        registry
            .insert_batch(vec![draft(Some("live01"), "https://example.com", 30)])
            .await
            .unwrap();

        let resolution = registry
            .resolve(
                "live01",
                Utc::now(),
                NewClick::new(Some("https://google.com"), Some("TestBot/1.0")),
            )
            .await
            .unwrap();

        match resolution {
            Resolution::Redirect(link) => {
                assert_eq!(link.long_url, "https://example.com");
                assert_eq!(link.click_count, 1);
            }
            other => panic!("expected redirect, got {:?}", other),
        }

        let stats = registry
            .get_stats_by_code("live01", StatsFilter::new(0, 10))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.items[0].source, "https://google.com");
        assert_eq!(stats.items[0].user_agent.as_deref(), Some("TestBot/1.0"));
    }

    #[tokio::test]
    async fn test_resolve_counts_every_repeat_click() {
        let registry = registry();
        registry
            .insert_batch(vec![draft(Some("again1"), "https://example.com", 30)])
            .await
            .unwrap();

        for _ in 0..3 {
            registry
                .resolve("again1", Utc::now(), NewClick::new(None, None))
                .await
                .unwrap();
        }

        let link = registry.find_by_code("again1").await.unwrap().unwrap();
        assert_eq!(link.click_count, 3);
    }

    #[tokio::test]
    async fn test_resolve_expired_link_records_nothing() {
        let registry = registry();
        let created_at = Utc::now() - Duration::minutes(2);
        registry
            .insert_batch(vec![NewLink::with_validity(
                Some("old001".to_string()),
                "https://example.com".to_string(),
                created_at,
                1,
            )])
            .await
            .unwrap();

        let resolution = registry
            .resolve("old001", Utc::now(), NewClick::new(None, None))
            .await
            .unwrap();

        assert_eq!(resolution, Resolution::Expired);

        let link = registry.find_by_code("old001").await.unwrap().unwrap();
        assert_eq!(link.click_count, 0);
        let stats = registry
            .get_stats_by_code("old001", StatsFilter::new(0, 10))
            .await
            .unwrap()
            .unwrap();
        assert!(stats.items.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_exactly_at_expiry_is_live() {
        let registry = registry();
        let created_at = Utc::now();
        registry
            .insert_batch(vec![NewLink::with_validity(
                Some("edge01".to_string()),
                "https://example.com".to_string(),
                created_at,
                1,
            )])
            .await
            .unwrap();

        let at_expiry = created_at + Duration::minutes(1);
        let resolution = registry
            .resolve("edge01", at_expiry, NewClick::new(None, None))
            .await
            .unwrap();
        assert!(matches!(resolution, Resolution::Redirect(_)));

        let past_expiry = at_expiry + Duration::milliseconds(1);
        let resolution = registry
            .resolve("edge01", past_expiry, NewClick::new(None, None))
            .await
            .unwrap();
        assert_eq!(resolution, Resolution::Expired);
    }

    #[tokio::test]
    async fn test_resolve_is_case_sensitive() {
        let registry = registry();
        registry
            .insert_batch(vec![draft(Some("CaSe01"), "https://example.com", 30)])
            .await
            .unwrap();

        let resolution = registry
            .resolve("case01", Utc::now(), NewClick::new(None, None))
            .await
            .unwrap();
        assert_eq!(resolution, Resolution::NotFound);
    }

    #[tokio::test]
    async fn test_list_preserves_creation_order_and_keeps_expired() {
        let registry = registry();
        registry
            .insert_batch(vec![NewLink::with_validity(
                Some("dead01".to_string()),
                "https://expired.com".to_string(),
                Utc::now() - Duration::minutes(10),
                1,
            )])
            .await
            .unwrap();
        registry
            .insert_batch(vec![draft(Some("live02"), "https://live.com", 30)])
            .await
            .unwrap();

        let links = registry.list().await.unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].code, "dead01");
        assert_eq!(links[1].code, "live02");
    }

    #[tokio::test]
    async fn test_get_all_stats_pagination() {
        let registry = registry();
        registry
            .insert_batch(vec![
                draft(Some("page01"), "https://a.com", 30),
                draft(Some("page02"), "https://b.com", 30),
                draft(Some("page03"), "https://c.com", 30),
            ])
            .await
            .unwrap();

        let page = registry
            .get_all_stats(StatsFilter::new(1, 1))
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].code, "page02");
        assert_eq!(registry.count_all_links().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_detailed_stats_date_filter() {
        let registry = registry();
        registry
            .insert_batch(vec![draft(Some("dated1"), "https://example.com", 60)])
            .await
            .unwrap();

        let early = Utc::now();
        registry
            .resolve("dated1", early, NewClick::new(None, None))
            .await
            .unwrap();
        let late = early + Duration::minutes(5);
        registry
            .resolve("dated1", late, NewClick::new(None, None))
            .await
            .unwrap();

        let filter = StatsFilter::new(0, 10)
            .with_date_range(Some(early + Duration::minutes(1)), None);
        let stats = registry
            .get_stats_by_code("dated1", filter)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(stats.total, 2);
        assert_eq!(stats.items.len(), 1);
        assert_eq!(stats.items[0].clicked_at, late);
    }
}
