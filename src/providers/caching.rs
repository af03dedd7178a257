use crate::core::currency::{Currency, CurrencyRateProvider};
use rust_decimal::Decimal;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, Copy)]
struct CachedRate {
    rate: Decimal,
    fetched_at: Instant,
}

/// Source-to-home conversion rate with a time-bounded cache.
///
/// Any provider failure degrades to the fallback rate. Only rates that were
/// actually fetched are cached, so a failed lookup is retried on the next call.
pub struct RateService {
    inner: Box<dyn CurrencyRateProvider>,
    ttl: Duration,
    fallback: Decimal,
    cached: Mutex<Option<CachedRate>>,
}

impl RateService {
    pub fn new(inner: Box<dyn CurrencyRateProvider>, ttl: Duration, fallback: Decimal) -> Self {
        Self {
            inner,
            ttl,
            fallback,
            cached: Mutex::new(None),
        }
    }

    pub fn fallback(&self) -> Decimal {
        self.fallback
    }

    pub async fn get_rate(&self) -> Decimal {
        let mut cached = self.cached.lock().await;
        if let Some(entry) = *cached {
            if entry.fetched_at.elapsed() < self.ttl {
                debug!("Cache HIT for rate");
                return entry.rate;
            }
            debug!("Cached rate expired");
        } else {
            debug!("Cache MISS for rate");
        }

        match self.inner.get_rate(Currency::SOURCE, Currency::HOME).await {
            Ok(rate) => {
                *cached = Some(CachedRate {
                    rate,
                    fetched_at: Instant::now(),
                });
                rate
            }
            Err(e) => {
                warn!(error = %e, fallback = %self.fallback, "Rate fetch failed, using fallback");
                self.fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockInnerProvider {
        call_count: Arc<AtomicUsize>,
        rate: Option<Decimal>,
    }

    #[async_trait]
    impl CurrencyRateProvider for MockInnerProvider {
        async fn get_rate(&self, from: Currency, to: Currency) -> Result<Decimal> {
            assert_eq!((from, to), (Currency::Jpy, Currency::Twd));
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.rate.ok_or_else(|| anyhow!("network unreachable"))
        }
    }

    fn make_service(rate: Option<Decimal>, ttl: Duration) -> (RateService, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let inner = MockInnerProvider {
            call_count: Arc::clone(&calls),
            rate,
        };
        (
            RateService::new(Box::new(inner), ttl, Decimal::new(21, 2)),
            calls,
        )
    }

    #[tokio::test]
    async fn test_rate_is_cached_within_ttl() {
        let (service, calls) = make_service(Some(Decimal::new(2085, 4)), DEFAULT_TTL);

        assert_eq!(service.get_rate().await, Decimal::new(2085, 4));
        assert_eq!(service.get_rate().await, Decimal::new(2085, 4));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rate_is_refetched_after_ttl() {
        let (service, calls) = make_service(Some(Decimal::new(2085, 4)), Duration::from_millis(10));

        service.get_rate().await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        service.get_rate().await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failure_falls_back_without_caching() {
        let (service, calls) = make_service(None, DEFAULT_TTL);

        assert_eq!(service.get_rate().await, Decimal::new(21, 2));
        assert_eq!(service.get_rate().await, service.fallback());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
