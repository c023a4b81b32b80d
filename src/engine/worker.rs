use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use tokio::runtime::Builder;

use crate::data::MarketGateway;
use crate::domain::FetchRequest;
use crate::engine::channel::ResultSender;
use crate::engine::messages::{FetchFailure, FetchResult};
use crate::engine::operation::execute;
use crate::engine::poll::panic_message;

/// Spawns one short-lived worker thread for `request`. The worker writes exactly one
/// message, `wrap(result)`, to `sender` and exits.
pub fn spawn_fetch<T, F>(
    gateway: Arc<dyn MarketGateway>,
    request: FetchRequest,
    sender: ResultSender<T>,
    wrap: F,
) -> io::Result<()>
where
    T: Send + 'static,
    F: FnOnce(FetchResult) -> T + Send + 'static,
{
    let name = format!("fetch-{}", request.kind()).replace(' ', "-");
    thread::Builder::new().name(name).spawn(move || {
        let result = run_fetch_blocking(gateway.as_ref(), &request);
        sender.put(wrap(result));
    })?;
    Ok(())
}

/// Drives [`execute`] to completion on a private current-thread runtime.
///
/// A panic anywhere in the operation comes back as an `Unexpected` failure.
pub fn run_fetch_blocking(gateway: &dyn MarketGateway, request: &FetchRequest) -> FetchResult {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let rt = Builder::new_current_thread().enable_all().build()?;
        Ok::<_, io::Error>(rt.block_on(execute(gateway, request)))
    }));

    match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            log::error!("Failed to create runtime for {}: {}", request, e);
            FetchResult::Failure(FetchFailure::unexpected(format!(
                "Could not start the request: {}",
                e
            )))
        }
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            log::error!("Fetch panicked: {} -> {}", request, reason);
            FetchResult::Failure(FetchFailure::unexpected(format!(
                "Unexpected error: {}",
                reason
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use async_trait::async_trait;

    use super::*;
    use crate::data::mock::MockGateway;
    use crate::data::{MarketChartResponse, MarketCoin, SimplePriceResponse};
    use crate::domain::{HistoryParams, Payload, PriceParams, RankingParams};
    use crate::engine::messages::FailureCategory;
    use crate::engine::poll::{PollLoop, TickOutcome};
    use crate::error::FetchError;

    struct PanickingGateway;

    #[async_trait]
    impl MarketGateway for PanickingGateway {
        async fn simple_price(
            &self,
            _: &[String],
            _: &[String],
        ) -> Result<SimplePriceResponse, FetchError> {
            panic!("shaping blew up")
        }

        async fn coins_markets(&self, _: &RankingParams) -> Result<Vec<MarketCoin>, FetchError> {
            panic!("shaping blew up")
        }

        async fn market_chart(
            &self,
            _: &HistoryParams,
        ) -> Result<MarketChartResponse, FetchError> {
            panic!("shaping blew up")
        }
    }

    fn price(asset: &str) -> FetchRequest {
        FetchRequest::SinglePrice(PriceParams::parse(asset, "usd").unwrap())
    }

    /// Ticks `poll` until nothing is in flight, collecting what was applied.
    fn drain<T>(poll: &mut PollLoop<T>) -> Vec<T> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut applied = Vec::new();
        while poll.is_busy() && Instant::now() < deadline {
            poll.tick(|msg| {
                applied.push(msg);
                Ok(())
            });
            thread::sleep(Duration::from_millis(10));
        }
        applied
    }

    fn applied_asset(result: &FetchResult) -> &str {
        match result {
            FetchResult::Success(Payload::SinglePrice(q)) => &q.asset_id,
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn panic_in_operation_becomes_unexpected_failure() {
        let result = run_fetch_blocking(&PanickingGateway, &price("bitcoin"));
        let failure = result.failure().unwrap();
        assert_eq!(failure.category, FailureCategory::Unexpected);
        assert!(failure.message.contains("shaping blew up"));
    }

    #[test]
    fn duplicate_requests_apply_in_arrival_order() {
        let gw: Arc<dyn MarketGateway> = Arc::new(
            MockGateway::with_simple_price(r#"{"bitcoin":{"usd":1},"ethereum":{"usd":2}}"#)
                .delay_for("bitcoin", Duration::from_millis(300)),
        );
        let mut poll = PollLoop::new(Duration::from_millis(20));

        spawn_fetch(gw.clone(), price("bitcoin"), poll.dispatch(), |r| r).unwrap();
        spawn_fetch(gw, price("ethereum"), poll.dispatch(), |r| r).unwrap();
        assert!(poll.is_busy());

        let applied = drain(&mut poll);
        let order: Vec<_> = applied.iter().map(applied_asset).collect();
        // The slow first request lands last and is what the view ends up showing.
        assert_eq!(order, ["ethereum", "bitcoin"]);
        assert!(!poll.is_busy());
    }

    #[test]
    fn timeout_does_not_wedge_the_poll_loop() {
        let mut poll = PollLoop::new(Duration::from_millis(20));
        let timing_out: Arc<dyn MarketGateway> = Arc::new(MockGateway::failing(
            FetchError::Timeout(Duration::from_secs(10)),
        ));

        spawn_fetch(timing_out, price("bitcoin"), poll.dispatch(), |r| r).unwrap();
        let applied = drain(&mut poll);
        assert_eq!(applied.len(), 1);
        assert_eq!(
            applied[0].failure().map(|f| f.category),
            Some(FailureCategory::Timeout)
        );

        thread::sleep(Duration::from_millis(25));
        assert_eq!(poll.tick(|_| Ok(())), TickOutcome::Idle);

        let healthy: Arc<dyn MarketGateway> =
            Arc::new(MockGateway::with_simple_price(r#"{"bitcoin":{"usd":1}}"#));
        spawn_fetch(healthy, price("bitcoin"), poll.dispatch(), |r| r).unwrap();
        let applied = drain(&mut poll);
        assert_eq!(applied.len(), 1);
        assert!(applied[0].is_success());
    }
}
