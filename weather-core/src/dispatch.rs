//! Runs the fetches of a refresh cycle and reports each completion back over
//! a channel.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    controller::{FetchOutcome, FetchResult, RefreshCycle},
    provider::WeatherProvider,
};

#[derive(Debug, Clone)]
pub struct Dispatcher {
    provider: Arc<dyn WeatherProvider>,
    tx: mpsc::UnboundedSender<FetchOutcome>,
}

impl Dispatcher {
    /// Returns the dispatcher and the receiving end that yields outcomes.
    pub fn new(provider: Arc<dyn WeatherProvider>) -> (Self, mpsc::UnboundedReceiver<FetchOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { provider, tx }, rx)
    }

    /// Spawn the current-weather and forecast fetches as two independent tasks.
    ///
    /// Must be called from within a tokio runtime. Nothing is cancelled: a
    /// task runs to completion even if a later cycle supersedes it.
    pub fn dispatch(&self, cycle: &RefreshCycle) {
        let id = cycle.id;

        let provider = Arc::clone(&self.provider);
        let request = cycle.request.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = provider.fetch_current(&request).await;
            send(&tx, FetchOutcome { cycle: id, result: FetchResult::Current(result) });
        });

        let provider = Arc::clone(&self.provider);
        let request = cycle.request.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = provider.fetch_forecast(&request).await;
            send(&tx, FetchOutcome { cycle: id, result: FetchResult::Forecast(result) });
        });
    }
}

fn send(tx: &mpsc::UnboundedSender<FetchOutcome>, outcome: FetchOutcome) {
    if tx.send(outcome).is_err() {
        tracing::debug!("outcome receiver dropped, discarding fetch result");
    }
}
