// ============================================================================
// Feed Session : un générateur branché sur une tâche périodique
// ============================================================================
// CONCEPT RUST : Ownership comme machine à états
// - FeedSession::start() crée la session (état "running")
// - FeedSession::stop(self) consomme la session : impossible de l'arrêter
//   deux fois ou de la réutiliser après l'arrêt, le compilateur l'interdit
// ============================================================================

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::Local;
use rand::rngs::StdRng;
use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::feed::generator::PriceGenerator;
use crate::feed::task::PeriodicTask;
use crate::feed::view::{lock_view, Renderer, SharedView};

/// Session de flux simulé pour un symbole
#[derive(Debug)]
pub struct FeedSession {
    symbol: String,
    generator: Arc<Mutex<PriceGenerator<StdRng>>>,
    task: PeriodicTask,
}

impl FeedSession {
    /// Démarre une session : tire le prix initial et planifie les ticks
    ///
    /// Chaque tick génère une Quote et la transmet aussitôt à la vue.
    /// La vue n'est pas vidée ici (c'est le rôle du contrôleur).
    pub fn start(
        symbol: String,
        rng: StdRng,
        period: Duration,
        view: SharedView,
        runtime: &Handle,
    ) -> Self {
        let generator = Arc::new(Mutex::new(PriceGenerator::new(symbol.clone(), rng)));
        let task_generator = Arc::clone(&generator);

        let initial_price = lock_generator(&generator).current_price();
        info!(symbol = %symbol, initial_price, period_ms = period.as_millis() as u64, "Feed session started");

        let task = PeriodicTask::spawn(runtime, period, move || {
            // Verrou du générateur relâché avant de prendre celui de la vue
            let quote = lock_generator(&task_generator).tick(Local::now());
            debug!(symbol = %quote.symbol, price = quote.price, change = quote.change, "Tick");
            lock_view(&view).on_quote(&quote);
        });

        Self {
            symbol,
            generator,
            task,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Prix courant du générateur (dernier prix émis, ou prix initial)
    pub fn current_price(&self) -> f64 {
        lock_generator(&self.generator).current_price()
    }

    pub fn period(&self) -> Duration {
        self.task.period()
    }

    /// Arrête la session ; aucun tick ne sera émis après le retour
    pub fn stop(self) {
        let last_price = self.current_price();
        self.task.cancel();
        info!(symbol = %self.symbol, last_price, "Feed session stopped");
    }
}

fn lock_generator(
    generator: &Mutex<PriceGenerator<StdRng>>,
) -> std::sync::MutexGuard<'_, PriceGenerator<StdRng>> {
    generator.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::view::FeedView;
    use rand::SeedableRng;

    #[tokio::test(start_paused = true)]
    async fn test_three_ticks_then_stop() {
        let view = FeedView::shared(20);
        let session = FeedSession::start(
            "AAPL".to_string(),
            StdRng::seed_from_u64(3),
            Duration::from_millis(1500),
            Arc::clone(&view),
            &Handle::current(),
        );

        tokio::time::sleep(Duration::from_millis(4600)).await;
        session.stop();
        tokio::time::sleep(Duration::from_secs(5)).await;

        let view = lock_view(&view);
        assert_eq!(view.rendered_count(), 3);
        assert_eq!(view.ticker_len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_uses_initial_price() {
        let view = FeedView::shared(20);
        let session = FeedSession::start(
            "IBM".to_string(),
            StdRng::seed_from_u64(11),
            Duration::from_millis(1500),
            Arc::clone(&view),
            &Handle::current(),
        );
        let initial = session.current_price();
        assert!((100.0..120.0).contains(&initial));

        tokio::time::sleep(Duration::from_millis(1600)).await;

        let first = lock_view(&view).snapshot().cloned().unwrap();
        assert!((first.price - first.change - initial).abs() < 1e-9);
        assert_eq!(session.current_price(), first.price);
        assert_eq!(first.symbol, "IBM");

        session.stop();
    }
}
