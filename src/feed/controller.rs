// ============================================================================
// Session Controller : bascule {stopped, running}
// ============================================================================
// Garantit qu'une seule session existe à la fois
//
// CONCEPT RUST : Option<FeedSession> comme état
// - None : arrêté
// - Some(session) : en cours
// - take() sort la session de l'Option pour la consommer (stop(self))
// ============================================================================

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::runtime::Handle;
use tracing::debug;

use crate::config::FeedConfig;
use crate::feed::session::FeedSession;
use crate::feed::view::{lock_view, Renderer, SharedView};
use crate::models::normalize_symbol;

/// Contrôleur du flux : démarre et arrête l'unique session
#[derive(Debug)]
pub struct FeedController {
    config: FeedConfig,
    view: SharedView,
    runtime: Handle,
    session: Option<FeedSession>,
}

impl FeedController {
    pub fn new(config: FeedConfig, view: SharedView, runtime: Handle) -> Self {
        Self {
            config,
            view,
            runtime,
            session: None,
        }
    }

    /// Démarre une session à partir de la saisie utilisateur
    ///
    /// Retourne false (sans rien faire) si une session tourne déjà.
    pub fn start(&mut self, input: &str) -> bool {
        self.start_with_rng(input, StdRng::from_os_rng())
    }

    /// Variante de start() avec un RNG fourni (graine fixe en test)
    pub fn start_with_rng(&mut self, input: &str, rng: StdRng) -> bool {
        if self.session.is_some() {
            debug!("Start ignored: a session is already running");
            return false;
        }

        lock_view(&self.view).clear();

        let symbol = normalize_symbol(input);
        self.session = Some(FeedSession::start(
            symbol,
            rng,
            self.config.period,
            self.view.clone(),
            &self.runtime,
        ));
        true
    }

    /// Arrête la session en cours
    ///
    /// Retourne false (sans rien faire) si aucune session ne tourne.
    pub fn stop(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                session.stop();
                true
            }
            None => {
                debug!("Stop ignored: no session running");
                false
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// Symbole de la session en cours
    pub fn symbol(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.symbol())
    }

    pub fn current_price(&self) -> Option<f64> {
        self.session.as_ref().map(|s| s.current_price())
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn view(&self) -> &SharedView {
        &self.view
    }
}

impl Drop for FeedController {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::view::FeedView;
    use crate::models::Quote;
    use chrono::Local;
    use std::time::Duration;

    fn controller() -> FeedController {
        let config = FeedConfig::default();
        let view = FeedView::shared(config.capacity);
        FeedController::new(config, view, Handle::current())
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_twice_keeps_one_session() {
        let mut controller = controller();

        assert!(controller.start_with_rng("aapl", StdRng::seed_from_u64(1)));
        let price = controller.current_price();
        assert!(!controller.start_with_rng("tsla", StdRng::seed_from_u64(2)));

        assert!(controller.is_running());
        assert_eq!(controller.symbol(), Some("AAPL"));
        assert_eq!(controller.current_price(), price);

        // Une seule session : un seul quote par période
        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert_eq!(lock_view(controller.view()).rendered_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_twice_is_noop() {
        let mut controller = controller();
        assert!(!controller.stop());

        controller.start("");
        assert!(controller.stop());
        assert!(!controller.stop());
        assert!(!controller.is_running());
        assert_eq!(controller.symbol(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input_uses_default_symbol() {
        let mut controller = controller();
        controller.start("   ");
        assert_eq!(controller.symbol(), Some("IBM"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_clears_previous_view() {
        let mut controller = controller();
        lock_view(controller.view()).on_quote(&Quote::new(
            "OLD".to_string(),
            50.0,
            0.0,
            Local::now(),
        ));

        controller.start(" aapl ");

        let view = lock_view(controller.view());
        assert!(view.is_empty());
        assert_eq!(view.ticker_len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_wait_stop_wait() {
        let mut controller = controller();
        controller.start("msft");

        tokio::time::sleep(Duration::from_millis(4600)).await;
        controller.stop();
        tokio::time::sleep(Duration::from_secs(5)).await;

        let view = lock_view(controller.view());
        assert_eq!(view.rendered_count(), 3);
        assert_eq!(view.snapshot().map(|q| q.symbol.as_str()), Some("MSFT"));
    }
}
