// ============================================================================
// Feed Renderer : ticker défilant + snapshot
// ============================================================================
// Consomme chaque Quote émise et met à jour les deux surfaces d'affichage
//
// CONCEPTS RUST :
// 1. Trait Renderer : capacité "on_quote" indépendante de l'affichage
//    - FeedView l'implémente en mémoire
//    - L'UI ratatui ne fait que lire FeedView
//    - Les tests du générateur / contrôleur n'ont besoin d'aucun terminal
//
// 2. VecDeque : file FIFO
//    - push_back() : ajoute à la fin (le plus récent)
//    - pop_front() : retire le plus ancien
// ============================================================================

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::models::Quote;

/// Nombre d'entrées conservées dans le ticker par défaut
pub const DEFAULT_TICKER_CAPACITY: usize = 20;

/// Capacité de rendu : reçoit chaque cotation émise, de manière synchrone
pub trait Renderer {
    /// Appelé pour chaque Quote, dans l'ordre d'émission
    fn on_quote(&mut self, quote: &Quote);

    /// Vide les surfaces (au démarrage d'une nouvelle session)
    fn clear(&mut self);
}

/// Vue partagée entre la tâche du flux (écriture) et l'UI (lecture)
pub type SharedView = Arc<Mutex<FeedView>>;

/// Verrouille une vue partagée en ignorant l'empoisonnement
///
/// Un panic pendant un rendu laisse une vue cohérente
/// (chaque on_quote est un push + un remplacement), on peut continuer à la lire
pub fn lock_view(view: &SharedView) -> MutexGuard<'_, FeedView> {
    view.lock().unwrap_or_else(PoisonError::into_inner)
}

/// État d'affichage : ticker borné + dernière cotation
#[derive(Debug, Clone)]
pub struct FeedView {
    /// Cotations récentes, de la plus ancienne à la plus récente
    ticker: VecDeque<Quote>,

    /// Nombre maximum d'entrées dans le ticker
    capacity: usize,

    /// Dernière cotation reçue
    snapshot: Option<Quote>,

    /// Nombre de cotations reçues depuis le dernier clear()
    rendered: usize,
}

impl FeedView {
    /// Crée une vue vide avec la capacité donnée (au moins 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            ticker: VecDeque::with_capacity(capacity + 1),
            capacity,
            snapshot: None,
            rendered: 0,
        }
    }

    /// Enveloppe la vue dans un Arc<Mutex<>> pour la partager
    pub fn shared(capacity: usize) -> SharedView {
        Arc::new(Mutex::new(Self::new(capacity)))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Itère sur le ticker, du plus ancien au plus récent
    pub fn ticker(&self) -> impl DoubleEndedIterator<Item = &Quote> + ExactSizeIterator {
        self.ticker.iter()
    }

    pub fn ticker_len(&self) -> usize {
        self.ticker.len()
    }

    /// Dernière cotation (None avant le premier tick)
    pub fn snapshot(&self) -> Option<&Quote> {
        self.snapshot.as_ref()
    }

    pub fn rendered_count(&self) -> usize {
        self.rendered
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_none()
    }
}

impl Default for FeedView {
    fn default() -> Self {
        Self::new(DEFAULT_TICKER_CAPACITY)
    }
}

impl Renderer for FeedView {
    fn on_quote(&mut self, quote: &Quote) {
        self.ticker.push_back(quote.clone());

        // File stricte : on évince l'entrée la plus ancienne
        if self.ticker.len() > self.capacity {
            self.ticker.pop_front();
        }

        self.snapshot = Some(quote.clone());
        self.rendered += 1;
    }

    fn clear(&mut self) {
        self.ticker.clear();
        self.snapshot = None;
        self.rendered = 0;
    }
}
