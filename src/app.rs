// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Encapsulation : l'accès au flux passe par le FeedController
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// - La vue du flux (ticker + snapshot) est partagée avec la tâche
//   périodique via SharedView ; App ne la verrouille que le temps d'un rendu
// ============================================================================

use tracing::info;

use crate::feed::{lock_view, FeedController, FeedView, SharedView};
use crate::models::normalize_symbol;

/// Longueur maximale du champ symbole
pub const MAX_SYMBOL_LEN: usize = 12;

// ============================================================================
// Enum : Screen
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Vue principale : contrôles, ticker, snapshot
    Dashboard,

    /// Mode saisie : édition du champ symbole
    /// - Capture les touches pour construire le buffer
    /// - Enter valide, ESC annule
    InputMode,
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Indique si l'utilisateur a demandé à quitter (attend confirmation)
    /// - Première pression de 'q' : confirm_quit = true
    /// - Deuxième pression de 'q' : running = false (quit réel)
    /// - N'importe quelle autre touche : confirm_quit = false (annulation)
    pub confirm_quit: bool,

    /// Contenu du champ symbole (texte libre, normalisé au démarrage)
    pub symbol_input: String,

    /// Valeur du champ avant édition, restaurée si ESC
    edit_backup: Option<String>,

    /// Contrôleur du flux simulé (au plus une session)
    feed: FeedController,
}

impl App {
    /// Crée l'application avec un champ symbole pré-rempli
    pub fn new(feed: FeedController, symbol_input: String) -> Self {
        Self {
            running: true,
            current_screen: Screen::Dashboard,
            confirm_quit: false,
            symbol_input,
            edit_backup: None,
            feed,
        }
    }

    /// Quitte l'application (arrête le flux s'il tourne)
    pub fn quit(&mut self) {
        self.feed.stop();
        self.running = false;
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========================================================================
    // Contrôles Start / Stop
    // ========================================================================

    /// Démarre le flux avec le symbole saisi
    ///
    /// No-op (retourne false) si le flux tourne déjà
    pub fn start_feed(&mut self) -> bool {
        let started = self.feed.start(&self.symbol_input);
        if started {
            // Le champ affiche le symbole effectif (ex: "" -> "IBM")
            self.symbol_input = normalize_symbol(&self.symbol_input);
            info!(symbol = %self.symbol_input, "User started feed");
        }
        started
    }

    /// Arrête le flux ; no-op (retourne false) s'il est déjà arrêté
    pub fn stop_feed(&mut self) -> bool {
        let stopped = self.feed.stop();
        if stopped {
            info!("User stopped feed");
        }
        stopped
    }

    pub fn is_feed_running(&self) -> bool {
        self.feed.is_running()
    }

    /// Le bouton Start est actif seulement quand le flux est arrêté
    pub fn can_start(&self) -> bool {
        !self.feed.is_running()
    }

    /// Le bouton Stop est actif seulement quand le flux tourne
    pub fn can_stop(&self) -> bool {
        self.feed.is_running()
    }

    pub fn feed(&self) -> &FeedController {
        &self.feed
    }

    pub fn view(&self) -> &SharedView {
        self.feed.view()
    }

    /// Copie de la vue pour le rendu
    ///
    /// CONCEPT : Lock scope minimisé
    /// - On clone sous verrou (20 cotations max) puis on relâche
    /// - Le rendu ratatui ne bloque jamais la tâche du flux
    pub fn view_snapshot(&self) -> FeedView {
        lock_view(self.feed.view()).clone()
    }

    // ========================================================================
    // Quit confirmation
    // ========================================================================

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    // ========================================================================
    // Input Mode Management
    // ========================================================================

    /// Entre en mode édition du symbole
    ///
    /// Refusé pendant qu'une session tourne (le symbole est figé)
    pub fn start_editing(&mut self) -> bool {
        if self.feed.is_running() {
            return false;
        }
        self.edit_backup = Some(self.symbol_input.clone());
        self.current_screen = Screen::InputMode;
        true
    }

    /// Annule l'édition et restaure l'ancienne valeur
    pub fn cancel_editing(&mut self) {
        if let Some(previous) = self.edit_backup.take() {
            self.symbol_input = previous;
        }
        self.current_screen = Screen::Dashboard;
    }

    /// Valide l'édition et retourne la valeur saisie
    pub fn submit_editing(&mut self) -> String {
        self.edit_backup = None;
        self.current_screen = Screen::Dashboard;
        self.symbol_input.clone()
    }

    /// Ajoute un caractère au champ (longueur bornée)
    pub fn append_char(&mut self, c: char) {
        if self.symbol_input.chars().count() < MAX_SYMBOL_LEN {
            self.symbol_input.push(c);
        }
    }

    /// Supprime le dernier caractère du champ
    pub fn backspace(&mut self) {
        self.symbol_input.pop();
    }

    pub fn is_in_input_mode(&self) -> bool {
        self.current_screen == Screen::InputMode
    }

    /// Symbole qui serait utilisé au prochain démarrage
    pub fn effective_symbol(&self) -> String {
        normalize_symbol(&self.symbol_input)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfig;
    use tokio::runtime::Handle;

    fn app(symbol: &str) -> App {
        let config = FeedConfig::default();
        let view = FeedView::shared(config.capacity);
        App::new(FeedController::new(config, view, Handle::current()), symbol.to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn test_app_creation() {
        let app = app("");
        assert!(app.is_running());
        assert!(!app.is_feed_running());
        assert!(app.can_start());
        assert!(!app.can_stop());
        assert_eq!(app.effective_symbol(), "IBM");
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_stop_toggles_controls() {
        let mut app = app(" aapl ");

        assert!(app.start_feed());
        assert_eq!(app.symbol_input, "AAPL");
        assert!(!app.can_start());
        assert!(app.can_stop());
        assert!(!app.start_feed());

        assert!(app.stop_feed());
        assert!(app.can_start());
        assert!(!app.stop_feed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_editing() {
        let mut app = app("ibm");

        assert!(app.start_editing());
        assert!(app.is_in_input_mode());
        app.backspace();
        app.backspace();
        app.backspace();
        app.append_char('t');
        app.append_char('s');
        assert_eq!(app.submit_editing(), "ts");
        assert!(!app.is_in_input_mode());

        app.start_editing();
        app.append_char('x');
        app.cancel_editing();
        assert_eq!(app.symbol_input, "ts");
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_editing_while_running() {
        let mut app = app("msft");
        app.start_feed();
        assert!(!app.start_editing());
        assert!(!app.is_in_input_mode());
    }

    #[tokio::test(start_paused = true)]
    async fn test_symbol_length_bounded() {
        let mut app = app("");
        for _ in 0..30 {
            app.append_char('a');
        }
        assert_eq!(app.symbol_input.len(), MAX_SYMBOL_LEN);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_stops_feed() {
        let mut app = app("aapl");
        app.start_feed();

        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        app.quit();

        assert!(!app.is_running());
        assert!(!app.is_feed_running());
    }
}
