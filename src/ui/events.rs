// ============================================================================
// Gestion des événements
// ============================================================================
// Gère les événements clavier et les ticks de rafraîchissement
//
// CONCEPTS RUST :
// 1. Enums avec variants : représenter différents types d'événements
// 2. Pattern matching avec guards : router chaque touche selon l'écran
// 3. Error handling avec Result
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};
use tracing::{debug, info};

use crate::app::App;

/// Délai de poll : fréquence de rafraîchissement de l'écran
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (rafraîchissement de l'affichage)
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    poll_interval: Duration,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            poll_interval: POLL_INTERVAL,
        }
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - poll(timeout) attend max 250ms
    /// - Si pas d'événement, retourne Ok(Event::Tick)
    /// - Les ticks du flux arrivent en arrière-plan, le Tick sert
    ///   seulement à redessiner la vue régulièrement
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.poll_interval)? {
            match event::read()? {
                // Sur certains OS, on reçoit Press ET Release
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers : Convertir KeyEvent en action
// ============================================================================

/// Vérifie si l'événement est la touche 'q' (quitter)
pub fn is_quit_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
    } else {
        false
    }
}

/// Vérifie si l'événement est 's' (start)
pub fn is_start_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('s') | KeyCode::Char('S'))
    } else {
        false
    }
}

/// Vérifie si l'événement est 'x' (stop)
pub fn is_stop_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('x') | KeyCode::Char('X'))
    } else {
        false
    }
}

/// Vérifie si l'événement est 'e' (éditer le symbole)
pub fn is_edit_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('e') | KeyCode::Char('E'))
    } else {
        false
    }
}

/// Vérifie si l'événement est Échap
pub fn is_escape_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Esc)
    } else {
        false
    }
}

/// Vérifie si l'événement est Entrée
pub fn is_enter_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Enter)
    } else {
        false
    }
}

/// Vérifie si l'événement est Backspace
pub fn is_backspace_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Backspace)
    } else {
        false
    }
}

/// Caractère acceptable dans un symbole (alphanumérique, tiret, point, espace)
///
/// Les espaces sont acceptés : la normalisation les retire aux extrémités
pub fn is_symbol_char_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char(c) if c.is_alphanumeric() || matches!(c, '-' | '.' | ' '))
    } else {
        false
    }
}

/// Extrait le caractère d'un événement clavier si c'est un caractère
pub fn get_char_from_event(event: &Event) -> Option<char> {
    if let Event::Key(key) = event {
        if let KeyCode::Char(c) = key.code {
            return Some(c);
        }
    }
    None
}

// ============================================================================
// Traitement d'un événement
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
///
/// CONCEPT RUST : Pattern matching avec guards
/// - En mode saisie, toutes les touches vont au champ symbole
/// - Sur le dashboard, s / x / e / q pilotent le flux
/// - Start pendant que ça tourne, ou Stop à l'arrêt : ignorés
pub fn handle_event(app: &mut App, event: Event) {
    if app.is_in_input_mode() {
        handle_input_event(app, &event);
        return;
    }

    match event {
        Event::Key(_) if is_quit_event(&event) => {
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        Event::Key(_) if is_start_event(&event) => {
            app.cancel_quit();
            app.start_feed();
        }

        Event::Key(_) if is_stop_event(&event) => {
            app.cancel_quit();
            app.stop_feed();
        }

        Event::Key(_) if is_edit_event(&event) => {
            app.cancel_quit();
            if !app.start_editing() {
                debug!("Symbol edit refused while feed is running");
            }
        }

        Event::Key(_) => {
            // Toute autre touche : annule la confirmation si active
            app.cancel_quit();
        }

        Event::Tick => {}
    }
}

fn handle_input_event(app: &mut App, event: &Event) {
    if is_escape_event(event) {
        debug!("User cancelled symbol edit");
        app.cancel_editing();
    } else if is_enter_event(event) {
        let value = app.submit_editing();
        debug!(input = %value, "User submitted symbol");
    } else if is_backspace_event(event) {
        app.backspace();
    } else if is_symbol_char_event(event) {
        if let Some(c) = get_char_from_event(event) {
            app.append_char(c);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfig;
    use crate::feed::{FeedController, FeedView};
    use crossterm::event::KeyModifiers;
    use tokio::runtime::Handle;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    fn app() -> App {
        let config = FeedConfig::default();
        let view = FeedView::shared(config.capacity);
        App::new(FeedController::new(config, view, Handle::current()), String::new())
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key(KeyCode::Char('q'))));
        assert!(!is_quit_event(&key(KeyCode::Char('a'))));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_symbol_chars() {
        assert!(is_symbol_char_event(&key(KeyCode::Char('a'))));
        assert!(is_symbol_char_event(&key(KeyCode::Char('-'))));
        assert!(!is_symbol_char_event(&key(KeyCode::Char('$'))));
        assert!(!is_symbol_char_event(&key(KeyCode::Enter)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_and_stop_keys() {
        let mut app = app();

        handle_event(&mut app, key(KeyCode::Char('s')));
        assert!(app.is_feed_running());
        assert_eq!(app.feed().symbol(), Some("IBM"));

        // Start pendant que ça tourne : ignoré
        handle_event(&mut app, key(KeyCode::Char('s')));
        assert!(app.is_feed_running());

        handle_event(&mut app, key(KeyCode::Char('x')));
        assert!(!app.is_feed_running());
        handle_event(&mut app, key(KeyCode::Char('x')));
        assert!(!app.is_feed_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_symbol_then_start() {
        let mut app = app();

        handle_event(&mut app, key(KeyCode::Char('e')));
        assert!(app.is_in_input_mode());

        // 's' et 'q' sont des caractères en mode saisie, pas des commandes
        for c in " sq ".chars() {
            handle_event(&mut app, key(KeyCode::Char(c)));
        }
        handle_event(&mut app, key(KeyCode::Enter));
        assert!(!app.is_feed_running());
        assert!(app.is_running());

        handle_event(&mut app, key(KeyCode::Char('s')));
        assert_eq!(app.feed().symbol(), Some("SQ"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_step_quit() {
        let mut app = app();

        handle_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.is_running());
        handle_event(&mut app, key(KeyCode::Char('a')));
        assert!(!app.is_awaiting_quit_confirmation());

        handle_event(&mut app, key(KeyCode::Char('q')));
        handle_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.is_running());
    }
}
