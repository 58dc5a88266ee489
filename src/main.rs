// ============================================================================
// LazyTicker - Ticker boursier simulé dans le terminal
// ============================================================================
// Programme TUI : saisie d'un symbole, Start / Stop, ticker défilant
// et snapshot de la dernière cotation (marche aléatoire, aucune vraie donnée)
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui gère événements et rendering
// 3. Runtime tokio : la tâche périodique du flux tourne en arrière-plan
// 4. RAII : l'arrêt du flux et la restauration du terminal
// ============================================================================

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use lazyticker::app::App;
use lazyticker::config::{Args, FeedConfig};
use lazyticker::feed::{FeedController, FeedView};
use lazyticker::ui::{handle_event, render, EventHandler};

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place, avec rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// Les logs sont écrits dans (par défaut) :
/// - Linux/WSL : ~/.local/share/lazyticker/logs/lazyticker.log
/// - macOS : ~/Library/Application Support/lazyticker/logs/lazyticker.log
/// - Windows : C:\Users\<user>\AppData\Local\lazyticker\logs\lazyticker.log
///
/// # Utilisation
/// ```bash
/// tail -f ~/.local/share/lazyticker/logs/lazyticker.log
/// RUST_LOG=lazyticker=trace cargo run
/// ```
fn init_logging(log_dir: &Path) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "lazyticker.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender) // Écrit dans le fichier
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_thread_ids(true) // La tâche du flux tourne sur un worker tokio
                .with_line_number(true),
        )
        .with(
            // RUST_LOG prioritaire ; par défaut debug pour lazyticker, info pour le reste
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazyticker=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber tracing")?;

    info!(log_dir = %log_dir.display(), "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    // Si init échoue, on affiche l'erreur et continue quand même
    let log_dir = args.resolved_log_dir();
    init_logging(&log_dir).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {:#}", e);
        eprintln!("   Continuing without logging...");
    });

    let config = FeedConfig::try_from(&args).context("Configuration invalide")?;
    info!(?config, autostart = args.autostart, "LazyTicker starting up");

    // CONCEPT : Runtime tokio dans un main synchrone
    // - La boucle TUI reste synchrone (comme crossterm::event::poll)
    // - Le runtime exécute la tâche périodique sur ses propres threads
    // - Déclaré avant App : détruit après elle, donc après l'arrêt du flux
    let runtime = tokio::runtime::Runtime::new().context("Échec de la création du runtime tokio")?;

    let view = FeedView::shared(config.capacity);
    let controller = FeedController::new(config, view, runtime.handle().clone());
    let mut app = App::new(controller, args.symbol.clone());

    // Démarrage automatique optionnel (désactivé par défaut)
    if args.autostart {
        app.start_feed();
    }

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events);

    // Arrête le flux avant de rendre la main au terminal
    app.stop_feed();

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// - À chaque itération :
//   1. Dessiner l'interface (render)
//   2. Traiter les événements (input)
// - Les cotations arrivent dans la vue partagée depuis la tâche du flux,
//   le redraw suivant (<= 250ms) les affiche
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    while app.is_running() {
        // 1. RENDER
        terminal.draw(|frame| render(frame, app))?;

        // 2. INPUT
        match events.next() {
            Ok(event) => handle_event(app, event),
            Err(e) => {
                error!(error = ?e, "Failed to read terminal event");
            }
        }
    }

    Ok(())
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================

/// Configure le terminal en mode TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Échec de l'activation du raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    terminal.show_cursor()?;

    Ok(())
}
