// ============================================================================
// Module : feed
// ============================================================================
// Le flux simulé : générateur, tâche périodique, session, rendu
// ============================================================================

pub mod generator;  // Marche aléatoire bornée
pub mod task;       // Tâche périodique annulable (tokio)
pub mod session;    // Une session = un générateur + une tâche
pub mod controller; // Bascule start/stop, une seule session à la fois
pub mod view;       // Renderer : ticker + snapshot

pub use controller::FeedController;
pub use generator::PriceGenerator;
pub use session::FeedSession;
pub use task::PeriodicTask;
pub use view::{lock_view, FeedView, Renderer, SharedView};
