// ============================================================================
// LazyTicker - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod app;    // État de l'application
pub mod config; // Arguments CLI et configuration du flux
pub mod feed;   // Générateur, tâche périodique, session, rendu
pub mod models; // Structures de données
pub mod ui;     // Interface utilisateur
