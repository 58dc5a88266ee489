// ============================================================================
// Module : models
// ============================================================================
// Structures de données du flux simulé
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod quote;  // Cotation + formatage
pub mod symbol; // Normalisation de la saisie

// Re-export des éléments principaux pour simplifier les imports
// Au lieu de : use lazyticker::models::quote::Quote;
// On peut faire : use lazyticker::models::Quote;
pub use quote::{format_change, format_price, format_time, Quote, Trend, PRICE_FLOOR};
pub use symbol::{normalize_symbol, DEFAULT_SYMBOL};
