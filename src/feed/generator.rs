// ============================================================================
// Générateur de prix : marche aléatoire bornée
// ============================================================================
// Produit les cotations successives d'un seul symbole
//
// CONCEPTS RUST :
// 1. Généricité : PriceGenerator<R: Rng>
//    - En production : StdRng initialisé depuis l'OS
//    - En test : StdRng avec une graine fixe, ou un RNG factice
//
// 2. Aucune erreur possible : toutes les entrées sont générées en interne
//    - Les méthodes retournent directement une Quote (pas de Result)
// ============================================================================

use chrono::{DateTime, Local};
use rand::Rng;

use crate::models::{Quote, PRICE_FLOOR};

/// Borne basse du prix initial
pub const INITIAL_PRICE_BASE: f64 = 100.0;

/// Largeur de la plage du prix initial : [100, 120)
pub const INITIAL_PRICE_SPREAD: f64 = 20.0;

/// Générateur de cotations pour un symbole
#[derive(Debug)]
pub struct PriceGenerator<R> {
    symbol: String,
    price: f64,
    rng: R,
}

impl<R: Rng> PriceGenerator<R> {
    /// Crée un générateur et tire le prix initial dans [100, 120)
    ///
    /// Le symbole doit déjà être normalisé (voir `normalize_symbol`)
    pub fn new(symbol: String, mut rng: R) -> Self {
        let price = INITIAL_PRICE_BASE + rng.random::<f64>() * INITIAL_PRICE_SPREAD;
        Self { symbol, price, rng }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Prix courant (celui qui servira de "prix avant" au prochain tick)
    pub fn current_price(&self) -> f64 {
        self.price
    }

    /// Un pas de la marche : tire un delta dans [-1, +1) et l'applique
    pub fn tick(&mut self, now: DateTime<Local>) -> Quote {
        let delta = (self.rng.random::<f64>() - 0.5) * 2.0;
        self.apply_delta(delta, now)
    }

    /// Applique un delta donné, avec plancher à PRICE_FLOOR
    ///
    /// La variation émise est la différence réelle entre les prix,
    /// pas le delta brut (le plancher peut l'avoir raccourci)
    pub fn apply_delta(&mut self, delta: f64, now: DateTime<Local>) -> Quote {
        let before = self.price;
        let after = (before + delta).max(PRICE_FLOOR);
        self.price = after;

        Quote::new(self.symbol.clone(), after, after - before, now)
    }
}
