// ============================================================================
// Structure : Quote
// ============================================================================
// Une cotation simulée produite à chaque tick du générateur
//
// CONCEPTS RUST :
// 1. Immutabilité : une Quote n'est jamais modifiée après sa création
//    - Pas de méthode &mut self
//    - Le renderer la lit, la clone si besoin, et c'est tout
//
// 2. chrono::DateTime<Local> : horodatage dans le fuseau local
//    - Utilisé pour afficher l'heure dans le snapshot
// ============================================================================

use chrono::{DateTime, Local};

/// Prix plancher : la marche aléatoire ne descend jamais en dessous
pub const PRICE_FLOOR: f64 = 1.0;

/// Sens de la variation d'une cotation
///
/// `change >= 0` est considéré comme une hausse (comme l'affichage "+0.00")
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// Détermine la tendance à partir d'une variation
    pub fn from_change(change: f64) -> Self {
        if change >= 0.0 {
            Trend::Up
        } else {
            Trend::Down
        }
    }

    /// Flèche associée à la tendance
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Down => "▼",
        }
    }
}

/// Cotation simulée pour un symbole
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Symbole normalisé (ex: "AAPL")
    pub symbol: String,

    /// Prix après le tick, toujours >= PRICE_FLOOR
    pub price: f64,

    /// Variation réelle : prix après - prix avant
    /// (pas le delta tiré au hasard, le plancher peut l'avoir modifié)
    pub change: f64,

    /// Instant de génération
    pub timestamp: DateTime<Local>,
}

impl Quote {
    pub fn new(symbol: String, price: f64, change: f64, timestamp: DateTime<Local>) -> Self {
        Self {
            symbol,
            price,
            change,
            timestamp,
        }
    }

    pub fn trend(&self) -> Trend {
        Trend::from_change(self.change)
    }

    /// Prix formaté à 2 décimales
    pub fn price_label(&self) -> String {
        format_price(self.price)
    }

    /// Variation signée à 2 décimales
    pub fn change_label(&self) -> String {
        format_change(self.change)
    }

    /// Heure de la cotation (format local)
    pub fn time_label(&self) -> String {
        format_time(&self.timestamp)
    }

    /// Ligne compacte pour le ticker défilant
    ///
    /// Format : "AAPL      104.27  ▲ +0.35"
    pub fn ticker_line(&self) -> String {
        format!(
            "{:<8} {:>10}  {} {}",
            self.symbol,
            self.price_label(),
            self.trend().arrow(),
            self.change_label()
        )
    }
}

// ============================================================================
// Helpers de formatage
// ============================================================================

/// Formate un prix avec 2 décimales
pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

/// Formate une variation avec signe explicite pour les valeurs positives ou nulles
///
/// CONCEPT : On ne peut pas utiliser `{:+.2}` directement
/// - `{:+.2}` afficherait "-0.00" pour un -0.001
/// - L'affichage du signe doit suivre la même règle que la tendance (change >= 0)
pub fn format_change(change: f64) -> String {
    match Trend::from_change(change) {
        Trend::Up => format!("+{:.2}", change),
        Trend::Down => format!("{:.2}", change),
    }
}

/// Formate l'heure de la journée selon la représentation locale
pub fn format_time(timestamp: &DateTime<Local>) -> String {
    timestamp.format("%X").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn quote(change: f64) -> Quote {
        let ts = Local.with_ymd_and_hms(2024, 3, 1, 14, 5, 9).unwrap();
        Quote::new("AAPL".to_string(), 104.271, change, ts)
    }

    #[test]
    fn test_price_two_decimals() {
        assert_eq!(format_price(104.271), "104.27");
        assert_eq!(format_price(1.0), "1.00");
    }

    #[test]
    fn test_change_sign() {
        assert_eq!(format_change(0.354), "+0.35");
        assert_eq!(format_change(0.0), "+0.00");
        assert_eq!(format_change(-0.5), "-0.50");
    }

    #[test]
    fn test_trend_keyed_on_non_negative() {
        assert_eq!(quote(0.0).trend(), Trend::Up);
        assert_eq!(quote(0.2).trend(), Trend::Up);
        assert_eq!(quote(-0.01).trend(), Trend::Down);
    }

    #[test]
    fn test_time_label() {
        assert_eq!(quote(0.1).time_label(), "14:05:09");
    }

    #[test]
    fn test_ticker_line() {
        let line = quote(-0.35).ticker_line();
        assert!(line.starts_with("AAPL"));
        assert!(line.contains("104.27"));
        assert!(line.contains("▼ -0.35"));
    }
}
