// ============================================================================
// Configuration : arguments CLI et paramètres du flux
// ============================================================================
// CONCEPTS RUST :
// 1. clap derive : la struct Args décrit la ligne de commande
// 2. TryFrom : conversion validée Args -> FeedConfig
// 3. thiserror : erreurs typées avec messages lisibles
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::feed::view::DEFAULT_TICKER_CAPACITY;

/// Période de tick par défaut (1.5 s)
pub const DEFAULT_PERIOD_MS: u64 = 1500;

/// Arguments de la ligne de commande
#[derive(Debug, Clone, Parser)]
#[command(version, about = "Simulated stock ticker in the terminal", long_about = None)]
pub struct Args {
    /// Symbole pré-rempli dans le champ de saisie (vide -> IBM)
    #[arg(long, default_value = "")]
    pub symbol: String,

    /// Période entre deux ticks, en millisecondes
    #[arg(long, default_value_t = DEFAULT_PERIOD_MS)]
    pub interval_ms: u64,

    /// Nombre maximum d'entrées dans le ticker
    #[arg(long, default_value_t = DEFAULT_TICKER_CAPACITY)]
    pub capacity: usize,

    /// Démarre le flux dès le lancement
    #[arg(long)]
    pub autostart: bool,

    /// Répertoire des fichiers de logs
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

/// Erreurs de validation de la configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tick interval must be greater than zero")]
    ZeroInterval,

    #[error("ticker capacity must be greater than zero")]
    ZeroCapacity,
}

/// Paramètres validés du flux simulé
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// Période entre deux ticks
    pub period: Duration,

    /// Taille maximale du ticker
    pub capacity: usize,
}

impl FeedConfig {
    pub fn new(period: Duration, capacity: usize) -> Result<Self, ConfigError> {
        if period.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self { period, capacity })
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(DEFAULT_PERIOD_MS),
            capacity: DEFAULT_TICKER_CAPACITY,
        }
    }
}

impl TryFrom<&Args> for FeedConfig {
    type Error = ConfigError;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        FeedConfig::new(Duration::from_millis(args.interval_ms), args.capacity)
    }
}

impl Args {
    /// Répertoire de logs effectif
    ///
    /// - --log-dir si fourni
    /// - sinon ~/.local/share/lazyticker/logs (selon l'OS, via dirs)
    /// - sinon ./logs
    pub fn resolved_log_dir(&self) -> PathBuf {
        if let Some(dir) = &self.log_dir {
            return dir.clone();
        }
        dirs::data_local_dir()
            .map(|dir| dir.join("lazyticker").join("logs"))
            .unwrap_or_else(|| PathBuf::from("./logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["lazyticker"]);
        assert_eq!(args.symbol, "");
        assert!(!args.autostart);

        let config = FeedConfig::try_from(&args).unwrap();
        assert_eq!(config, FeedConfig::default());
        assert_eq!(config.period, Duration::from_millis(1500));
        assert_eq!(config.capacity, 20);
    }

    #[test]
    fn test_custom_args() {
        let args = Args::parse_from([
            "lazyticker",
            "--symbol",
            "aapl",
            "--interval-ms",
            "500",
            "--capacity",
            "5",
            "--autostart",
            "--log-dir",
            "/tmp/ticker-logs",
        ]);

        let config = FeedConfig::try_from(&args).unwrap();
        assert_eq!(config.period, Duration::from_millis(500));
        assert_eq!(config.capacity, 5);
        assert!(args.autostart);
        assert_eq!(args.resolved_log_dir(), PathBuf::from("/tmp/ticker-logs"));
    }

    #[test]
    fn test_rejects_zero_values() {
        assert_eq!(
            FeedConfig::new(Duration::ZERO, 20),
            Err(ConfigError::ZeroInterval)
        );
        assert_eq!(
            FeedConfig::new(Duration::from_millis(1500), 0),
            Err(ConfigError::ZeroCapacity)
        );
    }
}
