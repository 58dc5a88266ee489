// ============================================================================
// Normalisation du symbole saisi
// ============================================================================

/// Symbole utilisé quand la saisie est vide
pub const DEFAULT_SYMBOL: &str = "IBM";

/// Convertit la saisie utilisateur en symbole effectif
///
/// - Supprime les espaces autour
/// - Passe en majuscules
/// - Retombe sur DEFAULT_SYMBOL si rien ne reste
///
/// CONCEPT RUST : &str en entrée, String en sortie
/// - On emprunte la saisie (pas besoin d'ownership)
/// - On retourne une nouvelle String possédée par l'appelant
pub fn normalize_symbol(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        DEFAULT_SYMBOL.to_string()
    } else {
        trimmed.to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_falls_back() {
        assert_eq!(normalize_symbol(""), "IBM");
        assert_eq!(normalize_symbol("   \t"), "IBM");
    }

    #[test]
    fn test_trim_and_uppercase() {
        assert_eq!(normalize_symbol(" aapl "), "AAPL");
        assert_eq!(normalize_symbol("btc-usd"), "BTC-USD");
    }
}
