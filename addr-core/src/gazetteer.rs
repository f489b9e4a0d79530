//! # Gazetteers — Vocabulários Fixos de Endereços dos EUA
//!
//! Assim como um sistema de NER usa listas de entidades conhecidas,
//! a extração de endereços se apoia em dois vocabulários fechados:
//! os estados americanos (siglas e nomes completos) e os sufixos de
//! logradouro ("Street", "Ave", "Blvd"...).
//!
//! A **ordem** das listas importa: elas são convertidas em alternações
//! regex (`Street|St|Avenue|...`) e o motor de regex casa a alternativa
//! mais à esquerda primeiro. "Street" precisa vir antes de "St" para que
//! o match capture a palavra inteira.

/// Siglas dos 50 estados dos EUA + DC, seguidas dos nomes completos.
///
/// Usado tanto pelo classificador de linha (palavra inteira, sem
/// distinção de caixa) quanto pelo padrão abrangente de extração.
pub const US_STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA",
    "HI", "ID", "IL", "IN", "IA", "KS", "KY", "LA", "ME", "MD",
    "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC",
    "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV", "WI", "WY",
    "DC",
    "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado",
    "Connecticut", "Delaware", "Florida", "Georgia", "Hawaii", "Idaho",
    "Illinois", "Indiana", "Iowa", "Kansas", "Kentucky", "Louisiana",
    "Maine", "Maryland", "Massachusetts", "Michigan", "Minnesota",
    "Mississippi", "Missouri", "Montana", "Nebraska", "Nevada",
    "New Hampshire", "New Jersey", "New Mexico", "New York",
    "North Carolina", "North Dakota", "Ohio", "Oklahoma", "Oregon",
    "Pennsylvania", "Rhode Island", "South Carolina", "South Dakota",
    "Tennessee", "Texas", "Utah", "Vermont", "Virginia", "Washington",
    "West Virginia", "Wisconsin", "Wyoming",
];

/// Sufixos de logradouro comuns em endereços dos EUA.
///
/// Cada forma longa vem imediatamente antes da abreviação correspondente
/// ("Street" antes de "St") por causa da semântica leftmost-first da
/// alternação.
pub const STREET_SUFFIXES: &[&str] = &[
    "Street", "St", "Avenue", "Ave", "Road", "Rd", "Boulevard", "Blvd",
    "Drive", "Dr", "Lane", "Ln", "Court", "Ct", "Circle", "Cir",
    "Place", "Pl", "Square", "Sq", "Trail", "Trl", "Parkway", "Pkwy",
    "Commons", "Highway", "Hwy", "Way", "Plaza", "Terrace", "Ter",
    "Loop", "Path", "Pike", "Run", "Point", "Pt", "Crossing", "Xing",
];

/// Subconjunto reduzido de sufixos usado apenas pelo padrão simples
/// (o caminho permissivo da extração em texto corrido).
pub const SIMPLE_PATTERN_SUFFIXES: &[&str] = &[
    "Street", "St", "Avenue", "Ave", "Road", "Rd", "Boulevard", "Blvd",
    "Drive", "Dr", "Lane", "Ln", "Court", "Ct", "Circle",
    "Highway", "Hwy", "Way", "Parkway", "Pkwy", "Plaza",
];

/// Junta um vocabulário no corpo de uma alternação regex.
///
/// `["Street", "St"]` vira `"Street|St"`. As palavras dos vocabulários
/// não contêm metacaracteres, então nenhum escape é necessário.
pub fn alternation(words: &[&str]) -> String {
    words.join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_forms_precede_abbreviations() {
        let street = STREET_SUFFIXES.iter().position(|s| *s == "Street").unwrap();
        let st = STREET_SUFFIXES.iter().position(|s| *s == "St").unwrap();
        assert!(street < st);

        let avenue = STREET_SUFFIXES.iter().position(|s| *s == "Avenue").unwrap();
        let ave = STREET_SUFFIXES.iter().position(|s| *s == "Ave").unwrap();
        assert!(avenue < ave);
    }

    #[test]
    fn test_states_cover_all_fifty_plus_dc() {
        // 50 siglas + DC + 50 nomes completos
        assert_eq!(US_STATES.len(), 101);
        assert!(US_STATES.contains(&"DC"));
        assert!(US_STATES.contains(&"West Virginia"));
    }

    #[test]
    fn test_alternation_preserves_order() {
        assert_eq!(alternation(&["Street", "St"]), "Street|St");
    }
}
