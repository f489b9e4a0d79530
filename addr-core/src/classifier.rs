//! # Classificador de Linha — "isto parece um endereço?"
//!
//! Predicado heurístico que decide se uma única linha de texto tem cara
//! de endereço postal. Não é um parser formal: combina três sinais
//! fracos e independentes:
//!
//! 1. A linha **começa com dígitos** (número da casa).
//! 2. Contém um **sufixo de logradouro** como palavra inteira ("St", "Road").
//! 3. Contém um **estado dos EUA** como palavra inteira ("TX", "Illinois").
//!
//! A decisão é um OR de ANDs: `(número E sufixo) OU (sufixo E estado)`.
//! Isso tolera endereços sem número inicial ("Suite 100 Main St, Austin, TX")
//! e endereços sem estado explícito ("123 Main St").
//!
//! O mesmo classificador alimenta a decisão lista-vs-prosa: se a maior
//! parte das linhas classifica como endereço, a entrada inteira é tratada
//! como uma lista simples de um endereço por linha.

use regex::Regex;

use crate::gazetteer::{alternation, STREET_SUFFIXES, US_STATES};

/// Comprimento mínimo (em caracteres) para uma linha ser candidata.
/// O portão de comprimento dispara antes de qualquer outro sinal:
/// "5 St" tem número e sufixo, mas é curto demais para ser um endereço.
pub const MIN_ADDRESS_LINE_LEN: usize = 5;

/// Fração de linhas que precisam classificar como endereço para a
/// entrada ser tratada como lista simples. Constante empírica, sem
/// justificativa formal na origem; exposta aqui para permitir testes
/// de borda (exatamente 70%).
pub const LIST_RATIO_THRESHOLD: f64 = 0.7;

/// Classificador de linha com os gazetteers compilados em regex.
pub struct LineClassifier {
    /// Palavra inteira, sem distinção de caixa: algum sufixo de logradouro
    street_suffix: Regex,
    /// Palavra inteira, sem distinção de caixa: algum estado dos EUA
    state: Regex,
}

impl LineClassifier {
    pub fn new() -> Self {
        let street_suffix = Regex::new(&format!(r"(?i)\b(?:{})\b", alternation(STREET_SUFFIXES)))
            .expect("alternação de sufixos é uma regex válida");
        let state = Regex::new(&format!(r"(?i)\b(?:{})\b", alternation(US_STATES)))
            .expect("alternação de estados é uma regex válida");
        Self {
            street_suffix,
            state,
        }
    }

    /// A linha contém um sufixo de logradouro como palavra inteira?
    pub fn has_street_suffix(&self, line: &str) -> bool {
        self.street_suffix.is_match(line)
    }

    /// A linha contém um estado dos EUA como palavra inteira?
    pub fn has_state(&self, line: &str) -> bool {
        self.state.is_match(line)
    }

    /// Decide se uma linha isolada parece um endereço.
    ///
    /// Função pura: mesma entrada, mesma saída, sem estado escondido.
    pub fn looks_like_address(&self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.chars().count() < MIN_ADDRESS_LINE_LEN {
            return false;
        }

        let starts_with_number = starts_with_number(trimmed);
        let has_street_suffix = self.has_street_suffix(trimmed);
        let has_state = self.has_state(trimmed);

        (starts_with_number && has_street_suffix) || (has_street_suffix && has_state)
    }

    /// Filtra as linhas que classificam como endereço, preservando a
    /// ordem original (e duplicatas, se o usuário colou duplicatas).
    pub fn address_like_lines<'a>(&self, lines: &[&'a str]) -> Vec<&'a str> {
        lines
            .iter()
            .copied()
            .filter(|line| self.looks_like_address(line))
            .collect()
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// A linha começa com um ou mais dígitos (número da casa)?
pub fn starts_with_number(line: &str) -> bool {
    line.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(false)
}

/// Fração de linhas classificadas como endereço (0.0 se não há linhas).
pub fn list_ratio(total_lines: usize, matching_lines: usize) -> f64 {
    if total_lines == 0 {
        0.0
    } else {
        matching_lines as f64 / total_lines as f64
    }
}

/// A entrada inteira deve ser tratada como lista simples?
pub fn is_simple_list(total_lines: usize, matching_lines: usize) -> bool {
    list_ratio(total_lines, matching_lines) >= LIST_RATIO_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_plus_suffix() {
        let classifier = LineClassifier::new();
        assert!(classifier.looks_like_address("123 Main St"));
        assert!(classifier.looks_like_address("456 Oak Avenue, Austin, TX"));
    }

    #[test]
    fn test_suffix_plus_state_without_leading_number() {
        let classifier = LineClassifier::new();
        assert!(classifier.looks_like_address("Suite 100 Main St, Austin, TX"));
    }

    #[test]
    fn test_suffix_alone_is_not_enough() {
        let classifier = LineClassifier::new();
        assert!(!classifier.looks_like_address("Main Street corner"));
    }

    #[test]
    fn test_length_gate_fires_first() {
        let classifier = LineClassifier::new();
        // Tem dígito e token parecido com sufixo, mas só 4 caracteres
        assert!(!classifier.looks_like_address("5 St"));
    }

    #[test]
    fn test_whole_word_matching() {
        let classifier = LineClassifier::new();
        // "Stop" contém "St", mas não como palavra inteira
        assert!(!classifier.looks_like_address("12345 Stop sign"));
        // "Drive" dentro de "Driver" não conta
        assert!(!classifier.looks_like_address("98765 Driver manual"));
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = LineClassifier::new();
        assert!(classifier.looks_like_address("123 main st"));
        assert!(classifier.looks_like_address("123 MAIN ST"));
    }

    #[test]
    fn test_classifier_is_idempotent() {
        let classifier = LineClassifier::new();
        let line = "789 Pine Road, Springfield, IL 62701";
        let first = classifier.looks_like_address(line);
        for _ in 0..10 {
            assert_eq!(classifier.looks_like_address(line), first);
        }
    }

    #[test]
    fn test_list_ratio_empty_input() {
        assert_eq!(list_ratio(0, 0), 0.0);
        assert!(!is_simple_list(0, 0));
    }

    #[test]
    fn test_threshold_boundary_exact_seventy_percent() {
        // 7 de 10 linhas: exatamente no limiar → lista simples
        assert!(is_simple_list(10, 7));
        // 6 de 10: abaixo do limiar → prosa
        assert!(!is_simple_list(10, 6));
    }

    #[test]
    fn test_address_like_lines_preserves_order_and_duplicates() {
        let classifier = LineClassifier::new();
        let lines = vec![
            "123 Main St, Austin, TX",
            "cabeçalho qualquer",
            "123 Main St, Austin, TX",
        ];
        let matching = classifier.address_like_lines(&lines);
        assert_eq!(
            matching,
            vec!["123 Main St, Austin, TX", "123 Main St, Austin, TX"]
        );
    }
}
