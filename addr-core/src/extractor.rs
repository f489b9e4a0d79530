//! # Extrator de Endereços — duas estratégias com fallback
//!
//! O extrator aceita texto bruto colado pelo usuário e devolve os
//! endereços candidatos encontrados. Duas formas de entrada são comuns:
//!
//! 1. **Lista simples**: um endereço por linha (o caso mais frequente).
//! 2. **Texto corrido**: endereços embutidos em prosa, e-mails, documentos.
//!
//! ## Fluxo de Decisão
//!
//! ```text
//! texto bruto
//!   └─ divide em linhas não vazias
//!        └─ classifica cada linha (LineClassifier)
//!             ├─ ≥70% parecem endereço  → devolve as linhas (lista simples)
//!             └─ senão → varre o texto com dois padrões regex:
//!                  ├─ abrangente: número + rua + cidade + estado [+ CEP]
//!                  ├─ simples:    número + rua (sem cidade/estado)
//!                  └─ nada casou, mas há linhas com cara de endereço?
//!                        → devolve essas linhas (fallback de resgate)
//! ```
//!
//! O extrator nunca falha: entrada vazia ou sem endereços produz uma
//! lista vazia, que é um resultado válido e silencioso. Validações como
//! "nenhum endereço encontrado" ou "máximo de 20 endereços" são
//! responsabilidade de quem chama.
//!
//! O crate `regex` compila os padrões para autômatos finitos, então o
//! risco de backtracking catastrófico dos padrões aninhados não existe
//! aqui; ainda assim o chamador deve limitar o tamanho da entrada.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::{Matches, Regex};

use crate::classifier::{is_simple_list, LineClassifier};
use crate::gazetteer::{alternation, SIMPLE_PATTERN_SUFFIXES, STREET_SUFFIXES, US_STATES};

/// Comprimento mínimo (exclusivo, em caracteres) de um match do padrão
/// simples. Filtra matches espúrios minúsculos como "5 St". O valor 10
/// vem da implementação original e é arbitrário — preservado exatamente.
pub const MIN_SIMPLE_MATCH_LEN: usize = 10;

/// Extrator com o classificador de linha e os dois padrões compilados.
pub struct AddressExtractor {
    classifier: LineClassifier,
    /// Padrão abrangente: `número rua sufixo, cidade, estado [CEP]`.
    /// Exige os três componentes nessa ordem; separadores flexíveis
    /// (vírgula+espaço ou só espaço).
    comprehensive: Regex,
    /// Padrão simples: `número ... sufixo ...`, bem mais permissivo.
    /// Pega endereços sem cidade/estado parseável (ex: número + rua + sala).
    simple: Regex,
}

impl AddressExtractor {
    pub fn new() -> Self {
        let suffixes = alternation(STREET_SUFFIXES);
        let states = alternation(US_STATES);

        let comprehensive = Regex::new(&format!(
            r"(?i)\d+\s+[A-Za-z0-9\s]+\s*(?:{suffixes})(?:[,\s]+|\s+)[A-Za-z\s]+[,\s]+(?:{states})(?:\s+\d{{5}}(?:-\d{{4}})?)?"
        ))
        .expect("padrão abrangente é uma regex válida");

        let simple = Regex::new(&format!(
            r"(?i)\d+\s+[A-Za-z0-9\s,.'#-]+(?:{})[A-Za-z0-9\s,.'#-]*",
            alternation(SIMPLE_PATTERN_SUFFIXES)
        ))
        .expect("padrão simples é uma regex válida");

        Self {
            classifier: LineClassifier::new(),
            comprehensive,
            simple,
        }
    }

    /// O classificador de linha interno (compartilhado com o pipeline).
    pub fn classifier(&self) -> &LineClassifier {
        &self.classifier
    }

    /// Todos os matches não sobrepostos do padrão abrangente.
    pub fn comprehensive_matches<'r, 't>(&'r self, text: &'t str) -> Matches<'r, 't> {
        self.comprehensive.find_iter(text)
    }

    /// Todos os matches não sobrepostos do padrão simples.
    pub fn simple_matches<'r, 't>(&'r self, text: &'t str) -> Matches<'r, 't> {
        self.simple.find_iter(text)
    }

    /// Extrai endereços candidatos do texto.
    ///
    /// Veja o fluxo de decisão na documentação do módulo. Garantias:
    /// - entrada vazia (ou só espaços) → lista vazia;
    /// - caminho lista simples: linhas devolvidas na ordem original,
    ///   duplicatas preservadas;
    /// - caminho prosa: strings únicas (deduplicação por igualdade exata
    ///   após trim), matches do padrão abrangente primeiro.
    pub fn extract(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let lines = split_lines(text);
        let address_like = self.classifier.address_like_lines(&lines);

        // Estratégia 1: a entrada é uma lista simples de endereços
        if is_simple_list(lines.len(), address_like.len()) {
            return address_like.into_iter().map(str::to_string).collect();
        }

        // Estratégia 2: varre o texto inteiro (não as linhas) com os padrões
        let mut seen = HashSet::new();
        let mut found = Vec::new();

        for m in self.comprehensive_matches(text) {
            push_unique(&mut seen, &mut found, m.as_str());
        }

        for m in self.simple_matches(text) {
            if keeps_simple_match(m.as_str()) {
                push_unique(&mut seen, &mut found, m.as_str());
            }
        }

        // Fallback de resgate: os padrões não acharam nada, mas algumas
        // linhas têm cara de endereço — devolve essas linhas
        if found.is_empty() && !address_like.is_empty() {
            return address_like.into_iter().map(str::to_string).collect();
        }

        found
    }
}

impl Default for AddressExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Divide o texto em linhas aparadas e não vazias.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty()).collect()
}

/// Um match do padrão simples passa no filtro de comprimento?
pub fn keeps_simple_match(candidate: &str) -> bool {
    candidate.trim().chars().count() > MIN_SIMPLE_MATCH_LEN
}

/// Adiciona o candidato aparado à lista, se ainda não foi visto.
fn push_unique(seen: &mut HashSet<String>, found: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if seen.insert(trimmed.to_string()) {
        found.push(trimmed.to_string());
    }
}

/// Extrai endereços usando um extrator padrão compartilhado.
///
/// Ponto de entrada de conveniência: os padrões são compilados uma única
/// vez por processo. É seguro chamar de várias threads ao mesmo tempo —
/// a extração é pura e não há estado compartilhado entre invocações.
pub fn extract_addresses(text: &str) -> Vec<String> {
    default_extractor().extract(text)
}

/// Instância padrão compartilhada (compilação preguiçosa dos padrões).
pub fn default_extractor() -> &'static AddressExtractor {
    static EXTRACTOR: OnceLock<AddressExtractor> = OnceLock::new();
    EXTRACTOR.get_or_init(AddressExtractor::new)
}
