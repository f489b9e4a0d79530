//! # Normalização de Endereços
//!
//! Utilitário de apresentação para limpar um endereço antes de enviá-lo
//! ao serviço de distância. **Não** é invocado pela extração: a
//! deduplicação do extrator acontece sobre as strings cruas (pré-
//! normalização), de propósito, para preservar o comportamento original.

use std::sync::OnceLock;

use regex::Regex;

/// Limpa e normaliza um endereço:
///
/// 1. apara espaços nas pontas;
/// 2. colapsa sequências de espaços em um único espaço;
/// 3. colapsa vírgulas duplicadas (`",,"` ou `", ,"`) em uma só;
/// 4. padroniza o espaçamento de vírgulas para `", "`.
///
/// ```
/// use addr_core::normalize_address;
///
/// assert_eq!(
///     normalize_address("  123   Main St ,Austin,,TX  "),
///     "123 Main St, Austin, TX"
/// );
/// ```
pub fn normalize_address(address: &str) -> String {
    static WHITESPACE_RUN: OnceLock<Regex> = OnceLock::new();
    static DOUBLE_COMMA: OnceLock<Regex> = OnceLock::new();
    static COMMA_SPACING: OnceLock<Regex> = OnceLock::new();

    let whitespace_run =
        WHITESPACE_RUN.get_or_init(|| Regex::new(r"\s+").expect("regex de espaços válida"));
    let double_comma =
        DOUBLE_COMMA.get_or_init(|| Regex::new(r",\s*,").expect("regex de vírgulas válida"));
    let comma_spacing = COMMA_SPACING
        .get_or_init(|| Regex::new(r"\s*,\s*").expect("regex de espaçamento válida"));

    let collapsed = whitespace_run.replace_all(address.trim(), " ");
    let deduped = double_comma.replace_all(&collapsed, ",");
    comma_spacing.replace_all(&deduped, ", ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace_runs() {
        assert_eq!(normalize_address("123   Main    St"), "123 Main St");
        assert_eq!(normalize_address("123\tMain\nSt"), "123 Main St");
    }

    #[test]
    fn test_trims_edges() {
        assert_eq!(normalize_address("  123 Main St  "), "123 Main St");
    }

    #[test]
    fn test_collapses_duplicate_commas() {
        assert_eq!(
            normalize_address("123 Main St,, Austin"),
            "123 Main St, Austin"
        );
        assert_eq!(
            normalize_address("123 Main St, , Austin"),
            "123 Main St, Austin"
        );
    }

    #[test]
    fn test_standardizes_comma_spacing() {
        assert_eq!(
            normalize_address("123 Main St ,Austin ,TX"),
            "123 Main St, Austin, TX"
        );
        assert_eq!(
            normalize_address("123 Main St,Austin,TX"),
            "123 Main St, Austin, TX"
        );
    }

    #[test]
    fn test_already_normalized_is_unchanged() {
        let address = "123 Main St, Austin, TX 78701";
        assert_eq!(normalize_address(address), address);
    }
}
