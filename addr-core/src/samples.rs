//! # Textos de Demonstração
//!
//! Entradas prontas para a interface web, cobrindo os três caminhos do
//! extrator: lista simples, varredura de prosa e fallback de resgate.

/// Pares (rótulo, texto) para o seletor de demonstração da UI.
pub fn demo_texts() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "Lista simples",
            "123 Main St, Austin, TX 78701\n\
             456 Oak Ave, Austin, TX 78704\n\
             789 Pine Rd, Round Rock, TX 78664\n\
             1600 Congress Ave, Austin, TX 78701",
        ),
        (
            "Lista com cabeçalho",
            "Endereços para visita nesta semana:\n\
             500 Commerce Street, Dallas, TX 75202\n\
             1201 Elm Street, Dallas, TX 75270\n\
             2000 Ross Avenue, Dallas, TX 75201\n\
             100 Throckmorton Street, Fort Worth, TX 76102",
        ),
        (
            "Texto corrido",
            "Nossa loja principal fica em 789 Pine Road, Springfield, IL 62701 e atende de segunda a sábado.\n\
             Caso prefira, a filial norte abriu no mês passado.\n\
             Ela funciona em 2450 Lake Shore Drive, Chicago, IL 60614 com estacionamento próprio.\n\
             Qualquer dúvida, entre em contato pelo telefone da central.",
        ),
        (
            "Assinatura de e-mail",
            "Obrigado pelo seu contato, retornaremos em breve.\n\
             Nosso escritório: One Commerce Square, Philadelphia, PA\n\
             Atenciosamente,\n\
             Equipe comercial",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::extract_addresses;

    #[test]
    fn test_every_demo_yields_addresses() {
        for (label, text) in demo_texts() {
            let addresses = extract_addresses(text);
            assert!(!addresses.is_empty(), "demo '{label}' não extraiu nada");
        }
    }

    #[test]
    fn test_simple_list_demo_extracts_every_line() {
        let (_, text) = demo_texts()[0];
        assert_eq!(extract_addresses(text).len(), 4);
    }
}
