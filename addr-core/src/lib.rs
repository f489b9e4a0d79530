//! # addr-core — Extração Heurística de Endereços Postais (EUA)
//!
//! Este crate extrai endereços candidatos de texto bruto colado pelo
//! usuário: tanto listas limpas de um endereço por linha quanto blocos de
//! prosa (e-mails, documentos) com endereços embutidos no meio do texto.
//! Ele foi projetado para ser didático e observável, permitindo visualizar
//! cada decisão da heurística na interface web.
//!
//! ## Arquitetura do Sistema
//!
//! O sistema segue um fluxo linear, onde o texto é transformado passo a passo:
//!
//! 1.  **Entrada**: Texto bruto (String), sem estrutura assumida.
//! 2.  **Divisão** ([`extractor`]): O texto vira linhas aparadas e não vazias.
//! 3.  **Classificação** ([`classifier`]): Cada linha recebe um veredito
//!     "parece endereço?" combinando três sinais fracos (número inicial,
//!     sufixo de logradouro, estado dos EUA) sobre os [`gazetteer`]s fixos.
//! 4.  **Decisão de Estratégia**: Se ≥70% das linhas parecem endereço, a
//!     entrada é uma **lista simples**; senão, dois padrões regex varrem o
//!     texto em busca de spans embutidos, com um fallback de resgate.
//! 5.  **Saída**: Lista de endereços candidatos (strings opacas, prontas
//!     para o serviço de distância).
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use addr_core::extract_addresses;
//!
//! let text = "123 Main St, Austin, TX\n456 Oak Ave, Dallas, TX";
//! let addresses = extract_addresses(text);
//!
//! assert_eq!(addresses.len(), 2);
//! assert_eq!(addresses[0], "123 Main St, Austin, TX");
//! ```
//!
//! ## Garantias
//!
//! - A extração **nunca falha**: qualquer string produz uma lista
//!   (possivelmente vazia). Ausência de matches é um resultado válido.
//! - Computação pura, síncrona e sem I/O; segura para chamar de várias
//!   threads sem coordenação.
//! - O extrator não impõe limites: o teto de candidatos (ex: 20) e o
//!   limite de tamanho da entrada são política de quem chama.
//!
//! ## Módulos Principais
//!
//! - [`pipeline`]: Orquestrador com eventos observáveis (para a UI web).
//! - [`extractor`]: As duas estratégias de extração e o fallback.
//! - [`classifier`]: O predicado "esta linha parece um endereço?".
//! - [`gazetteer`]: Vocabulários fixos (estados, sufixos de logradouro).
//! - [`normalize`]: Limpeza de apresentação antes da consulta de distância.

pub mod classifier;
pub mod extractor;
pub mod gazetteer;
pub mod normalize;
pub mod pipeline;
pub mod samples;

pub use classifier::{LineClassifier, LIST_RATIO_THRESHOLD, MIN_ADDRESS_LINE_LEN};
pub use extractor::{extract_addresses, AddressExtractor, MIN_SIMPLE_MATCH_LEN};
pub use normalize::normalize_address;
pub use pipeline::{ExtractionPipeline, ExtractionReport, ExtractionStrategy, PipelineEvent};
