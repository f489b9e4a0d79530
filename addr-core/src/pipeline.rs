//! # Pipeline de Extração — Orquestrador com Eventos Observáveis
//!
//! O pipeline coordena o classificador de linha e os padrões de extração
//! e emite eventos em cada passo via um canal Rust (`mpsc`), permitindo
//! que o servidor WebSocket transmita o raciocínio da heurística em tempo
//! real para o cliente: quais linhas pareceram endereço, qual estratégia
//! foi escolhida e com qual razão, quais spans cada padrão capturou.
//!
//! O resultado final do pipeline é, por construção, idêntico ao de
//! [`AddressExtractor::extract`]: os dois caminhos compartilham o
//! classificador, os padrões compilados e as mesmas regras de decisão.

use std::sync::mpsc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::classifier::{list_ratio, starts_with_number, LIST_RATIO_THRESHOLD};
use crate::extractor::{keeps_simple_match, split_lines, AddressExtractor};

/// Estratégia de extração escolhida para uma entrada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// **Lista simples**: ≥70% das linhas parecem endereço; as próprias
    /// linhas são devolvidas, na ordem original, duplicatas preservadas.
    SimpleList,
    /// **Varredura de prosa**: os dois padrões regex varrem o texto
    /// inteiro e os matches vão para um conjunto deduplicado.
    ProseScan,
    /// **Fallback de resgate**: os padrões não acharam nada, mas algumas
    /// linhas classificaram como endereço — essas linhas são devolvidas.
    LineFallback,
}

/// Eventos emitidos pelo pipeline durante a extração.
///
/// Cada variante carrega os dados necessários para renderizar uma etapa
/// da visualização passo a passo na interface web.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// **Passo 1**: texto dividido em linhas aparadas e não vazias.
    LinesSplit {
        lines: Vec<String>,
        total: usize,
    },
    /// **Passo 2**: veredito do classificador para uma linha, com os
    /// três sinais individuais que sustentam a decisão.
    LineClassified {
        line_index: usize,
        text: String,
        starts_with_number: bool,
        has_street_suffix: bool,
        has_state: bool,
        is_address: bool,
    },
    /// **Passo 3**: decisão lista-vs-prosa, com a razão observada e o
    /// limiar usado.
    StrategySelected {
        strategy: ExtractionStrategy,
        ratio: f64,
        threshold: f64,
    },
    /// **Passo 4 (prosa)**: um padrão capturou um span. `kept` indica se
    /// o match sobreviveu ao filtro de comprimento do padrão simples.
    PatternMatched {
        pattern: String,
        text: String,
        start: usize,
        end: usize,
        kept: bool,
    },
    /// **Passo 5 (raro)**: o fallback de resgate foi acionado.
    FallbackApplied {
        count: usize,
    },
    /// **Conclusão**: endereços finais e estatísticas.
    Done {
        addresses: Vec<String>,
        strategy: ExtractionStrategy,
        total_lines: usize,
        processing_ms: u64,
    },
    /// **Falha**: ocorreu um erro irrecuperável (não acontece na
    /// extração em si; reservado para o transporte).
    Error {
        message: String,
    },
}

/// Resultado consolidado de uma análise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub addresses: Vec<String>,
    pub strategy: ExtractionStrategy,
    pub total_lines: usize,
    pub processing_ms: u64,
}

/// O pipeline de extração principal.
///
/// # Modos de Uso
/// - **Sync**: método [`analyze`](ExtractionPipeline::analyze) para
///   chamadas diretas (handlers HTTP, scripts).
/// - **Streaming**: método
///   [`analyze_streaming`](ExtractionPipeline::analyze_streaming) para
///   UIs reativas (via WebSocket).
pub struct ExtractionPipeline {
    extractor: AddressExtractor,
}

impl ExtractionPipeline {
    /// Cria o pipeline compilando os padrões e gazetteers.
    pub fn new() -> Self {
        Self {
            extractor: AddressExtractor::new(),
        }
    }

    /// O extrator interno (para chamadas diretas sem eventos).
    pub fn extractor(&self) -> &AddressExtractor {
        &self.extractor
    }

    /// Processa o texto de forma síncrona e retorna o resultado final.
    pub fn analyze(&self, text: &str) -> ExtractionReport {
        let (tx, rx) = mpsc::channel();
        self.analyze_streaming(text, tx);

        let mut report = ExtractionReport {
            addresses: vec![],
            strategy: ExtractionStrategy::SimpleList,
            total_lines: 0,
            processing_ms: 0,
        };

        // Consome todos os eventos até o fim
        while let Ok(event) = rx.recv() {
            if let PipelineEvent::Done {
                addresses,
                strategy,
                total_lines,
                processing_ms,
            } = event
            {
                report = ExtractionReport {
                    addresses,
                    strategy,
                    total_lines,
                    processing_ms,
                };
            }
        }
        report
    }

    /// Executa a extração enviando eventos de progresso pelo canal `tx`.
    ///
    /// # Fluxo de Eventos
    /// 1. `LinesSplit`: linhas geradas.
    /// 2. `LineClassified` (loop): veredito por linha com os sinais.
    /// 3. `StrategySelected`: lista simples ou varredura de prosa.
    /// 4. `PatternMatched` (loop, prosa): spans capturados pelos padrões.
    /// 5. `FallbackApplied` (opcional): resgate pelas linhas classificadas.
    /// 6. `Done`: resultado final consolidado.
    pub fn analyze_streaming(&self, text: &str, tx: mpsc::Sender<PipelineEvent>) {
        let start = Instant::now();

        // === Passo 1: divisão em linhas ===
        let lines = split_lines(text);
        let total_lines = lines.len();
        let _ = tx.send(PipelineEvent::LinesSplit {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            total: total_lines,
        });

        if text.trim().is_empty() {
            let _ = tx.send(PipelineEvent::Done {
                addresses: vec![],
                strategy: ExtractionStrategy::SimpleList,
                total_lines: 0,
                processing_ms: start.elapsed().as_millis() as u64,
            });
            return;
        }

        // === Passo 2: classificação linha a linha ===
        let classifier = self.extractor.classifier();
        let mut matching: Vec<&str> = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            let is_address = classifier.looks_like_address(line);
            let _ = tx.send(PipelineEvent::LineClassified {
                line_index: i,
                text: line.to_string(),
                starts_with_number: starts_with_number(line),
                has_street_suffix: classifier.has_street_suffix(line),
                has_state: classifier.has_state(line),
                is_address,
            });
            if is_address {
                matching.push(line);
            }
        }

        // === Passo 3: decisão lista-vs-prosa ===
        let ratio = list_ratio(total_lines, matching.len());

        if ratio >= LIST_RATIO_THRESHOLD {
            let _ = tx.send(PipelineEvent::StrategySelected {
                strategy: ExtractionStrategy::SimpleList,
                ratio,
                threshold: LIST_RATIO_THRESHOLD,
            });
            let _ = tx.send(PipelineEvent::Done {
                addresses: matching.iter().map(|l| l.to_string()).collect(),
                strategy: ExtractionStrategy::SimpleList,
                total_lines,
                processing_ms: start.elapsed().as_millis() as u64,
            });
            return;
        }

        let _ = tx.send(PipelineEvent::StrategySelected {
            strategy: ExtractionStrategy::ProseScan,
            ratio,
            threshold: LIST_RATIO_THRESHOLD,
        });

        // === Passo 4: varredura com os dois padrões ===
        let mut seen = std::collections::HashSet::new();
        let mut found: Vec<String> = Vec::new();

        for m in self.extractor.comprehensive_matches(text) {
            let trimmed = m.as_str().trim();
            let _ = tx.send(PipelineEvent::PatternMatched {
                pattern: "comprehensive".to_string(),
                text: trimmed.to_string(),
                start: m.start(),
                end: m.end(),
                kept: true,
            });
            if seen.insert(trimmed.to_string()) {
                found.push(trimmed.to_string());
            }
        }

        for m in self.extractor.simple_matches(text) {
            let trimmed = m.as_str().trim();
            let kept = keeps_simple_match(m.as_str());
            let _ = tx.send(PipelineEvent::PatternMatched {
                pattern: "simple".to_string(),
                text: trimmed.to_string(),
                start: m.start(),
                end: m.end(),
                kept,
            });
            if kept && seen.insert(trimmed.to_string()) {
                found.push(trimmed.to_string());
            }
        }

        // === Passo 5: fallback de resgate ===
        if found.is_empty() && !matching.is_empty() {
            let _ = tx.send(PipelineEvent::FallbackApplied {
                count: matching.len(),
            });
            let _ = tx.send(PipelineEvent::Done {
                addresses: matching.iter().map(|l| l.to_string()).collect(),
                strategy: ExtractionStrategy::LineFallback,
                total_lines,
                processing_ms: start.elapsed().as_millis() as u64,
            });
            return;
        }

        let _ = tx.send(PipelineEvent::Done {
            addresses: found,
            strategy: ExtractionStrategy::ProseScan,
            total_lines,
            processing_ms: start.elapsed().as_millis() as u64,
        });
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::extract_addresses;

    #[test]
    fn test_pipeline_empty_input() {
        let pipeline = ExtractionPipeline::new();
        let report = pipeline.analyze("");
        assert!(report.addresses.is_empty());
        assert_eq!(report.total_lines, 0);
    }

    #[test]
    fn test_pipeline_events_ordering() {
        let pipeline = ExtractionPipeline::new();
        let (tx, rx) = mpsc::channel();
        pipeline.analyze_streaming("123 Main St, Austin, TX\n456 Oak Ave, Dallas, TX", tx);

        let events: Vec<PipelineEvent> = rx.try_iter().collect();
        assert!(!events.is_empty());
        assert!(
            matches!(&events[0], PipelineEvent::LinesSplit { .. }),
            "primeiro evento deve ser LinesSplit"
        );
        let last = events.last().unwrap();
        assert!(
            matches!(last, PipelineEvent::Done { .. }),
            "último evento deve ser Done"
        );
    }

    #[test]
    fn test_pipeline_reports_simple_list_strategy() {
        let pipeline = ExtractionPipeline::new();
        let report = pipeline.analyze("123 Main St, Austin, TX\n456 Oak Ave, Dallas, TX");
        assert_eq!(report.strategy, ExtractionStrategy::SimpleList);
        assert_eq!(report.addresses.len(), 2);
        assert_eq!(report.total_lines, 2);
    }

    #[test]
    fn test_pipeline_reports_prose_strategy() {
        let pipeline = ExtractionPipeline::new();
        let text = "Nosso escritório fica em 789 Pine Road, Springfield, IL 62701 desde 2019.\n\
                    Venha nos visitar quando quiser.\n\
                    O estacionamento é gratuito.";
        let report = pipeline.analyze(text);
        assert_eq!(report.strategy, ExtractionStrategy::ProseScan);
        assert!(report
            .addresses
            .iter()
            .any(|a| a == "789 Pine Road, Springfield, IL 62701"));
    }

    #[test]
    fn test_pipeline_reports_fallback_strategy() {
        let pipeline = ExtractionPipeline::new();
        let text = "Recebemos sua mensagem e vamos responder em breve.\n\
                    One Telegraph Hill Road, Boston, MA\n\
                    Atenciosamente,\n\
                    Equipe de atendimento ao cliente";
        let report = pipeline.analyze(text);
        assert_eq!(report.strategy, ExtractionStrategy::LineFallback);
        assert_eq!(
            report.addresses,
            vec!["One Telegraph Hill Road, Boston, MA"]
        );
    }

    #[test]
    fn test_pipeline_agrees_with_extractor() {
        let pipeline = ExtractionPipeline::new();
        let inputs = [
            "",
            "123 Main St, Austin, TX\n456 Oak Ave, Dallas, TX",
            "Please visit us at 789 Pine Road, Springfield, IL 62701 for more info.\n\
             Também temos uma filial em breve.\n\
             Ligue antes de vir.",
            "Recebemos sua mensagem e vamos responder em breve.\n\
             One Telegraph Hill Road, Boston, MA\n\
             Atenciosamente,\n\
             Equipe de atendimento ao cliente",
            "Este parágrafo fala sobre o tempo.\n\
             Amanhã deve chover bastante na região.",
        ];
        for input in inputs {
            assert_eq!(
                pipeline.analyze(input).addresses,
                extract_addresses(input),
                "pipeline e extrator divergiram para: {input:?}"
            );
        }
    }

    #[test]
    fn test_events_serialize_with_type_tag() {
        let event = PipelineEvent::StrategySelected {
            strategy: ExtractionStrategy::ProseScan,
            ratio: 0.25,
            threshold: LIST_RATIO_THRESHOLD,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "strategy_selected");
        assert_eq!(json["data"]["strategy"], "prose_scan");
    }
}
