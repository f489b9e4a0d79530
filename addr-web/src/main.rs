//! Servidor web Axum: extração de endereços com visualização em tempo
//! real (WebSocket) e busca do endereço mais próximo via Distance Matrix.
//!
//! O extrator em si não impõe limites; este servidor é o "chamador" que
//! aplica as políticas: teto de 20 candidatos por consulta, limite de
//! tamanho da entrada antes da extração e rejeição de extração vazia
//! como erro de validação voltado ao usuário.

mod distance;

use std::sync::Arc;

use addr_core::{
    pipeline::{ExtractionPipeline, PipelineEvent},
    samples::demo_texts,
};
use askama::Template;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use crate::distance::{rank_results, DistanceClient};

/// Teto de candidatos por consulta à API de distância.
const MAX_ADDRESSES: usize = 20;
/// Limite de tamanho da entrada antes da extração.
const MAX_INPUT_BYTES: usize = 32 * 1024;

/// Estado compartilhado da aplicação
struct AppState {
    pipeline: ExtractionPipeline,
    /// `None` quando GOOGLE_MAPS_API_KEY não está configurada
    distance: Option<DistanceClient>,
}

#[derive(Deserialize)]
struct ExtractRequest {
    text: String,
}

#[derive(Deserialize)]
struct FindClosestRequest {
    starting_address: String,
    /// Texto bruto para extração...
    #[serde(default)]
    text: Option<String>,
    /// ...ou uma lista de endereços já separados
    #[serde(default)]
    addresses: Option<Vec<String>>,
}

/// Mensagem WebSocket recebida do cliente
#[derive(Deserialize)]
struct WsRequest {
    text: String,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    max_addresses: usize,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let api_key = std::env::var("GOOGLE_MAPS_API_KEY").ok();
    if api_key.is_none() {
        warn!("GOOGLE_MAPS_API_KEY não configurada; /api/find-closest responderá 500");
    }

    let state = Arc::new(AppState {
        pipeline: ExtractionPipeline::new(),
        distance: api_key.map(DistanceClient::new),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/api/extract", post(extract_handler))
        .route("/api/find-closest", post(find_closest_handler))
        .route("/ws", get(ws_handler))
        .route("/demo-texts", get(demo_texts_handler))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await.unwrap();
    info!("🚀 Servidor de endereços iniciado em http://localhost:{port}");
    axum::serve(listener, app).await.unwrap();
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    let page = IndexTemplate {
        max_addresses: MAX_ADDRESSES,
    };
    match page.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!("falha ao renderizar o template: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn bad_request(message: &str) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
}

/// Validações do chamador sobre o texto bruto (o extrator não valida nada)
fn validate_text(text: &str) -> Option<(StatusCode, Json<serde_json::Value>)> {
    if text.trim().is_empty() {
        return Some(bad_request("Texto vazio"));
    }
    if text.len() > MAX_INPUT_BYTES {
        return Some(bad_request(&format!(
            "Texto muito longo (limite de {} KB)",
            MAX_INPUT_BYTES / 1024
        )));
    }
    None
}

/// Extração via HTTP POST (sem streaming)
async fn extract_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExtractRequest>,
) -> impl IntoResponse {
    if let Some(resp) = validate_text(&req.text) {
        return resp.into_response();
    }
    let report = state.pipeline.analyze(&req.text);
    Json(report).into_response()
}

/// Extrai (ou aceita) os candidatos, consulta a Distance Matrix em uma
/// única chamada em lote e devolve sucessos ordenados por distância
/// crescente com as falhas de lookup separadas.
async fn find_closest_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FindClosestRequest>,
) -> impl IntoResponse {
    if req.starting_address.trim().is_empty() {
        return bad_request("Informe o endereço de partida").into_response();
    }

    let addresses: Vec<String> = match (&req.addresses, &req.text) {
        (Some(list), _) => list
            .iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect(),
        (None, Some(text)) => {
            if let Some(resp) = validate_text(text) {
                return resp.into_response();
            }
            state.pipeline.extractor().extract(text)
        }
        (None, None) => {
            return bad_request("Envie 'text' ou 'addresses'").into_response();
        }
    };

    if addresses.is_empty() {
        return bad_request("Nenhum endereço encontrado na entrada").into_response();
    }
    if addresses.len() > MAX_ADDRESSES {
        return bad_request(&format!(
            "Máximo de {MAX_ADDRESSES} endereços por consulta"
        ))
        .into_response();
    }

    let Some(client) = &state.distance else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "error": "Chave de API do Google Maps não configurada"
            })),
        )
            .into_response();
    };

    match client.distance_matrix(&req.starting_address, &addresses).await {
        Ok(elements) => {
            let ranked = rank_results(&addresses, elements);
            Json(serde_json::json!({
                "success": true,
                "starting_address": req.starting_address,
                "results": ranked.results,
                "failed": ranked.failed,
            }))
            .into_response()
        }
        Err(err) => {
            error!("consulta de distância falhou: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}

/// Retorna textos de demonstração
async fn demo_texts_handler() -> impl IntoResponse {
    let texts: Vec<serde_json::Value> = demo_texts()
        .iter()
        .map(|(label, text)| {
            serde_json::json!({
                "label": label,
                "text": text
            })
        })
        .collect();
    Json(texts)
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Lógica do WebSocket: recebe texto, roda o pipeline de extração e envia
/// os eventos passo a passo para o cliente
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                // Tenta parsear como JSON {"text": ...}; senão usa como texto puro
                let text_str = if let Ok(req) = serde_json::from_str::<WsRequest>(&text) {
                    req.text.trim().to_string()
                } else {
                    text.trim().to_string()
                };

                if text_str.is_empty() {
                    continue;
                }
                if text_str.len() > MAX_INPUT_BYTES {
                    let event = PipelineEvent::Error {
                        message: format!(
                            "Texto muito longo (limite de {} KB)",
                            MAX_INPUT_BYTES / 1024
                        ),
                    };
                    if let Ok(json) = serde_json::to_string(&event) {
                        let _ = socket.send(Message::Text(json.into())).await;
                    }
                    continue;
                }

                info!("analisando via WebSocket: {} bytes", text_str.len());

                // Roda o pipeline em um spawn_blocking para não bloquear o runtime
                let (tx_std, rx_std) = std::sync::mpsc::channel::<PipelineEvent>();
                let state_for_thread = Arc::clone(&state);
                let text_for_thread = text_str.clone();

                let handle = tokio::task::spawn_blocking(move || {
                    state_for_thread
                        .pipeline
                        .analyze_streaming(&text_for_thread, tx_std);
                });
                handle.await.ok();

                // Coleta todos os eventos numa Vec (o rx_std não é Send)
                let events: Vec<PipelineEvent> = rx_std.try_iter().collect();

                for event in &events {
                    if let Ok(json) = serde_json::to_string(event) {
                        if socket.send(Message::Text(json.into())).await.is_err() {
                            return; // cliente desconectou
                        }
                        // Pequena pausa para animação visual (passo a passo)
                        tokio::time::sleep(tokio::time::Duration::from_millis(35)).await;
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}
