//! # Cliente Distance Matrix e Ranking por Distância
//!
//! Consulta a API Distance Matrix do Google Maps em uma única chamada em
//! lote (uma origem, todos os destinos) e ordena os resultados por
//! distância de carro. A API pode falhar por endereço individual
//! (`NOT_FOUND`, `ZERO_RESULTS`) mesmo quando a requisição como um todo
//! teve sucesso — essas falhas são separadas, não descartadas.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const DISTANCE_MATRIX_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Erros da consulta de distância.
#[derive(Debug, Error)]
pub enum DistanceError {
    #[error("falha na requisição à API Distance Matrix: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API Distance Matrix retornou status {0}")]
    Api(String),
}

/// Par texto/valor da API ("5.3 mi" / 8530 metros; "12 mins" / 720 s).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueText {
    pub text: String,
    pub value: i64,
}

/// Um elemento da matriz: o resultado para um destino.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixElement {
    pub status: String,
    #[serde(default)]
    pub distance: Option<ValueText>,
    #[serde(default)]
    pub duration: Option<ValueText>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixResponse {
    status: String,
    rows: Vec<MatrixRow>,
}

/// Cliente da API Distance Matrix do Google Maps.
pub struct DistanceClient {
    http: reqwest::Client,
    api_key: String,
}

impl DistanceClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    /// Uma única chamada em lote: distâncias de carro (unidades imperiais)
    /// da origem para cada destino, na ordem dos destinos.
    pub async fn distance_matrix(
        &self,
        origin: &str,
        destinations: &[String],
    ) -> Result<Vec<MatrixElement>, DistanceError> {
        let joined = destinations.join("|");
        debug!(origin, total = destinations.len(), "consultando Distance Matrix");

        let response: MatrixResponse = self
            .http
            .get(DISTANCE_MATRIX_URL)
            .query(&[
                ("origins", origin),
                ("destinations", joined.as_str()),
                ("mode", "driving"),
                ("units", "imperial"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.status != "OK" {
            return Err(DistanceError::Api(response.status));
        }

        // Uma origem → uma linha na matriz
        Ok(response
            .rows
            .into_iter()
            .next()
            .map(|row| row.elements)
            .unwrap_or_default())
    }
}

/// O resultado final para um endereço candidato.
#[derive(Debug, Clone, Serialize)]
pub struct AddressResult {
    pub address: String,
    pub status: String,
    pub distance: Option<ValueText>,
    pub duration: Option<ValueText>,
}

/// Resultados particionados: sucessos ordenados por distância crescente
/// e falhas de lookup listadas separadamente.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RankedResults {
    pub results: Vec<AddressResult>,
    pub failed: Vec<AddressResult>,
}

/// Combina cada endereço com seu elemento da matriz (mesma ordem),
/// ordena os sucessos por distância crescente e separa as falhas.
pub fn rank_results(addresses: &[String], elements: Vec<MatrixElement>) -> RankedResults {
    let mut ranked = RankedResults::default();

    for (address, element) in addresses.iter().cloned().zip(elements) {
        let ok = element.status == "OK";
        let result = AddressResult {
            address,
            status: element.status,
            // Falhas não carregam distância, mesmo que a API envie algo
            distance: if ok { element.distance } else { None },
            duration: if ok { element.duration } else { None },
        };
        if ok {
            ranked.results.push(result);
        } else {
            ranked.failed.push(result);
        }
    }

    ranked
        .results
        .sort_by_key(|r| r.distance.as_ref().map(|d| d.value).unwrap_or(0));

    ranked
}
