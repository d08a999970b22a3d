use std::time::Duration;

use crate::models::Record;

pub const DEFAULT_ENDPOINT: &str =
    "https://vgaserver3-679685875451.asia-south1.run.app/minute1_getFullRecord/";

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("requête échouée: {0}")]
    Request(#[from] reqwest::Error),

    #[error("statut HTTP inattendu: {status}")]
    Status { status: u16 },

    #[error("réponse illisible: {reason}")]
    Decode { reason: String },

    #[error("période {period}: chiffre {number} hors limites (0-9)")]
    InvalidRecord { period: u64, number: i64 },
}

/// Source de l'historique. fetch() renvoie les résultats, le plus récent en premier.
pub trait HistoryFeed {
    fn fetch(&self) -> Result<Vec<Record>, FeedError>;
}

#[derive(serde::Deserialize)]
struct RawRecord {
    id: u64,
    number: i64,
}

/// Décode la charge utile JSON du serveur : un tableau de `{ id, number }`.
/// Un seul chiffre hors 0-9 invalide tout le lot.
pub fn parse_records(body: &str) -> Result<Vec<Record>, FeedError> {
    let raw: Vec<RawRecord> = serde_json::from_str(body).map_err(|e| FeedError::Decode {
        reason: e.to_string(),
    })?;
    raw.into_iter()
        .map(|r| match u8::try_from(r.number) {
            Ok(n) if n <= 9 => Ok(Record::new(r.id, n)),
            _ => Err(FeedError::InvalidRecord {
                period: r.id,
                number: r.number,
            }),
        })
        .collect()
}

pub struct HttpFeed {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpFeed {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl HistoryFeed for HttpFeed {
    fn fetch(&self) -> Result<Vec<Record>, FeedError> {
        tracing::debug!(url = %self.url, "récupération de l'historique");
        let resp = self.client.get(&self.url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
            });
        }
        let body = resp.text()?;
        let records = parse_records(&body)?;
        tracing::debug!(count = records.len(), "historique reçu");
        Ok(records)
    }
}

/// Flux figé, pour les tests et le mode hors ligne.
pub struct StaticFeed {
    records: Vec<Record>,
}

impl StaticFeed {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl HistoryFeed for StaticFeed {
    fn fetch(&self) -> Result<Vec<Record>, FeedError> {
        Ok(self.records.clone())
    }
}
