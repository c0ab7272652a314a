//! HTTP を使った RoomCensusClient 実装
//!
//! ## 責務
//!
//! - `GET http://{host}:{port}/room-census` を 1 回だけ呼び出す
//! - レスポンスボディを census DTO としてデコードし、対象ルームを取り出す
//!
//! リトライやキャッシュは行いません（UseCase 層の責務）。

use async_trait::async_trait;

use crate::{
    domain::{CensusError, RoomCensusClient, RoomName, RoomRecord, find_room},
    infrastructure::dto::census::RoomCensusPayload,
};

/// Path of the census endpoint exposed by the upstream
pub const ROOM_CENSUS_PATH: &str = "/room-census";

/// Build the census URL for an upstream host and port.
///
/// IPv6 literals are wrapped in brackets.
pub fn room_census_url(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("http://[{}]:{}{}", host, port, ROOM_CENSUS_PATH)
    } else {
        format!("http://{}:{}{}", host, port, ROOM_CENSUS_PATH)
    }
}

/// RoomCensusClient backed by `reqwest`
///
/// No request timeout is configured; a hanging upstream hangs the caller.
pub struct HttpRoomCensusClient {
    http_client: reqwest::Client,
    url: String,
}

impl HttpRoomCensusClient {
    /// Create a client for the census served at `host:port`
    pub fn new(host: &str, port: u16) -> Self {
        Self::with_client(reqwest::Client::new(), host, port)
    }

    /// Create a client reusing an existing `reqwest::Client`
    pub fn with_client(http_client: reqwest::Client, host: &str, port: u16) -> Self {
        Self {
            http_client,
            url: room_census_url(host, port),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RoomCensusClient for HttpRoomCensusClient {
    async fn fetch(&self, room_name: &RoomName) -> Result<RoomRecord, CensusError> {
        tracing::debug!("Fetching room census from {}", self.url);

        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CensusError::fetch(&self.url, e))?;

        // The status is only logged; the body decides the outcome
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Room census at {} answered with {}", self.url, status);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CensusError::fetch(&self.url, e))?;
        let payload = RoomCensusPayload::from_slice(&body).map_err(CensusError::decode)?;

        let rooms = payload.room_census.len();
        let census = payload
            .room_census
            .into_iter()
            .filter_map(|entry| RoomRecord::try_from(entry).ok());
        let room = find_room(census, room_name);

        tracing::debug!(
            "Room census listed {} room(s), '{}' has {} participant(s)",
            rooms,
            room.name,
            room.participant_count
        );

        Ok(room)
    }
}
