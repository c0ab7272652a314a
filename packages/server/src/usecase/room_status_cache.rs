//! Expiring cache in front of the room census
//!
//! ## 概要
//!
//! 設定されたルーム 1 件分の `RoomRecord` を保持し、有効期限内であれば上流 API を
//! 呼び出さずに返します。期限切れの場合のみ `RoomCensusClient::fetch` を呼び出します。
//!
//! ## 並行性
//!
//! エントリは 1 つの `tokio::sync::Mutex` で保護され、ロックは上流呼び出しの間も
//! 保持されます。そのため期限切れ時に同時に来たリクエストのうち上流を呼ぶのは
//! 1 つだけで、残りはその結果（値またはエラー）を受け取ります。
//!
//! 上流呼び出しはロックごと別タスクに移して実行します。呼び出し元のリクエストが
//! 途中で破棄されても、開始した更新は完了（成功または失敗）まで実行されます。
//!
//! ```text
//! caller A ──lock──▶ stale ──fetch──────────▶ store ──unlock──▶ Ok(room)
//! caller B ──wait────────────────────────────────────lock──▶ fresh ──▶ Ok(room)
//! caller C ──wait──────────────────────────────────────────lock──▶ fresh ──▶ Ok(room)
//! ```

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use peephole_shared::time::{Clock, SystemClock};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{CensusError, RoomCensusClient, RoomName, RoomRecord};

/// Default expiry window
pub const DEFAULT_CACHE_EXPIRY: Duration = Duration::from_secs(5);

/// Cached record and refresh bookkeeping
struct CacheEntry {
    /// 最後に取得に成功したレコード（未取得の場合は参加者 0 人のプレースホルダ）
    value: RoomRecord,
    /// 最後に取得に成功した時刻（Unix ミリ秒）
    last_updated: Option<i64>,
    /// 直近の上流呼び出しの結果（ロック待ちの呼び出し元へ共有する）
    last_outcome: Option<Result<RoomRecord, CensusError>>,
}

impl CacheEntry {
    fn is_fresh(&self, now_millis: i64, expiry_millis: i64) -> bool {
        match self.last_updated {
            Some(last_updated) => {
                let elapsed = now_millis - last_updated;
                (0..expiry_millis).contains(&elapsed)
            }
            None => false,
        }
    }
}

/// Time-bounded, single-flight cache for the configured room
pub struct RoomStatusCache {
    /// RoomCensusClient（上流 API の抽象化）
    census_client: Arc<dyn RoomCensusClient>,
    clock: Arc<dyn Clock>,
    room_name: RoomName,
    expiry: Duration,
    expiry_millis: i64,
    entry: Arc<Mutex<CacheEntry>>,
    /// Number of completed upstream calls; only written with `entry` locked
    attempts: Arc<AtomicU64>,
}

impl RoomStatusCache {
    /// Create a cache using the system clock
    pub fn new(
        census_client: Arc<dyn RoomCensusClient>,
        room_name: RoomName,
        expiry: Duration,
    ) -> Self {
        Self::with_clock(census_client, room_name, expiry, Arc::new(SystemClock))
    }

    /// Create a cache with an explicit clock
    pub fn with_clock(
        census_client: Arc<dyn RoomCensusClient>,
        room_name: RoomName,
        expiry: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let entry = CacheEntry {
            value: RoomRecord::empty(room_name.clone()),
            last_updated: None,
            last_outcome: None,
        };

        Self {
            census_client,
            clock,
            room_name,
            expiry,
            expiry_millis: i64::try_from(expiry.as_millis()).unwrap_or(i64::MAX),
            entry: Arc::new(Mutex::new(entry)),
            attempts: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn room_name(&self) -> &RoomName {
        &self.room_name
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Get the record for the configured room
    ///
    /// Returns the cached record while it is fresh. Otherwise fetches the
    /// census once, holding the lock for the duration of the call. Callers that
    /// queued up behind that call receive its outcome instead of fetching again.
    ///
    /// The refresh runs on its own task together with the lock, so dropping
    /// this future does not abandon an upstream call that has already started.
    ///
    /// # Errors
    ///
    /// Returns the `CensusError` of the failed fetch. The cached record and its
    /// timestamp are left untouched, so the next call fetches again.
    pub async fn get(&self) -> Result<RoomRecord, CensusError> {
        let seen_attempts = self.attempts.load(Ordering::Acquire);
        let entry = self.entry.clone().lock_owned().await;

        if entry.is_fresh(self.clock.now_millis(), self.expiry_millis) {
            tracing::debug!("Serving cached census for room '{}'", self.room_name);
            return Ok(entry.value.clone());
        }

        // An upstream call finished while we were waiting for the lock
        if self.attempts.load(Ordering::Acquire) != seen_attempts
            && let Some(outcome) = &entry.last_outcome
        {
            tracing::debug!("Sharing in-flight census result for room '{}'", self.room_name);
            return outcome.clone();
        }

        let task = tokio::spawn(refresh(
            entry,
            self.census_client.clone(),
            self.room_name.clone(),
            self.clock.clone(),
            self.attempts.clone(),
        ));

        match task.await {
            Ok(outcome) => outcome,
            // The task is only cancelled when the runtime shuts down
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }
}

/// Fetch the census and store the outcome, releasing the lock when done.
async fn refresh(
    mut entry: OwnedMutexGuard<CacheEntry>,
    census_client: Arc<dyn RoomCensusClient>,
    room_name: RoomName,
    clock: Arc<dyn Clock>,
    attempts: Arc<AtomicU64>,
) -> Result<RoomRecord, CensusError> {
    let outcome = census_client.fetch(&room_name).await;
    match &outcome {
        Ok(room) => {
            entry.value = room.clone();
            entry.last_updated = Some(clock.now_millis());
            tracing::debug!(
                "Refreshed census for room '{}': {} participant(s)",
                room.name,
                room.participant_count
            );
        }
        Err(e) => {
            tracing::warn!("Census refresh for room '{}' failed: {}", room_name, e);
        }
    }
    entry.last_outcome = Some(outcome.clone());
    attempts.fetch_add(1, Ordering::Release);

    outcome
}
