use chrono::NaiveDate;
use tokio::sync::mpsc;

use super::Indexes;
use crate::season::Season;

/// A single change to the indexes, produced by a list-fetch worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexUpdate {
    /// A player appeared on a roster in `season`.
    Player {
        name: String,
        link: String,
        season: Season,
    },
    /// A game was scheduled on `date`.
    Game { date: NaiveDate, link: String },
}

/// Handle for sending index updates
///
/// This is cheaply cloneable and can be shared across list-fetch workers.
#[derive(Clone)]
pub struct IndexHandle {
    tx: mpsc::Sender<IndexUpdate>,
}

impl IndexHandle {
    pub fn new(tx: mpsc::Sender<IndexUpdate>) -> Self {
        Self { tx }
    }

    /// Send an update to the writer
    ///
    /// Waits while the channel is full. If the writer has gone away the update
    /// is dropped and the error logged.
    pub async fn record(&self, update: IndexUpdate) {
        if let Err(e) = self.tx.send(update).await {
            tracing::error!("Failed to record index update: {}", e);
        }
    }
}

/// Task that owns the indexes and applies updates until every handle is dropped
pub struct IndexWriter {
    rx: mpsc::Receiver<IndexUpdate>,
    indexes: Indexes,
}

impl IndexWriter {
    pub fn new(rx: mpsc::Receiver<IndexUpdate>, indexes: Indexes) -> Self {
        Self { rx, indexes }
    }

    /// Consume updates until the channel closes, then hand the indexes back.
    pub async fn run(mut self) -> Indexes {
        tracing::debug!("Index writer started");
        let mut applied = 0usize;

        while let Some(update) = self.rx.recv().await {
            match update {
                IndexUpdate::Player { name, link, season } => {
                    self.indexes.players.record_appearance(&name, &link, season);
                }
                IndexUpdate::Game { date, link } => self.indexes.games.push(date, &link),
            }
            applied += 1;
        }

        tracing::debug!(
            applied,
            players = self.indexes.players.len(),
            dates = self.indexes.games.len(),
            "Index writer finished"
        );
        self.indexes
    }
}

/// Create an index handle/writer pair
///
/// Spawn the writer with `tokio::spawn(writer.run())`, share clones of the
/// handle with the workers, then drop every handle and await the task to get
/// the updated indexes back.
pub fn create_index_system(initial: Indexes, buffer_size: usize) -> (IndexHandle, IndexWriter) {
    let (tx, rx) = mpsc::channel(buffer_size.max(1));
    (IndexHandle::new(tx), IndexWriter::new(rx, initial))
}
