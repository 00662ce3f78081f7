//! Background engine start-up

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use super::transport::{EngineCommand, ProcessEngine};
use super::BoxedEngine;
use crate::error::EngineError;

/// Engine launch state, polled once per frame
pub enum EngineLoader {
    Loading {
        receiver: Receiver<Result<BoxedEngine, EngineError>>,
        start_time: Instant,
    },
    Done,
}

impl EngineLoader {
    /// Launch the engine process on a worker thread
    pub fn spawn(command: EngineCommand) -> Self {
        let (tx, rx) = channel();

        thread::spawn(move || {
            info!(%command, "launching engine");
            let result = ProcessEngine::spawn(&command).map(|engine| Box::new(engine) as BoxedEngine);
            let _ = tx.send(result);
        });

        EngineLoader::Loading {
            receiver: rx,
            start_time: Instant::now(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, EngineLoader::Loading { .. })
    }

    pub fn loading_elapsed(&self) -> Option<Duration> {
        match self {
            EngineLoader::Loading { start_time, .. } => Some(start_time.elapsed()),
            EngineLoader::Done => None,
        }
    }

    /// Take the launch result once it is available
    pub fn poll(&mut self) -> Option<Result<BoxedEngine, EngineError>> {
        let result = match self {
            EngineLoader::Loading { receiver, start_time } => match receiver.try_recv() {
                Ok(result) => {
                    if result.is_ok() {
                        info!(elapsed_ms = start_time.elapsed().as_millis() as u64, "engine loaded");
                    }
                    result
                }
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    warn!("engine loader thread exited without a result");
                    Err(EngineError::Handshake("loader thread exited".to_string()))
                }
            },
            EngineLoader::Done => return None,
        };

        *self = EngineLoader::Done;
        Some(result)
    }
}
