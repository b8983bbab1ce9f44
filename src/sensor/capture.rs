use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{SendTimeoutError, Sender};

use super::SampleSource;
use crate::error::{MotionError, Result};

/// How long a blocked send waits before re-checking the stop flag
const SEND_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Background thread that drains a source into a channel
///
/// The thread owns the source exclusively. It stops when the source is
/// exhausted or fails, when the receiver is dropped, or when the capture
/// itself is dropped.
pub struct SensorCapture {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SensorCapture {
    /// Start capturing from `source`
    ///
    /// With `realtime` set, each buffer is followed by a pause equal to its
    /// duration at the source's sample rate.
    pub fn spawn(
        mut source: Box<dyn SampleSource>,
        tx: Sender<anyhow::Result<Vec<f64>>>,
        realtime: bool,
    ) -> Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let sample_rate = source.sample_rate();

        let handle = std::thread::Builder::new()
            .name("sensor-capture".into())
            .spawn(move || {
                log::debug!("Capture thread started at {:.1} Hz", sample_rate);
                while !thread_stop.load(Ordering::Relaxed) {
                    let item = match source.next_buffer() {
                        Ok(Some(data)) => Ok(data),
                        Ok(None) => break,
                        Err(e) => Err(e),
                    };
                    let failed = item.is_err();
                    let pace = match &item {
                        Ok(data) if realtime && sample_rate > 0.0 => {
                            Some(Duration::from_secs_f64(data.len() as f64 / sample_rate))
                        }
                        _ => None,
                    };

                    if !send_until_stopped(&tx, item, &thread_stop) || failed {
                        break;
                    }
                    if let Some(pace) = pace {
                        std::thread::sleep(pace);
                    }
                }
                log::debug!("Capture thread finished");
            })
            .map_err(|e| MotionError::Source(format!("failed to spawn capture thread: {}", e)))?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }
}

/// Returns false if the receiver is gone or a stop was requested
fn send_until_stopped(
    tx: &Sender<anyhow::Result<Vec<f64>>>,
    mut item: anyhow::Result<Vec<f64>>,
    stop: &AtomicBool,
) -> bool {
    loop {
        match tx.send_timeout(item, SEND_POLL_INTERVAL) {
            Ok(()) => return true,
            Err(SendTimeoutError::Timeout(pending)) => {
                if stop.load(Ordering::Relaxed) {
                    return false;
                }
                item = pending;
            }
            Err(SendTimeoutError::Disconnected(_)) => {
                log::warn!("Sample receiver dropped");
                return false;
            }
        }
    }
}

impl Drop for SensorCapture {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Capture thread panicked");
            }
        }
    }
}
