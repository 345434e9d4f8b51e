use std::sync::Arc;
use parking_lot::Mutex;
use tracing::{debug,warn};

use crate::sensors::ImuMessage;
use crate::sensors::imu::{ImuSample,imu_queue::ImuQueue};
use crate::Float;

#[derive(Debug,Default)]
struct IngestState {
    queue: ImuQueue,
    previous_timestamp: Option<Float>
}

/**
 * Inertial queue shared between the inertial callback and the image callback.
 * Every append and every drain holds the same lock for its whole duration, so neither side
 * can observe a half-applied update of the other.
 */
#[derive(Debug,Clone,Default)]
pub struct SharedImuQueue {
    state: Arc<Mutex<IngestState>>
}

impl SharedImuQueue {
    pub fn new(queue: ImuQueue) -> SharedImuQueue {
        SharedImuQueue{state: Arc::new(Mutex::new(IngestState{queue, previous_timestamp: None}))}
    }

    pub fn ingest_handle(&self) -> ImuIngest {
        ImuIngest{state: Arc::clone(&self.state)}
    }

    pub fn drain_up_to(&self, cutoff: Float) -> Vec<ImuSample> {
        self.state.lock().queue.drain_up_to(cutoff)
    }

    pub fn len(&self) -> usize {
        self.state.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().queue.is_empty()
    }

    pub fn timestamps(&self) -> Vec<Float> {
        self.state.lock().queue.timestamps()
    }
}

/// Append-only view of a `SharedImuQueue`, handed to whatever delivers inertial messages.
#[derive(Debug,Clone)]
pub struct ImuIngest {
    state: Arc<Mutex<IngestState>>
}

impl ImuIngest {

    /// Converts and queues one inertial message. The first message after construction or `reset`
    /// only seeds the time gap and is not queued; returns whether the message was queued.
    /// Stamps must not go backwards, which debug builds assert against the previous message,
    /// whether or not it is still queued.
    pub fn ingest(&self, message: &ImuMessage) -> bool {
        let current_time = message.stamp.to_sec();
        let mut state = self.state.lock();

        let previous_time = match state.previous_timestamp {
            Some(t) => t,
            None => {
                debug!("seeding imu clock at {:.9}", current_time);
                state.previous_timestamp = Some(current_time);
                return false;
            }
        };
        debug_assert!(current_time >= previous_time, "imu reading at {} arrived after {}", current_time, previous_time);
        state.previous_timestamp = Some(current_time);

        let sample = ImuSample::new(current_time, message.linear_acceleration, message.angular_velocity, current_time - previous_time);
        let evicted = state.queue.push(sample);
        if evicted > 0 {
            warn!("imu queue at capacity {:?}, dropped {} oldest readings", state.queue.capacity_limit(), evicted);
        }
        true
    }

    /// Forgets the time gap so that the next message seeds it again. Queued readings are kept.
    pub fn reset(&self) {
        self.state.lock().previous_timestamp = None;
    }
}
