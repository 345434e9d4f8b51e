use std::collections::VecDeque;
use crate::sensors::imu::ImuSample;
use crate::Float;

/**
 * Arrival-ordered inertial readings waiting to be assigned to the next image.
 *
 * Callers must push readings with non-decreasing timestamps, otherwise `drain_up_to` splits the
 * interval in the wrong place. `ImuIngest` checks this in debug builds.
 */
#[derive(Debug,Clone,Default)]
pub struct ImuQueue {
    samples: VecDeque<ImuSample>,
    capacity: Option<usize>
}

impl ImuQueue {
    pub fn new() -> ImuQueue {
        ImuQueue{samples: VecDeque::new(), capacity: None}
    }

    /// Queue holding at most `capacity` readings, the oldest being evicted first.
    pub fn with_capacity_limit(capacity: usize) -> ImuQueue {
        assert!(capacity > 0);
        ImuQueue{samples: VecDeque::with_capacity(capacity), capacity: Some(capacity)}
    }

    /// Appends to the tail. Returns how many readings were evicted from the front to honour the capacity limit.
    pub fn push(&mut self, sample: ImuSample) -> usize {
        let mut evicted = 0;
        if let Some(capacity) = self.capacity {
            while self.samples.len() >= capacity {
                self.samples.pop_front();
                evicted += 1;
            }
        }
        self.samples.push_back(sample);
        evicted
    }

    /// Removes and returns the readings in front of the first one stamped after `cutoff`.
    /// Everything is drained if no reading is later than `cutoff`.
    pub fn drain_up_to(&mut self, cutoff: Float) -> Vec<ImuSample> {
        let frame_end = self.samples.iter().position(|s| s.timestamp > cutoff).unwrap_or(self.samples.len());
        self.samples.drain(..frame_end).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity_limit(&self) -> Option<usize> {
        self.capacity
    }

    pub fn timestamps(&self) -> Vec<Float> {
        self.samples.iter().map(|s| s.timestamp).collect()
    }
}
