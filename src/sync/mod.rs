extern crate nalgebra as na;

use na::Matrix3;
use tracing::info;

use crate::sensors::imu::{ImuSample,imu_ingest::SharedImuQueue};
use crate::tracker::FeatureTracker;
use crate::Float;

/// Hands the tracker the gyro readings that belong to the interval ending at an image.
#[derive(Debug,Clone)]
pub struct TemporalSynchronizer {
    queue: SharedImuQueue,
    r_cam_imu: Matrix3<Float>
}

impl TemporalSynchronizer {
    pub fn new(queue: SharedImuQueue, r_cam_imu: Matrix3<Float>) -> TemporalSynchronizer {
        TemporalSynchronizer{queue, r_cam_imu}
    }

    /// Drains every queued reading stamped at or before `image_time` and forwards its angular velocity,
    /// rotated into the camera frame, one reading at a time and in arrival order.
    /// Returns the number of readings forwarded.
    pub fn synchronize<T: FeatureTracker>(&self, tracker: &mut T, image_time: Float) -> usize {
        let imu_since_prev_img: Vec<ImuSample> = self.queue.drain_up_to(image_time);

        for reading in &imu_since_prev_img {
            let gyro_measurement = reading.angular_velocity_in_camera(&self.r_cam_imu);
            tracker.add_rotation_reading(&gyro_measurement);
        }

        info!("{} imu readings in queue", imu_since_prev_img.len());
        imu_since_prev_img.len()
    }

    pub fn queue(&self) -> &SharedImuQueue {
        &self.queue
    }
}
