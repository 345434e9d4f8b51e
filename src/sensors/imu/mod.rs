extern crate nalgebra as na;

use na::{Vector3,Matrix3};
use crate::Float;

pub mod imu_queue;
pub mod imu_ingest;

/// One inertial reading in the body (IMU) frame.
/// `dt` is measured against the previously received reading, not the previously queued one.
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct ImuSample {
    pub timestamp: Float,
    pub linear_acceleration: Vector3<Float>,
    pub angular_velocity: Vector3<Float>,
    pub dt: Float
}

impl ImuSample {
    pub fn new(timestamp: Float, linear_acceleration: Vector3<Float>, angular_velocity: Vector3<Float>, dt: Float) -> ImuSample {
        ImuSample{timestamp,linear_acceleration,angular_velocity,dt}
    }

    /// Angular velocity expressed in the camera frame, `R_cam_imu^T * omega`.
    pub fn angular_velocity_in_camera(&self, r_cam_imu: &Matrix3<Float>) -> Vector3<Float> {
        r_cam_imu.transpose()*self.angular_velocity
    }
}
