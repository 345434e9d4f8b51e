extern crate nalgebra as na;

use na::{Vector3,UnitQuaternion};
use crate::sensors::camera::CameraCalibration;
use crate::Float;

/// Camera description consumed by the estimator: pinhole intrinsics and the camera/IMU relative pose.
#[derive(Debug,Clone,PartialEq)]
pub struct CameraModel {
    pub f_u: Float,
    pub f_v: Float,
    pub c_u: Float,
    pub c_v: Float,
    pub q_ci: UnitQuaternion<Float>,
    pub p_c_i: Vector3<Float>
}

impl CameraModel {
    pub fn from_calibration(calibration: &CameraCalibration) -> CameraModel {
        let intrinsics = &calibration.intrinsics;
        CameraModel {
            f_u: intrinsics.f_u,
            f_v: intrinsics.f_v,
            c_u: intrinsics.c_u,
            c_v: intrinsics.c_v,
            q_ci: calibration.q_cam_imu(),
            p_c_i: calibration.extrinsic_translation
        }
    }
}
