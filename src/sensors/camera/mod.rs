extern crate nalgebra as na;

use std::fmt;
use na::{Vector3,Matrix3,Matrix4,Rotation3,UnitQuaternion};
use crate::sensors::camera::pinhole::Pinhole;
use crate::Float;

pub mod pinhole;

#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Intrinsics {
    pub f_u: Float,
    pub f_v: Float,
    pub c_u: Float,
    pub c_v: Float
}

impl Intrinsics {
    /// Kalibr ordering: `[f_u, f_v, c_u, c_v]`.
    pub fn from_kalibr(values: &[Float; 4]) -> Intrinsics {
        Intrinsics{f_u: values[0], f_v: values[1], c_u: values[2], c_v: values[3]}
    }

    pub fn to_pinhole(&self) -> Pinhole {
        Pinhole::new(self.f_u,self.f_v,self.c_u,self.c_v)
    }
}

#[derive(Debug,Clone,PartialEq,Eq)]
pub enum DistortionModel {
    RadialTangential,
    Equidistant,
    Fov,
    None,
    Other(String)
}

impl DistortionModel {
    /// Names the tracker does not know are kept verbatim.
    pub fn from_name(name: &str) -> DistortionModel {
        match name.trim().to_ascii_lowercase().as_str() {
            "radtan" | "radial-tangential" | "plumb_bob" => DistortionModel::RadialTangential,
            "equidistant" | "equi" => DistortionModel::Equidistant,
            "fov" => DistortionModel::Fov,
            "none" | "" => DistortionModel::None,
            _ => DistortionModel::Other(name.to_string())
        }
    }
}

impl fmt::Display for DistortionModel {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DistortionModel::RadialTangential => write!(f, "radtan"),
            DistortionModel::Equidistant => write!(f, "equidistant"),
            DistortionModel::Fov => write!(f, "fov"),
            DistortionModel::None => write!(f, "none"),
            DistortionModel::Other(name) => write!(f, "{}", name)
        }
    }

}

/// Calibration of the tracked camera together with its pose relative to the IMU.
#[derive(Debug,Clone,PartialEq)]
pub struct CameraCalibration {
    pub intrinsics: Intrinsics,
    pub distortion_model: DistortionModel,
    pub distortion_coeffs: [Float; 4],
    pub extrinsic_rotation: Matrix3<Float>,
    pub extrinsic_translation: Vector3<Float>
}

impl CameraCalibration {
    pub fn new(intrinsics: Intrinsics, distortion_model: DistortionModel, distortion_coeffs: [Float; 4], t_cam_imu: &Matrix4<Float>) -> CameraCalibration {
        CameraCalibration {
            intrinsics,
            distortion_model,
            distortion_coeffs,
            extrinsic_rotation: t_cam_imu.fixed_view::<3,3>(0,0).into_owned(),
            extrinsic_translation: t_cam_imu.fixed_view::<3,1>(0,3).into_owned()
        }
    }

    pub fn projection(&self) -> Pinhole {
        self.intrinsics.to_pinhole()
    }

    /// Only meaningful once the extrinsic rotation has been checked to be orthonormal.
    pub fn q_cam_imu(&self) -> UnitQuaternion<Float> {
        UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(self.extrinsic_rotation))
    }

    pub fn t_cam_imu(&self) -> Matrix4<Float> {
        let mut pose = Matrix4::<Float>::identity();
        pose.fixed_view_mut::<3,3>(0,0).copy_from(&self.extrinsic_rotation);
        pose.fixed_view_mut::<3,1>(0,3).copy_from(&self.extrinsic_translation);
        pose
    }
}
