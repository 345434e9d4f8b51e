extern crate nalgebra as na;

use na::{SMatrix,SVector};
use crate::config::raw_parameters::{ImuVariances,InitialCovariances};
use crate::sensors::camera::Intrinsics;
use crate::Float;

/// Orientation, gyro bias, velocity, accel bias, position; 3 entries each.
pub type InitialStateCovariance = SMatrix<Float,15,15>;
/// Angular velocity, gyro bias rate, acceleration, accel bias rate; 3 entries each.
pub type ProcessNoiseCovariance = SMatrix<Float,12,12>;

#[derive(Debug,Clone,PartialEq)]
pub struct NoiseParameters {
    pub initial_state_covariance: InitialStateCovariance,
    pub process_noise_covariance: ProcessNoiseCovariance,
    pub pixel_noise_u: Float,
    pub pixel_noise_v: Float
}

impl NoiseParameters {
    pub fn new(imu_vars: &ImuVariances, imu_covars: &InitialCovariances, feature_pixel_std: Float, intrinsics: &Intrinsics) -> NoiseParameters {
        NoiseParameters {
            initial_state_covariance: initial_state_covariance(imu_covars),
            process_noise_covariance: process_noise_covariance(imu_vars),
            pixel_noise_u: normalized_variance(feature_pixel_std, intrinsics.f_u),
            pixel_noise_v: normalized_variance(feature_pixel_std, intrinsics.f_v)
        }
    }
}

/// A pixel-space standard deviation as a variance on the normalized image plane.
pub fn normalized_variance(pixel_std: Float, focal_length: Float) -> Float {
    (pixel_std/focal_length).powi(2)
}

fn process_noise_covariance(vars: &ImuVariances) -> ProcessNoiseCovariance {
    let diagonal = SVector::<Float,12>::from_column_slice(&[
        vars.w_var, vars.w_var, vars.w_var,
        vars.dbg_var, vars.dbg_var, vars.dbg_var,
        vars.a_var, vars.a_var, vars.a_var,
        vars.dba_var, vars.dba_var, vars.dba_var]);
    ProcessNoiseCovariance::from_diagonal(&diagonal)
}

fn initial_state_covariance(covars: &InitialCovariances) -> InitialStateCovariance {
    let diagonal = SVector::<Float,15>::from_column_slice(&[
        covars.q_var_init, covars.q_var_init, covars.q_var_init,
        covars.bg_var_init, covars.bg_var_init, covars.bg_var_init,
        covars.v_var_init, covars.v_var_init, covars.v_var_init,
        covars.ba_var_init, covars.ba_var_init, covars.ba_var_init,
        covars.p_var_init, covars.p_var_init, covars.p_var_init]);
    InitialStateCovariance::from_diagonal(&diagonal)
}
