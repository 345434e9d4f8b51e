extern crate nalgebra as na;

use na::{Vector3,UnitQuaternion};
use crate::config::{PipelineParameters,camera_model::CameraModel,noise_parameters::NoiseParameters,filter_parameters::FilterParameters};
use crate::{Float,GRAVITY_MAGNITUDE};

/// IMU state the estimator starts from, in the global frame.
#[derive(Debug,Clone,PartialEq)]
pub struct ImuState {
    pub q_ig: UnitQuaternion<Float>,
    pub p_i_g: Vector3<Float>,
    pub v_i_g: Vector3<Float>,
    pub b_g: Vector3<Float>,
    pub b_a: Vector3<Float>,
    pub g: Vector3<Float>
}

impl Default for ImuState {
    fn default() -> Self {
        ImuState {
            q_ig: UnitQuaternion::identity(),
            p_i_g: Vector3::<Float>::zeros(),
            v_i_g: Vector3::<Float>::zeros(),
            b_g: Vector3::<Float>::zeros(),
            b_a: Vector3::<Float>::zeros(),
            g: Vector3::<Float>::new(0.0,0.0,-GRAVITY_MAGNITUDE)
        }
    }
}

pub trait Estimator {
    fn initialize(&mut self, camera: &CameraModel, noise: &NoiseParameters, filter: &FilterParameters, initial_state: &ImuState) -> ();
}

pub fn initialize_estimator<E: Estimator>(estimator: &mut E, parameters: &PipelineParameters, initial_state: &ImuState) -> () {
    estimator.initialize(&parameters.camera, &parameters.noise, &parameters.filter, initial_state);
}
