use serde::{Serialize,Deserialize};
use serde_yaml::Value;
use crate::config::ConfigError;
use crate::Float;

pub const DEFAULT_CAMERA_NAME: &str = "cam0";

/// Continuous-time IMU noise variances, the diagonal of the 12x12 process noise.
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct ImuVariances {
    pub w_var: Float,
    pub dbg_var: Float,
    pub a_var: Float,
    pub dba_var: Float
}

impl Default for ImuVariances {
    fn default() -> Self {
        ImuVariances {
            w_var: 1e-5,
            dbg_var: 3.6733e-5,
            a_var: 1e-3,
            dba_var: 7e-4
        }
    }
}

/// Diagonal of the initial 15x15 IMU state covariance.
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct InitialCovariances {
    pub q_var_init: Float,
    pub bg_var_init: Float,
    pub v_var_init: Float,
    pub ba_var_init: Float,
    pub p_var_init: Float
}

impl Default for InitialCovariances {
    fn default() -> Self {
        InitialCovariances {
            q_var_init: 1e-5,
            bg_var_init: 1e-2,
            v_var_init: 1e-2,
            ba_var_init: 1e-2,
            p_var_init: 1e-12
        }
    }
}

/**
 * Every tunable of the pipeline. Keys missing from the configuration source take the values below.
 * `max_gn_cost_norm` and `feature_covariance` are in pixels, everything else is in the unit the
 * estimator expects.
 */
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct TuningParameters {
    pub n_grid_rows: usize,
    pub n_grid_cols: usize,
    #[serde(alias = "ransac_threshold_")]
    pub ransac_threshold: Float,
    pub feature_covariance: Float,
    pub imu_vars: ImuVariances,
    pub imu_covars: InitialCovariances,
    pub max_gn_cost_norm: Float,
    pub translation_threshold: Float,
    pub min_rcond: Float,
    pub keyframe_transl_dist: Float,
    pub keyframe_rot_dist: Float,
    pub max_track_length: usize,
    pub min_track_length: usize,
    pub max_cam_states: usize,
    pub imu_queue_capacity: Option<usize>
}

impl Default for TuningParameters {
    fn default() -> Self {
        TuningParameters {
            n_grid_rows: 8,
            n_grid_cols: 8,
            ransac_threshold: 0.000002,
            feature_covariance: 7.0,
            imu_vars: ImuVariances::default(),
            imu_covars: InitialCovariances::default(),
            max_gn_cost_norm: 11.0,
            translation_threshold: 0.05,
            min_rcond: 3e-12,
            keyframe_transl_dist: 0.005,
            keyframe_rot_dist: 0.05,
            max_track_length: 1000,
            min_track_length: 3,
            max_cam_states: 20,
            imu_queue_capacity: None
        }
    }
}

/// One camera block of a kalibr camchain file.
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct KalibrCamera {
    #[serde(default = "default_camera_model")]
    pub camera_model: String,
    #[serde(default)]
    pub intrinsics: Option<Vec<Float>>,
    #[serde(default)]
    pub distortion_model: Option<String>,
    #[serde(default)]
    pub distortion_coeffs: Option<Vec<Float>>,
    /// Kept untyped so that shape errors can be reported precisely.
    #[serde(rename = "T_cam_imu", default)]
    pub t_cam_imu: Option<Value>,
    #[serde(default)]
    pub rostopic: Option<String>
}

fn default_camera_model() -> String {
    String::from("pinhole")
}

/// Configuration as read from the source, before any derivation.
#[derive(Debug,Clone,PartialEq)]
pub struct RawParameters {
    pub kalibr_camera_name: String,
    pub camera: KalibrCamera,
    pub tuning: TuningParameters
}

impl RawParameters {

    /// Reads the document root as a key/value store: `kalibr_camera_name` selects the camera block,
    /// every other recognised key is a tuning parameter.
    pub fn from_value(root: &Value) -> Result<RawParameters, ConfigError> {
        let mapping = root.as_mapping().ok_or(ConfigError::NotAMapping)?;

        let kalibr_camera_name = match mapping.get("kalibr_camera_name") {
            Some(Value::String(name)) => name.clone(),
            Some(other) => return Err(ConfigError::CameraName(format!("{:?}", other))),
            None => String::from(DEFAULT_CAMERA_NAME)
        };

        let camera_block = mapping.get(kalibr_camera_name.as_str()).ok_or_else(|| ConfigError::MissingCamera(kalibr_camera_name.clone()))?;
        let camera = serde_yaml::from_value::<KalibrCamera>(camera_block.clone()).map_err(|source| ConfigError::Camera{name: kalibr_camera_name.clone(), source})?;

        let tuning = serde_yaml::from_value::<TuningParameters>(root.clone()).map_err(ConfigError::Tuning)?;

        Ok(RawParameters{kalibr_camera_name, camera, tuning})
    }
}
