extern crate nalgebra as na;

use std::path::PathBuf;
use na::{Matrix3,Matrix4};
use serde_yaml::Value;
use tracing::info;

use crate::config::{camera_model::CameraModel,noise_parameters::NoiseParameters,filter_parameters::FilterParameters,raw_parameters::RawParameters};
use crate::sensors::camera::{CameraCalibration,DistortionModel,Intrinsics};
use crate::{Float,IMAGE_TOPIC};

pub mod camera_model;
pub mod filter_parameters;
pub mod noise_parameters;
pub mod raw_parameters;

/// Largest entry of `R^T R - I` accepted for the extrinsic rotation.
pub const ORTHONORMALITY_EPS: Float = 1e-5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration {path}: {source}")]
    Io { path: PathBuf, #[source] source: std::io::Error },
    #[error("configuration is not valid yaml: {0}")]
    Yaml(#[source] serde_yaml::Error),
    #[error("configuration root must be a mapping")]
    NotAMapping,
    #[error("kalibr_camera_name must be a string, got {0}")]
    CameraName(String),
    #[error("camera block '{0}' not found")]
    MissingCamera(String),
    #[error("camera block '{name}' is malformed: {source}")]
    Camera { name: String, #[source] source: serde_yaml::Error },
    #[error("tuning parameters are malformed: {0}")]
    Tuning(#[source] serde_yaml::Error),
    #[error("intrinsics [f_u, f_v, c_u, c_v] missing")]
    MissingIntrinsics,
    #[error("expected 4 intrinsics [f_u, f_v, c_u, c_v], got {0}")]
    IntrinsicsLength(usize),
    #[error("focal lengths must be positive and finite, got f_u={f_u}, f_v={f_v}")]
    FocalLength { f_u: Float, f_v: Float },
    #[error("expected 4 distortion coefficients, got {0}")]
    DistortionLength(usize),
    #[error("T_cam_imu missing")]
    MissingExtrinsic,
    #[error("T_cam_imu must be a 4x4 array: {0}")]
    ExtrinsicShape(String),
    #[error("T_cam_imu[{row}][{col}] is not a finite number")]
    ExtrinsicEntry { row: usize, col: usize },
    #[error("imu_queue_capacity must be at least 1")]
    ImuQueueCapacity,
    #[error("rotation block of T_cam_imu is not a proper rotation (max deviation from orthonormal {0:e})")]
    ExtrinsicNotOrthonormal(Float)
}

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct TrackerParameters {
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub ransac_threshold: Float
}

/// Everything derived from the raw configuration. Built once before any sensor data is handled.
#[derive(Debug,Clone,PartialEq)]
pub struct PipelineParameters {
    pub camera_name: String,
    pub image_topic: String,
    pub calibration: CameraCalibration,
    pub camera: CameraModel,
    pub noise: NoiseParameters,
    pub filter: FilterParameters,
    pub tracker: TrackerParameters,
    pub imu_queue_capacity: Option<usize>
}

impl PipelineParameters {
    pub fn log_summary(&self) {
        let intrinsics = &self.calibration.intrinsics;
        let coeffs = &self.calibration.distortion_coeffs;
        info!("Loaded {}", self.camera_name);
        info!("-Intrinsics {}, {}, {}, {}", intrinsics.f_u, intrinsics.f_v, intrinsics.c_u, intrinsics.c_v);
        info!("-Distortion {} {}, {}, {}, {}", self.calibration.distortion_model, coeffs[0], coeffs[1], coeffs[2], coeffs[3]);
        info!("-Camera topic {}", self.image_topic);
        info!("-T_cam_imu {}", self.calibration.t_cam_imu());
    }
}

/// Turns raw calibration into the structures the tracker and estimator are initialized with.
/// Performs no I/O; identical input gives identical output.
pub fn derive_parameters(raw: &RawParameters) -> Result<PipelineParameters, ConfigError> {
    let camera = &raw.camera;
    let tuning = &raw.tuning;

    let intrinsics = parse_intrinsics(camera.intrinsics.as_deref())?;
    let distortion_coeffs = parse_distortion_coeffs(camera.distortion_coeffs.as_deref())?;
    let distortion_model = camera.distortion_model.as_deref().map_or(DistortionModel::None, DistortionModel::from_name);
    let t_cam_imu = parse_extrinsic(camera.t_cam_imu.as_ref().ok_or(ConfigError::MissingExtrinsic)?)?;

    let calibration = CameraCalibration::new(intrinsics, distortion_model, distortion_coeffs, &t_cam_imu);
    check_orthonormal(&calibration.extrinsic_rotation)?;

    if tuning.imu_queue_capacity == Some(0) {
        return Err(ConfigError::ImuQueueCapacity);
    }

    Ok(PipelineParameters {
        camera_name: raw.kalibr_camera_name.clone(),
        image_topic: camera.rostopic.clone().unwrap_or_else(|| String::from(IMAGE_TOPIC)),
        camera: CameraModel::from_calibration(&calibration),
        noise: NoiseParameters::new(&tuning.imu_vars, &tuning.imu_covars, tuning.feature_covariance, &intrinsics),
        filter: FilterParameters::new(tuning, intrinsics.f_u),
        tracker: TrackerParameters {
            grid_rows: tuning.n_grid_rows,
            grid_cols: tuning.n_grid_cols,
            ransac_threshold: tuning.ransac_threshold
        },
        imu_queue_capacity: tuning.imu_queue_capacity,
        calibration
    })
}

pub fn parse_value(root: &Value) -> Result<PipelineParameters, ConfigError> {
    derive_parameters(&RawParameters::from_value(root)?)
}

fn parse_intrinsics(values: Option<&[Float]>) -> Result<Intrinsics, ConfigError> {
    let values = values.ok_or(ConfigError::MissingIntrinsics)?;
    let array: [Float; 4] = values.try_into().map_err(|_| ConfigError::IntrinsicsLength(values.len()))?;
    let intrinsics = Intrinsics::from_kalibr(&array);
    match intrinsics.f_u.is_finite() && intrinsics.f_v.is_finite() && intrinsics.f_u > 0.0 && intrinsics.f_v > 0.0 {
        true => Ok(intrinsics),
        false => Err(ConfigError::FocalLength{f_u: intrinsics.f_u, f_v: intrinsics.f_v})
    }
}

fn parse_distortion_coeffs(values: Option<&[Float]>) -> Result<[Float; 4], ConfigError> {
    match values {
        None => Ok([0.0; 4]),
        Some(v) => v.try_into().map_err(|_| ConfigError::DistortionLength(v.len()))
    }
}

/// Reads a nested 4x4 numeric array, row major.
pub fn parse_extrinsic(value: &Value) -> Result<Matrix4<Float>, ConfigError> {
    let rows = value.as_sequence().ok_or_else(|| ConfigError::ExtrinsicShape(String::from("not a list of rows")))?;
    if rows.len() != 4 {
        return Err(ConfigError::ExtrinsicShape(format!("{} rows", rows.len())));
    }

    let mut t_cam_imu = Matrix4::<Float>::zeros();
    for (i,row) in rows.iter().enumerate() {
        let cols = row.as_sequence().ok_or_else(|| ConfigError::ExtrinsicShape(format!("row {} is not a list", i)))?;
        if cols.len() != 4 {
            return Err(ConfigError::ExtrinsicShape(format!("row {} has {} entries", i, cols.len())));
        }
        for (j,entry) in cols.iter().enumerate() {
            t_cam_imu[(i,j)] = entry.as_f64().filter(|v| v.is_finite()).ok_or(ConfigError::ExtrinsicEntry{row: i, col: j})?;
        }
    }

    Ok(t_cam_imu)
}

fn check_orthonormal(rotation: &Matrix3<Float>) -> Result<(), ConfigError> {
    let deviation = (rotation.transpose()*rotation - Matrix3::<Float>::identity()).amax();
    match deviation <= ORTHONORMALITY_EPS && rotation.determinant() > 0.0 {
        true => Ok(()),
        false => Err(ConfigError::ExtrinsicNotOrthonormal(deviation))
    }
}
