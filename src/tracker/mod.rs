extern crate nalgebra as na;
extern crate image as image_rs;

use std::collections::BTreeMap;
use image_rs::{GrayImage,RgbImage};
use na::{Vector2,Vector3};

use crate::config::TrackerParameters;
use crate::sensors::camera::{CameraCalibration,DistortionModel,pinhole::Pinhole};
use crate::Float;

pub type FeatureId = u64;

/// Feature id to its position in the current image, ordered by id.
pub type FeatureMap = BTreeMap<FeatureId, Vector2<Float>>;

/**
 * Feature detection and tracking across frames. Implementations are expected to integrate the
 * rotation readings received since the last frame to predict where features moved, which is why
 * readings must arrive in order and before the frame they precede.
 */
pub trait FeatureTracker {
    /// One angular velocity reading already expressed in the camera frame.
    fn add_rotation_reading(&mut self, angular_velocity: &Vector3<Float>) -> ();
    fn set_current_frame(&mut self, image: GrayImage, timestamp: Float) -> ();
    /// Features carried over from earlier frames.
    fn tracked_features(&self) -> FeatureMap;
    /// Features first detected in the current frame.
    fn new_features(&self) -> FeatureMap;
    /// Current frame with the tracks drawn on it.
    fn track_image(&self) -> RgbImage;
    fn set_grid_size(&mut self, rows: usize, cols: usize) -> ();
    fn set_ransac_threshold(&mut self, threshold: Float) -> ();
}

/// Builds a tracker from the camera intrinsics and distortion, then applies the grid and RANSAC settings.
pub fn setup_tracker<T, B>(calibration: &CameraCalibration, parameters: &TrackerParameters, build: B) -> T
    where T: FeatureTracker, B: FnOnce(&Pinhole, &[Float; 4], &DistortionModel) -> T {
    let mut tracker = build(&calibration.projection(), &calibration.distortion_coeffs, &calibration.distortion_model);
    tracker.set_grid_size(parameters.grid_rows, parameters.grid_cols);
    tracker.set_ransac_threshold(parameters.ransac_threshold);
    tracker
}
