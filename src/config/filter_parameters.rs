use crate::config::noise_parameters::normalized_variance;
use crate::config::raw_parameters::TuningParameters;
use crate::Float;

/// Thresholds steering when the estimator updates, keeps or marginalizes camera states.
#[derive(Debug,Clone,PartialEq)]
pub struct FilterParameters {
    /// Squared, on the normalized image plane.
    pub max_gn_cost_norm: Float,
    pub translation_threshold: Float,
    pub min_rcond: Float,
    /// Read from `keyframe_transl_dist`, the pairing existing estimator tunings were made with.
    pub redundancy_angle_thresh: Float,
    /// Read from `keyframe_rot_dist`.
    pub redundancy_distance_thresh: Float,
    pub max_track_length: usize,
    pub min_track_length: usize,
    pub max_cam_states: usize
}

impl FilterParameters {
    pub fn new(tuning: &TuningParameters, f_u: Float) -> FilterParameters {
        FilterParameters {
            max_gn_cost_norm: normalized_variance(tuning.max_gn_cost_norm, f_u),
            translation_threshold: tuning.translation_threshold,
            min_rcond: tuning.min_rcond,
            redundancy_angle_thresh: tuning.keyframe_transl_dist,
            redundancy_distance_thresh: tuning.keyframe_rot_dist,
            max_track_length: tuning.max_track_length,
            min_track_length: tuning.min_track_length,
            max_cam_states: tuning.max_cam_states
        }
    }
}
