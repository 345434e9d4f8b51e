#![allow(dead_code)]

extern crate nalgebra as na;
extern crate image as image_rs;

use std::cell::Cell;
use image_rs::{GrayImage,RgbImage};
use na::{Vector2,Vector3};

use vio_sync::config::PipelineParameters;
use vio_sync::io::parse_parameters;
use vio_sync::sensors::ImuMessage;
use vio_sync::sensors::Stamp;
use vio_sync::tracker::{FeatureMap,FeatureTracker};
use vio_sync::visualize::{TrackImage,TrackImageSink};
use vio_sync::Float;

pub const IDENTITY_CAMCHAIN: &str = "
cam0:
  camera_model: pinhole
  intrinsics: [300.0, 300.0, 320.0, 240.0]
  distortion_model: radtan
  distortion_coeffs: [0.1, -0.05, 0.001, 0.002]
  T_cam_imu:
  - [1.0, 0.0, 0.0, 0.0]
  - [0.0, 1.0, 0.0, 0.0]
  - [0.0, 0.0, 1.0, 0.0]
  - [0.0, 0.0, 0.0, 1.0]
";

pub fn identity_parameters() -> PipelineParameters {
    parse_parameters(IDENTITY_CAMCHAIN).expect("identity camchain must parse")
}

pub fn imu_message(t: Float, angular_velocity: Vector3<Float>) -> ImuMessage {
    ImuMessage {
        stamp: Stamp::from_sec(t),
        linear_acceleration: Vector3::<Float>::new(0.0,0.0,9.81),
        angular_velocity
    }
}

#[derive(Debug,Clone,PartialEq)]
pub enum TrackerEvent {
    Rotation(Vector3<Float>),
    Frame(Float, u32, u32)
}

/// Tracker double that records every call in order.
#[derive(Debug,Default)]
pub struct RecordingTracker {
    pub events: Vec<TrackerEvent>,
    pub tracked: FeatureMap,
    pub new: FeatureMap,
    pub grid: Option<(usize,usize)>,
    pub ransac_threshold: Option<Float>,
    pub track_image_requests: Cell<usize>
}

impl RecordingTracker {
    pub fn with_features(tracked: &[(u64,(Float,Float))], new: &[(u64,(Float,Float))]) -> RecordingTracker {
        RecordingTracker {
            tracked: tracked.iter().map(|&(id,(u,v))| (id, Vector2::<Float>::new(u,v))).collect(),
            new: new.iter().map(|&(id,(u,v))| (id, Vector2::<Float>::new(u,v))).collect(),
            ..Default::default()
        }
    }

    pub fn rotations(&self) -> Vec<Vector3<Float>> {
        self.events.iter().filter_map(|e| match e {
            TrackerEvent::Rotation(w) => Some(*w),
            _ => None
        }).collect()
    }

    pub fn frames(&self) -> Vec<Float> {
        self.events.iter().filter_map(|e| match e {
            TrackerEvent::Frame(t,_,_) => Some(*t),
            _ => None
        }).collect()
    }
}

impl FeatureTracker for RecordingTracker {
    fn add_rotation_reading(&mut self, angular_velocity: &Vector3<Float>) -> () {
        self.events.push(TrackerEvent::Rotation(*angular_velocity));
    }

    fn set_current_frame(&mut self, image: GrayImage, timestamp: Float) -> () {
        self.events.push(TrackerEvent::Frame(timestamp, image.width(), image.height()));
    }

    fn tracked_features(&self) -> FeatureMap {
        self.tracked.clone()
    }

    fn new_features(&self) -> FeatureMap {
        self.new.clone()
    }

    fn track_image(&self) -> RgbImage {
        self.track_image_requests.set(self.track_image_requests.get() + 1);
        RgbImage::new(4,3)
    }

    fn set_grid_size(&mut self, rows: usize, cols: usize) -> () {
        self.grid = Some((rows,cols));
    }

    fn set_ransac_threshold(&mut self, threshold: Float) -> () {
        self.ransac_threshold = Some(threshold);
    }
}

/// Sink with a configurable number of subscribers that keeps what it receives.
#[derive(Debug,Default)]
pub struct CollectingSink {
    pub subscribers: usize,
    pub published: std::cell::RefCell<Vec<TrackImage>>
}

impl TrackImageSink for CollectingSink {
    fn subscriber_count(&self) -> usize {
        self.subscribers
    }

    fn publish(&self, track_image: TrackImage) -> () {
        self.published.borrow_mut().push(track_image);
    }
}
