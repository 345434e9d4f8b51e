pub mod config;
pub mod dispatch;
pub mod estimator;
pub mod image;
pub mod io;
pub mod sensors;
pub mod sync;
pub mod tracker;
pub mod visualize;

macro_rules! define_float {
    ($f:tt) => {
        pub use std::$f as float;
        pub type Float = $f;
    }
}

define_float!(f64);

pub const GRAVITY_MAGNITUDE: Float = 9.81;

pub const IMAGE_TOPIC: &str = "/rig/left/image_mono";
pub const IMU_TOPIC: &str = "/rig/imu";
pub const TRACK_IMAGE_TOPIC: &str = "/rig/left/image_mono/tracks";
pub const CAMERA_FRAME_ID: &str = "cam0";
