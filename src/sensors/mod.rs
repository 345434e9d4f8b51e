extern crate nalgebra as na;

use na::Vector3;
use crate::Float;

pub mod camera;
pub mod imu;

/// Sensor clock time as delivered by the transport, split into seconds and nanoseconds.
#[derive(Debug,Copy,Clone,PartialEq,Eq,PartialOrd,Ord,Default)]
pub struct Stamp {
    pub sec: u32,
    pub nsec: u32
}

impl Stamp {
    pub fn new(sec: u32, nsec: u32) -> Stamp {
        Stamp{sec,nsec}
    }

    /// Times outside the representable range saturate: negative and NaN times become the zero
    /// stamp, times past `u32::MAX` seconds the largest one.
    pub fn from_sec(t: Float) -> Stamp {
        if !(t > 0.0) {
            return Stamp::default();
        }
        if t >= u32::MAX as Float {
            return Stamp{sec: u32::MAX, nsec: 0};
        }

        let sec = t.floor();
        let nsec = ((t - sec)*1e9).round();
        match nsec >= 1e9 {
            true => Stamp{sec: (sec as u32).saturating_add(1), nsec: 0},
            false => Stamp{sec: sec as u32, nsec: nsec as u32}
        }
    }

    pub fn to_sec(&self) -> Float {
        self.sec as Float + (self.nsec as Float)*1e-9
    }
}

#[derive(Debug,Copy,Clone)]
pub struct ImuMessage {
    pub stamp: Stamp,
    pub linear_acceleration: Vector3<Float>,
    pub angular_velocity: Vector3<Float>
}

/// Undecoded image as it arrives from the transport. `encoding` follows the usual
/// ROS naming (`mono8`, `bgr8`, ...) or names a compressed format (`png`, `jpeg`).
/// `is_bigendian` only matters for multi-byte pixel formats.
#[derive(Debug,Clone)]
pub struct ImageMessage {
    pub stamp: Stamp,
    pub width: u32,
    pub height: u32,
    pub encoding: String,
    pub is_bigendian: bool,
    pub step: u32,
    pub data: Vec<u8>
}

impl ImageMessage {
    pub fn mono8(stamp: Stamp, width: u32, height: u32, data: Vec<u8>) -> ImageMessage {
        ImageMessage{stamp, width, height, encoding: String::from("mono8"), is_bigendian: false, step: width, data}
    }
}
