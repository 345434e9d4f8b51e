extern crate nalgebra as na;

use na::{Matrix3,Vector2,Vector3};
use crate::Float;

/// Intrinsic matrix handed to the feature tracker, kept together with its inverse.
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Pinhole {
    pub projection: Matrix3<Float>,
    pub inverse_projection: Matrix3<Float>
}

impl Pinhole {
    pub fn new(fx: Float, fy: Float, cx: Float, cy: Float) -> Pinhole {
       let projection = Matrix3::<Float>::new(
        fx, 0.0, cx,
        0.0, fy, cy,
        0.0, 0.0, 1.0);
       let inverse_projection = Matrix3::<Float>::new(
        1.0/fx, 0.0, -cx/fx,
        0.0, 1.0/fy, -cy/fy,
        0.0, 0.0, 1.0);

      Pinhole{projection,inverse_projection}
    }

    pub fn from_matrix(mat: &Matrix3<Float>) -> Pinhole {
        Pinhole::new(mat[(0,0)],mat[(1,1)],mat[(0,2)],mat[(1,2)])
    }

    pub fn get_fx(&self) -> Float {
        self.projection[(0,0)]
    }

    pub fn get_fy(&self) -> Float {
        self.projection[(1,1)]
    }

    pub fn get_cx(&self) -> Float {
        self.projection[(0,2)]
    }

    pub fn get_cy(&self) -> Float {
        self.projection[(1,2)]
    }

    /// Pixel coordinates to the normalized image plane (z = 1).
    pub fn normalize(&self, pixel: &Vector2<Float>) -> Vector2<Float> {
        let homogeneous = self.inverse_projection*Vector3::<Float>::new(pixel.x, pixel.y, 1.0);
        Vector2::<Float>::new(homogeneous.x, homogeneous.y)
    }
}
