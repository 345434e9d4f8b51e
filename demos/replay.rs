extern crate nalgebra as na;
extern crate image as image_rs;
extern crate vio_sync;

use std::path::{Path,PathBuf};
use std::thread;
use std::time::{Duration,Instant};
use color_eyre::eyre::Result;
use image_rs::{GrayImage,RgbImage,Rgb};
use na::{Vector2,Vector3};
use tracing_subscriber::EnvFilter;

use vio_sync::config::{camera_model::CameraModel,noise_parameters::NoiseParameters,filter_parameters::FilterParameters};
use vio_sync::dispatch::FrameDispatcher;
use vio_sync::estimator::{Estimator,ImuState,initialize_estimator};
use vio_sync::io::load_parameters;
use vio_sync::sensors::{ImageMessage,ImuMessage,Stamp};
use vio_sync::sensors::camera::{DistortionModel,pinhole::Pinhole};
use vio_sync::tracker::{FeatureMap,FeatureTracker,setup_tracker};
use vio_sync::visualize::{DirectorySink,NullSink,TrackImage,TrackImageSink};
use vio_sync::{Float,IMU_TOPIC,TRACK_IMAGE_TOPIC};

const IMU_RATE: Float = 200.0;
const CAMERA_RATE: Float = 20.0;
const DURATION: Float = 2.0;
const WIDTH: u32 = 64;
const HEIGHT: u32 = 48;
const SPEEDUP: Float = 10.0;
const IMAGE_LATENCY: Float = 0.005;

/// Stands in for a real tracker: integrates the gyro and reports the brightest pixel as its only feature.
struct BrightestPixelTracker {
    principal_point: Vector2<Float>,
    accumulated_rotation: Vector3<Float>,
    frame: GrayImage,
    feature: Option<Vector2<Float>>,
    frames_seen: u64
}

impl BrightestPixelTracker {
    fn new(pinhole: &Pinhole, _distortion_coeffs: &[Float; 4], _distortion_model: &DistortionModel) -> BrightestPixelTracker {
        BrightestPixelTracker {
            principal_point: Vector2::<Float>::new(pinhole.get_cx(), pinhole.get_cy()),
            accumulated_rotation: Vector3::<Float>::zeros(),
            frame: GrayImage::new(1,1),
            feature: None,
            frames_seen: 0
        }
    }
}

impl FeatureTracker for BrightestPixelTracker {
    fn add_rotation_reading(&mut self, angular_velocity: &Vector3<Float>) -> () {
        self.accumulated_rotation += angular_velocity/IMU_RATE;
    }

    fn set_current_frame(&mut self, image: GrayImage, _timestamp: Float) -> () {
        let (x,y,_) = image.enumerate_pixels().max_by_key(|(_,_,p)| p.0[0]).map(|(x,y,p)| (x,y,p.0[0])).unwrap_or((0,0,0));
        self.feature = Some(Vector2::<Float>::new(x as Float, y as Float) - self.principal_point);
        self.frame = image;
        self.frames_seen += 1;
    }

    fn tracked_features(&self) -> FeatureMap {
        match (self.frames_seen > 1, self.feature) {
            (true, Some(f)) => FeatureMap::from([(0, f)]),
            _ => FeatureMap::new()
        }
    }

    fn new_features(&self) -> FeatureMap {
        match (self.frames_seen == 1, self.feature) {
            (true, Some(f)) => FeatureMap::from([(0, f)]),
            _ => FeatureMap::new()
        }
    }

    fn track_image(&self) -> RgbImage {
        RgbImage::from_fn(self.frame.width(), self.frame.height(), |x,y| {
            let v = self.frame.get_pixel(x,y).0[0];
            Rgb([v,v,v])
        })
    }

    fn set_grid_size(&mut self, _rows: usize, _cols: usize) -> () {}

    fn set_ransac_threshold(&mut self, _threshold: Float) -> () {}
}

struct LoggingEstimator;

impl Estimator for LoggingEstimator {
    fn initialize(&mut self, camera: &CameraModel, noise: &NoiseParameters, filter: &FilterParameters, initial_state: &ImuState) -> () {
        tracing::info!("estimator initialized: f_u {} u_var' {:e} max_cam_states {} g {:?}", camera.f_u, noise.pixel_noise_u, filter.max_cam_states, initial_state.g);
    }
}

fn synthetic_frame(t: Float) -> Vec<u8> {
    let bright_x = ((t*10.0) as u32) % WIDTH;
    (0..HEIGHT).flat_map(|_| (0..WIDTH).map(move |x| if x == bright_x {255} else {20})).collect()
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("config/camchain-imucam.yaml"));
    let parameters = load_parameters(Path::new(&config_path))?;

    tracing::info!("replaying {} and {}, tracks go to {}", parameters.image_topic, IMU_TOPIC, TRACK_IMAGE_TOPIC);

    let mut estimator = LoggingEstimator;
    initialize_estimator(&mut estimator, &parameters, &ImuState::default());

    let tracker = setup_tracker(&parameters.calibration, &parameters.tracker, BrightestPixelTracker::new);
    let out_folder = std::env::args().nth(2);
    let mut dispatcher = FrameDispatcher::new(&parameters, tracker, out_folder.map(|f| DirectorySink::new(PathBuf::from(f))).map_or_else(|| SinkChoice::None(NullSink), SinkChoice::Directory));

    let start = Instant::now();
    let wait_until = move |t: Float| {
        let target = Duration::from_secs_f64((t - 1.0)/SPEEDUP);
        if let Some(remaining) = target.checked_sub(start.elapsed()) {
            thread::sleep(remaining);
        }
    };

    let imu_ingest = dispatcher.imu_ingest();
    let imu_thread = thread::spawn(move || {
        let n = (DURATION*IMU_RATE) as usize;
        for i in 0..n {
            let t = 1.0 + i as Float/IMU_RATE;
            wait_until(t);
            imu_ingest.ingest(&ImuMessage {
                stamp: Stamp::from_sec(t),
                linear_acceleration: Vector3::<Float>::new(0.0,0.0,9.81),
                angular_velocity: Vector3::<Float>::new(0.0,0.0,0.5)
            });
        }
    });

    let n_frames = (DURATION*CAMERA_RATE) as usize;
    let mut forwarded = 0;
    for i in 0..n_frames {
        let t = 1.0 + i as Float/CAMERA_RATE;
        wait_until(t + IMAGE_LATENCY);
        let message = ImageMessage::mono8(Stamp::from_sec(t), WIDTH, HEIGHT, synthetic_frame(t));
        if let Some(result) = dispatcher.on_image(&message) {
            forwarded += result.forwarded_imu;
        }
    }
    imu_thread.join().map_err(|_| color_eyre::eyre::eyre!("imu producer panicked"))?;

    tracing::info!("forwarded {} gyro readings over {} frames, {} still queued, accumulated rotation {:?}",
        forwarded, n_frames, dispatcher.queued_imu_count(), dispatcher.tracker().accumulated_rotation);
    Ok(())
}

enum SinkChoice {
    None(NullSink),
    Directory(DirectorySink)
}

impl TrackImageSink for SinkChoice {
    fn subscriber_count(&self) -> usize {
        match self {
            SinkChoice::None(s) => s.subscriber_count(),
            SinkChoice::Directory(s) => s.subscriber_count()
        }
    }

    fn publish(&self, track_image: TrackImage) -> () {
        match self {
            SinkChoice::None(s) => s.publish(track_image),
            SinkChoice::Directory(s) => s.publish(track_image)
        }
    }
}
