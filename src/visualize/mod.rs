extern crate image as image_rs;

use std::path::PathBuf;
use image_rs::RgbImage;
use tracing::warn;

use crate::sensors::Stamp;
use crate::tracker::FeatureTracker;
use crate::CAMERA_FRAME_ID;

/// Tracker visualization for one frame: 3 channel 8 bit.
#[derive(Debug,Clone)]
pub struct TrackImage {
    pub stamp: Stamp,
    pub frame_id: String,
    pub image: RgbImage
}

pub trait TrackImageSink {
    fn subscriber_count(&self) -> usize;
    /// Failures are the sink's to report; publishing never affects the pipeline.
    fn publish(&self, track_image: TrackImage) -> ();
}

/// Sink nobody listens to. Nothing is ever composed for it.
#[derive(Debug,Clone,Copy,Default)]
pub struct NullSink;

impl TrackImageSink for NullSink {
    fn subscriber_count(&self) -> usize {
        0
    }

    fn publish(&self, _track_image: TrackImage) -> () {}
}

/// Writes every track image as `track_<sec>_<nsec>.png` into a folder.
#[derive(Debug,Clone)]
pub struct DirectorySink {
    pub out_folder: PathBuf
}

impl DirectorySink {
    pub fn new(out_folder: PathBuf) -> DirectorySink {
        DirectorySink{out_folder}
    }

    pub fn file_path(&self, stamp: &Stamp) -> PathBuf {
        self.out_folder.join(format!("track_{}_{:09}.png", stamp.sec, stamp.nsec))
    }
}

impl TrackImageSink for DirectorySink {
    fn subscriber_count(&self) -> usize {
        1
    }

    fn publish(&self, track_image: TrackImage) -> () {
        let path = self.file_path(&track_image.stamp);
        if let Err(e) = track_image.image.save(&path) {
            warn!("could not write track image {}: {}", path.display(), e);
        }
    }
}

pub struct DiagnosticsPublisher<S: TrackImageSink> {
    sink: S
}

impl<S: TrackImageSink> DiagnosticsPublisher<S> {
    pub fn new(sink: S) -> DiagnosticsPublisher<S> {
        DiagnosticsPublisher{sink}
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Asks the tracker for its visualization only when somebody consumes it. Returns whether anything was published.
    pub fn publish_extra<T: FeatureTracker>(&self, tracker: &T, stamp: Stamp) -> bool {
        if self.sink.subscriber_count() == 0 {
            return false;
        }

        self.sink.publish(TrackImage {
            stamp,
            frame_id: String::from(CAMERA_FRAME_ID),
            image: tracker.track_image()
        });
        true
    }
}
