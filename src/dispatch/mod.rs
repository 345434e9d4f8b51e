use tracing::{error,info};

use crate::config::PipelineParameters;
use crate::image::decode_mono8;
use crate::sensors::{ImageMessage,Stamp};
use crate::sensors::imu::{imu_queue::ImuQueue,imu_ingest::{ImuIngest,SharedImuQueue}};
use crate::sync::TemporalSynchronizer;
use crate::tracker::{FeatureMap,FeatureTracker};
use crate::visualize::{DiagnosticsPublisher,TrackImageSink};

/// What the tracker produced for one image.
#[derive(Debug,Clone)]
pub struct FrameResult {
    pub stamp: Stamp,
    pub forwarded_imu: usize,
    pub tracked_features: FeatureMap,
    pub new_features: FeatureMap,
    pub published: bool
}

/**
 * Image path of the pipeline. Each image is decoded, preceded by the inertial readings of its
 * interval and handed to the tracker, whose features are collected afterwards.
 *
 * A frame that fails to decode is logged and skipped for good. The inertial queue is not drained
 * for it, so its readings are forwarded together with those of the next decodable frame.
 */
pub struct FrameDispatcher<T: FeatureTracker, S: TrackImageSink> {
    synchronizer: TemporalSynchronizer,
    tracker: T,
    diagnostics: DiagnosticsPublisher<S>
}

impl<T: FeatureTracker, S: TrackImageSink> FrameDispatcher<T,S> {
    pub fn new(parameters: &PipelineParameters, tracker: T, sink: S) -> FrameDispatcher<T,S> {
        let queue = match parameters.imu_queue_capacity {
            Some(capacity) => ImuQueue::with_capacity_limit(capacity),
            None => ImuQueue::new()
        };

        FrameDispatcher {
            synchronizer: TemporalSynchronizer::new(SharedImuQueue::new(queue), parameters.calibration.extrinsic_rotation),
            tracker,
            diagnostics: DiagnosticsPublisher::new(sink)
        }
    }

    /// Handle for the inertial callback. It can be cloned and moved to another thread.
    pub fn imu_ingest(&self) -> ImuIngest {
        self.synchronizer.queue().ingest_handle()
    }

    pub fn queued_imu_count(&self) -> usize {
        self.synchronizer.queue().len()
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    pub fn diagnostics(&self) -> &DiagnosticsPublisher<S> {
        &self.diagnostics
    }

    /// Returns None when the image could not be decoded.
    pub fn on_image(&mut self, message: &ImageMessage) -> Option<FrameResult> {
        let cur_image_time = message.stamp.to_sec();
        let image = match decode_mono8(message) {
            Ok(image) => image,
            Err(e) => {
                error!("dropping image at {:.9}: {}", cur_image_time, e);
                return None;
            }
        };

        let forwarded_imu = self.synchronizer.synchronize(&mut self.tracker, cur_image_time);
        self.tracker.set_current_frame(image, cur_image_time);

        let tracked_features = self.tracker.tracked_features();
        let new_features = self.tracker.new_features();
        info!("Feature counts [tracked: {}, new: {}]", tracked_features.len(), new_features.len());

        let published = self.diagnostics.publish_extra(&self.tracker, message.stamp);

        Some(FrameResult {
            stamp: message.stamp,
            forwarded_imu,
            tracked_features,
            new_features,
            published
        })
    }
}
