extern crate nalgebra as na;

mod common;

use std::thread;
use na::Vector3;
use rand::{Rng,SeedableRng,rngs::SmallRng};

use vio_sync::sensors::Stamp;
use vio_sync::sensors::imu::{ImuSample,imu_queue::ImuQueue,imu_ingest::SharedImuQueue};
use vio_sync::Float;
use common::imu_message;

fn sample(t: Float) -> ImuSample {
    ImuSample::new(t, Vector3::<Float>::new(0.0,0.0,9.81), Vector3::<Float>::new(0.0,0.0,1.0), 0.1)
}

fn queue_of(timestamps: &[Float]) -> ImuQueue {
    let mut queue = ImuQueue::new();
    for &t in timestamps {
        queue.push(sample(t));
    }
    queue
}

fn random_timestamps(rng: &mut SmallRng, n: usize) -> Vec<Float> {
    let mut t = 0.0;
    (0..n).map(|_| {
        // repeated stamps happen on real hardware
        if rng.gen_bool(0.9) {
            t += rng.gen_range(0.001..0.01);
        }
        t
    }).collect()
}

#[test]
fn test_drain_splits_at_first_later_reading() {
    let mut queue = queue_of(&[1.0,1.1,1.2,1.3]);

    let drained = queue.drain_up_to(1.15);

    assert_eq!(drained.iter().map(|s| s.timestamp).collect::<Vec<Float>>(), vec![1.0,1.1]);
    assert_eq!(queue.timestamps(), vec![1.2,1.3]);
}

#[test]
fn test_drain_keeps_readings_stamped_at_cutoff() {
    let mut queue = queue_of(&[1.0,1.1,1.1,1.2]);

    let drained = queue.drain_up_to(1.1);

    assert_eq!(drained.len(), 3);
    assert_eq!(queue.timestamps(), vec![1.2]);
}

#[test]
fn test_drain_everything_when_cutoff_is_late() {
    let mut queue = queue_of(&[1.0,1.1]);

    let drained = queue.drain_up_to(5.0);

    assert_eq!(drained.len(), 2);
    assert!(queue.is_empty());
}

#[test]
fn test_drain_nothing_when_cutoff_is_early() {
    let mut queue = queue_of(&[1.0,1.1]);

    assert!(queue.drain_up_to(0.5).is_empty());
    assert_eq!(queue.len(), 2);
}

#[test]
fn test_drain_empty_queue() {
    let mut queue = ImuQueue::new();

    assert!(queue.drain_up_to(0.5).is_empty());
    assert!(queue.drain_up_to(0.5).is_empty());
    assert!(queue.is_empty());
}

#[test]
fn test_partition_is_complete_for_random_cutoffs() {
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..50 {
        let timestamps = random_timestamps(&mut rng, 40);
        let cutoff = rng.gen_range(-0.01..0.5);
        let mut queue = queue_of(&timestamps);

        let drained = queue.drain_up_to(cutoff).iter().map(|s| s.timestamp).collect::<Vec<Float>>();
        let remaining = queue.timestamps();

        assert!(drained.iter().all(|&t| t <= cutoff));
        assert!(remaining.iter().all(|&t| t > cutoff));
        assert_eq!([drained, remaining].concat(), timestamps);
    }
}

#[test]
fn test_successive_drains_return_every_reading_once() {
    let mut rng = SmallRng::seed_from_u64(11);
    let timestamps = random_timestamps(&mut rng, 500);
    let mut queue = ImuQueue::new();
    let mut drained = Vec::<Float>::new();

    let mut cutoff = 0.0;
    for &t in &timestamps {
        queue.push(sample(t));
        if rng.gen_bool(0.1) {
            cutoff += rng.gen_range(0.0..0.05);
            drained.extend(queue.drain_up_to(cutoff).iter().map(|s| s.timestamp));
        }
    }
    drained.extend(queue.drain_up_to(Float::INFINITY).iter().map(|s| s.timestamp));

    assert_eq!(drained, timestamps);
}

#[test]
fn test_capacity_limit_evicts_oldest() {
    let mut queue = ImuQueue::with_capacity_limit(3);
    let evicted = [1.0,2.0,3.0,4.0,5.0].iter().map(|&t| queue.push(sample(t))).sum::<usize>();

    assert_eq!(evicted, 2);
    assert_eq!(queue.timestamps(), vec![3.0,4.0,5.0]);
}

#[test]
fn test_first_message_only_seeds_the_gap() {
    let shared = SharedImuQueue::default();
    let ingest = shared.ingest_handle();

    assert!(!ingest.ingest(&imu_message(1.0, Vector3::<Float>::z())));
    assert!(shared.is_empty());

    assert!(ingest.ingest(&imu_message(1.005, Vector3::<Float>::z())));
    assert!(ingest.ingest(&imu_message(1.015, Vector3::<Float>::z())));

    let drained = shared.drain_up_to(2.0);
    assert_eq!(drained.len(), 2);
    approx::assert_relative_eq!(drained[0].dt, 0.005, epsilon = 1e-9);
    approx::assert_relative_eq!(drained[1].dt, 0.010, epsilon = 1e-9);
}

#[test]
fn test_reset_seeds_again() {
    let shared = SharedImuQueue::default();
    let ingest = shared.ingest_handle();

    ingest.ingest(&imu_message(1.0, Vector3::<Float>::z()));
    ingest.ingest(&imu_message(1.1, Vector3::<Float>::z()));
    ingest.reset();

    assert!(!ingest.ingest(&imu_message(2.0, Vector3::<Float>::z())));
    assert!(ingest.ingest(&imu_message(2.5, Vector3::<Float>::z())));

    let drained = shared.drain_up_to(3.0);
    assert_eq!(drained.iter().map(|s| s.timestamp).collect::<Vec<Float>>(), vec![1.1,2.5]);
    approx::assert_relative_eq!(drained[1].dt, 0.5, epsilon = 1e-9);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "arrived after")]
fn test_out_of_order_reading_is_caught_while_queued() {
    let shared = SharedImuQueue::default();
    let ingest = shared.ingest_handle();

    ingest.ingest(&imu_message(1.0, Vector3::<Float>::z()));
    ingest.ingest(&imu_message(1.2, Vector3::<Float>::z()));
    ingest.ingest(&imu_message(1.05, Vector3::<Float>::z()));
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "arrived after")]
fn test_out_of_order_reading_is_caught_after_drain() {
    let shared = SharedImuQueue::default();
    let ingest = shared.ingest_handle();

    ingest.ingest(&imu_message(1.0, Vector3::<Float>::z()));
    ingest.ingest(&imu_message(1.2, Vector3::<Float>::z()));
    assert_eq!(shared.drain_up_to(1.3).len(), 1);
    assert!(shared.is_empty());

    ingest.ingest(&imu_message(1.05, Vector3::<Float>::z()));
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "arrived after")]
fn test_reading_before_seed_is_caught() {
    let shared = SharedImuQueue::default();
    let ingest = shared.ingest_handle();

    ingest.ingest(&imu_message(1.0, Vector3::<Float>::z()));
    ingest.ingest(&imu_message(0.9, Vector3::<Float>::z()));
}

#[test]
fn test_repeated_stamp_is_accepted() {
    let shared = SharedImuQueue::default();
    let ingest = shared.ingest_handle();

    ingest.ingest(&imu_message(1.0, Vector3::<Float>::z()));
    assert!(ingest.ingest(&imu_message(1.0, Vector3::<Float>::z())));

    let drained = shared.drain_up_to(1.0);
    assert_eq!(drained.len(), 1);
    assert_eq!(drained[0].dt, 0.0);
}

#[test]
fn test_concurrent_ingest_and_drain_lose_nothing() {
    let shared = SharedImuQueue::default();
    let ingest = shared.ingest_handle();
    let n = 2000;

    let producer = thread::spawn(move || {
        for i in 0..n {
            ingest.ingest(&imu_message(1.0 + i as Float*0.001, Vector3::<Float>::z()));
        }
    });

    let mut drained = Vec::<Float>::new();
    let mut cutoff = 1.0;
    while !producer.is_finished() {
        cutoff += 0.0005;
        drained.extend(shared.drain_up_to(cutoff).iter().map(|s| s.timestamp));
    }
    producer.join().expect("producer panicked");
    drained.extend(shared.drain_up_to(Float::INFINITY).iter().map(|s| s.timestamp));

    assert_eq!(drained.len(), n-1);
    assert!(drained.windows(2).all(|w| w[0] < w[1]));
    approx::assert_relative_eq!(drained[0], 1.001, epsilon = 1e-9);
}

#[test]
fn test_stamp_round_trip_in_seconds() {
    let stamp = Stamp::from_sec(1403636579.763555527);
    assert_eq!(stamp.sec, 1403636579);
    approx::assert_relative_eq!(stamp.to_sec(), 1403636579.763555527, epsilon = 1e-6);
    assert_eq!(Stamp::new(2,500_000_000).to_sec(), 2.5);
}

#[test]
fn test_stamp_saturates_outside_range() {
    assert_eq!(Stamp::from_sec(-0.25), Stamp::new(0,0));
    assert_eq!(Stamp::from_sec(-3.0), Stamp::default());
    assert_eq!(Stamp::from_sec(Float::NAN), Stamp::default());
    assert_eq!(Stamp::from_sec(1e12), Stamp::new(u32::MAX,0));
    assert_eq!(Stamp::from_sec(0.9999999999), Stamp::new(1,0));
    assert_eq!(Stamp::from_sec(0.0), Stamp::default());
}
