use loadsim::scheduler::{DispatchPolicy, Job, WorkQueue, PAYLOAD_LEN};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn job(id: u64) -> Job {
    Job::new(id, [0u8; PAYLOAD_LEN], 1)
}

#[test]
fn test_queue_is_fifo() {
    let queue = WorkQueue::new();
    for id in 0..5 {
        queue.enqueue(job(id)).unwrap();
    }

    for expected in 0..5 {
        assert_eq!(queue.try_dequeue().unwrap().id, expected);
    }
    assert!(queue.try_dequeue().is_none());
}

#[test]
fn test_empty_queue_returns_none_not_blocking() {
    let queue = WorkQueue::new();
    assert!(queue.try_dequeue().is_none());
    assert!(queue.is_empty());
    assert_eq!(queue.len(), 0);
}

#[test]
fn test_bounded_queue_rejects_overflow() {
    let queue = WorkQueue::bounded(2);
    assert!(queue.enqueue(job(0)).is_ok());
    assert!(queue.enqueue(job(1)).is_ok());

    // The rejected job comes back to the caller intact.
    let rejected = queue.enqueue(job(2)).unwrap_err();
    assert_eq!(rejected.id, 2);
    assert_eq!(queue.len(), 2);

    // Draining one slot makes room again.
    queue.try_dequeue().unwrap();
    assert!(queue.enqueue(rejected).is_ok());
}

#[test]
fn test_reinstate_bypasses_capacity_and_goes_to_head() {
    let queue = WorkQueue::bounded(1);
    queue.enqueue(job(1)).unwrap();

    queue.reinstate(job(0));
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.try_dequeue().unwrap().id, 0);
    assert_eq!(queue.try_dequeue().unwrap().id, 1);
}

#[test]
fn test_concurrent_enqueue_dequeue_preserves_jobs() {
    use std::sync::Arc;

    let queue = Arc::new(WorkQueue::new());
    let producer = {
        let queue = Arc::clone(&queue);
        std::thread::spawn(move || {
            for id in 0..1000 {
                queue.enqueue(job(id)).unwrap();
            }
        })
    };

    let consumer = {
        let queue = Arc::clone(&queue);
        std::thread::spawn(move || {
            let mut seen = Vec::new();
            while seen.len() < 1000 {
                if let Some(job) = queue.try_dequeue() {
                    seen.push(job.id);
                }
            }
            seen
        })
    };

    producer.join().unwrap();
    let seen = consumer.join().unwrap();

    // Single producer, single consumer: FIFO means ids arrive in order.
    assert_eq!(seen, (0..1000).collect::<Vec<_>>());
    assert!(queue.is_empty());
}

#[test]
fn test_round_robin_assignment_scenario() {
    // 4 queues, 8 jobs: 0,4 -> queue 0; 1,5 -> queue 1; 2,6 -> queue 2;
    // 3,7 -> queue 3.
    let mut rng = StdRng::seed_from_u64(0);
    for id in 0..8u64 {
        let target = DispatchPolicy::RoundRobin.select(id, 4, &mut rng);
        assert_eq!(target, (id % 4) as usize);
    }
}

#[test]
fn test_round_robin_is_reproducible() {
    let mut rng_a = StdRng::seed_from_u64(1);
    let mut rng_b = StdRng::seed_from_u64(2);
    for id in 0..100u64 {
        assert_eq!(
            DispatchPolicy::RoundRobin.select(id, 7, &mut rng_a),
            DispatchPolicy::RoundRobin.select(id, 7, &mut rng_b),
        );
    }
}

#[test]
fn test_job_fields_set_at_creation() {
    let before = chrono::Utc::now();
    let job = Job::new(9, [b'x'; PAYLOAD_LEN], 17);
    let after = chrono::Utc::now();

    assert_eq!(job.id, 9);
    assert_eq!(job.rounds, 17);
    assert_eq!(job.payload, [b'x'; PAYLOAD_LEN]);
    assert!(job.arrival_time >= before && job.arrival_time <= after);
}
