pub mod job;
pub mod policy;
pub mod queue;

pub use job::{CompletedJob, Job, PAYLOAD_LEN};
pub use policy::DispatchPolicy;
pub use queue::WorkQueue;
