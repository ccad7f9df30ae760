//! Domain model (IDs, job records, errors).

pub mod errors;
pub mod ids;
pub mod job;

pub use self::errors::{HashError, HashgenError};
pub use self::ids::JobId;
pub use self::job::{JobRecord, JobState, JobStatus};
