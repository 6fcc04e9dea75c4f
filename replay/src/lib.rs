//! Offline processing of finished battles
//!
//! - [`result`]: fixed-size binary records of completed battles
//! - [`glicko`]: Glicko-1 ratings computed from those records
//! - [`pool`]: a worker pool for processing many records at once
//!
//! ```ignore
//! use tactician_replay::{Glicko, read_results};
//!
//! let mut ratings = Glicko::new();
//! for result in read_results("battles.tmbr")? {
//!     ratings.add_result(&result);
//! }
//! ratings.update();
//! ```

pub mod error;
pub mod glicko;
pub mod pool;
pub mod result;

pub use error::ReplayError;
pub use glicko::{Glicko, Rating, chance_to_win};
pub use pool::{QUEUE_CAPACITY, StopSignal, WorkerPool, for_each_parallel};
pub use result::{
    BattleResult, BattleResultReader, BattleResultWriter, RECORD_SIZE, Side, SideMember, Winner, open_results,
    read_results, write_results,
};
