pub mod common;
pub mod pagination;
pub mod participant;
pub mod prize;
pub mod round;
pub mod rule;
pub mod snapshot;
pub mod winner;

pub use common::*;
pub use pagination::*;
pub use participant::*;
pub use prize::*;
pub use round::*;
pub use rule::*;
pub use snapshot::*;
pub use winner::*;
