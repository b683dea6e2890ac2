mod arena;
pub mod lockfree;
mod node;
pub mod sequential;
pub mod traits;

pub use lockfree::LockFreePairingHeap;
pub use sequential::SequentialBinaryHeap;
pub use traits::PriorityQueue;
