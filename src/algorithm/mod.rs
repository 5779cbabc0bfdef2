/// Max-error priority queue holding the subdivision frontier
pub mod heap;
/// Subdivision driver emitting paint and snapshot events
pub mod subdivision;
