//! Flow aggregation engine: identity, per-flow statistics, routing table.

mod aggregator;
mod key;
mod table;

pub use aggregator::{ContentType, DirectionStats, FlowAggregator, FlowState, Gauge};
pub use key::{Direction, Endpoint, FlowKey};
pub use table::FlowTable;
