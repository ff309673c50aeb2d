//! Graph construction, shortest path precomputation and route queries

mod dijkstra;
pub mod graph;
pub mod index;
pub mod itinerary;
pub mod router;

pub use graph::{EdgeKind, RouteEdge, TransitGraph, Vertex, travel_time};
pub use index::{PathEntry, Predecessor, RouteInfo, ShortestPathIndex};
pub use itinerary::{RouteItem, RoutingResult};
pub use router::TransportRouter;
