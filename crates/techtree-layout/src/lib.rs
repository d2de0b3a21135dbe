//! Layered layout of technology prerequisite graphs
//!
//! Techs are laid out in columns from left to right: a tech's column is its
//! depth, the length of the longest prerequisite chain leading to it. Inside a
//! column every tech takes a range of row slots, and a greedy placement
//! followed by a local optimization pass keeps techs vertically close to
//! their prerequisites and dependents. Prerequisites spanning several columns
//! are routed through placeholders so every edge can be drawn as a polyline.
//!
//! The crate does no drawing: read node positions and out-edges after
//! [`LayoutGraph::do_layout`] and hand them to a renderer.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use techtree_layout::{LayoutGraph, Point};
//!
//! // Tech name -> category
//! let catalog: HashMap<String, String> = [
//!     ("LRN_ALGO_ELEGANCE", "LEARNING"),
//!     ("GRO_PLANET_ECOL", "GROWTH"),
//!     ("GRO_GENETIC_ENG", "GROWTH"),
//!     ("LRN_PHYS_BRAIN", "LEARNING"),
//! ]
//! .into_iter()
//! .map(|(tech, category)| (tech.to_string(), category.to_string()))
//! .collect();
//!
//! let mut graph = LayoutGraph::new(catalog);
//! for tech in ["LRN_ALGO_ELEGANCE", "GRO_PLANET_ECOL", "GRO_GENETIC_ENG", "LRN_PHYS_BRAIN"] {
//!     graph.add_node(tech, 120.0, 40.0)?;
//! }
//! graph.add_edge("GRO_PLANET_ECOL", "GRO_GENETIC_ENG")?;
//! graph.add_edge("LRN_ALGO_ELEGANCE", "LRN_PHYS_BRAIN")?;
//! graph.add_edge("GRO_GENETIC_ENG", "LRN_PHYS_BRAIN")?;
//!
//! graph.do_layout(200.0, 60.0, 8.0)?;
//!
//! let brain = graph.get_node("LRN_PHYS_BRAIN")?;
//! assert_eq!(brain.depth(), Some(2));
//!
//! // The edge skipping a column still ends on the tech's left border
//! let edge = &graph.get_out_edges("LRN_ALGO_ELEGANCE")?[0];
//! let left_middle = Point::new(brain.x(), brain.y() + brain.height() / 2.0);
//! assert_eq!(edge.points().last(), Some(&left_middle));
//! # Ok::<(), techtree_layout::LayoutError>(())
//! ```

mod catalog;
mod config;
mod error;
mod geometry;

pub mod layered;

pub use catalog::TechCatalog;
pub use config::{LayoutConfig, LINE_SPAN, NODE_SPAN, WOBBLE_THRESHOLD};
pub use error::{LayoutError, Result};
pub use geometry::{Point, Vec2};

pub use layered::{Edge, LayoutGraph, Node, NodeId};
