mod column;
mod crossings;
mod depth;
mod edges;
mod node;
mod placement;

pub use edges::Edge;
pub use node::{Node, NodeId};

use crate::config::NODE_SPAN;
use crate::{LayoutConfig, LayoutError, Result, TechCatalog, Vec2};
use column::Column;
use std::collections::HashMap;
use tracing::{debug, error};

/// Layered layout of a tech prerequisite graph
///
/// Techs are added with [`add_node`](Self::add_node), prerequisites with
/// [`add_edge`](Self::add_edge), then [`do_layout`](Self::do_layout) assigns
/// every tech a column (its depth), a row inside that column, a pixel
/// position, and builds the polylines of its out-edges.
///
/// Edges spanning several columns are routed through placeholder nodes, one
/// per skipped column. Placeholders only live until the next mutation or
/// layout.
#[derive(Debug)]
pub struct LayoutGraph<C> {
    catalog: C,
    config: LayoutConfig,

    /// Arena of all nodes: techs first, in insertion order, then the
    /// placeholders of the current layout
    nodes: Vec<Node>,
    techs: usize,
    index: HashMap<String, NodeId>,

    /// Prerequisites in insertion order, used to rebuild the adjacency lists
    prerequisites: Vec<(NodeId, NodeId)>,

    columns: Vec<Column>,
    width: f32,
    height: f32,
    laid_out: bool,
}

impl<C> LayoutGraph<C>
where
    C: TechCatalog,
{
    /// Create an empty graph resolving techs through the given catalog
    pub fn new(catalog: C) -> Self {
        Self::with_config(catalog, LayoutConfig::default())
    }

    pub fn with_config(catalog: C, config: LayoutConfig) -> Self {
        Self {
            catalog,
            config,
            nodes: Vec::new(),
            techs: 0,
            index: HashMap::new(),
            prerequisites: Vec::new(),
            columns: Vec::new(),
            width: 0.0,
            height: 0.0,
            laid_out: false,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Register a tech
    ///
    /// # Errors
    /// Fails if the size is not strictly positive, if the name was already
    /// added, or if the catalog does not know the tech.
    pub fn add_node(&mut self, name: &str, width: f32, height: f32) -> Result<NodeId> {
        let size = Vec2::new(width, height);
        if !size.is_positive() {
            error!("Refusing {name:?} with size {width}x{height}");
            return Err(LayoutError::InvalidSize {
                name: name.to_string(),
                width,
                height,
            });
        }
        if self.index.contains_key(name) {
            error!("Tech {name:?} added twice");
            return Err(LayoutError::DuplicateNode(name.to_string()));
        }
        let Some(category) = self.catalog.category(name) else {
            error!("Tech {name:?} is not in the catalog");
            return Err(LayoutError::UnknownTech(name.to_string()));
        };

        if self.laid_out {
            self.discard_layout();
        }

        let id = NodeId(self.nodes.len());
        self.nodes
            .push(Node::tech(name.to_string(), category, size));
        self.index.insert(name.to_string(), id);
        self.techs += 1;
        Ok(id)
    }

    /// Register `child` as depending on `parent`
    ///
    /// Adding the same prerequisite twice is a no-op.
    ///
    /// # Errors
    /// Fails if either tech was never added, or if both are the same tech.
    pub fn add_edge(&mut self, parent: &str, child: &str) -> Result<()> {
        let parent_id = self.lookup(parent)?;
        let child_id = self.lookup(child)?;
        if parent_id == child_id {
            error!("Tech {parent:?} cannot be its own prerequisite");
            return Err(LayoutError::GraphHasCycle(parent.to_string()));
        }

        if self.laid_out {
            self.discard_layout();
        }

        if self.nodes[parent_id.index()].children.contains(&child_id) {
            debug!("Prerequisite {parent:?} -> {child:?} already known");
            return Ok(());
        }

        self.prerequisites.push((parent_id, child_id));
        self.link(parent_id, child_id);
        Ok(())
    }

    /// Run the whole layout pipeline
    ///
    /// `x_margin` is the horizontal gap kept between edges and node borders.
    /// An empty graph yields an empty layout.
    ///
    /// # Errors
    /// Fails on a non-positive pitch, on a prerequisite cycle, or if the
    /// pipeline finds an inconsistent edge. The graph keeps no layout then.
    pub fn do_layout(&mut self, column_width: f32, row_height: f32, x_margin: f32) -> Result<()> {
        let valid = |value: f32| value.is_finite() && value > 0.0;
        if !valid(column_width) || !valid(row_height) {
            error!("Invalid layout pitch {column_width}x{row_height}");
            return Err(LayoutError::InvalidParameters {
                column_width,
                row_height,
            });
        }

        self.discard_layout();
        if let Err(e) = self.run_pipeline(column_width, row_height, x_margin) {
            self.discard_layout();
            return Err(e);
        }

        self.laid_out = true;
        Ok(())
    }

    fn run_pipeline(&mut self, column_width: f32, row_height: f32, x_margin: f32) -> Result<()> {
        if self.nodes.is_empty() {
            debug!("Nothing to lay out");
            return Ok(());
        }

        let column_count = depth::assign_depths(&mut self.nodes)?;
        depth::insert_placeholders(&mut self.nodes)?;

        self.columns = vec![Column::default(); column_count];
        placement::initial_placement(&mut self.nodes, &mut self.columns);
        placement::wobble(&mut self.nodes, &mut self.columns, &self.config);

        let internal_row_height = row_height / NODE_SPAN as f32;
        edges::assign_positions(&mut self.nodes, column_width, internal_row_height);
        edges::build_out_edges(&mut self.nodes, x_margin)?;

        // Row 0 is never used
        let rows = self.columns.iter().map(Column::size).max().unwrap_or(0);
        self.width = column_count as f32 * column_width;
        self.height = rows.saturating_sub(1) as f32 * internal_row_height;

        debug!(
            "Laid out {} techs and {} placeholders in {}x{} px",
            self.techs,
            self.nodes.len() - self.techs,
            self.width,
            self.height
        );
        Ok(())
    }

    /// Look a tech up by name
    ///
    /// # Errors
    /// Fails if no tech with this name was added.
    pub fn get_node(&self, name: &str) -> Result<&Node> {
        let id = self.lookup(name)?;
        Ok(&self.nodes[id.index()])
    }

    /// Polylines leaving the given tech, in prerequisite insertion order
    ///
    /// # Errors
    /// Fails if no tech with this name was added.
    pub fn get_out_edges(&self, name: &str) -> Result<&[Edge]> {
        Ok(self.get_node(name)?.out_edges())
    }

    /// Any node, placeholders included, by handle
    pub fn node_by_id(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// The tech a node leads to: the node itself for techs, the end of its
    /// chain for placeholders
    ///
    /// `node` must belong to this graph.
    pub fn terminal<'a>(&'a self, node: &'a Node) -> &'a Node {
        node::resolve_terminal(&self.nodes, node)
    }

    /// Techs in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes[..self.techs].iter()
    }

    /// Placeholders of the current layout
    pub fn placeholders(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes[self.techs..].iter()
    }

    /// Number of columns of the current layout
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of edge crossings in the current layout
    pub fn crossings(&self) -> usize {
        crossings::count_crossings(&self.nodes, self.columns.len())
    }

    /// Layout width in pixels
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Layout height in pixels
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Remove every tech and prerequisite
    pub fn clear(&mut self) {
        debug!("Clearing {} nodes", self.nodes.len());
        self.nodes.clear();
        self.techs = 0;
        self.index.clear();
        self.prerequisites.clear();
        self.columns.clear();
        self.width = 0.0;
        self.height = 0.0;
        self.laid_out = false;
    }

    fn lookup(&self, name: &str) -> Result<NodeId> {
        self.index.get(name).copied().ok_or_else(|| {
            error!("No node named {name:?}");
            LayoutError::UnknownNode(name.to_string())
        })
    }

    /// Add `child` to `parent`'s children, updating the primary child
    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.index()].children.push(child);
        self.nodes[child.index()].parents.push(parent);

        let parent_node = &self.nodes[parent.index()];
        let replace = match parent_node.primary_child {
            None => true,
            Some(current) => parent_node
                .prefers_as_primary(&self.nodes[child.index()], &self.nodes[current.index()]),
        };
        if replace {
            self.nodes[parent.index()].primary_child = Some(child);
        }
    }

    /// Drop placeholders and every computed value, then rebuild the
    /// adjacency lists from the recorded prerequisites
    fn discard_layout(&mut self) {
        self.nodes.truncate(self.techs);
        for node in &mut self.nodes {
            node.depth = None;
            node.row = None;
            node.position = Default::default();
            node.parents.clear();
            node.children.clear();
            node.primary_child = None;
            node.out_edges.clear();
        }
        for index in 0..self.prerequisites.len() {
            let (parent, child) = self.prerequisites[index];
            self.link(parent, child);
        }

        self.columns.clear();
        self.width = 0.0;
        self.height = 0.0;
        self.laid_out = false;
    }
}
