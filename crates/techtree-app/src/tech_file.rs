use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use techtree_layout::{Edge, LayoutConfig, LayoutGraph, Point};
use tracing::debug;

fn default_width() -> f32 {
    180.0
}

fn default_height() -> f32 {
    48.0
}

/// One tech of the input file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechEntry {
    pub name: String,
    pub category: String,
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

/// Tech list as read from a RON file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechFile {
    pub techs: Vec<TechEntry>,
}

impl TechFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let file: TechFile = ron::from_str(text)?;
        debug!("Loaded {} techs", file.techs.len());
        Ok(file)
    }

    /// Name -> category lookup handed to the layout
    pub fn catalog(&self) -> HashMap<String, String> {
        self.techs
            .iter()
            .map(|tech| (tech.name.clone(), tech.category.clone()))
            .collect()
    }

    /// Feed every tech and prerequisite to a new layout graph
    pub fn to_graph(&self, config: LayoutConfig) -> Result<LayoutGraph<HashMap<String, String>>> {
        let mut graph = LayoutGraph::with_config(self.catalog(), config);
        for tech in &self.techs {
            graph
                .add_node(&tech.name, tech.width, tech.height)
                .with_context(|| format!("Cannot add tech {}", tech.name))?;
        }
        for tech in &self.techs {
            for prerequisite in &tech.prerequisites {
                graph
                    .add_edge(prerequisite, &tech.name)
                    .with_context(|| format!("Bad prerequisite of {}", tech.name))?;
            }
        }
        Ok(graph)
    }
}

/// Computed position of one tech
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedTech {
    pub name: String,
    pub depth: usize,
    pub row: usize,
    pub position: Point,
}

/// Everything a renderer needs to draw the tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub crossings: usize,
    pub techs: Vec<PlacedTech>,
    pub edges: Vec<Edge>,
}

impl LayoutDump {
    pub fn from_graph(graph: &LayoutGraph<HashMap<String, String>>) -> Self {
        let techs = graph
            .nodes()
            .map(|node| PlacedTech {
                name: node.name().unwrap_or_default().to_string(),
                depth: node.depth().unwrap_or_default(),
                row: node.row().unwrap_or_default(),
                position: node.position(),
            })
            .collect();
        let edges = graph
            .nodes()
            .flat_map(|node| node.out_edges().iter().cloned())
            .collect();

        Self {
            width: graph.width(),
            height: graph.height(),
            crossings: graph.crossings(),
            techs,
            edges,
        }
    }

    pub fn to_ron(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn to_text(&self) -> String {
        let mut text = format!(
            "layout {}x{} px, {} crossings\n",
            self.width, self.height, self.crossings
        );
        for tech in &self.techs {
            text += &format!(
                "{:<32} column {:>2} row {:>3} at ({}, {})\n",
                tech.name, tech.depth, tech.row, tech.position.x, tech.position.y
            );
        }
        for edge in &self.edges {
            let points: Vec<_> = edge
                .points()
                .iter()
                .map(|point| format!("({}, {})", point.x, point.y))
                .collect();
            text += &format!("{} -> {}: {}\n", edge.from(), edge.to(), points.join(" "));
        }
        text
    }
}
