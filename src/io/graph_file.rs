use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ScenarioError;
use crate::graph::Graph;

/// One directed edge with per-criterion costs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub costs: Vec<f64>,
    /// Also add the reverse edge
    #[serde(default)]
    pub bidirectional: bool,
}

/// Graph description on disk
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphFile {
    /// Criterion weights; costs are summed when absent
    #[serde(default)]
    pub weights: Option<Vec<f64>>,

    /// Node positions, enabling the Euclidean heuristic
    #[serde(default)]
    pub nodes: BTreeMap<String, Vec<f64>>,

    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

impl GraphFile {
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Build the graph, reducing multi-criterion costs to scalars
    pub fn to_graph(&self) -> Result<Graph<String>, ScenarioError> {
        let mut graph = match &self.weights {
            Some(weights) => Graph::with_weights(weights.clone())?,
            None => Graph::new(),
        };

        for (id, position) in &self.nodes {
            graph.add_node_at(id.clone(), position)?;
        }

        for edge in &self.edges {
            let cost = graph.combine(&edge.costs)?;
            graph.add_edge(edge.from.clone(), edge.to.clone(), cost)?;
            if edge.bidirectional {
                graph.add_edge(edge.to.clone(), edge.from.clone(), cost)?;
            }
        }

        Ok(graph)
    }
}
