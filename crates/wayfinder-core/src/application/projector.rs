//! Graph projector: renders a category's authoring data as a directed
//! node/edge graph and accepts local editing operations.
//!
//! Projection is a pure function over the relational entity sets: same
//! inputs always yield the same node/edge values, positions included. Local
//! edits mutate only the in-memory graph; nothing is written back to the
//! store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::flow::{FlowCondition, FlowOption, FlowStep, OptionId, StepId};

/// Horizontal spacing between consecutive step nodes in the placeholder
/// layout.
pub const NODE_SPACING_X: f64 = 300.0;

/// Canvas position of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

/// Payload rendered inside a step node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepNodeData {
    /// Step title
    pub title: String,

    /// Step description, if any
    pub description: Option<String>,

    /// Options attached to the step; each renders an outgoing handle
    pub options: Vec<FlowOption>,
}

/// One node per step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    /// The step's id
    pub id: StepId,

    /// Placeholder layout position: `index * NODE_SPACING_X`, constant y.
    /// Not persisted; purely index-derived.
    pub position: NodePosition,

    /// In-node rendering payload
    pub data: StepNodeData,
}

/// One edge per condition, from an option handle to a step node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// Edge identifier: the condition id for projected edges, synthesized
    /// for locally drawn ones
    pub id: String,

    /// Source option handle
    pub source: OptionId,

    /// Target step node
    pub target: StepId,

    /// Rendering hint only; carries no semantic weight
    pub animated: bool,
}

/// The projected node/edge sets consumed by the rendering widget.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowGraph {
    /// One node per step, in step order
    pub nodes: Vec<FlowNode>,

    /// One edge per condition, plus locally drawn connections
    pub edges: Vec<FlowEdge>,
}

/// Project the relational entity sets into a node/edge graph.
///
/// Never fails: empty inputs yield empty sets, and a condition whose target
/// step is absent from the node set still emits its edge. Unresolved
/// endpoints are the renderer's accepted degenerate state.
pub fn project(
    steps: &[FlowStep],
    options_by_step: &HashMap<StepId, Vec<FlowOption>>,
    conditions: &[FlowCondition],
) -> FlowGraph {
    let nodes = steps
        .iter()
        .enumerate()
        .map(|(index, step)| FlowNode {
            id: step.id.clone(),
            position: NodePosition {
                x: index as f64 * NODE_SPACING_X,
                y: 0.0,
            },
            data: StepNodeData {
                title: step.title.clone(),
                description: step.description.clone(),
                options: options_by_step.get(&step.id).cloned().unwrap_or_default(),
            },
        })
        .collect();

    let edges = conditions
        .iter()
        .map(|condition| FlowEdge {
            id: condition.id.0.clone(),
            source: condition.option_id.clone(),
            target: condition.next_step_id.clone(),
            animated: true,
        })
        .collect();

    FlowGraph { nodes, edges }
}

impl FlowGraph {
    /// Append a connection drawn by the operator.
    ///
    /// Optimistic local update: the edge lands in the in-memory set
    /// immediately, no backing condition is created, and the endpoints are
    /// trusted as given. An identical source/target pair is appended once.
    pub fn connect(&mut self, source: OptionId, target: StepId) {
        let exists = self
            .edges
            .iter()
            .any(|edge| edge.source == source && edge.target == target);
        if exists {
            return;
        }

        self.edges.push(FlowEdge {
            id: format!("edge-{}-{}", source.0, target.0),
            source,
            target,
            animated: true,
        });
    }
}
