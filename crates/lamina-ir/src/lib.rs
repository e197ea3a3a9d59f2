#![warn(missing_docs)]

//! Declarative CSG graph for the lamina mask pipeline.
//!
//! This crate defines the operation graph that describes how a mask is
//! constructed: primitives, transforms, booleans, and morphological offsets.
//! It is purely declarative — no mesh data, just a graph of operations.
//! Evaluation (meshing, booleans) is handled by `lamina-kernel`.
//!
//! The graph is a DAG keyed by [`NodeId`]: shared subgraphs (for example the
//! clipped face section consumed by both the inner and the outer offset) are
//! referenced twice and evaluated once.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a node in the CSG graph.
pub type NodeId = u64;

/// 3D vector with f64 components (conventionally millimeters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Create a new Vec3.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// CSG operation — the building block of the graph.
///
/// Each variant is either a leaf (primitive or named external mesh) or a
/// combining/transform operation referencing child nodes by [`NodeId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CsgOp {
    /// Axis-aligned box centered at origin.
    Cuboid {
        /// Size along each axis.
        size: Vec3,
    },
    /// Sphere centered at origin.
    Sphere {
        /// Radius of the sphere.
        radius: f64,
        /// Number of circular segments.
        segments: u32,
    },
    /// A named input mesh supplied by the evaluator (e.g. the scanned head).
    External {
        /// Slot name the evaluator resolves at run time.
        name: String,
    },
    /// Boolean union of the children, in order.
    Union {
        /// Operands (two or more).
        children: Vec<NodeId>,
    },
    /// Boolean intersection of the children, in order.
    Intersection {
        /// Operands (two or more).
        children: Vec<NodeId>,
    },
    /// Boolean difference: `base` minus every tool, in order.
    Difference {
        /// The solid being cut.
        base: NodeId,
        /// Solids subtracted from `base`.
        tools: Vec<NodeId>,
    },
    /// Translation by an offset vector.
    Translate {
        /// Child node to translate.
        child: NodeId,
        /// Translation offset.
        offset: Vec3,
    },
    /// Rotation by Euler angles in degrees (applied as X, then Y, then Z).
    Rotate {
        /// Child node to rotate.
        child: NodeId,
        /// Rotation angles in degrees.
        angles: Vec3,
    },
    /// Non-uniform scale about the origin.
    Scale {
        /// Child node to scale.
        child: NodeId,
        /// Scale factors per axis.
        factor: Vec3,
    },
    /// Morphological dilation: Minkowski sum with a sphere of `radius`.
    Offset {
        /// Child node to inflate.
        child: NodeId,
        /// Dilation radius (non-negative).
        radius: f64,
        /// Tessellation segments of the dilation sphere.
        segments: u32,
    },
}

impl CsgOp {
    /// Ids of the nodes this operation references, in evaluation order.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            CsgOp::Cuboid { .. } | CsgOp::Sphere { .. } | CsgOp::External { .. } => Vec::new(),
            CsgOp::Union { children } | CsgOp::Intersection { children } => children.clone(),
            CsgOp::Difference { base, tools } => {
                let mut ids = vec![*base];
                ids.extend_from_slice(tools);
                ids
            }
            CsgOp::Translate { child, .. }
            | CsgOp::Rotate { child, .. }
            | CsgOp::Scale { child, .. }
            | CsgOp::Offset { child, .. } => vec![*child],
        }
    }
}

/// A node in the CSG graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Optional human-readable name (used in diagnostics).
    pub name: Option<String>,
    /// The operation this node represents.
    pub op: CsgOp,
}

/// A CSG graph: all nodes keyed by id, plus incremental id allocation.
///
/// Built top-down by a pipeline (see `lamina::plan`), serialized as JSON for
/// inspection, and evaluated bottom-up by `lamina-kernel`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// All nodes in the graph, keyed by [`NodeId`].
    pub nodes: HashMap<NodeId, Node>,
    next_id: NodeId,
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            next_id: 1,
        }
    }
}

impl Graph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named node, returning its id.
    pub fn add(&mut self, name: impl Into<String>, op: CsgOp) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                id,
                name: Some(name.into()),
                op,
            },
        );
        id
    }

    /// Add an anonymous node, returning its id.
    pub fn add_anon(&mut self, op: CsgOp) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(id, Node { id, name: None, op });
        id
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Look up a node by name.
    ///
    /// Returns an arbitrary match if the name is not unique; the plans this
    /// crate is built for name each stage once.
    pub fn named(&self, name: &str) -> Option<&Node> {
        self.nodes.values().find(|n| n.name.as_deref() == Some(name))
    }

    /// Ids referenced by some node but not present in the graph.
    ///
    /// A well-formed graph returns an empty vec; the evaluator reports any
    /// dangling reference as an error.
    pub fn dangling_refs(&self) -> Vec<NodeId> {
        let mut missing: Vec<NodeId> = self
            .nodes
            .values()
            .flat_map(|n| n.op.children())
            .filter(|id| !self.nodes.contains_key(id))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }

    /// Names of all [`CsgOp::External`] slots the graph references.
    pub fn external_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .nodes
            .values()
            .filter_map(|n| match &n.op {
                CsgOp::External { name } => Some(name.clone()),
                _ => None,
            })
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Serialize to a pretty JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
