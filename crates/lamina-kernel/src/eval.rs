//! Evaluation of declarative CSG graphs into solids.
//!
//! The evaluator walks a [`Graph`] bottom-up and memoizes every node it
//! computes, so a subgraph referenced by several parents (the common case
//! for offset shells built from one base section) is evaluated once.

use std::collections::HashMap;

use lamina_ir::{CsgOp, Graph, NodeId};

use crate::{KernelError, Result, Solid};

/// Memoizing evaluator for one [`Graph`].
///
/// External slots must be bound with [`Evaluator::bind`] before any node
/// referencing them is evaluated.
pub struct Evaluator<'g> {
    graph: &'g Graph,
    externals: HashMap<String, Solid>,
    cache: HashMap<NodeId, Solid>,
}

impl<'g> Evaluator<'g> {
    /// Create an evaluator over `graph` with no externals bound.
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            externals: HashMap::new(),
            cache: HashMap::new(),
        }
    }

    /// Bind a solid to a named external slot.
    pub fn bind(&mut self, name: impl Into<String>, solid: Solid) -> &mut Self {
        self.externals.insert(name.into(), solid);
        self
    }

    /// Number of nodes evaluated so far.
    pub fn evaluated_count(&self) -> usize {
        self.cache.len()
    }

    /// Evaluate the node `id`, reusing any already-computed subgraphs.
    pub fn eval(&mut self, id: NodeId) -> Result<Solid> {
        if let Some(solid) = self.cache.get(&id) {
            return Ok(solid.clone());
        }
        let graph: &'g Graph = self.graph;
        let node = graph.node(id).ok_or(KernelError::MissingNode(id))?;

        let solid = match &node.op {
            CsgOp::Cuboid { size } => Solid::cuboid(size.x, size.y, size.z),
            CsgOp::Sphere { radius, segments } => Solid::sphere(*radius, *segments),
            CsgOp::External { name } => self
                .externals
                .get(name)
                .cloned()
                .ok_or_else(|| KernelError::UnboundExternal(name.clone()))?,
            CsgOp::Union { children } => {
                let parts = children
                    .iter()
                    .map(|&c| self.eval(c))
                    .collect::<Result<Vec<_>>>()?;
                Solid::union_all(parts)
            }
            CsgOp::Intersection { children } => {
                let mut iter = children.iter();
                let mut acc = match iter.next() {
                    Some(&first) => self.eval(first)?,
                    None => Solid::empty(),
                };
                for &c in iter {
                    acc = acc.intersection(&self.eval(c)?);
                }
                acc
            }
            CsgOp::Difference { base, tools } => {
                let mut acc = self.eval(*base)?;
                for &t in tools {
                    acc = acc.difference(&self.eval(t)?);
                }
                acc
            }
            CsgOp::Translate { child, offset } => {
                self.eval(*child)?.translate(offset.x, offset.y, offset.z)
            }
            CsgOp::Rotate { child, angles } => {
                self.eval(*child)?.rotate_deg(angles.x, angles.y, angles.z)
            }
            CsgOp::Scale { child, factor } => {
                self.eval(*child)?.scale(factor.x, factor.y, factor.z)
            }
            CsgOp::Offset {
                child,
                radius,
                segments,
            } => self.eval(*child)?.inflate(*radius, *segments)?,
        };

        self.cache.insert(id, solid.clone());
        Ok(solid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lamina_ir::Vec3;

    #[test]
    fn evaluates_primitives_and_booleans() {
        let mut g = Graph::new();
        let a = g.add(
            "slab",
            CsgOp::Cuboid {
                size: Vec3::new(20.0, 20.0, 4.0),
            },
        );
        let b = g.add(
            "punch",
            CsgOp::Cuboid {
                size: Vec3::new(6.0, 6.0, 10.0),
            },
        );
        let d = g.add(
            "slab_minus_punch",
            CsgOp::Difference {
                base: a,
                tools: vec![b],
            },
        );
        let mut ev = Evaluator::new(&g);
        let solid = ev.eval(d).unwrap();
        assert!((solid.volume() - (20.0 * 20.0 * 4.0 - 6.0 * 6.0 * 4.0)).abs() < 1e-3);
    }

    #[test]
    fn shared_subgraph_evaluated_once() {
        let mut g = Graph::new();
        let base = g.add(
            "base",
            CsgOp::Cuboid {
                size: Vec3::new(10.0, 10.0, 10.0),
            },
        );
        let left = g.add_anon(CsgOp::Translate {
            child: base,
            offset: Vec3::new(-20.0, 0.0, 0.0),
        });
        let right = g.add_anon(CsgOp::Translate {
            child: base,
            offset: Vec3::new(20.0, 0.0, 0.0),
        });
        let both = g.add_anon(CsgOp::Union {
            children: vec![left, right],
        });
        let mut ev = Evaluator::new(&g);
        let solid = ev.eval(both).unwrap();
        assert!((solid.volume() - 2000.0).abs() < 1e-3);
        // base, two translates, one union
        assert_eq!(ev.evaluated_count(), 4);
    }

    #[test]
    fn unbound_external_is_an_error() {
        let mut g = Graph::new();
        let head = g.add(
            "head",
            CsgOp::External {
                name: "head".into(),
            },
        );
        let mut ev = Evaluator::new(&g);
        assert!(matches!(
            ev.eval(head),
            Err(KernelError::UnboundExternal(name)) if name == "head"
        ));
        ev.bind("head", Solid::cuboid(5.0, 5.0, 5.0));
        assert!((ev.eval(head).unwrap().volume() - 125.0).abs() < 1e-6);
    }

    #[test]
    fn missing_node_is_an_error() {
        let g = Graph::new();
        let mut ev = Evaluator::new(&g);
        assert!(matches!(ev.eval(42), Err(KernelError::MissingNode(42))));
    }
}
