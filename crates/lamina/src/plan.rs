//! Plan construction: config to declarative CSG graph.
//!
//! The plan reifies the whole construction as a [`Graph`] before any
//! geometry work happens. Shared subgraphs are referenced, not copied:
//! the face section feeds both offset stages, every leaf reuses one slab
//! primitive, and both eyes reuse one rounded box. The graph serializes
//! to JSON for inspection; evaluation order and error attribution are
//! the compositor's job.

use lamina_ir::{CsgOp, Graph, NodeId, Vec3};

use crate::clip::ClipBox;
use crate::config::MaskConfig;
use crate::error::Result;
use crate::leaves;
use crate::openings::{self, CORNER_RADIUS};
use crate::tabs;

/// Name of the external slot the head mesh is bound to.
pub const HEAD_SLOT: &str = "head";

/// Root nodes the compositor evaluates, in composition order.
#[derive(Debug, Clone, Copy)]
pub struct MaskRoots {
    /// The clipped face section (checked for emptiness before offsets).
    pub section: NodeId,
    /// The hollow base mask shell.
    pub base: NodeId,
    /// The union of all leaf plates.
    pub field: NodeId,
    /// The union of all enabled opening cuts, absent when none are.
    pub openings: Option<NodeId>,
    /// The union of the strap tabs, absent when disabled.
    pub tabs: Option<NodeId>,
}

/// A complete, inspectable construction plan for one mask.
#[derive(Debug, Clone)]
pub struct MaskPlan {
    /// The operation graph.
    pub graph: Graph,
    /// Entry points for the compositor.
    pub roots: MaskRoots,
}

/// Build the construction plan for `config`.
///
/// The config is assumed validated; the only failure mode left here is
/// an edge bleed that inverts the rim-trim volume.
pub fn build_plan(config: &MaskConfig) -> Result<MaskPlan> {
    let mut g = Graph::new();
    let clip = config.window.clip();

    // Head placement: scale, rotate, translate, then clip.
    let head = g.add(
        HEAD_SLOT,
        CsgOp::External {
            name: HEAD_SLOT.into(),
        },
    );
    let s = config.head.scale;
    let scaled = g.add_anon(CsgOp::Scale {
        child: head,
        factor: Vec3::new(s, s, s),
    });
    let [rx, ry, rz] = config.head.rotation;
    let rotated = g.add_anon(CsgOp::Rotate {
        child: scaled,
        angles: Vec3::new(rx, ry, rz),
    });
    let [tx, ty, tz] = config.head.translation;
    let placed = g.add(
        "placed_head",
        CsgOp::Translate {
            child: rotated,
            offset: Vec3::new(tx, ty, tz),
        },
    );

    let window = placed_box(&mut g, Some("window"), &clip);
    let section = g.add(
        "face_section",
        CsgOp::Intersection {
            children: vec![placed, window],
        },
    );

    // Shell: two dilations of the same section, inner core trimmed by the
    // inset window before the difference.
    let outer = g.add(
        "outer_offset",
        CsgOp::Offset {
            child: section,
            radius: config.shell.outer_radius(),
            segments: config.segments,
        },
    );
    let inner = g.add(
        "inner_offset",
        CsgOp::Offset {
            child: section,
            radius: config.shell.inner_radius(),
            segments: config.segments,
        },
    );
    let rim_trim = placed_box(
        &mut g,
        Some("rim_trim"),
        &clip.expanded(-config.shell.edge_bleed)?,
    );
    let core = g.add(
        "inner_core",
        CsgOp::Intersection {
            children: vec![inner, rim_trim],
        },
    );
    let base = g.add(
        "base_mask",
        CsgOp::Difference {
            base: outer,
            tools: vec![core],
        },
    );

    // Leaf field: one shared slab, twisted and placed per grid cell. The
    // slab extends backward by the push distance so the later shell
    // intersection trims every leaf to the shell's curvature.
    let l = &config.leaves;
    let slab = g.add(
        "leaf_plate",
        CsgOp::Cuboid {
            size: Vec3::new(l.width, l.length, l.thickness + l.push),
        },
    );
    let leaf_z = clip.front + l.push / 2.0;
    let mut leaf_ids = Vec::new();
    for leaf in leaves::generate(l, &config.window) {
        let turned = g.add_anon(CsgOp::Rotate {
            child: slab,
            angles: Vec3::new(0.0, 0.0, leaf.angle_deg),
        });
        leaf_ids.push(g.add_anon(CsgOp::Translate {
            child: turned,
            offset: Vec3::new(leaf.x, leaf.y, leaf_z),
        }));
    }
    let field = g.add("leaf_field", CsgOp::Union { children: leaf_ids });

    // Openings: disabled features contribute no node at all.
    let mut cut_ids = Vec::new();
    if config.eyes.enabled {
        let eye_box = g.add_anon(CsgOp::Cuboid {
            size: Vec3::new(config.eyes.width, config.eyes.height, config.eyes.depth),
        });
        let rounded = g.add(
            "eye_opening",
            CsgOp::Offset {
                child: eye_box,
                radius: CORNER_RADIUS,
                segments: config.segments,
            },
        );
        for eye in openings::eye_openings(&config.eyes, clip.front) {
            let [x, y, z] = eye.center;
            cut_ids.push(g.add_anon(CsgOp::Translate {
                child: rounded,
                offset: Vec3::new(x, y, z),
            }));
        }
    }
    if config.nose.enabled {
        let slot = openings::nose_opening(&config.nose, clip.front);
        let [w, h, d] = slot.size;
        let slot_box = g.add_anon(CsgOp::Cuboid {
            size: Vec3::new(w, h, d),
        });
        let rounded = g.add(
            "nose_slot",
            CsgOp::Offset {
                child: slot_box,
                radius: CORNER_RADIUS,
                segments: config.segments,
            },
        );
        let [x, y, z] = slot.center;
        cut_ids.push(g.add_anon(CsgOp::Translate {
            child: rounded,
            offset: Vec3::new(x, y, z),
        }));
    }
    let openings = if cut_ids.is_empty() {
        None
    } else {
        Some(g.add("openings", CsgOp::Union { children: cut_ids }))
    };

    let tabs = if config.tabs.enabled {
        let t = &config.tabs;
        let tab_box = g.add_anon(CsgOp::Cuboid {
            size: Vec3::new(t.width, t.height, t.depth),
        });
        let tab_ids = tabs::strap_tabs(t, &config.window)
            .iter()
            .map(|tab| {
                let [x, y, z] = tab.center;
                g.add_anon(CsgOp::Translate {
                    child: tab_box,
                    offset: Vec3::new(x, y, z),
                })
            })
            .collect();
        Some(g.add("strap_tabs", CsgOp::Union { children: tab_ids }))
    } else {
        None
    };

    Ok(MaskPlan {
        graph: g,
        roots: MaskRoots {
            section,
            base,
            field,
            openings,
            tabs,
        },
    })
}

fn placed_box(g: &mut Graph, name: Option<&str>, clip: &ClipBox) -> NodeId {
    let [w, h, d] = clip.size();
    let [cx, cy, cz] = clip.center();
    let cube = g.add_anon(CsgOp::Cuboid {
        size: Vec3::new(w, h, d),
    });
    let op = CsgOp::Translate {
        child: cube,
        offset: Vec3::new(cx, cy, cz),
    };
    match name {
        Some(name) => g.add(name, op),
        None => g.add_anon(op),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_is_well_formed() {
        let config = MaskConfig::default();
        let plan = build_plan(&config).unwrap();
        assert!(plan.graph.dangling_refs().is_empty());
        assert_eq!(plan.graph.external_names(), vec![HEAD_SLOT.to_string()]);
        assert!(plan.roots.openings.is_some());
        assert!(plan.roots.tabs.is_some());
    }

    #[test]
    fn leaves_share_one_slab() {
        let config = MaskConfig::default();
        let plan = build_plan(&config).unwrap();
        let leaf_count = leaves::generate(&config.leaves, &config.window).len();
        let field = plan.graph.node(plan.roots.field).unwrap();
        match &field.op {
            CsgOp::Union { children } => assert_eq!(children.len(), leaf_count),
            other => panic!("leaf_field is {other:?}"),
        }
        // One cuboid each for the window, rim trim, leaf slab, eye box,
        // nose box, and tab box.
        let cuboids = plan
            .graph
            .nodes
            .values()
            .filter(|n| matches!(n.op, CsgOp::Cuboid { .. }))
            .count();
        assert_eq!(cuboids, 6);
    }

    #[test]
    fn disabled_features_have_no_nodes() {
        let mut config = MaskConfig::default();
        config.eyes.enabled = false;
        config.nose.enabled = false;
        config.tabs.enabled = false;
        let plan = build_plan(&config).unwrap();
        assert!(plan.roots.openings.is_none());
        assert!(plan.roots.tabs.is_none());
        assert!(plan
            .graph
            .nodes
            .values()
            .all(|n| n.name.as_deref() != Some("openings")
                && n.name.as_deref() != Some("strap_tabs")));
    }

    #[test]
    fn nose_only_still_produces_openings_root() {
        let mut config = MaskConfig::default();
        config.eyes.enabled = false;
        let plan = build_plan(&config).unwrap();
        let openings = plan.roots.openings.unwrap();
        match &plan.graph.node(openings).unwrap().op {
            CsgOp::Union { children } => assert_eq!(children.len(), 1),
            other => panic!("openings is {other:?}"),
        }
    }

    #[test]
    fn plan_roundtrips_as_json() {
        let plan = build_plan(&MaskConfig::default()).unwrap();
        let json = plan.graph.to_json().unwrap();
        let restored = Graph::from_json(&json).unwrap();
        assert_eq!(plan.graph, restored);
    }

    #[test]
    fn offsets_share_the_section() {
        let plan = build_plan(&MaskConfig::default()).unwrap();
        let offsets: Vec<_> = plan
            .graph
            .nodes
            .values()
            .filter_map(|n| match n.op {
                CsgOp::Offset { child, radius, .. } => Some((child, radius)),
                _ => None,
            })
            .filter(|(child, _)| *child == plan.roots.section)
            .collect();
        assert_eq!(offsets.len(), 2);
        let radii: Vec<f64> = offsets.iter().map(|(_, r)| *r).collect();
        assert!(radii.contains(&2.0));
        assert!(radii.contains(&4.5));
    }
}
