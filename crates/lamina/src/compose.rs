//! The compositor: the ordered final boolean sequence.
//!
//! Single pass, strictly ordered:
//!
//! 1. intersect the base mask with the leaf field union, so every leaf is
//!    trimmed to the shell's curvature;
//! 2. subtract the opening cuts — cutting earlier would not affect leaf
//!    geometry, cutting later would slice the tabs;
//! 3. union the strap tabs back in, so a tab overlapping an opening
//!    region stays solid.
//!
//! Disabled stages are absent from the plan and skipped entirely. Any
//! kernel failure aborts the run tagged with the failing stage.

use lamina_kernel::eval::Evaluator;
use lamina_kernel::Solid;

use crate::error::{stage, MaskError, Result};
use crate::plan::MaskRoots;

/// Run the composition over an evaluator with the head already bound.
pub fn compose(ev: &mut Evaluator<'_>, roots: &MaskRoots) -> Result<Solid> {
    let section = ev.eval(roots.section).map_err(stage("face section"))?;
    if section.is_empty() {
        return Err(MaskError::EmptySection);
    }

    let base = ev.eval(roots.base).map_err(stage("offset shell"))?;
    let field = ev.eval(roots.field).map_err(stage("leaf field"))?;
    let mut mask = base.intersection(&field);

    if let Some(id) = roots.openings {
        let cuts = ev.eval(id).map_err(stage("opening cuts"))?;
        mask = mask.difference(&cuts);
    }
    if let Some(id) = roots.tabs {
        let tabs = ev.eval(id).map_err(stage("strap tabs"))?;
        mask = mask.union(&tabs);
    }

    if mask.is_empty() {
        return Err(MaskError::EmptyMask);
    }
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lamina_ir::{CsgOp, Graph, NodeId, Vec3};

    fn cuboid_at(g: &mut Graph, size: [f64; 3], center: [f64; 3]) -> NodeId {
        let cube = g.add_anon(CsgOp::Cuboid {
            size: Vec3::new(size[0], size[1], size[2]),
        });
        g.add_anon(CsgOp::Translate {
            child: cube,
            offset: Vec3::new(center[0], center[1], center[2]),
        })
    }

    /// A small plan whose stages are plain slabs, so every stage volume
    /// is exact.
    fn slab_roots(g: &mut Graph, with_openings: bool, with_tabs: bool) -> MaskRoots {
        let section = cuboid_at(g, [40.0, 40.0, 4.0], [0.0, 0.0, 0.0]);
        let base = cuboid_at(g, [40.0, 40.0, 4.0], [0.0, 0.0, 0.0]);
        let field = cuboid_at(g, [60.0, 60.0, 20.0], [0.0, 0.0, 0.0]);
        let openings =
            with_openings.then(|| cuboid_at(g, [10.0, 10.0, 10.0], [0.0, 0.0, 0.0]));
        let tabs = with_tabs.then(|| cuboid_at(g, [10.0, 10.0, 4.0], [0.0, 0.0, 0.0]));
        MaskRoots {
            section,
            base,
            field,
            openings,
            tabs,
        }
    }

    #[test]
    fn tabs_survive_overlapping_openings() {
        // The tab sits entirely inside the opening region. Because tabs
        // are unioned after the cut, the overlap must end up filled.
        let mut g = Graph::new();
        let roots = slab_roots(&mut g, true, true);
        let mut ev = Evaluator::new(&g);
        let mask = compose(&mut ev, &roots).unwrap();
        let expected = 40.0 * 40.0 * 4.0 - 10.0 * 10.0 * 4.0 + 10.0 * 10.0 * 4.0;
        assert!((mask.volume() - expected).abs() < 1e-3);
    }

    #[test]
    fn openings_cut_after_field_intersection() {
        let mut g = Graph::new();
        let roots = slab_roots(&mut g, true, false);
        let mut ev = Evaluator::new(&g);
        let mask = compose(&mut ev, &roots).unwrap();
        let expected = 40.0 * 40.0 * 4.0 - 10.0 * 10.0 * 4.0;
        assert!((mask.volume() - expected).abs() < 1e-3);
    }

    #[test]
    fn absent_stages_are_skipped() {
        let mut g = Graph::new();
        let roots = slab_roots(&mut g, false, false);
        let mut ev = Evaluator::new(&g);
        let mask = compose(&mut ev, &roots).unwrap();
        assert!((mask.volume() - 40.0 * 40.0 * 4.0).abs() < 1e-3);
    }

    #[test]
    fn empty_section_aborts_before_offsets() {
        let mut g = Graph::new();
        let a = cuboid_at(&mut g, [10.0, 10.0, 10.0], [0.0, 0.0, 0.0]);
        let b = cuboid_at(&mut g, [10.0, 10.0, 10.0], [100.0, 0.0, 0.0]);
        let section = g.add_anon(CsgOp::Intersection {
            children: vec![a, b],
        });
        let roots = MaskRoots {
            section,
            base: section,
            field: section,
            openings: None,
            tabs: None,
        };
        let mut ev = Evaluator::new(&g);
        assert!(matches!(
            compose(&mut ev, &roots),
            Err(MaskError::EmptySection)
        ));
    }

    #[test]
    fn kernel_failures_carry_the_stage_name() {
        let mut g = Graph::new();
        let section = cuboid_at(&mut g, [10.0, 10.0, 10.0], [0.0, 0.0, 0.0]);
        let roots = MaskRoots {
            section,
            base: 9999,
            field: section,
            openings: None,
            tabs: None,
        };
        let mut ev = Evaluator::new(&g);
        match compose(&mut ev, &roots) {
            Err(MaskError::Stage { stage, .. }) => assert_eq!(stage, "offset shell"),
            other => panic!("expected stage error, got {other:?}"),
        }
    }
}
