#![warn(missing_docs)]

//! Leaf-plate face mask synthesis.
//!
//! Given a scanned head mesh and a [`MaskConfig`], the pipeline clips the
//! face region, builds a hollow offset shell around it, tiles a staggered
//! field of twisted leaf plates across the face window, and composes
//! shell, leaves, opening cuts, and strap tabs into one printable solid:
//!
//! ```ignore
//! use lamina::{build_mask, stl, MaskConfig};
//!
//! let head = stl::read_stl_file("head.stl")?;
//! let mask = build_mask(&head, &MaskConfig::default())?;
//! stl::write_stl_file("mask.stl", &mask)?;
//! ```
//!
//! The construction is fully declarative: [`plan::build_plan`] reifies
//! the run as a CSG graph (inspectable as JSON), and [`compose::compose`]
//! evaluates it in the one valid stage order. Everything is
//! deterministic; identical input and config produce an identical mask.

pub mod clip;
pub mod compose;
pub mod config;
pub mod error;
pub mod leaves;
pub mod openings;
pub mod plan;
pub mod stl;
pub mod tabs;

pub use clip::ClipBox;
pub use config::MaskConfig;
pub use error::{MaskError, Result};
pub use plan::{MaskPlan, MaskRoots};

use lamina_kernel::eval::Evaluator;
use lamina_kernel::lamina_kernel_mesh::TriangleMesh;
use lamina_kernel::Solid;

/// Build the mask solid for `head` under `config`.
///
/// Validates the config, builds the plan, and runs the compositor.
/// Fails before any offset work when the config is invalid or the face
/// window misses the head entirely.
pub fn build_mask(head: &TriangleMesh, config: &MaskConfig) -> Result<TriangleMesh> {
    config.validate()?;
    let plan = plan::build_plan(config)?;
    let mut ev = Evaluator::new(&plan.graph);
    ev.bind(plan::HEAD_SLOT, Solid::from_mesh(head));
    let mask = compose::compose(&mut ev, &plan.roots)?;
    Ok(mask.to_mesh())
}
