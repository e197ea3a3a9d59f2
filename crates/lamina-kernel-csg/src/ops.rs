//! Boolean operations on polygon sets.
//!
//! The clip/invert sequences are the classic BSP formulation: carve each
//! tree against the other, merge what survives. Inputs must bound closed
//! solids; an empty set is a valid solid (the empty solid) and is handled
//! by the `Solid` facade before reaching these functions.

use crate::bsp::Node;
use crate::polygon::Polygon;

/// Union: polygons bounding `a ∪ b`.
pub fn union(a: &[Polygon], b: &[Polygon]) -> Vec<Polygon> {
    let mut a = Node::new(a.to_vec());
    let mut b = Node::new(b.to_vec());
    a.clip_to(&b);
    b.clip_to(&a);
    b.invert();
    b.clip_to(&a);
    b.invert();
    a.build(b.all_polygons());
    a.all_polygons()
}

/// Difference: polygons bounding `a − b`.
pub fn difference(a: &[Polygon], b: &[Polygon]) -> Vec<Polygon> {
    let mut a = Node::new(a.to_vec());
    let mut b = Node::new(b.to_vec());
    a.invert();
    a.clip_to(&b);
    b.clip_to(&a);
    b.invert();
    b.clip_to(&a);
    b.invert();
    a.build(b.all_polygons());
    a.invert();
    a.all_polygons()
}

/// Intersection: polygons bounding `a ∩ b`.
pub fn intersection(a: &[Polygon], b: &[Polygon]) -> Vec<Polygon> {
    let mut a = Node::new(a.to_vec());
    let mut b = Node::new(b.to_vec());
    a.invert();
    b.clip_to(&a);
    b.invert();
    a.clip_to(&b);
    b.clip_to(&a);
    a.build(b.all_polygons());
    a.invert();
    a.all_polygons()
}

/// Union of many solids via balanced parallel reduction.
///
/// A balanced tree keeps intermediate polygon counts (and BSP depth) far
/// below a left fold, and the two halves are independent, so they reduce on
/// the rayon pool. Empty operands are skipped.
pub fn union_all(parts: Vec<Vec<Polygon>>) -> Vec<Polygon> {
    let mut parts: Vec<Vec<Polygon>> = parts.into_iter().filter(|p| !p.is_empty()).collect();
    reduce_union(&mut parts)
}

fn reduce_union(parts: &mut Vec<Vec<Polygon>>) -> Vec<Polygon> {
    match parts.len() {
        0 => Vec::new(),
        1 => std::mem::take(&mut parts[0]),
        _ => {
            let mut right_half = parts.split_off(parts.len() / 2);
            let (left, right) = rayon::join(
                || reduce_union(parts),
                || reduce_union(&mut right_half),
            );
            union(&left, &right)
        }
    }
}
