//! [BSP](https://en.wikipedia.org/wiki/Binary_space_partitioning) tree node structure and operations
//!
//! A tree built from the boundary of a closed solid partitions space into
//! convex cells. By convention the space behind every polygon is solid: a
//! missing back child is solid space, a missing front child is empty space.
//! [`Node::clip_polygons`] and [`Node::contains_point`] both rely on it.

use crate::float_types::{DEFAULT_BUILD_DEPTH, Real};
use crate::plane::{BACK, Plane};
use crate::polygon::Polygon;
use nalgebra::Point3;
use std::fmt::Debug;

/// A BSP tree node, containing polygons plus optional front/back subtrees
#[derive(Debug, Clone)]
pub struct Node<S: Clone> {
    /// Splitting plane for this node *or* **None** for an empty leaf.
    pub plane: Option<Plane>,

    /// Subtree in front of `plane`.
    pub front: Option<Box<Node<S>>>,

    /// Subtree behind `plane`.
    pub back: Option<Box<Node<S>>>,

    /// Polygons that lie *exactly* on `plane`
    /// (after the node has been built).
    pub polygons: Vec<Polygon<S>>,
}

impl<S: Clone + Debug> Default for Node<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Debug> Node<S> {
    /// Create a new empty BSP node
    pub const fn new() -> Self {
        Self {
            plane: None,
            front: None,
            back: None,
            polygons: Vec::new(),
        }
    }

    /// Creates a new BSP tree from (copies of) `polygons`
    pub fn from_polygons(polygons: &[Polygon<S>]) -> Self {
        let mut node = Self::new();
        node.build(polygons);
        node
    }

    /// Whether this node is an empty leaf (no plane yet).
    pub const fn is_leaf(&self) -> bool {
        self.plane.is_none()
    }

    /// Convert solid space to empty space and empty space to solid space.
    ///
    /// Flips every polygon and plane in the subtree and swaps front with back.
    pub fn invert(&mut self) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            node.polygons.iter_mut().for_each(|p| p.flip());
            if let Some(ref mut plane) = node.plane {
                plane.flip();
            }
            std::mem::swap(&mut node.front, &mut node.back);

            if let Some(front) = node.front.as_deref_mut() {
                stack.push(front);
            }
            if let Some(back) = node.back.as_deref_mut() {
                stack.push(back);
            }
        }
    }

    /// Remove all polygons in `polygons` that are inside this BSP tree.
    ///
    /// Pieces reaching a missing front child are outside and kept; pieces
    /// reaching a missing back child are inside and dropped. Results come out
    /// front subtree first, then back subtree.
    pub fn clip_polygons(&self, polygons: &[Polygon<S>]) -> Vec<Polygon<S>> {
        let mut result = Vec::new();
        let mut stack = vec![(self, polygons.to_vec())];

        while let Some((node, polys)) = stack.pop() {
            let Some(ref plane) = node.plane else {
                result.extend(polys);
                continue;
            };

            let mut front_polys = Vec::with_capacity(polys.len());
            let mut back_polys = Vec::with_capacity(polys.len());

            for polygon in &polys {
                let (coplanar_front, coplanar_back, front_parts, back_parts) =
                    plane.split_polygon(polygon);

                front_polys.extend(coplanar_front);
                front_polys.extend(front_parts);
                back_polys.extend(coplanar_back);
                back_polys.extend(back_parts);
            }

            // back is pushed first so the front subtree is drained before it
            if let Some(back) = node.back.as_deref() {
                if !back_polys.is_empty() {
                    stack.push((back, back_polys));
                }
            }
            match node.front.as_deref() {
                Some(front) => {
                    if !front_polys.is_empty() {
                        stack.push((front, front_polys));
                    }
                },
                None => result.extend(front_polys),
            }
        }

        result
    }

    /// Remove all polygons in this BSP tree that are inside the other BSP tree
    pub fn clip_to(&mut self, bsp: &Node<S>) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            node.polygons = bsp.clip_polygons(&node.polygons);
            if let Some(front) = node.front.as_deref_mut() {
                stack.push(front);
            }
            if let Some(back) = node.back.as_deref_mut() {
                stack.push(back);
            }
        }
    }

    /// Return all polygons in this BSP tree in pre-order: a node's own
    /// polygons, then its front subtree's, then its back subtree's.
    pub fn all_polygons(&self) -> Vec<Polygon<S>> {
        let mut result = Vec::new();
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            result.extend_from_slice(&node.polygons);
            stack.extend(
                [&node.back, &node.front]
                    .into_iter()
                    .filter_map(|child| child.as_deref()),
            );
        }
        result
    }

    /// Build a BSP tree out of `polygons`.
    ///
    /// When called on an existing tree, the new polygons are filtered down to
    /// the bottom of the tree and become new nodes there. Each set of polygons
    /// is partitioned using the plane of its first polygon.
    pub fn build(&mut self, polygons: &[Polygon<S>]) {
        self.build_with_depth(polygons, DEFAULT_BUILD_DEPTH);
    }

    /// [`Node::build`] with an explicit recursion budget.
    ///
    /// When the budget runs out the polygons that still need placing are
    /// discarded and a warning is logged.
    pub fn build_with_depth(&mut self, polygons: &[Polygon<S>], depth: usize) {
        if polygons.is_empty() {
            return;
        }

        let mut stack = vec![(self, polygons.to_vec(), depth)];

        while let Some((node, polys, depth)) = stack.pop() {
            let plane = node
                .plane
                .get_or_insert_with(|| polys[0].plane.clone())
                .clone();

            let mut front = Vec::with_capacity(polys.len() / 2);
            let mut back = Vec::with_capacity(polys.len() / 2);

            for polygon in &polys {
                let (coplanar_front, coplanar_back, front_parts, back_parts) =
                    plane.split_polygon(polygon);

                node.polygons.extend(coplanar_front);
                node.polygons.extend(coplanar_back);
                front.extend(front_parts);
                back.extend(back_parts);
            }

            if front.is_empty() && back.is_empty() {
                continue;
            }
            let Some(child_depth) = depth.checked_sub(1) else {
                tracing::warn!(
                    dropped = front.len() + back.len(),
                    "BSP build depth exhausted, truncating tree"
                );
                continue;
            };

            if !front.is_empty() {
                let front_node = node.front.get_or_insert_with(|| Box::new(Node::new()));
                stack.push((&mut **front_node, front, child_depth));
            }
            if !back.is_empty() {
                let back_node = node.back.get_or_insert_with(|| Box::new(Node::new()));
                stack.push((&mut **back_node, back, child_depth));
            }
        }
    }

    /// Whether `point` lies in the solid space this tree represents.
    ///
    /// Points on a splitting plane are resolved towards the front, so boundary
    /// points may go either way.
    pub fn contains_point(&self, point: &Point3<Real>) -> bool {
        let mut node = self;
        loop {
            let Some(ref plane) = node.plane else {
                return false;
            };

            let (child, leaf_is_solid) = if plane.orient_point(point) == BACK {
                (node.back.as_deref(), true)
            } else {
                (node.front.as_deref(), false)
            };
            match child {
                Some(child) => node = child,
                None => return leaf_is_solid,
            }
        }
    }

    /// Depth of the tree, counting this node as 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];

        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(
                [&node.front, &node.back]
                    .into_iter()
                    .filter_map(|child| child.as_deref())
                    .map(|child| (child, level + 1)),
            );
        }
        deepest
    }
}

impl<S: Clone> Drop for Node<S> {
    // Unlink the subtree first so dropping a deep tree does not recurse.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<S>>> =
            self.front.take().into_iter().chain(self.back.take()).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.front.take());
            stack.extend(node.back.take());
        }
    }
}
