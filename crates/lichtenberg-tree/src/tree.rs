//! The [`GrowthTree`] projection and its node handles.

use std::cmp::Reverse;
use std::fmt;

use lichtenberg_core::{CellGrid, GrowthError, Point};

/// Index of a node inside a [`GrowthTree`].
pub type NodeId = usize;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Node {
    coord: Point,
    count: u32,
    parent: Option<NodeId>,
    children: u32,
    reach: u32,
}

/// An immutable tree view over a grid snapshot.
///
/// Nodes are the broken cells, numbered in row-major order. Each node
/// links to its parent by index, and carries its `count` (steps from the
/// root) and its `reach` (steps to the farthest tip below it; tips have
/// reach 0).
///
/// The tree does not borrow the grid. Later growth is not reflected;
/// build a new tree instead.
#[derive(Clone, PartialEq, Eq)]
pub struct GrowthTree {
    width: i32,
    height: i32,
    nodes: Vec<Node>,
    index: Vec<Option<NodeId>>,
    roots: Vec<NodeId>,
}

impl GrowthTree {
    /// Project the broken cells of `grid` into a tree.
    ///
    /// One row-major pass assigns node ids and links parents; a second
    /// pass in descending `count` order propagates `reach` upward.
    pub fn build(grid: &CellGrid) -> Self {
        let mut index = vec![None; grid.len()];
        let mut nodes = Vec::with_capacity(grid.broken_count());
        for (i, cell) in grid.cells().iter().enumerate() {
            if cell.broken {
                index[i] = Some(nodes.len());
                nodes.push(Node {
                    coord: grid.point_of(i),
                    count: cell.count,
                    parent: None,
                    children: 0,
                    reach: 0,
                });
            }
        }

        let mut roots = Vec::new();
        for id in 0..nodes.len() {
            let coord = nodes[id].coord;
            let parent = grid
                .get_parent(coord.x, coord.y)
                .ok()
                .flatten()
                .and_then(|p| grid.try_index(p))
                .and_then(|i| index[i]);
            match parent {
                Some(pid) => {
                    nodes[id].parent = Some(pid);
                    nodes[pid].children += 1;
                }
                None => roots.push(id),
            }
        }

        let mut order: Vec<NodeId> = (0..nodes.len()).collect();
        order.sort_unstable_by_key(|&id| Reverse(nodes[id].count));
        for id in order {
            if let Some(pid) = nodes[id].parent {
                let reach = nodes[id].reach + 1;
                if reach > nodes[pid].reach {
                    nodes[pid].reach = reach;
                }
            }
        }

        Self {
            width: grid.width(),
            height: grid.height(),
            nodes,
            index,
            roots,
        }
    }

    /// Width of the source grid.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the source grid.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` if the grid had no broken cell.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn handle(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { tree: self, id }
    }

    fn lookup(&self, p: Point) -> Option<NodeId> {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return None;
        }
        self.index[p.y as usize * self.width as usize + p.x as usize]
    }

    /// The node at `(x, y)`, if that cell is broken.
    pub fn node(&self, x: i32, y: i32) -> Option<NodeRef<'_>> {
        self.lookup(Point::new(x, y)).map(|id| self.handle(id))
    }

    /// Root nodes in row-major order.
    pub fn roots(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        self.roots.iter().map(|&id| self.handle(id))
    }

    /// All nodes in row-major order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        (0..self.nodes.len()).map(|id| self.handle(id))
    }

    /// Nodes without children, in row-major order.
    pub fn get_leaves(&self) -> Vec<Leaf<'_>> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.children == 0)
            .map(|(id, n)| Leaf {
                node: self.handle(id),
                count: n.count,
            })
            .collect()
    }

    /// The cells from `(x1, y1)` to `(x2, y2)` through their lowest
    /// common ancestor, both ends included.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if either coordinate lies outside the grid, and
    /// `NoPath` if either cell is unbroken or the two cells grew from
    /// different roots.
    pub fn get_path(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<Vec<Point>, GrowthError> {
        let (from, to) = (Point::new(x1, y1), Point::new(x2, y2));
        for p in [from, to] {
            if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
                return Err(GrowthError::out_of_bounds(p, self.width, self.height));
            }
        }
        let no_path = GrowthError::NoPath { from, to };
        let (Some(start), Some(end)) = (self.lookup(from), self.lookup(to)) else {
            return Err(no_path);
        };

        let mut up = vec![start];
        let mut down = vec![end];
        let (mut a, mut b) = (start, end);
        while self.nodes[a].count > self.nodes[b].count {
            a = self.nodes[a].parent.ok_or_else(|| no_path.clone())?;
            up.push(a);
        }
        while self.nodes[b].count > self.nodes[a].count {
            b = self.nodes[b].parent.ok_or_else(|| no_path.clone())?;
            down.push(b);
        }
        while a != b {
            let (Some(pa), Some(pb)) = (self.nodes[a].parent, self.nodes[b].parent) else {
                return Err(no_path);
            };
            a = pa;
            b = pb;
            up.push(a);
            down.push(b);
        }

        // `down` ends with the common ancestor, already the last of `up`.
        down.pop();
        Ok(up
            .into_iter()
            .chain(down.into_iter().rev())
            .map(|id| self.nodes[id].coord)
            .collect())
    }
}

impl fmt::Debug for GrowthTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowthTree")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("nodes", &self.nodes.len())
            .field("roots", &self.roots.len())
            .finish()
    }
}

// ── NodeRef ─────────────────────────────────────────────────────

/// A borrowed handle to one node of a [`GrowthTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t GrowthTree,
    id: NodeId,
}

impl<'t> NodeRef<'t> {
    fn node(&self) -> &'t Node {
        &self.tree.nodes[self.id]
    }

    /// Position in the tree's node list.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// `(x, y, reach)`: the cell and its distance to the farthest tip
    /// below it.
    pub fn point(&self) -> (i32, i32, u32) {
        let n = self.node();
        (n.coord.x, n.coord.y, n.reach)
    }

    /// The cell coordinate.
    pub fn coord(&self) -> Point {
        self.node().coord
    }

    /// Steps from the root.
    pub fn count(&self) -> u32 {
        self.node().count
    }

    /// Steps to the farthest tip below; 0 for a tip.
    pub fn reach(&self) -> u32 {
        self.node().reach
    }

    /// Number of direct children.
    pub fn children(&self) -> u32 {
        self.node().children
    }

    /// The node this one grew from.
    pub fn parent(&self) -> Option<NodeRef<'t>> {
        self.node().parent.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    /// `true` for a seed.
    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    /// Parent, grandparent, and so on up to the root.
    pub fn ancestors(&self) -> Ancestors<'t> {
        Ancestors {
            next: self.parent(),
        }
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.node();
        f.debug_struct("NodeRef")
            .field("coord", &n.coord)
            .field("count", &n.count)
            .field("reach", &n.reach)
            .finish()
    }
}

/// Iterator over a node's ancestors, nearest first.
#[derive(Clone, Debug)]
pub struct Ancestors<'t> {
    next: Option<NodeRef<'t>>,
}

impl<'t> Iterator for Ancestors<'t> {
    type Item = NodeRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

// ── Leaf ────────────────────────────────────────────────────────

/// A tip of the tree together with its `count`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Leaf<'t> {
    node: NodeRef<'t>,
    count: u32,
}

impl<'t> Leaf<'t> {
    /// The tip node.
    pub fn node(&self) -> NodeRef<'t> {
        self.node
    }

    /// Steps from the root to this tip.
    pub fn count(&self) -> u32 {
        self.count
    }
}
