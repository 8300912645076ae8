//! Scene arena: stable node ids, tree structure, and the animation
//! tick.

use std::time::Duration;

use tracing::warn;

use super::node::Node;

/// Stable handle to a node in a [`Scene`].
///
/// Ids carry a generation, so a handle to a removed node goes stale
/// instead of aliasing whatever reuses its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Tree of drawable nodes addressed by stable ids.
///
/// The arena owns every node. Parent and child links are ids, so
/// detaching a subtree releases its slots without any reference
/// juggling, and reparenting is a couple of id moves. A fresh scene
/// holds a single visible root group.
#[derive(Debug)]
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
}

impl Scene {
    /// Creates a scene holding only the root group.
    pub fn new() -> Self {
        let mut scene = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
        };
        scene.root = scene.alloc(Node::group());
        scene
    }

    /// Id of the root group.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The node behind `id`, or `None` for a stale handle.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    /// Mutable access to the node behind `id`.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut()
    }

    /// Number of live nodes, the root included.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    /// Whether only the root remains.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Inserts `node` as the last child of `parent` and returns its id.
    ///
    /// Children render in insertion order, so the new node draws on top
    /// of its siblings. A stale `parent` falls back to the root.
    pub fn insert(&mut self, node: Node, parent: NodeId) -> NodeId {
        let parent = if self.get(parent).is_some() {
            parent
        } else {
            warn!("insert under a stale parent, attaching to the root");
            self.root
        };
        let id = self.alloc(node);
        if let Some(node) = self.get_mut(id) {
            node.parent = Some(parent);
        }
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.push(id);
        }
        id
    }

    /// Moves `child` to the end of `parent`'s child list.
    pub fn attach(&mut self, child: NodeId, parent: NodeId) {
        if self.get(child).is_none() || self.get(parent).is_none() {
            return;
        }
        self.detach(child);
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.push(child);
        }
    }

    /// Detaches `id` from its parent and releases its whole subtree.
    /// The root cannot be removed. Stale ids are ignored.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root || self.get(id).is_none() {
            return;
        }
        self.detach(id);
        self.release(id);
    }

    /// Releases every child of `id`, keeping `id` itself in place.
    pub fn remove_children(&mut self, id: NodeId) {
        let children = match self.get_mut(id) {
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };
        for child in children {
            self.release(child);
        }
    }

    /// Advances every reveal clock in the scene by `delta` and returns
    /// the nodes whose clocks completed on this tick, in arena order.
    /// Visibility does not stop a clock; only removal does.
    pub fn tick(&mut self, delta: Duration) -> Vec<NodeId> {
        let mut completed = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(node) = slot.node.as_mut() else {
                continue;
            };
            let Some(animation) = node.animation.as_mut() else {
                continue;
            };
            if animation.advance(delta) {
                completed.push(NodeId {
                    index: index as u32,
                    generation: slot.generation,
                });
            }
        }
        completed
    }

    /// Unlinks `id` from its parent's child list.
    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.get(id).and_then(Node::parent) else {
            return;
        };
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.retain(|child| *child != id);
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = None;
        }
    }

    /// Frees `id` and its descendants.
    fn release(&mut self, id: NodeId) {
        let Some(node) = self.get_mut(id) else {
            return;
        };
        let children = std::mem::take(&mut node.children);
        for child in children {
            self.release(child);
        }
        let slot = &mut self.slots[id.index as usize];
        slot.node = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index,
                    generation: 0,
                }
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_sibling_order() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.insert(Node::group(), root);
        let b = scene.insert(Node::group(), root);
        let c = scene.insert(Node::group(), root);
        assert_eq!(scene.get(root).map(Node::children), Some(&[a, b, c][..]));
    }

    #[test]
    fn test_remove_releases_the_subtree() {
        let mut scene = Scene::new();
        let root = scene.root();
        let branch = scene.insert(Node::group(), root);
        let leaf = scene.insert(Node::group(), branch);
        let sibling = scene.insert(Node::group(), root);

        scene.remove(branch);
        assert!(scene.get(branch).is_none());
        assert!(scene.get(leaf).is_none());
        assert!(scene.get(sibling).is_some());
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_stale_ids_do_not_alias_reused_slots() {
        let mut scene = Scene::new();
        let root = scene.root();
        let old = scene.insert(Node::group(), root);
        scene.remove(old);
        let new = scene.insert(Node::group(), root);
        assert!(scene.get(old).is_none());
        assert!(scene.get(new).is_some());
        assert_ne!(old, new);
    }

    #[test]
    fn test_attach_moves_a_subtree() {
        let mut scene = Scene::new();
        let root = scene.root();
        let left = scene.insert(Node::group(), root);
        let right = scene.insert(Node::group(), root);
        let leaf = scene.insert(Node::group(), left);

        scene.attach(leaf, right);
        assert_eq!(scene.get(left).map(Node::children), Some(&[][..]));
        assert_eq!(scene.get(right).map(Node::children), Some(&[leaf][..]));
        assert_eq!(scene.get(leaf).and_then(Node::parent), Some(right));
    }

    #[test]
    fn test_remove_children_keeps_the_node() {
        let mut scene = Scene::new();
        let root = scene.root();
        let panel = scene.insert(Node::group(), root);
        scene.insert(Node::group(), panel);
        scene.insert(Node::group(), panel);

        scene.remove_children(panel);
        assert!(scene.get(panel).is_some());
        assert_eq!(scene.get(panel).map(Node::children), Some(&[][..]));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_tick_reports_completions_once() {
        let mut scene = Scene::new();
        let root = scene.root();
        let fast = scene.insert(
            Node::group().animated(Duration::from_millis(100)),
            root,
        );
        let slow = scene.insert(
            Node::group().animated(Duration::from_millis(300)),
            root,
        );

        assert!(scene.tick(Duration::from_millis(50)).is_empty());
        assert_eq!(scene.tick(Duration::from_millis(100)), vec![fast]);
        assert_eq!(scene.tick(Duration::from_millis(200)), vec![slow]);
        assert!(scene.tick(Duration::from_millis(500)).is_empty());
    }
}
