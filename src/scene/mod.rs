//! Retained scene graph: nodes, the arena, reveal clocks, and the
//! render pass.
//!
//! Screens build a tree of [`Node`]s inside a [`Scene`] and mutate it
//! through [`NodeId`] handles. Each frame the host ticks the scene with
//! the elapsed wall time, reacts to completed reveals, and renders the
//! tree onto a [`Surface`].

mod animation;
mod graph;
mod node;
mod render;
mod surface;

pub use animation::{linear, Animation, EasingFn};
pub use graph::{NodeId, Scene};
pub use node::{Color, Node, Point, TextStyle, Visual};
pub use surface::{DrawOp, RecordingSurface, Surface};
