//! Render layer: virtual nodes, DOM operations, chart specs, and sinks that apply them.

pub mod chart;
pub mod render;
pub mod terminal;
pub mod vnode;

pub use render::DetailMode;
pub use terminal::{OutputFormat, TerminalSink};
pub use vnode::{Action, DomOp, RenderSink, Region, VNode};
