//! Node placement adapters

mod fixed;
mod uniform;

pub use fixed::{FixedLayoutGenerator, Layout, LayoutNode};
pub use uniform::UniformScatterGenerator;
