mod component;
mod config;
mod render;
mod state;
mod types;

pub use component::ArchDiagram;
pub use config::ARCHITECTURE;
pub use types::{ConfigError, Diagram, Edge, Group, GroupKey, Node};
