//! Structural elements module

mod bar;
pub(crate) mod block;
pub(crate) mod element;
mod material;
mod node;
mod node_list;
mod property;

pub use bar::{Bar, VTK_LINE};
pub use block::{Block, ElementBlock};
pub use element::Element;
pub use material::{Material, MaterialList};
pub use node::Node;
pub use node_list::NodeList;
pub use property::{Property, PropertyList, AREA};
