//! Model output formats

pub mod vtk;

pub use vtk::VtkWriter;
