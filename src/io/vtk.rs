//! VTU (VTK XML unstructured grid) writer for ParaView visualization
//!
//! Points are written in internal node order and connectivity refers to
//! those positions, so sparse node IDs never leak into the file. Nodal
//! results are included once the model has a DOF numbering, element axial
//! forces once it has been solved.
//!
//! ```rust,no_run
//! use truss_solver::prelude::*;
//!
//! let model = Model::new();
//! VtkWriter::new(&model).write_vtu("truss.vtu")?;
//! # Ok::<(), TrussError>(())
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use crate::error::{TrussError, TrussResult};
use crate::model::Model;

/// Digits after the decimal point; enough to round-trip an f64
const PRECISION: usize = 17;
/// Field width of one float
const WIDTH: usize = 24;
const INDENT: &str = "  ";

/// Format `value` as `d.ddde+XX` with `PRECISION` decimals, right-aligned
fn format_float(value: f64) -> String {
    let formatted = format!("{:.*e}", PRECISION, value);
    let text = match formatted.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            Err(_) => formatted.clone(),
        },
        // inf / NaN
        None => formatted.clone(),
    };
    format!("{:>width$}", text, width = WIDTH)
}

/// VTU writer for a truss model
pub struct VtkWriter<'a> {
    model: &'a Model,
}

impl<'a> VtkWriter<'a> {
    /// Create a new VTU writer for the given model
    pub fn new(model: &'a Model) -> Self {
        Self { model }
    }

    /// Write a `.vtu` file
    pub fn write_vtu<P: AsRef<Path>>(&self, path: P) -> TrussResult<()> {
        let path = path.as_ref();
        let mut file = BufWriter::new(File::create(path)?);
        self.write_to(&mut file)?;
        file.flush()?;
        info!("Wrote {}", path.display());
        Ok(())
    }

    /// Write the VTU document to any writer
    pub fn write_to<W: Write>(&self, os: &mut W) -> TrussResult<()> {
        writeln!(os, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(os, r#"<VTKFile type="UnstructuredGrid" version="0.1">"#)?;
        writeln!(os, "  <UnstructuredGrid>")?;
        writeln!(
            os,
            r#"    <Piece NumberOfPoints="{}" NumberOfCells="{}">"#,
            self.model.num_nodes(),
            self.model.num_elements()
        )?;

        let pre = INDENT.repeat(3);
        self.write_points(os, &pre)?;
        self.write_cells(os, &pre)?;
        if self.model.is_frozen() {
            self.write_point_data(os, &pre)?;
        }
        if self.model.is_solved() {
            self.write_cell_data(os, &pre)?;
        }

        writeln!(os, "    </Piece>")?;
        writeln!(os, "  </UnstructuredGrid>")?;
        writeln!(os, "</VTKFile>")?;
        Ok(())
    }

    fn write_points<W: Write>(&self, os: &mut W, pre: &str) -> TrussResult<()> {
        writeln!(os, "{}<Points>", pre)?;
        writeln!(
            os,
            r#"{}{}<DataArray type="Float64" NumberOfComponents="3" format="ascii">"#,
            pre, INDENT
        )?;
        for node in self.model.nodes().iter() {
            write_triple(os, pre, [node.x, node.y, node.z])?;
        }
        writeln!(os, "{}{}</DataArray>", pre, INDENT)?;
        writeln!(os, "{}</Points>", pre)?;
        Ok(())
    }

    fn write_cells<W: Write>(&self, os: &mut W, pre: &str) -> TrussResult<()> {
        let nodes = self.model.nodes();
        let mut offsets = Vec::with_capacity(self.model.num_elements());
        let mut types = Vec::with_capacity(self.model.num_elements());

        writeln!(os, "{}<Cells>", pre)?;
        writeln!(
            os,
            r#"{}{}<DataArray type="Int64" Name="connectivity" format="ascii">"#,
            pre, INDENT
        )?;
        let mut offset = 0;
        for block in self.model.blocks() {
            for index in 0..block.num_elements() {
                let element_nodes = block.element_nodes(index).ok_or_else(|| {
                    TrussError::InvalidInput(format!(
                        "block '{}' has no element {}",
                        block.name(),
                        index
                    ))
                })?;
                write!(os, "{}{}", pre, INDENT)?;
                for &position in block.vtk_order() {
                    let id = element_nodes.get(position).copied().ok_or_else(|| {
                        TrussError::InvalidInput(format!(
                            "VTK order position {} outside element of block '{}'",
                            position,
                            block.name()
                        ))
                    })?;
                    write!(os, "{}{}", INDENT, nodes.index_of(id)?)?;
                }
                writeln!(os)?;
                offset += block.vtk_order().len();
                offsets.push(offset);
                types.push(block.vtk_type());
            }
        }
        writeln!(os, "{}{}</DataArray>", pre, INDENT)?;

        writeln!(
            os,
            r#"{}{}<DataArray type="Int64" Name="offsets" format="ascii">"#,
            pre, INDENT
        )?;
        for offset in offsets {
            writeln!(os, "{}{}{}{}", pre, INDENT, INDENT, offset)?;
        }
        writeln!(os, "{}{}</DataArray>", pre, INDENT)?;

        writeln!(
            os,
            r#"{}{}<DataArray type="UInt8" Name="types" format="ascii">"#,
            pre, INDENT
        )?;
        for cell_type in types {
            writeln!(os, "{}{}{}{}", pre, INDENT, INDENT, cell_type)?;
        }
        writeln!(os, "{}{}</DataArray>", pre, INDENT)?;
        writeln!(os, "{}</Cells>", pre)?;
        Ok(())
    }

    fn write_point_data<W: Write>(&self, os: &mut W, pre: &str) -> TrussResult<()> {
        let global_dof = self.model.global_dof();
        let global_force = self.model.global_force();

        writeln!(os, "{}<PointData>", pre)?;
        for (name, values, first_slot) in [
            ("Displacement", global_dof, 0),
            ("Rotation", global_dof, 3),
            ("Force", global_force, 0),
        ] {
            writeln!(
                os,
                r#"{}{}<DataArray type="Float64" Name="{}" NumberOfComponents="3" format="ascii">"#,
                pre, INDENT, name
            )?;
            for node in self.model.nodes().iter() {
                let start = node.global_dof_index[first_slot];
                if start.checked_add(3).map_or(true, |end| end > values.len()) {
                    return Err(TrussError::NotAssembled);
                }
                write_triple(os, pre, [values[start], values[start + 1], values[start + 2]])?;
            }
            writeln!(os, "{}{}</DataArray>", pre, INDENT)?;
        }
        writeln!(os, "{}</PointData>", pre)?;
        Ok(())
    }

    fn write_cell_data<W: Write>(&self, os: &mut W, pre: &str) -> TrussResult<()> {
        writeln!(os, "{}<CellData>", pre)?;
        writeln!(
            os,
            r#"{}{}<DataArray type="Float64" Name="AxialForce" format="ascii">"#,
            pre, INDENT
        )?;
        for block in self.model.element_axial_forces()? {
            for force in block.forces {
                writeln!(os, "{}{}{}{}", pre, INDENT, INDENT, format_float(force))?;
            }
        }
        writeln!(os, "{}{}</DataArray>", pre, INDENT)?;
        writeln!(os, "{}</CellData>", pre)?;
        Ok(())
    }
}

fn write_triple<W: Write>(os: &mut W, pre: &str, values: [f64; 3]) -> TrussResult<()> {
    writeln!(
        os,
        "{}{}{}{}{}{}{}{}",
        pre,
        INDENT,
        INDENT,
        format_float(values[0]),
        INDENT,
        format_float(values[1]),
        INDENT,
        format_float(values[2])
    )?;
    Ok(())
}
