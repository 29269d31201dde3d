//! Truss Solver Example - Cook cantilever truss
//!
//! Usage: `truss-example [output.vtu]`. Set `RUST_LOG=debug` to follow the
//! solver iterations.

use std::rc::Rc;

use anyhow::{bail, Context, Result};
use log::info;
use truss_solver::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== Truss Solver Example: Cantilever Truss ===\n");

    // Cook, Malkus, Plesha & Witt, Concepts and Applications of FEA, 4th ed.,
    // problem C2.4
    //
    //     2 ------- 4 ------- 6
    //     |       / |       / |
    //     |     /   |     /   |  P
    //     |   /     |   /     v
    //     1 ------- 3 ------- 5
    //
    let b = 0.005; // m, square section side
    let h = 0.12; // m
    let l = 0.16; // m
    let p = 1.0; // N

    let mut materials = MaterialList::new();
    let aluminum = materials.add(Material::new("Aluminum", 70.0e9, 0.32)?)?;
    let mut properties = PropertyList::new();
    let square = properties.add(Property::bar("square", Rc::clone(&aluminum), b * b))?;

    let mut model = Model::new();
    model.add_node(1, 0.0, 0.0, 0.0)?;
    model.add_node(2, 0.0, h, 0.0)?;
    model.add_node(3, l, 0.0, 0.0)?;
    model.add_node(4, l, h, 0.0)?;
    model.add_node(5, 2.0 * l, 0.0, 0.0)?;
    model.add_node(6, 2.0 * l, h, 0.0)?;

    let mut block: ElementBlock<Bar> = ElementBlock::with_capacity("truss", square, 8);
    for nodes in [[1usize, 3], [1, 4], [2, 4], [3, 4], [3, 5], [4, 5], [4, 6], [5, 6]] {
        block.add_element(&nodes)?;
    }
    model.add_block(block);

    // Plane problem: fix out-of-plane motion everywhere, pin the wall nodes
    model.add_constraint_all(Dof::ALL_NON2D, 0.0);
    model.add_constraint_many(Dof::ALL, 0.0, &[1, 2])?;
    model.add_force(Dof::Y, -p, 6)?;

    model.assemble().context("assembly failed")?;

    // The default tolerance is absolute, so scale it to the expected displacements
    let options = AnalysisOptions::sor(1.5).with_tolerance(1e-18);
    let report = model.solve_with(&options)?;
    if !report.converged {
        bail!("solver did not converge in {} iterations", report.iterations);
    }

    println!("Node Displacements:");
    for (id, _) in model.nodes().iter_with_ids() {
        let disp = model.node_displacement(id)?;
        println!("  {}: DX={:+.6e} m, DY={:+.6e} m", id, disp.dx, disp.dy);
    }

    println!("\nAxial Forces:");
    for block in model.element_axial_forces()? {
        for (index, force) in block.forces.iter().enumerate() {
            println!("  {}[{}]: N={:+.4} N", block.block, index, force);
        }
    }

    println!("\nSummary:");
    println!("{}", model.summary()?.to_json()?);

    if let Some(path) = std::env::args().nth(1) {
        VtkWriter::new(&model)
            .write_vtu(&path)
            .with_context(|| format!("writing {}", path))?;
        info!("Results written to {}", path);
    }

    println!("\n=== Analysis Complete ===");
    Ok(())
}
