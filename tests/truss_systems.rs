//! End-to-end truss problems from textbook examples
//!
//! The iterative solution is checked against a direct LU solve of the same
//! reduced system. Tolerances are absolute, so they are set well below the
//! displacement scale of each problem.

use std::rc::Rc;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use truss_solver::math::Vector;
use truss_solver::prelude::*;

fn aluminum_bar(area: f64) -> Rc<Property> {
    let material = Rc::new(Material::new("Aluminum", 70.0e9, 0.32).unwrap());
    Rc::new(Property::bar("square", material, area))
}

fn direct_solution(model: &Model) -> Vector {
    let system = model.system().expect("model is assembled");
    system
        .stiffness
        .clone()
        .lu()
        .solve(&system.force)
        .expect("stiffness is non-singular")
}

fn assert_matches_direct(model: &Model, max_relative: f64) {
    let expected = direct_solution(model);
    let actual = &model.system().unwrap().displacement;
    let scale = expected.amax();
    for i in 0..expected.len() {
        assert_abs_diff_eq!(actual[i], expected[i], epsilon = max_relative * scale);
    }
}

/// Yang, Finite Element Structural Analysis, 1986, example 4.1
fn truss_4bar() -> Model {
    let l = 1.0;
    let p = 1.0;
    let theta = 60.0_f64.to_radians();

    let mut model = Model::new();
    model.add_node(1, 0.0, 0.0, 0.0).unwrap();
    model.add_node(2, -l, 0.0, 0.0).unwrap();
    model.add_node(3, -l * theta.cos(), l * theta.sin(), 0.0).unwrap();
    model.add_node(4, l, 0.0, 0.0).unwrap();
    model.add_node(5, l * theta.cos(), -l * theta.sin(), 0.0).unwrap();

    let mut block: ElementBlock<Bar> = ElementBlock::with_capacity("truss", aluminum_bar(1.0), 4);
    for other in 2..=5 {
        block.add_element(&[1, other]).unwrap();
    }
    model.add_block(block);

    model.add_constraint_all(Dof::ALL_NON2D, 0.0);
    model.add_constraint_many(Dof::ALL, 0.0, &[2, 3, 4, 5]).unwrap();
    model.add_force(Dof::X, -p * theta.cos(), 1).unwrap();
    model.add_force(Dof::Y, -p * theta.sin(), 1).unwrap();
    model
}

/// Cook et al., Concepts and Applications of FEA, 4th ed., problem C2.4
fn truss_9bar() -> Model {
    let b = 0.005;
    let h = 0.12;
    let l = 0.16;
    let p = 1.0;

    let mut model = Model::new();
    model.add_node(1, 0.0, 0.0, 0.0).unwrap();
    model.add_node(2, 0.0, h, 0.0).unwrap();
    model.add_node(3, l, 0.0, 0.0).unwrap();
    model.add_node(4, l, h, 0.0).unwrap();
    model.add_node(5, 2.0 * l, 0.0, 0.0).unwrap();
    model.add_node(6, 2.0 * l, h, 0.0).unwrap();

    let mut block: ElementBlock<Bar> = ElementBlock::with_capacity("truss", aluminum_bar(b * b), 8);
    for nodes in [[1usize, 3], [1, 4], [2, 4], [3, 4], [3, 5], [4, 5], [4, 6], [5, 6]] {
        block.add_element(&nodes).unwrap();
    }
    model.add_block(block);

    model.add_constraint_all(Dof::ALL_NON2D, 0.0);
    model.add_constraint_many(Dof::ALL, 0.0, &[1, 2]).unwrap();
    model.add_force(Dof::Y, -p, 6).unwrap();
    model
}

#[test]
fn test_truss_4bar() {
    let mut model = truss_4bar();
    model.assemble().unwrap();
    assert_eq!(model.num_active_dofs(), 2);
    assert_eq!(model.num_elements(), 4);

    let report = model
        .solve_with(&AnalysisOptions::default().with_tolerance(1e-20))
        .unwrap();
    assert!(report.converged);
    assert!(report.iterations > 0);
    assert_matches_direct(&model, 1e-8);

    let u = model.node_displacement(1).unwrap();
    assert_relative_eq!(u.dx, -7.142857142857e-12, max_relative = 1e-8);
    assert_relative_eq!(u.dy, -1.237179148e-11, max_relative = 1e-8);
    assert_eq!(u.dz, 0.0);

    // Supports do not move
    for id in 2..=5 {
        assert_eq!(model.node_displacement(id).unwrap().translation_magnitude(), 0.0);
    }
}

#[test]
fn test_truss_4bar_ssor() {
    let mut model = truss_4bar();
    model.assemble().unwrap();
    let report = model
        .solve_with(&AnalysisOptions::ssor(1.0).with_tolerance(1e-20))
        .unwrap();
    assert!(report.converged);
    assert_matches_direct(&model, 1e-8);
}

#[test]
fn test_truss_9bar() {
    let mut model = truss_9bar();
    model.assemble().unwrap();
    assert_eq!(model.num_active_dofs(), 8);

    let report = model
        .solve_with(&AnalysisOptions::sor(1.5).with_tolerance(1e-18))
        .unwrap();
    assert!(report.converged);
    assert_matches_direct(&model, 1e-8);

    let tip = model.node_displacement(6).unwrap();
    assert_relative_eq!(tip.dy, -1.6787301587e-6, max_relative = 1e-8);

    // Statically determinate: bar forces follow from joint equilibrium
    let forces = &model.element_axial_forces().unwrap()[0].forces;
    let expected = [-4.0 / 3.0, -5.0 / 3.0, 8.0 / 3.0, 0.0, -4.0 / 3.0, 5.0 / 3.0, 0.0, -1.0];
    for (actual, expected) in forces.iter().zip(expected) {
        assert_abs_diff_eq!(*actual, expected, epsilon = 1e-8);
    }
}

#[test]
fn test_truss_9bar_results_and_output() {
    let mut model = truss_9bar();
    model.assemble().unwrap();
    model
        .solve_with(&AnalysisOptions::sor(1.5).with_tolerance(1e-18))
        .unwrap();

    // Loads read back from the global buffer
    assert_eq!(model.node_force(6).unwrap().fy, -1.0);
    assert_eq!(model.node_force(5).unwrap().force_magnitude(), 0.0);

    let summary = model.summary().unwrap();
    assert_eq!(summary.num_nodes, 6);
    assert_eq!(summary.num_elements, 8);
    assert_eq!(summary.total_dofs, 36);
    assert_eq!(summary.active_dofs, 8);
    assert_eq!(summary.max_disp_node, Some(6));
    assert_relative_eq!(summary.max_axial, 8.0 / 3.0, max_relative = 1e-8);
    assert!(summary.to_json().unwrap().contains("\"converged\": true"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truss_9bar.vtu");
    VtkWriter::new(&model).write_vtu(&path).unwrap();
    let vtu = std::fs::read_to_string(&path).unwrap();
    assert!(vtu.contains(r#"<Piece NumberOfPoints="6" NumberOfCells="8">"#));
    assert!(vtu.contains(r#"Name="AxialForce""#));
}

#[test]
fn test_default_tolerance_is_absolute() {
    // Displacements of order 1e-11 are below the default tolerance, so the
    // default solve stops after the first sweep
    let mut model = truss_4bar();
    model.assemble().unwrap();
    let report = model.solve().unwrap();
    assert_eq!(report.iterations, 1);
    assert!(report.converged);
}

#[test]
fn test_solver_reports_non_convergence() {
    let mut model = truss_9bar();
    model.assemble().unwrap();
    let report = model
        .solve_with(&AnalysisOptions::sor(1.5).with_tolerance(1e-18).with_max_iter(10))
        .unwrap();
    assert_eq!(report.iterations, 10);
    assert!(!report.converged);
    assert_eq!(model.last_solve(), Some(report));
}
