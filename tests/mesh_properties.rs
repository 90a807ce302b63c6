// tests/mesh_properties.rs
//
// Integration checks of indexing, wraparound, boundary flags, staggered
// geometry and interpolation on the reference 4 x 3 unit-square grid
// (ncells = 12, dx = 0.25, dy = 1/3).
//
// Run with: cargo test --test mesh_properties

use staggered_grid::{lagrange_interp_2d, linear_interp_2d};
use staggered_grid::{GridError, Point, Staggering, StaggeredGrid};

fn reference_grid() -> StaggeredGrid {
    StaggeredGrid::new(1.0, 1.0, 4, 3).expect("valid grid")
}

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn ids_decompose_row_major() {
    let g = reference_grid();
    assert_eq!(g.n_cells(), 12);
    let c0 = g.cell(0);
    assert_eq!((c0.xindex(&g), c0.yindex(&g)), (0, 0));
    let c5 = g.cell(5);
    assert_eq!((c5.xindex(&g), c5.yindex(&g)), (1, 1));
}

#[test]
fn rows_wrap_left_and_right() {
    let g = reference_grid();
    assert_eq!(g.cell(0).left(&g), 3);
    assert_eq!(g.cell(3).right(&g), 0);
    for row in 0..3 {
        let first = g.cell(g.idx(0, row));
        let last = g.cell(g.idx(3, row));
        assert_eq!(first.left(&g), last.id());
        assert_eq!(last.right(&g), first.id());
    }
}

#[test]
fn columns_wrap_up_and_down() {
    let g = reference_grid();
    for id in 8..12 {
        let c = g.cell(id);
        assert_eq!(c.up(&g), id - 8, "up of {}", id);
    }
    for id in 0..4 {
        let c = g.cell(id);
        assert_eq!(c.down(&g), id + 8, "down of {}", id);
    }
}

#[test]
fn every_neighbor_id_is_in_range() {
    let g = reference_grid();
    for c in g.cells() {
        let ids = [
            c.left(&g),
            c.right(&g),
            c.up(&g),
            c.down(&g),
            c.upleft(&g),
            c.upright(&g),
            c.downleft(&g),
            c.downright(&g),
        ];
        assert!(ids.iter().all(|&n| n < g.n_cells()), "cell {}: {:?}", c.id(), ids);
    }
}

#[test]
fn boundary_flags_match_edge_rows_and_columns() {
    let g = reference_grid();
    for c in g.cells() {
        let id = c.id();
        assert_eq!(c.at_bottom_boundary(&g), id < 4, "bottom {}", id);
        assert_eq!(c.at_top_boundary(&g), (8..12).contains(&id), "top {}", id);
        assert_eq!(c.at_left_boundary(&g), c.xindex(&g) == 0, "left {}", id);
        assert_eq!(c.at_right_boundary(&g), c.xindex(&g) == 3, "right {}", id);
    }
    // Only the two interior cells of the middle row are off the boundary.
    let interior: Vec<usize> = g
        .cells()
        .filter(|c| !c.at_boundary(&g))
        .map(|c| c.id())
        .collect();
    assert_eq!(interior, vec![5, 6]);
}

#[test]
fn storage_points_are_offset_by_half_cells() {
    let g = reference_grid();
    for c in g.cells() {
        let corner = c.corner(&g);
        let center = c.center(&g);
        assert_eq!(corner.x + g.dx() / 2.0, center.x);
        assert_eq!(corner.y + g.dy() / 2.0, center.y);
        assert_eq!(c.hface(&g), Point::new(center.x, corner.y));
        assert_eq!(c.vface(&g), Point::new(corner.x, center.y));
    }
}

#[test]
fn out_of_domain_points_clamp_to_boundary_cells() {
    let g = reference_grid();
    assert_eq!(g.cell_id(Point::new(-1.0, 0.1)), g.cell_id(Point::new(0.0, 0.1)));
    let far = g.cell(11).center(&g);
    assert_eq!(g.cell_id(Point::new(100.0, 100.0)), g.cell_id(far));
    assert_eq!(g.cell_at_point(Point::new(100.0, 100.0)).id(), 11);
    // Locators saturate the same way.
    for s in Staggering::ALL {
        assert_eq!(g.lower_left_cell(s, Point::new(-5.0, -5.0)).id(), 0);
    }
}

#[test]
fn sequences_visit_each_id_once_in_order() {
    let g = reference_grid();
    let forward: Vec<usize> = g.cells().map(|c| c.id()).collect();
    assert_eq!(forward, (0..12).collect::<Vec<_>>());
    let reverse: Vec<usize> = g.cells_rev().map(|c| c.id()).collect();
    assert_eq!(reverse, (0..12).rev().collect::<Vec<_>>());
    // A fresh sequence restarts from the beginning.
    assert_eq!(g.cells().next().map(|c| c.id()), Some(0));
    assert_eq!(g.cells_rev().next().map(|c| c.id()), Some(11));
}

#[test]
fn bilinear_reproduces_corners() {
    let (ul, ur, dl, dr) = (0.3, -1.7, 2.9, 5.5);
    assert_eq!(linear_interp_2d(0.0, 0.0, ul, ur, dl, dr), dl);
    assert_eq!(linear_interp_2d(1.0, 1.0, ul, ur, dl, dr), ur);
    assert_eq!(linear_interp_2d(0.0, 1.0, ul, ur, dl, dr), ul);
    assert_eq!(linear_interp_2d(1.0, 0.0, ul, ur, dl, dr), dr);
}

#[test]
fn biquadratic_returns_centre_at_origin() {
    let c = 4.125;
    let v = lagrange_interp_2d(0.0, 0.0, 9.0, -8.0, 7.0, -6.0, c, 5.0, -4.0, 3.0, -2.0);
    assert_eq!(v, c);
    // Half-way towards the right neighbour along the centre row.
    let v = lagrange_interp_2d(0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 3.0, 0.0, 0.0, 0.0);
    assert!(approx_eq(v, 0.75 + 3.0 * 0.375, 1e-12), "got {}", v);
}

#[test]
fn zero_cell_count_fails_construction() {
    let result = StaggeredGrid::new(1.0, 1.0, 0, 3);
    assert_eq!(result, Err(GridError::ZeroCells { axis: "x", count: 0 }));
}
