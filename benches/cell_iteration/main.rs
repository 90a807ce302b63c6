use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use criterion::Throughput;
use staggered_grid::CellField;
use staggered_grid::Point;
use staggered_grid::Staggering;
use staggered_grid::StaggeredGrid;

const NX: usize = 256;
const NY: usize = 128;

fn get_grid_and_field() -> (StaggeredGrid, CellField) {
    let grid = StaggeredGrid::new(2.0, 1.0, NX, NY).unwrap();
    let field = CellField::from_fn(&grid, Staggering::Center, |p| p.x * p.y);
    (grid, field)
}

pub fn cell_iteration_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("cell_iteration");
    group.noise_threshold(0.05);
    group.throughput(Throughput::Elements((NX * NY) as u64));
    group.bench_with_input("five_point_laplacian", &get_grid_and_field(), |b, (grid, field)| {
        b.iter(|| {
            let mut sum = 0.0;
            for cell in grid.cells() {
                let v = field.values();
                sum += v[cell.left(grid)] + v[cell.right(grid)] + v[cell.up(grid)] + v[cell.down(grid)]
                    - 4.0 * field.get(cell);
            }
            sum
        })
    });
    group.bench_with_input("sample_lagrange", &get_grid_and_field(), |b, (grid, field)| {
        b.iter(|| {
            let mut sum = 0.0;
            for cell in grid.cells() {
                sum += field
                    .sample_lagrange(grid, cell.corner(grid).offset(0.01, 0.02))
                    .unwrap();
            }
            sum
        })
    });
    group.bench_with_input("cell_id", &get_grid_and_field(), |b, (grid, _)| {
        b.iter(|| {
            let mut acc = 0usize;
            for i in 0..(NX * NY) {
                let f = i as f64 / (NX * NY) as f64;
                acc ^= grid.cell_id(Point::new(2.0 * f, f * f));
            }
            acc
        })
    });
    group.finish();
}

criterion_group!(benches, cell_iteration_benchmark);
criterion_main!(benches);
