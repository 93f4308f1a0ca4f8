use rcross::moves::format_alg;
use rcross::scramble;
use rcross::solver::CrossSolver;

fn main() {
    let scr = format_alg(&scramble());
    println!("Scramble: {}", scr);
    let solver = CrossSolver::new();
    let mut print = |s: &str| println!("{s}");
    solver.start_search(&scr, "", 5, 8, &rcross::moves::FACE_MOVES, &mut print);
}
