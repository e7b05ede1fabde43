use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use term_life::{Board, BoardError, Cell, Pattern};

fn board_with(size: usize, cells: &[(i64, i64)]) -> Board {
    let mut b = Board::new(size).unwrap();
    for c in cells {
        b.set_cell((*c).into(), true).unwrap();
    }
    b
}

fn live(b: &Board) -> Vec<(i64, i64)> {
    b.live_cells().map(|c| (c.x, c.y)).collect()
}

/// Single-buffer update: later cells observe already-updated neighbors.
fn step_in_place(b: &mut Board) {
    let n = b.size() as i64;
    for y in 0..n {
        for x in 0..n {
            let cell = Cell::new(x, y);
            let neighbors = b.neighbor_count(cell);
            let alive = b.get_cell(cell).unwrap();
            let next = matches!((alive, neighbors), (true, 2..=3) | (false, 3));
            b.set_cell(cell, next).unwrap();
        }
    }
}

#[test]
fn blinker_has_period_two() {
    let mut b = Board::new(7).unwrap();
    b.set_blinker(Cell::new(3, 3)).unwrap();
    let start = b.clone();

    b.step();
    assert_eq!(live(&b), vec![(2, 3), (3, 3), (4, 3)]);
    b.step();
    assert_eq!(b, start);
}

#[test]
fn block_is_still() {
    let mut b = Board::new(6).unwrap();
    b.place_pattern(&Pattern::block(), Cell::new(2, 2)).unwrap();
    let start = live(&b);
    for _ in 0..20 {
        b.step();
        assert_eq!(live(&b), start);
    }
}

#[test]
fn block_in_corner_is_still() {
    let mut b = board_with(4, &[(0, 0), (1, 0), (0, 1), (1, 1)]);
    b.step();
    assert_eq!(live(&b), vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
}

#[test]
fn glider_uses_previous_generation_only() {
    let mut b = Board::new(6).unwrap();
    b.place_pattern(&Pattern::glider(), Cell::new(1, 1)).unwrap();

    let mut naive = b.clone();
    step_in_place(&mut naive);

    b.step();
    assert_eq!(live(&b), vec![(1, 2), (3, 2), (2, 3), (3, 3), (2, 4)]);
    assert_ne!(live(&naive), live(&b));
}

#[test]
fn glider_dies_into_a_block_against_the_edge() {
    let mut b = Board::new(5).unwrap();
    b.place_pattern(&Pattern::glider(), Cell::new(0, 0)).unwrap();
    for _ in 0..12 {
        b.step();
    }
    // no wraparound: the glider jams in the bottom-right corner
    assert_eq!(live(&b), vec![(3, 3), (4, 3), (3, 4), (4, 4)]);
}

#[test]
fn centered_pattern() {
    let mut b = Board::new(9).unwrap();
    b.place_pattern_centered(&Pattern::blinker()).unwrap();
    assert_eq!(live(&b), vec![(4, 3), (4, 4), (4, 5)]);
}

#[test]
fn pattern_off_the_board_is_rejected() {
    let mut b = Board::new(4).unwrap();
    assert_eq!(
        b.place_pattern(&Pattern::glider(), Cell::new(2, 0)),
        Err(BoardError::OutOfRange { x: 4, y: 1, size: 4 })
    );
    assert_eq!(b.live_count(), 0);
}

#[test]
fn seeded_generator_is_reproducible() {
    let mut a = Board::new(10).unwrap();
    let mut b = Board::new(10).unwrap();
    a.random_seed_with(40, &mut StdRng::seed_from_u64(7));
    b.random_seed_with(40, &mut StdRng::seed_from_u64(7));
    assert_eq!(a, b);
}

#[test]
fn drawing_more_than_the_board_holds_saturates() {
    let mut b = Board::new(2).unwrap();
    let distinct = b.random_seed_with(1000, &mut StdRng::seed_from_u64(1));
    assert!(distinct <= 4);
    assert_eq!(b.live_count(), distinct);
}

proptest! {
    #[test]
    fn random_seed_stays_within_count_and_bounds(
        size in 1usize..30,
        count in 0usize..500,
        seed in any::<u64>(),
    ) {
        let mut b = Board::new(size).unwrap();
        let distinct = b.random_seed_with(count, &mut StdRng::seed_from_u64(seed));

        prop_assert!(distinct <= count);
        prop_assert_eq!(b.live_count(), distinct);
        for c in b.live_cells() {
            prop_assert!(c.x >= 0 && c.y >= 0);
            prop_assert!((c.x as usize) < size && (c.y as usize) < size);
        }
    }

    #[test]
    fn neighbor_count_respects_edges(
        size in 1usize..12,
        seed in any::<u64>(),
    ) {
        let mut b = Board::new(size).unwrap();
        b.random_seed_with(size * size, &mut StdRng::seed_from_u64(seed));
        let n = size as i64;

        for y in 0..n {
            for x in 0..n {
                let count = b.neighbor_count(Cell::new(x, y));
                let on_x_edge = x == 0 || x == n - 1;
                let on_y_edge = y == 0 || y == n - 1;
                let max = match (on_x_edge, on_y_edge) {
                    _ if n == 1 => 0,
                    (true, true) => 3,
                    (true, false) | (false, true) => 5,
                    (false, false) => 8,
                };
                prop_assert!(count <= max, "({x}, {y}) counted {count} > {max}");
            }
        }
    }

    #[test]
    fn out_of_range_is_always_an_error(
        size in 1usize..20,
        x in -40i64..40,
        y in -40i64..40,
    ) {
        let mut b = Board::new(size).unwrap();
        let n = size as i64;
        let inside = (0..n).contains(&x) && (0..n).contains(&y);

        prop_assert_eq!(b.get_cell(Cell::new(x, y)).is_ok(), inside);
        prop_assert_eq!(b.set_cell(Cell::new(x, y), true).is_ok(), inside);
        prop_assert_eq!(b.live_count(), usize::from(inside));
    }

    #[test]
    fn step_keeps_render_shape(size in 1usize..15, seed in any::<u64>()) {
        let mut b = Board::new(size).unwrap();
        b.random_seed_with(size * size / 2, &mut StdRng::seed_from_u64(seed));
        b.step();

        let text = b.render("t");
        let lines: Vec<&str> = text.lines().collect();
        prop_assert_eq!(lines.len(), size + 1);
        prop_assert!(lines[1..].iter().all(|l| l.chars().count() == size * 2));
        prop_assert_eq!(text.matches('o').count(), b.live_count());
    }
}
