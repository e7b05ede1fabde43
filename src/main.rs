use anyhow::Context;
use rand::{rngs::StdRng, SeedableRng};

use term_life::{
    cli::{self, Action, Config, USAGE},
    draw::{self, Screen},
    Board, Pattern,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match cli::parse_args(std::env::args().skip(1))? {
        Action::Run(config) => config,
        Action::Help => {
            println!("{USAGE}");
            return Ok(());
        }
    };

    let mut board = seeded_board(&config)?;
    log::info!(
        "starting {0}x{0} board with {1} live cells for {2} generations",
        config.board_size,
        board.live_count(),
        config.generations
    );

    let mut screen = Screen::stdout();
    let wait = config.wait;
    let summary = draw::play(
        &mut board,
        config.generations,
        config.delay,
        &mut screen,
        || if wait { draw::wait_for_enter() } else { Ok(()) },
        draw::install_interrupt_handler,
        draw::interrupt_flag(),
    );
    screen.finish()?;

    let summary = summary?;
    log::info!(
        "finished after {} generations with {} live cells",
        summary.generations,
        summary.live
    );
    Ok(())
}

fn seeded_board(config: &Config) -> anyhow::Result<Board> {
    let mut board = Board::new(config.board_size)?;

    if let Some(path) = &config.pattern {
        let pattern = Pattern::load(path)?;
        board
            .place_pattern_centered(&pattern)
            .with_context(|| format!("pattern {path:?} does not fit on the board"))?;
    } else if let Some(seed) = config.seed {
        board.random_seed_with(config.seed_count(), &mut StdRng::seed_from_u64(seed));
    } else {
        board.random_seed(config.seed_count());
    }

    Ok(board)
}
