use std::{
    io::{self, Write},
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Duration,
};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    terminal::{Clear, ClearType},
    tty::IsTty,
};

use crate::proc::Board;

pub const INITIAL_TITLE: &str = "-- Initial board --";

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Output sink for rendered frames. With `ansi` on every frame replaces the
/// previous one on screen, otherwise frames are appended.
pub struct Screen<W: Write> {
    out: W,
    ansi: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub generations: u64,
    pub live: usize,
    pub interrupted: bool,
}

impl Screen<io::Stdout> {

    #[inline]
    pub fn stdout() -> Self {
        let out = io::stdout();
        let ansi = out.is_tty();
        Screen { out, ansi }
    }
}

impl<W: Write> Screen<W> {

    #[inline]
    pub fn new(out: W, ansi: bool) -> Self {
        Screen { out, ansi }
    }

    pub fn start(&mut self) -> io::Result<()> {
        if self.ansi {
            execute!(self.out, Hide)?;
        }
        Ok(())
    }

    pub fn present(&mut self, frame: &str) -> io::Result<()> {
        if self.ansi {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }

    pub fn finish(&mut self) -> io::Result<()> {
        if self.ansi {
            execute!(self.out, Show)?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[inline]
pub fn generation_title(generation: u64) -> String {
    format!("-- Generation: {generation} --")
}

/// Shows the initial board, blocks on `prompt`, then calls `arm` and runs.
/// `arm` installs the interrupt handler: until then Ctrl-C keeps its default
/// meaning, so quitting at the prompt ends the process.
pub fn play<W, P, A>(
    board: &mut Board,
    generations: u64,
    delay: Duration,
    screen: &mut Screen<W>,
    prompt: P,
    arm: A,
    stop: &AtomicBool,
) -> io::Result<RunSummary>
where
    W: Write,
    P: FnOnce() -> io::Result<()>,
    A: FnOnce() -> io::Result<()>,
{
    screen.present(&board.render(INITIAL_TITLE))?;
    prompt()?;
    arm()?;
    screen.start()?;
    run(board, generations, delay, screen, stop)
}

/// Steps the board `generations` times, presenting each new generation and
/// sleeping `delay` after it. `stop` is checked before every generation.
pub fn run<W: Write>(
    board: &mut Board,
    generations: u64,
    delay: Duration,
    screen: &mut Screen<W>,
    stop: &AtomicBool,
) -> io::Result<RunSummary> {
    let mut generation = 0u64;
    while generation < generations {

        if stop.load(Ordering::Relaxed) {
            log::warn!("interrupted after {generation} of {generations} generations");
            return Ok(RunSummary {
                generations: generation,
                live: board.live_count(),
                interrupted: true,
            });
        }

        generation += 1;
        board.step();
        screen.present(&board.render(&generation_title(generation)))?;
        log::debug!("generation {generation}: {} live cells", board.live_count());

        thread::sleep(delay);
    }

    Ok(RunSummary {
        generations: generation,
        live: board.live_count(),
        interrupted: false,
    })
}

/// Flag raised by the SIGINT handler.
#[inline]
pub fn interrupt_flag() -> &'static AtomicBool {
    &INTERRUPTED
}

/// Routes Ctrl-C to `interrupt_flag` so the run loop can stop and restore the
/// cursor instead of the process dying mid-frame.
pub fn install_interrupt_handler() -> io::Result<()> {
    extern "C" fn on_interrupt(_: libc::c_int) {
        INTERRUPTED.store(true, Ordering::Relaxed);
    }

    // SAFETY: the handler only performs an atomic store, which is async-signal-safe.
    let prev = unsafe { libc::signal(libc::SIGINT, on_interrupt as libc::sighandler_t) };
    if prev == libc::SIG_ERR {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Blocks until a line is read from stdin. Does nothing when stdin is not a
/// terminal.
pub fn wait_for_enter() -> io::Result<()> {
    let stdin = io::stdin();
    if stdin.is_tty() {
        let mut line = String::new();
        stdin.read_line(&mut line)?;
    }
    Ok(())
}
