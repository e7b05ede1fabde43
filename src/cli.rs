use std::{path::PathBuf, time::Duration};

use anyhow::{bail, ensure, Context};

pub const USAGE: &str = "\
usage: term_life [options]

  -b, --board-size N     side of the square board (default 25)
  -f, --freq SECONDS     delay between generations (default 0.2)
  -g, --generations N    number of generations to run (default 100)
  -s, --saturation F     fraction of the board seeded alive, 0..=1 (default 0.4)
  -p, --pattern FILE     center a plaintext .cells figure instead of seeding randomly
      --seed N           seed the random generator
      --no-wait          start running without waiting for Enter
  -h, --help             print this message";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub board_size: usize,
    pub delay: Duration,
    pub generations: u64,
    pub saturation: f64,
    pub pattern: Option<PathBuf>,
    pub seed: Option<u64>,
    pub wait: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Run(Config),
    Help,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            board_size: 25,
            delay: Duration::from_millis(200),
            generations: 100,
            saturation: 0.4,
            pattern: None,
            seed: None,
            wait: true,
        }
    }
}

impl Config {

    /// Number of coordinates drawn when seeding randomly.
    #[inline]
    pub fn seed_count(&self) -> usize {
        let size = self.board_size as f64;
        (size * size * self.saturation).floor() as usize
    }
}

/// Parses arguments, program name excluded.
pub fn parse_args<I, S>(args: I) -> anyhow::Result<Action>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut config = Config::default();
    let mut args = args.into_iter().map(Into::into);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| {
            inline
                .clone()
                .or_else(|| args.next())
                .with_context(|| format!("missing value for {name}"))
        };

        match flag.as_str() {
            "-b" | "--board-size" | "--board_size" => {
                config.board_size = value("board size")?
                    .parse()
                    .context("board size should be a positive integer")?;
                ensure!(config.board_size > 0, "board size should be positive");
                ensure!(
                    config.board_size.checked_mul(config.board_size).is_some(),
                    "board size {} is too large",
                    config.board_size
                );
            }

            "-f" | "--freq" => {
                let secs: f64 = value("refresh delay")?
                    .parse()
                    .context("refresh delay should be a number of seconds")?;
                ensure!(
                    secs.is_finite() && secs >= 0.0,
                    "refresh delay should be a non-negative number of seconds"
                );
                config.delay =
                    Duration::try_from_secs_f64(secs).context("refresh delay is too large")?;
            }

            "-g" | "--generations" => {
                config.generations = value("generation count")?
                    .parse()
                    .context("generation count should be a positive integer")?;
                ensure!(config.generations > 0, "generation count should be positive");
            }

            "-s" | "--saturation" => {
                config.saturation = value("saturation")?
                    .parse()
                    .context("saturation should be a number")?;
                ensure!(
                    (0.0..=1.0).contains(&config.saturation),
                    "saturation should be between 0 and 1"
                );
            }

            "-p" | "--pattern" => {
                config.pattern = Some(PathBuf::from(value("pattern")?));
            }

            "--seed" => {
                config.seed = Some(value("seed")?.parse().context("seed should be an integer")?);
            }

            "--no-wait" => config.wait = false,

            "-h" | "--help" => return Ok(Action::Help),

            other => bail!("unknown argument {other:?}"),
        }
    }

    Ok(Action::Run(config))
}
