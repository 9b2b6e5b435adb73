//! Slime Battle
//!
//! Terminal entry point: a Sage fights random slimes until they quit or fall.

mod display;
mod input;

use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use strum::IntoEnumIterator;
use tracing::info;

use sb_core::player::{Job, Player};
use sb_core::{ActionSource, Battle, BattleOptions, BattleResult, GameRng, Rules, ScriptedActions};

use display::Renderer;
use input::{Console, RunControl, StdinActions};

const RC_FILE: &str = ".slimebattlerc";

/// Turn-based slime battles in the terminal
#[derive(Parser, Debug)]
#[command(name = "slime-battle")]
#[command(author, version, about = "Slime Battle - fight the slimes!", long_about = None)]
struct Args {
    /// Player name
    #[arg(short = 'u', long = "name")]
    name: Option<String>,

    /// Character class (sage, adventurer)
    #[arg(short = 'j', long = "job")]
    job: Option<String>,

    /// RNG seed for a reproducible run
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Options file (defaults to ~/.slimebattlerc)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Comma-separated actions to play instead of reading stdin
    #[arg(long = "script")]
    script: Option<String>,

    /// Print encounters and rounds as JSON lines
    #[arg(long = "json")]
    json: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    no_color: bool,

    /// Verbose narration and debug logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Print the effective options in rc-file format and exit
    #[arg(long = "dump-config")]
    dump_config: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let options = load_options(&args)?;
    if args.dump_config {
        print!("{}", options.to_config_string());
        return Ok(());
    }
    let renderer = Renderer::new(options.color, options.verbose);
    let rng = options.seed.map_or_else(GameRng::from_entropy, GameRng::new);
    info!(seed = rng.seed(), name = %options.name, job = %options.job, "starting run");

    let mut player = Player::new(options.name.clone(), options.job);
    let rules = options.rules();

    if let Some(script) = &args.script {
        let source = ScriptedActions::parse(script)?;
        let console = Console::new(source, io::stdout(), renderer, args.json);
        play(&mut player, rng, rules, console)
    } else {
        // Prompts go to stderr in JSON mode so stdout stays machine-readable
        let console = if args.json {
            let source = StdinActions::new(io::stdin().lock(), BoxedWriter::stderr(), renderer);
            Console::new(source, io::stdout(), renderer, true)
        } else {
            let source = StdinActions::new(io::stdin().lock(), BoxedWriter::stdout(), renderer);
            Console::new(source, io::stdout(), renderer, false)
        };
        if !args.json {
            println!("Slime Battle!");
        }
        play(&mut player, rng, rules, console)
    }
}

/// Fight encounters until the player falls, quits, or runs out of actions
fn play<S, W>(
    player: &mut Player,
    mut rng: GameRng,
    rules: Rules,
    mut console: Console<S, W>,
) -> Result<(), Box<dyn Error>>
where
    S: ActionSource + RunControl,
    W: io::Write,
{
    loop {
        let mut battle = Battle::new(&mut *player, rng).with_rules(rules);
        let snapshot = battle.start_encounter()?;
        console.encounter(&snapshot)?;

        let result = battle.run(&mut console)?;
        rng = battle.into_rng();
        console.take_error()?;

        match result {
            None => break,
            Some(BattleResult::Lost) => break,
            Some(result) => info!(?result, level = player.stats.level, "encounter over"),
        }
        if !console.source_mut().another_encounter() {
            break;
        }
    }

    console.farewell(player)?;
    Ok(())
}

/// Options from the rc file, overridden by command-line flags
fn load_options(args: &Args) -> Result<BattleOptions, Box<dyn Error>> {
    let options = match &args.config {
        Some(path) => BattleOptions::load_from_file(path)?,
        None => match dirs::home_dir().map(|home| home.join(RC_FILE)) {
            Some(path) if path.exists() => BattleOptions::load_from_file(&path)?,
            _ => BattleOptions::default(),
        },
    };
    apply_overrides(options, args)
}

fn apply_overrides(
    mut options: BattleOptions,
    args: &Args,
) -> Result<BattleOptions, Box<dyn Error>> {
    if let Some(name) = &args.name {
        options.name = name.clone();
    }
    if let Some(job) = &args.job {
        options.job = job.parse::<Job>().map_err(|_| {
            let known: Vec<String> = Job::iter().map(|j| j.to_string()).collect();
            format!("unknown job '{job}' (expected one of: {})", known.join(", "))
        })?;
    }
    if args.seed.is_some() {
        options.seed = args.seed;
    }
    if args.no_color {
        options.color = false;
    }
    if args.verbose {
        options.verbose = true;
    }
    if args.json {
        options.color = false;
    }
    Ok(options)
}

/// Logs go to stderr; `RUST_LOG` overrides the default level
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Either standard stream behind one writer type
enum BoxedWriter {
    Stdout(io::Stdout),
    Stderr(io::Stderr),
}

impl BoxedWriter {
    fn stdout() -> Self {
        BoxedWriter::Stdout(io::stdout())
    }

    fn stderr() -> Self {
        BoxedWriter::Stderr(io::stderr())
    }
}

impl io::Write for BoxedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            BoxedWriter::Stdout(out) => out.write(buf),
            BoxedWriter::Stderr(err) => err.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            BoxedWriter::Stdout(out) => out.flush(),
            BoxedWriter::Stderr(err) => err.flush(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("slime-battle").chain(argv.iter().copied()))
    }

    fn rc_options() -> BattleOptions {
        BattleOptions::parse_config("OPTIONS=name:Filed,job:adventurer,seed:1,color\n").unwrap()
    }

    #[test]
    fn test_cli_overrides_rc_values() {
        let options = apply_overrides(
            rc_options(),
            &args(&["--name", "Terry", "--seed", "9", "--no-color"]),
        )
        .unwrap();
        assert_eq!(options.name, "Terry");
        assert_eq!(options.job, Job::Adventurer);
        assert_eq!(options.seed, Some(9));
        assert!(!options.color);
    }

    #[test]
    fn test_rc_values_survive_without_flags() {
        let options = apply_overrides(rc_options(), &args(&[])).unwrap();
        assert_eq!(options, rc_options());
    }

    #[test]
    fn test_json_disables_color() {
        let options = apply_overrides(rc_options(), &args(&["--json"])).unwrap();
        assert!(!options.color);
    }

    #[test]
    fn test_unknown_job_is_reported() {
        let err = apply_overrides(rc_options(), &args(&["--job", "bard"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown job 'bard' (expected one of: adventurer, sage)"
        );
    }

    #[test]
    fn test_dumped_config_reads_back() {
        let options = apply_overrides(rc_options(), &args(&["--job", "sage"])).unwrap();
        let dumped = options.to_config_string();
        assert!(dumped.contains("OPTIONS=job:sage"));
        assert_eq!(BattleOptions::parse_config(&dumped).unwrap(), options);
    }

    #[test]
    fn test_scripted_run_ends_when_script_does() {
        let mut player = Player::sage("Terry");
        let rules = Rules {
            flee_chance: 1.0,
            ..Rules::default()
        };
        let source = ScriptedActions::parse("flee, flee, flee").unwrap();
        let console = Console::new(source, Vec::new(), Renderer::new(false, false), true);
        play(&mut player, GameRng::new(3), rules, console).unwrap();

        // Three clean getaways: no damage taken, nothing earned
        assert_eq!(player.stats.hp, player.stats.hp_max);
        assert_eq!(player.stats.exp, 0);
        assert_eq!(player.gold, 0);
    }
}
