use std::error::Error;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::info;
use xmas_tree::{RotationMode, RunOptions, SceneConfig, Viewport};

fn cli() -> Command {
    Command::new("xmas-tree")
        .about("Renders the particle tree headlessly into a software canvas")
        .arg(
            Arg::new("config")
                .long("config")
                .help("JSON scene config; missing fields use defaults"),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .value_parser(value_parser!(u32))
                .default_value("800"),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .value_parser(value_parser!(u32))
                .default_value("600"),
        )
        .arg(
            Arg::new("frames")
                .long("frames")
                .value_parser(value_parser!(u64))
                .default_value("600"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("realtime")
                .long("realtime")
                .action(ArgAction::SetTrue)
                .help("Pace frames on the wall clock"),
        )
        .arg(
            Arg::new("fps")
                .long("fps")
                .value_parser(value_parser!(u32))
                .default_value("60"),
        )
        .arg(
            Arg::new("rotation-mode")
                .long("rotation-mode")
                .value_parser(|s: &str| s.parse::<RotationMode>().map_err(|e| e.to_string()))
                .help("per-frame or time-scaled"),
        )
}

// every defaulted argument is always present, so the fallbacks never apply
fn run_options(matches: &ArgMatches, config: SceneConfig) -> RunOptions {
    RunOptions {
        config,
        viewport: Viewport::new(
            matches.get_one::<u32>("width").copied().unwrap_or_default(),
            matches.get_one::<u32>("height").copied().unwrap_or_default(),
        ),
        frames: matches.get_one::<u64>("frames").copied().unwrap_or_default(),
        seed: matches.get_one::<u64>("seed").copied(),
        realtime: matches.get_flag("realtime"),
        fps: matches.get_one::<u32>("fps").copied().unwrap_or_default(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = cli().get_matches();

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => serde_json::from_str::<SceneConfig>(&std::fs::read_to_string(path)?)?,
        None => SceneConfig::default(),
    };
    if let Some(mode) = matches.get_one::<RotationMode>("rotation-mode") {
        config.rotation_mode = *mode;
    }

    let options = run_options(&matches, config);

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let summary = rt.block_on(xmas_tree::run(options))?;
    info!(
        "{} frames, last frame drew {} points",
        summary.frames, summary.last_stats.drawn
    );
    Ok(())
}
