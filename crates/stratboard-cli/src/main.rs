//! Headless StratBoard shell.
//!
//! Inspects `.map` files, upgrades legacy ones and plays a map's sequences
//! back through the same session engine the editor uses.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use stratboard_core::storage::{SequenceFile, read_map_file};
use stratboard_core::{
    Command, Easing, Instant, JsonSurface, PayloadCodec, PlainCodec, PlaybackEvent, SEQUENCE_COUNT,
    Session, Settings,
};

/// Frame interval of the playback loop.
const FRAME: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(name = "stratboard")]
#[command(version, about = "Inspect and play back StratBoard map files")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// List the contents of each sequence slot
    Info {
        /// Map file to read
        file: PathBuf,
    },
    /// Rewrite a map file in the current format
    Upgrade {
        input: PathBuf,
        output: PathBuf,
    },
    /// Play every sequence from the first slot
    Play {
        file: PathBuf,

        /// Settings file (defaults to the user config directory)
        #[arg(long, value_name = "PATH")]
        settings: Option<PathBuf>,

        /// Transition duration in milliseconds
        #[arg(long, value_name = "MS")]
        duration: Option<u64>,

        /// Transition easing (linear, ease-in, ease-out, ease-in-out, spring)
        #[arg(long, value_name = "EASING")]
        easing: Option<Easing>,

        /// Hold time on each sequence in milliseconds
        #[arg(long, value_name = "MS")]
        hold: Option<u64>,

        /// Advance a virtual clock instead of waiting in real time
        #[arg(long)]
        simulate: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        CliCommand::Info { file } => info(&file),
        CliCommand::Upgrade { input, output } => upgrade(&input, &output),
        CliCommand::Play {
            file,
            settings,
            duration,
            easing,
            hold,
            simulate,
        } => {
            let mut settings = load_settings(settings.as_deref())?;
            if let Some(ms) = duration {
                settings.transition_duration_ms = ms;
            }
            if let Some(easing) = easing {
                settings.easing = easing;
            }
            if let Some(ms) = hold {
                settings.hold_time_ms = ms;
            }
            play(&file, settings, simulate)
        }
    }
}

fn read(path: &Path) -> anyhow::Result<SequenceFile> {
    read_map_file(path, &PlainCodec).with_context(|| format!("Failed to load {}", path.display()))
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match Settings::default_path() {
            Ok(path) => path,
            Err(e) => {
                log::warn!("{e}; using default settings");
                return Ok(Settings::default());
            }
        },
    };
    Settings::load(&path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))
}

fn info(path: &Path) -> anyhow::Result<()> {
    let file = read(path)?;
    println!("{} (version {}, saved {})", path.display(), file.version, file.timestamp);
    for (index, slot) in file.sequences.iter().enumerate() {
        if slot.elements.is_empty() {
            println!("  {:>2}: empty", index + 1);
            continue;
        }
        let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
        for element in &slot.elements {
            *kinds.entry(element.kind().name()).or_default() += 1;
        }
        let summary: Vec<String> = kinds.iter().map(|(kind, n)| format!("{n} {kind}")).collect();
        println!("  {:>2}: {}", index + 1, summary.join(", "));
    }
    Ok(())
}

fn upgrade(input: &Path, output: &Path) -> anyhow::Result<()> {
    let file = read(input)?;
    let mut session = Session::default();
    session.import_file(file)?;
    let json = session.export_snapshot().to_json()?;
    let payload = PlainCodec.encode(&json)?;
    fs::write(output, payload).with_context(|| format!("Failed to write {}", output.display()))?;
    log::info!("Wrote {}", output.display());
    Ok(())
}

fn play(path: &Path, settings: Settings, simulate: bool) -> anyhow::Result<()> {
    let file = read(path)?;
    let mut session = Session::default().with_surface(Box::new(JsonSurface));
    session.set_settings(settings);
    session.import_file(file)?;

    let start = Instant::now();
    if !session.dispatch(Command::Play, start) {
        bail!("Playback could not start");
    }
    println!("Playing {} from sequence 1 of {SEQUENCE_COUNT}", path.display());

    let mut now = start;
    loop {
        let report = session.tick(now);
        match report.playback {
            PlaybackEvent::TransitionStarted(index) => {
                log::info!("Transition to sequence {}", index + 1);
            }
            PlaybackEvent::Ended => break,
            PlaybackEvent::Idle => {}
        }
        if let Some(status) = report.animation {
            log::debug!("{status:?}");
        }
        if simulate {
            now += FRAME;
        } else {
            thread::sleep(FRAME);
            now = Instant::now();
        }
    }

    let sequences = session.sequences();
    println!(
        "Finished on sequence {} with {} elements ({:.1}s)",
        sequences.active_index() + 1,
        session.document().elements().len(),
        now.duration_since(start).as_secs_f64()
    );
    Ok(())
}
