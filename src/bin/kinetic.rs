use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "kinetic", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a site content document.
    Validate(ValidateArgs),
    /// Drive a stage with a scripted event stream and dump sampled frames.
    Simulate(SimulateArgs),
    /// Run the text scramble effect to completion, one frame per line.
    Glitch(GlitchArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input site content JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input site content JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Event script JSON (array of events).
    #[arg(long)]
    script: PathBuf,

    /// Output frame dump JSON.
    #[arg(long)]
    out: PathBuf,

    /// Viewport width in logical pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in logical pixels.
    #[arg(long, default_value_t = 800.0)]
    height: f64,
}

#[derive(Parser, Debug)]
struct GlitchArgs {
    /// Text to scramble.
    #[arg(long)]
    text: String,

    /// RNG seed; the same seed reproduces the same run.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Glitch(args) => cmd_glitch(args),
    }
}

fn read_site_json(path: &Path) -> anyhow::Result<kinetic::SiteContent> {
    let f = File::open(path).with_context(|| format!("open site content '{}'", path.display()))?;
    let r = BufReader::new(f);
    let content: kinetic::SiteContent =
        serde_json::from_reader(r).with_context(|| "parse site content JSON")?;
    Ok(content)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let content = read_site_json(&args.in_path)?;
    content.validate()?;
    eprintln!(
        "ok: {} sections, {} process steps",
        content.navigation.sections.len(),
        content.process.steps.len()
    );
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let content = read_site_json(&args.in_path)?;

    let f = File::open(&args.script)
        .with_context(|| format!("open event script '{}'", args.script.display()))?;
    let events: Vec<kinetic::Event> =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse event script JSON")?;

    let mut stage = kinetic::Stage::new(content, args.width, args.height)?;
    let mut frames: Vec<kinetic::StageFrame> = Vec::new();
    for event in events {
        stage.handle_event(event);
        // One sampled frame per simulated display refresh.
        if matches!(event, kinetic::Event::Tick { .. }) {
            frames.push(stage.sample()?);
        }
    }

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let out = File::create(&args.out)
        .with_context(|| format!("write frame dump '{}'", args.out.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(out), &frames)
        .with_context(|| "serialize frame dump")?;

    eprintln!("wrote {} ({} frames)", args.out.display(), frames.len());
    Ok(())
}

fn cmd_glitch(args: GlitchArgs) -> anyhow::Result<()> {
    let mut glitch = kinetic::glitch::GlitchText::new(args.text, args.seed);
    glitch.pointer_enter();
    let budget = glitch.ticks_to_complete();
    for _ in 0..budget {
        println!("{}", glitch.tick());
    }
    Ok(())
}
