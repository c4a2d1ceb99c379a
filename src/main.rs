use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chainviz::config::{VizConfig, CONFIG_FILENAME};
use chainviz::graph::{focus_view_json, RenderMode, TerminalSurface};
use chainviz::layout::RenderSurface;
use chainviz::session::Session;
use chainviz::svg::SvgSurface;
use chainviz::{tokenize, TransitionModel};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chainviz")]
#[command(version, about = "Visualize the Markov transition graph of a token sequence", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Configuration file (defaults to ./.chainviz.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct InputArgs {
    /// Input text; read from --file or stdin when omitted
    text: Option<String>,

    /// Read input text from a file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Focus a token as if the pointer were over its node
    #[arg(long)]
    focus: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the transition chain as JSON
    Chain {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Lay out the graph and draw it in the terminal
    Graph {
        #[command(flatten)]
        input: InputArgs,

        /// ASCII glyphs for legacy terminals
        #[arg(long)]
        ascii: bool,

        /// No colors
        #[arg(long)]
        plain: bool,

        /// Output width in characters
        #[arg(long, default_value_t = 80)]
        cols: usize,

        /// Output height in characters
        #[arg(long, default_value_t = 24)]
        rows: usize,
    },

    /// Lay out the graph and write an SVG document
    Svg {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the effective configuration, or write it to a file
    Config {
        /// Write to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<VizConfig> {
    match path {
        Some(path) => VizConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(VizConfig::load_optional()
            .with_context(|| format!("Failed to load {}", CONFIG_FILENAME))?
            .unwrap_or_default()),
    }
}

fn read_input(args: &InputArgs) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()));
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read input from stdin")?;
    Ok(text)
}

/// Build a session, settle the layout and apply the requested focus
fn settled_session<S: RenderSurface>(
    surface: S,
    config: VizConfig,
    input: &InputArgs,
) -> anyhow::Result<Session<S>> {
    let text = read_input(input)?;
    let mut session = Session::new(surface, config);
    session.set_input(text);
    let ticks = session.settle();
    info!(ticks, "Layout settled");

    if let Some(token) = &input.focus {
        if !session.hover(token) {
            warn!(token = token.as_str(), "Focus token is not a node of the graph");
        }
    }
    Ok(session)
}

fn cmd_chain(input: &InputArgs) -> anyhow::Result<()> {
    let text = read_input(input)?;
    let model = TransitionModel::build(&tokenize(&text));
    let json = focus_view_json(&model, input.focus.as_deref()).context("Failed to serialize chain")?;
    println!("{}", json);
    Ok(())
}

fn cmd_graph(
    config: VizConfig,
    input: &InputArgs,
    ascii: bool,
    plain: bool,
    cols: usize,
    rows: usize,
) -> anyhow::Result<()> {
    let colored_output = !plain && std::io::stdout().is_terminal();
    let mode = match (ascii, colored_output) {
        (_, false) => RenderMode::Plain,
        (true, true) => RenderMode::Ascii,
        (false, true) => RenderMode::Unicode,
    };
    let surface = TerminalSurface::new(config.render.viewport()).with_mode(mode);
    let session = settled_session(surface, config, input)?;

    let rendered = session.surface().draw(cols, rows);
    if colored_output {
        print!("{}", rendered.to_string_colored());
    } else {
        println!("{}", rendered.to_string_plain());
    }

    println!();
    println!(
        "{} {}, {}",
        "Chain:".bright_cyan().bold(),
        format!("{} nodes", session.model().len()).cyan(),
        format!("{} links", session.model().transition_count()).cyan()
    );
    if let Some(token) = session.focused() {
        println!("{} {}", "Focus:".bright_cyan().bold(), token.yellow());
        println!("{}", session.visible_json().context("Failed to serialize chain")?);
    }
    Ok(())
}

fn cmd_svg(config: VizConfig, input: &InputArgs, output: Option<&Path>) -> anyhow::Result<()> {
    let surface = SvgSurface::new(config.render.viewport());
    let session = settled_session(surface, config, input)?;

    match output {
        Some(path) => {
            session
                .surface()
                .save(path)
                .with_context(|| format!("Failed to write SVG to {}", path.display()))?;
            println!(
                "{} Wrote {} ({} nodes)",
                "✓".bright_green(),
                path.display(),
                session.surface().node_count()
            );
        }
        None => print!("{}", session.surface().to_svg()),
    }
    Ok(())
}

fn cmd_config(config: &VizConfig, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            config
                .save(path)
                .with_context(|| format!("Failed to save config to {}", path.display()))?;
            println!("{} Wrote {}", "✓".bright_green(), path.display());
        }
        None => print!("{}", toml::to_string_pretty(config).context("Failed to serialize config")?),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter_layer = if cli.debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::new("info")
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("chainviz v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Chain { input } => cmd_chain(&input),
        Commands::Graph {
            input,
            ascii,
            plain,
            cols,
            rows,
        } => cmd_graph(config, &input, ascii, plain, cols, rows),
        Commands::Svg { input, output } => cmd_svg(config, &input, output.as_deref()),
        Commands::Config { output } => cmd_config(&config, output.as_deref()),
    }
}
