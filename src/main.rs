//! Tideline CLI
//!
//! Usage:
//!   tideline --render                      # Fully revealed page to stdout
//!   tideline --render site/index.html      # ... or to a file
//!   tideline --interactive                 # Scroll simulation REPL
//!   tideline --serve                       # HTTP preview API
//!   tideline --theme toggle                # Flip the stored theme

use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tideline::config::Config;
use tideline::core::{
    render_static, resolve_content, run_server, ContactMessage, Page, SimulatedViewport,
    ThemeController,
};
use tideline::types::{PageEvent, PortfolioContent, ReasonCode, RevealEvent, SectionId, Theme, ThemeEvent};
use tideline::{FolioError, Result, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "tideline",
    version = VERSION,
    about = "Tideline - the Ocean Flow portfolio page",
    long_about = "Tideline renders a single-page portfolio whose sections reveal once\n\
                  when scrolled into view, with staggered list entrances and a\n\
                  light/dark theme that remembers an explicit choice.\n\n\
                  Modes:\n  \
                  --render       Write the fully revealed page as HTML\n  \
                  --interactive  Scroll a headless viewport and watch reveals\n  \
                  --serve        HTTP + WebSocket preview API\n  \
                  --theme        Show, toggle or reset the stored theme"
)]
struct Args {
    /// Render the page; to stdout when no path is given
    #[arg(long, num_args = 0..=1, default_missing_value = "-", value_name = "PATH")]
    render: Option<PathBuf>,

    /// Interactive scroll simulation
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (overrides config)
    #[arg(long)]
    addr: Option<String>,

    /// Operate on the stored theme preference
    #[arg(long, value_enum, value_name = "ACTION")]
    theme: Option<ThemeAction>,

    /// Ambient color scheme to assume when nothing is stored
    #[arg(long)]
    prefers_dark: bool,

    /// Portfolio content JSON (overrides config)
    #[arg(long, value_name = "PATH")]
    content: Option<PathBuf>,

    /// Config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ThemeAction {
    Show,
    Toggle,
    Reset,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args);
    if args.no_color {
        colored::control::set_override(false);
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(args: &Args) {
    let filter = match args.verbose {
        0 => "warn,tideline=info",
        1 => "info,tideline=debug",
        2 => "debug,tideline=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if args.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_ansi(!args.no_color).with_writer(io::stderr))
            .init();
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(addr) = &args.addr {
        config.server.addr = addr.clone();
    }
    if let Some(path) = &args.content {
        config.content.path = Some(path.clone());
    }
    let content = Arc::new(resolve_content(config.content.path.as_deref())?);
    debug!(projects = content.projects.len(), "content ready");

    if let Some(action) = args.theme {
        return run_theme(action, &args, &config);
    }
    if args.serve {
        return run_serve(&config, content).await;
    }
    if let Some(path) = &args.render {
        return run_render(path, &args, &config, &content);
    }
    if !args.interactive {
        debug!("no mode given, starting the scroll simulation");
    }
    run_interactive(&args, &config, content)
}

/// Static export of the fully revealed page
fn run_render(path: &Path, args: &Args, config: &Config, content: &PortfolioContent) -> Result<()> {
    let html = render_static(content, config, Theme::from_dark(args.prefers_dark));
    if path.as_os_str() == "-" {
        print!("{}", html);
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, html)?;
    println!("{} {}", "Wrote".green(), path.display());
    Ok(())
}

/// Stored theme preference, shared with the interactive mode
fn run_theme(action: ThemeAction, args: &Args, config: &Config) -> Result<()> {
    let path = config.storage.resolved_preferences_path();
    let (mut controller, reason) = ThemeController::from_config(config, args.prefers_dark)?;

    let event = match action {
        ThemeAction::Show => ThemeEvent::new(controller.theme(), reason),
        ThemeAction::Toggle => {
            controller.toggle()?;
            ThemeEvent::new(controller.theme(), ReasonCode::R203_THEME_TOGGLED)
        }
        ThemeAction::Reset => {
            let reason = controller.clear_preference(args.prefers_dark)?;
            ThemeEvent::new(controller.theme(), reason)
        }
    };
    print_event(&PageEvent::Theme(event), args)?;
    if !args.json {
        println!("  stored in {}", path.display().to_string().dimmed());
    }
    Ok(())
}

/// Run HTTP API server
async fn run_serve(config: &Config, content: Arc<PortfolioContent>) -> Result<()> {
    println!();
    println!("{}", format!("🌊 Tideline v{} preview server", VERSION).bold());
    println!();
    let addr = config.server.addr.clone();
    run_server(&addr, config.clone(), content).await
}

/// Interactive scroll simulation
///
/// Runs on the runtime thread so contact submissions can spawn their
/// delivery task.
fn run_interactive(args: &Args, config: &Config, content: Arc<PortfolioContent>) -> Result<()> {
    let mut page = Page::simulated(content, config);
    let (mut theme, reason) = ThemeController::from_config(config, args.prefers_dark)?;

    print_header(args.no_color);
    println!("Commands: scroll <px> | goto <section> | theme | ambient dark|light");
    println!("          expand <project-id> | submit <name> | <email> | <message>");
    println!("          status | quit");
    println!();

    print_event(&PageEvent::Theme(ThemeEvent::new(theme.theme(), reason)), args)?;
    print_reveals(&page.pump(), args)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", format_prompt(page.scroll_top(), theme.theme(), args.no_color));
        stdout.flush()?;

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        let outcome = match command.to_ascii_lowercase().as_str() {
            "quit" | "exit" => break,
            "scroll" => match rest.parse::<f64>() {
                Ok(delta) => print_reveals(&page.scroll_by(delta), args),
                Err(_) => Err(FolioError::Config(format!("'{}' is not a pixel offset", rest))),
            },
            "goto" => SectionId::from_anchor(rest)
                .ok_or_else(|| FolioError::UnknownSection(rest.to_string()))
                .and_then(|section| page.navigate(section))
                .and_then(|events| print_reveals(&events, args)),
            "theme" => theme.toggle().and_then(|t| {
                print_event(
                    &PageEvent::Theme(ThemeEvent::new(t, ReasonCode::R203_THEME_TOGGLED)),
                    args,
                )
            }),
            "ambient" => {
                let reason = theme.ambient_changed(rest.eq_ignore_ascii_case("dark"));
                print_event(&PageEvent::Theme(ThemeEvent::new(theme.theme(), reason)), args)
            }
            "expand" => page.toggle_project(rest).map(|expanded| {
                let label = if expanded { "expanded" } else { "collapsed" };
                println!("  {} {}", rest.bold(), label);
            }),
            "submit" => submit(&mut page, rest),
            "status" => print_status(&page, theme.theme(), args),
            _ => Err(FolioError::Config(format!("unknown command '{}'", command))),
        };

        if let Err(e) = outcome {
            println!("  {} {}", "⚠".yellow(), e);
        }
    }

    page.unmount();
    println!("\nUnmounted. Revealed: {}/{}", page.revealed_sections().len(), SectionId::ALL.len());
    Ok(())
}

fn submit(page: &mut Page<SimulatedViewport>, rest: &str) -> Result<()> {
    let mut parts = rest.splitn(3, '|').map(str::trim);
    let message = ContactMessage::new(
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
    );
    let reason = page.contact_mut().submit(message)?;
    println!(
        "  🍶 Sending your bottle to sea... ({}ms) {}",
        page.contact().delay().as_millis(),
        reason.code().dimmed()
    );
    Ok(())
}

fn print_reveals(events: &[RevealEvent], args: &Args) -> Result<()> {
    for event in events {
        print_event(&PageEvent::Reveal(event.clone()), args)?;
    }
    Ok(())
}

fn print_event(event: &PageEvent, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string(event)?);
    } else if args.no_color {
        println!("  {}", event.to_parseable_string());
    } else {
        println!("  {}", event.to_terminal_string());
    }
    Ok(())
}

fn print_status(page: &Page<SimulatedViewport>, theme: Theme, args: &Args) -> Result<()> {
    let state = page.state();
    if args.json {
        println!("{}", serde_json::to_string(&state)?);
        return Ok(());
    }

    for section in SectionId::ALL {
        let mark = if state.is_revealed(section) { "●".green() } else { "○".dimmed() };
        println!("  {} {} {}", mark, section.emoji(), section.nav_label());
    }
    if let Some(contact) = &state.contact {
        println!("  contact: {:?}, delivered {}", contact.state, contact.delivered);
        if let Some(toast) = contact.toasts.last() {
            println!("  {} {}", toast.title.bold(), toast.description);
        }
    }
    println!("  theme: {} {}", theme.emoji(), theme);
    Ok(())
}

fn print_header(no_color: bool) {
    let title = format!("Tideline v{} - scroll simulation", VERSION);
    if no_color {
        println!("========================================");
        println!("  {}", title);
        println!("========================================");
    } else {
        println!("{}", "🌊 ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~ 🌊".cyan());
        println!("   {}", title.bold());
        println!("{}", "🌊 ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~ 🌊".cyan());
    }
    println!();
}

fn format_prompt(scroll_top: f64, theme: Theme, no_color: bool) -> String {
    if no_color {
        format!("[{:>6.0}px | {}] > ", scroll_top, theme)
    } else {
        format!("{} [{:>6.0}px] > ", theme.emoji(), scroll_top).cyan().to_string()
    }
}
