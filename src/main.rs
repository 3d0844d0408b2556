//! docklayout - save and restore dockable panel layouts
//!
//! A layout is saved as flat panel rectangles plus tab groups. Restoring it
//! rebuilds the nesting on a docking host that can only split a panel after
//! another one or stack it behind one as a tab.
//!
//! # Quick Start
//!
//! ```text
//! docklayout view                 # Interactive viewer, restores the default layout
//! docklayout plan work.json       # Print the split plan for a layout
//! docklayout show work.json       # Print the restored arrangement
//! docklayout save copy.json --from work.json
//! ```
//!
//! # Viewer keys
//!
//! | Key | Action |
//! |-----|--------|
//! | t | Toggle title bars |
//! | s | Save a snapshot back to the layout file |
//! | r | Restore the layout file again |
//! | q / Esc | Quit |

mod config;
mod layout;
mod ui;
mod wm;

use std::env;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::Config;
use crate::layout::{plan_splits, restore, snapshot, DockHost, LayoutState, RestoreReport, ToolRegistry};
use crate::ui::DockRenderer;
use crate::wm::{CatalogTools, DockWindow};

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Size used by `show` when the terminal size is unknown
const FALLBACK_SIZE: (u16, u16) = (100, 30);

#[derive(Debug, PartialEq)]
enum Command {
    View(Option<PathBuf>),
    Show(PathBuf),
    Plan(PathBuf),
    Load(PathBuf),
    Save { out: PathBuf, from: Option<PathBuf> },
    Tools,
    ToggleTitles,
}

#[derive(Debug, PartialEq)]
struct Args {
    config_path: Option<PathBuf>,
    command: Command,
}

fn print_version() {
    eprintln!("docklayout {}", VERSION);
}

fn print_help() {
    eprintln!("docklayout {} - save and restore dockable panel layouts", VERSION);
    eprintln!();
    eprintln!("Usage: docklayout [OPTIONS] <COMMAND>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  view [FILE]                 Interactive viewer (default: the default layout)");
    eprintln!("  show FILE                   Restore FILE and print the arrangement");
    eprintln!("  plan FILE                   Print the split plan for FILE");
    eprintln!("  load FILE                   Restore FILE and print the result");
    eprintln!("  save OUT [--from FILE]      Restore FILE (or open every tool) and save to OUT");
    eprintln!("  tools                       List the tools that can be opened");
    eprintln!("  toggle-titles               Flip title bar visibility in the config file");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <FILE>         Use another config file");
    eprintln!("  -v, --version               Show version");
    eprintln!("  -h, --help                  Show this help");
    eprintln!();
    eprintln!("Viewer keys:");
    eprintln!("  t                           Toggle title bars");
    eprintln!("  s                           Save snapshot");
    eprintln!("  r                           Restore again");
    eprintln!("  q, Esc                      Quit");
    eprintln!();
    eprintln!("Relative layout names are looked up in the layouts directory.");
    eprintln!("Configuration: ~/.docklayout/config.toml");
    eprintln!("Log: ~/.docklayout/docklayout.log (level from DOCKLAYOUT_LOG)");
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut config_path = None;
    let mut words: Vec<&str> = Vec::new();
    let mut from = None;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-c" | "--config" => {
                i += 1;
                let path = args.get(i).ok_or("Missing config argument")?;
                config_path = Some(PathBuf::from(path));
            }
            "--from" => {
                i += 1;
                let path = args.get(i).ok_or("Missing --from argument")?;
                from = Some(PathBuf::from(path));
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown argument: {}. Use -h for help.", arg));
            }
            word => words.push(word),
        }
        i += 1;
    }

    let file = |n: usize, name: &str| -> Result<PathBuf, String> {
        words
            .get(n)
            .map(PathBuf::from)
            .ok_or_else(|| format!("{} needs a layout file", name))
    };

    let command = match words.first().copied() {
        None | Some("view") => Command::View(words.get(1).map(PathBuf::from)),
        Some("show") => Command::Show(file(1, "show")?),
        Some("plan") => Command::Plan(file(1, "plan")?),
        Some("load") => Command::Load(file(1, "load")?),
        Some("save") => Command::Save { out: file(1, "save")?, from: from.take() },
        Some("tools") => Command::Tools,
        Some("toggle-titles") => Command::ToggleTitles,
        Some(other) => return Err(format!("Unknown command: {}. Use -h for help.", other)),
    };
    if from.is_some() {
        return Err("--from only applies to save".to_string());
    }

    Ok(Args { config_path, command })
}

/// Log to `~/.docklayout/docklayout.log`, filtered by `DOCKLAYOUT_LOG`
fn init_logging() {
    let log_path = config::config_dir()
        .map(|dir| dir.join("docklayout.log"))
        .unwrap_or_else(|| PathBuf::from("docklayout.log"));

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_env("DOCKLAYOUT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> Result<()> {
    let raw: Vec<String> = env::args().collect();
    let args = match parse_args(&raw) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    init_logging();
    info!("docklayout starting...");

    let config_path = args.config_path.clone().or_else(Config::get_config_path);
    let config = match &config_path {
        Some(path) => Config::load_from(path),
        None => Config::default(),
    };

    match args.command {
        Command::View(file) => {
            let file = file
                .map(|f| config.resolve_layout(&f))
                .or_else(|| Some(config.default_layout_path()).filter(|p| p.exists()));
            run_viewer(&config, file)
        }
        Command::Show(file) => {
            let mut window = build_window(&config, false);
            let report = restore_file(&mut window, &config.resolve_layout(&file))?;
            let (cols, rows) = DockRenderer::size().unwrap_or(FALLBACK_SIZE);
            let renderer = DockRenderer::with_color_scheme(config.get_color_scheme());
            for line in renderer.draw(&window, cols, rows.saturating_sub(1), &summary(&report)).lines() {
                println!("{}", line);
            }
            Ok(())
        }
        Command::Plan(file) => {
            let path = config.resolve_layout(&file);
            let state = LayoutState::load_from(&path).with_context(|| format!("Failed to load {}", path.display()))?;
            let plan = plan_splits(&state);
            if plan.is_empty() {
                println!("no splits needed");
            }
            for (n, op) in plan.iter().enumerate() {
                println!("{:>3}. {}", n + 1, op);
            }
            for (group, members) in &state.tab_group {
                println!("tabs {}: {}", group, members.join(", "));
            }
            Ok(())
        }
        Command::Load(file) => {
            let mut window = build_window(&config, false);
            let report = restore_file(&mut window, &config.resolve_layout(&file))?;
            println!("{}", summary(&report));
            print_geometry(&window);
            Ok(())
        }
        Command::Save { out, from } => {
            let mut window = build_window(&config, from.is_none());
            if let Some(from) = from {
                restore_file(&mut window, &config.resolve_layout(&from))?;
            }
            let out = config.resolve_layout(&out);
            snapshot(&window)
                .save_to(&out)
                .with_context(|| format!("Failed to save {}", out.display()))?;
            println!("saved {}", out.display());
            Ok(())
        }
        Command::Tools => {
            let window = build_window(&config, false);
            for (id, name) in window.registry().tools() {
                println!("{}\t{}", id, name);
            }
            Ok(())
        }
        Command::ToggleTitles => {
            let path = config_path.context("Could not determine config path")?;
            let mut config = config;
            config.titles_visible = !config.titles_visible;
            config.save_to(&path)?;
            println!("titles {}", if config.titles_visible { "shown" } else { "hidden" });
            Ok(())
        }
    }
}

/// Window over the configured tool catalog, optionally with every tool open
fn build_window(config: &Config, open_all: bool) -> DockWindow {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(CatalogTools::new(config.tool_catalog())));
    let mut window = DockWindow::new(config.window.width, config.window.height, registry);
    if open_all {
        for tool in &config.tools {
            window.open_tool(&tool.id);
        }
    }
    window.set_titles(config.titles_visible);
    window
}

fn restore_file(window: &mut DockWindow, path: &Path) -> Result<RestoreReport> {
    let state = LayoutState::load_from(path).with_context(|| format!("Failed to load {}", path.display()))?;
    let report = restore(window, &state);
    if !report.is_complete() {
        warn!(path = %path.display(), unresolved = ?report.unresolved, "layout partially restored");
    }
    Ok(report)
}

fn summary(report: &RestoreReport) -> String {
    let mut text = format!(
        "{} splits, {} swaps, {} tabs, {} groups",
        report.splits, report.swaps, report.tabified, report.groups_restored
    );
    if report.groups_skipped > 0 {
        text.push_str(&format!(", {} groups skipped", report.groups_skipped));
    }
    if report.closed > 0 {
        text.push_str(&format!(", {} closed", report.closed));
    }
    if let Some(failure) = &report.split_aborted {
        text.push_str(&format!(", aborted: {}", failure));
    }
    text
}

fn print_geometry(window: &DockWindow) {
    for dock in window.docks() {
        let g = window.query_geometry(dock.id);
        println!(
            "{:<12} {:>7} {:>7} {:>7} {:>7} {}",
            dock.content.id,
            g.x,
            g.y,
            g.width,
            g.height,
            if g.visible { "visible" } else { "hidden" }
        );
    }
}

/// Run the interactive viewer
fn run_viewer(config: &Config, file: Option<PathBuf>) -> Result<()> {
    let mut window = build_window(config, file.is_none());
    let mut renderer = DockRenderer::with_color_scheme(config.get_color_scheme());
    renderer.init()?;

    let result = run_viewer_loop(&mut window, &mut renderer, config, file);

    renderer.cleanup()?;
    result
}

fn run_viewer_loop(
    window: &mut DockWindow,
    renderer: &mut DockRenderer,
    config: &Config,
    file: Option<PathBuf>,
) -> Result<()> {
    let poll_timeout = Duration::from_millis(50);
    let restore_delay = Duration::from_millis(config.restore_delay_ms);
    let save_path = file.clone().unwrap_or_else(|| config.default_layout_path());
    let name = save_path.display().to_string();

    // One-shot deferred restore, armed once the first frame is on screen
    let mut pending_restore: Option<Instant> = None;
    let mut first_frame = true;
    let mut message = String::new();
    let mut dirty = true;

    loop {
        if let Some(due) = pending_restore {
            if Instant::now() >= due {
                pending_restore = None;
                if let Some(path) = &file {
                    message = match restore_file(window, path) {
                        Ok(report) => summary(&report),
                        Err(e) => format!("{:#}", e),
                    };
                }
                dirty = true;
            }
        }

        if dirty {
            let (cols, rows) = DockRenderer::size()?;
            let status = format!("{} | {} | t:titles s:save r:restore q:quit", name, message);
            let canvas = renderer.draw(window, cols, rows, &status);
            renderer.render(&canvas)?;
            dirty = false;
            if first_frame {
                first_frame = false;
                if file.is_some() {
                    pending_restore = Some(Instant::now() + restore_delay);
                }
            }
        }

        if !event::poll(poll_timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Char('t') => {
                    let shown = window.toggle_titles();
                    message = format!("titles {}", if shown { "shown" } else { "hidden" });
                    dirty = true;
                }
                KeyCode::Char('s') => {
                    message = match snapshot(&*window).save_to(&save_path) {
                        Ok(()) => "saved".to_string(),
                        Err(e) => e.to_string(),
                    };
                    dirty = true;
                }
                KeyCode::Char('r') => {
                    if file.is_some() {
                        pending_restore = Some(Instant::now());
                    } else {
                        message = "no layout file".to_string();
                        dirty = true;
                    }
                }
                _ => {}
            },
            Event::Resize(_, _) => dirty = true,
            _ => {}
        }
    }

    info!("viewer closed");
    Ok(())
}
