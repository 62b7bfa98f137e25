//! Dojo Crawl - terminal front-end
//!
//! Wires the simulation core to a crossterm surface: an arena map, the
//! player, a couple of ninjas, a pile of trinkets, and a keyboard loop.
//! Everything here is a collaborator the core knows only through its
//! render/input boundaries.

use std::io::{self, Write};

use ahash::AHashMap;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use dojo_crawl::combat::messages;
use dojo_crawl::core::error::{CrawlError, Result};
use dojo_crawl::core::GameConfig;
use dojo_crawl::ecs::{Ai, Attack, AttackKind, Entity, Fighter, Position, Renderable};
use dojo_crawl::input;
use dojo_crawl::map::Grid;
use dojo_crawl::render::{self, color, Color};
use dojo_crawl::session::GameSession;

#[derive(Parser, Debug)]
#[command(name = "dojo-crawl", about = "Minimal turn-based dungeon crawl")]
struct Args {
    /// Seed for combat rolls and AI shuffling
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Map width in cells
    #[arg(long, default_value_t = 60)]
    width: u32,

    /// Map height in cells
    #[arg(long, default_value_t = 30)]
    height: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "dojo_crawl=warn".to_string()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = GameConfig {
        map_width: args.width,
        map_height: args.height,
        seed: args.seed,
        ..GameConfig::default()
    };
    config.validate().map_err(CrawlError::Config)?;

    tracing::info!(seed = config.seed, "dojo-crawl starting");
    let mut session = build_dojo(&config);

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let outcome = run(&mut session, &mut stdout);

    execute!(stdout, cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    outcome
}

fn run(session: &mut GameSession, out: &mut impl Write) -> Result<()> {
    loop {
        session.run_until_input();
        draw(session, out)?;

        if session.is_over() {
            // Leave the death narration on screen until any key
            event::read()?;
            return Ok(());
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => return Ok(()),
                code => {
                    if let Some(action) = input::decode(code) {
                        session.handle_input(action);
                    }
                }
            }
        }
    }
}

fn draw(session: &GameSession, out: &mut impl Write) -> Result<()> {
    let frame = render::build_frame(session);

    queue!(out, Clear(ClearType::All))?;
    for cell in &frame.cells {
        queue!(
            out,
            cursor::MoveTo(cell.x as u16, cell.y as u16),
            SetForegroundColor(term_color(cell.fg)),
            SetBackgroundColor(term_color(cell.bg)),
            Print(cell.symbol),
        )?;
    }
    queue!(out, ResetColor)?;
    for text in &frame.texts {
        queue!(
            out,
            cursor::MoveTo(text.x as u16, text.y as u16),
            Print(&text.text),
        )?;
    }
    out.flush()?;
    Ok(())
}

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// The demo scene: an arena, the player, two ninjas, and a trinket pile.
fn build_dojo(config: &GameConfig) -> GameSession {
    let (w, h) = (config.map_width as i32, config.map_height as i32);
    let grid = Grid::from_blocked(config.map_width, config.map_height, move |x, y| {
        x == 0 || y == 0 || x == w - 1 || y == h - 1
    });

    let rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut session = GameSession::new(config, grid, player_prototype(w / 2, h / 2), rng);

    session.spawn(ninja_prototype(1, 1));
    session.spawn(ninja_prototype(w - 2, 2.min(h - 2)));

    let (px, py) = (w / 4 + 2, h * 4 / 5);
    for name in [
        "banana",
        "lute",
        "very long name",
        "figurine",
        "plush wolverine",
        "novelty tiki mug",
    ] {
        session.spawn(trinket_prototype(name, px, py));
    }

    session.add_log_line("Welcome to the dojo.");
    session
}

fn player_prototype(x: i32, y: i32) -> Entity {
    let mut attacks = AHashMap::new();
    attacks.insert(AttackKind::Base, Attack::new(2, 1, 10));
    attacks.insert(
        AttackKind::Lunge,
        Attack::new(4, 1, 10).with_attempt(messages::lunge()),
    );

    Entity {
        position: Some(Position::new(x, y)),
        renderable: Some(Renderable {
            symbol: '@',
            fg: color::BLACK,
            bg: color::WHITE,
            name: "you".to_string(),
            blocks: true,
            proper_name: false,
            plural: false,
        }),
        fighter: Some(Fighter::new(30, 5, attacks)),
        ai: Some(Ai::player(10)),
    }
}

fn ninja_prototype(x: i32, y: i32) -> Entity {
    let mut attacks = AHashMap::new();
    attacks.insert(AttackKind::Base, Attack::new(1, 1, 10));

    Entity {
        position: Some(Position::new(x, y)),
        renderable: Some(Renderable {
            symbol: 'n',
            fg: color::WHITE,
            bg: color::BLACK,
            name: "ninja".to_string(),
            blocks: true,
            proper_name: false,
            plural: false,
        }),
        fighter: Some(Fighter::new(5, 1, attacks)),
        ai: Some(Ai::monster(10)),
    }
}

fn trinket_prototype(name: &str, x: i32, y: i32) -> Entity {
    Entity {
        position: Some(Position::new(x, y)),
        renderable: Some(Renderable {
            symbol: 'x',
            fg: color::WHITE,
            bg: color::BLACK,
            name: name.to_string(),
            blocks: false,
            proper_name: false,
            plural: false,
        }),
        ..Entity::default()
    }
}
