mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use clickdash::runtime::{spawn_input_pump, GameEvent, IntervalClock};
use clickdash::score::{FileScoreStore, ScoreStore};
use clickdash::selector::DurationSelector;
use clickdash::session::Session;
use clickdash::TICK_RATE_MS;
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    sync::mpsc,
    time::Duration,
};
use webbrowser::Browser;

/// fast-paced click speed tui with countdown rounds
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A fast-paced click-speed game: pick a round length, start the countdown, and press space as many times as you can before time runs out. Your personal best is saved between runs."
)]
pub struct Cli {
    /// round length in seconds
    #[clap(short = 's', long, default_value_t = 5.0)]
    seconds: f64,

    /// print the stored personal best and exit
    #[clap(long)]
    best: bool,

    /// clear the stored personal best and exit
    #[clap(long)]
    reset_best: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Ready,
    Playing,
    Results,
}

pub struct App {
    pub session: Session,
    pub selector: DurationSelector,
    pub screen: Screen,
}

impl App {
    pub fn new(cli: &Cli) -> Self {
        let selector = DurationSelector::from_secs(cli.seconds);
        let session = Session::new(
            Box::new(FileScoreStore::new()),
            selector.current_duration(),
        );
        Self {
            session,
            selector,
            screen: Screen::Ready,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // maintenance flags run headless, before the tty check
    if cli.best {
        println!("{}", FileScoreStore::new().read());
        return Ok(());
    }
    if cli.reset_best {
        let _ = FileScoreStore::new().write(0);
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&cli);
    let res = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let (tx, rx) = mpsc::channel();
    spawn_input_pump(tx.clone());

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        match rx.recv()? {
            GameEvent::Tick => {
                let was_running = app.session.is_running();
                app.session.tick();
                if was_running && app.session.has_finished() {
                    app.screen = Screen::Results;
                }
                if was_running {
                    terminal.draw(|f| f.render_widget(&*app, f.area()))?;
                }
            }
            GameEvent::Resize => {
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
            GameEvent::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
                {
                    break;
                }

                match app.screen {
                    Screen::Ready => match key.code {
                        KeyCode::Esc | KeyCode::Char('q') => break,
                        KeyCode::Left => {
                            app.selector.prev();
                            app.session.restart(app.selector.current_duration());
                        }
                        KeyCode::Right => {
                            app.selector.next();
                            app.session.restart(app.selector.current_duration());
                        }
                        KeyCode::Char(' ') | KeyCode::Enter => {
                            let duration = app.selector.current_duration();
                            let tick_tx = tx.clone();
                            app.session.start(duration, move || {
                                Box::new(IntervalClock::spawn(
                                    tick_tx,
                                    Duration::from_millis(TICK_RATE_MS),
                                ))
                            });
                            if app.session.is_running() {
                                app.screen = Screen::Playing;
                            }
                        }
                        _ => {}
                    },
                    Screen::Playing => match key.code {
                        KeyCode::Esc => {
                            // abort: the restart path cancels the clock
                            app.session.restart(app.selector.current_duration());
                            app.screen = Screen::Ready;
                        }
                        KeyCode::Char(' ') => {
                            app.session.register_click();
                        }
                        _ => {}
                    },
                    Screen::Results => match key.code {
                        KeyCode::Esc | KeyCode::Char('q') => break,
                        KeyCode::Char('r') => {
                            app.session.restart(app.selector.current_duration());
                            app.screen = Screen::Ready;
                        }
                        KeyCode::Char('t') => {
                            if Browser::is_available() {
                                if let Some(outcome) = app.session.outcome() {
                                    webbrowser::open(&format!(
                                        "https://twitter.com/intent/tweet?text={}%20clicks%20in%20{}s%20%2F%20{:.2}%20cps%0A%0Ahttps%3A%2F%2Fgithub.com%2Fmartintrojer%2Fclickdash",
                                        outcome.final_score,
                                        app.session.duration_secs(),
                                        outcome.clicks_per_sec
                                    ))
                                    .unwrap_or_default();
                                }
                            }
                        }
                        _ => {}
                    },
                }
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
        }
    }

    Ok(())
}
