mod app;
mod event;
mod themes;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Runtime;

use app::{App, TuiConfig};
use event::{Event, EventHandler};

pub fn run(user: &str, year: i32, token: Option<String>, theme: &str) -> Result<()> {
    let rt = Runtime::new()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));
    let config = TuiConfig {
        user: user.to_string(),
        year,
        token,
        theme: theme.to_string(),
    };
    let mut app = App::new(config, rt.handle().clone(), events.sender());
    app.reload_all();

    let result = run_loop(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        match events.next()? {
            Event::Tick => {
                app.on_tick();
            }
            Event::Key(key) => {
                if app.handle_key_event(key) {
                    break;
                }
            }
            Event::Resize(w, h) => {
                app.handle_resize(w, h);
            }
            Event::Fetch(result) => {
                app.apply_fetch(result);
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
