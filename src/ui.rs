// src/ui.rs

use crate::{
    api::AskClient,
    chat_view,
    conversation::{BotReply, Seq},
    errors::ParleyResult,
    key_handlers, App,
};
use crossterm::{
    event::{self, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

/// Enum for the different event sources multiplexed into the loop.
enum Event {
    Input(CEvent),
    Tick,
}

/// Runs the terminal UI until the user quits.
pub async fn run_ui(client: AskClient, tick_rate: Duration) -> ParleyResult<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, App::new(), client, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Main loop of the application.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    client: AskClient,
    tick_rate: Duration,
) -> ParleyResult<()> {
    let (tx, mut rx) = mpsc::channel::<Event>(100);
    let (reply_tx, mut reply_rx) = mpsc::channel::<(Seq, BotReply)>(100);

    // Spawn a task to read user input and emit ticks
    tokio::spawn(async move {
        let mut last_tick = Instant::now();
        loop {
            let timeout = Duration::from_millis(100);
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(event) = event::read() {
                    if tx.send(Event::Input(event)).await.is_err() {
                        return;
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                if tx.send(Event::Tick).await.is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });

    loop {
        terminal.draw(|f| chat_view::draw_chat(f, &app))?;

        tokio::select! {
            Some(event) = rx.recv() => {
                match event {
                    Event::Input(CEvent::Key(key)) => {
                        if let Some((seq, question)) = key_handlers::handle_chat_input(key, &mut app) {
                            dispatch_ask(client.clone(), seq, question, reply_tx.clone());
                        }
                    }
                    Event::Input(_) => {}
                    Event::Tick => app.status.update_spinner(),
                }
            }
            Some((seq, reply)) = reply_rx.recv() => {
                app.settle(seq, reply);
            }
            else => break,
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Fires one request. The completion is reported back over the channel
/// with its submission token; a transport failure becomes the rendered
/// error description. Nothing is retried or rethrown.
fn dispatch_ask(
    client: AskClient,
    seq: Seq,
    question: String,
    reply_tx: mpsc::Sender<(Seq, BotReply)>,
) {
    tokio::spawn(async move {
        let reply = match client.ask(&question).await {
            Ok(ask_reply) => ask_reply.into_reply(),
            Err(e) => {
                log::warn!("ask failed: {}", e);
                BotReply::Failure(e.to_string())
            }
        };
        let _ = reply_tx.send((seq, reply)).await;
    });
}
