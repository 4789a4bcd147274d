use std::io::stdout;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::analysis::{AnalysisClient, Completion};
use crate::app::{App, Message, Model, update};

use super::effects;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or terminal cannot be set up, or
    /// the event loop hits an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let client = Arc::new(
            AnalysisClient::new(&self.api_base).context("Failed to create HTTP client")?,
        );

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal, taskdeck requires an interactive terminal")?;
        if let Err(err) = execute!(stdout(), EnableBracketedPaste) {
            ratatui::restore();
            return Err(err).context("Failed to enable bracketed paste");
        }
        drop(init_scope);

        let mut model = self.initial_model();
        crate::perf::log_event(
            "init.model",
            format!(
                "api_base={} strategy={} live_rows={}",
                model.api_base,
                model.strategy,
                model.editor.live().row_count()
            ),
        );

        let (tx, rx) = mpsc::channel();
        let result = Self::event_loop(&mut terminal, &mut model, &client, &tx, &rx);

        let _ = execute!(stdout(), DisableBracketedPaste);
        ratatui::restore();
        result
    }

    /// The model the app starts with, before any terminal work.
    pub fn initial_model(&self) -> Model {
        let mut model = Model::new(&self.initial_text);
        model.strategy.clone_from(&self.strategy);
        model.api_base.clone_from(&self.api_base);
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        model
    }

    fn step(
        model: &mut Model,
        msg: Message,
        client: &Arc<AnalysisClient>,
        tx: &Sender<Completion>,
    ) {
        *model = update(std::mem::take(model), msg);
        effects::dispatch_pending(client, model, tx);
    }

    fn event_loop(
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        client: &Arc<AnalysisClient>,
        tx: &Sender<Completion>,
        rx: &Receiver<Completion>,
    ) -> Result<()> {
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            while let Ok(completion) = rx.try_recv() {
                effects::log_completion(model, &completion);
                Self::step(model, Message::Completed(completion), client, tx);
                needs_render = true;
            }

            // Poll quickly while requests are out so replies show promptly.
            let poll_ms = if needs_render {
                0
            } else if model.in_flight.any_pending() {
                30
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                if let Some(msg) = Self::handle_event(&event::read()?, model) {
                    crate::perf::log_event(
                        "event.message",
                        format!("frame={frame_idx} msg={msg:?}"),
                    );
                    Self::step(model, msg, client, tx);
                    needs_render = true;
                }

                // Coalesce key repeat bursts (and pastes) into a single render.
                let mut drained = 0_u32;
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = Self::handle_event(&event::read()?, model) {
                        drained += 1;
                        Self::step(model, msg, client, tx);
                        needs_render = true;
                    }
                }
                if drained > 0 {
                    crate::perf::log_event(
                        "event.drain",
                        format!("frame={frame_idx} drained={drained}"),
                    );
                }
            }

            if needs_render {
                frame_idx += 1;
                let draw_start = Instant::now();
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                crate::perf::log_event(
                    "frame.draw",
                    format!(
                        "frame={} draw_ms={:.3}",
                        frame_idx,
                        draw_start.elapsed().as_secs_f64() * 1000.0
                    ),
                );
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
