/// Terminal preview of the portfolio background animations
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use folio_core::{Animation, BackdropScene, FolioConfig, NodeGraphCanvas, Viewport};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::{viewport_for, AsciiCanvas, AsciiScene};

/// Which animation is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum View {
    Backdrop,
    Network,
}

impl View {
    fn toggled(self) -> Self {
        match self {
            View::Backdrop => View::Network,
            View::Network => View::Backdrop,
        }
    }
}

enum Stage {
    /// `None` when the viewport was too narrow at start-up
    Backdrop(Option<BackdropScene<AsciiScene>>),
    Network(Option<NodeGraphCanvas<AsciiCanvas, StdRng>>),
}

impl Stage {
    fn build(view: View, viewport: Viewport, config: &FolioConfig, rng: &mut StdRng) -> Self {
        match view {
            View::Backdrop => Stage::Backdrop(BackdropScene::init(
                Some(AsciiScene::new(viewport)),
                viewport,
                config.backdrop.clone(),
                rng,
            )),
            View::Network => Stage::Network(NodeGraphCanvas::init(
                Some(AsciiCanvas::new(0, 0)),
                viewport,
                config.network.clone(),
                StdRng::seed_from_u64(rand::Rng::gen(rng)),
            )),
        }
    }

    fn frame(&mut self) {
        match self {
            Stage::Backdrop(Some(scene)) => scene.frame(),
            Stage::Network(Some(canvas)) => canvas.frame(),
            _ => {}
        }
    }

    fn on_resize(&mut self, viewport: Viewport) {
        match self {
            Stage::Backdrop(Some(scene)) => scene.on_resize(viewport),
            Stage::Network(Some(canvas)) => canvas.on_resize(viewport),
            _ => {}
        }
    }

    fn on_pointer_move(&mut self, x: f32, y: f32) {
        if let Stage::Backdrop(Some(scene)) = self {
            scene.on_pointer_move(x, y);
        }
    }

    fn canvas(&self) -> Option<&AsciiCanvas> {
        match self {
            Stage::Backdrop(Some(scene)) => Some(scene.backend().canvas()),
            Stage::Network(Some(canvas)) => Some(canvas.surface()),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        match self {
            Stage::Backdrop(Some(scene)) => {
                format!("3D backdrop | {} bodies", scene.bodies().len())
            }
            Stage::Backdrop(None) => "3D backdrop | skipped below 768px".to_string(),
            Stage::Network(Some(canvas)) => {
                let profile = canvas.graph().profile();
                format!(
                    "Node graph | {} nodes, link < {}px",
                    profile.node_count, profile.connect_distance
                )
            }
            Stage::Network(None) => "Node graph | no surface".to_string(),
        }
    }
}

/// Main application struct for the terminal preview
pub struct TerminalApp {
    config: FolioConfig,
    rng: StdRng,
    view: View,
    stage: Stage,
    viewport: Viewport,
    running: bool,
    frame_time: Duration,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(
        view: View,
        config: FolioConfig,
        seed: Option<u64>,
        target_fps: u32,
    ) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let viewport = viewport_for(cols, rows);
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let stage = Stage::build(view, viewport, &config, &mut rng);

        Ok(Self {
            config,
            rng,
            view,
            stage,
            viewport,
            running: true,
            frame_time: Duration::from_millis(1000 / target_fps.max(1) as u64),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Drain input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.stage.frame();
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Tab | KeyCode::Char(' ') => {
                    self.view = self.view.toggled();
                    log::info!("switching to {:?}", self.view);
                    self.stage =
                        Stage::build(self.view, self.viewport, &self.config, &mut self.rng);
                }
                _ => {}
            },
            Event::Mouse(mouse) => {
                if let MouseEventKind::Moved | MouseEventKind::Drag(_) = mouse.kind {
                    self.stage.on_pointer_move(
                        mouse.column as f32 * renderer::CELL_WIDTH,
                        mouse.row as f32 * renderer::CELL_HEIGHT,
                    );
                }
            }
            Event::Resize(cols, rows) => {
                self.viewport = viewport_for(cols, rows);
                self.stage.on_resize(self.viewport);
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        if let Some(canvas) = self.stage.canvas() {
            canvas.draw(&mut stdout)?;
        } else {
            queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        }

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Folio | FPS: {:.1} | {} | Tab=Switch Q=Quit",
                self.fps,
                self.stage.describe()
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
