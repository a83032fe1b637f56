use std::time::Duration;
use std::{env, io::stdout, process};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use formulapad_config::Config;
use formulapad_engine::{Cmd, Document, Joystick, Mode, RenderBlock, ScriptKind, SystemClock};
use log::debug;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

/// Pointer units per terminal cell. Cells are roughly twice as tall as wide,
/// so rows weigh double to keep gesture angles honest.
const CELL_WIDTH: f32 = 8.0;
const CELL_HEIGHT: f32 = 16.0;

/// Frames per caret blink phase at the ~30 Hz poll tick.
const BLINK_FRAMES: u64 = 15;

struct App {
    doc: Document,
    joystick: Joystick<SystemClock>,
    palette: Vec<char>,
    palette_index: usize,
    drag_origin: Option<(u16, u16)>,
    frame: u64,
}

impl App {
    fn new(config: &Config, doc: Document) -> Self {
        let joystick = Joystick::with_delays(
            SystemClock::new(),
            config.joystick_radius,
            Duration::from_millis(config.long_press_ms),
            Duration::from_millis(config.selection_hold_ms),
        );
        Self {
            doc,
            joystick,
            palette: config.palette.clone(),
            palette_index: 0,
            drag_origin: None,
            frame: 0,
        }
    }

    fn apply(&mut self, cmd: Cmd) {
        let patch = self.doc.apply(cmd);
        debug!("{cmd:?} applied={} v{}", patch.applied, patch.version);
    }

    /// Shift+arrow: start a selection at the cursor, or widen an existing
    /// one.
    fn expand_selection(&mut self, cmd: Cmd) {
        if self.doc.selection().is_none() {
            self.apply(Cmd::StartSelection);
        } else {
            self.apply(cmd);
        }
    }

    fn next_palette_symbol(&mut self) {
        if !self.palette.is_empty() {
            self.palette_index = (self.palette_index + 1) % self.palette.len();
        }
    }

    fn previous_palette_symbol(&mut self) {
        if !self.palette.is_empty() {
            self.palette_index = if self.palette_index == 0 {
                self.palette.len() - 1
            } else {
                self.palette_index - 1
            };
        }
    }

    fn insert_palette_symbol(&mut self) {
        if let Some(&ch) = self.palette.get(self.palette_index) {
            self.apply(Cmd::InsertChar { ch });
        }
    }

    fn caret_visible(&self) -> bool {
        // The caret stops blinking during a selection gesture.
        !self.joystick.is_selecting() && (self.frame / BLINK_FRAMES) % 2 == 0
    }
}

/// Keyboard-originated glyph input is restricted to this set; palette
/// symbols bypass it.
fn is_keyboard_glyph(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '=')
}

fn main() -> Result<()> {
    env_logger::init();

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    // Optional CLI argument seeds the formula.
    let args: Vec<String> = env::args().collect();
    let doc = match args.len() {
        1 => Document::new(),
        2 => match Document::from_glyphs(&args[1]) {
            Ok(doc) => doc,
            Err(e) => {
                eprintln!("Error: invalid initial formula: {e}");
                process::exit(1);
            }
        },
        _ => {
            eprintln!("Usage: {} [initial-formula]", args[0]);
            process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new(&config, doc);

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;
        app.frame = app.frame.wrapping_add(1);

        // Armed long-press actions fire on the tick, not on input events.
        if let Some(cmd) = app.joystick.poll() {
            app.apply(cmd);
        }

        if !event::poll(Duration::from_millis(33))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if handle_key(app, key) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => handle_mouse(app, mouse),
            _ => {}
        }
    }
}

/// Returns true when the app should quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q') | KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => {
            return true;
        }
        (KeyCode::Left, m) if m.contains(KeyModifiers::SHIFT) => {
            app.expand_selection(Cmd::ExpandSelectionLeft);
        }
        (KeyCode::Right, m) if m.contains(KeyModifiers::SHIFT) => {
            app.expand_selection(Cmd::ExpandSelectionRight);
        }
        (KeyCode::Left, _) => app.apply(Cmd::MoveLeft),
        (KeyCode::Right, _) => app.apply(Cmd::MoveRight),
        (KeyCode::Up, _) => app.apply(Cmd::EnterSuperscript),
        (KeyCode::Down, _) => app.apply(Cmd::EnterSubscript),
        (KeyCode::Esc, _) => {
            // Esc clears a selection first, otherwise leaves the script.
            if app.doc.selection().is_some() {
                app.apply(Cmd::ClearSelection);
            } else {
                app.apply(Cmd::ExitScript);
            }
        }
        (KeyCode::Backspace, _) => app.apply(Cmd::Backspace),
        (KeyCode::Delete, _) => app.apply(Cmd::DeleteSelection),
        (KeyCode::Tab, _) => app.next_palette_symbol(),
        (KeyCode::BackTab, _) => app.previous_palette_symbol(),
        (KeyCode::Enter, _) => app.insert_palette_symbol(),
        (KeyCode::Char(c), _) if is_keyboard_glyph(c) => app.apply(Cmd::InsertChar { ch: c }),
        _ => {}
    }
    false
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.drag_origin = Some((mouse.column, mouse.row));
            app.joystick.press();
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some((origin_col, origin_row)) = app.drag_origin {
                let dx = (mouse.column as f32 - origin_col as f32) * CELL_WIDTH;
                let dy = (mouse.row as f32 - origin_row as f32) * CELL_HEIGHT;
                if let Some(cmd) = app.joystick.deflect(dx, dy, &app.doc) {
                    app.apply(cmd);
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.drag_origin = None;
            app.joystick.release();
        }
        _ => {}
    }
}

/// The three aligned rows of one block cell: superscript, main glyph,
/// subscript, each padded to the block's display width.
struct BlockCell {
    superscript: Span<'static>,
    main: Span<'static>,
    subscript: Span<'static>,
}

fn block_cell(app: &App, block: &RenderBlock) -> BlockCell {
    let cursor = app.doc.cursor();
    let caret = app.caret_visible();

    let mut superscript: String = block.superscripts.iter().collect();
    let mut subscript: String = block.subscripts.iter().collect();

    // In script mode the caret is drawn inside the active script string.
    if block.at_cursor && caret {
        match cursor.mode {
            Mode::Script(ScriptKind::Superscript) => {
                superscript.insert(char_offset(&superscript, cursor.script_index), '▏');
            }
            Mode::Script(ScriptKind::Subscript) => {
                subscript.insert(char_offset(&subscript, cursor.script_index), '▏');
            }
            Mode::Main => {}
        }
    }

    let main: String = match block.value {
        Some(ch) => ch.to_string(),
        None => "▕".to_string(), // start sentinel: the slot before the first glyph
    };

    let width = superscript
        .chars()
        .count()
        .max(subscript.chars().count())
        .max(main.chars().count())
        + 1;

    let mut main_style = Style::default();
    if block.selected {
        main_style = main_style.bg(Color::Blue).fg(Color::White);
    }
    if block.at_cursor && cursor.mode == Mode::Main && caret {
        main_style = main_style.add_modifier(Modifier::REVERSED);
    }
    let script_style = if block.at_cursor && !cursor.mode.is_main() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    BlockCell {
        superscript: Span::styled(pad(&superscript, width), script_style),
        main: Span::styled(pad(&main, width), main_style),
        subscript: Span::styled(pad(&subscript, width), script_style),
    }
}

fn pad(text: &str, width: usize) -> String {
    let mut padded = text.to_string();
    for _ in text.chars().count()..width {
        padded.push(' ');
    }
    padded
}

/// Byte offset of the nth character, clamped to the end.
fn char_offset(text: &str, n: usize) -> usize {
    text.char_indices()
        .nth(n)
        .map_or(text.len(), |(offset, _)| offset)
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(5),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(2),
            ]
            .as_ref(),
        )
        .split(f.area());

    // Formula panel: three aligned rows per block.
    let snapshot = app.doc.snapshot();
    let mut superscripts = Vec::new();
    let mut mains = Vec::new();
    let mut subscripts = Vec::new();
    for block in &snapshot.blocks {
        let cell = block_cell(app, block);
        superscripts.push(cell.superscript);
        mains.push(cell.main);
        subscripts.push(cell.subscript);
    }
    let formula = Paragraph::new(vec![
        Line::from(superscripts),
        Line::from(mains),
        Line::from(subscripts),
    ])
    .block(Block::default().borders(Borders::ALL).title("Formula"));
    f.render_widget(formula, chunks[0]);

    // Palette panel.
    let mut palette_spans = Vec::new();
    for (index, symbol) in app.palette.iter().enumerate() {
        let style = if index == app.palette_index {
            Style::default().bg(Color::Yellow).fg(Color::Black)
        } else {
            Style::default()
        };
        palette_spans.push(Span::styled(format!(" {symbol} "), style));
    }
    let palette = Paragraph::new(Line::from(palette_spans))
        .block(Block::default().borders(Borders::ALL).title("Palette"));
    f.render_widget(palette, chunks[1]);

    // Long-press progress, only while an action is armed.
    if let Some(progress) = app.joystick.pending_progress() {
        let gauge = Gauge::default()
            .ratio(f64::from(progress))
            .gauge_style(Style::default().fg(Color::Green))
            .label("hold");
        f.render_widget(gauge, chunks[2]);
    }

    // Status and help.
    let cursor = app.doc.cursor();
    let selection = match app.doc.selection() {
        Some(sel) => format!("selection {}..{}", sel.start, sel.end),
        None => "no selection".to_string(),
    };
    let status = Line::from(vec![
        Span::styled(
            format!(" {} ", cursor.mode.as_str()),
            Style::default().bg(Color::Cyan).fg(Color::Black),
        ),
        Span::raw(format!(
            " block {}/{} | {} | v{}",
            cursor.block_index,
            app.doc.len() - 1,
            selection,
            app.doc.version()
        )),
    ]);
    let help = Line::from(vec![
        Span::raw("type: A-Za-z0-9+-= | ←/→: Move | ↑/↓: Script | Esc: Exit | "),
        Span::raw("Shift+←/→: Select | Del: Delete selection | "),
        Span::raw("Tab/Enter: Palette | drag mouse: joystick | Ctrl+Q: Quit"),
    ]);
    let footer = Paragraph::new(vec![status, help]);
    f.render_widget(footer, chunks[4]);
}
