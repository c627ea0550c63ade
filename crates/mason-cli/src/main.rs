use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use mason_config::Config;
use mason_engine::{
    BlockKind, Document, GrammarRegistry, HighlightRange, decorate_code, io,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::{env, io::stdout, path::PathBuf, process};

struct App {
    content_path: PathBuf,
    document: Document,
    grammars: GrammarRegistry,
    current_content: Vec<Line<'static>>,
    scroll: u16,
}

impl App {
    fn new(content_path: PathBuf) -> Result<Self> {
        let document = match io::load_document(&content_path) {
            Ok(document) => document,
            Err(io::IoError::NotFound(_)) => Document::new(),
            Err(e) => return Err(e.into()),
        };

        let mut app = Self {
            content_path,
            document,
            grammars: GrammarRegistry::bundled(),
            current_content: Vec::new(),
            scroll: 0,
        };
        app.update_content();
        Ok(app)
    }

    fn reload(&mut self) {
        match io::load_document(&self.content_path) {
            Ok(document) => {
                self.document = document;
                self.update_content();
            }
            Err(io::IoError::NotFound(_)) => {
                self.document = Document::new();
                self.update_content();
            }
            Err(e) => {
                self.current_content = vec![Line::from(format!("Error reading document: {e}"))];
            }
        }
        self.scroll = 0;
    }

    fn scroll_down(&mut self) {
        let max = self.current_content.len().saturating_sub(1) as u16;
        self.scroll = self.scroll.saturating_add(1).min(max);
    }

    fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    fn scroll_top(&mut self) {
        self.scroll = 0;
    }

    fn update_content(&mut self) {
        self.current_content = render_document_content(&self.document, &self.grammars);
    }
}

fn render_document_content(document: &Document, grammars: &GrammarRegistry) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for block in document.blocks() {
        match &block.kind {
            BlockKind::Heading { level } => {
                let prefix = "#".repeat(*level as usize);
                lines.push(Line::styled(
                    format!("{} {}", prefix, block.plain_text()),
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::BOLD),
                ));
                lines.push(Line::default());
            }
            BlockKind::Paragraph => {
                lines.push(Line::from(block.plain_text()));
                lines.push(Line::default());
            }
            BlockKind::Quote => {
                for line in block.plain_text().lines() {
                    lines.push(Line::styled(
                        format!("> {}", line),
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::ITALIC),
                    ));
                }
                lines.push(Line::default());
            }
            BlockKind::Code { language } => {
                let fence = format!("```{}", language.as_deref().unwrap_or(""));
                lines.push(Line::styled(fence, Style::default().fg(Color::DarkGray)));
                let text = block.plain_text();
                let ranges = decorate_code(block, grammars);
                lines.extend(code_lines(&text, &ranges));
                lines.push(Line::styled("```", Style::default().fg(Color::DarkGray)));
                lines.push(Line::default());
            }
        }
    }

    lines
}

/// Split highlighted code into terminal lines, clipping each range to the
/// line it falls on. Ranges never cross line boundaries except for a
/// trailing newline byte, which no visible line contains.
fn code_lines(text: &str, ranges: &[HighlightRange]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut line_start = 0usize;

    for line in text.split('\n') {
        let line_end = line_start + line.len();
        let mut spans = Vec::new();
        let mut cursor = line_start;

        for range in ranges {
            let start = range.range.start.max(line_start);
            let end = range.range.end.min(line_end);
            if start >= end {
                continue;
            }
            if start > cursor {
                spans.push(Span::raw(text[cursor..start].to_string()));
            }
            spans.push(Span::styled(
                text[start..end].to_string(),
                category_style(&range.category),
            ));
            cursor = end;
        }
        if cursor < line_end {
            spans.push(Span::raw(text[cursor..line_end].to_string()));
        }

        lines.push(Line::from(spans));
        line_start = line_end + 1;
    }

    lines
}

fn category_style(category: &str) -> Style {
    let color = match category {
        "keyword" | "storage" => Color::Magenta,
        "string" => Color::Green,
        "comment" => Color::DarkGray,
        "constant" => Color::Cyan,
        "entity" | "support" => Color::Blue,
        "variable" => Color::Yellow,
        _ => return Style::default(),
    };
    Style::default().fg(color)
}

fn main() -> Result<()> {
    // Determine content path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let content_path;
    let from_config;

    if args.len() == 2 {
        // CLI argument provided - use it
        content_path = PathBuf::from(&args[1]);
        from_config = false;
    } else if args.len() == 1 {
        // No CLI argument - try config file
        match Config::load() {
            Ok(Some(config)) => {
                content_path = config.content_path;
                from_config = true;
            }
            Ok(None) => {
                eprintln!("Error: No content path provided and no config file found");
                eprintln!("Usage: {} <content-file-path>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {} <content-file-path>", args[0]);
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [content-file-path]", args[0]);
        process::exit(1);
    };

    // An existing content file must parse before we take over the terminal
    if content_path.exists() {
        if let Err(e) = io::load_document(&content_path) {
            let source = if from_config {
                format!(" from config file '{}'", config_path.display())
            } else {
                String::new()
            };
            eprintln!(
                "Error: Content file '{}'{} cannot be opened: {e}",
                content_path.display(),
                source
            );
            process::exit(1);
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new(content_path)?;

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
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
                KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
                KeyCode::Home | KeyCode::Char('g') => app.scroll_top(),
                KeyCode::Char('r') => app.reload(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    let title = format!("mason: {}", app.content_path.display());
    let content = Paragraph::new(app.current_content.clone())
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));

    f.render_widget(content, chunks[0]);

    // Instructions
    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Up | "),
        Span::raw("↓/j: Down | "),
        Span::raw("g: Top | "),
        Span::raw("r: Reload"),
    ]);

    f.render_widget(Paragraph::new(vec![help_text]), chunks[1]);
}
