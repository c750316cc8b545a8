use anyhow::{Context, Result};
use clap::Parser;
use ratatui::{
    crossterm::{
        self,
        event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    prelude::*,
    widgets::*,
};
use std::{
    io::{self, Stdout},
    path::PathBuf,
    time::{Duration, Instant},
};
use taxi_world_core::{
    Position,
    driver::{Strategy, run_search},
    environment::{CellType, GridMap, INIT_LANDMARK, load_map_from_path},
    generator::generate_random_map,
    search::{SearchResult, UcsMode},
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Verbosity {
    Silent,
    Normal,
    Verbose,
    Debug,
}

impl From<Verbosity> for tracing::Level {
    fn from(value: Verbosity) -> Self {
        match value {
            Verbosity::Silent => tracing::Level::ERROR,
            Verbosity::Normal => tracing::Level::INFO,
            Verbosity::Verbose => tracing::Level::DEBUG,
            Verbosity::Debug => tracing::Level::TRACE,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[clap(rename_all = "kebab-case")]
enum UcsModeArg {
    SingleIteration,
    Complete,
}

impl From<UcsModeArg> for UcsMode {
    fn from(value: UcsModeArg) -> Self {
        match value {
            UcsModeArg::SingleIteration => UcsMode::SingleIteration,
            UcsModeArg::Complete => UcsMode::Complete,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Map file to load
    #[arg(short, long, value_name = "MAP_FILE")]
    map: Option<PathBuf>,
    /// Strategy code: 1 or 4 breadth-first, 2 uniform cost
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    strategy: i32,
    /// How far uniform cost search goes
    #[arg(long, value_enum, default_value_t = UcsModeArg::SingleIteration)]
    ucs_mode: UcsModeArg,
    /// Generate a random WIDTHxHEIGHT map instead of loading one
    #[arg(long, value_name = "WxH", value_parser = parse_dimensions)]
    random: Option<(usize, usize)>,
    /// Seed for the random map
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Wall probability for the random map
    #[arg(long, default_value_t = 0.2)]
    walls: f64,
    /// Print a report instead of animating
    #[arg(long)]
    headless: bool,
    /// Print the search result as JSON
    #[arg(long)]
    json: bool,
    /// Log level; defaults to silent while the animation is shown
    #[arg(short, long, value_enum)]
    verbosity: Option<Verbosity>,
}

fn parse_dimensions(value: &str) -> Result<(usize, usize), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid dimension '{s}': {e}"))
    };
    Ok((parse(width)?, parse(height)?))
}

struct App {
    map: GridMap,
    result: SearchResult,
    strategy: Strategy,
    /// Index of the agent's cell in the result path.
    cursor: usize,
    /// Flag to control the main loop.
    should_quit: bool,
}

impl App {
    fn new(map: GridMap, result: SearchResult, strategy: Strategy) -> Self {
        App {
            map,
            result,
            strategy,
            cursor: 0,
            should_quit: false,
        }
    }

    /// Moves the agent one cell along the path.
    fn tick(&mut self) {
        if self.cursor + 1 < self.result.path.len() {
            self.cursor += 1;
        }
    }

    fn agent_position(&self) -> Option<Position> {
        self.result
            .path
            .get(self.cursor)
            .copied()
            .or_else(|| self.map.landmark(INIT_LANDMARK))
    }

    fn travelled(&self) -> &[Position] {
        let end = (self.cursor + 1).min(self.result.path.len());
        &self.result.path[..end]
    }

    /// True once the agent has passed the cell where the search picked up
    /// the passenger.
    fn has_passenger(&self) -> bool {
        self.result
            .passenger
            .is_some_and(|pickup| self.travelled().contains(&pickup))
    }

    fn arrived(&self) -> bool {
        self.result.solution_found && self.cursor + 1 == self.result.path.len()
    }

    /// Sets the quit flag.
    fn quit(&mut self) {
        self.should_quit = true;
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();
    let animate = !(args.headless || args.json);
    let verbosity = args.verbosity.unwrap_or(if animate {
        Verbosity::Silent
    } else {
        Verbosity::Normal
    });
    init_tracing(verbosity.into());

    let map = load_map(&args)?;

    let strategy = match Strategy::from_code(args.strategy) {
        Ok(strategy) => strategy.with_ucs_mode(args.ucs_mode.into()),
        Err(err) => {
            error!("{err}");
            return Ok(());
        }
    };
    let result = match run_search(&map, strategy) {
        Ok(result) => result,
        Err(err) => {
            error!("{err}");
            return Ok(());
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    if args.headless {
        print_report(&strategy, &result);
        return Ok(());
    }

    // Set up the terminal
    let mut terminal = setup_terminal()?;

    // Create the application state
    let mut app = App::new(map, result, strategy);

    // Run the main application loop
    let outcome = run_app(&mut terminal, &mut app);

    // Restore the terminal state
    restore_terminal(&mut terminal)?;

    outcome
}

fn init_tracing(level: tracing::Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_map(args: &Args) -> Result<GridMap> {
    if let Some((width, height)) = args.random {
        info!(width, height, seed = args.seed, "generating random map");
        return Ok(generate_random_map(width, height, args.walls, args.seed)?);
    }

    // If no map file is provided, use the default map
    let map_file = args
        .map
        .clone()
        .unwrap_or(PathBuf::from("maps/map01.txt"));
    // Ensure the map file exists
    if !map_file.exists() {
        return Err(anyhow::anyhow!(
            "Map file does not exist: {}",
            map_file.display()
        ));
    }
    load_map_from_path(&map_file)
        .with_context(|| format!("Failed to load map {}", map_file.display()))
}

fn print_report(strategy: &Strategy, result: &SearchResult) {
    println!("Strategy:       {strategy:?}");
    println!("Solution found: {}", result.solution_found);
    println!("Expanded nodes: {}", result.expanded_nodes);
    println!("Tree depth:     {}", result.tree_depth);
    println!("Cost:           {}", result.cost);
    println!("Elapsed:        {:?}", result.elapsed);
    let path: Vec<String> = result
        .path
        .iter()
        .map(|p| format!("({}, {})", p.x, p.y))
        .collect();
    println!("Path:           {}", path.join(" -> "));
}

/// Configures the terminal for TUI interaction.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    enable_raw_mode()?; // Put terminal in raw mode
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?; // Use alternate screen and enable mouse capture
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into) // Map io::Error to anyhow::Error
}

/// Restores the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Runs the main loop of the TUI application.
fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(250); // Update rate
    let mut last_tick = Instant::now();

    loop {
        // Draw the UI
        terminal.draw(|f| ui(f, app))?;

        // Calculate timeout for event polling
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        // Poll for events (keyboard, mouse, etc.)
        if crossterm::event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.quit(),
                    _ => {}
                }
            }
        }

        // Advance the agent if enough time has passed
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        // Exit loop if requested
        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Renders the user interface.
fn ui(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(70), // Area for the map
            Constraint::Percentage(20), // Area for metrics
            Constraint::Percentage(10), // Area for status/help
        ])
        .split(frame.area());

    render_map(frame, main_layout[0], app);
    render_metrics(frame, main_layout[1], app);

    let status = if app.arrived() {
        "Goal reached. Press 'q' or 'Esc' to quit."
    } else if !app.result.solution_found {
        "No solution found. Press 'q' or 'Esc' to quit."
    } else {
        "Press 'q' or 'Esc' to quit."
    };
    let help_text = Paragraph::new(status)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(help_text, main_layout[2]);
}

/// Renders the search metrics onto the frame.
fn render_metrics(frame: &mut Frame, area: Rect, app: &App) {
    let result = &app.result;
    let steps = result.path.len().saturating_sub(1);
    let rows = [
        format!("Strategy: {:?}", app.strategy),
        format!(
            "Solution found: {}  Expanded nodes: {}  Tree depth: {}",
            result.solution_found, result.expanded_nodes, result.tree_depth
        ),
        format!("Cost: {}  Elapsed: {:?}", result.cost, result.elapsed),
        format!(
            "Step {}/{}  Passenger on board: {}",
            app.cursor.min(steps),
            steps,
            app.has_passenger()
        ),
    ];
    let items: Vec<ListItem> = rows.into_iter().map(ListItem::new).collect();
    let metrics_widget =
        List::new(items).block(Block::default().borders(Borders::ALL).title("Search"));
    frame.render_widget(metrics_widget, area);
}

/// Renders the grid, the travelled path and the agent onto the frame.
fn render_map(frame: &mut Frame, area: Rect, app: &App) {
    let grid = &app.map.grid;
    let agent = app.agent_position();
    let travelled = app.travelled();
    let picked_up = app.has_passenger();

    let mut lines: Vec<Line> = Vec::with_capacity(grid.height());
    for y in 0..grid.height() {
        let mut spans: Vec<Span> = Vec::with_capacity(grid.width());
        for x in 0..grid.width() {
            let pos = Position::new(x, y);
            if Some(pos) == agent {
                let color = if picked_up { Color::Yellow } else { Color::Red };
                spans.push(Span::styled("@", Style::default().fg(color).bold()));
                continue;
            }
            let span = match grid[pos] {
                CellType::Wall => Span::styled("#", Style::default().fg(Color::DarkGray)),
                CellType::Passenger if !(picked_up && app.result.passenger == Some(pos)) => {
                    Span::styled("p", Style::default().fg(Color::Yellow))
                }
                CellType::Goal => Span::styled("g", Style::default().fg(Color::Green)),
                CellType::Start => Span::styled("s", Style::default().fg(Color::Blue)),
                _ if travelled.contains(&pos) => {
                    Span::styled(".", Style::default().fg(Color::Cyan))
                }
                CellType::Reserved(_) => Span::styled("~", Style::default().fg(Color::Gray)),
                _ => Span::raw(" "),
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    let map_paragraph = Paragraph::new(lines)
        .block(Block::default().title("Taxi World").borders(Borders::ALL))
        .alignment(Alignment::Center);

    frame.render_widget(map_paragraph, area);
}
