//! TUI application model (Elm architecture).

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Receiver;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Terminal;

use energydash_core::constants::{MAX_FREEFORM_GROUPS, TABLE_PAGE_SIZE};
use energydash_core::dataset::{Dataset, TablePage};
use energydash_core::handlers::{
    calculate_anova, calculate_generalized_anova, update_graph, AnovaUpdate, GraphUpdate,
};

use crate::anova::{render_anova_panel, render_freeform_panel};
use crate::chart::render_chart;
use crate::footer::render_footer;
use crate::header::render_header;
use crate::keymap::{map_key, KeyAction};
use crate::logs::{render_logs, LogPanel};
use crate::messages::TuiMessage;
use crate::table::render_data_table;

/// The panel that receives ←/→ and typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Graph,
    Anova,
    /// Freeform group field, zero-based.
    Group(usize),
}

impl Focus {
    fn order() -> Vec<Focus> {
        let mut order = vec![Focus::Table, Focus::Graph, Focus::Anova];
        order.extend((0..MAX_FREEFORM_GROUPS).map(Focus::Group));
        order
    }

    fn step(self, forward: bool) -> Focus {
        let order = Self::order();
        let index = order.iter().position(|f| *f == self).unwrap_or(0);
        let next = if forward {
            (index + 1) % order.len()
        } else {
            (index + order.len() - 1) % order.len()
        };
        order[next]
    }

    /// Index of the focused freeform field, if any.
    #[must_use]
    pub fn editing(self) -> Option<usize> {
        match self {
            Focus::Group(i) => Some(i),
            _ => None,
        }
    }
}

/// Screen regions of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub header: Rect,
    pub table: Rect,
    pub chart: Rect,
    pub anova: Rect,
    pub freeform: Rect,
    pub logs: Option<Rect>,
    pub footer: Rect,
}

/// TUI application state (Elm Model).
pub struct TuiApp {
    dataset: Arc<Dataset>,
    /// Input sizes offered by both selectors.
    pub sizes: Vec<String>,
    /// Selected index into `sizes` for the table/graph view.
    pub graph_size: usize,
    /// Selected index into `sizes` for the ANOVA calculator.
    pub anova_size: usize,
    /// Zero-based data table page.
    pub table_page: usize,
    pub focus: Focus,
    /// Freeform group fields.
    pub fields: Vec<String>,
    /// Times the freeform calculator has been run.
    pub n_clicks: u64,
    pub graph: GraphUpdate,
    pub anova: AnovaUpdate,
    pub general: AnovaUpdate,
    pub logs: LogPanel,
    pub should_quit: bool,
    rx: Receiver<TuiMessage>,
    pub terminal_width: u16,
    pub terminal_height: u16,
}

impl TuiApp {
    /// Create a new TUI app over a loaded dataset.
    ///
    /// Both selectors start at `preferred_size` when the data has it, else at
    /// the first input size.
    #[must_use]
    pub fn new(dataset: Arc<Dataset>, preferred_size: &str, rx: Receiver<TuiMessage>) -> Self {
        let mut sizes: Vec<String> = dataset.input_sizes().into_iter().map(String::from).collect();
        if sizes.is_empty() {
            sizes.push(preferred_size.to_string());
        }
        let initial = sizes.iter().position(|s| s == preferred_size).unwrap_or(0);

        let graph = update_graph(&dataset, &sizes[initial]);
        let anova = calculate_anova(&dataset, &sizes[initial]);
        Self {
            dataset,
            sizes,
            graph_size: initial,
            anova_size: initial,
            table_page: 0,
            focus: Focus::Table,
            fields: vec![String::new(); MAX_FREEFORM_GROUPS],
            n_clicks: 0,
            graph,
            anova,
            general: AnovaUpdate::default(),
            logs: LogPanel::new(),
            should_quit: false,
            rx,
            terminal_width: 80,
            terminal_height: 24,
        }
    }

    #[must_use]
    pub fn graph_input_size(&self) -> &str {
        &self.sizes[self.graph_size]
    }

    #[must_use]
    pub fn anova_input_size(&self) -> &str {
        &self.sizes[self.anova_size]
    }

    /// The current data table page.
    #[must_use]
    pub fn table(&self) -> TablePage {
        self.dataset.page(self.table_page, TABLE_PAGE_SIZE)
    }

    /// Drain pending messages (Elm Update).
    pub fn update(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.handle_message(msg);
        }
    }

    /// Handle a single message.
    pub fn handle_message(&mut self, msg: TuiMessage) {
        match msg {
            TuiMessage::Log(line) => self.logs.push(line),
            TuiMessage::Error(err) => self.logs.push(format!("ERROR {err}")),
            TuiMessage::KeyPress(action) => self.handle_key_action(action),
            TuiMessage::Resize { width, height } => {
                self.terminal_width = width;
                self.terminal_height = height;
            }
            TuiMessage::Tick => {}
            TuiMessage::Quit => self.should_quit = true,
        }
    }

    /// Handle a keyboard action.
    pub fn handle_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit | KeyAction::Cancel => self.should_quit = true,
            KeyAction::NextFocus => self.focus = self.focus.step(true),
            KeyAction::PrevFocus => self.focus = self.focus.step(false),
            KeyAction::Left => self.select(false),
            KeyAction::Right => self.select(true),
            KeyAction::PageUp => self.set_table_page(self.table_page.saturating_sub(1)),
            KeyAction::PageDown => self.set_table_page(self.table_page + 1),
            KeyAction::ScrollUp => self.logs.scroll_up(),
            KeyAction::ScrollDown => self.logs.scroll_down(),
            KeyAction::Home => self.logs.home(),
            KeyAction::End => self.logs.end(),
            KeyAction::ToggleLogs => self.logs.toggle(),
            KeyAction::Submit => self.submit(),
            KeyAction::Input(c) => {
                if let Some(i) = self.focus.editing() {
                    self.fields[i].push(c);
                }
            }
            KeyAction::Backspace => {
                if let Some(i) = self.focus.editing() {
                    self.fields[i].pop();
                }
            }
            KeyAction::None => {}
        }
    }

    /// ←/→ on the focused panel.
    fn select(&mut self, forward: bool) {
        match self.focus {
            Focus::Table => {
                let page = if forward {
                    self.table_page + 1
                } else {
                    self.table_page.saturating_sub(1)
                };
                self.set_table_page(page);
            }
            Focus::Graph => {
                self.graph_size = cycle(self.graph_size, self.sizes.len(), forward);
                self.graph = update_graph(&self.dataset, &self.sizes[self.graph_size]);
                tracing::info!(input_size = %self.sizes[self.graph_size], "graph input size changed");
            }
            Focus::Anova => {
                self.anova_size = cycle(self.anova_size, self.sizes.len(), forward);
                self.anova = calculate_anova(&self.dataset, &self.sizes[self.anova_size]);
                tracing::info!(input_size = %self.sizes[self.anova_size], "ANOVA input size changed");
            }
            Focus::Group(_) => {}
        }
    }

    fn set_table_page(&mut self, page: usize) {
        self.table_page = self.dataset.page(page, TABLE_PAGE_SIZE).page;
    }

    /// Run the freeform calculator, as a button click.
    fn submit(&mut self) {
        self.n_clicks += 1;
        let fields: Vec<Option<&str>> = self.fields.iter().map(|f| Some(f.as_str())).collect();
        self.general = calculate_generalized_anova(self.n_clicks, &fields);
        tracing::info!(n_clicks = self.n_clicks, "generalized ANOVA calculated");
    }

    /// Compute the dashboard layout.
    #[must_use]
    pub fn compute_layout(area: Rect, show_logs: bool) -> DashboardLayout {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // header
                Constraint::Min(10),   // main content
                Constraint::Length(2), // footer
            ])
            .split(area);

        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(outer[1]);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main[0]);

        let bottom_constraints: &[Constraint] = if show_logs {
            &[
                Constraint::Percentage(35),
                Constraint::Percentage(35),
                Constraint::Percentage(30),
            ]
        } else {
            &[Constraint::Percentage(50), Constraint::Percentage(50)]
        };
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(bottom_constraints)
            .split(main[1]);

        DashboardLayout {
            header: outer[0],
            table: top[0],
            chart: top[1],
            anova: bottom[0],
            freeform: bottom[1],
            logs: show_logs.then(|| bottom[2]),
            footer: outer[2],
        }
    }

    /// Render the full TUI view.
    pub fn render(&self, frame: &mut ratatui::Frame) {
        let layout = Self::compute_layout(frame.area(), self.logs.visible);

        render_header(frame, layout.header, self.dataset.len(), &self.sizes);
        render_data_table(frame, layout.table, &self.table(), self.focus == Focus::Table);
        render_chart(frame, layout.chart, &self.graph, self.focus == Focus::Graph);
        render_anova_panel(
            frame,
            layout.anova,
            self.anova_input_size(),
            &self.anova,
            self.focus == Focus::Anova,
        );
        render_freeform_panel(
            frame,
            layout.freeform,
            &self.fields,
            self.focus.editing(),
            &self.general,
        );
        if let Some(area) = layout.logs {
            render_logs(frame, area, &self.logs);
        }
        render_footer(frame, layout.footer);
    }

    /// Set up the terminal for TUI mode.
    pub fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    /// Tear down the terminal, restoring normal mode.
    pub fn teardown_terminal(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Run the TUI event loop until the user quits.
    pub fn run(&mut self) -> io::Result<()> {
        let mut terminal = Self::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        Self::teardown_terminal(&mut terminal)?;
        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        let tick_rate = Duration::from_millis(250);

        loop {
            terminal.draw(|frame| self.render(frame))?;

            if self.should_quit {
                return Ok(());
            }

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        let action = map_key(key, self.focus.editing().is_some());
                        self.handle_key_action(action);
                    }
                    Event::Resize(width, height) => {
                        self.handle_message(TuiMessage::Resize { width, height });
                    }
                    _ => {}
                }
            }

            // Log lines forwarded by the tracing bridge
            self.update();
        }
    }
}

fn cycle(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}
