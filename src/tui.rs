// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Terminal user interface - the orchestrating layer
//!
//! Owns the analysis session, the progression state and the active view.
//! Viewers are pure state machines from [`crate::viewers`]; this module
//! renders them, feeds key events in, and maps their outcomes to
//! progression events. Progression state flows down into the render
//! functions as immutable snapshots; nothing shares mutable state.

use crate::client::{AnalysisClient, ServiceError};
use crate::config::Config;
use crate::graph::DependencyGraph;
use crate::progression::{
    Badge, BadgeRules, LearningEvent, Progression, DECK_COMPLETED_XP, FIRST_ANALYSIS_XP,
};
use crate::types::{AnalysisResult, AnalysisSession, QuizQuestion};
use crate::viewers::flashcards::{DeckAdvance, FlashcardDeck};
use crate::viewers::lesson::LessonWalker;
use crate::viewers::quiz::{AnswerOutcome, QuizAdvance, QuizRunner, ADVANCE_DELAY, PERFECT_BONUS_XP};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Tabs, Wrap,
};
use ratatui::{Frame, Terminal};
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::warn;

/// Event poll cadence; also drives the quiz auto-advance check
const TICK: Duration = Duration::from_millis(100);

/// The one user-visible analysis failure message
const ANALYZE_FAILED: &str =
    "Failed to analyze repository. Check the URL and file path, then try again.";

/// Which form field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Url,
    Path,
}

/// Top-level application phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Showing the input form
    Input,
    /// Analysis request in flight; submission disabled
    Loading,
    /// A session is loaded and the viewers are live
    Ready,
}

/// Content tabs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Graph,
    Lesson,
    Flashcards,
    Quiz,
    Badges,
}

impl Tab {
    const ALL: [Self; 5] = [
        Self::Graph,
        Self::Lesson,
        Self::Flashcards,
        Self::Quiz,
        Self::Badges,
    ];

    fn title(self) -> &'static str {
        match self {
            Self::Graph => "Graph",
            Self::Lesson => "Guide",
            Self::Flashcards => "Flashcards",
            Self::Quiz => "Exam",
            Self::Badges => "Badges",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

/// The orchestrating application state
struct App {
    client: AnalysisClient,
    phase: Phase,
    focus: Focus,
    url_input: String,
    path_input: String,
    error: Option<String>,

    session: Option<AnalysisSession>,
    graph: DependencyGraph,

    progression: Progression,
    rules: BadgeRules,

    tab: Tab,
    lesson: LessonWalker,
    deck: FlashcardDeck,
    quiz: QuizRunner,
    /// Bumped whenever the quiz view is remounted or retaken so that a
    /// pending auto-advance deadline can never touch fresh state
    quiz_epoch: u64,
    pending_advance: Option<(Instant, u64)>,

    graph_list: ListState,
    notices: Vec<String>,
    ticks: u64,
    should_quit: bool,

    /// Receiver for the in-flight analysis, if any
    rx: Option<mpsc::Receiver<Result<AnalysisResult, ServiceError>>>,
}

impl App {
    fn new(client: AnalysisClient, url: Option<String>, path: Option<String>) -> Self {
        Self {
            client,
            phase: Phase::Input,
            focus: Focus::Url,
            url_input: url.unwrap_or_default(),
            path_input: path.unwrap_or_default(),
            error: None,
            session: None,
            graph: DependencyGraph::new(),
            progression: Progression::new(),
            rules: BadgeRules::standard(),
            tab: Tab::Graph,
            lesson: LessonWalker::new(0),
            deck: FlashcardDeck::new(0),
            quiz: QuizRunner::new(0),
            quiz_epoch: 0,
            pending_advance: None,
            graph_list: ListState::default(),
            notices: Vec::new(),
            ticks: 0,
            should_quit: false,
            rx: None,
        }
    }

    // -------------------------------------------------------------------------
    // Progression wiring
    // -------------------------------------------------------------------------

    fn push_notice(&mut self, notice: String) {
        self.notices.push(notice);
        if self.notices.len() > 3 {
            self.notices.remove(0);
        }
    }

    /// Grant XP for `event`, then evaluate the badge-rule table
    fn grant_xp(&mut self, amount: u32, event: LearningEvent) {
        let gain = self.progression.grant_xp(amount);
        if gain.levels_gained > 0 {
            self.push_notice(format!(
                "+{amount} XP - level up! Now level {}",
                self.progression.level()
            ));
        } else {
            self.push_notice(format!("+{amount} XP"));
        }
        self.run_badge_rules(event);
    }

    /// Evaluate the badge-rule table for a non-XP event
    fn emit(&mut self, event: LearningEvent) {
        self.run_badge_rules(event);
    }

    fn run_badge_rules(&mut self, event: LearningEvent) {
        for badge in self.rules.evaluate(&self.progression, &event) {
            if self.progression.unlock_badge(badge) {
                self.push_notice(format!("Badge unlocked: {}", badge.label()));
                // The first analysis comes with an XP bonus. The badge is
                // already unlocked here, so the nested evaluation cannot
                // fire it twice.
                if badge == Badge::FirstAnalysis {
                    self.grant_xp(FIRST_ANALYSIS_XP, event);
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Session lifecycle
    // -------------------------------------------------------------------------

    fn submit(&mut self) {
        if self.phase == Phase::Loading {
            return;
        }
        if self.url_input.trim().is_empty() || self.path_input.trim().is_empty() {
            self.error = Some("Both a repository URL and a file path are required.".into());
            return;
        }

        self.error = None;
        self.phase = Phase::Loading;

        let (tx, rx) = mpsc::channel();
        self.rx = Some(rx);

        let client = self.client.clone();
        let url = self.url_input.trim().to_string();
        let path = self.path_input.trim().to_string();
        thread::spawn(move || {
            let _ = tx.send(client.analyze(&url, &path));
        });
    }

    /// Poll the in-flight analysis without blocking the event loop
    fn poll_analysis(&mut self) {
        let Some(rx) = &self.rx else { return };
        match rx.try_recv() {
            Ok(Ok(result)) => {
                self.rx = None;
                self.install_session(result);
            }
            Ok(Err(err)) => {
                self.rx = None;
                warn!(error = %err, "analysis request failed");
                self.error = Some(ANALYZE_FAILED.to_string());
                self.phase = Phase::Input;
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.rx = None;
                warn!("analysis worker vanished");
                self.error = Some(ANALYZE_FAILED.to_string());
                self.phase = Phase::Input;
            }
        }
    }

    fn install_session(&mut self, result: AnalysisResult) {
        self.graph = DependencyGraph::from_data(result.graph.clone());
        self.session = Some(AnalysisSession::new(
            self.url_input.trim().to_string(),
            self.path_input.trim().to_string(),
            result,
        ));
        self.phase = Phase::Ready;
        self.error = None;
        self.tab = Tab::Graph;
        for tab in Tab::ALL {
            self.remount(tab);
        }
        self.emit(LearningEvent::AnalysisSucceeded);
    }

    /// Reset the viewer state of `tab`, as if it had just been mounted
    fn remount(&mut self, tab: Tab) {
        let result = self.session.as_ref().map(|s| &s.result);
        match tab {
            Tab::Graph => {
                self.graph_list = ListState::default();
                if !self.graph.is_empty() {
                    self.graph_list.select(Some(0));
                }
            }
            Tab::Lesson => {
                self.lesson = LessonWalker::new(result.map_or(0, |r| r.chapters.len()));
            }
            Tab::Flashcards => {
                self.deck = FlashcardDeck::new(result.map_or(0, |r| r.quiz.len()));
            }
            Tab::Quiz => {
                self.quiz = QuizRunner::new(result.map_or(0, |r| r.quiz.len()));
                self.quiz_epoch += 1;
                self.pending_advance = None;
            }
            Tab::Badges => {}
        }
    }

    fn set_tab(&mut self, tab: Tab) {
        if self.tab == tab {
            return;
        }
        // Leaving the quiz invalidates any pending auto-advance.
        if self.tab == Tab::Quiz {
            self.quiz_epoch += 1;
            self.pending_advance = None;
        }
        self.tab = tab;
        self.remount(tab);
    }

    fn current_question(&self) -> Option<&QuizQuestion> {
        self.session
            .as_ref()
            .and_then(|s| s.result.quiz.get(self.quiz.index()))
    }

    // -------------------------------------------------------------------------
    // Timers
    // -------------------------------------------------------------------------

    fn tick(&mut self) {
        self.ticks += 1;
        if self.phase == Phase::Loading {
            self.poll_analysis();
        }

        let Some((deadline, epoch)) = self.pending_advance else {
            return;
        };
        if Instant::now() < deadline {
            return;
        }
        self.pending_advance = None;
        if epoch != self.quiz_epoch {
            // The quiz was remounted or retaken while the timer was
            // pending; the transition must not touch the fresh state.
            return;
        }
        match self.quiz.advance() {
            Some(QuizAdvance::Summary { perfect: true, .. }) => {
                self.grant_xp(PERFECT_BONUS_XP, LearningEvent::QuizCompleted { perfect: true });
            }
            Some(QuizAdvance::Summary { perfect: false, .. }) => {
                self.emit(LearningEvent::QuizCompleted { perfect: false });
            }
            Some(QuizAdvance::NextQuestion) | None => {}
        }
    }

    // -------------------------------------------------------------------------
    // Key handling
    // -------------------------------------------------------------------------

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.phase {
            Phase::Input => self.handle_input_key(key),
            Phase::Loading => {
                if key.code == KeyCode::Esc {
                    self.should_quit = true;
                }
            }
            Phase::Ready => self.handle_ready_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                // With a session on screen, Esc backs out of the form
                // instead of quitting.
                if self.session.is_some() {
                    self.phase = Phase::Ready;
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                self.focus = match self.focus {
                    Focus::Url => Focus::Path,
                    Focus::Path => Focus::Url,
                };
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                let field = match self.focus {
                    Focus::Url => &mut self.url_input,
                    Focus::Path => &mut self.path_input,
                };
                field.pop();
            }
            KeyCode::Char(c) => {
                let field = match self.focus {
                    Focus::Url => &mut self.url_input,
                    Focus::Path => &mut self.path_input,
                };
                field.push(c);
            }
            _ => {}
        }
    }

    fn handle_ready_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('n') => {
                // Back to the form for a fresh analysis; the current
                // session stays visible until replaced.
                self.phase = Phase::Input;
                return;
            }
            KeyCode::Tab => {
                let next = Tab::ALL[(self.tab.index() + 1) % Tab::ALL.len()];
                self.set_tab(next);
                return;
            }
            KeyCode::BackTab => {
                let prev =
                    Tab::ALL[(self.tab.index() + Tab::ALL.len() - 1) % Tab::ALL.len()];
                self.set_tab(prev);
                return;
            }
            KeyCode::Char(c @ '1'..='5') => {
                let idx = (c as usize) - ('1' as usize);
                self.set_tab(Tab::ALL[idx]);
                return;
            }
            _ => {}
        }

        match self.tab {
            Tab::Graph => self.handle_graph_key(key),
            Tab::Lesson => self.handle_lesson_key(key),
            Tab::Flashcards => self.handle_flashcards_key(key),
            Tab::Quiz => self.handle_quiz_key(key),
            Tab::Badges => {}
        }
    }

    fn handle_graph_key(&mut self, key: KeyEvent) {
        let count = self.graph.node_count();
        if count == 0 {
            return;
        }
        let selected = self.graph_list.selected().unwrap_or(0);
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.graph_list.select(Some((selected + 1).min(count - 1)));
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.graph_list.select(Some(selected.saturating_sub(1)));
            }
            _ => {}
        }
    }

    fn handle_lesson_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Right => self.lesson.next(),
            KeyCode::Left => self.lesson.previous(),
            KeyCode::Enter => {
                if self.lesson.finish() {
                    self.push_notice("Lesson finished".to_string());
                    self.emit(LearningEvent::LessonFinished);
                }
            }
            _ => {}
        }
    }

    fn handle_flashcards_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(' ') => self.deck.flip(),
            KeyCode::Enter | KeyCode::Right => {
                if self.deck.advance() == DeckAdvance::Completed {
                    self.grant_xp(DECK_COMPLETED_XP, LearningEvent::DeckCompleted);
                    self.push_notice("Deck complete - on to the exam".to_string());
                    self.set_tab(Tab::Quiz);
                }
            }
            _ => {}
        }
    }

    fn handle_quiz_key(&mut self, key: KeyEvent) {
        if self.quiz.in_summary() {
            if key.code == KeyCode::Char('r') {
                self.quiz.retake();
                self.quiz_epoch += 1;
                self.pending_advance = None;
            }
            return;
        }

        let KeyCode::Char(c) = key.code else { return };
        if !c.is_ascii_lowercase() {
            return;
        }
        let Some(question) = self.current_question().cloned() else {
            return;
        };

        let outcome = self.quiz.answer(&question, &c.to_string());
        match outcome {
            AnswerOutcome::Correct { xp } => {
                self.grant_xp(xp, LearningEvent::AnswerCorrect);
            }
            AnswerOutcome::Incorrect => {
                self.progression.record_incorrect_answer();
                self.emit(LearningEvent::AnswerIncorrect);
            }
            AnswerOutcome::Ignored => return,
        }

        self.pending_advance = Some((Instant::now() + ADVANCE_DELAY, self.quiz_epoch));
    }
}

// =============================================================================
// Entry point and event loop
// =============================================================================

/// Run the interactive learning session.
///
/// `url` and `path` pre-fill the form; the analysis itself is triggered
/// from inside the TUI so the loading state is visible.
pub fn run(config: &Config, url: Option<String>, path: Option<String>) -> Result<()> {
    let client = AnalysisClient::new(&config.endpoint, config.timeout_secs)?;
    let mut app = App::new(client, url, path);

    enable_raw_mode().map_err(|e| {
        anyhow::anyhow!("Failed to enable raw mode: {e}. Run codexflow in a real terminal (TTY).")
    })?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| {
        let _ = disable_raw_mode();
        anyhow::anyhow!("Failed to initialize terminal: {e}")
    })?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);
    let cleanup = restore_terminal(&mut terminal);
    result.and(cleanup)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        app.tick();

        if app.should_quit {
            return Ok(());
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

fn draw(frame: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_gamification_bar(frame, rows[0], &app.progression);
    match app.phase {
        Phase::Input | Phase::Loading => draw_form(frame, rows[1], app),
        Phase::Ready => draw_session(frame, rows[1], app),
    }
    draw_footer(frame, rows[2], app);
}

fn draw_gamification_bar(frame: &mut Frame, area: Rect, progression: &Progression) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24),
            Constraint::Min(20),
            Constraint::Length(16),
        ])
        .split(area);

    let level = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" Lv {} ", progression.level()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("{} XP", progression.xp())),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Level"));
    frame.render_widget(level, cols[0]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(progression.level_progress())
        .label(format!(
            "{} / {} XP",
            progression.xp(),
            progression.xp_for_next_level()
        ));
    frame.render_widget(gauge, cols[1]);

    let streak_style = if progression.streak() > 0 {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let streak = Paragraph::new(Span::styled(
        format!(" {} Streak", progression.streak()),
        streak_style,
    ))
    .block(Block::default().borders(Borders::ALL).title("Streak"));
    frame.render_widget(streak, cols[2]);
}

fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let panel = centered_rect(70, 60, area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(panel);

    let title = Paragraph::new("CodexFlow - interactive code onboarding")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, rows[0]);

    let field_block = |label: &'static str, focused: bool| {
        let style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(label)
    };

    let cursor = |focused: bool| if focused { "_" } else { "" };
    let url_focused = app.focus == Focus::Url && app.phase == Phase::Input;
    let path_focused = app.focus == Focus::Path && app.phase == Phase::Input;

    let url = Paragraph::new(format!("{}{}", app.url_input, cursor(url_focused)))
        .block(field_block("Repository URL", url_focused));
    frame.render_widget(url, rows[1]);

    let path = Paragraph::new(format!("{}{}", app.path_input, cursor(path_focused)))
        .block(field_block("File path", path_focused));
    frame.render_widget(path, rows[2]);

    if app.phase == Phase::Loading {
        let dots = ".".repeat((app.ticks / 5 % 4) as usize);
        let loading = Paragraph::new(format!("Analyzing repository{dots}"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        frame.render_widget(loading, rows[3]);
    } else if let Some(error) = &app.error {
        let error = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(error, rows[3]);
    }
}

fn draw_session(frame: &mut Frame, area: Rect, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let titles: Vec<String> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{} {}", i + 1, t.title()))
        .collect();
    let bar_title = app.session.as_ref().map_or_else(String::new, |s| {
        format!("{} (fetched {})", s.file_path, s.fetched_at.format("%H:%M:%S"))
    });
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .block(Block::default().borders(Borders::ALL).title(bar_title))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, rows[0]);

    match app.tab {
        Tab::Graph => draw_graph_tab(frame, rows[1], app),
        Tab::Lesson => draw_lesson_tab(frame, rows[1], app),
        Tab::Flashcards => draw_flashcards_tab(frame, rows[1], app),
        Tab::Quiz => draw_quiz_tab(frame, rows[1], app),
        Tab::Badges => draw_badges_tab(frame, rows[1], app),
    }
}

fn draw_graph_tab(frame: &mut Frame, area: Rect, app: &mut App) {
    if app.graph.is_empty() {
        frame.render_widget(empty_view("No graph data for this file"), area);
        return;
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let items: Vec<ListItem> = app
        .graph
        .nodes()
        .iter()
        .map(|n| {
            let color = if n.node_type == "class" {
                Color::Magenta
            } else {
                Color::Green
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<9}", n.node_type), Style::default().fg(color)),
                Span::raw(n.display_label().to_string()),
            ]))
        })
        .collect();
    let count = items.len();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Nodes ({count})")),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, cols[0], &mut app.graph_list);

    let detail = app
        .graph_list
        .selected()
        .and_then(|i| app.graph.nodes().get(i));
    let mut lines: Vec<Line> = Vec::new();
    if let Some(node) = detail {
        lines.push(Line::from(vec![
            Span::styled("id: ", Style::default().fg(Color::DarkGray)),
            Span::raw(node.id.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("type: ", Style::default().fg(Color::DarkGray)),
            Span::raw(node.node_type.clone()),
        ]));
        lines.push(Line::from(""));

        lines.push(Line::from(Span::styled(
            "Depends on:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        let outgoing = app.graph.edges_from(&node.id);
        if outgoing.is_empty() {
            lines.push(Line::from(Span::styled(
                "  (nothing)",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for edge in outgoing {
            let target = app
                .graph
                .get_node(&edge.target)
                .map_or(edge.target.as_str(), |n| n.display_label());
            lines.push(Line::from(format!("  -> {target}")));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Used by:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        let incoming = app.graph.edges_to(&node.id);
        if incoming.is_empty() {
            lines.push(Line::from(Span::styled(
                "  (nothing)",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for edge in incoming {
            let source = app
                .graph
                .get_node(&edge.source)
                .map_or(edge.source.as_str(), |n| n.display_label());
            lines.push(Line::from(format!("  <- {source}")));
        }
    }

    let detail_panel = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("System architecture"),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(detail_panel, cols[1]);
}

fn draw_lesson_tab(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = &app.session else { return };
    let chapters = &session.result.chapters;
    if chapters.is_empty() {
        frame.render_widget(empty_view("No chapters for this file"), area);
        return;
    }

    let chapter = &chapters[app.lesson.index()];
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let title = format!(
        "#{} {}  ({}/{})",
        app.lesson.index() + 1,
        chapter.title,
        app.lesson.index() + 1,
        app.lesson.total()
    );
    let body = Paragraph::new(chapter.content.as_str())
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(body, rows[0]);

    let hint = if app.lesson.finished() {
        "Lesson finished".to_string()
    } else if app.lesson.is_last() {
        "Left back - Enter finish lesson".to_string()
    } else {
        "Left/Right to move between chapters".to_string()
    };
    let hint = Paragraph::new(hint).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, rows[1]);
}

fn draw_flashcards_tab(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = &app.session else { return };
    let cards = &session.result.quiz;
    if cards.is_empty() {
        frame.render_widget(empty_view("No study cards for this file"), area);
        return;
    }

    let card = &cards[app.deck.index()];
    let panel = centered_rect(70, 70, area);

    let (side, text, hint, color) = if app.deck.flipped() {
        let answer = card
            .correct_option()
            .map_or("Answer not found", |o| o.text.as_str());
        ("ANSWER", answer, "Enter next card - Space flip back", Color::Magenta)
    } else {
        (
            "QUESTION",
            card.question.as_str(),
            "Space to flip",
            Color::Cyan,
        )
    };

    let lines = vec![
        Line::from(Span::styled(
            side,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(text),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ];
    let card_panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Card {}/{}",
            app.deck.index() + 1,
            app.deck.total()
        )));
    frame.render_widget(card_panel, panel);
}

fn draw_quiz_tab(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = &app.session else { return };
    let quiz = &session.result.quiz;
    if quiz.is_empty() {
        frame.render_widget(empty_view("No questions for this file"), area);
        return;
    }

    if app.quiz.in_summary() {
        draw_quiz_summary(frame, area, app);
        return;
    }

    let question = &quiz[app.quiz.index()];
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let mut header = vec![Span::raw(format!(
        "Question {}/{}  Score {}",
        app.quiz.index() + 1,
        app.quiz.total(),
        app.quiz.score()
    ))];
    if app.quiz.streak() > 1 {
        header.push(Span::styled(
            format!("  {}x streak", app.quiz.streak()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(header)), rows[0]);

    let mut lines = vec![Line::from(question.question.as_str()), Line::from("")];
    for option in &question.options {
        let style = match app.quiz.selected() {
            // Feedback: the designated answer goes green, a wrong pick
            // red, everything else fades out.
            Some(_) if question.is_correct(&option.id) => Style::default().fg(Color::Green),
            Some(picked) if picked == option.id => Style::default().fg(Color::Red),
            Some(_) => Style::default().fg(Color::DarkGray),
            None => Style::default(),
        };
        lines.push(Line::from(Span::styled(
            format!("  [{}] {}", option.id, option.text),
            style,
        )));
    }
    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Knowledge check"))
        .wrap(Wrap { trim: false });
    frame.render_widget(body, rows[1]);

    let hint = if app.quiz.answered() {
        "..."
    } else {
        "Answer with the option letter"
    };
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        rows[2],
    );
}

fn draw_quiz_summary(frame: &mut Frame, area: Rect, app: &App) {
    let panel = centered_rect(60, 50, area);
    let total = app.quiz.total();
    let score = app.quiz.score();
    let perfect = total > 0 && score as usize == total;

    let mut lines = vec![
        Line::from(Span::styled(
            "Quiz complete!",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("You scored {score} out of {total}")),
    ];
    if perfect {
        lines.push(Line::from(Span::styled(
            "Perfect run",
            Style::default().fg(Color::Yellow),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "r retake the quiz",
        Style::default().fg(Color::DarkGray),
    )));

    let summary = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Summary"));
    frame.render_widget(summary, panel);
}

fn draw_badges_tab(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = Badge::catalog()
        .iter()
        .flat_map(|badge| {
            let unlocked = app.progression.has_badge(*badge);
            let (marker, style) = if unlocked {
                ("[x]", Style::default().fg(Color::Yellow))
            } else {
                ("[ ]", Style::default().fg(Color::DarkGray))
            };
            vec![
                Line::from(vec![
                    Span::styled(format!("{marker} "), style),
                    Span::styled(badge.label(), style.add_modifier(Modifier::BOLD)),
                ]),
                Line::from(Span::styled(
                    format!("    {}", badge.description()),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
            ]
        })
        .collect();

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Achievements"));
    frame.render_widget(panel, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let text = if app.notices.is_empty() {
        match app.phase {
            Phase::Input => "Tab switch field - Enter analyze - Esc quit".to_string(),
            Phase::Loading => "Analyzing... - Esc quit".to_string(),
            Phase::Ready => "1-5 tabs - n new analysis - q quit".to_string(),
        }
    } else {
        app.notices.join("  -  ")
    };
    let footer = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}

fn empty_view(message: &str) -> Paragraph<'_> {
    Paragraph::new(message)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

/// Center a `percent_x` by `percent_y` rectangle inside `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
