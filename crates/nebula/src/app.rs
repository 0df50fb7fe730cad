use std::time::{Duration, Instant};

use chrono::{Datelike, Local};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use nebula_config::Config;
use nebula_core::{ColorTheme, Mounted, Pose};
use nebula_field::{DriftRate, FieldAnimator, FieldStyle, PointCloud};
use nebula_text::{CellMeasurer, CycleView, TextCycle};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use tracing::info;

use crate::page::{
    Block, HERO_CYCLE_ROW, HERO_PREFIX, HERO_SUFFIX, Page, Placement, Role, Row, SECTIONS,
    content_width, footer_rows, hero_rows, section_rows,
};

/// Poll timeout between frames, roughly 60 fps.
const FRAME_POLL: Duration = Duration::from_millis(16);

/// Longest step fed to the animations, so a suspended terminal resumes
/// without a burst of word changes.
const MAX_FRAME_DT: Duration = Duration::from_millis(250);

/// Pixels of animated offset per terminal row.
const PIXELS_PER_ROW: f32 = 20.0;

/// The landing page: point field background, hero with the cycling word,
/// and the scrollable sections below it.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    field: Mounted<FieldAnimator>,
    cycle: Mounted<TextCycle<CellMeasurer>>,
    style: FieldStyle,
    /// Field drift is frozen while paused; the headline keeps cycling.
    paused: bool,
    page: Page,
    year: i32,
}

impl App {
    /// Build both animated components from `config`.
    pub fn new(config: &Config) -> color_eyre::Result<Self> {
        let cloud = PointCloud::in_sphere(config.field.count, config.field.radius)?;
        let mut animator = FieldAnimator::new(cloud, DriftRate::new(config.field.drift_divisor)?);
        animator.set_speed(config.speed);

        let cycle = TextCycle::new(
            config.cycle.words.clone(),
            config.cycle.interval(),
            config.spring.to_spring()?,
            CellMeasurer::new(),
        )?;

        Ok(Self {
            running: false,
            field: Mounted::mount(animator),
            cycle: Mounted::mount(cycle),
            style: FieldStyle {
                theme: config.theme,
                size: config.field.size,
                tilt: config.field.tilt,
                ..FieldStyle::default()
            },
            paused: false,
            page: Page::new(),
            year: Local::now().year(),
        })
    }

    /// Run the application's main loop. Both components are unmounted
    /// before this returns, whether or not the loop failed.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let result = self.event_loop(&mut terminal);
        self.unmount();
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut last_frame = Instant::now();
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.after_layout();
            self.handle_crossterm_events()?;

            let now = Instant::now();
            self.tick(now.duration_since(last_frame));
            last_frame = now;
        }
        Ok(())
    }

    /// Advance every animation by one frame.
    fn tick(&mut self, dt: Duration) {
        let dt = dt.min(MAX_FRAME_DT);
        if !self.paused {
            self.field.tick(dt);
        }
        self.cycle.tick(dt);
        self.page.tick(dt);
    }

    /// The terminal has been drawn, so words can now be measured.
    fn after_layout(&mut self) {
        self.cycle.update(|cycle| {
            cycle.measurer_mut().mark_laid_out();
            cycle.layout_pass();
        });
    }

    fn unmount(&mut self) {
        self.field.unmount();
        self.cycle.unmount();
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        nebula_field::render(frame, area, self.field.get(), &self.style);

        self.page.layout(area.width, area.height);
        let scroll = self.page.scroll();
        let placements = self.page.placements().to_vec();
        for (index, placement) in placements.iter().enumerate() {
            if !placement.intersects(scroll, area.height) {
                continue;
            }
            match placement.block {
                Block::Hero => self.render_hero(frame, area, index, placement),
                Block::Section(i) => {
                    let rows = section_rows(&SECTIONS[i], area.width);
                    self.render_rows(frame, area, index, placement, &rows, Alignment::Left);
                }
                Block::Footer => {
                    let rows = footer_rows(self.year);
                    self.render_rows(frame, area, index, placement, &rows, Alignment::Center);
                }
            }
        }

        self.render_help(frame, area);
    }

    fn render_hero(&self, frame: &mut Frame, area: Rect, index: usize, placement: &Placement) {
        let rows = hero_rows(area.width);
        let pad = placement.height.saturating_sub(rows.len() as u16) / 2;
        let padded: Vec<Row> = std::iter::repeat_n(Row::blank(), pad as usize)
            .chain(rows)
            .collect();
        self.render_rows(frame, area, index, placement, &padded, Alignment::Center);

        let pose = self.page.pose(index);
        if pose.is_transparent() {
            return;
        }
        let doc_row = placement.top as usize
            + pad as usize
            + shift_rows(&pose) as usize
            + HERO_CYCLE_ROW;
        let scroll = self.page.scroll() as usize;
        if doc_row < scroll || doc_row >= scroll + area.height as usize {
            return;
        }
        let y = area.y + (doc_row - scroll) as u16;
        self.render_cycle_row(frame, area, y, pose);
    }

    /// Draw "that inspire <word>." with the word in its sprung container.
    fn render_cycle_row(&self, frame: &mut Frame, area: Rect, y: u16, pose: Pose) {
        let theme = self.style.theme;
        let view = CycleView::new(self.cycle.get(), theme).with_opacity(pose.opacity);
        let cells = view.container_cells();
        let prefix = Line::from(HERO_PREFIX).width() as u16;
        let suffix = Line::from(HERO_SUFFIX).width() as u16;
        let total = prefix + cells + suffix;
        let x = area.x + area.width.saturating_sub(total) / 2;

        let text_style = row_style(Role::Heading, theme, pose.opacity);
        frame.render_widget(
            Span::styled(HERO_PREFIX, text_style),
            Rect::new(x, y, prefix, 1).intersection(area),
        );

        let word_x = x.saturating_add(prefix);
        let word_area = if y > area.top() && y + 1 < area.bottom() {
            Rect::new(word_x, y - 1, cells, 3)
        } else {
            Rect::new(word_x, y, cells, 1)
        };
        frame.render_widget(view, word_area.intersection(area));

        frame.render_widget(
            Span::styled(HERO_SUFFIX, text_style),
            Rect::new(word_x.saturating_add(cells), y, suffix, 1).intersection(area),
        );
    }

    /// Draw the visible part of a block, each row shifted and faded by its
    /// reveal pose.
    fn render_rows(
        &self,
        frame: &mut Frame,
        area: Rect,
        index: usize,
        placement: &Placement,
        rows: &[Row],
        alignment: Alignment,
    ) {
        let scroll = self.page.scroll();
        let top = placement.top.max(scroll);
        let bottom = placement.bottom().min(scroll.saturating_add(area.height));
        if top >= bottom {
            return;
        }

        let width = content_width(area.width).min(area.width);
        let rect = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (top - scroll),
            width,
            bottom - top,
        );
        let theme = self.style.theme;
        let mut lines: Vec<Line> = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let pose = self.page.row_pose(index, row.item);
            if row.role == Role::Blank || pose.is_transparent() {
                continue;
            }
            let slot = i + shift_rows(&pose) as usize;
            if lines.len() <= slot {
                lines.resize(slot + 1, Line::raw(""));
            }
            let style = row_style(row.role, theme, pose.opacity);
            lines[slot] = Line::styled(row.text.as_str(), style);
        }
        if lines.is_empty() {
            return;
        }

        let paragraph = Paragraph::new(lines)
            .alignment(alignment)
            .scroll((top - placement.top, 0));
        frame.render_widget(paragraph, rect);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let color = self.style.theme.color();
        let speed = self.field.get().speed();
        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "↑↓".bold().fg(color),
            " scroll  ".dark_gray(),
            "c".bold().fg(color),
            " color  ".dark_gray(),
            "s".bold().fg(color),
            format!(" speed: {}  ", speed.name()).dark_gray(),
            "p".bold().fg(color),
            (if self.paused { " resume" } else { " pause" }).dark_gray(),
        ])
        .centered();
        frame.render_widget(help, Rect::new(area.x, area.bottom() - 1, area.width, 1));
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls with a short timeout so animations keep running without input.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(FRAME_POLL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Up | KeyCode::Char('k')) => self.page.scroll_by(-1),
            (_, KeyCode::Down | KeyCode::Char('j')) => self.page.scroll_by(1),
            (_, KeyCode::PageUp) => self.page.page_up(),
            (_, KeyCode::PageDown | KeyCode::Char(' ')) => self.page.page_down(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            (_, KeyCode::Char('s')) => self.cycle_speed(),
            (_, KeyCode::Char('p')) => self.toggle_pause(),
            _ => {}
        }
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.style.theme = self.style.theme.next();
        info!(theme = self.style.theme.name(), "color theme changed");
    }

    fn cycle_speed(&mut self) {
        let speed = self.field.get().speed().next();
        self.field.update(|field| field.set_speed(speed));
        info!(speed = speed.name(), "animation speed changed");
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!(paused = self.paused, "field drift toggled");
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Rows a pose pushes its content down by. Upward offsets are not drawn.
fn shift_rows(pose: &Pose) -> u16 {
    (pose.offset_y / PIXELS_PER_ROW).round().max(0.0) as u16
}

fn row_style(role: Role, theme: ColorTheme, opacity: f32) -> Style {
    match role {
        Role::Blank => Style::new(),
        Role::Kicker => Style::new()
            .fg(theme.faded(opacity))
            .add_modifier(Modifier::ITALIC),
        Role::Heading => Style::new()
            .fg(ColorTheme::White.faded(opacity))
            .add_modifier(Modifier::BOLD),
        Role::Body => Style::new().fg(ColorTheme::White.faded(opacity * 0.85)),
        Role::ItemTitle => Style::new()
            .fg(theme.faded(opacity))
            .add_modifier(Modifier::BOLD),
        Role::Muted => Style::new().fg(ColorTheme::White.faded(opacity * 0.6)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn app() -> App {
        let mut config = Config::default();
        config.field.count = 300;
        App::new(&config).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn buffer_rows(buf: &Buffer) -> Vec<String> {
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = app();
            app.running = true;
            press(&mut app, code);
            assert!(!app.running);
        }
        let mut app = app();
        app.running = true;
        app.on_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_color_and_speed_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.style.theme, ColorTheme::Pink);

        let before = app.field.get().speed();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.field.get().speed(), before.next());
    }

    #[test]
    fn test_pause_freezes_field_only() {
        let mut app = app();
        press(&mut app, KeyCode::Char('p'));
        let frozen = app.field.get().orientation();
        app.tick(Duration::from_millis(100));
        assert_eq!(app.field.get().orientation(), frozen);

        press(&mut app, KeyCode::Char('p'));
        app.tick(Duration::from_millis(100));
        assert_ne!(app.field.get().orientation(), frozen);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut app = app();
        app.tick(Duration::from_secs(30));
        let about_x = app.field.get().orientation().about_x;
        assert!((about_x + 0.25 / 100.0).abs() < 1e-9);
        // 30s would have fired the 2.5s timer twelve times.
        assert_eq!(app.cycle.get().current_index(), 0);
    }

    #[test]
    fn test_scroll_keys() {
        let mut app = app();
        app.page.layout(80, 24);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.page.scroll(), 2);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.page.scroll(), 1);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.page.scroll(), 24);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.page.scroll(), 1);
    }

    #[test]
    fn test_hero_renders_cycling_word() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        app.after_layout();
        assert_eq!(app.cycle.get().measured_width(), Some(10.0));

        app.tick(Duration::from_millis(200));
        app.tick(Duration::from_millis(200));
        app.tick(Duration::from_millis(200));
        terminal.draw(|frame| app.render(frame)).unwrap();

        let rows = buffer_rows(terminal.backend().buffer());
        assert!(rows.iter().any(|r| r.contains("We craft immersive 3D experiences")));
        assert!(rows.iter().any(|r| r.contains("that inspire innovation.")));
        assert!(rows.last().is_some_and(|r| r.contains("quit")));
    }

    /// Column and row where `text` starts in `buf`, cell by cell.
    fn find_text(buf: &Buffer, text: &str) -> Option<(u16, u16)> {
        let len = text.chars().count() as u16;
        (0..buf.area.height).find_map(|y| {
            (0..buf.area.width.saturating_sub(len - 1)).find_map(|x| {
                let found: String = (x..x + len).map(|c| buf[(c, y)].symbol()).collect();
                (found == text).then_some((x, y))
            })
        })
    }

    #[test]
    fn test_cycling_word_fades_in_with_hero() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        app.after_layout();
        app.tick(Duration::from_millis(16));
        terminal.draw(|frame| app.render(frame)).unwrap();

        let hero = app.page.pose(0);
        assert!(hero.opacity > 0.0 && hero.opacity < 0.5);
        let buf = terminal.backend().buffer();
        let (x, y) = find_text(buf, "innovation").unwrap();
        let theme = app.style.theme;
        assert_eq!(buf[(x, y)].fg, theme.faded(hero.opacity));
        assert_ne!(buf[(x, y)].fg, theme.color());

        let prefix = Line::from(HERO_PREFIX).width() as u16;
        assert_eq!(buf[(x - prefix, y)].symbol(), "t");
        assert_eq!(buf[(x - prefix, y)].fg, ColorTheme::White.faded(hero.opacity));
    }

    #[test]
    fn test_staggered_items_render_in_turn() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        app.page.scroll_by(24);
        terminal.draw(|frame| app.render(frame)).unwrap();
        app.tick(Duration::from_millis(250));
        terminal.draw(|frame| app.render(frame)).unwrap();

        let rows = buffer_rows(terminal.backend().buffer());
        let (first, _) = SECTIONS[0].items[0];
        let (fourth, _) = SECTIONS[0].items[3];
        assert!(rows.iter().any(|r| r.contains(first)));
        assert!(!rows.iter().any(|r| r.contains(fourth)));
    }

    #[test]
    fn test_unmount_stops_both_components() {
        let mut app = app();
        app.unmount();
        let orientation = app.field.get().orientation();
        app.tick(Duration::from_millis(100));
        assert_eq!(app.field.get().orientation(), orientation);
        assert!(!app.cycle.get().is_running());
    }
}
