//! Page content, document layout and reveal-on-scroll.

use std::time::Duration;

use nebula_core::{Pose, Transition};
use ratatui::text::Line;

pub const HERO_BADGE: &str = "✦ Next-Gen 3D Design Studio";
pub const HERO_LEAD: &str = "We craft immersive 3D experiences";
pub const HERO_PREFIX: &str = "that inspire ";
pub const HERO_SUFFIX: &str = ".";
pub const HERO_COPY: &str = "From interactive web experiences to stunning 3D visualizations, \
    we bring your digital visions to life with cutting-edge technology and artistic excellence.";
pub const HERO_ACTIONS: [&str; 2] = ["Start Your Project →", "Watch Demo"];

/// Row of the cycling word within the hero's text rows.
pub const HERO_CYCLE_ROW: usize = 4;

/// Gap between the start of consecutive item reveals in a staggered grid.
pub const ITEM_STAGGER: Duration = Duration::from_millis(100);

/// A titled block of copy below the hero.
#[derive(Debug)]
pub struct Section {
    pub kicker: &'static str,
    pub heading: &'static str,
    pub body: &'static [&'static str],
    pub items: &'static [(&'static str, &'static str)],
    /// Items fade in one after another instead of with the heading.
    pub stagger: bool,
}

pub const SECTIONS: &[Section] = &[
    Section {
        kicker: "Services",
        heading: "What We Create",
        body: &["We specialize in cutting-edge 3D technologies and immersive digital experiences."],
        items: &[
            (
                "3D Web Experiences",
                "Interactive 3D websites and applications that captivate and engage your audience.",
            ),
            (
                "WebGL Development",
                "High-performance 3D graphics and animations running smoothly in web browsers.",
            ),
            (
                "AR/VR Solutions",
                "Immersive augmented and virtual reality experiences for various platforms.",
            ),
            (
                "3D Modeling",
                "Detailed 3D models and assets for games, applications, and visualizations.",
            ),
            (
                "Data Visualization",
                "Transform complex data into beautiful, interactive 3D visualizations.",
            ),
            (
                "Motion Graphics",
                "Stunning 3D animations and motion graphics for marketing and storytelling.",
            ),
        ],
        stagger: true,
    },
    Section {
        kicker: "Portfolio",
        heading: "Our 3D Creations",
        body: &["Explore our latest 3D projects and immersive experiences."],
        items: &[
            (
                "Interactive Product Showcase",
                "3D product visualization with real-time customization",
            ),
            ("Virtual Art Gallery", "Immersive VR gallery experience for digital art"),
            ("Data Landscape", "3D visualization of complex business analytics"),
            ("Gaming Interface", "Futuristic 3D UI for next-gen gaming platform"),
            ("Architectural Walkthrough", "Interactive 3D building exploration"),
            ("Brand Experience", "Immersive 3D brand storytelling platform"),
        ],
        stagger: true,
    },
    Section {
        kicker: "About Us",
        heading: "Pushing the boundaries of 3D design",
        body: &[
            "We are a team of passionate 3D artists, developers, and designers who believe in \
             the power of immersive experiences. Our mission is to transform how people interact \
             with digital content through cutting-edge 3D technologies.",
            "From WebGL applications to VR experiences, we combine technical expertise with \
             creative vision to deliver solutions that not only look stunning but also provide \
             meaningful user experiences.",
        ],
        items: &[],
        stagger: false,
    },
    Section {
        kicker: "Contact",
        heading: "Let's Create Something Amazing",
        body: &["Ready to bring your 3D vision to life? Get in touch with us to discuss your next \
                 immersive project."],
        items: &[
            ("Our Studio", "123 Innovation Street, Tech City, 10001"),
            ("Email Us", "hello@studio3d.com"),
            ("Call Us", "+1 (555) 123-4567"),
        ],
        stagger: false,
    },
];

/// What a row of text is, so the renderer can style it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Blank,
    Kicker,
    Heading,
    Body,
    ItemTitle,
    Muted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub role: Role,
    pub text: String,
    /// Index of the section item this row belongs to.
    pub item: Option<usize>,
}

impl Row {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            item: None,
        }
    }

    pub fn blank() -> Self {
        Self::new(Role::Blank, "")
    }

    fn in_item(mut self, index: usize) -> Self {
        self.item = Some(index);
        self
    }
}

/// Greedy word wrap to `width` cells. Words longer than a line get a line
/// of their own.
pub fn wrap(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1) as usize;
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut used = 0;
    for word in text.split_whitespace() {
        let w = Line::from(word).width();
        if used > 0 && used + 1 + w > width {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }
        if used > 0 {
            current.push(' ');
            used += 1;
        }
        current.push_str(word);
        used += w;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Column width the copy is wrapped to for a terminal `width` wide.
pub fn content_width(width: u16) -> u16 {
    width.saturating_sub(4).clamp(10, 76)
}

pub fn hero_rows(width: u16) -> Vec<Row> {
    let mut rows = vec![
        Row::new(Role::Kicker, HERO_BADGE),
        Row::blank(),
        Row::new(Role::Heading, HERO_LEAD),
        Row::blank(),
        // Drawn separately around the cycling word, with a free row on
        // either side for it to rise and drop through.
        Row::blank(),
        Row::blank(),
    ];
    rows.extend(wrap(HERO_COPY, content_width(width)).into_iter().map(|l| Row::new(Role::Body, l)));
    rows.push(Row::blank());
    rows.push(Row::new(
        Role::ItemTitle,
        format!("[ {} ]   [ {} ]", HERO_ACTIONS[0], HERO_ACTIONS[1]),
    ));
    rows
}

pub fn section_rows(section: &Section, width: u16) -> Vec<Row> {
    let width = content_width(width);
    let mut rows = vec![
        Row::blank(),
        Row::new(Role::Kicker, section.kicker.to_uppercase()),
        Row::new(Role::Heading, section.heading),
        Row::blank(),
    ];
    for (i, paragraph) in section.body.iter().enumerate() {
        if i > 0 {
            rows.push(Row::blank());
        }
        rows.extend(wrap(paragraph, width).into_iter().map(|l| Row::new(Role::Body, l)));
    }
    for (k, (title, description)) in section.items.iter().enumerate() {
        rows.push(Row::blank());
        rows.push(Row::new(Role::ItemTitle, format!("▸ {title}")).in_item(k));
        rows.extend(
            wrap(description, width.saturating_sub(2))
                .into_iter()
                .map(|l| Row::new(Role::Muted, format!("  {l}")).in_item(k)),
        );
    }
    rows.push(Row::blank());
    rows
}

pub fn footer_rows(year: i32) -> Vec<Row> {
    vec![
        Row::blank(),
        Row::new(Role::Muted, "─".repeat(24)),
        Row::new(Role::Muted, format!("© {year} Studio3D. All rights reserved.")),
        Row::new(Role::Muted, "Crafted with passion for the future of 3D web"),
        Row::blank(),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Hero,
    Section(usize),
    Footer,
}

/// Where a block sits in the scrollable document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub block: Block,
    pub top: u16,
    pub height: u16,
    /// Document row of the first item row, for blocks with items.
    pub items_top: Option<u16>,
}

impl Placement {
    pub fn bottom(&self) -> u16 {
        self.top.saturating_add(self.height)
    }

    /// Whether any row of the block is inside `[scroll, scroll + viewport)`.
    pub fn intersects(&self, scroll: u16, viewport: u16) -> bool {
        self.top < scroll.saturating_add(viewport) && self.bottom() > scroll
    }

    /// Whether any item row of the block is inside the viewport.
    pub fn items_intersect(&self, scroll: u16, viewport: u16) -> bool {
        self.items_top
            .is_some_and(|top| top < scroll.saturating_add(viewport) && self.bottom() > scroll)
    }
}

/// A fade in that plays once, the first time its block scrolls into view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reveal {
    transition: Transition,
    elapsed: Option<Duration>,
}

impl Reveal {
    pub fn new(transition: Transition) -> Self {
        Self {
            transition,
            elapsed: None,
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Start the fade. Returns false if it already started.
    pub fn trigger(&mut self) -> bool {
        if self.is_triggered() {
            return false;
        }
        self.elapsed = Some(Duration::ZERO);
        true
    }

    pub fn advance(&mut self, dt: Duration) {
        if let Some(elapsed) = &mut self.elapsed {
            *elapsed = elapsed.saturating_add(dt).min(self.transition.total());
        }
    }

    pub fn pose(&self) -> Pose {
        match self.elapsed {
            Some(elapsed) => self.transition.sample(elapsed),
            None => self.transition.from,
        }
    }
}

/// One reveal per item of a staggered section, each delayed by its place
/// in the list. Other blocks get none.
fn item_reveals(section: &Section) -> Vec<Reveal> {
    if !section.stagger {
        return Vec::new();
    }
    (0..section.items.len() as u32)
        .map(|k| Reveal::new(Transition::item_fade_in().with_delay(ITEM_STAGGER * k)))
        .collect()
}

/// Scroll position and reveal state of the whole document.
#[derive(Debug, Clone)]
pub struct Page {
    placements: Vec<Placement>,
    reveals: Vec<Reveal>,
    /// Per-item reveals, indexed like `placements`.
    items: Vec<Vec<Reveal>>,
    scroll: u16,
    viewport: u16,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        let mut reveals = vec![Reveal::new(Transition::fade_in())];
        reveals.extend(SECTIONS.iter().map(|_| Reveal::new(Transition::fade_in())));
        reveals.push(Reveal::new(Transition::fade_in()));
        let mut items = vec![Vec::new()];
        items.extend(SECTIONS.iter().map(item_reveals));
        items.push(Vec::new());
        Self {
            placements: Vec::new(),
            reveals,
            items,
            scroll: 0,
            viewport: 0,
        }
    }

    /// Lay the document out for a `width` x `height` viewport, clamp the
    /// scroll position, and trigger reveals for blocks now in view.
    pub fn layout(&mut self, width: u16, height: u16) {
        self.viewport = height;
        self.placements.clear();

        let hero = height.max(hero_rows(width).len() as u16 + 2);
        self.placements.push(Placement {
            block: Block::Hero,
            top: 0,
            height: hero,
            items_top: None,
        });
        let mut top = hero;
        for (i, section) in SECTIONS.iter().enumerate() {
            let rows = section_rows(section, width);
            let items_top = rows
                .iter()
                .position(|row| row.item.is_some())
                .map(|offset| top.saturating_add(offset as u16));
            let height = rows.len() as u16;
            self.placements.push(Placement {
                block: Block::Section(i),
                top,
                height,
                items_top,
            });
            top = top.saturating_add(height);
        }
        self.placements.push(Placement {
            block: Block::Footer,
            top,
            height: footer_rows(0).len() as u16,
            items_top: None,
        });

        self.scroll = self.scroll.min(self.max_scroll());
        let blocks = self.placements.iter().zip(&mut self.reveals).zip(&mut self.items);
        for ((placement, reveal), items) in blocks {
            if placement.intersects(self.scroll, height) && reveal.trigger() {
                tracing::debug!(block = ?placement.block, "revealed");
            }
            if !items.is_empty() && placement.items_intersect(self.scroll, height) {
                let started = items.iter_mut().fold(false, |any, item| item.trigger() | any);
                if started {
                    let count = items.len();
                    tracing::debug!(block = ?placement.block, count, "items revealed");
                }
            }
        }
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn document_height(&self) -> u16 {
        self.placements.last().map_or(0, Placement::bottom)
    }

    pub fn max_scroll(&self) -> u16 {
        self.document_height().saturating_sub(self.viewport)
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let next = (self.scroll as i32 + delta).clamp(0, self.max_scroll() as i32);
        self.scroll = next as u16;
    }

    pub fn page_down(&mut self) {
        self.scroll_by(self.viewport.saturating_sub(1).max(1) as i32);
    }

    pub fn page_up(&mut self) {
        self.scroll_by(-(self.viewport.saturating_sub(1).max(1) as i32));
    }

    /// Current pose of the block at `index` in [`Page::placements`].
    pub fn pose(&self, index: usize) -> Pose {
        self.reveals.get(index).map_or(Pose::VISIBLE, Reveal::pose)
    }

    /// Pose of a row in the block at `index`. Rows of a staggered item
    /// follow that item's own reveal; the rest follow the block.
    pub fn row_pose(&self, index: usize, item: Option<usize>) -> Pose {
        item.and_then(|k| self.items.get(index)?.get(k))
            .map_or_else(|| self.pose(index), Reveal::pose)
    }

    pub fn tick(&mut self, dt: Duration) {
        for reveal in self.reveals.iter_mut().chain(self.items.iter_mut().flatten()) {
            reveal.advance(dt);
        }
    }
}
