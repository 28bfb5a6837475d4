use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::layout::Rect;

use crate::api::{ApiClient, Commit, CommitBatch, Project, User};
use crate::changes::{BatchTotals, ChangeSet, FileChange};
use crate::diff::{DiffRow, parse_diff};
use crate::layout;
use crate::settings::{self, AppSettings, SIDEBAR_WIDTH_MAX, SIDEBAR_WIDTH_MIN};

const SETTINGS_FIELD_COUNT: usize = 3;
const SETTINGS_WRITE_DEBOUNCE: Duration = Duration::from_millis(400);

pub const NO_CHANGES_NOTICE: &str = "No file changes found in this commit.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneFocus {
    Sidebar,
    Diff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub(crate) fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub(crate) fn warn(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Warn,
            text: text.into(),
        }
    }

    pub(crate) fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UiLayout {
    pub sidebar_inner: Rect,
    pub diff_area: Rect,
    pub diff_viewport_height: usize,
}

impl Default for UiLayout {
    fn default() -> Self {
        Self {
            sidebar_inner: Rect::new(0, 0, 0, 0),
            diff_area: Rect::new(0, 0, 0, 0),
            diff_viewport_height: 0,
        }
    }
}

pub struct App {
    client: ApiClient,
    commit_ids: Vec<String>,
    settings_dirty: bool,
    last_settings_change: Option<Instant>,
    pub settings: AppSettings,
    pub settings_open: bool,
    pub settings_selected: usize,
    pub project: Option<Project>,
    pub viewer: Option<User>,
    pub commits: Vec<Commit>,
    pub changes: ChangeSet,
    pub selected: Option<usize>,
    pub sidebar_scroll: usize,
    pub diff_rows: Vec<DiffRow>,
    pub diff_scroll: usize,
    pub pane_focus: PaneFocus,
    pub status: StatusMessage,
    pub layout: UiLayout,
}

impl App {
    pub fn new(
        client: ApiClient,
        project_id: Option<String>,
        commit_ids: Vec<String>,
    ) -> Result<Self> {
        let (settings, status) = match settings::load() {
            Ok(settings) => (settings, None),
            Err(error) => (
                AppSettings::default(),
                Some(StatusMessage::warn(format!(
                    "Settings parse error, using defaults ({error})"
                ))),
            ),
        };

        // The batch is the page; the project name and the greeting are
        // decoration, so their lookups may fail without aborting.
        let project = project_id.as_deref().and_then(|id| match client.project(id) {
            Ok(project) => Some(project),
            Err(error) => {
                tracing::warn!(%error, "project lookup failed");
                None
            }
        });
        let viewer = match client.current_user() {
            Ok(user) => Some(user),
            Err(error) => {
                tracing::debug!(%error, "current user lookup failed");
                None
            }
        };
        let batch = client.commit_batch(&commit_ids)?;

        let mut app = Self::from_batch(client, commit_ids, project, viewer, batch, settings);
        if let Some(status) = status {
            app.status = status;
        }
        Ok(app)
    }

    pub fn from_batch(
        client: ApiClient,
        commit_ids: Vec<String>,
        project: Option<Project>,
        viewer: Option<User>,
        batch: CommitBatch,
        settings: AppSettings,
    ) -> Self {
        let mut app = Self {
            client,
            commit_ids,
            settings_dirty: false,
            last_settings_change: None,
            settings,
            settings_open: false,
            settings_selected: 0,
            project,
            viewer,
            commits: Vec::new(),
            changes: ChangeSet::default(),
            selected: None,
            sidebar_scroll: 0,
            diff_rows: Vec::new(),
            diff_scroll: 0,
            pane_focus: PaneFocus::Sidebar,
            status: StatusMessage::info("Ready"),
            layout: UiLayout::default(),
        };

        app.apply_batch(batch);
        app
    }

    pub fn refresh_with_message(&mut self) -> Result<()> {
        self.refresh()?;
        self.set_status_info("Refreshed");
        Ok(())
    }

    pub fn refresh(&mut self) -> Result<()> {
        let batch = self.client.commit_batch(&self.commit_ids)?;
        self.apply_batch(batch);
        Ok(())
    }

    fn apply_batch(&mut self, batch: CommitBatch) {
        let previous_path = self.selected_path().map(ToOwned::to_owned);
        let previous_scroll = self.diff_scroll;

        self.commits = batch.commits;
        self.changes = ChangeSet::from_map(batch.file_changes);
        self.restore_selection(previous_path.as_deref());

        self.diff_scroll = 0;
        self.load_selected_diff();
        if previous_path.is_some() && self.selected_path() == previous_path.as_deref() {
            self.diff_scroll = previous_scroll;
            self.sync_scrolls();
        }

        if self.changes.is_empty() {
            self.set_status_info(NO_CHANGES_NOTICE);
        }
    }

    pub fn tick(&mut self) -> bool {
        match self.flush_settings_if_due() {
            Ok(flushed) => flushed,
            Err(error) => {
                self.set_status_error(error);
                true
            }
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.changes.len();
        if len == 0 {
            return;
        }

        let current = self.selected.unwrap_or(0);
        let next = if delta < 0 {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            (current + delta as usize).min(len - 1)
        };

        self.select_file(next);
    }

    // The click handler of the file list; selecting always reparses the diff
    // and jumps back to the top of it.
    pub fn select_file(&mut self, index: usize) {
        if index >= self.changes.len() {
            return;
        }

        self.selected = Some(index);
        self.diff_scroll = 0;
        self.load_selected_diff();
    }

    fn load_selected_diff(&mut self) {
        match self.selected.and_then(|idx| self.changes.get(idx)) {
            Some(file) => self.diff_rows = parse_diff(&file.diff),
            None => self.diff_rows.clear(),
        }
        self.sync_scrolls();
    }

    fn restore_selection(&mut self, preferred_path: Option<&str>) {
        if self.changes.is_empty() {
            self.selected = None;
            self.sidebar_scroll = 0;
            return;
        }

        if let Some(path) = preferred_path
            && let Some(idx) = self.changes.position_of(path)
        {
            self.selected = Some(idx);
            return;
        }

        if let Some(idx) = self.selected
            && idx < self.changes.len()
        {
            return;
        }

        self.selected = Some(0);
    }

    pub fn toggle_theme(&mut self) {
        self.settings.theme = self.settings.theme.toggle();
        self.mark_settings_dirty();
        self.set_status_info(format!("Theme: {}", self.settings.theme.label()));
    }

    pub fn toggle_sidebar_visibility(&mut self) {
        self.settings.sidebar_visible = !self.settings.sidebar_visible;
        if !self.settings.sidebar_visible {
            self.pane_focus = PaneFocus::Diff;
        }
        self.mark_settings_dirty();
        self.set_status_info(if self.settings.sidebar_visible {
            String::from("Sidebar shown")
        } else {
            String::from("Sidebar hidden")
        });
    }

    pub fn resize_sidebar(&mut self, delta: isize) {
        let next = shift_and_clamp_u16(
            self.settings.sidebar_width,
            delta,
            2,
            SIDEBAR_WIDTH_MIN,
            SIDEBAR_WIDTH_MAX,
        );

        if next == self.settings.sidebar_width {
            return;
        }

        self.settings.sidebar_width = next;
        self.mark_settings_dirty();
        self.set_status_info(format!("Sidebar width: {}", self.settings.sidebar_width));
    }

    pub fn toggle_settings_panel(&mut self) {
        self.settings_open = !self.settings_open;
        if self.settings_open {
            self.set_status_info("Settings open");
        } else {
            if let Err(error) = self.flush_settings_if_dirty() {
                self.set_status_error(error);
                return;
            }
            self.set_status_info("Settings closed");
        }
    }

    pub fn close_settings_panel(&mut self) {
        if self.settings_open {
            self.settings_open = false;
            if let Err(error) = self.flush_settings_if_dirty() {
                self.set_status_error(error);
                return;
            }
            self.set_status_info("Settings closed");
        }
    }

    pub fn move_settings_selection(&mut self, delta: isize) {
        let current = self.settings_selected.min(SETTINGS_FIELD_COUNT - 1);
        self.settings_selected = if delta < 0 {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            (current + delta as usize).min(SETTINGS_FIELD_COUNT - 1)
        };
    }

    pub fn adjust_selected_setting(&mut self, delta: isize) {
        match self.settings_selected {
            0 => {
                self.settings.theme = self.settings.theme.cycle(delta);
                self.mark_settings_dirty();
                self.set_status_info(format!("Theme: {}", self.settings.theme.label()));
            }
            1 => self.toggle_sidebar_visibility(),
            2 => self.resize_sidebar(delta),
            _ => {}
        }
    }

    pub fn settings_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Theme", self.settings.theme.label().to_owned()),
            (
                "Sidebar Visible",
                if self.settings.sidebar_visible {
                    String::from("Yes")
                } else {
                    String::from("No")
                },
            ),
            ("Sidebar Width", self.settings.sidebar_width.to_string()),
        ]
    }

    pub fn update_layout(&mut self, root: Rect) {
        let areas = layout::split_root(root, layout::header_height(self.commits.len()));
        let (sidebar_area, diff_area) = layout::split_main_area(areas.main, &self.settings);

        let sidebar_inner = match sidebar_area {
            Some(area) => layout::bordered_inner(area),
            None => Rect::new(0, 0, 0, 0),
        };

        self.layout = UiLayout {
            sidebar_inner,
            diff_area,
            diff_viewport_height: layout::bordered_inner(diff_area).height as usize,
        };
        self.sync_scrolls();

        if !self.has_sidebar() {
            self.pane_focus = PaneFocus::Diff;
        }
    }

    pub fn sync_scrolls(&mut self) {
        let sidebar_visible = self.layout.sidebar_inner.height as usize;
        ensure_visible(
            self.selected,
            self.changes.len(),
            sidebar_visible,
            &mut self.sidebar_scroll,
        );

        let diff_visible = self.layout.diff_viewport_height;
        if diff_visible == 0 {
            self.diff_scroll = 0;
        } else {
            let max_scroll = self.diff_rows.len().saturating_sub(diff_visible);
            self.diff_scroll = self.diff_scroll.min(max_scroll);
        }
    }

    pub fn scroll_diff(&mut self, delta: isize) {
        if delta < 0 {
            self.diff_scroll = self.diff_scroll.saturating_sub(delta.unsigned_abs());
        } else {
            self.diff_scroll = self.diff_scroll.saturating_add(delta as usize);
        }
        self.sync_scrolls();
    }

    pub fn scroll_diff_to_start(&mut self) {
        self.diff_scroll = 0;
    }

    pub fn scroll_diff_to_end(&mut self) {
        self.diff_scroll = self
            .diff_rows
            .len()
            .saturating_sub(self.layout.diff_viewport_height);
    }

    pub fn is_diff_focused(&self) -> bool {
        self.pane_focus == PaneFocus::Diff
    }

    pub fn toggle_pane_focus(&mut self) {
        if !self.has_sidebar() {
            self.pane_focus = PaneFocus::Diff;
            return;
        }

        self.pane_focus = match self.pane_focus {
            PaneFocus::Sidebar => PaneFocus::Diff,
            PaneFocus::Diff => PaneFocus::Sidebar,
        };
    }

    pub fn click(&mut self, column: u16, row: u16) {
        if contains(self.layout.sidebar_inner, column, row) {
            self.pane_focus = PaneFocus::Sidebar;
            let offset = (row - self.layout.sidebar_inner.y) as usize;
            let idx = self.sidebar_scroll + offset;
            if idx < self.changes.len() {
                self.select_file(idx);
            }
            return;
        }

        if contains(self.layout.diff_area, column, row) {
            self.pane_focus = PaneFocus::Diff;
        }
    }

    pub fn is_in_diff(&self, column: u16, row: u16) -> bool {
        contains(self.layout.diff_area, column, row)
    }

    pub fn set_error(&mut self, error: impl ToString) {
        self.set_status_error(error.to_string());
    }

    pub fn status_text(&self) -> &str {
        self.status.text.as_str()
    }

    pub fn status_kind(&self) -> StatusKind {
        self.status.kind
    }

    pub fn selected_file(&self) -> Option<&FileChange> {
        self.selected.and_then(|idx| self.changes.get(idx))
    }

    pub fn selected_path(&self) -> Option<&str> {
        self.selected_file().map(|file| file.path.as_str())
    }

    pub fn totals(&self) -> BatchTotals {
        self.changes.totals()
    }

    pub fn project_label(&self) -> Option<&str> {
        self.project.as_ref().map(|project| project.name.as_str())
    }

    pub fn viewer_label(&self) -> Option<&str> {
        self.viewer.as_ref().map(|user| user.username.as_str())
    }

    // Newest commit first, the order the backend returns the batch in.
    pub fn commit_title(&self) -> String {
        if self.commits.len() > 1 {
            return format!("{} commits", self.commits.len());
        }

        self.commits
            .first()
            .and_then(|commit| commit.message.clone())
            .unwrap_or_else(|| String::from("Commit details"))
    }

    pub fn author_label(&self) -> &str {
        self.commits
            .first()
            .and_then(|commit| commit.author.as_ref())
            .map(|author| author.username.as_str())
            .unwrap_or("Unknown")
    }

    pub fn commit_date_label(&self) -> Option<String> {
        self.commits
            .first()
            .and_then(|commit| commit.created_at)
            .map(|created| created.format("%Y-%m-%d %H:%M").to_string())
    }

    pub fn branch_label(&self) -> Option<&str> {
        self.commits
            .first()
            .and_then(|commit| commit.branch_name.as_deref())
    }

    pub fn config_path_display(&self) -> String {
        match settings::config_file_path() {
            Some(path) => path.display().to_string(),
            None => String::from("<HOME or XDG_CONFIG_HOME not set>"),
        }
    }

    pub fn flush_pending_settings(&mut self) -> Result<()> {
        self.flush_settings_if_dirty()
    }

    fn set_status_info(&mut self, text: impl Into<String>) {
        self.status = StatusMessage::info(text);
    }

    fn set_status_error(&mut self, error: impl ToString) {
        self.status = StatusMessage::error(format!("Error: {}", error.to_string()));
    }

    fn mark_settings_dirty(&mut self) {
        self.settings.normalize();
        self.settings_dirty = true;
        self.last_settings_change = Some(Instant::now());
    }

    fn flush_settings_if_due(&mut self) -> Result<bool> {
        if !self.settings_dirty {
            return Ok(false);
        }

        let Some(changed_at) = self.last_settings_change else {
            return Ok(false);
        };

        if changed_at.elapsed() < SETTINGS_WRITE_DEBOUNCE {
            return Ok(false);
        }

        settings::save(&self.settings)?;
        self.settings_dirty = false;
        self.last_settings_change = None;
        Ok(true)
    }

    fn flush_settings_if_dirty(&mut self) -> Result<()> {
        if !self.settings_dirty {
            return Ok(());
        }

        settings::save(&self.settings)?;
        self.settings_dirty = false;
        self.last_settings_change = None;
        Ok(())
    }

    fn has_sidebar(&self) -> bool {
        self.layout.sidebar_inner.width > 0
    }
}

pub(crate) fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x
        && x < rect.x.saturating_add(rect.width)
        && y >= rect.y
        && y < rect.y.saturating_add(rect.height)
}

fn ensure_visible(selected: Option<usize>, len: usize, visible: usize, scroll: &mut usize) {
    if len == 0 || visible == 0 {
        *scroll = 0;
        return;
    }

    *scroll = (*scroll).min(len.saturating_sub(visible));

    let Some(selected) = selected else {
        return;
    };

    if selected < *scroll {
        *scroll = selected;
        return;
    }

    let bottom = *scroll + visible;
    if selected >= bottom {
        *scroll = selected + 1 - visible;
    }
}

fn shift_and_clamp_u16(value: u16, delta: isize, step: u16, min: u16, max: u16) -> u16 {
    let candidate = value as i32 + (delta as i32 * step as i32);
    candidate.clamp(min as i32, max as i32) as u16
}
