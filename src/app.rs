//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern: [`App::update`]
//! folds terminal events and task results into the state, and [`App::view`]
//! draws it. Work that needs the network or the disk is queued as a
//! [`Request`] and picked up by the main loop.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, error, info, trace, warn};

use crate::api::{route_form, ApiError, FormPayload, Navigator, SubmitResponse};
use crate::cache::ViewStateStore;
use crate::config::{Config, TableSource};
use crate::error::AppError;
use crate::events::{Event, KeyBindings, KeyContext};
use crate::tasks::ApiMessage;
use crate::table::TableDocument;
use crate::ui::{
    render_context_help, theme, Destination, ErrorDialog, HelpAction, HelpView, ListAction,
    ListView, NotificationManager, RouteFormAction, RouteFormView,
};

/// Message shown when a mark-complete request fails.
pub const MARK_COMPLETE_FAILED: &str = "An error occurred while processing the form.";

/// The current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Waiting for the first table load.
    #[default]
    Loading,
    /// Showing the admin table.
    Table,
    /// The save route form is open over the table.
    RouteForm,
    /// Help screen is displayed.
    Help,
    /// Application is in the process of exiting.
    Exiting,
}

/// Work the main loop performs on the app's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Load the table from its source.
    LoadTable(TableSource),
    /// Post the save route form.
    SaveRoute {
        endpoint: String,
        form: FormPayload,
    },
    /// Mark one row complete.
    MarkComplete { endpoint: String, id: String },
}

/// The main application struct that holds all state.
pub struct App {
    state: AppState,
    should_quit: bool,
    config: Config,
    list_view: ListView,
    route_form: Option<RouteFormView>,
    help_view: HelpView,
    notifications: NotificationManager,
    error_dialog: ErrorDialog,
    navigator: Box<dyn Navigator>,
    view_state: Option<ViewStateStore>,
    /// Restore the stored scroll position on the next table load.
    restore_scroll: bool,
    requests: Vec<Request>,
}

impl App {
    /// Create the application and queue the initial table load.
    pub fn new(
        config: Config,
        navigator: Box<dyn Navigator>,
        view_state: Option<ViewStateStore>,
    ) -> Self {
        debug!(source = ?config.table.source, "Creating application");
        let bindings = KeyBindings::new(config.settings.vim_mode);

        let mut app = Self {
            state: AppState::Loading,
            should_quit: false,
            list_view: ListView::new(bindings),
            route_form: None,
            help_view: HelpView::new(),
            notifications: NotificationManager::new(),
            error_dialog: ErrorDialog::new(),
            navigator,
            view_state,
            restore_scroll: true,
            requests: Vec::new(),
            config,
        };
        app.request_reload();
        app
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the table view.
    pub fn list_view(&self) -> &ListView {
        &self.list_view
    }

    /// Get the open route form, if any.
    pub fn route_form(&self) -> Option<&RouteFormView> {
        self.route_form.as_ref()
    }

    /// Get the notifications.
    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    /// Get the error dialog.
    pub fn error_dialog(&self) -> &ErrorDialog {
        &self.error_dialog
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Get the current screen.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Take the queued requests.
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.requests)
    }

    /// Show an error as a dialog if critical, otherwise as a toast.
    pub fn handle_error(&mut self, error: &AppError) {
        warn!(error = %error, "Application error");
        if error.is_critical() {
            self.error_dialog.show(error);
        } else {
            self.notifications.error(error.user_message());
        }
    }

    /// Key under which this table's scroll position is stored.
    fn view_key(&self) -> String {
        match &self.config.table.source {
            TableSource::File(path) => format!("file:{}", path),
            TableSource::Remote(path) => format!("remote:{}", path),
        }
    }

    fn request_reload(&mut self) {
        self.list_view.set_loading(true);
        self.requests
            .push(Request::LoadTable(self.config.table.source.clone()));
    }

    fn quit(&mut self) {
        info!("Quit requested");
        self.should_quit = true;
        self.state = AppState::Exiting;
    }

    /// Screen to return to from an overlay.
    fn home_state(&self) -> AppState {
        if self.list_view.table().is_none() && self.list_view.is_loading() {
            AppState::Loading
        } else {
            AppState::Table
        }
    }

    /// Handle an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => self.quit(),
            Event::Key(key) => {
                trace!(key = ?key.code, modifiers = ?key.modifiers, "Key event");
                self.handle_key_event(key);
            }
            Event::Mouse(mouse) => {
                if self.error_dialog.is_visible()
                    || !matches!(self.state, AppState::Table | AppState::Loading)
                {
                    return;
                }
                if let Some(action) = self.list_view.handle_mouse(mouse) {
                    self.handle_list_action(action);
                }
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => self.notifications.tick(),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        // The error dialog blocks all other input
        if self.error_dialog.is_visible() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.error_dialog.dismiss();
            }
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        match self.state {
            AppState::Loading | AppState::Table => {
                if let Some(action) = self.list_view.handle_input(key) {
                    self.handle_list_action(action);
                }
            }
            AppState::RouteForm => {
                let action = self
                    .route_form
                    .as_mut()
                    .and_then(|form| form.handle_input(key));
                match action {
                    Some(RouteFormAction::Submit {
                        route_name,
                        trash_day,
                    }) => self.submit_route(&route_name, &trash_day),
                    Some(RouteFormAction::Cancel) => {
                        debug!("Route form cancelled");
                        self.route_form = None;
                        self.state = self.home_state();
                    }
                    None => {}
                }
            }
            AppState::Help => {
                if self.help_view.handle_input(key) == Some(HelpAction::Close) {
                    self.state = self.home_state();
                }
            }
            AppState::Exiting => {}
        }
    }

    fn handle_list_action(&mut self, action: ListAction) {
        match action {
            ListAction::Sorted => {}
            ListAction::SortFailed(e) => self.handle_error(&AppError::Table(e)),
            ListAction::OpenRouteForm => {
                let count = self.list_view.selection().count();
                debug!(count, "Opening route form");
                if count == 0 {
                    self.notifications
                        .warning("No addresses checked; the route will be empty.");
                }
                self.route_form = Some(RouteFormView::new(count));
                self.state = AppState::RouteForm;
            }
            ListAction::MarkComplete(id) => {
                let endpoint = self.config.endpoints.mark_complete_path(&id);
                info!(id = %id, endpoint = %endpoint, "Marking complete");
                self.requests.push(Request::MarkComplete { endpoint, id });
            }
            ListAction::Navigate(destination) => self.navigate(destination),
            ListAction::Reload => {
                info!("Reloading table");
                self.request_reload();
            }
            ListAction::OpenHelp => {
                self.help_view.reset_scroll();
                self.state = AppState::Help;
            }
            ListAction::Quit => self.quit(),
        }
    }

    fn navigate(&mut self, destination: Destination) {
        let endpoint = match destination {
            Destination::BuildRoute => &self.config.endpoints.build_route,
            Destination::ViewRoutes => &self.config.endpoints.view_routes,
        };
        let url = self.config.server.url(endpoint);
        match self.navigator.navigate(&url) {
            Ok(()) => self.notifications.info(format!("Opened {}", url)),
            Err(e) => {
                let e = AppError::Api(e);
                self.notifications.warning(e.user_message());
            }
        }
    }

    fn submit_route(&mut self, route_name: &str, trash_day: &str) {
        let ids = self.list_view.selected_ids();
        info!(route_name, trash_day, addresses = ids.len(), "Saving route");

        if let Some(form) = self.route_form.as_mut() {
            form.set_submitting(true);
        }
        self.requests.push(Request::SaveRoute {
            endpoint: self.config.endpoints.build_route.clone(),
            form: route_form(route_name, trash_day, &ids),
        });
    }

    /// Fold a background task result into the state.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::TableLoaded(Ok(document)) => self.table_loaded(document),
            ApiMessage::TableLoaded(Err(message)) => {
                warn!(error = %message, "Table load failed");
                self.list_view.set_loading(false);
                self.state = AppState::Table;
                self.error_dialog
                    .show_message("Could not load table", message);
            }
            ApiMessage::RouteSaved(result) => match accepted(result) {
                Ok(()) => {
                    info!("Route saved");
                    self.route_form = None;
                    self.state = AppState::Table;
                    self.list_view.clear_selection();
                    self.notifications.success("Route saved");
                    self.request_reload();
                }
                Err(message) => {
                    error!(error = %message, "Error saving route");
                    if let Some(form) = self.route_form.as_mut() {
                        form.set_submitting(false);
                    }
                    self.notifications
                        .error(format!("Error saving route: {}", message));
                }
            },
            ApiMessage::MarkedComplete { id, result } => match accepted(result) {
                Ok(()) => {
                    info!(id = %id, "Marked complete");
                    self.save_scroll();
                    self.restore_scroll = true;
                    self.request_reload();
                }
                Err(message) => {
                    error!(id = %id, error = %message, "Mark complete failed");
                    self.error_dialog.show_message("Error", MARK_COMPLETE_FAILED);
                }
            },
        }
    }

    fn table_loaded(&mut self, document: TableDocument) {
        if let Err(e) = self
            .list_view
            .load(document, self.config.table.default_column)
        {
            let e = AppError::Table(e);
            warn!(error = %e, "Table shown unsorted");
            self.notifications.warning(e.user_message());
        }

        if self.restore_scroll {
            self.restore_scroll = false;
            if let Some(position) = self
                .view_state
                .as_ref()
                .and_then(|store| store.load(&self.view_key()))
            {
                debug!(?position, "Restoring scroll position");
                self.list_view.restore_scroll(position);
            }
        }

        if self.state == AppState::Loading {
            self.state = AppState::Table;
        }
    }

    fn save_scroll(&self) {
        let Some(store) = &self.view_state else {
            return;
        };
        if let Err(e) = store.save(&self.view_key(), self.list_view.scroll_position()) {
            warn!(error = %e, "Could not save scroll position");
        }
    }

    /// Render the application UI.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [header, content, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(frame, header);

        match self.state {
            AppState::Help => self.help_view.render(frame, content),
            _ => self.list_view.render(frame, content),
        }
        if let Some(form) = self.route_form.as_ref().filter(|_| self.state == AppState::RouteForm)
        {
            form.render(frame, content);
        }

        let context = match self.state {
            AppState::RouteForm => KeyContext::RouteForm,
            AppState::Help => KeyContext::Help,
            _ => KeyContext::Table,
        };
        render_context_help(frame, footer, context, &self.list_view.status_line());

        self.notifications.render(frame, area);
        self.error_dialog.render(frame, area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let line = Line::from(vec![
            Span::styled(
                " curbdesk ",
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.config.server.base_url.clone(), Style::default().fg(t.dim)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Treat `{success: false}` like a failed request.
fn accepted(result: Result<SubmitResponse, String>) -> Result<(), String> {
    match result {
        Ok(reply) if reply.success => Ok(()),
        Ok(reply) => Err(reply
            .message
            .unwrap_or_else(|| ApiError::Rejected("no reason given".to_string()).to_string())),
        Err(message) => Err(message),
    }
}
