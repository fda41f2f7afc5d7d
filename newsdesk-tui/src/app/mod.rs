use newsdesk_api::Record;

mod editor;
mod lister;
mod state;
mod tasks;
pub use editor::{EditorState, FormField, SubmitRequest};
pub use lister::ListerState;
pub use state::{Alert, DeleteContext, TextInput};
pub use tasks::{OwnedTasks, TaskOwner};

/// The active screen. The editor exists only while its screen is shown.
#[derive(Debug)]
pub enum Screen {
    Listing,
    Editing(Box<EditorState>),
}

impl Screen {
    fn owner(&self) -> TaskOwner {
        match self {
            Screen::Listing => TaskOwner::Lister,
            Screen::Editing(_) => TaskOwner::Editor,
        }
    }
}

pub struct App {
    pub running: bool,
    pub screen: Screen,
    /// Bumped to make the lister re-fetch; only changes are observed.
    pub refresh_token: u64,
    pub lister: ListerState,
    pub alert: Option<Alert>,
    pub delete_context: Option<DeleteContext>,
    pub status_message: Option<String>,
    pub tasks: OwnedTasks,
    pub logged_out: bool,
    pub api_label: String,
    pub throbber_state: throbber_widgets_tui::ThrobberState,
}

impl App {
    pub fn new(api_label: impl Into<String>) -> Self {
        Self {
            running: true,
            screen: Screen::Listing,
            refresh_token: 0,
            lister: ListerState::default(),
            alert: None,
            delete_context: None,
            status_message: None,
            tasks: OwnedTasks::default(),
            logged_out: false,
            api_label: api_label.into(),
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_listing(&self) -> bool {
        matches!(self.screen, Screen::Listing)
    }

    pub fn editor(&self) -> Option<&EditorState> {
        match &self.screen {
            Screen::Editing(editor) => Some(editor.as_ref()),
            Screen::Listing => None,
        }
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditorState> {
        match &mut self.screen {
            Screen::Editing(editor) => Some(editor.as_mut()),
            Screen::Listing => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.lister.loading || self.editor().is_some_and(|e| e.busy)
    }

    /// Tear down the current screen's view: abort its requests.
    fn leave_screen(&mut self) {
        let owner = self.screen.owner();
        self.tasks.abort(owner);
        if owner == TaskOwner::Lister {
            self.lister.deactivate();
            self.delete_context = None;
        }
    }

    pub fn start_create(&mut self) {
        self.leave_screen();
        self.screen = Screen::Editing(Box::new(EditorState::new(None)));
        self.clear_status();
    }

    pub fn start_edit(&mut self, record: Record) {
        self.leave_screen();
        self.screen = Screen::Editing(Box::new(EditorState::new(Some(record))));
        self.clear_status();
    }

    pub fn on_save_success(&mut self) {
        self.leave_screen();
        self.screen = Screen::Listing;
        self.refresh_token += 1;
        self.set_status("Article saved".to_string());
    }

    pub fn on_cancel(&mut self) {
        self.leave_screen();
        self.screen = Screen::Listing;
        self.clear_status();
    }

    /// Manual refresh from the list screen.
    pub fn request_refresh(&mut self) {
        self.refresh_token += 1;
    }

    pub fn begin_delete(&mut self) {
        if let Some(record) = self.lister.actionable_record() {
            self.delete_context = Some(DeleteContext {
                id: record.id.clone(),
                title: record.title.clone(),
            });
        }
    }

    pub fn show_alert(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.alert = Some(Alert {
            title: title.into(),
            message: message.into(),
        });
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
