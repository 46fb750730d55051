//! Main application state and logic

use party_core::input::{parse_amount, parse_purse};
use party_core::{Group, LoadOutcome, PartySession, RulesError, SessionError};
use tracing::warn;

use crate::forms::{Form, FormKind};
use crate::notices::{notices_for, Notice};
use crate::ui::theme::RosterTheme;

/// Oldest notices are dropped past this many.
const MAX_NOTICES: usize = 200;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Menu,
    Coins,
    Experience,
    AddMember,
    Groups,
}

/// Entries of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    DistributeMoney,
    DistributeExperience,
    AddMember,
    ManageGroups,
    SaveAndQuit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::DistributeMoney,
        MenuChoice::DistributeExperience,
        MenuChoice::AddMember,
        MenuChoice::ManageGroups,
        MenuChoice::SaveAndQuit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::DistributeMoney => "Distribute Money",
            MenuChoice::DistributeExperience => "Distribute Experience",
            MenuChoice::AddMember => "Add Member",
            MenuChoice::ManageGroups => "Activate/Deactivate Members",
            MenuChoice::SaveAndQuit => "Save & Exit",
        }
    }
}

/// Selection state of the groups screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupsView {
    pub focus: Group,
    pub active_selected: usize,
    pub inactive_selected: usize,
}

impl Default for GroupsView {
    fn default() -> Self {
        Self {
            focus: Group::Active,
            active_selected: 0,
            inactive_selected: 0,
        }
    }
}

impl GroupsView {
    pub fn selected(&self, group: Group) -> usize {
        match group {
            Group::Active => self.active_selected,
            Group::Inactive => self.inactive_selected,
        }
    }

    fn selected_mut(&mut self, group: Group) -> &mut usize {
        match group {
            Group::Active => &mut self.active_selected,
            Group::Inactive => &mut self.inactive_selected,
        }
    }
}

/// Main application state
pub struct App {
    pub session: PartySession,

    // UI state
    pub theme: RosterTheme,
    pub screen: Screen,
    pub menu_selected: usize,
    pub form: Form,
    pub groups: GroupsView,

    // Output
    pub notices: Vec<Notice>,
    status_message: Option<String>,
    pub should_quit: bool,
}

impl App {
    /// Create the application around an opened session
    pub fn new(session: PartySession, outcome: &LoadOutcome) -> Self {
        let mut app = Self {
            session,
            theme: RosterTheme::default(),
            screen: Screen::Menu,
            menu_selected: 0,
            form: Form::new(FormKind::Coins),
            groups: GroupsView::default(),
            notices: Vec::new(),
            status_message: None,
            should_quit: false,
        };

        let location = app.session.store_description();
        match outcome {
            LoadOutcome::Loaded { members } => {
                app.push_notice(Notice::info(format!("Loaded {members} members from {location}")))
            }
            LoadOutcome::Fresh => {
                app.push_notice(Notice::info(format!("Starting a new party at {location}")))
            }
            LoadOutcome::Failed(e) => {
                app.push_notice(Notice::error(format!("Could not load {location}: {e}")));
                app.push_notice(Notice::warning("Starting with an empty party"));
                app.push_notice(Notice::warning(
                    "The unreadable file is kept aside on the next save",
                ));
            }
        }

        app
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
        if self.notices.len() > MAX_NOTICES {
            let excess = self.notices.len() - MAX_NOTICES;
            self.notices.drain(..excess);
        }
    }

    fn push_notices(&mut self, notices: impl IntoIterator<Item = Notice>) {
        for notice in notices {
            self.push_notice(notice);
        }
    }

    // ========================================================================
    // Menu
    // ========================================================================

    pub fn menu_up(&mut self) {
        let len = MenuChoice::ALL.len();
        self.menu_selected = (self.menu_selected + len - 1) % len;
    }

    pub fn menu_down(&mut self) {
        self.menu_selected = (self.menu_selected + 1) % MenuChoice::ALL.len();
    }

    pub fn selected_choice(&self) -> MenuChoice {
        MenuChoice::ALL[self.menu_selected % MenuChoice::ALL.len()]
    }

    /// Open the screen for a menu choice.
    ///
    /// Distribution screens stay closed while nobody is active.
    pub fn open(&mut self, choice: MenuChoice) {
        self.clear_status();
        let no_active = self.session.party().active.is_empty();

        match choice {
            MenuChoice::DistributeMoney | MenuChoice::DistributeExperience if no_active => {
                self.set_status(RulesError::NoActiveMembers.to_string());
            }
            MenuChoice::DistributeMoney => self.open_form(Screen::Coins, FormKind::Coins),
            MenuChoice::DistributeExperience => {
                self.open_form(Screen::Experience, FormKind::Experience)
            }
            MenuChoice::AddMember => self.open_form(Screen::AddMember, FormKind::AddMember),
            MenuChoice::ManageGroups => {
                self.groups = GroupsView::default();
                self.screen = Screen::Groups;
            }
            MenuChoice::SaveAndQuit => self.should_quit = true,
        }
    }

    fn open_form(&mut self, screen: Screen, kind: FormKind) {
        self.form = Form::new(kind);
        self.screen = screen;
    }

    pub fn back_to_menu(&mut self) {
        self.screen = Screen::Menu;
    }

    // ========================================================================
    // Forms
    // ========================================================================

    /// Run the command behind the current form.
    pub fn submit_form(&mut self) {
        let mut warnings = Vec::new();

        let result = match self.form.kind {
            FormKind::Coins => {
                let (purse, purse_warnings) = parse_purse(&self.form.coin_values());
                warnings.extend(purse_warnings);
                self.session.distribute_coins(&purse)
            }
            FormKind::Experience => {
                let parsed = parse_amount(self.form.value("Experience"));
                warnings.extend(parsed.warning.map(|w| format!("Experience: {w}")));
                self.session.distribute_experience(parsed.value)
            }
            FormKind::AddMember => {
                let parsed = parse_amount(self.form.value("Experience"));
                warnings.extend(parsed.warning.map(|w| format!("Experience: {w}")));
                let (purse, purse_warnings) = parse_purse(&self.form.coin_values());
                warnings.extend(purse_warnings);
                let name = self.form.value("Name").to_string();
                self.session.add_member(&name, parsed.value, purse)
            }
        };

        if !warnings.is_empty() {
            self.set_status(warnings.join("; "));
        } else {
            self.clear_status();
        }
        self.push_notices(warnings.into_iter().map(Notice::warning));

        match result {
            Ok(response) => {
                self.push_notices(notices_for(&response));
                self.back_to_menu();
            }
            Err(SessionError::Rules(e @ (RulesError::EmptyName | RulesError::DuplicateName(_)))) => {
                // Let the user fix the name without retyping everything.
                self.set_status(e.to_string());
                self.form.focus = 0;
            }
            Err(e) => {
                warn!(error = %e, "Command rejected");
                self.set_status(e.to_string());
                self.push_notice(Notice::error(e.to_string()));
                self.back_to_menu();
            }
        }
    }

    // ========================================================================
    // Groups
    // ========================================================================

    pub fn switch_group_focus(&mut self) {
        self.groups.focus = self.groups.focus.other();
    }

    pub fn group_up(&mut self) {
        let selected = self.groups.selected_mut(self.groups.focus);
        *selected = selected.saturating_sub(1);
    }

    pub fn group_down(&mut self) {
        let len = self.session.party().group(self.groups.focus).len();
        let selected = self.groups.selected_mut(self.groups.focus);
        if *selected + 1 < len {
            *selected += 1;
        }
    }

    /// Move the selected member of the focused table to the other group.
    pub fn toggle_selected(&mut self) {
        let group = self.groups.focus;
        let idx = self.groups.selected(group);
        let Some(name) = self
            .session
            .party()
            .group(group)
            .get(idx)
            .map(|m| m.name.clone())
        else {
            self.set_status(format!("No {} members", group.to_string().to_lowercase()));
            return;
        };

        match self.session.change_member_group(&name, group) {
            Ok(response) => {
                self.clear_status();
                self.push_notices(notices_for(&response));
            }
            Err(e) => {
                self.set_status(e.to_string());
                self.push_notice(Notice::error(e.to_string()));
            }
        }

        let len = self.session.party().group(group).len();
        let selected = self.groups.selected_mut(group);
        *selected = (*selected).min(len.saturating_sub(1));
    }

    /// Save explicitly and go back to the menu.
    pub fn save_and_return(&mut self) {
        self.save_with_status();
        self.back_to_menu();
    }

    /// Final save when the TUI closes. Returns whether anything was written.
    pub fn save_on_exit(&mut self) -> Result<bool, SessionError> {
        self.session.save_if_dirty()
    }

    /// Save and report the outcome in the status line and feed.
    pub fn save_with_status(&mut self) -> bool {
        match self.session.save() {
            Ok(()) => {
                let message = format!("Saved to {}", self.session.store_description());
                self.set_status(message.clone());
                self.push_notice(Notice::info(message));
                true
            }
            Err(e) => {
                self.set_status(format!("Save failed: {e}"));
                self.push_notice(Notice::error(format!("Save failed: {e}")));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notices::NoticeKind;
    use party_core::testing::create_sample_party;
    use party_core::{Denomination, MemoryStore};

    fn app_with(store: MemoryStore) -> App {
        let (session, outcome) = PartySession::with_store(store, true);
        App::new(session, &outcome)
    }

    fn type_into(app: &mut App, text: &str) {
        for c in text.chars() {
            app.form.push_char(c);
        }
    }

    #[test]
    fn test_startup_notice_reports_load() {
        let app = app_with(MemoryStore::with_party(create_sample_party()));
        assert!(app.notices[0].content.contains("Loaded 3 members"));
    }

    #[test]
    fn test_distribution_screens_need_active_members() {
        let mut app = app_with(MemoryStore::new());
        app.open(MenuChoice::DistributeMoney);
        assert_eq!(app.screen, Screen::Menu);
        assert!(app.status_message().is_some());

        app.open(MenuChoice::AddMember);
        assert_eq!(app.screen, Screen::AddMember);
    }

    #[test]
    fn test_coin_form_distributes_and_returns() {
        let mut app = app_with(MemoryStore::with_party(create_sample_party()));
        app.open(MenuChoice::DistributeMoney);

        // Platinum, Gold, Electrum, Silver, Copper
        for amount in ["10", "8", "7", "5", "3"] {
            type_into(&mut app, amount);
            app.form.focus_next();
        }
        assert!(app.form.on_submit());
        app.submit_form();

        assert_eq!(app.screen, Screen::Menu);
        let keg = app.session.party().find("Keg").unwrap();
        assert_eq!(keg.coins.get(Denomination::Platinum), 4);
        assert!(app
            .notices
            .iter()
            .any(|n| n.kind == NoticeKind::Loot && n.content.starts_with("Keg receives")));
    }

    #[test]
    fn test_invalid_field_warns_and_counts_as_zero() {
        let mut app = app_with(MemoryStore::with_party(create_sample_party()));
        app.open(MenuChoice::DistributeExperience);
        type_into(&mut app, "lots");
        app.submit_form();

        assert!(app
            .status_message()
            .is_some_and(|s| s.contains("defaulting to 0")));
        assert_eq!(app.session.party().find("Keg").unwrap().xp, 0);
    }

    #[test]
    fn test_duplicate_name_stays_on_form() {
        let mut app = app_with(MemoryStore::with_party(create_sample_party()));
        app.open(MenuChoice::AddMember);
        type_into(&mut app, "Keg");
        app.form.focus = app.form.fields.len();
        app.submit_form();

        assert_eq!(app.screen, Screen::AddMember);
        assert_eq!(app.form.focus, 0);
        assert_eq!(app.session.party().active.len(), 3);
    }

    #[test]
    fn test_add_member_with_starting_purse() {
        let mut app = app_with(MemoryStore::new());
        app.open(MenuChoice::AddMember);
        type_into(&mut app, "Alice");
        app.form.focus_next();
        type_into(&mut app, "900");
        app.form.focus_next();
        app.form.focus_next();
        type_into(&mut app, "15");
        app.submit_form();

        let alice = app.session.party().find("Alice").unwrap();
        assert_eq!(alice.level, 3);
        assert_eq!(alice.coins.get(Denomination::Gold), 15);
        assert_eq!(app.screen, Screen::Menu);
    }

    #[test]
    fn test_toggle_selected_moves_and_clamps() {
        let mut app = app_with(MemoryStore::with_party(create_sample_party()));
        app.open(MenuChoice::ManageGroups);
        app.group_down();
        app.group_down();
        app.toggle_selected();

        let party = app.session.party();
        assert_eq!(party.group_of("Fred"), Some(Group::Inactive));
        assert_eq!(app.groups.active_selected, 1);

        app.switch_group_focus();
        app.toggle_selected();
        assert_eq!(app.session.party().group_of("Fred"), Some(Group::Active));
    }

    #[test]
    fn test_toggle_on_empty_group_is_reported() {
        let mut app = app_with(MemoryStore::with_party(create_sample_party()));
        app.open(MenuChoice::ManageGroups);
        app.switch_group_focus();
        app.toggle_selected();
        assert_eq!(app.status_message(), Some("No inactive members"));
    }

    #[test]
    fn test_quitting_after_unreadable_load_keeps_the_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let save_path = temp_dir.path().join("party.json");
        let original = r#"{"active":[{"name":"Keg","coins":{"Gold":900}}],}"#;
        std::fs::write(&save_path, original).unwrap();

        let config = party_core::PartyConfig::new().with_save_path(&save_path);
        let (session, outcome) = PartySession::open(&config);
        let mut app = App::new(session, &outcome);
        assert!(app.notices.iter().any(|n| n.kind == NoticeKind::Error));

        app.open(MenuChoice::SaveAndQuit);
        assert!(app.should_quit);
        assert!(!app.save_on_exit().unwrap());
        assert_eq!(std::fs::read_to_string(&save_path).unwrap(), original);
    }

    #[test]
    fn test_exit_save_writes_pending_changes() {
        let store = MemoryStore::with_party(create_sample_party());
        let (session, outcome) = PartySession::with_store(store.clone(), false);
        let mut app = App::new(session, &outcome);

        app.open(MenuChoice::ManageGroups);
        app.toggle_selected();
        assert_eq!(store.save_count(), 0);

        assert!(app.save_on_exit().unwrap());
        assert_eq!(store.save_count(), 1);
        assert!(!app.save_on_exit().unwrap());
    }

    #[test]
    fn test_failed_save_is_reported() {
        let store = MemoryStore::with_party(create_sample_party());
        let mut app = app_with(store.clone());
        store.fail_saves(true);

        app.open(MenuChoice::ManageGroups);
        app.save_and_return();

        assert_eq!(app.screen, Screen::Menu);
        assert_eq!(app.notices.last().map(|n| n.kind), Some(NoticeKind::Error));
    }
}
