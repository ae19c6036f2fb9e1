//! # Programidex Menu
//!
//! File: cli/src/commands/scaffold/menu.rs
//!
//! ## Overview
//!
//! The menu shown for initialized projects. Choices are keyed `1` to `6`;
//! which ones are legal depends on the project state:
//!
//! - repository setup (`6`) only while the project is incomplete;
//! - nothing at all for an uninitialized project, which gets first run instead.
//!
//! Input that does not name a legal choice parses to `None` and the caller
//! redisplays the menu.
//!
use crate::commands::scaffold::reconciler::ProjectState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    InstallModule,
    ViewConfig,
    Exit,
    InstallSite,
    CheckAndRepair,
    SetUpRepository,
}

impl MenuAction {
    const ALL: [MenuAction; 6] = [
        MenuAction::InstallModule,
        MenuAction::ViewConfig,
        MenuAction::Exit,
        MenuAction::InstallSite,
        MenuAction::CheckAndRepair,
        MenuAction::SetUpRepository,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            MenuAction::InstallModule => "1",
            MenuAction::ViewConfig => "2",
            MenuAction::Exit => "3",
            MenuAction::InstallSite => "4",
            MenuAction::CheckAndRepair => "5",
            MenuAction::SetUpRepository => "6",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::InstallModule => "Install a new module into the DEX",
            MenuAction::ViewConfig => "View current config",
            MenuAction::Exit => "Exit",
            MenuAction::InstallSite => "Install a Hugo site",
            MenuAction::CheckAndRepair => "Check and repair project layout",
            MenuAction::SetUpRepository => "Set up GitHub repository",
        }
    }
}

/// Actions offered in `state`, in menu order.
pub fn legal_actions(state: ProjectState) -> Vec<MenuAction> {
    MenuAction::ALL
        .into_iter()
        .filter(|action| match action {
            MenuAction::SetUpRepository => state == ProjectState::InitializedIncomplete,
            _ => state != ProjectState::Uninitialized,
        })
        .collect()
}

/// Maps operator input to a legal action; `None` for anything else.
pub fn parse_menu_choice(input: &str, state: ProjectState) -> Option<MenuAction> {
    let input = input.trim();
    legal_actions(state)
        .into_iter()
        .find(|action| action.key() == input)
}

/// Menu text (without the trailing prompt).
pub fn render_menu(state: ProjectState) -> String {
    let mut text = String::from("\nPortfoliDEX Project Detected.\n");
    for action in legal_actions(state) {
        text.push_str(&format!("{}. {}\n", action.key(), action.label()));
    }
    text.pop();
    text
}

/// The prompt shown under the menu, e.g. `Choose an option [1-5]: `.
pub fn menu_prompt(state: ProjectState) -> String {
    format!("Choose an option [1-{}]: ", legal_actions(state).len())
}
