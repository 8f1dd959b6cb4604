//! Collection name constants.

pub const ORGANIZATIONS: &str = "organizations";
pub const USERS: &str = "users";
pub const PROJECTS: &str = "projects";
pub const STORIES: &str = "stories";
pub const TASKS: &str = "tasks";
pub const TEAM_MEMBERS: &str = "team_members";
pub const DEPARTMENTS: &str = "departments";
pub const ACTION_HISTORY: &str = "action_history";
