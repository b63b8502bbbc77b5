/// Route handlers
///
/// - `root`: liveness endpoint
/// - `auth`: registration and login
/// - `projects`: owner-scoped project CRUD
/// - `tasks`: ownership-transitive task CRUD + filtered listing
pub mod auth;
pub mod projects;
pub mod root;
pub mod tasks;
