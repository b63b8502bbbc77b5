/// Database models and scoped query operations
///
/// Each model owns its SQL. Authorization lives in the queries
/// themselves: project lookups filter by `owner_id`, task lookups join
/// through the parent project, so "absent" and "owned by someone else"
/// are indistinguishable at the call site.
pub mod project;
pub mod task;
pub mod user;

pub use project::{Project, ProjectData};
pub use task::{Page, Task, TaskData, TaskFilter, TaskSort};
pub use user::{CreateUser, User};
