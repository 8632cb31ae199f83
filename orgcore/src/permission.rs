use serde::{Deserialize, Serialize};

pub const CREATE_TASK: &str = "create_task";
pub const READ_TASK: &str = "read_task";
pub const UPDATE_TASK: &str = "update_task";
pub const DELETE_TASK: &str = "delete_task";
pub const VIEW_AUDIT_LOG: &str = "view_audit_log";

#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct Permission {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}
