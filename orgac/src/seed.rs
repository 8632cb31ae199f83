//! Provisions a directory with the sample organizations, roles and
//! users the engine is demonstrated with.

use orgcore::{
    error::BackendError,
    permission::{
        CREATE_TASK,
        DELETE_TASK,
        READ_TASK,
        UPDATE_TASK,
        VIEW_AUDIT_LOG,
    },
    role::{
        ADMIN,
        OWNER,
        VIEWER,
    },
    traits::DirectoryAdminBackend,
};

const PERMISSIONS: [(&str, &str); 5] = [
    (CREATE_TASK, "Create new tasks"),
    (READ_TASK, "View tasks"),
    (UPDATE_TASK, "Edit tasks"),
    (DELETE_TASK, "Delete tasks"),
    (VIEW_AUDIT_LOG, "View audit logs"),
];

// role, description, permissions granted
const ROLES: [(&str, &str, &[&str]); 3] = [
    (
        OWNER,
        "Organization owner with full access",
        &[CREATE_TASK, READ_TASK, UPDATE_TASK, DELETE_TASK, VIEW_AUDIT_LOG],
    ),
    (
        ADMIN,
        "Administrator with task management access",
        &[CREATE_TASK, READ_TASK, UPDATE_TASK, DELETE_TASK],
    ),
    (
        VIEWER,
        "View-only access to tasks",
        &[READ_TASK],
    ),
];

/// The ids of the organizations and users created by [`seed_directory`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Seeded {
    pub root_org: i64,
    pub sub_org: i64,
    pub owner: i64,
    pub admin: i64,
    pub viewer: i64,
}

async fn role_id(
    backend: &(dyn DirectoryAdminBackend + Send + Sync),
    name: &str,
) -> Result<i64, BackendError> {
    backend.get_role_by_name(name).await?
        .map(|role| role.id)
        .ok_or_else(|| BackendError::AppInvariantViolation(
            format!("role {name:?} missing after creation")
        ))
}

async fn add_user(
    backend: &(dyn DirectoryAdminBackend + Send + Sync),
    name: &str,
    email: &str,
    organization_id: i64,
    role: &str,
) -> Result<i64, BackendError> {
    let id = backend.add_user(name, email, Some(organization_id)).await?;
    backend.grant_role_to_user(id, role_id(backend, role).await?).await?;
    log::info!("created user {email} with role {role}");
    Ok(id)
}

pub async fn seed_directory(
    backend: &(dyn DirectoryAdminBackend + Send + Sync),
) -> Result<Seeded, BackendError> {
    let mut permission_ids = Vec::with_capacity(PERMISSIONS.len());
    for (name, description) in PERMISSIONS {
        let id = backend.add_permission(name, Some(description)).await?;
        log::info!("created permission {name}");
        permission_ids.push((name, id));
    }

    for (name, description, granted) in ROLES {
        let id = backend.add_role(name, Some(description)).await?;
        for (permission, permission_id) in permission_ids.iter() {
            if granted.contains(permission) {
                backend.grant_permission_to_role(id, *permission_id).await?;
            }
        }
        log::info!("created role {name}");
    }

    let root_org = backend.add_organization(
        "Acme Corp",
        Some("Main organization"),
        None,
    ).await?;
    let sub_org = backend.add_organization(
        "Engineering Team",
        Some("Engineering department"),
        Some(root_org),
    ).await?;
    log::info!("created organizations {root_org} and {sub_org}");

    let owner = add_user(backend, "John Owner", "owner@example.com", root_org, OWNER).await?;
    let admin = add_user(backend, "Jane Admin", "admin@example.com", root_org, ADMIN).await?;
    let viewer = add_user(backend, "Bob Viewer", "viewer@example.com", sub_org, VIEWER).await?;

    Ok(Seeded {
        root_org,
        sub_org,
        owner,
        admin,
        viewer,
    })
}
