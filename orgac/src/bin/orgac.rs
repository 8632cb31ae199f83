use clap::{
    Parser,
    Subcommand,
};
use orgac::{
    platform::Builder as PlatformBuilder,
    seed::seed_directory,
    Platform,
};
use orgcore::{
    agent::Agent,
    audit::AuditEvent,
    decision::Requirement,
    platform::ConnectorOption,
    scope::Scope,
    traits::DirectoryAdminBackend,
};
use orgdb_sqlite::SqliteBackend;
use orgrbac::Builder as PolicyBuilder;
use std::{
    path::PathBuf,
    time::Instant,
};

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[clap(long, value_name = "ORGAC_DB_URL", env = "ORGAC_DB_URL")]
    orgac_db_url: String,
    /// File with the scope rules that replace the default ones
    #[clap(long, value_name = "ORGAC_SCOPE_RULES", env = "ORGAC_SCOPE_RULES")]
    scope_rules: Option<PathBuf>,
    /// File with the manage rules that replace the default ones
    #[clap(long, value_name = "ORGAC_MANAGE_RULES", env = "ORGAC_MANAGE_RULES")]
    manage_rules: Option<PathBuf>,
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Provision the sample organizations, roles and users
    Seed,
    #[command(arg_required_else_help = true)]
    Org {
        #[command(subcommand)]
        cmd: OrgCmd,
    },
    #[command(arg_required_else_help = true)]
    User {
        #[command(subcommand)]
        cmd: UserCmd,
    },
    #[command(arg_required_else_help = true)]
    Role {
        #[command(subcommand)]
        cmd: RoleCmd,
    },
    #[command(arg_required_else_help = true)]
    Permission {
        #[command(subcommand)]
        cmd: PermissionCmd,
    },
    #[command(arg_required_else_help = true)]
    Query {
        #[command(subcommand)]
        cmd: QueryCmd,
    },
    /// Decide whether the user may perform an action
    Authorize {
        action: String,
        resource: String,
        /// The email of the acting user; anonymous if omitted
        #[arg(long)]
        user: Option<String>,
        #[arg(long = "role")]
        roles: Vec<String>,
        #[arg(long = "permission")]
        permissions: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
enum OrgCmd {
    #[command(arg_required_else_help = true)]
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        parent: Option<i64>,
    },
    #[command(arg_required_else_help = true)]
    Check {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum UserCmd {
    #[command(arg_required_else_help = true)]
    Create {
        name: String,
        email: String,
        #[arg(long)]
        org: Option<i64>,
    },
    #[command(arg_required_else_help = true)]
    Org {
        email: String,
        org: Option<i64>,
    },
    #[command(arg_required_else_help = true)]
    Grant {
        email: String,
        role: String,
    },
    #[command(arg_required_else_help = true)]
    Revoke {
        email: String,
        role: String,
    },
}

#[derive(Debug, Subcommand)]
enum RoleCmd {
    #[command(arg_required_else_help = true)]
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Grant the permission to the role
    #[command(arg_required_else_help = true)]
    Permit {
        role: String,
        permission: String,
    },
    /// Revoke the permission from the role
    #[command(arg_required_else_help = true)]
    Forbid {
        role: String,
        permission: String,
    },
}

#[derive(Debug, Subcommand)]
enum PermissionCmd {
    #[command(arg_required_else_help = true)]
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum QueryCmd {
    #[command(arg_required_else_help = true)]
    Permissions {
        email: String,
    },
    #[command(arg_required_else_help = true)]
    Accessible {
        email: String,
        #[arg(value_enum)]
        scope: Scope,
    },
    #[command(arg_required_else_help = true)]
    OrgAccess {
        email: String,
        org: i64,
        #[arg(value_enum)]
        scope: Scope,
    },
    #[command(arg_required_else_help = true)]
    Hierarchy {
        email: String,
    },
    #[command(arg_required_else_help = true)]
    Manage {
        email: String,
        target: String,
    },
    #[command(arg_required_else_help = true)]
    Assignable {
        email: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    stderrlog::new()
        .module(module_path!())
        .module("orgdb_sqlite")
        .module("orgrbac")
        .verbosity((args.verbose as usize) + 1)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;

    let mut policy = PolicyBuilder::new();
    if let Some(path) = args.scope_rules {
        policy = policy.scope_rules_str(&std::fs::read_to_string(path)?)?;
    }
    if let Some(path) = args.manage_rules {
        policy = policy.manage_rules_str(&std::fs::read_to_string(path)?)?;
    }

    let backend = SqliteBackend::connect(
        ConnectorOption::from(args.orgac_db_url)
            .auto_create_db(true)
    )
        .await?
        .migrate()
        .await?;
    let platform = PlatformBuilder::new()
        .directory(backend.clone())
        .policy(policy.build())
        .build()?;

    match args.command {
        Commands::Seed => {
            let seeded = seed_directory(&backend).await?;
            println!("{seeded:?}");
        }
        Commands::Org { cmd } => {
            parse_org(&platform, &backend, cmd).await?;
        }
        Commands::User { cmd } => {
            parse_user(&backend, cmd).await?;
        }
        Commands::Role { cmd } => {
            parse_role(&backend, cmd).await?;
        }
        Commands::Permission { cmd } => {
            parse_permission(&backend, cmd).await?;
        }
        Commands::Query { cmd } => {
            parse_query(&platform, &backend, cmd).await?;
        }
        Commands::Authorize { action, resource, user, roles, permissions } => {
            let agent = match user {
                Some(email) => Agent::User(user_id(&backend, &email).await?),
                None => Agent::Anonymous,
            };
            let requirement = Requirement::new()
                .roles(roles)
                .permissions(permissions);
            let instant = Instant::now();
            let decision = platform.authorize(agent, &requirement).await;
            let elapsed = instant.elapsed();
            println!("{agent} {decision} for {action} on {resource}; took {elapsed:?}");
            let event = AuditEvent::from_decision(agent, action, resource, &decision);
            log::info!("{event}");
            println!("{}", serde_json::to_string(&event)?);
        }
    }

    Ok(())
}

async fn user_id(
    backend: &SqliteBackend,
    email: &str,
) -> anyhow::Result<i64> {
    Ok(backend.get_user_by_email(email).await?
        .ok_or_else(|| anyhow::anyhow!("no user with email {email:?}"))?
        .id)
}

async fn role_id(
    backend: &SqliteBackend,
    name: &str,
) -> anyhow::Result<i64> {
    Ok(backend.get_role_by_name(name).await?
        .ok_or_else(|| anyhow::anyhow!("no role named {name:?}"))?
        .id)
}

async fn permission_id(
    backend: &SqliteBackend,
    name: &str,
) -> anyhow::Result<i64> {
    Ok(backend.get_permission_by_name(name).await?
        .ok_or_else(|| anyhow::anyhow!("no permission named {name:?}"))?
        .id)
}

async fn parse_org(
    platform: &Platform,
    backend: &SqliteBackend,
    arg: OrgCmd,
) -> anyhow::Result<()> {
    match arg {
        OrgCmd::Create { name, description, parent } => {
            let id = backend.add_organization(&name, description.as_deref(), parent).await?;
            println!("organization {name:?} created with id {id}");
        }
        OrgCmd::Check { id } => {
            platform.check_organization_depth(id).await?;
            println!("organization {id} is within the two level hierarchy");
        }
    }
    Ok(())
}

async fn parse_user(
    backend: &SqliteBackend,
    arg: UserCmd,
) -> anyhow::Result<()> {
    match arg {
        UserCmd::Create { name, email, org } => {
            let id = backend.add_user(&name, &email, org).await?;
            println!("user {name:?} created with id {id}");
        }
        UserCmd::Org { email, org } => {
            let id = user_id(backend, &email).await?;
            backend.set_user_organization(id, org).await?;
            match org {
                Some(org) => println!("user {email} moved to organization {org}"),
                None => println!("user {email} removed from their organization"),
            }
        }
        UserCmd::Grant { email, role } => {
            let id = user_id(backend, &email).await?;
            if backend.grant_role_to_user(id, role_id(backend, &role).await?).await? {
                println!("role {role} granted to {email}");
            } else {
                println!("role {role} was already granted to {email}");
            }
        }
        UserCmd::Revoke { email, role } => {
            let id = user_id(backend, &email).await?;
            if backend.revoke_role_from_user(id, role_id(backend, &role).await?).await? {
                println!("role {role} revoked from {email}");
            } else {
                println!("{email} has no role {role} to be revoked");
            }
        }
    }
    Ok(())
}

async fn parse_role(
    backend: &SqliteBackend,
    arg: RoleCmd,
) -> anyhow::Result<()> {
    match arg {
        RoleCmd::Create { name, description } => {
            let id = backend.add_role(&name, description.as_deref()).await?;
            println!("role {name:?} created with id {id}");
        }
        RoleCmd::Permit { role, permission } => {
            let rid = role_id(backend, &role).await?;
            let pid = permission_id(backend, &permission).await?;
            if backend.grant_permission_to_role(rid, pid).await? {
                println!("permission {permission} granted to role {role}");
            } else {
                println!("role {role} already has permission {permission}");
            }
        }
        RoleCmd::Forbid { role, permission } => {
            let rid = role_id(backend, &role).await?;
            let pid = permission_id(backend, &permission).await?;
            if backend.revoke_permission_from_role(rid, pid).await? {
                println!("permission {permission} revoked from role {role}");
            } else {
                println!("role {role} has no permission {permission} to be revoked");
            }
        }
    }
    Ok(())
}

async fn parse_permission(
    backend: &SqliteBackend,
    arg: PermissionCmd,
) -> anyhow::Result<()> {
    match arg {
        PermissionCmd::Create { name, description } => {
            let id = backend.add_permission(&name, description.as_deref()).await?;
            println!("permission {name:?} created with id {id}");
        }
    }
    Ok(())
}

async fn parse_query(
    platform: &Platform,
    backend: &SqliteBackend,
    arg: QueryCmd,
) -> anyhow::Result<()> {
    match arg {
        QueryCmd::Permissions { email } => {
            let id = user_id(backend, &email).await?;
            let permissions = platform.get_user_permissions(id).await;
            println!("{}", serde_json::to_string(&permissions)?);
        }
        QueryCmd::Accessible { email, scope } => {
            let id = user_id(backend, &email).await?;
            let ids = platform.get_accessible_user_ids(id, scope).await;
            println!("{}", serde_json::to_string(&ids)?);
        }
        QueryCmd::OrgAccess { email, org, scope } => {
            let id = user_id(backend, &email).await?;
            let access = platform.can_access_organization(id, org, scope).await;
            println!("{email} access to organization {org} under scope {scope}: {access}");
        }
        QueryCmd::Hierarchy { email } => {
            let id = user_id(backend, &email).await?;
            let hierarchy = platform.get_organization_hierarchy(id).await;
            println!("{}", serde_json::to_string_pretty(&hierarchy)?);
        }
        QueryCmd::Manage { email, target } => {
            let id = user_id(backend, &email).await?;
            let target_id = user_id(backend, &target).await?;
            let manage = platform.can_manage_user(id, target_id).await;
            println!("{email} may manage {target}: {manage}");
        }
        QueryCmd::Assignable { email } => {
            let id = user_id(backend, &email).await?;
            let users = platform.get_assignable_users(id).await?;
            println!("{}", serde_json::to_string_pretty(&users)?);
        }
    }
    Ok(())
}
