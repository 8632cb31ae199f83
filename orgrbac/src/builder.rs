use orgcore::{
    role::{ADMIN, OWNER},
    scope::Scope,
};
use std::str::FromStr;

use crate::{
    error::Error,
    policy::{
        ManageRule,
        Policy,
        Reach,
        ScopeRule,
    },
};

/// The default scope rules.
///
/// The fields are comma separated in the form of: role, scope
///
/// role - the name of the role held by the user
/// scope - one of own, sub, all
///
/// Rules are evaluated top-down; the first rule for a role the user
/// holds is the one applied.
pub const DEFAULT_SCOPE_RULES: &str = "\
owner, all     # owners may reach every organization
admin, sub     # admins reach their own and all sub-organizations
";

/// The default manage rules.
///
/// The fields are comma separated in the form of: role, reach
///
/// role - the name of the role held by the user
/// reach - everyone, or one of own, sub, all which refer to the users
///         resolved for that scope
///
/// A user without a matching rule may only manage themselves.
pub const DEFAULT_MANAGE_RULES: &str = "\
owner, everyone
admin, sub
";

/// Builds the authorization [`Policy`].
///
/// Methods can be chained in order to set the configuration values.
/// The `Policy` is constructed by calling [`Builder::build`].
///
/// New instances of the builder can be obtained via `Builder::default`
/// or `Builder::new`.  The former provides nothing, such that every
/// user is confined to themselves, while the latter provides the
/// default policy.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    scope_rules: Vec<ScopeRule>,
    fallback_scope: Scope,
    cross_org_roles: Vec<String>,
    manage_rules: Vec<ManageRule>,
}

fn parse_rules<T>(text: &str) -> Result<Vec<(String, T)>, Error>
where
    T: FromStr,
{
    text.lines()
        .enumerate()
        .filter_map(|(n, line)| {
            let line = line.split('#')
                .next()
                .unwrap_or_default()
                .trim();
            (!line.is_empty()).then_some((n + 1, line))
        })
        .map(|(line, text)| {
            let malformed = || Error::Rule { line, text: text.to_string() };
            match text.split(',').map(str::trim).collect::<Vec<_>>()[..] {
                [role, target] if !role.is_empty() => Ok((
                    role.to_string(),
                    T::from_str(target).map_err(|_| malformed())?,
                )),
                _ => Err(malformed()),
            }
        })
        .collect()
}

impl Builder {
    pub fn new() -> Self {
        Self {
            fallback_scope: Scope::Own,
            cross_org_roles: vec![OWNER.to_string(), ADMIN.to_string()],
            .. Default::default()
        }
            .scope_rule(OWNER, Scope::All)
            .scope_rule(ADMIN, Scope::Sub)
            .manage_rule(OWNER, Reach::Everyone)
            .manage_rule(ADMIN, Reach::Scope(Scope::Sub))
    }

    /// Append a scope rule; it is evaluated after the existing ones.
    pub fn scope_rule(mut self, role: impl Into<String>, scope: Scope) -> Self {
        self.scope_rules.push(ScopeRule {
            role: role.into(),
            scope,
        });
        self
    }

    /// Replace all scope rules with the ones parsed from the text.
    pub fn scope_rules_str(mut self, text: &str) -> Result<Self, Error> {
        self.scope_rules = parse_rules::<Scope>(text)?
            .into_iter()
            .map(|(role, scope)| ScopeRule { role, scope })
            .collect();
        log::debug!("loaded {} scope rule(s)", self.scope_rules.len());
        Ok(self)
    }

    pub fn fallback_scope(mut self, val: Scope) -> Self {
        self.fallback_scope = val;
        self
    }

    pub fn cross_org_role(mut self, role: impl Into<String>) -> Self {
        self.cross_org_roles.push(role.into());
        self
    }

    pub fn clear_cross_org_roles(mut self) -> Self {
        self.cross_org_roles.clear();
        self
    }

    /// Append a manage rule; it is evaluated after the existing ones.
    pub fn manage_rule(mut self, role: impl Into<String>, reach: Reach) -> Self {
        self.manage_rules.push(ManageRule {
            role: role.into(),
            reach,
        });
        self
    }

    /// Replace all manage rules with the ones parsed from the text.
    pub fn manage_rules_str(mut self, text: &str) -> Result<Self, Error> {
        self.manage_rules = parse_rules::<Reach>(text)?
            .into_iter()
            .map(|(role, reach)| ManageRule { role, reach })
            .collect();
        log::debug!("loaded {} manage rule(s)", self.manage_rules.len());
        Ok(self)
    }

    pub fn build(&self) -> Policy {
        log::trace!("building policy from {self:?}");
        Policy {
            scope_rules: self.scope_rules.clone(),
            fallback_scope: self.fallback_scope,
            cross_org_roles: self.cross_org_roles.clone(),
            manage_rules: self.manage_rules.clone(),
        }
    }
}
