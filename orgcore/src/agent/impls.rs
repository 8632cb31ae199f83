use std::fmt::{
    Display,
    Formatter,
    Result,
};

use crate::user::User;
use super::Agent;

impl From<i64> for Agent {
    fn from(id: i64) -> Agent {
        Agent::User(id)
    }
}

impl From<Option<i64>> for Agent {
    fn from(id: Option<i64>) -> Agent {
        id.map(Agent::User)
            .unwrap_or(Agent::Anonymous)
    }
}

impl From<&User> for Agent {
    fn from(user: &User) -> Agent {
        Agent::User(user.id)
    }
}

impl From<Agent> for Option<i64> {
    fn from(agent: Agent) -> Self {
        match agent {
            Agent::Anonymous => None,
            Agent::User(id) => Some(id),
        }
    }
}

impl Display for Agent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Agent::Anonymous => f.write_str("anonymous"),
            Agent::User(id) => write!(f, "{id}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(Agent::from(Some(3)), Agent::User(3));
        assert_eq!(Agent::from(None::<i64>), Agent::Anonymous);
        assert_eq!(Option::<i64>::from(Agent::User(3)), Some(3));
        assert_eq!(Agent::Anonymous.to_string(), "anonymous");
        assert_eq!(Agent::User(42).to_string(), "42");
    }
}
