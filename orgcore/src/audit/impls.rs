use std::fmt::{
    self,
    Display,
    Formatter,
};

use crate::{
    chrono::Utc,
    decision::Decision,
};
use super::*;

impl AuditEvent {
    pub fn new(
        agent: impl Into<Agent>,
        action: impl Into<String>,
        resource: impl Into<String>,
        outcome: Outcome,
    ) -> Self {
        Self {
            timestamp: Utc::now().timestamp(),
            agent: agent.into(),
            action: action.into(),
            resource: resource.into(),
            outcome,
            detail: None,
            origin: None,
            client: None,
        }
    }

    /// An event reporting the decision made for the agent; denials
    /// carry the reason as the detail.
    pub fn from_decision(
        agent: impl Into<Agent>,
        action: impl Into<String>,
        resource: impl Into<String>,
        decision: &Decision,
    ) -> Self {
        match decision {
            Decision::Allow => Self::new(agent, action, resource, Outcome::Success),
            Decision::Deny(denial) => Self::new(agent, action, resource, Outcome::Denied)
                .detail(serde_json::json!({ "reason": denial.to_string() })),
        }
    }

    pub fn detail(mut self, val: serde_json::Value) -> Self {
        self.detail = Some(val);
        self
    }

    pub fn origin(mut self, val: impl Into<String>) -> Self {
        self.origin = Some(val.into());
        self
    }

    pub fn client(mut self, val: impl Into<String>) -> Self {
        self.client = Some(val.into());
        self
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
            Outcome::Denied => "denied",
        })
    }
}

impl Display for AuditEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[AUDIT] {} - User {} {} {} - {}",
            self.timestamp,
            self.agent,
            self.action,
            self.resource,
            self.outcome,
        )
    }
}

#[cfg(test)]
mod test {
    use crate::decision::Denial;
    use super::*;

    #[test]
    fn from_decision() -> anyhow::Result<()> {
        let event = AuditEvent::from_decision(
            3,
            "create",
            "tasks",
            &Denial::MissingPermission(vec!["create_task".into()]).into(),
        )
            .origin("127.0.0.1")
            .client("curl/8.0");
        assert_eq!(event, serde_json::from_str(r#"{
            "timestamp": 1234567890,
            "agent": {"User": 3},
            "action": "create",
            "resource": "tasks",
            "outcome": "denied",
            "detail": {"reason": "missing required permission: create_task"},
            "origin": "127.0.0.1",
            "client": "curl/8.0"
        }"#)?);
        assert_eq!(
            event.to_string(),
            "[AUDIT] 1234567890 - User 3 create tasks - denied",
        );

        let event = AuditEvent::from_decision(
            Agent::Anonymous,
            "read",
            "tasks",
            &Decision::Allow,
        );
        assert_eq!(event.outcome, Outcome::Success);
        assert_eq!(event.detail, None);
        assert_eq!(
            event.to_string(),
            "[AUDIT] 1234567890 - User anonymous read tasks - success",
        );
        Ok(())
    }
}
