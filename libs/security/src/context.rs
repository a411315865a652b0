use uuid::Uuid;

use crate::{Role, Subject};

/// Caller identity for one request: the subject plus its platform role set.
///
/// Built once at the request boundary and passed by reference through every
/// access-control call.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct UserContext {
    subject: Subject,
    roles: Vec<Role>,
}

impl UserContext {
    /// Create a new `UserContext` builder.
    #[must_use]
    pub fn builder() -> UserContextBuilder {
        UserContextBuilder::default()
    }

    /// Context for a caller with no identity and no roles.
    #[must_use]
    pub fn anonymous() -> Self {
        UserContextBuilder::default().build()
    }

    #[inline]
    #[must_use]
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    #[inline]
    #[must_use]
    pub fn subject_id(&self) -> Uuid {
        self.subject.id()
    }

    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// The unconditional platform-administrator bypass. Every filtering
    /// surface checks this before anything else.
    #[must_use]
    pub fn is_administrator(&self) -> bool {
        self.has_role(Role::Administrator)
    }
}

#[derive(Default)]
pub struct UserContextBuilder {
    subject_id: Option<Uuid>,
    roles: Vec<Role>,
}

impl UserContextBuilder {
    #[must_use]
    pub fn subject_id(mut self, subject_id: Uuid) -> Self {
        self.subject_id = Some(subject_id);
        self
    }

    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self
    }

    #[must_use]
    pub fn build(self) -> UserContext {
        UserContext {
            subject: Subject::new(self.subject_id.unwrap_or_default()),
            roles: self.roles,
        }
    }
}
