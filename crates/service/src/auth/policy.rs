use crate::auth::claims::Claims;
use crate::errors::Operation;

/// Named non-admin roles the policy table refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedRole {
    Candidate,
}

/// Who may run one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, no claims are resolved.
    Public,
    Admin,
    /// Admin or a principal holding the named role. Ownership is not considered.
    AdminOrRole(NamedRole),
    /// Admin, or a principal owning the entity the call targets.
    AdminOrOwner,
}

impl Access {
    pub fn accepts_owner(self) -> bool { matches!(self, Access::AdminOrOwner) }
}

/// Per-operation rules of a business resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub create: Access,
    pub get: Access,
    pub list: Access,
    pub update: Access,
    pub delete: Access,
}

impl Policy {
    pub const fn uniform(access: Access) -> Self {
        Self { create: access, get: access, list: access, update: access, delete: access }
    }

    pub fn rule(&self, op: Operation) -> Access {
        match op {
            Operation::Create => self.create,
            Operation::Get => self.get,
            Operation::List => self.list,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
        }
    }
}

/// Rules of a pivot association. Pivots have no list or update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PivotPolicy {
    pub create: Access,
    pub find: Access,
    pub delete: Access,
}

/// Concrete role names, taken from `[auth]` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleNames {
    pub admin: String,
    pub candidate: String,
}

impl RoleNames {
    pub fn from_config(cfg: &configs::AuthConfig) -> Self {
        Self { admin: cfg.admin_role.clone(), candidate: cfg.candidate_role.clone() }
    }

    fn name(&self, role: NamedRole) -> &str {
        match role {
            NamedRole::Candidate => &self.candidate,
        }
    }

    pub fn is_admin(&self, claims: &Claims) -> bool { claims.has_role(&self.admin) }

    /// Whether the principal's roles alone satisfy `access`.
    pub fn granted_by_role(&self, access: Access, claims: &Claims) -> bool {
        match access {
            Access::Public => true,
            Access::Admin | Access::AdminOrOwner => self.is_admin(claims),
            Access::AdminOrRole(role) => self.is_admin(claims) || claims.has_role(self.name(role)),
        }
    }
}

impl Default for RoleNames {
    fn default() -> Self { Self::from_config(&configs::AuthConfig::default()) }
}
