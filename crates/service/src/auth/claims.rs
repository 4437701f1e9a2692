use std::collections::BTreeSet;

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::context::{CallContext, AUTHORIZATION};
use crate::errors::ServiceError;

/// Entity family an owner reference points into. Candidate 7 and company 7
/// are different owners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerKind {
    Candidate,
    Company,
}

impl OwnerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OwnerKind::Candidate => "candidate",
            OwnerKind::Company => "company",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "candidate" => Some(OwnerKind::Candidate),
            "company" => Some(OwnerKind::Company),
            _ => None,
        }
    }
}

/// Owner reference of a record or a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Owner {
    pub kind: OwnerKind,
    pub id: i64,
}

impl Owner {
    pub const fn candidate(id: i64) -> Self { Self { kind: OwnerKind::Candidate, id } }

    pub const fn company(id: i64) -> Self { Self { kind: OwnerKind::Company, id } }
}

/// The authenticated principal behind one call. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub subject_id: u64,
    pub roles: BTreeSet<String>,
    /// Id of the entity this principal owns (its own candidate or company row).
    pub owned_entity_id: Option<u64>,
    pub owned_kind: OwnerKind,
}

impl Claims {
    /// A principal owning the candidate row with its own id.
    pub fn new(subject_id: u64, roles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            subject_id,
            roles: roles.into_iter().map(Into::into).collect(),
            owned_entity_id: Some(subject_id),
            owned_kind: OwnerKind::Candidate,
        }
    }

    pub fn with_owned_kind(mut self, kind: OwnerKind) -> Self {
        self.owned_kind = kind;
        self
    }

    pub fn has_role(&self, role: &str) -> bool { self.roles.contains(role) }

    /// True when the principal owns the entity referenced by `owner`: same
    /// family and same id. An unknown owner is never owned.
    pub fn owns(&self, owner: Option<Owner>) -> bool {
        let Some(owner) = owner else { return false };
        match (self.owned_entity_id, u64::try_from(owner.id).ok()) {
            (Some(mine), Some(theirs)) => owner.kind == self.owned_kind && mine == theirs,
            _ => false,
        }
    }
}

/// Produces the principal for a call from its metadata.
pub trait ClaimsResolver: Send + Sync {
    fn resolve(&self, ctx: &CallContext) -> Result<Claims, ServiceError>;
}

/// Reads a bearer JWT issued by the upstream identity provider.
///
/// The token signature is NOT verified here: the gateway in front of this
/// service has already authenticated the caller and only forwards tokens it
/// accepted. Deploying without such a gateway lets any caller forge claims.
pub struct JwtClaimsResolver {
    identity_claim: String,
    roles_claim: String,
    owner_kind_claim: String,
    validation: Validation,
    key: DecodingKey,
}

impl JwtClaimsResolver {
    pub fn new(cfg: &configs::AuthConfig) -> Self {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        warn!(
            identity_claim = %cfg.identity_claim,
            roles_claim = %cfg.roles_claim,
            "jwt signatures are not verified; the upstream gateway must authenticate callers"
        );
        Self {
            identity_claim: cfg.identity_claim.clone(),
            roles_claim: cfg.roles_claim.clone(),
            owner_kind_claim: cfg.owner_kind_claim.clone(),
            validation,
            key: DecodingKey::from_secret(&[]),
        }
    }

    fn bearer<'a>(&self, ctx: &'a CallContext) -> Result<&'a str, ServiceError> {
        let header = ctx
            .metadata(AUTHORIZATION)
            .ok_or_else(|| ServiceError::Unauthenticated("missing authorization metadata".into()))?;
        let (scheme, token) = header
            .trim()
            .split_once(' ')
            .ok_or_else(|| ServiceError::Unauthenticated("malformed authorization metadata".into()))?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(ServiceError::Unauthenticated(format!("unsupported authorization scheme {scheme}")));
        }
        let token = token.trim();
        if token.is_empty() {
            return Err(ServiceError::Unauthenticated("empty bearer token".into()));
        }
        Ok(token)
    }

    /// Row ids start at 1, so 0 never names a principal and is rejected
    /// like a missing claim.
    fn identity(&self, claims: &Map<String, Value>) -> Result<u64, ServiceError> {
        let id = match claims.get(&self.identity_claim) {
            Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
            Some(Value::Number(n)) => n.as_u64(),
            _ => None,
        };
        match id {
            Some(id) if id > 0 => Ok(id),
            _ => Err(ServiceError::Unauthenticated(format!("claim {} missing or not an id", self.identity_claim))),
        }
    }

    fn roles(&self, claims: &Map<String, Value>) -> BTreeSet<String> {
        match claims.get(&self.roles_claim) {
            Some(Value::Array(items)) => items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect(),
            _ => BTreeSet::new(),
        }
    }

    /// Absent means the principal is a candidate.
    fn owned_kind(&self, claims: &Map<String, Value>) -> Result<OwnerKind, ServiceError> {
        match claims.get(&self.owner_kind_claim) {
            None | Some(Value::Null) => Ok(OwnerKind::Candidate),
            Some(Value::String(s)) => OwnerKind::parse(s)
                .ok_or_else(|| ServiceError::Unauthenticated(format!("claim {} names unknown kind {s}", self.owner_kind_claim))),
            Some(_) => Err(ServiceError::Unauthenticated(format!("claim {} is not a string", self.owner_kind_claim))),
        }
    }
}

impl ClaimsResolver for JwtClaimsResolver {
    fn resolve(&self, ctx: &CallContext) -> Result<Claims, ServiceError> {
        let token = self.bearer(ctx)?;
        let data = decode::<Map<String, Value>>(token, &self.key, &self.validation)
            .map_err(|e| ServiceError::Unauthenticated(format!("undecodable token: {e}")))?;
        let subject_id = self.identity(&data.claims)?;
        let roles = self.roles(&data.claims);
        let owned_kind = self.owned_kind(&data.claims)?;
        debug!(subject_id, roles = ?roles, owned_kind = owned_kind.as_str(), "claims resolved");
        Ok(Claims { subject_id, roles, owned_entity_id: Some(subject_id), owned_kind })
    }
}
