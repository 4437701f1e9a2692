//! Principal resolution and the static access policy.
//!
//! `claims` turns inbound call metadata into a [`Claims`] principal;
//! `policy` declares which principals may run which operation on which
//! resource. The authorizing decorator combines the two.

pub mod claims;
pub mod policy;

pub use claims::{Claims, ClaimsResolver, JwtClaimsResolver, Owner, OwnerKind};
pub use policy::{Access, NamedRole, PivotPolicy, Policy, RoleNames};
