// crates/reqres-contract/src/registry.rs
// ============================================================================
// Module: Contract Registry
// Description: Named ReqRes contracts built once at first use.
// Purpose: Provide the canonical request and response shapes for the suite.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Every ReqRes body the suite sends or receives has exactly one
//! [`ContractName`]. The registry holds one immutable [`Contract`] per name,
//! indexed by [`ContractName::index`], and is shared process-wide through
//! [`contracts`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde_json::Value;

use crate::ContractError;
use crate::SchemaValidationError;
use crate::matcher::check;
use crate::shape::ObjectShape;
use crate::shape::Shape;

// ============================================================================
// SECTION: Contract Names
// ============================================================================

/// Canonical contract identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContractName {
    /// Paginated `GET /users` response.
    UserList,
    /// Error response carrying a single `error` string.
    Error,
    /// Successful `POST /register` response.
    RegisterSuccess,
    /// Successful `PUT /users/{id}` response.
    UpdateSuccess,
    /// `GET /users/{id}` response.
    SingleUser,
    /// `POST /users` request body.
    CreateUserRequest,
    /// `PUT /users/{id}` request body.
    UpdateUserRequest,
    /// `POST /register` request body.
    RegisterRequest,
    /// Successful `POST /users` response.
    CreateUserResponse,
}

impl ContractName {
    /// Every contract name, ordered by [`ContractName::index`].
    pub const ALL: [Self; 9] = [
        Self::UserList,
        Self::Error,
        Self::RegisterSuccess,
        Self::UpdateSuccess,
        Self::SingleUser,
        Self::CreateUserRequest,
        Self::UpdateUserRequest,
        Self::RegisterRequest,
        Self::CreateUserResponse,
    ];

    /// Returns the stable kebab-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserList => "user-list",
            Self::Error => "error",
            Self::RegisterSuccess => "register-success",
            Self::UpdateSuccess => "update-success",
            Self::SingleUser => "single-user",
            Self::CreateUserRequest => "create-user-request",
            Self::UpdateUserRequest => "update-user-request",
            Self::RegisterRequest => "register-request",
            Self::CreateUserResponse => "create-user-response",
        }
    }

    /// Returns the position of this name in [`ContractName::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::UserList => 0,
            Self::Error => 1,
            Self::RegisterSuccess => 2,
            Self::UpdateSuccess => 3,
            Self::SingleUser => 4,
            Self::CreateUserRequest => 5,
            Self::UpdateUserRequest => 6,
            Self::RegisterRequest => 7,
            Self::CreateUserResponse => 8,
        }
    }
}

impl fmt::Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractName {
    type Err = ContractError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == label)
            .ok_or_else(|| ContractError::UnknownContract(label.to_string()))
    }
}

// ============================================================================
// SECTION: Contracts
// ============================================================================

/// A named, immutable structural rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    /// Contract identifier.
    name: ContractName,
    /// Root shape of the document.
    root: Shape,
}

impl Contract {
    /// Creates a contract from a name and root shape.
    #[must_use]
    pub const fn new(name: ContractName, root: Shape) -> Self {
        Self {
            name,
            root,
        }
    }

    /// Builds the canonical definition for `name`.
    #[must_use]
    pub fn standard(name: ContractName) -> Self {
        let root = match name {
            ContractName::UserList => user_list_shape(),
            ContractName::Error => ObjectShape::new().required("error", Shape::string()).into(),
            ContractName::RegisterSuccess => ObjectShape::new()
                .required("id", Shape::Integer)
                .required("token", Shape::string())
                .into(),
            ContractName::UpdateSuccess => ObjectShape::new()
                .optional("name", Shape::string())
                .optional("job", Shape::string())
                .required("updatedAt", Shape::string())
                .into(),
            ContractName::SingleUser => {
                ObjectShape::new().required("data", user_summary_shape()).into()
            }
            ContractName::CreateUserRequest | ContractName::UpdateUserRequest => ObjectShape::new()
                .required("name", Shape::string())
                .required("job", Shape::string())
                .into(),
            ContractName::RegisterRequest => ObjectShape::new()
                .required("email", Shape::string())
                .required("password", Shape::string())
                .into(),
            ContractName::CreateUserResponse => ObjectShape::new()
                .required("id", Shape::AnyOf(vec![Shape::Integer, Shape::string()]))
                .optional("name", Shape::string())
                .optional("job", Shape::string())
                .required("createdAt", Shape::string())
                .into(),
        };
        Self::new(name, root)
    }

    /// Returns the contract name.
    #[must_use]
    pub const fn name(&self) -> ContractName {
        self.name
    }

    /// Returns the root shape.
    #[must_use]
    pub const fn root(&self) -> &Shape {
        &self.root
    }

    /// Validates an instance against this contract.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError`] listing every violation found.
    pub fn validate(&self, instance: &Value) -> Result<(), SchemaValidationError> {
        let violations = check(&self.root, instance);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError {
                contract: self.name,
                violations,
            })
        }
    }
}

/// Shape shared by list entries and single-user lookups.
fn user_summary_shape() -> Shape {
    ObjectShape::new()
        .required("id", Shape::Integer)
        .required("email", Shape::email())
        .required("first_name", Shape::non_empty_string())
        .required("last_name", Shape::non_empty_string())
        .optional("avatar", Shape::string())
        .into()
}

/// Paginated user list shape.
fn user_list_shape() -> Shape {
    ObjectShape::new()
        .required("page", Shape::Integer)
        .required("per_page", Shape::Integer)
        .required("total", Shape::Integer)
        .required("total_pages", Shape::Integer)
        .required("data", Shape::array_of(user_summary_shape()))
        .into()
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Immutable set of every canonical contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractRegistry {
    /// Contracts indexed by [`ContractName::index`].
    contracts: [Contract; ContractName::ALL.len()],
}

impl ContractRegistry {
    /// Builds the registry of canonical contracts.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            contracts: ContractName::ALL.map(Contract::standard),
        }
    }

    /// Returns the contract registered under `name`.
    #[must_use]
    pub fn get(&self, name: ContractName) -> &Contract {
        &self.contracts[name.index()]
    }

    /// Looks up a contract by its kebab-case label.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::UnknownContract`] for unregistered labels.
    pub fn by_label(&self, label: &str) -> Result<&Contract, ContractError> {
        label.parse().map(|name| self.get(name))
    }

    /// Validates an instance against the named contract.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError`] when the instance does not conform.
    pub fn validate(
        &self,
        instance: &Value,
        name: ContractName,
    ) -> Result<(), SchemaValidationError> {
        self.get(name).validate(instance)
    }

    /// Iterates contracts in [`ContractName::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = &Contract> {
        self.contracts.iter()
    }
}

impl Default for ContractRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Returns the process-wide canonical registry, building it on first use.
#[must_use]
pub fn contracts() -> &'static ContractRegistry {
    static REGISTRY: OnceLock<ContractRegistry> = OnceLock::new();
    REGISTRY.get_or_init(ContractRegistry::standard)
}
