//! Display model for a single user.

use serde::Serialize;

use crate::constants::{ADDRESS_SEPARATOR, HANDLE_PREFIX, NOT_AVAILABLE};
use crate::user::{Address, User};

/// Flattened, display-ready view of a [`User`].
///
/// Absent optional fields are rendered as `"N/A"` so callers never deal with
/// `Option` when presenting a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDetail {
    pub id: i64,
    pub name: String,
    /// Username prefixed with `@`
    pub handle: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub company_name: String,
}

impl From<&User> for UserDetail {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            handle: format!("{}{}", HANDLE_PREFIX, user.username),
            email: user.email.clone(),
            address: format_address(user.address.as_ref()),
            phone: or_not_available(user.phone.as_deref()),
            website: or_not_available(user.website.as_deref()),
            company_name: or_not_available(
                user.company.as_ref().and_then(|c| c.name.as_deref()),
            ),
        }
    }
}

impl std::fmt::Display for UserDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} ({})", self.name, self.handle)?;
        writeln!(f, "  id:      {}", self.id)?;
        writeln!(f, "  email:   {}", self.email)?;
        writeln!(f, "  address: {}", self.address)?;
        writeln!(f, "  phone:   {}", self.phone)?;
        writeln!(f, "  website: {}", self.website)?;
        write!(f, "  company: {}", self.company_name)
    }
}

/// Join the present address parts; geo coordinates are not shown.
fn format_address(address: Option<&Address>) -> String {
    let Some(address) = address else {
        return NOT_AVAILABLE.to_string();
    };

    [
        address.street.as_deref(),
        address.suite.as_deref(),
        address.city.as_deref(),
        address.zipcode.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(ADDRESS_SEPARATOR)
}

fn or_not_available(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}
