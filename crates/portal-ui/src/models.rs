//! Shared DTOs re-exported from `portal-api-models`, plus display helpers used by views.

pub use portal_api_models::{ErrorBody, LoginRequest, LoginResponse, Product, Role, UserIdentity};

/// Translation key for a role badge.
#[must_use]
pub const fn role_label_key(role: Role) -> &'static str {
    match role {
        Role::Admin => "role.admin",
        Role::User => "role.user",
    }
}

/// Whether navigation should offer the admin console link.
#[must_use]
pub const fn shows_admin_link(role: Role) -> bool {
    role.is_admin()
}

/// Price label in New Taiwan dollars, e.g. `NT$ 1,200`.
#[must_use]
pub fn format_price(price: u64) -> String {
    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("NT$ {grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_labels_and_admin_link() {
        assert_eq!(role_label_key(Role::Admin), "role.admin");
        assert_eq!(role_label_key(Role::User), "role.user");
        assert!(shows_admin_link(Role::Admin));
        assert!(!shows_admin_link(Role::User));
    }

    #[test]
    fn prices_render_with_currency_prefix() {
        assert_eq!(format_price(0), "NT$ 0");
        assert_eq!(format_price(100), "NT$ 100");
        assert_eq!(format_price(200), "NT$ 200");
        assert_eq!(format_price(1_200), "NT$ 1,200");
        assert_eq!(format_price(1_234_567), "NT$ 1,234,567");
    }
}
