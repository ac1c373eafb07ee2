//! Admin page content selection.
//!
//! The route guard lets any signed-in user through; the page itself decides
//! how much to show based on the role.

use crate::models::Role;

/// Variant of the admin page to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminView {
    /// Full console for administrators.
    Console,
    /// Reduced page labelled with the user's role.
    Restricted,
}

/// Pick the admin page variant for `role`.
#[must_use]
pub const fn admin_view(role: Role) -> AdminView {
    if role.is_admin() {
        AdminView::Console
    } else {
        AdminView::Restricted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admins_get_console() {
        assert_eq!(admin_view(Role::Admin), AdminView::Console);
        assert_eq!(admin_view(Role::User), AdminView::Restricted);
    }
}
