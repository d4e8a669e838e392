//! Navigation surface: portal destinations and per-role sidebar links.

use serde::Serialize;

use crate::guard::{authorize, Access, DEFAULT_REDIRECT};
use crate::roles::Role;
use crate::session::Session;

/// A page of the portal and who may open it.
///
/// An empty `allowed_roles` slice marks a public destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Destination {
    pub path: &'static str,
    pub allowed_roles: &'static [Role],
    pub redirect_path: &'static str,
}

impl Destination {
    pub const fn public(path: &'static str) -> Self {
        Self {
            path,
            allowed_roles: &[],
            redirect_path: DEFAULT_REDIRECT,
        }
    }

    pub const fn guarded(path: &'static str, allowed_roles: &'static [Role]) -> Self {
        Self {
            path,
            allowed_roles,
            redirect_path: DEFAULT_REDIRECT,
        }
    }

    pub fn is_public(&self) -> bool {
        self.allowed_roles.is_empty()
    }

    /// Guard decision for this destination.
    pub fn check(&self, session: &Session) -> Access {
        if self.is_public() {
            Access::Grant
        } else {
            authorize(session, self.allowed_roles, self.redirect_path)
        }
    }
}

/// Every routable page of the portal.
pub const DESTINATIONS: &[Destination] = &[
    Destination::public("/"),
    Destination::public("/auth/login/student"),
    Destination::public("/auth/login/supervisor"),
    Destination::public("/auth/login/coordinator"),
    Destination::public("/auth/signup/student"),
    Destination::guarded("/student/dashboard", &[Role::Student]),
    Destination::guarded("/student/payment", &[Role::Student]),
    Destination::guarded("/supervisor/dashboard", &[Role::Supervisor]),
    Destination::guarded("/coordinator/dashboard", &[Role::Coordinator]),
];

/// Resolve a path to its destination. Trailing slashes are ignored.
pub fn find_destination(path: &str) -> Option<&'static Destination> {
    let trimmed = path.trim_end_matches('/');
    let normalized = if trimmed.is_empty() { "/" } else { trimmed };
    DESTINATIONS.iter().find(|d| d.path == normalized)
}

/// A sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub name: &'static str,
    pub href: &'static str,
}

const fn link(name: &'static str, href: &'static str) -> NavLink {
    NavLink { name, href }
}

const STUDENT_LINKS: &[NavLink] = &[
    link("Dashboard", "/student/dashboard"),
    link("Reports", "/student/reports"),
    link("Messages", "/student/messages"),
];

const SUPERVISOR_LINKS: &[NavLink] = &[
    link("Dashboard", "/supervisor/dashboard"),
    link("Students", "/supervisor/students"),
    link("Reports", "/supervisor/reports"),
    link("Messages", "/supervisor/messages"),
];

const COORDINATOR_LINKS: &[NavLink] = &[
    link("Dashboard", "/coordinator/dashboard"),
    link("Students", "/coordinator/students"),
    link("Reports", "/coordinator/reports"),
    link("Organizations", "/coordinator/organizations"),
    link("Statistics", "/coordinator/statistics"),
];

/// Sidebar links for a role.
pub fn navigation_links(role: Role) -> &'static [NavLink] {
    match role {
        Role::Student => STUDENT_LINKS,
        Role::Supervisor => SUPERVISOR_LINKS,
        Role::Coordinator => COORDINATOR_LINKS,
        Role::None => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::DenyReason;
    use crate::identity::Identity;

    #[test]
    fn public_destinations_always_grant() {
        let landing = find_destination("/").unwrap();
        assert!(landing.is_public());
        assert_eq!(landing.check(&Session::anonymous()), Access::Grant);
    }

    #[test]
    fn student_pages_deny_supervisors() {
        let session = Session::authenticated(Identity::new("sup", "S", "s@x", Role::Supervisor));
        let payment = find_destination("/student/payment/").unwrap();
        assert_eq!(
            payment.check(&session),
            Access::Deny {
                redirect_to: "/".into(),
                reason: DenyReason::RoleNotAllowed,
            }
        );
    }

    #[test]
    fn unknown_paths_have_no_destination() {
        assert!(find_destination("/admin").is_none());
    }

    #[test]
    fn every_dashboard_is_a_guarded_destination() {
        for role in [Role::Student, Role::Supervisor, Role::Coordinator] {
            let path = role.dashboard_path().unwrap();
            let destination = find_destination(path).unwrap();
            assert_eq!(destination.allowed_roles, &[role]);
            assert_eq!(navigation_links(role)[0].href, path);
        }
        assert!(navigation_links(Role::None).is_empty());
    }
}
