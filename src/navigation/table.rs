// File Path: src/navigation/table.rs

//! # Route Table
//!
//! Ordered, immutable list of route entries. Resolution walks the entries in
//! declaration order and the first structural match wins.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::pattern::{PathPattern, RequestPath};
use crate::models::{ApiError, ApiResult, GuardKind, RouteEntryConfig, RouteSummary, RouteTableConfig};

/// Coarse permission label carried by an authenticated subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Host,
    Guest,
}

/// Page-level views the table can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewId {
    Login,
    Register,
    Home,
    AccommodationList,
    AccommodationDetail,
    Profile,
    EditProfile,
    CreateAccommodation,
    EmailVerification,
    ForgotPassword,
    ResetPassword,
    DeleteAccount,
    Reservations,
    Ratings,
    ReportList,
    ReportDetail,
    CreateAvailability,
    NotFound,
}

/// Who may activate an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Requires a session. An empty role list admits any authenticated subject.
    Authenticated { roles: Vec<Role> },
}

impl Access {
    pub fn any_user() -> Self {
        Access::Authenticated { roles: Vec::new() }
    }

    pub fn role(role: Role) -> Self {
        Access::Authenticated { roles: vec![role] }
    }

    pub fn is_guarded(&self) -> bool {
        matches!(self, Access::Authenticated { .. })
    }

    pub fn roles(&self) -> &[Role] {
        match self {
            Access::Public => &[],
            Access::Authenticated { roles } => roles,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub pattern: PathPattern,
    pub view: ViewId,
    pub access: Access,
}

impl RouteEntry {
    pub fn new(pattern: &str, view: ViewId, access: Access) -> ApiResult<Self> {
        Ok(Self {
            pattern: PathPattern::parse(pattern)?,
            view,
            access,
        })
    }

    fn from_config(config: &RouteEntryConfig) -> ApiResult<Self> {
        let access = match config.guard {
            GuardKind::Auth => Access::Authenticated { roles: config.roles.clone() },
            GuardKind::None if config.roles.is_empty() => Access::Public,
            GuardKind::None => {
                return Err(ApiError::ValidationError(format!(
                    "Route '{}' declares roles without an auth guard",
                    config.path
                )));
            }
        };
        Self::new(&config.path, config.view, access)
    }

    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            path: self.pattern.to_string(),
            view: self.view,
            guarded: self.access.is_guarded(),
            roles: self.access.roles().to_vec(),
        }
    }
}

/// Result of a structural match against the table.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub entry: &'a RouteEntry,
    pub params: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Builds a table, rejecting entries that an earlier entry makes unreachable.
    pub fn new(entries: Vec<RouteEntry>) -> ApiResult<Self> {
        for (index, entry) in entries.iter().enumerate() {
            if let Some(earlier) = entries[..index]
                .iter()
                .find(|earlier| earlier.pattern.shadows(&entry.pattern))
            {
                return Err(ApiError::ValidationError(format!(
                    "Route '{}' is unreachable: shadowed by earlier route '{}'",
                    entry.pattern, earlier.pattern
                )));
            }
        }
        Ok(Self { entries })
    }

    /// The application's route table in declaration order.
    pub fn builtin() -> ApiResult<Self> {
        use ViewId::*;

        let mut routes: Vec<(&str, ViewId, Access)> = vec![
            ("login", Login, Access::Public),
            ("register", Register, Access::Public),
            ("home", Home, Access::Public),
            ("accommodation", AccommodationList, Access::Public),
            ("accommodation/:id", AccommodationDetail, Access::Public),
            ("profile", Profile, Access::any_user()),
            ("edit-profile", EditProfile, Access::any_user()),
            ("create-accommodation", CreateAccommodation, Access::role(Role::Host)),
            ("email-verification", EmailVerification, Access::Public),
            ("forgot-password", ForgotPassword, Access::Public),
            ("reset-password", ResetPassword, Access::Public),
            ("delete-account", DeleteAccount, Access::Public),
            ("reservations", Reservations, Access::role(Role::Guest)),
            ("reviews", Ratings, Access::Public),
            ("reports", ReportList, Access::Public),
            ("reports/:id", ReportDetail, Access::role(Role::Host)),
        ];

        if cfg!(feature = "availability") {
            routes.push(("availability-create/:accId", CreateAvailability, Access::role(Role::Host)));
        }

        let entries = routes
            .into_iter()
            .map(|(path, view, access)| RouteEntry::new(path, view, access))
            .collect::<ApiResult<Vec<_>>>()?;

        Self::new(entries)
    }

    /// Builds a table from YAML configuration, skipping disabled entries.
    pub fn from_config(config: &RouteTableConfig) -> ApiResult<Self> {
        let mut entries = Vec::with_capacity(config.routes.len());
        for route in &config.routes {
            if !route.enabled {
                info!("Skipping disabled route: {}", route.path);
                continue;
            }
            entries.push(RouteEntry::from_config(route)?);
        }
        let table = Self::new(entries)?;
        info!("Route table built with {} entries", table.len());
        Ok(table)
    }

    pub fn resolve(&self, request: &RequestPath) -> Option<RouteMatch<'_>> {
        let segments = request.segments();
        let found = self.entries.iter().find_map(|entry| {
            entry
                .pattern
                .matches(&segments)
                .map(|params| RouteMatch { entry, params })
        });
        if let Some(found) = &found {
            debug!("Matched {} -> {}", request.path(), found.entry.pattern);
        }
        found
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summaries(&self) -> Vec<RouteSummary> {
        self.entries.iter().map(RouteEntry::summary).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_view(table: &RouteTable, path: &str) -> Option<ViewId> {
        table.resolve(&RequestPath::parse(path)).map(|m| m.entry.view)
    }

    fn entry(path: &str, view: ViewId, guard: GuardKind, roles: Vec<Role>) -> RouteEntryConfig {
        RouteEntryConfig {
            path: path.to_string(),
            view,
            guard,
            roles,
            enabled: true,
        }
    }

    #[test]
    fn builtin_table_declares_routes_in_order() {
        let table = RouteTable::builtin().unwrap();
        let paths: Vec<String> = table.entries().iter().map(|e| e.pattern.to_string()).collect();
        assert_eq!(&paths[..5], &["login", "register", "home", "accommodation", "accommodation/:id"]);
        assert_eq!(paths.last().map(String::as_str), Some(if cfg!(feature = "availability") {
            "availability-create/:accId"
        } else {
            "reports/:id"
        }));
        assert!(RouteTable::new(table.entries().to_vec()).is_ok());
    }

    #[test]
    fn static_and_parameterized_accommodation_resolve_differently() {
        let table = RouteTable::builtin().unwrap();
        assert_eq!(resolve_view(&table, "/accommodation"), Some(ViewId::AccommodationList));
        assert_eq!(resolve_view(&table, "/accommodation/42"), Some(ViewId::AccommodationDetail));

        let matched = table.resolve(&RequestPath::parse("accommodation/42")).unwrap();
        assert_eq!(matched.params.get("id").map(String::as_str), Some("42"));
    }

    #[test]
    fn unmatched_paths_resolve_to_nothing() {
        let table = RouteTable::builtin().unwrap();
        assert_eq!(resolve_view(&table, "/"), None);
        assert_eq!(resolve_view(&table, "/accommodation/1/edit"), None);
        assert_eq!(resolve_view(&table, "/no-such-page"), None);
    }

    #[test]
    fn inert_availability_route_is_off_by_default() {
        let table = RouteTable::builtin().unwrap();
        let active = resolve_view(&table, "/availability-create/7").is_some();
        assert_eq!(active, cfg!(feature = "availability"));
    }

    #[test]
    fn guarded_entries_carry_roles() {
        let table = RouteTable::builtin().unwrap();
        let summaries = table.summaries();
        let profile = summaries.iter().find(|s| s.path == "profile").unwrap();
        assert!(profile.guarded);
        assert!(profile.roles.is_empty());
        let reports = summaries.iter().find(|s| s.path == "reports/:id").unwrap();
        assert_eq!(reports.roles, vec![Role::Host]);
    }

    #[test]
    fn config_rejects_roles_without_guard() {
        let config = RouteTableConfig {
            routes: vec![entry("reports", ViewId::ReportList, GuardKind::None, vec![Role::Host])],
            settings: None,
        };
        assert!(matches!(RouteTable::from_config(&config), Err(ApiError::ValidationError(_))));
    }

    #[test]
    fn config_rejects_param_route_before_static_route() {
        let config = RouteTableConfig {
            routes: vec![
                entry("reports/:id", ViewId::ReportDetail, GuardKind::None, vec![]),
                entry("reports/summary", ViewId::ReportList, GuardKind::None, vec![]),
            ],
            settings: None,
        };
        assert!(matches!(RouteTable::from_config(&config), Err(ApiError::ValidationError(_))));
    }

    #[test]
    fn config_rejects_duplicate_paths() {
        let config = RouteTableConfig {
            routes: vec![
                entry("home", ViewId::Home, GuardKind::None, vec![]),
                entry("/home/", ViewId::Login, GuardKind::None, vec![]),
            ],
            settings: None,
        };
        assert!(RouteTable::from_config(&config).is_err());
    }

    #[test]
    fn config_skips_disabled_entries() {
        let mut disabled = entry(
            "availability-create/:accId",
            ViewId::CreateAvailability,
            GuardKind::Auth,
            vec![Role::Host],
        );
        disabled.enabled = false;
        let config = RouteTableConfig {
            routes: vec![entry("home", ViewId::Home, GuardKind::None, vec![]), disabled],
            settings: None,
        };
        let table = RouteTable::from_config(&config).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(resolve_view(&table, "/availability-create/3"), None);
    }
}
