/// Route component constants shared across crates
pub const CALENDARS_ROUTE_COMPONENT: &str = "calendars";
pub const CALENDARS_ROUTE_PREFIX: &str = const_str::concat!("/", CALENDARS_ROUTE_COMPONENT);

pub const AUTH_ROUTE_COMPONENT: &str = "auth";
pub const AUTH_ROUTE_PREFIX: &str = const_str::concat!("/", AUTH_ROUTE_COMPONENT);

pub const STREAMLINE_ROUTE_COMPONENT: &str = "streamline";
pub const STREAMLINE_ROUTE_PREFIX: &str = const_str::concat!("/", STREAMLINE_ROUTE_COMPONENT);

pub const APP_ROUTE_COMPONENT: &str = "app";
pub const APP_ROUTE_PREFIX: &str = const_str::concat!("/", APP_ROUTE_COMPONENT);

/// Plain-text response bodies understood by clients.
pub mod sentinel {
    pub const OK: &str = "ok";
    pub const OK_LOGIN: &str = "ok-login";
    pub const OK_UPDATED: &str = "ok-updated";
    pub const USES_NOTES_CANNOT_BE_DISABLED: &str = "calendar-uses-notes-cannot-be-disabled";
}

/// Request body field names.
pub mod field {
    pub const AUTH_EMAIL: &str = "em";
    pub const AUTH_SECRET: &str = "sp";

    pub const LOGIN_EMAIL: &str = "email";
    pub const LOGIN_PASSWORD: &str = "password";

    pub const CALENDAR_ID: &str = "cid";
    pub const TODO_ID: &str = "tid";
    pub const NAME: &str = "name";
    pub const COLOR: &str = "color";
    pub const PLANNED_COLOR: &str = "planned-color";
    pub const USES_NOTES: &str = "uses-notes";
    pub const NOTES: &str = "notes";
    pub const DATE: &str = "date";
    pub const DATE_FROM: &str = "date-from";
    pub const SHOW_ALL: &str = "show-all";
    pub const MODE: &str = "mode";
}

/// Inclusive year bounds accepted by the local-date validator.
pub const MIN_YEAR: i32 = 1999;
pub const MAX_YEAR: i32 = 2999;
