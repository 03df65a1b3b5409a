//! Page helpers that sit around the countdown
//!
//! Login-driven nav link selection, the integer keystroke filter and the
//! next-day deadline that seeds a date-offset countdown. All are pure and
//! called explicitly by the host at initialisation or per event.

pub mod deadline;
pub mod login;
pub mod numeric;

// Re-export main types and functions
pub use deadline::{data_date, next_deadline, seconds_until, DEFAULT_DEADLINE_HOUR};
pub use login::{cookie_value, is_logged_in, NavLink, NavState, LOGIN_COOKIE};
pub use numeric::KeyPress;
