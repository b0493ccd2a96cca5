//! EL FADILA SCHOOL domain library
//!
//! School records (teachers, students, registration meetings), the mock
//! data the dashboard runs on, localized interface strings, quick-assign
//! validation and the students-organization API client.

pub mod api;
pub mod columns;
pub mod error;
pub mod i18n;
pub mod mock;
pub mod model;
pub mod quick_assign;

pub use api::{ApiEnvelope, OrganizationClient};
pub use i18n::{Language, Text};
