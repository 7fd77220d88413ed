//! Constructors for the optional fields of a run message.
//!
//! Each constructor reads the resolved options and the run status and returns
//! either a [`Field`] or `None`. None of them fail: a constructor whose input
//! is unavailable degrades to a sentinel value or to `None`, so one missing
//! fact never prevents the rest of the message from being built.
//!
//! Which constructors run for which lifecycle event is decided by
//! [`crate::MessageAssembler`]; the constructors only decide whether their
//! own options ask for the field.

use tracing::warn;

use crate::config::{ConfigOption, ConfigResolver};
use crate::organization::OrganizationSource;
use crate::payload::Field;
use crate::run_status::RunStatusSource;
use crate::types::{CookbookDetailLevel, MessageDetailLevel};

/// Field titles as they appear in the rendered attachment.
pub mod titles {
    /// [`super::node_field`].
    pub const NODE: &str = "Node";
    /// [`super::organization_field`].
    pub const ORGANIZATION: &str = "Organization";
    /// [`super::environment_field`].
    pub const ENVIRONMENT: &str = "Environment";
    /// [`super::start_time_field`].
    pub const STARTED: &str = "Started";
    /// [`super::elapsed_time_field`].
    pub const ELAPSED_TIME: &str = "Elapsed Time";
    /// [`super::resource_field`].
    pub const RESOURCES: &str = "Resources";
    /// [`super::cookbook_field`].
    pub const COOKBOOKS: &str = "Cookbooks";
    /// [`super::exception_field`].
    pub const EXCEPTION: &str = "Exception";
}

/// Value of the organization field when the organization cannot be determined.
pub const ORGANIZATION_NOT_FOUND: &str = "Organization not found";

/// Everything a field constructor may read, borrowed for one build.
#[derive(Clone, Copy)]
pub struct FieldInputs<'a> {
    /// Context overrides paired with the defaults.
    pub config: ConfigResolver<'a>,
    /// Facts about the run.
    pub run_status: &'a dyn RunStatusSource,
    /// Where the organization name comes from.
    pub organization: &'a dyn OrganizationSource,
}

/// Caller-built fields, passed through verbatim. Empty when none were supplied.
pub fn custom_fields(inputs: &FieldInputs<'_>) -> Vec<Field> {
    inputs.config.context().custom_fields.clone().unwrap_or_default()
}

/// The node the run executed on. Always present.
pub fn node_field(inputs: &FieldInputs<'_>) -> Option<Field> {
    Some(Field::short(titles::NODE, inputs.run_status.node_name().as_str()))
}

/// The node's organization, when `send_organization` resolves to `true`.
///
/// Lookup failures and a source that names no organization both yield
/// [`ORGANIZATION_NOT_FOUND`].
pub fn organization_field(inputs: &FieldInputs<'_>) -> Option<Field> {
    if inputs.config.flag(ConfigOption::SendOrganization) != Some(true) {
        return None;
    }

    let value = match inputs.organization.organization() {
        Ok(Some(name)) => name.to_string(),
        Ok(None) => {
            warn!("organization source names no organization");
            ORGANIZATION_NOT_FOUND.to_owned()
        }
        Err(error) => {
            warn!(%error, "organization lookup failed");
            ORGANIZATION_NOT_FOUND.to_owned()
        }
    };

    Some(Field::short(titles::ORGANIZATION, value))
}

/// The node's environment, when `send_environment` resolves to `true`.
pub fn environment_field(inputs: &FieldInputs<'_>) -> Option<Field> {
    if inputs.config.flag(ConfigOption::SendEnvironment) != Some(true) {
        return None;
    }
    Some(Field::short(
        titles::ENVIRONMENT,
        inputs.run_status.environment().as_str(),
    ))
}

/// When the run started.
pub fn start_time_field(inputs: &FieldInputs<'_>) -> Option<Field> {
    Some(Field::short(
        titles::STARTED,
        inputs.run_status.start_time().to_human(),
    ))
}

/// How long the run took, unless the detail level is `basic`.
///
/// An unset detail level counts as "not basic".
pub fn elapsed_time_field(inputs: &FieldInputs<'_>) -> Option<Field> {
    if inputs.config.message_detail_level() == Some(MessageDetailLevel::Basic) {
        return None;
    }
    Some(Field::short(
        titles::ELAPSED_TIME,
        inputs.run_status.elapsed_time().to_clock(),
    ))
}

/// The resources the run updated, when the detail level is `resources`.
pub fn resource_field(inputs: &FieldInputs<'_>) -> Option<Field> {
    if inputs.config.message_detail_level() != Some(MessageDetailLevel::Resources) {
        return None;
    }
    Some(Field::new(
        titles::RESOURCES,
        inputs.run_status.updated_resources().join(", "),
    ))
}

/// The loaded cookbooks, when the cookbook detail level is `all`.
pub fn cookbook_field(inputs: &FieldInputs<'_>) -> Option<Field> {
    if inputs.config.cookbook_detail_level() != Some(CookbookDetailLevel::All) {
        return None;
    }
    let cookbooks = inputs
        .run_status
        .cookbooks()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Some(Field::new(titles::COOKBOOKS, cookbooks))
}

/// The exception that failed the run, as inline code.
///
/// `None` (with a warning) when the run status carries no exception.
pub fn exception_field(inputs: &FieldInputs<'_>) -> Option<Field> {
    match inputs.run_status.exception() {
        Some(exception) => Some(Field::new(
            titles::EXCEPTION,
            format!("`{}`", exception.message),
        )),
        None => {
            warn!("failure message requested but the run recorded no exception");
            None
        }
    }
}
