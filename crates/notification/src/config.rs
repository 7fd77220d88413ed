//! Per-invocation overrides, static defaults, and how one is chosen over the
//! other.
//!
//! Every recognised option exists in two places: the [`Context`] a caller
//! supplies for one message, and the [`DefaultConfig`] loaded once for the
//! deployment. [`ConfigResolver`] picks the context value whenever the caller
//! set it explicitly (including `false` and the empty string), falls back to
//! the default otherwise, and reports the option as absent when neither is
//! set.
//!
//! Boolean options are `Option<bool>` on both sides so that "unset" never
//! collapses into `false`.

use serde::Deserialize;

use crate::payload::Field;
use crate::types::{CookbookDetailLevel, MessageDetailLevel};

// ---------------------------------------------------------------------------
// Option names and values
// ---------------------------------------------------------------------------

/// A recognised configuration option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigOption {
    /// Text of the run-started message.
    StartMessage,
    /// Text of the run-succeeded message.
    SuccessMessage,
    /// Text of the run-failed message.
    FailureMessage,
    /// Only notify about failed runs.
    FailOnly,
    /// Notify when a run starts.
    SendStartMessage,
    /// Verbosity of success and failure messages.
    MessageDetailLevel,
    /// Whether cookbook versions are listed.
    CookbookDetailLevel,
    /// Include the node's environment.
    SendEnvironment,
    /// Include the node's organization.
    SendOrganization,
}

impl ConfigOption {
    /// Every recognised option, in declaration order.
    pub const ALL: [ConfigOption; 9] = [
        ConfigOption::StartMessage,
        ConfigOption::SuccessMessage,
        ConfigOption::FailureMessage,
        ConfigOption::FailOnly,
        ConfigOption::SendStartMessage,
        ConfigOption::MessageDetailLevel,
        ConfigOption::CookbookDetailLevel,
        ConfigOption::SendEnvironment,
        ConfigOption::SendOrganization,
    ];

    /// The key this option is stored under in a context or default config.
    pub fn key(self) -> &'static str {
        match self {
            ConfigOption::StartMessage => "start_message",
            ConfigOption::SuccessMessage => "success_message",
            ConfigOption::FailureMessage => "failure_message",
            ConfigOption::FailOnly => "fail_only",
            ConfigOption::SendStartMessage => "send_start_message",
            ConfigOption::MessageDetailLevel => "message_detail_level",
            ConfigOption::CookbookDetailLevel => "cookbook_detail_level",
            ConfigOption::SendEnvironment => "send_environment",
            ConfigOption::SendOrganization => "send_organization",
        }
    }
}

impl std::fmt::Display for ConfigOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// The value of a resolved option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// A message text.
    Text(String),
    /// A boolean switch.
    Flag(bool),
    /// A message detail level.
    MessageDetail(MessageDetailLevel),
    /// A cookbook detail level.
    CookbookDetail(CookbookDetailLevel),
}

/// Read access to the options held by a [`Context`] or [`DefaultConfig`].
pub trait OptionLookup {
    /// Returns the value explicitly set for `option`, or `None` if unset.
    fn lookup(&self, option: ConfigOption) -> Option<OptionValue>;
}

// Both sides of the resolution expose the same nine options; this keeps the
// option-to-field mapping in one place.
macro_rules! option_lookup {
    ($ty:ty) => {
        impl OptionLookup for $ty {
            fn lookup(&self, option: ConfigOption) -> Option<OptionValue> {
                match option {
                    ConfigOption::StartMessage => self.start_message.clone().map(OptionValue::Text),
                    ConfigOption::SuccessMessage => {
                        self.success_message.clone().map(OptionValue::Text)
                    }
                    ConfigOption::FailureMessage => {
                        self.failure_message.clone().map(OptionValue::Text)
                    }
                    ConfigOption::FailOnly => self.fail_only.map(OptionValue::Flag),
                    ConfigOption::SendStartMessage => self.send_start_message.map(OptionValue::Flag),
                    ConfigOption::MessageDetailLevel => {
                        self.message_detail_level.map(OptionValue::MessageDetail)
                    }
                    ConfigOption::CookbookDetailLevel => {
                        self.cookbook_detail_level.map(OptionValue::CookbookDetail)
                    }
                    ConfigOption::SendEnvironment => self.send_environment.map(OptionValue::Flag),
                    ConfigOption::SendOrganization => self.send_organization.map(OptionValue::Flag),
                }
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Per-invocation overrides supplied by whoever asks for a message.
///
/// Every key may be absent. A JSON `null` is treated as absent. Keys that are
/// not recognised are ignored so callers can pass their whole attribute map.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Context {
    /// Overrides [`ConfigOption::StartMessage`].
    pub start_message: Option<String>,
    /// Overrides [`ConfigOption::SuccessMessage`].
    pub success_message: Option<String>,
    /// Overrides [`ConfigOption::FailureMessage`].
    pub failure_message: Option<String>,
    /// Overrides [`ConfigOption::FailOnly`].
    pub fail_only: Option<bool>,
    /// Overrides [`ConfigOption::SendStartMessage`].
    pub send_start_message: Option<bool>,
    /// Overrides [`ConfigOption::MessageDetailLevel`].
    pub message_detail_level: Option<MessageDetailLevel>,
    /// Overrides [`ConfigOption::CookbookDetailLevel`].
    pub cookbook_detail_level: Option<CookbookDetailLevel>,
    /// Overrides [`ConfigOption::SendEnvironment`].
    pub send_environment: Option<bool>,
    /// Overrides [`ConfigOption::SendOrganization`].
    pub send_organization: Option<bool>,
    /// Caller-built fields placed first in every payload, verbatim.
    pub custom_fields: Option<Vec<Field>>,
}

option_lookup!(Context);

// ---------------------------------------------------------------------------
// DefaultConfig
// ---------------------------------------------------------------------------

/// Static fallback values for every recognised option.
///
/// Loaded once per deployment. Unknown keys are rejected so a misspelled
/// option fails at load time instead of silently never applying.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultConfig {
    /// Text of the run-started message.
    pub start_message: Option<String>,
    /// Text of the run-succeeded message.
    pub success_message: Option<String>,
    /// Text of the run-failed message.
    pub failure_message: Option<String>,
    /// Only notify about failed runs.
    pub fail_only: Option<bool>,
    /// Notify when a run starts.
    pub send_start_message: Option<bool>,
    /// Verbosity of success and failure messages.
    pub message_detail_level: Option<MessageDetailLevel>,
    /// Whether cookbook versions are listed.
    pub cookbook_detail_level: Option<CookbookDetailLevel>,
    /// Include the node's environment.
    pub send_environment: Option<bool>,
    /// Include the node's organization.
    pub send_organization: Option<bool>,
}

option_lookup!(DefaultConfig);

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolves `option` to the context value if explicitly set, else the
/// default, else `None`.
pub fn resolve(
    option: ConfigOption,
    context: &Context,
    defaults: &DefaultConfig,
) -> Option<OptionValue> {
    context.lookup(option).or_else(|| defaults.lookup(option))
}

/// A [`Context`] and [`DefaultConfig`] paired for the duration of one build.
///
/// Provides typed projections of [`resolve`]. A projection returns `None`
/// both when the option is unset on both sides and when the stored value has
/// a different type than the projection expects.
#[derive(Debug, Clone, Copy)]
pub struct ConfigResolver<'a> {
    context: &'a Context,
    defaults: &'a DefaultConfig,
}

impl<'a> ConfigResolver<'a> {
    /// Pairs a context with the defaults it overrides.
    pub fn new(context: &'a Context, defaults: &'a DefaultConfig) -> Self {
        Self { context, defaults }
    }

    /// The context this resolver reads overrides from.
    pub fn context(&self) -> &'a Context {
        self.context
    }

    /// Untyped resolution of `option`.
    pub fn resolve(&self, option: ConfigOption) -> Option<OptionValue> {
        resolve(option, self.context, self.defaults)
    }

    /// Resolves a message-text option.
    pub fn text(&self, option: ConfigOption) -> Option<String> {
        match self.resolve(option) {
            Some(OptionValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Resolves a boolean option, preserving the unset state.
    pub fn flag(&self, option: ConfigOption) -> Option<bool> {
        match self.resolve(option) {
            Some(OptionValue::Flag(flag)) => Some(flag),
            _ => None,
        }
    }

    /// Resolves `message_detail_level`.
    pub fn message_detail_level(&self) -> Option<MessageDetailLevel> {
        match self.resolve(ConfigOption::MessageDetailLevel) {
            Some(OptionValue::MessageDetail(level)) => Some(level),
            _ => None,
        }
    }

    /// Resolves `cookbook_detail_level`.
    pub fn cookbook_detail_level(&self) -> Option<CookbookDetailLevel> {
        match self.resolve(ConfigOption::CookbookDetailLevel) {
            Some(OptionValue::CookbookDetail(level)) => Some(level),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> DefaultConfig {
        DefaultConfig {
            success_message: Some("Run ok".to_owned()),
            send_environment: Some(false),
            message_detail_level: Some(MessageDetailLevel::Basic),
            ..DefaultConfig::default()
        }
    }

    #[test]
    fn context_value_wins_over_default() {
        let context = Context {
            send_environment: Some(true),
            ..Context::default()
        };
        let defaults = defaults();
        let resolver = ConfigResolver::new(&context, &defaults);

        assert_eq!(resolver.flag(ConfigOption::SendEnvironment), Some(true));
    }

    #[test]
    fn explicit_false_and_empty_text_are_not_treated_as_unset() {
        let context = Context {
            fail_only: Some(false),
            success_message: Some(String::new()),
            ..Context::default()
        };
        let defaults = DefaultConfig {
            fail_only: Some(true),
            ..defaults()
        };
        let resolver = ConfigResolver::new(&context, &defaults);

        assert_eq!(resolver.flag(ConfigOption::FailOnly), Some(false));
        assert_eq!(resolver.text(ConfigOption::SuccessMessage), Some(String::new()));
    }

    #[test]
    fn falls_back_to_default_then_absent() {
        let context = Context::default();
        let defaults = defaults();
        let resolver = ConfigResolver::new(&context, &defaults);

        assert_eq!(resolver.text(ConfigOption::SuccessMessage), Some("Run ok".to_owned()));
        assert_eq!(resolver.message_detail_level(), Some(MessageDetailLevel::Basic));
        assert_eq!(resolver.flag(ConfigOption::SendOrganization), None);
        assert_eq!(resolver.cookbook_detail_level(), None);
    }

    #[test]
    fn resolve_matches_lookup_contract_for_every_option() {
        let context = Context {
            start_message: Some("go".to_owned()),
            send_organization: Some(false),
            ..Context::default()
        };
        let defaults = defaults();

        for option in ConfigOption::ALL {
            let expected = context.lookup(option).or_else(|| defaults.lookup(option));
            assert_eq!(resolve(option, &context, &defaults), expected, "{option}");
        }
    }

    #[test]
    fn mismatched_projection_is_absent() {
        let context = Context::default();
        let defaults = defaults();
        let resolver = ConfigResolver::new(&context, &defaults);

        assert_eq!(resolver.flag(ConfigOption::SuccessMessage), None);
    }

    #[test]
    fn context_deserializes_null_as_unset_and_ignores_unknown_keys() {
        let context: Context = serde_json::from_value(serde_json::json!({
            "send_environment": null,
            "fail_only": false,
            "webhook_url": "https://hooks.example.invalid/abc",
        }))
        .unwrap();

        assert_eq!(context.send_environment, None);
        assert_eq!(context.fail_only, Some(false));
    }

    #[test]
    fn default_config_rejects_unknown_keys() {
        let result: Result<DefaultConfig, _> =
            serde_json::from_value(serde_json::json!({ "send_enviroment": true }));
        assert!(result.is_err());
    }
}
