//! Assembly of complete messages for each run lifecycle event.
//!
//! [`MessageAssembler`] captures the deployment defaults, the run status, and
//! the organization source once, then builds a fresh [`MessagePayload`] per
//! call from a caller-supplied [`Context`]. It holds no mutable state; two
//! calls with the same context produce identical payloads.
//!
//! ## Field order
//!
//! | Event | Fields |
//! |-------|--------|
//! | start | custom, node, organization, environment, cookbooks |
//! | success / end | custom, node, organization, environment, started, elapsed time, resources, cookbooks |
//! | failure | the success fields, then exception |

use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, info_span};

use crate::config::{ConfigOption, ConfigResolver, Context, DefaultConfig};
use crate::errors::NotificationError;
use crate::fields::{self, FieldInputs};
use crate::organization::OrganizationSource;
use crate::payload::{Field, MessagePayload};
use crate::run_status::RunStatusSource;
use crate::types::Color;

/// A point in a run's lifecycle that a message can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// The run has started.
    Start,
    /// The run completed successfully.
    Success,
    /// The run failed.
    Failure,
    /// The run completed without an explicit failure; rendered as [`Self::Success`].
    End,
}

impl LifecycleEvent {
    /// The lowercase name of the event.
    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleEvent::Start => "start",
            LifecycleEvent::Success => "success",
            LifecycleEvent::Failure => "failure",
            LifecycleEvent::End => "end",
        }
    }
}

impl std::fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleEvent {
    type Err = NotificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(LifecycleEvent::Start),
            "success" => Ok(LifecycleEvent::Success),
            "failure" => Ok(LifecycleEvent::Failure),
            "end" => Ok(LifecycleEvent::End),
            other => Err(NotificationError::UnknownEvent {
                name: other.to_owned(),
            }),
        }
    }
}

type FieldConstructor = fn(&FieldInputs<'_>) -> Option<Field>;

const START_FIELDS: &[FieldConstructor] = &[
    fields::node_field,
    fields::organization_field,
    fields::environment_field,
    fields::cookbook_field,
];

const SUCCESS_FIELDS: &[FieldConstructor] = &[
    fields::node_field,
    fields::organization_field,
    fields::environment_field,
    fields::start_time_field,
    fields::elapsed_time_field,
    fields::resource_field,
    fields::cookbook_field,
];

/// Builds run lifecycle messages for one run.
#[derive(Clone)]
pub struct MessageAssembler {
    defaults: DefaultConfig,
    run_status: Arc<dyn RunStatusSource>,
    organization: Arc<dyn OrganizationSource>,
}

impl MessageAssembler {
    /// Captures the inputs shared by every message about this run.
    pub fn new(
        defaults: DefaultConfig,
        run_status: Arc<dyn RunStatusSource>,
        organization: Arc<dyn OrganizationSource>,
    ) -> Self {
        Self {
            defaults,
            run_status,
            organization,
        }
    }

    /// The defaults overrides are resolved against.
    pub fn defaults(&self) -> &DefaultConfig {
        &self.defaults
    }

    /// Builds the message for `event`.
    pub fn build(&self, event: LifecycleEvent, context: &Context) -> MessagePayload {
        match event {
            LifecycleEvent::Start => self.build_start(context),
            LifecycleEvent::Success | LifecycleEvent::End => self.build_success(context),
            LifecycleEvent::Failure => self.build_failure(context),
        }
    }

    /// Builds the run-started message. Carries no timestamp.
    pub fn build_start(&self, context: &Context) -> MessagePayload {
        let _span = self.span(LifecycleEvent::Start).entered();
        let config = ConfigResolver::new(context, &self.defaults);
        let fields = self.collect_fields(config, START_FIELDS, &[]);
        MessagePayload::new(
            Color::Warning,
            self.text(config, ConfigOption::StartMessage),
            fields,
            None,
        )
    }

    /// Builds the run-succeeded message, stamped with the run's end time.
    pub fn build_success(&self, context: &Context) -> MessagePayload {
        let _span = self.span(LifecycleEvent::Success).entered();
        let config = ConfigResolver::new(context, &self.defaults);
        let fields = self.collect_fields(config, SUCCESS_FIELDS, &[]);
        MessagePayload::new(
            Color::Good,
            self.text(config, ConfigOption::SuccessMessage),
            fields,
            Some(self.run_status.end_time()),
        )
    }

    /// Builds the run-failed message: the success fields plus the exception.
    pub fn build_failure(&self, context: &Context) -> MessagePayload {
        let _span = self.span(LifecycleEvent::Failure).entered();
        let config = ConfigResolver::new(context, &self.defaults);
        let fields = self.collect_fields(config, SUCCESS_FIELDS, &[fields::exception_field]);
        MessagePayload::new(
            Color::Danger,
            self.text(config, ConfigOption::FailureMessage),
            fields,
            Some(self.run_status.end_time()),
        )
    }

    /// Whether only failures should be reported. `None` when unset everywhere.
    pub fn should_send_only_on_failure(&self, context: &Context) -> Option<bool> {
        ConfigResolver::new(context, &self.defaults).flag(ConfigOption::FailOnly)
    }

    /// Whether a run-started message should be sent. `None` when unset everywhere.
    pub fn should_send_on_start(&self, context: &Context) -> Option<bool> {
        ConfigResolver::new(context, &self.defaults).flag(ConfigOption::SendStartMessage)
    }

    fn span(&self, event: LifecycleEvent) -> tracing::Span {
        let run_id = self.run_status.run_id().map(|id| id.to_string());
        info_span!(
            "build_message",
            event = event.as_str(),
            node = self.run_status.node_name().as_str(),
            run_id = run_id.as_deref(),
        )
    }

    fn text(&self, config: ConfigResolver<'_>, option: ConfigOption) -> String {
        config.text(option).unwrap_or_else(|| {
            debug!(option = option.key(), "message text unset; sending empty text");
            String::new()
        })
    }

    // Custom fields first, then each constructor in order with absent
    // results dropped.
    fn collect_fields(
        &self,
        config: ConfigResolver<'_>,
        constructors: &[FieldConstructor],
        trailing: &[FieldConstructor],
    ) -> Vec<Field> {
        let inputs = FieldInputs {
            config,
            run_status: self.run_status.as_ref(),
            organization: self.organization.as_ref(),
        };

        fields::custom_fields(&inputs)
            .into_iter()
            .chain(
                constructors
                    .iter()
                    .chain(trailing)
                    .filter_map(|constructor| constructor(&inputs)),
            )
            .collect()
    }
}

impl std::fmt::Debug for MessageAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageAssembler")
            .field("defaults", &self.defaults)
            .field("node", &self.run_status.node_name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::identifiers::{EnvironmentName, NodeName, OrganizationName};
    use crate::organization::FixedOrganization;
    use crate::run_status::{RunException, RunStatusSnapshot};
    use crate::types::{ElapsedTime, MessageDetailLevel, Timestamp};

    fn snapshot() -> RunStatusSnapshot {
        RunStatusSnapshot {
            run_id: None,
            node_name: NodeName::new("web01").unwrap(),
            environment: EnvironmentName::new("prod").unwrap(),
            start_time: Timestamp::from_epoch_seconds(1_699_999_935).unwrap(),
            end_time: Timestamp::from_epoch_seconds(1_700_000_000).unwrap(),
            elapsed_seconds: ElapsedTime::from_secs_f64(65.0),
            exception: Some(RunException {
                message: "boom".to_owned(),
            }),
            updated_resources: Vec::new(),
            cookbooks: Vec::new(),
        }
    }

    fn assembler(defaults: DefaultConfig) -> MessageAssembler {
        MessageAssembler::new(
            defaults,
            Arc::new(snapshot()),
            Arc::new(FixedOrganization::new(OrganizationName::new("acme").unwrap())),
        )
    }

    #[test]
    fn basic_success_message_omits_elapsed_time() {
        let assembler = assembler(DefaultConfig {
            success_message: Some("Run ok".to_owned()),
            message_detail_level: Some(MessageDetailLevel::Basic),
            ..DefaultConfig::default()
        });

        let payload = assembler.build_success(&Context::default());

        assert_eq!(payload.color(), Color::Good);
        assert_eq!(payload.text(), "Run ok");
        assert_eq!(payload.fallback(), "Run ok");
        assert_eq!(
            payload.fields(),
            &[
                Field::short("Node", "web01"),
                Field::short("Started", "2023-11-14 22:12:15 +0000"),
            ]
        );
        assert_eq!(payload.timestamp().map(Timestamp::epoch_seconds), Some(1_700_000_000));
    }

    #[test]
    fn start_message_has_no_timestamp_or_timing_fields() {
        let assembler = assembler(DefaultConfig {
            start_message: Some("Starting".to_owned()),
            ..DefaultConfig::default()
        });

        let payload = assembler.build_start(&Context::default());

        assert_eq!(payload.color(), Color::Warning);
        assert_eq!(payload.timestamp(), None);
        assert_eq!(payload.fields(), &[Field::short("Node", "web01")]);
    }

    #[test]
    fn context_overrides_text_and_toggles_fields() {
        let assembler = assembler(DefaultConfig {
            start_message: Some("Starting".to_owned()),
            send_environment: Some(false),
            ..DefaultConfig::default()
        });
        let context = Context {
            start_message: Some("Deploying web01".to_owned()),
            send_environment: Some(true),
            send_organization: Some(true),
            custom_fields: Some(vec![Field::new("Team", "ops")]),
            ..Context::default()
        };

        let payload = assembler.build_start(&context);

        assert_eq!(payload.text(), "Deploying web01");
        assert_eq!(
            payload.fields(),
            &[
                Field::new("Team", "ops"),
                Field::short("Node", "web01"),
                Field::short("Organization", "acme"),
                Field::short("Environment", "prod"),
            ]
        );
    }

    #[test]
    fn failure_is_success_plus_exception() {
        let assembler = assembler(DefaultConfig {
            failure_message: Some("Run failed".to_owned()),
            ..DefaultConfig::default()
        });
        let context = Context::default();

        let success = assembler.build_success(&context);
        let failure = assembler.build_failure(&context);

        let mut expected = success.fields().to_vec();
        expected.push(Field::new("Exception", "`boom`"));
        assert_eq!(failure.fields(), expected.as_slice());
        assert_eq!(failure.color(), Color::Danger);
        assert_eq!(failure.text(), "Run failed");
        assert_eq!(failure.timestamp(), success.timestamp());
    }

    #[test]
    fn end_renders_as_success() {
        let assembler = assembler(DefaultConfig {
            success_message: Some("Run ok".to_owned()),
            ..DefaultConfig::default()
        });
        let context = Context::default();

        assert_eq!(
            assembler.build(LifecycleEvent::End, &context),
            assembler.build_success(&context)
        );
    }

    #[test]
    fn unset_message_text_is_empty() {
        let payload = assembler(DefaultConfig::default()).build_failure(&Context::default());
        assert_eq!(payload.text(), "");
    }

    #[test]
    fn gates_are_tri_state() {
        let assembler = assembler(DefaultConfig {
            fail_only: Some(true),
            ..DefaultConfig::default()
        });

        assert_eq!(assembler.should_send_only_on_failure(&Context::default()), Some(true));
        assert_eq!(
            assembler.should_send_only_on_failure(&Context {
                fail_only: Some(false),
                ..Context::default()
            }),
            Some(false)
        );
        assert_eq!(assembler.should_send_on_start(&Context::default()), None);
    }

    #[test]
    fn lifecycle_event_parses_known_names() {
        assert_eq!("end".parse::<LifecycleEvent>().unwrap(), LifecycleEvent::End);
        assert!(matches!(
            "finished".parse::<LifecycleEvent>(),
            Err(NotificationError::UnknownEvent { .. })
        ));
    }
}
