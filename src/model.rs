use crate::{
    bpmn::{
        ActivityType, Behavior, DataType, Direction, EventBehavior, EventType, GatewayType,
        Operator, ParameterType, TaskType,
    },
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Display, str::FromStr};

/// Model level metadata of a BPMN document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub id: String,
    pub name: String,
    pub version: Version,
    #[serde(rename = "private")]
    pub is_private: bool,
    pub data_store_fields: Vec<DataStoreField>,
}

/// `major.minor.patch`, serialized as `[major, minor, patch]`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Version(pub u32, pub u32, pub u32);

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidVersion(s.into());
        let segments = s
            .trim()
            .split('.')
            .map(|segment| {
                if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                segment.parse::<u32>().map_err(|_| invalid())
            })
            .collect::<Result<Vec<_>, _>>()?;
        match segments[..] {
            [major, minor, patch] => Ok(Self(major, minor, patch)),
            _ => Err(invalid()),
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.0, self.1, self.2)
    }
}

impl From<Version> for [u32; 3] {
    fn from(value: Version) -> Self {
        [value.0, value.1, value.2]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataStoreField {
    pub data_storage_id: String,
    pub data_path: String,
    pub parameter_type: ParameterType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: String,
    pub name: String,
    pub interface: String,
    pub participants: Vec<Participant>,
    pub tasks: Vec<Activity>,
    pub user_tasks: Vec<Activity>,
    pub send_tasks: Vec<Activity>,
    pub service_tasks: Vec<Activity>,
    pub sub_processes: Vec<Activity>,
    pub boundary_events: Vec<BoundaryEvent>,
    pub intermediate_catch_events: Vec<IntermediateCatchEvent>,
    pub transitions: Vec<Transition>,
    pub and_gateways: Vec<Gateway>,
    pub xor_gateways: Vec<Gateway>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_transitions: Vec<DefaultTransition>,
    /// Activity id to display name, across every activity bucket.
    pub activity_map: BTreeMap<String, String>,
}

impl Process {
    /// Every activity, bucket by bucket in the order tasks, user tasks, send tasks,
    /// service tasks, sub processes.
    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.tasks
            .iter()
            .chain(&self.user_tasks)
            .chain(&self.send_tasks)
            .chain(&self.service_tasks)
            .chain(&self.sub_processes)
    }

    pub fn activity(&self, id: &str) -> Option<&Activity> {
        self.activities().find(|a| a.id == id)
    }

    pub fn transition(&self, id: &str) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.id == id)
    }

    pub fn gateways(&self) -> impl Iterator<Item = &Gateway> {
        self.xor_gateways.iter().chain(&self.and_gateways)
    }

    /// The lane whose flow node references contain `node_id`.
    pub fn participant_of(&self, node_id: &str) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| p.tasks.iter().any(|t| t == node_id))
    }
}

/// A lane and the flow nodes it performs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ParticipantRepr", try_from = "ParticipantRepr")]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub tasks: Vec<String>,
    pub performer: Performer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Performer {
    /// Fixed account address.
    Account(String),
    /// Resolved from the data store at runtime.
    Conditional(DataReference),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataReference {
    pub data_path: String,
    pub data_storage_id: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParticipantRepr {
    id: String,
    name: String,
    tasks: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    account: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    conditional_performer: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_storage_id: Option<String>,
}

impl From<Participant> for ParticipantRepr {
    fn from(value: Participant) -> Self {
        let (account, conditional_performer, data_path, data_storage_id) = match value.performer
        {
            Performer::Account(account) => (Some(account), false, None, None),
            Performer::Conditional(DataReference {
                data_path,
                data_storage_id,
            }) => (None, true, Some(data_path), Some(data_storage_id)),
        };
        Self {
            id: value.id,
            name: value.name,
            tasks: value.tasks,
            account,
            conditional_performer,
            data_path,
            data_storage_id,
        }
    }
}

impl TryFrom<ParticipantRepr> for Participant {
    type Error = Error;

    fn try_from(value: ParticipantRepr) -> Result<Self, Self::Error> {
        let performer = match (
            value.account,
            value.conditional_performer,
            value.data_path,
            value.data_storage_id,
        ) {
            (Some(account), ..) => Performer::Account(account),
            (None, true, Some(data_path), Some(data_storage_id)) => {
                Performer::Conditional(DataReference {
                    data_path,
                    data_storage_id,
                })
            }
            _ => return Err(Error::MissingPerformer(value.id)),
        };
        Ok(Self {
            id: value.id,
            name: value.name,
            tasks: value.tasks,
            performer,
        })
    }
}

/// Shared shape of tasks, user tasks, send tasks, service tasks and sub processes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub assignee: String,
    pub activity_type: ActivityType,
    pub task_type: TaskType,
    pub behavior: Behavior,
    pub multi_instance: bool,
    pub application: String,
    pub sub_process_model_id: String,
    pub sub_process_definition_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_mappings: Vec<DataMapping>,
}

/// Links an activity variable to a data store location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataMapping {
    pub id: String,
    pub direction: Direction,
    pub data_path: String,
    pub data_storage_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gateway {
    pub id: String,
    #[serde(rename = "type")]
    pub gateway_type: GatewayType,
    pub incoming: Vec<String>,
    pub outgoing: Vec<String>,
}

/// Outgoing flow of an exclusive gateway taken when no condition matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultTransition {
    pub gateway: String,
    pub transition: String,
    /// Name of the activity the flow leads to, or the target id when it is not an activity.
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

/// `lhDataStorageId.lhDataPath <operator> rhValue`, evaluated by the execution engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub lh_data_storage_id: String,
    pub lh_data_path: String,
    pub operator: Operator,
    pub rh_value: String,
    pub data_type: DataType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationAction {
    pub action_function: String,
    pub data_path: String,
    pub data_storage_id: String,
}

/// Timer value of an event. Serialized as exactly one of `fixedValue` or `conditionalValue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerValue {
    /// Duration in seconds or a timestamp.
    FixedValue(u64),
    /// Data store location holding the value.
    ConditionalValue(DataMapping),
}

impl TimerValue {
    pub fn fixed_value(&self) -> Option<u64> {
        match self {
            TimerValue::FixedValue(value) => Some(*value),
            TimerValue::ConditionalValue(_) => None,
        }
    }

    pub fn conditional_value(&self) -> Option<&DataMapping> {
        match self {
            TimerValue::ConditionalValue(mapping) => Some(mapping),
            TimerValue::FixedValue(_) => None,
        }
    }

    pub fn event_type(&self) -> EventType {
        match self {
            TimerValue::FixedValue(_) => EventType::TimerDuration,
            TimerValue::ConditionalValue(_) => EventType::TimerDate,
        }
    }
}

/// Timer event attached to an activity. `eventType` is serialized from the timer value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "TimerEventRepr", try_from = "TimerEventRepr")]
pub struct BoundaryEvent {
    pub id: String,
    pub name: String,
    pub attached_to: String,
    pub event_behavior: EventBehavior,
    pub timer: TimerValue,
    pub escalation_action: Option<EscalationAction>,
}

impl BoundaryEvent {
    pub fn event_type(&self) -> EventType {
        self.timer.event_type()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "TimerEventRepr", try_from = "TimerEventRepr")]
pub struct IntermediateCatchEvent {
    pub id: String,
    pub name: String,
    pub event_behavior: EventBehavior,
    pub timer: TimerValue,
    pub escalation_action: Option<EscalationAction>,
}

impl IntermediateCatchEvent {
    pub fn event_type(&self) -> EventType {
        self.timer.event_type()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimerEventRepr {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attached_to: Option<String>,
    event_type: EventType,
    event_behavior: EventBehavior,
    #[serde(flatten)]
    timer: TimerValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    escalation_action: Option<EscalationAction>,
}

impl TimerEventRepr {
    /// The declared `eventType` must be the one the timer value implies.
    fn checked(self) -> Result<Self, Error> {
        if self.event_type == self.timer.event_type() {
            Ok(self)
        } else {
            Err(Error::EventTypeMismatch(self.id))
        }
    }
}

impl From<BoundaryEvent> for TimerEventRepr {
    fn from(value: BoundaryEvent) -> Self {
        Self {
            event_type: value.event_type(),
            id: value.id,
            name: value.name,
            attached_to: Some(value.attached_to),
            event_behavior: value.event_behavior,
            timer: value.timer,
            escalation_action: value.escalation_action,
        }
    }
}

impl TryFrom<TimerEventRepr> for BoundaryEvent {
    type Error = Error;

    fn try_from(value: TimerEventRepr) -> Result<Self, Self::Error> {
        let value = value.checked()?;
        let Some(attached_to) = value.attached_to else {
            return Err(Error::MissingAttribute {
                element: value.id,
                attribute: "attachedTo",
            });
        };
        Ok(Self {
            id: value.id,
            name: value.name,
            attached_to,
            event_behavior: value.event_behavior,
            timer: value.timer,
            escalation_action: value.escalation_action,
        })
    }
}

impl From<IntermediateCatchEvent> for TimerEventRepr {
    fn from(value: IntermediateCatchEvent) -> Self {
        Self {
            event_type: value.event_type(),
            id: value.id,
            name: value.name,
            attached_to: None,
            event_behavior: value.event_behavior,
            timer: value.timer,
            escalation_action: value.escalation_action,
        }
    }
}

impl TryFrom<TimerEventRepr> for IntermediateCatchEvent {
    type Error = Error;

    fn try_from(value: TimerEventRepr) -> Result<Self, Self::Error> {
        let value = value.checked()?;
        if let Some(target) = value.attached_to {
            return Err(Error::NotSupported(format!(
                "intermediate catch event {} attached to {target}",
                value.id
            )));
        }
        Ok(Self {
            id: value.id,
            name: value.name,
            event_behavior: value.event_behavior,
            timer: value.timer,
            escalation_action: value.escalation_action,
        })
    }
}
