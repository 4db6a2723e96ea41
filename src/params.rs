//! Which declared data store fields a process actually touches.
//!
//! Agreements only need values for the parameters their formation and execution processes
//! read or write: lane performers, activity data mappings, timer values and transition
//! conditions.

use crate::{
    bpmn::ParameterType,
    model::{DataStoreField, Performer, Process},
};
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};

/// Data store id of agreement parameters.
pub const AGREEMENT_DATA_ID: &str = "agreement";

/// Data path of the agreement signatories, never a parameter of its own.
pub const AGREEMENT_PARTIES: &str = "AGREEMENT_PARTIES";

/// Fields of `data_storage_id` referenced by any of `processes`, keyed by data path.
///
/// References to paths without a declared field are skipped. The walk stops as soon as every
/// declared field of the storage has been found.
pub fn required_parameters<'a>(
    fields: &[DataStoreField],
    processes: impl IntoIterator<Item = &'a Process>,
    data_storage_id: &str,
) -> BTreeMap<String, ParameterType> {
    let declared: HashMap<&str, ParameterType> = fields
        .iter()
        .filter(|f| f.data_storage_id == data_storage_id && f.data_path != AGREEMENT_PARTIES)
        .map(|f| (f.data_path.as_str(), f.parameter_type))
        .collect();

    let mut required = BTreeMap::new();
    if declared.is_empty() {
        return required;
    }

    let mut pending: Vec<(&str, &str)> = Vec::new();
    for process in processes {
        pending.extend(references(process));
    }
    pending.reverse();

    while let Some((storage, path)) = pending.pop() {
        if storage != data_storage_id || path == AGREEMENT_PARTIES || required.contains_key(path) {
            continue;
        }
        match declared.get(path) {
            Some(parameter_type) => {
                required.insert(path.to_string(), *parameter_type);
                if required.len() == declared.len() {
                    debug!("all {} fields of {data_storage_id} are required", declared.len());
                    break;
                }
            }
            None => warn!("{data_storage_id}.{path} is referenced but not declared"),
        }
    }
    required
}

// (data storage id, data path) pairs in participant, activity, event, transition order.
fn references(process: &Process) -> Vec<(&str, &str)> {
    let participants = process.participants.iter().filter_map(|p| match &p.performer {
        Performer::Conditional(reference) => Some((
            reference.data_storage_id.as_str(),
            reference.data_path.as_str(),
        )),
        Performer::Account(_) => None,
    });
    let mappings = process
        .activities()
        .flat_map(|a| &a.data_mappings)
        .map(|m| (m.data_storage_id.as_str(), m.data_path.as_str()));
    let timers = process
        .boundary_events
        .iter()
        .map(|e| &e.timer)
        .chain(process.intermediate_catch_events.iter().map(|e| &e.timer))
        .filter_map(|timer| timer.conditional_value())
        .map(|m| (m.data_storage_id.as_str(), m.data_path.as_str()));
    let conditions = process
        .transitions
        .iter()
        .filter_map(|t| t.condition.as_ref())
        .map(|c| (c.lh_data_storage_id.as_str(), c.lh_data_path.as_str()));

    participants
        .chain(mappings)
        .chain(timers)
        .chain(conditions)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bpmn::{ActivityType, Behavior, DataType, Direction, Operator, TaskType},
        model::{Activity, Condition, DataMapping, DataReference, Participant, Transition},
    };

    fn field(storage: &str, path: &str, parameter_type: ParameterType) -> DataStoreField {
        DataStoreField {
            data_storage_id: storage.into(),
            data_path: path.into(),
            parameter_type,
        }
    }

    fn process() -> Process {
        Process {
            id: "p".into(),
            name: "P".into(),
            interface: String::new(),
            participants: vec![Participant {
                id: "lane".into(),
                name: "Parties".into(),
                tasks: vec![],
                performer: Performer::Conditional(DataReference {
                    data_path: AGREEMENT_PARTIES.into(),
                    data_storage_id: AGREEMENT_DATA_ID.into(),
                }),
            }],
            tasks: vec![],
            user_tasks: vec![Activity {
                id: "u".into(),
                name: "Enter Age".into(),
                assignee: "lane".into(),
                activity_type: ActivityType::Task,
                task_type: TaskType::User,
                behavior: Behavior::Block,
                multi_instance: false,
                application: String::new(),
                sub_process_model_id: String::new(),
                sub_process_definition_id: String::new(),
                data_mappings: vec![DataMapping {
                    id: "Age".into(),
                    direction: Direction::Out,
                    data_path: "Age".into(),
                    data_storage_id: AGREEMENT_DATA_ID.into(),
                }],
            }],
            send_tasks: vec![],
            service_tasks: vec![],
            sub_processes: vec![],
            boundary_events: vec![],
            intermediate_catch_events: vec![],
            transitions: vec![Transition {
                id: "f".into(),
                source: "u".into(),
                target: "u".into(),
                condition: Some(Condition {
                    lh_data_storage_id: AGREEMENT_DATA_ID.into(),
                    lh_data_path: "Missing".into(),
                    operator: Operator::Gte,
                    rh_value: "18".into(),
                    data_type: DataType::Int,
                }),
            }],
            and_gateways: vec![],
            xor_gateways: vec![],
            default_transitions: vec![],
            activity_map: BTreeMap::new(),
        }
    }

    #[test]
    fn collects_declared_references_only() {
        let fields = [
            field("PROCESS_INSTANCE", "agreement", ParameterType::ContractAddress),
            field(AGREEMENT_DATA_ID, AGREEMENT_PARTIES, ParameterType::SigningParty),
            field(AGREEMENT_DATA_ID, "Age", ParameterType::Number),
            field(AGREEMENT_DATA_ID, "ContentId", ParameterType::String),
        ];
        let process = process();
        let required = required_parameters(&fields, [&process], AGREEMENT_DATA_ID);
        assert_eq!(
            required.into_iter().collect::<Vec<_>>(),
            [("Age".to_string(), ParameterType::Number)]
        );
    }

    #[test]
    fn nothing_declared_nothing_required() {
        let process = process();
        assert!(required_parameters(&[], [&process], AGREEMENT_DATA_ID).is_empty());
    }
}
