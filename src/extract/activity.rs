use super::required;
use crate::{
    bpmn::{ActivityType, Behavior, Direction, TaskType},
    error::Result,
    model::{Activity, DataMapping},
    reader::{Element, Extension},
};
use log::{debug, warn};
use std::collections::HashMap;

// BPMN element kind and the activity and task type it implies.
const ACTIVITY_KINDS: [(&str, ActivityType, TaskType); 10] = [
    ("task", ActivityType::Task, TaskType::None),
    ("manualTask", ActivityType::Task, TaskType::None),
    ("scriptTask", ActivityType::Task, TaskType::None),
    ("businessRuleTask", ActivityType::Task, TaskType::None),
    ("receiveTask", ActivityType::Task, TaskType::None),
    ("userTask", ActivityType::Task, TaskType::User),
    ("serviceTask", ActivityType::Task, TaskType::Service),
    ("sendTask", ActivityType::Task, TaskType::Send),
    ("subProcess", ActivityType::SubProcess, TaskType::None),
    ("callActivity", ActivityType::SubProcess, TaskType::None),
];

#[derive(Debug, Default)]
pub(super) struct Activities {
    pub(super) tasks: Vec<Activity>,
    pub(super) user_tasks: Vec<Activity>,
    pub(super) send_tasks: Vec<Activity>,
    pub(super) service_tasks: Vec<Activity>,
    pub(super) sub_processes: Vec<Activity>,
}

impl Activities {
    pub(super) fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.tasks
            .iter()
            .chain(&self.user_tasks)
            .chain(&self.send_tasks)
            .chain(&self.service_tasks)
            .chain(&self.sub_processes)
    }

    fn push(&mut self, activity: Activity) {
        let bucket = match (activity.activity_type, activity.task_type) {
            (ActivityType::SubProcess, _) => &mut self.sub_processes,
            (_, TaskType::User) => &mut self.user_tasks,
            (_, TaskType::Service) => &mut self.service_tasks,
            (_, TaskType::Send) => &mut self.send_tasks,
            (_, TaskType::None) => &mut self.tasks,
        };
        bucket.push(activity);
    }
}

fn kind(element: &Element) -> Option<(ActivityType, TaskType)> {
    ACTIVITY_KINDS
        .iter()
        .find(|(name, ..)| element.is_bpmn(name))
        .map(|(_, activity_type, task_type)| (*activity_type, *task_type))
}

pub(super) fn is_activity(element: &Element) -> bool {
    kind(element).is_some()
}

/// `lanes` maps flow node ids to the id of their lane.
pub(super) fn extract(
    process: &Element,
    lanes: &HashMap<&str, &str>,
    ext: Extension<'_>,
) -> Result<Activities> {
    let mut activities = Activities::default();
    for element in &process.children {
        if let Some(kind) = kind(element) {
            activities.push(classify(element, kind, lanes, ext)?);
        }
    }
    Ok(activities)
}

fn classify(
    element: &Element,
    (kind_activity_type, kind_task_type): (ActivityType, TaskType),
    lanes: &HashMap<&str, &str>,
    ext: Extension<'_>,
) -> Result<Activity> {
    let id = required(element, "id")?;
    let name = required(element, "name")?;

    let activity_type = ext
        .code(element, "activityType")
        .unwrap_or(kind_activity_type);
    let task_type = ext.code(element, "taskType").unwrap_or(kind_task_type);
    let behavior = ext.code(element, "behavior").unwrap_or(match task_type {
        TaskType::User | TaskType::Send => Behavior::Block,
        TaskType::None | TaskType::Service => Behavior::Continue,
    });

    // Only user tasks are dispatched to the performer of their lane.
    let assignee = match task_type {
        TaskType::User => lanes.get(id).copied().unwrap_or_default(),
        _ => "",
    };

    let data_mappings = ext
        .elements(element, "dataMapping")
        .map(data_mapping)
        .collect::<Vec<_>>();

    debug!("{element}: {activity_type} {task_type} in lane {assignee:?}");
    Ok(Activity {
        id: id.to_string(),
        name: name.to_string(),
        assignee: assignee.to_string(),
        activity_type,
        task_type,
        behavior,
        multi_instance: element.has_bpmn_child("multiInstanceLoopCharacteristics"),
        application: ext.string(element, "application"),
        sub_process_model_id: ext.string(element, "subProcessModelId"),
        sub_process_definition_id: ext.string(element, "subProcessDefinitionId"),
        data_mappings,
    })
}

fn data_mapping(element: &Element) -> DataMapping {
    let data_path = element.attr("dataPath").unwrap_or_default();
    DataMapping {
        id: element.id().unwrap_or(data_path).to_string(),
        direction: element
            .attr("direction")
            .map(|raw| direction(element, raw))
            .unwrap_or_default(),
        data_path: data_path.to_string(),
        data_storage_id: element.attr("dataStorageId").unwrap_or_default().to_string(),
    }
}

fn direction(element: &Element, raw: &str) -> Direction {
    match raw.trim() {
        "in" | "0" => Direction::In,
        "out" | "1" => Direction::Out,
        other => {
            warn!("{element}: unknown direction {other:?}, using {}", Direction::In);
            Direction::In
        }
    }
}
