mod activity;
mod event;
mod gateway;
mod metadata;
mod participant;
mod transition;

use crate::{
    error::{Error, Result},
    model::{DefaultTransition, Model, Performer, Process},
    reader::{Element, Extension},
};
use log::{debug, info, warn};
use std::collections::{BTreeMap, HashMap, HashSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const START_EVENT: &str = "startEvent";
const END_EVENT: &str = "endEvent";
const EVENT_KINDS: [&str; 5] = [
    START_EVENT,
    END_EVENT,
    "intermediateThrowEvent",
    "intermediateCatchEvent",
    "boundaryEvent",
];

pub(crate) fn extract(root: &Element, ext: Extension<'_>) -> Result<(Model, Vec<Process>)> {
    if !root.is_bpmn("definitions") {
        return Err(Error::NotSupported(format!(
            "root element {} is not bpmn definitions",
            root.name
        )));
    }

    let collaboration = root.bpmn_child("collaboration");
    let model = metadata::extract(root, collaboration, ext)?;

    // Processes without a name borrow the name of the collaboration participant.
    let participant_names: HashMap<&str, &str> = collaboration
        .into_iter()
        .flat_map(|c| c.bpmn_children("participant"))
        .filter_map(|p| p.attr("processRef").zip(p.attr("name")))
        .collect();

    let elements: Vec<&Element> = root.bpmn_children("process").collect();

    #[cfg(feature = "parallel")]
    let processes = elements
        .par_iter()
        .map(|element| process(element, &participant_names, ext))
        .collect::<Result<Vec<_>>>()?;

    #[cfg(not(feature = "parallel"))]
    let processes = elements
        .iter()
        .map(|element| process(element, &participant_names, ext))
        .collect::<Result<Vec<_>>>()?;

    info!(
        "model {} {} with {} data store fields and {} processes",
        model.id,
        model.version,
        model.data_store_fields.len(),
        processes.len()
    );
    Ok((model, processes))
}

pub(crate) fn required<'a>(element: &'a Element, attribute: &'static str) -> Result<&'a str> {
    element
        .attr(attribute)
        .ok_or_else(|| Error::MissingAttribute {
            element: element.to_string(),
            attribute,
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Activity,
    Gateway,
    Boundary,
    Terminal,
    Event,
}

// Id index of everything declared directly in a process.
struct Nodes<'a> {
    kinds: HashMap<&'a str, NodeKind>,
    flows: HashSet<&'a str>,
}

impl<'a> Nodes<'a> {
    fn index(process_id: &str, element: &'a Element) -> Result<Self> {
        let mut kinds = HashMap::new();
        let mut flows = HashSet::new();
        let mut seen = HashSet::new();
        for child in &element.children {
            let Some(id) = child.id() else { continue };
            let kind = if activity::is_activity(child) {
                NodeKind::Activity
            } else if gateway::is_gateway(child) {
                NodeKind::Gateway
            } else if child.is_bpmn("boundaryEvent") {
                NodeKind::Boundary
            } else if child.is_bpmn(START_EVENT) || child.is_bpmn(END_EVENT) {
                NodeKind::Terminal
            } else if EVENT_KINDS.iter().any(|kind| child.is_bpmn(kind)) {
                NodeKind::Event
            } else if child.is_bpmn("sequenceFlow") {
                flows.insert(id);
                if !seen.insert(id) {
                    return Err(duplicate(process_id, id));
                }
                continue;
            } else {
                continue;
            };
            if !seen.insert(id) {
                return Err(duplicate(process_id, id));
            }
            kinds.insert(id, kind);
        }
        Ok(Self { kinds, flows })
    }

    fn is_terminal(&self, id: &str) -> bool {
        self.kinds.get(id) == Some(&NodeKind::Terminal)
    }
}

fn duplicate(process: &str, id: &str) -> Error {
    Error::DuplicateId {
        process: process.into(),
        id: id.into(),
    }
}

fn dangling(process: &str, kind: &'static str, id: &str) -> Error {
    Error::DanglingReference {
        process: process.into(),
        kind,
        id: id.into(),
    }
}

fn process(
    element: &Element,
    participant_names: &HashMap<&str, &str>,
    ext: Extension<'_>,
) -> Result<Process> {
    let id = required(element, "id")?;
    let name = element
        .attr("name")
        .or_else(|| participant_names.get(id).copied())
        .unwrap_or_default();
    debug!("extracting process {id}");

    let nodes = Nodes::index(id, element)?;
    let participants = participant::extract(element, ext)?;

    // Nested lanes come later and win, so a node maps to its innermost lane.
    let mut lanes = HashMap::new();
    for participant in &participants {
        for task in &participant.tasks {
            lanes.insert(task.as_str(), participant.id.as_str());
        }
    }

    let activities = activity::extract(element, &lanes, ext)?;
    let flows = transition::extract(element, ext)?;
    let gateways = gateway::extract(element)?;
    let events = event::extract(element, ext)?;

    let activity_map: BTreeMap<String, String> = activities
        .iter()
        .map(|a| (a.id.clone(), a.name.clone()))
        .collect();

    // Entry and exit are implicit in the execution engine.
    let transitions: Vec<_> = flows
        .into_iter()
        .filter(|t| !nodes.is_terminal(&t.source) && !nodes.is_terminal(&t.target))
        .collect();

    for transition in &transitions {
        for node in [&transition.source, &transition.target] {
            if !nodes.kinds.contains_key(node.as_str()) {
                return Err(dangling(id, "flow node", node));
            }
        }
    }
    for gateway in gateways.xor.iter().chain(&gateways.and) {
        for flow in gateway.incoming.iter().chain(&gateway.outgoing) {
            if !nodes.flows.contains(flow.as_str()) {
                return Err(dangling(id, "sequence flow", flow));
            }
        }
    }
    for participant in &participants {
        for task in &participant.tasks {
            if !nodes.kinds.contains_key(task.as_str()) {
                return Err(dangling(id, "flow node", task));
            }
        }
    }
    for boundary in &events.boundary {
        if nodes.kinds.get(boundary.attached_to.as_str()) != Some(&NodeKind::Activity) {
            return Err(dangling(id, "activity", &boundary.attached_to));
        }
    }

    let mut default_transitions = Vec::new();
    for (gateway, flow) in gateways.defaults {
        let outgoing = gateways
            .xor
            .iter()
            .find(|g| g.id == gateway)
            .is_some_and(|g| g.outgoing.contains(&flow));
        if !outgoing {
            return Err(dangling(id, "outgoing flow", &flow));
        }
        // Outgoing flows are known to exist, so a miss here touches a start or end event.
        let Some(transition) = transitions.iter().find(|t| t.id == flow) else {
            warn!("{gateway}: default flow {flow} touches a start or end event, dropped");
            continue;
        };
        let activity = activity_map
            .get(&transition.target)
            .cloned()
            .unwrap_or_else(|| transition.target.clone());
        debug!("{gateway}: default flow {flow} to {activity}");
        default_transitions.push(DefaultTransition {
            gateway,
            transition: flow,
            activity,
        });
    }

    let conditional_lanes = participants
        .iter()
        .filter(|p| matches!(p.performer, Performer::Conditional(_)))
        .count();
    debug!(
        "process {id}: {} lanes ({conditional_lanes} conditional), {} activities, {} transitions",
        participants.len(),
        activity_map.len(),
        transitions.len()
    );

    Ok(Process {
        id: id.to_string(),
        name: name.to_string(),
        interface: ext.string(element, "interface"),
        participants,
        tasks: activities.tasks,
        user_tasks: activities.user_tasks,
        send_tasks: activities.send_tasks,
        service_tasks: activities.service_tasks,
        sub_processes: activities.sub_processes,
        boundary_events: events.boundary,
        intermediate_catch_events: events.intermediate,
        transitions,
        and_gateways: gateways.and,
        xor_gateways: gateways.xor,
        default_transitions,
        activity_map,
    })
}
