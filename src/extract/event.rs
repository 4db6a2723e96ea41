use super::required;
use crate::{
    bpmn::{Direction, EventBehavior},
    error::{Error, Result},
    model::{BoundaryEvent, DataMapping, EscalationAction, IntermediateCatchEvent, TimerValue},
    reader::{Element, Extension, parse_number},
};
use log::debug;

const TIMER_LITERALS: [&str; 3] = ["timeDuration", "timeDate", "timeCycle"];

#[derive(Debug, Default)]
pub(super) struct Events {
    pub(super) boundary: Vec<BoundaryEvent>,
    pub(super) intermediate: Vec<IntermediateCatchEvent>,
}

pub(super) fn extract(process: &Element, ext: Extension<'_>) -> Result<Events> {
    let mut events = Events::default();
    for element in &process.children {
        if element.is_bpmn("boundaryEvent") {
            let attached_to = required(element, "attachedToRef")?.to_string();
            let TimerEvent {
                id,
                name,
                timer,
                event_behavior,
                escalation_action,
            } = timer_event(element, ext)?;
            events.boundary.push(BoundaryEvent {
                id,
                name,
                attached_to,
                event_behavior,
                timer,
                escalation_action,
            });
        } else if element.is_bpmn("intermediateCatchEvent") {
            let TimerEvent {
                id,
                name,
                timer,
                event_behavior,
                escalation_action,
            } = timer_event(element, ext)?;
            events.intermediate.push(IntermediateCatchEvent {
                id,
                name,
                event_behavior,
                timer,
                escalation_action,
            });
        }
    }
    Ok(events)
}

struct TimerEvent {
    id: String,
    name: String,
    timer: TimerValue,
    event_behavior: EventBehavior,
    escalation_action: Option<EscalationAction>,
}

fn timer_event(element: &Element, ext: Extension<'_>) -> Result<TimerEvent> {
    let id = required(element, "id")?;
    let definition = element
        .bpmn_child("timerEventDefinition")
        .ok_or_else(|| Error::IncompleteTimer(id.into()))?;

    let fixed = TIMER_LITERALS
        .iter()
        .filter_map(|name| definition.bpmn_child(name))
        .map(Element::text)
        .find(|text| !text.is_empty())
        .map(|text| parse_number::<u64>(format!("{id} timer"), text))
        .transpose()?;

    let conditional = ext.attr(definition, "dataPath").map(|data_path| DataMapping {
        id: data_path.to_string(),
        direction: Direction::In,
        data_path: data_path.to_string(),
        data_storage_id: ext.string(definition, "dataStorageId"),
    });

    let timer = match (fixed, conditional) {
        (Some(value), None) => TimerValue::FixedValue(value),
        (None, Some(mapping)) => TimerValue::ConditionalValue(mapping),
        (None, None) => return Err(Error::IncompleteTimer(id.into())),
        (Some(_), Some(_)) => return Err(Error::AmbiguousTimer(id.into())),
    };

    let event_behavior = match element.attr("cancelActivity") {
        Some("false") => EventBehavior::Continue,
        _ => EventBehavior::Interrupting,
    };

    let escalation_action = ext
        .element(element, "escalationAction")
        .map(|action| EscalationAction {
            action_function: action.attr("actionFunction").unwrap_or_default().to_string(),
            data_path: action.attr("dataPath").unwrap_or_default().to_string(),
            data_storage_id: action.attr("dataStorageId").unwrap_or_default().to_string(),
        });

    debug!(
        "{element}: {} {event_behavior}, escalation {}",
        timer.event_type(),
        escalation_action.is_some()
    );
    Ok(TimerEvent {
        id: id.to_string(),
        name: element.attr("name").unwrap_or_default().to_string(),
        timer,
        event_behavior,
        escalation_action,
    })
}
