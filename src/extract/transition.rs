use super::required;
use crate::{
    error::Result,
    model::{Condition, Transition},
    reader::{Element, Extension, decode_code},
};
use log::debug;

/// Every sequence flow of the process, in document order.
pub(super) fn extract(process: &Element, ext: Extension<'_>) -> Result<Vec<Transition>> {
    process
        .bpmn_children("sequenceFlow")
        .map(|flow| {
            let transition = Transition {
                id: required(flow, "id")?.to_string(),
                source: required(flow, "sourceRef")?.to_string(),
                target: required(flow, "targetRef")?.to_string(),
                condition: ext.element(flow, "condition").map(condition),
            };
            debug!(
                "{flow}: {} -> {}{}",
                transition.source,
                transition.target,
                if transition.condition.is_some() { " (conditional)" } else { "" }
            );
            Ok(transition)
        })
        .collect()
}

fn condition(element: &Element) -> Condition {
    let string = |name| element.attr(name).unwrap_or_default().to_string();
    Condition {
        lh_data_storage_id: string("lhDataStorageId"),
        lh_data_path: string("lhDataPath"),
        operator: element
            .attr("operator")
            .map(|raw| decode_code(element, "operator", raw))
            .unwrap_or_default(),
        rh_value: string("rhValue"),
        data_type: element
            .attr("dataType")
            .map(|raw| decode_code(element, "dataType", raw))
            .unwrap_or_default(),
    }
}
