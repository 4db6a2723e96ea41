use super::required;
use crate::{
    error::{Error, Result},
    model::{DataReference, Participant, Performer},
    reader::{Element, Extension},
};
use log::debug;

/// Lanes of every lane set, nested lanes right after their parent.
pub(super) fn extract(process: &Element, ext: Extension<'_>) -> Result<Vec<Participant>> {
    let mut participants = Vec::new();
    let mut stack: Vec<&Element> = process.bpmn_children("laneSet").collect();
    stack.reverse();

    while let Some(element) = stack.pop() {
        if element.is_bpmn("lane") {
            participants.push(lane(element, ext)?);
            let mut nested: Vec<_> = element.bpmn_children("childLaneSet").collect();
            nested.reverse();
            stack.extend(nested);
        } else {
            let mut lanes: Vec<_> = element.bpmn_children("lane").collect();
            lanes.reverse();
            stack.extend(lanes);
        }
    }
    Ok(participants)
}

fn lane(element: &Element, ext: Extension<'_>) -> Result<Participant> {
    let id = required(element, "id")?;

    // A fixed account takes precedence over a conditional performer.
    let performer = match ext.attr(element, "account").filter(|a| !a.is_empty()) {
        Some(account) => Performer::Account(account.to_string()),
        None => match (
            ext.attr(element, "dataPath"),
            ext.attr(element, "dataStorageId"),
        ) {
            (Some(data_path), Some(data_storage_id)) => Performer::Conditional(DataReference {
                data_path: data_path.to_string(),
                data_storage_id: data_storage_id.to_string(),
            }),
            _ => return Err(Error::MissingPerformer(id.to_string())),
        },
    };

    let tasks = element.bpmn_child_texts("flowNodeRef");
    debug!("lane {id}: {} flow nodes", tasks.len());
    Ok(Participant {
        id: id.to_string(),
        name: element.attr("name").unwrap_or_default().to_string(),
        tasks,
        performer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::load;

    fn participants(lanes: &str) -> Result<Vec<Participant>> {
        let root = load(&format!(
            r#"<process xmlns="http://www.omg.org/spec/BPMN/20100524/MODEL" xmlns:an="urn:an" id="p">{lanes}</process>"#
        ))?;
        extract(&root, Extension::new("urn:an"))
    }

    #[test]
    fn resolves_both_performer_modes() -> Result<()> {
        let lanes = participants(
            r#"<laneSet id="ls">
                 <lane id="lane1" name="Signatories" an:dataPath="AGREEMENT_PARTIES" an:dataStorageId="agreement">
                   <flowNodeRef>reviewTask1</flowNodeRef>
                   <flowNodeRef>signTask1</flowNodeRef>
                 </lane>
                 <lane id="lane2" name="Acme Corp" an:account="0x1040" an:dataPath="ignored" an:dataStorageId="ignored">
                   <flowNodeRef>approveTask1</flowNodeRef>
                 </lane>
               </laneSet>"#,
        )?;
        assert_eq!(lanes.len(), 2);
        assert_eq!(lanes[0].tasks, ["reviewTask1", "signTask1"]);
        assert_eq!(
            lanes[0].performer,
            Performer::Conditional(DataReference {
                data_path: "AGREEMENT_PARTIES".into(),
                data_storage_id: "agreement".into(),
            })
        );
        assert_eq!(lanes[1].performer, Performer::Account("0x1040".into()));
        Ok(())
    }

    #[test]
    fn nested_lanes_follow_their_parent() -> Result<()> {
        let lanes = participants(
            r#"<laneSet>
                 <lane id="outer" an:account="0x1">
                   <childLaneSet><lane id="inner" an:account="0x2"/></childLaneSet>
                 </lane>
                 <lane id="last" an:account="0x3"/>
               </laneSet>"#,
        )?;
        let ids: Vec<_> = lanes.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["outer", "inner", "last"]);
        Ok(())
    }

    #[test]
    fn lane_without_performer_is_rejected() {
        let result = participants(
            r#"<laneSet><lane id="lane1" an:dataPath="AGREEMENT_PARTIES"/></laneSet>"#,
        );
        assert!(matches!(result, Err(Error::MissingPerformer(id)) if id == "lane1"));
    }
}
