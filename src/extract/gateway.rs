use super::required;
use crate::{
    bpmn::GatewayType,
    error::{Error, Result},
    model::Gateway,
    reader::Element,
};
use log::{debug, warn};

const UNSUPPORTED: [&str; 3] = ["inclusiveGateway", "eventBasedGateway", "complexGateway"];

#[derive(Debug, Default)]
pub(super) struct Gateways {
    pub(super) xor: Vec<Gateway>,
    pub(super) and: Vec<Gateway>,
    /// `(gateway id, default flow id)` of exclusive gateways.
    pub(super) defaults: Vec<(String, String)>,
}

pub(super) fn is_gateway(element: &Element) -> bool {
    element.is_bpmn("exclusiveGateway")
        || element.is_bpmn("parallelGateway")
        || UNSUPPORTED.iter().any(|name| element.is_bpmn(name))
}

pub(super) fn extract(process: &Element) -> Result<Gateways> {
    let mut gateways = Gateways::default();
    for element in &process.children {
        let gateway_type = if element.is_bpmn("exclusiveGateway") {
            GatewayType::Xor
        } else if element.is_bpmn("parallelGateway") {
            GatewayType::And
        } else if UNSUPPORTED.iter().any(|name| element.is_bpmn(name)) {
            return Err(Error::NotSupported(element.to_string()));
        } else {
            continue;
        };

        let gateway = Gateway {
            id: required(element, "id")?.to_string(),
            gateway_type,
            incoming: element.bpmn_child_texts("incoming"),
            outgoing: element.bpmn_child_texts("outgoing"),
        };
        debug!(
            "{element}: {gateway_type} in [{}] out [{}]",
            gateway.incoming.join(", "),
            gateway.outgoing.join(", ")
        );

        match (gateway_type, element.attr("default")) {
            (GatewayType::Xor, Some(flow)) => {
                gateways.defaults.push((gateway.id.clone(), flow.to_string()));
                gateways.xor.push(gateway);
            }
            (GatewayType::Xor, None) => gateways.xor.push(gateway),
            (GatewayType::And, default) => {
                if let Some(flow) = default {
                    warn!("{element}: default flow {flow} ignored on parallel gateway");
                }
                gateways.and.push(gateway);
            }
        }
    }
    Ok(gateways)
}
