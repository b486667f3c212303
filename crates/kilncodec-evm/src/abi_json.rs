//! Load an [`Interface`] from standard Ethereum ABI JSON.

use alloy_json_abi::JsonAbi;
use kilncodec_core::{
    error::InterfaceError,
    interface::{Event, EventParam, Function, Interface, Param, ParamType},
};

/// Parse ABI JSON into an interface definition.
///
/// Constructors, errors, fallback and receive entries are ignored. Any
/// function or event input outside the supported type set is rejected.
pub fn interface_from_abi_json(name: &str, abi_json: &str) -> Result<Interface, InterfaceError> {
    let abi: JsonAbi = serde_json::from_str(abi_json).map_err(|e| InterfaceError::InvalidAbiJson {
        reason: e.to_string(),
    })?;

    let mut functions = Vec::new();
    for func in abi.functions() {
        let inputs = func
            .inputs
            .iter()
            .map(|p| Ok(Param::new(p.name.clone(), parse_type(&func.name, &p.ty)?)))
            .collect::<Result<Vec<_>, InterfaceError>>()?;
        functions.push(Function::new(func.name.clone(), inputs));
    }

    let mut events = Vec::new();
    for event in abi.events() {
        if event.anonymous {
            // Anonymous events carry no signature topic and cannot be looked up.
            continue;
        }
        let inputs = event
            .inputs
            .iter()
            .map(|p| {
                Ok(EventParam::new(
                    p.name.clone(),
                    parse_type(&event.name, &p.ty)?,
                    p.indexed,
                ))
            })
            .collect::<Result<Vec<_>, InterfaceError>>()?;
        events.push(Event::new(event.name.clone(), inputs));
    }

    Interface::new(name, functions, events)
}

fn parse_type(item: &str, ty: &str) -> Result<ParamType, InterfaceError> {
    ty.parse().map_err(|_| InterfaceError::UnsupportedType {
        item: item.to_string(),
        ty: ty.to_string(),
    })
}
