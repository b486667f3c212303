//! The closed set of Kiln operations the decoder recognises.

use kilncodec_core::{
    error::InterfaceError,
    event::DepositEvent,
    interface::{Interface, ParamType},
};
use std::fmt;

/// One recognised Kiln operation.
///
/// The set is fixed by the protocol: three functions and one event. Selector
/// lookup resolves to a variant, and each variant knows which interface
/// item it decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KilnOperation {
    /// `deposit()`
    Deposit,
    /// `requestValidatorsExit(bytes _publicKeys)`
    ValidatorsExit,
    /// `batchWithdrawCLFee(bytes _publicKeys)`
    BatchWithdrawClFee,
    /// `DepositEvent(bytes,bytes,bytes,bytes,bytes)`
    DepositEvent,
}

impl KilnOperation {
    /// The three call operations, in selector-table order.
    pub const CALLS: [KilnOperation; 3] =
        [Self::Deposit, Self::ValidatorsExit, Self::BatchWithdrawClFee];

    /// Name of the interface item this operation decodes.
    pub const fn item_name(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::ValidatorsExit => "requestValidatorsExit",
            Self::BatchWithdrawClFee => "batchWithdrawCLFee",
            Self::DepositEvent => "DepositEvent",
        }
    }

    /// Returns `true` for function-call operations.
    pub const fn is_call(&self) -> bool {
        !matches!(self, Self::DepositEvent)
    }

    /// Resolve an interface item name back to its operation.
    pub fn from_item_name(name: &str) -> Option<Self> {
        [
            Self::Deposit,
            Self::ValidatorsExit,
            Self::BatchWithdrawClFee,
            Self::DepositEvent,
        ]
        .into_iter()
        .find(|op| op.item_name() == name)
    }

    /// Check that `interface` declares this operation's item with the
    /// parameter shape the decoder relies on.
    pub fn check(&self, interface: &Interface) -> Result<(), InterfaceError> {
        let name = self.item_name();
        let missing = || InterfaceError::MissingItem { name: name.to_string() };
        let shape = |reason: &str| InterfaceError::UnexpectedShape {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        match self {
            Self::Deposit => {
                let func = interface.function(name).ok_or_else(missing)?;
                if !func.inputs.is_empty() {
                    return Err(shape("expected no inputs"));
                }
            }
            Self::ValidatorsExit | Self::BatchWithdrawClFee => {
                let func = interface.function(name).ok_or_else(missing)?;
                match func.inputs.as_slice() {
                    [p] if p.name == "_publicKeys" && p.ty == ParamType::Bytes => {}
                    _ => return Err(shape("expected a single `bytes _publicKeys` input")),
                }
            }
            Self::DepositEvent => {
                let event = interface.event(name).ok_or_else(missing)?;
                let names: Vec<&str> = event.inputs.iter().map(|p| p.name.as_str()).collect();
                if names != DepositEvent::FIELDS {
                    return Err(shape("expected pubkey, withdrawal_credentials, amount, signature, index"));
                }
                if !event.inputs.iter().all(|p| p.ty == ParamType::Bytes && !p.indexed) {
                    return Err(shape("expected every field to be non-indexed `bytes`"));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for KilnOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.item_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kilncodec_core::interface::{Event, EventParam, Function, Param};

    fn deposit_event_interface(ty: ParamType, indexed: bool) -> Interface {
        let inputs = DepositEvent::FIELDS
            .iter()
            .map(|name| EventParam::new(*name, ty, indexed))
            .collect();
        Interface::new("Kiln", vec![], vec![Event::new("DepositEvent", inputs)]).unwrap()
    }

    #[test]
    fn item_names_round_trip() {
        for op in KilnOperation::CALLS {
            assert!(op.is_call());
            assert_eq!(KilnOperation::from_item_name(op.item_name()), Some(op));
        }
        assert!(!KilnOperation::DepositEvent.is_call());
        assert_eq!(KilnOperation::from_item_name("withdraw"), None);
    }

    #[test]
    fn bundled_interface_passes_checks() {
        let iface = crate::interface_from_abi_json("Kiln", crate::KILN_ABI_JSON).unwrap();
        for op in KilnOperation::CALLS {
            op.check(&iface).unwrap();
        }
        KilnOperation::DepositEvent.check(&iface).unwrap();
    }

    #[test]
    fn wrong_shape_rejected() {
        let iface = Interface::new(
            "Kiln",
            vec![Function::new("deposit", vec![Param::new("x", ParamType::Uint(256))])],
            vec![],
        )
        .unwrap();
        assert!(matches!(
            KilnOperation::Deposit.check(&iface),
            Err(InterfaceError::UnexpectedShape { .. })
        ));
        assert_eq!(
            KilnOperation::ValidatorsExit.check(&iface),
            Err(InterfaceError::MissingItem { name: "requestValidatorsExit".into() })
        );
    }

    #[test]
    fn deposit_event_field_types_checked() {
        KilnOperation::DepositEvent
            .check(&deposit_event_interface(ParamType::Bytes, false))
            .unwrap();
        for iface in [
            deposit_event_interface(ParamType::Uint(256), false),
            deposit_event_interface(ParamType::FixedBytes(32), false),
            deposit_event_interface(ParamType::Bytes, true),
        ] {
            assert!(matches!(
                KilnOperation::DepositEvent.check(&iface),
                Err(InterfaceError::UnexpectedShape { .. })
            ));
        }
    }
}
