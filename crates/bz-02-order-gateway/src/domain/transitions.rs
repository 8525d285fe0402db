//! # Order Transition Table
//!
//! Every legal order transition, as data. The service consults this table
//! after locating an order and before calling any collaborator, so a
//! rejected operation never has side effects.
//!
//! Adding a state or an operation means adding rows, not branches.

use super::errors::GatewayError;
use shared_types::{OrderState, PaymentMethod, Side};
use std::fmt;

use OrderState::*;

/// Mutating gateway operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Confirm,
    Reject,
    Cancel,
    Fulfill,
    Complete,
    OpenDispute,
    CloseDispute,
    ReleaseFunds,
    Refund,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::Confirm,
        Operation::Reject,
        Operation::Cancel,
        Operation::Fulfill,
        Operation::Complete,
        Operation::OpenDispute,
        Operation::CloseDispute,
        Operation::ReleaseFunds,
        Operation::Refund,
    ];

    /// Stores consulted for the order, in lookup order.
    pub fn lookup(&self) -> &'static [Side] {
        match self {
            Operation::Confirm | Operation::Reject | Operation::Fulfill | Operation::Refund => {
                &[Side::Sale]
            }
            Operation::Cancel | Operation::Complete => &[Side::Purchase],
            Operation::OpenDispute | Operation::CloseDispute | Operation::ReleaseFunds => {
                &Side::LOOKUP_ORDER
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Confirm => "confirm",
            Operation::Reject => "reject",
            Operation::Cancel => "cancel",
            Operation::Fulfill => "fulfill",
            Operation::Complete => "complete",
            Operation::OpenDispute => "open_dispute",
            Operation::CloseDispute => "close_dispute",
            Operation::ReleaseFunds => "release_funds",
            Operation::Refund => "refund",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the table.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub operation: Operation,
    pub side: Side,
    pub from: &'static [OrderState],
    pub to: OrderState,
    /// `funded` must be true, checked independently of `from`.
    pub requires_funded: bool,
    /// Payment must be moderated escrow, checked before `from`.
    pub requires_moderated: bool,
    /// Reason given when the current state is not in `from`.
    pub rejection: &'static str,
}

const fn row(
    operation: Operation,
    side: Side,
    from: &'static [OrderState],
    to: OrderState,
    rejection: &'static str,
) -> Transition {
    Transition {
        operation,
        side,
        from,
        to,
        requires_funded: false,
        requires_moderated: false,
        rejection,
    }
}

pub const TRANSITIONS: &[Transition] = &[
    Transition {
        requires_funded: true,
        ..row(
            Operation::Confirm,
            Side::Sale,
            &[Pending],
            Confirmed,
            "order has already been confirmed",
        )
    },
    row(
        Operation::Reject,
        Side::Sale,
        &[Pending],
        Rejected,
        "order has already been confirmed",
    ),
    row(
        Operation::Cancel,
        Side::Purchase,
        &[Pending],
        Canceled,
        "order has already been confirmed",
    ),
    row(
        Operation::Fulfill,
        Side::Sale,
        &[Funded],
        Fulfilled,
        "order must be funded before fulfilling",
    ),
    row(
        Operation::Complete,
        Side::Purchase,
        &[Fulfilled, Resolved],
        Completed,
        "order must be either fulfilled or in closed dispute state to leave the rating",
    ),
    Transition {
        requires_moderated: true,
        ..row(
            Operation::OpenDispute,
            Side::Purchase,
            &[Confirmed, Funded, Fulfilled],
            Disputed,
            "Order must be either confirmed, funded, or fulfilled to start a dispute",
        )
    },
    Transition {
        requires_moderated: true,
        ..row(
            Operation::OpenDispute,
            Side::Sale,
            &[Funded, Fulfilled],
            Disputed,
            "Order must be either funded or fulfilled to start a dispute",
        )
    },
    row(
        Operation::CloseDispute,
        Side::Purchase,
        &[Disputed],
        Decided,
        "Order must be disputed to close the dispute",
    ),
    row(
        Operation::CloseDispute,
        Side::Sale,
        &[Disputed],
        Decided,
        "Order must be disputed to close the dispute",
    ),
    row(
        Operation::ReleaseFunds,
        Side::Purchase,
        &[Decided],
        Resolved,
        "Order must be in DECIDED state to release funds",
    ),
    row(
        Operation::ReleaseFunds,
        Side::Sale,
        &[Decided],
        Resolved,
        "Order must be in DECIDED state to release funds",
    ),
    row(
        Operation::Refund,
        Side::Sale,
        &[Funded, Fulfilled],
        Refunded,
        "order must be funded and not complete or disputed before refunding",
    ),
];

pub const UNFUNDED_REASON: &str = "payment address must be funded before confirmation";
pub const NOT_MODERATED_REASON: &str = "Only moderated orders can be disputed";

/// The row for `operation` on an order held on `side`, if any.
pub fn rule_for(operation: Operation, side: Side) -> Option<&'static Transition> {
    TRANSITIONS
        .iter()
        .find(|t| t.operation == operation && t.side == side)
}

/// Decide the next state, or why there is none.
///
/// Pure: depends only on the arguments. Checks run in this order:
/// payment class, current state, funding.
pub fn next_state(
    operation: Operation,
    side: Side,
    state: OrderState,
    funded: bool,
    payment: PaymentMethod,
) -> Result<OrderState, GatewayError> {
    let rule = rule_for(operation, side).ok_or_else(|| {
        GatewayError::InvalidState(format!("cannot {} a {} order", operation, side))
    })?;

    if rule.requires_moderated && !payment.is_moderated() {
        return Err(GatewayError::PolicyViolation(NOT_MODERATED_REASON.to_string()));
    }
    if !rule.from.contains(&state) {
        return Err(GatewayError::InvalidState(rule.rejection.to_string()));
    }
    if rule.requires_funded && !funded {
        return Err(GatewayError::PreconditionFailed(UNFUNDED_REASON.to_string()));
    }
    Ok(rule.to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;

    fn all_inputs() -> impl Iterator<Item = (OrderState, bool, PaymentMethod)> {
        OrderState::ALL.into_iter().flat_map(|state| {
            [false, true].into_iter().flat_map(move |funded| {
                [
                    PaymentMethod::Direct,
                    PaymentMethod::AddressRequest,
                    PaymentMethod::Moderated,
                ]
                .into_iter()
                .map(move |payment| (state, funded, payment))
            })
        })
    }

    #[test]
    fn test_every_lookup_side_has_a_rule() {
        for op in Operation::ALL {
            for side in op.lookup() {
                assert!(rule_for(op, *side).is_some(), "{op} on {side}");
            }
        }
    }

    #[test]
    fn test_terminal_states_admit_nothing() {
        for t in TRANSITIONS {
            assert!(t.from.iter().all(|s| !s.is_terminal()), "{:?}", t.operation);
        }
    }

    #[test]
    fn test_rejection_is_total_and_typed() {
        for op in Operation::ALL {
            for side in op.lookup() {
                let rule = rule_for(op, *side).unwrap();
                for (state, funded, payment) in all_inputs() {
                    let result = next_state(op, *side, state, funded, payment);
                    let legal = rule.from.contains(&state)
                        && (!rule.requires_funded || funded)
                        && (!rule.requires_moderated || payment.is_moderated());
                    match result {
                        Ok(to) => {
                            assert!(legal);
                            assert_eq!(to, rule.to);
                        }
                        Err(e) => {
                            assert!(!legal);
                            assert!(matches!(
                                e.kind(),
                                ErrorKind::InvalidState
                                    | ErrorKind::PreconditionFailed
                                    | ErrorKind::PolicyViolation
                            ));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_confirm_requires_funding_but_reject_does_not() {
        let pay = PaymentMethod::Direct;
        assert_eq!(
            next_state(Operation::Confirm, Side::Sale, Pending, true, pay),
            Ok(Confirmed)
        );
        assert_eq!(
            next_state(Operation::Confirm, Side::Sale, Pending, false, pay),
            Err(GatewayError::PreconditionFailed(UNFUNDED_REASON.into()))
        );
        assert_eq!(
            next_state(Operation::Reject, Side::Sale, Pending, false, pay),
            Ok(Rejected)
        );
    }

    #[test]
    fn test_confirm_checks_state_before_funding() {
        let err = next_state(Operation::Confirm, Side::Sale, Confirmed, false, PaymentMethod::Direct)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_dispute_requires_moderation_regardless_of_state() {
        for state in OrderState::ALL {
            for side in Side::LOOKUP_ORDER {
                let err = next_state(Operation::OpenDispute, side, state, true, PaymentMethod::Direct)
                    .unwrap_err();
                assert_eq!(err.kind(), ErrorKind::PolicyViolation);
            }
        }
    }

    #[test]
    fn test_dispute_states_depend_on_side() {
        let pay = PaymentMethod::Moderated;
        assert_eq!(
            next_state(Operation::OpenDispute, Side::Purchase, Confirmed, false, pay),
            Ok(Disputed)
        );
        assert!(next_state(Operation::OpenDispute, Side::Sale, Confirmed, false, pay).is_err());
        assert_eq!(
            next_state(Operation::OpenDispute, Side::Sale, Fulfilled, true, pay),
            Ok(Disputed)
        );
    }

    #[test]
    fn test_release_funds_only_from_decided() {
        for side in Side::LOOKUP_ORDER {
            for state in [Funded, Fulfilled, Disputed, Resolved] {
                let err =
                    next_state(Operation::ReleaseFunds, side, state, true, PaymentMethod::Moderated)
                        .unwrap_err();
                assert_eq!(err.kind(), ErrorKind::InvalidState);
            }
            assert_eq!(
                next_state(Operation::ReleaseFunds, side, Decided, true, PaymentMethod::Moderated),
                Ok(Resolved)
            );
        }
    }

    #[test]
    fn test_no_rule_for_wrong_side() {
        let err = next_state(Operation::Fulfill, Side::Purchase, Funded, true, PaymentMethod::Direct)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }
}
