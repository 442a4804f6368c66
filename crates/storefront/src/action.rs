//! UI actions.
//!
//! Each variant maps to exactly one session transition. Actions are
//! serde-tagged so a front-end can send them as JSON:
//!
//! ```json
//! {"action": "add_product", "product_id": "p1"}
//! {"action": "submit_checkout", "method": "cash", "change_for": "50,00"}
//! {"action": "submit_registration", "allergies": "gluten, peanut", "goals": ["vegan"]}
//! ```

use marmita_core::{PaymentKind, Price, ProductId, TagSet};
use serde::{Deserialize, Serialize};

/// A surface that can be closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    CartPanel,
    Login,
    Checkout,
}

/// An action triggered from the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UiAction {
    AddProduct {
        product_id: ProductId,
    },
    RemoveItem {
        product_id: ProductId,
    },
    ToggleCartPanel,
    OpenLogin,
    Close {
        surface: Surface,
    },
    OpenCheckout,
    SubmitCheckout {
        method: PaymentKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        change_for: Option<Price>,
    },
    SubmitRegistration {
        #[serde(default)]
        allergies: TagSet,
        #[serde(default)]
        goals: Vec<String>,
    },
    ConfirmPendingAddition,
    CancelPendingAddition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_product() {
        let action: UiAction =
            serde_json::from_str(r#"{"action": "add_product", "product_id": "p1"}"#).unwrap();
        assert_eq!(
            action,
            UiAction::AddProduct {
                product_id: ProductId::new("p1")
            }
        );
    }

    #[test]
    fn test_parse_unit_actions() {
        for (json, expected) in [
            (r#"{"action": "toggle_cart_panel"}"#, UiAction::ToggleCartPanel),
            (r#"{"action": "open_login"}"#, UiAction::OpenLogin),
            (r#"{"action": "open_checkout"}"#, UiAction::OpenCheckout),
            (
                r#"{"action": "confirm_pending_addition"}"#,
                UiAction::ConfirmPendingAddition,
            ),
            (
                r#"{"action": "cancel_pending_addition"}"#,
                UiAction::CancelPendingAddition,
            ),
            (
                r#"{"action": "close", "surface": "cart_panel"}"#,
                UiAction::Close {
                    surface: Surface::CartPanel,
                },
            ),
        ] {
            assert_eq!(serde_json::from_str::<UiAction>(json).unwrap(), expected);
        }
    }

    #[test]
    fn test_parse_checkout_with_change() {
        let expected = UiAction::SubmitCheckout {
            method: PaymentKind::Cash,
            change_for: Some(Price::from_centavos(5000)),
        };
        for change_for in [r#""50.00""#, r#""50,00""#, r#""R$ 50,00""#, "50"] {
            let json =
                format!(r#"{{"action": "submit_checkout", "method": "cash", "change_for": {change_for}}}"#);
            assert_eq!(serde_json::from_str::<UiAction>(&json).unwrap(), expected);
        }
    }

    #[test]
    fn test_parse_checkout_with_grouped_change() {
        let action: UiAction = serde_json::from_str(
            r#"{"action": "submit_checkout", "method": "cash", "change_for": "R$ 1.000,00"}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            UiAction::SubmitCheckout {
                method: PaymentKind::Cash,
                change_for: Some(Price::from_centavos(100_000)),
            }
        );
    }

    #[test]
    fn test_parse_checkout_rejects_bad_change() {
        let json = r#"{"action": "submit_checkout", "method": "cash", "change_for": "cinquenta"}"#;
        assert!(serde_json::from_str::<UiAction>(json).is_err());
    }

    #[test]
    fn test_parse_registration() {
        let action: UiAction = serde_json::from_str(
            r#"{"action": "submit_registration", "allergies": "Gluten, peanut", "goals": ["vegan"]}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            UiAction::SubmitRegistration {
                allergies: TagSet::parse("gluten,peanut"),
                goals: vec!["vegan".to_string()],
            }
        );
    }

    #[test]
    fn test_unknown_action_rejected() {
        assert!(serde_json::from_str::<UiAction>(r#"{"action": "fly"}"#).is_err());
    }
}
