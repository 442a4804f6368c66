//! End-to-end cart scenarios driven through `UiAction`s.

use marmita_core::{PaymentKind, PaymentMethod, Price, ProductId, TagSet};
use marmita_integration_tests::memory_session;
use marmita_storefront::{Outcome, StorefrontError, Surface, UiAction};

fn add(id: &str) -> UiAction {
    UiAction::AddProduct {
        product_id: ProductId::new(id),
    }
}

fn remove(id: &str) -> UiAction {
    UiAction::RemoveItem {
        product_id: ProductId::new(id),
    }
}

fn register(allergies: &str) -> UiAction {
    UiAction::SubmitRegistration {
        allergies: TagSet::parse(allergies),
        goals: Vec::new(),
    }
}

// =============================================================================
// Cart Store
// =============================================================================

#[test]
fn test_salad_added_twice() {
    let mut session = memory_session();
    session.dispatch(add("p1")).unwrap();
    session.dispatch(add("p1")).unwrap();

    let items = session.cart().items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, ProductId::new("p1"));
    assert_eq!(items[0].quantity, 2);
    assert_eq!(session.cart().total(), Price::from_centavos(2500));
    assert_eq!(session.cart().item_count(), 2);

    let view = session.view();
    assert_eq!(view.total, "R$ 25,00");
    assert_eq!(view.rows[0].line_price, "R$ 25,00");
}

#[test]
fn test_item_count_tracks_quantities_through_mixed_sequence() {
    let mut session = memory_session();
    let script = [
        (add("p1"), 1),
        (add("p4"), 2),
        (add("p1"), 3),
        (remove("p9"), 3),
        (add("p3"), 4),
        (remove("p1"), 2),
        (remove("p1"), 2),
        (remove("p4"), 1),
        (remove("p3"), 0),
        (remove("p3"), 0),
    ];

    for (action, expected) in script {
        session.dispatch(action).unwrap();
        let summed: u64 = session
            .cart()
            .items()
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum();
        assert_eq!(session.cart().item_count(), expected);
        assert_eq!(session.cart().item_count(), summed);
    }
}

#[test]
fn test_remove_absent_leaves_cart_unchanged() {
    let mut session = memory_session();
    session.dispatch(add("p4")).unwrap();
    let before = session.cart().clone();

    session.dispatch(remove("nope")).unwrap();
    assert_eq!(session.cart(), &before);
}

// =============================================================================
// Render / View Sync
// =============================================================================

#[test]
fn test_every_mutation_renders_exactly_once() {
    let mut session = memory_session();
    let initial = session.renderer().renders();

    session.dispatch(add("p1")).unwrap();
    session.dispatch(remove("p1")).unwrap();
    session.dispatch(UiAction::ToggleCartPanel).unwrap();
    session.dispatch(UiAction::OpenLogin).unwrap();

    assert_eq!(session.renderer().renders(), initial + 2);
}

#[test]
fn test_rendered_view_matches_projection() {
    let mut session = memory_session();
    session.dispatch(add("p2")).unwrap();
    session.dispatch(add("p3")).unwrap();

    let rendered = session.renderer().last().unwrap().clone();
    assert_eq!(rendered, session.view());
    assert_eq!(session.view(), session.view());
    assert_eq!(rendered.total, "R$ 45,90");
    assert_eq!(rendered.checkout_total, rendered.total);
    assert!(rendered.checkout_enabled);
    assert!(!rendered.show_empty_state);
}

// =============================================================================
// Allergy Gate
// =============================================================================

#[test]
fn test_gluten_allergy_requires_confirmation() {
    let mut session = memory_session();
    session.dispatch(register("gluten")).unwrap();

    let outcome = session.dispatch(add("p1")).unwrap();
    assert_eq!(
        outcome,
        Outcome::AllergyPrompt {
            product_id: ProductId::new("p1"),
            allergen: "gluten".to_string(),
        }
    );
    assert!(session.cart().is_empty());

    session.dispatch(UiAction::ConfirmPendingAddition).unwrap();
    assert_eq!(session.cart().item_count(), 1);
    assert!(session.pending().is_none());
}

#[test]
fn test_peanut_allergy_cancelled() {
    let mut session = memory_session();
    session.dispatch(register("peanut")).unwrap();

    let outcome = session.dispatch(add("p2")).unwrap();
    assert!(matches!(outcome, Outcome::AllergyPrompt { ref allergen, .. } if allergen == "peanut"));

    session.dispatch(UiAction::CancelPendingAddition).unwrap();
    assert!(session.cart().is_empty());
    assert!(session.pending().is_none());
}

#[test]
fn test_first_declared_allergy_is_reported() {
    let mut session = memory_session();
    session.dispatch(register("Dairy, gluten")).unwrap();

    let outcome = session.dispatch(add("p1")).unwrap();
    assert!(matches!(outcome, Outcome::AllergyPrompt { ref allergen, .. } if allergen == "dairy"));
}

#[test]
fn test_unrelated_allergy_adds_directly() {
    let mut session = memory_session();
    session.dispatch(register("shellfish")).unwrap();

    let outcome = session.dispatch(add("p1")).unwrap();
    assert_eq!(
        outcome,
        Outcome::Added {
            product_id: ProductId::new("p1")
        }
    );
}

// =============================================================================
// Checkout
// =============================================================================

#[test]
fn test_checkout_with_empty_cart_is_refused() {
    let mut session = memory_session();
    let err = session.dispatch(UiAction::OpenCheckout).unwrap_err();
    assert!(matches!(err, StorefrontError::EmptyCart));
    assert!(err.is_user_facing());
    assert!(!session.overlays().checkout);
}

#[test]
fn test_cash_checkout_flow() {
    let mut session = memory_session();
    session.dispatch(add("p3")).unwrap();
    session.dispatch(UiAction::OpenCheckout).unwrap();

    let err = session
        .dispatch(UiAction::SubmitCheckout {
            method: PaymentKind::Cash,
            change_for: None,
        })
        .unwrap_err();
    assert!(matches!(err, StorefrontError::Payment(_)));
    assert_eq!(session.cart().item_count(), 1);

    let outcome = session
        .dispatch(UiAction::SubmitCheckout {
            method: PaymentKind::Cash,
            change_for: Some(Price::from_centavos(5000)),
        })
        .unwrap();
    let Outcome::OrderPlaced { order } = outcome else {
        panic!("expected an order, got {outcome:?}");
    };
    assert_eq!(order.total, Price::from_centavos(2400));
    assert_eq!(
        order.payment,
        PaymentMethod::Cash {
            change_for: Price::from_centavos(5000)
        }
    );

    assert!(session.cart().is_empty());
    assert_eq!(session.cart().total(), Price::ZERO);
    assert_eq!(session.view().total, "R$ 0,00");
    assert!(!session.overlays().checkout);
}

#[test]
fn test_order_confirmation_serializes() {
    let mut session = memory_session();
    session.dispatch(add("p4")).unwrap();
    let outcome = session
        .dispatch(UiAction::SubmitCheckout {
            method: PaymentKind::Card,
            change_for: None,
        })
        .unwrap();

    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["outcome"], "order_placed");
    assert_eq!(value["order"]["payment"]["method"], "card");
    assert_eq!(value["order"]["item_count"], 1);
}

// =============================================================================
// Surfaces
// =============================================================================

#[test]
fn test_surfaces_open_and_close() {
    let mut session = memory_session();
    session.dispatch(UiAction::ToggleCartPanel).unwrap();
    session.dispatch(UiAction::OpenLogin).unwrap();
    assert!(session.overlays().cart_panel);
    assert!(session.overlays().login);

    session
        .dispatch(UiAction::Close {
            surface: Surface::CartPanel,
        })
        .unwrap();
    assert!(!session.overlays().cart_panel);

    session.dispatch(register("")).unwrap();
    assert!(!session.overlays().login);
}

#[test]
fn test_fixture_menu_is_complete() {
    let menu = marmita_integration_tests::menu();
    assert_eq!(menu.len(), 4);
    for id in ["p1", "p2", "p3", "p4"] {
        assert!(menu.get(&ProductId::new(id)).is_some(), "missing {id}");
    }
}
