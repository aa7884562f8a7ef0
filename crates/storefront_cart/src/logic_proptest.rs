// --- File: crates/storefront_cart/src/logic_proptest.rs ---
#[cfg(test)]
mod tests {
    use crate::logic::{reduce, CartAction, CartItem, CartState, MAX_QUANTITY};
    use proptest::prelude::*;

    fn action_strategy() -> impl Strategy<Value = CartAction> {
        let id = prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(String::from);
        prop_oneof![
            (id.clone(), 0i64..100_000, 0u32..50).prop_map(|(product_id, price, quantity)| {
                CartAction::AddItem {
                    item: CartItem {
                        name: product_id.clone(),
                        product_id,
                        unit_price_cents: price,
                        quantity,
                    },
                }
            }),
            id.clone()
                .prop_map(|product_id| CartAction::RemoveItem { product_id }),
            (id, 0u32..2_000).prop_map(|(product_id, quantity)| CartAction::SetQuantity {
                product_id,
                quantity
            }),
            Just(CartAction::Clear),
        ]
    }

    proptest! {
        #[test]
        fn total_matches_lines(actions in prop::collection::vec(action_strategy(), 0..40)) {
            let cart = actions
                .into_iter()
                .fold(CartState::default(), |state, action| reduce(&state, action));

            let expected: i64 = cart
                .items
                .iter()
                .map(|i| i.unit_price_cents * i.quantity as i64)
                .sum();
            prop_assert_eq!(cart.total_cents(), expected);
            prop_assert_eq!(cart.checked_total_cents(), Some(expected));

            let mut ids: Vec<&str> = cart.items.iter().map(|i| i.product_id.as_str()).collect();
            let before = ids.len();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), before);

            for line in &cart.items {
                prop_assert!(line.quantity >= 1 && line.quantity <= MAX_QUANTITY);
            }
        }
    }
}
