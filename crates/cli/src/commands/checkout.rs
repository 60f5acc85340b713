//! Checkout command.

use cornershop_storefront::billing::BillingDetails;
use cornershop_storefront::checkout::place_order;

use super::{CliError, Context};

/// Billing details from command-line arguments.
#[must_use]
pub const fn billing(name: String, email: String, address: String, phone: String) -> BillingDetails {
    BillingDetails {
        name,
        email,
        address,
        phone,
    }
}

/// Validate billing details and place the order, clearing the cart.
///
/// # Errors
///
/// Returns the first billing rule that failed; the cart is left as is.
pub fn place(ctx: &mut Context, details: &BillingDetails) -> Result<String, CliError> {
    let mut store = ctx.cart();
    let confirmation = place_order(&mut store, details)?;
    Ok(format!(
        "{}\nTotal: {} ({} items)",
        confirmation.message(),
        confirmation.total.display(),
        confirmation.item_count
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::cart::{add, show};
    use crate::commands::tests::context;

    fn ann() -> BillingDetails {
        billing(
            "Ann".to_string(),
            "ann@example.com".to_string(),
            "12 Main St".to_string(),
            "08031234567".to_string(),
        )
    }

    #[test]
    fn test_place_order() {
        let (_dir, mut ctx) = context();
        add(&mut ctx, "2").unwrap();

        let out = place(&mut ctx, &ann()).unwrap();
        assert_eq!(
            out,
            "Thank you, Ann! Your order has been placed.\nTotal: $80.00 (1 items)"
        );
        assert_eq!(show(&mut ctx), "Your cart is empty.");
    }

    #[test]
    fn test_invalid_phone_keeps_cart() {
        let (_dir, mut ctx) = context();
        add(&mut ctx, "2").unwrap();

        let details = BillingDetails {
            phone: "+234".to_string(),
            ..ann()
        };
        let err = place(&mut ctx, &details).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid phone number.");
        assert!(show(&mut ctx).ends_with("Items: 1  Total: $80.00"));
    }
}
