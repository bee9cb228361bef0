//! GraphQL documents sent to the commerce backend.

/// Reads the session cart.
pub(crate) const GET_CART: &str = r"
query GetCart {
  cart {
    contents {
      nodes {
        key
        product {
          node {
            databaseId
            name
          }
        }
        variation {
          node {
            databaseId
            name
          }
        }
        quantity
        total(format: RAW)
      }
    }
    subtotal(format: RAW)
    total(format: RAW)
  }
}
";

/// Adds a product (or variation) to the session cart.
pub(crate) const ADD_TO_CART: &str = r"
mutation AddToCart($input: AddToCartInput!) {
  addToCart(input: $input) {
    clientMutationId
    cartItem {
      key
      quantity
    }
  }
}
";

/// Sets quantities for existing cart lines.
pub(crate) const UPDATE_ITEM_QUANTITIES: &str = r"
mutation UpdateItemQuantities($input: UpdateItemQuantitiesInput!) {
  updateItemQuantities(input: $input) {
    clientMutationId
    items {
      key
      quantity
    }
    removed {
      key
    }
  }
}
";

/// Places an order from the session cart.
pub(crate) const CHECKOUT: &str = r"
mutation Checkout($input: CheckoutInput!) {
  checkout(input: $input) {
    clientMutationId
    result
    order {
      databaseId
      orderNumber
      status
    }
  }
}
";
