use serde::Serialize;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::entities::{Address, Cart, OrderCreated, OrderRequest, PaymentMethod, Profile, ShippingMethod};
use crate::error::ClientError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum CheckoutStep {
    #[default]
    Address,
    Shipping,
    Review,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub subtotal: i64,
    pub shipping_cost: i64,
    pub total: i64,
    pub item_count: i64,
}

/// Three step checkout over the user's cart and saved addresses.
pub struct Checkout {
    client: ApiClient,
    cart: Cart,
    profile: Profile,
    address_id: Option<u64>,
    shipping: ShippingMethod,
    payment: PaymentMethod,
    step: CheckoutStep,
}

impl Checkout {
    pub fn new(client: ApiClient, cart: Cart, profile: Profile) -> Self {
        let address_id = profile.default_address().map(|address| address.id);
        Self {
            client,
            cart,
            profile,
            address_id,
            shipping: ShippingMethod::default(),
            payment: PaymentMethod::default(),
            step: CheckoutStep::default(),
        }
    }

    /// Fetches cart and profile; the first saved address starts selected.
    pub async fn load(client: ApiClient) -> Result<Self, ClientError> {
        let (cart, profile) = tokio::try_join!(client.cart(), client.profile())?;
        Ok(Self::new(client, cart, profile))
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn addresses(&self) -> &[Address] {
        &self.profile.addresses
    }

    pub fn address(&self) -> Option<&Address> {
        self.address_id.and_then(|id| self.profile.address(id))
    }

    pub fn select_address(&mut self, id: u64) -> Result<&Address, ClientError> {
        let address = self
            .profile
            .address(id)
            .ok_or_else(|| ClientError::NotFound(format!("No address with {id} id")))?;
        self.address_id = Some(id);
        Ok(address)
    }

    pub fn shipping(&self) -> ShippingMethod {
        self.shipping
    }

    pub fn set_shipping(&mut self, method: ShippingMethod) {
        self.shipping = method;
    }

    pub fn payment(&self) -> PaymentMethod {
        self.payment
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn next(&mut self) -> Result<CheckoutStep, ClientError> {
        self.step = match self.step {
            CheckoutStep::Address => {
                if self.address().is_none() {
                    return Err(ClientError::NoAddressSelected);
                }
                CheckoutStep::Shipping
            }
            CheckoutStep::Shipping | CheckoutStep::Review => CheckoutStep::Review,
        };
        Ok(self.step)
    }

    pub fn back(&mut self) -> CheckoutStep {
        self.step = match self.step {
            CheckoutStep::Review => CheckoutStep::Shipping,
            CheckoutStep::Shipping | CheckoutStep::Address => CheckoutStep::Address,
        };
        self.step
    }

    pub fn summary(&self) -> OrderSummary {
        let subtotal = self.cart.subtotal();
        let shipping_cost = self.shipping.price();
        OrderSummary {
            subtotal,
            shipping_cost,
            total: subtotal + shipping_cost,
            item_count: self.cart.item_count(),
        }
    }

    pub fn request(&self) -> Result<OrderRequest, ClientError> {
        let address = self.address().ok_or(ClientError::NoAddressSelected)?;
        if self.cart.is_empty() {
            return Err(ClientError::EmptyCart);
        }

        let summary = self.summary();
        Ok(OrderRequest {
            address_id: address.id,
            shipping_method: self.shipping,
            payment_method: self.payment,
            shipping_cost: summary.shipping_cost,
            total: summary.total,
        })
    }

    /// Places the order, then empties the server cart. The order stands even
    /// when clearing the cart fails.
    pub async fn submit(&mut self) -> Result<OrderCreated, ClientError> {
        let request = self.request()?;
        let created = self.client.create_order(&request).await?;
        info!(total = created.total, "Checkout completed");

        if let Err(err) = self.client.clear_cart().await {
            warn!(value = %err, "Order placed but cart was not cleared");
        }
        self.cart.items.clear();
        Ok(created)
    }
}
