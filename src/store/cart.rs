use serde::Serialize;
use std::sync::RwLock;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::entities::{AddToCart, Cart, Product};
use crate::error::ClientError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub subtotal: i64,
    pub item_count: i64,
    pub line_count: usize,
}

/// Local mirror of the server cart.
///
/// Edits are applied to the local copy first, sent to the server, then the
/// cart is refetched. A rejected edit restores the copy taken before it.
pub struct CartStore {
    client: ApiClient,
    cart: RwLock<Cart>,
    // held for the whole begin/send/refetch sequence of one edit
    edits: Mutex<()>,
}

impl CartStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            cart: RwLock::new(Cart::default()),
            edits: Mutex::new(()),
        }
    }

    /// Fetches the server cart and returns a store holding it.
    pub async fn load(client: ApiClient) -> Result<Self, ClientError> {
        let store = Self::new(client);
        store.refresh().await?;
        Ok(store)
    }

    pub fn cart(&self) -> Cart {
        self.cart.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn summary(&self) -> CartSummary {
        let cart = self.cart.read().unwrap_or_else(|e| e.into_inner());
        CartSummary {
            subtotal: cart.subtotal(),
            item_count: cart.item_count(),
            line_count: cart.line_count(),
        }
    }

    pub async fn refresh(&self) -> Result<Cart, ClientError> {
        let cart = self.client.cart().await?;
        self.replace(cart.clone());
        Ok(cart)
    }

    /// Checks stock locally, then posts and refetches. Nothing is applied
    /// optimistically because the new line's id is only known to the server.
    pub async fn add(&self, product: &Product, quantity: i64) -> Result<Cart, ClientError> {
        if !product.is_in_stock() || quantity > product.stock_quantity {
            return Err(ClientError::InsufficientStock {
                available: product.stock_quantity,
                requested: quantity,
            });
        }

        let _edit = self.edits.lock().await;
        let input = AddToCart {
            product_id: product.id,
            quantity,
        };
        self.client.add_to_cart(&input).await?;
        info!(product_id = product.id, quantity, "Added to cart");
        self.refresh().await
    }

    pub async fn increment(&self, item_id: u64) -> Result<Cart, ClientError> {
        let edit = self.edits.lock().await;
        let current = self.quantity_of(item_id)?;
        self.send_quantity(&edit, item_id, current + 1).await
    }

    /// A line at quantity 1 is left alone; use [`CartStore::remove`] instead.
    pub async fn decrement(&self, item_id: u64) -> Result<Cart, ClientError> {
        let edit = self.edits.lock().await;
        let current = self.quantity_of(item_id)?;
        if current <= 1 {
            return Ok(self.cart());
        }
        self.send_quantity(&edit, item_id, current - 1).await
    }

    pub async fn set_quantity(&self, item_id: u64, quantity: i64) -> Result<Cart, ClientError> {
        let edit = self.edits.lock().await;
        self.send_quantity(&edit, item_id, quantity).await
    }

    /// `_edit` is the caller's guard on `edits`, held from reading the old
    /// quantity until the refetch.
    async fn send_quantity(
        &self,
        _edit: &MutexGuard<'_, ()>,
        item_id: u64,
        quantity: i64,
    ) -> Result<Cart, ClientError> {
        let snapshot = self.begin(|cart| {
            let item = cart
                .item_mut(item_id)
                .ok_or(ClientError::UnknownCartItem(item_id))?;
            item.quantity = quantity;
            Ok(())
        })?;

        match self.client.update_cart_item(item_id, quantity).await {
            Ok(_) => Ok(self.reconcile().await),
            Err(err) => {
                self.rollback(snapshot, &err);
                Err(err)
            }
        }
    }

    pub async fn remove(&self, item_id: u64) -> Result<Cart, ClientError> {
        let _edit = self.edits.lock().await;

        let snapshot = self.begin(|cart| {
            cart.remove(item_id)
                .map(|_| ())
                .ok_or(ClientError::UnknownCartItem(item_id))
        })?;

        match self.client.remove_cart_item(item_id).await {
            Ok(_) => Ok(self.reconcile().await),
            Err(err) => {
                self.rollback(snapshot, &err);
                Err(err)
            }
        }
    }

    pub async fn clear(&self) -> Result<(), ClientError> {
        let _edit = self.edits.lock().await;
        self.client.clear_cart().await?;
        self.cart
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .items
            .clear();
        Ok(())
    }

    fn quantity_of(&self, item_id: u64) -> Result<i64, ClientError> {
        self.cart
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .item(item_id)
            .map(|item| item.quantity)
            .ok_or(ClientError::UnknownCartItem(item_id))
    }

    /// Applies `edit` to the local cart and returns the copy from before it.
    fn begin<F>(&self, edit: F) -> Result<Cart, ClientError>
    where
        F: FnOnce(&mut Cart) -> Result<(), ClientError>,
    {
        let mut cart = self.cart.write().unwrap_or_else(|e| e.into_inner());
        let snapshot = cart.clone();
        edit(&mut *cart)?;
        Ok(snapshot)
    }

    fn rollback(&self, snapshot: Cart, err: &ClientError) {
        warn!(value = %err, "Cart edit rejected, restoring local cart");
        self.replace(snapshot);
    }

    /// The server already accepted the edit, so a failed refetch keeps the
    /// optimistic copy.
    async fn reconcile(&self) -> Cart {
        match self.refresh().await {
            Ok(cart) => cart,
            Err(err) => {
                warn!(value = %err, "Failed to refetch cart after edit");
                self.cart()
            }
        }
    }

    fn replace(&self, cart: Cart) {
        *self.cart.write().unwrap_or_else(|e| e.into_inner()) = cart;
    }
}
