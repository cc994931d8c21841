use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type OrderId = String;
pub type UserName = String;
pub type ProductName = String;
pub type OrderQuantity = i64;

/// A single order record as it is persisted in the store file.
///
/// `order_id` is supplied by the caller and is not guaranteed to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub user: UserName,
    pub product: ProductName,
    pub quantity: OrderQuantity,
}

/// Order properties supplied by a command, before the sender is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub order_id: OrderId,
    pub product: ProductName,
    pub quantity: OrderQuantity,
}

impl NewOrder {
    pub fn placed_by(self, user: impl Into<UserName>) -> Order {
        Order {
            order_id: self.order_id,
            user: user.into(),
            product: self.product,
            quantity: self.quantity,
        }
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "訂單ID: {}, 用戶: {}, 產品: {}, 數量: {}",
            self.order_id, self.user, self.product, self.quantity
        )
    }
}
