use base::entities::Order;
use base::stores::OrderStore;
use base::OrderBotResult;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Single owner of the order store.
///
/// Every operation holds the book's lock for its whole load, modify and save cycle, so
/// operations issued from several threads are applied one after another and none of them
/// overwrites a change it has not seen.
pub struct OrderBook<S: OrderStore> {
    store: S,
    lock: Mutex<()>,
}

impl<S: OrderStore> OrderBook<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn exclusive(&self) -> MutexGuard<'_, ()> {
        // the guarded value is empty, a panicked holder cannot leave it inconsistent
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_order(&self, order: Order) -> OrderBotResult<Order> {
        let _guard = self.exclusive();

        let mut orders = self.store.load()?;
        orders.push(order.clone());
        self.store.save(&orders)?;

        Ok(order)
    }

    pub fn list_orders(&self) -> OrderBotResult<Vec<Order>> {
        let _guard = self.exclusive();
        self.store.load()
    }

    /// Removes every order with the given id and returns how many were removed.
    pub fn delete_order(&self, order_id: &str) -> OrderBotResult<usize> {
        let _guard = self.exclusive();

        let mut orders = self.store.load()?;
        let number_of_orders = orders.len();
        orders.retain(|order| order.order_id != order_id);
        self.store.save(&orders)?;

        Ok(number_of_orders - orders.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base::OrderBotError;
    use std::cell::{Cell, RefCell};
    use std::io;
    use std::path::PathBuf;

    #[derive(Default)]
    struct InMemoryOrderStore {
        orders: RefCell<Vec<Order>>,
        fail_saves: Cell<bool>,
        number_of_saves: Cell<u32>,
    }

    impl OrderStore for InMemoryOrderStore {
        fn init(&self) -> OrderBotResult<()> {
            Ok(())
        }

        fn load(&self) -> OrderBotResult<Vec<Order>> {
            Ok(self.orders.borrow().clone())
        }

        fn save(&self, orders: &[Order]) -> OrderBotResult<()> {
            if self.fail_saves.get() {
                return Err(OrderBotError::StorageUnavailable {
                    path: PathBuf::from("memory"),
                    source: io::Error::new(io::ErrorKind::Other, "disk full"),
                });
            }

            self.number_of_saves.set(self.number_of_saves.get() + 1);
            *self.orders.borrow_mut() = orders.to_vec();
            Ok(())
        }
    }

    fn order(id: &str, user: &str) -> Order {
        Order {
            order_id: id.to_string(),
            user: user.to_string(),
            product: String::from("Widget"),
            quantity: 1,
        }
    }

    #[test]
    #[allow(non_snake_case)]
    fn add_order__existing_orders__appends_to_the_end() {
        let book = OrderBook::new(InMemoryOrderStore::default());
        book.add_order(order("A1", "alice")).unwrap();

        let added = book.add_order(order("A1", "bob")).unwrap();

        assert_eq!(added, order("A1", "bob"));
        assert_eq!(
            book.list_orders().unwrap(),
            vec![order("A1", "alice"), order("A1", "bob")]
        );
    }

    #[test]
    #[allow(non_snake_case)]
    fn delete_order__duplicated_id__removes_all_matches_and_keeps_order_of_others() {
        let book = OrderBook::new(InMemoryOrderStore::default());
        for (id, user) in [("A1", "alice"), ("B1", "bob"), ("A1", "carol"), ("C1", "dave")] {
            book.add_order(order(id, user)).unwrap();
        }

        let removed = book.delete_order("A1").unwrap();

        assert_eq!(removed, 2);
        assert_eq!(
            book.list_orders().unwrap(),
            vec![order("B1", "bob"), order("C1", "dave")]
        );
    }

    #[test]
    #[allow(non_snake_case)]
    fn delete_order__unknown_id__store_unchanged_and_still_saved() {
        let book = OrderBook::new(InMemoryOrderStore::default());
        book.add_order(order("A1", "alice")).unwrap();

        let removed = book.delete_order("missing").unwrap();

        assert_eq!(removed, 0);
        assert_eq!(book.list_orders().unwrap(), vec![order("A1", "alice")]);
        assert_eq!(book.store().number_of_saves.get(), 2);
    }

    #[test]
    #[allow(non_snake_case)]
    fn add_order__save_fails__error_and_store_unchanged() {
        let book = OrderBook::new(InMemoryOrderStore::default());
        book.add_order(order("A1", "alice")).unwrap();
        book.store().fail_saves.set(true);

        let result = book.add_order(order("A2", "bob"));

        assert!(matches!(
            result,
            Err(OrderBotError::StorageUnavailable { .. })
        ));
        assert_eq!(book.list_orders().unwrap(), vec![order("A1", "alice")]);
    }
}
