use std::cell::RefCell;
use std::rc::Rc;

/// Single-threaded shared ownership of a mutable value.
///
/// Both the controller and every click handler of a button hold a `Shared`
/// handle to that button's state; borrows are scoped to closures so a handler
/// never keeps a borrow alive across a call into the page or the notifier.
pub struct Shared<T: ?Sized> {
    rc: Rc<RefCell<T>>,
}

impl<T> Shared<T> {
    pub fn new(val: T) -> Self {
        Shared {
            rc: Rc::new(RefCell::new(val)),
        }
    }
}

impl<T: ?Sized> Shared<T> {
    /// Executes the given function with an immutable reference to the wrapped value.
    ///
    /// # Panics
    ///
    /// Panics if the wrapped value is being used by an `exec_mut` call.
    ///
    /// # Example
    ///
    /// ```
    /// # use like_button::shared::Shared;
    /// let count = Shared::new(41i64);
    /// assert_eq!(count.exec(|&n| n + 1), 42);
    /// ```
    pub fn exec<Ret, F: FnOnce(&T) -> Ret>(&self, f: F) -> Ret {
        f(&self.rc.borrow())
    }

    /// Executes the given function with a mutable reference to the wrapped value.
    ///
    /// # Panics
    /// Panics if the wrapped value is being used by another `exec` or `exec_mut` call.
    ///
    /// # Example
    ///
    /// ```
    /// # use like_button::shared::Shared;
    /// let liked = Shared::new(false);
    /// liked.exec_mut(|liked| *liked = !*liked);
    /// assert!(liked.exec(|&liked| liked));
    /// ```
    pub fn exec_mut<Ret, F: FnOnce(&mut T) -> Ret>(&self, f: F) -> Ret {
        f(&mut self.rc.borrow_mut())
    }
}

impl<T: ?Sized> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Shared {
            rc: self.rc.clone(),
        }
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(Default::default())
    }
}
