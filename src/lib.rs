use std::{
    cell::{Cell, Ref, RefCell, RefMut},
    rc::{Rc, Weak},
};

type Location = &'static std::panic::Location<'static>;

/// Storage behind an [`Obj`]. Remembers where it was last borrowed so a
/// conflicting borrow can point at the culprit.
pub struct Slot<T: ?Sized> {
    last_borrow: Cell<Option<Location>>,
    inner: RefCell<T>,
}

impl<T> Slot<T> {
    pub const fn new(value: T) -> Self {
        Slot {
            last_borrow: Cell::new(None),
            inner: RefCell::new(value),
        }
    }
}

impl<T: ?Sized> Slot<T> {
    #[track_caller]
    fn conflict(&self, kind: &str) -> ! {
        match self.last_borrow.get() {
            Some(previous) => panic!(
                "Obj<{}> already borrowed at {} ({} borrow requested at {})",
                std::any::type_name::<T>(),
                previous,
                kind,
                std::panic::Location::caller(),
            ),
            None => panic!("Obj<{}> already borrowed", std::any::type_name::<T>()),
        }
    }
}

/// Shared, single-threaded handle to a widget or widget container.
pub struct Obj<T: ?Sized>(Rc<Slot<T>>);

/// Non-owning counterpart of [`Obj`].
pub struct WeakObj<T: ?Sized>(Weak<Slot<T>>);

impl<T> Obj<T> {
    pub fn new(value: T) -> Self {
        Obj(Rc::new(Slot::new(value)))
    }
}

impl<T: ?Sized> Obj<T> {
    pub fn from_rc(rc: Rc<Slot<T>>) -> Self {
        Obj(rc)
    }
    pub fn rc_weak(&self) -> Weak<Slot<T>> {
        Rc::downgrade(&self.0)
    }
    pub fn downgrade(&self) -> WeakObj<T> {
        WeakObj(self.rc_weak())
    }

    #[track_caller]
    pub fn get(&self) -> Ref<'_, T> {
        match self.0.inner.try_borrow() {
            Ok(guard) => {
                self.0.last_borrow.set(Some(std::panic::Location::caller()));
                guard
            }
            Err(_) => self.0.conflict("shared"),
        }
    }
    #[track_caller]
    pub fn get_mut(&self) -> RefMut<'_, T> {
        match self.0.inner.try_borrow_mut() {
            Ok(guard) => {
                self.0.last_borrow.set(Some(std::panic::Location::caller()));
                guard
            }
            Err(_) => self.0.conflict("exclusive"),
        }
    }
    pub fn is_borrowed(&self) -> bool {
        self.0.inner.try_borrow_mut().is_err()
    }
}

impl<T: ?Sized> Clone for Obj<T> {
    fn clone(&self) -> Self {
        Obj(self.0.clone())
    }
}
impl<T: ?Sized> PartialEq for Obj<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
impl<T: ?Sized> Eq for Obj<T> {}

impl<T: ?Sized> WeakObj<T> {
    pub fn new(weak: Weak<Slot<T>>) -> Self {
        WeakObj(weak)
    }
    pub fn exists(&self) -> bool {
        self.0.strong_count() > 0
    }
    pub fn try_upgrade(&self) -> Option<Obj<T>> {
        self.0.upgrade().map(Obj::from_rc)
    }
    #[track_caller]
    pub fn upgrade(&self) -> Obj<T> {
        match self.try_upgrade() {
            Some(obj) => obj,
            None => panic!(
                "WeakObj<{}> object no longer exists",
                std::any::type_name::<T>()
            ),
        }
    }
}

impl<T: ?Sized> Clone for WeakObj<T> {
    fn clone(&self) -> Self {
        WeakObj(self.0.clone())
    }
}
impl<T: ?Sized> PartialEq for WeakObj<T> {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }
}
impl<T: ?Sized> Eq for WeakObj<T> {}

/// Downgrades an `Obj<Concrete>` into a `WeakObj<dyn Trait>`, letting the
/// target type drive the unsizing coercion.
#[macro_export]
macro_rules! obj_upcast {
    ($obj:expr) => {
        $crate::WeakObj::new($obj.rc_weak() as _)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Counter {
        fn bump(&mut self) -> u32;
    }
    struct Clicks(u32);
    impl Counter for Clicks {
        fn bump(&mut self) -> u32 {
            self.0 += 1;
            self.0
        }
    }

    #[test]
    fn upcast_shares_the_same_value() {
        let clicks = Obj::new(Clicks(0));
        let counter: WeakObj<dyn Counter> = obj_upcast!(clicks);
        assert_eq!(counter.upgrade().get_mut().bump(), 1);
        assert_eq!(clicks.get().0, 1);
    }

    #[test]
    fn weak_dies_with_last_strong_handle() {
        let clicks = Obj::new(Clicks(3));
        let weak = clicks.downgrade();
        assert!(weak.exists());
        drop(clicks);
        assert!(!weak.exists());
        assert!(weak.try_upgrade().is_none());
    }

    #[test]
    #[should_panic(expected = "already borrowed")]
    fn conflicting_borrow_panics() {
        let clicks = Obj::new(Clicks(0));
        let _guard = clicks.get_mut();
        let _ = clicks.get();
    }

    #[test]
    fn handles_compare_by_identity() {
        let a = Obj::new(Clicks(0));
        let b = Obj::new(Clicks(0));
        assert!(a == a.clone());
        assert!(a != b);
        assert!(a.downgrade() == a.downgrade());
        assert!(!a.is_borrowed());
    }
}
