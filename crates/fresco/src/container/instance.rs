use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A resolved, type-erased value held by a container.
///
/// A capability `T` is always stored as an `Arc<T>`, which lets trait objects
/// travel through the container: [`Instance::shared`] wraps the `Arc` and
/// [`Instance::downcast`] hands a clone of it back.
#[derive(Clone)]
pub struct Instance(Arc<dyn Any + Send + Sync>);

impl Instance {
    pub fn shared<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self(Arc::new(value))
    }

    /// Returns the shared value if this instance holds an `Arc<T>`.
    pub fn downcast<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.0.downcast_ref::<Arc<T>>().map(Arc::clone)
    }

    /// Returns true if both instances point to the same value.
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Instance").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::Instance;
    use std::fmt::Debug;
    use std::sync::Arc;

    #[test]
    fn downcast_returns_the_shared_value() {
        let value = Arc::new(String::from("fresco"));
        let instance = Instance::shared(Arc::clone(&value));

        let resolved = instance.downcast::<String>().unwrap();
        assert!(Arc::ptr_eq(&value, &resolved));
        assert!(instance.downcast::<u32>().is_none());
    }

    #[test]
    fn trait_objects_round_trip() {
        let value: Arc<dyn Debug + Send + Sync> = Arc::new(7_u8);
        let instance = Instance::shared(value);

        assert_eq!(format!("{:?}", instance.downcast::<dyn Debug + Send + Sync>().unwrap()), "7");
    }

    #[test]
    fn clones_share_identity() {
        let instance = Instance::shared(Arc::new(1_u32));
        let other = Instance::shared(Arc::new(1_u32));

        assert!(instance.ptr_eq(&instance.clone()));
        assert!(!instance.ptr_eq(&other));
    }
}
